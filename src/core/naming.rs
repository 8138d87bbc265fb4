//! Resource naming and tagging helpers.

use super::constants::{CREATED_BY, MANAGED_BY};
use super::types::{EnvironmentConfig, LaunchSettings, Tags};

/// `{base}-{environment}-{resource_type}`, e.g. `shop-prod-cluster`.
pub fn resource_name(base: &str, environment: &str, resource_type: &str) -> String {
    format!("{}-{}-{}", base, environment, resource_type)
}

/// The five cost-allocation tags every resource carries.
pub fn cost_allocation_tags(project: &str, environment: &str, cost_center: &str) -> Tags {
    Tags::from([
        ("Project".to_string(), project.to_string()),
        ("Environment".to_string(), environment.to_string()),
        ("CostCenter".to_string(), cost_center.to_string()),
        ("ManagedBy".to_string(), MANAGED_BY.to_string()),
        ("CreatedBy".to_string(), CREATED_BY.to_string()),
    ])
}

/// Merge tag layers; a later layer wins on key collision.
pub fn merge_tags<'a, I>(layers: I) -> Tags
where
    I: IntoIterator<Item = &'a Tags>,
{
    let mut merged = Tags::new();
    for layer in layers {
        for (key, value) in layer {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}

/// Cost-allocation tags plus optional extras (extras win).
pub fn standard_tags(
    project: &str,
    environment: &str,
    cost_center: &str,
    additional: Option<&Tags>,
) -> Tags {
    let base = cost_allocation_tags(project, environment, cost_center);
    match additional {
        Some(extra) => merge_tags([&base, extra]),
        None => base,
    }
}

/// Tags for the deployment stack: config tags overlaid by the
/// cost-allocation tags for the application.
pub fn stack_tags(settings: &LaunchSettings, config: &EnvironmentConfig) -> Tags {
    let allocation =
        cost_allocation_tags(&settings.app_name, &config.environment, &config.cost_center);
    merge_tags([&config.tags, &allocation])
}
