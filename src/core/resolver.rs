//! Layered configuration resolution.
//!
//! Precedence, lowest to highest:
//! 1. built-in preset for the environment (falls back to `dev`)
//! 2. caller overrides, field by field (tags merged per key)
//! 3. numeric process variables (`FARGATE_CPU`, `DESIRED_COUNT`, ...)
//!
//! Resolution is total: it never fails. Anything inconsistent is left for
//! the validator to report.

use super::constants::env_vars::{self, *};
use super::constants::DEFAULT_ENVIRONMENT;
use super::presets::{is_known_environment, preset_or_default};
use super::types::{ConfigOverrides, EnvironmentConfig};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Resolve the configuration for `environment` from all three layers.
pub fn resolve(
    environment: &str,
    overrides: &ConfigOverrides,
    process_env: &HashMap<String, String>,
) -> EnvironmentConfig {
    if !is_known_environment(environment) {
        warn!(
            environment,
            fallback = DEFAULT_ENVIRONMENT,
            "unknown environment, using fallback preset"
        );
    }
    let mut config = preset_or_default(environment);
    config.environment = environment.to_string();

    // COST_CENTER replaces the preset value but yields to explicit overrides.
    if let Some(cost_center) = non_empty(process_env, COST_CENTER) {
        debug!(cost_center, "cost center from process environment");
        config.cost_center = cost_center.to_string();
    }

    apply_overrides(&mut config, overrides);
    apply_env_overrides(&mut config, process_env);
    config
}

/// Apply an override layer on top of `config`.
pub fn apply_overrides(config: &mut EnvironmentConfig, overrides: &ConfigOverrides) {
    if let Some(ref v) = overrides.vpc_cidr {
        config.vpc_cidr.clone_from(v);
    }
    if let Some(v) = overrides.max_azs {
        config.max_azs = v;
    }
    if let Some(v) = overrides.nat_gateways {
        config.nat_gateways = v;
    }
    if let Some(v) = overrides.fargate_cpu {
        config.fargate_cpu = v;
    }
    if let Some(v) = overrides.fargate_memory {
        config.fargate_memory = v;
    }
    if let Some(v) = overrides.desired_count {
        config.desired_count = v;
    }
    if let Some(v) = overrides.auto_scaling_max_capacity {
        config.auto_scaling_max_capacity = v;
    }
    if let Some(v) = overrides.enable_container_insights {
        config.enable_container_insights = v;
    }
    if let Some(v) = overrides.enable_xray {
        config.enable_xray = v;
    }
    if let Some(v) = overrides.log_retention_days {
        config.log_retention_days = v;
    }
    if let Some(ref v) = overrides.cost_center {
        config.cost_center.clone_from(v);
    }
    for (key, value) in &overrides.tags {
        config.tags.insert(key.clone(), value.clone());
    }
}

/// Apply numeric process variables. Absent, empty, or unparseable values
/// keep the current value.
pub fn apply_env_overrides(config: &mut EnvironmentConfig, process_env: &HashMap<String, String>) {
    for var in env_vars::NUMERIC_OVERRIDES {
        let Some(value) = env_number(process_env, var) else {
            continue;
        };
        if let Some(slot) = numeric_slot(config, var) {
            debug!(var, value, "numeric override from process environment");
            *slot = value;
        }
    }
}

fn numeric_slot<'a>(config: &'a mut EnvironmentConfig, var: &str) -> Option<&'a mut u32> {
    match var {
        FARGATE_CPU => Some(&mut config.fargate_cpu),
        FARGATE_MEMORY => Some(&mut config.fargate_memory),
        DESIRED_COUNT => Some(&mut config.desired_count),
        AUTO_SCALING_MAX_CAPACITY => Some(&mut config.auto_scaling_max_capacity),
        LOG_RETENTION_DAYS => Some(&mut config.log_retention_days),
        _ => None,
    }
}

/// Parse a numeric process variable. A present but malformed value is
/// ignored (with a warning) rather than treated as zero.
fn env_number(process_env: &HashMap<String, String>, var: &str) -> Option<u32> {
    let raw = non_empty(process_env, var)?;
    match raw.parse::<u32>() {
        Ok(n) => Some(n),
        Err(_) => {
            warn!(var, value = raw, "ignoring non-numeric process variable");
            None
        }
    }
}

fn non_empty<'a>(process_env: &'a HashMap<String, String>, var: &str) -> Option<&'a str> {
    process_env
        .get(var)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}
