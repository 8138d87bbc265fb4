//! Built-in environment presets — the lowest-precedence configuration layer.

use super::constants::*;
use super::types::{EnvironmentConfig, Tags};

/// Look up the preset for a known environment name.
pub fn preset(environment: &str) -> Option<EnvironmentConfig> {
    let config = match environment {
        "dev" => dev(),
        "staging" => staging(),
        "production" => production(),
        _ => return None,
    };
    Some(config)
}

/// Preset for `environment`, or the default environment's preset when unknown.
pub fn preset_or_default(environment: &str) -> EnvironmentConfig {
    preset(environment).unwrap_or_else(default_preset)
}

/// The preset used as fallback for unknown environment names.
pub fn default_preset() -> EnvironmentConfig {
    dev()
}

pub fn is_known_environment(environment: &str) -> bool {
    ENVIRONMENTS.contains(&environment)
}

fn dev() -> EnvironmentConfig {
    EnvironmentConfig {
        environment: "dev".to_string(),
        vpc_cidr: DEFAULT_VPC_CIDR.to_string(),
        max_azs: DEFAULT_MAX_AZS,
        nat_gateways: DEFAULT_NAT_GATEWAYS,
        fargate_cpu: DEFAULT_CPU,
        fargate_memory: DEFAULT_MEMORY,
        desired_count: DEFAULT_DESIRED_COUNT,
        auto_scaling_max_capacity: 2,
        enable_container_insights: DEFAULT_ENABLE_CONTAINER_INSIGHTS,
        enable_xray: DEFAULT_ENABLE_XRAY,
        log_retention_days: DEFAULT_LOG_RETENTION_DAYS,
        cost_center: "dev".to_string(),
        tags: preset_tags("dev"),
    }
}

fn staging() -> EnvironmentConfig {
    EnvironmentConfig {
        environment: "staging".to_string(),
        vpc_cidr: "10.1.0.0/16".to_string(),
        max_azs: 2,
        nat_gateways: 1,
        fargate_cpu: 512,
        fargate_memory: 1024,
        desired_count: 2,
        auto_scaling_max_capacity: 5,
        enable_container_insights: true,
        enable_xray: true,
        log_retention_days: 14,
        cost_center: "staging".to_string(),
        tags: preset_tags("staging"),
    }
}

fn production() -> EnvironmentConfig {
    EnvironmentConfig {
        environment: "production".to_string(),
        vpc_cidr: "10.2.0.0/16".to_string(),
        max_azs: 3,
        nat_gateways: 3,
        fargate_cpu: 1024,
        fargate_memory: 2048,
        desired_count: 3,
        auto_scaling_max_capacity: 10,
        enable_container_insights: true,
        enable_xray: true,
        log_retention_days: 30,
        cost_center: "production".to_string(),
        tags: preset_tags("production"),
    }
}

fn preset_tags(environment: &str) -> Tags {
    Tags::from([
        ("Environment".to_string(), environment.to_string()),
        ("CostCenter".to_string(), environment.to_string()),
        ("Project".to_string(), PRESET_PROJECT.to_string()),
    ])
}
