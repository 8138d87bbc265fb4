//! Static tables — Fargate allow-lists, retention periods, scaffold defaults.

/// Fargate task CPU units accepted by the provider.
pub const VALID_CPU_VALUES: [u32; 5] = [256, 512, 1024, 2048, 4096];

/// Fargate task memory sizes (MiB) accepted by the provider.
pub const VALID_MEMORY_VALUES: [u32; 9] = [512, 1024, 2048, 3072, 4096, 5120, 6144, 7168, 8192];

/// Log group retention periods (days) accepted by the provider.
pub const VALID_LOG_RETENTION_DAYS: [u32; 17] = [
    1, 3, 5, 7, 14, 30, 60, 90, 120, 150, 180, 365, 400, 545, 731, 1827, 3653,
];

/// Known deployment environments, each backed by a preset.
pub const ENVIRONMENTS: [&str; 3] = ["dev", "staging", "production"];

/// Preset used when the requested environment is unknown.
pub const DEFAULT_ENVIRONMENT: &str = "dev";

/// Memory/CPU ratio bounds (inclusive).
pub const MIN_MEMORY_CPU_RATIO: u32 = 1;
pub const MAX_MEMORY_CPU_RATIO: u32 = 4;

/// Availability zone bounds (inclusive).
pub const MIN_AZS: u32 = 1;
pub const MAX_AZS: u32 = 6;

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_CPU: u32 = 256;
pub const DEFAULT_MEMORY: u32 = 512;
pub const DEFAULT_DESIRED_COUNT: u32 = 1;
pub const DEFAULT_LOG_RETENTION_DAYS: u32 = 7;
pub const DEFAULT_ENABLE_CONTAINER_INSIGHTS: bool = true;
pub const DEFAULT_ENABLE_XRAY: bool = false;

pub const DEFAULT_VPC_CIDR: &str = "10.0.0.0/16";
pub const DEFAULT_MAX_AZS: u32 = 2;
pub const DEFAULT_NAT_GATEWAYS: u32 = 1;

/// Constant tag values stamped on every taggable resource.
pub const MANAGED_BY: &str = "CDK";
pub const CREATED_BY: &str = "cdk-fargate-scaffold";

/// Project tag used by the built-in presets.
pub const PRESET_PROJECT: &str = "scaffold";

// ============================================================================
// Process environment variables
// ============================================================================

pub mod env_vars {
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
    pub const APP_NAME: &str = "APP_NAME";
    pub const AWS_REGION: &str = "AWS_REGION";
    pub const AWS_ACCOUNT_ID: &str = "AWS_ACCOUNT_ID";
    pub const DOCKER_IMAGE: &str = "DOCKER_IMAGE";
    pub const FARGATE_CPU: &str = "FARGATE_CPU";
    pub const FARGATE_MEMORY: &str = "FARGATE_MEMORY";
    pub const DESIRED_COUNT: &str = "DESIRED_COUNT";
    pub const AUTO_SCALING_MAX_CAPACITY: &str = "AUTO_SCALING_MAX_CAPACITY";
    pub const LOG_RETENTION_DAYS: &str = "LOG_RETENTION_DAYS";
    pub const COST_CENTER: &str = "COST_CENTER";

    /// Must be present (and non-empty) before resolution starts.
    pub const REQUIRED: [&str; 3] = [APP_NAME, AWS_REGION, AWS_ACCOUNT_ID];

    /// Numeric fields the process environment may override.
    pub const NUMERIC_OVERRIDES: [&str; 5] = [
        FARGATE_CPU,
        FARGATE_MEMORY,
        DESIRED_COUNT,
        AUTO_SCALING_MAX_CAPACITY,
        LOG_RETENTION_DAYS,
    ];
}

// ============================================================================
// Resource-type suffixes for naming
// ============================================================================

pub mod resource_types {
    pub const VPC: &str = "vpc";
    pub const CLUSTER: &str = "cluster";
    pub const SERVICE: &str = "service";
    pub const REPOSITORY: &str = "repository";
    pub const LOAD_BALANCER: &str = "loadbalancer";
    pub const TARGET_GROUP: &str = "targetgroup";
    pub const LOG_GROUP: &str = "loggroup";
    pub const SECURITY_GROUP: &str = "securitygroup";
}

// ============================================================================
// Resource limits
// ============================================================================

/// Bounds and allow-list for one Fargate resource dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceLimit {
    pub min: u32,
    pub max: u32,
    pub valid: &'static [u32],
}

/// Fargate CPU and memory limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FargateResourceLimits {
    pub cpu: ResourceLimit,
    pub memory: ResourceLimit,
}

/// Fargate task sizing limits derived from the allow-lists.
pub fn fargate_resource_limits() -> FargateResourceLimits {
    FargateResourceLimits {
        cpu: ResourceLimit {
            min: VALID_CPU_VALUES[0],
            max: VALID_CPU_VALUES[VALID_CPU_VALUES.len() - 1],
            valid: &VALID_CPU_VALUES,
        },
        memory: ResourceLimit {
            min: VALID_MEMORY_VALUES[0],
            max: VALID_MEMORY_VALUES[VALID_MEMORY_VALUES.len() - 1],
            valid: &VALID_MEMORY_VALUES,
        },
    }
}

/// Render an allow-list as `"a, b, c"` for error messages.
pub fn join_values(values: &[u32]) -> String {
    values
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limits_match_allow_lists() {
        let limits = fargate_resource_limits();
        assert_eq!(limits.cpu.min, 256);
        assert_eq!(limits.cpu.max, 4096);
        assert_eq!(limits.memory.min, 512);
        assert_eq!(limits.memory.max, 8192);
        assert_eq!(limits.cpu.valid, &VALID_CPU_VALUES);
    }

    #[test]
    fn test_allow_lists_sorted() {
        assert!(VALID_CPU_VALUES.windows(2).all(|w| w[0] < w[1]));
        assert!(VALID_MEMORY_VALUES.windows(2).all(|w| w[0] < w[1]));
        assert!(VALID_LOG_RETENTION_DAYS.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_default_environment_is_known() {
        assert!(ENVIRONMENTS.contains(&DEFAULT_ENVIRONMENT));
    }

    #[test]
    fn test_join_values() {
        assert_eq!(join_values(&[256, 512]), "256, 512");
        assert_eq!(join_values(&[]), "");
    }
}
