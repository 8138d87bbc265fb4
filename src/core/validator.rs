//! Configuration validation.
//!
//! Checks a resolved config against range, allow-list, and ratio rules and
//! returns every violation found, not just the first:
//! - environment and VPC CIDR must be set
//! - 1 <= max AZs <= 6, 1 <= NAT gateways <= max AZs
//! - desired count >= 1, max capacity >= desired count
//! - CPU, memory, and log retention drawn from their allow-lists
//! - 1 <= memory / CPU <= 4

use super::constants::*;
use super::types::EnvironmentConfig;
use thiserror::Error;

/// A single rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("Environment is required")]
    MissingEnvironment,

    #[error("VPC CIDR is required")]
    MissingVpcCidr,

    #[error("Max AZs must be between 1 and 6")]
    MaxAzsOutOfRange { max_azs: u32 },

    #[error("NAT gateways must be between 1 and max AZs")]
    NatGatewaysOutOfRange { nat_gateways: u32, max_azs: u32 },

    #[error("Desired count must be at least 1")]
    DesiredCountTooLow { desired_count: u32 },

    #[error("Max capacity must be at least desired count")]
    MaxCapacityBelowDesired { max_capacity: u32, desired_count: u32 },

    #[error("Invalid CPU value: {cpu}. Valid values: {}", join_values(&VALID_CPU_VALUES))]
    InvalidCpu { cpu: u32 },

    #[error("Invalid memory value: {memory}. Valid values: {}", join_values(&VALID_MEMORY_VALUES))]
    InvalidMemory { memory: u32 },

    #[error("Invalid CPU to memory ratio: {:.2}. Must be between 1:1 and 1:4", ratio(.cpu, .memory))]
    InvalidCpuMemoryRatio { cpu: u32, memory: u32 },

    #[error("Invalid log retention days: {days}. Valid values: {}", join_values(&VALID_LOG_RETENTION_DAYS))]
    InvalidLogRetention { days: u32 },
}

/// Validation failed; carries every violation found in one pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Environment configuration validation failed:\n{}", join_lines(.violations))]
pub struct ConfigurationError {
    pub violations: Vec<Violation>,
}

fn ratio(cpu: &u32, memory: &u32) -> f64 {
    f64::from(*memory) / f64::from(*cpu)
}

fn join_lines(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(Violation::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Validate a resolved config. Returns a list of violations (empty = valid).
pub fn validate(config: &EnvironmentConfig) -> Vec<Violation> {
    let mut violations = Vec::new();

    // Whitespace-only names count as missing.
    if config.environment.trim().is_empty() {
        violations.push(Violation::MissingEnvironment);
    }

    if config.vpc_cidr.trim().is_empty() {
        violations.push(Violation::MissingVpcCidr);
    }

    if !(MIN_AZS..=MAX_AZS).contains(&config.max_azs) {
        violations.push(Violation::MaxAzsOutOfRange {
            max_azs: config.max_azs,
        });
    }

    if config.nat_gateways < 1 || config.nat_gateways > config.max_azs {
        violations.push(Violation::NatGatewaysOutOfRange {
            nat_gateways: config.nat_gateways,
            max_azs: config.max_azs,
        });
    }

    if config.desired_count < 1 {
        violations.push(Violation::DesiredCountTooLow {
            desired_count: config.desired_count,
        });
    }

    if config.auto_scaling_max_capacity < config.desired_count {
        violations.push(Violation::MaxCapacityBelowDesired {
            max_capacity: config.auto_scaling_max_capacity,
            desired_count: config.desired_count,
        });
    }

    violations.extend(cpu_violation(config.fargate_cpu));
    violations.extend(memory_violation(config.fargate_memory));
    violations.extend(ratio_violation(config.fargate_cpu, config.fargate_memory));

    if !VALID_LOG_RETENTION_DAYS.contains(&config.log_retention_days) {
        violations.push(Violation::InvalidLogRetention {
            days: config.log_retention_days,
        });
    }

    violations
}

/// Validate and fold all violations into a single error.
pub fn ensure_valid(config: &EnvironmentConfig) -> Result<(), ConfigurationError> {
    let violations = validate(config);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ConfigurationError { violations })
    }
}

/// Fail-first check of a task size: CPU, then memory, then ratio.
pub fn check_fargate_resources(cpu: u32, memory: u32) -> Result<(), Violation> {
    if let Some(v) = cpu_violation(cpu) {
        return Err(v);
    }
    if let Some(v) = memory_violation(memory) {
        return Err(v);
    }
    if let Some(v) = ratio_violation(cpu, memory) {
        return Err(v);
    }
    Ok(())
}

fn cpu_violation(cpu: u32) -> Option<Violation> {
    (!VALID_CPU_VALUES.contains(&cpu)).then_some(Violation::InvalidCpu { cpu })
}

fn memory_violation(memory: u32) -> Option<Violation> {
    (!VALID_MEMORY_VALUES.contains(&memory)).then_some(Violation::InvalidMemory { memory })
}

/// Ratio check in integer arithmetic. Skipped when CPU is zero, which the
/// allow-list check already reports.
fn ratio_violation(cpu: u32, memory: u32) -> Option<Violation> {
    if cpu == 0 {
        return None;
    }
    let (cpu64, mem64) = (u64::from(cpu), u64::from(memory));
    let in_range = mem64 >= cpu64 * u64::from(MIN_MEMORY_CPU_RATIO)
        && mem64 <= cpu64 * u64::from(MAX_MEMORY_CPU_RATIO);
    (!in_range).then_some(Violation::InvalidCpuMemoryRatio { cpu, memory })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::presets::preset;
    use proptest::prelude::*;

    fn valid_config() -> EnvironmentConfig {
        preset("staging").unwrap()
    }

    fn messages(violations: &[Violation]) -> Vec<String> {
        violations.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate(&valid_config()).is_empty());
        assert!(ensure_valid(&valid_config()).is_ok());
    }

    #[test]
    fn test_missing_environment_and_cidr() {
        let mut c = valid_config();
        c.environment = String::new();
        c.vpc_cidr = "  ".to_string();
        let v = validate(&c);
        assert_eq!(v, vec![Violation::MissingEnvironment, Violation::MissingVpcCidr]);
    }

    #[test]
    fn test_blank_environment_is_missing() {
        let mut c = valid_config();
        c.environment = " \t".to_string();
        assert_eq!(validate(&c), vec![Violation::MissingEnvironment]);
    }

    #[test]
    fn test_max_azs_bounds() {
        let mut c = valid_config();
        c.max_azs = 7;
        assert!(messages(&validate(&c)).contains(&"Max AZs must be between 1 and 6".to_string()));

        c.max_azs = 6;
        assert!(validate(&c).is_empty());

        c.max_azs = 0;
        c.nat_gateways = 0;
        let m = messages(&validate(&c));
        assert!(m.iter().any(|s| s.contains("Max AZs")));
        assert!(m.iter().any(|s| s.contains("NAT gateways")));
    }

    #[test]
    fn test_nat_gateways_above_max_azs() {
        let mut c = valid_config();
        c.nat_gateways = 3;
        c.max_azs = 2;
        assert_eq!(
            validate(&c),
            vec![Violation::NatGatewaysOutOfRange {
                nat_gateways: 3,
                max_azs: 2
            }]
        );
    }

    #[test]
    fn test_desired_count_zero() {
        let mut c = valid_config();
        c.desired_count = 0;
        let m = messages(&validate(&c));
        assert_eq!(m, vec!["Desired count must be at least 1"]);
    }

    #[test]
    fn test_max_capacity_below_desired() {
        let mut c = valid_config();
        c.desired_count = 5;
        c.auto_scaling_max_capacity = 2;
        let err = ensure_valid(&c).unwrap_err();
        assert!(err
            .to_string()
            .contains("Max capacity must be at least desired count"));
    }

    #[test]
    fn test_invalid_cpu() {
        let mut c = valid_config();
        c.fargate_cpu = 300;
        let err = ensure_valid(&c).unwrap_err();
        assert!(err.to_string().contains("Invalid CPU value: 300"));
        assert!(err.to_string().contains("256, 512, 1024, 2048, 4096"));
    }

    #[test]
    fn test_invalid_memory() {
        let mut c = valid_config();
        c.fargate_memory = 1000;
        let m = messages(&validate(&c));
        assert!(m.iter().any(|s| s.starts_with("Invalid memory value: 1000")));
    }

    #[test]
    fn test_invalid_log_retention() {
        let mut c = valid_config();
        c.log_retention_days = 10;
        assert_eq!(
            validate(&c),
            vec![Violation::InvalidLogRetention { days: 10 }]
        );
    }

    #[test]
    fn test_ratio_examples() {
        assert!(check_fargate_resources(256, 512).is_ok());
        assert_eq!(
            check_fargate_resources(4096, 512),
            Err(Violation::InvalidCpuMemoryRatio {
                cpu: 4096,
                memory: 512
            })
        );
        assert!(check_fargate_resources(256, 4096).is_err());
        assert!(check_fargate_resources(1024, 1024).is_ok());
        assert!(check_fargate_resources(1024, 4096).is_ok());
    }

    #[test]
    fn test_ratio_message_format() {
        let v = Violation::InvalidCpuMemoryRatio {
            cpu: 2048,
            memory: 512,
        };
        assert_eq!(
            v.to_string(),
            "Invalid CPU to memory ratio: 0.25. Must be between 1:1 and 1:4"
        );
        let v = Violation::InvalidCpuMemoryRatio {
            cpu: 256,
            memory: 4096,
        };
        assert!(v.to_string().contains("ratio: 16.00"));
    }

    #[test]
    fn test_check_fargate_resources_fail_first() {
        assert!(matches!(
            check_fargate_resources(300, 1000),
            Err(Violation::InvalidCpu { cpu: 300 })
        ));
        assert!(matches!(
            check_fargate_resources(256, 1000),
            Err(Violation::InvalidMemory { memory: 1000 })
        ));
    }

    #[test]
    fn test_zero_cpu_skips_ratio() {
        let mut c = valid_config();
        c.fargate_cpu = 0;
        assert_eq!(validate(&c), vec![Violation::InvalidCpu { cpu: 0 }]);
    }

    #[test]
    fn test_collects_every_violation() {
        let mut c = valid_config();
        c.environment = String::new();
        c.vpc_cidr = String::new();
        c.max_azs = 9;
        c.desired_count = 0;
        c.fargate_cpu = 300;
        c.fargate_memory = 100;
        c.log_retention_days = 2;
        let err = ensure_valid(&c).unwrap_err();
        // env, cidr, azs, desired, cpu, memory, ratio, retention
        assert_eq!(err.violations.len(), 8);

        let text = err.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Environment configuration validation failed:");
        assert_eq!(lines.len(), 9);
        let distinct: std::collections::HashSet<_> = lines[1..].iter().collect();
        assert_eq!(distinct.len(), 8);
    }

    proptest! {
        #[test]
        fn prop_ratio_rule_over_allow_lists(
            cpu in proptest::sample::select(VALID_CPU_VALUES.to_vec()),
            memory in proptest::sample::select(VALID_MEMORY_VALUES.to_vec()),
        ) {
            let in_range = memory >= cpu && memory <= cpu * 4;
            prop_assert_eq!(check_fargate_resources(cpu, memory).is_ok(), in_range);
        }

        #[test]
        fn prop_validate_never_panics(
            max_azs in 0u32..10,
            nat in 0u32..10,
            desired in 0u32..20,
            max_cap in 0u32..20,
            cpu in 0u32..5000,
            memory in 0u32..9000,
            days in 0u32..4000,
        ) {
            let mut c = valid_config();
            c.max_azs = max_azs;
            c.nat_gateways = nat;
            c.desired_count = desired;
            c.auto_scaling_max_capacity = max_cap;
            c.fargate_cpu = cpu;
            c.fargate_memory = memory;
            c.log_retention_days = days;
            let violations = validate(&c);
            prop_assert_eq!(ensure_valid(&c).is_ok(), violations.is_empty());
        }
    }
}
