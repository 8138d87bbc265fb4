//! Configuration types — resolved environment config, override layers,
//! launch settings, and the synthesized deployment manifest.
//!
//! All document types serialize with camelCase keys so context files and
//! manifests read the same as the scaffold's JSON context.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Resource tags. Keys are unique; later writers win on merge.
pub type Tags = BTreeMap<String, String>;

// ============================================================================
// Resolved configuration
// ============================================================================

/// Fully resolved configuration for one deployment environment.
///
/// Built once per run by the resolver, validated, then treated as read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentConfig {
    /// Environment name (selects the preset)
    pub environment: String,

    /// VPC network block in CIDR notation
    pub vpc_cidr: String,

    /// Availability zones to span
    pub max_azs: u32,

    /// NAT gateways (1..=max_azs)
    pub nat_gateways: u32,

    /// Task CPU units
    pub fargate_cpu: u32,

    /// Task memory (MiB)
    pub fargate_memory: u32,

    /// Steady-state task count
    pub desired_count: u32,

    /// Auto-scaling ceiling
    pub auto_scaling_max_capacity: u32,

    /// Enable ECS Container Insights
    pub enable_container_insights: bool,

    /// Enable X-Ray tracing
    #[serde(rename = "enableXRay")]
    pub enable_xray: bool,

    /// Log group retention in days
    pub log_retention_days: u32,

    /// Cost center tag value
    pub cost_center: String,

    /// Extra resource tags
    #[serde(default)]
    pub tags: Tags,
}

// ============================================================================
// Override layer
// ============================================================================

/// Partial configuration supplied by the caller. Every field is optional;
/// unknown keys are rejected so a typo never passes silently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vpc_cidr: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_azs: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub nat_gateways: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fargate_cpu: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fargate_memory: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub desired_count: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_scaling_max_capacity: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_container_insights: Option<bool>,

    #[serde(rename = "enableXRay", skip_serializing_if = "Option::is_none")]
    pub enable_xray: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_retention_days: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_center: Option<String>,

    /// Merged key-by-key over the preset tags
    #[serde(skip_serializing_if = "Tags::is_empty")]
    pub tags: Tags,
}

impl ConfigOverrides {
    /// Layer `other` on top of `self`: fields set in `other` win, tags merge per key.
    pub fn merge(&mut self, other: ConfigOverrides) {
        self.vpc_cidr = other.vpc_cidr.or(self.vpc_cidr.take());
        self.max_azs = other.max_azs.or(self.max_azs);
        self.nat_gateways = other.nat_gateways.or(self.nat_gateways);
        self.fargate_cpu = other.fargate_cpu.or(self.fargate_cpu);
        self.fargate_memory = other.fargate_memory.or(self.fargate_memory);
        self.desired_count = other.desired_count.or(self.desired_count);
        self.auto_scaling_max_capacity = other
            .auto_scaling_max_capacity
            .or(self.auto_scaling_max_capacity);
        self.enable_container_insights = other
            .enable_container_insights
            .or(self.enable_container_insights);
        self.enable_xray = other.enable_xray.or(self.enable_xray);
        self.log_retention_days = other.log_retention_days.or(self.log_retention_days);
        self.cost_center = other.cost_center.or(self.cost_center.take());
        self.tags.extend(other.tags);
    }

    /// Apply a single `key=value` context entry. Keys use the camelCase
    /// document names; `tags.<Name>` sets one tag.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        if let Some(tag) = key.strip_prefix("tags.") {
            if tag.is_empty() {
                return Err(format!("empty tag name in context key '{}'", key));
            }
            self.tags.insert(tag.to_string(), value.to_string());
            return Ok(());
        }

        match key {
            "vpcCidr" => self.vpc_cidr = Some(value.to_string()),
            "maxAzs" => self.max_azs = Some(parse_number(key, value)?),
            "natGateways" => self.nat_gateways = Some(parse_number(key, value)?),
            "fargateCpu" => self.fargate_cpu = Some(parse_number(key, value)?),
            "fargateMemory" => self.fargate_memory = Some(parse_number(key, value)?),
            "desiredCount" => self.desired_count = Some(parse_number(key, value)?),
            "autoScalingMaxCapacity" => {
                self.auto_scaling_max_capacity = Some(parse_number(key, value)?)
            }
            "enableContainerInsights" => {
                self.enable_container_insights = Some(parse_flag(key, value)?)
            }
            "enableXRay" => self.enable_xray = Some(parse_flag(key, value)?),
            "logRetentionDays" => self.log_retention_days = Some(parse_number(key, value)?),
            "costCenter" => self.cost_center = Some(value.to_string()),
            other => return Err(format!("unknown context key '{}'", other)),
        }
        Ok(())
    }
}

fn parse_number(key: &str, value: &str) -> Result<u32, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("context key '{}' expects a number, got '{}'", key, value))
}

fn parse_flag(key: &str, value: &str) -> Result<bool, String> {
    match value.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(format!(
            "context key '{}' expects true or false, got '{}'",
            key, value
        )),
    }
}

// ============================================================================
// Launch settings
// ============================================================================

/// Deployment target read from the required process variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchSettings {
    pub app_name: String,
    pub aws_region: String,
    pub aws_account_id: String,
    /// Container image; defaults to the app name
    pub docker_image: String,
}

impl LaunchSettings {
    /// Stack name: `{app}-{environment}-stack`.
    pub fn stack_name(&self, environment: &str) -> String {
        format!("{}-{}-stack", self.app_name, environment)
    }

    pub fn stack_description(&self, environment: &str) -> String {
        format!(
            "{} Fargate service stack for {} environment",
            self.app_name, environment
        )
    }
}

// ============================================================================
// Document formats
// ============================================================================

/// Serialization format for context files and manifests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
    Toml,
}

impl Format {
    /// Pick a format from a file extension. Unknown extensions read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::Json,
            Some("toml") => Self::Toml,
            _ => Self::Yaml,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
            Self::Toml => write!(f, "toml"),
        }
    }
}

// ============================================================================
// Manifest
// ============================================================================

/// The synthesized deployment document handed to the resource layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentManifest {
    pub stack_name: String,
    pub description: String,
    pub app_name: String,
    pub docker_image: String,
    pub account: String,
    pub region: String,
    pub environment: String,

    /// `blake3:{hex}` over the resolved config
    pub fingerprint: String,

    pub stack_tags: Tags,
    pub config: EnvironmentConfig,

    /// `{ "environment": env, "appName": app, env: config }`
    pub context: serde_json::Value,
}
