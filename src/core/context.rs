//! Context documents — parsing override files and rendering the context
//! handed to the resource layer.
//!
//! A context file holds an optional `environment` selector plus one section
//! of overrides per environment:
//!
//! ```yaml
//! environment: staging
//! staging:
//!   fargateCpu: 1024
//!   fargateMemory: 2048
//!   tags:
//!     Team: web
//! ```

use super::types::{ConfigOverrides, EnvironmentConfig, Format};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parsed context file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextFile {
    /// Environment to deploy when no inline context selects one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,

    /// Per-environment overrides (order-preserving)
    #[serde(flatten)]
    pub environments: IndexMap<String, ConfigOverrides>,
}

impl ContextFile {
    /// Overrides for `environment`, empty when the file has no section for it.
    pub fn overrides_for(&self, environment: &str) -> ConfigOverrides {
        self.environments
            .get(environment)
            .cloned()
            .unwrap_or_default()
    }
}

/// Parse a context file from disk; the format follows the extension.
pub fn parse_context_file(path: &Path) -> Result<ContextFile> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Io(format!("failed to read {}: {}", path.display(), e)))?;
    parse_context(&content, Format::from_path(path))
        .map_err(|e| Error::Context(format!("{}: {}", path.display(), e)))
}

/// Parse a context document from a string.
pub fn parse_context(text: &str, format: Format) -> Result<ContextFile> {
    if text.trim().is_empty() {
        return Ok(ContextFile::default());
    }
    match format {
        Format::Json => serde_json::from_str(text)
            .map_err(|e| Error::Context(format!("JSON parse error: {}", e))),
        Format::Yaml => serde_yaml_ng::from_str(text)
            .map_err(|e| Error::Context(format!("YAML parse error: {}", e))),
        Format::Toml => {
            toml::from_str(text).map_err(|e| Error::Context(format!("TOML parse error: {}", e)))
        }
    }
}

/// Split an inline `key=value` context entry.
pub fn parse_context_entry(entry: &str) -> Result<(String, String)> {
    match entry.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(Error::Context(format!(
            "invalid context '{}', expected KEY=VALUE",
            entry
        ))),
    }
}

/// Context document for the resource layer:
/// `{ "environment": env, "appName": app, env: config }`.
pub fn cdk_context(
    app_name: &str,
    environment: &str,
    config: &EnvironmentConfig,
) -> Result<serde_json::Value> {
    let config_value =
        serde_json::to_value(config).map_err(|e| Error::Serialize(e.to_string()))?;
    let mut map = serde_json::Map::new();
    map.insert(
        "environment".to_string(),
        serde_json::Value::String(environment.to_string()),
    );
    map.insert(
        "appName".to_string(),
        serde_json::Value::String(app_name.to_string()),
    );
    map.insert(environment.to_string(), config_value);
    Ok(serde_json::Value::Object(map))
}

/// JSON schema for one environment section of a context file.
pub fn overrides_schema() -> Result<String> {
    let schema = schemars::schema_for!(ConfigOverrides);
    serde_json::to_string_pretty(&schema).map_err(|e| Error::Serialize(e.to_string()))
}
