//! Deployment manifest — the synthesized output of a run.
//!
//! Bundles the validated config with the stack target, stack tags, the
//! context document, and a BLAKE3 fingerprint of the config.

use super::context::cdk_context;
use super::naming::stack_tags;
use super::types::{DeploymentManifest, EnvironmentConfig, Format, LaunchSettings};
use crate::error::{Error, Result};
use std::path::Path;

/// Fingerprint a resolved config. Returns `"blake3:{hex}"`.
///
/// Hashes the canonical JSON form; tags serialize in key order, so equal
/// configs always hash equal.
pub fn fingerprint(config: &EnvironmentConfig) -> Result<String> {
    let canonical = serde_json::to_vec(config).map_err(|e| Error::Serialize(e.to_string()))?;
    Ok(format!("blake3:{}", blake3::hash(&canonical).to_hex()))
}

/// Assemble the manifest for a validated config.
pub fn build_manifest(
    settings: &LaunchSettings,
    config: &EnvironmentConfig,
) -> Result<DeploymentManifest> {
    let environment = config.environment.as_str();
    Ok(DeploymentManifest {
        stack_name: settings.stack_name(environment),
        description: settings.stack_description(environment),
        app_name: settings.app_name.clone(),
        docker_image: settings.docker_image.clone(),
        account: settings.aws_account_id.clone(),
        region: settings.aws_region.clone(),
        environment: environment.to_string(),
        fingerprint: fingerprint(config)?,
        stack_tags: stack_tags(settings, config),
        config: config.clone(),
        context: cdk_context(&settings.app_name, environment, config)?,
    })
}

/// Render a manifest in the requested format.
pub fn render(manifest: &DeploymentManifest, format: Format) -> Result<String> {
    match format {
        Format::Json => serde_json::to_string_pretty(manifest)
            .map(|mut s| {
                s.push('\n');
                s
            })
            .map_err(|e| Error::Serialize(e.to_string())),
        Format::Yaml => {
            serde_yaml_ng::to_string(manifest).map_err(|e| Error::Serialize(e.to_string()))
        }
        Format::Toml => {
            toml::to_string_pretty(manifest).map_err(|e| Error::Serialize(e.to_string()))
        }
    }
}

/// Write rendered output atomically (write to temp, then rename).
pub fn write_manifest(path: &Path, rendered: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| Error::Io(format!("cannot create dir {}: {}", parent.display(), e)))?;
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = std::path::PathBuf::from(tmp_name);

    std::fs::write(&tmp_path, rendered)
        .map_err(|e| Error::Io(format!("cannot write {}: {}", tmp_path.display(), e)))?;
    std::fs::rename(&tmp_path, path).map_err(|e| {
        let _ = std::fs::remove_file(&tmp_path);
        Error::Io(format!(
            "cannot rename {} → {}: {}",
            tmp_path.display(),
            path.display(),
            e
        ))
    })?;
    Ok(())
}
