//! Process-boundary checks: required variables and environment selection.
//!
//! These run before resolution. The env map is always passed in; nothing
//! here reads ambient process state.

use super::constants::env_vars::{
    APP_NAME, AWS_ACCOUNT_ID, AWS_REGION, DOCKER_IMAGE, ENVIRONMENT, REQUIRED,
};
use super::constants::DEFAULT_ENVIRONMENT;
use super::types::LaunchSettings;
use std::collections::HashMap;
use thiserror::Error;

/// One or more required process variables are absent or empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Missing required environment variables: {}", join_names(.missing))]
pub struct MissingEnvError {
    pub missing: Vec<String>,
}

fn join_names(names: &[String]) -> String {
    names.join(", ")
}

/// Check the required variables and build the launch settings.
/// Every missing variable is named in the error, not just the first.
pub fn require_env(env: &HashMap<String, String>) -> Result<LaunchSettings, MissingEnvError> {
    let missing: Vec<String> = REQUIRED
        .iter()
        .filter(|var| lookup(env, var).is_none())
        .map(|var| var.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(MissingEnvError { missing });
    }

    let get = |var: &str| lookup(env, var).unwrap_or_default().to_string();
    let app_name = get(APP_NAME);
    let docker_image = lookup(env, DOCKER_IMAGE).unwrap_or(&app_name).to_string();
    Ok(LaunchSettings {
        docker_image,
        aws_region: get(AWS_REGION),
        aws_account_id: get(AWS_ACCOUNT_ID),
        app_name,
    })
}

/// For each default, take the env value when present and non-empty.
pub fn env_with_defaults(
    env: &HashMap<String, String>,
    defaults: &[(&str, &str)],
) -> HashMap<String, String> {
    defaults
        .iter()
        .map(|(key, default)| {
            let value = lookup(env, key).unwrap_or(default);
            (key.to_string(), value.to_string())
        })
        .collect()
}

/// Pick the environment name: inline context, then context file, then the
/// `ENVIRONMENT` variable, then the default.
pub fn environment_name(
    inline: Option<&str>,
    file: Option<&str>,
    env: &HashMap<String, String>,
) -> String {
    [inline, file, lookup(env, ENVIRONMENT)]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|name| !name.is_empty())
        .unwrap_or(DEFAULT_ENVIRONMENT)
        .to_string()
}

fn lookup<'a>(env: &'a HashMap<String, String>, var: &str) -> Option<&'a str> {
    env.get(var).map(String::as_str).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn full_env() -> HashMap<String, String> {
        env(&[
            ("APP_NAME", "shop"),
            ("AWS_REGION", "us-east-1"),
            ("AWS_ACCOUNT_ID", "123456789012"),
        ])
    }

    #[test]
    fn test_require_env_ok() {
        let s = require_env(&full_env()).unwrap();
        assert_eq!(s.app_name, "shop");
        assert_eq!(s.aws_region, "us-east-1");
        assert_eq!(s.aws_account_id, "123456789012");
        assert_eq!(s.docker_image, "shop");
    }

    #[test]
    fn test_require_env_docker_image() {
        let mut e = full_env();
        e.insert("DOCKER_IMAGE".to_string(), "registry/shop:1.2".to_string());
        assert_eq!(require_env(&e).unwrap().docker_image, "registry/shop:1.2");
    }

    #[test]
    fn test_missing_account_id() {
        let mut e = full_env();
        e.remove("AWS_ACCOUNT_ID");
        let err = require_env(&e).unwrap_err();
        assert_eq!(err.missing, vec!["AWS_ACCOUNT_ID"]);
        assert_eq!(
            err.to_string(),
            "Missing required environment variables: AWS_ACCOUNT_ID"
        );
    }

    #[test]
    fn test_missing_all_listed_in_order() {
        let err = require_env(&HashMap::new()).unwrap_err();
        assert_eq!(err.missing, vec!["APP_NAME", "AWS_REGION", "AWS_ACCOUNT_ID"]);
        assert!(err.to_string().ends_with("APP_NAME, AWS_REGION, AWS_ACCOUNT_ID"));
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let mut e = full_env();
        e.insert("AWS_REGION".to_string(), String::new());
        let err = require_env(&e).unwrap_err();
        assert_eq!(err.missing, vec!["AWS_REGION"]);
    }

    #[test]
    fn test_env_with_defaults() {
        let e = env(&[("FARGATE_CPU", "1024"), ("DESIRED_COUNT", "")]);
        let out = env_with_defaults(
            &e,
            &[
                ("FARGATE_CPU", "256"),
                ("DESIRED_COUNT", "1"),
                ("LOG_RETENTION_DAYS", "7"),
            ],
        );
        assert_eq!(out["FARGATE_CPU"], "1024");
        assert_eq!(out["DESIRED_COUNT"], "1");
        assert_eq!(out["LOG_RETENTION_DAYS"], "7");
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn test_environment_name_precedence() {
        let e = env(&[("ENVIRONMENT", "staging")]);
        assert_eq!(environment_name(Some("production"), Some("dev"), &e), "production");
        assert_eq!(environment_name(None, Some("dev"), &e), "dev");
        assert_eq!(environment_name(None, None, &e), "staging");
        assert_eq!(environment_name(None, None, &HashMap::new()), "dev");
        assert_eq!(environment_name(Some(""), None, &e), "staging");
    }
}
