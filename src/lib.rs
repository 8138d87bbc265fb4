//! fargate-scaffold — environment configuration for Fargate service stacks.
//!
//! Layers built-in presets, caller context, and process variables into one
//! validated config, plus naming and tagging helpers for the constructs
//! that consume it.

pub mod cli;
pub mod core;
pub mod error;

pub use crate::core::types::{ConfigOverrides, EnvironmentConfig};
pub use crate::error::{Error, Result};
