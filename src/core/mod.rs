//! Core configuration logic — constants, presets, resolution, validation,
//! naming, context documents, and the deployment manifest.

pub mod constants;
pub mod context;
pub mod manifest;
pub mod naming;
pub mod presets;
pub mod resolver;
pub mod startup;
pub mod types;
pub mod validator;
