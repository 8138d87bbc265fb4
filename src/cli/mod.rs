//! CLI — resolve, validate, and emit the deployment manifest.
//!
//! One action per run, no subcommands. Behavior is driven by the process
//! environment plus `--context` entries and an optional context file.

use crate::core::context::{self, ContextFile};
use crate::core::types::{ConfigOverrides, DeploymentManifest, Format};
use crate::core::{manifest, resolver, startup, validator};
use crate::error::{Error, Result};
use clap::{Args, ValueEnum};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Args, Debug, Clone, Default)]
pub struct SynthArgs {
    /// Context entry; `environment=NAME` selects the environment, other keys
    /// override config fields (e.g. `fargateCpu=1024`, `tags.Team=web`)
    #[arg(short = 'c', long = "context", value_name = "KEY=VALUE")]
    pub contexts: Vec<String>,

    /// Context file with per-environment overrides (JSON, YAML, or TOML)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Manifest output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub output: OutputFormat,

    /// Write the manifest to a file instead of stdout
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Print the JSON schema of an environment section and exit
    #[arg(long)]
    pub schema: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
    Toml,
}

impl From<OutputFormat> for Format {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Yaml => Format::Yaml,
            OutputFormat::Json => Format::Json,
            OutputFormat::Toml => Format::Toml,
        }
    }
}

/// Run one synthesis with the given arguments and process environment.
pub fn dispatch(args: SynthArgs, env: &HashMap<String, String>) -> Result<()> {
    if args.schema {
        println!("{}", context::overrides_schema()?);
        return Ok(());
    }

    let manifest = synthesize(&args, env)?;
    print_summary(&manifest);

    let rendered = manifest::render(&manifest, args.output.into())?;
    match args.out {
        Some(ref path) => {
            manifest::write_manifest(path, &rendered)?;
            eprintln!("Wrote {}", path.display());
        }
        None => print!("{}", rendered),
    }
    Ok(())
}

/// Required variables → environment selection → overrides → resolve →
/// validate → manifest. Stops at the first failing stage.
pub fn synthesize(args: &SynthArgs, env: &HashMap<String, String>) -> Result<DeploymentManifest> {
    let settings = startup::require_env(env)?;

    let file_context = match args.file {
        Some(ref path) => context::parse_context_file(path)?,
        None => ContextFile::default(),
    };
    let (inline_environment, inline_overrides) = parse_inline_contexts(&args.contexts)?;

    let environment = startup::environment_name(
        inline_environment.as_deref(),
        file_context.environment.as_deref(),
        env,
    );
    let mut overrides = file_context.overrides_for(&environment);
    overrides.merge(inline_overrides);
    debug!(environment = %environment, ?overrides, "collected context overrides");

    let config = resolver::resolve(&environment, &overrides, env);
    validator::ensure_valid(&config)?;
    info!(
        environment = %config.environment,
        cpu = config.fargate_cpu,
        memory = config.fargate_memory,
        "configuration valid"
    );

    manifest::build_manifest(&settings, &config)
}

/// Split inline contexts into the environment selector and field overrides.
fn parse_inline_contexts(entries: &[String]) -> Result<(Option<String>, ConfigOverrides)> {
    let mut environment = None;
    let mut overrides = ConfigOverrides::default();
    for entry in entries {
        let (key, value) = context::parse_context_entry(entry)?;
        if key == "environment" {
            environment = Some(value);
        } else {
            overrides.set(&key, &value).map_err(Error::Context)?;
        }
    }
    Ok((environment, overrides))
}

/// Display the deployment summary on stderr; stdout carries the manifest.
fn print_summary(m: &DeploymentManifest) {
    let c = &m.config;
    eprintln!("Synthesizing: {}", m.stack_name);
    eprintln!("  Application:        {}", m.app_name);
    eprintln!("  Environment:        {}", m.environment);
    eprintln!("  Region:             {}", m.region);
    eprintln!("  Account:            {}", m.account);
    eprintln!("  Docker image:       {}", m.docker_image);
    eprintln!("  Fargate CPU:        {}", c.fargate_cpu);
    eprintln!("  Fargate memory:     {} MB", c.fargate_memory);
    eprintln!("  Desired count:      {}", c.desired_count);
    eprintln!("  Max capacity:       {}", c.auto_scaling_max_capacity);
    eprintln!("  Container insights: {}", c.enable_container_insights);
    eprintln!("  X-Ray tracing:      {}", c.enable_xray);
    eprintln!("  Log retention:      {} days", c.log_retention_days);
    eprintln!("  Cost center:        {}", c.cost_center);
    eprintln!("  Fingerprint:        {}", m.fingerprint);
}
