//! fargate-scaffold CLI — resolve and validate environment configuration.

use clap::Parser;
use std::collections::HashMap;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "fargate-scaffold",
    version,
    about = "Resolve, validate, and emit Fargate environment configuration"
)]
struct Cli {
    #[command(flatten)]
    args: fargate_scaffold::cli::SynthArgs,

    /// Log verbosity (-v info, -vv debug); SCAFFOLD_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let env: HashMap<String, String> = std::env::vars_os()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
        .collect();

    if let Err(e) = fargate_scaffold::cli::dispatch(cli.args, &env) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_env("SCAFFOLD_LOG").unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
