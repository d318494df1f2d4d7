//! Firewall Gate
//!
//! Evaluates a single access attempt against the configured policy and prints
//! the decision.

use clap::Parser;
use firewall_gate::{
    config::{LogFormat, load_config, validate_log_level},
    firewall::{Attempt, Decision, Policy},
};
use serde_json::json;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Exit status used when the attempt must be redirected
const EXIT_REDIRECT: u8 = 3;

/// Firewall Gate - decide whether an access attempt is allowed or redirected
#[derive(Parser, Debug)]
#[command(name = "firewall-gate")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "FIREWALL_GATE_CONFIG")]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long, env = "FIREWALL_GATE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Group of the caller
    #[arg(long, default_value = "")]
    group: String,

    /// Requested path
    #[arg(long)]
    path: String,

    /// Role presented by the caller
    #[arg(long, default_value = "")]
    role: String,

    /// Shared secret presented by the caller
    #[arg(long, default_value = "")]
    secret: String,
}

fn init_logging(level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    // Logging is configured from the file, so load it first
    let config = load_config(args.config.as_deref())?;

    let level = args.log_level.as_deref().unwrap_or(&config.logging.level);
    validate_log_level(level)?;
    init_logging(level, config.logging.format);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        policy = config.firewall.name.as_str(),
        "Evaluating attempt"
    );

    let policy = Policy::from_config(&config.firewall)
        .inspect_err(|e| error!(error = %e, "Failed to build firewall policy"))?;

    let attempt = Attempt::new(args.group, args.path, args.role).with_secret(args.secret);
    let evaluation = policy.evaluate(&attempt);

    let output = json!({
        "policy": policy.name(),
        "decision": evaluation.decision.as_str(),
        "rule": evaluation.rule.to_string(),
        "redirect": evaluation.decision.redirect_target(),
        "error": evaluation.decision.error(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(match evaluation.decision {
        Decision::Allow => ExitCode::SUCCESS,
        Decision::Redirect(_) => ExitCode::from(EXIT_REDIRECT),
        Decision::Error(_) => ExitCode::FAILURE,
    })
}
