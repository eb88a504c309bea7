//! Command line interface and command handlers

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use config::{
    global_api_config, ConfigLoader, ConfigValidator, GlobalApiConfig, MapEnv, API_PREFIX_ENV,
    BASE_URL_ENV,
};
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, warn};

/// Inspect the ModularFlow global API configuration
#[derive(Debug, Parser)]
#[command(name = "modularflow-config", version, about)]
pub struct Cli {
    /// Resolve from this .env file instead of the process environment
    #[arg(long, global = true, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    /// Override MODULARFLOW_API_BASE_URL
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Override MODULARFLOW_API_PREFIX
    #[arg(long, global = true, value_name = "PREFIX")]
    pub api_prefix: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the resolved configuration
    Show {
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Print the full URL for an API route
    Endpoint {
        /// Route below the API prefix, e.g. `modules/SmartTavern/styles/list_themes`
        route: String,
    },
    /// Validate the resolved configuration, failing on errors
    Check,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
    Env,
}

/// Execute a parsed command, writing its output to `out`
pub fn run<W: Write>(cli: Cli, out: &mut W) -> Result<()> {
    let config = resolve(&cli)?;

    match cli.command {
        Command::Show { format } => show(&config, format, out),
        Command::Endpoint { route } => {
            writeln!(out, "{}", config.endpoint(&route))?;
            Ok(())
        }
        Command::Check => check(&config, out),
    }
}

fn resolve(cli: &Cli) -> Result<GlobalApiConfig> {
    if cli.env_file.is_none() && cli.base_url.is_none() && cli.api_prefix.is_none() {
        return Ok(global_api_config().clone());
    }

    let mut overrides = MapEnv::new();
    if let Some(base_url) = &cli.base_url {
        overrides = overrides.with(BASE_URL_ENV, base_url.clone());
    }
    if let Some(prefix) = &cli.api_prefix {
        overrides = overrides.with(API_PREFIX_ENV, prefix.clone());
    }

    let config = ConfigLoader::load(cli.env_file.as_deref(), overrides)
        .context("Failed to load configuration")?;
    info!(
        base_url = %config.redacted_base_url(),
        api_prefix = %config.api_prefix(),
        "Configuration resolved"
    );
    Ok(config)
}

fn show<W: Write>(config: &GlobalApiConfig, format: OutputFormat, out: &mut W) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(config).context("Failed to serialize configuration")?;
            writeln!(out, "{}", json)?;
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(config).context("Failed to serialize configuration")?;
            write!(out, "{}", yaml)?;
        }
        OutputFormat::Env => {
            for (key, value) in config.to_env_pairs() {
                writeln!(out, "{}={}", key, value)?;
            }
        }
    }
    Ok(())
}

fn check<W: Write>(config: &GlobalApiConfig, out: &mut W) -> Result<()> {
    let report = ConfigValidator::validate(config);

    for issue in &report.warnings {
        warn!(field = %issue.field, "{}", issue.message);
    }
    for issue in &report.errors {
        writeln!(out, "error: {}: {}", issue.field, issue.message)?;
    }
    writeln!(out, "{}", report.summary())?;

    if report.has_errors() {
        bail!("Configuration is invalid");
    }
    Ok(())
}
