mod config;

use catalog::ProviderError;
use clap::Parser;
use config::{Config, ConfigError, LoggingConfig, MetricsConfig};
use gateway::config::ValidationError;
use gateway::errors::GatewayError;
use metrics_exporter_statsd::StatsdBuilder;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(version, about = "Redirect gateway for placeholder images")]
enum CliCommand {
    /// Serve requests until a listener fails
    Run {
        #[arg(long, short)]
        config: PathBuf,
    },
    /// Validate a config file and load its catalog, then exit
    CheckConfig {
        #[arg(long, short)]
        config: PathBuf,
    },
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid config: {0}")]
    Validation(#[from] ValidationError),
    #[error("could not load catalog: {0}")]
    Catalog(#[from] ProviderError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("could not start runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("could not set up logging: {0}")]
    Logging(String),
    #[error("could not set up metrics: {0}")]
    Metrics(String),
}

fn main() -> ExitCode {
    let cli = CliCommand::parse();

    let result = match &cli {
        CliCommand::Run { config } => run(config),
        CliCommand::CheckConfig { config } => check_config(config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "Exiting");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: &Path) -> Result<Config, CliError> {
    let config = Config::from_file(path)?;
    config.gateway.validate()?;
    Ok(config)
}

fn check_config(path: &Path) -> Result<(), CliError> {
    let config = load_config(path)?;
    catalog::open(&config.gateway.catalog)?;
    println!("{}: ok", path.display());
    Ok(())
}

fn run(path: &Path) -> Result<(), CliError> {
    let config = load_config(path)?;

    let _sentry_guard = init_logging(&config.common.logging)?;
    if let Some(metrics_config) = &config.common.metrics {
        init_metrics(metrics_config)?;
    }

    tracing::info!(config = %path.display(), "Starting picsum gateway");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(gateway::run(config.gateway))?;
    Ok(())
}

/// Installs the global subscriber. The returned guard flushes pending Sentry
/// events when dropped.
fn init_logging(logging: &LoggingConfig) -> Result<Option<sentry::ClientInitGuard>, CliError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .map_err(|e| CliError::Logging(e.to_string()))?;

    let sentry_guard = logging.sentry_dsn.as_deref().map(|dsn| {
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });
    let sentry_layer = sentry_guard
        .as_ref()
        .map(|_| sentry::integrations::tracing::layer());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .with(sentry_layer)
        .try_init()
        .map_err(|e| CliError::Logging(e.to_string()))?;

    Ok(sentry_guard)
}

fn init_metrics(metrics_config: &MetricsConfig) -> Result<(), CliError> {
    let recorder = StatsdBuilder::from(
        metrics_config.statsd_host.as_str(),
        metrics_config.statsd_port,
    )
    .build(Some("picsum"))
    .map_err(|e| CliError::Metrics(e.to_string()))?;
    metrics::set_global_recorder(recorder).map_err(|e| CliError::Metrics(e.to_string()))?;

    tracing::info!(
        host = %metrics_config.statsd_host,
        port = metrics_config.statsd_port,
        "Reporting metrics to statsd"
    );
    Ok(())
}
