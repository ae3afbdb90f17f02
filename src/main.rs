//! monitoring-status
//!
//! Reports whether the cluster monitoring stack is degraded by querying the
//! Thanos Querier for critical alerts in the monitoring namespace.
//!
//! ```text
//! monitoring-status [--config FILE] [--in-cluster] check [--json]
//! monitoring-status [--config FILE] [--in-cluster] watch [--interval SECS]
//! ```
//!
//! `check` exits 0 when healthy and 1 when degraded.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};

use monitoring_status::config::validation::validate_config;
use monitoring_status::config::{load_config, CheckerConfig, ClusterConfig, ConfigError};
use monitoring_status::lifecycle::{signals, Shutdown};
use monitoring_status::observability::{logging, metrics};
use monitoring_status::status::{HealthChecker, StatusMonitor};

#[derive(Parser)]
#[command(name = "monitoring-status")]
#[command(about = "Report whether the cluster monitoring stack is degraded", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Use the pod's service account and API server environment.
    #[arg(long)]
    in_cluster: bool,

    /// Override the configured log level.
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one check and print the verdict
    Check {
        /// Print the verdict as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check periodically until SIGINT/SIGTERM
    Watch {
        /// Seconds between checks
        #[arg(long)]
        interval: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => CheckerConfig::default(),
    };
    if cli.in_cluster {
        config.cluster = ClusterConfig::in_cluster(&config.cluster)?;
    }
    if let Some(level) = &cli.log_level {
        config.observability.log_level = level.clone();
    }
    if let Commands::Watch {
        interval: Some(secs),
    } = cli.command
    {
        config.watch.interval_secs = secs;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    logging::init_logging(&config.observability.log_level);

    tracing::info!(
        api_server = %config.cluster.api_server,
        namespace = %config.monitoring.namespace,
        route = %config.monitoring.querier_route,
        "Configuration loaded"
    );

    let checker = HealthChecker::from_config(&config);

    match cli.command {
        Commands::Check { json } => {
            let report = checker.is_degraded().await.report();

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("degraded: {}", report.degraded);
                println!("reason:   {}", report.reason);
                if let Some(error) = &report.error {
                    println!("error:    {}", error);
                }
            }

            Ok(if report.degraded {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
        Commands::Watch { .. } => {
            if config.observability.metrics_enabled {
                metrics::init_metrics(config.observability.metrics_address.parse()?)?;
            }

            let shutdown = Shutdown::new();
            let stop = shutdown.subscribe();
            signals::spawn_signal_handler(shutdown);

            let monitor =
                StatusMonitor::new(checker, Duration::from_secs(config.watch.interval_secs));
            let checks = monitor.run(stop).await;

            tracing::info!(checks, "Shutdown complete");
            Ok(ExitCode::SUCCESS)
        }
    }
}
