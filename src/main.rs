//! Resolve and print the ingress controller configuration.
//!
//! Exits non-zero when the configuration does not resolve. With `--watch`
//! it keeps running and re-resolves on file change or SIGHUP.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use tokio::sync::mpsc;

use ts_ingress_config::config::watcher::ConfigWatcher;
use ts_ingress_config::config::{file, loader::DEFAULT_CONFIG_DIR, ConfigLoader, IngressConfig, SharedConfig};
use ts_ingress_config::lifecycle::{signals, Reloader};
use ts_ingress_config::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "ts-ingress-config")]
#[command(about = "Resolve the ingress controller startup configuration", long_about = None)]
struct Cli {
    /// Configuration file; bare names are looked up in --config-dir
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long, default_value = DEFAULT_CONFIG_DIR)]
    config_dir: PathBuf,

    /// Output format for the resolved configuration
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Keep running and reload on file change or SIGHUP
    #[arg(long)]
    watch: bool,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Toml,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level)?;

    let loader = Arc::new(ConfigLoader::new().with_config_dir(&cli.config_dir));
    let config = match loader.load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    tracing::info!(
        server = %config.server(),
        tls = config.tls(),
        classes = %config.ingress_classes(),
        "Configuration loaded"
    );
    if let Err(e) = config.server_url() {
        tracing::warn!(server = %config.server(), "Server is not a valid URL: {}", e);
    }
    metrics::record_snapshot(&config);
    println!("{}", render(&config, cli.format)?);

    if !cli.watch {
        return Ok(());
    }

    let shared = Arc::new(SharedConfig::new(config));
    let (reload_tx, reload_rx) = mpsc::unbounded_channel();

    let _watcher = match &cli.config {
        Some(path) => {
            let path = file::resolve_path(path, loader.config_dir());
            Some(ConfigWatcher::new(&path, reload_tx.clone()).run()?)
        }
        None => None,
    };
    let _hangup = signals::spawn_reload_on_hangup(reload_tx)?;

    let reloader = Reloader::new(loader, cli.config.clone(), shared);
    reloader.run(reload_rx, signals::shutdown_signal()).await;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn render(config: &IngressConfig, format: Format) -> Result<String, Box<dyn std::error::Error>> {
    Ok(match format {
        Format::Json => serde_json::to_string_pretty(config)?,
        Format::Toml => toml::to_string_pretty(config)?,
    })
}
