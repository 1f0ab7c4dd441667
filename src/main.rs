//! Civic issues service: CLI entry point
//!
//! ```sh
//! # Run with default config (~/.config/civic-issues/config.toml)
//! civic-issues
//!
//! # Custom config path and port
//! civic-issues --config /etc/civic-issues/config.toml --port 8080
//!
//! # Validate config without starting
//! civic-issues --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info, warn};

use civic_issues::config::{AppConfig, ConfigError};
use civic_issues::server::{init_tracing, ServerHandle, ServerOptions};

/// REST API for reporting and tracking civic issues.
#[derive(Parser, Debug)]
#[command(name = "civic-issues", version, about)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "CIVIC_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    skip_migrations: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.unwrap_or_else(civic_issues::default_config_path);

    let loaded = AppConfig::load(&config_path);
    if cli.check {
        return check(&config_path, loaded, cli.port);
    }

    let (mut config, load_error) = match loaded {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    config.apply_overrides(cli.log_level.as_deref(), cli.port);

    // Init tracing before anything else logs
    init_tracing(&config);
    match load_error {
        Some(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
        None if config_path.exists() => {
            info!("Configuration loaded from {}", config_path.display());
        }
        None => warn!("Config file {} not found, using defaults", config_path.display()),
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.skip_migrations,
    })
    .await?;

    // Install OS signal handlers (SIGTERM, SIGINT)
    handle.install_signal_handler();
    info!("Press Ctrl+C to shutdown gracefully.");

    // Wait for shutdown signal, then clean up
    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}

/// `--check`: report the effective configuration, or why it is invalid.
fn check(
    config_path: &std::path::Path,
    loaded: Result<AppConfig, ConfigError>,
    port: Option<u16>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = loaded?;
    if port.is_some() {
        config.apply_overrides(None, port);
        config.validate()?;
    }

    println!("Configuration is valid");
    println!("   Config file : {}", config_path.display());
    println!("   Address     : {}", config.server.address());
    println!("   Base URL    : {}", config.server.base_url());
    println!("   Database    : {}", config.database.url);
    println!("   Log level   : {}", config.logging.level);
    Ok(())
}
