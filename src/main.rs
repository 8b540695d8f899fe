//! Lodging service: headless REST backend
//!
//! ```sh
//! # Run with default config (~/.config/lodging-service/config.toml)
//! lodging-service
//!
//! # Custom config path
//! lodging-service --config /etc/lodging-service/config.toml
//!
//! # Validate config without starting
//! lodging-service --check
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use lodging::config::{default_config_path, AppConfig};
use lodging::server::{init_tracing, ServerHandle, ServerOptions};

/// Lodging marketplace backend: listings, reservations and Kakao sign-in.
#[derive(Parser, Debug)]
#[command(
    name = "lodging-service",
    version,
    about = "Lodging marketplace REST backend",
    long_about = "Lodging marketplace REST backend: listing search and detail, \
                  listing creation with image upload, reservations and Kakao sign-in.\n\n\
                  Default config: ~/.config/lodging-service/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "LODGING_CONFIG")]
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
    no_migrate: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.unwrap_or_else(default_config_path);
    let loaded = AppConfig::load(&config_path);

    let (mut config, load_error) = match loaded {
        Ok(cfg) => (cfg, None),
        Err(e) => {
            let mut cfg = AppConfig::default();
            cfg.apply_env_overrides();
            (cfg, Some(e))
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    init_tracing(&config.logging);

    match &load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        if let Some(e) = load_error {
            eprintln!("Configuration is invalid: {}", e);
            return ExitCode::FAILURE;
        }
        if let Err(e) = config.validate() {
            eprintln!("Configuration is invalid: {}", e);
            return ExitCode::FAILURE;
        }
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Listen      : {}", config.listen_address());
        println!("   Database    : {}", config.database.url);
        println!("   Storage     : {:?}", config.storage.backend);
        println!("   Log level   : {}", config.logging.level);
        return ExitCode::SUCCESS;
    }

    // ── Start server ───────────────────────────────────────────
    let handle = match ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
    })
    .await
    {
        Ok(handle) => handle,
        Err(e) => {
            error!("Failed to start server: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("Press Ctrl+C to shut down gracefully");
    handle.install_signal_handler();
    handle.wait().await;

    ExitCode::SUCCESS
}
