//! Contoso University server
//!
//! ```sh
//! # Run with default config (~/.config/contoso-university/config.toml)
//! contoso-university
//!
//! # Custom config path and port
//! contoso-university --config /etc/contoso/config.toml --port 9090
//!
//! # Validate config without starting
//! contoso-university --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use contoso_university::config::AppConfig;
use contoso_university::server::{init_tracing, ServerHandle, ServerOptions};

/// Student administration service for Contoso University.
#[derive(Parser, Debug)]
#[command(
    name = "contoso-university",
    version,
    about = "Student records service with search, sorting and paging",
    long_about = "Contoso University: browse, search and edit student records \
                  over HTTP.\n\n\
                  Default config: ~/.config/contoso-university/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "CONTOSO_CONFIG")]
    config: Option<PathBuf>,

    /// Override the HTTP listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Do not insert sample data into an empty database.
    #[arg(long)]
    no_seed: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .unwrap_or_else(contoso_university::default_config_path);

    let loaded = match AppConfig::load(&config_path) {
        Err(e) if cli.check => {
            eprintln!("❌ Invalid configuration in {}: {}", config_path.display(), e);
            return Err(e.into());
        }
        other => other,
    };

    let mut config = match loaded {
        Ok(mut cfg) => {
            if let Some(ref level) = cli.log_level {
                cfg.logging.level = level.clone();
            }
            init_tracing(&cfg);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            let mut cfg = AppConfig::default();
            if let Some(ref level) = cli.log_level {
                cfg.logging.level = level.clone();
            }
            init_tracing(&cfg);
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
            cfg
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.port {
        info!("CLI override: port = {}", port);
        config.server.port = port;
    }
    if cli.no_seed {
        info!("CLI override: seed = false");
        config.database.seed = false;
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("✅ Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Address     : {}", config.address());
        println!("   Database    : {}", config.database.url);
        println!("   Log level   : {}", config.logging.level);
        println!("   Page size   : {}", config.students.page_size);
        println!("   Mutations   : {}", config.students.mutation_strategy.as_str());
        return Ok(());
    }

    // ── Start server ───────────────────────────────────────────
    let handle = match ServerHandle::start(ServerOptions::from(config)).await {
        Ok(handle) => handle,
        Err(e) => {
            error!("Failed to start server: {}", e);
            return Err(e.into());
        }
    };

    handle.install_signal_handler();
    handle.wait().await;

    Ok(())
}
