//! Night Out Checkout CLI Server
//!
//! Headless checkout API suitable for deployment as a systemd service,
//! Docker container, or standalone process.
//!
//! ```sh
//! # Run with default config (~/.config/night-out-checkout/config.toml)
//! checkout-service
//!
//! # Custom config path
//! checkout-service --config /etc/night-out-checkout/config.toml
//!
//! # Override the port
//! checkout-service --api-port 8080
//!
//! # Validate config without starting
//! checkout-service --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use night_out_checkout::config::AppConfig;
use night_out_checkout::server::{init_tracing, ServerHandle, ServerOptions};

/// Night out booking checkout service.
#[derive(Parser, Debug)]
#[command(
    name = "checkout-service",
    version,
    about = "Checkout API for concierge night out bookings",
    long_about = "REST API that walks a guest through the night out survey, \
                  takes card details and confirms the booking.\n\n\
                  Default config: ~/.config/night-out-checkout/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "CHECKOUT_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(long)]
    api_port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .unwrap_or_else(night_out_checkout::default_config_path);

    let loaded = AppConfig::load(&config_path);

    // A --check run reports the error instead of falling back.
    if cli.check {
        if let Err(e) = &loaded {
            eprintln!("❌ {}: {}", config_path.display(), e);
            std::process::exit(1);
        }
    }

    let mut config = match loaded {
        Ok(mut cfg) => {
            if let Some(ref level) = cli.log_level {
                cfg.logging.level = level.clone();
            }
            // Init tracing first so subsequent logs are formatted properly
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
    if let Some(port) = cli.api_port {
        info!("CLI override: api_port = {}", port);
        config.server.api_port = port;
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        let rules = config.checkout.rules();
        println!("✅ Configuration is valid");
        println!("   Config file   : {}", config_path.display());
        println!("   API address   : {}", config.server.address());
        println!("   Log level     : {}", config.logging.level);
        println!("   Layout        : {}", config.checkout.layout);
        println!("   Lead time     : {} days", rules.min_lead_days);
        println!("   Group size    : {}-{}", rules.group_size_min, rules.group_size_max);
        println!("   Max interests : {}", rules.max_interests);
        println!("   Payment delay : {} ms", config.checkout.payment_delay_ms);
        return Ok(());
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        ..Default::default()
    })
    .await?;

    // Install OS signal handlers (SIGTERM, SIGINT)
    handle.install_signal_handler();

    info!("🚀 Press Ctrl+C to shutdown gracefully.");

    // Wait for shutdown signal, then clean up
    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
