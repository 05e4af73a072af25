//! Cat API proxy server.
//!
//! ```text
//!     Browser widget                     cat-proxy                          Upstream API
//!     ──────────────                     ─────────                          ────────────
//!     GET /cats/random ───────▶ routing ─▶ handler ─▶ upstream client ───▶ /images/search
//!                                                      (+ x-api-key)
//!     ◀──────── passthrough status/body + CORS ◀──────────────────────────── JSON
//! ```
//!
//! Configuration comes from an optional TOML file, then `CAT_API_URL`,
//! `CAT_API_KEY` and `CAT_PROXY_BIND`, then command line flags.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use cat_proxy::config;
use cat_proxy::lifecycle::startup;
use cat_proxy::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "cat-proxy")]
#[command(about = "Credential-hiding proxy for The Cat API", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Override the log level (or a full filter directive).
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match config::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("cat-proxy: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    if let Some(level) = cli.log_level {
        config.observability.log_level = level;
    }
    if let Err(e) = config::check_config(&config) {
        eprintln!("cat-proxy: {}", e);
        return ExitCode::FAILURE;
    }

    if let Err(e) = init_logging(&config.observability) {
        eprintln!("cat-proxy: failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        upstream = ?config.upstream,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    match startup::run(config).await {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "cat-proxy exited with error");
            ExitCode::FAILURE
        }
    }
}
