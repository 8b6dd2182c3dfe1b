//! CLI launcher for the OCR gateway.
//!
//! Subcommands mirror the service's operational surface: `api` starts
//! the HTTP service, `version` and `example` print information and
//! exit. Configuration precedence for the listener, lowest to highest:
//! defaults → config file → CLI flags → `OCR_LISTEN_ADDRESS`.

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use tokio::net::TcpListener;

use ocr_gateway::config::{loader, GatewayConfig};
use ocr_gateway::engine::InitializeOptions;
use ocr_gateway::http::HttpServer;
use ocr_gateway::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "ocr-gateway")]
#[command(about = "HTTP API service in front of an external OCR engine", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API service
    Api {
        /// Server host (overridden by OCR_LISTEN_ADDRESS)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overridden by OCR_LISTEN_ADDRESS)
        #[arg(long)]
        port: Option<u16>,

        /// Configuration file path (TOML)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Log level (overridden by RUST_LOG)
        #[arg(long)]
        log_level: Option<String>,
    },
    /// Show version information
    Version,
    /// Show usage examples
    Example,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Api {
            host,
            port,
            config,
            log_level,
        }) => run_api(host, port, config, log_level).await,
        Some(Commands::Version) => {
            show_version();
            Ok(())
        }
        Some(Commands::Example) => {
            show_examples();
            Ok(())
        }
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    }
}

async fn run_api(
    host: Option<String>,
    port: Option<u16>,
    config_path: Option<PathBuf>,
    log_level: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &config_path {
        Some(path) if path.exists() => loader::load_config(path)?,
        Some(path) => {
            eprintln!("Warning: config file not found: {}", path.display());
            GatewayConfig::default()
        }
        None => GatewayConfig::default(),
    };

    if let Some(level) = log_level {
        config.observability.log_level = level;
    }
    if host.is_some() || port.is_some() {
        let (current_host, current_port) = split_bind(&config.listener.bind_address);
        config.listener.bind_address = format!(
            "{}:{}",
            host.unwrap_or(current_host),
            port.unwrap_or(current_port)
        );
    }

    logging::init(&config.observability.log_level);

    loader::apply_env_overrides(&mut config);
    let config = loader::finalize(config)?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        strategy = ?config.auth.strategy,
        forwarded_trust = ?config.auth.resolved_forwarded_trust(),
        require_local = config.auth.require_local,
        require_remote = config.auth.require_remote,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let server = HttpServer::new(config.clone());

    // The engine is best-effort at startup: a failure is logged and the
    // service keeps running so `/initialize` can retry later.
    let options = InitializeOptions {
        ocr: true,
        det: config.engine.det_enabled,
    };
    match server.engines().initialize(options) {
        Ok(models) => tracing::info!(models = ?models, "engine auto-initialization complete"),
        Err(e) => {
            tracing::error!(error = %e, "engine auto-initialization failed; serving without an engine")
        }
    }

    server.run(listener).await?;
    Ok(())
}

/// Split a `host:port` bind address; missing pieces fall back to the
/// service defaults.
fn split_bind(addr: &str) -> (String, u16) {
    match addr.rsplit_once(':') {
        Some((host, port)) => (host.to_string(), port.parse().unwrap_or(8000)),
        None => (addr.to_string(), 8000),
    }
}

fn show_version() {
    println!("ocr-gateway {}", env!("CARGO_PKG_VERSION"));
    println!("HTTP API service in front of an external OCR engine");
}

fn show_examples() {
    println!(
        r#"Usage examples
==============

1. Start the API service:
   ocr-gateway api --port 8000

2. Start with a config file and env overrides:
   AUTH_REMOTE_ENABLED=true OCR_SHARED_SECRET=changeme \
       ocr-gateway api --config gateway.toml

3. Initialize the engine and recognize an image:
   curl -X POST http://localhost:8000/initialize -H 'Content-Type: application/json' -d '{{"ocr": true}}'
   curl -X POST http://localhost:8000/ocr -H 'Content-Type: application/json' \
       -d "{{\"image\": \"$(base64 -w0 image.jpg)\"}}"
"#
    );
}
