use pdfshelf::{AppState, BackendConfig, Config, FileCatalog, InMemoryStorage, ObjectStore, S3Backend, create_app};

use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

// Server configuration
const HOST: &str = "0.0.0.0";
const PORT: u16 = 3000;

/// pdfshelf: browse and preview PDFs stored in an S3 bucket
#[derive(Parser, Debug)]
#[command(name = "pdfshelf")]
#[command(about = "Browse and preview PDF files stored in an S3-compatible bucket", long_about = None)]
struct Cli {
    /// Path to the configuration file (JSON or YAML)
    #[arg(short, long, env = "CONFIG_PATH")]
    config: String,

    /// Host to bind to
    #[arg(long, env = "HOST", default_value = HOST)]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = PORT)]
    port: u16,
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pdfshelf=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = match Config::from_file(&cli.config) {
        Ok(cfg) => {
            tracing::info!("Loaded configuration from {}", cli.config);
            cfg
        }
        Err(e) => {
            tracing::error!("Failed to load config file '{}': {}", cli.config, e);
            tracing::error!(
                "Configuration file is required. Use --config <path> or set CONFIG_PATH environment variable."
            );
            std::process::exit(1);
        }
    };

    let store: Arc<dyn ObjectStore> = match config.backend {
        BackendConfig::S3(s3_config) => {
            tracing::info!(
                "Initializing S3 backend (region={}, endpoint={:?}, anonymous={})",
                s3_config.region,
                s3_config.endpoint,
                s3_config.anonymous
            );
            let backend = S3Backend::new("s3".to_string(), s3_config).await;
            tracing::info!("✓ S3 backend '{}' initialized", backend.name());
            Arc::new(backend)
        }
        BackendConfig::Memory => {
            tracing::info!("Initializing in-memory backend");
            let storage = InMemoryStorage::new();
            storage.create_bucket(&config.bucket).await;
            Arc::new(storage)
        }
    };

    tracing::info!("Using bucket: {}", config.bucket);
    tracing::info!("Listing extensions: {:?}", config.extensions);

    let catalog = FileCatalog::new(store, config.extensions, config.cache_max_age);
    let app = create_app(AppState::new(catalog, config.bucket));

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("PDF browser listening on http://{}", addr);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
