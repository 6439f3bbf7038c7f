//! Curator gateway - upload and moderation gateway for member galleries

use clap::Parser;
use curator_gateway::{run_server, GatewayConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "curator-gateway")]
#[command(about = "Upload and moderation gateway for member photo galleries")]
#[command(version)]
struct Args {
    /// Host to bind to
    #[arg(short = 'H', long, default_value = "0.0.0.0", env = "CURATOR_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8787", env = "CURATOR_PORT")]
    port: u16,

    /// Storage backend API endpoint (e.g., https://storage.example.org/api/v1)
    #[arg(long, env = "STORAGE_API_ENDPOINT")]
    storage_endpoint: Option<String>,

    /// Storage backend access token
    #[arg(long, env = "STORAGE_API_TOKEN")]
    storage_token: Option<String>,

    /// Storage collection holding the moderated folders
    #[arg(long, default_value = "gallery", env = "STORAGE_COLLECTION")]
    storage_collection: String,

    /// Origins allowed to call the gateway (comma separated)
    #[arg(long, value_delimiter = ',', env = "CURATOR_ALLOWED_ORIGINS")]
    allowed_origins: Vec<String>,

    /// Use in-memory storage (for testing, data will not persist)
    #[arg(long, env = "CURATOR_MEMORY_STORE")]
    memory_store: bool,

    /// Enable debug logging
    #[arg(short, long, env = "CURATOR_DEBUG")]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Parse arguments
    let args = Args::parse();

    // Setup logging
    let log_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            format!(
                "curator_gateway={},curator_storage={},tower_http=debug",
                log_level, log_level
            )
            .into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting curator gateway on {}:{}", args.host, args.port);

    if let Some(ref endpoint) = args.storage_endpoint {
        tracing::info!("Storage backend: {}", endpoint);
    }

    if args.memory_store {
        tracing::warn!("Using in-memory storage - data will NOT persist!");
    }

    if args.allowed_origins.is_empty() {
        tracing::warn!("Origin allow-list is empty - every browser request will be rejected");
    }

    // Build configuration
    let config = GatewayConfig {
        host: args.host,
        port: args.port,
        storage_endpoint: args.storage_endpoint,
        storage_token: args.storage_token,
        storage_collection: args.storage_collection,
        use_memory_store: args.memory_store,
        allowed_origins: args.allowed_origins,
        ..Default::default()
    };

    // Run the server
    run_server(config).await
}
