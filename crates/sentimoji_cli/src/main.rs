use clap::Parser;
use dotenv::dotenv;
use sentimoji_core::{AppConfig, EmojiEngine};
use sentimoji_gateway::ApiServer;
use sentimoji_store::SuggestionStore;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "sentimoji.toml")]
    config: String,

    /// Suggest emojis for this message and exit instead of serving
    #[arg(short, long)]
    message: Option<String>,

    /// Override the configured bind host
    #[arg(long)]
    host: Option<String>,

    /// Override the configured bind port
    #[arg(long)]
    port: Option<u16>,

    /// Override the configured database path
    #[arg(long)]
    db: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    if let Ok(path) = env_loaded {
        info!("Loaded environment from {}", path.display());
    }

    let args = Args::parse();

    // 1. Load configuration (file, then env vars, then CLI flags)
    let mut config = AppConfig::load_or_default(&args.config);
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(db) = args.db {
        config.storage.db_path = db;
    }

    // 2. One-shot mode: print the suggestion as JSON and exit
    if let Some(message) = args.message {
        let engine = EmojiEngine::with_config(&config.engine);
        let suggestion = engine.suggest(&message);
        println!("{}", serde_json::to_string_pretty(&suggestion)?);
        return Ok(());
    }

    // 3. Connect the store
    info!("Connecting to suggestion store at {}...", config.storage.db_path);
    let store = SuggestionStore::new(&config.storage.db_path).await?;

    // 4. Serve the API
    info!(
        "Starting API server on {}:{}...",
        config.server.host, config.server.port
    );
    let engine = EmojiEngine::with_config(&config.engine);
    let server = ApiServer::new(engine, store, &config);
    server.start().await?;

    Ok(())
}
