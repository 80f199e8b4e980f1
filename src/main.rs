use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};

use pdf_qa::{
    config::Config,
    db::{self, PgDocumentRepository},
    extract::PdfTextExtractor,
    llm::CompletionClient,
    routes::create_router,
    storage::DocumentStore,
    utils::init_logger,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger();

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded: {:?}", config.server);
    if config.llm.gemini_api_key.is_empty() {
        warn!("GEMINI_API_KEY is not set; questions will be rejected upstream");
    }

    // Connect to database; any failure here stops the process
    let pool = db::create_pool(&config.database).await?;
    db::run_migrations(&pool).await?;

    let store = DocumentStore::open(Arc::new(PgDocumentRepository::new(pool)))
        .await
        .context("Failed to load the current document")?;

    // Create shared state
    let state = AppState {
        store: Arc::new(store),
        extractor: Arc::new(PdfTextExtractor::new()),
        completion: Arc::new(CompletionClient::gemini(&config.llm)),
        config: Arc::new(config.clone()),
    };

    // Create router
    let app = create_router(state)?;

    // Start server
    let host: std::net::IpAddr = config
        .server
        .host
        .parse()
        .with_context(|| format!("Invalid HOST: {}", config.server.host))?;
    let addr = SocketAddr::new(host, config.server.port);
    info!("Server running on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
