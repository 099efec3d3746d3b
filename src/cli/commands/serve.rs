use anyhow::Context;
use std::sync::Arc;
use tracing::{info, warn};

use iva_site::auth::SupabaseAuth;
use iva_site::config::{AppConfig, StoreBackend};
use iva_site::database::{ContentStore, DatabaseManager, MemoryStore, PgContentStore};
use iva_site::storage::SupabaseStorage;
use iva_site::AppState;

async fn content_store(config: &AppConfig) -> anyhow::Result<Arc<dyn ContentStore>> {
    match config.database.backend {
        StoreBackend::Memory => {
            warn!("Using the in-memory content store; writes are lost on restart");
            let store: Arc<dyn ContentStore> = Arc::new(MemoryStore::new());
            Ok(store)
        }
        StoreBackend::Postgres => {
            let db = DatabaseManager::connect(&config.database)
                .await
                .context("connecting to DATABASE_URL")?;
            if config.database.run_migrations {
                db.run_migrations().await.context("applying migrations")?;
            }
            let store: Arc<dyn ContentStore> = Arc::new(PgContentStore::new(db));
            Ok(store)
        }
    }
}

pub async fn build_state(config: AppConfig) -> anyhow::Result<AppState> {
    let store = content_store(&config).await?;
    let auth = SupabaseAuth::new(&config.supabase);
    let storage = SupabaseStorage::new(&config.supabase);

    let mut state = AppState::new(config, store);
    match auth {
        Ok(auth) => state = state.with_auth(Arc::new(auth)),
        Err(e) => warn!("Admin sign-in disabled: {}", e),
    }
    match storage {
        Ok(storage) => state = state.with_storage(Arc::new(storage)),
        Err(e) => warn!("Image uploads disabled: {}", e),
    }
    Ok(state)
}

pub async fn handle(mut config: AppConfig, port: Option<u16>) -> anyhow::Result<()> {
    if let Some(port) = port {
        config.server.port = port;
    }
    info!("Starting IVA site in {:?} mode", config.environment);

    let bind_addr = config.bind_addr();
    let state = build_state(config).await?;
    let app = iva_site::app(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
