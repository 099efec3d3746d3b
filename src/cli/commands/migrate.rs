use anyhow::Context;
use tracing::info;

use iva_site::config::AppConfig;
use iva_site::database::DatabaseManager;

pub async fn handle(config: AppConfig) -> anyhow::Result<()> {
    let db = DatabaseManager::connect(&config.database)
        .await
        .context("connecting to DATABASE_URL")?;
    db.run_migrations().await.context("applying migrations")?;
    info!("Migrations applied");
    Ok(())
}
