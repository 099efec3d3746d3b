use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so local runs pick up DATABASE_URL and the SUPABASE_* keys
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("iva_site=info,tower_http=info")),
        )
        .init();

    let cli = cli::Cli::parse();
    let config = iva_site::config::AppConfig::from_env();
    cli::run(cli, config).await
}
