use chirp::{config::Settings, prepare_database, run_server};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional outside of development
    dotenv::dotenv().ok();
    init_logging();

    let settings = Settings::from_env()?;
    let db = prepare_database(&settings).await?;

    run_server(db, &settings).await
}
