use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use triago::core_state::CoreState;
use triago::{api, config, db};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    if let Err(error) = run().await {
        tracing::error!(%error, "Fatal error");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = config::app_data_dir();
    std::fs::create_dir_all(&data_dir)?;

    let db_path = config::knowledge_db_path();
    let conn = db::open_database(&db_path)?;
    db::seed_catalog(&conn)?;
    drop(conn);

    let port = match std::env::var("TRIAGO_PORT") {
        Ok(value) => value.parse()?,
        Err(_) => config::DEFAULT_PORT,
    };
    let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), port);

    let core = Arc::new(CoreState::new(db_path));
    api::server::serve(core, addr).await?;
    Ok(())
}
