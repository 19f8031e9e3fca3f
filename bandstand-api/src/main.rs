//! bandstand-api - band website backend service
//!
//! Serves registration/login, admin-gated content management and the
//! newsletter mailer over a JSON-file record store.

use anyhow::Result;
use clap::Parser;
use tracing::info;

use bandstand_api::{build_router, AppState};
use bandstand_common::config::{Cli, Settings};
use bandstand_common::store::{seed, Store};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting bandstand-api v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let settings = Settings::resolve(&cli)?;
    info!("Data directory: {}", settings.data_dir.display());

    let store = Store::open(&settings.data_dir).await?;
    seed::seed_defaults(&store, &settings).await?;
    info!("Record store ready");

    if settings.mail.is_none() {
        info!("Mail delivery not configured; newsletter operations run as no-ops");
    }

    let bind_address = settings.bind_address.clone();
    let state = AppState::new(store, settings);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("bandstand-api listening on http://{}", bind_address);
    info!("Health check: http://{}/api/health", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
