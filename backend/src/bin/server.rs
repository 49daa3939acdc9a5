//! Dashboard HTTP Server Binary
//!
//! Downloads any missing source files, builds the first snapshot, starts the
//! background refresh and serves the page.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin covid-dashboard-server
//!
//! # Custom config file and port
//! DASHBOARD_CONFIG=/etc/dashboard.toml PORT=9000 cargo run --bin covid-dashboard-server
//! ```
//!
//! # Environment Variables
//!
//! - `DASHBOARD_CONFIG`: Path to the TOML config (default: search `dashboard.toml`)
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8050)
//! - `DATA_DIR`: Directory for downloaded CSVs (default: data)
//! - `REFRESH_HOURS`: Refresh period in hours (default: 4)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use covid_dashboard::config::DashboardConfig;
use covid_dashboard::http::{create_router, AppState};
use covid_dashboard::models::{TopN, ViewFilters};
use covid_dashboard::source::{run_refresh_loop, DatasetLoader, HttpFetcher};
use covid_dashboard::store::{SnapshotOptions, SnapshotStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting COVID-19 dashboard server");

    let config = DashboardConfig::from_default_location()?.with_env_overrides()?;
    info!(
        data_dir = %config.source.data_dir.display(),
        refresh_hours = config.source.refresh_hours,
        "Configuration loaded"
    );

    let options = SnapshotOptions {
        default_country: config.view.default_country.clone(),
        default_filters: ViewFilters {
            top: TopN::clamped(config.view.default_top),
            ..ViewFilters::default()
        },
    };

    let fetcher = Arc::new(HttpFetcher::new(config.source.request_timeout())?);
    let loader = Arc::new(DatasetLoader::new(fetcher, config.source.clone(), options));

    // Without a first snapshot there is nothing to serve.
    let snapshot = loader.load_initial().await?;
    let store = Arc::new(SnapshotStore::new(snapshot));
    info!(version = store.version(), "Initial snapshot installed");

    let refresh = tokio::spawn(run_refresh_loop(Arc::clone(&loader), Arc::clone(&store)));

    let app = create_router(AppState::new(store));

    let addr: SocketAddr = config.bind_address().parse()?;
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown requested");
        })
        .await?;

    refresh.abort();
    Ok(())
}
