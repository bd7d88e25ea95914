use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use mrt_router::config::ServerConfig;
use mrt_router::network::taipei_transfers;
use mrt_router::planner::SearchConfig;
use mrt_router::timetable::{CacheConfig, CachedSchedule, CsvDirectory, SharedSchedule};
use mrt_router::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mrt_router=info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    if !config.data_dir.is_dir() {
        tracing::warn!(
            data_dir = %config.data_dir.display(),
            "data directory not found; every station will look unserved"
        );
    }

    // Schedules are read from CSV files and cached per station and day group
    let cache_config = CacheConfig {
        ttl: config.cache_ttl,
        ..CacheConfig::default()
    };
    let schedule: SharedSchedule = Arc::new(CachedSchedule::new(
        CsvDirectory::new(config.data_dir.clone()),
        &cache_config,
    ));

    let state = AppState::new(schedule, taipei_transfers(), SearchConfig::default());
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, data_dir = %config.data_dir.display(), "MRT route planner listening");
    info!("API endpoints:");
    info!("  GET  /health                      - Health check");
    info!("  GET  /lines                       - Lines and station codes");
    info!("  GET  /stations                    - Stations with names");
    info!("  GET  /stations/:code              - Station details");
    info!("  GET  /stations/:code/departures   - Departure board");
    info!("  POST /route                       - Plan a route");

    axum::serve(listener, app).await?;
    Ok(())
}
