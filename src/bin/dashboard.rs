//! Live dashboard: fetches the CWA feed, fully replaces the `weather` table,
//! then serves the forecast chart UI over HTTP.
//!
//! The stages run strictly in order: the fetch completes before persistence
//! starts, and the table is committed and read back before the server binds.

use agweather::{
    build_router, flatten_feed, AgWeatherError, AppState, DashboardConfig, Elements, FeedLoader,
    ForecastStore, FEED_URL,
};
use log::info;

#[tokio::main]
async fn main() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let result = match DashboardConfig::from_env() {
        Ok(config) => run(&config).await,
        Err(e) => Err(e.into()),
    };
    if let Err(e) = result {
        report(&e);
    }
}

async fn run(config: &DashboardConfig) -> Result<(), AgWeatherError> {
    let loader = FeedLoader::new()?;
    let feed = loader.fetch(FEED_URL, &config.api_key).await?;
    let records = flatten_feed(&feed, Elements::TempsOnly)?;

    let store = ForecastStore::open(&config.database).await?;
    store
        .replace(&config.table, Elements::TempsOnly, &records)
        .await?;

    let frame = store.load(&config.table).await?;
    info!(
        "Serving {} forecast rows from table '{}'",
        frame.height(),
        config.table
    );

    let app = build_router(AppState::new(frame));
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    println!("Dashboard listening on http://{}", config.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}

/// Reports the failure with its source chain and stops the run cleanly.
fn report(error: &AgWeatherError) {
    eprintln!("Dashboard failed: {error}");
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
    std::process::exit(1);
}
