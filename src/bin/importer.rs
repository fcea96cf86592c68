//! Offline importer: reads a pre-downloaded `F-A0010-001.json` snapshot,
//! flattens it and fully replaces the `weather_forecast` table.

use agweather::{flatten_feed, AgWeatherError, Elements, FeedLoader, ForecastStore, ImporterConfig};

#[tokio::main]
async fn main() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let config = ImporterConfig::from_env();
    if let Err(e) = run(&config).await {
        report(&e);
    }
}

async fn run(config: &ImporterConfig) -> Result<(), AgWeatherError> {
    let feed = FeedLoader::from_file(&config.feed_file)?;
    let records = flatten_feed(&feed, Elements::WithCondition)?;

    let store = ForecastStore::open(&config.database).await?;
    store
        .replace(&config.table, Elements::WithCondition, &records)
        .await?;

    println!(
        "Inserted {} forecast rows into table '{}'.",
        records.len(),
        config.table
    );
    println!("Database saved as: {}", config.database.display());
    Ok(())
}

/// Reports the failure with its source chain and stops the run cleanly.
fn report(error: &AgWeatherError) {
    eprintln!("Import failed: {error}");
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
    std::process::exit(1);
}
