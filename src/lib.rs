mod config;
mod dashboard;
mod error;
mod feed;
mod flatten;
mod store;

pub use error::AgWeatherError;

pub use config::{ConfigError, DashboardConfig, ImporterConfig};

pub use feed::loader::{FeedLoader, FEED_URL};
pub use feed::schema::*;
pub use feed::FeedError;

pub use flatten::{flatten_feed, Elements, FlattenError, ForecastRecord};

pub use store::{ForecastStore, StoreError};

pub use dashboard::series::{locations, series_for, ChartSeries};
pub use dashboard::{build_router, AppState};
