use crate::config::ConfigError;
use crate::feed::FeedError;
use crate::flatten::FlattenError;
use crate::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgWeatherError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error(transparent)]
    Flatten(#[from] FlattenError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Dashboard server failed")]
    Server(#[from] std::io::Error),
}
