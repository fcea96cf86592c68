use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to open database '{0}'")]
    Open(String, #[source] sqlx::Error),

    #[error("Invalid table name '{0}'")]
    InvalidTableName(String),

    #[error("Failed to replace table '{0}'")]
    Replace(String, #[source] sqlx::Error),

    #[error("Failed to read table '{0}'")]
    Read(String, #[source] sqlx::Error),

    #[error("Failed to assemble forecast frame")]
    Frame(#[from] PolarsError),
}
