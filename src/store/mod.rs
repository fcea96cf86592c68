//! SQLite persistence for flattened forecast records.
//!
//! Each run fully replaces the target table: drop, recreate, insert, all in
//! one transaction. A failure partway through rolls back and leaves the
//! previous table contents untouched.

pub mod error;

pub use error::StoreError;

use crate::flatten::{Elements, ForecastRecord};
use log::info;
use polars::prelude::*;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Row, SqlitePool};
use std::path::Path;

/// Handle on one SQLite database file.
pub struct ForecastStore {
    pool: SqlitePool,
}

impl ForecastStore {
    /// Opens (creating if absent) the database file at `db_path`.
    pub async fn open(db_path: &Path) -> Result<ForecastStore, StoreError> {
        let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
        let pool = SqlitePool::connect(&db_url)
            .await
            .map_err(|e| StoreError::Open(db_path.display().to_string(), e))?;
        Ok(ForecastStore { pool })
    }

    /// Opens an in-memory database.
    ///
    /// Capped at one connection: each `:memory:` connection is its own
    /// database, so a larger pool would scatter the table across databases.
    pub async fn open_in_memory() -> Result<ForecastStore, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(|e| StoreError::Open(":memory:".to_string(), e))?;
        Ok(ForecastStore { pool })
    }

    /// Drops and recreates `table`, then inserts `records` in input order.
    ///
    /// The table gets an auto-incrementing `id` plus one column per record
    /// field: `location`, `date`, `max_t`, `min_t`, and for
    /// [`Elements::WithCondition`] also `weather_desc` and `weather_id`.
    /// The whole replace runs inside a single transaction.
    pub async fn replace(
        &self,
        table: &str,
        elements: Elements,
        records: &[ForecastRecord],
    ) -> Result<(), StoreError> {
        validate_table_name(table)?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::Replace(table.to_string(), e))?;

        sqlx::query(&format!("DROP TABLE IF EXISTS {table}"))
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::Replace(table.to_string(), e))?;

        let create = match elements {
            Elements::WithCondition => format!(
                "CREATE TABLE {table} (
                     id INTEGER PRIMARY KEY AUTOINCREMENT,
                     location TEXT,
                     date TEXT,
                     weather_desc TEXT,
                     weather_id TEXT,
                     max_t INTEGER,
                     min_t INTEGER
                 )"
            ),
            Elements::TempsOnly => format!(
                "CREATE TABLE {table} (
                     id INTEGER PRIMARY KEY AUTOINCREMENT,
                     location TEXT,
                     date TEXT,
                     max_t INTEGER,
                     min_t INTEGER
                 )"
            ),
        };
        sqlx::query(&create)
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::Replace(table.to_string(), e))?;

        let insert = match elements {
            Elements::WithCondition => format!(
                "INSERT INTO {table} \
                 (location, date, weather_desc, weather_id, max_t, min_t) \
                 VALUES (?, ?, ?, ?, ?, ?)"
            ),
            Elements::TempsOnly => {
                format!("INSERT INTO {table} (location, date, max_t, min_t) VALUES (?, ?, ?, ?)")
            }
        };
        for record in records {
            let query = match elements {
                Elements::WithCondition => sqlx::query(&insert)
                    .bind(&record.location)
                    .bind(&record.date)
                    .bind(&record.weather_desc)
                    .bind(&record.weather_code)
                    .bind(record.max_temp)
                    .bind(record.min_temp),
                Elements::TempsOnly => sqlx::query(&insert)
                    .bind(&record.location)
                    .bind(&record.date)
                    .bind(record.max_temp)
                    .bind(record.min_temp),
            };
            query
                .execute(&mut *tx)
                .await
                .map_err(|e| StoreError::Replace(table.to_string(), e))?;
        }

        tx.commit()
            .await
            .map_err(|e| StoreError::Replace(table.to_string(), e))?;

        info!("Replaced table '{}' with {} rows", table, records.len());
        Ok(())
    }

    /// Reads the whole table back as a DataFrame with `location`, `date`,
    /// `max_t` and `min_t` columns, in insertion order.
    pub async fn load(&self, table: &str) -> Result<DataFrame, StoreError> {
        validate_table_name(table)?;

        let rows = sqlx::query(&format!(
            "SELECT location, date, max_t, min_t FROM {table} ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Read(table.to_string(), e))?;

        let mut locations = Vec::with_capacity(rows.len());
        let mut dates = Vec::with_capacity(rows.len());
        let mut max_temps = Vec::with_capacity(rows.len());
        let mut min_temps = Vec::with_capacity(rows.len());
        for row in &rows {
            locations.push(row.get::<String, _>("location"));
            dates.push(row.get::<String, _>("date"));
            max_temps.push(row.get::<i32, _>("max_t"));
            min_temps.push(row.get::<i32, _>("min_t"));
        }

        let frame = DataFrame::new(vec![
            Column::new("location".into(), locations),
            Column::new("date".into(), dates),
            Column::new("max_t".into(), max_temps),
            Column::new("min_t".into(), min_temps),
        ])?;
        Ok(frame)
    }
}

/// Table names are interpolated into SQL, so only identifier characters pass.
fn validate_table_name(table: &str) -> Result<(), StoreError> {
    let valid = !table.is_empty()
        && table
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !table.chars().next().unwrap_or('0').is_ascii_digit();
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidTableName(table.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records() -> Vec<ForecastRecord> {
        vec![
            ForecastRecord {
                location: "Taipei".to_string(),
                date: "2024-01-01".to_string(),
                weather_desc: Some("Cloudy".to_string()),
                weather_code: Some("03".to_string()),
                max_temp: 20,
                min_temp: 15,
            },
            ForecastRecord {
                location: "Kaohsiung".to_string(),
                date: "2024-01-01".to_string(),
                weather_desc: Some("Sunny".to_string()),
                weather_code: Some("01".to_string()),
                max_temp: 27,
                min_temp: 19,
            },
        ]
    }

    #[tokio::test]
    async fn test_replace_and_load_roundtrip() {
        let store = ForecastStore::open_in_memory().await.unwrap();
        store
            .replace("weather", Elements::TempsOnly, &sample_records())
            .await
            .unwrap();

        let frame = store.load("weather").await.unwrap();
        assert_eq!(frame.height(), 2);
        let locations = frame.column("location").unwrap().str().unwrap();
        assert_eq!(locations.get(0), Some("Taipei"));
        assert_eq!(locations.get(1), Some("Kaohsiung"));
        let max_t = frame.column("max_t").unwrap().i32().unwrap();
        assert_eq!(max_t.get(1), Some(27));
    }

    #[tokio::test]
    async fn test_insert_writes_all_columns_for_both_shapes() {
        let store = ForecastStore::open_in_memory().await.unwrap();
        let records = sample_records();
        store
            .replace("weather_forecast", Elements::WithCondition, &records)
            .await
            .unwrap();
        store
            .replace("weather", Elements::TempsOnly, &records)
            .await
            .unwrap();

        let row = sqlx::query(
            "SELECT location, date, weather_desc, weather_id, max_t, min_t \
             FROM weather_forecast ORDER BY id LIMIT 1",
        )
        .fetch_one(&store.pool)
        .await
        .unwrap();
        assert_eq!(row.get::<String, _>("location"), "Taipei");
        assert_eq!(row.get::<String, _>("date"), "2024-01-01");
        assert_eq!(row.get::<String, _>("weather_desc"), "Cloudy");
        assert_eq!(row.get::<String, _>("weather_id"), "03");
        assert_eq!(row.get::<i32, _>("max_t"), 20);
        assert_eq!(row.get::<i32, _>("min_t"), 15);

        let frame = store.load("weather").await.unwrap();
        assert_eq!(frame.height(), records.len());
    }

    #[tokio::test]
    async fn test_rerun_does_not_accumulate_rows() {
        let store = ForecastStore::open_in_memory().await.unwrap();
        let records = sample_records();
        store
            .replace("weather_forecast", Elements::WithCondition, &records)
            .await
            .unwrap();
        store
            .replace("weather_forecast", Elements::WithCondition, &records)
            .await
            .unwrap();

        let frame = store.load("weather_forecast").await.unwrap();
        assert_eq!(frame.height(), records.len());
    }

    #[tokio::test]
    async fn test_empty_record_set_creates_empty_table() {
        let store = ForecastStore::open_in_memory().await.unwrap();
        store
            .replace("weather", Elements::TempsOnly, &[])
            .await
            .unwrap();
        let frame = store.load("weather").await.unwrap();
        assert_eq!(frame.height(), 0);
    }

    #[tokio::test]
    async fn test_bad_table_name_rejected() {
        let store = ForecastStore::open_in_memory().await.unwrap();
        let err = store
            .replace("weather; DROP TABLE x", Elements::TempsOnly, &[])
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidTableName(_)));
    }
}
