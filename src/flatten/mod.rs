//! Flattens the nested per-location, per-element feed structure into a flat
//! sequence of per-date forecast records.

pub mod error;

pub use error::FlattenError;

use crate::feed::schema::{FeedDocument, Location, TemperatureEntry};
use log::warn;
use std::collections::HashMap;

/// Which weather elements a pipeline extracts.
///
/// The importer keeps the `Wx` condition alongside the temperatures; the
/// dashboard only charts temperatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Elements {
    /// `MaxT` + `MinT` only.
    TempsOnly,
    /// `Wx` + `MaxT` + `MinT`.
    WithCondition,
}

/// One flattened per-location, per-date forecast row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastRecord {
    pub location: String,
    /// Date token taken verbatim from the feed, never reparsed.
    pub date: String,
    /// Free-text condition label; `None` on the temperatures-only path.
    pub weather_desc: Option<String>,
    /// Categorical condition code; `None` on the temperatures-only path.
    pub weather_code: Option<String>,
    pub max_temp: i32,
    pub min_temp: i32,
}

/// Flattens a decoded feed into forecast records.
///
/// Element lists are joined explicitly on their `dataDate` rather than by
/// list position, so a reordered list still pairs the right days. A date
/// missing from any required list is dropped with a warning; for feeds whose
/// lists are aligned this emits exactly `min(len)` records per location.
///
/// # Errors
///
/// Returns [`FlattenError::MissingElement`] if `elements` is
/// [`Elements::WithCondition`] and a location has no `Wx` element, and
/// [`FlattenError::Temperature`] if a temperature value does not parse as an
/// integer. Either error aborts the flatten for the whole feed.
pub fn flatten_feed(
    feed: &FeedDocument,
    elements: Elements,
) -> Result<Vec<ForecastRecord>, FlattenError> {
    let locations = &feed
        .cwaopendata
        .resources
        .resource
        .data
        .agr_weather_forecasts
        .weather_forecasts
        .location;

    let mut records = Vec::new();
    for location in locations {
        flatten_location(location, elements, &mut records)?;
    }
    Ok(records)
}

fn flatten_location(
    location: &Location,
    elements: Elements,
    records: &mut Vec<ForecastRecord>,
) -> Result<(), FlattenError> {
    let name = &location.location_name;
    let max_by_date = index_by_date(&location.weather_elements.max_t.daily);
    let min_by_date = index_by_date(&location.weather_elements.min_t.daily);

    match elements {
        Elements::WithCondition => {
            let wx = location
                .weather_elements
                .wx
                .as_ref()
                .ok_or_else(|| FlattenError::MissingElement {
                    location: name.clone(),
                    element: "Wx",
                })?;

            for entry in &wx.daily {
                let date = &entry.data_date;
                let (Some(&max_t), Some(&min_t)) =
                    (max_by_date.get(date.as_str()), min_by_date.get(date.as_str()))
                else {
                    warn!(
                        "Dropping {} for '{}': no matching MaxT/MinT entry",
                        date, name
                    );
                    continue;
                };
                records.push(ForecastRecord {
                    location: name.clone(),
                    date: date.clone(),
                    weather_desc: Some(entry.weather.clone()),
                    weather_code: Some(entry.weather_id.clone()),
                    max_temp: parse_temperature(name, date, max_t)?,
                    min_temp: parse_temperature(name, date, min_t)?,
                });
            }
        }
        Elements::TempsOnly => {
            for entry in &location.weather_elements.max_t.daily {
                let date = &entry.data_date;
                let Some(&min_t) = min_by_date.get(date.as_str()) else {
                    warn!("Dropping {} for '{}': no matching MinT entry", date, name);
                    continue;
                };
                records.push(ForecastRecord {
                    location: name.clone(),
                    date: date.clone(),
                    weather_desc: None,
                    weather_code: None,
                    max_temp: parse_temperature(name, date, &entry.temperature)?,
                    min_temp: parse_temperature(name, date, min_t)?,
                });
            }
        }
    }
    Ok(())
}

fn index_by_date(daily: &[TemperatureEntry]) -> HashMap<&str, &str> {
    daily
        .iter()
        .map(|entry| (entry.data_date.as_str(), entry.temperature.as_str()))
        .collect()
}

fn parse_temperature(location: &str, date: &str, value: &str) -> Result<i32, FlattenError> {
    value
        .trim()
        .parse::<i32>()
        .map_err(|source| FlattenError::Temperature {
            location: location.to_string(),
            date: date.to_string(),
            value: value.to_string(),
            source,
        })
}
