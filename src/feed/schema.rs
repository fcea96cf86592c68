//! Typed model of the CWA `F-A0010-001` agricultural weather feed.
//!
//! The feed nests its payload as `cwaopendata → resources → resource → data
//! → agrWeatherForecasts → weatherForecasts → location[]`. Decoding the whole
//! tree once into these types turns any missing key into a single schema
//! error at the loader boundary instead of key-lookup faults during
//! flattening.

use serde::Deserialize;

/// Root object of the feed document.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedDocument {
    pub cwaopendata: CwaOpendata,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CwaOpendata {
    pub resources: Resources,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Resources {
    pub resource: Resource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Resource {
    pub data: ResourceData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResourceData {
    #[serde(rename = "agrWeatherForecasts")]
    pub agr_weather_forecasts: AgrWeatherForecasts,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AgrWeatherForecasts {
    #[serde(rename = "weatherForecasts")]
    pub weather_forecasts: WeatherForecasts,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherForecasts {
    /// Ordered sequence of per-area forecasts.
    #[serde(default)]
    pub location: Vec<Location>,
}

/// One geographic/administrative area with its forecast elements.
#[derive(Debug, Clone, Deserialize)]
pub struct Location {
    #[serde(rename = "locationName")]
    pub location_name: String,
    #[serde(rename = "weatherElements")]
    pub weather_elements: WeatherElements,
}

/// The per-element daily sequences for one location.
///
/// `Wx` is optional at decode time: the dashboard pipeline never requests it,
/// and the importer reports its absence as a flatten error.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherElements {
    #[serde(rename = "Wx")]
    pub wx: Option<ConditionElement>,
    #[serde(rename = "MaxT")]
    pub max_t: TemperatureElement,
    #[serde(rename = "MinT")]
    pub min_t: TemperatureElement,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConditionElement {
    #[serde(default)]
    pub daily: Vec<ConditionEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TemperatureElement {
    #[serde(default)]
    pub daily: Vec<TemperatureEntry>,
}

/// One day of the `Wx` (weather condition) element.
#[derive(Debug, Clone, Deserialize)]
pub struct ConditionEntry {
    #[serde(rename = "dataDate")]
    pub data_date: String,
    /// Free-text condition label, e.g. "多雲短暫雨".
    pub weather: String,
    /// Categorical condition code.
    #[serde(rename = "weatherid")]
    pub weather_id: String,
}

/// One day of the `MaxT` or `MinT` element.
///
/// The feed serializes temperatures as strings; parsing to integers happens
/// during flattening so a bad value can be reported with its location and
/// date.
#[derive(Debug, Clone, Deserialize)]
pub struct TemperatureEntry {
    #[serde(rename = "dataDate")]
    pub data_date: String,
    pub temperature: String,
}
