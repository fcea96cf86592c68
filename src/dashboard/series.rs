//! Pure reshaping of the loaded forecast table into chart series.
//!
//! The UI layer calls these on every selection change; keeping them free of
//! any web machinery makes the filter/reshape step testable on its own.

use polars::prelude::*;
use serde::Serialize;

/// Date-indexed two-series chart data for one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSeries {
    pub location: String,
    pub dates: Vec<String>,
    pub max_t: Vec<i32>,
    pub min_t: Vec<i32>,
}

/// Distinct `location` values in first-seen order.
pub fn locations(frame: &DataFrame) -> Result<Vec<String>, PolarsError> {
    let column = frame.column("location")?.str()?;
    let mut seen = Vec::new();
    for value in column.into_iter().flatten() {
        if !seen.iter().any(|s| s == value) {
            seen.push(value.to_string());
        }
    }
    Ok(seen)
}

/// Filters the table to `location` and reshapes it to a date-indexed
/// max/min temperature series, preserving row order.
pub fn series_for(frame: &DataFrame, location: &str) -> Result<ChartSeries, PolarsError> {
    let filtered = frame
        .clone()
        .lazy()
        .filter(col("location").eq(lit(location)))
        .collect()?;

    let dates = filtered
        .column("date")?
        .str()?
        .into_no_null_iter()
        .map(str::to_string)
        .collect();
    let max_t = filtered.column("max_t")?.i32()?.into_no_null_iter().collect();
    let min_t = filtered.column("min_t")?.i32()?.into_no_null_iter().collect();

    Ok(ChartSeries {
        location: location.to_string(),
        dates,
        max_t,
        min_t,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame() -> DataFrame {
        DataFrame::new(vec![
            Column::new(
                "location".into(),
                vec!["Taipei", "Taipei", "Kaohsiung", "Taipei"],
            ),
            Column::new(
                "date".into(),
                vec!["2024-01-01", "2024-01-02", "2024-01-01", "2024-01-03"],
            ),
            Column::new("max_t".into(), vec![20i32, 22, 27, 21]),
            Column::new("min_t".into(), vec![15i32, 16, 19, 14]),
        ])
        .unwrap()
    }

    #[test]
    fn test_locations_first_seen_order() {
        let found = locations(&sample_frame()).unwrap();
        assert_eq!(found, vec!["Taipei".to_string(), "Kaohsiung".to_string()]);
    }

    #[test]
    fn test_locations_empty_frame() {
        let frame = DataFrame::new(vec![
            Column::new("location".into(), Vec::<String>::new()),
            Column::new("date".into(), Vec::<String>::new()),
            Column::new("max_t".into(), Vec::<i32>::new()),
            Column::new("min_t".into(), Vec::<i32>::new()),
        ])
        .unwrap();
        assert!(locations(&frame).unwrap().is_empty());
    }

    #[test]
    fn test_series_filters_and_keeps_order() {
        let series = series_for(&sample_frame(), "Taipei").unwrap();
        assert_eq!(
            series,
            ChartSeries {
                location: "Taipei".to_string(),
                dates: vec![
                    "2024-01-01".to_string(),
                    "2024-01-02".to_string(),
                    "2024-01-03".to_string()
                ],
                max_t: vec![20, 22, 21],
                min_t: vec![15, 16, 14],
            }
        );
    }

    #[test]
    fn test_series_unknown_location_is_empty() {
        let series = series_for(&sample_frame(), "Penghu").unwrap();
        assert!(series.dates.is_empty());
        assert!(series.max_t.is_empty());
    }
}
