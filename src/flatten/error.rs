use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlattenError {
    #[error("Weather element '{element}' missing for location '{location}'")]
    MissingElement {
        location: String,
        element: &'static str,
    },

    #[error("Non-numeric temperature '{value}' for location '{location}' on {date}")]
    Temperature {
        location: String,
        date: String,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
}
