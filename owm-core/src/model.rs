//! Typed, read-only views over API responses.
//!
//! Every accessor returns `None` when the response did not carry the field
//! (or carried it with the wrong type). Nothing here falls back to zero or
//! an empty string.

use crate::field::Object;

pub mod common;
pub mod current;
pub mod forecast;

pub use common::{
    Astronomy, City, Clouds, Coordinates, MainMetrics, Observation, Precipitation, WeatherCondition, Wind,
};
pub use current::CurrentWeather;
pub use forecast::{
    DailyEntry, DailyForecast, DailyTemperature, Forecast, ForecastEntry, HourlyEntry, HourlyForecast,
};

/// The root of every response must be a JSON object.
pub(crate) fn parse_document(text: &str) -> Result<Object, serde_json::Error> {
    serde_json::from_str(text)
}
