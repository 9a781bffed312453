use chrono::{DateTime, Utc};
use serde::Serialize;

use super::common::{
    Astronomy, Clouds, Coordinates, MainMetrics, Observation, Precipitation, WeatherCondition, Wind,
};
use super::parse_document;
use crate::field::{self, Object};

/// Response of the current weather endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CurrentWeather {
    valid: bool,
    response_code: Option<i32>,
    #[serde(skip)]
    raw_response: Option<String>,
    #[serde(flatten)]
    observation: Observation,
    base_station: Option<String>,
    city_id: Option<i64>,
    city_name: Option<String>,
    coordinates: Option<Coordinates>,
    main: Option<MainMetrics>,
    wind: Option<Wind>,
    clouds: Option<Clouds>,
    rain: Option<Precipitation>,
    snow: Option<Precipitation>,
    astronomy: Option<Astronomy>,
}

impl CurrentWeather {
    /// `None` means no document was obtained; every accessor is then absent.
    pub fn from_json(doc: Option<&Object>) -> Self {
        let Some(obj) = doc else {
            return Self::default();
        };

        Self {
            valid: true,
            response_code: field::response_code(obj, "cod"),
            raw_response: None,
            observation: Observation::from_json(obj),
            base_station: field::string(obj, "base"),
            city_id: field::long(obj, "id"),
            city_name: field::string(obj, "name"),
            coordinates: field::object(obj, "coord").map(Coordinates::from_json),
            main: field::object(obj, "main").map(MainMetrics::from_json),
            wind: field::object(obj, "wind").map(Wind::from_json),
            clouds: field::object(obj, "clouds").map(Clouds::from_json),
            rain: field::object(obj, "rain").map(Precipitation::from_json),
            snow: field::object(obj, "snow").map(Precipitation::from_json),
            astronomy: field::object(obj, "sys").map(Astronomy::from_json),
        }
    }

    /// Parses response text. Text that is not a JSON object is an error.
    pub fn from_raw_response(response: Option<&str>) -> Result<Self, serde_json::Error> {
        let Some(text) = response else {
            return Ok(Self::default());
        };

        let obj = parse_document(text)?;
        Ok(Self { raw_response: Some(text.to_owned()), ..Self::from_json(Some(&obj)) })
    }

    /// True when a JSON document was obtained, whatever fields it held.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn response_code(&self) -> Option<i32> {
        self.response_code
    }

    pub fn raw_response(&self) -> Option<&str> {
        self.raw_response.as_deref()
    }

    pub fn observation(&self) -> &Observation {
        &self.observation
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.observation.timestamp()
    }

    pub fn condition_count(&self) -> usize {
        self.observation.condition_count()
    }

    pub fn condition(&self, index: usize) -> Option<&WeatherCondition> {
        self.observation.condition(index)
    }

    /// Internal parameter the station data came from, e.g. "stations".
    pub fn base_station(&self) -> Option<&str> {
        self.base_station.as_deref()
    }

    pub fn city_id(&self) -> Option<i64> {
        self.city_id
    }

    pub fn city_name(&self) -> Option<&str> {
        self.city_name.as_deref()
    }

    pub fn coordinates(&self) -> Option<&Coordinates> {
        self.coordinates.as_ref()
    }

    pub fn main(&self) -> Option<&MainMetrics> {
        self.main.as_ref()
    }

    pub fn wind(&self) -> Option<&Wind> {
        self.wind.as_ref()
    }

    pub fn clouds(&self) -> Option<&Clouds> {
        self.clouds.as_ref()
    }

    pub fn rain(&self) -> Option<&Precipitation> {
        self.rain.as_ref()
    }

    pub fn snow(&self) -> Option<&Precipitation> {
        self.snow.as_ref()
    }

    pub fn astronomy(&self) -> Option<&Astronomy> {
        self.astronomy.as_ref()
    }
}
