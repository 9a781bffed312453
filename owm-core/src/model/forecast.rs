use chrono::{DateTime, Utc};
use serde::Serialize;

use super::common::{City, Clouds, MainMetrics, Observation, Precipitation, WeatherCondition, Wind};
use super::parse_document;
use crate::field::{self, Object};

/// One time slice of a forecast, built from an element of the `list` array.
pub trait ForecastEntry: Sized {
    fn from_json(obj: &Object) -> Self;
}

/// A forecast response: city, status fields and the ordered entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast<E> {
    valid: bool,
    response_code: Option<i32>,
    #[serde(skip)]
    raw_response: Option<String>,
    message: Option<f64>,
    city: Option<City>,
    reported_count: Option<i32>,
    entries: Vec<E>,
}

pub type HourlyForecast = Forecast<HourlyEntry>;
pub type DailyForecast = Forecast<DailyEntry>;

impl<E> Default for Forecast<E> {
    fn default() -> Self {
        Self {
            valid: false,
            response_code: None,
            raw_response: None,
            message: None,
            city: None,
            reported_count: None,
            entries: Vec::new(),
        }
    }
}

impl<E: ForecastEntry> Forecast<E> {
    /// `None` means no document was obtained; every accessor is then absent.
    pub fn from_json(doc: Option<&Object>) -> Self {
        let Some(obj) = doc else {
            return Self::default();
        };

        Self {
            valid: true,
            response_code: field::response_code(obj, "cod"),
            raw_response: None,
            message: field::double(obj, "message"),
            city: field::object(obj, "city").map(City::from_json),
            reported_count: field::int(obj, "cnt"),
            entries: field::list(obj, "list", E::from_json),
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
}

impl<E> Forecast<E> {
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

    /// Numeric `message` field of the response, as sent.
    pub fn message(&self) -> Option<f64> {
        self.message
    }

    pub fn city(&self) -> Option<&City> {
        self.city.as_ref()
    }

    /// The `cnt` field. May differ from [`Self::forecast_count`] when the
    /// payload is truncated or holds malformed entries.
    pub fn reported_count(&self) -> Option<i32> {
        self.reported_count
    }

    /// Number of entries actually parsed.
    pub fn forecast_count(&self) -> usize {
        self.entries.len()
    }

    pub fn entry(&self, index: usize) -> Option<&E> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[E] {
        &self.entries
    }
}

/// A three-hour slice of the hourly forecast.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HourlyEntry {
    #[serde(flatten)]
    observation: Observation,
    time_text: Option<String>,
    main: Option<MainMetrics>,
    wind: Option<Wind>,
    clouds: Option<Clouds>,
    rain: Option<Precipitation>,
    snow: Option<Precipitation>,
}

impl ForecastEntry for HourlyEntry {
    fn from_json(obj: &Object) -> Self {
        Self {
            observation: Observation::from_json(obj),
            time_text: field::string(obj, "dt_txt"),
            main: field::object(obj, "main").map(MainMetrics::from_json),
            wind: field::object(obj, "wind").map(Wind::from_json),
            clouds: field::object(obj, "clouds").map(Clouds::from_json),
            rain: field::object(obj, "rain").map(Precipitation::from_json),
            snow: field::object(obj, "snow").map(Precipitation::from_json),
        }
    }
}

impl HourlyEntry {
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

    /// The `dt_txt` field, e.g. "2017-01-30 18:00:00" (UTC).
    pub fn time_text(&self) -> Option<&str> {
        self.time_text.as_deref()
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
}

/// Temperatures over the course of one day (`temp` in the daily payload).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DailyTemperature {
    day: Option<f32>,
    min: Option<f32>,
    max: Option<f32>,
    night: Option<f32>,
    evening: Option<f32>,
    morning: Option<f32>,
}

impl DailyTemperature {
    pub fn from_json(obj: &Object) -> Self {
        Self {
            day: field::float(obj, "day"),
            min: field::float(obj, "min"),
            max: field::float(obj, "max"),
            night: field::float(obj, "night"),
            evening: field::float(obj, "eve"),
            morning: field::float(obj, "morn"),
        }
    }

    pub fn day(&self) -> Option<f32> {
        self.day
    }

    pub fn min(&self) -> Option<f32> {
        self.min
    }

    pub fn max(&self) -> Option<f32> {
        self.max
    }

    pub fn night(&self) -> Option<f32> {
        self.night
    }

    pub fn evening(&self) -> Option<f32> {
        self.evening
    }

    pub fn morning(&self) -> Option<f32> {
        self.morning
    }
}

/// One day of the daily forecast. Unlike the hourly payload, wind, clouds
/// and precipitation are flat numbers on the entry itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DailyEntry {
    #[serde(flatten)]
    observation: Observation,
    temperature: Option<DailyTemperature>,
    pressure: Option<f32>,
    humidity: Option<f32>,
    wind_speed: Option<f32>,
    wind_degree: Option<f32>,
    clouds: Option<f32>,
    rain: Option<f32>,
    snow: Option<f32>,
}

impl ForecastEntry for DailyEntry {
    fn from_json(obj: &Object) -> Self {
        Self {
            observation: Observation::from_json(obj),
            temperature: field::object(obj, "temp").map(DailyTemperature::from_json),
            pressure: field::float(obj, "pressure"),
            humidity: field::float(obj, "humidity"),
            wind_speed: field::float(obj, "speed"),
            wind_degree: field::float(obj, "deg"),
            clouds: field::float(obj, "clouds"),
            rain: field::float(obj, "rain"),
            snow: field::float(obj, "snow"),
        }
    }
}

impl DailyEntry {
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

    pub fn temperature(&self) -> Option<&DailyTemperature> {
        self.temperature.as_ref()
    }

    pub fn pressure(&self) -> Option<f32> {
        self.pressure
    }

    pub fn humidity(&self) -> Option<f32> {
        self.humidity
    }

    pub fn wind_speed(&self) -> Option<f32> {
        self.wind_speed
    }

    pub fn wind_degree(&self) -> Option<f32> {
        self.wind_degree
    }

    pub fn cloud_percentage(&self) -> Option<f32> {
        self.clouds
    }

    pub fn rain(&self) -> Option<f32> {
        self.rain
    }

    pub fn snow(&self) -> Option<f32> {
        self.snow
    }
}
