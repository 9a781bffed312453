//! Sections shared by current weather and forecast payloads.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::field::{self, Object};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Coordinates {
    latitude: Option<f32>,
    longitude: Option<f32>,
}

impl Coordinates {
    pub fn from_json(obj: &Object) -> Self {
        Self { latitude: field::float(obj, "lat"), longitude: field::float(obj, "lon") }
    }

    pub fn latitude(&self) -> Option<f32> {
        self.latitude
    }

    pub fn longitude(&self) -> Option<f32> {
        self.longitude
    }
}

/// Temperature, pressure and humidity block (`main`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MainMetrics {
    temperature: Option<f32>,
    min_temperature: Option<f32>,
    max_temperature: Option<f32>,
    pressure: Option<f32>,
    humidity: Option<f32>,
}

impl MainMetrics {
    pub fn from_json(obj: &Object) -> Self {
        Self {
            temperature: field::float(obj, "temp"),
            min_temperature: field::float(obj, "temp_min"),
            max_temperature: field::float(obj, "temp_max"),
            pressure: field::float(obj, "pressure"),
            humidity: field::float(obj, "humidity"),
        }
    }

    pub fn temperature(&self) -> Option<f32> {
        self.temperature
    }

    pub fn min_temperature(&self) -> Option<f32> {
        self.min_temperature
    }

    pub fn max_temperature(&self) -> Option<f32> {
        self.max_temperature
    }

    /// Atmospheric pressure in hPa.
    pub fn pressure(&self) -> Option<f32> {
        self.pressure
    }

    /// Relative humidity in percent.
    pub fn humidity(&self) -> Option<f32> {
        self.humidity
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Wind {
    speed: Option<f32>,
    degree: Option<f32>,
    gust: Option<f32>,
}

impl Wind {
    pub fn from_json(obj: &Object) -> Self {
        Self {
            speed: field::float(obj, "speed"),
            degree: field::float(obj, "deg"),
            gust: field::float(obj, "gust"),
        }
    }

    pub fn speed(&self) -> Option<f32> {
        self.speed
    }

    /// Meteorological direction the wind blows from, in degrees.
    pub fn degree(&self) -> Option<f32> {
        self.degree
    }

    pub fn gust(&self) -> Option<f32> {
        self.gust
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Clouds {
    percentage: Option<f32>,
}

impl Clouds {
    pub fn from_json(obj: &Object) -> Self {
        Self { percentage: field::float(obj, "all") }
    }

    pub fn percentage(&self) -> Option<f32> {
        self.percentage
    }
}

/// Rain or snow volume over the last one and three hours.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Precipitation {
    one_hour: Option<f32>,
    three_hours: Option<f32>,
}

impl Precipitation {
    pub fn from_json(obj: &Object) -> Self {
        Self { one_hour: field::float(obj, "1h"), three_hours: field::float(obj, "3h") }
    }

    pub fn one_hour(&self) -> Option<f32> {
        self.one_hour
    }

    pub fn three_hours(&self) -> Option<f32> {
        self.three_hours
    }
}

/// One entry of the `weather` array.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeatherCondition {
    code: Option<i32>,
    name: Option<String>,
    description: Option<String>,
    icon: Option<String>,
}

impl WeatherCondition {
    pub fn from_json(obj: &Object) -> Self {
        Self {
            code: field::int(obj, "id"),
            name: field::string(obj, "main"),
            description: field::string(obj, "description"),
            icon: field::string(obj, "icon"),
        }
    }

    pub fn code(&self) -> Option<i32> {
        self.code
    }

    /// Short group name, e.g. "Rain".
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }
}

/// Station and sun data (`sys`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Astronomy {
    station_type: Option<i32>,
    station_id: Option<i32>,
    message: Option<f64>,
    country_code: Option<String>,
    sunrise: Option<DateTime<Utc>>,
    sunset: Option<DateTime<Utc>>,
}

impl Astronomy {
    pub fn from_json(obj: &Object) -> Self {
        Self {
            station_type: field::int(obj, "type"),
            station_id: field::int(obj, "id"),
            message: field::double(obj, "message"),
            country_code: field::string(obj, "country"),
            sunrise: field::timestamp(obj, "sunrise"),
            sunset: field::timestamp(obj, "sunset"),
        }
    }

    pub fn station_type(&self) -> Option<i32> {
        self.station_type
    }

    pub fn station_id(&self) -> Option<i32> {
        self.station_id
    }

    pub fn message(&self) -> Option<f64> {
        self.message
    }

    pub fn country_code(&self) -> Option<&str> {
        self.country_code.as_deref()
    }

    pub fn sunrise(&self) -> Option<DateTime<Utc>> {
        self.sunrise
    }

    pub fn sunset(&self) -> Option<DateTime<Utc>> {
        self.sunset
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct City {
    id: Option<i64>,
    name: Option<String>,
    country_code: Option<String>,
    population: Option<i64>,
    coordinates: Option<Coordinates>,
}

impl City {
    pub fn from_json(obj: &Object) -> Self {
        Self {
            id: field::long(obj, "id"),
            name: field::string(obj, "name"),
            country_code: field::string(obj, "country"),
            population: field::long(obj, "population"),
            coordinates: field::object(obj, "coord").map(Coordinates::from_json),
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn country_code(&self) -> Option<&str> {
        self.country_code.as_deref()
    }

    pub fn population(&self) -> Option<i64> {
        self.population
    }

    pub fn coordinates(&self) -> Option<&Coordinates> {
        self.coordinates.as_ref()
    }
}

/// What every observation carries: when it was taken and the ordered
/// list of weather conditions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Observation {
    timestamp: Option<DateTime<Utc>>,
    conditions: Vec<WeatherCondition>,
}

impl Observation {
    pub fn from_json(obj: &Object) -> Self {
        Self {
            timestamp: field::timestamp(obj, "dt"),
            conditions: field::list(obj, "weather", WeatherCondition::from_json),
        }
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    pub fn condition_count(&self) -> usize {
        self.conditions.len()
    }

    pub fn condition(&self, index: usize) -> Option<&WeatherCondition> {
        self.conditions.get(index)
    }

    pub fn conditions(&self) -> &[WeatherCondition] {
        &self.conditions
    }
}
