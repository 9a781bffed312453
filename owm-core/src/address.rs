//! Request addresses for the 2.5 API.
//!
//! Parameter order is fixed: location, `cnt` (daily only), `mode`, `units`,
//! `lang`, `appId`. The current weather by coordinates address carries no
//! `lang` parameter.

use std::fmt;

use url::form_urlencoded;

use crate::{config::RequestConfig, error::AddressError};

const MODE: &str = "json";

/// Which endpoint a request goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Current,
    HourlyForecast,
    DailyForecast,
}

impl RequestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestKind::Current => "current weather",
            RequestKind::HourlyForecast => "hourly forecast",
            RequestKind::DailyForecast => "daily forecast",
        }
    }

    fn endpoint(&self) -> &'static str {
        match self {
            RequestKind::Current => "weather",
            RequestKind::HourlyForecast => "forecast",
            RequestKind::DailyForecast => "forecast/daily",
        }
    }

    pub fn not_found_message(&self) -> &'static str {
        match self {
            RequestKind::Current => "Unable to retrieve current weather, check your method call",
            RequestKind::HourlyForecast => "Unable to retrieve hourly forecast, check your method call",
            RequestKind::DailyForecast => "Unable to retrieve daily forecast, check your method call",
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the caller identifies the place they want weather for.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    CityName(String),
    CityNameAndCountry { city: String, country: String },
    CityCode(i64),
    Coordinates { latitude: f32, longitude: f32 },
}

impl Location {
    pub fn city(name: impl Into<String>) -> Self {
        Location::CityName(name.into())
    }

    pub fn city_in_country(city: impl Into<String>, country: impl Into<String>) -> Self {
        Location::CityNameAndCountry { city: city.into(), country: country.into() }
    }

    pub fn coordinates(latitude: f32, longitude: f32) -> Self {
        Location::Coordinates { latitude, longitude }
    }

    /// The leading query parameters selecting this location.
    fn query(&self) -> Result<String, AddressError> {
        match self {
            Location::CityName(city) => {
                if city.trim().is_empty() {
                    return Err(AddressError::EmptyCityName);
                }
                Ok(format!("q={}", encode(city)))
            }
            Location::CityNameAndCountry { city, country } => {
                if city.trim().is_empty() {
                    return Err(AddressError::EmptyCityName);
                }
                if country.trim().is_empty() {
                    return Err(AddressError::EmptyCountryCode);
                }
                Ok(format!("q={}", encode(&format!("{city},{country}"))))
            }
            Location::CityCode(code) => Ok(format!("id={code}")),
            Location::Coordinates { latitude, longitude } => {
                if !latitude.is_finite() || !longitude.is_finite() {
                    return Err(AddressError::NonFiniteCoordinates {
                        latitude: *latitude,
                        longitude: *longitude,
                    });
                }
                Ok(format!("lat={}&lon={}", coordinate(*latitude), coordinate(*longitude)))
            }
        }
    }
}

/// Address of the current weather endpoint.
pub fn current_weather(config: &RequestConfig, location: &Location) -> Result<String, AddressError> {
    build(config, RequestKind::Current, location, None)
}

/// Address of the 3-hour step forecast endpoint.
pub fn hourly_forecast(config: &RequestConfig, location: &Location) -> Result<String, AddressError> {
    build(config, RequestKind::HourlyForecast, location, None)
}

/// Address of the daily forecast endpoint, asking for `count` days.
pub fn daily_forecast(
    config: &RequestConfig,
    location: &Location,
    count: u8,
) -> Result<String, AddressError> {
    build(config, RequestKind::DailyForecast, location, Some(count))
}

fn build(
    config: &RequestConfig,
    kind: RequestKind,
    location: &Location,
    count: Option<u8>,
) -> Result<String, AddressError> {
    let mut address = format!(
        "{}/{}?{}",
        config.api_base.trim_end_matches('/'),
        kind.endpoint(),
        location.query()?
    );

    if let Some(count) = count {
        address.push_str(&format!("&cnt={count}"));
    }

    address.push_str(&format!("&mode={MODE}&units={}", config.units));

    // Existing callers rely on this address carrying no `lang`.
    let omit_lang = kind == RequestKind::Current && matches!(location, Location::Coordinates { .. });
    if !omit_lang {
        address.push_str(&format!("&lang={}", config.language));
    }

    address.push_str(&format!("&appId={}", config.api_key));
    Ok(address)
}

/// Same address with the API key masked, for logs.
pub(crate) fn redacted(address: &str, config: &RequestConfig) -> String {
    if config.api_key.is_empty() {
        return address.to_string();
    }
    address.replace(&format!("appId={}", config.api_key), "appId=***")
}

/// `application/x-www-form-urlencoded`: alphanumerics and `*-._` stay,
/// space becomes `+`, everything else is `%XX` over UTF-8.
fn encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Shortest round-trip decimal, always with a fractional part.
fn coordinate(value: f32) -> String {
    format!("{value:?}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Language, Units};

    const BASE: &str = "http://api.openweathermap.org/data/2.5";

    fn config() -> RequestConfig {
        RequestConfig::new("appId").with_units(Units::Metric).with_language(Language::English)
    }

    #[test]
    fn current_weather_by_city_name() {
        let address = current_weather(&config(), &Location::city("cityName")).unwrap();
        assert_eq!(address, format!("{BASE}/weather?q=cityName&mode=json&units=metric&lang=en&appId=appId"));
    }

    #[test]
    fn current_weather_by_city_name_and_country_encodes_the_comma() {
        let address =
            current_weather(&config(), &Location::city_in_country("cityName", "countryCode")).unwrap();
        assert_eq!(
            address,
            format!("{BASE}/weather?q=cityName%2CcountryCode&mode=json&units=metric&lang=en&appId=appId")
        );
    }

    #[test]
    fn current_weather_by_city_code() {
        let address = current_weather(&config(), &Location::CityCode(33)).unwrap();
        assert_eq!(address, format!("{BASE}/weather?id=33&mode=json&units=metric&lang=en&appId=appId"));
    }

    #[test]
    fn current_weather_by_coordinates_has_no_lang() {
        let address = current_weather(&config(), &Location::coordinates(51.51, -0.13)).unwrap();
        assert_eq!(address, format!("{BASE}/weather?lat=51.51&lon=-0.13&mode=json&units=metric&appId=appId"));
    }

    #[test]
    fn hourly_forecast_by_coordinates_keeps_lang() {
        let address = hourly_forecast(&config(), &Location::coordinates(1.0, 2.0)).unwrap();
        assert_eq!(
            address,
            format!("{BASE}/forecast?lat=1.0&lon=2.0&mode=json&units=metric&lang=en&appId=appId")
        );
    }

    #[test]
    fn hourly_forecast_by_city_code() {
        let address = hourly_forecast(&config(), &Location::CityCode(524_901)).unwrap();
        assert_eq!(address, format!("{BASE}/forecast?id=524901&mode=json&units=metric&lang=en&appId=appId"));
    }

    #[test]
    fn daily_forecast_puts_count_after_location() {
        let address = daily_forecast(&config(), &Location::city("cityName"), 5).unwrap();
        assert_eq!(
            address,
            format!("{BASE}/forecast/daily?q=cityName&cnt=5&mode=json&units=metric&lang=en&appId=appId")
        );

        let address = daily_forecast(&config(), &Location::coordinates(1.0, 2.0), 16).unwrap();
        assert_eq!(
            address,
            format!("{BASE}/forecast/daily?lat=1.0&lon=2.0&cnt=16&mode=json&units=metric&lang=en&appId=appId")
        );
    }

    #[test]
    fn daily_count_is_plain_decimal() {
        let address = daily_forecast(&config(), &Location::CityCode(1), 0).unwrap();
        assert!(address.contains("&cnt=0&"));

        let address = daily_forecast(&config(), &Location::CityCode(1), 255).unwrap();
        assert!(address.contains("&cnt=255&"));
    }

    #[test]
    fn city_names_are_form_encoded() {
        let address = current_weather(&config(), &Location::city_in_country("London", " UK")).unwrap();
        assert!(address.contains("?q=London%2C+UK&"));

        let address = current_weather(&config(), &Location::city("São Paulo")).unwrap();
        assert!(address.contains("?q=S%C3%A3o+Paulo&"));

        let address = current_weather(&config(), &Location::city("a&b=c")).unwrap();
        assert!(address.contains("?q=a%26b%3Dc&"));
    }

    #[test]
    fn units_and_language_render_as_codes() {
        let cfg = config().with_units(Units::Imperial).with_language(Language::ChineseTraditional);
        let address = hourly_forecast(&cfg, &Location::city("Taipei")).unwrap();

        assert!(address.ends_with("&mode=json&units=imperial&lang=zh_tw&appId=appId"));
    }

    #[test]
    fn api_base_with_or_without_trailing_slash() {
        let cfg = config().with_api_base("http://localhost:8080/data/2.5");
        let address = current_weather(&cfg, &Location::CityCode(1)).unwrap();
        assert!(address.starts_with("http://localhost:8080/data/2.5/weather?id=1&"));
    }

    #[test]
    fn addresses_are_deterministic() {
        let cfg = config();
        let location = Location::city_in_country("Zürich", "CH");

        assert_eq!(
            daily_forecast(&cfg, &location, 7).unwrap(),
            daily_forecast(&cfg, &location, 7).unwrap()
        );
    }

    #[test]
    fn invalid_locations_are_rejected() {
        let cfg = config();

        assert_eq!(current_weather(&cfg, &Location::city("  ")), Err(AddressError::EmptyCityName));
        assert_eq!(
            hourly_forecast(&cfg, &Location::city_in_country("Paris", "")),
            Err(AddressError::EmptyCountryCode)
        );
        assert!(matches!(
            daily_forecast(&cfg, &Location::coordinates(f32::NAN, 0.0), 3),
            Err(AddressError::NonFiniteCoordinates { .. })
        ));
    }

    #[test]
    fn redacted_masks_the_key() {
        let cfg = RequestConfig::new("s3cr3t");
        let address = current_weather(&cfg, &Location::CityCode(1)).unwrap();

        let masked = redacted(&address, &cfg);
        assert!(masked.ends_with("&appId=***"));
        assert!(!masked.contains("s3cr3t"));
    }
}
