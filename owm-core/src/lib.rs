//! Client for the OpenWeatherMap 2.5 API.
//!
//! This crate defines:
//! - Request settings (units, language, API key, proxy) and their loading
//! - Address building for current weather, hourly and daily forecasts
//! - Lenient, typed domain models parsed from the JSON responses
//! - The [`WeatherProvider`] facade tying the above to an HTTP transport
//!
//! ```no_run
//! use owm_core::{OpenWeatherMap, WeatherProvider};
//!
//! # async fn run() -> Result<(), owm_core::WeatherNotFoundError> {
//! let owm = OpenWeatherMap::new("your-api-key");
//! let weather = owm.current_weather_by_city_name_and_country("London", "UK").await?;
//! if let Some(temp) = weather.main().and_then(|m| m.temperature()) {
//!     println!("{temp} °C");
//! }
//! # Ok(())
//! # }
//! ```

pub mod address;
pub mod config;
pub mod error;
pub mod field;
pub mod model;
pub mod provider;
pub mod transport;

pub use address::{Location, RequestKind};
pub use config::{Language, ProxyConfig, ProxyCredentials, RequestConfig, Units};
pub use error::{AddressError, FetchError, TransportError, WeatherNotFoundError};
pub use model::{CurrentWeather, DailyForecast, HourlyForecast};
pub use provider::{OpenWeatherMap, WeatherProvider, WeatherResult};
pub use transport::{HttpTransport, ReqwestTransport};
