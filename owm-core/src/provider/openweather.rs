use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use crate::{
    address::{self, Location, RequestKind},
    config::{Language, ProxyConfig, RequestConfig, Units},
    error::{AddressError, WeatherNotFoundError},
    model::{CurrentWeather, DailyForecast, HourlyForecast},
    transport::{HttpTransport, ReqwestTransport},
};

use super::{WeatherProvider, WeatherResult};

type Parser<M> = fn(Option<&str>) -> Result<M, serde_json::Error>;

/// Entry point of the library: holds the request settings and a transport,
/// builds an address per call and parses what comes back.
///
/// Settings can be changed between calls; each call reads them as they are
/// at that moment.
#[derive(Debug, Clone)]
pub struct OpenWeatherMap<T = ReqwestTransport> {
    config: RequestConfig,
    transport: T,
}

impl OpenWeatherMap<ReqwestTransport> {
    /// Metric units, English descriptions, no proxy.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_config(RequestConfig::new(api_key))
    }

    pub fn with_config(config: RequestConfig) -> Self {
        Self::with_transport(config, ReqwestTransport::new())
    }
}

impl<T: HttpTransport> OpenWeatherMap<T> {
    pub fn with_transport(config: RequestConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &RequestConfig {
        &self.config
    }

    pub fn api_key(&self) -> &str {
        &self.config.api_key
    }

    pub fn units(&self) -> Units {
        self.config.units
    }

    pub fn language(&self) -> Language {
        self.config.language
    }

    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.config.api_key = api_key.into();
    }

    pub fn set_units(&mut self, units: Units) {
        self.config.units = units;
    }

    pub fn set_language(&mut self, language: Language) {
        self.config.language = language;
    }

    /// Route requests through an HTTP proxy without authentication.
    pub fn set_proxy(&mut self, host: impl Into<String>, port: u16) {
        self.config.proxy = Some(ProxyConfig::new(host, port));
    }

    pub fn set_proxy_with_credentials(
        &mut self,
        host: impl Into<String>,
        port: u16,
        user: impl Into<String>,
        password: impl Into<String>,
    ) {
        self.config.proxy = Some(ProxyConfig::with_credentials(host, port, user, password));
    }

    pub fn clear_proxy(&mut self) {
        self.config.proxy = None;
    }

    pub async fn current_weather(&self, location: &Location) -> WeatherResult<CurrentWeather> {
        let address = address::current_weather(&self.config, location);
        self.fetch(RequestKind::Current, address, CurrentWeather::from_raw_response).await
    }

    pub async fn hourly_forecast(&self, location: &Location) -> WeatherResult<HourlyForecast> {
        let address = address::hourly_forecast(&self.config, location);
        self.fetch(RequestKind::HourlyForecast, address, HourlyForecast::from_raw_response).await
    }

    pub async fn daily_forecast(&self, location: &Location, count: u8) -> WeatherResult<DailyForecast> {
        let address = address::daily_forecast(&self.config, location, count);
        self.fetch(RequestKind::DailyForecast, address, DailyForecast::from_raw_response).await
    }

    /// Parses a response obtained elsewhere. `None` yields an invalid, empty result.
    pub fn current_weather_from_raw_response(&self, response: Option<&str>) -> WeatherResult<CurrentWeather> {
        CurrentWeather::from_raw_response(response)
            .map_err(|e| WeatherNotFoundError::new(RequestKind::Current, e))
    }

    pub fn hourly_forecast_from_raw_response(&self, response: Option<&str>) -> WeatherResult<HourlyForecast> {
        HourlyForecast::from_raw_response(response)
            .map_err(|e| WeatherNotFoundError::new(RequestKind::HourlyForecast, e))
    }

    pub fn daily_forecast_from_raw_response(&self, response: Option<&str>) -> WeatherResult<DailyForecast> {
        DailyForecast::from_raw_response(response)
            .map_err(|e| WeatherNotFoundError::new(RequestKind::DailyForecast, e))
    }

    #[instrument(skip_all, fields(kind = %kind))]
    async fn fetch<M: Send>(
        &self,
        kind: RequestKind,
        address: Result<String, AddressError>,
        parse: Parser<M>,
    ) -> WeatherResult<M> {
        let address = address.map_err(|e| {
            warn!(error = %e, "rejected location");
            WeatherNotFoundError::new(kind, e)
        })?;

        debug!(url = %address::redacted(&address, &self.config), "requesting");

        let body = self
            .transport
            .get(&address, self.config.active_proxy())
            .await
            .map_err(|e| {
                warn!(error = %e, "request failed");
                WeatherNotFoundError::new(kind, e)
            })?;

        parse(Some(&body)).map_err(|e| {
            warn!(error = %e, "response is not a JSON object");
            WeatherNotFoundError::new(kind, e)
        })
    }
}

#[async_trait]
impl<T: HttpTransport> WeatherProvider for OpenWeatherMap<T> {
    async fn current_weather_by_city_name(&self, city: &str) -> WeatherResult<CurrentWeather> {
        self.current_weather(&Location::city(city)).await
    }

    async fn current_weather_by_city_name_and_country(
        &self,
        city: &str,
        country: &str,
    ) -> WeatherResult<CurrentWeather> {
        self.current_weather(&Location::city_in_country(city, country)).await
    }

    async fn current_weather_by_city_code(&self, code: i64) -> WeatherResult<CurrentWeather> {
        self.current_weather(&Location::CityCode(code)).await
    }

    async fn current_weather_by_coordinates(
        &self,
        latitude: f32,
        longitude: f32,
    ) -> WeatherResult<CurrentWeather> {
        self.current_weather(&Location::coordinates(latitude, longitude)).await
    }

    async fn hourly_forecast_by_city_name(&self, city: &str) -> WeatherResult<HourlyForecast> {
        self.hourly_forecast(&Location::city(city)).await
    }

    async fn hourly_forecast_by_city_name_and_country(
        &self,
        city: &str,
        country: &str,
    ) -> WeatherResult<HourlyForecast> {
        self.hourly_forecast(&Location::city_in_country(city, country)).await
    }

    async fn hourly_forecast_by_city_code(&self, code: i64) -> WeatherResult<HourlyForecast> {
        self.hourly_forecast(&Location::CityCode(code)).await
    }

    async fn hourly_forecast_by_coordinates(
        &self,
        latitude: f32,
        longitude: f32,
    ) -> WeatherResult<HourlyForecast> {
        self.hourly_forecast(&Location::coordinates(latitude, longitude)).await
    }

    async fn daily_forecast_by_city_name(&self, city: &str, count: u8) -> WeatherResult<DailyForecast> {
        self.daily_forecast(&Location::city(city), count).await
    }

    async fn daily_forecast_by_city_name_and_country(
        &self,
        city: &str,
        country: &str,
        count: u8,
    ) -> WeatherResult<DailyForecast> {
        self.daily_forecast(&Location::city_in_country(city, country), count).await
    }

    async fn daily_forecast_by_city_code(&self, code: i64, count: u8) -> WeatherResult<DailyForecast> {
        self.daily_forecast(&Location::CityCode(code), count).await
    }

    async fn daily_forecast_by_coordinates(
        &self,
        latitude: f32,
        longitude: f32,
        count: u8,
    ) -> WeatherResult<DailyForecast> {
        self.daily_forecast(&Location::coordinates(latitude, longitude), count).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FetchError, TransportError};
    use std::sync::Mutex;

    const BASE: &str = "http://api.openweathermap.org/data/2.5";

    /// Records every request and answers with a canned reply.
    #[derive(Debug)]
    struct FakeTransport {
        reply: Result<String, u16>,
        requests: Mutex<Vec<(String, Option<ProxyConfig>)>>,
    }

    impl FakeTransport {
        fn answering(body: &str) -> Self {
            Self { reply: Ok(body.to_string()), requests: Mutex::new(Vec::new()) }
        }

        fn failing_with(status: u16) -> Self {
            Self { reply: Err(status), requests: Mutex::new(Vec::new()) }
        }

        fn urls(&self) -> Vec<String> {
            self.requests.lock().unwrap().iter().map(|(url, _)| url.clone()).collect()
        }

        fn proxies(&self) -> Vec<Option<ProxyConfig>> {
            self.requests.lock().unwrap().iter().map(|(_, proxy)| proxy.clone()).collect()
        }
    }

    #[async_trait]
    impl HttpTransport for FakeTransport {
        async fn get(&self, url: &str, proxy: Option<&ProxyConfig>) -> Result<String, TransportError> {
            self.requests.lock().unwrap().push((url.to_string(), proxy.cloned()));
            match &self.reply {
                Ok(body) => Ok(body.clone()),
                Err(status) => Err(TransportError::Status { status: *status, body: "{\"cod\":404}".into() }),
            }
        }
    }

    fn owm(transport: FakeTransport) -> OpenWeatherMap<FakeTransport> {
        OpenWeatherMap::with_transport(RequestConfig::new("appId"), transport)
    }

    #[test]
    fn defaults_are_metric_and_english() {
        let owm = OpenWeatherMap::new("");

        assert_eq!(owm.units(), Units::Metric);
        assert_eq!(owm.language(), Language::English);
        assert!(owm.config().proxy.is_none());
    }

    #[tokio::test]
    async fn current_weather_methods_request_expected_addresses() {
        let owm = owm(FakeTransport::answering("{}"));

        owm.current_weather_by_city_name("cityName").await.unwrap();
        owm.current_weather_by_city_name_and_country("cityName", "cc").await.unwrap();
        owm.current_weather_by_city_code(33).await.unwrap();
        owm.current_weather_by_coordinates(1.0, 2.0).await.unwrap();

        assert_eq!(
            owm.transport.urls(),
            vec![
                format!("{BASE}/weather?q=cityName&mode=json&units=metric&lang=en&appId=appId"),
                format!("{BASE}/weather?q=cityName%2Ccc&mode=json&units=metric&lang=en&appId=appId"),
                format!("{BASE}/weather?id=33&mode=json&units=metric&lang=en&appId=appId"),
                format!("{BASE}/weather?lat=1.0&lon=2.0&mode=json&units=metric&appId=appId"),
            ]
        );
    }

    #[tokio::test]
    async fn forecast_methods_request_expected_addresses() {
        let owm = owm(FakeTransport::answering("{}"));

        owm.hourly_forecast_by_city_name("cityName").await.unwrap();
        owm.hourly_forecast_by_city_name_and_country("cityName", "cc").await.unwrap();
        owm.hourly_forecast_by_city_code(0).await.unwrap();
        owm.hourly_forecast_by_coordinates(1.0, 2.0).await.unwrap();
        owm.daily_forecast_by_city_name("cityName", 0).await.unwrap();
        owm.daily_forecast_by_city_name_and_country("cityName", "cc", 3).await.unwrap();
        owm.daily_forecast_by_city_code(0, 7).await.unwrap();
        owm.daily_forecast_by_coordinates(1.0, 2.0, 5).await.unwrap();

        let tail = "mode=json&units=metric&lang=en&appId=appId";
        assert_eq!(
            owm.transport.urls(),
            vec![
                format!("{BASE}/forecast?q=cityName&{tail}"),
                format!("{BASE}/forecast?q=cityName%2Ccc&{tail}"),
                format!("{BASE}/forecast?id=0&{tail}"),
                format!("{BASE}/forecast?lat=1.0&lon=2.0&{tail}"),
                format!("{BASE}/forecast/daily?q=cityName&cnt=0&{tail}"),
                format!("{BASE}/forecast/daily?q=cityName%2Ccc&cnt=3&{tail}"),
                format!("{BASE}/forecast/daily?id=0&cnt=7&{tail}"),
                format!("{BASE}/forecast/daily?lat=1.0&lon=2.0&cnt=5&{tail}"),
            ]
        );
    }

    #[tokio::test]
    async fn body_is_parsed_into_the_domain_model() {
        let owm = owm(FakeTransport::answering(
            r#"{"id": 2643743, "name": "London", "main": {"temp": 12.5}, "cod": 200}"#,
        ));

        let cw = owm.current_weather_by_city_name("London").await.unwrap();

        assert!(cw.is_valid());
        assert_eq!(cw.city_id(), Some(2_643_743));
        assert_eq!(cw.city_name(), Some("London"));
        assert_eq!(cw.main().and_then(|m| m.temperature()), Some(12.5));
        assert!(cw.raw_response().is_some());
    }

    #[tokio::test]
    async fn error_status_becomes_weather_not_found() {
        let owm = owm(FakeTransport::failing_with(404));

        let err = owm.hourly_forecast_by_city_code(1).await.unwrap_err();

        assert_eq!(err.kind(), RequestKind::HourlyForecast);
        assert_eq!(err.to_string(), "Unable to retrieve hourly forecast, check your method call");
        assert!(matches!(err.cause(), FetchError::Transport(TransportError::Status { status: 404, .. })));
    }

    #[tokio::test]
    async fn malformed_body_becomes_weather_not_found() {
        let owm = owm(FakeTransport::answering("<html>Bad Gateway</html>"));

        let err = owm.daily_forecast_by_city_code(1, 3).await.unwrap_err();

        assert_eq!(err.kind(), RequestKind::DailyForecast);
        assert!(matches!(err.cause(), FetchError::Parse(_)));
    }

    #[tokio::test]
    async fn invalid_location_fails_without_a_request() {
        let owm = owm(FakeTransport::answering("{}"));

        let err = owm.current_weather_by_city_name("").await.unwrap_err();

        assert!(matches!(err.cause(), FetchError::Address(AddressError::EmptyCityName)));
        assert!(owm.transport.urls().is_empty());
    }

    #[tokio::test]
    async fn settings_apply_to_the_next_call() {
        let mut owm = owm(FakeTransport::answering("{}"));

        owm.current_weather_by_city_code(1).await.unwrap();
        owm.set_units(Units::Imperial);
        owm.set_language(Language::German);
        owm.set_api_key("other");
        owm.current_weather_by_city_code(1).await.unwrap();

        assert_eq!(
            owm.transport.urls(),
            vec![
                format!("{BASE}/weather?id=1&mode=json&units=metric&lang=en&appId=appId"),
                format!("{BASE}/weather?id=1&mode=json&units=imperial&lang=de&appId=other"),
            ]
        );
        assert_eq!(owm.api_key(), "other");
    }

    #[tokio::test]
    async fn proxy_settings_reach_the_transport() {
        let mut owm = owm(FakeTransport::answering("{}"));

        owm.current_weather_by_city_code(1).await.unwrap();
        owm.set_proxy_with_credentials("proxy.local", 3128, "me", "secret");
        owm.current_weather_by_city_code(1).await.unwrap();
        owm.set_proxy("", 3128);
        owm.current_weather_by_city_code(1).await.unwrap();
        owm.set_proxy("proxy.local", 8080);
        owm.clear_proxy();
        owm.current_weather_by_city_code(1).await.unwrap();

        assert_eq!(
            owm.transport.proxies(),
            vec![
                None,
                Some(ProxyConfig::with_credentials("proxy.local", 3128, "me", "secret")),
                None,
                None,
            ]
        );
    }

    #[test]
    fn raw_response_helpers() {
        let owm = owm(FakeTransport::answering("{}"));

        let cw = owm.current_weather_from_raw_response(None).unwrap();
        assert!(!cw.is_valid());

        let hf = owm.hourly_forecast_from_raw_response(Some(r#"{"cnt": 0, "list": []}"#)).unwrap();
        assert!(hf.is_valid());
        assert_eq!(hf.reported_count(), Some(0));

        let err = owm.daily_forecast_from_raw_response(Some("not json")).unwrap_err();
        assert_eq!(err.kind(), RequestKind::DailyForecast);
    }

    #[tokio::test]
    async fn usable_as_a_trait_object() {
        let provider: Box<dyn WeatherProvider> = Box::new(owm(FakeTransport::answering("{}")));

        let df = provider.daily_forecast_by_city_name("Berlin", 2).await.unwrap();
        assert!(df.is_valid());
        assert_eq!(df.forecast_count(), 0);
    }
}
