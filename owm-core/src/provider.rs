use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::WeatherNotFoundError,
    model::{CurrentWeather, DailyForecast, HourlyForecast},
};

pub mod openweather;

pub use openweather::OpenWeatherMap;

pub type WeatherResult<T> = Result<T, WeatherNotFoundError>;

/// Current weather, hourly and daily forecasts by every supported way of
/// naming a location.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather_by_city_name(&self, city: &str) -> WeatherResult<CurrentWeather>;

    async fn current_weather_by_city_name_and_country(
        &self,
        city: &str,
        country: &str,
    ) -> WeatherResult<CurrentWeather>;

    async fn current_weather_by_city_code(&self, code: i64) -> WeatherResult<CurrentWeather>;

    async fn current_weather_by_coordinates(
        &self,
        latitude: f32,
        longitude: f32,
    ) -> WeatherResult<CurrentWeather>;

    async fn hourly_forecast_by_city_name(&self, city: &str) -> WeatherResult<HourlyForecast>;

    async fn hourly_forecast_by_city_name_and_country(
        &self,
        city: &str,
        country: &str,
    ) -> WeatherResult<HourlyForecast>;

    async fn hourly_forecast_by_city_code(&self, code: i64) -> WeatherResult<HourlyForecast>;

    async fn hourly_forecast_by_coordinates(
        &self,
        latitude: f32,
        longitude: f32,
    ) -> WeatherResult<HourlyForecast>;

    async fn daily_forecast_by_city_name(&self, city: &str, count: u8) -> WeatherResult<DailyForecast>;

    async fn daily_forecast_by_city_name_and_country(
        &self,
        city: &str,
        country: &str,
        count: u8,
    ) -> WeatherResult<DailyForecast>;

    async fn daily_forecast_by_city_code(&self, code: i64, count: u8) -> WeatherResult<DailyForecast>;

    async fn daily_forecast_by_coordinates(
        &self,
        latitude: f32,
        longitude: f32,
        count: u8,
    ) -> WeatherResult<DailyForecast>;
}
