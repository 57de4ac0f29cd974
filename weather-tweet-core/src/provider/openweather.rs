use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    config::{CityConfig, WeatherConfig},
    error::{Error, Result},
    model::WeatherInfo,
    provider::success_body,
};

use super::WeatherProvider;

const SERVICE: &str = "OpenWeather";

/// OpenWeatherMap current weather API. Temperatures come back in Kelvin
/// because no `units` parameter is sent.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    config: WeatherConfig,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(config: WeatherConfig, http: Client) -> Self {
        Self { config, http }
    }

    /// Raw JSON for one coordinate pair.
    pub async fn fetch(&self, longitude: f64, latitude: f64) -> Result<String> {
        tracing::debug!(longitude, latitude, "Requesting current weather");

        let res = self
            .http
            .get(&self.config.endpoint)
            .query(&[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("appid", self.config.api_key.clone()),
            ])
            .send()
            .await
            .map_err(|source| Error::transport(SERVICE, source))?;

        success_body(res, SERVICE).await
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    id: u32,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    main: OwMain,
    weather: Vec<OwWeather>,
}

pub fn parse_weather(body: &str) -> Result<WeatherInfo> {
    let parsed: OwCurrentResponse = serde_json::from_str(body)
        .map_err(|source| Error::InvalidResponse { service: SERVICE, source })?;

    Ok(WeatherInfo {
        temperature_kelvin: parsed.main.temp,
        humidity_percent: parsed.main.humidity,
        condition_codes: parsed.weather.iter().map(|w| w.id.to_string()).collect(),
    })
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn get_weather(&self, city: &CityConfig) -> Result<WeatherInfo> {
        let body = self.fetch(city.longitude, city.latitude).await?;
        parse_weather(&body)
    }
}
