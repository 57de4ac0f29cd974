use crate::{
    Config, RainfallInfo, WeatherInfo,
    config::CityConfig,
    error::{Error, Result},
    provider::{openweather::OpenWeatherProvider, twitter::TwitterPublisher, yahoo::YahooRainfallProvider},
};
use async_trait::async_trait;
use reqwest::Client;
use std::{fmt::Debug, time::Duration};

pub mod openweather;
pub mod twitter;
pub mod yahoo;

#[async_trait]
pub trait RainfallProvider: Send + Sync + Debug {
    async fn get_rainfall(&self, city: &CityConfig) -> Result<RainfallInfo>;
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn get_weather(&self, city: &CityConfig) -> Result<WeatherInfo>;
}

/// Sink for the assembled message. Returns the raw response body.
#[async_trait]
pub trait Publisher: Send + Sync + Debug {
    async fn publish(&self, status: &str) -> Result<String>;
}

/// The three collaborators of one invocation.
#[derive(Debug)]
pub struct Providers {
    pub rainfall: Box<dyn RainfallProvider>,
    pub weather: Box<dyn WeatherProvider>,
    pub publisher: Box<dyn Publisher>,
}

/// Construct the Yahoo / OpenWeatherMap / Twitter providers from config.
/// They share one HTTP client so every call gets the same timeout.
pub fn providers_from_config(config: &Config) -> Result<Providers> {
    let http = http_client(config.timeout(), "HTTP client")?;

    Ok(Providers {
        rainfall: Box::new(YahooRainfallProvider::new(config.rainfall.clone(), http.clone())),
        weather: Box::new(OpenWeatherProvider::new(config.weather.clone(), http.clone())),
        publisher: Box::new(TwitterPublisher::new(config.twitter.clone(), http)),
    })
}

pub(crate) fn http_client(timeout: Duration, service: &'static str) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|source| Error::transport(service, source))
}

/// Read the body of a GET response, turning a non-success status into an error.
pub(crate) async fn success_body(res: reqwest::Response, service: &'static str) -> Result<String> {
    let status = res.status();
    let body = res.text().await.map_err(|source| Error::transport(service, source))?;

    if !status.is_success() {
        return Err(Error::Status {
            service,
            status,
            body: truncate_body(&body),
        });
    }

    Ok(body)
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_body_keeps_short_bodies() {
        assert_eq!(truncate_body("short"), "short");
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let body = "雨".repeat(300);
        let truncated = truncate_body(&body);

        assert_eq!(truncated.chars().count(), 203);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn providers_from_config_builds_all_three() {
        let cfg = Config::from_toml(
            r#"
[rainfall]
endpoint = "http://localhost/rain"
app_id = "app"

[weather]
endpoint = "http://localhost/weather"
api_key = "key"

[twitter]
scheme = "http"
host = "localhost"
endpoint = "/update"
protocol = "POST"
consumer_key = "ck"
consumer_secret = "cs"
access_token = "at"
access_token_secret = "ats"

[cities]
"#,
        )
        .unwrap();

        let providers = providers_from_config(&cfg).expect("providers must build");
        let debug = format!("{providers:?}");

        assert!(debug.contains("YahooRainfallProvider"));
        assert!(debug.contains("OpenWeatherProvider"));
        assert!(debug.contains("TwitterPublisher"));
        assert!(!debug.contains("\"ats\""));
    }
}
