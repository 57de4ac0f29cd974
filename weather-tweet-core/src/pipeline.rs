//! One invocation: load config, fetch per city, compose, post.

use std::path::Path;

use chrono::{Local, NaiveDateTime};
use indexmap::IndexMap;
use serde::Serialize;

use crate::{
    compose::{assemble, compose_line},
    config::{CityConfig, Config},
    error::{Error, ErrorKind, Result},
    provider::{Providers, providers_from_config},
};

/// Ordered cities plus the collaborators that serve them.
#[derive(Debug)]
pub struct Pipeline {
    cities: IndexMap<String, CityConfig>,
    providers: Providers,
}

impl Pipeline {
    pub fn new(cities: IndexMap<String, CityConfig>, providers: Providers) -> Self {
        Self { cities, providers }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(config.cities.clone(), providers_from_config(config)?))
    }

    /// Fetch every city in order and build the status text. Stops at the first failure.
    pub async fn compose(&self, now: NaiveDateTime) -> Result<String> {
        let mut lines = Vec::with_capacity(self.cities.len());

        for (key, city) in &self.cities {
            let rainfall = self.providers.rainfall.get_rainfall(city).await?;
            let weather = self.providers.weather.get_weather(city).await?;
            let line = compose_line(&city.name, &rainfall, &weather)?;

            tracing::info!(
                city = %key,
                rainfall_mm = rainfall.millimeters,
                observation = %rainfall.observation_type,
                "Composed line"
            );
            lines.push(line);
        }

        Ok(assemble(now, lines))
    }

    /// Compose with the current local time and publish. Returns the publisher's raw body.
    pub async fn run(&self) -> Result<String> {
        let message = self.compose(Local::now().naive_local()).await?;
        let body = self.providers.publisher.publish(&message).await?;

        tracing::info!(cities = self.cities.len(), "Status posted");
        Ok(body)
    }
}

/// What the trigger answers: HTTP-style status code and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationResponse {
    pub status: u16,
    pub body: String,
}

#[derive(Debug, Serialize)]
struct ErrorPayload {
    kind: ErrorKind,
    message: String,
}

impl InvocationResponse {
    pub const OK: u16 = 200;
    pub const FAILED: u16 = 500;

    pub fn success(body: String) -> Self {
        Self { status: Self::OK, body }
    }

    pub fn failure(err: &Error) -> Self {
        let payload = ErrorPayload {
            kind: err.kind(),
            message: err.detailed_message(),
        };
        let body = serde_json::to_string(&payload)
            .unwrap_or_else(|_| format!("{{\"kind\":\"unexpected\",\"message\":{:?}}}", payload.message));

        Self { status: Self::FAILED, body }
    }

    pub fn is_success(&self) -> bool {
        self.status == Self::OK
    }
}

/// Load the config at `config_path` and run the pipeline once.
pub async fn run(config_path: &Path) -> Result<String> {
    let config = Config::load(config_path)?;
    Pipeline::from_config(&config)?.run().await
}

/// [`run`], with every error folded into a 500 response.
pub async fn invoke(config_path: &Path) -> InvocationResponse {
    match run(config_path).await {
        Ok(body) => InvocationResponse::success(body),
        Err(err) => {
            tracing::error!(kind = ?err.kind(), error = %err.detailed_message(), "Invocation failed");
            InvocationResponse::failure(&err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_payload_is_json_with_kind() {
        let response = InvocationResponse::failure(&Error::MissingCondition);

        assert_eq!(response.status, 500);
        assert!(!response.is_success());

        let json: serde_json::Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(json["kind"], "unexpected");
        assert_eq!(json["message"], "Weather response contained no conditions");
    }

    #[test]
    fn success_passes_body_through() {
        let response = InvocationResponse::success("{\"id\":1}".into());

        assert!(response.is_success());
        assert_eq!(response.body, "{\"id\":1}");
    }

    #[tokio::test]
    async fn invoke_without_config_fails_with_config_kind() {
        let dir = tempfile::tempdir().unwrap();
        let response = invoke(&dir.path().join("missing.toml")).await;

        assert_eq!(response.status, 500);
        let json: serde_json::Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(json["kind"], "config_load");
    }
}
