use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, header};

use crate::{
    config::TwitterConfig,
    error::{Error, Result},
    oauth::{self, SigningContext},
    provider::truncate_body,
};

use super::Publisher;

const SERVICE: &str = "Twitter";

/// Posts a status update with an OAuth 1.0a signed request.
#[derive(Debug, Clone)]
pub struct TwitterPublisher {
    config: TwitterConfig,
    http: Client,
}

impl TwitterPublisher {
    pub fn new(config: TwitterConfig, http: Client) -> Self {
        Self { config, http }
    }

    /// Send `status` signed with the given timestamp and nonce.
    pub async fn post_signed(&self, status: &str, timestamp: i64, nonce: &str) -> Result<String> {
        let method = self.config.method()?;
        let url = self.config.base_url();
        let params = [("status", status)];

        let authorization = oauth::authorization_header(
            &self.config.credentials,
            SigningContext {
                method: method.as_str(),
                base_url: &url,
                timestamp,
                nonce,
            },
            &params,
        );

        tracing::debug!(%url, chars = status.chars().count(), "Posting status");

        let res = self
            .http
            .request(method, &url)
            .query(&params)
            .header(header::AUTHORIZATION, authorization)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .send()
            .await
            .map_err(|source| Error::transport(SERVICE, source))?;

        let status_code = res.status();
        let body = res.text().await.map_err(|source| Error::transport(SERVICE, source))?;

        if !status_code.is_success() {
            tracing::warn!(status = %status_code, body = %truncate_body(&body), "Posting API answered with an error status");
        }

        Ok(body)
    }
}

#[async_trait]
impl Publisher for TwitterPublisher {
    async fn publish(&self, status: &str) -> Result<String> {
        self.post_signed(status, Utc::now().timestamp(), &oauth::nonce()).await
    }
}
