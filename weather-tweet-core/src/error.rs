//! Error types shared by every stage of the pipeline.
//!
//! Variants are grouped into four [`ErrorKind`]s. The kind is what callers
//! report; the variant and its source chain carry the detail.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Coarse classification surfaced to whoever triggered an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    ConfigLoad,
    Network,
    Extraction,
    Unexpected,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read config file: {}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),

    #[error("Failed to send request to {service}")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} request failed with status {status}: {body}")]
    Status {
        service: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("Failed to parse {service} response")]
    InvalidResponse {
        service: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Weather response contained no conditions")]
    MissingCondition,
}

impl Error {
    /// Wrap a transport failure without its request URL; the query string
    /// holds API keys and the posted status text.
    pub fn transport(service: &'static str, source: reqwest::Error) -> Self {
        Error::Transport { service, source: source.without_url() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ConfigRead { .. } | Error::ConfigParse { .. } | Error::ConfigInvalid(_) => {
                ErrorKind::ConfigLoad
            }
            Error::Transport { .. } | Error::Status { .. } => ErrorKind::Network,
            Error::Extraction(_) => ErrorKind::Extraction,
            Error::InvalidResponse { .. } | Error::MissingCondition => ErrorKind::Unexpected,
        }
    }

    /// Message including every `source` in the chain, outermost first.
    pub fn detailed_message(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            message.push_str(": ");
            message.push_str(&err.to_string());
            source = err.source();
        }
        message
    }
}

/// Structural problems in the rainfall XML feed.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Rainfall response is not well-formed XML")]
    Malformed(#[source] roxmltree::Error),

    #[error("Rainfall response is missing element `{path}`")]
    MissingElement { path: String },

    #[error("Rainfall response contained no observations")]
    EmptyObservations,

    #[error("Rainfall value `{value}` is not a number")]
    InvalidRainfall { value: String },

    #[error("Rainfall API returned an error: {message}")]
    Upstream { message: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
