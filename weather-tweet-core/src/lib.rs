//! Core library for the `weather-tweet` job.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Rainfall (Yahoo! YOLP), weather (OpenWeatherMap) and posting (Twitter) providers
//! - Composition of the posted status text
//! - A single-shot pipeline that ties them together
//!
//! It is used by `weather-tweet-cli`, but can also be embedded in other triggers.

pub mod compose;
pub mod config;
pub mod error;
pub mod glyph;
pub mod model;
pub mod oauth;
pub mod pipeline;
pub mod provider;

pub use config::{CityConfig, Config, Credentials, RainfallConfig, TwitterConfig, WeatherConfig};
pub use error::{Error, ErrorKind, ExtractionError, Result};
pub use model::{RainfallInfo, WeatherInfo};
pub use pipeline::{InvocationResponse, Pipeline, invoke};
pub use provider::{Providers, Publisher, RainfallProvider, WeatherProvider};
