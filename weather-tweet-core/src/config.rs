use anyhow::{Context, anyhow};
use directories::ProjectDirs;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::error::{Error, Result};

/// Request timeout applied to every outbound call unless overridden.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Rainfall observation API (Yahoo! Open Local Platform).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RainfallConfig {
    pub endpoint: String,
    pub app_id: String,
}

/// Current weather API (OpenWeatherMap).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    pub endpoint: String,
    pub api_key: String,
}

/// OAuth 1.0a user credentials for the posting API.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &"<redacted>")
            .field("consumer_secret", &"<redacted>")
            .field("access_token", &"<redacted>")
            .field("access_token_secret", &"<redacted>")
            .finish()
    }
}

/// Posting API location plus credentials.
///
/// Example TOML:
/// [twitter]
/// scheme = "https"
/// host = "api.twitter.com"
/// endpoint = "/1.1/statuses/update.json"
/// protocol = "POST"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwitterConfig {
    pub scheme: String,
    pub host: String,
    pub endpoint: String,
    /// HTTP method of the signed request; it is folded into the signature base string.
    pub protocol: String,
    #[serde(flatten)]
    pub credentials: Credentials,
}

impl TwitterConfig {
    /// `<scheme>://<host><endpoint>`, the URL that gets signed and posted to.
    pub fn base_url(&self) -> String {
        format!("{}://{}{}", self.scheme, self.host, self.endpoint)
    }

    /// `protocol` as an HTTP method.
    pub fn method(&self) -> Result<reqwest::Method> {
        reqwest::Method::from_bytes(self.protocol.as_bytes()).map_err(|_| {
            Error::ConfigInvalid(format!("twitter.protocol `{}` is not an HTTP method", self.protocol))
        })
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_ms: DEFAULT_TIMEOUT_MS }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityConfig {
    /// Display name used in the posted line.
    pub name: String,
    pub longitude: f64,
    pub latitude: f64,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub rainfall: RainfallConfig,
    pub weather: WeatherConfig,
    pub twitter: TwitterConfig,

    #[serde(default)]
    pub http: HttpConfig,

    /// Example TOML:
    /// [cities.tokyo]
    /// name = "東京"
    /// longitude = 139.691711
    /// latitude = 35.689487
    ///
    /// Lines are posted in declaration order.
    pub cities: IndexMap<String, CityConfig>,
}

impl Config {
    /// Load and validate config from `path`. A missing file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let cfg = Self::parse(&contents, path)?;

        tracing::debug!(path = %path.display(), cities = cfg.cities.len(), "Loaded configuration");
        Ok(cfg)
    }

    /// Parse and validate a TOML document that did not come from a file.
    pub fn from_toml(contents: &str) -> Result<Self> {
        Self::parse(contents, Path::new("<inline>"))
    }

    fn parse(contents: &str, path: &Path) -> Result<Self> {
        let cfg: Config = toml::from_str(contents).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<()> {
        self.twitter.method()?;

        for (key, city) in &self.cities {
            if !(-180.0..=180.0).contains(&city.longitude) {
                return Err(Error::ConfigInvalid(format!(
                    "cities.{key}.longitude {} is outside -180..=180",
                    city.longitude
                )));
            }
            if !(-90.0..=90.0).contains(&city.latitude) {
                return Err(Error::ConfigInvalid(format!(
                    "cities.{key}.latitude {} is outside -90..=90",
                    city.latitude
                )));
            }
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.http.timeout_ms)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Default path to the config file.
    pub fn config_file_path() -> anyhow::Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-tweet", "weather-tweet")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const SAMPLE: &str = r#"
[rainfall]
endpoint = "https://map.yahooapis.jp/weather/V1/place"
app_id = "YAHOO_APP"

[weather]
endpoint = "https://api.openweathermap.org/data/2.5/weather"
api_key = "OWM_KEY"

[twitter]
scheme = "https"
host = "api.twitter.com"
endpoint = "/1.1/statuses/update.json"
protocol = "POST"
consumer_key = "ck"
consumer_secret = "cs"
access_token = "at"
access_token_secret = "ats"

[cities.sapporo]
name = "札幌"
longitude = 141.35
latitude = 43.06

[cities.tokyo]
name = "東京"
longitude = 139.69
latitude = 35.68

[cities.naha]
name = "那覇"
longitude = 127.68
latitude = 26.21
"#;

    #[test]
    fn parses_sample_and_keeps_city_order() {
        let cfg = Config::from_toml(SAMPLE).expect("sample config must parse");

        let keys: Vec<&str> = cfg.cities.keys().map(String::as_str).collect();
        assert_eq!(keys, ["sapporo", "tokyo", "naha"]);
        assert_eq!(cfg.cities["tokyo"].name, "東京");
        assert_eq!(cfg.twitter.base_url(), "https://api.twitter.com/1.1/statuses/update.json");
        assert_eq!(cfg.twitter.credentials.access_token_secret, "ats");
        assert_eq!(cfg.timeout(), Duration::from_millis(DEFAULT_TIMEOUT_MS));
    }

    #[test]
    fn missing_required_field_is_config_error() {
        let without_key = SAMPLE.replace("api_key = \"OWM_KEY\"\n", "");
        let err = Config::from_toml(&without_key).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ConfigLoad);
        assert!(err.detailed_message().contains("api_key"));
    }

    #[test]
    fn malformed_document_is_config_error() {
        let err = Config::from_toml("[rainfall\nendpoint =").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigLoad);
    }

    #[test]
    fn out_of_range_latitude_is_rejected() {
        let bad = SAMPLE.replace("latitude = 43.06", "latitude = 143.06");
        let err = Config::from_toml(&bad).unwrap_err();

        assert!(err.to_string().contains("cities.sapporo.latitude"));
    }

    #[test]
    fn invalid_protocol_is_rejected() {
        let bad = SAMPLE.replace("protocol = \"POST\"", "protocol = \"PO ST\"");
        let err = Config::from_toml(&bad).unwrap_err();

        assert!(err.to_string().contains("twitter.protocol"));
    }

    #[test]
    fn method_is_checked_on_direct_construction() {
        let mut twitter = Config::from_toml(SAMPLE).unwrap().twitter;
        assert_eq!(twitter.method().unwrap(), reqwest::Method::POST);

        twitter.protocol = "PO ST".into();
        let err = twitter.method().unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ConfigLoad);
        assert!(err.to_string().contains("`PO ST`"));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let err = Config::load(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigLoad);
        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    fn save_then_load_preserves_cities() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let cfg = Config::from_toml(SAMPLE).unwrap();

        cfg.save(&path).expect("save must succeed");
        let loaded = Config::load(&path).expect("saved config must load");

        assert_eq!(loaded.cities, cfg.cities);
        assert_eq!(loaded.http.timeout_ms, DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn credentials_debug_is_redacted() {
        let cfg = Config::from_toml(SAMPLE).unwrap();
        let debug = format!("{:?}", cfg.twitter);

        assert!(!debug.contains("\"cs\""));
        assert!(!debug.contains("\"ats\""));
        assert!(debug.contains("<redacted>"));
    }
}
