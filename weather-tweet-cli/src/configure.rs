use std::path::Path;

use anyhow::Context;
use inquire::{Confirm, CustomType, Password, PasswordDisplayMode, Text};
use weather_tweet_core::{
    CityConfig, Config, Credentials, RainfallConfig, TwitterConfig, WeatherConfig,
    config::HttpConfig,
};

const YAHOO_ENDPOINT: &str = "https://map.yahooapis.jp/weather/V1/place";
const OPENWEATHER_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";

fn secret(message: &str) -> anyhow::Result<String> {
    Ok(Password::new(message)
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .prompt()?)
}

fn city() -> anyhow::Result<Option<(String, CityConfig)>> {
    let key = Text::new("City key (empty to finish):").prompt()?;
    let key = key.trim();
    if key.is_empty() {
        return Ok(None);
    }

    let name = Text::new("Display name:").with_default(key).prompt()?;
    let longitude = CustomType::<f64>::new("Longitude:")
        .with_error_message("Please enter a decimal number")
        .prompt()?;
    let latitude = CustomType::<f64>::new("Latitude:")
        .with_error_message("Please enter a decimal number")
        .prompt()?;

    Ok(Some((key.to_string(), CityConfig { name, longitude, latitude })))
}

/// Prompt for every setting and write the config to `path`.
pub fn run(path: &Path) -> anyhow::Result<()> {
    if path.exists() {
        let overwrite = Confirm::new(&format!("{} exists. Overwrite?", path.display()))
            .with_default(false)
            .prompt()?;
        if !overwrite {
            return Ok(());
        }
    }

    let rainfall = RainfallConfig {
        endpoint: Text::new("Yahoo! rainfall endpoint:").with_default(YAHOO_ENDPOINT).prompt()?,
        app_id: secret("Yahoo! application id:")?,
    };

    let weather = WeatherConfig {
        endpoint: Text::new("OpenWeatherMap endpoint:")
            .with_default(OPENWEATHER_ENDPOINT)
            .prompt()?,
        api_key: secret("OpenWeatherMap API key:")?,
    };

    let twitter = TwitterConfig {
        scheme: Text::new("Twitter scheme:").with_default("https").prompt()?,
        host: Text::new("Twitter host:").with_default("api.twitter.com").prompt()?,
        endpoint: Text::new("Twitter endpoint:").with_default("/1.1/statuses/update.json").prompt()?,
        protocol: Text::new("Request method:").with_default("POST").prompt()?,
        credentials: Credentials {
            consumer_key: secret("Consumer key:")?,
            consumer_secret: secret("Consumer secret:")?,
            access_token: secret("Access token:")?,
            access_token_secret: secret("Access token secret:")?,
        },
    };

    let mut cities = Vec::new();
    while let Some(entry) = city()? {
        cities.push(entry);
    }

    let config = Config {
        rainfall,
        weather,
        twitter,
        http: HttpConfig::default(),
        cities: cities.into_iter().collect(),
    };

    config.save(path)?;
    Config::load(path).with_context(|| format!("Saved config at {} does not load", path.display()))?;

    println!("Configuration saved to {}", path.display());
    Ok(())
}
