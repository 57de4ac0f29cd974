use async_trait::async_trait;
use reqwest::Client;
use roxmltree::{Document, Node};

use crate::{
    config::{CityConfig, RainfallConfig},
    error::{Error, ExtractionError, Result},
    model::RainfallInfo,
    provider::success_body,
};

use super::RainfallProvider;

const SERVICE: &str = "Yahoo rainfall API";

/// Yahoo! Open Local Platform weather API (rainfall observations, XML).
#[derive(Debug, Clone)]
pub struct YahooRainfallProvider {
    config: RainfallConfig,
    http: Client,
}

impl YahooRainfallProvider {
    pub fn new(config: RainfallConfig, http: Client) -> Self {
        Self { config, http }
    }

    /// Raw XML for one coordinate pair.
    pub async fn fetch(&self, longitude: f64, latitude: f64) -> Result<String> {
        let coordinates = format!("{longitude},{latitude}");
        tracing::debug!(%coordinates, "Requesting rainfall");

        let res = self
            .http
            .get(&self.config.endpoint)
            .query(&[
                ("coordinates", coordinates.as_str()),
                ("appid", self.config.app_id.as_str()),
            ])
            .send()
            .await
            .map_err(|source| Error::transport(SERVICE, source))?;

        success_body(res, SERVICE).await
    }
}

#[async_trait]
impl RainfallProvider for YahooRainfallProvider {
    async fn get_rainfall(&self, city: &CityConfig) -> Result<RainfallInfo> {
        let body = self.fetch(city.longitude, city.latitude).await?;
        Ok(extract_rainfall(&body)?)
    }
}

/// Pull the most recent observation out of a YDF document:
/// `YDF/Feature/Property/WeatherList/Weather[0]/{Type,Rainfall}`.
pub fn extract_rainfall(xml: &str) -> Result<RainfallInfo, ExtractionError> {
    let doc = Document::parse(xml).map_err(ExtractionError::Malformed)?;
    let root = doc.root_element();

    match root.tag_name().name() {
        "YDF" => {}
        "Error" => {
            let message = child(root, "Message", "Error")
                .ok()
                .and_then(|node| node.text())
                .unwrap_or_default()
                .trim()
                .to_string();
            return Err(ExtractionError::Upstream { message });
        }
        _ => return Err(missing("YDF")),
    }

    let feature = child(root, "Feature", "YDF")?;
    let property = child(feature, "Property", "YDF/Feature")?;
    let list = child(property, "WeatherList", "YDF/Feature/Property")?;

    let latest = elements(list)
        .find(|node| node.tag_name().name() == "Weather")
        .ok_or(ExtractionError::EmptyObservations)?;

    let path = "YDF/Feature/Property/WeatherList/Weather";
    let observation_type = text(child(latest, "Type", path)?).to_string();
    let raw = text(child(latest, "Rainfall", path)?);
    let millimeters = raw
        .parse::<f64>()
        .map_err(|_| ExtractionError::InvalidRainfall { value: raw.to_string() })?;

    Ok(RainfallInfo { observation_type, millimeters })
}

fn elements<'a, 'input>(node: Node<'a, 'input>) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(Node::is_element)
}

fn child<'a, 'input>(
    parent: Node<'a, 'input>,
    name: &str,
    parent_path: &str,
) -> Result<Node<'a, 'input>, ExtractionError> {
    elements(parent)
        .find(|node| node.tag_name().name() == name)
        .ok_or_else(|| missing(&format!("{parent_path}/{name}")))
}

fn text<'a>(node: Node<'a, '_>) -> &'a str {
    node.text().unwrap_or_default().trim()
}

fn missing(path: &str) -> ExtractionError {
    ExtractionError::MissingElement { path: path.to_string() }
}
