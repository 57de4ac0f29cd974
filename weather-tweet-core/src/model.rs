/// Most recent rainfall observation for one coordinate pair.
#[derive(Debug, Clone, PartialEq)]
pub struct RainfallInfo {
    /// Label of the entry, e.g. "observation" or "forecast".
    pub observation_type: String,
    pub millimeters: f64,
}

/// Current weather for one coordinate pair.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherInfo {
    pub temperature_kelvin: f64,
    pub humidity_percent: u8,
    /// Condition ids in upstream order, as decimal strings ("800").
    pub condition_codes: Vec<String>,
}

impl WeatherInfo {
    /// The condition that is reported. Later entries win over earlier ones.
    pub fn primary_condition(&self) -> Option<&str> {
        self.condition_codes.last().map(String::as_str)
    }
}
