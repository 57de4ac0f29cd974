//! Text of the posted status: one line per city under a timestamp header.

use chrono::NaiveDateTime;

use crate::{
    error::{Error, Result},
    glyph::glyph_for,
    model::{RainfallInfo, WeatherInfo},
};

pub const KELVIN: f64 = 273.15;

pub const LINE_BREAK: &str = "\r\n";

const HEADER_FORMAT: &str = "%Y年%m月%d日 %H:%M:%S 付近の気象情報";

/// Whole degrees Celsius, rounded towards negative infinity.
pub fn celsius_floor(kelvin: f64) -> i64 {
    (kelvin - KELVIN).floor() as i64
}

/// Render one city's line. The rainfall clause only appears when it is raining.
pub fn compose_line(city: &str, rainfall: &RainfallInfo, weather: &WeatherInfo) -> Result<String> {
    let code = weather.primary_condition().ok_or(Error::MissingCondition)?;
    let glyph = glyph_for(code);

    let mut line = format!(
        "{city} => {glyph} 🌡{}° 💧{}% ",
        celsius_floor(weather.temperature_kelvin),
        weather.humidity_percent,
    );
    if rainfall.millimeters > 0.0 {
        line.push_str(&format!("☔{} mm/hour", rainfall.millimeters));
    }
    line.push_str(LINE_BREAK);

    Ok(line)
}

pub fn header(now: NaiveDateTime) -> String {
    format!("{}{LINE_BREAK}", now.format(HEADER_FORMAT))
}

/// Header followed by `lines` in the order given.
pub fn assemble<I>(now: NaiveDateTime, lines: I) -> String
where
    I: IntoIterator<Item = String>,
{
    lines.into_iter().fold(header(now), |mut message, line| {
        message.push_str(&line);
        message
    })
}
