//! Weather condition code → display glyph.
//!
//! Codes follow OpenWeatherMap's condition ids, grouped by category.

/// Returned for any code that is not in [`GLYPH_TABLE`].
pub const UNKNOWN_GLYPH: &str = "？";

const THUNDERSTORM: &str = "⛈";
const DRIZZLE: &str = "🌧";
const RAIN: &str = "🌦";
const SHOWER: &str = "☂";
const SNOW: &str = "☃";
const ATMOSPHERE: &str = "🌫";
const CLEAR: &str = "☀";
const CLOUDS: &str = "🌤";

pub const GLYPH_TABLE: [(&str, &str); 55] = [
    ("200", THUNDERSTORM),
    ("201", THUNDERSTORM),
    ("202", THUNDERSTORM),
    ("210", THUNDERSTORM),
    ("211", THUNDERSTORM),
    ("212", THUNDERSTORM),
    ("221", THUNDERSTORM),
    ("230", THUNDERSTORM),
    ("231", THUNDERSTORM),
    ("232", THUNDERSTORM),
    ("300", DRIZZLE),
    ("301", DRIZZLE),
    ("302", DRIZZLE),
    ("310", DRIZZLE),
    ("311", DRIZZLE),
    ("312", DRIZZLE),
    ("313", DRIZZLE),
    ("314", DRIZZLE),
    ("321", DRIZZLE),
    ("500", RAIN),
    ("501", RAIN),
    ("502", RAIN),
    ("503", RAIN),
    ("504", RAIN),
    // freezing rain
    ("511", SNOW),
    ("520", SHOWER),
    ("521", SHOWER),
    ("522", SHOWER),
    ("531", SHOWER),
    ("600", SNOW),
    ("601", SNOW),
    ("602", SNOW),
    ("611", SNOW),
    ("612", SNOW),
    ("613", SNOW),
    ("615", SNOW),
    ("616", SNOW),
    ("620", SNOW),
    ("621", SNOW),
    ("622", SNOW),
    ("701", ATMOSPHERE),
    ("711", ATMOSPHERE),
    ("721", ATMOSPHERE),
    ("731", ATMOSPHERE),
    ("741", ATMOSPHERE),
    ("751", ATMOSPHERE),
    ("761", ATMOSPHERE),
    ("762", ATMOSPHERE),
    ("771", ATMOSPHERE),
    ("781", ATMOSPHERE),
    ("800", CLEAR),
    ("801", CLOUDS),
    ("802", CLOUDS),
    ("803", CLOUDS),
    ("804", CLOUDS),
];

/// Exact lookup of `code` in [`GLYPH_TABLE`].
pub fn glyph_for(code: &str) -> &'static str {
    GLYPH_TABLE
        .iter()
        .find(|(key, _)| *key == code)
        .map(|(_, glyph)| *glyph)
        .unwrap_or(UNKNOWN_GLYPH)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expected(code: u16) -> &'static str {
        match code {
            200..=232 => "⛈",
            300..=321 => "🌧",
            500..=504 => "🌦",
            511 => "☃",
            520..=531 => "☂",
            600..=622 => "☃",
            701..=781 => "🌫",
            800 => "☀",
            801..=804 => "🌤",
            _ => panic!("code {code} is not part of the table"),
        }
    }

    #[test]
    fn every_table_entry_maps_to_its_category_glyph() {
        for (code, _) in GLYPH_TABLE {
            let numeric: u16 = code.parse().expect("table keys are numeric");
            assert_eq!(glyph_for(code), expected(numeric), "code {code}");
        }
    }

    #[test]
    fn table_holds_exactly_the_documented_codes() {
        let codes: Vec<&str> = GLYPH_TABLE.iter().map(|(code, _)| *code).collect();
        assert_eq!(
            codes,
            [
                "200", "201", "202", "210", "211", "212", "221", "230", "231", "232", //
                "300", "301", "302", "310", "311", "312", "313", "314", "321", //
                "500", "501", "502", "503", "504", "511", "520", "521", "522", "531", //
                "600", "601", "602", "611", "612", "613", "615", "616", "620", "621", "622", //
                "701", "711", "721", "731", "741", "751", "761", "762", "771", "781", //
                "800", "801", "802", "803", "804",
            ]
        );
    }

    #[test]
    fn spot_checks() {
        assert_eq!(glyph_for("800"), "☀");
        assert_eq!(glyph_for("511"), "☃");
        assert_eq!(glyph_for("531"), "☂");
        assert_eq!(glyph_for("804"), "🌤");
    }

    #[test]
    fn unknown_codes_fall_back_to_placeholder() {
        for code in ["", "0", "100", "203", "503 ", "805", "900", "abc"] {
            assert_eq!(glyph_for(code), UNKNOWN_GLYPH, "code {code:?}");
        }
    }
}
