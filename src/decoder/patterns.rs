//! Token shapes for every report group, compiled once.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::vocabulary::alternation;
use crate::model::{CloudType, Descriptor, Intensity, Phenomenon, SkyCover};

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid token pattern {}: {}", pattern, e))
}

pub static STATION: Lazy<Regex> = Lazy::new(|| compile(r"^[A-Za-z0-9]{4}$"));

pub static DATE_TIME: Lazy<Regex> = Lazy::new(|| compile(r"^(\d{2})(\d{2})(\d{2})Z$"));

pub static MODIFIER: Lazy<Regex> = Lazy::new(|| compile(r"^(AUTO|COR)$"));

pub static WIND: Lazy<Regex> =
    Lazy::new(|| compile(r"^(\d{3}|VRB)(\d{2,3})(?:G(\d{2,3}))?KT$"));

pub static WIND_VARIATION: Lazy<Regex> = Lazy::new(|| compile(r"^(\d{3})V(\d{3})$"));

/// Wind sensor data missing (`/////KT`)
pub static WIND_MISSING: Lazy<Regex> = Lazy::new(|| compile(r"^/+(?:KT)?$"));

pub static VISIBILITY: Lazy<Regex> =
    Lazy::new(|| compile(r"^(M|P)?(\d{4}|////)(NDV|SM|KM|M)?$"));

pub static VISIBILITY_LOWEST: Lazy<Regex> = Lazy::new(|| compile(r"^(\d{4})([A-Z]{2})$"));

/// Whole part of a split fractional visibility (`M1` followed by `1/2SM`)
pub static VISIBILITY_WHOLE: Lazy<Regex> = Lazy::new(|| compile(r"^(M|P)(\d+)$"));

pub static VISIBILITY_FRACTION: Lazy<Regex> =
    Lazy::new(|| compile(r"^(\d+)/(\d+)(SM|KM|M)$"));

/// Single-token fraction or whole number with an explicit unit (`1/4SM`, `10SM`)
pub static VISIBILITY_UNIT: Lazy<Regex> =
    Lazy::new(|| compile(r"^(M|P)?(\d+)?(?:/(\d+))?(SM|KM|M)$"));

pub static RVR: Lazy<Regex> = Lazy::new(|| {
    compile(r"^R(\d{2})([LCR])?/([MP])?(\d{4})(?:V([MP])?(\d{4}))?FT$")
});

pub static WEATHER: Lazy<Regex> = Lazy::new(|| {
    compile(&format!(
        "^({})?({})?({})?$",
        alternation::<Intensity>(),
        alternation::<Descriptor>(),
        alternation::<Phenomenon>()
    ))
});

pub static SKY: Lazy<Regex> = Lazy::new(|| {
    compile(&format!(
        r"^({})(\d{{3}}|///)?({})?$",
        alternation::<SkyCover>(),
        alternation::<CloudType>()
    ))
});

pub static TEMPERATURE: Lazy<Regex> = Lazy::new(|| compile(r"^(M)?(\d{2})/(?:(M)?(\d{2}))?$"));

pub static PRESSURE: Lazy<Regex> = Lazy::new(|| compile(r"^([AQ])(\d{4})$"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_patterns_compile() {
        for re in [
            &STATION,
            &DATE_TIME,
            &MODIFIER,
            &WIND,
            &WIND_VARIATION,
            &WIND_MISSING,
            &VISIBILITY,
            &VISIBILITY_LOWEST,
            &VISIBILITY_WHOLE,
            &VISIBILITY_FRACTION,
            &VISIBILITY_UNIT,
            &RVR,
            &WEATHER,
            &SKY,
            &TEMPERATURE,
            &PRESSURE,
        ] {
            assert!(!re.as_str().is_empty());
        }
    }

    #[test]
    fn test_sky_accepts_towering_cumulus() {
        let caps = SKY.captures("BKN030TCU").unwrap();
        assert_eq!(&caps[1], "BKN");
        assert_eq!(&caps[2], "030");
        assert_eq!(&caps[3], "TCU");
        assert!(SKY.is_match("OVC///"));
        assert!(SKY.is_match("CLR"));
        assert!(!SKY.is_match("BKN30"));
    }

    #[test]
    fn test_weather_shapes() {
        let caps = WEATHER.captures("+TSRA").unwrap();
        assert_eq!(caps.get(1).map(|m| m.as_str()), Some("+"));
        assert_eq!(caps.get(2).map(|m| m.as_str()), Some("TS"));
        assert_eq!(caps.get(3).map(|m| m.as_str()), Some("RA"));
        assert!(WEATHER.is_match("VCSH"));
        assert!(!WEATHER.is_match("RMK"));
    }

    #[test]
    fn test_temperature_without_dew_point() {
        let caps = TEMPERATURE.captures("M05/").unwrap();
        assert!(caps.get(1).is_some());
        assert!(caps.get(4).is_none());
    }
}
