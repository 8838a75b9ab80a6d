//! Human-readable rendering of decoded reports.
//!
//! Each report group renders itself through `Display`; [`render`] assembles
//! them into an ordered field-name → text mapping.

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::model::{
    CloudBase, Coded, Modifier, Pressure, PressureUnit, RangeModifier, Report, ReportKind, Rvr,
    Sky, Temperature, Visibility, Weather, Wind, WindDirection,
};

/// Rendered report: string keys and values in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedReport {
    fields: Vec<(String, String)>,
}

impl RenderedReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field. An existing key keeps its position and takes the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Station identifier, used as the cache key
    pub fn station(&self) -> Option<&str> {
        self.get("station")
    }
}

impl Serialize for RenderedReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

fn range_prefix(modifier: Option<RangeModifier>) -> &'static str {
    match modifier {
        Some(RangeModifier::LessThan) => "less than ",
        Some(RangeModifier::MoreThan) => "more than ",
        None => "",
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportKind::Routine => write!(f, "regularly reported observation"),
            ReportKind::Special => write!(f, "special observation"),
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modifier::Automatic => write!(f, "automatic report"),
            Modifier::ManuallyCorrected => write!(f, "manually corrected report"),
        }
    }
}

impl fmt::Display for Wind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_calm() {
            return write!(f, "Calm");
        }
        match self.direction {
            WindDirection::Degrees(degrees) => write!(f, "from {} degree", degrees)?,
            WindDirection::Variable => write!(f, "variable")?,
        }
        if let Some(variation) = self.variation {
            write!(f, " to {}-{} degree", variation.min, variation.max)?;
        }
        write!(f, " at {} knots", self.speed)?;
        if let Some(gust) = self.gust {
            write!(f, ", gusting to {} knots", gust)?;
        }
        Ok(())
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_max_range() {
            return write!(f, "10 or more km");
        }
        write!(
            f,
            "{}{} {}",
            range_prefix(self.modifier),
            self.value,
            self.unit.abbreviation()
        )?;
        if let Some(lowest) = &self.lowest {
            write!(
                f,
                ", {} {} in {}",
                lowest.value,
                lowest.unit.abbreviation(),
                lowest.direction
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for Rvr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "On runway {}", self.runway)?;
        if let Some(direction) = self.approach_direction {
            write!(f, "{}", direction.code())?;
        }
        write!(
            f,
            " {}{} feet",
            range_prefix(self.min.modifier),
            self.min.feet
        )?;
        if let Some(max) = self.max {
            write!(f, " and {}{} feet", range_prefix(max.modifier), max.feet)?;
        }
        Ok(())
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = [
            self.intensity.map(Coded::label),
            self.descriptor.map(Coded::label),
            self.phenomenon.map(Coded::label),
        ];
        let text = parts.iter().flatten().copied().collect::<Vec<_>>().join(" ");
        f.write_str(&text)
    }
}

impl fmt::Display for Sky {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cover.label())?;
        if self.cover.is_clear() {
            return Ok(());
        }
        match self.base {
            Some(CloudBase::BelowStation) => write!(f, " below station level")?,
            Some(CloudBase::Hundreds(hundreds)) => write!(f, " at {} feet", hundreds * 100)?,
            None => {}
        }
        if let Some(cloud_type) = self.cloud_type {
            write!(f, " with {}", cloud_type.label())?;
        }
        Ok(())
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} degree celsius", self.celsius)
    }
}

impl fmt::Display for Pressure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            PressureUnit::InchesOfMercury => write!(f, "{:.2} inches Hg", self.value),
            PressureUnit::Hectopascals => write!(f, "{} hPa", self.value),
        }
    }
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Render a decoded report. Never modifies the report.
pub fn render(report: &Report) -> RenderedReport {
    let mut out = RenderedReport::new();

    out.insert("type", report.kind.to_string());
    out.insert("station", report.station_id.as_str());
    out.insert(
        "time",
        report
            .observed_at
            .format("%a, %d %b %Y %H:%M:%S GMT")
            .to_string(),
    );
    if let Some(modifier) = report.modifier {
        out.insert("mod", modifier.to_string());
    }
    if let Some(wind) = &report.wind {
        out.insert("wind", wind.to_string());
    }

    // explicit groups below replace these values
    if report.ceiling_and_visibility_ok {
        out.insert("visibility", "10 or more km");
        out.insert("sky", "no cloud below 5000 feet");
        out.insert("weather", "no significant weather phenomena");
    }

    if let Some(visibility) = &report.visibility {
        out.insert("visibility", visibility.to_string());
    }
    if !report.runway_visual_ranges.is_empty() {
        out.insert("rvr", join(&report.runway_visual_ranges));
    }
    if !report.present_weather.is_empty() {
        out.insert("weather", join(&report.present_weather));
    }
    if !report.sky_conditions.is_empty() {
        out.insert("sky", join(&report.sky_conditions));
    }
    if let Some(temperature) = report.temperature {
        out.insert("temp", temperature.to_string());
    }
    if let Some(dew_point) = report.dew_point {
        out.insert("dew", dew_point.to_string());
    }
    if let Some(pressure) = report.pressure {
        out.insert("pressure", pressure.to_string());
    }
    if report.quality_flag {
        out.insert("qcFlag", "Some data may be inaccurate!");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::decode_report;
    use crate::model::{
        ApproachDirection, CloudType, DirectionalVisibility, DistanceUnit, Intensity, Phenomenon,
        RvrReading, SkyCover, SpeedUnit, WindVariation,
    };
    use pretty_assertions::assert_eq;

    fn wind(direction: WindDirection, speed: u16) -> Wind {
        Wind {
            direction,
            speed,
            gust: None,
            variation: None,
            unit: SpeedUnit::Knots,
        }
    }

    #[test]
    fn test_render_routine_report() {
        let report = decode_report(
            "METAR KJFK 151951Z 18010KT 10SM FEW250 24/18 A3000",
            Some("2024/01/15 19:51"),
        )
        .unwrap();
        let rendered = render(&report);

        let expected = vec![
            ("type", "regularly reported observation"),
            ("station", "KJFK"),
            ("time", "Mon, 15 Jan 2024 19:51:00 GMT"),
            ("wind", "from 180 degree at 10 knots"),
            ("visibility", "10 sm"),
            ("sky", "Few clouds at 25000 feet"),
            ("temp", "24 degree celsius"),
            ("dew", "18 degree celsius"),
            ("pressure", "30.00 inches Hg"),
        ];
        assert_eq!(rendered.iter().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_render_special_report() {
        let report = decode_report(
            "SPECI EGLL 151950Z 24015G25KT 9999 -RA BKN008 17/15 Q1009",
            Some("2024/01/15 19:50"),
        )
        .unwrap();
        let rendered = render(&report);

        assert_eq!(rendered.get("type"), Some("special observation"));
        assert_eq!(
            rendered.get("wind"),
            Some("from 240 degree at 15 knots, gusting to 25 knots")
        );
        assert_eq!(rendered.get("visibility"), Some("10 or more km"));
        assert_eq!(rendered.get("weather"), Some("Light Rain"));
        assert_eq!(rendered.get("sky"), Some("Broken clouds at 800 feet"));
        assert_eq!(rendered.get("pressure"), Some("1009 hPa"));
    }

    #[test]
    fn test_groups_follow_decode_order() {
        let report = decode_report(
            "KORD 151951Z 21012KT 1/2SM R28L/1800FT +TSRA BKN008CB 22/21 A2992",
            Some("2024/01/15 19:51"),
        )
        .unwrap();
        let rendered = render(&report);

        assert_eq!(
            rendered.keys().collect::<Vec<_>>(),
            vec![
                "type",
                "station",
                "time",
                "wind",
                "visibility",
                "rvr",
                "weather",
                "sky",
                "temp",
                "dew",
                "pressure"
            ]
        );
        assert_eq!(rendered.get("rvr"), Some("On runway 28L 1800 feet"));
    }

    #[test]
    fn test_cavok_defaults_keep_position() {
        let report = decode_report(
            "METAR LFPG 151930Z 22005KT CAVOK 12/08 Q1020",
            Some("2024/01/15 19:30"),
        )
        .unwrap();
        let rendered = render(&report);

        assert_eq!(
            rendered.keys().collect::<Vec<_>>(),
            vec![
                "type",
                "station",
                "time",
                "wind",
                "visibility",
                "sky",
                "weather",
                "temp",
                "dew",
                "pressure"
            ]
        );
        assert_eq!(rendered.get("sky"), Some("no cloud below 5000 feet"));
        assert_eq!(
            rendered.get("weather"),
            Some("no significant weather phenomena")
        );
    }

    #[test]
    fn test_wind_rendering() {
        assert_eq!(wind(WindDirection::Degrees(0), 0).to_string(), "Calm");
        assert_eq!(
            wind(WindDirection::Variable, 3).to_string(),
            "variable at 3 knots"
        );

        let varying = Wind {
            variation: Some(WindVariation { min: 210, max: 270 }),
            ..wind(WindDirection::Degrees(240), 15)
        };
        assert_eq!(
            varying.to_string(),
            "from 240 degree to 210-270 degree at 15 knots"
        );
    }

    #[test]
    fn test_visibility_rendering() {
        let vis = Visibility {
            value: 0.25,
            unit: DistanceUnit::StatuteMiles,
            modifier: Some(RangeModifier::LessThan),
            lowest: None,
        };
        assert_eq!(vis.to_string(), "less than 0.25 sm");

        let vis = Visibility {
            value: 4000.0,
            unit: DistanceUnit::Meters,
            modifier: None,
            lowest: Some(DirectionalVisibility {
                value: 1200,
                direction: "NE".to_string(),
                unit: DistanceUnit::Meters,
            }),
        };
        assert_eq!(vis.to_string(), "4000 m, 1200 m in NE");
    }

    #[test]
    fn test_rvr_rendering() {
        let rvr = Rvr {
            runway: 4,
            approach_direction: Some(ApproachDirection::Left),
            min: RvrReading {
                feet: 2000,
                modifier: Some(RangeModifier::LessThan),
            },
            max: Some(RvrReading {
                feet: 6000,
                modifier: Some(RangeModifier::MoreThan),
            }),
        };
        assert_eq!(
            rvr.to_string(),
            "On runway 4L less than 2000 feet and more than 6000 feet"
        );
    }

    #[test]
    fn test_sky_rendering() {
        let clear = Sky {
            cover: SkyCover::Clear,
            base: None,
            cloud_type: None,
        };
        assert_eq!(clear.to_string(), "Clear");

        let storm = Sky {
            cover: SkyCover::Overcast,
            base: Some(CloudBase::BelowStation),
            cloud_type: Some(CloudType::Cumulonimbus),
        };
        assert_eq!(
            storm.to_string(),
            "Overcast clouds below station level with Cumulonimbus"
        );
    }

    #[test]
    fn test_surface_layer_keeps_zero_height() {
        let fog_bank = Sky {
            cover: SkyCover::Overcast,
            base: Some(CloudBase::Hundreds(0)),
            cloud_type: None,
        };
        assert_eq!(fog_bank.to_string(), "Overcast clouds at 0 feet");
    }

    #[test]
    fn test_minus_zero_temperature_renders_as_zero() {
        let report = decode_report(
            "METAR EFHK 151950Z 18005KT 9999 OVC000 M00/M02 Q1012",
            Some("2024/01/15 19:50"),
        )
        .unwrap();
        let rendered = render(&report);
        assert_eq!(rendered.get("sky"), Some("Overcast clouds at 0 feet"));
        assert_eq!(rendered.get("temp"), Some("0 degree celsius"));
        assert_eq!(rendered.get("dew"), Some("-2 degree celsius"));
    }

    #[test]
    fn test_weather_rendering_without_intensity() {
        let weather = Weather {
            intensity: None,
            descriptor: None,
            phenomenon: Some(Phenomenon::Mist),
        };
        assert_eq!(weather.to_string(), "Mist");

        let weather = Weather {
            intensity: Some(Intensity::Heavy),
            descriptor: Some(crate::model::Descriptor::Thunderstorm),
            phenomenon: Some(Phenomenon::Rain),
        };
        assert_eq!(weather.to_string(), "Heavy Thunderstorm Rain");
    }

    #[test]
    fn test_negative_temperature_and_qc_flag() {
        let report = decode_report(
            "METAR CYUL 151900Z 27010KT 15SM FEW030 M12/M18 A3021 $",
            Some("2024/01/15 19:00"),
        )
        .unwrap();
        let rendered = render(&report);
        assert_eq!(rendered.get("temp"), Some("-12 degree celsius"));
        assert_eq!(rendered.get("qcFlag"), Some("Some data may be inaccurate!"));
    }

    #[test]
    fn test_serializes_in_order() {
        let mut rendered = RenderedReport::new();
        rendered.insert("type", "special observation");
        rendered.insert("station", "EGLL");
        rendered.insert("type", "regularly reported observation");
        let json = serde_json::to_string(&rendered).unwrap();
        assert_eq!(
            json,
            r#"{"type":"regularly reported observation","station":"EGLL"}"#
        );
    }
}
