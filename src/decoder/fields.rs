//! Per-group decoders.
//!
//! Each decoder looks at the token under the cursor. Optional groups consume
//! the token only when it matches and otherwise leave the cursor untouched;
//! required groups fail the whole decode.

use std::fmt::Display;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use regex::Captures;
use tracing::debug;

use super::patterns;
use super::time;
use super::tokenizer::TokenCursor;
use crate::error::{MetarError, Result};
use crate::model::{
    ApproachDirection, CloudBase, CloudType, Coded, Descriptor, DirectionalVisibility,
    DistanceUnit, Intensity, Modifier, Phenomenon, Pressure, PressureUnit, RangeModifier,
    ReportKind, Rvr, RvrReading, Sky, SkyCover, SpeedUnit, Temperature, Visibility, Weather,
    Wind, WindDirection, WindVariation,
};

/// Token cursor plus the raw text it was built from
pub struct FieldDecoder<'a> {
    raw: &'a str,
    cursor: TokenCursor<'a>,
}

impl<'a> FieldDecoder<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self {
            raw,
            cursor: TokenCursor::new(raw),
        }
    }

    pub fn cursor(&self) -> &TokenCursor<'a> {
        &self.cursor
    }

    /// Parse a regex-validated digit group
    fn number<T>(&self, digits: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        digits.parse::<T>().map_err(|e| MetarError::Decode {
            raw: self.raw.to_string(),
            message: format!("invalid number {:?}: {}", digits, e),
        })
    }

    fn optional_number<T>(&self, caps: &Captures<'_>, group: usize) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: Display,
    {
        caps.get(group)
            .map(|m| self.number(m.as_str()))
            .transpose()
    }

    /// `METAR` or `SPECI`; anything else is left for the station decoder
    pub fn report_kind(&mut self) -> ReportKind {
        let kind = match self.cursor.current() {
            Some("METAR") => ReportKind::Routine,
            Some("SPECI") => ReportKind::Special,
            _ => return ReportKind::Routine,
        };
        self.cursor.advance();
        debug!(field = "type", kind = ?kind, "Decoded report kind");
        kind
    }

    /// Four-character station identifier (required)
    pub fn station_id(&mut self) -> Result<String> {
        match self.cursor.current() {
            Some(token) if patterns::STATION.is_match(token) => {
                self.cursor.advance();
                debug!(field = "station", station = token, "Decoded station");
                Ok(token.to_string())
            }
            other => Err(MetarError::RequiredField {
                field: "station",
                token: other.unwrap_or("<end of report>").to_string(),
            }),
        }
    }

    /// `DDHHMMZ` observation time (required)
    pub fn observed_at(&mut self, reference: DateTime<Utc>) -> Result<DateTime<Utc>> {
        let token = self.cursor.current().unwrap_or("<end of report>");
        let invalid = || MetarError::RequiredField {
            field: "time",
            token: token.to_string(),
        };

        let caps = patterns::DATE_TIME.captures(token).ok_or_else(invalid)?;
        let day: u32 = self.number(&caps[1])?;
        let hour: u32 = self.number(&caps[2])?;
        let minute: u32 = self.number(&caps[3])?;
        if !(1..=31).contains(&day) || hour > 23 || minute > 59 {
            return Err(invalid());
        }

        let observed_at = time::resolve(reference, day, hour, minute).ok_or_else(invalid)?;
        self.cursor.advance();
        debug!(field = "time", observed_at = %observed_at, "Decoded observation time");
        Ok(observed_at)
    }

    pub fn modifier(&mut self) -> Option<Modifier> {
        let modifier = match self.cursor.current()? {
            token if patterns::MODIFIER.is_match(token) => {
                if token == "AUTO" {
                    Modifier::Automatic
                } else {
                    Modifier::ManuallyCorrected
                }
            }
            _ => return None,
        };
        self.cursor.advance();
        Some(modifier)
    }

    /// Wind group with an optional variation group after it.
    ///
    /// A run of slashes means the sensor reported nothing: the token is
    /// consumed and no wind is recorded.
    pub fn wind(&mut self) -> Result<Option<Wind>> {
        let Some(token) = self.cursor.current() else {
            return Ok(None);
        };

        if patterns::WIND_MISSING.is_match(token) {
            self.cursor.advance();
            debug!(field = "wind", token, "Wind not recorded");
            return Ok(None);
        }

        let Some(caps) = patterns::WIND.captures(token) else {
            return Ok(None);
        };

        let direction = match &caps[1] {
            "VRB" => WindDirection::Variable,
            degrees => WindDirection::Degrees(self.number(degrees)?),
        };
        let mut wind = Wind {
            direction,
            speed: self.number(&caps[2])?,
            gust: self.optional_number(&caps, 3)?,
            variation: None,
            unit: SpeedUnit::Knots,
        };
        self.cursor.advance();

        if let Some(caps) = self
            .cursor
            .current()
            .and_then(|next| patterns::WIND_VARIATION.captures(next))
        {
            wind.variation = Some(WindVariation {
                min: self.number(&caps[1])?,
                max: self.number(&caps[2])?,
            });
            self.cursor.advance();
        }

        debug!(field = "wind", wind = ?wind, "Decoded wind");
        Ok(Some(wind))
    }

    pub fn cavok(&mut self) -> bool {
        if self.cursor.current() == Some("CAVOK") {
            self.cursor.advance();
            true
        } else {
            false
        }
    }

    /// Visibility, trying the four-digit form, then the split fraction, then
    /// the single-token form with a unit. First match wins.
    pub fn visibility(&mut self) -> Result<Option<Visibility>> {
        let Some(token) = self.cursor.current() else {
            return Ok(None);
        };

        if let Some(caps) = patterns::VISIBILITY.captures(token) {
            return self.standard_visibility(&caps);
        }

        if let Some(caps) = patterns::VISIBILITY_WHOLE.captures(token) {
            return self.split_fraction_visibility(token, &caps);
        }

        if let Some(caps) = patterns::VISIBILITY_UNIT.captures(token) {
            return self.unit_visibility(&caps);
        }

        Ok(None)
    }

    fn standard_visibility(&mut self, caps: &Captures<'_>) -> Result<Option<Visibility>> {
        // `////`: visibility not measured
        if &caps[2] == "////" {
            self.cursor.advance();
            return Ok(None);
        }

        let value: u32 = self.number(&caps[2])?;
        let unit = caps
            .get(3)
            .and_then(|m| DistanceUnit::from_suffix(m.as_str()))
            .unwrap_or(DistanceUnit::Meters);
        let mut visibility = Visibility {
            value: f64::from(value),
            unit,
            modifier: caps.get(1).and_then(|m| RangeModifier::from_code(m.as_str())),
            lowest: None,
        };
        self.cursor.advance();

        if let Some(low) = self
            .cursor
            .current()
            .and_then(|next| patterns::VISIBILITY_LOWEST.captures(next))
        {
            visibility.lowest = Some(DirectionalVisibility {
                value: self.number(&low[1])?,
                direction: low[2].to_string(),
                unit: DistanceUnit::Meters,
            });
            self.cursor.advance();
        }

        debug!(field = "visibility", visibility = ?visibility, "Decoded visibility");
        Ok(Some(visibility))
    }

    fn split_fraction_visibility(
        &mut self,
        token: &str,
        caps: &Captures<'_>,
    ) -> Result<Option<Visibility>> {
        let Some(next) = self.cursor.peek() else {
            return Ok(None);
        };
        let malformed = || MetarError::MalformedVisibility {
            token: token.to_string(),
            next: next.to_string(),
        };

        let fraction = patterns::VISIBILITY_FRACTION
            .captures(next)
            .ok_or_else(malformed)?;
        let whole: u32 = self.number(&caps[2])?;
        let numerator: u32 = self.number(&fraction[1])?;
        let denominator: u32 = self.number(&fraction[2])?;
        if denominator == 0 {
            return Err(malformed());
        }
        let unit = DistanceUnit::from_suffix(&fraction[3]).ok_or_else(malformed)?;

        let visibility = Visibility {
            value: f64::from(whole) + f64::from(numerator) / f64::from(denominator),
            unit,
            modifier: RangeModifier::from_code(&caps[1]),
            lowest: None,
        };
        self.cursor.advance();
        self.cursor.advance();

        debug!(field = "visibility", visibility = ?visibility, "Decoded visibility");
        Ok(Some(visibility))
    }

    /// Single-token form with a unit. A zero denominator is not a match.
    fn unit_visibility(&mut self, caps: &Captures<'_>) -> Result<Option<Visibility>> {
        let whole: Option<u32> = self.optional_number(caps, 2)?;
        let denominator: Option<u32> = self.optional_number(caps, 3)?;

        let value = match (whole, denominator) {
            (Some(_), Some(0)) => return Ok(None),
            (Some(numerator), Some(denominator)) => {
                f64::from(numerator) / f64::from(denominator)
            }
            (Some(whole), None) => f64::from(whole),
            _ => return Ok(None),
        };
        let Some(unit) = DistanceUnit::from_suffix(&caps[4]) else {
            return Ok(None);
        };

        let visibility = Visibility {
            value,
            unit,
            modifier: caps.get(1).and_then(|m| RangeModifier::from_code(m.as_str())),
            lowest: None,
        };
        self.cursor.advance();

        debug!(field = "visibility", visibility = ?visibility, "Decoded visibility");
        Ok(Some(visibility))
    }

    pub fn runway_visual_ranges(&mut self) -> Result<Vec<Rvr>> {
        let mut ranges = Vec::new();

        while let Some(caps) = self
            .cursor
            .current()
            .and_then(|token| patterns::RVR.captures(token))
        {
            let max = match caps.get(6) {
                Some(feet) => Some(RvrReading {
                    feet: self.number(feet.as_str())?,
                    modifier: caps.get(5).and_then(|m| RangeModifier::from_code(m.as_str())),
                }),
                None => None,
            };
            let rvr = Rvr {
                runway: self.number(&caps[1])?,
                approach_direction: caps
                    .get(2)
                    .and_then(|m| ApproachDirection::from_code(m.as_str())),
                min: RvrReading {
                    feet: self.number(&caps[4])?,
                    modifier: caps.get(3).and_then(|m| RangeModifier::from_code(m.as_str())),
                },
                max,
            };
            debug!(field = "rvr", rvr = ?rvr, "Decoded runway visual range");
            ranges.push(rvr);
            self.cursor.advance();
        }

        Ok(ranges)
    }

    pub fn present_weather(&mut self) -> Vec<Weather> {
        let mut weather = Vec::new();

        while let Some(caps) = self
            .cursor
            .current()
            .and_then(|token| patterns::WEATHER.captures(token))
        {
            let descriptor = caps.get(2).and_then(|m| Descriptor::from_code(m.as_str()));
            let phenomenon = caps.get(3).and_then(|m| Phenomenon::from_code(m.as_str()));
            // intensity alone is not a weather group
            if descriptor.is_none() && phenomenon.is_none() {
                break;
            }

            let entry = Weather {
                intensity: caps.get(1).and_then(|m| Intensity::from_code(m.as_str())),
                descriptor,
                phenomenon,
            };
            debug!(field = "weather", weather = ?entry, "Decoded present weather");
            weather.push(entry);
            self.cursor.advance();
        }

        weather
    }

    pub fn sky_conditions(&mut self) -> Result<Vec<Sky>> {
        let mut layers = Vec::new();

        while let Some(caps) = self
            .cursor
            .current()
            .and_then(|token| patterns::SKY.captures(token))
        {
            let Some(cover) = SkyCover::from_code(&caps[1]) else {
                break;
            };
            let base = match caps.get(2).map(|m| m.as_str()) {
                Some("///") => Some(CloudBase::BelowStation),
                Some(height) => Some(CloudBase::Hundreds(self.number(height)?)),
                None => None,
            };
            let sky = Sky {
                cover,
                base,
                cloud_type: caps.get(3).and_then(|m| CloudType::from_code(m.as_str())),
            };
            debug!(field = "sky", sky = ?sky, "Decoded sky condition");
            layers.push(sky);
            self.cursor.advance();
        }

        Ok(layers)
    }

    /// Temperature and optional dew point (`M05/M10`)
    pub fn temperatures(&mut self) -> Result<(Option<Temperature>, Option<Temperature>)> {
        let Some(caps) = self
            .cursor
            .current()
            .and_then(|token| patterns::TEMPERATURE.captures(token))
        else {
            return Ok((None, None));
        };

        let signed = |negative: bool, value: i16| Temperature {
            celsius: if negative { -value } else { value },
        };
        let temperature = signed(caps.get(1).is_some(), self.number(&caps[2])?);
        let dew_point = match caps.get(4) {
            Some(digits) => Some(signed(caps.get(3).is_some(), self.number(digits.as_str())?)),
            None => None,
        };
        self.cursor.advance();

        debug!(
            field = "temperature",
            temperature = ?temperature,
            dew_point = ?dew_point,
            "Decoded temperature"
        );
        Ok((Some(temperature), dew_point))
    }

    /// `A` altimeter in hundredths of inHg, or `Q` QNH in hPa
    pub fn pressure(&mut self) -> Result<Option<Pressure>> {
        let Some(caps) = self
            .cursor
            .current()
            .and_then(|token| patterns::PRESSURE.captures(token))
        else {
            return Ok(None);
        };

        let value: u32 = self.number(&caps[2])?;
        let pressure = if &caps[1] == "A" {
            Pressure {
                value: f64::from(value) / 100.0,
                unit: PressureUnit::InchesOfMercury,
            }
        } else {
            Pressure {
                value: f64::from(value),
                unit: PressureUnit::Hectopascals,
            }
        };
        self.cursor.advance();

        debug!(field = "pressure", pressure = ?pressure, "Decoded pressure");
        Ok(Some(pressure))
    }

    /// Remarks are not decoded; the cursor is left where it is.
    pub fn remark(&mut self) {}

    /// Report ends with the `$` maintenance indicator
    pub fn quality_flag(&self) -> bool {
        self.raw.ends_with('$')
    }
}
