//! METAR report decoder.
//!
//! Decoding runs the group decoders in a fixed order over one token cursor:
//!
//! ```text
//! type, station, time, modifier, wind, CAVOK, visibility, RVR,
//! present weather, sky, temperature/dew point, pressure, remarks, QC flag
//! ```
//!
//! A token consumed by one decoder is never seen by a later one. Optional
//! groups that do not match are skipped; a malformed station or time aborts
//! the whole decode.

pub mod fields;
pub mod patterns;
pub mod time;
pub mod tokenizer;

use tracing::{debug, error};

use crate::error::{MetarError, Result};
use crate::model::Report;
use crate::render::{render, RenderedReport};

pub use fields::FieldDecoder;
pub use tokenizer::TokenCursor;

/// Decode a report into its typed form.
///
/// `reference` resolves the month and year of the observation; when it is
/// absent or unparseable the current date is used.
pub fn decode_report(raw: &str, reference: Option<&str>) -> Result<Report> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(MetarError::EmptyInput {
            raw: raw.to_string(),
        });
    }

    let mut fields = FieldDecoder::new(raw);

    let kind = fields.report_kind();
    let station_id = fields.station_id()?;
    let observed_at = fields.observed_at(time::reference_or_now(reference))?;
    let modifier = fields.modifier();
    let wind = fields.wind()?;
    let ceiling_and_visibility_ok = fields.cavok();
    let visibility = fields.visibility()?;
    let runway_visual_ranges = fields.runway_visual_ranges()?;
    let present_weather = fields.present_weather();
    let sky_conditions = fields.sky_conditions()?;
    let (temperature, dew_point) = fields.temperatures()?;
    let pressure = fields.pressure()?;
    fields.remark();
    let quality_flag = fields.quality_flag();

    let remaining = fields.cursor().remaining();
    if !remaining.is_empty() {
        debug!(
            station = %station_id,
            unparsed = %remaining.join(" "),
            "Tokens left after decoding"
        );
    }

    Ok(Report {
        kind,
        station_id,
        observed_at,
        modifier,
        wind,
        ceiling_and_visibility_ok,
        visibility,
        runway_visual_ranges,
        present_weather,
        sky_conditions,
        temperature,
        dew_point,
        pressure,
        quality_flag,
    })
}

/// Decode a report and render it as human-readable text.
pub fn decode(raw: &str, reference: Option<&str>) -> Result<RenderedReport> {
    match decode_report(raw, reference) {
        Ok(report) => Ok(render(&report)),
        Err(err) => {
            error!(error = %err, raw = raw, "Failed to decode METAR report");
            if err.is_decode_error() {
                Err(err)
            } else {
                Err(MetarError::Decode {
                    raw: raw.trim().to_string(),
                    message: err.to_string(),
                })
            }
        }
    }
}
