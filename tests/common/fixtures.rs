//! Station files served by the stub upstream.
//!
//! Each file mirrors the provider layout: a timestamp line, then the report.

/// Routine report with wind, visibility, sky, temperatures and altimeter
pub const KJFK: &str = "2024/01/15 19:51\nKJFK 151951Z 18010KT 10SM FEW250 24/18 A3000\n";

/// Special report with gusts, variation, RVR and weather
pub const EGLL: &str = "2024/01/15 19:50\n\
    SPECI EGLL 151950Z 24015G25KT 210V270 9999 R27L/1200V1800FT -RA BKN008 17/15 Q1009\n";

/// CAVOK report
pub const LFPG: &str = "2024/01/15 19:30\nLFPG 151930Z 27008KT CAVOK 18/09 Q1018\n";

/// Observation time group is out of range
pub const BROKEN: &str = "2024/01/15 19:51\nMETAR XXXX 999999Z 18010KT\n";

/// Every station file the stub knows, keyed by file name
pub fn station_files() -> Vec<(&'static str, &'static str)> {
    vec![
        ("KJFK.TXT", KJFK),
        ("EGLL.TXT", EGLL),
        ("LFPG.TXT", LFPG),
        ("XXXX.TXT", BROKEN),
    ]
}
