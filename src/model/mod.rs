//! Decoded METAR report data model.
//!
//! A [`Report`] is produced once by the decoder and never mutated afterwards.
//! Sub-structures are only present when every one of their numeric fields was
//! decoded; list-valued groups are empty rather than absent.

pub mod vocabulary;

use chrono::{DateTime, Utc};
use serde::Serialize;

pub use vocabulary::Coded;

/// Whether the report is a scheduled observation or a special one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReportKind {
    /// `METAR`
    Routine,
    /// `SPECI`
    Special,
}

/// Report modifier group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Modifier {
    /// `AUTO`
    Automatic,
    /// `COR`
    ManuallyCorrected,
}

/// Where the wind is blowing from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WindDirection {
    Degrees(u16),
    Variable,
}

/// Range of directions for a variable wind (`180V240`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WindVariation {
    pub min: u16,
    pub max: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpeedUnit {
    Knots,
}

/// Surface wind group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Wind {
    pub direction: WindDirection,
    pub speed: u16,
    pub gust: Option<u16>,
    pub variation: Option<WindVariation>,
    pub unit: SpeedUnit,
}

impl Wind {
    /// Direction and speed both zero (`00000KT`)
    pub fn is_calm(&self) -> bool {
        self.direction == WindDirection::Degrees(0) && self.speed == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DistanceUnit {
    Meters,
    Kilometers,
    StatuteMiles,
}

impl DistanceUnit {
    /// Parse a unit suffix; `NDV` (no directional variation) is a meters reading
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "M" | "NDV" => Some(DistanceUnit::Meters),
            "KM" => Some(DistanceUnit::Kilometers),
            "SM" => Some(DistanceUnit::StatuteMiles),
            _ => None,
        }
    }

    /// Abbreviation used when rendering
    pub fn abbreviation(self) -> &'static str {
        match self {
            DistanceUnit::Meters => "m",
            DistanceUnit::Kilometers => "km",
            DistanceUnit::StatuteMiles => "sm",
        }
    }
}

/// `M` / `P` prefix on a distance reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RangeModifier {
    LessThan,
    MoreThan,
}

impl RangeModifier {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "M" => Some(RangeModifier::LessThan),
            "P" => Some(RangeModifier::MoreThan),
            _ => None,
        }
    }
}

/// Lowest visibility and the compass direction it was observed in (`1200NE`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectionalVisibility {
    pub value: u32,
    pub direction: String,
    pub unit: DistanceUnit,
}

/// Prevailing visibility group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Visibility {
    pub value: f64,
    pub unit: DistanceUnit,
    pub modifier: Option<RangeModifier>,
    pub lowest: Option<DirectionalVisibility>,
}

impl Visibility {
    /// Encoded value for "10 km or more"
    pub const MAX_RANGE_METERS: f64 = 9999.0;

    pub fn is_max_range(&self) -> bool {
        self.unit == DistanceUnit::Meters && self.value == Self::MAX_RANGE_METERS
    }
}

/// Runway side letter following the runway number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ApproachDirection {
    Left,
    Center,
    Right,
}

impl ApproachDirection {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "L" => Some(ApproachDirection::Left),
            "C" => Some(ApproachDirection::Center),
            "R" => Some(ApproachDirection::Right),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            ApproachDirection::Left => "L",
            ApproachDirection::Center => "C",
            ApproachDirection::Right => "R",
        }
    }
}

/// One RVR distance in feet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RvrReading {
    pub feet: u32,
    pub modifier: Option<RangeModifier>,
}

/// Runway visual range group (`R04L/2000V4000FT`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rvr {
    pub runway: u8,
    pub approach_direction: Option<ApproachDirection>,
    pub min: RvrReading,
    pub max: Option<RvrReading>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Intensity {
    Heavy,
    Light,
    Vicinity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Descriptor {
    Shallow,
    Partial,
    Patches,
    LowDrifting,
    Blowing,
    Showers,
    Thunderstorm,
    Freezing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phenomenon {
    Drizzle,
    Rain,
    Snow,
    SnowGrains,
    IceCrystals,
    IcePellets,
    Hail,
    SmallHail,
    UnknownPrecipitation,
    Mist,
    Fog,
    Smoke,
    VolcanicAsh,
    WidespreadDust,
    Sand,
    Haze,
    Spray,
    DustWhirls,
    Squalls,
    FunnelCloud,
    Sandstorm,
    Duststorm,
}

/// Present weather group; at least one of descriptor/phenomenon is set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Weather {
    pub intensity: Option<Intensity>,
    pub descriptor: Option<Descriptor>,
    pub phenomenon: Option<Phenomenon>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SkyCover {
    VerticalVisibility,
    SkyClear,
    Clear,
    Few,
    Scattered,
    Broken,
    Overcast,
    NoSignificantCloud,
}

impl SkyCover {
    /// Cover codes that describe an empty sky
    pub fn is_clear(self) -> bool {
        matches!(
            self,
            SkyCover::SkyClear | SkyCover::Clear | SkyCover::NoSignificantCloud
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CloudType {
    Cumulus,
    Cumulonimbus,
    ToweringCumulus,
    Cirrus,
}

/// Height of a cloud layer base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CloudBase {
    /// Height in hundreds of feet
    Hundreds(u32),
    /// `///`: layer is below the station
    BelowStation,
}

/// Sky condition group (`BKN008CB`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Sky {
    pub cover: SkyCover,
    pub base: Option<CloudBase>,
    pub cloud_type: Option<CloudType>,
}

impl Sky {
    /// Cloud base in feet, when a numeric height was reported
    pub fn height_feet(&self) -> Option<u32> {
        match self.base {
            Some(CloudBase::Hundreds(hundreds)) => Some(hundreds * 100),
            _ => None,
        }
    }
}

/// Temperature or dew point in whole degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Temperature {
    pub celsius: i16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PressureUnit {
    InchesOfMercury,
    Hectopascals,
}

/// Altimeter setting (`A2992`) or QNH (`Q1013`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pressure {
    pub value: f64,
    pub unit: PressureUnit,
}

/// A fully decoded report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub kind: ReportKind,
    pub station_id: String,
    pub observed_at: DateTime<Utc>,
    pub modifier: Option<Modifier>,
    pub wind: Option<Wind>,
    pub ceiling_and_visibility_ok: bool,
    pub visibility: Option<Visibility>,
    pub runway_visual_ranges: Vec<Rvr>,
    pub present_weather: Vec<Weather>,
    pub sky_conditions: Vec<Sky>,
    pub temperature: Option<Temperature>,
    pub dew_point: Option<Temperature>,
    pub pressure: Option<Pressure>,
    pub quality_flag: bool,
}
