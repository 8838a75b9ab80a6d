//! Closed code tables for the METAR vocabularies.
//!
//! Every coded enum carries a constant `(variant, code, label)` table. The
//! decoder builds its regular expression alternations from the same tables,
//! so a code is accepted exactly when it can also be rendered.

use super::{CloudType, Descriptor, Intensity, Phenomenon, SkyCover};

/// A closed set of codes with a fixed human-readable label per code
pub trait Coded: Copy + PartialEq + Sized + 'static {
    /// `(variant, code, label)` for every member of the set
    const TABLE: &'static [(Self, &'static str, &'static str)];

    /// Look up a variant by its report code
    fn from_code(code: &str) -> Option<Self> {
        Self::TABLE
            .iter()
            .find(|(_, c, _)| *c == code)
            .map(|(variant, _, _)| *variant)
    }

    /// The code as it appears in a report
    fn code(self) -> &'static str {
        Self::TABLE
            .iter()
            .find(|(variant, _, _)| *variant == self)
            .map(|(_, code, _)| *code)
            .unwrap_or_default()
    }

    /// Human-readable label
    fn label(self) -> &'static str {
        Self::TABLE
            .iter()
            .find(|(variant, _, _)| *variant == self)
            .map(|(_, _, label)| *label)
            .unwrap_or_default()
    }
}

/// Build a regex alternation (`A|B|C`) matching every code of a table
pub fn alternation<T: Coded>() -> String {
    T::TABLE
        .iter()
        .map(|(_, code, _)| regex::escape(code))
        .collect::<Vec<_>>()
        .join("|")
}

impl Coded for SkyCover {
    const TABLE: &'static [(Self, &'static str, &'static str)] = &[
        (SkyCover::VerticalVisibility, "VV", "Vertical visibility"),
        (SkyCover::SkyClear, "SKC", "Clear"),
        (SkyCover::Clear, "CLR", "Clear"),
        (SkyCover::Few, "FEW", "Few clouds"),
        (SkyCover::Scattered, "SCT", "Scattered clouds"),
        (SkyCover::Broken, "BKN", "Broken clouds"),
        (SkyCover::Overcast, "OVC", "Overcast clouds"),
        (SkyCover::NoSignificantCloud, "NSC", "no significant cloud"),
    ];
}

impl Coded for CloudType {
    const TABLE: &'static [(Self, &'static str, &'static str)] = &[
        (CloudType::Cumulus, "CU", "cumulus"),
        (CloudType::Cumulonimbus, "CB", "Cumulonimbus"),
        (CloudType::ToweringCumulus, "TCU", "Towering Cumulus"),
        (CloudType::Cirrus, "CI", "cirrus"),
    ];
}

impl Coded for Intensity {
    const TABLE: &'static [(Self, &'static str, &'static str)] = &[
        (Intensity::Heavy, "+", "Heavy"),
        (Intensity::Light, "-", "Light"),
        (Intensity::Vicinity, "VC", "In the vicinity"),
    ];
}

impl Coded for Descriptor {
    const TABLE: &'static [(Self, &'static str, &'static str)] = &[
        (Descriptor::Shallow, "MI", "Shallow"),
        (Descriptor::Partial, "PR", "Partial"),
        (Descriptor::Patches, "BC", "Patches"),
        (Descriptor::LowDrifting, "DR", "Low Drifting"),
        (Descriptor::Blowing, "BL", "Blowing"),
        (Descriptor::Showers, "SH", "Shower(s)"),
        (Descriptor::Thunderstorm, "TS", "Thunderstorm"),
        (Descriptor::Freezing, "FZ", "Freezing"),
    ];
}

impl Coded for Phenomenon {
    const TABLE: &'static [(Self, &'static str, &'static str)] = &[
        // precipitation
        (Phenomenon::Drizzle, "DZ", "Drizzle"),
        (Phenomenon::Rain, "RA", "Rain"),
        (Phenomenon::Snow, "SN", "Snow"),
        (Phenomenon::SnowGrains, "SG", "Snow Grains"),
        (Phenomenon::IceCrystals, "IC", "Ice Crystals"),
        (Phenomenon::IcePellets, "PL", "Ice Pellets"),
        (Phenomenon::Hail, "GR", "Hail"),
        (Phenomenon::SmallHail, "GS", "Small Hail and/or Snow Pellets"),
        (Phenomenon::UnknownPrecipitation, "UP", "Unknown Precipitation"),
        // obscuration
        (Phenomenon::Mist, "BR", "Mist"),
        (Phenomenon::Fog, "FG", "Fog"),
        (Phenomenon::Smoke, "FU", "Smoke"),
        (Phenomenon::VolcanicAsh, "VA", "Volcanic Ash"),
        (Phenomenon::WidespreadDust, "DU", "Widespread Dust"),
        (Phenomenon::Sand, "SA", "Sand"),
        (Phenomenon::Haze, "HZ", "Haze"),
        (Phenomenon::Spray, "PY", "Spray"),
        // other
        (Phenomenon::DustWhirls, "PO", "Well Developed Dust/Sand Whirls"),
        (Phenomenon::Squalls, "SQ", "Squalls"),
        (Phenomenon::FunnelCloud, "FC", "Funnel Cloud Tornado Waterspout"),
        (Phenomenon::Sandstorm, "SS", "Sandstorm"),
        (Phenomenon::Duststorm, "DS", "Duststorm"),
    ];
}
