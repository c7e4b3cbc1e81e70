//! Industry presets: named, immutable default bundles used to seed a
//! template builder.
//!
//! The registry is process-wide read-only state. Presets are data, not
//! behavior; they are only ever read, so concurrent builds may share them
//! freely.

use crate::section::SectionKind;
use qrydoc_types::Color;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The closed set of registered presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetKind {
    Financial,
    Healthcare,
    Technology,
    Retail,
    Manufacturing,
    Consulting,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown preset '{0}', expected one of: financial, healthcare, technology, retail, manufacturing, consulting")]
pub struct UnknownPresetError(pub String);

impl FromStr for PresetKind {
    type Err = UnknownPresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "financial" => Ok(PresetKind::Financial),
            "healthcare" => Ok(PresetKind::Healthcare),
            "technology" => Ok(PresetKind::Technology),
            "retail" => Ok(PresetKind::Retail),
            "manufacturing" => Ok(PresetKind::Manufacturing),
            "consulting" => Ok(PresetKind::Consulting),
            other => Err(UnknownPresetError(other.to_string())),
        }
    }
}

impl fmt::Display for PresetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Preset::get(*self).name)
    }
}

/// A named default bundle of template values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    pub name: &'static str,
    pub description: &'static str,
    pub primary_color: Color,
    pub secondary_color: Color,
    pub title_font: &'static str,
    pub body_font: &'static str,
    pub default_sections: &'static [SectionKind],
}

const SUMMARY_CHART_DATA: &[SectionKind] =
    &[SectionKind::Summary, SectionKind::Chart, SectionKind::Data];
const SUMMARY_DATA_CHART: &[SectionKind] =
    &[SectionKind::Summary, SectionKind::Data, SectionKind::Chart];
const SUMMARY_DATA: &[SectionKind] = &[SectionKind::Summary, SectionKind::Data];

static PRESETS: [Preset; 6] = [
    Preset {
        name: "Financial",
        description: "Conservative navy and gold styling for financial statements, audits and quarterly results",
        primary_color: Color::rgb(0x1A, 0x23, 0x7E),
        secondary_color: Color::rgb(0xC9, 0xA2, 0x27),
        title_font: "Times-Bold",
        body_font: "Times-Roman",
        default_sections: SUMMARY_CHART_DATA,
    },
    Preset {
        name: "Healthcare",
        description: "Calm teal palette for clinical indicators and patient-population reporting",
        primary_color: Color::rgb(0x00, 0x69, 0x5C),
        secondary_color: Color::rgb(0x4D, 0xB6, 0xAC),
        title_font: "Helvetica-Bold",
        body_font: "Helvetica",
        default_sections: SUMMARY_DATA_CHART,
    },
    Preset {
        name: "Technology",
        description: "High-contrast blue styling for product metrics and engineering dashboards",
        primary_color: Color::rgb(0x0D, 0x47, 0xA1),
        secondary_color: Color::rgb(0x00, 0xB0, 0xFF),
        title_font: "Helvetica-Bold",
        body_font: "Helvetica",
        default_sections: SUMMARY_CHART_DATA,
    },
    Preset {
        name: "Retail",
        description: "Warm orange palette for sales performance and category breakdowns",
        primary_color: Color::rgb(0xE6, 0x51, 0x00),
        secondary_color: Color::rgb(0xFF, 0xB3, 0x00),
        title_font: "Helvetica-Bold",
        body_font: "Helvetica",
        default_sections: SUMMARY_CHART_DATA,
    },
    Preset {
        name: "Manufacturing",
        description: "Industrial slate styling for production volumes and plant throughput",
        primary_color: Color::rgb(0x37, 0x47, 0x4F),
        secondary_color: Color::rgb(0xFF, 0x8F, 0x00),
        title_font: "Helvetica-Bold",
        body_font: "Helvetica",
        default_sections: SUMMARY_DATA,
    },
    Preset {
        name: "Consulting",
        description: "Understated purple styling for strategy decks and engagement summaries",
        primary_color: Color::rgb(0x4A, 0x14, 0x8C),
        secondary_color: Color::rgb(0x95, 0x75, 0xCD),
        title_font: "Times-Bold",
        body_font: "Times-Roman",
        default_sections: SUMMARY_CHART_DATA,
    },
];

impl Preset {
    /// Look up a preset by kind. Infallible: the enum is closed and every
    /// variant is registered.
    pub fn get(kind: PresetKind) -> &'static Preset {
        match kind {
            PresetKind::Financial => &PRESETS[0],
            PresetKind::Healthcare => &PRESETS[1],
            PresetKind::Technology => &PRESETS[2],
            PresetKind::Retail => &PRESETS[3],
            PresetKind::Manufacturing => &PRESETS[4],
            PresetKind::Consulting => &PRESETS[5],
        }
    }

    /// String-keyed lookup for callers holding a tag rather than the enum.
    pub fn get_by_name(name: &str) -> Result<&'static Preset, UnknownPresetError> {
        let kind = name.parse::<PresetKind>()?;
        Ok(Self::get(kind))
    }

    /// All registered presets as `(name, description)` pairs.
    pub fn list_all() -> impl Iterator<Item = (&'static str, &'static str)> {
        PRESETS.iter().map(|p| (p.name, p.description))
    }
}
