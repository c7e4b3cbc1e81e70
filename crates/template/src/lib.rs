//! Report configuration model.
//!
//! Everything in this crate is a declarative, immutable value object:
//! templates, sections, chart configurations, cover layouts and the preset
//! registry. Builders consume `self` and return a new snapshot on every
//! call, so a partially configured builder can be cloned and branched
//! without aliasing surprises.
//!
//! Configuration errors are raised synchronously at the builder call that
//! introduces them, never deferred to generation time.

pub mod chart;
pub mod cover;
pub mod preset;
pub mod section;
pub mod template;

pub use chart::{ChartConfig, ChartConfigError, ChartKind, VALID_CHART_KINDS};
pub use cover::{Cover, CoverBuilder, CoverDate, CoverText, DEFAULT_DATE_FORMAT};
pub use preset::{Preset, PresetKind, UnknownPresetError};
pub use section::{DEFAULT_SECTION_ORDER, SectionConfig, SectionKind};
pub use template::{
    FooterLogo, LogoPosition, MAX_CHARTS, Template, TemplateBuilder, TemplateError,
};
