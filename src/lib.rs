//! A report assembly engine: declarative templates, industry presets and a
//! section pipeline that renders business reports to PDF.
//!
//! The crate is organized as a small workspace. Templates, presets, charts
//! and covers live in `qrydoc-template`; the resolved block model in
//! `qrydoc-doc`; the data and resource contracts in `qrydoc-traits`. This
//! root crate ties them together with the section pipeline, font
//! resolution, the PDF serializer and the [`ReportGenerator`] entry point.
//!
//! ```no_run
//! use qrydoc::{InMemoryTable, PresetKind, ReportGenerator, TemplateBuilder};
//!
//! let template = TemplateBuilder::from_preset(PresetKind::Financial).build();
//! let table = InMemoryTable::with_rows(
//!     vec!["region".into(), "amount".into()],
//!     vec![vec!["North".into(), "1200".into()]],
//! );
//! ReportGenerator::new("q4.pdf", template)
//!     .build("Q4 Review", Some("Revenue grew 12%."), Some(&table))?;
//! # Ok::<(), qrydoc::ReportError>(())
//! ```

pub mod assembler;
pub mod error;
pub mod fonts;
pub mod generator;
pub mod render;

pub use assembler::{ChartImage, ReportContent, assemble};
pub use error::ReportError;
pub use fonts::{ResolvedFont, ResolvedFonts, resolve_fonts};
pub use generator::{ReportEngine, ReportGenerator};
pub use render::{MAX_CHART_HEIGHT, PdfRenderer, fit_scale};

pub use qrydoc_doc::{
    Block, CoverPage, PlacedText, ResolvedDocument, SharedData, TableData, TextRole,
};
pub use qrydoc_resource::FilesystemResourceProvider;
pub use qrydoc_template::{
    ChartConfig, ChartConfigError, ChartKind, Cover, CoverBuilder, CoverDate, CoverText,
    DEFAULT_SECTION_ORDER, FooterLogo, LogoPosition, MAX_CHARTS, Preset, PresetKind,
    SectionConfig, SectionKind, Template, TemplateBuilder, TemplateError, UnknownPresetError,
    VALID_CHART_KINDS,
};
pub use qrydoc_traits::{
    ChartRenderError, ChartRenderer, InMemoryResourceProvider, InMemoryTable, ResourceError,
    ResourceProvider, TableSource,
};
pub use qrydoc_types::{Color, Margins, PageSize, TextAlign};
