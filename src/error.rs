//! The error surface of a report build.

use qrydoc_template::TemplateError;
use qrydoc_traits::ChartRenderError;
use thiserror::Error;

/// Everything that can abort a report build. Optional-resource problems
/// (fonts, logos, cover images) are downgraded to logged warnings before
/// they reach this type.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("template configuration error: {0}")]
    Template(#[from] TemplateError),

    #[error("a custom section was configured without content")]
    MissingCustomContent,

    #[error("chart '{title}' could not be rendered: {source}")]
    Chart {
        title: String,
        source: ChartRenderError,
    },

    #[error("failed to decode image: {0}")]
    ImageDecode(String),

    #[error("pdf serialization failed: {0}")]
    Render(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
