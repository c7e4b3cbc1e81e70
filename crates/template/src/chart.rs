//! Chart configuration and validation.
//!
//! A [`ChartConfig`] describes one chart's data binding and styling; it
//! never computes pixels. Whether `group_by` and `value_column` actually
//! exist in the payload is the chart renderer's concern, not this crate's.

use qrydoc_types::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The closed set of supported chart types.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    BarH,
    Line,
    Pie,
}

/// The supported chart type tags, as accepted by [`ChartKind::from_str`].
pub const VALID_CHART_KINDS: [&str; 4] = ["bar", "barh", "line", "pie"];

impl ChartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::BarH => "barh",
            ChartKind::Line => "line",
            ChartKind::Pie => "pie",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = ChartConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bar" => Ok(ChartKind::Bar),
            "barh" => Ok(ChartKind::BarH),
            "line" => Ok(ChartKind::Line),
            "pie" => Ok(ChartKind::Pie),
            other => Err(ChartConfigError::UnsupportedKind(other.to_string())),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartConfigError {
    #[error("unsupported chart type '{0}', expected one of: bar, barh, line, pie")]
    UnsupportedKind(String),
    #[error("chart field '{field}' must be a non-empty column name")]
    EmptyField { field: &'static str },
    #[error("chart figsize must have positive dimensions, got {width}x{height}")]
    InvalidFigsize { width: f32, height: f32 },
}

/// The declarative description of one chart.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub kind: ChartKind,
    pub title: String,
    /// Column whose distinct values form the chart categories.
    pub group_by: String,
    /// Column aggregated per category.
    pub value_column: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    /// Figure size hint for the external renderer, in inches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub figsize: Option<(f32, f32)>,
}

impl ChartConfig {
    pub fn new(
        kind: ChartKind,
        title: impl Into<String>,
        group_by: impl Into<String>,
        value_column: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            group_by: group_by.into(),
            value_column: value_column.into(),
            color: None,
            figsize: None,
        }
    }

    /// Fail-fast factory: identical checks to [`Self::validate`], but the
    /// invalid configuration never escapes.
    pub fn create(
        kind: ChartKind,
        title: impl Into<String>,
        group_by: impl Into<String>,
        value_column: impl Into<String>,
    ) -> Result<Self, ChartConfigError> {
        let config = Self::new(kind, title, group_by, value_column);
        config.validate()?;
        Ok(config)
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_figsize(mut self, width: f32, height: f32) -> Self {
        self.figsize = Some((width, height));
        self
    }

    /// Structural validation: non-empty column bindings and a positive
    /// figure size. Column existence is checked by the external renderer.
    pub fn validate(&self) -> Result<(), ChartConfigError> {
        if self.group_by.trim().is_empty() {
            return Err(ChartConfigError::EmptyField { field: "group_by" });
        }
        if self.value_column.trim().is_empty() {
            return Err(ChartConfigError::EmptyField { field: "value_column" });
        }
        if let Some((width, height)) = self.figsize
            && (width <= 0.0 || height <= 0.0)
        {
            return Err(ChartConfigError::InvalidFigsize { width, height });
        }
        Ok(())
    }

    /// Predicate form of [`Self::validate`] for callers that branch rather
    /// than propagate.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sales_chart() -> ChartConfig {
        ChartConfig::new(ChartKind::Bar, "Sales by region", "region", "amount")
    }

    #[test]
    fn valid_config_passes_both_contracts() {
        let config = sales_chart();
        assert!(config.is_valid());
        assert!(config.validate().is_ok());
        assert!(ChartConfig::create(ChartKind::Bar, "Sales", "region", "amount").is_ok());
    }

    #[test]
    fn empty_group_by_is_rejected() {
        let config = ChartConfig::new(ChartKind::Pie, "Split", "  ", "amount");
        assert_eq!(
            config.validate(),
            Err(ChartConfigError::EmptyField { field: "group_by" })
        );
        assert!(!config.is_valid());
    }

    #[test]
    fn create_rejects_empty_value_column() {
        let result = ChartConfig::create(ChartKind::Bar, "Sales", "region", "");
        assert_eq!(result, Err(ChartConfigError::EmptyField { field: "value_column" }));
    }

    #[test]
    fn non_positive_figsize_is_rejected() {
        let config = sales_chart().with_figsize(8.0, 0.0);
        assert!(matches!(
            config.validate(),
            Err(ChartConfigError::InvalidFigsize { .. })
        ));
        assert!(sales_chart().with_figsize(14.0, 8.0).is_valid());
    }

    #[test]
    fn kind_round_trips_through_str() {
        for tag in VALID_CHART_KINDS {
            assert_eq!(tag.parse::<ChartKind>().unwrap().as_str(), tag);
        }
        assert!(matches!(
            "scatter3d".parse::<ChartKind>(),
            Err(ChartConfigError::UnsupportedKind(_))
        ));
    }
}
