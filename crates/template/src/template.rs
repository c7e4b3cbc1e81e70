//! The aggregate report template and its builder.

use crate::chart::{ChartConfig, ChartConfigError};
use crate::preset::{Preset, PresetKind};
use crate::section::{DEFAULT_SECTION_ORDER, SectionConfig, SectionKind};
use qrydoc_types::{Color, Margins, PageSize};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use thiserror::Error;

/// Hard cap on the number of charts a single report may configure.
pub const MAX_CHARTS: usize = 10;

/// Where the footer logo is anchored on each content page.
#[derive(Deserialize, Serialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LogoPosition {
    BottomLeft,
    #[default]
    BottomRight,
    BottomCenter,
}

/// Footer logo configuration. A missing or unreadable logo file degrades
/// to no logo at render time; it never fails the build.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct FooterLogo {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub position: LogoPosition,
    pub width: f32,
    pub height: f32,
}

impl Default for FooterLogo {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
            position: LogoPosition::default(),
            width: 60.0,
            height: 30.0,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TemplateError {
    #[error("a report supports at most {max} charts, got {count}")]
    TooManyCharts { count: usize, max: usize },
    #[error("chart at index {index} is invalid: {source}")]
    InvalidChart {
        index: usize,
        source: ChartConfigError,
    },
}

/// The aggregate styling and structural configuration for one report.
///
/// Immutable once built; share it freely between builds. `sections` left
/// unset (or set to an empty list) falls back to
/// [`DEFAULT_SECTION_ORDER`].
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Template {
    pub primary_color: Color,
    pub secondary_color: Color,
    pub title_font: String,
    pub body_font: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_title_font_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_body_font_path: Option<String>,
    pub page_size: PageSize,
    pub margins: Margins,
    pub footer_logo: FooterLogo,
    pub footer_height: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<SectionConfig>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub charts: Vec<ChartConfig>,
}

impl Default for Template {
    fn default() -> Self {
        Self {
            primary_color: Color::rgb(0x2C, 0x3E, 0x50),
            secondary_color: Color::rgb(0x7F, 0x8C, 0x8D),
            title_font: "Helvetica-Bold".to_string(),
            body_font: "Helvetica".to_string(),
            custom_title_font_path: None,
            custom_body_font_path: None,
            page_size: PageSize::A4,
            margins: Margins::all(72.0),
            footer_logo: FooterLogo::default(),
            footer_height: 40.0,
            cover_image_path: None,
            sections: None,
            charts: Vec::new(),
        }
    }
}

impl Template {
    pub fn builder() -> TemplateBuilder {
        TemplateBuilder::new()
    }

    /// The effective section list: the configured sections, or the default
    /// order when none were configured. An explicitly empty list is treated
    /// the same as an absent one.
    pub fn resolved_sections(&self) -> Cow<'_, [SectionConfig]> {
        match &self.sections {
            Some(sections) if !sections.is_empty() => Cow::Borrowed(sections),
            _ => Cow::Owned(
                DEFAULT_SECTION_ORDER
                    .iter()
                    .map(|&kind| SectionConfig::new(kind))
                    .collect(),
            ),
        }
    }
}

/// Persistent builder over [`Template`]. Every `with_*` call consumes the
/// builder and returns an updated snapshot; clone before a call to branch.
#[derive(Debug, Clone, Default)]
pub struct TemplateBuilder {
    template: Template,
}

impl TemplateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed every preset-covered field from a registered preset. Later
    /// calls override only the fields they name.
    pub fn from_preset(kind: PresetKind) -> Self {
        let preset = Preset::get(kind);
        let template = Template {
            primary_color: preset.primary_color,
            secondary_color: preset.secondary_color,
            title_font: preset.title_font.to_string(),
            body_font: preset.body_font.to_string(),
            sections: Some(
                preset
                    .default_sections
                    .iter()
                    .map(|&section_kind| SectionConfig::new(section_kind))
                    .collect(),
            ),
            ..Template::default()
        };
        Self { template }
    }

    pub fn with_colors(mut self, primary: Color, secondary: Option<Color>) -> Self {
        self.template.primary_color = primary;
        if let Some(secondary) = secondary {
            self.template.secondary_color = secondary;
        }
        self
    }

    pub fn with_fonts(mut self, title_font: impl Into<String>, body_font: impl Into<String>) -> Self {
        self.template.title_font = title_font.into();
        self.template.body_font = body_font.into();
        self
    }

    /// Point the title and body fonts at font files. Unreadable or invalid
    /// files degrade to the built-in fonts at render time with a logged
    /// diagnostic; they never fail the build.
    pub fn with_custom_fonts(
        mut self,
        title_font_path: Option<String>,
        body_font_path: Option<String>,
    ) -> Self {
        self.template.custom_title_font_path = title_font_path;
        self.template.custom_body_font_path = body_font_path;
        self
    }

    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.template.page_size = page_size;
        self
    }

    pub fn with_margins(
        mut self,
        top: Option<f32>,
        bottom: Option<f32>,
        left: Option<f32>,
        right: Option<f32>,
    ) -> Self {
        let margins = &mut self.template.margins;
        if let Some(top) = top {
            margins.top = top;
        }
        if let Some(bottom) = bottom {
            margins.bottom = bottom;
        }
        if let Some(left) = left {
            margins.left = left;
        }
        if let Some(right) = right {
            margins.right = right;
        }
        self
    }

    pub fn with_footer(
        mut self,
        logo_position: Option<LogoPosition>,
        logo_width: Option<f32>,
        logo_height: Option<f32>,
        height: Option<f32>,
    ) -> Self {
        let logo = &mut self.template.footer_logo;
        if let Some(position) = logo_position {
            logo.position = position;
        }
        if let Some(width) = logo_width {
            logo.width = width;
        }
        if let Some(height) = logo_height {
            logo.height = height;
        }
        if let Some(footer_height) = height {
            self.template.footer_height = footer_height;
        }
        self
    }

    pub fn with_footer_logo(mut self, path: impl Into<String>) -> Self {
        self.template.footer_logo.enabled = true;
        self.template.footer_logo.path = Some(path.into());
        self
    }

    pub fn without_footer_logo(mut self) -> Self {
        self.template.footer_logo.enabled = false;
        self
    }

    pub fn with_cover_image(mut self, path: impl Into<String>) -> Self {
        self.template.cover_image_path = Some(path.into());
        self
    }

    pub fn with_sections(mut self, sections: Vec<SectionConfig>) -> Self {
        self.template.sections = Some(sections);
        self
    }

    /// Attach the chart list. Fails fast on more than [`MAX_CHARTS`]
    /// entries or on any structurally invalid configuration, reporting the
    /// offending index.
    pub fn with_charts(mut self, charts: Vec<ChartConfig>) -> Result<Self, TemplateError> {
        if charts.len() > MAX_CHARTS {
            return Err(TemplateError::TooManyCharts {
                count: charts.len(),
                max: MAX_CHARTS,
            });
        }
        for (index, chart) in charts.iter().enumerate() {
            chart
                .validate()
                .map_err(|source| TemplateError::InvalidChart { index, source })?;
        }
        self.template.charts = charts;
        Ok(self)
    }

    pub fn build(self) -> Template {
        self.template
    }
}

impl From<TemplateBuilder> for Template {
    fn from(builder: TemplateBuilder) -> Self {
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartKind;

    fn chart(title: &str) -> ChartConfig {
        ChartConfig::new(ChartKind::Bar, title, "region", "amount")
    }

    #[test]
    fn unset_sections_resolve_to_default_order() {
        let template = Template::default();
        let kinds: Vec<_> = template.resolved_sections().iter().map(|s| s.kind).collect();
        assert_eq!(kinds, DEFAULT_SECTION_ORDER);
    }

    #[test]
    fn explicitly_empty_sections_also_resolve_to_default_order() {
        let template = Template::builder().with_sections(vec![]).build();
        assert_eq!(template.sections, Some(vec![]));
        let kinds: Vec<_> = template.resolved_sections().iter().map(|s| s.kind).collect();
        assert_eq!(kinds, DEFAULT_SECTION_ORDER);
    }

    #[test]
    fn configured_sections_keep_their_order() {
        let template = Template::builder()
            .with_sections(vec![
                SectionConfig::new(SectionKind::Data),
                SectionConfig::new(SectionKind::Summary),
            ])
            .build();
        let kinds: Vec<_> = template.resolved_sections().iter().map(|s| s.kind).collect();
        assert_eq!(kinds, [SectionKind::Data, SectionKind::Summary]);
    }

    #[test]
    fn chart_limit_is_enforced_at_the_builder_call() {
        let ten: Vec<_> = (0..10).map(|i| chart(&format!("Chart {i}"))).collect();
        assert!(Template::builder().with_charts(ten).is_ok());

        let eleven: Vec<_> = (0..11).map(|i| chart(&format!("Chart {i}"))).collect();
        assert_eq!(
            Template::builder().with_charts(eleven).unwrap_err(),
            TemplateError::TooManyCharts { count: 11, max: MAX_CHARTS }
        );
    }

    #[test]
    fn invalid_chart_reports_offending_index() {
        let charts = vec![chart("Fine"), ChartConfig::new(ChartKind::Pie, "Broken", "", "amount")];
        match Template::builder().with_charts(charts).unwrap_err() {
            TemplateError::InvalidChart { index, source } => {
                assert_eq!(index, 1);
                assert_eq!(source, ChartConfigError::EmptyField { field: "group_by" });
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn preset_override_isolation() {
        let preset = Preset::get(PresetKind::Financial);
        let template = TemplateBuilder::from_preset(PresetKind::Financial)
            .with_colors(Color::BLACK, None)
            .build();

        assert_eq!(template.primary_color, Color::BLACK);
        assert_eq!(template.secondary_color, preset.secondary_color);
        assert_eq!(template.title_font, preset.title_font);
        assert_eq!(template.body_font, preset.body_font);
        let kinds: Vec<_> = template.resolved_sections().iter().map(|s| s.kind).collect();
        assert_eq!(kinds, preset.default_sections);
    }

    #[test]
    fn builder_snapshots_can_branch() {
        let base = Template::builder().with_fonts("Times-Bold", "Times-Roman");
        let red = base.clone().with_colors(Color::rgb(0xC0, 0x00, 0x00), None).build();
        let blue = base.with_colors(Color::rgb(0x00, 0x00, 0xC0), None).build();

        assert_ne!(red.primary_color, blue.primary_color);
        assert_eq!(red.title_font, blue.title_font);
    }
}
