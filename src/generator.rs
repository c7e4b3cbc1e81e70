//! The build orchestrator and the top-level engine facade.
//!
//! [`ReportGenerator`] drives one build end to end: render charts through
//! the attached renderer, run the section pipeline, resolve fonts, serialize
//! to PDF and write the file. The output file is only touched after the
//! whole document has serialized successfully.

use crate::assembler::{ChartImage, ReportContent, assemble};
use crate::error::ReportError;
use crate::fonts::resolve_fonts;
use crate::render::PdfRenderer;
use qrydoc_doc::SharedData;
use qrydoc_resource::FilesystemResourceProvider;
use qrydoc_template::{Cover, CoverBuilder, Template, TemplateBuilder};
use qrydoc_traits::{ChartRenderer, ResourceProvider, TableSource};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Builds one report file from a template and caller content.
#[derive(Debug)]
pub struct ReportGenerator {
    output_path: PathBuf,
    template: Template,
    resources: Arc<dyn ResourceProvider>,
    chart_renderer: Option<Arc<dyn ChartRenderer>>,
}

impl ReportGenerator {
    /// A generator writing to `output_path`, loading resources relative to
    /// the current directory.
    pub fn new(output_path: impl Into<PathBuf>, template: Template) -> Self {
        Self {
            output_path: output_path.into(),
            template,
            resources: Arc::new(FilesystemResourceProvider::new(".")),
            chart_renderer: None,
        }
    }

    pub fn with_resources(mut self, resources: Arc<dyn ResourceProvider>) -> Self {
        self.resources = resources;
        self
    }

    /// Attach the external chart renderer. Without one, configured charts
    /// are skipped with a logged warning.
    pub fn with_chart_renderer(mut self, renderer: Arc<dyn ChartRenderer>) -> Self {
        self.chart_renderer = Some(renderer);
        self
    }

    /// Build the report without a cover page.
    pub fn build(
        &self,
        title: &str,
        summary: Option<&str>,
        table: Option<&dyn TableSource>,
    ) -> Result<(), ReportError> {
        self.run(None, title, summary, table)
    }

    /// Build the report honoring the template's configured section list.
    /// `build` runs the same pipeline; the name is kept for callers that
    /// configure sections explicitly.
    pub fn build_with_sections(
        &self,
        title: &str,
        summary: Option<&str>,
        table: Option<&dyn TableSource>,
    ) -> Result<(), ReportError> {
        self.run(None, title, summary, table)
    }

    /// Build the report with a cover.
    pub fn build_with_cover(
        &self,
        cover: &Cover,
        title: &str,
        summary: Option<&str>,
        table: Option<&dyn TableSource>,
    ) -> Result<(), ReportError> {
        self.run(Some(cover), title, summary, table)
    }

    fn run(
        &self,
        cover: Option<&Cover>,
        title: &str,
        summary: Option<&str>,
        table: Option<&dyn TableSource>,
    ) -> Result<(), ReportError> {
        log::info!("building report '{title}' -> {}", self.output_path.display());

        let chart_images = self.render_charts(table)?;
        let mut content = ReportContent::new(title).with_chart_images(chart_images);
        if let Some(summary) = summary {
            content = content.with_summary(summary);
        }
        if let Some(table) = table {
            content = content.with_table(table);
        }

        let document = assemble(&self.template, cover, &content, self.resources.as_ref())?;
        let fonts = resolve_fonts(&self.template, self.resources.as_ref());
        let footer_logo = self.load_footer_logo();

        let bytes = PdfRenderer::new(&self.template, &fonts, footer_logo).render(title, document)?;
        std::fs::write(&self.output_path, &bytes)?;
        log::info!("wrote {} bytes to {}", bytes.len(), self.output_path.display());
        Ok(())
    }

    fn render_charts(&self, table: Option<&dyn TableSource>) -> Result<Vec<ChartImage>, ReportError> {
        if self.template.charts.is_empty() {
            return Ok(Vec::new());
        }
        let Some(renderer) = &self.chart_renderer else {
            log::warn!(
                "{} charts configured but no chart renderer attached, chart sections will be empty",
                self.template.charts.len()
            );
            return Ok(Vec::new());
        };
        let Some(table) = table else {
            log::warn!("charts configured but no tabular payload supplied, chart sections will be empty");
            return Ok(Vec::new());
        };
        self.template
            .charts
            .iter()
            .map(|config| {
                renderer
                    .render_chart(config, table)
                    .map(|png| ChartImage {
                        title: config.title.clone(),
                        data: Arc::new(png),
                    })
                    .map_err(|source| ReportError::Chart {
                        title: config.title.clone(),
                        source,
                    })
            })
            .collect()
    }

    fn load_footer_logo(&self) -> Option<SharedData> {
        let logo = &self.template.footer_logo;
        if !logo.enabled {
            return None;
        }
        let path = logo.path.as_deref()?;
        match self.resources.load(path) {
            Ok(data) => Some(data),
            Err(err) => {
                log::warn!("footer logo '{path}' unavailable, rendering without it: {err}");
                None
            }
        }
    }
}

/// Convenience facade bundling a resource provider and chart renderer for
/// repeated builds.
#[derive(Debug, Default)]
pub struct ReportEngine {
    resources: Option<Arc<dyn ResourceProvider>>,
    chart_renderer: Option<Arc<dyn ChartRenderer>>,
}

impl ReportEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resources(mut self, resources: Arc<dyn ResourceProvider>) -> Self {
        self.resources = Some(resources);
        self
    }

    pub fn with_chart_renderer(mut self, renderer: Arc<dyn ChartRenderer>) -> Self {
        self.chart_renderer = Some(renderer);
        self
    }

    /// A fresh template builder.
    pub fn create_template(&self) -> TemplateBuilder {
        TemplateBuilder::new()
    }

    /// A fresh cover builder.
    pub fn create_cover(&self) -> CoverBuilder {
        CoverBuilder::new()
    }

    /// Build one report. A `None` template means the engine default.
    /// Returns a human-readable confirmation naming the output file.
    pub fn generate_report_with_builder(
        &self,
        output_path: impl AsRef<Path>,
        cover: Option<&Cover>,
        template: Option<&Template>,
        title: &str,
        summary: Option<&str>,
        table: Option<&dyn TableSource>,
    ) -> Result<String, ReportError> {
        let output_path = output_path.as_ref();
        let template = template.cloned().unwrap_or_default();
        let mut generator = ReportGenerator::new(output_path, template);
        if let Some(resources) = &self.resources {
            generator = generator.with_resources(resources.clone());
        }
        if let Some(renderer) = &self.chart_renderer {
            generator = generator.with_chart_renderer(renderer.clone());
        }
        match cover {
            Some(cover) => generator.build_with_cover(cover, title, summary, table)?,
            None => generator.build(title, summary, table)?,
        }
        Ok(format!("report generated at {}", output_path.display()))
    }
}
