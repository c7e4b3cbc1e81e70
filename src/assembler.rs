//! The section pipeline: lowers a template plus caller content into a
//! [`ResolvedDocument`].
//!
//! Assembly walks the template's resolved section list in order, emits the
//! blocks each enabled section contributes, and skips sections whose payload
//! is absent. Only a custom section without content aborts the pass.

use crate::error::ReportError;
use qrydoc_doc::{Block, CoverPage, PlacedText, ResolvedDocument, SharedData, TableData, TextRole};
use qrydoc_template::{Cover, CoverText, SectionKind, Template};
use qrydoc_traits::{ResourceProvider, TableSource};
use qrydoc_types::{Color, TextAlign};

/// One pre-rendered chart: its display title and PNG bytes.
#[derive(Debug, Clone)]
pub struct ChartImage {
    pub title: String,
    pub data: SharedData,
}

/// The caller-supplied content of one build.
#[derive(Debug, Default)]
pub struct ReportContent<'a> {
    pub title: &'a str,
    pub summary: Option<&'a str>,
    pub table: Option<&'a dyn TableSource>,
    pub chart_images: Vec<ChartImage>,
}

impl<'a> ReportContent<'a> {
    pub fn new(title: &'a str) -> Self {
        Self {
            title,
            summary: None,
            table: None,
            chart_images: Vec::new(),
        }
    }

    pub fn with_summary(mut self, summary: &'a str) -> Self {
        self.summary = Some(summary);
        self
    }

    pub fn with_table(mut self, table: &'a dyn TableSource) -> Self {
        self.table = Some(table);
        self
    }

    pub fn with_chart_images(mut self, chart_images: Vec<ChartImage>) -> Self {
        self.chart_images = chart_images;
        self
    }
}

/// Run the section pipeline once.
pub fn assemble(
    template: &Template,
    cover: Option<&Cover>,
    content: &ReportContent<'_>,
    resources: &dyn ResourceProvider,
) -> Result<ResolvedDocument, ReportError> {
    let mut document = ResolvedDocument::new();

    for section in template.resolved_sections().iter() {
        if !section.enabled {
            log::debug!("skipping disabled {} section", section.kind);
            continue;
        }
        match section.kind {
            SectionKind::Cover => {
                if let Some(page) = build_cover_page(template, cover, resources) {
                    document.push(Block::Cover(page));
                }
            }
            SectionKind::Summary => match content.summary {
                Some(summary) => {
                    document.push(Block::Heading {
                        level: 1,
                        text: content.title.to_string(),
                    });
                    document.push(Block::Paragraph {
                        text: summary.to_string(),
                    });
                }
                None => log::debug!("summary section skipped: no summary text supplied"),
            },
            SectionKind::Data => match content.table {
                Some(table) if !table.is_empty() => {
                    document.push(Block::Table(lower_table(table)));
                }
                _ => log::debug!("data section skipped: empty or absent payload"),
            },
            SectionKind::Chart => {
                for chart in &content.chart_images {
                    document.push(Block::Heading {
                        level: 2,
                        text: chart.title.clone(),
                    });
                    document.push(Block::Image {
                        data: chart.data.clone(),
                    });
                }
            }
            SectionKind::Custom => match section.custom_content.as_deref() {
                Some(text) if !text.trim().is_empty() => {
                    document.push(Block::Paragraph {
                        text: text.to_string(),
                    });
                }
                _ => return Err(ReportError::MissingCustomContent),
            },
        }
    }

    log::debug!("assembled {} blocks", document.len());
    Ok(document)
}

/// Lower the cover model to a [`CoverPage`], or `None` when there is
/// nothing to show. A cover image that fails to load degrades to no image.
fn build_cover_page(
    template: &Template,
    cover: Option<&Cover>,
    resources: &dyn ResourceProvider,
) -> Option<CoverPage> {
    let image_path = cover
        .and_then(|c| c.cover_image_path.as_deref())
        .or(template.cover_image_path.as_deref());

    if cover.is_none_or(Cover::is_blank) && image_path.is_none() {
        log::debug!("cover section skipped: no cover content configured");
        return None;
    }

    let image = image_path.and_then(|path| match resources.load(path) {
        Ok(data) => Some(data),
        Err(err) => {
            log::warn!("cover image '{path}' unavailable, continuing without it: {err}");
            None
        }
    });

    let mut texts = Vec::new();
    if let Some(cover) = cover {
        if let Some(title) = &cover.title {
            texts.push(resolve_text(title, TextRole::Title, template));
        }
        if let Some(subtitle) = &cover.subtitle {
            texts.push(resolve_text(subtitle, TextRole::Subtitle, template));
        }
        if let Some(date) = cover.formatted_date() {
            let styled = CoverText {
                content: date,
                ..cover.date_style.clone().unwrap_or_else(|| CoverText::new(""))
            };
            texts.push(resolve_text(&styled, TextRole::Date, template));
        }
        if let Some(author) = &cover.author {
            texts.push(resolve_text(author, TextRole::Author, template));
        }
        for text in &cover.custom_texts {
            texts.push(resolve_text(text, TextRole::Custom, template));
        }
    }

    Some(CoverPage {
        background: cover.and_then(|c| c.background_color),
        image,
        texts,
    })
}

fn resolve_text(text: &CoverText, role: TextRole, template: &Template) -> PlacedText {
    PlacedText {
        role,
        content: text.content.clone(),
        position: text.position,
        font_size: text.font_size.unwrap_or_else(|| default_font_size(role)),
        color: text.color.unwrap_or_else(|| default_color(role, template)),
        font_family: text.font_family.clone(),
        align: text.alignment.unwrap_or_else(|| default_align(role)),
    }
}

fn default_font_size(role: TextRole) -> f32 {
    match role {
        TextRole::Title => 36.0,
        TextRole::Subtitle => 20.0,
        TextRole::Date | TextRole::Author | TextRole::Custom => 12.0,
    }
}

fn default_color(role: TextRole, template: &Template) -> Color {
    match role {
        TextRole::Title => template.primary_color,
        TextRole::Subtitle => template.secondary_color,
        TextRole::Date | TextRole::Author | TextRole::Custom => Color::gray(0x5A),
    }
}

fn default_align(role: TextRole) -> TextAlign {
    match role {
        TextRole::Title | TextRole::Subtitle | TextRole::Custom => TextAlign::Center,
        TextRole::Date => TextAlign::Left,
        TextRole::Author => TextAlign::Right,
    }
}

fn lower_table(table: &dyn TableSource) -> TableData {
    let columns = table.columns();
    let rows = (0..table.row_count())
        .map(|row| (0..columns.len()).map(|col| table.cell(row, col)).collect())
        .collect();
    TableData { columns, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qrydoc_template::{SectionConfig, TemplateBuilder};
    use qrydoc_traits::{InMemoryResourceProvider, InMemoryTable};
    use std::sync::Arc;

    fn table() -> InMemoryTable {
        InMemoryTable::with_rows(
            vec!["region".into(), "amount".into()],
            vec![
                vec!["North".into(), "1200".into()],
                vec!["South".into(), "800".into()],
            ],
        )
    }

    fn kinds(document: &ResolvedDocument) -> Vec<&'static str> {
        document.blocks().iter().map(Block::kind).collect()
    }

    #[test]
    fn default_order_is_summary_then_charts_then_data() {
        let template = Template::default();
        let data = table();
        let content = ReportContent::new("Q4 Review")
            .with_summary("Revenue grew.")
            .with_table(&data)
            .with_chart_images(vec![ChartImage {
                title: "Sales by region".into(),
                data: Arc::new(vec![1, 2, 3]),
            }]);
        let provider = InMemoryResourceProvider::new();

        let document = assemble(&template, None, &content, &provider).unwrap();
        assert_eq!(
            kinds(&document),
            ["heading", "paragraph", "heading", "image", "table"]
        );
    }

    #[test]
    fn disabled_sections_are_skipped() {
        let template = TemplateBuilder::new()
            .with_sections(vec![
                SectionConfig::new(SectionKind::Summary),
                SectionConfig::disabled(SectionKind::Data),
            ])
            .build();
        let data = table();
        let content = ReportContent::new("T").with_summary("s").with_table(&data);
        let provider = InMemoryResourceProvider::new();

        let document = assemble(&template, None, &content, &provider).unwrap();
        assert_eq!(kinds(&document), ["heading", "paragraph"]);
    }

    #[test]
    fn empty_table_contributes_nothing() {
        let template = TemplateBuilder::new()
            .with_sections(vec![SectionConfig::new(SectionKind::Data)])
            .build();
        let empty = InMemoryTable::new(vec!["a".into()]);
        let content = ReportContent::new("T").with_table(&empty);
        let provider = InMemoryResourceProvider::new();

        let document = assemble(&template, None, &content, &provider).unwrap();
        assert!(document.is_empty());
    }

    #[test]
    fn custom_section_emits_content_verbatim() {
        let template = TemplateBuilder::new()
            .with_sections(vec![SectionConfig::custom("Methodology: survey of 400.")])
            .build();
        let content = ReportContent::new("T");
        let provider = InMemoryResourceProvider::new();

        let document = assemble(&template, None, &content, &provider).unwrap();
        assert_eq!(
            document.blocks(),
            [Block::Paragraph {
                text: "Methodology: survey of 400.".into()
            }]
        );
    }

    #[test]
    fn custom_section_without_content_is_an_error() {
        for section in [
            SectionConfig::new(SectionKind::Custom),
            SectionConfig::custom("   \n  "),
        ] {
            let template = TemplateBuilder::new().with_sections(vec![section]).build();
            let content = ReportContent::new("T");
            let provider = InMemoryResourceProvider::new();
            assert!(matches!(
                assemble(&template, None, &content, &provider),
                Err(ReportError::MissingCustomContent)
            ));
        }
    }

    #[test]
    fn absent_cover_is_skipped() {
        let template = TemplateBuilder::new()
            .with_sections(vec![SectionConfig::new(SectionKind::Cover)])
            .build();
        let content = ReportContent::new("T");
        let provider = InMemoryResourceProvider::new();

        let document = assemble(&template, None, &content, &provider).unwrap();
        assert!(document.is_empty());
    }

    #[test]
    fn cover_texts_resolve_role_defaults() {
        let template = TemplateBuilder::new()
            .with_sections(vec![SectionConfig::new(SectionKind::Cover)])
            .build();
        let cover = Cover::builder()
            .set_title("Annual Report")
            .set_author("Finance Team")
            .build();
        let content = ReportContent::new("T");
        let provider = InMemoryResourceProvider::new();

        let document = assemble(&template, Some(&cover), &content, &provider).unwrap();
        let Block::Cover(page) = &document.blocks()[0] else {
            panic!("expected a cover block");
        };
        assert_eq!(page.texts.len(), 2);
        assert_eq!(page.texts[0].role, TextRole::Title);
        assert_eq!(page.texts[0].font_size, 36.0);
        assert_eq!(page.texts[0].color, template.primary_color);
        assert_eq!(page.texts[0].align, TextAlign::Center);
        assert_eq!(page.texts[1].role, TextRole::Author);
        assert_eq!(page.texts[1].align, TextAlign::Right);
    }

    #[test]
    fn positioning_one_text_leaves_the_others_untouched() {
        let template = TemplateBuilder::new()
            .with_sections(vec![SectionConfig::new(SectionKind::Cover)])
            .build();
        let provider = InMemoryResourceProvider::new();
        let content = ReportContent::new("T");

        let plain = Cover::builder().set_title("X").set_subtitle("Y").build();
        let moved = Cover::builder()
            .set_title(CoverText::new("X").at(100.0, 700.0))
            .set_subtitle("Y")
            .build();

        let a = assemble(&template, Some(&plain), &content, &provider).unwrap();
        let b = assemble(&template, Some(&moved), &content, &provider).unwrap();
        let (Block::Cover(a), Block::Cover(b)) = (&a.blocks()[0], &b.blocks()[0]) else {
            panic!("expected cover blocks");
        };

        assert_eq!(a.texts[0].position, None);
        assert_eq!(b.texts[0].position, Some((100.0, 700.0)));
        assert_eq!(a.texts[1], b.texts[1]);
    }

    #[test]
    fn unreadable_cover_image_degrades_to_none() {
        let template = TemplateBuilder::new()
            .with_sections(vec![SectionConfig::new(SectionKind::Cover)])
            .with_cover_image("missing/cover.png")
            .build();
        let cover = Cover::builder().set_title("X").build();
        let content = ReportContent::new("T");
        let provider = InMemoryResourceProvider::new();

        let document = assemble(&template, Some(&cover), &content, &provider).unwrap();
        let Block::Cover(page) = &document.blocks()[0] else {
            panic!("expected a cover block");
        };
        assert!(page.image.is_none());
        assert_eq!(page.texts.len(), 1);
    }
}
