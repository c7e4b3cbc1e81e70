//! PDF serialization of a [`ResolvedDocument`].
//!
//! Layout is a single top-down pass with a cursor per page. Blocks that do
//! not fit in the remaining content height move to a fresh page; tables
//! break row-wise and repeat their header. Cover blocks always occupy a
//! dedicated page and are laid out in bottom-origin PDF coordinates. The
//! whole document is rendered to bytes in memory; nothing is written to
//! disk until serialization has fully succeeded.

mod ops;

use crate::error::ReportError;
use crate::fonts::{ResolvedFont, ResolvedFonts, builtin_for};
use ops::{FontRef, PageOps};
use printpdf::image::RawImage;
use printpdf::ops::Op;
use printpdf::xobject::XObject;
use printpdf::{Mm, PdfDocument, PdfPage, PdfSaveOptions, Pt, XObjectId};
use qrydoc_doc::{Block, CoverPage, ResolvedDocument, SharedData, TableData};
use qrydoc_template::{LogoPosition, Template};
use qrydoc_types::{Color, TextAlign};
use std::collections::HashMap;

/// Chart images taller than this are scaled down to fit.
pub const MAX_CHART_HEIGHT: f32 = 280.0;

const HEADING_1_SIZE: f32 = 20.0;
const HEADING_2_SIZE: f32 = 14.0;
const BODY_SIZE: f32 = 11.0;
const LINE_HEIGHT: f32 = 1.4;
const BLOCK_SPACING: f32 = 12.0;
const TABLE_ROW_HEIGHT: f32 = 18.0;
const TABLE_FONT_SIZE: f32 = 10.0;
const TABLE_CELL_PADDING: f32 = 4.0;

/// The uniform-to-fit scale factor for an image inside a content box.
/// Never upscales.
pub fn fit_scale(pixel_width: u32, pixel_height: u32, max_width: f32, max_height: f32) -> f32 {
    if pixel_width == 0 || pixel_height == 0 {
        return 1.0;
    }
    (max_width / pixel_width as f32)
        .min(max_height / pixel_height as f32)
        .min(1.0)
}

/// Approximate advance width of a line, in points. Good enough for
/// wrapping and alignment of the base-14 families.
pub(crate) fn approx_text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * 0.5
}

/// Greedy word wrap against an approximate width budget. Source line
/// breaks are respected; each source line is trimmed first.
pub(crate) fn wrap_text(text: &str, max_width: f32, font_size: f32) -> Vec<String> {
    let mut lines = Vec::new();
    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            if !lines.is_empty() {
                lines.push(String::new());
            }
            continue;
        }
        let mut current = String::new();
        for word in line.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if current.is_empty() || approx_text_width(&candidate, font_size) <= max_width {
                current = candidate;
            } else {
                lines.push(std::mem::take(&mut current));
                current = word.to_string();
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    while lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines
}

/// The default bottom-origin anchor for a cover text role.
pub(crate) fn cover_anchor(
    role: qrydoc_doc::TextRole,
    page_width: f32,
    page_height: f32,
    template: &Template,
) -> (f32, f32) {
    use qrydoc_doc::TextRole;
    match role {
        TextRole::Title => (page_width / 2.0, page_height * 0.72),
        TextRole::Subtitle => (page_width / 2.0, page_height * 0.72 - 50.0),
        TextRole::Date => (template.margins.left, 72.0),
        TextRole::Author => (page_width - template.margins.right, 72.0),
        TextRole::Custom => (page_width / 2.0, page_height / 2.0),
    }
}

struct RegisteredImage {
    id: XObjectId,
    pixel_width: u32,
    pixel_height: u32,
}

pub struct PdfRenderer<'a> {
    template: &'a Template,
    fonts: &'a ResolvedFonts,
    footer_logo: Option<SharedData>,
}

impl<'a> PdfRenderer<'a> {
    pub fn new(
        template: &'a Template,
        fonts: &'a ResolvedFonts,
        footer_logo: Option<SharedData>,
    ) -> Self {
        Self {
            template,
            fonts,
            footer_logo,
        }
    }

    /// Serialize the document to PDF bytes.
    pub fn render(&self, title: &str, document: ResolvedDocument) -> Result<Vec<u8>, ReportError> {
        let (page_width, page_height) = self.template.page_size.dimensions_pt();
        let mut pdf = PdfDocument::new(title);

        let title_font = register_font(&mut pdf, &self.fonts.title);
        let body_font = register_font(&mut pdf, &self.fonts.body);

        // Register every image up front so op emission never needs &mut pdf.
        let mut images: HashMap<usize, RegisteredImage> = HashMap::new();
        for (index, block) in document.blocks().iter().enumerate() {
            match block {
                Block::Image { data } => {
                    let image = register_image(&mut pdf, data)?;
                    images.insert(index, image);
                }
                Block::Cover(cover) => {
                    if let Some(data) = &cover.image {
                        match register_image(&mut pdf, data) {
                            Ok(image) => {
                                images.insert(index, image);
                            }
                            Err(err) => {
                                log::warn!("cover image could not be decoded, skipping it: {err}");
                            }
                        }
                    }
                }
                _ => {}
            }
        }
        let footer_logo = self.footer_logo.as_ref().and_then(|data| {
            match register_image(&mut pdf, data) {
                Ok(image) => Some(image),
                Err(err) => {
                    log::warn!("footer logo could not be decoded, skipping it: {err}");
                    None
                }
            }
        });

        let mut writer = FlowWriter {
            template: self.template,
            page_width,
            page_height,
            content_x: self.template.margins.left,
            content_width: page_width - self.template.margins.left - self.template.margins.right,
            bottom_limit: page_height - self.template.margins.bottom - self.template.footer_height,
            title_font,
            body_font,
            footer_logo,
            pages: Vec::new(),
            current: PageOps::new(page_height),
            cursor: self.template.margins.top,
            has_content: false,
        };

        for (index, block) in document.blocks().iter().enumerate() {
            match block {
                Block::Cover(cover) => writer.cover_page(cover, images.get(&index)),
                Block::Heading { level, text } => writer.heading(*level, text),
                Block::Paragraph { text } => writer.paragraph(text),
                Block::Table(table) => writer.table(table),
                Block::Image { .. } => {
                    if let Some(image) = images.get(&index) {
                        writer.image(image);
                    }
                }
                Block::PageBreak => writer.break_page(),
            }
        }
        let pages = writer.finish();

        let (width_mm, height_mm): (Mm, Mm) = (Pt(page_width).into(), Pt(page_height).into());
        for ops in pages {
            pdf.pages.push(PdfPage::new(width_mm, height_mm, ops));
        }

        let page_count = pdf.pages.len();
        let mut bytes = Vec::new();
        let mut warnings = Vec::new();
        pdf.save_writer(&mut bytes, &PdfSaveOptions::default(), &mut warnings);
        if bytes.is_empty() {
            return Err(ReportError::Render("produced an empty pdf".to_string()));
        }
        log::info!("serialized {page_count} page pdf ({} bytes)", bytes.len());
        Ok(bytes)
    }
}

fn register_font(pdf: &mut PdfDocument, font: &ResolvedFont) -> FontRef {
    match font {
        ResolvedFont::Builtin(builtin) => FontRef::Builtin(builtin.clone()),
        ResolvedFont::Embedded(parsed) => FontRef::Embedded(pdf.add_font(parsed.as_ref())),
    }
}

fn register_image(pdf: &mut PdfDocument, data: &[u8]) -> Result<RegisteredImage, ReportError> {
    let mut warnings = Vec::new();
    let raw = RawImage::decode_from_bytes(data, &mut warnings)
        .map_err(|err| ReportError::ImageDecode(err.to_string()))?;
    let pixel_width = raw.width as u32;
    let pixel_height = raw.height as u32;
    let id = XObjectId::new();
    pdf.resources.xobjects.map.insert(id.clone(), XObject::Image(raw));
    Ok(RegisteredImage {
        id,
        pixel_width,
        pixel_height,
    })
}

struct FlowWriter<'t> {
    template: &'t Template,
    page_width: f32,
    page_height: f32,
    content_x: f32,
    content_width: f32,
    bottom_limit: f32,
    title_font: FontRef,
    body_font: FontRef,
    footer_logo: Option<RegisteredImage>,
    pages: Vec<Vec<Op>>,
    current: PageOps,
    cursor: f32,
    has_content: bool,
}

impl FlowWriter<'_> {
    fn ensure_room(&mut self, needed: f32) {
        if self.has_content && self.cursor + needed > self.bottom_limit {
            self.break_page();
        }
    }

    fn break_page(&mut self) {
        if !self.has_content {
            return;
        }
        self.draw_footer_logo();
        let page = std::mem::replace(&mut self.current, PageOps::new(self.page_height));
        self.pages.push(page.into_ops());
        self.cursor = self.template.margins.top;
        self.has_content = false;
    }

    fn finish(mut self) -> Vec<Vec<Op>> {
        if self.has_content || self.pages.is_empty() {
            self.draw_footer_logo();
            self.pages.push(self.current.into_ops());
        }
        self.pages
    }

    fn draw_footer_logo(&mut self) {
        let logo = &self.template.footer_logo;
        let Some(image) = &self.footer_logo else {
            return;
        };
        let x = match logo.position {
            LogoPosition::BottomLeft => self.template.margins.left,
            LogoPosition::BottomRight => self.page_width - self.template.margins.right - logo.width,
            LogoPosition::BottomCenter => (self.page_width - logo.width) / 2.0,
        };
        let y = ((self.template.margins.bottom - logo.height) / 2.0).max(6.0);
        self.current.image_pdf(
            image.id.clone(),
            x,
            y,
            logo.width,
            logo.height,
            image.pixel_width,
            image.pixel_height,
        );
    }

    fn heading(&mut self, level: u8, text: &str) {
        let size = if level <= 1 { HEADING_1_SIZE } else { HEADING_2_SIZE };
        self.text_block(text, &self.title_font.clone(), size, self.template.primary_color);
    }

    fn paragraph(&mut self, text: &str) {
        self.text_block(text, &self.body_font.clone(), BODY_SIZE, Color::gray(0x20));
    }

    fn text_block(&mut self, text: &str, font: &FontRef, size: f32, color: Color) {
        let lines = wrap_text(text, self.content_width, size);
        if lines.is_empty() {
            return;
        }
        let line_height = size * LINE_HEIGHT;
        self.ensure_room(line_height);
        for line in lines {
            if self.cursor + line_height > self.bottom_limit {
                self.break_page();
            }
            self.current.text(self.content_x, self.cursor, &line, font, size, color);
            self.cursor += line_height;
            self.has_content = true;
        }
        self.cursor += BLOCK_SPACING;
    }

    fn table(&mut self, table: &TableData) {
        if table.columns.is_empty() {
            return;
        }
        let column_width = self.content_width / table.columns.len() as f32;
        self.ensure_room(TABLE_ROW_HEIGHT * 2.0);
        self.table_header(table, column_width);
        for (row_index, row) in table.rows.iter().enumerate() {
            if self.cursor + TABLE_ROW_HEIGHT > self.bottom_limit {
                self.break_page();
                self.table_header(table, column_width);
            }
            if row_index % 2 == 1 {
                self.current.fill_rect(
                    self.content_x,
                    self.cursor,
                    self.content_width,
                    TABLE_ROW_HEIGHT,
                    Color::gray(0xF2),
                );
            }
            for (col_index, cell) in row.iter().enumerate() {
                let x = self.content_x + column_width * col_index as f32 + TABLE_CELL_PADDING;
                let text = truncate_cell(cell, column_width);
                let y = self.cursor + (TABLE_ROW_HEIGHT - TABLE_FONT_SIZE) / 2.0;
                self.current.text(
                    x,
                    y,
                    &text,
                    &self.body_font.clone(),
                    TABLE_FONT_SIZE,
                    Color::gray(0x20),
                );
            }
            self.cursor += TABLE_ROW_HEIGHT;
            self.has_content = true;
        }
        self.cursor += BLOCK_SPACING;
    }

    fn table_header(&mut self, table: &TableData, column_width: f32) {
        self.current.fill_rect(
            self.content_x,
            self.cursor,
            self.content_width,
            TABLE_ROW_HEIGHT,
            self.template.primary_color,
        );
        for (col_index, column) in table.columns.iter().enumerate() {
            let x = self.content_x + column_width * col_index as f32 + TABLE_CELL_PADDING;
            let text = truncate_cell(column, column_width);
            let y = self.cursor + (TABLE_ROW_HEIGHT - TABLE_FONT_SIZE) / 2.0;
            self.current.text(
                x,
                y,
                &text,
                &self.title_font.clone(),
                TABLE_FONT_SIZE,
                Color::WHITE,
            );
        }
        self.cursor += TABLE_ROW_HEIGHT;
        self.has_content = true;
    }

    fn image(&mut self, image: &RegisteredImage) {
        let scale = fit_scale(
            image.pixel_width,
            image.pixel_height,
            self.content_width,
            MAX_CHART_HEIGHT,
        );
        let width = image.pixel_width as f32 * scale;
        let height = image.pixel_height as f32 * scale;
        self.ensure_room(height + BLOCK_SPACING);
        let x = self.content_x + (self.content_width - width) / 2.0;
        self.current.image(
            image.id.clone(),
            x,
            self.cursor,
            width,
            height,
            image.pixel_width,
            image.pixel_height,
        );
        self.cursor += height + BLOCK_SPACING;
        self.has_content = true;
    }

    /// A cover always occupies its own page and uses bottom-origin
    /// coordinates directly.
    fn cover_page(&mut self, cover: &CoverPage, image: Option<&RegisteredImage>) {
        self.break_page();
        let mut page = PageOps::new(self.page_height);

        if let Some(background) = cover.background {
            page.fill_rect_pdf(0.0, 0.0, self.page_width, self.page_height, background);
        }
        if let Some(image) = image {
            let scale = fit_scale(
                image.pixel_width,
                image.pixel_height,
                self.page_width,
                self.page_height,
            );
            let width = image.pixel_width as f32 * scale;
            let height = image.pixel_height as f32 * scale;
            page.image_pdf(
                image.id.clone(),
                (self.page_width - width) / 2.0,
                (self.page_height - height) / 2.0,
                width,
                height,
                image.pixel_width,
                image.pixel_height,
            );
        }
        for text in &cover.texts {
            let (anchor_x, anchor_y) = text.position.unwrap_or_else(|| {
                cover_anchor(text.role, self.page_width, self.page_height, self.template)
            });
            let width = approx_text_width(&text.content, text.font_size);
            let x = match text.align {
                TextAlign::Left => anchor_x,
                TextAlign::Center => anchor_x - width / 2.0,
                TextAlign::Right => anchor_x - width,
            };
            let font = self.cover_font(text);
            page.text_pdf(x, anchor_y, &text.content, &font, text.font_size, text.color);
        }
        self.pages.push(page.into_ops());
    }

    fn cover_font(&self, text: &qrydoc_doc::PlacedText) -> FontRef {
        if let Some(family) = &text.font_family {
            return FontRef::Builtin(builtin_for(family));
        }
        match text.role {
            qrydoc_doc::TextRole::Title | qrydoc_doc::TextRole::Subtitle => self.title_font.clone(),
            _ => self.body_font.clone(),
        }
    }
}

fn truncate_cell(text: &str, column_width: f32) -> String {
    let budget = (column_width - 2.0 * TABLE_CELL_PADDING).max(0.0);
    let max_chars = (budget / (TABLE_FONT_SIZE * 0.5)) as usize;
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    truncated.push('…');
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;
    use qrydoc_doc::TextRole;

    #[test]
    fn fit_scale_respects_both_limits_and_never_upscales() {
        // Wide chart constrained by height.
        assert_eq!(fit_scale(2000, 1000, 500.0, 280.0), 0.25);
        // Constrained by width.
        assert_eq!(fit_scale(1000, 100, 500.0, 280.0), 0.5);
        // Small image stays at native size.
        assert_eq!(fit_scale(100, 50, 500.0, 280.0), 1.0);
        // Degenerate dimensions do not divide by zero.
        assert_eq!(fit_scale(0, 50, 500.0, 280.0), 1.0);
    }

    #[test]
    fn wrap_respects_width_budget() {
        let lines = wrap_text("alpha beta gamma delta epsilon", 60.0, 10.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(approx_text_width(line, 10.0) <= 60.0 || !line.contains(' '));
        }
    }

    #[test]
    fn wrap_preserves_source_line_breaks_and_trims() {
        let lines = wrap_text("  first line\n\n  second line  ", 500.0, 10.0);
        assert_eq!(lines, ["first line", "", "second line"]);
    }

    #[test]
    fn wrap_of_blank_text_is_empty() {
        assert!(wrap_text("   \n  ", 500.0, 10.0).is_empty());
    }

    #[test]
    fn cover_anchors_follow_roles() {
        let template = Template::default();
        let (page_width, page_height) = template.page_size.dimensions_pt();

        let (x, y) = cover_anchor(TextRole::Title, page_width, page_height, &template);
        assert_eq!(x, page_width / 2.0);
        assert!(y > page_height / 2.0);

        let (x, y) = cover_anchor(TextRole::Date, page_width, page_height, &template);
        assert_eq!((x, y), (template.margins.left, 72.0));

        let (x, _) = cover_anchor(TextRole::Author, page_width, page_height, &template);
        assert_eq!(x, page_width - template.margins.right);
    }

    #[test]
    fn long_cells_are_truncated_with_ellipsis() {
        let long = "a very long cell value that cannot possibly fit";
        let truncated = truncate_cell(long, 60.0);
        assert!(truncated.chars().count() < long.chars().count());
        assert!(truncated.ends_with('…'));
        assert_eq!(truncate_cell("short", 200.0), "short");
    }
}
