//! Low-level PDF op emission for one page.
//!
//! [`PageOps`] accumulates `printpdf` content-stream operations and hides
//! the two awkward parts of that stream: text sections must be opened and
//! closed around text ops, and the coordinate system has a bottom-left
//! origin while layout runs top-down. Methods come in pairs: the plain form
//! takes a top-origin `y`, the `_pdf` form takes bottom-origin coordinates
//! directly (cover layouts are specified that way).

use printpdf::graphics::{LinePoint, PaintMode, Point, Polygon, PolygonRing, WindingOrder};
use printpdf::matrix::TextMatrix;
use printpdf::ops::Op;
use printpdf::text::TextItem;
use printpdf::xobject::XObjectTransform;
use printpdf::{BuiltinFont, FontId, Pt, Rgb, XObjectId};
use qrydoc_types::Color;

/// A font usable in ops: a base-14 family or a document-registered font.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FontRef {
    Builtin(BuiltinFont),
    Embedded(FontId),
}

pub(crate) struct PageOps {
    page_height: f32,
    ops: Vec<Op>,
    text_section_open: bool,
    current_fill: Option<printpdf::color::Color>,
    current_font: Option<(FontRef, f32)>,
}

impl PageOps {
    pub(crate) fn new(page_height: f32) -> Self {
        Self {
            page_height,
            ops: Vec::new(),
            text_section_open: false,
            current_fill: None,
            current_font: None,
        }
    }

    pub(crate) fn into_ops(mut self) -> Vec<Op> {
        self.close_text_section();
        self.ops
    }

    /// Draw a single line of text. `y` is the top edge of the line in
    /// top-origin coordinates; the baseline sits slightly below it.
    pub(crate) fn text(
        &mut self,
        x: f32,
        y: f32,
        content: &str,
        font: &FontRef,
        size: f32,
        color: Color,
    ) {
        let baseline_y = y + size * 0.8;
        self.text_pdf(x, self.page_height - baseline_y, content, font, size, color);
    }

    /// Draw a single line of text with the baseline at a bottom-origin `y`.
    pub(crate) fn text_pdf(
        &mut self,
        x: f32,
        pdf_y: f32,
        content: &str,
        font: &FontRef,
        size: f32,
        color: Color,
    ) {
        if content.is_empty() {
            return;
        }
        self.open_text_section();
        self.set_fill_color(color);
        self.set_font(font, size);
        self.ops.push(Op::SetTextMatrix {
            matrix: TextMatrix::Translate(Pt(x), Pt(pdf_y)),
        });
        let items = vec![TextItem::Text(content.to_string())];
        match font {
            FontRef::Builtin(builtin) => self.ops.push(Op::WriteTextBuiltinFont {
                items,
                font: builtin.clone(),
            }),
            FontRef::Embedded(id) => self.ops.push(Op::WriteText {
                items,
                font: id.clone(),
            }),
        }
    }

    /// Fill a rectangle whose top edge is at top-origin `y`.
    pub(crate) fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.fill_rect_pdf(x, self.page_height - (y + height), width, height, color);
    }

    /// Fill a rectangle whose bottom edge is at bottom-origin `y`.
    pub(crate) fn fill_rect_pdf(&mut self, x: f32, pdf_y: f32, width: f32, height: f32, color: Color) {
        self.close_text_section();
        let polygon = Polygon {
            rings: vec![PolygonRing {
                points: vec![
                    LinePoint { p: Point { x: Pt(x), y: Pt(pdf_y) }, bezier: false },
                    LinePoint { p: Point { x: Pt(x + width), y: Pt(pdf_y) }, bezier: false },
                    LinePoint { p: Point { x: Pt(x + width), y: Pt(pdf_y + height) }, bezier: false },
                    LinePoint { p: Point { x: Pt(x), y: Pt(pdf_y + height) }, bezier: false },
                ],
            }],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::EvenOdd,
        };
        self.set_fill_color(color);
        self.ops.push(Op::DrawPolygon { polygon });
    }

    /// Place a registered image xobject. `y` is the top edge in top-origin
    /// coordinates; `width`/`height` are the target size in points.
    pub(crate) fn image(
        &mut self,
        id: XObjectId,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        pixel_width: u32,
        pixel_height: u32,
    ) {
        self.image_pdf(
            id,
            x,
            self.page_height - (y + height),
            width,
            height,
            pixel_width,
            pixel_height,
        );
    }

    pub(crate) fn image_pdf(
        &mut self,
        id: XObjectId,
        x: f32,
        pdf_y: f32,
        width: f32,
        height: f32,
        pixel_width: u32,
        pixel_height: u32,
    ) {
        self.close_text_section();
        let transform = XObjectTransform {
            translate_x: Some(Pt(x)),
            translate_y: Some(Pt(pdf_y)),
            scale_x: Some(width / pixel_width as f32),
            scale_y: Some(height / pixel_height as f32),
            rotate: None,
            dpi: Some(72.0),
        };
        self.ops.push(Op::UseXobject { id, transform });
    }

    fn open_text_section(&mut self) {
        if !self.text_section_open {
            self.ops.push(Op::StartTextSection);
            self.text_section_open = true;
        }
    }

    fn close_text_section(&mut self) {
        if self.text_section_open {
            self.ops.push(Op::EndTextSection);
            self.text_section_open = false;
        }
    }

    fn set_fill_color(&mut self, color: Color) {
        let (r, g, b) = color.to_rgb_f32();
        let fill = printpdf::color::Color::Rgb(Rgb::new(r, g, b, None));
        if self.current_fill.as_ref() != Some(&fill) {
            self.ops.push(Op::SetFillColor { col: fill.clone() });
            self.current_fill = Some(fill);
        }
    }

    fn set_font(&mut self, font: &FontRef, size: f32) {
        if self.current_font.as_ref() == Some(&(font.clone(), size)) {
            return;
        }
        match font {
            FontRef::Builtin(builtin) => self.ops.push(Op::SetFontSizeBuiltinFont {
                size: Pt(size),
                font: builtin.clone(),
            }),
            FontRef::Embedded(id) => self.ops.push(Op::SetFontSize {
                size: Pt(size),
                font: id.clone(),
            }),
        }
        self.current_font = Some((font.clone(), size));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_sections_are_balanced() {
        let mut page = PageOps::new(842.0);
        let font = FontRef::Builtin(BuiltinFont::Helvetica);
        page.text(72.0, 72.0, "one", &font, 11.0, Color::BLACK);
        page.fill_rect(72.0, 100.0, 100.0, 18.0, Color::gray(0xF2));
        page.text(72.0, 130.0, "two", &font, 11.0, Color::BLACK);

        let ops = page.into_ops();
        let starts = ops.iter().filter(|op| matches!(op, Op::StartTextSection)).count();
        let ends = ops.iter().filter(|op| matches!(op, Op::EndTextSection)).count();
        assert_eq!(starts, 2);
        assert_eq!(ends, 2);
    }

    #[test]
    fn repeated_font_and_color_are_not_re_emitted() {
        let mut page = PageOps::new(842.0);
        let font = FontRef::Builtin(BuiltinFont::Helvetica);
        page.text(72.0, 72.0, "a", &font, 11.0, Color::BLACK);
        page.text(72.0, 90.0, "b", &font, 11.0, Color::BLACK);

        let ops = page.into_ops();
        let font_sets = ops
            .iter()
            .filter(|op| matches!(op, Op::SetFontSizeBuiltinFont { .. }))
            .count();
        let color_sets = ops.iter().filter(|op| matches!(op, Op::SetFillColor { .. })).count();
        assert_eq!(font_sets, 1);
        assert_eq!(color_sets, 1);
    }

    #[test]
    fn empty_text_emits_nothing() {
        let mut page = PageOps::new(842.0);
        let font = FontRef::Builtin(BuiltinFont::Helvetica);
        page.text(72.0, 72.0, "", &font, 11.0, Color::BLACK);
        assert!(page.into_ops().is_empty());
    }
}
