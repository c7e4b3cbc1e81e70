//! Resolved document model.
//!
//! This crate defines the ordered list of typed content blocks the section
//! pipeline produces and the serializer consumes. A [`ResolvedDocument`] is
//! ephemeral: it is built during one assembly pass and consumed exactly once.

use qrydoc_types::{Color, TextAlign};
use std::sync::Arc;

/// A reference-counted container for shared, immutable data like images.
pub type SharedData = Arc<Vec<u8>>;

/// A block-level element of the resolved document, in render order.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// A dedicated full-page cover. Always occupies its own page.
    Cover(CoverPage),
    /// A section heading.
    Heading { level: u8, text: String },
    /// A run of body text, wrapped to the content width at render time.
    Paragraph { text: String },
    /// A tabular payload rendered as a grid with a header row.
    Table(TableData),
    /// A raster image (PNG bytes), scaled to fit the content box.
    Image { data: SharedData },
    /// A hard page break.
    PageBreak,
}

impl Block {
    /// A string identifier for the block type, used in log messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Cover(_) => "cover",
            Block::Heading { .. } => "heading",
            Block::Paragraph { .. } => "paragraph",
            Block::Table(_) => "table",
            Block::Image { .. } => "image",
            Block::PageBreak => "page-break",
        }
    }
}

/// The role a placed text plays on the cover. The renderer derives default
/// anchor positions, sizes and colors from the role when the cover model
/// left them unspecified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    Title,
    Subtitle,
    Date,
    Author,
    Custom,
}

/// A fully resolved cover text element. `position` is in PDF points with a
/// bottom-left origin; `None` means the renderer applies the role's anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    pub role: TextRole,
    pub content: String,
    pub position: Option<(f32, f32)>,
    pub font_size: f32,
    pub color: Color,
    /// Font family override. `None` means the renderer picks the template
    /// font matching the role.
    pub font_family: Option<String>,
    pub align: TextAlign,
}

/// A full-page cover: background fill, optional page-filling image, and
/// placed texts layered above both in list order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoverPage {
    pub background: Option<Color>,
    pub image: Option<SharedData>,
    pub texts: Vec<PlacedText>,
}

/// Tabular content lowered to strings, ready for grid rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableData {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// The ordered sequence of blocks produced by one assembly pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedDocument {
    blocks: Vec<Block>,
}

impl ResolvedDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_preserves_push_order() {
        let mut doc = ResolvedDocument::new();
        doc.push(Block::Heading { level: 1, text: "Report".into() });
        doc.push(Block::Paragraph { text: "Body".into() });
        doc.push(Block::PageBreak);

        let kinds: Vec<_> = doc.blocks().iter().map(Block::kind).collect();
        assert_eq!(kinds, ["heading", "paragraph", "page-break"]);
    }

    #[test]
    fn empty_document() {
        let doc = ResolvedDocument::new();
        assert!(doc.is_empty());
        assert_eq!(doc.len(), 0);
    }
}
