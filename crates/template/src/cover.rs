//! Cover page model and its fluent builder.
//!
//! A cover is a single full-page layout of positioned text elements over an
//! optional background color and image. Coordinates are PDF points with a
//! bottom-left origin; omitted coordinates fall back to per-role anchors
//! applied by the renderer (title centered near the top, subtitle below it,
//! date bottom-left, author bottom-right).

use chrono::NaiveDate;
use qrydoc_types::{Color, TextAlign};
use serde::{Deserialize, Serialize};

/// Default strftime format for date values without an explicit format.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// One text element of the cover. Unset styling fields are resolved
/// against per-role defaults during assembly.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct CoverText {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<(f32, f32)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<TextAlign>,
}

impl CoverText {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            position: None,
            font_size: None,
            color: None,
            font_family: None,
            alignment: None,
        }
    }

    /// Explicit placement, overriding the role's default anchor.
    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.position = Some((x, y));
        self
    }

    pub fn size(mut self, font_size: f32) -> Self {
        self.font_size = Some(font_size);
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn family(mut self, font_family: impl Into<String>) -> Self {
        self.font_family = Some(font_family.into());
        self
    }

    pub fn align(mut self, alignment: TextAlign) -> Self {
        self.alignment = Some(alignment);
        self
    }
}

impl From<&str> for CoverText {
    fn from(content: &str) -> Self {
        CoverText::new(content)
    }
}

impl From<String> for CoverText {
    fn from(content: String) -> Self {
        CoverText::new(content)
    }
}

/// The cover date: either a pre-formatted string used verbatim, or a date
/// value rendered with the cover's format (or [`DEFAULT_DATE_FORMAT`]).
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum CoverDate {
    Text(String),
    Date(NaiveDate),
}

impl From<&str> for CoverDate {
    fn from(s: &str) -> Self {
        CoverDate::Text(s.to_string())
    }
}

impl From<String> for CoverDate {
    fn from(s: String) -> Self {
        CoverDate::Text(s)
    }
}

impl From<NaiveDate> for CoverDate {
    fn from(date: NaiveDate) -> Self {
        CoverDate::Date(date)
    }
}

/// The immutable cover model produced by [`CoverBuilder`].
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct Cover {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<CoverText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<CoverText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<CoverDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_style: Option<CoverText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<CoverText>,
    /// Retained and rendered in call order, layered topmost.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_texts: Vec<CoverText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image_path: Option<String>,
}

impl Cover {
    pub fn builder() -> CoverBuilder {
        CoverBuilder::new()
    }

    /// The date rendered to its final string form, if a date was set.
    pub fn formatted_date(&self) -> Option<String> {
        match &self.date {
            Some(CoverDate::Text(text)) => Some(text.clone()),
            Some(CoverDate::Date(date)) => {
                let format = self.date_format.as_deref().unwrap_or(DEFAULT_DATE_FORMAT);
                Some(date.format(format).to_string())
            }
            None => None,
        }
    }

    /// True when the cover contributes nothing visible.
    pub fn is_blank(&self) -> bool {
        self.title.is_none()
            && self.subtitle.is_none()
            && self.date.is_none()
            && self.author.is_none()
            && self.custom_texts.is_empty()
            && self.background_color.is_none()
            && self.cover_image_path.is_none()
    }
}

/// Fluent, consuming builder over [`Cover`].
#[derive(Debug, Clone, Default)]
pub struct CoverBuilder {
    cover: Cover,
}

impl CoverBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_title(mut self, title: impl Into<CoverText>) -> Self {
        self.cover.title = Some(title.into());
        self
    }

    pub fn set_subtitle(mut self, subtitle: impl Into<CoverText>) -> Self {
        self.cover.subtitle = Some(subtitle.into());
        self
    }

    /// Accepts a date value or a pre-formatted string.
    pub fn set_date(mut self, date: impl Into<CoverDate>) -> Self {
        self.cover.date = Some(date.into());
        self
    }

    /// A date value rendered with an explicit strftime format.
    pub fn set_date_with_format(mut self, date: NaiveDate, format: impl Into<String>) -> Self {
        self.cover.date = Some(CoverDate::Date(date));
        self.cover.date_format = Some(format.into());
        self
    }

    /// Styling for the date element (position, size, color, alignment);
    /// the content comes from `set_date`.
    pub fn set_date_style(mut self, style: CoverText) -> Self {
        self.cover.date_style = Some(style);
        self
    }

    pub fn set_author(mut self, author: impl Into<CoverText>) -> Self {
        self.cover.author = Some(author.into());
        self
    }

    /// May be called any number of times; texts are kept in call order.
    pub fn add_custom_text(mut self, text: impl Into<CoverText>) -> Self {
        self.cover.custom_texts.push(text.into());
        self
    }

    pub fn set_background_color(mut self, color: Color) -> Self {
        self.cover.background_color = Some(color);
        self
    }

    pub fn set_cover_image(mut self, path: impl Into<String>) -> Self {
        self.cover.cover_image_path = Some(path.into());
        self
    }

    pub fn build(self) -> Cover {
        self.cover
    }
}

impl From<CoverBuilder> for Cover {
    fn from(builder: CoverBuilder) -> Self {
        builder.build()
    }
}
