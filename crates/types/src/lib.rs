pub mod color;
pub mod geometry;
pub mod text;

pub use color::Color;
pub use geometry::{Margins, PageSize};
pub use text::TextAlign;
