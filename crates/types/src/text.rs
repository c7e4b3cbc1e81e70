//! Text primitives shared by cover layout and the renderer.

use serde::{Deserialize, Serialize};

/// Horizontal alignment of a positioned text element. The anchor point is
/// the element's x coordinate: `Center` and `Right` grow leftwards from it.
#[derive(Deserialize, Serialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}
