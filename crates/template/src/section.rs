//! Section configuration: which logical regions a report contains, in
//! which order, and whether each is enabled.

use serde::{Deserialize, Serialize};

/// The closed set of section types. The assembler matches exhaustively on
/// this enum, so adding a section type is a compile-time-checked change.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Cover,
    Summary,
    Data,
    Chart,
    Custom,
}

impl SectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Cover => "cover",
            SectionKind::Summary => "summary",
            SectionKind::Data => "data",
            SectionKind::Chart => "chart",
            SectionKind::Custom => "custom",
        }
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The render order used when a template configures no sections at all.
pub const DEFAULT_SECTION_ORDER: [SectionKind; 3] =
    [SectionKind::Summary, SectionKind::Chart, SectionKind::Data];

/// One entry of a template's ordered section list.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SectionConfig {
    pub kind: SectionKind,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Required for `SectionKind::Custom`, ignored for every other kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_content: Option<String>,
}

fn default_enabled() -> bool {
    true
}

impl SectionConfig {
    pub fn new(kind: SectionKind) -> Self {
        Self { kind, enabled: true, custom_content: None }
    }

    /// A custom section carrying verbatim text content.
    pub fn custom(content: impl Into<String>) -> Self {
        Self {
            kind: SectionKind::Custom,
            enabled: true,
            custom_content: Some(content.into()),
        }
    }

    /// A section that is present in the list but skipped during assembly.
    pub fn disabled(kind: SectionKind) -> Self {
        Self { kind, enabled: false, custom_content: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sections_are_enabled() {
        assert!(SectionConfig::new(SectionKind::Data).enabled);
        assert!(!SectionConfig::disabled(SectionKind::Data).enabled);
    }

    #[test]
    fn enabled_defaults_to_true_when_deserialized() {
        let config: SectionConfig = serde_json::from_str(r#"{"kind": "summary"}"#).unwrap();
        assert_eq!(config.kind, SectionKind::Summary);
        assert!(config.enabled);
    }

    #[test]
    fn custom_section_carries_content() {
        let config = SectionConfig::custom("Closing notes");
        assert_eq!(config.kind, SectionKind::Custom);
        assert_eq!(config.custom_content.as_deref(), Some("Closing notes"));
    }
}
