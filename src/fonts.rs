//! Font resolution.
//!
//! A template names a title and a body font family, and may point either at
//! a font file loaded through the resource provider. Custom fonts that fail
//! to load or parse degrade to the built-in family with a logged warning;
//! font problems never fail a build.

use printpdf::BuiltinFont;
use printpdf::font::ParsedFont;
use qrydoc_template::Template;
use qrydoc_traits::ResourceProvider;

/// A font ready for registration with the PDF document: either one of the
/// base-14 families or a parsed embedded font.
pub enum ResolvedFont {
    Builtin(BuiltinFont),
    Embedded(Box<ParsedFont>),
}

/// The title and body fonts of one build.
pub struct ResolvedFonts {
    pub title: ResolvedFont,
    pub body: ResolvedFont,
}

/// Resolve the template's fonts against the resource provider.
pub fn resolve_fonts(template: &Template, resources: &dyn ResourceProvider) -> ResolvedFonts {
    ResolvedFonts {
        title: resolve_one(
            template.custom_title_font_path.as_deref(),
            &template.title_font,
            resources,
        ),
        body: resolve_one(
            template.custom_body_font_path.as_deref(),
            &template.body_font,
            resources,
        ),
    }
}

fn resolve_one(
    custom_path: Option<&str>,
    family: &str,
    resources: &dyn ResourceProvider,
) -> ResolvedFont {
    if let Some(path) = custom_path {
        match resources.load(path) {
            Ok(bytes) => {
                let mut warnings = Vec::new();
                if let Some(parsed) = ParsedFont::from_bytes(&bytes, 0, &mut warnings) {
                    log::debug!("embedded custom font '{path}'");
                    return ResolvedFont::Embedded(Box::new(parsed));
                }
                log::warn!("custom font '{path}' is not a parseable font file, using {family}");
            }
            Err(err) => {
                log::warn!("custom font '{path}' could not be loaded, using {family}: {err}");
            }
        }
    }
    ResolvedFont::Builtin(builtin_for(family))
}

/// Map a font family name to its base-14 equivalent. Unknown families fall
/// back to Helvetica with a logged warning.
pub fn builtin_for(family: &str) -> BuiltinFont {
    match family {
        "Helvetica" => BuiltinFont::Helvetica,
        "Helvetica-Bold" => BuiltinFont::HelveticaBold,
        "Helvetica-Oblique" => BuiltinFont::HelveticaOblique,
        "Helvetica-BoldOblique" => BuiltinFont::HelveticaBoldOblique,
        "Times" | "Times-Roman" => BuiltinFont::TimesRoman,
        "Times-Bold" => BuiltinFont::TimesBold,
        "Times-Italic" => BuiltinFont::TimesItalic,
        "Times-BoldItalic" => BuiltinFont::TimesBoldItalic,
        "Courier" => BuiltinFont::Courier,
        "Courier-Bold" => BuiltinFont::CourierBold,
        "Courier-Oblique" => BuiltinFont::CourierOblique,
        "Symbol" => BuiltinFont::Symbol,
        other => {
            log::warn!("unknown font family '{other}', using Helvetica");
            BuiltinFont::Helvetica
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qrydoc_template::TemplateBuilder;
    use qrydoc_traits::InMemoryResourceProvider;

    #[test]
    fn default_template_resolves_to_builtin_fonts() {
        let template = Template::default();
        let provider = InMemoryResourceProvider::new();
        let fonts = resolve_fonts(&template, &provider);
        assert!(matches!(
            fonts.title,
            ResolvedFont::Builtin(BuiltinFont::HelveticaBold)
        ));
        assert!(matches!(
            fonts.body,
            ResolvedFont::Builtin(BuiltinFont::Helvetica)
        ));
    }

    #[test]
    fn missing_custom_font_falls_back_to_family() {
        let template = TemplateBuilder::new()
            .with_fonts("Times-Bold", "Times-Roman")
            .with_custom_fonts(Some("fonts/absent.ttf".into()), None)
            .build();
        let provider = InMemoryResourceProvider::new();
        let fonts = resolve_fonts(&template, &provider);
        assert!(matches!(
            fonts.title,
            ResolvedFont::Builtin(BuiltinFont::TimesBold)
        ));
    }

    #[test]
    fn unparseable_font_bytes_fall_back() {
        let provider = InMemoryResourceProvider::new();
        provider.add("fonts/bad.ttf", b"definitely not a font".to_vec());
        let template = TemplateBuilder::new()
            .with_custom_fonts(None, Some("fonts/bad.ttf".into()))
            .build();
        let fonts = resolve_fonts(&template, &provider);
        assert!(matches!(
            fonts.body,
            ResolvedFont::Builtin(BuiltinFont::Helvetica)
        ));
    }

    #[test]
    fn unknown_family_maps_to_helvetica() {
        assert!(matches!(
            builtin_for("Comic Sans MS"),
            BuiltinFont::Helvetica
        ));
        assert!(matches!(builtin_for("Times"), BuiltinFont::TimesRoman));
    }
}
