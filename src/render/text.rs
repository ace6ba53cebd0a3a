use crate::foundation::error::{RotaskError, RotaskResult};

/// RGBA8 brush color used by Parley text layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

/// Candidate system font files, first readable wins. Overridable via
/// `ROTASK_FONT`.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Terminal entry of the fallback chain, compiled into the binary so font
/// resolution can never come up empty. License: assets/DejaVuSans-LICENSE.txt.
static EMBEDDED_FONT: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");
const EMBEDDED_FAMILY: &str = "DejaVu Sans";

/// A laid-out text run ready for glyph painting.
pub(crate) struct LaidOutText {
    pub(crate) layout: parley::Layout<TextBrushRgba8>,
    pub(crate) font: vello_cpu::peniko::FontData,
    /// Tight width of the laid-out text in pixels.
    pub(crate) width: f32,
    /// Line height of the laid-out text in pixels.
    pub(crate) height: f32,
}

/// Stateful helper for building Parley text layouts over a resolved font.
///
/// Font resolution walks a fallback chain of well-known font file paths and
/// terminates in an embedded face, so a font is always available and text
/// overlays are always drawn.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    resolved: ResolvedFont,
}

struct ResolvedFont {
    family_name: String,
    font: vello_cpu::peniko::FontData,
}

impl TextLayoutEngine {
    pub(crate) fn new() -> Self {
        Self::with_candidates(FONT_CANDIDATES)
    }

    fn with_candidates(candidates: &[&str]) -> Self {
        let mut font_ctx = parley::FontContext::default();
        let resolved = resolve_font(&mut font_ctx, candidates);
        Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            resolved,
        }
    }

    /// Shape and lay out a single-line label.
    pub(crate) fn layout_plain(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> RotaskResult<LaidOutText> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(RotaskError::validation(
                "text size_px must be finite and > 0",
            ));
        }
        let family_name = self.resolved.family_name.clone();
        let font = self.resolved.font.clone();

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);

        let width = layout.width();
        let height = layout.height();
        Ok(LaidOutText {
            layout,
            font,
            width,
            height,
        })
    }
}

fn resolve_font(font_ctx: &mut parley::FontContext, candidates: &[&str]) -> ResolvedFont {
    let env_candidate = std::env::var("ROTASK_FONT").ok();
    let candidates = env_candidate
        .iter()
        .map(String::as_str)
        .chain(candidates.iter().copied());

    for path in candidates {
        let Ok(bytes) = std::fs::read(path) else {
            continue;
        };
        match register_font_bytes(font_ctx, bytes) {
            Some(resolved) => {
                tracing::debug!(path, family = %resolved.family_name, "resolved overlay font");
                return resolved;
            }
            None => {
                tracing::debug!(path, "font file registered no families, trying next");
            }
        }
    }

    // Embedded face ships with the binary; registration cannot realistically
    // fail, but the hand-built fallback keeps this path panic-free.
    register_font_bytes(font_ctx, EMBEDDED_FONT.to_vec()).unwrap_or_else(|| ResolvedFont {
        family_name: EMBEDDED_FAMILY.to_string(),
        font: vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(EMBEDDED_FONT.to_vec()),
            0,
        ),
    })
}

fn register_font_bytes(
    font_ctx: &mut parley::FontContext,
    bytes: Vec<u8>,
) -> Option<ResolvedFont> {
    let families = font_ctx
        .collection
        .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
    let (family_id, _) = families.first()?;
    let family_name = font_ctx.collection.family_name(*family_id)?.to_string();

    let font = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), 0);
    Some(ResolvedFont { family_name, font })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_size_is_rejected() {
        let mut engine = TextLayoutEngine::new();
        assert!(
            engine
                .layout_plain("45\u{b0}", 0.0, TextBrushRgba8::default())
                .is_err()
        );
    }

    #[test]
    fn layout_succeeds_whatever_the_host_offers() {
        let mut engine = TextLayoutEngine::new();
        let laid = engine
            .layout_plain("Clockwise Rotation 45\u{b0}", 24.0, TextBrushRgba8::default())
            .unwrap();
        assert!(laid.width > 0.0);
        assert!(laid.height > 0.0);
    }

    #[test]
    fn embedded_face_resolves_without_any_font_files() {
        // Empty candidate chain simulates a host with none of the well-known
        // font paths; the embedded face must still lay out real glyphs.
        let mut engine = TextLayoutEngine::with_candidates(&[]);
        if std::env::var_os("ROTASK_FONT").is_none() {
            assert_eq!(engine.resolved.family_name, EMBEDDED_FAMILY);
        }
        let laid = engine
            .layout_plain("180\u{b0}", 14.0, TextBrushRgba8::default())
            .unwrap();
        assert!(laid.width > 0.0);
        assert!(laid.height > 0.0);
    }
}
