use std::sync::Arc;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{WaveError, WaveResult};

/// Shapes single-line labels with one user-supplied font.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgba8>,
    font_bytes: Arc<Vec<u8>>,
    family_name: String,
}

impl std::fmt::Debug for TextLayoutEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextLayoutEngine")
            .field("font_bytes_len", &self.font_bytes.len())
            .field("family_name", &self.family_name)
            .finish()
    }
}

impl TextLayoutEngine {
    /// Register `font_bytes` (TTF/OTF) and remember its primary family.
    pub fn new(font_bytes: Arc<Vec<u8>>) -> WaveResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.as_ref().clone()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            WaveError::validation("no font families registered from font bytes")
        })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| WaveError::validation("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            font_bytes,
            family_name,
        })
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    pub fn font_bytes(&self) -> &Arc<Vec<u8>> {
        &self.font_bytes
    }

    pub fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        color: Rgba8,
    ) -> WaveResult<parley::Layout<Rgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(WaveError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(color));

        let mut layout: parley::Layout<Rgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}
