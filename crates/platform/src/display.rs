//! Text measurement capability.
//!
//! The font rasterizer is external; the scroll animator only needs to know
//! how wide a string renders so it can compute overflow against a clip width.

use embedded_graphics::mono_font::MonoFont;

/// Reports the rendered pixel width of a string.
pub trait TextMeasure {
    /// Width in pixels of `text` drawn on one line.
    fn text_width(&self, text: &str) -> u32;
}

/// Fixed per-character advance.
///
/// The stock device font is approximated as 8 px per character, which is
/// what the browser layout was tuned against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedAdvance(pub u32);

impl FixedAdvance {
    /// Advance of the device's narrow 14 pt font.
    pub const DEVICE_FONT: Self = Self(8);
}

impl TextMeasure for FixedAdvance {
    fn text_width(&self, text: &str) -> u32 {
        let chars = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
        chars.saturating_mul(self.0)
    }
}

impl TextMeasure for MonoFont<'_> {
    fn text_width(&self, text: &str) -> u32 {
        let chars = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
        if chars == 0 {
            return 0;
        }
        let glyphs = chars.saturating_mul(self.character_size.width);
        let spacing = chars
            .saturating_sub(1)
            .saturating_mul(self.character_spacing);
        glyphs.saturating_add(spacing)
    }
}
