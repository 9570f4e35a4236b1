//! Text measurement
//!
//! Layout never touches fonts directly: both passes ask a [`TextMetrics`]
//! provider for the width and vertical extent of a string. A provider must be
//! deterministic for identical `(text, font)` pairs within one layout call,
//! otherwise sizing and placement disagree.

use unicode_width::UnicodeWidthStr;

use super::{FontSpec, HierarchyError, Result};

/// Measured extent of a glyph run
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextExtent {
    pub width: f64,
    pub ascent: f64,
    pub descent: f64,
}

impl TextExtent {
    /// Height of one line of text
    pub fn line_height(&self) -> f64 {
        self.ascent + self.descent
    }
}

/// Measures text for a font
pub trait TextMetrics {
    fn measure(&self, text: &str, font: &FontSpec) -> Result<TextExtent>;
}

impl<T: TextMetrics + ?Sized> TextMetrics for &T {
    fn measure(&self, text: &str, font: &FontSpec) -> Result<TextExtent> {
        (**self).measure(text, font)
    }
}

/// Monospace approximation: every display column advances by a fixed
/// fraction of the font size
///
/// East Asian wide characters count as two columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    advance: f64,
    ascent: f64,
    descent: f64,
}

impl MonospaceMetrics {
    pub fn new() -> Self {
        Self::with_ratios(0.6, 0.8, 0.2)
    }

    /// Ratios are multiplied by the font size
    pub fn with_ratios(advance: f64, ascent: f64, descent: f64) -> Self {
        Self {
            advance,
            ascent,
            descent,
        }
    }
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMetrics for MonospaceMetrics {
    fn measure(&self, text: &str, font: &FontSpec) -> Result<TextExtent> {
        if !font.size.is_finite() || font.size <= 0.0 {
            return Err(HierarchyError::metrics_error(
                text,
                format!("unusable font size {}", font.size),
            ));
        }
        let columns = UnicodeWidthStr::width(text) as f64;
        Ok(TextExtent {
            width: columns * self.advance * font.size,
            ascent: self.ascent * font.size,
            descent: self.descent * font.size,
        })
    }
}
