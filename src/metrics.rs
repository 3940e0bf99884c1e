//! Font metrics used by reflow and cursor placement.
//!
//! Glyph measurement belongs to whatever renders the text. The core only
//! needs two answers from it, captured by [`Metrics`]. [`MonospaceMetrics`]
//! answers them from Unicode display widths, which is exact for terminal
//! hosts and a close stand-in for monospace GUI fonts.

use crate::config::FontSpec;
use crate::unicode::{WidthMethod, display_width_with_method};

/// Metrics provider.
///
/// Implementations must be deterministic for a given font and text within
/// one reflow pass.
pub trait Metrics {
    /// On-screen width of `text` rendered in `font`.
    fn measure_width(&self, text: &str, font: &FontSpec) -> f64;

    /// Height of one line of text rendered in `font`.
    fn line_height(&self, font: &FontSpec) -> f64;
}

impl<M: Metrics + ?Sized> Metrics for &M {
    fn measure_width(&self, text: &str, font: &FontSpec) -> f64 {
        (**self).measure_width(text, font)
    }

    fn line_height(&self, font: &FontSpec) -> f64 {
        (**self).line_height(font)
    }
}

impl<M: Metrics + ?Sized> Metrics for Box<M> {
    fn measure_width(&self, text: &str, font: &FontSpec) -> f64 {
        (**self).measure_width(text, font)
    }

    fn line_height(&self, font: &FontSpec) -> f64 {
        (**self).line_height(font)
    }
}

/// Column-based metrics: every display column is `advance * size` wide.
///
/// Widths and heights are rounded up to whole device units so positions
/// stay on integer coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMetrics {
    /// Column advance as a fraction of the font size.
    pub advance: f64,
    /// Line height as a fraction of the font size.
    pub leading: f64,
    /// How ambiguous-width characters are counted.
    pub width_method: WidthMethod,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self {
            advance: 0.6,
            leading: 1.25,
            width_method: WidthMethod::WcWidth,
        }
    }
}

impl MonospaceMetrics {
    /// Create metrics with explicit advance and leading ratios.
    #[must_use]
    pub fn new(advance: f64, leading: f64) -> Self {
        Self {
            advance,
            leading,
            width_method: WidthMethod::WcWidth,
        }
    }

    /// Use a different width method for ambiguous characters.
    #[must_use]
    pub fn with_width_method(mut self, method: WidthMethod) -> Self {
        self.width_method = method;
        self
    }
}

impl Metrics for MonospaceMetrics {
    fn measure_width(&self, text: &str, font: &FontSpec) -> f64 {
        let columns = display_width_with_method(text, self.width_method) as f64;
        (columns * self.advance * f64::from(font.size)).ceil()
    }

    fn line_height(&self, font: &FontSpec) -> f64 {
        (self.leading * f64::from(font.size)).ceil()
    }
}
