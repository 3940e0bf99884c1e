//! Session configuration.

/// Font family and size applied to every cell.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FontSpec {
    pub family: String,
    pub size: u32,
}

impl FontSpec {
    /// Create a font spec.
    #[must_use]
    pub fn new(family: impl Into<String>, size: u32) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }

    /// Return a copy resized by `delta` points, floored at zero.
    #[must_use]
    pub fn resized(&self, delta: i32) -> Self {
        let size = i64::from(self.size) + i64::from(delta);
        Self {
            family: self.family.clone(),
            size: size.clamp(0, i64::from(u32::MAX)) as u32,
        }
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::new("Verdana", 12)
    }
}

/// Editor session options.
#[derive(Clone, Debug, PartialEq)]
pub struct EditorConfig {
    /// X coordinate where every line starts.
    pub origin_x: f64,
    /// Y coordinate of line 0.
    pub origin_y: f64,
    /// Space kept free at the right edge of the window.
    pub margin: f64,
    /// Font applied to all cells.
    pub font: FontSpec,
    /// Points added or removed by one font-size step.
    pub font_step: u32,
    /// Maximum number of events kept on the undo stack.
    pub history_capacity: usize,
    /// Initial window width in device units.
    pub window_width: f64,
    /// Initial window height in device units.
    pub window_height: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            origin_x: 5.0,
            origin_y: 0.0,
            margin: 5.0,
            font: FontSpec::default(),
            font_step: 4,
            history_capacity: 100,
            window_width: 500.0,
            window_height: 500.0,
        }
    }
}

impl EditorConfig {
    /// Set the line origin.
    #[must_use]
    pub fn with_origin(mut self, x: f64, y: f64) -> Self {
        self.origin_x = x;
        self.origin_y = y;
        self
    }

    /// Set the right margin.
    #[must_use]
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Set the font.
    #[must_use]
    pub fn with_font(mut self, font: FontSpec) -> Self {
        self.font = font;
        self
    }

    /// Set the undo history capacity.
    #[must_use]
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Set the initial window size.
    #[must_use]
    pub fn with_window(mut self, width: f64, height: f64) -> Self {
        self.window_width = width;
        self.window_height = height;
        self
    }

    /// Width available to a line for the given window width.
    #[must_use]
    pub fn wrap_width_for(&self, window_width: f64) -> f64 {
        (window_width - self.origin_x - self.margin).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.font, FontSpec::new("Verdana", 12));
        assert_eq!(config.history_capacity, 100);
        assert!((config.wrap_width_for(500.0) - 490.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_font_resize_floors_at_zero() {
        let font = FontSpec::new("Mono", 6);
        assert_eq!(font.resized(4).size, 10);
        assert_eq!(font.resized(-4).size, 2);
        assert_eq!(font.resized(-40).size, 0);
    }

    #[test]
    fn test_wrap_width_never_negative() {
        let config = EditorConfig::default().with_origin(0.0, 0.0).with_margin(10.0);
        assert!(config.wrap_width_for(4.0).abs() < f64::EPSILON);
    }
}
