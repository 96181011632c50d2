//! Text measurement seam for tooltip sizing.
//!
//! The production chart asks the DOM for each tooltip line's bounding box.
//! Headless rendering replaces that with a [`TextMeasurer`] implementation;
//! the deterministic default approximates browser metrics closely enough for
//! layout while staying reproducible across platforms.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    pub font_family: Option<String>,
    pub font_size: f64,
    pub font_weight: Option<String>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: None,
            font_size: 16.0,
            font_weight: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
}

pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;
}

/// Fixed-factor measurer: every character is `char_width_factor * font_size`
/// wide. Not typographically accurate, but stable, which is what tooltip
/// box sizing needs.
#[derive(Debug, Clone)]
pub struct DeterministicTextMeasurer {
    pub char_width_factor: f64,
    pub line_height_factor: f64,
}

impl Default for DeterministicTextMeasurer {
    fn default() -> Self {
        Self {
            char_width_factor: 0.6,
            line_height_factor: 1.2,
        }
    }
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let char_width_factor = if self.char_width_factor > 0.0 {
            self.char_width_factor
        } else {
            0.6
        };
        let line_height_factor = if self.line_height_factor > 0.0 {
            self.line_height_factor
        } else {
            1.2
        };
        let chars = text.chars().count() as f64;
        TextMetrics {
            width: chars * style.font_size * char_width_factor,
            height: style.font_size * line_height_factor,
        }
    }
}
