//! Shared geometry and color value types

use serde::{Deserialize, Serialize};

use crate::error::{RenderError, RenderResult};

/// Point in logical canvas coordinates (y grows upward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Translate by another point treated as an offset
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }
}

/// Rectangle with position (lower-left corner) and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn top(&self) -> f64 {
        self.y + self.height
    }

    pub fn bottom(&self) -> f64 {
        self.y
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

/// Color representation, components in 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn from_hex(hex: &str) -> RenderResult<Self> {
        let digits = hex.trim_start_matches('#');
        // Byte length alone is not enough: multi-byte UTF-8 would slice at
        // a non-char boundary below.
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(RenderError::InvalidColor(hex.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map(|v| v as f64 / 255.0)
                .map_err(|_| RenderError::InvalidColor(hex.to_string()))
        };

        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    pub const fn black() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0 }
    }

    pub const fn white() -> Self {
        Self { r: 1.0, g: 1.0, b: 1.0 }
    }

    /// Quantize to 8-bit channels
    pub fn to_rgb8(&self) -> [u8; 3] {
        [
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_hex_parses_artwork_palette() {
        let sky = Color::from_hex("#87CEEB").unwrap();
        assert_eq!(sky.to_rgb8(), [0x87, 0xCE, 0xEB]);

        let banner = Color::from_hex("FF6B6B").unwrap();
        assert_eq!(banner.to_rgb8(), [0xFF, 0x6B, 0x6B]);
    }

    #[test]
    fn from_hex_rejects_malformed_input() {
        assert!(Color::from_hex("#FFF").is_err());
        assert!(Color::from_hex("#GGGGGG").is_err());
        assert!(Color::from_hex("").is_err());
    }

    #[test]
    fn from_hex_rejects_six_byte_non_ascii_input() {
        // Six bytes but not six ASCII digits; must error, not panic on a
        // char-boundary slice.
        assert!(Color::from_hex("a\u{E4}aab").is_err());
        assert!(Color::from_hex("#\u{E4}\u{E4}\u{E4}").is_err());
    }

    #[test]
    fn rect_edges() {
        let r = Rect::new(35.0, 43.0, 30.0, 4.0);
        assert_eq!(r.left(), 35.0);
        assert_eq!(r.right(), 65.0);
        assert_eq!(r.bottom(), 43.0);
        assert_eq!(r.top(), 47.0);
    }
}
