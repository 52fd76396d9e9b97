//! Background gradient field
//!
//! The sky background is a dense per-pixel RGB array computed analytically
//! from vertical position: a linear blend between a top and a bottom color.
//! The field is computed at its own fixed resolution and stretched over the
//! canvas by nearest-neighbor sampling at blit time.

use crate::types::Color;

/// Dense RGB gradient, row 0 at the top
#[derive(Debug, Clone, PartialEq)]
pub struct GradientField {
    width: u32,
    height: u32,
    /// Row-major RGB8 triples, `width * height * 3` bytes
    data: Vec<u8>,
}

impl GradientField {
    /// Compute a vertical gradient: the top row equals `top`, the bottom row
    /// equals `bottom`, rows in between interpolate linearly per channel.
    pub fn vertical(width: u32, height: u32, top: Color, bottom: Color) -> Self {
        let mut data = Vec::with_capacity((width as usize) * (height as usize) * 3);
        for y in 0..height {
            let t = if height > 1 {
                y as f64 / (height - 1) as f64
            } else {
                0.0
            };
            let row = Color::rgb(
                top.r + (bottom.r - top.r) * t,
                top.g + (bottom.g - top.g) * t,
                top.b + (bottom.b - top.b) * t,
            )
            .to_rgb8();
            for _ in 0..width {
                data.extend_from_slice(&row);
            }
        }
        Self { width, height, data }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGB triple at a pixel position
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let index = ((y as usize) * (self.width as usize) + (x as usize)) * 3;
        [self.data[index], self.data[index + 1], self.data[index + 2]]
    }

    /// RGB triple at normalized coordinates in 0.0..1.0, nearest sampling
    pub fn sample(&self, u: f64, v: f64) -> [u8; 3] {
        let x = ((u * self.width as f64) as u32).min(self.width - 1);
        let y = ((v * self.height as f64) as u32).min(self.height - 1);
        self.pixel(x, y)
    }
}
