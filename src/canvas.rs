//! Rasterizing canvas
//!
//! Wraps a tiny-skia pixmap behind drawing operations in logical scene
//! coordinates. The scene is y-up like a plot; the pixmap is y-down, so every
//! coordinate is flipped on the way in. The surface starts as opaque white
//! and stays fully opaque: translucent shapes are composited over it, never
//! stored with alpha.

use tiny_skia::{
    ColorU8, FillRule, Paint, PathBuilder, Pixmap, Rect as PixelRect, Stroke, Transform,
};

use crate::error::{RenderError, RenderResult};
use crate::font::{FaceStyle, FontLibrary, Glyph};
use crate::gradient::GradientField;
use crate::scene::{Geometry, HAlign, Shape, TextLayer, VAlign};
use crate::types::Color;

/// The logical canvas spans this many inches in the exported image; plot
/// points (font sizes, line widths) convert to pixels through it.
const PLOT_SIZE_INCHES: f64 = 8.0;
const POINTS_PER_INCH: f64 = 72.0;

/// Line spacing factor for multi-line text, in multiples of the font size
const LINE_SPACING: f32 = 1.2;

/// Slant applied when an italic layer falls back to an upright face.
/// Negative because glyph space is y-down: points above the baseline have
/// negative y and must shift right.
const SYNTHETIC_ITALIC_SKEW: f32 = -0.2;

/// Stroke width of placeholder boxes, as a fraction of the font size
const PLACEHOLDER_STROKE: f32 = 0.05;

pub struct Canvas {
    pixmap: Pixmap,
    height_units: f64,
    pixels_per_unit: f64,
}

impl Canvas {
    /// Allocate an opaque white canvas of `width_units` x `height_units`
    /// logical units at the given raster scale
    pub fn new(width_units: f64, height_units: f64, pixels_per_unit: f64) -> RenderResult<Self> {
        let width = (width_units * pixels_per_unit).round() as u32;
        let height = (height_units * pixels_per_unit).round() as u32;
        let mut pixmap =
            Pixmap::new(width, height).ok_or(RenderError::CanvasAllocation { width, height })?;
        pixmap.fill(tiny_skia::Color::WHITE);
        Ok(Self {
            pixmap,
            height_units,
            pixels_per_unit,
        })
    }

    pub fn width_px(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height_px(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }

    fn x_px(&self, x: f64) -> f32 {
        (x * self.pixels_per_unit) as f32
    }

    fn y_px(&self, y: f64) -> f32 {
        ((self.height_units - y) * self.pixels_per_unit) as f32
    }

    /// Plot points (1/72 in) to pixels at this canvas' scale
    fn points_to_px(&self, points: f64) -> f32 {
        let units_per_point = self.height_units / (PLOT_SIZE_INCHES * POINTS_PER_INCH);
        (points * units_per_point * self.pixels_per_unit) as f32
    }

    /// Composite a gradient field over the whole surface at the given layer
    /// opacity. The field is stretched by nearest sampling, so its resolution
    /// is independent of the pixel dimensions.
    pub fn blit_gradient(&mut self, field: &GradientField, opacity: f64) {
        let alpha = opacity.clamp(0.0, 1.0);
        let width = self.pixmap.width() as usize;
        let height = self.pixmap.height() as usize;
        let pixels = self.pixmap.pixels_mut();

        for y in 0..height {
            let v = (y as f64 + 0.5) / height as f64;
            let [sr, sg, sb] = field.sample(0.0, v);
            for x in 0..width {
                let dst = pixels[y * width + x];
                // The base is opaque, so premultiplied channels are plain
                // channels here.
                let blend = |src: u8, dst: u8| {
                    (src as f64 * alpha + dst as f64 * (1.0 - alpha)).round() as u8
                };
                pixels[y * width + x] = ColorU8::from_rgba(
                    blend(sr, dst.red()),
                    blend(sg, dst.green()),
                    blend(sb, dst.blue()),
                    255,
                )
                .premultiply();
            }
        }
    }

    /// Fill (and optionally outline) one shape
    pub fn fill_shape(&mut self, shape: &Shape) {
        let path = match self.shape_path(&shape.geometry) {
            Some(path) => path,
            None => {
                log::warn!("skipping degenerate shape: {:?}", shape.geometry);
                return;
            }
        };

        let mut paint = Paint::default();
        paint.anti_alias = true;
        paint.set_color(to_skia_color(shape.fill, shape.opacity));
        self.pixmap
            .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);

        if let Some(edge) = shape.edge {
            let mut edge_paint = Paint::default();
            edge_paint.anti_alias = true;
            edge_paint.set_color(to_skia_color(edge.color, shape.opacity));
            let stroke = Stroke {
                width: self.points_to_px(edge.width),
                ..Stroke::default()
            };
            self.pixmap
                .stroke_path(&path, &edge_paint, &stroke, Transform::identity(), None);
        }
    }

    fn shape_path(&self, geometry: &Geometry) -> Option<tiny_skia::Path> {
        match geometry {
            Geometry::Rect { rect } => {
                let pixel_rect = PixelRect::from_xywh(
                    self.x_px(rect.x),
                    self.y_px(rect.top()),
                    (rect.width * self.pixels_per_unit) as f32,
                    (rect.height * self.pixels_per_unit) as f32,
                )?;
                Some(PathBuilder::from_rect(pixel_rect))
            }
            Geometry::Circle { center, radius } => PathBuilder::from_circle(
                self.x_px(center.x),
                self.y_px(center.y),
                (radius * self.pixels_per_unit) as f32,
            ),
            Geometry::Polygon { vertices } => {
                if vertices.len() < 3 {
                    return None;
                }
                let mut builder = PathBuilder::new();
                builder.move_to(self.x_px(vertices[0].x), self.y_px(vertices[0].y));
                for vertex in &vertices[1..] {
                    builder.line_to(self.x_px(vertex.x), self.y_px(vertex.y));
                }
                builder.close();
                builder.finish()
            }
        }
    }

    /// Draw one text layer through the font provider. Lines are laid out
    /// individually and stacked downward; each line is aligned on its own,
    /// matching the plotting convention the artwork was designed against.
    pub fn draw_text(&mut self, layer: &TextLayer, fonts: &FontLibrary) {
        let px_size = self.points_to_px(layer.size);
        let face_style = FaceStyle::for_layer(layer.weight, layer.style);
        let lines: Vec<_> = layer
            .content
            .split('\n')
            .map(|line| fonts.layout(line, face_style, px_size))
            .collect();
        if lines.is_empty() {
            return;
        }

        let line_height = px_size * LINE_SPACING;
        let block_height =
            lines[0].ascent + lines[0].descent + (lines.len() - 1) as f32 * line_height;

        let anchor_x = self.x_px(layer.anchor.x);
        let anchor_y = self.y_px(layer.anchor.y);
        let mut baseline = match layer.v_align {
            VAlign::Center => anchor_y - block_height / 2.0 + lines[0].ascent,
            VAlign::Baseline => anchor_y,
        };

        let mut paint = Paint::default();
        paint.anti_alias = true;
        paint.set_color(to_skia_color(layer.color, 1.0));

        for line in &lines {
            let origin_x = match layer.h_align {
                HAlign::Left => anchor_x,
                HAlign::Center => anchor_x - line.width / 2.0,
                HAlign::Right => anchor_x - line.width,
            };
            let transform = if line.synthetic_italic {
                Transform::from_skew(SYNTHETIC_ITALIC_SKEW, 0.0).post_translate(origin_x, baseline)
            } else {
                Transform::from_translate(origin_x, baseline)
            };

            for glyph in &line.glyphs {
                match glyph {
                    Glyph::Outline(path) => {
                        self.pixmap
                            .fill_path(path, &paint, FillRule::Winding, transform, None);
                        if line.embolden > 0.0 {
                            let stroke = Stroke {
                                width: line.embolden,
                                ..Stroke::default()
                            };
                            self.pixmap.stroke_path(path, &paint, &stroke, transform, None);
                        }
                    }
                    Glyph::Placeholder(rect) => {
                        let path = PathBuilder::from_rect(*rect);
                        let stroke = Stroke {
                            width: px_size * PLACEHOLDER_STROKE,
                            ..Stroke::default()
                        };
                        self.pixmap.stroke_path(&path, &paint, &stroke, transform, None);
                    }
                }
            }
            baseline += line_height;
        }
    }
}

fn to_skia_color(color: Color, opacity: f64) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba(
        color.r.clamp(0.0, 1.0) as f32,
        color.g.clamp(0.0, 1.0) as f32,
        color.b.clamp(0.0, 1.0) as f32,
        opacity.clamp(0.0, 1.0) as f32,
    )
    .unwrap_or(tiny_skia::Color::BLACK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Edge, FontStyle, FontWeight};
    use crate::types::{Point, Rect};

    fn pixel_rgb(canvas: &Canvas, x: u32, y: u32) -> [u8; 3] {
        let px = canvas.pixmap().pixel(x, y).unwrap();
        [px.red(), px.green(), px.blue()]
    }

    #[test]
    fn new_canvas_is_opaque_white() {
        let canvas = Canvas::new(100.0, 100.0, 2.0).unwrap();
        assert_eq!(canvas.width_px(), 200);
        assert_eq!(canvas.height_px(), 200);
        assert_eq!(pixel_rgb(&canvas, 0, 0), [255, 255, 255]);
        assert_eq!(pixel_rgb(&canvas, 199, 199), [255, 255, 255]);
    }

    #[test]
    fn rect_fill_lands_at_flipped_coordinates() {
        let mut canvas = Canvas::new(100.0, 100.0, 2.0).unwrap();
        canvas.fill_shape(&Shape {
            geometry: Geometry::Rect {
                rect: Rect::new(0.0, 90.0, 10.0, 10.0),
            },
            fill: Color::black(),
            edge: None,
            opacity: 1.0,
            z_order: 0,
        });
        // Logical top-left corner maps to pixel (0, 0).
        assert_eq!(pixel_rgb(&canvas, 5, 5), [0, 0, 0]);
        assert_eq!(pixel_rgb(&canvas, 5, 100), [255, 255, 255]);
    }

    #[test]
    fn gradient_blit_blends_with_white_base() {
        let mut canvas = Canvas::new(100.0, 100.0, 1.0).unwrap();
        let field = GradientField::vertical(
            16,
            16,
            Color::rgb(0.0, 0.0, 0.0),
            Color::rgb(0.0, 0.0, 0.0),
        );
        canvas.blit_gradient(&field, 0.5);
        // 0.5 black over white is mid gray.
        assert_eq!(pixel_rgb(&canvas, 50, 50), [128, 128, 128]);
    }

    #[test]
    fn translucent_fill_composites_over_base() {
        let mut canvas = Canvas::new(10.0, 10.0, 4.0).unwrap();
        canvas.fill_shape(&Shape {
            geometry: Geometry::Rect {
                rect: Rect::new(0.0, 0.0, 10.0, 10.0),
            },
            fill: Color::black(),
            edge: None,
            opacity: 0.6,
            z_order: 0,
        });
        let [r, g, b] = pixel_rgb(&canvas, 20, 20);
        // 0.6 black over white, within rounding of 102.
        assert!((101..=103).contains(&r), "r = {}", r);
        assert_eq!(r, g);
        assert_eq!(g, b);
    }

    #[test]
    fn edge_stroke_draws_outline_color() {
        let mut canvas = Canvas::new(100.0, 100.0, 2.0).unwrap();
        canvas.fill_shape(&Shape {
            geometry: Geometry::Rect {
                rect: Rect::new(20.0, 20.0, 60.0, 60.0),
            },
            fill: Color::white(),
            edge: Some(Edge {
                // Wide enough that the stroke spans several pixels at this
                // test scale; a hairline would only partially cover the
                // sampled pixel through anti-aliasing.
                width: 12.0,
                color: Color::black(),
            }),
            opacity: 1.0,
            z_order: 0,
        });
        // A point on the left edge should be darkened by the stroke.
        let [r, _, _] = pixel_rgb(&canvas, 40, 100);
        assert!(r < 128, "edge not stroked, r = {}", r);
        // The interior stays the fill color.
        let [r, _, _] = pixel_rgb(&canvas, 100, 100);
        assert_eq!(r, 255);
    }

    #[test]
    fn text_without_fonts_draws_placeholder_boxes() {
        let mut canvas = Canvas::new(100.0, 100.0, 2.0).unwrap();
        let fonts = FontLibrary::empty();
        canvas.draw_text(
            &TextLayer {
                anchor: Point::new(50.0, 50.0),
                content: "\u{1F4DA}".to_string(),
                size: 20.0,
                weight: FontWeight::Normal,
                style: FontStyle::Normal,
                color: Color::black(),
                h_align: HAlign::Center,
                v_align: VAlign::Center,
                z_order: 8,
            },
            &fonts,
        );
        let darkened = (0..canvas.width_px())
            .flat_map(|x| (0..canvas.height_px()).map(move |y| (x, y)))
            .any(|(x, y)| pixel_rgb(&canvas, x, y) != [255, 255, 255]);
        assert!(darkened, "placeholder box left no mark on the canvas");
    }
}
