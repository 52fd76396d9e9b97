//! Scene rasterization and export
//!
//! Walks a scene's elements in stacking order, rasterizes them onto the
//! canvas, flattens the result to an RGB buffer over opaque white and encodes
//! it once as PNG and once as JPEG. Both files are produced from the same
//! buffer, so their pixel content is identical regardless of the formats'
//! alpha handling.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, RgbImage};
use tiny_skia::Pixmap;

use crate::canvas::Canvas;
use crate::error::{RenderError, RenderResult};
use crate::font::FontLibrary;
use crate::gradient::GradientField;
use crate::scene::{Element, Scene};

/// Raster scale of the exported artwork: the 100-unit canvas maps to an
/// 8-inch square at 300 DPI, i.e. 2400x2400 pixels.
pub const PIXELS_PER_UNIT: f64 = 24.0;

/// Resolution the background gradient is computed at before being stretched
/// over the canvas
const GRADIENT_RESOLUTION: u32 = 256;

const JPEG_QUALITY: u8 = 90;

/// A file written by [`Renderer::export`]
#[derive(Debug, Clone)]
pub struct OutputArtifact {
    pub path: PathBuf,
    pub format: image::ImageFormat,
    pub width: u32,
    pub height: u32,
}

pub struct Renderer {
    pixels_per_unit: f64,
    fonts: FontLibrary,
}

impl Renderer {
    /// Renderer at the fixed export scale, with system fonts discovered
    pub fn new() -> Self {
        Self::with_scale(PIXELS_PER_UNIT)
    }

    /// Renderer at an arbitrary scale (tests use small canvases)
    pub fn with_scale(pixels_per_unit: f64) -> Self {
        Self {
            pixels_per_unit,
            fonts: FontLibrary::discover(),
        }
    }

    /// Swap in a specific font library (tests use [`FontLibrary::empty`] to
    /// stay independent of host fonts)
    pub fn with_fonts(mut self, fonts: FontLibrary) -> Self {
        self.fonts = fonts;
        self
    }

    /// Rasterize the scene. Deterministic: the same scene and fonts always
    /// produce the same pixel buffer.
    pub fn render(&self, scene: &Scene) -> RenderResult<Pixmap> {
        let mut canvas = Canvas::new(scene.width, scene.height, self.pixels_per_unit)?;

        if let Some(background) = &scene.background {
            let field = GradientField::vertical(
                GRADIENT_RESOLUTION,
                GRADIENT_RESOLUTION,
                background.top,
                background.bottom,
            );
            canvas.blit_gradient(&field, background.opacity);
        }

        for element in scene.elements_by_z_order() {
            match element {
                Element::Shape(shape) => canvas.fill_shape(shape),
                Element::Text(text) => canvas.draw_text(text, &self.fonts),
            }
        }

        log::debug!(
            "rasterized {} elements at {}x{}",
            scene.elements.len(),
            canvas.width_px(),
            canvas.height_px()
        );
        Ok(canvas.into_pixmap())
    }

    /// Render once and write the PNG and JPEG files. Any filesystem or
    /// encoder failure propagates; there is no partial-success cleanup.
    pub fn export(
        &self,
        scene: &Scene,
        png_path: &Path,
        jpg_path: &Path,
    ) -> RenderResult<Vec<OutputArtifact>> {
        let pixmap = self.render(scene)?;
        let rgb = flatten_to_rgb(&pixmap);
        let (width, height) = (rgb.width(), rgb.height());

        write_png(&rgb, png_path)?;
        log::info!("wrote {}", png_path.display());
        write_jpeg(&rgb, jpg_path)?;
        log::info!("wrote {}", jpg_path.display());

        Ok(vec![
            OutputArtifact {
                path: png_path.to_path_buf(),
                format: image::ImageFormat::Png,
                width,
                height,
            },
            OutputArtifact {
                path: jpg_path.to_path_buf(),
                format: image::ImageFormat::Jpeg,
                width,
                height,
            },
        ])
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Flatten a premultiplied RGBA pixmap onto opaque white, producing the
/// single RGB buffer both encoders consume
pub fn flatten_to_rgb(pixmap: &Pixmap) -> RgbImage {
    let width = pixmap.width();
    let height = pixmap.height();
    let mut rgb = Vec::with_capacity((width as usize) * (height as usize) * 3);
    for pixel in pixmap.pixels() {
        let alpha = pixel.alpha() as u32;
        // Premultiplied source over white: c + (255 - a).
        let over_white = |channel: u8| (channel as u32 + (255 - alpha)).min(255) as u8;
        rgb.push(over_white(pixel.red()));
        rgb.push(over_white(pixel.green()));
        rgb.push(over_white(pixel.blue()));
    }
    // Buffer length matches dimensions by construction.
    RgbImage::from_raw(width, height, rgb).unwrap_or_else(|| RgbImage::new(width, height))
}

fn write_png(rgb: &RgbImage, path: &Path) -> RenderResult<()> {
    let file = File::create(path).map_err(RenderError::Io)?;
    let encoder = PngEncoder::new(BufWriter::new(file));
    encoder.write_image(rgb.as_raw(), rgb.width(), rgb.height(), ColorType::Rgb8)?;
    Ok(())
}

fn write_jpeg(rgb: &RgbImage, path: &Path) -> RenderResult<()> {
    let file = File::create(path).map_err(RenderError::Io)?;
    let mut encoder = JpegEncoder::new_with_quality(BufWriter::new(file), JPEG_QUALITY);
    encoder.encode(rgb.as_raw(), rgb.width(), rgb.height(), ColorType::Rgb8)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artwork;

    fn test_renderer() -> Renderer {
        Renderer::with_scale(2.0).with_fonts(FontLibrary::empty())
    }

    #[test]
    fn render_is_deterministic() {
        let scene = artwork::teachers_day_scene().unwrap();
        let renderer = test_renderer();
        let first = renderer.render(&scene).unwrap();
        let second = renderer.render(&scene).unwrap();
        assert_eq!(first.data(), second.data());
    }

    #[test]
    fn render_covers_canvas_with_sky() {
        let scene = artwork::teachers_day_scene().unwrap();
        let pixmap = test_renderer().render(&scene).unwrap();
        assert_eq!(pixmap.width(), 200);
        assert_eq!(pixmap.height(), 200);

        // A corner pixel away from any shape carries the blended sky, not
        // the white base.
        let corner = pixmap.pixel(1, 198).unwrap();
        assert!(corner.blue() > corner.red());
        assert_ne!(
            (corner.red(), corner.green(), corner.blue()),
            (255, 255, 255)
        );
    }

    #[test]
    fn flatten_preserves_opaque_pixels() {
        let scene = artwork::teachers_day_scene().unwrap();
        let pixmap = test_renderer().render(&scene).unwrap();
        let rgb = flatten_to_rgb(&pixmap);
        assert_eq!(rgb.width(), pixmap.width());
        assert_eq!(rgb.height(), pixmap.height());
        let px = pixmap.pixel(100, 100).unwrap();
        assert_eq!(
            rgb.get_pixel(100, 100).0,
            [px.red(), px.green(), px.blue()]
        );
    }

    #[test]
    fn export_to_missing_directory_fails() {
        let scene = artwork::teachers_day_scene().unwrap();
        let renderer = test_renderer();
        let result = renderer.export(
            &scene,
            Path::new("/nonexistent-output-dir/out.png"),
            Path::new("/nonexistent-output-dir/out.jpg"),
        );
        assert!(result.is_err());
    }
}
