//! Font resource provider
//!
//! Discovers a sans-serif system face per style (regular/bold/italic) from
//! well-known platform font paths, parses it with ttf-parser and turns text
//! into positioned glyph outlines for the raster canvas.
//!
//! Fonts are an external resource the artwork cannot rely on, so failure is
//! never fatal here: a style with no discovered face falls back to the
//! regular face (with synthetic slant/boldness applied downstream), and a
//! character with no glyph in the chosen face renders as a stroked
//! placeholder box. The decorative emoji in the artwork are expected to take
//! the placeholder path on most systems.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tiny_skia::{PathBuilder, Rect as PixelRect};
use ttf_parser::{Face, OutlineBuilder};

use crate::scene::{FontStyle, FontWeight};

/// Face variant selected by a text layer's weight and style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceStyle {
    Regular,
    Bold,
    Italic,
}

impl FaceStyle {
    /// Map a text layer's weight/style pair onto a face variant. Bold wins
    /// over italic; the artwork never combines the two.
    pub fn for_layer(weight: FontWeight, style: FontStyle) -> Self {
        match (weight, style) {
            (FontWeight::Bold, _) => FaceStyle::Bold,
            (FontWeight::Normal, FontStyle::Italic) => FaceStyle::Italic,
            (FontWeight::Normal, FontStyle::Normal) => FaceStyle::Regular,
        }
    }
}

/// One glyph of a laid-out line, positioned relative to the line origin
/// (pen start at x = 0, baseline at y = 0, y growing downward)
#[derive(Debug, Clone)]
pub enum Glyph {
    /// Real outline from the face
    Outline(tiny_skia::Path),
    /// Placeholder box for a character the face has no glyph for
    Placeholder(PixelRect),
}

/// A laid-out line of text in pixel units
#[derive(Debug, Clone)]
pub struct LineLayout {
    pub glyphs: Vec<Glyph>,
    /// Total advance width
    pub width: f32,
    /// Distance from baseline up to the top of the line box
    pub ascent: f32,
    /// Distance from baseline down to the bottom of the line box
    pub descent: f32,
    /// True when the requested style had no dedicated face and the caller
    /// should slant the outlines itself
    pub synthetic_italic: bool,
    /// Extra stroke width the caller should apply when the requested bold
    /// face was unavailable; 0.0 otherwise
    pub embolden: f32,
}

/// Loaded sans-serif faces, one slot per style
pub struct FontLibrary {
    regular: Option<Vec<u8>>,
    bold: Option<Vec<u8>>,
    italic: Option<Vec<u8>>,
}

impl FontLibrary {
    /// Discover system faces. Missing faces are logged and left empty;
    /// layout still works through the placeholder policy.
    pub fn discover() -> Self {
        let library = Self {
            regular: load_first(FaceStyle::Regular),
            bold: load_first(FaceStyle::Bold),
            italic: load_first(FaceStyle::Italic),
        };
        if library.regular.is_none() {
            log::warn!("no sans-serif system font found; text renders as placeholder boxes");
        }
        library
    }

    /// Library with no faces at all; every glyph becomes a placeholder.
    /// Useful for deterministic tests that must not depend on host fonts.
    pub fn empty() -> Self {
        Self {
            regular: None,
            bold: None,
            italic: None,
        }
    }

    /// Lay out a single line (no newlines) at the given pixel size
    pub fn layout(&self, line: &str, style: FaceStyle, px_size: f32) -> LineLayout {
        let (data, exact) = self.face_data(style);
        let face = data.and_then(|bytes| Face::parse(bytes, 0).ok());
        match face {
            Some(face) => layout_with_face(&face, line, px_size, style, exact),
            None => layout_placeholders(line, px_size),
        }
    }

    /// Face bytes for a style, falling back to the regular face. The second
    /// value is false when the fallback was taken.
    fn face_data(&self, style: FaceStyle) -> (Option<&[u8]>, bool) {
        let slot = match style {
            FaceStyle::Regular => &self.regular,
            FaceStyle::Bold => &self.bold,
            FaceStyle::Italic => &self.italic,
        };
        match slot {
            Some(bytes) => (Some(bytes.as_slice()), true),
            None => (self.regular.as_deref(), false),
        }
    }
}

/// Candidate paths per platform, most specific first
fn candidate_paths(style: FaceStyle) -> &'static [&'static str] {
    #[cfg(target_os = "linux")]
    {
        match style {
            FaceStyle::Regular => &[
                "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
                "/usr/share/fonts/TTF/DejaVuSans.ttf",
                "/usr/share/fonts/dejavu/DejaVuSans.ttf",
                "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
                "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
                "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
            ],
            FaceStyle::Bold => &[
                "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
                "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
                "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
                "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
                "/usr/share/fonts/truetype/freefont/FreeSansBold.ttf",
            ],
            FaceStyle::Italic => &[
                "/usr/share/fonts/truetype/dejavu/DejaVuSans-Oblique.ttf",
                "/usr/share/fonts/TTF/DejaVuSans-Oblique.ttf",
                "/usr/share/fonts/dejavu/DejaVuSans-Oblique.ttf",
                "/usr/share/fonts/truetype/liberation/LiberationSans-Italic.ttf",
                "/usr/share/fonts/truetype/freefont/FreeSansOblique.ttf",
            ],
        }
    }

    #[cfg(target_os = "macos")]
    {
        match style {
            FaceStyle::Regular => &[
                "/Library/Fonts/Arial.ttf",
                "/System/Library/Fonts/Supplemental/Arial.ttf",
                "/System/Library/Fonts/Supplemental/Verdana.ttf",
            ],
            FaceStyle::Bold => &[
                "/Library/Fonts/Arial Bold.ttf",
                "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
                "/System/Library/Fonts/Supplemental/Verdana Bold.ttf",
            ],
            FaceStyle::Italic => &[
                "/Library/Fonts/Arial Italic.ttf",
                "/System/Library/Fonts/Supplemental/Arial Italic.ttf",
                "/System/Library/Fonts/Supplemental/Verdana Italic.ttf",
            ],
        }
    }

    #[cfg(target_os = "windows")]
    {
        match style {
            FaceStyle::Regular => &[
                "C:\\Windows\\Fonts\\arial.ttf",
                "C:\\Windows\\Fonts\\segoeui.ttf",
                "C:\\Windows\\Fonts\\verdana.ttf",
            ],
            FaceStyle::Bold => &[
                "C:\\Windows\\Fonts\\arialbd.ttf",
                "C:\\Windows\\Fonts\\segoeuib.ttf",
                "C:\\Windows\\Fonts\\verdanab.ttf",
            ],
            FaceStyle::Italic => &[
                "C:\\Windows\\Fonts\\ariali.ttf",
                "C:\\Windows\\Fonts\\segoeuii.ttf",
                "C:\\Windows\\Fonts\\verdanai.ttf",
            ],
        }
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        let _ = style;
        &[]
    }
}

/// Load and validate the first existing candidate for a style
fn load_first(style: FaceStyle) -> Option<Vec<u8>> {
    for path in candidate_paths(style) {
        if !Path::new(path).exists() {
            continue;
        }
        match load_font_file(path) {
            Ok(data) => {
                log::debug!("using {:?} face {}", style, path);
                return Some(data);
            }
            Err(reason) => {
                log::warn!("skipping font {}: {}", path, reason);
            }
        }
    }
    None
}

/// Read font bytes and validate them with ttf-parser
fn load_font_file(path: &str) -> Result<Vec<u8>, String> {
    let mut file =
        File::open(path).map_err(|e| format!("failed to open font file {}: {}", path, e))?;
    let mut data = Vec::new();
    file.read_to_end(&mut data)
        .map_err(|e| format!("failed to read font file {}: {}", path, e))?;
    Face::parse(&data, 0).map_err(|e| format!("invalid font file {}: {}", path, e))?;
    Ok(data)
}

/// Characters that carry no visual glyph of their own (variation selectors,
/// joiners). The artwork's emoji sequences contain U+FE0F.
fn is_default_ignorable(ch: char) -> bool {
    matches!(ch, '\u{200B}'..='\u{200D}' | '\u{FE00}'..='\u{FE0F}' | '\u{FEFF}')
}

/// Placeholder box metrics as fractions of the pixel size
const PLACEHOLDER_ADVANCE: f32 = 0.6;
const PLACEHOLDER_HEIGHT: f32 = 0.7;
const PLACEHOLDER_INSET: f32 = 0.05;

/// Extra stroke width for synthetic bold, as a fraction of the pixel size
const SYNTHETIC_BOLD_STROKE: f32 = 0.04;

fn placeholder_at(pen_x: f32, px_size: f32) -> Option<Glyph> {
    let inset = px_size * PLACEHOLDER_INSET;
    PixelRect::from_ltrb(
        pen_x + inset,
        -px_size * PLACEHOLDER_HEIGHT,
        pen_x + px_size * PLACEHOLDER_ADVANCE - inset,
        0.0,
    )
    .map(Glyph::Placeholder)
}

fn layout_with_face(
    face: &Face,
    line: &str,
    px_size: f32,
    style: FaceStyle,
    exact: bool,
) -> LineLayout {
    let scale = px_size / face.units_per_em() as f32;
    let ascent = face.ascender() as f32 * scale;
    let descent = -(face.descender() as f32) * scale;

    let mut glyphs = Vec::new();
    let mut pen_x = 0.0f32;

    for ch in line.chars() {
        if is_default_ignorable(ch) {
            continue;
        }
        match face.glyph_index(ch) {
            Some(glyph_id) => {
                let mut sink = GlyphSink::new(pen_x, scale);
                if face.outline_glyph(glyph_id, &mut sink).is_some() {
                    if let Some(path) = sink.finish() {
                        glyphs.push(Glyph::Outline(path));
                    }
                }
                // Whitespace has a glyph index but no outline; only the
                // advance matters for it.
                let advance = face
                    .glyph_hor_advance(glyph_id)
                    .map(|units| units as f32 * scale)
                    .unwrap_or(px_size * PLACEHOLDER_ADVANCE);
                pen_x += advance;
            }
            None => {
                log::warn!("no glyph for {:?}, rendering placeholder box", ch);
                if let Some(glyph) = placeholder_at(pen_x, px_size) {
                    glyphs.push(glyph);
                }
                pen_x += px_size * PLACEHOLDER_ADVANCE;
            }
        }
    }

    LineLayout {
        glyphs,
        width: pen_x,
        ascent,
        descent,
        synthetic_italic: style == FaceStyle::Italic && !exact,
        embolden: if style == FaceStyle::Bold && !exact {
            px_size * SYNTHETIC_BOLD_STROKE
        } else {
            0.0
        },
    }
}

/// Layout used when no face could be loaded at all
fn layout_placeholders(line: &str, px_size: f32) -> LineLayout {
    let mut glyphs = Vec::new();
    let mut pen_x = 0.0f32;
    for ch in line.chars() {
        if is_default_ignorable(ch) {
            continue;
        }
        if !ch.is_whitespace() {
            if let Some(glyph) = placeholder_at(pen_x, px_size) {
                glyphs.push(glyph);
            }
        }
        pen_x += px_size * PLACEHOLDER_ADVANCE;
    }
    LineLayout {
        glyphs,
        width: pen_x,
        ascent: px_size * PLACEHOLDER_HEIGHT,
        descent: px_size * (1.0 - PLACEHOLDER_HEIGHT),
        synthetic_italic: false,
        embolden: 0.0,
    }
}

/// Feeds ttf-parser outline callbacks into a tiny-skia path, scaling from
/// font units to pixels and flipping to the canvas' y-down orientation
struct GlyphSink {
    builder: PathBuilder,
    pen_x: f32,
    scale: f32,
}

impl GlyphSink {
    fn new(pen_x: f32, scale: f32) -> Self {
        Self {
            builder: PathBuilder::new(),
            pen_x,
            scale,
        }
    }

    fn map(&self, x: f32, y: f32) -> (f32, f32) {
        (self.pen_x + x * self.scale, -y * self.scale)
    }

    fn finish(self) -> Option<tiny_skia::Path> {
        self.builder.finish()
    }
}

impl OutlineBuilder for GlyphSink {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.map(x, y);
        self.builder.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.map(x, y);
        self.builder.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (x1, y1) = self.map(x1, y1);
        let (x, y) = self.map(x, y);
        self.builder.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (x1, y1) = self.map(x1, y1);
        let (x2, y2) = self.map(x2, y2);
        let (x, y) = self.map(x, y);
        self.builder.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}
