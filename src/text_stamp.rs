//! Text-stamp renderer: a short string, normally the letter "P", centred on
//! the background.

use crate::bitmap_font::BitmapFont;
use crate::draw::{blend_clipped, new_canvas, WHITE};
use image::{Rgb, RgbImage};
use log::{debug, warn};
use rusttype::{point, Font, PositionedGlyph, Scale};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_LETTER: &str = "P";

/// Share of the icon edge used as the font size.
const FONT_SCALE: f32 = 0.7;

#[derive(Debug, Error)]
pub enum FontLoadError {
    #[error("failed to read font file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} is not a usable TrueType/OpenType font", .path.display())]
    InvalidFont { path: PathBuf },
}

/// Where the preferred scalable font comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    File(PathBuf),
    Memory(Vec<u8>),
    /// Skip scalable fonts and use the built-in bitmap font.
    Builtin,
}

impl Default for FontSource {
    fn default() -> Self {
        FontSource::File(default_font_path())
    }
}

/// Bold sans-serif font shipped with the current platform.
pub fn default_font_path() -> PathBuf {
    if cfg!(target_os = "windows") {
        PathBuf::from(r"C:\Windows\Fonts\arialbd.ttf")
    } else if cfg!(target_os = "macos") {
        PathBuf::from("/System/Library/Fonts/Supplemental/Arial Bold.ttf")
    } else {
        PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf")
    }
}

/// Font size (em height in pixels) for a `size` pixel icon.
pub fn point_size(size: u32) -> u32 {
    (size as f32 * FONT_SCALE) as u32
}

/// Pixel bounds of rendered text, `x1`/`y1` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextBounds {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl TextBounds {
    pub fn width(&self) -> i32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> i32 {
        self.y1 - self.y0
    }

    fn union(self, other: TextBounds) -> TextBounds {
        TextBounds {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }
}

pub enum FontHandle {
    Scalable { font: Font<'static>, pixels: u32 },
    Fallback(BitmapFont),
}

impl fmt::Debug for FontHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontHandle::Scalable { pixels, .. } => {
                f.debug_struct("Scalable").field("pixels", pixels).finish()
            }
            FontHandle::Fallback(_) => f.write_str("Fallback"),
        }
    }
}

impl FontHandle {
    /// Load the preferred font at `pixels` size.
    pub fn load(source: &FontSource, pixels: u32) -> Result<Self, FontLoadError> {
        let font = match source {
            FontSource::File(path) => {
                let data = std::fs::read(path).map_err(|source| FontLoadError::Io {
                    path: path.clone(),
                    source,
                })?;
                parse_font(data, path)?
            }
            FontSource::Memory(data) => parse_font(data.clone(), Path::new("<memory>"))?,
            FontSource::Builtin => return Ok(FontHandle::Fallback(BitmapFont)),
        };
        Ok(FontHandle::Scalable { font, pixels })
    }

    /// Load the preferred font, or fall back to the built-in bitmap font.
    ///
    /// The bitmap font has one fixed size, so `pixels` is ignored on fallback.
    pub fn load_or_fallback(source: &FontSource, pixels: u32) -> Self {
        match Self::load(source, pixels) {
            Ok(handle) => handle,
            Err(err) => {
                warn!("{err}; using the built-in fallback font");
                FontHandle::Fallback(BitmapFont)
            }
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, FontHandle::Fallback(_))
    }

    /// Ink bounds of `text` when drawn with its origin at `(0, 0)`.
    ///
    /// The origin is the top-left of the line box, so the bounds usually start
    /// below and to the right of it.
    pub fn measure(&self, text: &str) -> TextBounds {
        match self {
            FontHandle::Scalable { font, pixels } => {
                let mut bounds: Option<TextBounds> = None;
                layout_glyphs(font, *pixels, text, (0, 0), |glyph| {
                    if let Some(bb) = glyph.pixel_bounding_box() {
                        let next = TextBounds {
                            x0: bb.min.x,
                            y0: bb.min.y,
                            x1: bb.max.x,
                            y1: bb.max.y,
                        };
                        bounds = Some(match bounds {
                            Some(acc) => acc.union(next),
                            None => next,
                        });
                    }
                });
                bounds.unwrap_or_default()
            }
            FontHandle::Fallback(bitmap) => {
                let (width, height) = bitmap.text_size(text);
                TextBounds {
                    x0: 0,
                    y0: 0,
                    x1: width,
                    y1: height,
                }
            }
        }
    }

    pub fn draw(&self, canvas: &mut RgbImage, text: &str, origin: (i32, i32), color: Rgb<u8>) {
        match self {
            FontHandle::Scalable { font, pixels } => {
                layout_glyphs(font, *pixels, text, origin, |glyph| {
                    let Some(bb) = glyph.pixel_bounding_box() else {
                        return;
                    };
                    glyph.draw(|x, y, coverage| {
                        blend_clipped(
                            canvas,
                            bb.min.x + x as i32,
                            bb.min.y + y as i32,
                            color,
                            coverage,
                        );
                    });
                });
            }
            FontHandle::Fallback(bitmap) => bitmap.draw(canvas, text, origin, color),
        }
    }
}

fn parse_font(data: Vec<u8>, path: &Path) -> Result<Font<'static>, FontLoadError> {
    Font::try_from_vec(data).ok_or_else(|| FontLoadError::InvalidFont {
        path: path.to_path_buf(),
    })
}

/// Scale that makes one em `pixels` tall.
///
/// `Scale` in rusttype is the ascent-to-descent height, which is larger than
/// the em box for most fonts.
fn em_scale(font: &Font<'static>, pixels: u32) -> Scale {
    let v = font.v_metrics_unscaled();
    let units_per_em = font.units_per_em().max(1) as f32;
    Scale::uniform(pixels as f32 * (v.ascent - v.descent) / units_per_em)
}

/// Lay out `text` with the top of its line box at `origin` and visit each glyph.
fn layout_glyphs<F>(
    font: &Font<'static>,
    pixels: u32,
    text: &str,
    origin: (i32, i32),
    mut visit: F,
) where
    F: FnMut(&PositionedGlyph<'_>),
{
    let scale = em_scale(font, pixels);
    let ascent = font.v_metrics(scale).ascent;
    let start = point(origin.0 as f32, origin.1 as f32 + ascent);
    for glyph in font.layout(text, scale, start) {
        visit(&glyph);
    }
}

/// Origin that centres the ink of `bounds` on a `size × size` canvas.
pub fn centered_origin(size: u32, bounds: TextBounds) -> (i32, i32) {
    let size = size as i32;
    (
        (size - bounds.width()).div_euclid(2) - bounds.x0,
        (size - bounds.height()).div_euclid(2) - bounds.y0,
    )
}

/// Draw `text` centred on a `size × size` canvas with an already loaded font.
pub fn render_with_font(
    size: u32,
    background: Rgb<u8>,
    text: &str,
    font: &FontHandle,
) -> RgbImage {
    let mut canvas = new_canvas(size, background);
    let bounds = font.measure(text);
    let origin = centered_origin(size, bounds);
    font.draw(&mut canvas, text, origin, WHITE);

    debug!("stamped {text:?} at {size}px with {font:?}, origin {origin:?}");
    canvas
}

/// Load the font for this size and stamp `text` centred on the background.
pub fn render_text_stamp(
    size: u32,
    background: Rgb<u8>,
    text: &str,
    source: &FontSource,
) -> RgbImage {
    let font = FontHandle::load_or_fallback(source, point_size(size));
    render_with_font(size, background, text, &font)
}
