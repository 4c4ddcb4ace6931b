//! Raster primitives used by the icon renderers.
//!
//! Coordinates follow the usual image convention: the pixel `(x, y)` sits at
//! integer coordinates, `x` grows to the right and `y` grows downwards.
//! Every primitive clips silently against the canvas edges.

use image::{ImageBuffer, Rgb, RgbImage};

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Inclusive pixel rectangle `[x0, x1] × [y0, y1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl BoundingBox {
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> i32 {
        self.x1 - self.x0 + 1
    }

    pub fn height(&self) -> i32 {
        self.y1 - self.y0 + 1
    }
}

/// Create a square canvas filled with the background colour.
pub fn new_canvas(size: u32, background: Rgb<u8>) -> RgbImage {
    ImageBuffer::from_pixel(size, size, background)
}

/// Set a pixel if it lies on the canvas.
pub fn put_clipped(canvas: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>) {
    if x < 0 || y < 0 || x >= canvas.width() as i32 || y >= canvas.height() as i32 {
        return;
    }
    canvas.put_pixel(x as u32, y as u32, color);
}

/// Mix `color` over the existing pixel with the given coverage in `0.0..=1.0`.
pub fn blend_clipped(canvas: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>, coverage: f32) {
    if x < 0 || y < 0 || x >= canvas.width() as i32 || y >= canvas.height() as i32 {
        return;
    }
    let coverage = coverage.clamp(0.0, 1.0);
    if coverage <= 0.0 {
        return;
    }

    let pixel = canvas.get_pixel_mut(x as u32, y as u32);
    for channel in 0..3 {
        let under = pixel[channel] as f32;
        let over = color[channel] as f32;
        pixel[channel] = (under + (over - under) * coverage).round() as u8;
    }
}

/// Fill the ellipse inscribed in `bbox`.
///
/// A pixel is painted when its centre falls inside the ellipse, so the right
/// and bottom edges of the box are part of the shape.
pub fn fill_ellipse(canvas: &mut RgbImage, bbox: BoundingBox, color: Rgb<u8>) {
    if bbox.width() <= 0 || bbox.height() <= 0 {
        return;
    }

    let rx = bbox.width() as f32 / 2.0;
    let ry = bbox.height() as f32 / 2.0;
    let cx = bbox.x0 as f32 + rx;
    let cy = bbox.y0 as f32 + ry;

    for y in bbox.y0..=bbox.y1 {
        for x in bbox.x0..=bbox.x1 {
            let dx = (x as f32 + 0.5 - cx) / rx;
            let dy = (y as f32 + 0.5 - cy) / ry;
            if dx * dx + dy * dy <= 1.0 {
                put_clipped(canvas, x, y, color);
            }
        }
    }
}

/// Stroke the segment `from -> to` with a pen `width` pixels wide.
///
/// The stroke has butt ends and spans `[-width / 2, width / 2)` across the
/// segment, which makes axis-aligned strokes exact rectangles.
pub fn stroke_line(
    canvas: &mut RgbImage,
    from: (i32, i32),
    to: (i32, i32),
    width: u32,
    color: Rgb<u8>,
) {
    let half = width.max(1) as f32 / 2.0;
    let (x0, y0) = (from.0 as f32, from.1 as f32);
    let (dx, dy) = ((to.0 - from.0) as f32, (to.1 - from.1) as f32);
    let length = (dx * dx + dy * dy).sqrt();

    // A zero-length segment degenerates into a square dot.
    let (ux, uy) = if length == 0.0 {
        (1.0, 0.0)
    } else {
        (dx / length, dy / length)
    };
    let (nx, ny) = (-uy, ux);

    let min_x = (from.0.min(to.0) as f32 - half).floor() as i32;
    let max_x = (from.0.max(to.0) as f32 + half).ceil() as i32;
    let min_y = (from.1.min(to.1) as f32 - half).floor() as i32;
    let max_y = (from.1.max(to.1) as f32 + half).ceil() as i32;

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let rx = x as f32 - x0;
            let ry = y as f32 - y0;
            let along = rx * ux + ry * uy;
            let across = rx * nx + ry * ny;

            let inside_length = if length == 0.0 {
                along >= -half && along < half
            } else {
                along >= 0.0 && along <= length
            };
            if inside_length && across >= -half && across < half {
                put_clipped(canvas, x, y, color);
            }
        }
    }
}
