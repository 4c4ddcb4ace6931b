//! Microphone glyph renderer.

use crate::draw::{fill_ellipse, new_canvas, stroke_line, BoundingBox, WHITE};
use image::{Rgb, RgbImage};
use log::debug;

/// Geometry of the microphone for one icon size.
///
/// Every value is an integer fraction of the edge length and is recomputed
/// for each render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MicrophoneLayout {
    /// Box holding the capsule (the microphone head).
    pub capsule: BoundingBox,
    pub stand_top: (i32, i32),
    pub stand_bottom: (i32, i32),
    pub base_left: (i32, i32),
    pub base_right: (i32, i32),
    pub stroke_width: u32,
}

impl MicrophoneLayout {
    pub fn for_size(size: u32) -> Self {
        let size = size as i32;

        let capsule_width = size / 4;
        let capsule_height = size / 3;
        let capsule_x = (size - capsule_width) / 2;
        let capsule_y = size / 4;

        let stand_x = size / 2;
        let stand_y = capsule_y + capsule_height;
        let stand_height = size / 6;

        let base_half = (size / 5) / 2;
        let base_y = stand_y + stand_height;

        Self {
            capsule: BoundingBox::new(
                capsule_x,
                capsule_y,
                capsule_x + capsule_width,
                capsule_y + capsule_height,
            ),
            stand_top: (stand_x, stand_y),
            stand_bottom: (stand_x, base_y),
            base_left: (stand_x - base_half, base_y),
            base_right: (stand_x + base_half, base_y),
            stroke_width: (size as u32 / 32).max(2),
        }
    }

    /// Whether every painted pixel of this layout lands inside a `size × size`
    /// canvas.
    pub fn fits_within(&self, size: u32) -> bool {
        let size = size as i32;
        let reach = (self.stroke_width as i32 + 1) / 2;
        let inside = |x: i32, y: i32| x >= 0 && y >= 0 && x < size && y < size;

        inside(self.capsule.x0, self.capsule.y0)
            && inside(self.capsule.x1, self.capsule.y1)
            && [
                self.stand_top,
                self.stand_bottom,
                self.base_left,
                self.base_right,
            ]
            .iter()
            .all(|&(x, y)| inside(x - reach, y - reach) && inside(x + reach, y + reach))
    }
}

/// Draw the microphone glyph on a `size × size` canvas.
pub fn render_microphone(size: u32, background: Rgb<u8>) -> RgbImage {
    let layout = MicrophoneLayout::for_size(size);
    if !layout.fits_within(size) {
        debug!("microphone layout for {size}px is clipped by the canvas: {layout:?}");
    }

    let mut canvas = new_canvas(size, background);
    fill_ellipse(&mut canvas, layout.capsule, WHITE);
    stroke_line(
        &mut canvas,
        layout.stand_top,
        layout.stand_bottom,
        layout.stroke_width,
        WHITE,
    );
    stroke_line(
        &mut canvas,
        layout.base_left,
        layout.base_right,
        layout.stroke_width,
        WHITE,
    );

    debug!("rendered microphone glyph at {size}px");
    canvas
}
