//! Placeholder PNG icons for a browser extension.
//!
//! Two interchangeable renderers draw a square icon per requested size: a
//! microphone glyph built from raster primitives, or a single letter stamped
//! with a scalable font (falling back to a built-in bitmap font). The
//! [`icon_gen`] driver writes one `icon<size>.png` per size.

pub mod bitmap_font;
pub mod draw;
pub mod glyph;
pub mod icon_gen;
pub mod manifest;
pub mod text_stamp;
