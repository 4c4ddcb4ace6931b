use image::Rgb;
use placeholder_icons::draw::WHITE;
use placeholder_icons::glyph::MicrophoneLayout;
use placeholder_icons::icon_gen::{generate_icons, parse_color, render_icon, Options, Variant};
use placeholder_icons::text_stamp::{point_size, FontHandle, FontSource};
use std::path::PathBuf;
use tempfile::TempDir;

fn options_in(dir: &TempDir, variant: Variant) -> Options {
    Options {
        output: dir.path().to_path_buf(),
        variant,
        font: FontSource::File(PathBuf::from("/nonexistent/preferred-bold.ttf")),
        ..Options::default()
    }
}

#[test]
fn test_every_size_renders_square_images() {
    let options = Options::default();
    let background = parse_color(&options.background).unwrap();

    for variant in [Variant::Glyph, Variant::Text] {
        let options = Options {
            variant,
            font: FontSource::Builtin,
            ..options.clone()
        };
        for size in [1, 3, 16, 31, 48, 100, 128, 256] {
            let icon = render_icon(&options, size, background);
            assert_eq!(icon.dimensions(), (size, size), "{variant:?} at {size}px");
        }
    }
}

#[test]
fn test_generated_glyph_icon_matches_layout() {
    let temp_dir = TempDir::new().unwrap();
    let options = options_in(&temp_dir, Variant::Glyph);
    let written = generate_icons(&options).unwrap();
    assert_eq!(written.len(), 3);

    let icon16 = image::open(&written[0]).unwrap().to_rgb8();
    let capsule: Vec<(u32, u32)> = icon16
        .enumerate_pixels()
        .filter(|(_, y, p)| *y < 9 && **p == WHITE)
        .map(|(x, y, _)| (x, y))
        .collect();
    assert_eq!(capsule.iter().map(|p| p.0).min(), Some(6));
    assert_eq!(capsule.iter().map(|p| p.0).max(), Some(10));
    assert_eq!(capsule.iter().map(|p| p.1).min(), Some(4));
    // Bottom row of the capsule, left of the stand
    assert_eq!(*icon16.get_pixel(7, 9), WHITE);
    assert_eq!(*icon16.get_pixel(6, 9), Rgb([102, 126, 234]));
    assert_eq!(*icon16.get_pixel(15, 15), Rgb([102, 126, 234]));

    // Nothing is painted below the base stroke
    let layout = MicrophoneLayout::for_size(128);
    let icon128 = image::open(&written[2]).unwrap().to_rgb8();
    let lowest_ink = icon128
        .enumerate_pixels()
        .filter(|(_, _, p)| **p == WHITE)
        .map(|(_, y, _)| y as i32)
        .max()
        .unwrap();
    assert!(lowest_ink <= layout.base_left.1 + layout.stroke_width as i32);
}

#[test]
fn test_text_variant_is_idempotent_on_disk() {
    let first_dir = TempDir::new().unwrap();
    let second_dir = TempDir::new().unwrap();

    let first = generate_icons(&options_in(&first_dir, Variant::Text)).unwrap();
    let second = generate_icons(&options_in(&second_dir, Variant::Text)).unwrap();

    for (a, b) in first.iter().zip(&second) {
        let a = image::open(a).unwrap().to_rgb8();
        let b = image::open(b).unwrap().to_rgb8();
        assert_eq!(a, b);
    }
}

#[test]
fn test_preferred_font_size_for_largest_icon() {
    assert_eq!(point_size(128), 89);

    let handle = FontHandle::load_or_fallback(
        &FontSource::File(PathBuf::from("/nonexistent/preferred-bold.ttf")),
        point_size(128),
    );
    assert!(handle.is_fallback());
}

#[test]
fn test_custom_background_is_used() {
    let temp_dir = TempDir::new().unwrap();
    let options = Options {
        background: "#000000".to_string(),
        sizes: vec![32],
        ..options_in(&temp_dir, Variant::Glyph)
    };

    let written = generate_icons(&options).unwrap();
    let icon = image::open(&written[0]).unwrap().to_rgb8();
    assert_eq!(*icon.get_pixel(0, 0), Rgb([0, 0, 0]));
    assert_eq!(icon.dimensions(), (32, 32));
}
