use anyhow::{Context, Result};
use image::{ColorType, Rgb};
use placeholder_icons::draw::WHITE;
use placeholder_icons::icon_gen::{icon_path, parse_color, DEFAULT_BACKGROUND, DEFAULT_SIZES};
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let mut paths: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    if paths.is_empty() {
        paths = DEFAULT_SIZES
            .iter()
            .map(|&size| icon_path(Path::new("icons"), size))
            .collect();
    }

    let background = parse_color(DEFAULT_BACKGROUND)?;
    for path in &paths {
        verify(path, background)?;
    }

    println!("✓ {} icon(s) verified", paths.len());
    Ok(())
}

fn verify(path: &Path, background: Rgb<u8>) -> Result<()> {
    let img = image::open(path).with_context(|| format!("Failed to open {}", path.display()))?;

    let (width, height) = (img.width(), img.height());
    println!("Checking icon: {}", path.display());
    println!("  Dimensions: {}x{}", width, height);

    if width != height {
        anyhow::bail!("{} is not square", path.display());
    }
    if img.color() != ColorType::Rgb8 {
        anyhow::bail!("{} is {:?}, expected RGB", path.display(), img.color());
    }

    let rgb_img = img.to_rgb8();
    let corner = rgb_img.get_pixel(0, 0);
    println!("  Corner pixel: RGB [{}, {}, {}]", corner[0], corner[1], corner[2]);
    if *corner != background {
        println!("  ⚠ Corner does not match the default background {DEFAULT_BACKGROUND}");
    }

    // White pixels make up the glyph or the letter
    let ink = rgb_img.pixels().filter(|p| **p == WHITE).count();
    let total = (width * height) as usize;
    println!(
        "  Ink coverage: {} of {} pixels ({:.1}%)",
        ink,
        total,
        ink as f64 * 100.0 / total as f64
    );
    if ink == 0 {
        println!("  ⚠ No foreground pixels found");
    }

    Ok(())
}
