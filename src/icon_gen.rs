use crate::glyph::render_microphone;
use crate::manifest::write_manifest_fragment;
use crate::text_stamp::{render_text_stamp, FontSource, DEFAULT_LETTER};
use anyhow::{Context, Result};
use image::{DynamicImage, ImageOutputFormat, Rgb, RgbImage};
use log::debug;
use std::{
    fs::File,
    io::{BufWriter, Cursor, Write},
    path::{Path, PathBuf},
    str::FromStr,
};

/// Icon sizes written when none are requested.
pub const DEFAULT_SIZES: [u32; 3] = [16, 48, 128];

pub const DEFAULT_BACKGROUND: &str = "#667eea";

pub const DEFAULT_OUTPUT_DIR: &str = "icons";

/// Which renderer draws the icons. Exactly one is active per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Variant {
    /// Microphone drawn from an ellipse and two strokes
    #[default]
    Glyph,
    /// A letter centred on the background
    Text,
}

#[derive(Debug, Clone)]
pub struct Options {
    pub output: PathBuf,
    pub sizes: Vec<u32>,
    pub variant: Variant,
    pub background: String,
    pub letter: String,
    pub font: FontSource,
    pub manifest: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT_DIR),
            sizes: DEFAULT_SIZES.to_vec(),
            variant: Variant::default(),
            background: DEFAULT_BACKGROUND.to_string(),
            letter: DEFAULT_LETTER.to_string(),
            font: FontSource::default(),
            manifest: false,
        }
    }
}

/// Render and write every requested icon, in the requested order.
///
/// The output directory has to exist already. The first failed write aborts
/// the run.
pub fn generate_icons(options: &Options) -> Result<Vec<PathBuf>> {
    let background = parse_color(&options.background)?;
    validate_sizes(&options.sizes)?;

    let mut written = Vec::with_capacity(options.sizes.len());
    for &size in &options.sizes {
        let icon = render_icon(options, size, background);
        let path = icon_path(&options.output, size);
        save_png(icon, &path)?;
        println!("Created {}", path.display());
        written.push((size, path));
    }

    if options.manifest {
        let manifest_path = write_manifest_fragment(&options.output, &written)?;
        println!("Created {}", manifest_path.display());
    }

    println!("All icons created successfully!");
    Ok(written.into_iter().map(|(_, path)| path).collect())
}

/// Render a single `size × size` icon with the selected variant.
pub fn render_icon(options: &Options, size: u32, background: Rgb<u8>) -> RgbImage {
    debug!("rendering {size}px icon with the {:?} renderer", options.variant);
    match options.variant {
        Variant::Glyph => render_microphone(size, background),
        Variant::Text => render_text_stamp(size, background, &options.letter, &options.font),
    }
}

/// `<dir>/icon<size>.png`
pub fn icon_path(out_dir: &Path, size: u32) -> PathBuf {
    out_dir.join(format!("icon{size}.png"))
}

fn validate_sizes(sizes: &[u32]) -> Result<()> {
    if sizes.is_empty() {
        anyhow::bail!("At least one icon size is required");
    }
    if sizes.contains(&0) {
        anyhow::bail!("Icon sizes must be positive");
    }
    Ok(())
}

/// Parse a CSS colour into an opaque RGB pixel. Alpha is ignored.
pub fn parse_color(color: &str) -> Result<Rgb<u8>> {
    let parsed = css_color::Srgb::from_str(color)
        .map_err(|_| anyhow::anyhow!("Invalid background color: {color}"))?;

    let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.).round() as u8;
    Ok(Rgb([
        channel(parsed.red),
        channel(parsed.green),
        channel(parsed.blue),
    ]))
}

/// Write `image` as an RGB PNG at `path`, taking ownership of the canvas.
pub fn save_png(image: RgbImage, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create PNG file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    DynamicImage::ImageRgb8(image)
        .write_to(&mut writer, ImageOutputFormat::Png)
        .with_context(|| format!("Failed to write PNG {}", path.display()))?;
    writer.flush().context("Failed to flush PNG file")?;
    Ok(())
}

/// Check once at startup that PNG encoding works by encoding a 1×1 image in
/// memory.
pub fn check_png_encoder() -> Result<()> {
    let probe = DynamicImage::ImageRgb8(RgbImage::from_pixel(1, 1, Rgb([0, 0, 0])));
    let mut buf = Cursor::new(Vec::new());
    probe
        .write_to(&mut buf, ImageOutputFormat::Png)
        .context("PNG encoder rejected a 1x1 probe image")?;
    Ok(())
}
