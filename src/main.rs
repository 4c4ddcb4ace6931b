use anyhow::Result;
use clap::Parser;
use placeholder_icons::icon_gen::{self, Options, Variant, DEFAULT_BACKGROUND, DEFAULT_SIZES};
use placeholder_icons::text_stamp::{default_font_path, FontSource, DEFAULT_LETTER};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(
    name = "placeholder-icons",
    about = "Generate placeholder PNG icons for a browser extension"
)]
struct Args {
    /// Renderer used for every icon.
    #[clap(long, value_enum, default_value_t = Variant::Glyph)]
    variant: Variant,

    /// Output directory. It must already exist.
    #[clap(short, long, value_name = "DIR", default_value = "icons")]
    output: PathBuf,

    /// Icon edge lengths in pixels, written in the given order.
    #[clap(
        short,
        long,
        value_delimiter = ',',
        value_name = "SIZES",
        default_values_t = DEFAULT_SIZES,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    sizes: Vec<u32>,

    /// The background color (CSS color format)
    #[clap(long, default_value = DEFAULT_BACKGROUND)]
    background: String,

    /// Text stamped by the text variant
    #[clap(long, default_value = DEFAULT_LETTER)]
    letter: String,

    /// Preferred font for the text variant. Defaults to a bold system font.
    #[clap(long, value_name = "PATH")]
    font: Option<PathBuf>,

    /// Also write manifest_icons.json referencing the generated icons
    #[clap(long)]
    manifest: bool,
}

impl From<Args> for Options {
    fn from(args: Args) -> Self {
        Options {
            output: args.output,
            sizes: args.sizes,
            variant: args.variant,
            background: args.background,
            letter: args.letter,
            font: FontSource::File(args.font.unwrap_or_else(default_font_path)),
            manifest: args.manifest,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = icon_gen::check_png_encoder() {
        println!("PNG encoding support is unavailable: {err:#}");
        std::process::exit(1);
    }

    let args = Args::parse();
    icon_gen::generate_icons(&args.into())?;

    Ok(())
}
