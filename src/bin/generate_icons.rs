use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use store_art::icon_gen::{self, IconOptions, DEFAULT_SIZES};
use store_art::palette::parse_color;

#[derive(Debug, Parser)]
#[clap(
    name = "generate-icons",
    about = "Generate the extension's toolbar icons"
)]
struct Args {
    /// Output directory.
    #[clap(short, long, value_name = "DIR", default_value = "./icons")]
    output: PathBuf,

    /// Icon sizes to generate.
    #[clap(short, long, value_delimiter = ',', value_name = "SIZES")]
    sizes: Option<Vec<u32>>,

    /// Background color (CSS color format)
    #[clap(long, default_value = "#4A90E2")]
    background: String,

    /// Glyph color (CSS color format)
    #[clap(long, default_value = "#FFFFFF")]
    color: String,

    /// Text drawn in the middle of the icon
    #[clap(long, default_value = "T")]
    glyph: String,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let options = IconOptions {
        output: args.output,
        sizes: args.sizes.unwrap_or_else(|| DEFAULT_SIZES.to_vec()),
        background: parse_color(&args.background)?,
        color: parse_color(&args.color)?,
        glyph: args.glyph,
    };

    icon_gen::generate_icons(&options)?;
    Ok(())
}
