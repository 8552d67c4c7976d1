use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use store_art::promo_gen::{self, PromoOptions};

#[derive(Debug, Parser)]
#[clap(
    name = "generate-promo-images",
    about = "Generate Chrome Web Store screenshots and promotional tiles"
)]
struct Args {
    /// Output directory.
    #[clap(short, long, value_name = "DIR", default_value = "./promo-images")]
    output: PathBuf,

    /// Extension name shown in titles
    #[clap(long, default_value = "Demo Typer")]
    name: String,

    /// Subtitle shown on the small promo tile
    #[clap(long, default_value = "Realistic Typing Simulation")]
    tagline: String,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let options = PromoOptions {
        output: args.output,
        name: args.name,
        tagline: args.tagline,
    };

    // Individual image failures are already reported; they don't fail the run
    promo_gen::generate_promo_images(&options)?;
    Ok(())
}
