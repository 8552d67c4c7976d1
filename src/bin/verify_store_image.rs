use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use store_art::requirements::{check_png, StoreRequirements};

#[derive(Debug, Parser)]
#[clap(
    name = "verify-store-image",
    about = "Check PNG files against the Chrome Web Store image requirements"
)]
struct Args {
    /// PNG files to check.
    #[clap(value_name = "PNG", required = true)]
    files: Vec<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    let requirements = StoreRequirements::load()?;

    let mut failures = 0;
    for path in &args.files {
        let report = check_png(&requirements, path)?;
        let kind = report
            .kind
            .map(|kind| kind.to_string())
            .unwrap_or_else(|| "no listing slot".to_string());

        if report.is_ok() {
            println!("✓ {}: {} {kind}", path.display(), report.dimensions);
        } else {
            failures += 1;
            println!(
                "✗ {}: {} {kind}, {:?}{}",
                path.display(),
                report.dimensions,
                report.color,
                if report.is_rgb24() { "" } else { " (expected 24-bit RGB)" }
            );
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} of {} images don't meet the store requirements", args.files.len());
    }

    Ok(())
}
