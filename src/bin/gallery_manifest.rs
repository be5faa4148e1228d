//! Gallery manifest generator
//!
//! Scans `<public>/ai/friday` and `<public>/ai/not-friday` (plus their season
//! subdirectories) and writes `gallery-manifest.json` for the server.

use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;

use isitfriday_server::{
    models::scene::Hemisphere,
    services::manifest::{write_manifest, ManifestBuilder},
};

#[derive(Parser, Debug)]
#[command(name = "gallery-manifest", version, about = "Build the gallery manifest")]
struct Args {
    /// Public web root containing the `ai/` gallery
    #[arg(long, default_value = "public")]
    public_dir: PathBuf,

    /// Hemisphere recorded as the manifest default
    #[arg(long, env = "DEFAULT_HEMISPHERE", default_value = "north")]
    hemisphere: Hemisphere,

    /// Output file (default: <public-dir>/ai/gallery-manifest.json)
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gallery_manifest=info,isitfriday_server=info".into()),
        )
        .init();

    let args = Args::parse();

    let builder = ManifestBuilder::new(&args.public_dir).hemisphere(args.hemisphere);
    let output = args.output.unwrap_or_else(|| builder.default_output());

    let manifest = builder.build(Utc::now());
    write_manifest(&manifest, &output)
        .with_context(|| format!("Failed to write manifest to {}", output.display()))?;

    tracing::info!(
        generated_at = manifest.generated_at.as_deref().unwrap_or_default(),
        friday = manifest.friday.base.len(),
        not_friday = manifest.not_friday.base.len(),
        "Gallery manifest written to {}",
        output.display()
    );

    Ok(())
}
