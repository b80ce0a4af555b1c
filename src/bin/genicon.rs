use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use microverse_icon::generate_icon;
use microverse_icon::texture::DEFAULT_SEED;

/// Writes a single preview PNG of the icon
#[derive(Parser, Debug)]
struct Args {
    /// Edge length in pixels
    #[arg(long, default_value_t = 1024)]
    size: u32,

    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Output file
    #[arg(default_value = "assets/icon_preview.png")]
    path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    anyhow::ensure!(args.size >= 16, "size must be at least 16, got {}", args.size);

    let img = generate_icon(args.size, args.seed);
    if let Some(dir) = args.path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    img.save(&args.path)
        .with_context(|| format!("failed to save {}", args.path.display()))?;
    println!("Wrote {}", args.path.display());
    Ok(())
}
