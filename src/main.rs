use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;

use microverse_icon::{Config, Iconutil, logger};

/// Draws the Microverse alien icon and packages it as AppIcon.icns
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Directory to write the PNGs, iconset and icns into
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Seed for the skin spot pattern
    #[arg(long)]
    seed: Option<u64>,

    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stop after staging the iconset
    #[arg(long)]
    no_icns: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn apply(&self, cfg: &mut Config) {
        if let Some(dir) = &self.out_dir {
            cfg.out_dir = dir.clone();
        }
        if let Some(seed) = self.seed {
            cfg.seed = seed;
        }
        if self.no_icns {
            cfg.compile = false;
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load(cli.config.as_deref()).context("loading config")?;
    cli.apply(&mut cfg);

    let level = if cli.verbose { LevelFilter::Debug } else { LevelFilter::Info };
    logger::init(level, cfg.log_file.clone()).context("opening log file")?;

    let compiler = Iconutil::new(cfg.compiler.clone());
    let report = microverse_icon::run(&cfg, &compiler).context("generating icon")?;
    println!("Icon files created successfully!");
    println!(
        "{} sized PNGs, master {}, iconset {}",
        report.sized.len(),
        report.master.display(),
        report.iconset.display()
    );
    if let Some(icns) = &report.icns {
        println!("{} created successfully!", icns.display());
    }
    Ok(())
}
