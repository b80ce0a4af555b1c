//! Procedural alien-head app icon and its macOS `.icns` packaging.

pub mod compiler;
pub mod config;
pub mod error;
pub mod glow;
pub mod icon;
pub mod logger;
pub mod packager;
pub mod raster;
pub mod sizes;
pub mod texture;

pub use compiler::{IconCompiler, Iconutil};
pub use config::Config;
pub use error::{IconError, Result};
pub use icon::{IconLayout, generate_icon};
pub use packager::{PackageReport, package};
pub use sizes::{ALL_SIZES, IconSize, STAGING};

/// Renders the master icon for `config` and writes every output.
pub fn run(config: &Config, compiler: &dyn IconCompiler) -> Result<PackageReport> {
    config.validate()?;
    let master = generate_icon(IconSize::largest().pixels(), config.seed);
    package(config, &master, compiler)
}
