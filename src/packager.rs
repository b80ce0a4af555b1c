use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use log::{debug, info};

use crate::compiler::IconCompiler;
use crate::config::Config;
use crate::error::{IconError, Result};
use crate::icon::resize_to;
use crate::sizes::{ALL_SIZES, STAGING, declared_pixels};

/// Paths written by one packaging run.
#[derive(Debug, Clone, Default)]
pub struct PackageReport {
    pub sized: Vec<PathBuf>,
    pub master: PathBuf,
    pub iconset: PathBuf,
    pub icns: Option<PathBuf>,
}

fn save_png(img: &RgbaImage, path: &Path) -> Result<()> {
    img.save(path).map_err(|e| IconError::image(path, e))?;
    info!("wrote {} ({}x{})", path.display(), img.width(), img.height());
    Ok(())
}

fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| IconError::io(dir, e))
}

/// Writes one `icon_<N>x<N>.png` per size, resampled from `master`.
pub fn write_sizes(master: &RgbaImage, out_dir: &Path) -> Result<Vec<PathBuf>> {
    ensure_dir(out_dir)?;
    let mut written = Vec::with_capacity(ALL_SIZES.len());
    for size in ALL_SIZES {
        let path = out_dir.join(size.file_name());
        save_png(&resize_to(master, size), &path)?;
        written.push(path);
    }
    Ok(written)
}

pub fn write_master(master: &RgbaImage, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(dir)?;
    }
    save_png(master, path)
}

/// Recreates the staging directory from scratch and copies the size-coded
/// files from `out_dir` into it under the names `iconutil` expects.
pub fn stage_iconset(out_dir: &Path, iconset: &Path) -> Result<()> {
    match fs::remove_dir_all(iconset) {
        Ok(()) => debug!("cleared previous {}", iconset.display()),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(IconError::io(iconset, e)),
    }
    ensure_dir(iconset)?;
    for entry in STAGING {
        let from = out_dir.join(entry.source.file_name());
        let to = iconset.join(entry.name);
        fs::copy(&from, &to).map_err(|e| IconError::io(&from, e))?;
        debug!("staged {} -> {}", from.display(), to.display());
    }
    Ok(())
}

/// Checks that `dir` holds exactly the staged names, each at its declared size.
pub fn verify_iconset(dir: &Path) -> Result<()> {
    let invalid = |reason: String| IconError::Staging { dir: dir.to_path_buf(), reason };

    let mut found = BTreeSet::new();
    for entry in fs::read_dir(dir).map_err(|e| IconError::io(dir, e))? {
        let entry = entry.map_err(|e| IconError::io(dir, e))?;
        found.insert(entry.file_name().to_string_lossy().into_owned());
    }
    let expected: BTreeSet<String> = STAGING.iter().map(|e| e.name.to_string()).collect();
    if found != expected {
        let missing: Vec<_> = expected.difference(&found).cloned().collect();
        let extra: Vec<_> = found.difference(&expected).cloned().collect();
        return Err(invalid(format!("missing {missing:?}, unexpected {extra:?}")));
    }

    for entry in STAGING {
        let path = dir.join(entry.name);
        let (w, h) = image::image_dimensions(&path).map_err(|e| IconError::image(&path, e))?;
        let want = declared_pixels(entry.name).unwrap_or(entry.source.pixels());
        if (w, h) != (want, want) {
            return Err(invalid(format!("{} is {w}x{h}, expected {want}x{want}", entry.name)));
        }
    }
    Ok(())
}

/// Writes every output for `master` and, when enabled, compiles the icon file.
pub fn package(config: &Config, master: &RgbaImage, compiler: &dyn IconCompiler) -> Result<PackageReport> {
    let out_dir = config.out_dir.as_path();
    let sized = write_sizes(master, out_dir)?;
    let master_path = config.master_path();
    write_master(master, &master_path)?;
    info!("icon files created");

    let iconset = config.iconset_path();
    stage_iconset(out_dir, &iconset)?;
    verify_iconset(&iconset)?;

    let icns = if config.compile {
        let icns = config.icns_path();
        info!("creating {}", icns.display());
        compiler.compile(&iconset, &icns)?;
        Some(icns)
    } else {
        info!("skipping icon compiler, iconset left at {}", iconset.display());
        None
    };

    Ok(PackageReport { sized, master: master_path, iconset, icns })
}
