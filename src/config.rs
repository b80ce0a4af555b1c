use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;

use crate::error::{IconError, Result};
use crate::texture::DEFAULT_SEED;

/// Looked up in the working directory when no `--config` is given.
pub const LOCAL_CONFIG: &str = "microverse-icon.json";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub out_dir: PathBuf,
    pub seed: u64,
    pub master_name: String,
    pub iconset_name: String,
    pub icns_name: String,
    pub compiler: String,
    pub compile: bool,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("."),
            seed: DEFAULT_SEED,
            master_name: "AppIcon.png".to_string(),
            iconset_name: "AppIcon.iconset".to_string(),
            icns_name: "AppIcon.icns".to_string(),
            compiler: "iconutil".to_string(),
            compile: true,
            log_file: None,
        }
    }
}

fn user_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "microverse", "MicroverseIcon")
        .map(|dirs| dirs.config_dir().join("config.json"))
}

fn check_plain_name(field: &str, value: &str, suffix: &str) -> Result<()> {
    if value.is_empty() || value.contains(['/', '\\']) || value == "." || value == ".." {
        return Err(IconError::Config(format!("{field} must be a plain file name, got {value:?}")));
    }
    if !value.ends_with(suffix) || value.len() == suffix.len() {
        return Err(IconError::Config(format!("{field} must end with {suffix}, got {value:?}")));
    }
    Ok(())
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| IconError::io(path, e))?;
        serde_json::from_str(&text)
            .map_err(|e| IconError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Explicit path if given, else the working-directory file, else the
    /// per-user config, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        let candidates = std::iter::once(PathBuf::from(LOCAL_CONFIG)).chain(user_config_path());
        for path in candidates {
            if path.is_file() {
                debug!("loading config from {}", path.display());
                return Self::from_file(&path);
            }
        }
        Ok(Self::default())
    }

    pub fn validate(&self) -> Result<()> {
        check_plain_name("master_name", &self.master_name, ".png")?;
        check_plain_name("iconset_name", &self.iconset_name, ".iconset")?;
        check_plain_name("icns_name", &self.icns_name, ".icns")?;
        if self.compile && self.compiler.trim().is_empty() {
            return Err(IconError::Config("compiler must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn master_path(&self) -> PathBuf { self.out_dir.join(&self.master_name) }
    pub fn iconset_path(&self) -> PathBuf { self.out_dir.join(&self.iconset_name) }
    pub fn icns_path(&self) -> PathBuf { self.out_dir.join(&self.icns_name) }
}
