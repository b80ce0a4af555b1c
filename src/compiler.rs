use std::path::Path;
use std::process::Command;

use log::info;

use crate::error::{IconError, Result};
use crate::logger::log_command;

/// Turns a populated `.iconset` directory into a packaged icon file.
pub trait IconCompiler {
    fn compile(&self, iconset: &Path, output: &Path) -> Result<()>;
}

/// macOS `iconutil`, or any program accepting the same arguments.
#[derive(Debug, Clone)]
pub struct Iconutil {
    program: String,
}

impl Iconutil {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }

    fn args(iconset: &Path, output: &Path) -> Vec<String> {
        vec![
            "-c".to_string(),
            "icns".to_string(),
            iconset.display().to_string(),
            "-o".to_string(),
            output.display().to_string(),
        ]
    }
}

impl Default for Iconutil {
    fn default() -> Self {
        Self::new("iconutil")
    }
}

impl IconCompiler for Iconutil {
    fn compile(&self, iconset: &Path, output: &Path) -> Result<()> {
        let args = Self::args(iconset, output);
        log_command(&self.program, &args);

        let out = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|source| IconError::CompilerSpawn { program: self.program.clone(), source })?;

        if !out.status.success() {
            return Err(IconError::CompilerFailed {
                program: self.program.clone(),
                code: out.status.code(),
                stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
            });
        }
        info!("{} wrote {}", self.program, output.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn passes_iconutil_arguments_in_order() {
        let args = Iconutil::args(Path::new("AppIcon.iconset"), Path::new("AppIcon.icns"));
        assert_eq!(args, ["-c", "icns", "AppIcon.iconset", "-o", "AppIcon.icns"]);
    }

    #[test]
    fn missing_program_is_reported() {
        let compiler = Iconutil::new("definitely-not-an-icon-compiler-7f3a");
        let err = compiler
            .compile(&PathBuf::from("x.iconset"), &PathBuf::from("x.icns"))
            .unwrap_err();
        assert!(matches!(err, IconError::CompilerSpawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_reported() {
        let err = Iconutil::new("false")
            .compile(&PathBuf::from("x.iconset"), &PathBuf::from("x.icns"))
            .unwrap_err();
        match err {
            IconError::CompilerFailed { code, .. } => assert_eq!(code, Some(1)),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn zero_exit_is_success() {
        assert!(Iconutil::new("true")
            .compile(&PathBuf::from("x.iconset"), &PathBuf::from("x.icns"))
            .is_ok());
    }
}
