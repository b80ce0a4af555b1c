use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};

/// Writes timestamped lines to stderr and, optionally, appends them to a file.
pub struct FileLogger {
    level: LevelFilter,
    file: Option<Mutex<File>>,
}

fn timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

fn open_log(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

impl FileLogger {
    pub fn new(level: LevelFilter, log_file: Option<&Path>) -> std::io::Result<Self> {
        let file = log_file.map(open_log).transpose()?.map(Mutex::new);
        Ok(Self { level, file })
    }

    fn format(record: &Record) -> String {
        format!("[{}] {:<5} {}", timestamp(), record.level(), record.args())
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = Self::format(record);
        eprintln!("{line}");
        if let Some(file) = &self.file {
            if let Ok(mut f) = file.lock() {
                let _ = writeln!(f, "{line}");
            }
        }
    }

    fn flush(&self) {
        if let Some(file) = &self.file {
            if let Ok(mut f) = file.lock() {
                let _ = f.flush();
            }
        }
    }
}

/// Installs the global logger. Calling it twice keeps the first logger.
pub fn init(level: LevelFilter, log_file: Option<PathBuf>) -> std::io::Result<()> {
    let logger = FileLogger::new(level, log_file.as_deref())?;
    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(level);
    }
    Ok(())
}

pub fn log_command(program: &str, args: &[String]) {
    let joined = args.join(" ");
    log::log!(Level::Info, "RUN: {} {}", program, joined);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_to_log_file() {
        let dir = std::env::temp_dir().join(format!("microverse-logger-{}", std::process::id()));
        let path = dir.join("nested").join("icon.log");
        let logger = FileLogger::new(LevelFilter::Info, Some(&path)).unwrap();
        logger.log(
            &Record::builder()
                .level(Level::Info)
                .args(format_args!("wrote icon_16x16.png"))
                .build(),
        );
        logger.log(
            &Record::builder()
                .level(Level::Debug)
                .args(format_args!("filtered out"))
                .build(),
        );
        logger.flush();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("INFO  wrote icon_16x16.png"));
        assert!(!text.contains("filtered out"));
        let _ = fs::remove_dir_all(&dir);
    }
}
