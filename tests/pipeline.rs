use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use microverse_icon::error::IconError;
use microverse_icon::packager::verify_iconset;
use microverse_icon::{ALL_SIZES, Config, IconCompiler, STAGING};

/// Stands in for iconutil: records the call and writes a marker file.
#[derive(Default)]
struct FakeCompiler {
    calls: RefCell<Vec<(PathBuf, PathBuf)>>,
}

impl IconCompiler for FakeCompiler {
    fn compile(&self, iconset: &Path, output: &Path) -> microverse_icon::Result<()> {
        self.calls.borrow_mut().push((iconset.to_path_buf(), output.to_path_buf()));
        fs::write(output, b"icns").map_err(|source| IconError::Io { path: output.to_path_buf(), source })
    }
}

struct Failing;

impl IconCompiler for Failing {
    fn compile(&self, _: &Path, _: &Path) -> microverse_icon::Result<()> {
        Err(IconError::CompilerFailed { program: "iconutil".into(), code: Some(1), stderr: "bad iconset".into() })
    }
}

fn clean_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("microverse-it-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

fn config_for(dir: &Path) -> Config {
    Config { out_dir: dir.to_path_buf(), ..Config::default() }
}

#[test]
fn full_run_on_clean_directory() {
    let dir = clean_dir("full");
    let cfg = config_for(&dir);
    let compiler = FakeCompiler::default();

    let report = microverse_icon::run(&cfg, &compiler).unwrap();

    let mut pngs: Vec<String> = fs::read_dir(&dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n.starts_with("icon_") && n.ends_with(".png"))
        .collect();
    pngs.sort();
    let mut expected: Vec<String> = ALL_SIZES.iter().map(|s| s.file_name()).collect();
    expected.sort();
    assert_eq!(pngs, expected);

    for size in ALL_SIZES {
        let (w, h) = image::image_dimensions(dir.join(size.file_name())).unwrap();
        assert_eq!((w, h), (size.pixels(), size.pixels()));
    }

    let master = image::open(dir.join("AppIcon.png")).unwrap();
    assert_eq!((master.width(), master.height()), (1024, 1024));
    assert!(master.color().has_alpha());

    assert_eq!(fs::read_dir(&report.iconset).unwrap().count(), STAGING.len());
    verify_iconset(&report.iconset).unwrap();

    let calls = compiler.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0], (dir.join("AppIcon.iconset"), dir.join("AppIcon.icns")));
    assert_eq!(report.icns, Some(dir.join("AppIcon.icns")));
    assert!(dir.join("AppIcon.icns").is_file());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn same_seed_writes_identical_master() {
    let a = clean_dir("seed-a");
    let b = clean_dir("seed-b");
    let compiler = FakeCompiler::default();
    microverse_icon::run(&Config { compile: false, ..config_for(&a) }, &compiler).unwrap();
    microverse_icon::run(&Config { compile: false, ..config_for(&b) }, &compiler).unwrap();

    let ma = image::open(a.join("AppIcon.png")).unwrap().to_rgba8();
    let mb = image::open(b.join("AppIcon.png")).unwrap().to_rgba8();
    assert_eq!(ma.as_raw(), mb.as_raw());
    assert!(compiler.calls.borrow().is_empty());

    let _ = fs::remove_dir_all(&a);
    let _ = fs::remove_dir_all(&b);
}

#[test]
fn compiler_failure_is_surfaced() {
    let dir = clean_dir("fail");
    let err = microverse_icon::run(&config_for(&dir), &Failing).unwrap_err();
    assert!(matches!(err, IconError::CompilerFailed { code: Some(1), .. }));
    // everything before the compiler step is still on disk
    assert!(dir.join("AppIcon.iconset").join("icon_512x512@2x.png").is_file());
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn rerun_over_dirty_iconset_succeeds() {
    let dir = clean_dir("rerun");
    let cfg = config_for(&dir);
    let compiler = FakeCompiler::default();
    microverse_icon::run(&cfg, &compiler).unwrap();

    fs::write(dir.join("AppIcon.iconset").join(".DS_Store"), b"finder").unwrap();
    let report = microverse_icon::run(&cfg, &compiler).unwrap();

    verify_iconset(&report.iconset).unwrap();
    assert_eq!(compiler.calls.borrow().len(), 2);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn invalid_config_writes_nothing() {
    let dir = clean_dir("invalid");
    let cfg = Config { icns_name: "AppIcon".into(), ..config_for(&dir) };
    assert!(matches!(microverse_icon::run(&cfg, &FakeCompiler::default()), Err(IconError::Config(_))));
    assert!(!dir.exists());
}
