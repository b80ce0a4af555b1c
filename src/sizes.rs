use std::fmt;

/// One nominal square pixel size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IconSize(pub u32);

/// Every size written as a standalone PNG, smallest first.
pub const ALL_SIZES: [IconSize; 7] = [
    IconSize(16),
    IconSize(32),
    IconSize(64),
    IconSize(128),
    IconSize(256),
    IconSize(512),
    IconSize(1024),
];

impl IconSize {
    pub fn pixels(self) -> u32 { self.0 }

    /// `icon_<N>x<N>.png`
    pub fn file_name(self) -> String {
        format!("icon_{0}x{0}.png", self.0)
    }

    /// The largest size; the master image is drawn at this resolution.
    pub fn largest() -> IconSize {
        ALL_SIZES[ALL_SIZES.len() - 1]
    }
}

impl fmt::Display for IconSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{0}x{0}", self.0)
    }
}

/// One file inside the `.iconset` staging directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StagingEntry {
    pub name: &'static str,
    pub source: IconSize,
}

/// Staging files `iconutil` expects, keyed by staged name. Each name has
/// exactly one source size; retina (`@2x`) names take the doubled size.
pub const STAGING: [StagingEntry; 10] = [
    StagingEntry { name: "icon_16x16.png", source: IconSize(16) },
    StagingEntry { name: "icon_16x16@2x.png", source: IconSize(32) },
    StagingEntry { name: "icon_32x32.png", source: IconSize(32) },
    StagingEntry { name: "icon_32x32@2x.png", source: IconSize(64) },
    StagingEntry { name: "icon_128x128.png", source: IconSize(128) },
    StagingEntry { name: "icon_128x128@2x.png", source: IconSize(256) },
    StagingEntry { name: "icon_256x256.png", source: IconSize(256) },
    StagingEntry { name: "icon_256x256@2x.png", source: IconSize(512) },
    StagingEntry { name: "icon_512x512.png", source: IconSize(512) },
    StagingEntry { name: "icon_512x512@2x.png", source: IconSize(1024) },
];

/// Pixel size a staged file name declares, e.g. `icon_32x32@2x.png` -> 64.
pub fn declared_pixels(name: &str) -> Option<u32> {
    let stem = name.strip_prefix("icon_")?.strip_suffix(".png")?;
    let (dims, scale) = match stem.strip_suffix("@2x") {
        Some(d) => (d, 2),
        None => (stem, 1),
    };
    let (w, h) = dims.split_once('x')?;
    let (w, h) = (w.parse::<u32>().ok()?, h.parse::<u32>().ok()?);
    (w == h && w > 0).then_some(w * scale)
}
