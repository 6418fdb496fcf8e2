//! Shared fixtures for the integration tests.

use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};

/// Writes a plain white RGBA template the size of the real excuse template
/// into `dir` and returns its path.
pub fn write_template(dir: &Path) -> PathBuf {
    let path = dir.join("template.png");
    let template = RgbaImage::from_pixel(413, 360, Rgba([255, 255, 255, 255]));
    template.save(&path).expect("failed to write template fixture");
    path
}

/// Locates a TrueType font to rasterize with. The repo does not ship its
/// binary font resource, so tests that need real glyph metrics look for the
/// runtime font first and fall back to common system fonts; callers skip
/// when none is found.
pub fn find_font() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("EXCUSE_TEST_FONT") {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    [
        "resources/xkcd.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
    ]
    .iter()
    .map(PathBuf::from)
    .find(|path| path.exists())
}
