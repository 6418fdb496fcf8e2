//! Caption fitting
//!
//! Shrinks a caption's font size in whole-point steps until its advance
//! width sits strictly inside a bounding box, then centers it horizontally.
//! All horizontal arithmetic happens in 26.6 fixed-point units ([`SubPx`])
//! so the acceptance test and the centering offset keep exact sub-pixel
//! semantics; pixel coordinates cross into fixed-point only at the
//! conversion boundaries below.

use rusttype::{Font, GlyphId, Scale};

use crate::errors::RenderError;

/// Rasterization density. At 72 DPI one point is exactly one pixel, so font
/// sizes double as pixel heights throughout.
pub const DPI: f32 = 72.0;

/// Captions that still overflow below this size abort with
/// [`RenderError::CaptionTooLong`] instead of shrinking forever.
pub const MIN_FONT_SIZE: f32 = 1.0;

/// Axis-aligned caption region on the template, in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl BoundingBox {
    pub const fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn width(&self) -> i32 {
        self.max_x - self.min_x
    }

    /// Horizontal midpoint, truncated to whole pixels.
    pub fn middle_x(&self) -> i32 {
        self.min_x + self.width() / 2
    }
}

/// Horizontal distance in 26.6 fixed point: the low six bits are
/// sixty-fourths of a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SubPx(i32);

impl SubPx {
    pub const UNITS_PER_PX: i32 = 64;

    pub const fn from_px(px: i32) -> Self {
        Self(px * Self::UNITS_PER_PX)
    }

    /// Rounds to the nearest sixty-fourth on the way in.
    pub fn from_f32(px: f32) -> Self {
        Self((px * Self::UNITS_PER_PX as f32).round() as i32)
    }

    pub fn to_f32(self) -> f32 {
        self.0 as f32 / Self::UNITS_PER_PX as f32
    }

    /// Truncates toward zero, like integer division on the raw value.
    pub fn halved(self) -> Self {
        Self(self.0 / 2)
    }

    pub const fn raw(self) -> i32 {
        self.0
    }
}

impl std::ops::Add for SubPx {
    type Output = SubPx;

    fn add(self, rhs: SubPx) -> SubPx {
        SubPx(self.0 + rhs.0)
    }
}

impl std::ops::Sub for SubPx {
    type Output = SubPx;

    fn sub(self, rhs: SubPx) -> SubPx {
        SubPx(self.0 - rhs.0)
    }
}

/// Accepted placement for one caption: the surviving font size and the
/// sub-pixel x coordinate its first glyph starts at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitResult {
    pub size: f32,
    pub start_x: SubPx,
}

/// String measurement seam.
///
/// The renderer feeds a parsed [`Font`] through this; fitter tests feed
/// synthetic widths instead so they do not need a TrueType file on disk.
pub trait FontMetrics {
    /// Kerned advance width of `text` rendered at `size` points and 72 DPI.
    fn advance_width(&self, text: &str, size: f32) -> SubPx;
}

impl FontMetrics for Font<'_> {
    fn advance_width(&self, text: &str, size: f32) -> SubPx {
        let scale = Scale::uniform(size);
        let mut total = 0.0f32;
        let mut last: Option<GlyphId> = None;
        for c in text.chars() {
            let glyph = self.glyph(c);
            if let Some(prev) = last {
                total += self.pair_kerning(scale, prev, glyph.id());
            }
            last = Some(glyph.id());
            total += glyph.scaled(scale).h_metrics().advance_width;
        }
        SubPx::from_f32(total)
    }
}

/// Finds the largest size at or below `start_size`, decremented in whole
/// points, whose advance width fits strictly inside `bb`, and the start x
/// that centers the caption on the box midpoint.
///
/// Acceptance is `min_x + advance < max_x`, strictly less, so an advance
/// exactly as wide as the box still shrinks one more step. The start x is
/// `middle - advance/2` with truncating halving and is not clamped to the
/// box.
pub fn fit_caption<M: FontMetrics + ?Sized>(
    metrics: &M,
    text: &str,
    start_size: f32,
    bb: &BoundingBox,
) -> Result<FitResult, RenderError> {
    let mut size = start_size;
    let advance = loop {
        if size < MIN_FONT_SIZE {
            return Err(RenderError::CaptionTooLong {
                text: text.to_string(),
                box_width: bb.width(),
            });
        }
        let advance = metrics.advance_width(text, size);
        if SubPx::from_px(bb.min_x) + advance < SubPx::from_px(bb.max_x) {
            break advance;
        }
        size -= 1.0;
    };

    let start_x = SubPx::from_px(bb.middle_x()) - advance.halved();
    Ok(FitResult { size, start_x })
}
