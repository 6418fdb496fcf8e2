//! Template compositing
//!
//! Loads the excuse template and font, fits both captions, and draws them
//! as solid black, unhinted glyphs onto a fresh fully-opaque canvas.

use std::io::Cursor;
use std::path::PathBuf;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use rusttype::{point, Font, Scale};

use crate::errors::RenderError;

pub mod layout;

pub use layout::{fit_caption, BoundingBox, FitResult, FontMetrics, SubPx, DPI, MIN_FONT_SIZE};

/// Region holding the complete excuse, drawn inside literal quotes.
pub const LONG_CAPTION_BOX: BoundingBox = BoundingBox::new(60, 75, 350, 120);

/// Region holding the one-word excuse.
pub const SHORT_CAPTION_BOX: BoundingBox = BoundingBox::new(140, 215, 220, 250);

/// Starting size for the long caption. The short caption starts two points
/// smaller.
pub const LONG_CAPTION_SIZE: f32 = 28.0;
pub const SHORT_CAPTION_SIZE: f32 = LONG_CAPTION_SIZE - 2.0;

/// Composes caption pairs onto the template.
///
/// Resources are read on every [`compose`](Renderer::compose) call so a
/// missing or corrupt file fails exactly the unit of work that needed it,
/// and concurrent requests never share font state.
#[derive(Debug, Clone)]
pub struct Renderer {
    template_path: PathBuf,
    font_path: PathBuf,
}

impl Renderer {
    pub fn new(template_path: PathBuf, font_path: PathBuf) -> Self {
        Self {
            template_path,
            font_path,
        }
    }

    /// Renders the caption pair onto the template and returns the finished
    /// bitmap. The long caption is wrapped in quote characters before
    /// fitting, so the quotes count toward its width.
    pub fn compose(&self, short: &str, long: &str) -> Result<RgbaImage, RenderError> {
        let template = self.load_template()?;
        let font = self.load_font()?;

        // Fresh fully-opaque canvas with the template's pixels
        let mut canvas = RgbaImage::new(template.width(), template.height());
        for (src, dst) in template.pixels().zip(canvas.pixels_mut()) {
            *dst = Rgba([src[0], src[1], src[2], 255]);
        }

        let quoted = format!("\"{long}\"");
        draw_caption(&mut canvas, &font, &quoted, LONG_CAPTION_SIZE, &LONG_CAPTION_BOX)?;
        draw_caption(&mut canvas, &font, short, SHORT_CAPTION_SIZE, &SHORT_CAPTION_BOX)?;

        Ok(canvas)
    }

    fn load_template(&self) -> Result<RgbaImage, RenderError> {
        let bytes = std::fs::read(&self.template_path).map_err(|source| {
            RenderError::TemplateLoad {
                path: self.template_path.clone(),
                source,
            }
        })?;
        let decoded = image::load_from_memory(&bytes).map_err(|source| {
            RenderError::TemplateDecode {
                path: self.template_path.clone(),
                source,
            }
        })?;
        match decoded {
            DynamicImage::ImageRgba8(img) => Ok(img),
            other => Err(RenderError::PixelFormat {
                found: format!("{:?}", other.color()),
            }),
        }
    }

    fn load_font(&self) -> Result<Font<'static>, RenderError> {
        let bytes = std::fs::read(&self.font_path).map_err(|source| RenderError::FontLoad {
            path: self.font_path.clone(),
            source,
        })?;
        Font::try_from_vec(bytes).ok_or_else(|| RenderError::FontParse {
            path: self.font_path.clone(),
        })
    }
}

/// Fits `text` into `bb` starting from `base_size`, then rasterizes it in
/// solid black. The baseline sits `size` whole pixels under the box top;
/// coverage is blended directly, with no hinting pass.
fn draw_caption(
    canvas: &mut RgbaImage,
    font: &Font<'_>,
    text: &str,
    base_size: f32,
    bb: &BoundingBox,
) -> Result<(), RenderError> {
    let fit = fit_caption(font, text, base_size, bb)?;
    let scale = Scale::uniform(fit.size);
    let baseline = (bb.min_y + fit.size as i32) as f32;

    for glyph in font.layout(text, scale, point(fit.start_x.to_f32(), baseline)) {
        let Some(bounds) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, coverage| {
            let x = bounds.min.x + gx as i32;
            let y = bounds.min.y + gy as i32;
            if x >= 0 && y >= 0 && (x as u32) < canvas.width() && (y as u32) < canvas.height() {
                let pixel = canvas.get_pixel_mut(x as u32, y as u32);
                for channel in &mut pixel.0[..3] {
                    *channel = (f32::from(*channel) * (1.0 - coverage)) as u8;
                }
            }
        });
    }
    Ok(())
}

/// Serializes the finished bitmap as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, RenderError> {
    let mut buf = Cursor::new(Vec::new());
    image
        .write_to(&mut buf, ImageFormat::Png)
        .map_err(|source| RenderError::Encode { source })?;
    Ok(buf.into_inner())
}
