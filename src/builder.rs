use image::codecs::png::PngEncoder;
use image::{ColorType, ImageBuffer, ImageEncoder, Rgb, RgbImage};
use qrcode::types::QrError;
use qrcode::{Color, QrCode};

use crate::params::QrParams;

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("data cannot be encoded at this error correction level: {0}")]
    Encode(#[from] QrError),

    #[error("PNG encoding failed: {0}")]
    Png(#[from] image::ImageError),
}

/// Encode `params.data` into a PNG.
///
/// The symbol uses the smallest version that fits the payload at the
/// requested tier. Each module is drawn as a `module_size` square and the
/// symbol is surrounded by `border` modules of background.
pub fn build_qr(params: &QrParams) -> Result<Vec<u8>, BuildError> {
    let code = QrCode::with_error_correction_level(params.data.as_bytes(), params.tier.ec_level())?;
    let image = render(&code, params.module_size, params.border, params.fill.to_rgb(), params.back.to_rgb());

    let mut png = Vec::new();
    PngEncoder::new(&mut png).write_image(image.as_raw(), image.width(), image.height(), ColorType::Rgb8)?;

    tracing::debug!(
        version = ?code.version(),
        modules = code.width(),
        bytes = png.len(),
        "QR built"
    );
    Ok(png)
}

/// Side length in pixels of the rendered image.
pub fn image_side(modules: u32, module_size: u32, border: u32) -> u32 {
    (modules + 2 * border) * module_size
}

fn render(code: &QrCode, module_size: u32, border: u32, fill: Rgb<u8>, back: Rgb<u8>) -> RgbImage {
    let width = code.width();
    let colors = code.to_colors();
    let side = image_side(width as u32, module_size, border);
    let offset = border * module_size;

    ImageBuffer::from_fn(side, side, |px, py| {
        if px < offset || py < offset {
            return back;
        }
        let x = ((px - offset) / module_size) as usize;
        let y = ((py - offset) / module_size) as usize;
        if x >= width || y >= width {
            return back;
        }
        match colors[y * width + x] {
            Color::Dark => fill,
            Color::Light => back,
        }
    })
}
