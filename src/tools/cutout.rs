//! Sprite background removal.
//!
//! Treats the top-left pixel as the background color and clears every pixel
//! whose RGB channels all sit within the threshold of it. Single pass, no
//! refinement; sprite sheets exported on a flat background don't need more.

use image::{ImageFormat, ImageReader, Rgba, RgbaImage};
use std::path::Path;
use thiserror::Error;

/// Per-channel tolerance for background color variation
pub const DEFAULT_THRESHOLD: u8 = 30;

/// Failures are split by phase so the CLI can say which file operation went
/// wrong instead of printing one opaque message.
#[derive(Debug, Error)]
pub enum CutoutError {
    #[error("failed to open input image: {0}")]
    Open(#[from] std::io::Error),

    #[error("failed to decode input image: {0}")]
    Decode(image::ImageError),

    #[error("failed to write output image: {0}")]
    Write(image::ImageError),
}

/// Clear background-colored pixels in place; returns how many were cleared.
///
/// A cleared pixel becomes `(255, 255, 255, 0)` rather than keeping its
/// color with zero alpha, so flattening the image against white later shows
/// nothing.
pub fn knock_out(img: &mut RgbaImage, threshold: u8) -> u64 {
    if img.width() == 0 || img.height() == 0 {
        return 0;
    }

    let background = *img.get_pixel(0, 0);
    let mut cleared = 0;
    for pixel in img.pixels_mut() {
        if is_background(*pixel, background, threshold) {
            *pixel = Rgba([255, 255, 255, 0]);
            cleared += 1;
        }
    }
    cleared
}

/// RGB channels only; the alpha of the background sample is irrelevant
fn is_background(pixel: Rgba<u8>, background: Rgba<u8>, threshold: u8) -> bool {
    (0..3).all(|channel| pixel.0[channel].abs_diff(background.0[channel]) < threshold)
}

/// Decode `input`, clear its background, and write the result to `output`
/// as PNG. Returns the number of cleared pixels.
pub fn run(input: &Path, output: &Path, threshold: u8) -> Result<u64, CutoutError> {
    let decoded = ImageReader::open(input)?
        .with_guessed_format()?
        .decode()
        .map_err(CutoutError::Decode)?;

    let mut rgba = decoded.to_rgba8();
    let cleared = knock_out(&mut rgba, threshold);

    rgba.save_with_format(output, ImageFormat::Png)
        .map_err(CutoutError::Write)?;
    Ok(cleared)
}
