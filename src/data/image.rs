//! Turns an arbitrary image file into an `MnistImage`-shaped buffer so it can
//! be guessed like a dataset sample.

use crate::data::mnist::{MnistImage, IMAGE_SIDE};
use crate::error::Result;

/// Decodes image bytes (PNG/JPEG/BMP/GIF), resizes to 28×28, converts to
/// grayscale and replicates it across RGBA.  The label is unknown and set to 0.
pub fn image_bytes_to_mnist(bytes: &[u8]) -> Result<MnistImage> {
    let img = image::load_from_memory(bytes)?;
    let side = IMAGE_SIDE as u32;
    let resized = img.resize_exact(side, side, image::imageops::FilterType::Lanczos3);
    let gray = resized.to_luma8();
    let brightness: Vec<u8> = gray.pixels().map(|p| p.0[0]).collect();
    Ok(MnistImage::from_grayscale(0, &brightness))
}
