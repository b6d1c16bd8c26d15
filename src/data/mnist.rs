use log::warn;

use crate::error::{Error, Result};

pub const IMAGE_SIDE: usize = 28;
pub const PIXEL_COUNT: usize = IMAGE_SIDE * IMAGE_SIDE;
/// RGBA bytes per image.
pub const BUFFER_LEN: usize = PIXEL_COUNT * 4;
pub const CLASS_COUNT: usize = 10;

/// One labelled 28×28 digit as an RGBA buffer, grey replicated across the
/// colour channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MnistImage {
    pub label: u8,
    pub pixels: Vec<u8>,
}

impl MnistImage {
    /// Builds an image from 784 brightness values (0–255).
    pub fn from_grayscale(label: u8, brightness: &[u8]) -> MnistImage {
        let pixels = brightness.iter()
            .flat_map(|&b| [b, b, b, 255])
            .collect();
        MnistImage { label, pixels }
    }
}

/// Network input for an image: the red channel of every pixel scaled to
/// [0, 1], one value per input node.
pub fn image_to_input(image: &MnistImage) -> Result<Vec<f64>> {
    if image.pixels.len() != BUFFER_LEN {
        return Err(Error::PixelBufferSize { expected: BUFFER_LEN, found: image.pixels.len() });
    }
    Ok(image.pixels.chunks_exact(4).map(|px| px[0] as f64 / 255.0).collect())
}

/// One-hot target of length `classes` with 1.0 at `label`.
pub fn one_hot(label: usize, classes: usize) -> Result<Vec<f64>> {
    if label >= classes {
        return Err(Error::Label { label, classes });
    }
    let mut target = vec![0.0; classes];
    target[label] = 1.0;
    Ok(target)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Guess {
    /// Output node index, i.e. the class.
    pub index: usize,
    /// Output value divided by the sum of all outputs.
    pub confidence: f64,
}

/// Ranks output nodes by raw value, highest first, and renormalises each by
/// the sum of all outputs.
///
/// When the outputs sum to zero (or to anything that is not a positive finite
/// number) every class gets the same confidence.
pub fn guesses(outputs: &[f64]) -> Vec<Guess> {
    let mut order: Vec<usize> = (0..outputs.len()).collect();
    order.sort_by(|&a, &b| outputs[b].total_cmp(&outputs[a]));

    let total: f64 = outputs.iter().sum();
    let uniform = total <= 0.0 || !total.is_finite();
    if uniform && !outputs.is_empty() {
        warn!("outputs sum to {total}; reporting uniform confidence");
    }

    order.into_iter()
        .map(|index| Guess {
            index,
            confidence: if uniform {
                1.0 / outputs.len() as f64
            } else {
                outputs[index] / total
            },
        })
        .collect()
}

/// Index of the highest output.
pub fn argmax(outputs: &[f64]) -> Option<usize> {
    guesses(outputs).first().map(|g| g.index)
}
