//! Turning images into samples.

use crate::{KMeansError, Vector};
use image::DynamicImage;
use std::path::Path;
use tracing::debug;

/// One RGB sample per pixel, in row-major order. Alpha channels are dropped and images with
/// more than 8 bits per channel are reduced to 8 bits.
pub fn samples_from_image(img: &DynamicImage) -> Vec<Vector<u8>> {
    img.to_rgb8()
        .pixels()
        .map(|p| Vector::from(p.0))
        .collect()
}

/// Decode the image at **path** into samples (see [`samples_from_image`]).
///
/// ## Errors
/// [`KMeansError::Image`] if the file can not be read or decoded.
pub fn load_samples<P: AsRef<Path>>(path: P) -> Result<Vec<Vector<u8>>, KMeansError> {
    let img = image::open(path.as_ref())?;
    debug!(path = %path.as_ref().display(), width = img.width(), height = img.height(), "decoded image");
    Ok(samples_from_image(&img))
}
