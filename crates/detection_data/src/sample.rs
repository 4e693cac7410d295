//! Per-index sample materialization: decode, aspect-preserving resize,
//! letterbox hook, and channel-first tensor layout.
//!
//! Materialization is stateless with respect to other indices. Every call
//! opens, decodes, and discards its own resources, so the external iteration
//! harness may call it concurrently from multiple workers.

use crate::error::{DatasetError, Result};
use crate::labels::LabelMatrix;
use image::{imageops::FilterType, io::Reader as ImageReader, DynamicImage, RgbImage};
use ndarray::Array3;
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::Path;

/// A single materialized training sample.
#[derive(Debug, Clone)]
pub struct Sample {
    /// Dense pixel tensor, shape `(channel, height, width)`, contiguous.
    /// The channel axis is reversed relative to the decoder's native RGB
    /// order, so the served layout is BGR.
    pub image: Array3<u8>,
    /// The annotations paired with this image.
    pub labels: LabelMatrix,
}

/// Decodes an image from disk, guessing the format from content.
pub(crate) fn decode_image(path: &Path) -> Result<DynamicImage> {
    let file = File::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = BufReader::new(file);
    let mut buffer = Vec::new();
    reader
        .read_to_end(&mut buffer)
        .map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    ImageReader::new(Cursor::new(buffer))
        .with_guessed_format()
        .map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?
        .decode()
        .map_err(|source| DatasetError::ImageDecode {
            path: path.to_path_buf(),
            source,
        })
}

/// Loads an image and resizes it so its larger edge equals `img_size`,
/// preserving aspect ratio.
///
/// The scale ratio is `img_size / max(h0, w0)`; both dimensions are scaled by
/// it and truncated to integers. Shrinking uses an area-averaging (box)
/// filter, enlarging a linear one; a ratio of exactly 1 leaves the image
/// untouched.
///
/// Returns the image together with the original `(h0, w0)` and resized
/// `(h, w)` dimensions, which the future letterbox stage will need.
pub fn load_image(path: &Path, img_size: u32) -> Result<(DynamicImage, (u32, u32), (u32, u32))> {
    let image = decode_image(path)?;
    let (w0, h0) = (image.width(), image.height());

    let ratio = f64::from(img_size) / f64::from(h0.max(w0));
    let h = (f64::from(h0) * ratio) as u32;
    let w = (f64::from(w0) * ratio) as u32;

    let image = if ratio < 1.0 {
        image.thumbnail_exact(w, h)
    } else if ratio > 1.0 {
        image.resize_exact(w, h, FilterType::Triangle)
    } else {
        image
    };
    Ok((image, (h0, w0), (h, w)))
}

/// Letterbox padding stage.
///
/// Currently a no-op returning the resized image unchanged. The hook keeps
/// the `(image, target size) -> image` contract in place so fixed-canvas
/// padding can be added without touching the materialization flow.
pub fn letterbox(image: DynamicImage, _img_size: u32) -> DynamicImage {
    image
}

/// Converts an RGB image to a contiguous channel-first tensor with the
/// channel axis reversed, i.e. `(height, width, rgb)` becomes `(bgr, height,
/// width)`.
pub(crate) fn to_channel_first(image: &RgbImage) -> Array3<u8> {
    let (width, height) = image.dimensions();
    let mut tensor = Array3::zeros((3, height as usize, width as usize));
    for (x, y, pixel) in image.enumerate_pixels() {
        for channel in 0..3 {
            tensor[[2 - channel, y as usize, x as usize]] = pixel[channel];
        }
    }
    tensor
}

/// Materializes one sample: decode, resize, letterbox hook, channel-axis
/// reversal, channel-first layout. The paired labels are attached unchanged.
pub fn materialize(path: &Path, img_size: u32, labels: &LabelMatrix) -> Result<Sample> {
    let (image, _original, _resized) = load_image(path, img_size)?;
    let image = letterbox(image, img_size);
    let tensor = to_channel_first(&image.to_rgb8());
    Ok(Sample {
        image: tensor,
        labels: labels.clone(),
    })
}
