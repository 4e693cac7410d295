//! Pairwise image/label validation.
//!
//! One strictly sequential pass over the full (image, label) list at build
//! time. The first violation aborts the whole construction; no partial label
//! table is ever produced.

use crate::error::{DatasetError, Result};
use crate::labels::LabelMatrix;
use crate::progress::Progress;
use crate::sample::decode_image;
use std::path::PathBuf;
use tracing::debug;

/// Checks every (image, label) pair and builds the in-memory label table.
///
/// The channel count of the first decoded image is the reference; every later
/// image must match it exactly. Labels are parsed and validated by
/// [`LabelMatrix::from_file`]. `prefix` only decorates progress messages.
///
/// On success the returned matrices are index-aligned with `image_files`.
pub fn check_images_and_labels(
    image_files: &[PathBuf],
    label_files: &[PathBuf],
    prefix: &str,
    progress: &dyn Progress,
) -> Result<Vec<LabelMatrix>> {
    debug_assert_eq!(image_files.len(), label_files.len());

    let desc = if prefix.is_empty() {
        "checking image and label".to_string()
    } else {
        format!("{prefix}: checking image and label")
    };
    progress.begin(image_files.len(), &desc);

    let mut labels = Vec::with_capacity(image_files.len());
    let mut reference_channels: Option<u8> = None;
    for (index, (image_path, label_path)) in image_files.iter().zip(label_files).enumerate() {
        let image = decode_image(image_path)?;
        let channels = image.color().channel_count();
        let expected = *reference_channels.get_or_insert(channels);
        if channels != expected {
            return Err(DatasetError::ChannelMismatch {
                path: image_path.clone(),
                expected,
                got: channels,
            });
        }

        labels.push(LabelMatrix::from_file(label_path)?);
        debug!(image = %image_path.display(), "pair checked");
        progress.update(index, image_files.len());
    }
    progress.finish();
    Ok(labels)
}
