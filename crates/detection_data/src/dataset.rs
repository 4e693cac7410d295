//! The validated, indexable detection dataset.

use crate::error::Result;
use crate::files::list_image_files;
use crate::labels::{image_to_label_path, LabelMatrix};
use crate::progress::{NoProgress, Progress};
use crate::sample::{materialize, Sample};
use crate::validate::check_images_and_labels;
use std::path::{Path, PathBuf};
use tracing::info;

/// An eagerly validated collection of (image, label) pairs that serves
/// geometrically-normalized samples on demand.
///
/// Construction runs the whole build pipeline synchronously: file discovery,
/// label-path mapping, and pairwise validation. Any violation aborts the
/// build, so an existing `DetectionDataset` is fully validated. After
/// construction the dataset is immutable and can be shared read-only across
/// threads; [`get`](Self::get) is reentrant and keeps no cross-call state.
#[derive(Debug)]
pub struct DetectionDataset {
    image_files: Vec<PathBuf>,
    labels: Vec<LabelMatrix>,
    img_size: u32,
}

impl DetectionDataset {
    /// Builds a dataset from image directories and/or indirection-list files.
    ///
    /// `img_size` is the target edge length samples are resized to. `prefix`
    /// only decorates progress messages (e.g. the split name).
    pub fn new(paths: &[PathBuf], img_size: u32, prefix: &str) -> Result<Self> {
        Self::with_progress(paths, img_size, prefix, &NoProgress)
    }

    /// Like [`new`](Self::new), with an injected progress receiver.
    pub fn with_progress(
        paths: &[PathBuf],
        img_size: u32,
        prefix: &str,
        progress: &dyn Progress,
    ) -> Result<Self> {
        info!("initializing dataset");
        let image_files = list_image_files(paths)?;
        let label_files: Vec<PathBuf> = image_files
            .iter()
            .map(|path| image_to_label_path(path))
            .collect();
        let labels = check_images_and_labels(&image_files, &label_files, prefix, progress)?;
        info!(
            images = image_files.len(),
            labels = labels.len(),
            "dataset initialized"
        );
        Ok(Self {
            image_files,
            labels,
            img_size,
        })
    }

    /// Number of (image, label) pairs.
    pub fn len(&self) -> usize {
        self.image_files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.image_files.is_empty()
    }

    /// The configured target edge length.
    pub fn img_size(&self) -> u32 {
        self.img_size
    }

    /// Path of the image at `index`.
    pub fn image_path(&self, index: usize) -> Option<&Path> {
        self.image_files.get(index).map(PathBuf::as_path)
    }

    /// Validated labels for the image at `index`, without materializing it.
    pub fn label_matrix(&self, index: usize) -> Option<&LabelMatrix> {
        self.labels.get(index)
    }

    /// Materializes the sample at `index`: lazy decode, aspect-preserving
    /// resize to `img_size`, channel-first layout.
    ///
    /// Out-of-bounds indices return `Ok(None)`. Decode failures surface as
    /// errors rather than being skipped or substituted.
    pub fn get(&self, index: usize) -> Result<Option<Sample>> {
        let (Some(path), Some(labels)) = (self.image_files.get(index), self.labels.get(index))
        else {
            return Ok(None);
        };
        materialize(path, self.img_size, labels).map(Some)
    }
}
