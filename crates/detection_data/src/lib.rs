//! Manifest-driven dataset resolution, validation, and sample
//! materialization for object-detection training.
//!
//! Build pipeline: manifest resolution -> file discovery -> label mapping ->
//! pairwise validation. After construction the dataset is immutable and
//! serves channel-first samples per index, safely shared across workers.

pub mod dataset;
pub mod error;
pub mod files;
pub mod labels;
pub mod manifest;
pub mod progress;
pub mod sample;
pub mod validate;

pub use dataset::DetectionDataset;
pub use error::DatasetError;
pub use files::IMAGE_FORMATS;
pub use labels::LabelMatrix;
pub use manifest::{load_dataset_manifest, DatasetManifest, PathSpec, ResolvedManifest};
pub use progress::{LogProgress, NoProgress, Progress};
pub use sample::Sample;
