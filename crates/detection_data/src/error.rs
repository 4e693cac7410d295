use std::path::PathBuf;

/// All errors that can occur while resolving, validating, or serving a dataset.
///
/// Every failure during dataset construction is fail-fast: the first violation
/// aborts the whole build and no partial dataset is produced. Each variant
/// carries the offending path and the observed vs. expected values so callers
/// can act on the error without re-scanning the dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// A path spec or file-list entry of an unsupported shape.
    #[error("unsupported path entry `{entry}`: expected {expected}")]
    PathType { entry: String, expected: &'static str },

    /// A resolved manifest path does not exist on the filesystem.
    #[error("path does not exist: {}", .path.display())]
    PathNotFound { path: PathBuf },

    /// `nc` in the manifest does not match the number of class names.
    #[error("class count mismatch: nc = {nc} but {names} names listed")]
    ClassCountMismatch { nc: usize, names: usize },

    /// The mandatory `train` split is absent after resolution.
    #[error("required field `train` is missing from the dataset manifest")]
    MissingTrainSplit,

    /// No files with an accepted image suffix were found.
    #[error("no images found under the given paths")]
    EmptyDataset,

    /// An image's channel count differs from the first image's.
    #[error(
        "channel mismatch for image {}: expected {expected}, got {got}",
        .path.display()
    )]
    ChannelMismatch {
        path: PathBuf,
        expected: u8,
        got: u8,
    },

    /// A label file contains no rows.
    #[error("label file is empty: {}", .path.display())]
    EmptyLabel { path: PathBuf },

    /// A label file is not a rectangular numeric table.
    #[error("malformed label file {}: {detail}", .path.display())]
    LabelShape { path: PathBuf, detail: String },

    /// A label row has the wrong number of columns.
    #[error(
        "label file {} has rows of {got} columns, expected {expected}",
        .path.display()
    )]
    LabelColumnCount {
        path: PathBuf,
        expected: usize,
        got: usize,
    },

    /// A label value is negative.
    #[error("negative value {value} in label file {}", .path.display())]
    NegativeValue { path: PathBuf, value: f32 },

    /// A bounding-box coordinate is outside the normalized (0, 1] range.
    #[error("coordinate {value} outside (0, 1] in label file {}", .path.display())]
    UnnormalizedCoordinate { path: PathBuf, value: f32 },

    /// An image file could not be decoded.
    #[error("failed to decode image {}: {source}", .path.display())]
    ImageDecode {
        path: PathBuf,
        source: image::ImageError,
    },

    /// An underlying I/O failure, with the path it occurred on.
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The manifest file is not valid YAML or is missing required keys.
    #[error("failed to parse dataset manifest {}: {source}", .path.display())]
    ManifestParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

pub type Result<T> = std::result::Result<T, DatasetError>;
