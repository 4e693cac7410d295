//! Label path mapping and label matrix parsing.

use crate::error::{DatasetError, Result};
use ndarray::Array2;
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

/// Columns per label row: `[class_id, x, y, w, h]`.
pub const LABEL_COLUMNS: usize = 5;

/// Maps an image path to its label path.
///
/// The first occurrence of `images` in the path string becomes `labels`, and
/// the file suffix becomes `.txt`.
///
/// Precondition: the image path must contain an `images` directory component.
/// The substitution is a blind text replacement, so a path without one
/// degrades to a no-op on the directory part (only the suffix changes).
pub fn image_to_label_path(image_path: &Path) -> PathBuf {
    let swapped = image_path
        .to_string_lossy()
        .replacen("images", "labels", 1);
    PathBuf::from(swapped).with_extension("txt")
}

/// Per-image matrix of object annotations, one `[class_id, x, y, w, h]` row
/// per instance, with coordinates in center/width/height form normalized to
/// (0, 1].
///
/// Rows are sorted and deduplicated at construction; the matrix is immutable
/// afterwards and owned by the validated dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelMatrix(Array2<f32>);

impl LabelMatrix {
    /// Reads and validates a whitespace-delimited label file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    /// Parses label text: one object per non-blank line, whitespace-separated
    /// numeric fields. Validation order: dedup, non-empty, rectangular,
    /// column count, non-negative, coordinates in (0, 1]. The first violation
    /// aborts with an error naming `path`.
    pub fn parse(text: &str, path: &Path) -> Result<Self> {
        let mut rows: Vec<Vec<f32>> = Vec::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let row = line
                .split_whitespace()
                .map(str::parse::<f32>)
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(|_| DatasetError::LabelShape {
                    path: path.to_path_buf(),
                    detail: "non-numeric value".to_string(),
                })?;
            rows.push(row);
        }

        // Identical rows collapse to one; rows come out sorted, which also
        // makes the stored order independent of file order.
        rows.sort_by(compare_rows);
        rows.dedup();

        if rows.is_empty() {
            return Err(DatasetError::EmptyLabel {
                path: path.to_path_buf(),
            });
        }
        let columns = rows[0].len();
        if rows.iter().any(|row| row.len() != columns) {
            return Err(DatasetError::LabelShape {
                path: path.to_path_buf(),
                detail: "rows have differing lengths".to_string(),
            });
        }
        if columns != LABEL_COLUMNS {
            return Err(DatasetError::LabelColumnCount {
                path: path.to_path_buf(),
                expected: LABEL_COLUMNS,
                got: columns,
            });
        }
        for row in &rows {
            for &value in row {
                if value < 0.0 {
                    return Err(DatasetError::NegativeValue {
                        path: path.to_path_buf(),
                        value,
                    });
                }
            }
            for &value in &row[1..] {
                if !(value > 0.0 && value <= 1.0) {
                    return Err(DatasetError::UnnormalizedCoordinate {
                        path: path.to_path_buf(),
                        value,
                    });
                }
            }
        }

        let count = rows.len();
        let flat: Vec<f32> = rows.into_iter().flatten().collect();
        let matrix =
            Array2::from_shape_vec((count, LABEL_COLUMNS), flat).map_err(|error| {
                DatasetError::LabelShape {
                    path: path.to_path_buf(),
                    detail: error.to_string(),
                }
            })?;
        Ok(Self(matrix))
    }

    /// Number of object instances.
    pub fn len(&self) -> usize {
        self.0.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The underlying `(instances, 5)` matrix.
    pub fn as_array(&self) -> &Array2<f32> {
        &self.0
    }
}

fn compare_rows(a: &Vec<f32>, b: &Vec<f32>) -> Ordering {
    for (x, y) in a.iter().zip(b.iter()) {
        match x.total_cmp(y) {
            Ordering::Equal => continue,
            unequal => return unequal,
        }
    }
    a.len().cmp(&b.len())
}
