//! Image file discovery.
//!
//! Each resolved split entry is either a directory, expanded recursively, or
//! an indirection file whose non-blank lines are relative paths resolved
//! against the file's own parent directory. Candidates are then filtered by
//! image suffix and sorted by path string so the resulting index order is
//! deterministic.

use crate::error::{DatasetError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Accepted image suffixes, matched case-insensitively.
pub const IMAGE_FORMATS: [&str; 8] = ["bmp", "jpg", "jpeg", "jpe", "png", "tif", "tiff", "webp"];

/// Whether the path carries an accepted image suffix (case-insensitive).
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .map_or(false, |extension| {
            IMAGE_FORMATS.contains(&extension.to_lowercase().as_str())
        })
}

/// Expands every entry into candidate file paths, before suffix filtering.
///
/// Directories are walked recursively at any depth. Files are treated as
/// indirection lists, one relative path per non-blank line. An entry that is
/// neither is a [`DatasetError::PathType`].
pub fn collect_candidate_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut candidates = Vec::new();
    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path) {
                let entry = entry.map_err(|error| DatasetError::Io {
                    path: error
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| path.clone()),
                    source: error.into(),
                })?;
                if entry.file_type().is_file() {
                    candidates.push(entry.into_path());
                }
            }
        } else if path.is_file() {
            let file = File::open(path).map_err(|source| DatasetError::Io {
                path: path.clone(),
                source,
            })?;
            let parent = path.parent().unwrap_or_else(|| Path::new("")).to_path_buf();
            for line in BufReader::new(file).lines() {
                let line = line.map_err(|source| DatasetError::Io {
                    path: path.clone(),
                    source,
                })?;
                let entry = line.trim();
                if entry.is_empty() {
                    continue;
                }
                candidates.push(parent.join(normalize_list_entry(entry)));
            }
        } else {
            return Err(DatasetError::PathType {
                entry: path.display().to_string(),
                expected: "an existing file or directory",
            });
        }
    }
    Ok(candidates)
}

/// Normalizes one indirection-list line.
///
/// Lists authored on Windows may carry backslash separators and a leading
/// root component; both are normalized so the entry stays relative to the
/// list file's parent directory.
fn normalize_list_entry(entry: &str) -> PathBuf {
    let forward = entry.replace('\\', "/");
    PathBuf::from(forward.trim_start_matches('/'))
}

/// Expands, filters, and sorts the final image list.
///
/// Candidates whose suffix is not in [`IMAGE_FORMATS`] are dropped; the
/// survivors are sorted by path string. An empty result is a
/// [`DatasetError::EmptyDataset`].
pub fn list_image_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut images: Vec<PathBuf> = collect_candidate_files(paths)?
        .into_iter()
        .filter(|path| is_image_file(path))
        .collect();
    if images.is_empty() {
        return Err(DatasetError::EmptyDataset);
    }
    images.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    Ok(images)
}
