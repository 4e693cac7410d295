//! Dataset manifest loading and path-spec resolution.
//!
//! A manifest is a small YAML document naming the dataset root, the
//! `train`/`val`/`test` splits, the class count and the class names. Each
//! split entry may be a single relative path, an ordered list of relative
//! paths, or absent (only `train` is mandatory).

use crate::error::{DatasetError, Result};
use serde::Deserialize;
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Declarative dataset manifest as authored on disk.
///
/// Read once at resolution time and never mutated. The split fields are kept
/// as raw YAML values because their shape is polymorphic; [`PathSpec`] gives
/// them a typed form.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetManifest {
    /// Root directory all split entries are resolved against.
    pub path: PathBuf,
    #[serde(default)]
    pub train: Option<Value>,
    #[serde(default)]
    pub val: Option<Value>,
    #[serde(default)]
    pub test: Option<Value>,
    /// Number of classes; must equal `names.len()`.
    pub nc: usize,
    /// Ordered class names.
    pub names: Vec<String>,
}

/// A manifest split entry: absent, one relative path, or an ordered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSpec {
    Absent,
    Single(PathBuf),
    Many(Vec<PathBuf>),
}

impl PathSpec {
    /// Parses a raw manifest value by exhaustive shape match.
    ///
    /// `field` names the manifest key, only for error context. Any shape other
    /// than null, string, or sequence-of-strings is a [`DatasetError::PathType`].
    pub fn from_value(field: &str, value: Option<&Value>) -> Result<Self> {
        match value {
            None | Some(Value::Null) => Ok(PathSpec::Absent),
            Some(Value::String(path)) => Ok(PathSpec::Single(PathBuf::from(path))),
            Some(Value::Sequence(elements)) => {
                let mut paths = Vec::with_capacity(elements.len());
                for element in elements {
                    match element {
                        Value::String(path) => paths.push(PathBuf::from(path)),
                        _ => {
                            return Err(DatasetError::PathType {
                                entry: field.to_string(),
                                expected: "a list of relative path strings",
                            })
                        }
                    }
                }
                Ok(PathSpec::Many(paths))
            }
            Some(_) => Err(DatasetError::PathType {
                entry: field.to_string(),
                expected: "a string, a list of strings, or nothing",
            }),
        }
    }

    /// Joins each relative path with `root`, preserving input order.
    /// `Absent` resolves to `None`.
    pub fn resolve(&self, root: &Path) -> Option<Vec<PathBuf>> {
        match self {
            PathSpec::Absent => None,
            PathSpec::Single(path) => Some(vec![root.join(path)]),
            PathSpec::Many(paths) => Some(paths.iter().map(|p| root.join(p)).collect()),
        }
    }
}

/// Manifest after split resolution: absolute paths, all verified to exist.
#[derive(Debug, Clone)]
pub struct ResolvedManifest {
    pub train: Vec<PathBuf>,
    pub val: Option<Vec<PathBuf>>,
    pub test: Option<Vec<PathBuf>>,
    pub nc: usize,
    pub names: Vec<String>,
}

/// Loads a manifest file and resolves it. See [`resolve_manifest`] for the
/// checks performed after parsing.
pub fn load_dataset_manifest(path: &Path) -> Result<ResolvedManifest> {
    info!(path = %path.display(), "loading dataset manifest");
    let text = fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let manifest: DatasetManifest =
        serde_yaml::from_str(&text).map_err(|source| DatasetError::ManifestParse {
            path: path.to_path_buf(),
            source,
        })?;
    resolve_manifest(&manifest)
}

/// Resolves the three split specs against the manifest root and validates the
/// result: `train` must be present, every resolved path must exist, and `nc`
/// must match the number of class names.
pub fn resolve_manifest(manifest: &DatasetManifest) -> Result<ResolvedManifest> {
    let root = &manifest.path;
    let train = PathSpec::from_value("train", manifest.train.as_ref())?.resolve(root);
    let val = PathSpec::from_value("val", manifest.val.as_ref())?.resolve(root);
    let test = PathSpec::from_value("test", manifest.test.as_ref())?.resolve(root);

    let train = train.ok_or(DatasetError::MissingTrainSplit)?;

    for split in [Some(&train), val.as_ref(), test.as_ref()].into_iter().flatten() {
        for path in split {
            if !path.exists() {
                return Err(DatasetError::PathNotFound { path: path.clone() });
            }
        }
    }

    if manifest.nc != manifest.names.len() {
        return Err(DatasetError::ClassCountMismatch {
            nc: manifest.nc,
            names: manifest.names.len(),
        });
    }

    info!(nc = manifest.nc, "dataset manifest resolved");
    Ok(ResolvedManifest {
        train,
        val,
        test,
        nc: manifest.nc,
        names: manifest.names.clone(),
    })
}
