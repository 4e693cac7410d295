//! End-to-end construction and sample-access tests.
//!
//! Covers:
//! - Building a dataset from an image directory and from an indirection list
//! - Sample materialization shape and label pairing
//! - Fail-fast construction (no dataset on first violation)
//! - Manifest-to-dataset wiring
//! - Concurrent read-only sample access

mod common;

use anyhow::Result;
use common::{make_detection_fixture, write_image, write_label};
use detection_data::{load_dataset_manifest, DatasetError, DetectionDataset};
use std::fs;
use std::sync::Arc;
use tempfile::tempdir;

#[test]
fn test_build_from_directory_and_materialize() -> Result<()> {
    let dir = tempdir()?;
    make_detection_fixture(dir.path())?;

    let dataset = DetectionDataset::new(&[dir.path().join("images")], 416, "train")?;
    assert_eq!(dataset.len(), 3);
    assert_eq!(dataset.img_size(), 416);

    // Sorted by path string, so img0 comes first.
    let sample = dataset.get(0)?.expect("index 0 in bounds");
    // 600x300 resized so the larger edge is 416, channel-first layout.
    assert_eq!(sample.image.dim(), (3, 208, 416));
    assert!(sample.image.is_standard_layout());
    assert_eq!(sample.labels.len(), 1);
    assert_eq!(sample.labels.as_array()[[0, 0]], 0.0);

    // Solid RGB (10, 20, 30) is served with the channel axis reversed.
    assert_eq!(sample.image[[0, 0, 0]], 30);
    assert_eq!(sample.image[[2, 0, 0]], 10);

    // Labels pair by index.
    let sample2 = dataset.get(2)?.expect("index 2 in bounds");
    assert_eq!(sample2.labels.as_array()[[0, 0]], 2.0);

    // Out of bounds is None, not an error.
    assert!(dataset.get(3)?.is_none());
    Ok(())
}

#[test]
fn test_build_from_indirection_list() -> Result<()> {
    let dir = tempdir()?;
    make_detection_fixture(dir.path())?;

    // List only two of the three images, relative to the list file.
    let list = dir.path().join("train.txt");
    fs::write(&list, "images/img0.png\n\nimages/img2.png\n")?;

    let dataset = DetectionDataset::new(&[list], 416, "")?;
    assert_eq!(dataset.len(), 2);
    assert_eq!(
        dataset.image_path(1).unwrap(),
        dir.path().join("images/img2.png")
    );
    Ok(())
}

#[test]
fn test_construction_is_fail_fast() -> Result<()> {
    let dir = tempdir()?;
    make_detection_fixture(dir.path())?;
    // Empty the middle label; construction must abort naming it and no
    // dataset may come into existence.
    let offending = dir.path().join("labels/img1.txt");
    fs::write(&offending, "")?;

    let err = DetectionDataset::new(&[dir.path().join("images")], 416, "train").unwrap_err();
    match err {
        DatasetError::EmptyLabel { path } => assert_eq!(path, offending),
        other => panic!("expected EmptyLabel, got {other:?}"),
    }
    Ok(())
}

#[test]
fn test_empty_directory_is_rejected() -> Result<()> {
    let dir = tempdir()?;
    fs::create_dir(dir.path().join("images"))?;

    let err = DetectionDataset::new(&[dir.path().join("images")], 416, "").unwrap_err();
    assert!(matches!(err, DatasetError::EmptyDataset));
    Ok(())
}

#[test]
fn test_manifest_to_dataset() -> Result<()> {
    let dir = tempdir()?;
    make_detection_fixture(dir.path())?;

    let yaml = format!(
        "path: {}\ntrain: images\nnc: 3\nnames: [cat, dog, bird]\n",
        dir.path().display()
    );
    let manifest_path = dir.path().join("dataset.yaml");
    fs::write(&manifest_path, yaml)?;

    let resolved = load_dataset_manifest(&manifest_path)?;
    assert_eq!(resolved.train, vec![dir.path().join("images")]);

    let dataset = DetectionDataset::new(&resolved.train, 320, "train")?;
    assert_eq!(dataset.len(), 3);

    let sample = dataset.get(1)?.expect("in bounds");
    assert_eq!(sample.image.dim(), (3, 160, 320));
    Ok(())
}

#[test]
fn test_concurrent_sample_access() -> Result<()> {
    let dir = tempdir()?;
    make_detection_fixture(dir.path())?;

    let dataset = Arc::new(DetectionDataset::new(
        &[dir.path().join("images")],
        64,
        "",
    )?);

    let threads: Vec<_> = (0..4)
        .map(|_| {
            let dataset = Arc::clone(&dataset);
            std::thread::spawn(move || {
                for index in (0..dataset.len()).rev() {
                    let sample = dataset.get(index).unwrap().unwrap();
                    assert_eq!(sample.image.dim().0, 3);
                }
            })
        })
        .collect();

    for thread in threads {
        thread.join().unwrap();
    }
    Ok(())
}

#[test]
fn test_mixed_suffixes_and_non_images_ignored() -> Result<()> {
    let dir = tempdir()?;
    let images = dir.path().join("images");
    let labels = dir.path().join("labels");
    fs::create_dir_all(&images)?;
    fs::create_dir_all(&labels)?;

    write_image(&images.join("a.jpg"), 32, 32, [1, 2, 3])?;
    write_image(&images.join("b.PNG"), 32, 32, [1, 2, 3])?;
    fs::write(images.join("notes.txt"), "not an image")?;
    write_label(&labels.join("a.txt"), &["0 0.5 0.5 0.5 0.5"])?;
    write_label(&labels.join("b.txt"), &["0 0.5 0.5 0.5 0.5"])?;

    let dataset = DetectionDataset::new(&[images.clone()], 32, "")?;
    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.image_path(0).unwrap(), images.join("a.jpg"));
    assert_eq!(dataset.image_path(1).unwrap(), images.join("b.PNG"));
    Ok(())
}
