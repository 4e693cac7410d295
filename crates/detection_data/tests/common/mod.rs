use anyhow::Result;
use image::{Rgb, RgbImage};
use std::fs;
use std::path::Path;

/// Writes a solid-color RGB PNG at `path`.
pub fn write_image(path: &Path, width: u32, height: u32, color: [u8; 3]) -> Result<()> {
    let mut img = RgbImage::new(width, height);
    for pixel in img.pixels_mut() {
        *pixel = Rgb(color);
    }
    img.save(path)?;
    Ok(())
}

/// Writes a label file with the given rows.
pub fn write_label(path: &Path, rows: &[&str]) -> Result<()> {
    fs::write(path, rows.join("\n"))?;
    Ok(())
}

/// Lays out a small valid dataset under `root`:
///
/// ```text
/// root/images/{img0.png, img1.png, img2.png}
/// root/labels/{img0.txt, img1.txt, img2.txt}
/// ```
///
/// Images are 600x300 so the 416 resize invariant is easy to assert.
pub fn make_detection_fixture(root: &Path) -> Result<()> {
    let images = root.join("images");
    let labels = root.join("labels");
    fs::create_dir_all(&images)?;
    fs::create_dir_all(&labels)?;

    for i in 0..3 {
        write_image(&images.join(format!("img{i}.png")), 600, 300, [10, 20, 30])?;
        write_label(
            &labels.join(format!("img{i}.txt")),
            &[&format!("{i} 0.5 0.5 0.25 0.25")],
        )?;
    }
    Ok(())
}
