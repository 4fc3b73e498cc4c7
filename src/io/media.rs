// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Media file loading.
//!
//! This module handles decoding source images for editing.

use anyhow::{Context, Result};
use image::{DynamicImage, GenericImageView};
use std::path::Path;

/// Extensions offered in the open dialog.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "ico", "webp", "tiff", "tif"];

/// A decoded image and its dimensions.
#[derive(Debug)]
pub struct LoadedImage {
    pub image: DynamicImage,
    pub width: u32,
    pub height: u32,
}

impl LoadedImage {
    pub fn from_image(image: DynamicImage) -> Self {
        let (width, height) = image.dimensions();
        Self { image, width, height }
    }
}

/// Decode the image at `path`.
pub fn load_image(path: &Path) -> Result<LoadedImage> {
    let image = image::open(path).with_context(|| format!("Failed to decode {}", path.display()))?;
    Ok(LoadedImage::from_image(image))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_load_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("source.png");
        RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 4])).save(&path).unwrap();

        let loaded = load_image(&path).unwrap();
        assert_eq!((loaded.width, loaded.height), (3, 2));
        assert_eq!(loaded.image.to_rgba8().get_pixel(0, 0), &Rgba([1, 2, 3, 4]));
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = load_image(Path::new("/definitely/missing.png")).unwrap_err();
        assert!(err.to_string().contains("missing.png"));
    }
}
