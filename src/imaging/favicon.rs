// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Favicon rendering and encoding.
//!
//! Turns an edited image into square icons at each requested size and
//! writes them out as PNG files plus one multi-resolution ICO.

use super::transform::replay;
use crate::models::recipe::EditRecipe;
use anyhow::{Context, Result};
use image::codecs::ico::{IcoEncoder, IcoFrame};
use image::imageops::{self, FilterType};
use image::{DynamicImage, ExtendedColorType, GenericImageView, ImageFormat, RgbaImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Largest frame an ICO file can hold.
pub const MAX_ICO_SIZE: u32 = 256;

/// One rendered icon.
#[derive(Debug, Clone)]
pub struct RenderedIcon {
    pub size: u32,
    pub image: RgbaImage,
}

/// Center `image` on a transparent square canvas.
pub fn square_canvas(image: &DynamicImage) -> RgbaImage {
    let (width, height) = image.dimensions();
    let side = width.max(height);
    let mut canvas = RgbaImage::new(side, side);
    imageops::overlay(
        &mut canvas,
        &image.to_rgba8(),
        i64::from((side - width) / 2),
        i64::from((side - height) / 2),
    );
    canvas
}

/// Resize to every size in `sizes` (zero sizes are skipped).
pub fn render_sizes(image: &DynamicImage, sizes: &[u32]) -> Vec<RenderedIcon> {
    let square = square_canvas(image);
    sizes
        .iter()
        .filter(|size| **size > 0)
        .map(|&size| RenderedIcon {
            size,
            image: imageops::resize(&square, size, size, FilterType::Lanczos3),
        })
        .collect()
}

/// Replay a recipe on its source image and render every requested size.
pub fn render_recipe(source: &DynamicImage, recipe: &EditRecipe) -> Result<Vec<RenderedIcon>> {
    let edited = replay(source, &recipe.steps)?;
    Ok(render_sizes(&edited, &recipe.sizes))
}

/// Encode an image as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(buffer.into_inner())
}

/// Encode every icon that fits into one ICO file.
pub fn encode_ico(icons: &[RenderedIcon]) -> Result<Vec<u8>> {
    let frames = icons
        .iter()
        .filter(|icon| icon.size <= MAX_ICO_SIZE)
        .map(|icon| {
            IcoFrame::as_png(icon.image.as_raw(), icon.size, icon.size, ExtendedColorType::Rgba8)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut buffer = Vec::new();
    IcoEncoder::new(&mut buffer).encode_images(&frames)?;
    Ok(buffer)
}

/// Write `<stem>-<size>.png` for each icon and `<stem>.ico` into `dir`.
///
/// Returns the written paths.
pub fn write_icons(dir: &Path, stem: &str, icons: &[RenderedIcon]) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let mut written = Vec::with_capacity(icons.len() + 1);
    for icon in icons {
        let path = dir.join(format!("{stem}-{}.png", icon.size));
        std::fs::write(&path, encode_png(&icon.image)?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        written.push(path);
    }

    if icons.iter().any(|icon| icon.size <= MAX_ICO_SIZE) {
        let path = dir.join(format!("{stem}.ico"));
        std::fs::write(&path, encode_ico(icons)?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        written.push(path);
    }

    log::info!("Wrote {} icon files to {}", written.len(), dir.display());
    Ok(written)
}
