// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric edits: crop, rotate, flip, and recipe replay.

use super::mask::apply_mask;
use crate::models::recipe::EditStep;
use crate::models::region::PixelRect;
use anyhow::{bail, Result};
use image::{DynamicImage, GenericImageView};

/// Copy the part of `image` covered by `rect`.
///
/// The rectangle is intersected with the image first; an empty intersection
/// is an error.
pub fn crop(image: &DynamicImage, rect: PixelRect) -> Result<DynamicImage> {
    let (width, height) = image.dimensions();
    let x = rect.x.min(width);
    let y = rect.y.min(height);
    let w = rect.width.min(width - x);
    let h = rect.height.min(height - y);
    if w == 0 || h == 0 {
        bail!(
            "Crop {}x{} at ({}, {}) lies outside the {}x{} image",
            rect.width,
            rect.height,
            rect.x,
            rect.y,
            width,
            height
        );
    }
    Ok(image.crop_imm(x, y, w, h))
}

/// Apply one recipe step.
pub fn apply_step(image: &DynamicImage, step: &EditStep) -> Result<DynamicImage> {
    let edited = match step {
        EditStep::RotateCw => image.rotate90(),
        EditStep::RotateCcw => image.rotate270(),
        EditStep::FlipHorizontal => image.fliph(),
        EditStep::FlipVertical => image.flipv(),
        EditStep::Crop(rect) => crop(image, *rect)?,
        EditStep::Mask(mask) => {
            DynamicImage::ImageRgba8(apply_mask(image, mask.shape, &mask.placement))
        }
    };
    Ok(edited)
}

/// Replay `steps` in order on top of `source`.
pub fn replay(source: &DynamicImage, steps: &[EditStep]) -> Result<DynamicImage> {
    let mut image = source.clone();
    for step in steps {
        image = apply_step(&image, step)?;
    }
    Ok(image)
}
