// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Shape masking.
//!
//! The mask is a square of side `scale * min(width, height)` centred on the
//! manipulation's center. Everything outside the clip path, or outside the
//! source image, becomes fully transparent.

use crate::models::shape::{MaskShape, ShapeManipulation};
use image::{DynamicImage, GenericImageView, RgbaImage};

/// Corner radius of the rounded shape, relative to the mask side.
pub const ROUNDED_CORNER_RATIO: f64 = 0.2;

/// Cut `image` with `shape` placed by `placement`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn apply_mask(image: &DynamicImage, shape: MaskShape, placement: &ShapeManipulation) -> RgbaImage {
    let (width, height) = image.dimensions();
    let (width_f, height_f) = (width as f64, height as f64);
    let side_f = placement.side(width_f, height_f).max(1.0);
    let side = side_f.round().max(1.0) as u32;
    let center = placement.center_in(width_f, height_f);
    let origin_x = center.x - side_f / 2.0;
    let origin_y = center.y - side_f / 2.0;
    let texel = side_f / side as f64;

    let source = image.to_rgba8();
    let mut masked = RgbaImage::new(side, side);
    for (px, py, pixel) in masked.enumerate_pixels_mut() {
        let local_x = (px as f64 + 0.5) * texel;
        let local_y = (py as f64 + 0.5) * texel;
        if !contains(shape, local_x, local_y, side_f) {
            continue;
        }
        let sx = (origin_x + local_x).floor();
        let sy = (origin_y + local_y).floor();
        if sx < 0.0 || sy < 0.0 || sx >= width_f || sy >= height_f {
            continue;
        }
        *pixel = *source.get_pixel(sx as u32, sy as u32);
    }
    masked
}

/// Whether a point (relative to the mask's top-left corner) is inside the clip path.
fn contains(shape: MaskShape, x: f64, y: f64, side: f64) -> bool {
    match shape {
        MaskShape::Square => true,
        MaskShape::Circle => {
            let radius = side / 2.0;
            (x - radius).powi(2) + (y - radius).powi(2) <= radius * radius
        }
        MaskShape::Rounded => {
            let radius = side * ROUNDED_CORNER_RATIO;
            let nearest_x = x.clamp(radius, side - radius);
            let nearest_y = y.clamp(radius, side - radius);
            (x - nearest_x).powi(2) + (y - nearest_y).powi(2) <= radius * radius
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn opaque(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba([200, 10, 10, 255])))
    }

    #[test]
    fn test_circle_clears_corners() {
        let masked = apply_mask(&opaque(64, 64), MaskShape::Circle, &ShapeManipulation::default());
        assert_eq!(masked.dimensions(), (64, 64));
        assert_eq!(masked.get_pixel(0, 0)[3], 0);
        assert_eq!(masked.get_pixel(63, 63)[3], 0);
        assert_eq!(masked.get_pixel(32, 32)[3], 255);
        assert_eq!(masked.get_pixel(32, 0)[3], 255);
    }

    #[test]
    fn test_rounded_keeps_more_than_circle() {
        let placement = ShapeManipulation::default();
        let rounded = apply_mask(&opaque(64, 64), MaskShape::Rounded, &placement);
        assert_eq!(rounded.get_pixel(0, 0)[3], 0);
        // Close to a corner but inside the rounded square, outside the circle.
        assert_eq!(rounded.get_pixel(8, 8)[3], 255);
        let circle = apply_mask(&opaque(64, 64), MaskShape::Circle, &placement);
        assert_eq!(circle.get_pixel(8, 8)[3], 0);
    }

    #[test]
    fn test_square_is_fully_opaque_inside_image() {
        let placement = ShapeManipulation {
            scale: 0.5,
            ..Default::default()
        };
        let masked = apply_mask(&opaque(80, 40), MaskShape::Square, &placement);
        assert_eq!(masked.dimensions(), (20, 20));
        assert!(masked.pixels().all(|p| p[3] == 255));
    }

    #[test]
    fn test_area_outside_source_is_transparent() {
        let placement = ShapeManipulation {
            center_x: 0.0,
            center_y: 0.5,
            scale: 1.0,
        };
        let masked = apply_mask(&opaque(40, 40), MaskShape::Square, &placement);
        assert_eq!(masked.get_pixel(5, 20)[3], 0);
        assert_eq!(masked.get_pixel(30, 20)[3], 255);
    }
}
