// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Rectangular regions.
//!
//! `CropRect` lives in source-image pixel space and may hold fractional
//! values while it is being dragged. `PixelRect` is its rounded form handed
//! to the imaging code, and `DisplayBox` is a rectangle on screen.

use crate::util::geometry::Point;
use serde::{Deserialize, Serialize};

/// A crop box in source-image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Bring the rectangle inside a `image_width` x `image_height` image.
    ///
    /// Sizes are floored at `min_size` and positions at zero. A rectangle
    /// hanging over the far edge is pushed back; if that would take it past
    /// the near edge it keeps its position and shrinks to fit instead.
    /// Clamping a clamped rectangle returns it unchanged.
    pub fn clamped(self, image_width: f64, image_height: f64, min_size: f64) -> Self {
        let (x, width) = clamp_span(self.x, self.width, image_width, min_size);
        let (y, height) = clamp_span(self.y, self.height, image_height, min_size);
        Self::new(x, y, width, height)
    }

    /// Round every field independently, half away from zero.
    ///
    /// No compensation is applied between fields: when `x` rounds up and
    /// `width` rounds down the box shifts by a pixel.
    pub fn rounded(&self) -> PixelRect {
        PixelRect {
            x: round_to_pixel(self.x),
            y: round_to_pixel(self.y),
            width: round_to_pixel(self.width),
            height: round_to_pixel(self.height),
        }
    }
}

fn clamp_span(start: f64, length: f64, limit: f64, min_length: f64) -> (f64, f64) {
    let mut length = length.max(min_length);
    let mut start = start.max(0.0);
    if start + length > limit {
        if limit - length >= 0.0 {
            start = limit - length;
        } else {
            length = (limit - start).max(min_length);
            if start + length > limit {
                start = (limit - length).max(0.0);
            }
        }
    }
    (start, length)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_to_pixel(value: f64) -> u32 {
    value.round().max(0.0) as u32
}

/// Integer pixel rectangle in source-image space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// A rectangle in display (screen) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DisplayBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl DisplayBox {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x <= self.right()
            && point.y >= self.top
            && point.y <= self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_within(rect: &CropRect, w: f64, h: f64, min: f64) {
        assert!(rect.x >= 0.0 && rect.y >= 0.0, "{rect:?}");
        assert!(rect.width >= min && rect.height >= min, "{rect:?}");
        assert!(rect.right() <= w && rect.bottom() <= h, "{rect:?}");
    }

    #[test]
    fn test_clamp_pushes_back_inside() {
        let rect = CropRect::new(150.0, -10.0, 100.0, 40.0).clamped(200.0, 200.0, 16.0);
        assert_eq!(rect, CropRect::new(100.0, 0.0, 100.0, 40.0));
    }

    #[test]
    fn test_clamp_floors_size() {
        let rect = CropRect::new(10.0, 10.0, -5.0, 3.0).clamped(200.0, 200.0, 16.0);
        assert_eq!(rect, CropRect::new(10.0, 10.0, 16.0, 16.0));
    }

    #[test]
    fn test_clamp_shrinks_oversized_rect() {
        let rect = CropRect::new(-20.0, 5.0, 260.0, 50.0).clamped(200.0, 100.0, 16.0);
        assert_eq!(rect, CropRect::new(0.0, 5.0, 200.0, 50.0));
    }

    #[test]
    fn test_clamp_shrinks_in_place_when_push_back_fails() {
        let rect = CropRect::new(20.0, 20.0, 210.0, 210.0).clamped(200.0, 200.0, 16.0);
        assert_eq!(rect, CropRect::new(20.0, 20.0, 180.0, 180.0));
    }

    #[test]
    fn test_clamp_keeps_min_size_near_far_edge() {
        let rect = CropRect::new(195.0, 0.0, 210.0, 50.0).clamped(200.0, 200.0, 16.0);
        assert_eq!(rect, CropRect::new(184.0, 0.0, 16.0, 50.0));
    }

    #[test]
    fn test_clamp_is_idempotent() {
        let inputs = [
            CropRect::new(-30.0, 20.0, 160.0, 160.0),
            CropRect::new(190.0, 190.0, 1.0, 1.0),
            CropRect::new(0.3, 7.7, 500.0, 12.0),
            CropRect::new(33.3, 66.6, 99.9, 120.1),
            CropRect::new(20.0, 195.0, 210.0, 260.0),
        ];
        for input in inputs {
            let once = input.clamped(200.0, 200.0, 16.0);
            assert_within(&once, 200.0, 200.0, 16.0);
            assert_eq!(once.clamped(200.0, 200.0, 16.0), once);
        }
    }

    #[test]
    fn test_rounded_has_no_cross_field_compensation() {
        let rect = CropRect::new(19.6, 20.4, 159.5, 160.5);
        assert_eq!(rect.rounded(), PixelRect::new(20, 20, 160, 161));
    }

    #[test]
    fn test_display_box_contains() {
        let display = DisplayBox {
            left: 10.0,
            top: 10.0,
            width: 20.0,
            height: 20.0,
        };
        assert!(display.contains(Point::new(10.0, 30.0)));
        assert!(!display.contains(Point::new(31.0, 15.0)));
        assert_eq!(display.center(), Point::new(20.0, 20.0));
    }
}
