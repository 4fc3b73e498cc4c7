// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility types and functions.
//!
//! This module provides the 2D point type shared by the overlay and the
//! imaging code, plus conversions between pixel coordinates and fractional
//! coordinates (0.0 to 1.0) of a bounding box.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A 2D point (or displacement) in whichever frame the caller uses.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Divide both components by `factor`.
    pub fn unscale(self, factor: f64) -> Self {
        Self::new(self.x / factor, self.y / factor)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Convert pixel coordinates to fractional coordinates of a `width` x `height` box.
pub fn normalize_coordinates(pixel_x: f64, pixel_y: f64, width: f64, height: f64) -> Point {
    Point {
        x: pixel_x / width,
        y: pixel_y / height,
    }
}

/// Convert fractional coordinates back to pixel coordinates.
pub fn denormalize_coordinates(point: &Point, width: f64, height: f64) -> (f64, f64) {
    (point.x * width, point.y * height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_denormalize_roundtrip() {
        let width = 1920.0;
        let height = 1080.0;
        let pixel_x = 960.0;
        let pixel_y = 540.0;

        let normalized = normalize_coordinates(pixel_x, pixel_y, width, height);
        let (denorm_x, denorm_y) = denormalize_coordinates(&normalized, width, height);

        assert!((denorm_x - pixel_x).abs() < 0.0001);
        assert!((denorm_y - pixel_y).abs() < 0.0001);
    }

    #[test]
    fn test_normalize_corners() {
        let tl = normalize_coordinates(0.0, 0.0, 200.0, 100.0);
        assert_eq!(tl, Point::new(0.0, 0.0));

        let br = normalize_coordinates(200.0, 100.0, 200.0, 100.0);
        assert_eq!(br, Point::new(1.0, 1.0));
    }

    #[test]
    fn test_point_arithmetic() {
        let delta = Point::new(50.0, -20.0) - Point::new(10.0, 10.0);
        assert_eq!(delta, Point::new(40.0, -30.0));
        assert_eq!(delta.unscale(2.0), Point::new(20.0, -15.0));
        assert_eq!(delta + Point::new(1.0, 1.0), Point::new(41.0, -29.0));
    }
}
