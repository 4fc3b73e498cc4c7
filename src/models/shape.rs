// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Shape mask data structures.
//!
//! A mask is a clip path (circle, rounded square or square) positioned over
//! the image by a `ShapeManipulation`: a fractional center and a scale
//! relative to the shorter image side.

use crate::util::geometry::{denormalize_coordinates, Point};
use serde::{Deserialize, Serialize};

/// Clip path used when masking the icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaskShape {
    #[default]
    Circle,
    Rounded,
    Square,
}

impl MaskShape {
    pub const ALL: [MaskShape; 3] = [MaskShape::Circle, MaskShape::Rounded, MaskShape::Square];

    pub fn label(&self) -> &'static str {
        match self {
            MaskShape::Circle => "Circle",
            MaskShape::Rounded => "Rounded",
            MaskShape::Square => "Square",
        }
    }
}

/// Position and size of a mask over its bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeManipulation {
    /// Horizontal center as a fraction of the box width.
    pub center_x: f64,
    /// Vertical center as a fraction of the box height.
    pub center_y: f64,
    /// Mask side as a fraction of the shorter box dimension.
    pub scale: f64,
}

impl Default for ShapeManipulation {
    fn default() -> Self {
        Self {
            center_x: 0.5,
            center_y: 0.5,
            scale: 1.0,
        }
    }
}

impl ShapeManipulation {
    /// Mask side length in pixels for a `width` x `height` box.
    pub fn side(&self, width: f64, height: f64) -> f64 {
        self.scale * width.min(height)
    }

    /// Mask center in pixels for a `width` x `height` box.
    pub fn center_in(&self, width: f64, height: f64) -> Point {
        let (x, y) = denormalize_coordinates(&Point::new(self.center_x, self.center_y), width, height);
        Point::new(x, y)
    }

    /// Keep the center inside the box and the scale within `[min_scale, max_scale]`.
    pub fn clamped(self, min_scale: f64, max_scale: f64) -> Self {
        Self {
            center_x: self.center_x.clamp(0.0, 1.0),
            center_y: self.center_y.clamp(0.0, 1.0),
            scale: self.scale.clamp(min_scale, max_scale),
        }
    }
}

/// A mask shape together with its placement.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ShapeMask {
    pub shape: MaskShape,
    pub placement: ShapeManipulation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_uses_shorter_dimension() {
        let manip = ShapeManipulation {
            scale: 0.5,
            ..Default::default()
        };
        assert_eq!(manip.side(300.0, 100.0), 50.0);
        assert_eq!(manip.center_in(300.0, 100.0), Point::new(150.0, 50.0));
    }

    #[test]
    fn test_clamp_bounds() {
        let manip = ShapeManipulation {
            center_x: -0.2,
            center_y: 1.4,
            scale: 3.0,
        }
        .clamped(0.1, 2.0);
        assert_eq!(manip.center_x, 0.0);
        assert_eq!(manip.center_y, 1.0);
        assert_eq!(manip.scale, 2.0);
    }

    #[test]
    fn test_mask_shape_serializes_lowercase() {
        let json = serde_json::to_string(&MaskShape::Rounded).unwrap();
        assert_eq!(json, "\"rounded\"");
    }
}
