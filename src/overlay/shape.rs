// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Shape mask strategy.
//!
//! Moving shifts the fractional center; any resize handle scales the mask
//! symmetrically around its center.

use super::{DragKind, OverlayConfig, OverlayStrategy};
use crate::models::region::CropRect;
use crate::models::shape::ShapeManipulation;
use crate::util::geometry::{normalize_coordinates, Point};

/// Smallest mask, as a fraction of the image's shorter side.
pub const DEFAULT_MIN_SCALE: f64 = 0.1;
/// Largest mask, as a fraction of the image's shorter side.
pub const DEFAULT_MAX_SCALE: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeStrategy {
    pub min_scale: f64,
    pub max_scale: f64,
}

impl Default for ShapeStrategy {
    fn default() -> Self {
        Self {
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
        }
    }
}

impl ShapeStrategy {
    pub fn new(min_scale: f64, max_scale: f64) -> Self {
        Self {
            min_scale,
            max_scale,
        }
    }
}

impl OverlayStrategy for ShapeStrategy {
    type State = ShapeManipulation;
    type Output = ShapeManipulation;

    fn initial_state(&self, _config: &OverlayConfig) -> ShapeManipulation {
        ShapeManipulation::default()
    }

    fn image_box(&self, state: &ShapeManipulation, config: &OverlayConfig) -> CropRect {
        let side = state.side(config.image_width, config.image_height);
        let center = state.center_in(config.image_width, config.image_height);
        CropRect::new(center.x - side / 2.0, center.y - side / 2.0, side, side)
    }

    fn apply_delta(
        &self,
        start: &ShapeManipulation,
        kind: DragKind,
        delta: Point,
        config: &OverlayConfig,
    ) -> ShapeManipulation {
        match kind {
            DragKind::Move => {
                let shift = normalize_coordinates(delta.x, delta.y, config.image_width, config.image_height);
                ShapeManipulation {
                    center_x: start.center_x + shift.x,
                    center_y: start.center_y + shift.y,
                    scale: start.scale,
                }
            }
            DragKind::Resize(handle) => {
                let (out_x, out_y) = handle.outward();
                let along_x = delta.x * out_x;
                let along_y = delta.y * out_y;
                let growth = if along_x.abs() >= along_y.abs() { along_x } else { along_y };
                let reference = config.image_width.min(config.image_height);
                ShapeManipulation {
                    scale: start.scale + 2.0 * growth / reference,
                    ..*start
                }
            }
        }
    }

    fn clamp(&self, state: ShapeManipulation, _config: &OverlayConfig) -> ShapeManipulation {
        state.clamped(self.min_scale, self.max_scale)
    }

    fn finish(&self, state: &ShapeManipulation) -> ShapeManipulation {
        *state
    }
}
