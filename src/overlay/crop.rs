// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Crop box strategy.

use super::{DragKind, Handle, OverlayConfig, OverlayStrategy};
use crate::models::region::{CropRect, PixelRect};
use crate::util::geometry::Point;

/// Default inset of a new crop box, as a fraction of each image side.
pub const DEFAULT_MARGIN: f64 = 0.1;

/// Rectangular crop box in source-image pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropStrategy {
    /// Inset of the initial box on every side, as a fraction of the image.
    pub margin: f64,
}

impl Default for CropStrategy {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
        }
    }
}

impl CropStrategy {
    pub fn with_margin(margin: f64) -> Self {
        Self { margin }
    }
}

impl OverlayStrategy for CropStrategy {
    type State = CropRect;
    type Output = PixelRect;

    fn initial_state(&self, config: &OverlayConfig) -> CropRect {
        let inset_x = config.image_width * self.margin;
        let inset_y = config.image_height * self.margin;
        CropRect::new(
            inset_x,
            inset_y,
            config.image_width - 2.0 * inset_x,
            config.image_height - 2.0 * inset_y,
        )
    }

    fn image_box(&self, state: &CropRect, _config: &OverlayConfig) -> CropRect {
        *state
    }

    fn apply_delta(
        &self,
        start: &CropRect,
        kind: DragKind,
        delta: Point,
        config: &OverlayConfig,
    ) -> CropRect {
        match kind {
            DragKind::Move => CropRect::new(
                start.x + delta.x,
                start.y + delta.y,
                start.width,
                start.height,
            ),
            DragKind::Resize(handle) => resize(start, handle, delta, config),
        }
    }

    fn clamp(&self, state: CropRect, config: &OverlayConfig) -> CropRect {
        state.clamped(config.image_width, config.image_height, config.min_size)
    }

    fn finish(&self, state: &CropRect) -> PixelRect {
        state.rounded()
    }
}

/// Move the edges a handle owns; the opposite edges stay where they were.
fn resize(start: &CropRect, handle: Handle, delta: Point, config: &OverlayConfig) -> CropRect {
    let min = config.min_size;
    let mut left = start.x;
    let mut top = start.y;
    let mut right = start.right();
    let mut bottom = start.bottom();

    if handle.moves_left() {
        left = (left + delta.x).max(0.0).min(right - min);
    }
    if handle.moves_right() {
        right = (right + delta.x).min(config.image_width).max(left + min);
    }
    if handle.moves_top() {
        top = (top + delta.y).max(0.0).min(bottom - min);
    }
    if handle.moves_bottom() {
        bottom = (bottom + delta.y).min(config.image_height).max(top + min);
    }

    CropRect::new(left, top, right - left, bottom - top)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> OverlayConfig {
        OverlayConfig::new(200, 200, 1.0, Point::default())
    }

    fn start() -> CropRect {
        CropRect::new(20.0, 20.0, 160.0, 160.0)
    }

    #[test]
    fn test_corner_combines_both_edges() {
        let strategy = CropStrategy::default();
        let rect = strategy.apply_delta(
            &start(),
            DragKind::Resize(Handle::NorthWest),
            Point::new(10.0, -5.0),
            &config(),
        );
        assert_eq!(rect, CropRect::new(30.0, 15.0, 150.0, 165.0));
    }

    #[test]
    fn test_west_handle_keeps_right_edge() {
        let strategy = CropStrategy::default();
        let rect = strategy.apply_delta(
            &start(),
            DragKind::Resize(Handle::West),
            Point::new(500.0, 0.0),
            &config(),
        );
        assert_eq!(rect.right(), 180.0);
        assert_eq!(rect.width, 16.0);
    }

    #[test]
    fn test_east_handle_stops_at_image_edge() {
        let strategy = CropStrategy::default();
        let rect = strategy.apply_delta(
            &start(),
            DragKind::Resize(Handle::East),
            Point::new(50.0, 0.0),
            &config(),
        );
        assert_eq!(rect, CropRect::new(20.0, 20.0, 180.0, 160.0));
    }

    #[test]
    fn test_move_keeps_size_before_clamp() {
        let strategy = CropStrategy::default();
        let rect = strategy.apply_delta(&start(), DragKind::Move, Point::new(-50.0, 0.0), &config());
        assert_eq!(rect, CropRect::new(-30.0, 20.0, 160.0, 160.0));
        assert_eq!(strategy.clamp(rect, &config()).x, 0.0);
    }

    #[test]
    fn test_custom_margin() {
        let strategy = CropStrategy::with_margin(0.25);
        let rect = strategy.initial_state(&OverlayConfig::new(400, 200, 1.0, Point::default()));
        assert_eq!(rect, CropRect::new(100.0, 50.0, 200.0, 100.0));
    }
}
