// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drag kinds, resize handles and handle hit testing.

use crate::models::region::DisplayBox;
use crate::util::geometry::Point;

/// One of the eight resize affordances around an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    NorthWest,
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
}

impl Handle {
    pub const CORNERS: [Handle; 4] = [
        Handle::NorthWest,
        Handle::NorthEast,
        Handle::SouthEast,
        Handle::SouthWest,
    ];

    pub const EDGES: [Handle; 4] = [Handle::North, Handle::East, Handle::South, Handle::West];

    pub fn moves_left(&self) -> bool {
        matches!(self, Handle::NorthWest | Handle::West | Handle::SouthWest)
    }

    pub fn moves_right(&self) -> bool {
        matches!(self, Handle::NorthEast | Handle::East | Handle::SouthEast)
    }

    pub fn moves_top(&self) -> bool {
        matches!(self, Handle::NorthWest | Handle::North | Handle::NorthEast)
    }

    pub fn moves_bottom(&self) -> bool {
        matches!(self, Handle::SouthWest | Handle::South | Handle::SouthEast)
    }

    /// Unit direction pointing away from the box, per axis (-1, 0 or 1).
    pub fn outward(&self) -> (f64, f64) {
        let x = if self.moves_left() {
            -1.0
        } else if self.moves_right() {
            1.0
        } else {
            0.0
        };
        let y = if self.moves_top() {
            -1.0
        } else if self.moves_bottom() {
            1.0
        } else {
            0.0
        };
        (x, y)
    }

    /// Where this handle sits on a display box.
    pub fn anchor_on(&self, display: &DisplayBox) -> Point {
        let (ox, oy) = self.outward();
        let center = display.center();
        Point::new(
            center.x + ox * display.width / 2.0,
            center.y + oy * display.height / 2.0,
        )
    }
}

/// What a pointer-down starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragKind {
    Move,
    Resize(Handle),
}

/// Find the drag kind under `point`.
///
/// Each handle reacts inside a square of side `hit_size` centred on it.
/// Corners take priority over edges, edges over the body.
pub fn hit_test(display: &DisplayBox, point: Point, hit_size: f64) -> Option<DragKind> {
    let half = hit_size / 2.0;
    let near = |anchor: Point| (point.x - anchor.x).abs() <= half && (point.y - anchor.y).abs() <= half;

    Handle::CORNERS
        .iter()
        .chain(Handle::EDGES.iter())
        .find(|handle| near(handle.anchor_on(display)))
        .map(|handle| DragKind::Resize(*handle))
        .or_else(|| display.contains(point).then_some(DragKind::Move))
}
