// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Interactive bounded-drag overlay.
//!
//! A `DragOverlay` turns pointer and keyboard events into updates of a
//! region drawn over an image. The region itself is described by an
//! `OverlayStrategy`: the crop box and the shape mask are two strategies
//! driven by the same overlay.
//!
//! Pointer positions and the boundary offset must share one coordinate
//! frame (the display container). Region state lives in source-image pixel
//! space; `display_scale` converts between the two.

pub mod crop;
pub mod handle;
pub mod shape;
pub mod shortcuts;

pub use crop::CropStrategy;
pub use handle::{hit_test, DragKind, Handle};
pub use shape::ShapeStrategy;
pub use shortcuts::{ShortcutAction, ShortcutLatch};

use crate::models::region::{CropRect, DisplayBox};
use crate::util::geometry::Point;
use std::fmt;

/// Default minimum crop dimension in source pixels.
pub const DEFAULT_MIN_SIZE: f64 = 16.0;

/// Session parameters, fixed while a drag is in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayConfig {
    pub image_width: f64,
    pub image_height: f64,
    /// Display pixels per source pixel.
    pub display_scale: f64,
    /// Where the image's top-left corner is drawn in the container.
    pub boundary_offset: Point,
    pub min_size: f64,
}

impl OverlayConfig {
    pub fn new(image_width: u32, image_height: u32, display_scale: f64, boundary_offset: Point) -> Self {
        Self {
            image_width: image_width as f64,
            image_height: image_height as f64,
            display_scale,
            boundary_offset,
            min_size: DEFAULT_MIN_SIZE,
        }
    }

    pub fn with_min_size(mut self, min_size: f64) -> Self {
        self.min_size = min_size;
        self
    }
}

/// The parts that differ between overlay variants.
pub trait OverlayStrategy {
    type State: Copy + PartialEq + fmt::Debug;
    type Output;

    /// State shown when the overlay opens.
    fn initial_state(&self, config: &OverlayConfig) -> Self::State;

    /// Bounding box of the state in source-image pixels.
    fn image_box(&self, state: &Self::State, config: &OverlayConfig) -> CropRect;

    /// Apply a drag of `delta` source pixels to the state captured at drag start.
    fn apply_delta(
        &self,
        start: &Self::State,
        kind: DragKind,
        delta: Point,
        config: &OverlayConfig,
    ) -> Self::State;

    /// Bring a state back within its bounds. Must be idempotent.
    fn clamp(&self, state: Self::State, config: &OverlayConfig) -> Self::State;

    /// Data handed to the caller on apply.
    fn finish(&self, state: &Self::State) -> Self::Output;
}

/// Transient state of one continuous drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession<T> {
    pub kind: DragKind,
    pub anchor: Point,
    pub start: T,
}

/// Lifecycle of an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayStatus {
    Editing,
    Applied,
    Cancelled,
}

type ApplyCallback<T> = Box<dyn FnOnce(T)>;
type CancelCallback = Box<dyn FnOnce()>;

/// Drives an `OverlayStrategy` from pointer and keyboard events.
pub struct DragOverlay<S: OverlayStrategy> {
    config: OverlayConfig,
    strategy: S,
    state: S::State,
    session: Option<DragSession<S::State>>,
    shortcuts: ShortcutLatch,
    status: OverlayStatus,
    on_apply: Option<ApplyCallback<S::Output>>,
    on_cancel: Option<CancelCallback>,
}

impl<S: OverlayStrategy> DragOverlay<S> {
    /// Open an overlay showing the strategy's initial state.
    pub fn new(config: OverlayConfig, strategy: S) -> Self {
        let initial = strategy.initial_state(&config);
        Self::with_state(config, strategy, initial)
    }

    /// Open an overlay on an existing state (clamped into bounds).
    pub fn with_state(config: OverlayConfig, strategy: S, state: S::State) -> Self {
        let state = strategy.clamp(state, &config);
        Self {
            config,
            strategy,
            state,
            session: None,
            shortcuts: ShortcutLatch::default(),
            status: OverlayStatus::Editing,
            on_apply: None,
            on_cancel: None,
        }
    }

    /// Callback receiving the final data when the overlay is applied.
    pub fn on_apply(mut self, callback: impl FnOnce(S::Output) + 'static) -> Self {
        self.on_apply = Some(Box::new(callback));
        self
    }

    /// Callback invoked when the overlay is cancelled.
    pub fn on_cancel(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_cancel = Some(Box::new(callback));
        self
    }

    pub fn state(&self) -> &S::State {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.status == OverlayStatus::Editing
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn drag_kind(&self) -> Option<DragKind> {
        self.session.map(|session| session.kind)
    }

    /// Start a drag. Replaces any session already in progress.
    pub fn begin_drag(&mut self, kind: DragKind, pointer: Point) {
        if !self.is_open() {
            return;
        }
        log::debug!("Begin {:?} drag at ({:.1}, {:.1})", kind, pointer.x, pointer.y);
        self.session = Some(DragSession {
            kind,
            anchor: pointer,
            start: self.state,
        });
    }

    /// Follow the pointer. Does nothing without an active drag.
    pub fn update_drag(&mut self, pointer: Point) {
        let Some(session) = self.session else {
            return;
        };
        let delta = (pointer - session.anchor).unscale(self.config.display_scale);
        let moved = self
            .strategy
            .apply_delta(&session.start, session.kind, delta, &self.config);
        self.state = self.strategy.clamp(moved, &self.config);
    }

    /// Finish the drag, keeping the current state.
    pub fn end_drag(&mut self) {
        if let Some(session) = self.session.take() {
            log::debug!("End {:?} drag: {:?}", session.kind, self.state);
        }
    }

    /// Update the display mapping after the container was laid out again.
    ///
    /// Ignored during a drag: a session keeps the scale it started with.
    pub fn relayout(&mut self, display_scale: f64, boundary_offset: Point) {
        if self.is_dragging() {
            return;
        }
        self.config.display_scale = display_scale;
        self.config.boundary_offset = boundary_offset;
    }

    /// Current state projected into display coordinates.
    pub fn display_bounding_box(&self) -> DisplayBox {
        let rect = self.strategy.image_box(&self.state, &self.config);
        let scale = self.config.display_scale;
        DisplayBox {
            left: self.config.boundary_offset.x + rect.x * scale,
            top: self.config.boundary_offset.y + rect.y * scale,
            width: rect.width * scale,
            height: rect.height * scale,
        }
    }

    /// Final data for downstream image operations.
    pub fn apply_result(&self) -> S::Output {
        self.strategy.finish(&self.state)
    }

    /// Key pressed. Fires the action only on the first press of a hold.
    pub fn key_down(&mut self, action: ShortcutAction) {
        if !self.shortcuts.press(action) {
            return;
        }
        match action {
            ShortcutAction::Confirm => self.confirm(),
            ShortcutAction::Cancel => self.cancel(),
        }
    }

    pub fn key_up(&mut self, action: ShortcutAction) {
        self.shortcuts.release(action);
    }

    /// Commit the current state and hand it to the apply callback.
    pub fn confirm(&mut self) {
        if !self.is_open() {
            return;
        }
        self.session = None;
        self.status = OverlayStatus::Applied;
        log::info!("Overlay applied: {:?}", self.state);
        let output = self.strategy.finish(&self.state);
        if let Some(callback) = self.on_apply.take() {
            callback(output);
        }
    }

    /// Discard everything and notify the cancel callback.
    pub fn cancel(&mut self) {
        if !self.is_open() {
            return;
        }
        self.session = None;
        self.status = OverlayStatus::Cancelled;
        log::info!("Overlay cancelled");
        if let Some(callback) = self.on_cancel.take() {
            callback();
        }
    }
}

impl<S: OverlayStrategy + fmt::Debug> fmt::Debug for DragOverlay<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragOverlay")
            .field("config", &self.config)
            .field("strategy", &self.strategy)
            .field("state", &self.state)
            .field("session", &self.session)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::region::PixelRect;
    use std::cell::Cell;
    use std::rc::Rc;

    fn crop_overlay() -> DragOverlay<CropStrategy> {
        let config = OverlayConfig::new(200, 200, 1.0, Point::new(0.0, 0.0));
        DragOverlay::new(config, CropStrategy::default())
    }

    fn drag(overlay: &mut DragOverlay<CropStrategy>, kind: DragKind, dx: f64, dy: f64) {
        overlay.begin_drag(kind, Point::new(100.0, 100.0));
        overlay.update_drag(Point::new(100.0 + dx, 100.0 + dy));
        overlay.end_drag();
    }

    #[test]
    fn test_initial_state_has_ten_percent_margin() {
        let overlay = crop_overlay();
        assert_eq!(*overlay.state(), CropRect::new(20.0, 20.0, 160.0, 160.0));
    }

    #[test]
    fn test_resize_corner_clamps_to_image() {
        let mut overlay = crop_overlay();
        drag(&mut overlay, DragKind::Resize(Handle::SouthEast), 50.0, 50.0);
        assert_eq!(*overlay.state(), CropRect::new(20.0, 20.0, 180.0, 180.0));
    }

    #[test]
    fn test_move_clamps_position() {
        let mut overlay = crop_overlay();
        drag(&mut overlay, DragKind::Move, -50.0, 0.0);
        assert_eq!(*overlay.state(), CropRect::new(0.0, 20.0, 160.0, 160.0));
    }

    #[test]
    fn test_north_handle_hits_min_size() {
        let mut overlay = crop_overlay();
        drag(&mut overlay, DragKind::Resize(Handle::North), 0.0, 200.0);
        assert_eq!(*overlay.state(), CropRect::new(20.0, 164.0, 160.0, 16.0));
    }

    #[test]
    fn test_north_handle_keeps_bottom_edge() {
        for dy in [-60.0, -20.0, -5.5, 0.0, 12.25, 80.0, 140.0] {
            let mut overlay = crop_overlay();
            drag(&mut overlay, DragKind::Resize(Handle::North), 0.0, dy);
            assert_eq!(overlay.state().bottom(), 180.0, "dy = {dy}");
        }
    }

    #[test]
    fn test_move_never_changes_size() {
        for (dx, dy) in [(-500.0, 3.0), (17.5, -8.25), (400.0, 400.0)] {
            let mut overlay = crop_overlay();
            drag(&mut overlay, DragKind::Move, dx, dy);
            assert_eq!(overlay.state().width, 160.0);
            assert_eq!(overlay.state().height, 160.0);
        }
    }

    #[test]
    fn test_every_handle_stays_in_bounds() {
        let kinds = Handle::CORNERS
            .iter()
            .chain(Handle::EDGES.iter())
            .map(|handle| DragKind::Resize(*handle))
            .chain(std::iter::once(DragKind::Move));
        for kind in kinds {
            for (dx, dy) in [(-900.0, -900.0), (900.0, 900.0), (-900.0, 900.0), (37.0, -412.0)] {
                let mut overlay = crop_overlay();
                drag(&mut overlay, kind, dx, dy);
                let rect = *overlay.state();
                assert!(rect.x >= 0.0 && rect.y >= 0.0, "{kind:?}: {rect:?}");
                assert!(rect.width >= 16.0 && rect.height >= 16.0, "{kind:?}: {rect:?}");
                assert!(rect.right() <= 200.0 && rect.bottom() <= 200.0, "{kind:?}: {rect:?}");
            }
        }
    }

    #[test]
    fn test_delta_is_divided_by_display_scale() {
        let config = OverlayConfig::new(200, 200, 2.0, Point::new(0.0, 0.0));
        let mut overlay = DragOverlay::new(config, CropStrategy::default());
        overlay.begin_drag(DragKind::Move, Point::new(0.0, 0.0));
        overlay.update_drag(Point::new(-10.0, 20.0));
        assert_eq!(*overlay.state(), CropRect::new(15.0, 30.0, 160.0, 160.0));
    }

    #[test]
    fn test_update_without_drag_is_noop() {
        let mut overlay = crop_overlay();
        overlay.update_drag(Point::new(500.0, 500.0));
        assert_eq!(*overlay.state(), CropRect::new(20.0, 20.0, 160.0, 160.0));
        assert!(!overlay.is_dragging());
    }

    #[test]
    fn test_updates_are_relative_to_drag_start() {
        let mut overlay = crop_overlay();
        overlay.begin_drag(DragKind::Move, Point::new(50.0, 50.0));
        overlay.update_drag(Point::new(60.0, 50.0));
        overlay.update_drag(Point::new(70.0, 50.0));
        assert_eq!(overlay.state().x, 40.0);
        assert_eq!(overlay.drag_kind(), Some(DragKind::Move));
    }

    #[test]
    fn test_new_drag_replaces_previous_session() {
        let mut overlay = crop_overlay();
        overlay.begin_drag(DragKind::Move, Point::new(0.0, 0.0));
        overlay.update_drag(Point::new(10.0, 0.0));
        overlay.begin_drag(DragKind::Resize(Handle::East), Point::new(0.0, 0.0));
        overlay.update_drag(Point::new(-20.0, 0.0));
        assert_eq!(*overlay.state(), CropRect::new(30.0, 20.0, 140.0, 160.0));
    }

    #[test]
    fn test_display_bounding_box_projection() {
        let config = OverlayConfig::new(200, 100, 0.5, Point::new(30.0, 40.0));
        let overlay = DragOverlay::with_state(
            config,
            CropStrategy::default(),
            CropRect::new(20.0, 10.0, 100.0, 60.0),
        );
        let display = overlay.display_bounding_box();
        assert_eq!(
            display,
            DisplayBox {
                left: 40.0,
                top: 45.0,
                width: 50.0,
                height: 30.0,
            }
        );
        assert_eq!(hit_test(&display, Point::new(65.0, 60.0), 10.0), Some(DragKind::Move));
    }

    #[test]
    fn test_with_state_shrinks_oversized_rect_in_place() {
        let config = OverlayConfig::new(200, 200, 1.0, Point::new(0.0, 0.0));
        let overlay = DragOverlay::with_state(
            config,
            CropStrategy::default(),
            CropRect::new(20.0, 20.0, 210.0, 210.0),
        );
        assert_eq!(*overlay.state(), CropRect::new(20.0, 20.0, 180.0, 180.0));
    }

    #[test]
    fn test_apply_result_rounds_each_field() {
        let config = OverlayConfig::new(200, 200, 1.0, Point::new(0.0, 0.0));
        let overlay = DragOverlay::with_state(
            config,
            CropStrategy::default(),
            CropRect::new(19.6, 20.4, 159.5, 160.5),
        );
        assert_eq!(overlay.apply_result(), PixelRect::new(20, 20, 160, 161));
    }

    #[test]
    fn test_cancel_after_partial_drag() {
        let applied = Rc::new(Cell::new(0));
        let cancelled = Rc::new(Cell::new(0));
        let (a, c) = (applied.clone(), cancelled.clone());
        let mut overlay = crop_overlay()
            .on_apply(move |_| a.set(a.get() + 1))
            .on_cancel(move || c.set(c.get() + 1));

        overlay.begin_drag(DragKind::Move, Point::new(0.0, 0.0));
        overlay.update_drag(Point::new(30.0, 30.0));
        overlay.key_down(ShortcutAction::Cancel);
        overlay.key_up(ShortcutAction::Cancel);
        overlay.key_down(ShortcutAction::Cancel);
        overlay.key_down(ShortcutAction::Confirm);
        overlay.cancel();

        assert_eq!(applied.get(), 0);
        assert_eq!(cancelled.get(), 1);
        assert!(!overlay.is_open());
        assert!(!overlay.is_dragging());
    }

    #[test]
    fn test_confirm_hands_rounded_rect_to_callback() {
        let result = Rc::new(Cell::new(None));
        let sink = result.clone();
        let mut overlay = crop_overlay().on_apply(move |rect| sink.set(Some(rect)));

        drag(&mut overlay, DragKind::Resize(Handle::SouthEast), 50.0, 50.0);
        overlay.key_down(ShortcutAction::Confirm);
        overlay.key_down(ShortcutAction::Confirm);

        assert_eq!(result.get(), Some(PixelRect::new(20, 20, 180, 180)));
        assert!(!overlay.is_open());
    }

    #[test]
    fn test_closed_overlay_ignores_input() {
        let mut overlay = crop_overlay();
        overlay.confirm();
        overlay.begin_drag(DragKind::Move, Point::new(0.0, 0.0));
        overlay.update_drag(Point::new(10.0, 10.0));
        assert!(!overlay.is_dragging());
        assert_eq!(overlay.state().x, 20.0);
    }

    #[test]
    fn test_relayout_waits_for_drag_end() {
        let mut overlay = crop_overlay();
        overlay.begin_drag(DragKind::Move, Point::new(0.0, 0.0));
        overlay.relayout(2.0, Point::new(5.0, 5.0));
        assert_eq!(overlay.display_bounding_box().left, 20.0);
        overlay.end_drag();
        overlay.relayout(2.0, Point::new(5.0, 5.0));
        assert_eq!(overlay.display_bounding_box().left, 45.0);
    }
}
