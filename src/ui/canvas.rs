// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing canvas for the image being edited and its overlay.
//!
//! This module fits the working image into the available space, draws the
//! active crop box or shape mask on top of it, and turns pointer input into
//! drag actions for the overlay.

use crate::models::region::DisplayBox;
use crate::models::shape::MaskShape;
use crate::overlay::{hit_test, DragKind, Handle};
use crate::util::geometry::Point;

const HANDLE_SIZE: f32 = 10.0;
const BORDER_WIDTH: f32 = 2.0;
const SHADE_COLOR: egui::Color32 = egui::Color32::from_rgba_premultiplied(0, 0, 0, 128);
const BORDER_COLOR: egui::Color32 = egui::Color32::WHITE;
const GRID_COLOR: egui::Color32 = egui::Color32::from_rgba_premultiplied(90, 90, 90, 90);

/// Result of canvas interaction.
pub enum CanvasAction {
    None,
    BeginDrag(DragKind, Point),
    UpdateDrag(Point),
    EndDrag,
}

/// Where the image ended up on screen this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasLayout {
    pub display_scale: f64,
    pub offset: Point,
}

/// What the canvas needs to know about the active overlay.
pub struct OverlayView {
    pub display_box: DisplayBox,
    /// Mask outline to draw; `None` draws a crop box.
    pub mask: Option<MaskShape>,
    pub drag_kind: Option<DragKind>,
    pub hit_size: f64,
}

/// Display the canvas and handle mouse interactions.
pub fn show(
    ui: &mut egui::Ui,
    image_texture: &Option<egui::TextureHandle>,
    image_size: Option<(u32, u32)>,
    overlay: Option<&OverlayView>,
) -> (CanvasAction, Option<CanvasLayout>) {
    let mut action = CanvasAction::None;
    let mut layout = None;
    ui.style_mut().visuals.extreme_bg_color = egui::Color32::from_gray(40);

    let available_size = ui.available_size();

    egui::Frame::canvas(ui.style()).show(ui, |ui| {
        ui.set_min_size(available_size);

        let (Some(texture), Some((img_width, img_height))) = (image_texture, image_size) else {
            ui.centered_and_justified(|ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(20.0);
                    ui.heading(
                        egui::RichText::new("favicrop")
                            .size(32.0)
                            .color(egui::Color32::from_gray(200)),
                    );
                    ui.add_space(20.0);
                    ui.label(
                        egui::RichText::new("Open an image to start making a favicon")
                            .color(egui::Color32::from_gray(180)),
                    );
                    ui.add_space(10.0);
                    ui.label(
                        egui::RichText::new("File → Open Image...")
                            .weak()
                            .color(egui::Color32::from_gray(130)),
                    );
                });
            });
            return;
        };

        let canvas_rect = ui.max_rect();
        let image_rect = fit_image(canvas_rect, img_width, img_height);

        ui.painter().image(
            texture.id(),
            image_rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );

        layout = Some(CanvasLayout {
            display_scale: f64::from(image_rect.width()) / f64::from(img_width),
            offset: to_point(image_rect.min),
        });

        let Some(view) = overlay else {
            return;
        };

        let response = ui.allocate_rect(canvas_rect, egui::Sense::drag());

        if response.drag_started() {
            let origin = ui.input(|i| i.pointer.press_origin()).or(response.interact_pointer_pos());
            if let Some(origin) = origin {
                let origin = to_point(origin);
                if let Some(kind) = hit_test(&view.display_box, origin, view.hit_size) {
                    action = CanvasAction::BeginDrag(kind, origin);
                }
            }
        } else if response.drag_stopped() {
            action = CanvasAction::EndDrag;
        } else if response.dragged() && view.drag_kind.is_some() {
            if let Some(pos) = response.interact_pointer_pos() {
                action = CanvasAction::UpdateDrag(to_point(pos));
            }
        }

        let hovered_kind = view.drag_kind.or_else(|| {
            response
                .hover_pos()
                .and_then(|pos| hit_test(&view.display_box, to_point(pos), view.hit_size))
        });
        if let Some(kind) = hovered_kind {
            ui.ctx().set_cursor_icon(cursor_for(kind, view.drag_kind.is_some()));
        }

        draw_overlay(ui.painter(), image_rect, view);
    });

    // Status line at the bottom
    ui.separator();
    ui.horizontal(|ui| match (image_size, overlay) {
        (Some((w, h)), Some(view)) => {
            ui.label(format!("{}x{} px", w, h));
            ui.separator();
            ui.label(match (view.mask, view.drag_kind) {
                (_, Some(_)) => "Dragging",
                (Some(_), None) => "Drag to move the mask, handles to scale · Enter applies, Esc cancels",
                (None, None) => "Drag the box or its handles · Enter applies, Esc cancels",
            });
        }
        (Some((w, h)), None) => {
            ui.label(format!("{}x{} px", w, h));
            ui.separator();
            ui.label("Ready");
        }
        _ => {
            ui.label("No file loaded");
        }
    });

    (action, layout)
}

/// Largest rectangle with the image's aspect ratio, centred in `available`.
pub fn fit_image(available: egui::Rect, img_width: u32, img_height: u32) -> egui::Rect {
    let img_aspect = img_width as f32 / img_height as f32;
    let available_aspect = available.width() / available.height();

    let (display_width, display_height) = if img_aspect > available_aspect {
        // Image is wider - fit to width
        let width = available.width();
        (width, width / img_aspect)
    } else {
        // Image is taller - fit to height
        let height = available.height();
        (height * img_aspect, height)
    };

    egui::Rect::from_center_size(available.center(), egui::vec2(display_width, display_height))
}

fn cursor_for(kind: DragKind, dragging: bool) -> egui::CursorIcon {
    match kind {
        DragKind::Move if dragging => egui::CursorIcon::Grabbing,
        DragKind::Move => egui::CursorIcon::Grab,
        DragKind::Resize(Handle::NorthWest | Handle::SouthEast) => egui::CursorIcon::ResizeNwSe,
        DragKind::Resize(Handle::NorthEast | Handle::SouthWest) => egui::CursorIcon::ResizeNeSw,
        DragKind::Resize(Handle::North | Handle::South) => egui::CursorIcon::ResizeVertical,
        DragKind::Resize(Handle::East | Handle::West) => egui::CursorIcon::ResizeHorizontal,
    }
}

fn draw_overlay(painter: &egui::Painter, image_rect: egui::Rect, view: &OverlayView) {
    let selection = to_rect(&view.display_box);
    let painter = painter.with_clip_rect(image_rect);

    // Shade the image around the selection
    let shades = [
        egui::Rect::from_min_max(image_rect.min, egui::pos2(image_rect.max.x, selection.min.y)),
        egui::Rect::from_min_max(egui::pos2(image_rect.min.x, selection.max.y), image_rect.max),
        egui::Rect::from_min_max(
            egui::pos2(image_rect.min.x, selection.min.y),
            egui::pos2(selection.min.x, selection.max.y),
        ),
        egui::Rect::from_min_max(
            egui::pos2(selection.max.x, selection.min.y),
            egui::pos2(image_rect.max.x, selection.max.y),
        ),
    ];
    for shade in shades.iter().filter(|shade| shade.is_positive()) {
        painter.rect_filled(*shade, 0.0, SHADE_COLOR);
    }

    let stroke = egui::Stroke::new(BORDER_WIDTH, BORDER_COLOR);
    match view.mask {
        None => {
            painter.rect_stroke(selection, 0.0, stroke);
            if selection.width() > 30.0 && selection.height() > 30.0 {
                draw_thirds(&painter, selection);
            }
        }
        Some(MaskShape::Circle) => {
            painter.rect_stroke(selection, 0.0, egui::Stroke::new(1.0, GRID_COLOR));
            painter.circle_stroke(selection.center(), selection.width() / 2.0, stroke);
        }
        Some(MaskShape::Rounded) => {
            let radius = selection.width() * crate::imaging::mask::ROUNDED_CORNER_RATIO as f32;
            painter.rect_stroke(selection, radius, stroke);
        }
        Some(MaskShape::Square) => {
            painter.rect_stroke(selection, 0.0, stroke);
        }
    }

    // Handles are drawn unclipped so they stay grabbable at the image edge
    let handle_painter = painter.with_clip_rect(egui::Rect::EVERYTHING);
    for handle in Handle::CORNERS.iter().chain(Handle::EDGES.iter()) {
        let center = to_pos(handle.anchor_on(&view.display_box));
        let rect = egui::Rect::from_center_size(center, egui::vec2(HANDLE_SIZE, HANDLE_SIZE));
        handle_painter.rect_filled(rect, 1.0, BORDER_COLOR);
        handle_painter.rect_stroke(rect.expand(0.5), 1.0, egui::Stroke::new(1.0, egui::Color32::BLACK));
    }
}

fn draw_thirds(painter: &egui::Painter, selection: egui::Rect) {
    let stroke = egui::Stroke::new(1.0, GRID_COLOR);
    for i in 1..3 {
        let t = i as f32 / 3.0;
        let x = selection.min.x + selection.width() * t;
        let y = selection.min.y + selection.height() * t;
        painter.line_segment([egui::pos2(x, selection.min.y), egui::pos2(x, selection.max.y)], stroke);
        painter.line_segment([egui::pos2(selection.min.x, y), egui::pos2(selection.max.x, y)], stroke);
    }
}

fn to_point(pos: egui::Pos2) -> Point {
    Point::new(f64::from(pos.x), f64::from(pos.y))
}

fn to_pos(point: Point) -> egui::Pos2 {
    egui::pos2(point.x as f32, point.y as f32)
}

fn to_rect(display: &DisplayBox) -> egui::Rect {
    egui::Rect::from_min_size(
        egui::pos2(display.left as f32, display.top as f32),
        egui::vec2(display.width as f32, display.height as f32),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_wide_image() {
        let available = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(400.0, 400.0));
        let rect = fit_image(available, 200, 100);
        assert_eq!(rect.width(), 400.0);
        assert_eq!(rect.height(), 200.0);
        assert_eq!(rect.min, egui::pos2(0.0, 100.0));
    }

    #[test]
    fn test_fit_tall_image() {
        let available = egui::Rect::from_min_size(egui::pos2(10.0, 0.0), egui::vec2(400.0, 200.0));
        let rect = fit_image(available, 100, 200);
        assert_eq!(rect.size(), egui::vec2(100.0, 200.0));
        assert_eq!(rect.min, egui::pos2(160.0, 0.0));
    }
}
