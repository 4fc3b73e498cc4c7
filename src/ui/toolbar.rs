// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar and tool selection UI.
//!
//! This module provides the toolbar for entering the crop and mask tools
//! and for the one-click orientation edits.

use crate::app::Tool;
use crate::models::recipe::EditStep;
use crate::models::shape::MaskShape;

/// Result of toolbar interaction.
pub enum ToolbarAction {
    None,
    StartCrop,
    StartMask,
    Apply(EditStep),
}

/// Display the toolbar with tool selection buttons.
pub fn show(
    ui: &mut egui::Ui,
    current_tool: Tool,
    mask_shape: &mut MaskShape,
    has_image: bool,
) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        ui.label("Tools:");

        ui.separator();

        ui.add_enabled_ui(has_image, |ui| {
            if ui.selectable_label(current_tool == Tool::Crop, "✂ Crop").clicked() {
                action = ToolbarAction::StartCrop;
            }

            if ui.selectable_label(current_tool == Tool::Mask, "◯ Mask").clicked() {
                action = ToolbarAction::StartMask;
            }

            egui::ComboBox::from_id_source("mask_shape")
                .selected_text(mask_shape.label())
                .show_ui(ui, |ui| {
                    for shape in MaskShape::ALL {
                        ui.selectable_value(mask_shape, shape, shape.label());
                    }
                });

            ui.separator();

            // Orientation edits are not allowed while an overlay is open
            ui.add_enabled_ui(current_tool == Tool::View, |ui| {
                if ui.button("⟳ Rotate").on_hover_text("Rotate 90° clockwise").clicked() {
                    action = ToolbarAction::Apply(EditStep::RotateCw);
                }
                if ui.button("⟲ Rotate").on_hover_text("Rotate 90° counter-clockwise").clicked() {
                    action = ToolbarAction::Apply(EditStep::RotateCcw);
                }
                if ui.button("⇔ Flip").on_hover_text("Flip horizontally").clicked() {
                    action = ToolbarAction::Apply(EditStep::FlipHorizontal);
                }
                if ui.button("⇕ Flip").on_hover_text("Flip vertically").clicked() {
                    action = ToolbarAction::Apply(EditStep::FlipVertical);
                }
            });
        });

        ui.separator();

        let tool_text = match current_tool {
            Tool::View => "Pick a tool, or rotate and flip the image",
            Tool::Crop => "Drag the box or its handles, Enter to apply, Escape to cancel",
            Tool::Mask => "Drag to place the mask, handles to scale, Enter to apply, Escape to cancel",
        };

        ui.label(egui::RichText::new(tool_text).italics().weak());
    });

    action
}
