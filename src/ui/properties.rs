// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Properties panel.
//!
//! This module provides the side panel showing the live overlay values, the
//! applied edit steps, and the per-site save/load controls.

use crate::models::recipe::EditRecipe;

/// Result of properties panel interaction.
pub enum PropertiesAction {
    None,
    SaveForSite,
    LoadSite(String),
    ForgetSite(String),
}

/// Everything the panel displays.
pub struct PropertiesView<'a> {
    pub recipe: Option<&'a EditRecipe>,
    /// Live readout of the open overlay, one line per value.
    pub overlay_lines: Vec<String>,
    pub sites: &'a [String],
    pub status: Option<&'a str>,
}

/// Display the properties panel. `hostname` is the editable site field.
pub fn show(ui: &mut egui::Ui, view: &PropertiesView<'_>, hostname: &mut String) -> PropertiesAction {
    let mut action = PropertiesAction::None;

    ui.heading("Favicon");
    ui.separator();

    if !view.overlay_lines.is_empty() {
        ui.label(egui::RichText::new("Selection").strong());
        for line in &view.overlay_lines {
            ui.monospace(line);
        }
        ui.separator();
    }

    ui.label(egui::RichText::new("Edits").strong());
    match view.recipe {
        Some(recipe) if !recipe.steps.is_empty() => {
            for (i, step) in recipe.steps.iter().enumerate() {
                ui.label(format!("{}. {}", i + 1, step.describe()));
            }
        }
        Some(_) => {
            ui.label(egui::RichText::new("No edits yet").weak());
        }
        None => {
            ui.label(egui::RichText::new("No image loaded").weak());
        }
    }
    if let Some(recipe) = view.recipe {
        let sizes: Vec<String> = recipe.sizes.iter().map(|s| format!("{s}px")).collect();
        ui.label(egui::RichText::new(format!("Sizes: {}", sizes.join(", "))).weak());
    }

    ui.separator();
    ui.label(egui::RichText::new("Site").strong());
    ui.horizontal(|ui| {
        ui.label("Hostname:");
        ui.text_edit_singleline(hostname);
    });

    let can_save = view.recipe.is_some() && !hostname.trim().is_empty();
    if ui.add_enabled(can_save, egui::Button::new("Save for site")).clicked() {
        action = PropertiesAction::SaveForSite;
    }

    if let Some(status) = view.status {
        ui.label(egui::RichText::new(status).italics());
    }

    ui.separator();
    ui.label(egui::RichText::new("Saved sites").strong());
    if view.sites.is_empty() {
        ui.label(egui::RichText::new("None yet").weak());
    }
    egui::ScrollArea::vertical().show(ui, |ui| {
        for site in view.sites {
            ui.horizontal(|ui| {
                if ui.link(site).on_hover_text("Load this site's recipe").clicked() {
                    action = PropertiesAction::LoadSite(site.clone());
                }
                if ui.small_button("🗑").on_hover_text("Forget this site").clicked() {
                    action = PropertiesAction::ForgetSite(site.clone());
                }
            });
        }
    });

    action
}
