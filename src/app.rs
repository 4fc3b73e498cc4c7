// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the egui::App trait, managing the working image, the open overlay, the
//! edit history and the per-site store, and coordinating between the UI
//! components and the data model.

use crate::config::EditorConfig;
use crate::imaging::{favicon, transform};
use crate::io::media::{self, LoadedImage};
use crate::io::serialization;
use crate::models::{
    recipe::{EditRecipe, EditStep},
    shape::{MaskShape, ShapeMask},
    site::SiteSettings,
};
use crate::overlay::{
    CropStrategy, DragKind, DragOverlay, OverlayConfig, ShapeStrategy, ShortcutAction,
};
use crate::store::{sites::normalize_hostname, JsonFileStore, KeyValueStore, MemoryStore, SiteRegistry};
use crate::ui::{canvas, properties, toolbar};
use crate::util::geometry::Point;
use anyhow::{bail, Result};
use image::DynamicImage;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};

/// History system for undo/redo of applied edits.
struct History {
    /// Undo stack (past states)
    undo_stack: Vec<Vec<EditStep>>,
    /// Redo stack (future states after undo)
    redo_stack: Vec<Vec<EditStep>>,
    /// Maximum history size
    max_size: usize,
}

impl History {
    fn new() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_size: 50, // Keep last 50 states
        }
    }

    /// Save current state before making a change
    fn push(&mut self, steps: Vec<EditStep>) {
        self.undo_stack.push(steps);
        if self.undo_stack.len() > self.max_size {
            self.undo_stack.remove(0);
        }
        // A new edit invalidates everything that was undone
        self.redo_stack.clear();
    }

    /// Undo: restore previous state
    fn undo(&mut self, current: Vec<EditStep>) -> Option<Vec<EditStep>> {
        let previous = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        Some(previous)
    }

    /// Redo: restore next state
    fn redo(&mut self, current: Vec<EditStep>) -> Option<Vec<EditStep>> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(current);
        Some(next)
    }

    fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

/// Current editing tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    View,
    Crop,
    Mask,
}

/// Outcome published by an overlay's callbacks.
#[derive(Debug)]
enum EditorEvent {
    Apply(EditStep),
    Cancelled,
}

/// The overlay currently shown over the image.
enum ActiveOverlay {
    Crop(DragOverlay<CropStrategy>),
    Mask(DragOverlay<ShapeStrategy>, MaskShape),
}

impl ActiveOverlay {
    fn tool(&self) -> Tool {
        match self {
            ActiveOverlay::Crop(_) => Tool::Crop,
            ActiveOverlay::Mask(..) => Tool::Mask,
        }
    }

    fn is_open(&self) -> bool {
        match self {
            ActiveOverlay::Crop(overlay) => overlay.is_open(),
            ActiveOverlay::Mask(overlay, _) => overlay.is_open(),
        }
    }

    fn view(&self, hit_size: f64) -> canvas::OverlayView {
        match self {
            ActiveOverlay::Crop(overlay) => canvas::OverlayView {
                display_box: overlay.display_bounding_box(),
                mask: None,
                drag_kind: overlay.drag_kind(),
                hit_size,
            },
            ActiveOverlay::Mask(overlay, shape) => canvas::OverlayView {
                display_box: overlay.display_bounding_box(),
                mask: Some(*shape),
                drag_kind: overlay.drag_kind(),
                hit_size,
            },
        }
    }

    /// Live values for the properties panel.
    fn readout(&self) -> Vec<String> {
        match self {
            ActiveOverlay::Crop(overlay) => {
                let rect = overlay.state();
                let pixels = overlay.apply_result();
                vec![
                    format!("x {:>7.1}  y {:>7.1}", rect.x, rect.y),
                    format!("w {:>7.1}  h {:>7.1}", rect.width, rect.height),
                    format!(
                        "→ {}x{} at ({}, {})",
                        pixels.width, pixels.height, pixels.x, pixels.y
                    ),
                ]
            }
            ActiveOverlay::Mask(overlay, shape) => {
                let placement = overlay.state();
                vec![
                    format!("shape  {}", shape.label()),
                    format!(
                        "center {:.0}% / {:.0}%",
                        placement.center_x * 100.0,
                        placement.center_y * 100.0
                    ),
                    format!("scale  {:.0}%", placement.scale * 100.0),
                ]
            }
        }
    }

    fn begin_drag(&mut self, kind: DragKind, pointer: Point) {
        match self {
            ActiveOverlay::Crop(overlay) => overlay.begin_drag(kind, pointer),
            ActiveOverlay::Mask(overlay, _) => overlay.begin_drag(kind, pointer),
        }
    }

    fn update_drag(&mut self, pointer: Point) {
        match self {
            ActiveOverlay::Crop(overlay) => overlay.update_drag(pointer),
            ActiveOverlay::Mask(overlay, _) => overlay.update_drag(pointer),
        }
    }

    fn end_drag(&mut self) {
        match self {
            ActiveOverlay::Crop(overlay) => overlay.end_drag(),
            ActiveOverlay::Mask(overlay, _) => overlay.end_drag(),
        }
    }

    fn relayout(&mut self, layout: canvas::CanvasLayout) {
        match self {
            ActiveOverlay::Crop(overlay) => overlay.relayout(layout.display_scale, layout.offset),
            ActiveOverlay::Mask(overlay, _) => overlay.relayout(layout.display_scale, layout.offset),
        }
    }

    fn key(&mut self, action: ShortcutAction, pressed: bool) {
        match (self, pressed) {
            (ActiveOverlay::Crop(overlay), true) => overlay.key_down(action),
            (ActiveOverlay::Crop(overlay), false) => overlay.key_up(action),
            (ActiveOverlay::Mask(overlay, _), true) => overlay.key_down(action),
            (ActiveOverlay::Mask(overlay, _), false) => overlay.key_up(action),
        }
    }

    fn cancel(&mut self) {
        match self {
            ActiveOverlay::Crop(overlay) => overlay.cancel(),
            ActiveOverlay::Mask(overlay, _) => overlay.cancel(),
        }
    }
}

/// Result of background image loading operation.
struct LoadedImageData {
    loaded: LoadedImage,
    recipe: EditRecipe,
}

/// Main application state.
pub struct FavicropApp {
    config: EditorConfig,

    /// Tool shown as active in the toolbar
    current_tool: Tool,

    /// Shape used the next time the mask tool opens
    mask_shape: MaskShape,

    /// Image as loaded from disk
    source: Option<DynamicImage>,

    /// Source with every recipe step applied
    working: Option<DynamicImage>,

    /// Edits applied so far (if an image is loaded)
    recipe: Option<EditRecipe>,

    /// Working image texture for display
    image_texture: Option<egui::TextureHandle>,

    /// Working image dimensions (width, height)
    image_size: Option<(u32, u32)>,

    /// Crop box or mask being edited
    overlay: Option<ActiveOverlay>,

    /// Where the canvas drew the image last frame
    layout: Option<canvas::CanvasLayout>,

    /// History for undo/redo
    history: History,

    /// Per-site records
    sites: SiteRegistry,
    site_names: Vec<String>,
    hostname: String,
    status: Option<String>,

    /// Overlay callbacks report here
    events_tx: Sender<EditorEvent>,
    events_rx: Receiver<EditorEvent>,

    /// Receiver for background image loading
    image_loader: Option<Receiver<Result<LoadedImageData, String>>>,

    /// Loading state message
    loading_message: Option<String>,
}

impl FavicropApp {
    /// Create the application, opening the configured site store.
    pub fn new(config: EditorConfig) -> Result<Self> {
        let store: Box<dyn KeyValueStore> = match &config.store_path {
            Some(path) => Box::new(JsonFileStore::open(path)?),
            None => Box::new(MemoryStore::new()),
        };
        let sites = SiteRegistry::new(store);
        let site_names = sites.hostnames()?;
        let (events_tx, events_rx) = channel();

        Ok(Self {
            config,
            current_tool: Tool::View,
            mask_shape: MaskShape::default(),
            source: None,
            working: None,
            recipe: None,
            image_texture: None,
            image_size: None,
            overlay: None,
            layout: None,
            history: History::new(),
            sites,
            site_names,
            hostname: String::new(),
            status: None,
            events_tx,
            events_rx,
            image_loader: None,
            loading_message: None,
        })
    }

    fn set_status(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::info!("{}", message);
        self.status = Some(message);
    }

    fn report_error(&mut self, context: &str, error: anyhow::Error) {
        log::error!("{}: {:#}", context, error);
        self.status = Some(format!("{}: {}", context, error));
    }

    /// Upload the working image as the display texture.
    fn refresh_texture(&mut self, ctx: &egui::Context) {
        let Some(working) = &self.working else {
            self.image_texture = None;
            self.image_size = None;
            return;
        };
        let rgba = working.to_rgba8();
        let size = [rgba.width() as usize, rgba.height() as usize];
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
        self.image_texture = Some(ctx.load_texture("working_image", color_image, egui::TextureOptions::LINEAR));
        self.image_size = Some((rgba.width(), rgba.height()));
    }

    /// Rebuild the working image from the source and the recipe.
    fn rebuild_working(&mut self, ctx: &egui::Context) -> Result<()> {
        if let (Some(source), Some(recipe)) = (&self.source, &self.recipe) {
            self.working = Some(transform::replay(source, &recipe.steps)?);
        }
        self.refresh_texture(ctx);
        Ok(())
    }

    /// Apply one edit on top of the working image and record it.
    fn apply_step(&mut self, step: EditStep, ctx: &egui::Context) -> Result<()> {
        let (Some(working), Some(recipe)) = (&self.working, &mut self.recipe) else {
            bail!("No image loaded");
        };
        let edited = transform::apply_step(working, &step)?;
        self.history.push(recipe.steps.clone());
        recipe.push(step);
        log::info!("Applied: {}", step.describe());
        self.working = Some(edited);
        self.refresh_texture(ctx);
        Ok(())
    }

    fn undo(&mut self, ctx: &egui::Context) {
        let Some(recipe) = self.recipe.as_mut() else {
            return;
        };
        if let Some(previous) = self.history.undo(recipe.steps.clone()) {
            recipe.steps = previous;
            log::info!("Undo");
            if let Err(e) = self.rebuild_working(ctx) {
                self.report_error("Undo failed", e);
            }
        }
    }

    fn redo(&mut self, ctx: &egui::Context) {
        let Some(recipe) = self.recipe.as_mut() else {
            return;
        };
        if let Some(next) = self.history.redo(recipe.steps.clone()) {
            recipe.steps = next;
            log::info!("Redo");
            if let Err(e) = self.rebuild_working(ctx) {
                self.report_error("Redo failed", e);
            }
        }
    }

    /// Session parameters for an overlay over the working image.
    fn overlay_config(&self) -> Result<OverlayConfig> {
        let Some((width, height)) = self.image_size else {
            bail!("No image loaded");
        };
        if f64::from(width.min(height)) < self.config.min_size {
            bail!(
                "Image is {}x{}, smaller than the {} px minimum selection",
                width,
                height,
                self.config.min_size
            );
        }
        let layout = self.layout.unwrap_or(canvas::CanvasLayout {
            display_scale: 1.0,
            offset: Point::default(),
        });
        Ok(OverlayConfig::new(width, height, layout.display_scale, layout.offset)
            .with_min_size(self.config.min_size))
    }

    /// Open the crop box over the working image.
    fn start_crop(&mut self) -> Result<()> {
        let config = self.overlay_config()?;
        let apply_tx = self.events_tx.clone();
        let cancel_tx = self.events_tx.clone();
        let overlay = DragOverlay::new(config, CropStrategy::with_margin(self.config.initial_margin))
            .on_apply(move |rect| {
                let _ = apply_tx.send(EditorEvent::Apply(EditStep::Crop(rect)));
            })
            .on_cancel(move || {
                let _ = cancel_tx.send(EditorEvent::Cancelled);
            });
        self.replace_overlay(ActiveOverlay::Crop(overlay));
        Ok(())
    }

    /// Open the shape mask over the working image.
    fn start_mask(&mut self) -> Result<()> {
        let config = self.overlay_config()?;
        let shape = self.mask_shape;
        let apply_tx = self.events_tx.clone();
        let cancel_tx = self.events_tx.clone();
        let strategy = ShapeStrategy::new(self.config.min_shape_scale, self.config.max_shape_scale);
        let overlay = DragOverlay::new(config, strategy)
            .on_apply(move |placement| {
                let mask = ShapeMask { shape, placement };
                let _ = apply_tx.send(EditorEvent::Apply(EditStep::Mask(mask)));
            })
            .on_cancel(move || {
                let _ = cancel_tx.send(EditorEvent::Cancelled);
            });
        self.replace_overlay(ActiveOverlay::Mask(overlay, shape));
        Ok(())
    }

    fn replace_overlay(&mut self, overlay: ActiveOverlay) {
        if let Some(mut previous) = self.overlay.take() {
            previous.cancel();
        }
        self.current_tool = overlay.tool();
        self.overlay = Some(overlay);
    }

    /// Handle overlay outcomes and close finished overlays.
    fn drain_editor_events(&mut self, ctx: &egui::Context) {
        while let Ok(event) = self.events_rx.try_recv() {
            match event {
                EditorEvent::Apply(step) => {
                    if let Err(e) = self.apply_step(step, ctx) {
                        self.report_error("Edit failed", e);
                    }
                }
                EditorEvent::Cancelled => log::info!("Edit cancelled"),
            }
        }
        if self.overlay.as_ref().is_some_and(|overlay| !overlay.is_open()) {
            self.overlay = None;
            self.current_tool = Tool::View;
        }
    }

    /// Render icons for the current recipe and remember them for the hostname.
    fn save_for_site(&mut self) -> Result<String> {
        let (Some(source), Some(recipe)) = (&self.source, &self.recipe) else {
            bail!("No image loaded");
        };
        let hostname = normalize_hostname(&self.hostname)?;
        let icons = favicon::render_recipe(source, recipe)?;
        let dir = self.config.output_dir.join(&hostname);
        let written = favicon::write_icons(&dir, "favicon", &icons)?;
        let settings = SiteSettings::new(hostname, recipe.clone(), written);
        let hostname = self.sites.save(settings)?;
        self.site_names = self.sites.hostnames()?;
        self.hostname = hostname.clone();
        Ok(hostname)
    }

    fn load_site(&mut self, hostname: &str) -> Result<()> {
        let Some(settings) = self.sites.load(hostname)? else {
            bail!("Nothing saved for {}", hostname);
        };
        self.hostname = settings.hostname.clone();
        self.load_recipe_source(settings.recipe);
        Ok(())
    }

    fn forget_site(&mut self, hostname: &str) -> Result<()> {
        self.sites.forget(hostname)?;
        self.site_names = self.sites.hostnames()?;
        Ok(())
    }

    /// Export the current recipe to a file.
    fn export_recipe(&mut self, path: PathBuf) {
        let Some(recipe) = &self.recipe else {
            return;
        };
        match serialization::export_recipe(recipe, &path) {
            Ok(()) => self.set_status(format!("Exported recipe to {}", path.display())),
            Err(e) => self.report_error("Failed to export recipe", e),
        }
    }

    /// Import a recipe from a file and load its source image (asynchronously).
    fn import_recipe(&mut self, path: PathBuf) {
        match serialization::import_recipe(&path) {
            Ok(recipe) => {
                log::info!(
                    "Imported recipe with {} steps from {}",
                    recipe.steps.len(),
                    path.display()
                );
                self.load_recipe_source(recipe);
            }
            Err(e) => self.report_error("Failed to import recipe", e),
        }
    }

    /// Load the image a recipe refers to, then replay the recipe on it.
    fn load_recipe_source(&mut self, recipe: EditRecipe) {
        let image_path = PathBuf::from(&recipe.source_file);
        self.spawn_loader(image_path, "Loading recipe source...", move |_| recipe);
    }

    /// Load an image file and start a fresh recipe for it (asynchronously).
    pub fn load_image_file(&mut self, path: PathBuf) {
        let sizes = self.config.favicon_sizes.clone();
        self.spawn_loader(path, "Loading image...", move |path| {
            EditRecipe::new(path.to_string_lossy().to_string(), sizes)
        });
    }

    fn spawn_loader(
        &mut self,
        path: PathBuf,
        message: &str,
        make_recipe: impl FnOnce(&std::path::Path) -> EditRecipe + Send + 'static,
    ) {
        let (sender, receiver) = channel();
        self.image_loader = Some(receiver);
        self.loading_message = Some(message.to_string());

        // Spawn background thread for loading
        std::thread::spawn(move || {
            let result = media::load_image(&path)
                .map(|loaded| {
                    log::info!("Loaded image: {} ({}x{})", path.display(), loaded.width, loaded.height);
                    LoadedImageData {
                        loaded,
                        recipe: make_recipe(&path),
                    }
                })
                .map_err(|e| format!("{:#}", e));

            let _ = sender.send(result);
        });
    }

    /// Install a finished background load.
    fn install_loaded(&mut self, data: LoadedImageData, ctx: &egui::Context) {
        if let Some(mut overlay) = self.overlay.take() {
            overlay.cancel();
        }
        self.drain_editor_events(ctx);
        self.current_tool = Tool::View;
        self.history.clear();
        self.source = Some(data.loaded.image.clone());
        self.working = Some(data.loaded.image);
        self.recipe = Some(data.recipe);
        self.layout = None;

        if let Err(e) = self.rebuild_working(ctx) {
            self.report_error("Failed to replay recipe", e);
            if let Some(recipe) = self.recipe.as_mut() {
                recipe.steps.clear();
            }
            self.working = self.source.clone();
            self.refresh_texture(ctx);
        }
    }

    /// Forward confirm/cancel keys to the overlay; undo/redo otherwise.
    fn handle_keyboard(&mut self, ctx: &egui::Context) {
        let text_focused = ctx.wants_keyboard_input();
        let key_events: Vec<(egui::Key, bool)> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Key { key, pressed, .. } => Some((*key, *pressed)),
                    _ => None,
                })
                .collect()
        });

        if let Some(overlay) = self.overlay.as_mut() {
            for (key, pressed) in key_events {
                let action = match key {
                    egui::Key::Enter => ShortcutAction::Confirm,
                    egui::Key::Escape => ShortcutAction::Cancel,
                    _ => continue,
                };
                if pressed && text_focused {
                    continue;
                }
                overlay.key(action, pressed);
            }
            return;
        }

        if text_focused {
            return;
        }

        // Handle undo (Ctrl+Z)
        if ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::Z) && !i.modifiers.shift)
            && self.history.can_undo()
        {
            self.undo(ctx);
        }

        // Handle redo (Ctrl+Shift+Z or Ctrl+Y)
        if ctx.input(|i| {
            (i.modifiers.command && i.modifiers.shift && i.key_pressed(egui::Key::Z))
                || (i.modifiers.command && i.key_pressed(egui::Key::Y))
        }) && self.history.can_redo()
        {
            self.redo(ctx);
        }
    }
}

impl eframe::App for FavicropApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for completed image loading
        if let Some(ref receiver) = self.image_loader {
            if let Ok(result) = receiver.try_recv() {
                self.image_loader = None;
                self.loading_message = None;

                match result {
                    Ok(data) => {
                        self.install_loaded(data, ctx);
                        log::info!("Image loaded successfully");
                    }
                    Err(e) => {
                        log::error!("Failed to load image: {}", e);
                        self.status = Some(format!("Failed to load image: {}", e));
                    }
                }
            }
        }

        // Request repaint if still loading (to update spinner)
        if self.loading_message.is_some() {
            ctx.request_repaint();
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Image...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Images", media::IMAGE_EXTENSIONS)
                            .pick_file()
                        {
                            self.load_image_file(path);
                        }
                        ui.close_menu();
                    }
                    if ui.button("Import Recipe...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Recipes", &["yaml", "yml", "json"])
                            .pick_file()
                        {
                            self.import_recipe(path);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    ui.add_enabled_ui(self.recipe.is_some(), |ui| {
                        ui.menu_button("Export Recipe", |ui| {
                            if ui.button("Export as YAML...").clicked() {
                                if let Some(path) = rfd::FileDialog::new()
                                    .add_filter("YAML", &["yaml", "yml"])
                                    .set_file_name("favicon.yaml")
                                    .save_file()
                                {
                                    self.export_recipe(path);
                                }
                                ui.close_menu();
                            }
                            if ui.button("Export as JSON...").clicked() {
                                if let Some(path) = rfd::FileDialog::new()
                                    .add_filter("JSON", &["json"])
                                    .set_file_name("favicon.json")
                                    .save_file()
                                {
                                    self.export_recipe(path);
                                }
                                ui.close_menu();
                            }
                        });
                    });
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Edit", |ui| {
                    let idle = self.overlay.is_none();

                    let can_undo = idle && self.history.can_undo();
                    if ui.add_enabled(can_undo, egui::Button::new("Undo (Ctrl+Z)")).clicked() {
                        self.undo(ctx);
                        ui.close_menu();
                    }

                    let can_redo = idle && self.history.can_redo();
                    if ui.add_enabled(can_redo, egui::Button::new("Redo (Ctrl+Shift+Z)")).clicked() {
                        self.redo(ctx);
                        ui.close_menu();
                    }
                });
            });
        });

        // Toolbar
        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| {
                toolbar::show(ui, self.current_tool, &mut self.mask_shape, self.working.is_some())
            })
            .inner;

        match toolbar_action {
            toolbar::ToolbarAction::StartCrop => {
                if let Err(e) = self.start_crop() {
                    self.report_error("Cannot crop", e);
                }
            }
            toolbar::ToolbarAction::StartMask => {
                if let Err(e) = self.start_mask() {
                    self.report_error("Cannot mask", e);
                }
            }
            toolbar::ToolbarAction::Apply(step) => {
                if let Err(e) = self.apply_step(step, ctx) {
                    self.report_error("Edit failed", e);
                }
            }
            toolbar::ToolbarAction::None => {}
        }

        // Properties panel (right side)
        let overlay_lines = self.overlay.as_ref().map(ActiveOverlay::readout).unwrap_or_default();
        let properties_action = egui::SidePanel::right("properties")
            .default_width(250.0)
            .show(ctx, |ui| {
                let view = properties::PropertiesView {
                    recipe: self.recipe.as_ref(),
                    overlay_lines,
                    sites: &self.site_names,
                    status: self.status.as_deref(),
                };
                properties::show(ui, &view, &mut self.hostname)
            })
            .inner;

        match properties_action {
            properties::PropertiesAction::SaveForSite => match self.save_for_site() {
                Ok(hostname) => self.set_status(format!("Saved favicon for {}", hostname)),
                Err(e) => self.report_error("Save failed", e),
            },
            properties::PropertiesAction::LoadSite(hostname) => {
                if let Err(e) = self.load_site(&hostname) {
                    self.report_error("Load failed", e);
                }
            }
            properties::PropertiesAction::ForgetSite(hostname) => match self.forget_site(&hostname) {
                Ok(()) => self.set_status(format!("Forgot {}", hostname)),
                Err(e) => self.report_error("Forget failed", e),
            },
            properties::PropertiesAction::None => {}
        }

        self.handle_keyboard(ctx);

        // Main canvas (center)
        let hit_size = self.config.handle_hit_size;
        let (canvas_action, layout) = egui::CentralPanel::default()
            .show(ctx, |ui| {
                if let Some(ref message) = self.loading_message {
                    ui.centered_and_justified(|ui| {
                        ui.vertical_centered(|ui| {
                            ui.add_space(20.0);
                            ui.spinner();
                            ui.add_space(10.0);
                            ui.label(
                                egui::RichText::new(message)
                                    .size(16.0)
                                    .color(egui::Color32::from_gray(200)),
                            );
                        });
                    });
                    (canvas::CanvasAction::None, None)
                } else {
                    let view = self.overlay.as_ref().map(|overlay| overlay.view(hit_size));
                    canvas::show(ui, &self.image_texture, self.image_size, view.as_ref())
                }
            })
            .inner;

        if let Some(layout) = layout {
            self.layout = Some(layout);
            if let Some(overlay) = self.overlay.as_mut() {
                overlay.relayout(layout);
            }
        }

        // Handle canvas actions
        if let Some(overlay) = self.overlay.as_mut() {
            match canvas_action {
                canvas::CanvasAction::BeginDrag(kind, pointer) => overlay.begin_drag(kind, pointer),
                canvas::CanvasAction::UpdateDrag(pointer) => overlay.update_drag(pointer),
                canvas::CanvasAction::EndDrag => overlay.end_drag(),
                canvas::CanvasAction::None => {}
            }
        }

        self.drain_editor_events(ctx);
    }
}
