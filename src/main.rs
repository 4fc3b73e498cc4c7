// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! favicrop - favicon editor
//!
//! A cross-platform desktop application for cropping, masking and rotating
//! an image into a set of favicons, remembered per website.

mod app;
mod config;
mod imaging;
mod io;
mod models;
mod overlay;
mod store;
mod ui;
mod util;

use anyhow::Result;
use app::FavicropApp;
use config::EditorConfig;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let config = EditorConfig::from_env()?;
    log::debug!("Using configuration: {:?}", config);
    let app = FavicropApp::new(config)?;

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("favicrop - favicon editor"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native("favicrop", options, Box::new(move |_cc| Ok(Box::new(app))))
        .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
