// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Per-hostname favicon settings.

use super::recipe::EditRecipe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What was saved for one site: how the icon was made and where it went.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteSettings {
    pub hostname: String,
    pub recipe: EditRecipe,
    #[serde(default)]
    pub icons: Vec<PathBuf>,
}

impl SiteSettings {
    pub fn new(hostname: String, recipe: EditRecipe, icons: Vec<PathBuf>) -> Self {
        Self {
            hostname,
            recipe,
            icons,
        }
    }
}
