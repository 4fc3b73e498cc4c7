// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Editor configuration.
//!
//! Every field has a default, so a config file only needs the values it
//! changes. The file is YAML and is located through `FAVICROP_CONFIG`.

use crate::overlay::crop::DEFAULT_MARGIN;
use crate::overlay::shape::{DEFAULT_MAX_SCALE, DEFAULT_MIN_SCALE};
use crate::overlay::DEFAULT_MIN_SIZE;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "FAVICROP_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Smallest crop box side, in source pixels.
    pub min_size: f64,
    /// Inset of a new crop box, as a fraction of the image.
    pub initial_margin: f64,
    pub min_shape_scale: f64,
    pub max_shape_scale: f64,
    /// Side of the square around each handle that reacts to the pointer.
    pub handle_hit_size: f64,
    pub favicon_sizes: Vec<u32>,
    /// Settings file holding per-site records. `None` keeps them in memory.
    pub store_path: Option<PathBuf>,
    /// Icons are written to `<output_dir>/<hostname>/`.
    pub output_dir: PathBuf,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_size: DEFAULT_MIN_SIZE,
            initial_margin: DEFAULT_MARGIN,
            min_shape_scale: DEFAULT_MIN_SCALE,
            max_shape_scale: DEFAULT_MAX_SCALE,
            handle_hit_size: 24.0,
            favicon_sizes: vec![16, 32, 48, 180],
            store_path: Some(PathBuf::from("favicrop-sites.json")),
            output_dir: PathBuf::from("favicons"),
        }
    }
}

impl EditorConfig {
    /// Read a YAML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&yaml)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Config from `FAVICROP_CONFIG`, or the defaults when it is unset.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.min_size > 0.0) {
            bail!("min_size must be positive, got {}", self.min_size);
        }
        if !(0.0..0.5).contains(&self.initial_margin) {
            bail!("initial_margin must be in [0, 0.5), got {}", self.initial_margin);
        }
        if !(self.min_shape_scale > 0.0 && self.min_shape_scale <= self.max_shape_scale) {
            bail!(
                "shape scale bounds must satisfy 0 < min <= max, got {}..{}",
                self.min_shape_scale,
                self.max_shape_scale
            );
        }
        if self.favicon_sizes.is_empty() || self.favicon_sizes.contains(&0) {
            bail!("favicon_sizes must list positive sizes");
        }
        Ok(())
    }
}
