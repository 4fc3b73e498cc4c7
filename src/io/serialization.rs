// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Edit recipe serialization and deserialization.
//!
//! This module handles exporting and importing recipes in YAML
//! and JSON formats.

use crate::models::recipe::EditRecipe;
use anyhow::{bail, Result};
use std::path::Path;

/// Export a recipe to YAML format.
pub fn export_yaml(data: &EditRecipe, path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(data)?;
    std::fs::write(path, yaml)?;
    Ok(())
}

/// Export a recipe to JSON format.
pub fn export_json(data: &EditRecipe, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Import a recipe from YAML format.
pub fn import_yaml(path: &Path) -> Result<EditRecipe> {
    let yaml = std::fs::read_to_string(path)?;
    let data = serde_yaml::from_str(&yaml)?;
    Ok(data)
}

/// Import a recipe from JSON format.
pub fn import_json(path: &Path) -> Result<EditRecipe> {
    let json = std::fs::read_to_string(path)?;
    let data = serde_json::from_str(&json)?;
    Ok(data)
}

/// Export based on the file extension (`.yaml`, `.yml` or `.json`).
pub fn export_recipe(data: &EditRecipe, path: &Path) -> Result<()> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => export_yaml(data, path),
        Some("json") => export_json(data, path),
        extension => bail!("Unsupported file extension: {:?}", extension),
    }
}

/// Import based on the file extension (`.yaml`, `.yml` or `.json`).
pub fn import_recipe(path: &Path) -> Result<EditRecipe> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => import_yaml(path),
        Some("json") => import_json(path),
        extension => bail!("Unsupported file extension: {:?}", extension),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::recipe::EditStep;
    use crate::models::region::PixelRect;
    use crate::models::shape::{MaskShape, ShapeManipulation, ShapeMask};

    fn recipe() -> EditRecipe {
        let mut recipe = EditRecipe::new("/tmp/logo.png".to_string(), vec![16, 32, 48]);
        recipe.push(EditStep::RotateCcw);
        recipe.push(EditStep::Crop(PixelRect::new(4, 8, 120, 120)));
        recipe.push(EditStep::Mask(ShapeMask {
            shape: MaskShape::Rounded,
            placement: ShapeManipulation {
                center_x: 0.25,
                center_y: 0.75,
                scale: 0.5,
            },
        }));
        recipe
    }

    #[test]
    fn test_yaml_and_json_agree() {
        let dir = tempfile::tempdir().unwrap();
        let yaml_path = dir.path().join("recipe.yaml");
        let json_path = dir.path().join("recipe.json");

        export_recipe(&recipe(), &yaml_path).unwrap();
        export_recipe(&recipe(), &json_path).unwrap();

        assert_eq!(import_recipe(&yaml_path).unwrap(), recipe());
        assert_eq!(import_recipe(&json_path).unwrap(), recipe());
    }

    #[test]
    fn test_handwritten_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recipe.yml");
        std::fs::write(
            &path,
            "source_file: logo.png\nsizes: [16]\nsteps:\n  - op: flip_horizontal\n  - op: crop\n    x: 1\n    y: 2\n    width: 3\n    height: 4\n",
        )
        .unwrap();

        let recipe = import_recipe(&path).unwrap();
        assert_eq!(
            recipe.steps,
            vec![
                EditStep::FlipHorizontal,
                EditStep::Crop(PixelRect::new(1, 2, 3, 4))
            ]
        );
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recipe.toml");
        assert!(export_recipe(&recipe(), &path).is_err());
        assert!(!path.exists());
    }
}
