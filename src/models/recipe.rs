// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Edit recipe management.
//!
//! A recipe records every edit applied to a source image, in order, so the
//! favicon can be rendered again later or exported and shared as YAML/JSON.

use super::region::PixelRect;
use super::shape::ShapeMask;
use serde::{Deserialize, Serialize};

/// One edit, applied to the output of the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditStep {
    RotateCw,
    RotateCcw,
    FlipHorizontal,
    FlipVertical,
    Crop(PixelRect),
    Mask(ShapeMask),
}

impl EditStep {
    pub fn describe(&self) -> String {
        match self {
            EditStep::RotateCw => "Rotate 90° clockwise".to_string(),
            EditStep::RotateCcw => "Rotate 90° counter-clockwise".to_string(),
            EditStep::FlipHorizontal => "Flip horizontally".to_string(),
            EditStep::FlipVertical => "Flip vertically".to_string(),
            EditStep::Crop(rect) => format!(
                "Crop {}x{} at ({}, {})",
                rect.width, rect.height, rect.x, rect.y
            ),
            EditStep::Mask(mask) => format!(
                "{} mask at {:.0}% scale",
                mask.shape.label(),
                mask.placement.scale * 100.0
            ),
        }
    }
}

/// Complete edit history of one favicon, for serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditRecipe {
    pub source_file: String,
    #[serde(default)]
    pub steps: Vec<EditStep>,
    pub sizes: Vec<u32>,
}

impl EditRecipe {
    /// Create an empty recipe for the given source image and output sizes.
    pub fn new(source_file: String, sizes: Vec<u32>) -> Self {
        Self {
            source_file,
            steps: Vec::new(),
            sizes,
        }
    }

    pub fn push(&mut self, step: EditStep) {
        self.steps.push(step);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::shape::{MaskShape, ShapeManipulation};

    #[test]
    fn test_steps_are_tagged() {
        let mut recipe = EditRecipe::new("icon.png".to_string(), vec![16, 32]);
        recipe.push(EditStep::RotateCw);
        recipe.push(EditStep::Crop(PixelRect::new(1, 2, 30, 40)));
        recipe.push(EditStep::Mask(ShapeMask {
            shape: MaskShape::Circle,
            placement: ShapeManipulation::default(),
        }));

        let json = serde_json::to_value(&recipe).unwrap();
        assert_eq!(json["steps"][0]["op"], "rotate_cw");
        assert_eq!(json["steps"][1]["op"], "crop");
        assert_eq!(json["steps"][1]["width"], 30);
        assert_eq!(json["steps"][2]["shape"], "circle");
    }

    #[test]
    fn test_missing_steps_default_to_empty() {
        let recipe: EditRecipe =
            serde_json::from_str(r#"{"source_file": "a.png", "sizes": [16]}"#).unwrap();
        assert!(recipe.steps.is_empty());
    }

    #[test]
    fn test_describe_crop() {
        let step = EditStep::Crop(PixelRect::new(3, 4, 10, 20));
        assert_eq!(step.describe(), "Crop 10x20 at (3, 4)");
    }
}
