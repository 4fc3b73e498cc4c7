// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Image operations consuming overlay results.
//!
//! Crop rectangles and shape placements produced by the overlays are applied
//! here, together with rotation/flip and favicon rendering.

pub mod favicon;
pub mod mask;
pub mod transform;
