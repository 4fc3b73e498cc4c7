// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model: regions, masks, edit recipes and site records.

pub mod recipe;
pub mod region;
pub mod shape;
pub mod site;
