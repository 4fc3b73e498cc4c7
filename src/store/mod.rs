// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Persistent key-value settings.
//!
//! Everything the editor remembers between runs goes through the narrow
//! `KeyValueStore` interface. `SiteRegistry` layers typed per-hostname
//! records on top of it.

pub mod json_file;
pub mod memory;
pub mod sites;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use sites::SiteRegistry;

use anyhow::Result;
use serde_json::Value;

/// Minimal get/set storage of JSON values.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Value>>;
    fn set(&mut self, key: &str, value: Value) -> Result<()>;
    /// Remove a key. Returns whether it existed.
    fn remove(&mut self, key: &str) -> Result<bool>;
    /// All keys, sorted.
    fn keys(&self) -> Result<Vec<String>>;
}
