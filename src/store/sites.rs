// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Per-hostname favicon records.

use super::KeyValueStore;
use crate::models::site::SiteSettings;
use anyhow::{bail, Context, Result};

const SITE_PREFIX: &str = "site:";

/// Reduce user input such as `https://WWW.Example.com:8080/path` to a bare hostname.
pub fn normalize_hostname(input: &str) -> Result<String> {
    let trimmed = input.trim();
    let without_scheme = trimmed
        .split_once("://")
        .map_or(trimmed, |(_, rest)| rest);
    let authority = without_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    let host = authority.rsplit('@').next().unwrap_or_default();
    let host = host.split(':').next().unwrap_or_default();
    let host = host.trim_end_matches('.').to_ascii_lowercase();

    if host.is_empty() {
        bail!("No hostname in {:?}", input);
    }
    if let Some(bad) = host
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '.'))
    {
        bail!("Invalid character {:?} in hostname {:?}", bad, host);
    }
    Ok(host)
}

fn site_key(hostname: &str) -> String {
    format!("{SITE_PREFIX}{hostname}")
}

/// Typed access to `SiteSettings` stored under `site:<hostname>` keys.
pub struct SiteRegistry {
    store: Box<dyn KeyValueStore>,
}

impl SiteRegistry {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Settings saved for `hostname`, if any.
    pub fn load(&self, hostname: &str) -> Result<Option<SiteSettings>> {
        let hostname = normalize_hostname(hostname)?;
        let Some(value) = self.store.get(&site_key(&hostname))? else {
            return Ok(None);
        };
        let settings = serde_json::from_value(value)
            .with_context(|| format!("Corrupt settings for {}", hostname))?;
        Ok(Some(settings))
    }

    /// Store settings, replacing whatever the site had. Returns the normalized hostname.
    pub fn save(&mut self, mut settings: SiteSettings) -> Result<String> {
        let hostname = normalize_hostname(&settings.hostname)?;
        settings.hostname = hostname.clone();
        let value = serde_json::to_value(&settings)?;
        self.store.set(&site_key(&hostname), value)?;
        log::info!("Saved favicon settings for {}", hostname);
        Ok(hostname)
    }

    /// Drop a site's settings. Returns whether there were any.
    pub fn forget(&mut self, hostname: &str) -> Result<bool> {
        let hostname = normalize_hostname(hostname)?;
        let removed = self.store.remove(&site_key(&hostname))?;
        if removed {
            log::info!("Forgot favicon settings for {}", hostname);
        }
        Ok(removed)
    }

    /// Hostnames with saved settings, sorted.
    pub fn hostnames(&self) -> Result<Vec<String>> {
        Ok(self
            .store
            .keys()?
            .into_iter()
            .filter_map(|key| key.strip_prefix(SITE_PREFIX).map(str::to_string))
            .collect())
    }
}
