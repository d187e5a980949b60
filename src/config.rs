// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::{get_setting, set_setting};
use crate::models::UserLevel;
use anyhow::{Context, Result, anyhow};
use rusqlite::Connection;
use serde::Serialize;
use std::time::Duration;

pub const ENV_API_URL: &str = "FOLIOSCOPE_API_URL";

pub const KEY_API_BASE_URL: &str = "api_base_url";
pub const KEY_TIMEOUT_SECS: &str = "timeout_secs";
pub const KEY_REVEAL_DELAY_MS: &str = "reveal_delay_ms";
pub const KEY_TOP_K_SOURCES: &str = "top_k_sources";
pub const KEY_USER_LEVEL: &str = "user_level";

pub const CONFIG_KEYS: [&str; 5] = [
    KEY_API_BASE_URL,
    KEY_TIMEOUT_SECS,
    KEY_REVEAL_DELAY_MS,
    KEY_TOP_K_SOURCES,
    KEY_USER_LEVEL,
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub timeout_secs: u64,
    pub reveal_delay_ms: u64,
    pub top_k_sources: u32,
    pub user_level: UserLevel,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            timeout_secs: 15,
            reveal_delay_ms: 500,
            top_k_sources: 5,
            user_level: UserLevel::Beginner,
        }
    }
}

impl ClientConfig {
    /// Defaults, then persisted settings, then the environment, then the CLI flag.
    pub fn resolve(conn: &Connection, api_url_flag: Option<&str>) -> Result<Self> {
        let mut cfg = ClientConfig::default();
        for key in CONFIG_KEYS {
            if let Some(v) = get_setting(conn, key)? {
                cfg.apply(key, &v)
                    .with_context(|| format!("Invalid stored setting '{}'", key))?;
            }
        }
        if let Ok(url) = std::env::var(ENV_API_URL) {
            if !url.trim().is_empty() {
                cfg.api_base_url = url.trim().to_string();
            }
        }
        if let Some(url) = api_url_flag {
            cfg.api_base_url = url.trim().to_string();
        }
        cfg.api_base_url = cfg.api_base_url.trim_end_matches('/').to_string();
        Ok(cfg)
    }

    pub fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            KEY_API_BASE_URL => self.api_base_url = value.to_string(),
            KEY_TIMEOUT_SECS => self.timeout_secs = value.parse()?,
            KEY_REVEAL_DELAY_MS => self.reveal_delay_ms = value.parse()?,
            KEY_TOP_K_SOURCES => self.top_k_sources = value.parse()?,
            KEY_USER_LEVEL => self.user_level = value.parse()?,
            other => return Err(anyhow!("Unknown config key '{}'", other)),
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }
}

/// Validates `value` against `key` before persisting it.
pub fn store(conn: &Connection, key: &str, value: &str) -> Result<()> {
    ClientConfig::default().apply(key, value)?;
    set_setting(conn, key, value.trim())?;
    Ok(())
}
