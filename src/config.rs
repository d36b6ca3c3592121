// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Session configuration.
//!
//! Every field has a default, so an empty JSON object (or no file at all) is a
//! valid configuration. Files use camelCase keys:
//!
//! ```json
//! {
//!   "source": "output/eppley_master.csv",
//!   "threshold": 0.4,
//!   "limit": 40,
//!   "snippetChars": 240,
//!   "keys": ["title", "text", "journal", "source"],
//!   "overflow": "drop",
//!   "debounceMs": 0,
//!   "phraseWindow": 1024
//! }
//! ```

use crate::error::ConfigError;
use crate::index::{IndexOptions, DEFAULT_PHRASE_WINDOW, DEFAULT_THRESHOLD};
use crate::loader::{CsvOptions, Overflow};
use crate::render::{RenderOptions, PLACEHOLDER_TITLE, SNIPPET_CHARS};
use crate::types::Field;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Relative path of the export the widget reads when nothing else is given.
pub const DEFAULT_SOURCE: &str = "output/eppley_master.csv";

/// Config file picked up from the working directory when present.
pub const CONFIG_FILE: &str = "quarry.json";

/// Most results rendered for one query.
pub const MAX_RESULTS: usize = 40;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Path or http(s) URL of the CSV export.
    pub source: String,
    pub threshold: f64,
    pub limit: usize,
    pub snippet_chars: usize,
    pub placeholder_title: String,
    pub keys: Vec<Field>,
    pub overflow: Overflow,
    /// Quiet period before a burst of input events is queried. 0 queries
    /// every event.
    pub debounce_ms: u64,
    /// Leading bytes of a field searched for multi-word queries that do not
    /// occur verbatim.
    pub phrase_window: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            threshold: DEFAULT_THRESHOLD,
            limit: MAX_RESULTS,
            snippet_chars: SNIPPET_CHARS,
            placeholder_title: PLACEHOLDER_TITLE.to_string(),
            keys: Field::SEARCHABLE.to_vec(),
            overflow: Overflow::Drop,
            debounce_ms: 0,
            phrase_window: DEFAULT_PHRASE_WINDOW,
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Explicit file if given, else `quarry.json` in the working directory,
    /// else defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let local = PathBuf::from(CONFIG_FILE);
                if local.is_file() {
                    log::debug!("using config from {}", local.display());
                    Self::from_file(&local)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ConfigError::Invalid(format!(
                "threshold must be within [0, 1], got {}",
                self.threshold
            )));
        }
        if self.limit == 0 {
            return Err(ConfigError::Invalid("limit must be at least 1".into()));
        }
        if self.snippet_chars == 0 {
            return Err(ConfigError::Invalid("snippetChars must be at least 1".into()));
        }
        if self.phrase_window == 0 {
            return Err(ConfigError::Invalid("phraseWindow must be at least 1".into()));
        }
        if self.keys.is_empty() {
            return Err(ConfigError::Invalid("keys must name at least one field".into()));
        }
        Ok(())
    }

    pub fn index_options(&self) -> IndexOptions {
        IndexOptions {
            threshold: self.threshold,
            keys: self.keys.clone(),
            include_score: true,
            phrase_window: self.phrase_window,
        }
    }

    pub fn csv_options(&self) -> CsvOptions {
        CsvOptions {
            overflow: self.overflow,
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            snippet_chars: self.snippet_chars,
            placeholder_title: self.placeholder_title.clone(),
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
