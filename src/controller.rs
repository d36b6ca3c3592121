// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query control: from raw input events to rendered results.
//!
//! [`SearchSession`] is the context object a page (or terminal) owns for its
//! lifetime. It is built once, after loading, and only read afterwards, so it
//! can be shared freely by reference.
//!
//! Two ways to drive it:
//!
//! - [`SearchSession::on_input`] handles one input event synchronously. This is
//!   what the browser widget does on every keystroke.
//! - [`drive`] consumes a stream of input events and coalesces bursts that
//!   arrive within a debounce window, querying only the latest value. With a
//!   zero window it degenerates to one query per event.

use crate::config::{Config, MAX_RESULTS};
use crate::index::{FuzzyIndex, IndexOptions};
use crate::render::Renderer;
use crate::types::{Match, Record};

#[cfg(feature = "native")]
use std::time::Duration;
#[cfg(feature = "native")]
use tokio::sync::mpsc;

/// A loaded dataset plus its index, owned by whoever hosts the search box.
#[derive(Debug)]
pub struct SearchSession {
    index: FuzzyIndex,
    limit: usize,
}

impl SearchSession {
    pub fn new(records: Vec<Record>, config: &Config) -> Self {
        Self::with_options(records, config.index_options(), config.limit)
    }

    pub fn with_options(records: Vec<Record>, options: IndexOptions, limit: usize) -> Self {
        Self {
            index: FuzzyIndex::new(records, options),
            limit,
        }
    }

    /// Session over no data: every query yields nothing.
    pub fn empty() -> Self {
        Self::with_options(Vec::new(), IndexOptions::default(), MAX_RESULTS)
    }

    pub fn index(&self) -> &FuzzyIndex {
        &self.index
    }

    pub fn records(&self) -> &[Record] {
        self.index.records()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Trimmed query, best matches first, at most `limit` of them. A blank
    /// query never reaches the index.
    pub fn query(&self, raw: &str) -> Vec<Match<'_>> {
        let query = raw.trim();
        if query.is_empty() {
            return Vec::new();
        }
        let mut matches = self.index.search(query);
        matches.truncate(self.limit);
        matches
    }

    /// One input event: query and render, or clear on a blank query.
    pub fn on_input<R: Renderer>(&self, raw: &str, renderer: &R) -> R::Output {
        present(renderer, raw, &self.query(raw))
    }
}

/// Render the outcome of one query: cleared for blank input, otherwise the
/// matches in order (possibly none).
pub fn present<R: Renderer>(renderer: &R, query: &str, matches: &[Match<'_>]) -> R::Output {
    if query.trim().is_empty() {
        renderer.clear()
    } else {
        renderer.render(matches)
    }
}

/// Load the configured source and index it. Load failures leave an empty,
/// still-usable session.
#[cfg(feature = "native")]
pub async fn load_session(config: &Config) -> SearchSession {
    let records = match config.source.parse::<crate::loader::Source>() {
        Ok(source) => crate::loader::load(&source, &config.csv_options()).await,
        Err(e) => {
            log::warn!("{}", e);
            Vec::new()
        }
    };
    SearchSession::new(records, config)
}

/// Feed input events through `session`, debounced.
///
/// Each received value starts a quiet period of `debounce`; further values in
/// that period replace it. When the period passes (or the sender is dropped)
/// the latest value is queried and handed to `sink` together with its
/// matches. Updates reach `sink` in input order. Returns once the channel is
/// closed and drained.
#[cfg(feature = "native")]
pub async fn drive<F>(
    session: &SearchSession,
    inputs: &mut mpsc::Receiver<String>,
    debounce: Duration,
    mut sink: F,
) where
    F: FnMut(&str, &[Match<'_>]),
{
    while let Some(mut latest) = inputs.recv().await {
        if !debounce.is_zero() {
            loop {
                match tokio::time::timeout(debounce, inputs.recv()).await {
                    Ok(Some(next)) => latest = next,
                    Ok(None) | Err(_) => break,
                }
            }
        }

        let matches = session.query(&latest);
        sink(&latest, &matches);
    }
}
