// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for query handling.
//!
//! Arbitrary records and queries (emoji, combining marks, null bytes, long
//! runs without spaces). Searching must never panic, never exceed the
//! threshold, and must always find a record whose title holds the query
//! verbatim.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use quarry::{normalize, truncate_chars, HtmlRenderer, IndexOptions, Record, SearchSession};

/// One record plus the query typed against it
#[derive(Debug, Arbitrary)]
struct SearchInput {
    title_bytes: Vec<u8>,
    text_bytes: Vec<u8>,
    query_bytes: Vec<u8>,
    /// Threshold in hundredths, clamped to [0, 1]
    threshold: u8,
    /// Phrase window in bytes
    window: u16,
}

fuzz_target!(|input: SearchInput| {
    let title = String::from_utf8_lossy(&input.title_bytes);
    let text = String::from_utf8_lossy(&input.text_bytes);
    let query = String::from_utf8_lossy(&input.query_bytes);

    // Cap lengths to avoid timeouts
    let title = truncate_chars(&title, 200);
    let text = truncate_chars(&text, 2000);
    let query = truncate_chars(&query, 64);

    let threshold = f64::from(input.threshold.min(100)) / 100.0;
    let options = IndexOptions {
        threshold,
        phrase_window: usize::from(input.window).max(1),
        ..IndexOptions::default()
    };
    let record = Record {
        source: "fuzz".to_string(),
        title: title.to_string(),
        text: text.to_string(),
        ..Record::default()
    };
    let session = SearchSession::with_options(vec![record], options, 40);

    let matches = session.query(query);
    assert!(matches.len() <= 1);
    for m in &matches {
        assert_eq!(m.index, 0);
        let score = m.score.expect("scores are on by default");
        assert!((0.0..=threshold).contains(&score), "score {} over {}", score, threshold);
    }

    let needle = normalize(query);
    if !needle.is_empty() && normalize(title).contains(&needle) {
        assert_eq!(matches.first().and_then(|m| m.score), Some(0.0));
    }

    let html = session.on_input(query, &HtmlRenderer::default());
    if query.trim().is_empty() {
        assert!(html.is_empty());
    }
});
