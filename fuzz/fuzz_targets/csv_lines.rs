// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the CSV loader.
//!
//! Exports come from several scrapers of varying quality. Whatever bytes end
//! up in the file, parsing must not panic and must not invent rows.

#![no_main]

use libfuzzer_sys::fuzz_target;
use quarry::{parse_csv, CsvOptions, Overflow};

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let lines = text.split('\n').count();

    for overflow in [Overflow::Drop, Overflow::Merge] {
        let records = parse_csv(&text, &CsvOptions { overflow });

        assert!(records.len() < lines.max(1), "more records than data lines");
        for record in &records {
            assert!(!record.title.contains('"'), "quote survived in title");
            assert!(!record.text.contains('"'), "quote survived in text");
        }
    }
});
