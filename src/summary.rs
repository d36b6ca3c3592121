// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Dataset overview for `quarry inspect`.
//!
//! The same numbers the collectors' status report shows per export file,
//! computed from the merged CSV instead: rows per source, year span, and rows
//! that will render poorly (no title, no body).

use crate::types::Record;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetSummary {
    pub records: usize,
    /// Row count per `source` label, empty labels under `""`.
    pub per_source: BTreeMap<String, usize>,
    /// Earliest and latest four-digit year among rows whose year parses.
    pub year_range: Option<(u16, u16)>,
    pub untitled: usize,
    pub without_text: usize,
}

impl DatasetSummary {
    pub fn from_records(records: &[Record]) -> Self {
        let mut summary = Self {
            records: records.len(),
            ..Self::default()
        };

        for record in records {
            *summary
                .per_source
                .entry(record.source.trim().to_string())
                .or_insert(0) += 1;

            if record.title.trim().is_empty() {
                summary.untitled += 1;
            }
            if record.text.trim().is_empty() {
                summary.without_text += 1;
            }
            if let Some(year) = leading_year(&record.year) {
                summary.year_range = Some(match summary.year_range {
                    Some((lo, hi)) => (lo.min(year), hi.max(year)),
                    None => (year, year),
                });
            }
        }

        summary
    }
}

/// `"2020"`, `"2020-05-01"` and `"2020.0"` all yield 2020.
fn leading_year(raw: &str) -> Option<u16> {
    let digits = raw.trim().get(..4)?;
    if digits.chars().all(|c| c.is_ascii_digit()) {
        digits.parse().ok()
    } else {
        None
    }
}
