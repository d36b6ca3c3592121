// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The shapes data takes on its way from CSV row to rendered result.
//!
//! A `Record` is one row of the exported dataset, held for the whole session
//! and never mutated. A `Match` is transient: it exists for the duration of a
//! single query and borrows the record it points at.
//!
//! # Invariants
//!
//! - **Record**: every field is a plain string. Missing CSV columns become
//!   empty strings, never `None`, so renderers never see "undefined".
//! - **Match**: `index < records.len()` of the index that produced it, and
//!   `record` is exactly `records[index]`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One row of the dataset, in CSV column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Free-text origin label ("pubmed", "wordpress", ...).
    pub source: String,
    /// Export file the row came from. Kept but neither searched nor shown.
    pub file: String,
    pub title: String,
    pub url: String,
    /// Publication year as written in the export; never parsed.
    pub year: String,
    pub journal: String,
    /// Full body text, matched against and previewed.
    pub text: String,
}

impl Record {
    /// Text of one searchable field.
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Text => &self.text,
            Field::Journal => &self.journal,
            Field::Source => &self.source,
        }
    }
}

/// Record fields the fuzzy index can be keyed on.
///
/// `url`, `year` and `file` are deliberately absent: they are never searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Title,
    Text,
    Journal,
    Source,
}

impl Field {
    /// Default key set, in the order fields are tried.
    pub const SEARCHABLE: [Field; 4] = [Field::Title, Field::Text, Field::Journal, Field::Source];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Text => "text",
            Field::Journal => "journal",
            Field::Source => "source",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(Field::Title),
            "text" => Ok(Field::Text),
            "journal" => Ok(Field::Journal),
            "source" => Ok(Field::Source),
            other => Err(format!("'{}' is not a searchable field", other)),
        }
    }
}

/// One record scored against the current query.
///
/// Lower `score` is better; `0.0` means the query occurs verbatim (after
/// normalization) in `field`. The score drives ordering only and is never
/// displayed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Match<'a> {
    /// Position of the record in the loaded dataset.
    pub index: usize,
    pub record: &'a Record,
    /// Relevance, present when the index was built with `include_score`.
    pub score: Option<f64>,
    /// Field that produced the best score.
    pub field: Field,
}
