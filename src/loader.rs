// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CSV loading: from raw export text to an ordered list of records.
//!
//! The exports are line-oriented with a fixed column order:
//!
//! ```text
//! source,file,title,url,year,journal,text
//! PubMed,f1,"Rhinoplasty, Revisited",http://x,2020,JPRS,"A study of ..."
//! ```
//!
//! Parsing is positional and forgiving rather than strict RFC 4180. A comma is
//! a delimiter only when an even number of `"` characters precede it on the
//! line, and every `"` is then removed from every field. Rows with too few
//! columns get empty strings; rows with too many either drop or merge the
//! overflow depending on [`Overflow`]. Malformed rows never raise errors.
//!
//! Fetching is the only fallible step, and even that is swallowed by [`load`]:
//! a missing file or a 404 produces an empty dataset and a warning in the log.

use crate::types::Record;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

#[cfg(feature = "native")]
use crate::error::LoadError;

/// What to do with columns past the seventh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Overflow {
    /// Keep column 6 as `text` and silently discard the rest.
    #[default]
    Drop,
    /// Rejoin columns 6.. with `,` into `text`.
    Merge,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CsvOptions {
    pub overflow: Overflow,
}

/// Split one CSV line on commas that sit outside double quotes, then strip
/// every `"` from each field.
///
/// Escaped quotes (`""`) are not unescaped; they are removed like any other
/// quote character.
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
            }
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

/// Map one data line onto a [`Record`] by column position.
pub fn parse_record(line: &str, options: &CsvOptions) -> Record {
    let mut cols = split_fields(line).into_iter();

    let source = cols.next().unwrap_or_default();
    let file = cols.next().unwrap_or_default();
    let title = cols.next().unwrap_or_default();
    let url = cols.next().unwrap_or_default();
    let year = cols.next().unwrap_or_default();
    let journal = cols.next().unwrap_or_default();
    let mut text = cols.next().unwrap_or_default();

    if options.overflow == Overflow::Merge {
        for extra in cols {
            text.push(',');
            text.push_str(&extra);
        }
    }

    Record {
        source,
        file,
        title,
        url,
        year,
        journal,
        text,
    }
}

/// Parse a whole export. Line 0 is the header and is always skipped; lines
/// that are blank after trimming are dropped. Output order is input order.
pub fn parse_csv(text: &str, options: &CsvOptions) -> Vec<Record> {
    text.split('\n')
        .skip(1)
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty())
        .map(|line| parse_record(line, options))
        .collect()
}

/// Where the CSV export lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Path(PathBuf),
    Url(String),
}

impl FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("dataset source is empty".to_string());
        }
        let lower = s.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Ok(Source::Url(s.to_string()))
        } else {
            Ok(Source::Path(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Path(path) => write!(f, "{}", path.display()),
            Source::Url(url) => f.write_str(url),
        }
    }
}

/// Fetch the raw export text. Non-2xx HTTP responses are errors.
#[cfg(feature = "native")]
pub async fn fetch_text(source: &Source) -> Result<String, LoadError> {
    match source {
        Source::Path(path) => tokio::fs::read_to_string(path)
            .await
            .map_err(|source| LoadError::Io {
                path: path.clone(),
                source,
            }),
        Source::Url(url) => {
            let response = reqwest::get(url.as_str())
                .await
                .map_err(|source| LoadError::Request {
                    url: url.clone(),
                    source,
                })?;

            let status = response.status();
            if !status.is_success() {
                return Err(LoadError::Status {
                    url: url.clone(),
                    status: status.as_u16(),
                });
            }

            response.text().await.map_err(|source| LoadError::Request {
                url: url.clone(),
                source,
            })
        }
    }
}

/// Fetch and parse, degrading every failure to an empty dataset.
#[cfg(feature = "native")]
pub async fn load(source: &Source, options: &CsvOptions) -> Vec<Record> {
    match fetch_text(source).await {
        Ok(text) => {
            let records = parse_csv(&text, options);
            log::debug!("loaded {} records from {}", records.len(), source);
            records
        }
        Err(e) => {
            log::warn!("dataset unavailable, continuing with no records: {}", e);
            Vec::new()
        }
    }
}
