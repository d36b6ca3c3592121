// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Typo-tolerant index over a loaded dataset.
//!
//! Built once per session, read-only afterwards. Each searchable field of each
//! record is normalized up front (lowercase, diacritics stripped, whitespace
//! collapsed). Every distinct word across all fields goes into one shared
//! vocabulary, and each field keeps the ids of the words it contains, so a
//! long article body costs one vocabulary lookup per distinct word rather
//! than a scan of its full text.
//!
//! # Scoring
//!
//! Distances are approximate-substring Levenshtein distances from
//! `triple_accel`: the cost of the cheapest edit that makes the query appear
//! somewhere inside the target. A typo anywhere in a word, including its
//! middle, is found. Distances are counted on bytes of normalized text, which
//! for Latin script after diacritic stripping is the same as characters.
//!
//! - **Single-word queries** are scored against the vocabulary once per
//!   query; a field's distance is the best distance among its words.
//! - **Multi-word queries** score `0.0` when the field contains the phrase
//!   verbatim anywhere. Otherwise the approximate search runs over the first
//!   [`IndexOptions::phrase_window`] bytes of the field.
//!
//! A field qualifies when the distance is at most
//! `floor(threshold * query_chars)`; its score is `distance / query_chars`.
//! A record's score is its best field score. Results are sorted ascending
//! with a stable sort, so equal scores keep dataset order.

use crate::types::{Field, Match, Record};
use crate::utils::normalize;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use triple_accel::levenshtein::{levenshtein_search_simd_with_opts, LEVENSHTEIN_COSTS};
use triple_accel::SearchType;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Fraction of the query length allowed to differ.
pub const DEFAULT_THRESHOLD: f64 = 0.4;

/// Leading bytes of a field searched approximately for multi-word queries.
pub const DEFAULT_PHRASE_WINDOW: usize = 1024;

/// Vocabulary slot for a word that does not match the current query.
const NO_MATCH: u32 = u32::MAX;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IndexOptions {
    /// Allowed divergence in `[0, 1]`. `0.0` only accepts verbatim substrings.
    pub threshold: f64,
    /// Fields matched against, in tie-break order.
    pub keys: Vec<Field>,
    /// Report scores on each [`Match`].
    pub include_score: bool,
    /// Bytes of each field scanned for approximate phrase matches. Verbatim
    /// phrases are found anywhere regardless.
    pub phrase_window: usize,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            keys: Field::SEARCHABLE.to_vec(),
            include_score: true,
            phrase_window: DEFAULT_PHRASE_WINDOW,
        }
    }
}

/// One normalized field and the vocabulary ids of its distinct words.
#[derive(Debug)]
struct IndexedField {
    field: Field,
    text: String,
    words: Vec<u32>,
}

/// Distinct normalized words of the whole dataset, assigned ids in order of
/// first appearance.
#[derive(Debug, Default)]
struct VocabularyBuilder {
    words: Vec<String>,
    ids: HashMap<String, u32>,
}

impl VocabularyBuilder {
    fn field(&mut self, field: Field, raw: &str) -> IndexedField {
        let text = normalize(raw);
        let mut words: Vec<u32> = text
            .split(' ')
            .filter(|word| !word.is_empty())
            .map(|word| self.intern(word))
            .collect();
        words.sort_unstable();
        words.dedup();
        IndexedField { field, text, words }
    }

    fn intern(&mut self, word: &str) -> u32 {
        if let Some(&id) = self.ids.get(word) {
            return id;
        }
        let id = self.words.len() as u32;
        self.words.push(word.to_string());
        self.ids.insert(word.to_string(), id);
        id
    }
}

/// A query normalized once and measured against the threshold.
#[derive(Debug)]
struct PreparedQuery {
    text: String,
    chars: usize,
    single_word: bool,
    max_errors: u32,
}

impl PreparedQuery {
    fn new(raw: &str, threshold: f64) -> Option<Self> {
        let text = normalize(raw);
        if text.is_empty() {
            return None;
        }
        let chars = text.chars().count();
        let single_word = !text.contains(' ');
        let max_errors = (threshold.clamp(0.0, 1.0) * chars as f64).floor() as u32;
        Some(Self {
            text,
            chars,
            single_word,
            max_errors,
        })
    }

    /// Cheapest edit placing the query inside `haystack`, if within budget.
    fn distance_in(&self, haystack: &[u8]) -> Option<u32> {
        let needle = self.text.as_bytes();
        if haystack.len() + (self.max_errors as usize) < needle.len() {
            return None;
        }
        levenshtein_search_simd_with_opts(
            needle,
            haystack,
            self.max_errors,
            SearchType::Best,
            LEVENSHTEIN_COSTS,
            false,
        )
        .map(|hit| hit.k)
        .min()
    }
}

/// Fuzzy search structure over an immutable record list.
#[derive(Debug)]
pub struct FuzzyIndex {
    records: Vec<Record>,
    fields: Vec<Vec<IndexedField>>,
    vocabulary: Vec<String>,
    options: IndexOptions,
}

impl FuzzyIndex {
    pub fn new(records: Vec<Record>, options: IndexOptions) -> Self {
        let mut vocabulary = VocabularyBuilder::default();
        let fields = records
            .iter()
            .map(|record| {
                options
                    .keys
                    .iter()
                    .map(|&field| vocabulary.field(field, record.field(field)))
                    .collect()
            })
            .collect();

        log::debug!(
            "indexed {} records on {} fields, {} distinct words (threshold {})",
            records.len(),
            options.keys.len(),
            vocabulary.words.len(),
            options.threshold
        );

        Self {
            records,
            fields,
            vocabulary: vocabulary.words,
            options,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn options(&self) -> &IndexOptions {
        &self.options
    }

    /// All records within the threshold, best first.
    ///
    /// A blank query returns nothing.
    pub fn search(&self, query: &str) -> Vec<Match<'_>> {
        let Some(query) = PreparedQuery::new(query, self.options.threshold) else {
            return Vec::new();
        };

        let word_distances = query.single_word.then(|| self.word_distances(&query));
        let scorer = FieldScorer {
            query: &query,
            word_distances: word_distances.as_deref(),
            phrase_window: self.options.phrase_window,
        };

        let score = |(index, fields): (usize, &Vec<IndexedField>)| {
            scorer.best(fields).map(|(score, field)| (index, score, field))
        };

        #[cfg(feature = "parallel")]
        let mut scored: Vec<(usize, f64, Field)> =
            self.fields.par_iter().enumerate().filter_map(score).collect();

        #[cfg(not(feature = "parallel"))]
        let mut scored: Vec<(usize, f64, Field)> =
            self.fields.iter().enumerate().filter_map(score).collect();

        scored.sort_by(|a, b| a.1.total_cmp(&b.1));

        log::debug!("query {:?} matched {} records", query.text, scored.len());

        scored
            .into_iter()
            .map(|(index, score, field)| Match {
                index,
                record: &self.records[index],
                score: self.options.include_score.then_some(score),
                field,
            })
            .collect()
    }

    /// Distance of the query within every vocabulary word, [`NO_MATCH`] when
    /// over budget.
    fn word_distances(&self, query: &PreparedQuery) -> Vec<u32> {
        let distance = |word: &String| query.distance_in(word.as_bytes()).unwrap_or(NO_MATCH);

        #[cfg(feature = "parallel")]
        let distances = self.vocabulary.par_iter().map(distance).collect();

        #[cfg(not(feature = "parallel"))]
        let distances = self.vocabulary.iter().map(distance).collect();

        distances
    }
}

/// Per-query scoring state shared by every record.
struct FieldScorer<'q> {
    query: &'q PreparedQuery,
    word_distances: Option<&'q [u32]>,
    phrase_window: usize,
}

impl FieldScorer<'_> {
    /// Lowest-scoring field of one record; earlier keys win ties.
    fn best(&self, fields: &[IndexedField]) -> Option<(f64, Field)> {
        let mut best: Option<(u32, Field)> = None;
        for indexed in fields {
            if let Some(distance) = self.distance(indexed) {
                if best.map_or(true, |(d, _)| distance < d) {
                    best = Some((distance, indexed.field));
                }
                if distance == 0 {
                    break;
                }
            }
        }
        best.map(|(distance, field)| (distance as f64 / self.query.chars as f64, field))
    }

    fn distance(&self, indexed: &IndexedField) -> Option<u32> {
        if indexed.words.is_empty() {
            return None;
        }
        match self.word_distances {
            Some(distances) => indexed
                .words
                .iter()
                .map(|&id| distances[id as usize])
                .min()
                .filter(|&d| d != NO_MATCH),
            None => {
                if indexed.text.contains(&self.query.text) {
                    return Some(0);
                }
                let window = indexed.text.len().min(self.phrase_window);
                self.query.distance_in(&indexed.text.as_bytes()[..window])
            }
        }
    }
}
