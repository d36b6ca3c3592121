// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the quarry command-line interface.
//!
//! Three subcommands: `search` answers one query, `watch` treats each stdin
//! line as a keystroke-level input event and streams updates through the
//! debounced controller, and `inspect` summarizes the dataset. Flags override
//! values from `quarry.json`.

pub mod display;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use quarry::{Config, ConfigError, Overflow};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "quarry",
    about = "Typo-tolerant search over research CSV exports",
    version
)]
pub struct Cli {
    /// Config file (defaults to ./quarry.json when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug). QUARRY_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one query and print the results
    Search {
        /// Search query
        query: String,

        #[command(flatten)]
        options: QueryOptions,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: Format,
    },

    /// Read queries from stdin, one per line, and print each update
    Watch {
        #[command(flatten)]
        options: QueryOptions,

        /// Quiet period in milliseconds before a burst of lines is queried
        #[arg(long)]
        debounce_ms: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: Format,
    },

    /// Summarize the dataset
    Inspect {
        #[command(flatten)]
        source: SourceOptions,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Clone, Debug, Default)]
pub struct SourceOptions {
    /// CSV path or http(s) URL of the dataset
    #[arg(short, long)]
    pub source: Option<String>,

    /// Rejoin columns past the seventh into the text field instead of dropping them
    #[arg(long)]
    pub merge_overflow: bool,
}

#[derive(Args, Clone, Debug, Default)]
pub struct QueryOptions {
    #[command(flatten)]
    pub source: SourceOptions,

    /// Maximum number of results to show
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Allowed divergence, 0.0 (exact) to 1.0 (anything)
    #[arg(short, long)]
    pub threshold: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Terminal,
    Html,
    Json,
}

impl SourceOptions {
    pub fn apply(&self, config: &mut Config) {
        if let Some(source) = &self.source {
            config.source = source.clone();
        }
        if self.merge_overflow {
            config.overflow = Overflow::Merge;
        }
    }
}

impl QueryOptions {
    pub fn apply(&self, config: &mut Config) {
        self.source.apply(config);
        if let Some(limit) = self.limit {
            config.limit = limit;
        }
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
    }
}

/// File (or defaults) first, flags on top, then validated as a whole.
pub fn resolve_config(
    path: Option<&std::path::Path>,
    apply: impl FnOnce(&mut Config),
) -> Result<Config, ConfigError> {
    let mut config = Config::discover(path)?;
    apply(&mut config);
    config.validate()?;
    Ok(config)
}
