//! Typo-tolerant search over scraped research exports.
//!
//! The collectors of the research toolkit write one flat CSV (`source, file,
//! title, url, year, journal, text`). This crate loads that file, indexes it
//! once, and answers search-box queries against it, either in the terminal or
//! in a browser through the `wasm` feature.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌───────────────┐     ┌─────────────┐
//! │  loader.rs  │────▶│  index.rs    │────▶│ controller.rs │────▶│  render.rs  │
//! │ (CSV → Vec  │     │ (FuzzyIndex, │     │ (SearchSession│     │ (ResultView,│
//! │  <Record>)  │     │  search)     │     │  drive)       │     │  Renderer)  │
//! └─────────────┘     └──────────────┘     └───────────────┘     └─────────────┘
//!                                                  ▲
//!                                          config.rs (Config)
//! ```
//!
//! Loading is the only async step and the only one that can fail; failures
//! degrade to an empty session rather than an error. Everything after loading
//! is synchronous and read-only.
//!
//! # Usage
//!
//! ```
//! use quarry::{parse_csv, Config, CsvOptions, HtmlRenderer, SearchSession};
//!
//! let csv = "source,file,title,url,year,journal,text\n\
//!            PubMed,f1,\"Rhinoplasty, Revisited\",http://x,2020,JPRS,\"A study\"";
//! let session = SearchSession::new(parse_csv(csv, &CsvOptions::default()), &Config::default());
//!
//! let matches = session.query("rhinoplsty");
//! assert_eq!(matches[0].record.title, "Rhinoplasty, Revisited");
//!
//! let html = session.on_input("rhinoplsty", &HtmlRenderer::default());
//! assert!(html.contains("noopener noreferrer"));
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod index;
pub mod loader;
pub mod render;
pub mod summary;
mod types;
mod utils;

#[cfg(feature = "wasm")]
mod wasm;

pub use config::{Config, CONFIG_FILE, DEFAULT_SOURCE, MAX_RESULTS};
pub use controller::{present, SearchSession};
#[cfg(feature = "native")]
pub use controller::{drive, load_session};
pub use error::{ConfigError, LoadError};
pub use index::{FuzzyIndex, IndexOptions, DEFAULT_PHRASE_WINDOW, DEFAULT_THRESHOLD};
#[cfg(feature = "native")]
pub use loader::{fetch_text, load};
pub use loader::{parse_csv, parse_record, split_fields, CsvOptions, Overflow, Source};
pub use render::{
    escape_html, meta_line, snippet, HtmlRenderer, JsonRenderer, RenderOptions, Renderer,
    ResultView, ELLIPSIS, PLACEHOLDER_TITLE, SNIPPET_CHARS,
};
pub use summary::DatasetSummary;
pub use types::{Field, Match, Record};
pub use utils::{normalize, truncate_chars};
