//! Shared test utilities and fixtures.

#![allow(dead_code)]

use quarry::{parse_csv, Config, CsvOptions, Record, SearchSession};
use std::io::Write;
use std::path::PathBuf;

// ============================================================================
// FIXTURES
// ============================================================================

pub const HEADER: &str = "source,file,title,url,year,journal,text";

/// The worked example: a quoted title with an embedded comma.
pub const RHINOPLASTY_CSV: &str = "source,file,title,url,year,journal,text\n\
    PubMed,f1,\"Rhinoplasty, Revisited\",http://x,2020,JPRS,\"A study of rhinoplasty outcomes\"";

/// A small mixed export, shaped like the merged collector output.
pub const MIXED_CSV: &str = "source,file,title,url,year,journal,text\n\
    pubmed,pubmed_eppley.csv,\"Rhinoplasty, Revisited\",https://pubmed.example/1,2020,JPRS,\"A study of rhinoplasty outcomes\"\n\
    wordpress,wordpress_posts.csv,Chin Implant Sizing,https://blog.example/chin,2019,,\"Choosing the right size of silicone chin implant\"\n\
    youtube,youtube_all.csv,,https://video.example/v1,2021,,\"Jaw angle implants, explained\"\n\
    crossref,crossref_works.csv,Custom Skull Implants,https://doi.example/10.1,2017,Plastic and Reconstructive Surgery,\"Computer-designed cranial implants for aesthetic augmentation\"\n\
    \n\
    openalex,openalex_works.csv,Temporal Reduction,https://openalex.example/W1,2022,Aesthetic Surgery Journal,\"Outcomes of temporal reduction surgery\"";

pub fn records(csv: &str) -> Vec<Record> {
    parse_csv(csv, &CsvOptions::default())
}

pub fn session(csv: &str) -> SearchSession {
    SearchSession::new(records(csv), &Config::default())
}

/// Records that all match `word` verbatim in their title.
pub fn uniform_records(word: &str, count: usize) -> Vec<Record> {
    (0..count)
        .map(|i| Record {
            source: "pubmed".to_string(),
            title: format!("{} case {}", word, i),
            text: format!("Case report number {}", i),
            ..Record::default()
        })
        .collect()
}

/// Write `contents` to a fresh temp file and return its path. The directory
/// handle must outlive the path.
pub fn write_temp_csv(contents: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("master.csv");
    let mut file = std::fs::File::create(&path).expect("create csv");
    file.write_all(contents.as_bytes()).expect("write csv");
    (dir, path)
}
