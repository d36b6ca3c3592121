//! CSV parsing against realistic export rows.

use super::common::{records, HEADER, MIXED_CSV, RHINOPLASTY_CSV};
use quarry::{parse_csv, parse_record, split_fields, CsvOptions, Overflow};

#[test]
fn test_worked_example_keeps_comma_in_title() {
    let parsed = records(RHINOPLASTY_CSV);
    assert_eq!(parsed.len(), 1);

    let record = &parsed[0];
    assert_eq!(record.source, "PubMed");
    assert_eq!(record.file, "f1");
    assert_eq!(record.title, "Rhinoplasty, Revisited");
    assert_eq!(record.url, "http://x");
    assert_eq!(record.year, "2020");
    assert_eq!(record.journal, "JPRS");
    assert_eq!(record.text, "A study of rhinoplasty outcomes");
}

#[test]
fn test_mixed_export_preserves_row_order() {
    let parsed = records(MIXED_CSV);
    let sources: Vec<&str> = parsed.iter().map(|r| r.source.as_str()).collect();
    assert_eq!(
        sources,
        vec!["pubmed", "wordpress", "youtube", "crossref", "openalex"],
        "blank line should be dropped, order kept"
    );
}

#[test]
fn test_empty_columns_become_empty_strings() {
    let parsed = records(MIXED_CSV);
    let video = &parsed[2];
    assert_eq!(video.title, "");
    assert_eq!(video.journal, "");
    assert_eq!(video.text, "Jaw angle implants, explained");
}

#[test]
fn test_header_is_skipped_even_if_it_looks_like_data() {
    let csv = "pubmed,f,Looks Like Data,u,2020,j,text\npubmed,f,Real Row,u,2021,j,text";
    let parsed = parse_csv(csv, &CsvOptions::default());
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0].title, "Real Row");
}

#[test]
fn test_windows_line_endings() {
    let csv = format!("{}\r\npubmed,f,Title,u,2020,j,body\r\n", HEADER);
    let parsed = parse_csv(&csv, &CsvOptions::default());
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0].text, "body");
}

#[test]
fn test_unbalanced_quote_swallows_rest_of_line() {
    // No error: the row is kept with shifted/missing fields
    let record = parse_record("pubmed,f,\"Open quote,u,2020,j,text", &CsvOptions::default());
    assert_eq!(record.source, "pubmed");
    assert_eq!(record.title, "Open quote,u,2020,j,text");
    assert_eq!(record.url, "");
}

#[test]
fn test_unquoted_commas_in_text_are_dropped_by_default() {
    let line = "pubmed,f,T,u,2020,j,first part, second part";
    assert_eq!(parse_record(line, &CsvOptions::default()).text, "first part");

    let merge = CsvOptions {
        overflow: Overflow::Merge,
    };
    assert_eq!(parse_record(line, &merge).text, "first part, second part");
}

#[test]
fn test_split_fields_counts_trailing_empty_field() {
    assert_eq!(split_fields("a,b,"), vec!["a", "b", ""]);
    assert_eq!(split_fields(",,"), vec!["", "", ""]);
}
