//! Loader invariants: row counts, ordering, quoted commas.

use super::common::HEADER;
use proptest::prelude::*;
use quarry::{parse_csv, split_fields, CsvOptions};

// ============================================================================
// STRATEGIES
// ============================================================================

fn word() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z]{1,8}").unwrap()
}

/// A title that needs quoting because it carries a comma.
fn comma_title() -> impl Strategy<Value = String> {
    (word(), word()).prop_map(|(a, b)| format!("{}, {}", a, b))
}

/// (source, title, text) for one data row.
fn row() -> impl Strategy<Value = (String, String, String)> {
    (
        prop::string::string_regex("[a-z]{1,10}").unwrap(),
        comma_title(),
        prop::string::string_regex("[a-z ]{0,30}").unwrap(),
    )
}

fn render_csv(rows: &[(String, String, String)], blank_every: usize) -> String {
    let mut lines = vec![HEADER.to_string()];
    for (i, (source, title, text)) in rows.iter().enumerate() {
        lines.push(format!("{},f.csv,\"{}\",https://x/{},2020,j,\"{}\"", source, title, i, text));
        if blank_every > 0 && i % blank_every == 0 {
            lines.push(String::new());
        }
    }
    lines.join("\n")
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    /// N non-blank data lines give exactly N records, in file order.
    #[test]
    fn prop_row_count_and_order_preserved(
        rows in prop::collection::vec(row(), 0..40),
        blank_every in 0usize..5,
    ) {
        let records = parse_csv(&render_csv(&rows, blank_every), &CsvOptions::default());

        prop_assert_eq!(records.len(), rows.len());
        for (i, (record, (source, title, text))) in records.iter().zip(&rows).enumerate() {
            prop_assert_eq!(&record.source, source);
            prop_assert_eq!(&record.title, title);
            prop_assert_eq!(&record.text, text);
            prop_assert_eq!(record.url.clone(), format!("https://x/{}", i));
        }
    }

    /// Without quotes, splitting is plain comma splitting.
    #[test]
    fn prop_unquoted_line_splits_on_every_comma(line in "[a-z0-9 ,.-]{0,60}") {
        let fields = split_fields(&line);
        prop_assert_eq!(fields.len(), line.matches(',').count() + 1);
        prop_assert_eq!(fields.join(","), line);
    }

    /// No field ever keeps a double quote.
    #[test]
    fn prop_quotes_never_survive(line in "[a-z\",]{0,40}") {
        prop_assert!(split_fields(&line).iter().all(|f| !f.contains('"')));
    }

    /// Arbitrary text never panics the parser, and it never invents rows.
    #[test]
    fn prop_arbitrary_text_is_tolerated(text in "[\\PC\n]{0,200}") {
        let records = parse_csv(&text, &CsvOptions::default());
        prop_assert!(records.len() <= text.split('\n').count().saturating_sub(1));
    }
}
