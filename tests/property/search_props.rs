//! Search and rendering invariants.

use super::common::uniform_records;
use proptest::prelude::*;
use quarry::{
    snippet, Config, HtmlRenderer, Record, Renderer, SearchSession, ELLIPSIS, MAX_RESULTS,
    SNIPPET_CHARS,
};

fn word() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z]{3,9}").unwrap()
}

fn corpus() -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(prop::collection::vec(word(), 1..8), 1..20).prop_map(|docs| {
        docs.into_iter()
            .enumerate()
            .map(|(i, words)| Record {
                source: "pubmed".to_string(),
                title: format!("doc {}", i),
                text: words.join(" "),
                ..Record::default()
            })
            .collect()
    })
}

proptest! {
    /// Never more than forty results, however many records qualify.
    #[test]
    fn prop_results_capped(count in 0usize..200, query in "[a-z]{1,12}") {
        let session = SearchSession::new(uniform_records("blepharoplasty", count), &Config::default());
        prop_assert!(session.query(&query).len() <= MAX_RESULTS);
        prop_assert_eq!(session.query("blepharoplasty").len(), count.min(MAX_RESULTS));
    }

    /// Results come back best first.
    #[test]
    fn prop_scores_ascending(records in corpus(), query in "[a-z]{2,8}") {
        let session = SearchSession::new(records, &Config::default());
        let scores: Vec<f64> = session.query(&query).iter().filter_map(|m| m.score).collect();
        prop_assert!(scores.windows(2).all(|pair| pair[0] <= pair[1]));
        prop_assert!(scores.iter().all(|s| (0.0..=1.0).contains(s)));
    }

    /// A word lifted from a record always finds that record with a perfect score.
    #[test]
    fn prop_verbatim_word_finds_its_record(
        records in corpus(),
        pick in any::<prop::sample::Index>(),
    ) {
        let target = pick.index(records.len());
        let words: Vec<String> = records[target].text.split(' ').map(str::to_string).collect();
        let query = words[pick.index(words.len())].clone();

        let session = SearchSession::with_options(records, Config::default().index_options(), usize::MAX);
        let hit = session.query(&query).into_iter().find(|m| m.index == target);
        prop_assert!(hit.is_some());
        prop_assert_eq!(hit.and_then(|m| m.score), Some(0.0));
    }

    /// Previews are bounded and always end in an ellipsis.
    #[test]
    fn prop_snippet_bounded(text in "\\PC{0,600}") {
        let preview = snippet(&text, SNIPPET_CHARS);
        prop_assert!(preview.chars().count() <= SNIPPET_CHARS + 1);
        prop_assert!(preview.ends_with(ELLIPSIS));
        prop_assert!(text.starts_with(preview.trim_end_matches(ELLIPSIS)));
    }

    /// Whitespace-only input clears, whatever the dataset.
    #[test]
    fn prop_blank_input_clears(records in corpus(), blank in "[ \t]{0,6}") {
        let session = SearchSession::new(records, &Config::default());
        prop_assert_eq!(session.on_input(&blank, &HtmlRenderer::default()), HtmlRenderer::default().clear());
    }
}
