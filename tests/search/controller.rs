//! Input events through the controller, one at a time and as a stream.

use super::common::{session, uniform_records, MIXED_CSV};
use quarry::{
    Config, HtmlRenderer, JsonRenderer, SearchSession, MAX_RESULTS, PLACEHOLDER_TITLE,
};

#[test]
fn test_empty_input_clears_results() {
    let session = session(MIXED_CSV);
    assert_eq!(session.on_input("", &HtmlRenderer::default()), "");
    assert_eq!(session.on_input("   ", &HtmlRenderer::default()), "");
    assert_eq!(
        session.on_input(" ", &JsonRenderer::default()),
        serde_json::json!([])
    );
}

#[test]
fn test_results_capped_at_forty() {
    let session = SearchSession::new(uniform_records("rhinoplasty", 150), &Config::default());
    let html = session.on_input("rhinoplasty", &HtmlRenderer::default());
    assert_eq!(html.matches("<div class=\"result\">").count(), MAX_RESULTS);
    assert!(html.contains("rhinoplasty case 0"));
    assert!(!html.contains("rhinoplasty case 40<"));
}

#[test]
fn test_untitled_record_renders_placeholder() {
    let session = session(MIXED_CSV);
    let html = session.on_input("jaw angle", &HtmlRenderer::default());
    assert!(html.contains(&format!(">{}</a>", PLACEHOLDER_TITLE)));
    assert!(html.contains("<div class=\"meta\">youtube · 2021</div>"));
}

#[test]
fn test_no_match_renders_empty_container() {
    let session = session(MIXED_CSV);
    assert_eq!(session.on_input("qqqqxzzv", &HtmlRenderer::default()), "");
}

#[test]
fn test_each_input_replaces_previous_output() {
    let session = session(MIXED_CSV);
    let renderer = HtmlRenderer::default();
    let first = session.on_input("temporal", &renderer);
    let second = session.on_input("skull", &renderer);
    assert!(first.contains("Temporal Reduction"));
    assert!(!second.contains("Temporal Reduction"));
    assert!(second.contains("Custom Skull Implants"));
}

#[cfg(feature = "native")]
mod debounce {
    use super::*;
    use quarry::drive;
    use std::time::Duration;
    use tokio::sync::mpsc;
    use tokio::time::sleep;

    async fn collect(
        session: &SearchSession,
        events: Vec<(&'static str, u64)>,
        debounce_ms: u64,
    ) -> Vec<(String, usize)> {
        let (tx, mut rx) = mpsc::channel::<String>(16);
        let producer = tokio::spawn(async move {
            for (query, pause_ms) in events {
                if tx.send(query.to_string()).await.is_err() {
                    return;
                }
                sleep(Duration::from_millis(pause_ms)).await;
            }
        });

        let mut updates = Vec::new();
        drive(session, &mut rx, Duration::from_millis(debounce_ms), |query, matches| {
            updates.push((query.to_string(), matches.len()));
        })
        .await;

        producer.await.unwrap();
        updates
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_collapses_to_latest_query() {
        let session = session(MIXED_CSV);
        let events = vec![("t", 20), ("te", 20), ("tem", 20), ("temporal", 0)];

        let updates = collect(&session, events, 150).await;

        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].0, "temporal");
        assert!(updates[0].1 >= 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_spaced_events_each_update() {
        let session = session(MIXED_CSV);
        let events = vec![("skull", 500), ("temporal", 500), ("", 0)];

        let updates = collect(&session, events, 100).await;

        let queries: Vec<&str> = updates.iter().map(|(q, _)| q.as_str()).collect();
        assert_eq!(queries, vec!["skull", "temporal", ""]);
        assert_eq!(updates[2].1, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_debounce_queries_every_event() {
        let session = session(MIXED_CSV);
        let events = vec![("s", 0), ("sk", 0), ("sku", 0), ("skull", 0)];

        let updates = collect(&session, events, 0).await;

        let queries: Vec<&str> = updates.iter().map(|(q, _)| q.as_str()).collect();
        assert_eq!(queries, vec!["s", "sk", "sku", "skull"]);
    }
}
