// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Turning matches into display fragments.
//!
//! Every output format starts from the same [`ResultView`]: a title that is
//! never empty, a link target, a metadata line and a bounded preview. The
//! [`Renderer`] implementations only differ in how they serialize views.
//!
//! The preview always ends in an ellipsis, even when the body was shorter
//! than the limit.

use crate::types::{Match, Record};
use crate::utils::truncate_chars;
use serde::Serialize;

/// Characters of body text shown per result.
pub const SNIPPET_CHARS: usize = 240;

/// Appended to every preview.
pub const ELLIPSIS: &str = "…";

/// Shown as the link text when a record has no title.
pub const PLACEHOLDER_TITLE: &str = "(untitled)";

/// Separator between the non-empty parts of the metadata line.
const META_SEPARATOR: &str = " · ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub snippet_chars: usize,
    pub placeholder_title: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            snippet_chars: SNIPPET_CHARS,
            placeholder_title: PLACEHOLDER_TITLE.to_string(),
        }
    }
}

/// Display model for one result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultView {
    pub title: String,
    pub url: String,
    pub meta: String,
    pub snippet: String,
}

impl ResultView {
    pub fn from_record(record: &Record, options: &RenderOptions) -> Self {
        let title = if record.title.trim().is_empty() {
            options.placeholder_title.clone()
        } else {
            record.title.clone()
        };

        Self {
            title,
            url: record.url.clone(),
            meta: meta_line(&record.source, &record.year),
            snippet: snippet(&record.text, options.snippet_chars),
        }
    }
}

/// `source · year`, leaving out whichever part is empty.
pub fn meta_line(source: &str, year: &str) -> String {
    [source.trim(), year.trim()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(META_SEPARATOR)
}

/// First `max_chars` characters of `text` plus [`ELLIPSIS`].
pub fn snippet(text: &str, max_chars: usize) -> String {
    format!("{}{}", truncate_chars(text, max_chars), ELLIPSIS)
}

/// Produces the contents of the results container.
///
/// `render` replaces whatever was shown before; `clear` is the output for an
/// empty query.
pub trait Renderer {
    type Output;

    fn render(&self, matches: &[Match<'_>]) -> Self::Output;

    fn clear(&self) -> Self::Output;
}

/// HTML fragment for the results container of the host page.
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer {
    pub options: RenderOptions,
}

impl HtmlRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    fn fragment(&self, view: &ResultView) -> String {
        let mut html = String::from("<div class=\"result\">");
        html.push_str(&format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
            escape_html(safe_href(&view.url)),
            escape_html(&view.title)
        ));
        if !view.meta.is_empty() {
            html.push_str(&format!("<div class=\"meta\">{}</div>", escape_html(&view.meta)));
        }
        html.push_str(&format!("<p>{}</p>", escape_html(&view.snippet)));
        html.push_str("</div>");
        html
    }
}

impl Renderer for HtmlRenderer {
    type Output = String;

    fn render(&self, matches: &[Match<'_>]) -> String {
        matches
            .iter()
            .map(|m| self.fragment(&ResultView::from_record(m.record, &self.options)))
            .collect()
    }

    fn clear(&self) -> String {
        String::new()
    }
}

/// Views serialized as a JSON array.
#[derive(Debug, Clone, Default)]
pub struct JsonRenderer {
    pub options: RenderOptions,
}

impl JsonRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }
}

impl Renderer for JsonRenderer {
    type Output = serde_json::Value;

    fn render(&self, matches: &[Match<'_>]) -> serde_json::Value {
        let views: Vec<ResultView> = matches
            .iter()
            .map(|m| ResultView::from_record(m.record, &self.options))
            .collect();
        serde_json::to_value(views).unwrap_or_else(|_| serde_json::Value::Array(Vec::new()))
    }

    fn clear(&self) -> serde_json::Value {
        serde_json::Value::Array(Vec::new())
    }
}

/// Schemes a result link may carry. Relative links have none.
const LINK_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Links with any other scheme are replaced by an inert anchor.
///
/// Browsers drop ASCII whitespace and control characters while reading a
/// scheme (`java\tscript:` runs as `javascript:`), so the scheme is taken
/// from the URL with those removed.
fn safe_href(url: &str) -> &str {
    let cleaned: String = url
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_ascii_control())
        .collect();
    let scheme_end = cleaned.find(|c: char| matches!(c, ':' | '/' | '?' | '#'));
    match scheme_end {
        Some(i) if cleaned[i..].starts_with(':') => {
            let scheme = &cleaned[..i];
            if LINK_SCHEMES.iter().any(|s| s.eq_ignore_ascii_case(scheme)) {
                url
            } else {
                "#"
            }
        }
        _ => url,
    }
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
