// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display for the quarry CLI.
//!
//! OneDark on dark terminals, One Light on light ones. Detection tries
//! `QUARRY_THEME` first, then `COLORFGBG`, then settles on dark. `NO_COLOR` and
//! non-TTY stdout turn colors off entirely so piped output stays clean.
//!
//! Box helpers return strings instead of printing, so the terminal renderer
//! can be tested like the HTML one.

use quarry::{Field, Match, RenderOptions, Renderer, ResultView};
use std::sync::OnceLock;
use textwrap::core::display_width;
use textwrap::wrap;

// Width between │ and │ (excluding border chars)
pub const BOX_WIDTH: usize = 80;

// ═══════════════════════════════════════════════════════════════════════════
// THEME DETECTION
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn detect_theme() -> Theme {
    if let Ok(theme) = std::env::var("QUARRY_THEME") {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // COLORFGBG is "fg;bg"; backgrounds 7 and up (except 8) are light
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(bg) = colorfgbg.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                if bg_num >= 7 && bg_num != 8 {
                    return Theme::Light;
                }
            }
        }
    }

    Theme::Dark
}

pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

// ═══════════════════════════════════════════════════════════════════════════
// PALETTES
// ═══════════════════════════════════════════════════════════════════════════

fn rgb(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

mod onedark {
    pub const RED: (u8, u8, u8) = (224, 108, 117);
    pub const GREEN: (u8, u8, u8) = (152, 195, 121);
    pub const YELLOW: (u8, u8, u8) = (229, 192, 123);
    pub const BLUE: (u8, u8, u8) = (97, 175, 239);
    pub const CYAN: (u8, u8, u8) = (86, 182, 194);
    pub const GRAY: (u8, u8, u8) = (92, 99, 112);
    pub const BRIGHT_CYAN: (u8, u8, u8) = (102, 217, 239);
}

mod onelight {
    pub const RED: (u8, u8, u8) = (228, 86, 73);
    pub const GREEN: (u8, u8, u8) = (80, 161, 79);
    pub const YELLOW: (u8, u8, u8) = (193, 132, 1);
    pub const BLUE: (u8, u8, u8) = (64, 120, 242);
    pub const CYAN: (u8, u8, u8) = (1, 132, 188);
    pub const GRAY: (u8, u8, u8) = (160, 161, 167);
    pub const BRIGHT_CYAN: (u8, u8, u8) = (1, 112, 158);
}

macro_rules! theme_color {
    ($name:ident) => {
        #[allow(non_snake_case)]
        pub fn $name() -> String {
            let (r, g, b) = match theme() {
                Theme::Dark => onedark::$name,
                Theme::Light => onelight::$name,
            };
            rgb(r, g, b)
        }
    };
}

theme_color!(RED);
theme_color!(GREEN);
theme_color!(YELLOW);
theme_color!(BLUE);
theme_color!(CYAN);
theme_color!(GRAY);
theme_color!(BRIGHT_CYAN);

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Apply theme color with optional modifiers
pub fn themed(color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Terminal columns taken by `s`. ANSI escapes count as zero and wide
/// (e.g. CJK) characters as two.
pub fn visible_len(s: &str) -> usize {
    display_width(s)
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

/// │ content          │
pub fn row(content: &str) -> String {
    let border = if use_colors() { GRAY() } else { String::new() };
    let reset = if use_colors() { RESET } else { "" };
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    format!(
        "{}│{}{}{}{}│{}",
        border,
        reset,
        content,
        " ".repeat(pad),
        border,
        reset
    )
}

/// ┌─ LABEL ──────────┐
pub fn section_top(label: &str) -> String {
    let border = if use_colors() { GRAY() } else { String::new() };
    let reset = if use_colors() { RESET } else { "" };
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    format!(
        "{}┌{}{}{}{}┐{}",
        border,
        reset,
        label_part,
        border,
        "─".repeat(remaining),
        reset
    )
}

/// └──────────────────┘
pub fn section_bot() -> String {
    let border = if use_colors() { GRAY() } else { String::new() };
    let reset = if use_colors() { RESET } else { "" };
    format!("{}└{}┘{}", border, "─".repeat(BOX_WIDTH), reset)
}

// ═══════════════════════════════════════════════════════════════════════════
// SEMANTIC FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

/// Which field carried the match
pub fn field_label(field: Field) -> String {
    let color: fn() -> String = match field {
        Field::Title => GREEN,
        Field::Text => GRAY,
        Field::Journal => BLUE,
        Field::Source => YELLOW,
    };
    themed(color, &[], field.as_str())
}

/// Relevance score, lower is better
pub fn score_value(score: Option<f64>) -> String {
    let Some(score) = score else {
        return String::new();
    };
    let text = format!("{:.2}", score);
    let color: fn() -> String = if score == 0.0 {
        GREEN
    } else if score <= 0.2 {
        YELLOW
    } else {
        RED
    };
    themed(color, &[], &text)
}

pub fn error(message: &str) -> String {
    format!("{} {}", themed(RED, &[BOLD], "error:"), message)
}

/// One boxed card per result.
pub struct TerminalRenderer {
    pub options: RenderOptions,
}

impl TerminalRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    fn card(&self, rank: usize, m: &Match<'_>) -> Vec<String> {
        let view = ResultView::from_record(m.record, &self.options);
        let inner = BOX_WIDTH - 2;

        let mut lines = vec![section_top(&format!("#{}", rank + 1))];
        for line in wrap(&view.title, inner) {
            lines.push(row(&format!(" {}", themed(BRIGHT_CYAN, &[BOLD], &line))));
        }
        if !view.url.is_empty() {
            lines.push(row(&format!(" {}", themed(BLUE, &[], &view.url))));
        }
        let mut meta = view.meta.clone();
        if !meta.is_empty() {
            meta.push_str("  ");
        }
        lines.push(row(&format!(
            " {}{} {}",
            themed(GRAY, &[], &meta),
            field_label(m.field),
            score_value(m.score)
        )));
        let snippet = if view.snippet.is_empty() {
            Vec::new()
        } else {
            wrap(&view.snippet, inner)
        };
        for line in snippet {
            lines.push(row(&format!(" {}", themed(GRAY, &[DIM], &line))));
        }
        lines.push(section_bot());
        lines
    }
}

impl Renderer for TerminalRenderer {
    type Output = String;

    fn render(&self, matches: &[Match<'_>]) -> String {
        if matches.is_empty() {
            return themed(GRAY, &[], "no results");
        }
        matches
            .iter()
            .enumerate()
            .flat_map(|(rank, m)| self.card(rank, m))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn clear(&self) -> String {
        String::new()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════
