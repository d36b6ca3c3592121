// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use quarry::{
    drive, load_session, present, Config, DatasetSummary, HtmlRenderer, JsonRenderer, Match,
    SearchSession,
};
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

mod cli;
use cli::display::{self, TerminalRenderer};
use cli::{resolve_config, Cli, Commands, Format};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Single-threaded: loading is the only await point that matters
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("{}", display::error(&format!("failed to start runtime: {}", e)));
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(run(cli)) {
        eprintln!("{}", display::error(&format!("{:#}", e)));
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = std::env::var("QUARRY_LOG")
        .ok()
        .and_then(|value| value.parse::<LevelFilter>().ok())
        .unwrap_or(match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        });

    // A logger can only be installed once; a second init is harmless
    let _ = TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Search {
            query,
            options,
            format,
        } => {
            let config = resolve_config(config_path, |c| options.apply(c))
                .context("invalid configuration")?;
            let session = open_session(&config).await;
            let matches = session.query(&query);
            log::info!("{} matches for {:?}", matches.len(), query.trim());
            emit(format, &config, &query, &matches)?;
        }

        Commands::Watch {
            options,
            debounce_ms,
            format,
        } => {
            let config = resolve_config(config_path, |c| {
                options.apply(c);
                if let Some(ms) = debounce_ms {
                    c.debounce_ms = ms;
                }
            })
            .context("invalid configuration")?;
            let session = open_session(&config).await;
            watch(&session, &config, format).await?;
        }

        Commands::Inspect { source, json } => {
            let config = resolve_config(config_path, |c| source.apply(c))
                .context("invalid configuration")?;
            let session = open_session(&config).await;
            let summary = DatasetSummary::from_records(session.records());
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_summary(&config.source, &summary);
            }
        }
    }

    Ok(())
}

/// Load with a spinner on interactive stderr. Never fails: an unreachable
/// dataset yields an empty session and a warning.
async fn open_session(config: &Config) -> SearchSession {
    let spinner = loading_spinner(&config.source);
    let session = load_session(config).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    log::info!("{} records loaded from {}", session.len(), config.source);
    session
}

fn loading_spinner(source: &str) -> Option<ProgressBar> {
    if !atty::is(atty::Stream::Stderr) {
        return None;
    }
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!("loading {}", source));
    spinner.enable_steady_tick(Duration::from_millis(80));
    Some(spinner)
}

/// Stdin lines become input events; each coalesced update is printed.
async fn watch(session: &SearchSession, config: &Config, format: Format) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::channel::<String>(64);

    let reader = tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if tx.send(line).await.is_err() {
                break;
            }
        }
    });

    let mut failure = None;
    drive(session, &mut rx, config.debounce(), |query, matches| {
        if format == Format::Terminal {
            println!("{}", display::themed(display::GRAY, &[], &format!("» {}", query)));
        }
        if let Err(e) = emit(format, config, query, matches) {
            failure.get_or_insert(e);
        }
    })
    .await;

    reader.await.context("stdin reader stopped unexpectedly")?;
    failure.map_or(Ok(()), Err)
}

fn emit(format: Format, config: &Config, query: &str, matches: &[Match<'_>]) -> anyhow::Result<()> {
    let options = config.render_options();
    match format {
        Format::Terminal => {
            let out = present(&TerminalRenderer::new(options), query, matches);
            if !out.is_empty() {
                println!("{}", out);
            }
        }
        Format::Html => println!("{}", present(&HtmlRenderer::new(options), query, matches)),
        Format::Json => println!(
            "{}",
            serde_json::to_string(&present(&JsonRenderer::new(options), query, matches))?
        ),
    }
    Ok(())
}

fn print_summary(source: &str, summary: &DatasetSummary) {
    println!("{}", display::section_top("DATASET"));
    println!("{}", display::row(&format!(" source    {}", source)));
    println!("{}", display::row(&format!(" records   {}", summary.records)));
    if let Some((first, last)) = summary.year_range {
        println!("{}", display::row(&format!(" years     {}–{}", first, last)));
    }
    println!("{}", display::row(&format!(" untitled  {}", summary.untitled)));
    println!("{}", display::row(&format!(" no text   {}", summary.without_text)));
    println!("{}", display::section_bot());

    if summary.per_source.is_empty() {
        return;
    }
    println!("{}", display::section_top("ROWS PER SOURCE"));
    for (source, count) in &summary.per_source {
        let label = if source.is_empty() { "(none)" } else { source };
        println!("{}", display::row(&format!(" {:<30} {:>8}", label, count)));
    }
    println!("{}", display::section_bot());
}
