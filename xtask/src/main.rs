//! Custom cargo commands for quarry.
//!
//! Usage:
//!   cargo xtask verify    - Run full verification suite
//!   cargo xtask test      - Run tests for every feature set
//!   cargo xtask check     - Quick check (check + test + clippy)
//!   cargo xtask bench     - Run benchmarks
//!   cargo xtask wasm      - Build the browser widget into demo/pkg

use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use std::process::Command;

fn main() -> Result<()> {
    let task = env::args().nth(1);
    match task.as_deref() {
        Some("verify") => verify()?,
        Some("test") => test()?,
        Some("check") => check()?,
        Some("bench") => bench()?,
        Some("wasm") => wasm()?,
        _ => print_help(),
    }
    Ok(())
}

fn print_help() {
    eprintln!(
        r#"
cargo xtask <COMMAND>

Commands:
  verify    Run full verification suite (tests, clippy, wasm build, demo ids)
  test      Run Rust tests with default and minimal feature sets
  check     Quick check (cargo check + test + clippy)
  bench     Run benchmarks
  wasm      Build the browser widget with wasm-pack into demo/pkg
"#
    );
}

/// Full verification suite
fn verify() -> Result<()> {
    println!("==========================================");
    println!("quarry verification suite");
    println!("==========================================\n");

    println!("[1/4] Running Rust tests...");
    test()?;
    println!("✓ All Rust tests passed\n");

    println!("[2/4] Running clippy...");
    run_cargo(&["clippy", "--quiet", "--all-targets", "--", "-D", "warnings"])?;
    println!("✓ Clippy passed\n");

    println!("[3/4] Checking demo page against widget constants...");
    verify_demo_ids()?;
    println!("✓ Element ids aligned\n");

    println!("[4/4] Building wasm widget...");
    wasm()?;
    println!("✓ Widget builds\n");

    println!("==========================================");
    println!("✓ ALL VERIFICATION CHECKS PASSED");
    println!("==========================================");

    Ok(())
}

/// Default features, then the bare library the wasm build compiles against
fn test() -> Result<()> {
    run_cargo(&["test"])?;
    run_cargo(&["test", "--lib", "--no-default-features"])
}

fn check() -> Result<()> {
    println!("Running quick checks...\n");

    println!("[1/3] cargo check...");
    run_cargo(&["check", "--all-targets"])?;

    println!("[2/3] cargo test...");
    run_cargo(&["test", "--quiet"])?;

    println!("[3/3] cargo clippy...");
    run_cargo(&["clippy", "--quiet", "--", "-D", "warnings"])?;

    println!("\n✓ Quick checks passed");
    Ok(())
}

fn bench() -> Result<()> {
    run_cargo(&["bench", "--bench", "search_bench"])
}

fn wasm() -> Result<()> {
    let root = project_root()?;
    let out_dir = root.join("demo").join("pkg");

    let status = Command::new("wasm-pack")
        .args(["build", "--target", "web", "--release", "--out-dir"])
        .arg(&out_dir)
        .args(["--", "--no-default-features", "--features", "wasm"])
        .current_dir(&root)
        .status()
        .context("Failed to run wasm-pack (is it installed?)")?;

    if !status.success() {
        bail!("wasm-pack build failed");
    }

    println!("  widget written to {}", out_dir.display());
    Ok(())
}

// ============================================================================
// Helper functions
// ============================================================================

fn project_root() -> Result<PathBuf> {
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => env::current_dir().context("Failed to read current directory")?,
    };

    // xtask is in project_root/xtask, so go up one level
    let root = manifest_dir.parent().unwrap_or(&manifest_dir);
    Ok(root.to_path_buf())
}

fn run_cargo(args: &[&str]) -> Result<()> {
    let root = project_root()?;

    let status = Command::new("cargo")
        .args(args)
        .current_dir(&root)
        .status()
        .with_context(|| format!("Failed to run cargo {:?}", args))?;

    if !status.success() {
        bail!("cargo {:?} failed", args);
    }

    Ok(())
}

/// The demo page must carry the element ids the widget exports.
fn verify_demo_ids() -> Result<()> {
    let root = project_root()?;

    let wasm_rs = std::fs::read_to_string(root.join("src/wasm.rs"))
        .context("Failed to read src/wasm.rs")?;
    let page = std::fs::read_to_string(root.join("demo/index.html"))
        .context("Failed to read demo/index.html")?;

    for constant in ["INPUT_ELEMENT_ID", "RESULTS_ELEMENT_ID"] {
        let Some(id) = extract_str_const(&wasm_rs, constant) else {
            bail!("{} not found in src/wasm.rs", constant);
        };
        if !page.contains(&format!("id=\"{}\"", id)) {
            bail!("demo/index.html has no element with id=\"{}\" ({})", id, constant);
        }
    }

    Ok(())
}

fn extract_str_const(content: &str, name: &str) -> Option<String> {
    // Look for `pub const NAME: &str = "value";`
    content
        .lines()
        .find(|line| line.contains(&format!("const {}:", name)))
        .and_then(|line| line.split('"').nth(1))
        .map(str::to_string)
}
