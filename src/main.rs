//! doclint: validate numpydoc-style docstrings against a fixed rulebook.
//!
//! Two modes:
//!
//! - **path mode**: `doclint -r src mylib.Series.head` validates the named
//!   objects.
//! - **outline mode**: `doclint -r src --outline doc/api.rst` validates
//!   every object the outline lists.
//!
//! Exit codes: 0 clean, 1 findings, 2 hard error (unresolvable path,
//! unreadable input).

mod checks;
mod model;
mod outline;
mod parser;
mod registry;
mod render;
mod validate;

use anyhow::{bail, Context, Result};
use clap::Parser;
use registry::Registry;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "doclint",
    about = "Validate numpydoc-style docstrings against a fixed rulebook"
)]
struct Cli {
    /// Dotted import paths to validate (e.g. mylib.Series.head)
    paths: Vec<String>,

    /// Source root scanned for .py files (glob patterns supported, repeatable)
    #[arg(short = 'r', long = "root", default_value = ".")]
    roots: Vec<String>,

    /// Validate every item listed in an RST outline document
    #[arg(long)]
    outline: Option<PathBuf>,

    /// Output format: text (default) or json
    #[arg(short = 'f', long, default_value = "text")]
    format: String,
}

fn main() {
    match run() {
        Ok(0) => {}
        Ok(_) => std::process::exit(1),
        Err(e) => {
            eprintln!("error: {e:#}");
            std::process::exit(2);
        }
    }
}

/// Returns the number of findings across all validated objects.
fn run() -> Result<usize> {
    let cli = Cli::parse();

    if cli.paths.is_empty() && cli.outline.is_none() {
        bail!("nothing to validate: pass import paths or --outline");
    }

    let roots = expand_roots(&cli.roots)?;
    let registry = Registry::from_roots(&roots)?;
    if registry.is_empty() {
        eprintln!("warning: no .py files found under the given roots");
    }
    let renderer = render::create_renderer(&cli.format)?;

    let mut reports = Vec::new();
    let mut outline_findings = 0;

    if let Some(outline_path) = &cli.outline {
        let content = fs::read_to_string(outline_path)
            .with_context(|| format!("failed to read outline: {}", outline_path.display()))?;
        let scan = outline::get_api_items(&registry, &content);
        for finding in &scan.findings {
            eprintln!("warning: {}", finding.message);
        }
        outline_findings = scan.findings.len();
        for item in &scan.items {
            reports.push(validate::validate_one(&registry, &item.name)?);
        }
    }

    for path in &cli.paths {
        reports.push(validate::validate_one(&registry, path)?);
    }

    print!("{}", renderer.render(&reports));

    let total: usize = reports.iter().map(|r| r.errors.len()).sum();
    Ok(total + outline_findings)
}

/// Expand root arguments into real directories or files.
/// A literal path is taken as-is; anything else is tried as a glob.
fn expand_roots(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut roots = Vec::new();
    for pattern in patterns {
        let path = PathBuf::from(pattern);
        if path.exists() {
            roots.push(path);
            continue;
        }
        let matches: Vec<PathBuf> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .collect();
        if matches.is_empty() {
            bail!("no such root: {}", pattern);
        }
        roots.extend(matches);
    }
    roots.sort();
    roots.dedup();
    Ok(roots)
}
