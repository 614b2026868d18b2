//! `doble` — a duplicate code detector for many programming languages.
//!
//! Files are reduced to canonical token sequences, fingerprinted with a
//! Rabin–Karp rolling hash over fixed-size windows, and matched against
//! a shared store; candidate matches are verified, extended to maximal
//! length, and filtered through a validator pipeline before reporting.
//!
//! The entry point resolves configuration (defaults ← `doble.toml` ←
//! CLI flags), discovers source files, and hands everything to the
//! detection driver. All errors are printed to stderr and cause exit
//! code 1.

/// CLI argument definitions using `clap` derive macros.
mod cli;
/// Detection thresholds, validation, and `doble.toml` loading.
mod config;
/// Clone detection pipeline for a single file (frames, matcher,
/// validators, coordinator).
mod detect;
/// Multi-file detection driver and cancellation.
mod driver;
/// Error kinds surfaced by the core.
mod error;
/// Lifecycle events and the subscriber interface.
mod events;
/// Format registry: per-language syntax and keyword tables.
mod lang;
/// Report formatters (console summary/detailed, JSON).
mod report;
/// Aggregate duplication statistics.
mod stats;
/// Frame-occurrence store shared across a run.
mod store;
/// Language-aware tokenization and mask-key derivation.
mod tokenize;
/// Shared utilities (binary detection, source reading).
mod util;
/// Filesystem discovery with .gitignore support.
mod walk;

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Parser;

use cli::Cli;
use config::{CONFIG_FILE, DetectionConfig, FileConfig};
use driver::Driver;
use error::{DetectError, Result};
use report::{ConsoleReporter, JsonReporter, Reporter};

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let target = cli.path.clone().unwrap_or_else(|| PathBuf::from("."));

    let file_config = match &cli.config {
        Some(path) => config::load_file(path)?,
        None => {
            let default = target.join(CONFIG_FILE);
            if default.exists() {
                config::load_file(&default)?
            } else {
                FileConfig::default()
            }
        }
    };

    let (config, excludes) = resolve(&cli, file_config)?;
    let sources = walk::discover(&target, &config, &excludes);

    let mut driver = Driver::new(config)?;
    let reporter: Box<dyn Reporter> = if cli.json {
        Box::new(JsonReporter)
    } else {
        Box::new(ConsoleReporter::new(cli.report, cli.show_all))
    };
    driver.add_reporter(reporter);
    driver.run(&sources)?;
    Ok(())
}

/// Merge defaults, config-file values, and CLI flags (flags win) into a
/// validated configuration plus the exclusion globs for discovery.
fn resolve(cli: &Cli, file: FileConfig) -> Result<(DetectionConfig, Vec<String>)> {
    let defaults = DetectionConfig::default();

    let mode = match &cli.mode {
        Some(mode) => mode.parse()?,
        None => file.mode.unwrap_or(defaults.mode),
    };

    let mut formats_exts = file.formats_exts.unwrap_or_default();
    merge_format_exts(&mut formats_exts, &cli.format_ext)?;

    let mut excludes = file.exclude.unwrap_or_default();
    excludes.extend(cli.exclude.iter().cloned());

    let config = DetectionConfig {
        min_lines: cli.min_lines.or(file.min_lines).unwrap_or(defaults.min_lines),
        max_lines: cli.max_lines.or(file.max_lines).unwrap_or(defaults.max_lines),
        min_tokens: cli
            .min_tokens
            .or(file.min_tokens)
            .unwrap_or(defaults.min_tokens),
        max_size: cli.max_size.or(file.max_size),
        mode,
        ignore_case: cli.ignore_case || file.ignore_case.unwrap_or(false),
        formats_exts,
    };

    Ok((config, excludes))
}

/// Parse `--format-ext FORMAT:EXT[,EXT]` flags into the overrides map.
fn merge_format_exts(
    map: &mut BTreeMap<String, Vec<String>>,
    flags: &[String],
) -> Result<()> {
    for flag in flags {
        let (format, exts) = flag.split_once(':').ok_or_else(|| {
            DetectError::InvalidConfig(format!(
                "invalid --format-ext {flag:?} (expected FORMAT:EXT[,EXT])"
            ))
        })?;
        let entry = map.entry(format.to_string()).or_default();
        for ext in exts.split(',').filter(|e| !e.is_empty()) {
            entry.push(ext.to_string());
        }
    }
    Ok(())
}
