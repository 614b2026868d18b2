//! Report formatters for clone detection results.
//!
//! Provides three output modes over the accepted clones and the final
//! statistic:
//! - **Summary**: compact overview with per-format duplication
//!   percentages.
//! - **Detailed**: summary plus a listing of each clone pair with both
//!   locations and a fragment sample (up to 5 lines).
//! - **JSON**: machine-readable output combining statistic and clones.
//!
//! Reporters implement the `Reporter` interface consumed by the driver;
//! the optional `wait_for_completion` hook is awaited before shutdown,
//! and cancelled runs are notified instead of reported.
use serde::Serialize;

use crate::detect::ClonePair;
use crate::error::Result;
use crate::stats::{FormatStats, Statistic};

pub trait Reporter {
    fn report(&mut self, clones: &[ClonePair], statistic: &Statistic) -> Result<()>;

    /// Awaited by the driver after all reporters have reported.
    fn wait_for_completion(&mut self) -> Result<()> {
        Ok(())
    }

    /// Called instead of `report` when the run was cancelled.
    fn cancelled(&mut self, _reason: &str) {}
}

/// Maximum clone pairs shown by default (use `--show-all` to override).
pub const DEFAULT_CLONE_LIMIT: usize = 20;

/// Compute how many clone pairs to display based on the `--show-all` flag.
pub fn display_limit(total: usize, show_all: bool) -> usize {
    if show_all {
        total
    } else {
        DEFAULT_CLONE_LIMIT.min(total)
    }
}

/// Print a horizontal separator of box-drawing chars.
fn separator(width: usize) -> String {
    "\u{2500}".repeat(width)
}

/// Console reporter: summary by default, per-clone listing with
/// `detailed`, stderr note on cancellation.
pub struct ConsoleReporter {
    detailed: bool,
    show_all: bool,
}

impl ConsoleReporter {
    pub fn new(detailed: bool, show_all: bool) -> Self {
        Self { detailed, show_all }
    }

    fn print_summary(&self, statistic: &Statistic) {
        let sep = separator(68);
        let total = &statistic.total;

        println!("{sep}");
        println!(" Duplication Analysis");
        println!();
        println!(" Sources analyzed:     {:>42}", total.sources);
        println!(" Total lines:          {:>42}", total.lines);
        println!(" Total tokens:         {:>42}", total.tokens);
        println!();
        println!(" Clones found:         {:>42}", total.clones);
        println!(" Duplicated lines:     {:>42}", total.duplicated_lines);
        println!(" Duplicated tokens:    {:>42}", total.duplicated_tokens);
        println!(" Duplication:          {:>41.1}%", total.percentage);
        println!(" Duplication (tokens): {:>41.1}%", total.percentage_tokens);

        if statistic.formats.len() > 1 {
            println!();
            println!(" By format:");
            for (format, stats) in &statistic.formats {
                println!(
                    "   {format:<12} {:>6} sources {:>6} clones {:>8.1}% lines",
                    stats.sources, stats.clones, stats.percentage
                );
            }
        }

        println!("{sep}");
    }

    fn print_detailed(&self, clones: &[ClonePair], total_clones: usize) {
        if clones.is_empty() {
            return;
        }
        let sep = separator(68);

        println!();
        println!(" Clone Pairs (in discovery order)");

        for (i, clone) in clones.iter().enumerate() {
            println!();
            println!("{sep}");
            println!(
                " [{}] {}: {} tokens, {} lines",
                i + 1,
                clone.format,
                clone.tokens,
                clone.duplication_a.line_span()
            );
            println!();
            for side in [&clone.duplication_a, &clone.duplication_b] {
                println!(
                    "   {}:{}-{}",
                    side.source_id, side.start.line, side.end.line
                );
            }
            if let Some(fragment) = &clone.duplication_a.fragment {
                println!();
                println!(" Sample:");
                let mut lines = fragment.lines();
                for line in lines.by_ref().take(5) {
                    println!("   {line}");
                }
                if lines.next().is_some() {
                    println!("   ...");
                }
            }
        }

        println!("{sep}");

        if clones.len() < total_clones {
            println!();
            println!(
                " Showing top {} of {} clone pairs.",
                clones.len(),
                total_clones
            );
            println!(" Use --show-all to see all clones.");
        }
    }
}

impl Reporter for ConsoleReporter {
    fn report(&mut self, clones: &[ClonePair], statistic: &Statistic) -> Result<()> {
        self.print_summary(statistic);
        if self.detailed {
            let limit = display_limit(clones.len(), self.show_all);
            self.print_detailed(&clones[..limit], clones.len());
        }
        Ok(())
    }

    fn cancelled(&mut self, reason: &str) {
        eprintln!("detection stopped: {reason}");
    }
}

/// JSON-serializable wrapper combining the statistic and clone details.
#[derive(Serialize)]
struct JsonOutput<'a> {
    statistic: JsonStatistic<'a>,
    clones: &'a [ClonePair],
}

#[derive(Serialize)]
struct JsonStatistic<'a> {
    total: &'a FormatStats,
    formats: &'a std::collections::BTreeMap<String, FormatStats>,
}

/// Serialize the statistic and clones to a pretty-printed JSON string.
pub fn format_json(clones: &[ClonePair], statistic: &Statistic) -> Result<String> {
    let output = JsonOutput {
        statistic: JsonStatistic {
            total: &statistic.total,
            formats: &statistic.formats,
        },
        clones,
    };
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Pretty-printed JSON on stdout.
pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn report(&mut self, clones: &[ClonePair], statistic: &Statistic) -> Result<()> {
        println!("{}", format_json(clones, statistic)?);
        Ok(())
    }

    fn cancelled(&mut self, reason: &str) {
        eprintln!("detection stopped: {reason}");
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
