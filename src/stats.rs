//! Aggregate duplication statistics, per format and overall.
use std::collections::BTreeMap;

use serde::Serialize;

/// Counters for one format (or the run total).
///
/// `percentage` and `percentage_tokens` are derived from the raw
/// counters by `recompute`; until then they are zero.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FormatStats {
    pub sources: usize,
    pub lines: usize,
    pub tokens: usize,
    pub clones: usize,
    pub duplicated_lines: usize,
    pub duplicated_tokens: usize,
    pub percentage: f64,
    pub percentage_tokens: f64,
}

impl FormatStats {
    fn add_source(&mut self, lines: usize, tokens: usize) {
        self.sources += 1;
        self.lines += lines;
        self.tokens += tokens;
    }

    fn add_clone(&mut self, duplicated_lines: usize, duplicated_tokens: usize) {
        self.clones += 1;
        self.duplicated_lines += duplicated_lines;
        self.duplicated_tokens += duplicated_tokens;
    }

    fn recompute(&mut self) {
        self.percentage = percentage(self.duplicated_lines, self.lines);
        self.percentage_tokens = percentage(self.duplicated_tokens, self.tokens);
    }
}

/// Part as a percentage of total, 0.0 when the total is zero.
fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}

/// Run-wide statistics: an overall total plus one entry per format.
/// Mutated only through the detector coordinator and the driver.
#[derive(Debug, Default, Serialize)]
pub struct Statistic {
    pub total: FormatStats,
    pub formats: BTreeMap<String, FormatStats>,
}

impl Statistic {
    pub fn add_source(&mut self, format: &str, lines: usize, tokens: usize) {
        self.total.add_source(lines, tokens);
        self.format_entry(format).add_source(lines, tokens);
    }

    pub fn add_clone(&mut self, format: &str, duplicated_lines: usize, duplicated_tokens: usize) {
        self.total.add_clone(duplicated_lines, duplicated_tokens);
        self.format_entry(format)
            .add_clone(duplicated_lines, duplicated_tokens);
    }

    /// Derive percentages from the accumulated counters. Called once by
    /// the driver when all files are done.
    pub fn recompute(&mut self) {
        self.total.recompute();
        for stats in self.formats.values_mut() {
            stats.recompute();
        }
    }

    fn format_entry(&mut self, format: &str) -> &mut FormatStats {
        self.formats.entry(format.to_string()).or_default()
    }
}

#[cfg(test)]
#[path = "stats_test.rs"]
mod tests;
