/// CLI argument definitions for the `doble` command.
///
/// Threshold flags are optional so that values from `doble.toml` (when
/// present) can fill the gaps; explicitly passed flags always win.
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "doble",
    version,
    about = "Detect duplicated code across files in many languages"
)]
pub struct Cli {
    /// Directory to analyze (default: current directory)
    pub path: Option<PathBuf>,

    /// Minimum clone size in lines (default: 5)
    #[arg(long)]
    pub min_lines: Option<usize>,

    /// Reject clones spanning more lines than this (default: 1000)
    #[arg(long)]
    pub max_lines: Option<usize>,

    /// Window width and minimum clone size in tokens (default: 50)
    #[arg(long)]
    pub min_tokens: Option<usize>,

    /// Reject clones larger than this many bytes
    #[arg(long)]
    pub max_size: Option<usize>,

    /// Mask mode: which tokens participate in matching
    #[arg(long, value_parser = ["strict", "mild", "weak"])]
    pub mode: Option<String>,

    /// Lowercase mask keys (for case-insensitive languages)
    #[arg(long)]
    pub ignore_case: bool,

    /// Map extra extensions to a format, e.g. "javascript:es6,pac"
    #[arg(long = "format-ext", value_name = "FORMAT:EXT[,EXT]")]
    pub format_ext: Vec<String>,

    /// Glob patterns for files to exclude from discovery
    #[arg(long = "exclude", value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Show detailed report with clone locations and fragments
    #[arg(short, long)]
    pub report: bool,

    /// Show all clone pairs (default: top 20)
    #[arg(long)]
    pub show_all: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Configuration file (default: doble.toml in the analysis root)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}
