//! Lifecycle events emitted while a file is processed.
//!
//! The subscriber relationship is a mapping from event name to handler:
//! `Subscriber` exposes one default-noop method per event, and the
//! coordinator walks its subscriber list on each emit, so subscribers
//! observe events synchronously in registration order. Payloads are
//! borrowed and immutable; subscribers are read-only consumers.
use serde::Serialize;

use crate::detect::ClonePair;
use crate::error::DetectError;

/// Per-file detection summary carried by the end-of-file event.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SourceSummary {
    pub clones: usize,
    pub duplicated_lines: usize,
    pub duplicated_tokens: usize,
}

/// Event handlers, one per lifecycle point:
///
/// - `match_source` — before tokenization
/// - `start_detection` — frames built, matching begins
/// - `clone_found` — each accepted clone
/// - `end` — file fully processed
/// - `skipped_source` — tokenizer refused the file, run continues
/// - `store_error` — backing store failed, file aborted
///
/// For a given file, `clone_found` always precedes `end`.
pub trait Subscriber {
    fn on_match_source(&mut self, _source_id: &str, _format: &str) {}
    fn on_start_detection(&mut self, _source_id: &str, _format: &str, _tokens_count: usize) {}
    fn on_clone_found(&mut self, _clone: &ClonePair) {}
    fn on_end(&mut self, _source_id: &str, _summary: &SourceSummary) {}
    fn on_skipped_source(&mut self, _source_id: &str, _reason: &str) {}
    fn on_store_error(&mut self, _source_id: &str, _error: &DetectError) {}
}
