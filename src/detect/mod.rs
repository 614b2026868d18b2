//! Clone detection for a single source file.
//!
//! The coordinator drives the pipeline — tokenize, derive mask keys,
//! build frames, match against the shared store, validate — and emits
//! lifecycle events at each stage. Tokenizer failures skip the file and
//! the run continues; store failures abort the file and bubble up for
//! the driver to decide. Per-file artifacts (tokens, keys, frames) are
//! retained in an archive for the rest of the run so later files can
//! verify and extend matches against this one.
pub(crate) mod frames;
pub(crate) mod matcher;
pub(crate) mod validate;

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::DetectionConfig;
use crate::driver::{CancelFlag, SourceRecord};
use crate::error::{DetectError, Result};
use crate::events::{SourceSummary, Subscriber};
use crate::store::FrameStore;
use crate::tokenize::mask::mask_key;
use crate::tokenize::{Token, tokenize};
use frames::MapFrame;

/// A point in a source: 1-based line and column plus the byte offset.
#[derive(Debug, Clone, Serialize)]
pub struct ClonePosition {
    pub line: usize,
    pub column: usize,
    pub position: usize,
}

/// One side of a clone. `range` holds byte offsets `[start, end)` into
/// the source exactly as supplied by discovery; `fragment` is attached
/// by the validator pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct CloneLocation {
    pub source_id: String,
    pub start: ClonePosition,
    pub end: ClonePosition,
    pub range: (usize, usize),
    pub fragment: Option<String>,
}

impl CloneLocation {
    /// Number of source lines this side spans (inclusive).
    pub fn line_span(&self) -> usize {
        self.end.line - self.start.line + 1
    }

    pub fn byte_len(&self) -> usize {
        self.range.1 - self.range.0
    }
}

/// An accepted duplicate: two source regions whose significant-token
/// sequences are equal under the active mode. Immutable once emitted.
/// Both sides cover `tokens` significant tokens.
#[derive(Debug, Clone, Serialize)]
pub struct ClonePair {
    pub format: String,
    pub found_date: DateTime<Utc>,
    pub tokens: usize,
    pub duplication_a: CloneLocation,
    pub duplication_b: CloneLocation,
}

/// Per-file detection artifact retained for the run: the source text,
/// the significant tokens with their mask keys, and the frame sequence.
/// The matcher reads the partner file's map for key-by-key verification
/// and extension.
pub struct SourceMap {
    pub source_id: String,
    pub format: &'static str,
    pub source: String,
    pub tokens: Vec<Token>,
    pub keys: Vec<Box<str>>,
    pub frames: Vec<MapFrame>,
}

/// What happened to one file.
#[derive(Debug, Default)]
pub struct FileOutcome {
    pub clones: Vec<ClonePair>,
    /// Significant-token count (what `start_detection` reported).
    pub tokens: usize,
    pub lines: usize,
    pub skipped: bool,
    pub cancelled: bool,
}

/// Detector coordinator: owns the validator pipeline and the per-run
/// archive of processed files, and fans events out to subscribers in
/// registration order.
pub struct Detector {
    config: DetectionConfig,
    validators: Vec<Box<dyn validate::Validator>>,
    archive: HashMap<String, SourceMap>,
}

impl Detector {
    pub fn new(config: DetectionConfig) -> Self {
        Self {
            config,
            validators: validate::default_pipeline(),
            archive: HashMap::new(),
        }
    }

    /// Run one file through the full pipeline.
    ///
    /// Returns `Ok` with a skipped outcome for tokenizer-level failures
    /// (the corresponding event has already been emitted) and `Err` for
    /// store failures, after emitting `store_error`.
    pub fn process(
        &mut self,
        record: &SourceRecord,
        store: &mut dyn FrameStore,
        subscribers: &mut [Box<dyn Subscriber>],
        cancel: &CancelFlag,
    ) -> Result<FileOutcome> {
        for sub in subscribers.iter_mut() {
            sub.on_match_source(&record.id, &record.format);
        }

        let tokens = match tokenize(&record.source, &record.format) {
            Ok(tokens) => tokens,
            Err(err @ (DetectError::UnknownFormat(_) | DetectError::Tokenizer(_))) => {
                let reason = err.to_string();
                for sub in subscribers.iter_mut() {
                    sub.on_skipped_source(&record.id, &reason);
                }
                return Ok(FileOutcome {
                    skipped: true,
                    ..FileOutcome::default()
                });
            }
            Err(err) => return Err(err),
        };

        let map = self.build_map(record, tokens);
        for sub in subscribers.iter_mut() {
            sub.on_start_detection(&record.id, map.format, map.tokens.len());
        }

        let (raws, cancelled) =
            match matcher::detect(&map, &self.archive, store, self.config.min_tokens, cancel) {
                Ok(result) => result,
                Err(err) => {
                    for sub in subscribers.iter_mut() {
                        sub.on_store_error(&record.id, &err);
                    }
                    return Err(err);
                }
            };

        let tokens_count = map.tokens.len();
        if cancelled {
            // A cancelled pass finalizes the file without emitting
            // partial clones.
            self.archive.insert(map.source_id.clone(), map);
            return Ok(FileOutcome {
                tokens: tokens_count,
                lines: record.lines,
                cancelled: true,
                ..FileOutcome::default()
            });
        }

        let mut accepted = Vec::new();
        let mut summary = SourceSummary::default();
        for raw in &raws {
            let mut clone = self.build_clone(raw, &map);
            let ctx = validate::ValidateContext {
                config: &self.config,
                current: &map,
                archive: &self.archive,
            };
            if self.validators.iter_mut().all(|v| v.validate(&mut clone, &ctx)) {
                summary.clones += 1;
                summary.duplicated_lines += clone.duplication_b.line_span();
                summary.duplicated_tokens += clone.tokens;
                for sub in subscribers.iter_mut() {
                    sub.on_clone_found(&clone);
                }
                accepted.push(clone);
            }
        }

        for sub in subscribers.iter_mut() {
            sub.on_end(&record.id, &summary);
        }
        self.archive.insert(map.source_id.clone(), map);

        Ok(FileOutcome {
            clones: accepted,
            tokens: tokens_count,
            lines: record.lines,
            skipped: false,
            cancelled: false,
        })
    }

    /// Filter tokens down to the significant ones under the active mode
    /// and fingerprint the windows.
    fn build_map(&self, record: &SourceRecord, tokens: Vec<Token>) -> SourceMap {
        let mut significant = Vec::new();
        let mut keys: Vec<Box<str>> = Vec::new();
        for token in tokens {
            if let Some(key) = mask_key(&token, self.config.mode, self.config.ignore_case) {
                keys.push(key);
                significant.push(token);
            }
        }

        let key_hashes: Vec<u64> = keys.iter().map(|k| frames::key_hash(k)).collect();
        let window_frames = frames::build_frames(&key_hashes, self.config.min_tokens);
        // Tokenization already succeeded, so the format id is registered.
        let format = crate::lang::find(&record.format).map_or("", |spec| spec.format);

        SourceMap {
            source_id: record.id.clone(),
            format,
            source: record.source.clone(),
            tokens: significant,
            keys,
            frames: window_frames,
        }
    }

    fn build_clone(&self, raw: &matcher::RawClone, map: &SourceMap) -> ClonePair {
        let partner = if raw.a_source == map.source_id {
            map
        } else {
            &self.archive[&raw.a_source]
        };
        ClonePair {
            format: map.format.to_string(),
            found_date: Utc::now(),
            tokens: raw.b_tokens.1 - raw.b_tokens.0,
            duplication_a: location(partner, raw.a_tokens),
            duplication_b: location(map, raw.b_tokens),
        }
    }
}

/// Map a significant-token span back to source coordinates.
fn location(map: &SourceMap, (start, end): (usize, usize)) -> CloneLocation {
    let first = &map.tokens[start];
    let last = &map.tokens[end - 1];
    let (end_line, end_column) = last.end_position();
    CloneLocation {
        source_id: map.source_id.clone(),
        start: ClonePosition {
            line: first.line,
            column: first.column,
            position: first.range.0,
        },
        end: ClonePosition {
            line: end_line,
            column: end_column,
            position: last.range.1,
        },
        range: (first.range.0, last.range.1),
        fragment: None,
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
