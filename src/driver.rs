//! Multi-file detection driver.
//!
//! Accepts the discovered file set, a validated configuration, a shared
//! store, subscribers, and reporters. Files are processed sequentially
//! in the supplied order on a single worker, so every pass sees a
//! coherent store snapshot and clones come out in file-supply order.
//! A cooperative cancellation flag is checked between files (and between
//! frames, inside the matcher); cancelled runs finalize the in-flight
//! file without emitting partial clones, notify reporters, and still
//! close the store.
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::detect::{ClonePair, Detector};
use crate::error::{DetectError, Result};
use crate::events::Subscriber;
use crate::report::Reporter;
use crate::stats::Statistic;
use crate::store::{FrameStore, MemoryStore};

use crate::config::DetectionConfig;

/// One discovered source file, as handed over by the discovery
/// collaborator. `source` is the exact file content; byte offsets in
/// clones index into it.
#[derive(Debug, Clone)]
pub struct SourceRecord {
    pub id: String,
    pub format: String,
    pub source: String,
    pub lines: usize,
}

impl SourceRecord {
    pub fn new(id: impl Into<String>, format: impl Into<String>, source: impl Into<String>) -> Self {
        let source = source.into();
        let lines = source.lines().count();
        Self {
            id: id.into(),
            format: format.into(),
            source,
            lines,
        }
    }
}

/// Shared cooperative cancellation signal. Clone handles freely; any
/// handle can cancel the run.
#[derive(Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Final result of a run.
#[derive(Debug)]
pub struct DetectionOutcome {
    pub clones: Vec<ClonePair>,
    pub statistic: Statistic,
    pub cancelled: bool,
}

/// Drives detection over a file set and owns every shared resource:
/// the store, the subscriber list, and the reporter list.
pub struct Driver {
    detector: Detector,
    store: Box<dyn FrameStore>,
    subscribers: Vec<Box<dyn Subscriber>>,
    reporters: Vec<Box<dyn Reporter>>,
    cancel: CancelFlag,
    continue_on_store_error: bool,
}

impl Driver {
    /// Build a driver over the default in-memory store. Fails fast on a
    /// nonsensical configuration, before any file is touched.
    pub fn new(config: DetectionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            detector: Detector::new(config),
            store: Box::new(MemoryStore::new()),
            subscribers: Vec::new(),
            reporters: Vec::new(),
            cancel: CancelFlag::new(),
            continue_on_store_error: false,
        })
    }

    /// Replace the backing store (e.g. with a test double).
    pub fn with_store(mut self, store: Box<dyn FrameStore>) -> Self {
        self.store = store;
        self
    }

    /// Swallow store failures with a warning instead of aborting the run.
    pub fn continue_on_store_error(mut self) -> Self {
        self.continue_on_store_error = true;
        self
    }

    pub fn add_subscriber(&mut self, subscriber: Box<dyn Subscriber>) {
        self.subscribers.push(subscriber);
    }

    pub fn add_reporter(&mut self, reporter: Box<dyn Reporter>) {
        self.reporters.push(reporter);
    }

    /// A handle that cancels this driver's run when triggered.
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Process every source in the supplied order, then report, await
    /// reporter completion, and close the store.
    pub fn run(mut self, sources: &[SourceRecord]) -> Result<DetectionOutcome> {
        let mut statistic = Statistic::default();
        let mut clones = Vec::new();
        let mut cancelled = false;

        for record in sources {
            if self.cancel.is_cancelled() {
                cancelled = true;
                break;
            }

            let outcome = match self.detector.process(
                record,
                self.store.as_mut(),
                &mut self.subscribers,
                &self.cancel,
            ) {
                Ok(outcome) => outcome,
                Err(err @ DetectError::Store(_)) if self.continue_on_store_error => {
                    eprintln!("warning: {}: {err}", record.id);
                    continue;
                }
                Err(err) => {
                    let _ = self.store.close();
                    return Err(err);
                }
            };

            if outcome.skipped {
                continue;
            }
            statistic.add_source(&record.format, outcome.lines, outcome.tokens);
            for clone in &outcome.clones {
                statistic.add_clone(&record.format, clone.duplication_b.line_span(), clone.tokens);
            }
            clones.extend(outcome.clones);
            if outcome.cancelled {
                cancelled = true;
                break;
            }
        }

        statistic.recompute();

        // The store is closed even when a reporter fails.
        let reported = self.run_reporters(&clones, &statistic, cancelled);
        let closed = self.store.close();
        reported?;
        closed?;

        Ok(DetectionOutcome {
            clones,
            statistic,
            cancelled,
        })
    }

    fn run_reporters(
        &mut self,
        clones: &[ClonePair],
        statistic: &Statistic,
        cancelled: bool,
    ) -> Result<()> {
        if cancelled {
            for reporter in &mut self.reporters {
                reporter.cancelled("CANCELLED");
            }
            return Ok(());
        }
        for reporter in &mut self.reporters {
            reporter.report(clones, statistic)?;
        }
        for reporter in &mut self.reporters {
            reporter.wait_for_completion()?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "driver_test.rs"]
mod tests;
