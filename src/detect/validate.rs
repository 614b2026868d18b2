/// Acceptance pipeline applied to each raw clone.
///
/// Validators run in a fixed order; any one may reject the clone
/// (dropping it) or mutate it (fragment extraction). They are pure over
/// the clone, the configuration, and the retained sources — never the
/// store. Overlap suppression is the only stateful stage and runs last,
/// so it records exactly the clones the rest of the pipeline accepted.
use std::collections::HashMap;

use super::{ClonePair, SourceMap};
use crate::config::DetectionConfig;

pub struct ValidateContext<'a> {
    pub config: &'a DetectionConfig,
    /// The file currently being processed (always the B side).
    pub current: &'a SourceMap,
    /// Previously processed files, by source id.
    pub archive: &'a HashMap<String, SourceMap>,
}

impl ValidateContext<'_> {
    /// Source text for either side of a clone.
    fn source_for(&self, source_id: &str) -> Option<&str> {
        if source_id == self.current.source_id {
            Some(&self.current.source)
        } else {
            self.archive.get(source_id).map(|m| m.source.as_str())
        }
    }
}

pub trait Validator {
    /// Returns `false` to reject the clone.
    fn validate(&mut self, clone: &mut ClonePair, ctx: &ValidateContext<'_>) -> bool;
}

/// The mandatory pipeline, in order.
pub fn default_pipeline() -> Vec<Box<dyn Validator>> {
    vec![
        Box::new(MinLines),
        Box::new(MinTokens),
        Box::new(MaxLines),
        Box::new(MaxSize),
        Box::new(FragmentExtractor),
        Box::new(OverlapSuppressor::default()),
    ]
}

/// Both sides must span at least `min_lines` lines.
pub struct MinLines;

impl Validator for MinLines {
    fn validate(&mut self, clone: &mut ClonePair, ctx: &ValidateContext<'_>) -> bool {
        clone.duplication_a.line_span() >= ctx.config.min_lines
            && clone.duplication_b.line_span() >= ctx.config.min_lines
    }
}

/// Covered-token count must reach `min_tokens`. True by construction for
/// freshly matched clones, re-checked for adjusted minima.
pub struct MinTokens;

impl Validator for MinTokens {
    fn validate(&mut self, clone: &mut ClonePair, ctx: &ValidateContext<'_>) -> bool {
        clone.tokens >= ctx.config.min_tokens
    }
}

/// Oversized clones are rejected entirely, not truncated.
pub struct MaxLines;

impl Validator for MaxLines {
    fn validate(&mut self, clone: &mut ClonePair, ctx: &ValidateContext<'_>) -> bool {
        clone.duplication_a.line_span() <= ctx.config.max_lines
            && clone.duplication_b.line_span() <= ctx.config.max_lines
    }
}

/// Optional byte cap on either side's source range.
pub struct MaxSize;

impl Validator for MaxSize {
    fn validate(&mut self, clone: &mut ClonePair, ctx: &ValidateContext<'_>) -> bool {
        match ctx.config.max_size {
            Some(max) => {
                clone.duplication_a.byte_len() <= max && clone.duplication_b.byte_len() <= max
            }
            None => true,
        }
    }
}

/// Populate each side's `fragment` by slicing its source by byte range.
pub struct FragmentExtractor;

impl Validator for FragmentExtractor {
    fn validate(&mut self, clone: &mut ClonePair, ctx: &ValidateContext<'_>) -> bool {
        for side in [&mut clone.duplication_a, &mut clone.duplication_b] {
            if let Some(source) = ctx.source_for(&side.source_id) {
                let (start, end) = side.range;
                side.fragment = source.get(start..end).map(str::to_string);
            }
        }
        true
    }
}

/// Drop clones fully contained in an already-accepted clone of the same
/// file pair.
#[derive(Default)]
pub struct OverlapSuppressor {
    accepted: HashMap<(String, String), Vec<((usize, usize), (usize, usize))>>,
}

impl Validator for OverlapSuppressor {
    fn validate(&mut self, clone: &mut ClonePair, _ctx: &ValidateContext<'_>) -> bool {
        let key = (
            clone.duplication_a.source_id.clone(),
            clone.duplication_b.source_id.clone(),
        );
        let a = clone.duplication_a.range;
        let b = clone.duplication_b.range;
        let ranges = self.accepted.entry(key).or_default();
        if ranges
            .iter()
            .any(|(pa, pb)| contains(*pa, a) && contains(*pb, b))
        {
            return false;
        }
        ranges.push((a, b));
        true
    }
}

/// Whether byte range `inner` lies within `outer`.
fn contains(outer: (usize, usize), inner: (usize, usize)) -> bool {
    outer.0 <= inner.0 && inner.1 <= outer.1
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;
