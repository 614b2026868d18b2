/// Rabin–Karp matching pass: scan a file's frames against the shared
/// store, open candidate matches on id hits, and extend them greedily.
///
/// Processing is a single forward pass. Each frame either records itself
/// in the store or opens a candidate match against the stored prior
/// occurrence; candidates are verified key-by-key (the window id is
/// advisory), extended window-by-window while ids and incoming tail keys
/// agree, and the outer scan then jumps past the matched region so
/// sub-clones of an extended match are never re-emitted. Every maximal
/// pair of identical regions across files X and Y (X processed first) is
/// emitted exactly once, when Y's frame at the match start is reached.
use std::collections::HashMap;

use super::SourceMap;
use crate::driver::CancelFlag;
use crate::error::Result;
use crate::store::{FrameStore, StoreRecord};

/// A matched pair of significant-token spans, before validation.
/// Spans are `[start, end)` indices into each side's significant tokens;
/// the B side always belongs to the file being scanned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawClone {
    pub a_source: String,
    pub a_tokens: (usize, usize),
    pub b_tokens: (usize, usize),
}

/// Scan `map`'s frames against the store. Returns the raw clones found
/// and whether the pass was interrupted by cancellation (checked between
/// frames; an interrupted pass emits no partial clone for the frame in
/// flight).
pub fn detect(
    map: &SourceMap,
    archive: &HashMap<String, SourceMap>,
    store: &mut dyn FrameStore,
    min_tokens: usize,
    cancel: &CancelFlag,
) -> Result<(Vec<RawClone>, bool)> {
    let mut clones = Vec::new();
    let mut i = 0;

    while i < map.frames.len() {
        if cancel.is_cancelled() {
            return Ok((clones, true));
        }

        let frame = &map.frames[i];
        let prior = store.get(frame.id)?;
        let hit = prior
            .as_ref()
            .filter(|rec| !(rec.source_id == map.source_id && rec.index == frame.index))
            .and_then(|rec| try_match(map, archive, rec, i, min_tokens));

        store.set(
            frame.id,
            StoreRecord {
                source_id: map.source_id.clone(),
                start: frame.start,
                end: frame.end,
                index: frame.index,
            },
        )?;

        match hit {
            Some((clone, extensions)) => {
                clones.push(clone);
                // Jump past the matched region on the current side.
                i += extensions + 1;
            }
            None => i += 1,
        }
    }

    Ok((clones, false))
}

/// Verify and extend a candidate match rooted at `rec` (A side) and the
/// current file's frame `index` (B side). Returns the raw clone and the
/// number of successful one-window extensions, or `None` when the id hit
/// was a hash collision, the partner map is gone, or a same-file match
/// would overlap itself.
fn try_match(
    map: &SourceMap,
    archive: &HashMap<String, SourceMap>,
    rec: &StoreRecord,
    index: usize,
    min_tokens: usize,
) -> Option<(RawClone, usize)> {
    let same_file = rec.source_id == map.source_id;
    let partner = if same_file {
        map
    } else {
        archive.get(&rec.source_id)?
    };

    let frame = &map.frames[index];

    // A same-file clone must keep its two token ranges disjoint; if the
    // initial windows already overlap there is no admissible match.
    if same_file && frame.index < rec.index + min_tokens {
        return None;
    }

    // The id is advisory: admit the candidate only after comparing the
    // initial windows' mask keys.
    let prior_keys = partner.keys.get(rec.start..rec.end)?;
    if prior_keys != &map.keys[frame.start..frame.end] {
        return None;
    }

    let mut k = 0usize;
    loop {
        if same_file && rec.index + k + 1 + min_tokens > frame.index {
            break;
        }
        let na = rec.index + k + 1;
        let nb = frame.index + k + 1;
        if na >= partner.frames.len() || nb >= map.frames.len() {
            break;
        }
        if partner.frames[na].id != map.frames[nb].id {
            break;
        }
        // Only the tail token is new; the rest of the window is already
        // verified.
        if partner.keys[na + min_tokens - 1] != map.keys[nb + min_tokens - 1] {
            break;
        }
        k += 1;
    }

    let clone = RawClone {
        a_source: rec.source_id.clone(),
        a_tokens: (rec.index, rec.index + min_tokens + k),
        b_tokens: (frame.index, frame.index + min_tokens + k),
    };
    Some((clone, k))
}

#[cfg(test)]
#[path = "matcher_test.rs"]
mod tests;
