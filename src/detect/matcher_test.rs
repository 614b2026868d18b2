use std::collections::HashMap;

use super::*;
use crate::detect::SourceMap;
use crate::detect::frames::{build_frames, key_hash};
use crate::store::MemoryStore;
use crate::tokenize::{Token, TokenKind};

/// Build a source map directly from mask keys, bypassing tokenization.
fn make_map(source_id: &str, keys: &[&str], window: usize) -> SourceMap {
    let boxed: Vec<Box<str>> = keys.iter().map(|k| Box::from(*k)).collect();
    let hashes: Vec<u64> = boxed.iter().map(|k| key_hash(k)).collect();
    let frames = build_frames(&hashes, window);
    let tokens = keys
        .iter()
        .enumerate()
        .map(|(i, k)| Token {
            kind: TokenKind::Identifier,
            value: k.to_string(),
            line: i + 1,
            column: 1,
            range: (i * 2, i * 2 + 1),
            format: "javascript",
        })
        .collect();
    SourceMap {
        source_id: source_id.to_string(),
        format: "javascript",
        source: String::new(),
        tokens,
        keys: boxed,
        frames,
    }
}

/// Run one file's pass and archive it, the way the coordinator does.
fn pass(
    map: SourceMap,
    archive: &mut HashMap<String, SourceMap>,
    store: &mut MemoryStore,
    window: usize,
) -> Vec<RawClone> {
    let (clones, cancelled) =
        detect(&map, archive, store, window, &CancelFlag::new()).unwrap();
    assert!(!cancelled);
    archive.insert(map.source_id.clone(), map);
    clones
}

#[test]
fn first_file_only_populates_the_store() {
    let mut archive = HashMap::new();
    let mut store = MemoryStore::new();
    let clones = pass(make_map("a", &["x", "y", "z", "w"], 3), &mut archive, &mut store, 3);
    assert!(clones.is_empty());
    assert_eq!(store.len(), 2);
}

#[test]
fn identical_files_match_over_full_length() {
    let keys = ["x", "y", "z", "w", "v"];
    let mut archive = HashMap::new();
    let mut store = MemoryStore::new();
    pass(make_map("a", &keys, 3), &mut archive, &mut store, 3);
    let clones = pass(make_map("b", &keys, 3), &mut archive, &mut store, 3);

    assert_eq!(
        clones,
        vec![RawClone {
            a_source: "a".to_string(),
            a_tokens: (0, 5),
            b_tokens: (0, 5),
        }]
    );
}

#[test]
fn extension_stops_at_divergence() {
    // Shared prefix x y z, then w/v vs q/r: the clone covers exactly the
    // prefix and nothing past the first mismatching window.
    let mut archive = HashMap::new();
    let mut store = MemoryStore::new();
    pass(make_map("a", &["x", "y", "z", "w", "v"], 3), &mut archive, &mut store, 3);
    let clones = pass(make_map("b", &["x", "y", "z", "q", "r"], 3), &mut archive, &mut store, 3);

    assert_eq!(
        clones,
        vec![RawClone {
            a_source: "a".to_string(),
            a_tokens: (0, 3),
            b_tokens: (0, 3),
        }]
    );
}

#[test]
fn self_clone_with_shift() {
    let keys = ["a", "b", "c", "m", "n", "a", "b", "c"];
    let mut archive = HashMap::new();
    let mut store = MemoryStore::new();
    let clones = pass(make_map("c.py", &keys, 3), &mut archive, &mut store, 3);

    assert_eq!(
        clones,
        vec![RawClone {
            a_source: "c.py".to_string(),
            a_tokens: (0, 3),
            b_tokens: (5, 8),
        }]
    );
}

#[test]
fn overlapping_self_windows_are_not_clones() {
    // A run of one repeated key produces identical windows at every
    // offset, but none of them are disjoint from the stored prior.
    let mut archive = HashMap::new();
    let mut store = MemoryStore::new();
    let clones = pass(make_map("a", &["k", "k", "k", "k"], 2), &mut archive, &mut store, 2);
    assert!(clones.is_empty());
}

#[test]
fn same_file_extension_capped_at_disjointness() {
    // Two copies of a 4-key block separated by a 4-key gap: the clone
    // covers each block fully but must not grow the A side into the gap
    // beyond where the B side starts.
    let keys = ["a", "b", "c", "d", "w", "x", "y", "z", "a", "b", "c", "d"];
    let mut archive = HashMap::new();
    let mut store = MemoryStore::new();
    let clones = pass(make_map("f", &keys, 3), &mut archive, &mut store, 3);

    assert_eq!(clones.len(), 1);
    let clone = &clones[0];
    assert_eq!(clone.a_tokens, (0, 4));
    assert_eq!(clone.b_tokens, (8, 12));
    assert!(clone.a_tokens.1 <= clone.b_tokens.0);
}

#[test]
fn later_file_pairs_with_closest_prior() {
    // Last-writer-wins: after b matched a, the store points at b, so c
    // pairs with b rather than replaying a.
    let keys = ["x", "y", "z", "w"];
    let mut archive = HashMap::new();
    let mut store = MemoryStore::new();
    pass(make_map("a", &keys, 3), &mut archive, &mut store, 3);
    let b_clones = pass(make_map("b", &keys, 3), &mut archive, &mut store, 3);
    let c_clones = pass(make_map("c", &keys, 3), &mut archive, &mut store, 3);

    assert_eq!(b_clones[0].a_source, "a");
    assert_eq!(c_clones[0].a_source, "b");
}

#[test]
fn hash_hit_with_different_keys_is_rejected() {
    // Plant a store record whose id matches but whose archived keys do
    // not: verification must treat it as a collision, not a match.
    let ghost = make_map("ghost", &["q", "r", "s"], 3);
    let map = make_map("b", &["x", "y", "z"], 3);

    let mut store = MemoryStore::new();
    store
        .set(
            map.frames[0].id,
            StoreRecord {
                source_id: "ghost".to_string(),
                start: 0,
                end: 3,
                index: 0,
            },
        )
        .unwrap();
    let mut archive = HashMap::new();
    archive.insert("ghost".to_string(), ghost);

    let (clones, _) = detect(&map, &archive, &mut store, 3, &CancelFlag::new()).unwrap();
    assert!(clones.is_empty());
    // The colliding record was overwritten by the scanned frame.
    assert_eq!(store.get(map.frames[0].id).unwrap().unwrap().source_id, "b");
}

#[test]
fn missing_partner_map_is_not_a_match() {
    let map = make_map("b", &["x", "y", "z"], 3);
    let mut store = MemoryStore::new();
    store
        .set(
            map.frames[0].id,
            StoreRecord {
                source_id: "vanished".to_string(),
                start: 0,
                end: 3,
                index: 0,
            },
        )
        .unwrap();

    let archive = HashMap::new();
    let (clones, _) = detect(&map, &archive, &mut store, 3, &CancelFlag::new()).unwrap();
    assert!(clones.is_empty());
}

#[test]
fn cancellation_interrupts_between_frames() {
    let cancel = CancelFlag::new();
    cancel.cancel();
    let map = make_map("a", &["x", "y", "z", "w"], 3);
    let archive = HashMap::new();
    let mut store = MemoryStore::new();

    let (clones, cancelled) = detect(&map, &archive, &mut store, 3, &cancel).unwrap();
    assert!(cancelled);
    assert!(clones.is_empty());
    assert_eq!(store.len(), 0);
}

#[test]
fn scan_jump_skips_subclones_of_extended_match() {
    // Identical 6-key files with w=3: one maximal clone, not one per
    // window of the matched region.
    let keys = ["p", "q", "r", "s", "t", "u"];
    let mut archive = HashMap::new();
    let mut store = MemoryStore::new();
    pass(make_map("a", &keys, 3), &mut archive, &mut store, 3);
    let clones = pass(make_map("b", &keys, 3), &mut archive, &mut store, 3);
    assert_eq!(clones.len(), 1);
    assert_eq!(clones[0].b_tokens, (0, 6));
}
