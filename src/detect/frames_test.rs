use super::*;

fn hashes(keys: &[&str]) -> Vec<u64> {
    keys.iter().map(|k| key_hash(k)).collect()
}

#[test]
fn frame_count_is_n_minus_window_plus_one() {
    let kh = hashes(&["a", "b", "c", "d", "e"]);
    assert_eq!(build_frames(&kh, 3).len(), 3);
    assert_eq!(build_frames(&kh, 5).len(), 1);
}

#[test]
fn too_few_tokens_yield_no_frames() {
    let kh = hashes(&["a", "b"]);
    assert!(build_frames(&kh, 3).is_empty());
    assert!(build_frames(&[], 3).is_empty());
}

#[test]
fn frames_cover_consecutive_windows() {
    let kh = hashes(&["a", "b", "c", "d"]);
    let frames = build_frames(&kh, 2);
    let spans: Vec<(usize, usize, usize)> =
        frames.iter().map(|f| (f.index, f.start, f.end)).collect();
    assert_eq!(spans, vec![(0, 0, 2), (1, 1, 3), (2, 2, 4)]);
}

#[test]
fn rolled_hash_matches_fresh_hash() {
    // The rolling update must agree with hashing each window from
    // scratch, or identical windows in different files would never
    // collide.
    let kh = hashes(&["alpha", "beta", "gamma", "delta", "epsilon"]);
    let frames = build_frames(&kh, 3);
    for frame in &frames {
        let mut fresh = RollingHash::new(3);
        fresh.init(&kh[frame.start..frame.end]);
        assert_eq!(frame.id, fresh.get(), "window {}", frame.index);
    }
}

#[test]
fn identical_windows_share_an_id() {
    let kh = hashes(&["x", "y", "z", "q", "x", "y", "z"]);
    let frames = build_frames(&kh, 3);
    assert_eq!(frames[0].id, frames[4].id);
    assert_ne!(frames[0].id, frames[1].id);
}

#[test]
fn key_hash_is_deterministic() {
    assert_eq!(key_hash("return"), key_hash("return"));
    assert_ne!(key_hash("return"), key_hash("returns"));
}

#[test]
fn different_key_order_different_id() {
    let ab = build_frames(&hashes(&["a", "b"]), 2);
    let ba = build_frames(&hashes(&["b", "a"]), 2);
    assert_ne!(ab[0].id, ba[0].id);
}
