/// Rabin–Karp window fingerprinting over mask-key sequences.
///
/// Each mask key is first reduced to a `u64` with djb2; a window's id is
/// the polynomial hash of its key hashes, base 257 modulo 1_000_000_007.
/// Sliding the window is O(1) per step given the incoming key hash, so a
/// frame costs O(|k|) where |k| is the incoming key's length. The id is
/// advisory only — the matcher verifies candidate matches key-by-key.
pub const HASH_BASE: u64 = 257;
pub const HASH_MODULUS: u64 = 1_000_000_007;

/// A window of exactly `min_tokens` consecutive significant tokens.
///
/// `start`/`end` index into the file's significant-token sequence
/// (`end` exclusive); `index` is the 0-based window ordinal, equal to
/// `start`. A file of N significant tokens yields
/// `max(0, N − min_tokens + 1)` frames, neighbors sharing all but one
/// token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapFrame {
    pub id: u64,
    pub start: usize,
    pub end: usize,
    pub index: usize,
}

/// Reduce a mask key to a `u64` for use as a rolling-hash element.
pub fn key_hash(key: &str) -> u64 {
    let mut hash = 5381u64;
    for byte in key.bytes() {
        hash = hash.wrapping_mul(33).wrapping_add(byte as u64);
    }
    hash
}

/// Polynomial rolling hash over a fixed-width window of key hashes.
pub struct RollingHash {
    hash: u64,
    window: usize,
    /// BASE^(window−1) mod MODULUS, for removing the outgoing element.
    top_power: u64,
}

impl RollingHash {
    pub fn new(window: usize) -> Self {
        let mut top_power = 1u64;
        for _ in 0..window.saturating_sub(1) {
            top_power = mul_mod(top_power, HASH_BASE);
        }
        Self { hash: 0, window, top_power }
    }

    /// Prime the hash with the first window of values.
    pub fn init(&mut self, values: &[u64]) {
        self.hash = 0;
        for &value in values.iter().take(self.window) {
            self.hash = mul_mod(self.hash, HASH_BASE);
            self.hash = add_mod(self.hash, value % HASH_MODULUS);
        }
    }

    /// Slide the window: remove the outgoing value, append the incoming
    /// one. Returns the new hash.
    pub fn roll(&mut self, outgoing: u64, incoming: u64) -> u64 {
        let out = mul_mod(outgoing % HASH_MODULUS, self.top_power);
        self.hash = sub_mod(self.hash, out);
        self.hash = mul_mod(self.hash, HASH_BASE);
        self.hash = add_mod(self.hash, incoming % HASH_MODULUS);
        self.hash
    }

    pub fn get(&self) -> u64 {
        self.hash
    }
}

fn mul_mod(a: u64, b: u64) -> u64 {
    ((a as u128 * b as u128) % HASH_MODULUS as u128) as u64
}

fn add_mod(a: u64, b: u64) -> u64 {
    (a + b) % HASH_MODULUS
}

fn sub_mod(a: u64, b: u64) -> u64 {
    (a + HASH_MODULUS - b) % HASH_MODULUS
}

/// Slide a window of `min_tokens` across the key-hash sequence and
/// fingerprint each position. Sequences shorter than the window yield no
/// frames.
pub fn build_frames(key_hashes: &[u64], min_tokens: usize) -> Vec<MapFrame> {
    if min_tokens == 0 || key_hashes.len() < min_tokens {
        return Vec::new();
    }

    let mut frames = Vec::with_capacity(key_hashes.len() - min_tokens + 1);
    let mut rolling = RollingHash::new(min_tokens);
    rolling.init(&key_hashes[..min_tokens]);
    frames.push(MapFrame {
        id: rolling.get(),
        start: 0,
        end: min_tokens,
        index: 0,
    });

    for i in min_tokens..key_hashes.len() {
        let id = rolling.roll(key_hashes[i - min_tokens], key_hashes[i]);
        let index = i - min_tokens + 1;
        frames.push(MapFrame {
            id,
            start: index,
            end: index + min_tokens,
            index,
        });
    }

    frames
}

#[cfg(test)]
#[path = "frames_test.rs"]
mod tests;
