//! Stateless byte and pair helpers shared by training and encoding.
//!
//! Tie-break rule for [`most_frequent_pair`]: when several pairs share the
//! highest count, the pair whose first occurrence comes earliest in a
//! left-to-right scan wins. Changing this rule changes which merges are learned.

use rustc_hash::FxHashMap;

/// An adjacent symbol pair `(left, right)`.
pub type Pair = (u32, u32);

/// A pair together with how often it occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairCount {
    pub pair: Pair,
    pub count: u64,
}

/// Split text into its raw UTF-8 byte values, one symbol per byte.
pub fn to_byte_ids(text: &str) -> Vec<u32> {
    text.bytes().map(u32::from).collect()
}

/// Count every adjacent pair in `ids`.
pub fn count_pairs(ids: &[u32]) -> FxHashMap<Pair, u64> {
    let mut counts: FxHashMap<Pair, u64> = FxHashMap::default();
    for window in ids.windows(2) {
        *counts.entry((window[0], window[1])).or_insert(0) += 1;
    }
    counts
}

/// Find the most frequent adjacent pair, or `None` when `ids` has fewer
/// than two symbols.
pub fn most_frequent_pair(ids: &[u32]) -> Option<PairCount> {
    let counts = count_pairs(ids);

    // Rescan in sequence order so ties resolve to the earliest pair.
    let mut best: Option<PairCount> = None;
    for window in ids.windows(2) {
        let pair = (window[0], window[1]);
        let count = counts[&pair];
        match best {
            Some(current) if current.count >= count => {}
            _ => best = Some(PairCount { pair, count }),
        }
    }
    best
}

/// Replace every non-overlapping occurrence of `pair` with `new_id`,
/// scanning left to right without backtracking.
pub fn merge_pair(ids: &[u32], pair: Pair, new_id: u32) -> Vec<u32> {
    let mut merged = Vec::with_capacity(ids.len());
    let mut i = 0;

    while i < ids.len() {
        if i + 1 < ids.len() && ids[i] == pair.0 && ids[i + 1] == pair.1 {
            merged.push(new_id);
            i += 2;
        } else {
            merged.push(ids[i]);
            i += 1;
        }
    }

    merged
}
