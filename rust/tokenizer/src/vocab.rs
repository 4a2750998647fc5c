//! Vocabulary state for the byte-level BPE tokenizer.
//!
//! The vocabulary starts with 256 byte tokens (0x00-0xFF). Merge IDs and
//! special-token IDs are both handed out by one monotonically increasing
//! counter, so they never collide and `len()` always equals the next free ID.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::pairs::Pair;

/// Number of raw byte tokens every vocabulary starts with.
pub const BYTE_VOCAB_SIZE: u32 = 256;

/// A single merge rule: (left_token, right_token) → merged_token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRule {
    pub left: u32,
    pub right: u32,
    pub merged: u32,
    /// Position in learned order.
    pub rank: u32,
}

/// A caller-registered token that is always emitted as one ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialToken {
    pub token: String,
    pub id: u32,
}

/// The complete BPE vocabulary.
///
/// Structure:
/// - IDs 0-255: raw byte tokens
/// - IDs 256..next_id: merges and special tokens, in the order they were added
#[derive(Debug, Clone)]
pub struct Vocab {
    next_id: u32,

    /// Merge rules in learned order
    merges: Vec<MergeRule>,

    /// Merge pair → index into `merges`
    merge_lookup: FxHashMap<Pair, usize>,

    /// Token ID → byte sequence, for bytes and merges
    id_to_bytes: FxHashMap<u32, Vec<u8>>,

    /// Special tokens in registration order
    special_tokens: Vec<SpecialToken>,
    special_to_id: FxHashMap<String, u32>,
    id_to_special: FxHashMap<u32, String>,
}

impl Default for Vocab {
    fn default() -> Self {
        Self::new()
    }
}

impl Vocab {
    /// Create a vocabulary holding only the 256 byte tokens.
    pub fn new() -> Self {
        let mut id_to_bytes = FxHashMap::default();
        id_to_bytes.reserve(BYTE_VOCAB_SIZE as usize);
        for byte_val in 0..=u8::MAX {
            id_to_bytes.insert(u32::from(byte_val), vec![byte_val]);
        }

        Vocab {
            next_id: BYTE_VOCAB_SIZE,
            merges: Vec::new(),
            merge_lookup: FxHashMap::default(),
            id_to_bytes,
            special_tokens: Vec::new(),
            special_to_id: FxHashMap::default(),
            id_to_special: FxHashMap::default(),
        }
    }

    /// Drop every merge and special token, back to the byte identity state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Current number of tokens (base bytes + merges + specials).
    pub fn len(&self) -> u32 {
        self.next_id
    }

    /// Always false: the 256 byte tokens are never removed.
    pub fn is_empty(&self) -> bool {
        self.next_id == 0
    }

    /// Add a merge rule: merging `left` + `right` creates a new token.
    ///
    /// Both operands must already be byte or merge IDs.
    pub fn add_merge(&mut self, left: u32, right: u32) -> u32 {
        let new_id = self.next_id;
        let rank = self.merges.len() as u32;

        let mut merged_bytes = self.id_to_bytes.get(&left).cloned().unwrap_or_default();
        if let Some(right_bytes) = self.id_to_bytes.get(&right) {
            merged_bytes.extend_from_slice(right_bytes);
        }

        self.merge_lookup.insert((left, right), self.merges.len());
        self.merges.push(MergeRule {
            left,
            right,
            merged: new_id,
            rank,
        });
        self.id_to_bytes.insert(new_id, merged_bytes);
        self.next_id += 1;

        new_id
    }

    /// Register a special token and return its ID.
    ///
    /// Known tokens return their existing ID without consuming a new one.
    /// Empty tokens are rejected with `None`.
    pub fn add_special_token(&mut self, token: &str) -> Option<u32> {
        if token.is_empty() {
            return None;
        }
        if let Some(&id) = self.special_to_id.get(token) {
            return Some(id);
        }

        let id = self.next_id;
        self.special_tokens.push(SpecialToken {
            token: token.to_string(),
            id,
        });
        self.special_to_id.insert(token.to_string(), id);
        self.id_to_special.insert(id, token.to_string());
        self.next_id += 1;

        Some(id)
    }

    /// Merge rules in learned order.
    pub fn merges(&self) -> &[MergeRule] {
        &self.merges
    }

    /// Merged ID for `pair`, if a rule exists.
    pub fn merge_for(&self, pair: Pair) -> Option<u32> {
        self.merge_lookup
            .get(&pair)
            .map(|&index| self.merges[index].merged)
    }

    /// Byte expansion of a byte or merge ID.
    pub fn token_bytes(&self, id: u32) -> Option<&[u8]> {
        self.id_to_bytes.get(&id).map(Vec::as_slice)
    }

    /// Special tokens in registration order.
    pub fn special_tokens(&self) -> &[SpecialToken] {
        &self.special_tokens
    }

    pub fn special_token_id(&self, token: &str) -> Option<u32> {
        self.special_to_id.get(token).copied()
    }

    pub fn special_token(&self, id: u32) -> Option<&str> {
        self.id_to_special.get(&id).map(String::as_str)
    }

    /// Append the expansion of each ID to `out`.
    ///
    /// Special tokens take precedence over the byte/merge table. Returns the
    /// first ID found in neither table.
    pub fn decode_into(&self, ids: &[u32], out: &mut Vec<u8>) -> Result<(), u32> {
        for &id in ids {
            if let Some(special) = self.id_to_special.get(&id) {
                out.extend_from_slice(special.as_bytes());
            } else if let Some(token_bytes) = self.id_to_bytes.get(&id) {
                out.extend_from_slice(token_bytes);
            } else {
                return Err(id);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_vocab_has_256_bytes() {
        let vocab = Vocab::new();
        assert_eq!(vocab.len(), 256);
        assert_eq!(vocab.token_bytes(0), Some(&[0u8][..]));
        assert_eq!(vocab.token_bytes(255), Some(&[255u8][..]));
        assert_eq!(vocab.token_bytes(256), None);
    }

    #[test]
    fn test_add_merge() {
        let mut vocab = Vocab::new();
        let merged_id = vocab.add_merge(b'h' as u32, b'e' as u32);
        assert_eq!(merged_id, 256); // First merge gets ID 256
        assert_eq!(vocab.len(), 257);
        assert_eq!(vocab.token_bytes(merged_id), Some(&b"he"[..]));
        assert_eq!(vocab.merge_for((b'h' as u32, b'e' as u32)), Some(256));
        assert_eq!(vocab.merges()[0].rank, 0);
    }

    #[test]
    fn test_nested_merge_bytes() {
        let mut vocab = Vocab::new();
        let he = vocab.add_merge(b'h' as u32, b'e' as u32);
        let hel = vocab.add_merge(he, b'l' as u32);
        assert_eq!(hel, 257);
        assert_eq!(vocab.token_bytes(hel), Some(&b"hel"[..]));
        assert_eq!(vocab.merges()[1].rank, 1);
    }

    #[test]
    fn test_special_tokens_share_the_counter() {
        let mut vocab = Vocab::new();
        vocab.add_merge(b'a' as u32, b'b' as u32);
        let eot = vocab.add_special_token("<|endoftext|>").unwrap();
        assert_eq!(eot, 257);

        // Merges added afterwards continue past the special ID
        let next = vocab.add_merge(b'c' as u32, b'd' as u32);
        assert_eq!(next, 258);
        assert_eq!(vocab.len(), 259);
    }

    #[test]
    fn test_special_token_is_idempotent() {
        let mut vocab = Vocab::new();
        let first = vocab.add_special_token("<|bos|>");
        let second = vocab.add_special_token("<|bos|>");
        assert_eq!(first, second);
        assert_eq!(vocab.len(), 257);
        assert_eq!(vocab.special_tokens().len(), 1);
        assert_eq!(vocab.special_token_id("<|bos|>"), first);
        assert_eq!(vocab.special_token(256), Some("<|bos|>"));
    }

    #[test]
    fn test_empty_special_token_rejected() {
        let mut vocab = Vocab::new();
        assert_eq!(vocab.add_special_token(""), None);
        assert_eq!(vocab.len(), 256);
    }

    #[test]
    fn test_decode_into() {
        let mut vocab = Vocab::new();
        let he = vocab.add_merge(b'h' as u32, b'e' as u32);
        let eos = vocab.add_special_token("<|eos|>").unwrap();

        let mut out = Vec::new();
        vocab.decode_into(&[he, b'y' as u32, eos], &mut out).unwrap();
        assert_eq!(out, b"hey<|eos|>".to_vec());

        let mut out = Vec::new();
        assert_eq!(vocab.decode_into(&[104, 9999], &mut out), Err(9999));
    }

    #[test]
    fn test_reset() {
        let mut vocab = Vocab::new();
        vocab.add_merge(1, 2);
        vocab.add_special_token("<|pad|>");
        vocab.reset();
        assert_eq!(vocab.len(), 256);
        assert!(vocab.merges().is_empty());
        assert!(vocab.special_tokens().is_empty());
        assert_eq!(vocab.merge_for((1, 2)), None);
        assert_eq!(vocab.special_token_id("<|pad|>"), None);
    }
}
