use tracing::{info, warn};

use crate::error::TokenizerError;
use crate::pairs::to_byte_ids;
use crate::special::{Segment, SpecialMatcher};
use crate::trainer::{Trainer, TrainerConfig, TrainingSummary};
use crate::vocab::{Vocab, BYTE_VOCAB_SIZE};

/// Byte-level BPE tokenizer: a vocabulary plus the operations over it.
///
/// The tokenizer is an owned, single-writer value. Training and special-token
/// registration take `&mut self`; encoding and decoding only read.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    max_vocab_size: u32,
    vocab: Vocab,
    special_matcher: Option<SpecialMatcher>,
}

impl Tokenizer {
    /// Create a tokenizer that may grow to `max_vocab_size` tokens.
    ///
    /// The limit must leave room for at least one merge above the 256 byte
    /// tokens.
    pub fn new(max_vocab_size: u32) -> Result<Self, TokenizerError> {
        if max_vocab_size <= BYTE_VOCAB_SIZE {
            return Err(TokenizerError::VocabSizeTooSmall(max_vocab_size));
        }

        Ok(Self {
            max_vocab_size,
            vocab: Vocab::new(),
            special_matcher: None,
        })
    }

    /// Learn merges from `corpus`.
    ///
    /// With `stop_early`, training ends once the best pair occurs only once.
    /// With `verbose`, every merge is logged at info level.
    pub fn train(&mut self, corpus: &str, stop_early: bool, verbose: bool) -> TrainingSummary {
        let config = TrainerConfig {
            stop_early,
            verbose,
            ..Default::default()
        };
        self.train_with_config(corpus, &config)
    }

    pub fn train_with_config(&mut self, corpus: &str, config: &TrainerConfig) -> TrainingSummary {
        Trainer::new(config.clone()).train(&mut self.vocab, corpus, self.max_vocab_size)
    }

    /// Register `token` as a special token and return its ID.
    ///
    /// Registering a known token again returns the same ID and changes nothing.
    /// The empty string is never registered; it would match everywhere.
    pub fn register_special_token(&mut self, token: &str) -> Option<u32> {
        let known = self.vocab.special_token_id(token);
        if known.is_some() {
            return known;
        }

        let Some(id) = self.vocab.add_special_token(token) else {
            warn!("Ignoring empty special token");
            return None;
        };
        info!("Added special token {} with ID {}", token, id);

        match SpecialMatcher::build(self.vocab.special_tokens()) {
            Ok(matcher) => self.special_matcher = matcher,
            Err(e) => warn!(error = %e, "Failed to rebuild special token matcher"),
        }

        Some(id)
    }

    /// Encode text into token IDs.
    ///
    /// Special tokens are emitted as their single ID; every other span is
    /// byte-pair encoded.
    pub fn encode(&self, text: &str) -> Vec<u32> {
        let Some(matcher) = &self.special_matcher else {
            return self.encode_ordinary(text);
        };

        let mut ids = Vec::new();
        for segment in matcher.split(text) {
            match segment {
                Segment::Special(id) => ids.push(id),
                Segment::Text(span) => ids.extend(self.encode_ordinary(span)),
            }
        }
        ids
    }

    /// Encode text with merges only, treating special-token text as bytes.
    ///
    /// Each pass walks the sequence left to right and merges any pair that
    /// has a rule, then steps past the merged symbol. Passes repeat until one
    /// makes no change.
    pub fn encode_ordinary(&self, text: &str) -> Vec<u32> {
        let mut ids = to_byte_ids(text);

        loop {
            let mut changed = false;
            let mut i = 0;
            while i + 1 < ids.len() {
                if let Some(merged) = self.vocab.merge_for((ids[i], ids[i + 1])) {
                    ids[i] = merged;
                    ids.remove(i + 1);
                    changed = true;
                }
                i += 1;
            }
            if !changed {
                break;
            }
        }

        ids
    }

    /// Decode token IDs to bytes, failing on any unknown ID.
    pub fn decode_bytes(&self, ids: &[u32]) -> Result<Vec<u8>, TokenizerError> {
        let mut bytes = Vec::with_capacity(ids.len() * 2);
        self.vocab
            .decode_into(ids, &mut bytes)
            .map_err(TokenizerError::UnknownTokenId)?;
        Ok(bytes)
    }

    /// Decode token IDs to a string.
    pub fn decode(&self, ids: &[u32]) -> Result<String, TokenizerError> {
        let bytes = self.decode_bytes(ids)?;
        String::from_utf8(bytes).map_err(|_| TokenizerError::InvalidUtf8)
    }

    /// Decode token IDs to a string, replacing invalid UTF-8 with U+FFFD.
    pub fn decode_lossy(&self, ids: &[u32]) -> Result<String, TokenizerError> {
        let bytes = self.decode_bytes(ids)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Current number of tokens (bytes + merges + specials).
    pub fn vocab_size(&self) -> u32 {
        self.vocab.len()
    }

    pub fn max_vocab_size(&self) -> u32 {
        self.max_vocab_size
    }

    /// Return to the 256 byte tokens, forgetting merges and special tokens.
    pub fn reset(&mut self) {
        self.vocab.reset();
        self.special_matcher = None;
    }

    pub fn vocab(&self) -> &Vocab {
        &self.vocab
    }
}
