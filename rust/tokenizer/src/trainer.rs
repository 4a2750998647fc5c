//! BPE Tokenizer Training
//!
//! Learns merge rules from a corpus by iteratively finding and merging the
//! most frequent adjacent symbol pair.
//!
//! Algorithm:
//! 1. Represent the corpus as one byte sequence
//! 2. Find the most frequent adjacent pair (ties go to the earliest pair)
//! 3. Assign it the next free ID and merge it across the sequence
//! 4. Repeat until the vocabulary is full, no pair is left, or early stop fires

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::pairs::{merge_pair, most_frequent_pair, to_byte_ids};
use crate::vocab::Vocab;

/// Configuration for BPE training.
#[derive(Debug, Clone)]
pub struct TrainerConfig {
    /// Stop once the best remaining pair occurs only once
    pub stop_early: bool,
    /// Report every merge at info level
    pub verbose: bool,
    /// Log progress every N merges (0 disables)
    pub log_interval: u32,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            stop_early: false,
            verbose: false,
            log_interval: 1000,
        }
    }
}

/// Outcome of a training run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingSummary {
    /// Merges learned by this run
    pub merges: u32,
    /// Vocabulary size after the run
    pub vocab_size: u32,
}

/// BPE Trainer — learns merge rules from a text corpus.
pub struct Trainer {
    config: TrainerConfig,
}

impl Trainer {
    /// Create a new trainer with the given configuration.
    pub fn new(config: TrainerConfig) -> Self {
        Self { config }
    }

    /// Learn merges from `corpus` into `vocab` until it holds
    /// `max_vocab_size` tokens or no worthwhile pair remains.
    pub fn train(&self, vocab: &mut Vocab, corpus: &str, max_vocab_size: u32) -> TrainingSummary {
        let mut ids = to_byte_ids(corpus);
        let mut merges = 0u32;

        info!(
            corpus_bytes = ids.len(),
            start_vocab = vocab.len(),
            max_vocab_size,
            "Training BPE"
        );

        while vocab.len() < max_vocab_size {
            let Some(best) = most_frequent_pair(&ids) else {
                info!(merges, "Stopping: no adjacent pairs left");
                break;
            };

            if self.config.stop_early && best.count == 1 {
                info!(merges, "Stopping early: best remaining pair occurs once");
                break;
            }

            let (left, right) = best.pair;
            let new_id = vocab.add_merge(left, right);
            ids = merge_pair(&ids, best.pair, new_id);
            merges += 1;

            let token = String::from_utf8_lossy(vocab.token_bytes(new_id).unwrap_or_default());
            if self.config.verbose {
                info!(
                    "Merged IDs ({}, {}) as a new token {:?} with ID {} (freq={})",
                    left, right, token, new_id, best.count
                );
            } else {
                debug!(left, right, new_id, freq = best.count, token = %token, "merge");
                if self.config.log_interval > 0 && merges % self.config.log_interval == 0 {
                    info!(merges, vocab_size = vocab.len(), "Training progress");
                }
            }
        }

        info!(
            "Training complete: {} merges performed. Final vocabulary size: {}",
            merges,
            vocab.len()
        );

        TrainingSummary {
            merges,
            vocab_size: vocab.len(),
        }
    }
}
