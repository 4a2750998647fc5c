//! Byte-level BPE tokenizer.
//!
//! This crate learns a subword vocabulary from a corpus and uses it to map
//! text to token IDs and back. It supports:
//!
//! - Byte-level BPE (no OOV tokens, handles any UTF-8 input)
//! - Greedy training: merge the most frequent adjacent pair until the
//!   vocabulary is full
//! - Special tokens matched verbatim and emitted as a single ID
//! - Strict decoding that rejects unknown IDs
//!
//! ## Architecture
//!
//! 1. Start with a base vocabulary of 256 byte tokens
//! 2. Iteratively merge the most frequent adjacent pair (ties go to the
//!    pair seen first)
//! 3. Stop at the maximum vocabulary size, when no pair is left, or, with
//!    early stopping, when the best pair occurs only once
//!
//! Encoding rescans the byte sequence and merges any known pair until a
//! full pass changes nothing.
//!
//! ## Usage
//!
//! ```rust
//! use bpe_tokenizer::Tokenizer;
//!
//! let mut tokenizer = Tokenizer::new(300).unwrap();
//! tokenizer.train("your training corpus here...", false, false);
//! let eot = tokenizer.register_special_token("<|endoftext|>").unwrap();
//!
//! let encoded = tokenizer.encode("your text<|endoftext|>");
//! assert_eq!(encoded.last(), Some(&eot));
//! assert_eq!(tokenizer.decode(&encoded).unwrap(), "your text<|endoftext|>");
//! ```

pub mod error;
pub mod pairs;
pub mod special;
pub mod tokenizer;
pub mod trainer;
pub mod vocab;

#[cfg(feature = "python")]
pub mod python;

// Re-export main types
pub use error::TokenizerError;
pub use tokenizer::Tokenizer;
pub use trainer::{Trainer, TrainerConfig, TrainingSummary};
pub use vocab::{MergeRule, SpecialToken, Vocab};
