use thiserror::Error;

/// Errors surfaced by the tokenizer.
#[derive(Error, Debug)]
pub enum TokenizerError {
    #[error("maximum vocabulary size must be at least 257 (256 bytes + 1 merge), got {0}")]
    VocabSizeTooSmall(u32),
    #[error("unknown token ID {0}")]
    UnknownTokenId(u32),
    #[error("decoded bytes are not valid UTF-8")]
    InvalidUtf8,
    #[error("special token matcher build error: {0}")]
    SpecialTokenMatcher(#[from] aho_corasick::BuildError),
}
