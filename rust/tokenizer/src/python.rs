use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::error::TokenizerError;
use crate::tokenizer::Tokenizer;

impl From<TokenizerError> for PyErr {
    fn from(err: TokenizerError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

/// Python wrapper for the BPE tokenizer
#[pyclass(name = "Tokenizer", module = "bpe_tokenizer_rs")]
pub struct PyTokenizer {
    pub(crate) inner: Tokenizer,
}

#[pymethods]
impl PyTokenizer {
    #[new]
    pub fn new(max_vocab_size: u32) -> PyResult<Self> {
        Ok(Self {
            inner: Tokenizer::new(max_vocab_size)?,
        })
    }

    /// Learn merges from a corpus; returns (merges, vocab_size)
    #[pyo3(signature = (corpus, stop_early=false, verbose=false))]
    pub fn train(&mut self, corpus: &str, stop_early: bool, verbose: bool) -> (u32, u32) {
        let summary = self.inner.train(corpus, stop_early, verbose);
        (summary.merges, summary.vocab_size)
    }

    /// Register a special token and return its ID
    pub fn register_special_token(&mut self, token: &str) -> PyResult<u32> {
        self.inner
            .register_special_token(token)
            .ok_or_else(|| PyValueError::new_err("special token must not be empty"))
    }

    /// Encode text to a list of token IDs
    pub fn encode(&self, text: &str) -> Vec<u32> {
        self.inner.encode(text)
    }

    /// Decode a list of token IDs to a string
    pub fn decode(&self, ids: Vec<u32>) -> PyResult<String> {
        Ok(self.inner.decode(&ids)?)
    }

    pub fn vocab_size(&self) -> u32 {
        self.inner.vocab_size()
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    pub fn __len__(&self) -> usize {
        self.inner.vocab_size() as usize
    }
}

/// Route `tracing` output to stderr
#[pyfunction]
pub fn init_logging() {
    let _ = tracing_subscriber::fmt().with_writer(std::io::stderr).try_init();
}

/// Python module entry point
#[pymodule]
fn bpe_tokenizer_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyTokenizer>()?;
    m.add_function(wrap_pyfunction!(init_logging, m)?)?;
    Ok(())
}
