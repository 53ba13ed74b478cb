//! Language-aware pre-tokenization of raw lines.

use std::borrow::Cow;
use std::fs::File;
use std::path::Path;

use unicode_segmentation::UnicodeSegmentation;
use vibrato::{Dictionary, Tokenizer};

use crate::errors::{Error, Result};

/// Splits one line of raw text into word-like pre-tokens.
///
/// With a compiled MeCab-format dictionary the split follows the Viterbi
/// lattice of the morphological engine; without one it falls back to
/// Unicode word boundaries. Segmentation is deterministic for identical
/// `(line, lower_case, dictionary)` inputs, and pre-tokens never contain
/// whitespace, so they can be joined with single spaces losslessly.
pub struct Segmenter {
    engine: Engine,
    lower_case: bool,
}

enum Engine {
    Morphological(Tokenizer),
    UnicodeWords,
}

impl Segmenter {
    /// Builds a segmenter, loading the dictionary eagerly so an unreadable
    /// resource fails here rather than on the first segmented line.
    pub fn new(lower_case: bool, dict_path: Option<&Path>) -> Result<Self> {
        let engine = match dict_path {
            Some(path) => {
                let reader = File::open(path).map_err(|e| Error::Resource {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })?;
                let dict = Dictionary::read(reader).map_err(|e| Error::Resource {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })?;
                Engine::Morphological(Tokenizer::new(dict))
            }
            None => Engine::UnicodeWords,
        };

        Ok(Self { engine, lower_case })
    }

    /// Segments a single line (no embedded newline) into pre-tokens.
    /// Empty lines yield an empty sequence.
    pub fn segment(&self, line: &str) -> Vec<String> {
        let line: Cow<'_, str> = if self.lower_case {
            Cow::Owned(line.to_lowercase())
        } else {
            Cow::Borrowed(line)
        };

        match &self.engine {
            Engine::Morphological(tokenizer) => {
                let mut worker = tokenizer.new_worker();
                worker.reset_sentence(line.as_ref());
                worker.tokenize();
                (0..worker.num_tokens())
                    .map(|i| worker.token(i).surface().to_string())
                    .filter(|surface| !surface.chars().all(char::is_whitespace))
                    .collect()
            }
            Engine::UnicodeWords => line
                .split_word_bounds()
                .filter(|piece| !piece.chars().all(char::is_whitespace))
                .map(str::to_owned)
                .collect(),
        }
    }
}
