use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

use crate::errors::{Error, Result};

/// Vocabulary entries exempt from marker-based reclassification.
///
/// Both sets are explicit configuration values rather than process-wide
/// constants, so the converter can be exercised with arbitrary reserved
/// sets. Any caller depending on exact vocabulary contents must know the
/// defaults below.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservedSymbols {
    /// Required by the trainer's model format and pinned at the leading
    /// inventory positions.
    pub special: Vec<String>,
    /// Injected verbatim into the inventory and never subword-split.
    pub control: Vec<String>,
}

impl Default for ReservedSymbols {
    fn default() -> Self {
        Self {
            special: vec!["<unk>".into(), "<s>".into(), "</s>".into()],
            control: vec![
                "[PAD]".into(),
                "[CLS]".into(),
                "[SEP]".into(),
                "[MASK]".into(),
            ],
        }
    }
}

impl ReservedSymbols {
    /// All reserved symbols in trainer id order, specials first.
    pub fn ordered(&self) -> impl Iterator<Item = &str> {
        self.special
            .iter()
            .chain(self.control.iter())
            .map(String::as_str)
    }

    pub fn set(&self) -> HashSet<String> {
        self.ordered().map(str::to_owned).collect()
    }

    pub fn len(&self) -> usize {
        self.special.len() + self.control.len()
    }

    pub fn is_empty(&self) -> bool {
        self.special.is_empty() && self.control.is_empty()
    }
}

/// Everything one pipeline run needs, assembled by the caller up front.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabConfig {
    /// Glob patterns naming the raw input files, expanded in order.
    pub inputs: Vec<String>,
    /// Destination of the converted vocabulary file.
    pub output: PathBuf,
    /// Inventory size requested from the trainer.
    pub vocab_size: usize,
    /// Cap on sentences fed to the trainer; anything beyond it is
    /// uniformly subsampled, not truncated.
    pub sentence_size: usize,
    /// Case-fold each line before segmentation.
    pub lower_case: bool,
    /// Compiled MeCab-format dictionary for morphological segmentation.
    /// Without it the segmenter splits on Unicode word boundaries.
    pub dict: Option<PathBuf>,
    /// Seed for the subsampling reservoir.
    pub seed: u64,
    pub reserved: ReservedSymbols,
}

impl VocabConfig {
    /// A config with the stock defaults of the original tool: 32k pieces,
    /// a one-million-sentence cap, no case folding.
    pub fn new(inputs: Vec<String>, output: PathBuf) -> Self {
        Self {
            inputs,
            output,
            vocab_size: 32_000,
            sentence_size: 1_000_000,
            lower_case: false,
            dict: None,
            seed: 42,
            reserved: ReservedSymbols::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            return Err(Error::InvalidConfig(
                "at least one input pattern is required".into(),
            ));
        }

        if self.vocab_size == 0 {
            return Err(Error::InvalidConfig(
                "vocab_size must be greater than zero".into(),
            ));
        }

        if self.sentence_size == 0 {
            return Err(Error::InvalidConfig(
                "sentence_size must be greater than zero".into(),
            ));
        }

        if self.vocab_size <= self.reserved.len() {
            return Err(Error::InvalidConfig(format!(
                "vocab_size {} leaves no room beyond the {} reserved symbols",
                self.vocab_size,
                self.reserved.len()
            )));
        }

        let mut seen = HashSet::new();
        for symbol in self.reserved.ordered() {
            if !seen.insert(symbol) {
                return Err(Error::InvalidConfig(format!(
                    "reserved symbol '{symbol}' appears multiple times"
                )));
            }
        }

        Ok(())
    }
}
