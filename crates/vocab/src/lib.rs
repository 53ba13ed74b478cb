//! WordPiece vocabulary construction from a raw text corpus.
//!
//! Three ordered stages, each feeding the next through a file:
//!
//! 1. [`Segmenter`] pre-tokenizes every input line into word-like
//!    segments, morphologically when a dictionary is configured.
//! 2. [`trainer`] delegates subword induction over the materialized
//!    corpus to the `tokenizers` byte-pair-merge trainer and captures its
//!    ranked `token<TAB>score` inventory.
//! 3. [`convert`] reclassifies every inventory entry from the
//!    marker-prefix convention into the WordPiece `##` convention.
//!
//! The pipeline is a single sequential forward pass: each stage completes
//! and flushes before the next begins, the intermediate artifacts live in
//! a run-scoped temporary directory, and the only published output is the
//! converted vocabulary file.

pub mod config;
pub mod convert;
pub mod corpus;
pub mod errors;
pub mod segmenter;
pub mod trainer;

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

pub use config::{ReservedSymbols, VocabConfig};
pub use errors::{Error, Result};
pub use segmenter::Segmenter;

/// Runs the full pipeline described by `cfg` and publishes the converted
/// vocabulary at `cfg.output`.
///
/// Intermediate artifacts are removed on every exit path, success or
/// failure. The final file is staged next to its destination and renamed
/// into place, so a failed run never leaves a truncated vocabulary
/// behind.
pub fn build_vocabulary(cfg: &VocabConfig) -> Result<()> {
    cfg.validate()?;

    let segmenter = Segmenter::new(cfg.lower_case, cfg.dict.as_deref())?;

    // Dropping the guard deletes corpus and inventory on all paths.
    let workdir = tempfile::tempdir()?;

    let corpus_path = corpus::materialize(&cfg.inputs, &segmenter, workdir.path())?;
    let inventory_path = trainer::train(&corpus_path, workdir.path(), cfg)?;

    publish(&inventory_path, &cfg.output, &cfg.reserved)
}

fn publish(inventory: &Path, output: &Path, reserved: &ReservedSymbols) -> Result<()> {
    let parent = match output.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let staged = tempfile::NamedTempFile::new_in(parent)?;
    let reader = BufReader::new(File::open(inventory)?);
    convert::convert(reader, BufWriter::new(staged.as_file()), &reserved.set())?;
    staged.persist(output).map_err(|e| Error::Io(e.error))?;

    Ok(())
}
