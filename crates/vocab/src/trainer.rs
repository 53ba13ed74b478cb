//! Subword induction through the `tokenizers` byte-pair-merge trainer.
//!
//! The induction algorithm itself is delegated: this module only prepares
//! the sampled sentence stream, pins the reserved symbols at the leading
//! ids, and writes the ranked `token<TAB>score` inventory that the
//! converter consumes.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokenizers::models::bpe::{BpeTrainer, BPE};
use tokenizers::models::TrainerWrapper;
use tokenizers::pre_tokenizers::metaspace::{Metaspace, PrependScheme};
use tokenizers::tokenizer::AddedToken;
use tokenizers::Tokenizer;

use crate::config::VocabConfig;
use crate::errors::{Error, Result};

/// Word-start marker of the inventory convention (U+2581).
pub const WORD_START_MARKER: char = '\u{2581}';

/// Trains a subword inventory of exactly `cfg.vocab_size` entries from the
/// intermediate corpus and writes it as `inventory.tsv` under `workdir`,
/// one `token<TAB>score` line per entry in descending preference order.
///
/// Reserved symbols occupy the leading positions with a zero score;
/// induced pieces carry their negated rank, the placeholder convention of
/// byte-pair-merge vocabularies. A corpus too small or degenerate to reach
/// the requested size fails with [`Error::Training`].
pub fn train(corpus: &Path, workdir: &Path, cfg: &VocabConfig) -> Result<PathBuf> {
    let sentences = sample_sentences(corpus, cfg.sentence_size, cfg.seed)?;
    if sentences.is_empty() {
        return Err(Error::Training(format!(
            "corpus {} contains no sentences",
            corpus.display()
        )));
    }

    let mut tokenizer = Tokenizer::new(BPE::default());
    tokenizer.with_pre_tokenizer(Some(Metaspace::new(
        WORD_START_MARKER,
        PrependScheme::Always,
        true,
    )));

    let special_tokens: Vec<AddedToken> = cfg
        .reserved
        .ordered()
        .map(|symbol| AddedToken::from(symbol.to_owned(), true))
        .collect();

    let mut trainer: TrainerWrapper = BpeTrainer::builder()
        .vocab_size(cfg.vocab_size)
        .show_progress(false)
        .special_tokens(special_tokens)
        .build()
        .into();

    tokenizer
        .train(&mut trainer, sentences.into_iter())
        .map_err(|e| Error::Training(e.to_string()))?;

    let mut entries: Vec<(String, u32)> = tokenizer.get_vocab(true).into_iter().collect();
    entries.sort_by_key(|&(_, id)| id);

    if entries.len() != cfg.vocab_size {
        return Err(Error::Training(format!(
            "produced {} pieces for a requested inventory of {}; \
             the corpus is too small or the size too tight",
            entries.len(),
            cfg.vocab_size
        )));
    }

    for (position, symbol) in cfg.reserved.ordered().enumerate() {
        match entries.get(position) {
            Some((token, _)) if token == symbol => {}
            _ => {
                return Err(Error::Training(format!(
                    "reserved symbol '{symbol}' missing from id {position}"
                )))
            }
        }
    }

    let reserved: HashSet<String> = cfg.reserved.set();
    let inventory_path = workdir.join("inventory.tsv");
    let mut writer = BufWriter::new(File::create(&inventory_path)?);
    for (rank, (token, _)) in entries.iter().enumerate() {
        let score: i64 = if reserved.contains(token) {
            0
        } else {
            -(rank as i64)
        };
        writeln!(writer, "{token}\t{score}")?;
    }
    writer.flush()?;

    Ok(inventory_path)
}

/// Uniform reservoir sample of the non-empty corpus lines, capped at
/// `cap`. Lines past the cap displace earlier picks with probability
/// `cap / seen`, so the sample stays unbiased instead of truncated.
fn sample_sentences(corpus: &Path, cap: usize, seed: u64) -> Result<Vec<String>> {
    let reader = BufReader::new(File::open(corpus)?);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut reservoir: Vec<String> = Vec::new();
    let mut seen = 0usize;

    for line in reader.lines() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        seen += 1;
        if reservoir.len() < cap {
            reservoir.push(line);
        } else {
            let slot = rng.gen_range(0..seen);
            if slot < cap {
                reservoir[slot] = line;
            }
        }
    }

    Ok(reservoir)
}
