//! `build-vocab` — builds a WordPiece vocabulary file from raw text.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use vocab::{build_vocabulary, ReservedSymbols, VocabConfig};

#[derive(Parser)]
#[command(name = "build-vocab")]
#[command(about = "Build a WordPiece vocabulary from a raw text corpus", long_about = None)]
#[command(version)]
struct Cli {
    /// Input raw text file or glob pattern (comma-separated list for multiple)
    input: String,

    /// Output vocabulary file
    output: PathBuf,

    /// WordPiece vocabulary size
    #[arg(long, default_value_t = 32_000)]
    vocab_size: usize,

    /// Cap on the sentences fed to the trainer; the excess is uniformly subsampled
    #[arg(long, default_value_t = 1_000_000)]
    sentence_size: usize,

    /// Lowercase the input text before segmentation
    #[arg(long, default_value_t = false)]
    lower_case: bool,

    /// Path to a compiled MeCab-format morphological dictionary
    #[arg(long)]
    dict: Option<PathBuf>,

    /// Seed for sentence subsampling
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cfg = VocabConfig {
        inputs: cli
            .input
            .split(',')
            .filter(|pattern| !pattern.is_empty())
            .map(str::to_owned)
            .collect(),
        output: cli.output,
        vocab_size: cli.vocab_size,
        sentence_size: cli.sentence_size,
        lower_case: cli.lower_case,
        dict: cli.dict,
        seed: cli.seed,
        reserved: ReservedSymbols::default(),
    };

    println!("Building vocabulary...");
    println!("  Inputs: {}", cfg.inputs.join(", "));
    println!("  Output: {}", cfg.output.display());
    println!("  Vocab size: {}", cfg.vocab_size);
    println!("  Sentence cap: {}", cfg.sentence_size);
    if let Some(dict) = &cfg.dict {
        println!("  Dictionary: {}", dict.display());
    }
    println!();

    build_vocabulary(&cfg).context("vocabulary build failed")?;

    println!("Vocabulary written to {}", cfg.output.display());
    Ok(())
}
