//! Corpus materialization: raw input files to the pre-tokenized artifact.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::errors::{Error, Result};
use crate::segmenter::Segmenter;

/// Expands `patterns` and writes every line of every matched file, space-
/// joined after segmentation, to `corpus.txt` under `workdir`.
///
/// One output line per input line: a line that segments to nothing is
/// written as an empty line, so line counts correspond exactly between
/// inputs and the intermediate corpus. Inputs are read in glob order
/// within each pattern, patterns in the order given.
pub fn materialize(patterns: &[String], segmenter: &Segmenter, workdir: &Path) -> Result<PathBuf> {
    // Resolve everything up front so an unmatched pattern aborts before
    // any artifact is created.
    let files = resolve_inputs(patterns)?;

    let corpus_path = workdir.join("corpus.txt");
    let mut writer = BufWriter::new(File::create(&corpus_path)?);

    for path in &files {
        let mut reader = BufReader::new(File::open(path)?);
        let mut line = String::new();
        loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                break;
            }
            trim_terminator(&mut line);
            writeln!(writer, "{}", segmenter.segment(&line).join(" "))?;
        }
    }

    writer.flush()?;
    Ok(corpus_path)
}

/// Expands each glob pattern in order. A pattern matching no readable
/// file fails with [`Error::InputNotFound`].
pub fn resolve_inputs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for pattern in patterns {
        let mut matched = 0usize;
        for entry in glob::glob(pattern)? {
            let path = entry.map_err(|e| Error::Io(e.into_error()))?;
            if path.is_file() {
                files.push(path);
                matched += 1;
            }
        }
        if matched == 0 {
            return Err(Error::InputNotFound {
                pattern: pattern.clone(),
            });
        }
    }

    Ok(files)
}

fn trim_terminator(line: &mut String) {
    while line.ends_with(['\r', '\n']) {
        line.pop();
    }
}
