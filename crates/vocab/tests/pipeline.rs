use std::fs;
use std::path::Path;

use tempfile::TempDir;
use vocab::{build_vocabulary, corpus, Error, Segmenter, VocabConfig};

const CORPUS_LINES: [&str; 12] = [
    "the quick brown fox jumps over the lazy dog",
    "the quick brown fox naps under the old tree",
    "a lazy dog naps beside the quick brown fox",
    "subword units share fragments across many words",
    "many words share the same subword fragments",
    "training needs repetition repetition and more repetition",
    "the dog and the fox and the tree",
    "quick words and lazy words and old words",
    "fragments of words become subword units",
    "the trainer merges frequent pairs of symbols",
    "frequent pairs of symbols become merged units",
    "merged units form the final vocabulary",
];

fn write_corpus(dir: &Path) -> String {
    let path = dir.join("corpus.txt");
    let mut contents = String::new();
    // Repeat the lines so every merge the trainer wants is well supported.
    for _ in 0..4 {
        for line in CORPUS_LINES {
            contents.push_str(line);
            contents.push('\n');
        }
    }
    fs::write(&path, contents).unwrap();
    path.to_str().unwrap().to_owned()
}

fn small_config(input: String, output: &Path) -> VocabConfig {
    let mut cfg = VocabConfig::new(vec![input], output.to_path_buf());
    cfg.vocab_size = 48;
    cfg.sentence_size = 1_000;
    cfg
}

#[test]
fn materialized_corpus_keeps_line_correspondence() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("input.txt");
    fs::write(&input, "hello world\n\n").unwrap();

    let segmenter = Segmenter::new(false, None).unwrap();
    let corpus_path = corpus::materialize(
        &[input.to_str().unwrap().to_owned()],
        &segmenter,
        tmp.path(),
    )
    .unwrap();

    // Two input lines, the second empty, stay two lines in the artifact.
    let contents = fs::read_to_string(corpus_path).unwrap();
    assert_eq!(contents, "hello world\n\n");
}

#[test]
fn last_line_without_terminator_is_still_written() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("input.txt");
    fs::write(&input, "first line\nsecond line").unwrap();

    let segmenter = Segmenter::new(false, None).unwrap();
    let corpus_path = corpus::materialize(
        &[input.to_str().unwrap().to_owned()],
        &segmenter,
        tmp.path(),
    )
    .unwrap();

    let contents = fs::read_to_string(corpus_path).unwrap();
    assert_eq!(contents, "first line\nsecond line\n");
}

#[test]
fn unmatched_pattern_fails_before_any_output_exists() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("vocab.txt");
    let missing = tmp.path().join("missing-*.txt");
    let cfg = small_config(missing.to_str().unwrap().to_owned(), &output);

    let err = build_vocabulary(&cfg).unwrap_err();
    assert!(matches!(err, Error::InputNotFound { .. }));
    assert!(!output.exists());
}

#[test]
fn full_pipeline_produces_a_wordpiece_vocabulary() {
    let tmp = TempDir::new().unwrap();
    let input = write_corpus(tmp.path());
    let output = tmp.path().join("vocab.txt");
    let cfg = small_config(input, &output);

    build_vocabulary(&cfg).unwrap();

    let contents = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = contents.lines().collect();

    // Line count equals the requested inventory size, order preserved,
    // reserved symbols leading.
    assert_eq!(lines.len(), cfg.vocab_size);
    let leading: Vec<&str> = cfg.reserved.ordered().collect();
    assert_eq!(&lines[..leading.len()], &leading[..]);

    // Every marker was stripped or rewritten; no score column survives.
    for line in &lines {
        assert!(!line.contains('\u{2581}'), "marker leaked into {line:?}");
        assert!(!line.contains('\t'), "score column leaked into {line:?}");
    }

    // Induction over word-interior pairs must yield continuation pieces.
    assert!(lines.iter().any(|line| line.starts_with("##")));
}

#[test]
fn identical_runs_yield_byte_identical_vocabularies() {
    let tmp = TempDir::new().unwrap();
    let input = write_corpus(tmp.path());

    let first_out = tmp.path().join("first.txt");
    let second_out = tmp.path().join("second.txt");

    build_vocabulary(&small_config(input.clone(), &first_out)).unwrap();
    build_vocabulary(&small_config(input, &second_out)).unwrap();

    let first = fs::read(first_out).unwrap();
    let second = fs::read(second_out).unwrap();
    assert_eq!(first, second);
}

#[test]
fn lower_case_run_contains_no_uppercase_entries() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("input.txt");
    let mut contents = String::new();
    for _ in 0..4 {
        for line in CORPUS_LINES {
            contents.push_str(&line.to_uppercase());
            contents.push('\n');
        }
    }
    fs::write(&input, contents).unwrap();

    let output = tmp.path().join("vocab.txt");
    let mut cfg = small_config(input.to_str().unwrap().to_owned(), &output);
    cfg.lower_case = true;

    build_vocabulary(&cfg).unwrap();

    let contents = fs::read_to_string(&output).unwrap();
    for line in contents.lines().skip(cfg.reserved.len()) {
        assert_eq!(line, line.to_lowercase(), "uppercase piece {line:?}");
    }
}

#[test]
fn oversized_request_fails_with_a_training_error() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("input.txt");
    fs::write(&input, "tiny corpus\n").unwrap();

    let output = tmp.path().join("vocab.txt");
    let mut cfg = small_config(input.to_str().unwrap().to_owned(), &output);
    cfg.vocab_size = 32_000;

    let err = build_vocabulary(&cfg).unwrap_err();
    assert!(matches!(err, Error::Training(_)));
    assert!(!output.exists());
}
