//! Vocabulary format conversion: marker-prefix convention to WordPiece.
//!
//! The trainer marks word starts explicitly: `▁fragment` may begin a word
//! and a bare `fragment` may only continue one. WordPiece inverts that
//! convention: a bare token begins a word and `##fragment` continues it.
//! Conversion is a pure per-entry reclassification; no entry depends on
//! any other, and reserved symbols pass through untouched.

use std::collections::HashSet;
use std::io::{BufRead, Write};

use crate::errors::{Error, Result};
use crate::trainer::WORD_START_MARKER;

/// Prefix marking a continuation piece in the WordPiece convention.
pub const CONTINUATION_PREFIX: &str = "##";

/// The three mutually exclusive shapes an inventory token can take.
#[derive(Debug, PartialEq, Eq)]
enum EntryKind<'a> {
    /// Exact member of the reserved set. Membership is checked before
    /// marker inspection, so a reserved symbol that happens to start with
    /// the marker is never misclassified.
    Reserved(&'a str),
    /// Marker-prefixed piece. The remainder may legally be empty when the
    /// token is the marker alone.
    WordStart(&'a str),
    /// Bare piece that may only continue a word.
    Continuation(&'a str),
}

fn classify<'a>(token: &'a str, reserved: &HashSet<String>) -> EntryKind<'a> {
    if reserved.contains(token) {
        EntryKind::Reserved(token)
    } else if let Some(fragment) = token.strip_prefix(WORD_START_MARKER) {
        EntryKind::WordStart(fragment)
    } else {
        EntryKind::Continuation(token)
    }
}

/// Converts one inventory token into its WordPiece spelling.
pub fn convert_token(token: &str, reserved: &HashSet<String>) -> String {
    match classify(token, reserved) {
        EntryKind::Reserved(symbol) => symbol.to_owned(),
        EntryKind::WordStart(fragment) => fragment.to_owned(),
        EntryKind::Continuation(fragment) => format!("{CONTINUATION_PREFIX}{fragment}"),
    }
}

/// Streams a `token<TAB>score` inventory into a one-token-per-line
/// vocabulary, preserving entry count and order, and returns the number
/// of entries written. A line without a tab separator fails with
/// [`Error::Format`] naming the 1-based line; no partial recovery is
/// attempted.
pub fn convert<R: BufRead, W: Write>(
    reader: R,
    mut writer: W,
    reserved: &HashSet<String>,
) -> Result<usize> {
    let mut written = 0usize;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let (token, _score) = line
            .split_once('\t')
            .ok_or(Error::Format { line: index + 1 })?;
        writeln!(writer, "{}", convert_token(token, reserved))?;
        written += 1;
    }

    writer.flush()?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReservedSymbols;

    fn reserved() -> HashSet<String> {
        ReservedSymbols::default().set()
    }

    #[test]
    fn reserved_symbols_pass_through_unchanged() {
        let reserved = reserved();
        for symbol in ["<unk>", "<s>", "</s>", "[PAD]", "[CLS]", "[SEP]", "[MASK]"] {
            assert_eq!(convert_token(symbol, &reserved), symbol);
        }
    }

    #[test]
    fn reserved_membership_wins_over_a_marker_prefix() {
        let mut reserved = reserved();
        reserved.insert("▁quote".into());
        assert_eq!(convert_token("▁quote", &reserved), "▁quote");
    }

    #[test]
    fn word_start_marker_is_stripped() {
        assert_eq!(convert_token("▁word", &reserved()), "word");
    }

    #[test]
    fn marker_alone_becomes_the_empty_string() {
        assert_eq!(convert_token("▁", &reserved()), "");
    }

    #[test]
    fn bare_fragments_gain_the_continuation_prefix() {
        assert_eq!(convert_token("tion", &reserved()), "##tion");
    }

    #[test]
    fn unregistered_reserved_lookalikes_are_treated_as_fragments() {
        // Exact-membership precedence: a symbol-shaped token that was never
        // registered converts like any other continuation fragment.
        assert_eq!(convert_token("[NEW]", &reserved()), "##[NEW]");
    }

    #[test]
    fn stream_preserves_count_and_order() {
        let inventory = "[PAD]\t0\n\u{2581}word\t-1\ntion\t-2\n<unk>\t0\n";
        let mut out = Vec::new();
        let written = convert(inventory.as_bytes(), &mut out, &reserved()).unwrap();

        assert_eq!(written, 4);
        assert_eq!(String::from_utf8(out).unwrap(), "[PAD]\nword\n##tion\n<unk>\n");
    }

    #[test]
    fn marker_only_entry_becomes_an_empty_line() {
        let inventory = "\u{2581}\t-5\n";
        let mut out = Vec::new();
        let written = convert(inventory.as_bytes(), &mut out, &reserved()).unwrap();

        assert_eq!(written, 1);
        assert_eq!(String::from_utf8(out).unwrap(), "\n");
    }

    #[test]
    fn missing_tab_names_the_offending_line() {
        let inventory = "▁fine\t-1\nbroken line\n";
        let mut out = Vec::new();
        let err = convert(inventory.as_bytes(), &mut out, &reserved()).unwrap_err();

        match err {
            Error::Format { line } => assert_eq!(line, 2),
            other => panic!("expected Format error, got {other:?}"),
        }
    }
}
