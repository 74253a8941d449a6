use std::fs;
use std::io::Cursor;

use corpus_engine::{DocumentMode, WhitespaceTermCounter};
use corpus_stages::{document_word_counts, word_counts_path, WordCountError};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[test]
fn per_line_mode_counts_each_document() {
    let counts = document_word_counts(
        Cursor::new("a b a\na c\n\nfinal line here\n"),
        DocumentMode::PerLine,
        &WhitespaceTermCounter,
    )
    .unwrap();
    assert_eq!(counts, vec![3, 2, 0, 3]);
}

#[test]
fn single_mode_folds_into_one_count() {
    let counts = document_word_counts(
        Cursor::new("a b a\na c\n"),
        DocumentMode::Single,
        &WhitespaceTermCounter,
    )
    .unwrap();
    assert_eq!(counts, vec![5]);
}

#[test]
fn empty_corpus_yields_no_counts() {
    let counts = document_word_counts(
        Cursor::new(""),
        DocumentMode::PerLine,
        &WhitespaceTermCounter,
    )
    .unwrap();
    assert!(counts.is_empty());
}

#[test]
fn path_variant_reads_the_file() {
    let temp = TempDir::new().unwrap();
    let corpus = temp.path().join("corpus.txt");
    fs::write(&corpus, "one two\tthree\nfour\n").unwrap();

    let counts = word_counts_path(&corpus, DocumentMode::PerLine).unwrap();
    assert_eq!(counts, vec![3, 1]);
}

#[test]
fn missing_path_is_an_open_error() {
    let err = word_counts_path(
        std::path::Path::new("/nonexistent/corpus.txt"),
        DocumentMode::PerLine,
    )
    .unwrap_err();
    assert!(matches!(err, WordCountError::Open { .. }));
}
