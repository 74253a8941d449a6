use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use corpus_engine::{DocumentMode, TermCounter, WhitespaceTermCounter};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WordCountError {
    #[error("cannot open corpus {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Counts words per document: one entry per line in per-line mode, a single
/// folded entry in single mode. An empty corpus yields an empty vector; the
/// `[0]` sentinel some callers want is their convention, not this stage's.
pub fn document_word_counts<R: BufRead>(
    reader: R,
    mode: DocumentMode,
    counter: &dyn TermCounter,
) -> io::Result<Vec<u64>> {
    let mut counts = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let words = counter.count(&line);
        match mode {
            DocumentMode::PerLine => counts.push(words),
            DocumentMode::Single => {
                if let Some(total) = counts.first_mut() {
                    *total += words;
                } else {
                    counts.push(words);
                }
            }
        }
    }
    Ok(counts)
}

pub fn word_counts_path(path: &Path, mode: DocumentMode) -> Result<Vec<u64>, WordCountError> {
    let file = File::open(path).map_err(|source| WordCountError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let counts = document_word_counts(BufReader::new(file), mode, &WhitespaceTermCounter)?;
    Ok(counts)
}
