use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};

use corpus_engine::terms;
use corpus_logging::stage_info;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("cannot open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// The stop words to strip, hashed for constant-time membership checks.
#[derive(Debug, Clone, Default)]
pub struct StopWordSet {
    words: HashSet<String>,
}

impl StopWordSet {
    /// Collects stop words from whitespace-separated text.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, FilterError> {
        let mut words = HashSet::new();
        for line in BufReader::new(reader).lines() {
            let line = line?;
            for word in terms(&line) {
                words.insert(word.to_string());
            }
        }
        Ok(Self { words })
    }

    pub fn from_path(path: &Path) -> Result<Self, FilterError> {
        let file = File::open(path).map_err(|source| FilterError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.words.contains(term)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterSummary {
    pub lines: u64,
    pub kept: u64,
    pub removed: u64,
}

/// Rewrites `corpus` in place, dropping every term found in `stop_words`.
///
/// Kept terms are re-joined by single spaces, one output line per input
/// line. The rewrite goes through a temp file in the same directory and
/// replaces the original only on success, so a failed run leaves the
/// corpus untouched.
pub fn strip_stop_words(
    corpus: &Path,
    stop_words: &StopWordSet,
) -> Result<FilterSummary, FilterError> {
    let input = File::open(corpus).map_err(|source| FilterError::Open {
        path: corpus.to_path_buf(),
        source,
    })?;
    let dir = crate::persist::parent_or_cwd(corpus);
    let mut tmp = NamedTempFile::new_in(dir)?;

    let mut summary = FilterSummary::default();
    for line in BufReader::new(input).lines() {
        let line = line?;
        let mut first = true;
        for term in terms(&line) {
            if stop_words.contains(term) {
                summary.removed += 1;
                continue;
            }
            if !first {
                tmp.write_all(b" ")?;
            }
            tmp.write_all(term.as_bytes())?;
            summary.kept += 1;
            first = false;
        }
        tmp.write_all(b"\n")?;
        summary.lines += 1;
        corpus_logging::set_lines_seen(summary.lines);
    }
    tmp.flush()?;

    if corpus.exists() {
        fs::remove_file(corpus)?;
    }
    tmp.persist(corpus).map_err(|e| FilterError::Io(e.error))?;

    stage_info!(
        "Stop-word filter rewrote {:?}: {} lines, {} kept, {} removed",
        corpus,
        summary.lines,
        summary.kept,
        summary.removed
    );
    Ok(summary)
}
