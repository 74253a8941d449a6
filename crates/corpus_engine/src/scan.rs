use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;

use crate::document::DocumentMode;
use crate::table::{DocumentOrder, FrequencyTable};
use crate::token::terms;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("cannot open corpus {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("read failed at corpus line {line}: {source}")]
    Read {
        line: u64,
        #[source]
        source: io::Error,
    },
    #[error("read failed at line {line} of corpus {path:?}: {source}")]
    ReadCorpus {
        path: PathBuf,
        line: u64,
        #[source]
        source: io::Error,
    },
    #[error("scan cancelled after {lines} lines")]
    Cancelled { lines: u64 },
}

impl ScanError {
    /// Attaches the corpus path to a path-less read failure, so errors from
    /// [`scan_path`] always name the failing source.
    fn attach_corpus(self, path: &Path) -> Self {
        match self {
            ScanError::Read { line, source } => ScanError::ReadCorpus {
                path: path.to_path_buf(),
                line,
                source,
            },
            other => other,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions {
    pub mode: DocumentMode,
    pub order: DocumentOrder,
}

/// Scans a corpus line by line and builds its frequency table.
///
/// One line is held in memory at a time; the table grows with vocabulary
/// size, not corpus size. A failed read aborts the whole scan and no
/// partial table is returned. Trailing content without a final newline is
/// still the last line.
pub fn scan<R: BufRead>(reader: R, mode: DocumentMode) -> Result<FrequencyTable, ScanError> {
    scan_with_options(
        reader,
        ScanOptions {
            mode,
            ..ScanOptions::default()
        },
        None,
    )
}

/// Like [`scan`], but checks `cancel` between lines so very large corpora
/// can be aborted cooperatively.
pub fn scan_with_cancel<R: BufRead>(
    reader: R,
    mode: DocumentMode,
    cancel: &AtomicBool,
) -> Result<FrequencyTable, ScanError> {
    scan_with_options(
        reader,
        ScanOptions {
            mode,
            ..ScanOptions::default()
        },
        Some(cancel),
    )
}

pub fn scan_with_options<R: BufRead>(
    reader: R,
    options: ScanOptions,
    cancel: Option<&AtomicBool>,
) -> Result<FrequencyTable, ScanError> {
    let mut table = FrequencyTable::with_order(options.order);
    for (index, line) in reader.lines().enumerate() {
        let line_index = index as u64;
        if let Some(flag) = cancel {
            if flag.load(Ordering::Relaxed) {
                return Err(ScanError::Cancelled { lines: line_index });
            }
        }
        let line = line.map_err(|source| ScanError::Read {
            line: line_index,
            source,
        })?;
        let document = options.mode.document_id_for(line_index);
        for term in terms(&line) {
            table.record(term, document);
        }
    }
    Ok(table)
}

/// Opens `path` and scans it; open failures name the failing source.
pub fn scan_path(path: &Path, mode: DocumentMode) -> Result<FrequencyTable, ScanError> {
    let file = File::open(path).map_err(|source| ScanError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    scan(BufReader::new(file), mode).map_err(|err| err.attach_corpus(path))
}
