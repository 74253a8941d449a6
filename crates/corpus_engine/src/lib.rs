//! Corpus engine: single-pass word frequency and document-occurrence counting.
mod document;
mod report;
mod scan;
mod table;
mod token;

pub use document::{DocumentId, DocumentMode, ModeParseError};
pub use report::{Report, TermSummary};
pub use scan::{scan, scan_path, scan_with_cancel, scan_with_options, ScanError, ScanOptions};
pub use table::{DocumentOrder, FrequencyTable, TermStats};
pub use token::{terms, TermCounter, Terms, WhitespaceTermCounter, TERM_DELIMITERS};
