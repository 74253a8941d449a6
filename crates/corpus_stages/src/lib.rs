//! Corpus stages: the file-to-file collaborators around the frequency engine.
//!
//! Each stage is a single-pass text transformation producing or consuming
//! plain corpus files: joining per-document files, splitting a corpus,
//! stripping stop words, normalizing line endings, and counting words per
//! document.
mod filter;
mod join;
mod normalize;
mod persist;
mod split;
mod wordcount;

pub use filter::{strip_stop_words, FilterError, FilterSummary, StopWordSet};
pub use join::{join_corpus, JoinConvention, JoinError, JoinOptions, JoinSummary};
pub use normalize::{normalize_line_endings, NormalizeError, NormalizeSummary};
pub use persist::{ensure_output_dir, AtomicWriter, PersistError};
pub use split::{split_corpus, SplitError, SplitRule, SplitSummary};
pub use wordcount::{document_word_counts, word_counts_path, WordCountError};
