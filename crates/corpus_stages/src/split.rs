use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use corpus_logging::stage_info;
use thiserror::Error;

use crate::persist::{ensure_output_dir, PersistError};

#[derive(Debug, Error)]
pub enum SplitError {
    #[error("cannot open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("split rule must use a count of at least 1")]
    InvalidRule,
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// When to start a new output segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitRule {
    /// At most this many lines per segment.
    Lines(u64),
    /// Roughly this many kilobytes per segment; lines are never split.
    Kilobytes(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SplitSummary {
    pub segments: u32,
    pub lines: u64,
}

/// Partitions `input` into numbered `NNNNN.txt` segments under `out_dir`.
///
/// A segment always receives at least one line, so an oversized single line
/// still lands somewhere instead of looping. The input file is left in
/// place.
pub fn split_corpus(
    input: &Path,
    out_dir: &Path,
    rule: SplitRule,
) -> Result<SplitSummary, SplitError> {
    match rule {
        SplitRule::Lines(0) | SplitRule::Kilobytes(0) => return Err(SplitError::InvalidRule),
        SplitRule::Lines(_) | SplitRule::Kilobytes(_) => {}
    }
    ensure_output_dir(out_dir)?;

    let source = File::open(input).map_err(|source| SplitError::Open {
        path: input.to_path_buf(),
        source,
    })?;

    let mut summary = SplitSummary::default();
    let mut segment_lines: u64 = 0;
    let mut segment_bytes: u64 = 0;
    let mut writer: Option<BufWriter<File>> = None;

    for line in BufReader::new(source).lines() {
        let line = line?;
        let line_bytes = line.len() as u64 + 1;

        let over_budget = match rule {
            SplitRule::Lines(limit) => segment_lines >= limit,
            SplitRule::Kilobytes(limit) => segment_bytes + line_bytes > limit * 1000,
        };
        if over_budget && segment_lines > 0 {
            if let Some(mut w) = writer.take() {
                w.flush()?;
            }
        }

        if writer.is_none() {
            summary.segments += 1;
            let path = out_dir.join(format!("{:05}.txt", summary.segments));
            writer = Some(BufWriter::new(File::create(&path)?));
            segment_lines = 0;
            segment_bytes = 0;
        }
        let sink = writer.as_mut().expect("segment writer opened above");

        sink.write_all(line.as_bytes())?;
        sink.write_all(b"\n")?;
        segment_lines += 1;
        segment_bytes += line_bytes;
        summary.lines += 1;
    }
    if let Some(mut w) = writer.take() {
        w.flush()?;
    }

    // An empty corpus still produces one (empty) segment, mirroring the
    // numbering the downstream join stage expects.
    if summary.segments == 0 {
        summary.segments = 1;
        File::create(out_dir.join("00001.txt"))?;
    }

    stage_info!(
        "Split {:?} into {} segment(s), {} line(s)",
        input,
        summary.segments,
        summary.lines
    );
    Ok(summary)
}
