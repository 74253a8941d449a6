use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("cannot open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NormalizeSummary {
    pub bytes_read: u64,
    pub endings_rewritten: u64,
}

/// Rewrites `input` into `output` with every CRLF or lone CR collapsed to LF.
///
/// Streams chunk by chunk; a CR at a chunk boundary is handled by carrying
/// the "swallow the next LF" state across reads. The corpus scanner assumes
/// this stage has already run.
pub fn normalize_line_endings(
    input: &Path,
    output: &Path,
) -> Result<NormalizeSummary, NormalizeError> {
    let source = File::open(input).map_err(|source| NormalizeError::Open {
        path: input.to_path_buf(),
        source,
    })?;
    let sink = File::create(output).map_err(|source| NormalizeError::Open {
        path: output.to_path_buf(),
        source,
    })?;

    let mut reader = BufReader::new(source);
    let mut writer = BufWriter::new(sink);
    let mut summary = NormalizeSummary::default();
    let mut swallow_lf = false;

    loop {
        let chunk = reader.fill_buf()?;
        if chunk.is_empty() {
            break;
        }
        for &byte in chunk {
            summary.bytes_read += 1;
            match byte {
                b'\r' => {
                    writer.write_all(b"\n")?;
                    summary.endings_rewritten += 1;
                    swallow_lf = true;
                }
                b'\n' => {
                    if swallow_lf {
                        swallow_lf = false;
                    } else {
                        writer.write_all(b"\n")?;
                    }
                }
                other => {
                    swallow_lf = false;
                    writer.write_all(&[other])?;
                }
            }
        }
        let consumed = chunk.len();
        reader.consume(consumed);
    }
    writer.flush()?;
    Ok(summary)
}
