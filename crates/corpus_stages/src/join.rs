use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use corpus_logging::stage_info;
use serde_json::json;
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::persist::{AtomicWriter, PersistError};

#[derive(Debug, Error)]
pub enum JoinError {
    #[error("cannot read input directory {path:?}: {source}")]
    InputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// How the documents inside each joined file are delimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinConvention {
    /// Files already hold one document per line; lines pass through.
    #[default]
    LinesAreDocuments,
    /// Each file is one document: its lines are reflowed onto a single
    /// space-joined line.
    FileIsDocument,
}

#[derive(Debug, Clone)]
pub struct JoinOptions {
    pub convention: JoinConvention,
    /// When set, a JSON manifest with this name is written next to the
    /// output corpus.
    pub manifest_filename: Option<String>,
}

impl Default for JoinOptions {
    fn default() -> Self {
        Self {
            convention: JoinConvention::default(),
            manifest_filename: Some("join_manifest.json".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinSummary {
    pub files_joined: usize,
    pub documents: u64,
    pub output_path: PathBuf,
    pub manifest_path: Option<PathBuf>,
}

/// Concatenates every `.txt` file under `input_dir`, sorted by file name,
/// into one corpus at `output_path`.
///
/// The corpus is written through a temp file and renamed into place, so an
/// interrupted join never leaves a half-built corpus.
pub fn join_corpus(
    input_dir: &Path,
    output_path: &Path,
    options: JoinOptions,
) -> Result<JoinSummary, JoinError> {
    let entries = fs::read_dir(input_dir).map_err(|source| JoinError::InputDir {
        path: input_dir.to_path_buf(),
        source,
    })?;
    let mut files: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("txt"))
        .filter(|p| p.as_path() != output_path)
        .collect();
    files.sort_by_key(|p| p.file_name().map(|n| n.to_os_string()));

    let out_dir = crate::persist::parent_or_cwd(output_path);
    let mut tmp = NamedTempFile::new_in(out_dir)?;
    let mut documents: u64 = 0;

    for path in &files {
        let file = File::open(path)?;
        match options.convention {
            JoinConvention::LinesAreDocuments => {
                for line in BufReader::new(file).lines() {
                    let line = line?;
                    tmp.write_all(line.as_bytes())?;
                    tmp.write_all(b"\n")?;
                    documents += 1;
                }
            }
            JoinConvention::FileIsDocument => {
                let mut first = true;
                for line in BufReader::new(file).lines() {
                    let line = line?;
                    if !first {
                        tmp.write_all(b" ")?;
                    }
                    tmp.write_all(line.as_bytes())?;
                    first = false;
                }
                tmp.write_all(b"\n")?;
                documents += 1;
            }
        }
    }
    tmp.flush()?;
    if output_path.exists() {
        fs::remove_file(output_path)?;
    }
    tmp.persist(output_path).map_err(|e| JoinError::Io(e.error))?;

    let manifest_path = if let Some(name) = &options.manifest_filename {
        let manifest = json!({
            "generated_utc": chrono::Utc::now().to_rfc3339(),
            "file_count": files.len(),
            "doc_count": documents,
            "files": files
                .iter()
                .filter_map(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .collect::<Vec<_>>(),
        });
        let writer = AtomicWriter::new(out_dir);
        Some(writer.write(name, &manifest.to_string())?)
    } else {
        None
    };

    stage_info!(
        "Joined {} file(s) from {:?} into {:?} ({} document(s))",
        files.len(),
        input_dir,
        output_path,
        documents
    );
    Ok(JoinSummary {
        files_joined: files.len(),
        documents,
        output_path: output_path.to_path_buf(),
        manifest_path,
    })
}
