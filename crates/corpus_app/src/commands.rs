use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{bail, Context};
use corpus_engine::{scan_path, DocumentMode, Report};
use corpus_logging::stage_info;
use corpus_stages::{
    join_corpus, normalize_line_endings, split_corpus, strip_stop_words, word_counts_path,
    AtomicWriter, JoinConvention, JoinOptions, StopWordSet,
};

use crate::args::Command;
use crate::config::{self, AppConfig};

pub fn run(command: Command, config: &AppConfig) -> anyhow::Result<()> {
    match command {
        Command::Summary {
            input,
            mode,
            output,
        } => {
            // Mode validation happens before the corpus is opened.
            let mode = resolve_mode(mode.as_deref(), config)?;
            let table = scan_path(&input, mode)?;
            let report = Report::from_table(&table);
            stage_info!(
                "Summary of {:?}: {} term(s), {} token(s)",
                input,
                report.len(),
                table.token_count()
            );
            match output {
                Some(path) => {
                    let path = resolve_output_path(path, config);
                    let dir = match path.parent() {
                        Some(parent) if !parent.as_os_str().is_empty() => parent,
                        _ => Path::new("."),
                    };
                    let filename = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .context("output path has no file name")?;
                    AtomicWriter::new(dir).write(&filename, &report.render())?;
                }
                None => print!("{}", report.render()),
            }
            Ok(())
        }
        Command::DocCount { input, mode } => {
            let mode = resolve_mode(mode.as_deref(), config)?;
            let counts = word_counts_path(&input, mode)?;
            if counts.is_empty() {
                // Empty-corpus sentinel kept for compatibility with the
                // toolkit's other consumers.
                println!("0");
            } else {
                for count in counts {
                    println!("{count}");
                }
            }
            Ok(())
        }
        Command::Join {
            input_dir,
            output,
            reflow,
        } => {
            let convention = if reflow {
                JoinConvention::FileIsDocument
            } else {
                JoinConvention::LinesAreDocuments
            };
            let options = JoinOptions {
                convention,
                ..JoinOptions::default()
            };
            let summary = join_corpus(&input_dir, &output, options)?;
            println!(
                "joined {} file(s) into {} ({} document(s))",
                summary.files_joined,
                summary.output_path.display(),
                summary.documents
            );
            Ok(())
        }
        Command::Split {
            input,
            out_dir,
            rule,
        } => {
            let summary = split_corpus(&input, &out_dir, rule)?;
            println!(
                "split {} line(s) into {} segment(s)",
                summary.lines, summary.segments
            );
            Ok(())
        }
        Command::Filter { input, stop_words } => {
            let stop_words_path = stop_words
                .or_else(|| config.stop_words.clone())
                .context("no stop-word file given (use --stop-words or the config file)")?;
            let set = StopWordSet::from_path(&stop_words_path)?;
            if set.is_empty() {
                bail!(
                    "stop-word file {} contains no words",
                    stop_words_path.display()
                );
            }
            let summary = strip_stop_words(&input, &set)?;
            println!(
                "filtered {}: removed {} of {} term(s)",
                input.display(),
                summary.removed,
                summary.removed + summary.kept
            );
            Ok(())
        }
        Command::Normalize { input, output } => {
            let summary = normalize_line_endings(&input, &output)?;
            println!(
                "normalized {} byte(s), rewrote {} line ending(s)",
                summary.bytes_read, summary.endings_rewritten
            );
            Ok(())
        }
        Command::InitConfig => {
            let path = config::save(Path::new("."), &AppConfig::default())?;
            println!("wrote {}", path.display());
            Ok(())
        }
    }
}

/// Relative report paths land under the configured output directory;
/// absolute paths and unconfigured setups are taken as given.
fn resolve_output_path(path: PathBuf, config: &AppConfig) -> PathBuf {
    match &config.output_dir {
        Some(dir) if path.is_relative() => dir.join(path),
        _ => path,
    }
}

/// CLI `--mode` wins over the config default; both go through the same
/// parser so an unknown value is rejected before any I/O.
fn resolve_mode(cli: Option<&str>, config: &AppConfig) -> anyhow::Result<DocumentMode> {
    let value = cli.or(config.document_mode.as_deref());
    match value {
        Some(text) => Ok(DocumentMode::from_str(text)?),
        None => Ok(DocumentMode::default()),
    }
}
