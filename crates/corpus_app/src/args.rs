use std::path::PathBuf;

use corpus_stages::SplitRule;
use thiserror::Error;

pub const USAGE: &str = "\
Usage: corpus_app <command> [options]

Commands:
  summary <corpus> [--mode single|per-line] [--output <file>]
      Report `<term> <total> <docs>` for every distinct term.
  doccount <corpus> [--mode single|per-line]
      Report the word count of each document.
  join <dir> <output> [--reflow]
      Concatenate the .txt files of <dir> into one corpus.
  split <corpus> <out-dir> (--lines <n> | --kb <n>)
      Partition a corpus into numbered segments.
  filter <corpus> [--stop-words <file>]
      Strip stop words from a corpus in place.
  normalize <input> <output>
      Rewrite CRLF/CR line endings as LF.
  init-config
      Write a default corpus_mill.ron in the current directory.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Summary {
        input: PathBuf,
        mode: Option<String>,
        output: Option<PathBuf>,
    },
    DocCount {
        input: PathBuf,
        mode: Option<String>,
    },
    Join {
        input_dir: PathBuf,
        output: PathBuf,
        reflow: bool,
    },
    Split {
        input: PathBuf,
        out_dir: PathBuf,
        rule: SplitRule,
    },
    Filter {
        input: PathBuf,
        stop_words: Option<PathBuf>,
    },
    Normalize {
        input: PathBuf,
        output: PathBuf,
    },
    InitConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgsError {
    #[error("missing subcommand")]
    MissingCommand,
    #[error("unknown subcommand {0:?}")]
    UnknownCommand(String),
    #[error("missing value for {0}")]
    MissingValue(&'static str),
    #[error("unexpected argument {0:?}")]
    Unexpected(String),
    #[error("invalid count {0:?}")]
    InvalidCount(String),
    #[error("split needs exactly one of --lines or --kb")]
    BadSplitRule,
}

pub fn parse(raw: &[String]) -> Result<Command, ArgsError> {
    let (command, rest) = raw.split_first().ok_or(ArgsError::MissingCommand)?;
    match command.as_str() {
        "summary" => parse_summary(rest),
        "doccount" => parse_doccount(rest),
        "join" => parse_join(rest),
        "split" => parse_split(rest),
        "filter" => parse_filter(rest),
        "normalize" => parse_normalize(rest),
        "init-config" => {
            expect_no_more(rest)?;
            Ok(Command::InitConfig)
        }
        other => Err(ArgsError::UnknownCommand(other.to_string())),
    }
}

fn parse_summary(rest: &[String]) -> Result<Command, ArgsError> {
    let mut positional = Vec::new();
    let mut mode = None;
    let mut output = None;
    let mut iter = rest.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--mode" => mode = Some(take_value(&mut iter, "--mode")?),
            "--output" => output = Some(PathBuf::from(take_value(&mut iter, "--output")?)),
            _ => positional.push(arg.clone()),
        }
    }
    let input = single_positional(positional)?;
    Ok(Command::Summary {
        input,
        mode,
        output,
    })
}

fn parse_doccount(rest: &[String]) -> Result<Command, ArgsError> {
    let mut positional = Vec::new();
    let mut mode = None;
    let mut iter = rest.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--mode" => mode = Some(take_value(&mut iter, "--mode")?),
            _ => positional.push(arg.clone()),
        }
    }
    let input = single_positional(positional)?;
    Ok(Command::DocCount { input, mode })
}

fn parse_join(rest: &[String]) -> Result<Command, ArgsError> {
    let mut positional = Vec::new();
    let mut reflow = false;
    for arg in rest {
        match arg.as_str() {
            "--reflow" => reflow = true,
            _ => positional.push(arg.clone()),
        }
    }
    let (input_dir, output) = two_positionals(positional)?;
    Ok(Command::Join {
        input_dir,
        output,
        reflow,
    })
}

fn parse_split(rest: &[String]) -> Result<Command, ArgsError> {
    let mut positional = Vec::new();
    let mut rule = None;
    let mut iter = rest.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--lines" => {
                let count = parse_count(&take_value(&mut iter, "--lines")?)?;
                set_rule(&mut rule, SplitRule::Lines(count))?;
            }
            "--kb" => {
                let count = parse_count(&take_value(&mut iter, "--kb")?)?;
                set_rule(&mut rule, SplitRule::Kilobytes(count))?;
            }
            _ => positional.push(arg.clone()),
        }
    }
    let (input, out_dir) = two_positionals(positional)?;
    let rule = rule.ok_or(ArgsError::BadSplitRule)?;
    Ok(Command::Split {
        input,
        out_dir,
        rule,
    })
}

fn parse_filter(rest: &[String]) -> Result<Command, ArgsError> {
    let mut positional = Vec::new();
    let mut stop_words = None;
    let mut iter = rest.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--stop-words" => {
                stop_words = Some(PathBuf::from(take_value(&mut iter, "--stop-words")?))
            }
            _ => positional.push(arg.clone()),
        }
    }
    let input = single_positional(positional)?;
    Ok(Command::Filter { input, stop_words })
}

fn parse_normalize(rest: &[String]) -> Result<Command, ArgsError> {
    let (input, output) = two_positionals(rest.to_vec())?;
    Ok(Command::Normalize { input, output })
}

fn take_value<'a>(
    iter: &mut std::slice::Iter<'a, String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    iter.next()
        .map(|value| value.clone())
        .ok_or(ArgsError::MissingValue(flag))
}

fn parse_count(value: &str) -> Result<u64, ArgsError> {
    value
        .parse::<u64>()
        .map_err(|_| ArgsError::InvalidCount(value.to_string()))
}

fn set_rule(slot: &mut Option<SplitRule>, rule: SplitRule) -> Result<(), ArgsError> {
    if slot.is_some() {
        return Err(ArgsError::BadSplitRule);
    }
    *slot = Some(rule);
    Ok(())
}

fn single_positional(mut positional: Vec<String>) -> Result<PathBuf, ArgsError> {
    match positional.len() {
        0 => Err(ArgsError::MissingValue("<corpus>")),
        1 => Ok(PathBuf::from(positional.remove(0))),
        _ => Err(ArgsError::Unexpected(positional.remove(1))),
    }
}

fn two_positionals(mut positional: Vec<String>) -> Result<(PathBuf, PathBuf), ArgsError> {
    match positional.len() {
        0 | 1 => Err(ArgsError::MissingValue("<input> <output>")),
        2 => {
            let second = PathBuf::from(positional.remove(1));
            let first = PathBuf::from(positional.remove(0));
            Ok((first, second))
        }
        _ => Err(ArgsError::Unexpected(positional.remove(2))),
    }
}

fn expect_no_more(rest: &[String]) -> Result<(), ArgsError> {
    match rest.first() {
        Some(extra) => Err(ArgsError::Unexpected(extra.clone())),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse, ArgsError, Command};
    use corpus_stages::SplitRule;

    fn strings(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn summary_with_mode_and_output() {
        let command = parse(&strings(&[
            "summary",
            "corpus.txt",
            "--mode",
            "single",
            "--output",
            "report.txt",
        ]))
        .unwrap();
        assert_eq!(
            command,
            Command::Summary {
                input: "corpus.txt".into(),
                mode: Some("single".to_string()),
                output: Some("report.txt".into()),
            }
        );
    }

    #[test]
    fn split_requires_exactly_one_rule() {
        let err = parse(&strings(&["split", "c.txt", "out"])).unwrap_err();
        assert_eq!(err, ArgsError::BadSplitRule);

        let err = parse(&strings(&[
            "split", "c.txt", "out", "--lines", "5", "--kb", "2",
        ]))
        .unwrap_err();
        assert_eq!(err, ArgsError::BadSplitRule);

        let command = parse(&strings(&["split", "c.txt", "out", "--kb", "64"])).unwrap();
        assert_eq!(
            command,
            Command::Split {
                input: "c.txt".into(),
                out_dir: "out".into(),
                rule: SplitRule::Kilobytes(64),
            }
        );
    }

    #[test]
    fn unknown_subcommand_is_rejected() {
        let err = parse(&strings(&["tokenize", "c.txt"])).unwrap_err();
        assert_eq!(err, ArgsError::UnknownCommand("tokenize".to_string()));
    }

    #[test]
    fn missing_subcommand_is_rejected() {
        assert_eq!(parse(&[]).unwrap_err(), ArgsError::MissingCommand);
    }

    #[test]
    fn join_reflow_flag() {
        let command = parse(&strings(&["join", "docs", "corpus.txt", "--reflow"])).unwrap();
        assert_eq!(
            command,
            Command::Join {
                input_dir: "docs".into(),
                output: "corpus.txt".into(),
                reflow: true,
            }
        );
    }
}
