use std::str::FromStr;

use thiserror::Error;

pub type DocumentId = u64;

/// Decides which document a corpus line belongs to.
///
/// This is the only place document semantics are decided; everything
/// downstream treats document ids as opaque integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentMode {
    /// Each input line is its own document (id = zero-based line index).
    #[default]
    PerLine,
    /// The entire input is one document (id = 0 for every line).
    Single,
}

impl DocumentMode {
    pub fn document_id_for(self, line_index: u64) -> DocumentId {
        match self {
            DocumentMode::PerLine => line_index,
            DocumentMode::Single => 0,
        }
    }
}

/// Rejection of an unrecognized document mode value, raised before any
/// corpus I/O is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized document mode {value:?} (expected \"single\" or \"per-line\")")]
pub struct ModeParseError {
    pub value: String,
}

impl FromStr for DocumentMode {
    type Err = ModeParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "single" => Ok(DocumentMode::Single),
            "per-line" | "per_line" | "perline" => Ok(DocumentMode::PerLine),
            other => Err(ModeParseError {
                value: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DocumentMode;

    #[test]
    fn per_line_ids_follow_line_index() {
        assert_eq!(DocumentMode::PerLine.document_id_for(0), 0);
        assert_eq!(DocumentMode::PerLine.document_id_for(41), 41);
    }

    #[test]
    fn single_mode_is_constant_zero() {
        assert_eq!(DocumentMode::Single.document_id_for(0), 0);
        assert_eq!(DocumentMode::Single.document_id_for(99), 0);
    }

    #[test]
    fn parse_accepts_known_modes_only() {
        assert_eq!("single".parse(), Ok(DocumentMode::Single));
        assert_eq!("per-line".parse(), Ok(DocumentMode::PerLine));
        assert_eq!("per_line".parse(), Ok(DocumentMode::PerLine));
        assert!("corpus".parse::<DocumentMode>().is_err());
    }
}
