/// Delimiters recognized by the corpus tokenizer: space and horizontal tab.
pub const TERM_DELIMITERS: [char; 2] = [' ', '\t'];

/// Lazy iterator over the terms of one corpus line.
///
/// Runs of consecutive delimiters collapse to a single split point, so no
/// empty terms are produced; a line of only delimiters yields nothing. The
/// line itself is borrowed immutably and can be reused after tokenization.
pub struct Terms<'a> {
    inner: std::str::Split<'a, [char; 2]>,
}

impl<'a> Iterator for Terms<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        self.inner.by_ref().find(|piece| !piece.is_empty())
    }
}

/// Splits `line` into whitespace-delimited terms.
pub fn terms(line: &str) -> Terms<'_> {
    Terms {
        inner: line.split(TERM_DELIMITERS),
    }
}

pub trait TermCounter: Send + Sync {
    fn count(&self, line: &str) -> u64;
}

/// Counts terms with the same delimiter rules the frequency scan uses.
#[derive(Debug, Default, Clone, Copy)]
pub struct WhitespaceTermCounter;

impl TermCounter for WhitespaceTermCounter {
    fn count(&self, line: &str) -> u64 {
        terms(line).count() as u64
    }
}
