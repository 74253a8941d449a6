use crate::table::FrequencyTable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermSummary {
    pub term: String,
    pub total_count: u64,
    pub document_count: u64,
}

/// Deterministic rendering of a finished frequency table.
///
/// Entries appear in first-occurrence order, so two runs over the same
/// input produce byte-identical output. Hash-iteration order is never
/// exposed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Report {
    entries: Vec<TermSummary>,
}

impl Report {
    pub fn from_table(table: &FrequencyTable) -> Self {
        let entries = table
            .iter()
            .map(|(term, stats)| TermSummary {
                term: term.to_string(),
                total_count: stats.total_count,
                document_count: stats.document_count,
            })
            .collect();
        Self { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = &TermSummary> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One `<term> <total> <docs>` line per entry, matching the toolkit's
    /// plain-text output convention. Empty report renders as the empty
    /// string.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&entry.term);
            out.push(' ');
            out.push_str(&entry.total_count.to_string());
            out.push(' ');
            out.push_str(&entry.document_count.to_string());
            out.push('\n');
        }
        out
    }
}
