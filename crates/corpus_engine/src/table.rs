use std::collections::{HashMap, HashSet};

use crate::document::DocumentId;

/// How document ids arrive at the table for any given term.
///
/// The sequential corpus scan delivers documents one after another, so a
/// per-term "last seen document" scalar is enough to deduplicate document
/// counts. If a caller feeds the table from interleaved documents (e.g. a
/// future sharded merge path), it must say so and pay for a per-term set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentOrder {
    /// All occurrences of a document are presented contiguously.
    #[default]
    Grouped,
    /// Documents may interleave arbitrarily.
    Interleaved,
}

/// Accumulated statistics for one distinct term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermStats {
    /// Occurrences of the term across the whole corpus.
    pub total_count: u64,
    /// Distinct documents containing at least one occurrence.
    pub document_count: u64,
    last_seen: DocumentId,
    /// Populated only under `DocumentOrder::Interleaved`.
    seen: Option<HashSet<DocumentId>>,
}

impl TermStats {
    fn first(document: DocumentId, order: DocumentOrder) -> Self {
        let seen = match order {
            DocumentOrder::Grouped => None,
            DocumentOrder::Interleaved => {
                let mut set = HashSet::new();
                set.insert(document);
                Some(set)
            }
        };
        Self {
            total_count: 1,
            document_count: 1,
            last_seen: document,
            seen,
        }
    }

    fn record(&mut self, document: DocumentId) {
        self.total_count += 1;
        match &mut self.seen {
            None => {
                if self.last_seen != document {
                    self.document_count += 1;
                }
            }
            Some(seen) => {
                if seen.insert(document) {
                    self.document_count += 1;
                }
            }
        }
        self.last_seen = document;
    }

    /// The document id most recently recorded for this term.
    pub fn last_seen_document(&self) -> DocumentId {
        self.last_seen
    }
}

#[derive(Debug, Clone)]
struct TermEntry {
    term: String,
    stats: TermStats,
}

/// Mapping from term to accumulated statistics, built incrementally.
///
/// Lookup is hashed on the term text (amortized O(1) per token) while
/// first-occurrence order is preserved for deterministic reporting. The
/// table is an explicit value owned by one scan; nothing survives a run
/// except the report derived from it.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    entries: Vec<TermEntry>,
    index: HashMap<String, usize>,
    order: DocumentOrder,
    token_count: u64,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_order(order: DocumentOrder) -> Self {
        Self {
            order,
            ..Self::default()
        }
    }

    /// Records one occurrence of `term` inside `document`.
    ///
    /// Total count always increments; document count increments only the
    /// first time the term is seen in that document.
    pub fn record(&mut self, term: &str, document: DocumentId) {
        self.token_count += 1;
        if let Some(&slot) = self.index.get(term) {
            self.entries[slot].stats.record(document);
        } else {
            self.index.insert(term.to_string(), self.entries.len());
            self.entries.push(TermEntry {
                term: term.to_string(),
                stats: TermStats::first(document, self.order),
            });
        }
    }

    pub fn get(&self, term: &str) -> Option<&TermStats> {
        self.index.get(term).map(|&slot| &self.entries[slot].stats)
    }

    /// Iterates entries in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TermStats)> {
        self.entries
            .iter()
            .map(|entry| (entry.term.as_str(), &entry.stats))
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total tokens recorded so far; equals the sum of all total counts.
    pub fn token_count(&self) -> u64 {
        self.token_count
    }

    pub fn order(&self) -> DocumentOrder {
        self.order
    }
}
