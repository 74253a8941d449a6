use std::io::Cursor;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;

use corpus_engine::{
    scan, scan_path, scan_with_cancel, scan_with_options, DocumentMode, DocumentOrder, Report,
    ScanError, ScanOptions,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(corpus_logging::initialize_for_tests);
}

fn scan_str(input: &str, mode: DocumentMode) -> corpus_engine::FrequencyTable {
    scan(Cursor::new(input), mode).unwrap()
}

#[test]
fn per_line_documents_count_occurrences_and_documents() {
    init_logging();
    let table = scan_str("a b a\na c\n", DocumentMode::PerLine);
    let report = Report::from_table(&table);

    assert_eq!(report.render(), "a 3 2\nb 1 1\nc 1 1\n");
}

#[test]
fn single_document_mode_collapses_document_counts() {
    init_logging();
    let table = scan_str("a b a\na c\n", DocumentMode::Single);
    let report = Report::from_table(&table);

    assert_eq!(report.render(), "a 3 1\nb 1 1\nc 1 1\n");
    for entry in report.iter() {
        assert_eq!(entry.document_count, 1);
    }
}

#[test]
fn total_counts_sum_to_token_count() {
    init_logging();
    let input = "the quick brown fox\nthe lazy dog\n\nthe end\n";
    let table = scan_str(input, DocumentMode::PerLine);

    let expected_tokens: u64 = input
        .lines()
        .map(|line| line.split_whitespace().count() as u64)
        .sum();
    let summed: u64 = table.iter().map(|(_, stats)| stats.total_count).sum();

    assert_eq!(summed, expected_tokens);
    assert_eq!(table.token_count(), expected_tokens);
}

#[test]
fn document_count_never_exceeds_total_count() {
    init_logging();
    let table = scan_str("x y x\nx z\ny y y\n", DocumentMode::PerLine);
    for (_, stats) in table.iter() {
        assert!(stats.document_count <= stats.total_count);
        assert!(stats.document_count <= 3);
    }
}

#[test]
fn empty_input_yields_empty_report_without_error() {
    init_logging();
    let table = scan_str("", DocumentMode::PerLine);
    assert!(table.is_empty());

    let report = Report::from_table(&table);
    assert!(report.is_empty());
    assert_eq!(report.render(), "");
}

#[test]
fn whitespace_only_lines_contribute_nothing() {
    init_logging();
    let plain = scan_str("a b\nc\n", DocumentMode::PerLine);
    let padded = scan_str("a b\n \t \nc\n", DocumentMode::PerLine);

    // The blank line consumes a document id but no term bookkeeping moves.
    assert_eq!(plain.token_count(), padded.token_count());
    assert_eq!(plain.len(), padded.len());
    assert_eq!(padded.get("a").unwrap().document_count, 1);
}

#[test]
fn missing_final_newline_still_counts_last_line() {
    init_logging();
    let table = scan_str("a\nb", DocumentMode::PerLine);
    assert_eq!(table.get("b").unwrap().total_count, 1);
    assert_eq!(table.get("b").unwrap().last_seen_document(), 1);
}

#[test]
fn tabs_delimit_terms() {
    init_logging();
    let table = scan_str("a\tb\t\ta\n", DocumentMode::PerLine);
    assert_eq!(table.get("a").unwrap().total_count, 2);
    assert_eq!(table.get("b").unwrap().total_count, 1);
}

#[test]
fn repeated_runs_render_identically() {
    init_logging();
    let input = "gamma beta gamma\nalpha beta\n";
    let first = Report::from_table(&scan_str(input, DocumentMode::PerLine)).render();
    let second = Report::from_table(&scan_str(input, DocumentMode::PerLine)).render();

    assert_eq!(first, second);
    // First-occurrence order, not alphabetical.
    assert!(first.starts_with("gamma 2 1\n"));
}

#[test]
fn interleaved_order_flows_through_scan_options() {
    init_logging();
    let options = ScanOptions {
        mode: DocumentMode::PerLine,
        order: DocumentOrder::Interleaved,
    };
    let table = scan_with_options(Cursor::new("a\nb a\n"), options, None).unwrap();

    assert_eq!(table.order(), DocumentOrder::Interleaved);
    assert_eq!(table.get("a").unwrap().document_count, 2);
    assert_eq!(table.get("b").unwrap().document_count, 1);
}

#[test]
fn missing_file_reports_open_error_with_path() {
    init_logging();
    let err = scan_path(
        std::path::Path::new("/nonexistent/corpus.txt"),
        DocumentMode::PerLine,
    )
    .unwrap_err();
    match err {
        ScanError::Open { path, .. } => {
            assert!(path.to_string_lossy().contains("corpus.txt"));
        }
        other => panic!("expected open error, got {other:?}"),
    }
}

/// Yields one good line, then fails on the next read.
struct FailingReader {
    handed_out: bool,
}

impl std::io::Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if self.handed_out {
            return Err(std::io::Error::new(
                std::io::ErrorKind::Other,
                "disk gone",
            ));
        }
        self.handed_out = true;
        let bytes = b"a b\n";
        buf[..bytes.len()].copy_from_slice(bytes);
        Ok(bytes.len())
    }
}

#[test]
fn mid_stream_read_failure_aborts_with_no_partial_table() {
    init_logging();
    let reader = std::io::BufReader::new(FailingReader { handed_out: false });

    let result = scan(reader, DocumentMode::PerLine);

    // The whole run aborts; the terms from the good first line are gone.
    let err = result.unwrap_err();
    assert!(matches!(err, ScanError::Read { line: 1, .. }));
    assert!(err.to_string().contains("line 1"));
}

#[test]
fn cancellation_aborts_without_partial_table() {
    init_logging();
    let cancel = AtomicBool::new(true);
    cancel.store(true, Ordering::Relaxed);

    let err = scan_with_cancel(Cursor::new("a b\nc\n"), DocumentMode::PerLine, &cancel)
        .unwrap_err();
    assert!(matches!(err, ScanError::Cancelled { lines: 0 }));
}
