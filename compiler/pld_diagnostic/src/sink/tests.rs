use pld_ir::Position;

use super::*;
use crate::ErrorCode;
use pretty_assertions::assert_eq;

fn warning(line: u32) -> Diagnostic {
    Diagnostic::warning(ErrorCode::W2001)
        .with_message("unresolved")
        .at(Position::new(line, 1))
}

#[test]
fn test_queue_counts_errors() {
    let mut queue = DiagnosticQueue::new();
    queue.emit(warning(1));
    queue.emit(Diagnostic::error(ErrorCode::E1001).with_message("boom"));
    assert_eq!(queue.len(), 2);
    assert_eq!(queue.error_count(), 1);
    assert!(queue.has_errors());
    assert_eq!(queue.warnings().count(), 1);
}

#[test]
fn test_queue_drops_exact_duplicates() {
    let mut queue = DiagnosticQueue::new();
    queue.emit(warning(1));
    queue.emit(warning(1));
    queue.emit(warning(2));
    assert_eq!(queue.len(), 2);
}

#[test]
fn test_drain_into_preserves_order() {
    let mut queue = DiagnosticQueue::new();
    queue.emit(warning(3));
    queue.emit(warning(1));
    let mut out: Vec<Diagnostic> = Vec::new();
    queue.drain_into(&mut out);
    assert!(queue.is_empty());
    let lines: Vec<u32> = out
        .iter()
        .filter_map(|d| d.position.as_ref().map(|p| p.line))
        .collect();
    assert_eq!(lines, vec![3, 1]);
}

#[test]
fn test_mut_ref_is_a_sink() {
    fn report(sink: &mut dyn DiagnosticSink) {
        sink.emit(warning(9));
    }
    let mut queue = DiagnosticQueue::new();
    let mut borrowed = &mut queue;
    report(&mut borrowed);
    assert_eq!(queue.len(), 1);
}

#[test]
fn test_tracing_sink_accepts_all_severities() {
    let mut sink = TracingSink::new(PositionFormat::LineColumn);
    sink.emit(warning(1));
    sink.emit(Diagnostic::error(ErrorCode::E0001).with_message("bad"));
}
