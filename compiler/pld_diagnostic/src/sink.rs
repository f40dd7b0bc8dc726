//! Diagnostic sinks.
//!
//! Stages take `&mut dyn DiagnosticSink` and never touch process-wide state.
//! [`DiagnosticQueue`] collects for later inspection (tests, per-file results
//! in parallel runs); [`TracingSink`] forwards straight to `tracing`.

use pld_ir::PositionFormat;

use crate::{Diagnostic, Severity};

/// Receiver for diagnostics.
pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: Diagnostic);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn emit(&mut self, diagnostic: Diagnostic) {
        (**self).emit(diagnostic);
    }
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Collects diagnostics in emission order, dropping exact duplicates.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticQueue {
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
}

impl DiagnosticQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of error-severity diagnostics collected.
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Warning-severity diagnostics only.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    /// Forward everything collected to another sink, in order.
    pub fn drain_into(&mut self, sink: &mut dyn DiagnosticSink) {
        self.error_count = 0;
        for diagnostic in self.diagnostics.drain(..) {
            sink.emit(diagnostic);
        }
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl DiagnosticSink for DiagnosticQueue {
    fn emit(&mut self, diagnostic: Diagnostic) {
        if self.diagnostics.contains(&diagnostic) {
            return;
        }
        if diagnostic.is_error() {
            self.error_count += 1;
        }
        self.diagnostics.push(diagnostic);
    }
}

/// Forwards each diagnostic as a `tracing` event.
///
/// Errors become `error!`, warnings `warn!`, notes `info!`. The event
/// carries the code as a field and the rendered text as its message.
#[derive(Copy, Clone, Debug, Default)]
pub struct TracingSink {
    format: PositionFormat,
}

impl TracingSink {
    pub fn new(format: PositionFormat) -> Self {
        TracingSink { format }
    }
}

impl DiagnosticSink for TracingSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        let code = diagnostic.code.as_str();
        let text = diagnostic.display(self.format).to_string();
        match diagnostic.severity {
            Severity::Error => tracing::error!(code, "{text}"),
            Severity::Warning => tracing::warn!(code, "{text}"),
            Severity::Note => tracing::info!(code, "{text}"),
        }
    }
}

#[cfg(test)]
mod tests;
