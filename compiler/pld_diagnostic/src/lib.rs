//! Diagnostics for the plsqldoc pipeline.
//!
//! Every stage reports through an injected [`DiagnosticSink`] instead of a
//! global logger:
//! - fatal lex and syntax errors, reported once per failed file
//! - recoverable warnings (unresolved constructs, orphan tags) that never
//!   stop processing
//!
//! Each [`Diagnostic`] carries an [`ErrorCode`] for searchability and an
//! optional [`Position`](pld_ir::Position) rendered in the configured
//! [`PositionFormat`](pld_ir::PositionFormat).

mod diagnostic;
mod error_code;
mod sink;

pub use diagnostic::{Diagnostic, DiagnosticDisplay, Severity};
pub use error_code::ErrorCode;
pub use sink::{DiagnosticQueue, DiagnosticSink, TracingSink};
