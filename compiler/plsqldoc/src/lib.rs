//! PL/SQL documentation extraction.
//!
//! The driver runs one pipeline per file and turns the result into an
//! [`Entity`] tree that renderers consume:
//!
//! ```text
//! source ─▶ pld_lexer ─▶ pld_parse ─▶ pld_resolve ─▶ Document ─▶ Entity
//!                                         │
//!                                         └─ pld_doc per doc comment
//! ```
//!
//! Statements are pulled one at a time: the resolver consumes each syntax
//! tree as soon as the parser finishes it.
//!
//! # Errors
//!
//! A lex or syntax error ends its file with a [`FileError`]; other files of
//! a [`document_all`] run are unaffected. Everything else is a warning sent
//! to the [`DiagnosticSink`](pld_diagnostic::DiagnosticSink).
//!
//! # Tracing
//!
//! Set `RUST_LOG` (e.g. `RUST_LOG=pld_parse=debug`) and call
//! [`init_tracing`]. `PLSQLDOC_TRACE_TREE=1` switches to indented span
//! output.
//!
//! # Layout
//!
//! - `config.rs`: [`DocConfig`]
//! - `error.rs`: [`FileError`]
//! - `pipeline.rs`: per-file and multi-file entry points
//! - `entity.rs`: the serializable entity model

mod config;
mod entity;
mod error;
mod pipeline;

use std::sync::Once;

pub use config::DocConfig;
pub use entity::{
    Annotation, Entity, LinkEntity, Members, Overloads, ParamEntity, ReturnEntity, ThrowsEntity,
};
pub use error::FileError;
pub use pipeline::{document_all, document_file, document_source, Document, FileOutcome, SourceFile};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing output.
///
/// Safe to call more than once; only the first call installs a subscriber,
/// and only when `RUST_LOG` is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let tree = std::env::var_os("PLSQLDOC_TRACE_TREE").is_some();
        tracing_subscriber::registry()
            .with(EnvFilter::from_default_env())
            .with((!tree).then(|| fmt::layer().with_target(true).with_level(true)))
            .with(tree.then(|| {
                tracing_tree::HierarchicalLayer::new(2)
                    .with_targets(true)
                    .with_bracketed_fields(true)
            }))
            .init();
    });
}
