//! Per-file pipeline and the multi-file driver.

use std::sync::Arc;

use pld_diagnostic::{Diagnostic, DiagnosticSink};
use pld_parse::SyntaxTree;
use pld_resolve::{CodeContext, Comment, ContextId, Resolution, Resolver};
use rayon::prelude::*;

use crate::entity::{self, Entity};
use crate::{DocConfig, FileError};

const BOM: char = '\u{feff}';

/// Everything documented in one file.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub filename: Option<Arc<str>>,
    /// One tree per top-level statement, in source order.
    pub trees: Vec<SyntaxTree>,
    pub resolution: Resolution,
}

impl Document {
    pub fn context(&self, id: ContextId) -> &CodeContext {
        self.resolution.context(id)
    }

    /// Comment records in source order.
    pub fn comments(&self) -> &[Comment] {
        &self.resolution.comments
    }

    /// Top-level contexts in source order.
    pub fn units(&self) -> impl Iterator<Item = (ContextId, &CodeContext)> {
        self.resolution
            .units
            .iter()
            .map(|&id| (id, self.resolution.context(id)))
    }

    /// Entity trees of the top-level units.
    pub fn entities(&self, config: &DocConfig) -> Vec<Entity> {
        entity::build(self, config)
    }
}

/// Document PL/SQL source without a filename.
pub fn document_source(
    source: &str,
    config: &DocConfig,
    sink: &mut dyn DiagnosticSink,
) -> Result<Document, FileError> {
    document_file(source, None, config, sink)
}

/// Document one file.
///
/// A leading byte order mark is skipped. Warnings and, on failure, the
/// fatal error go to `sink`.
#[tracing::instrument(level = "debug", skip_all, fields(file = filename.as_deref().unwrap_or("<source>")))]
pub fn document_file(
    source: &str,
    filename: Option<Arc<str>>,
    config: &DocConfig,
    sink: &mut dyn DiagnosticSink,
) -> Result<Document, FileError> {
    let source = source.strip_prefix(BOM).unwrap_or(source);

    let mut resolver = Resolver::new(config.resolve_config(), &mut *sink);
    let mut trees = Vec::new();
    let mut failure = None;
    for statement in pld_parse::parse_with_filename(source, filename.clone()) {
        match statement {
            Ok(tree) => {
                resolver.resolve_tree(&tree);
                trees.push(tree);
            }
            Err(err) => {
                failure = Some(err);
                break;
            }
        }
    }
    let resolution = resolver.finish();

    if let Some(err) = failure {
        let err = FileError::new(err, config.position_format);
        tracing::debug!(error = %err, "file failed");
        sink.emit(err.to_diagnostic());
        return Err(err);
    }
    tracing::debug!(statements = trees.len(), "documented");
    Ok(Document {
        filename,
        trees,
        resolution,
    })
}

/// One input of a [`document_all`] run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFile {
    pub name: Arc<str>,
    pub text: String,
}

impl SourceFile {
    pub fn new(name: impl Into<Arc<str>>, text: impl Into<String>) -> Self {
        SourceFile {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Result of one file in a [`document_all`] run.
#[derive(Clone, Debug, PartialEq)]
pub struct FileOutcome {
    pub name: Arc<str>,
    pub result: Result<Document, FileError>,
    /// Every diagnostic of this file, the fatal one included.
    pub diagnostics: Vec<Diagnostic>,
}

impl FileOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Document several files, one independent pipeline each.
///
/// Outcomes keep the order of `sources`. With [`DocConfig::parallel`] the
/// files are spread over the rayon pool.
#[tracing::instrument(level = "debug", skip_all, fields(files = sources.len()))]
pub fn document_all(sources: &[SourceFile], config: &DocConfig) -> Vec<FileOutcome> {
    let run = |file: &SourceFile| {
        let mut diagnostics = Vec::new();
        let result = document_file(&file.text, Some(file.name.clone()), config, &mut diagnostics);
        FileOutcome {
            name: file.name.clone(),
            result,
            diagnostics,
        }
    };
    if config.parallel {
        sources.par_iter().map(run).collect()
    } else {
        sources.iter().map(run).collect()
    }
}
