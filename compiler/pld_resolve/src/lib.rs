//! Context resolution.
//!
//! Walks PL/SQL syntax trees, parses the doc comments attached to every
//! nameable node, and maps each documented construct to a [`CodeContext`].
//!
//! ```text
//! SyntaxTree ─▶ Resolver ─▶ Resolution { contexts, comments, units }
//!                  │
//!                  └─ pld_doc::parse_comment per leading doc comment
//! ```
//!
//! # Ids
//!
//! Methods inside a container get `NAME-n`, counting overloads of the same
//! name from 1 in declaration order. Parameters and fields get
//! `PARENT_ID.NAME`. Everything else uses its name.
//!
//! # Binding
//!
//! `@param` binds to parameters (or record fields, or object attributes),
//! `@return` to a function's return, `@throws` to an exception declared in
//! an enclosing container, a predefined exception, or an error code.
//! Throws are bound when their container closes, so forward references
//! resolve.
//!
//! # Layout
//!
//! - `context.rs`: the context model and arena
//! - `comment.rs`: per-node records
//! - `ids.rs`: overload id generation
//! - `resolver/`: traversal (`mod.rs`), context construction (`declare.rs`),
//!   tag binding (`bind.rs`)

mod comment;
mod context;
mod ids;
mod resolver;

pub use comment::{CodeRef, Comment};
pub use context::{
    CodeContext, ContextArena, ContextId, ContextKind, Detail, MethodDetail, ParameterDetail,
    RecordDetail, ReturnDoc, ThrowsDoc, ThrowsTarget, TypedDetail, UnitDetail,
};
pub use ids::IdGenerator;
pub use resolver::Resolver;

/// Resolver settings.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ResolveConfig {
    /// Report `@param` and `@return` tags with nothing to bind to.
    pub warn_orphan_tags: bool,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        ResolveConfig {
            warn_orphan_tags: true,
        }
    }
}

/// Everything resolved from one file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Resolution {
    pub contexts: ContextArena,
    /// One per nameable node, in source order.
    pub comments: Vec<Comment>,
    /// Top-level contexts, in source order.
    pub units: Vec<ContextId>,
}

impl Resolution {
    pub fn context(&self, id: ContextId) -> &CodeContext {
        self.contexts.get(id)
    }

    /// The comment record of a context.
    pub fn comment_for(&self, id: ContextId) -> Option<&Comment> {
        self.comments
            .iter()
            .find(|comment| comment.context == Some(id))
    }

    /// Top-level context by name, e.g. `EMP_API`.
    pub fn unit(&self, name: &str) -> Option<ContextId> {
        self.units
            .iter()
            .copied()
            .find(|&id| self.contexts.get(id).name.to_string() == name)
    }
}
