//! Doc-comment grammar and tag parser.
//!
//! ```text
//! /** ... */ token → Lexer<DocKind> → Tags → Tag { body, content }
//! ```
//!
//! The grammar in [`grammar`] never fails: unmatched input becomes text.
//! [`parse_comment`] turns one comment into its tags: the implicit
//! description, `@param`, `@return`, links, `@throws`, visibility markers,
//! and any other `@tag` as a generic content tag.

pub mod grammar;
mod kind;
mod parser;
mod tag;

pub use kind::DocKind;
pub use parser::{parse_comment, parse_text, Tags};
pub use pld_lexer_core::LexError;
pub use tag::{
    Content, ContentNode, Delimiter, DocExpr, ExprItem, LinkTarget, ParamTag, Reference, Tag,
    TagBody, Visibility,
};
