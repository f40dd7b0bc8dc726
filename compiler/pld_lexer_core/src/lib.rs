//! Table-driven tokenizer engine.
//!
//! A [`Grammar`] is a set of named states. Each state holds an ordered list
//! of rules (literal or regular expression) and an optional fallback for
//! input no rule matches. Rules may move between states: `push` enters a
//! nested state, `pop` returns, `next` replaces the current state.
//!
//! The [`Lexer`] walks a grammar over one source text and yields
//! position-decorated [`Token`](pld_ir::Token)s lazily. It is finite: every
//! emitted token consumes at least one character, and zero-width state
//! changes are bounded.
//!
//! ```text
//! let grammar = GrammarBuilder::new()
//!     .state("main", |s| s
//!         .rule(Rule::literal(Kind::Open, "/*").push("comment"))
//!         .pattern(Kind::Word, r"[a-z]+")
//!         .fallback_token(Kind::Other))
//!     .state("comment", |s| s
//!         .rule(Rule::literal(Kind::Close, "*/").pop())
//!         .pattern(Kind::Body, r"[^*]+|\*")
//!         .must_close("block comment"))
//!     .build()?;
//! ```

mod error;
mod grammar;
mod lexer;

pub use error::{GrammarError, LexError};
pub use grammar::{Fallback, Grammar, GrammarBuilder, Rule, StateBuilder, StateId};
pub use lexer::Lexer;
