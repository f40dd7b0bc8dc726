//! Shared data model for the plsqldoc pipeline.
//!
//! This crate contains the types every stage agrees on:
//! - [`Position`] and [`TextSpan`] for source locations
//! - [`Token`] and [`TokenGroup`] for lexer output
//! - [`Name`] for normalized compound identifiers
//!
//! Nothing here knows about PL/SQL or doc comments. Grammars plug their own
//! kind enums into [`Token`] through the [`TokenKind`] trait.

mod name;
mod position;
mod token;

pub use name::{normalize_identifier, Name};
pub use position::{Position, PositionDisplay, PositionFormat, TextSpan};
pub use token::{Token, TokenGroup, TokenKind, Trivia};
