//! PL/SQL grammar rules.
//!
//! - `unit.rs`: `CREATE` statements (packages, types, routines)
//! - `decl.rs`: package-level declarations
//! - `member.rs`: object type members
//! - `routine.rs`: procedure/function headers, parameters, modifiers
//! - `ty.rs`: type expressions and opaque default expressions
//! - `sqlplus.rs`: SQL*Plus commands and unrecognised statements

mod decl;
mod member;
mod routine;
mod sqlplus;
mod ty;
mod unit;

use pld_lexer::{LexError, SqlKind, SqlToken};

use crate::tree::NodeKind;
use crate::{Parser, SyntaxError};

impl<I> Parser<I>
where
    I: Iterator<Item = Result<SqlToken, LexError>>,
{
    /// Parse one top-level statement into the current tree. Returns
    /// `Ok(false)` at end of input.
    pub(crate) fn statement(&mut self) -> Result<bool, SyntaxError> {
        if self.at_end() {
            self.skip_trailing_trivia();
            return Ok(false);
        }

        if self.at_word(0, "CREATE") {
            self.create_statement()?;
        } else if self.at_terminator(0) || self.at_kind(0, SqlKind::Semicolon) {
            self.leaf(NodeKind::Terminator);
        } else if self.at_sqlplus_command() {
            self.sqlplus_command();
        } else {
            self.unhandled_statement();
        }
        Ok(true)
    }
}
