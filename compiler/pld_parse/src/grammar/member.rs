//! Object type members.

use pld_lexer::{LexError, SqlKind, SqlToken};

use crate::tree::NodeKind;
use crate::{Parser, SyntaxError};

/// Words that may precede a member method. `NOT` may precede the first
/// three.
const METHOD_MODIFIERS: &[&str] = &[
    "OVERRIDING",
    "FINAL",
    "INSTANTIABLE",
    "MEMBER",
    "STATIC",
    "MAP",
    "ORDER",
];

impl<I> Parser<I>
where
    I: Iterator<Item = Result<SqlToken, LexError>>,
{
    /// Comma-separated members inside `OBJECT ( ... )`. Stops before `)`.
    pub(crate) fn object_members(&mut self) -> Result<(), SyntaxError> {
        if self.at_kind(0, SqlKind::RParen) {
            return Ok(());
        }
        loop {
            self.object_member()?;
            if !self.eat_kind(SqlKind::Comma) {
                return Ok(());
            }
        }
    }

    fn object_member(&mut self) -> Result<(), SyntaxError> {
        // Count leading modifiers by lookahead alone.
        let mut offset = 0;
        let mut modifiers = 0;
        loop {
            if self.at_word(offset, "NOT") && self.at_any_word(offset + 1, &METHOD_MODIFIERS[..3]) {
                offset += 2;
            } else if self.at_any_word(offset, METHOD_MODIFIERS) {
                offset += 1;
            } else {
                break;
            }
            modifiers += 1;
        }

        if self.at_any_word(offset, &["PROCEDURE", "FUNCTION", "CONSTRUCTOR"]) {
            self.method(modifiers, offset, true)
        } else if modifiers > 0 {
            Err(self.error("`PROCEDURE` or `FUNCTION`"))
        } else if self.at_word(0, "PRAGMA") {
            self.pragma(false)
        } else {
            self.attribute()
        }
    }

    /// `name type`
    fn attribute(&mut self) -> Result<(), SyntaxError> {
        self.node(NodeKind::Attribute, |p, id| {
            let name = p.identifier()?;
            p.set_name(id, name);
            p.type_expr()?;
            Ok(())
        })
        .map_err(|err| err.while_parsing("an object attribute"))?;
        Ok(())
    }
}
