//! Package specification declarations.

use pld_ir::Name;
use pld_lexer::{LexError, SqlKind, SqlToken};

use crate::tree::{NodeKind, TypeDeclKind};
use crate::{Parser, SyntaxError};

impl<I> Parser<I>
where
    I: Iterator<Item = Result<SqlToken, LexError>>,
{
    /// Declarations up to (not including) `END`.
    pub(crate) fn declarations(&mut self) -> Result<(), SyntaxError> {
        loop {
            if self.at_word(0, "END") {
                return Ok(());
            }
            if self.at_end() || self.at_terminator(0) || self.at_create(0) {
                return Err(self.error("`END`"));
            }
            self.declaration()?;
        }
    }

    fn declaration(&mut self) -> Result<(), SyntaxError> {
        if self.at_word(0, "SUBTYPE") {
            self.subtype()
        } else if self.at_word(0, "TYPE") {
            self.type_decl()
        } else if self.at_word(0, "PRAGMA") {
            self.pragma(true)
        } else if self.at_any_word(0, &["PROCEDURE", "FUNCTION"]) {
            self.method(0, 0, false)
        } else if self.at_word(0, "CURSOR") {
            self.cursor()
        } else if self.at_name(0) && self.at_word(1, "EXCEPTION") {
            self.exception()
        } else if self.at_name(0) && (self.at_name(1) || self.at_word(1, "CONSTANT")) {
            self.variable()
        } else {
            tracing::debug!("unrecognised declaration");
            self.start(NodeKind::Unhandled);
            self.bump();
            self.skip_statement();
            self.finish();
            Ok(())
        }
    }

    /// `name [CONSTANT] type [NOT NULL] [:= | DEFAULT expr];`
    fn variable(&mut self) -> Result<(), SyntaxError> {
        let constant = self.at_word(1, "CONSTANT");
        self.node(NodeKind::Variable { constant }, |p, id| {
            let name = p.identifier()?;
            p.set_name(id, name);
            if constant {
                p.leaf(NodeKind::Keyword);
            }
            p.type_expr()?;
            p.default_value()?;
            p.expect_kind(SqlKind::Semicolon, "`;`")
        })
        .map_err(|err| err.while_parsing("a variable declaration"))?;
        Ok(())
    }

    /// `name EXCEPTION;`
    fn exception(&mut self) -> Result<(), SyntaxError> {
        self.node(NodeKind::Exception, |p, id| {
            let name = p.identifier()?;
            p.set_name(id, name);
            p.expect_word("EXCEPTION")?;
            p.expect_kind(SqlKind::Semicolon, "`;`")
        })?;
        Ok(())
    }

    /// `SUBTYPE name IS base [(constraint)] [RANGE lo..hi] [NOT NULL];`
    fn subtype(&mut self) -> Result<(), SyntaxError> {
        self.node(NodeKind::Subtype, |p, id| {
            p.expect_word("SUBTYPE")?;
            let name = p.identifier()?;
            p.set_name(id, name);
            p.expect_word("IS")?;
            p.type_expr()?;
            if !p.at_kind(0, SqlKind::Semicolon) && !p.at_end() {
                p.modifier(|p| p.skip_until(|token| token.kind == SqlKind::Semicolon));
            }
            p.expect_kind(SqlKind::Semicolon, "`;`")
        })
        .map_err(|err| err.while_parsing("a subtype declaration"))?;
        Ok(())
    }

    /// `TYPE name IS RECORD (...) | TABLE OF t [INDEX BY t] | VARRAY(n) OF t
    /// | REF CURSOR [RETURN t] | ...;`
    fn type_decl(&mut self) -> Result<(), SyntaxError> {
        self.node(NodeKind::TypeDecl(TypeDeclKind::Other), |p, id| {
            p.expect_word("TYPE")?;
            let name = p.identifier()?;
            p.set_name(id, name);
            if !(p.eat_word("IS") || p.eat_word("AS")) {
                return Err(p.error("`IS` or `AS`"));
            }

            let kind = if p.at_word(0, "RECORD") {
                p.leaf(NodeKind::Keyword);
                p.record_fields()?;
                TypeDeclKind::Record
            } else if p.at_word(0, "TABLE") {
                p.collection_type()?;
                if p.at_word(0, "INDEX") {
                    p.index_by()?;
                    TypeDeclKind::AssociativeArray
                } else {
                    TypeDeclKind::NestedTable
                }
            } else if p.at_any_word(0, &["VARRAY", "VARYING"]) {
                p.collection_type()?;
                TypeDeclKind::Varray
            } else if p.at_word(0, "REF") && p.at_word(1, "CURSOR") {
                p.bump();
                p.bump();
                if p.at_word(0, "RETURN") {
                    p.return_clause()?;
                }
                TypeDeclKind::RefCursor
            } else {
                p.expression()?;
                TypeDeclKind::Other
            };
            p.set_kind(id, NodeKind::TypeDecl(kind));
            p.expect_kind(SqlKind::Semicolon, "`;`")
        })
        .map_err(|err| err.while_parsing("a type declaration"))?;
        Ok(())
    }

    /// `INDEX BY type`
    fn index_by(&mut self) -> Result<(), SyntaxError> {
        let id = self.start(NodeKind::Modifier);
        self.set_name(id, Name::from_parts(["INDEX BY"]));
        self.bump();
        let result = self
            .expect_word("BY")
            .and_then(|()| self.type_expr().map(|_| ()));
        self.finish();
        result
    }

    /// `( field type [NOT NULL] [:= expr] {, ...} )`
    fn record_fields(&mut self) -> Result<(), SyntaxError> {
        self.expect_kind(SqlKind::LParen, "`(`")?;
        loop {
            self.node(NodeKind::Field, |p, id| {
                let name = p.identifier()?;
                p.set_name(id, name);
                p.type_expr()?;
                p.default_value()
            })?;
            if !self.eat_kind(SqlKind::Comma) {
                break;
            }
        }
        self.expect_kind(SqlKind::RParen, "`,` or `)`")
    }

    /// `PRAGMA name [(args)]`, with `;` unless inside an object type.
    pub(crate) fn pragma(&mut self, terminated: bool) -> Result<(), SyntaxError> {
        self.node(NodeKind::Pragma, |p, id| {
            p.expect_word("PRAGMA")?;
            if let Some(name) = p.key(0).map(|token| token.value.clone()) {
                p.set_name(id, Name::from_parts([name]));
            }
            p.bump();
            p.skip_parens();
            if terminated {
                p.expect_kind(SqlKind::Semicolon, "`;`")?;
            }
            Ok(())
        })?;
        Ok(())
    }
}
