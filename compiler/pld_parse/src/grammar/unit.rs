//! `CREATE` statements.
//!
//! ```text
//! CREATE [OR REPLACE] [EDITIONABLE | NONEDITIONABLE]
//!     PACKAGE [BODY] name ... IS|AS ...
//!   | TYPE [BODY] name ...
//!   | PROCEDURE name ... | FUNCTION name ...
//! ```

use pld_lexer::{LexError, SqlKind, SqlToken};

use crate::tree::{NodeKind, UnitKind};
use crate::{Parser, SyntaxError};

const EDITIONING: &[&str] = &["EDITIONABLE", "NONEDITIONABLE", "EDITIONING"];

impl<I> Parser<I>
where
    I: Iterator<Item = Result<SqlToken, LexError>>,
{
    /// Offset of the object keyword after `CREATE [OR REPLACE]
    /// [EDITIONABLE]`.
    pub(crate) fn create_object_offset(&mut self) -> usize {
        let mut n = 1;
        if self.at_word(n, "OR") && self.at_word(n + 1, "REPLACE") {
            n += 2;
        }
        if self.at_any_word(n, EDITIONING) {
            n += 1;
        }
        n
    }

    pub(crate) fn create_statement(&mut self) -> Result<(), SyntaxError> {
        let n = self.create_object_offset();
        let body = self.at_word(n + 1, "BODY");
        let unit = if self.at_word(n, "PACKAGE") {
            if body {
                UnitKind::PackageBody
            } else {
                UnitKind::Package
            }
        } else if self.at_word(n, "TYPE") {
            if body {
                UnitKind::TypeBody
            } else {
                UnitKind::ObjectType
            }
        } else if self.at_word(n, "PROCEDURE") {
            UnitKind::Procedure
        } else if self.at_word(n, "FUNCTION") {
            UnitKind::Function
        } else {
            self.unhandled_statement();
            return Ok(());
        };

        tracing::trace!(unit = unit.as_str(), "create statement");
        self.node(NodeKind::CreateUnit(unit), |p, id| {
            for _ in 0..=n {
                p.bump();
            }
            if body {
                p.bump();
            }
            let name = p.identifier()?;
            p.set_name(id, name);

            match unit {
                UnitKind::Package => p.package_spec(),
                UnitKind::PackageBody | UnitKind::TypeBody => {
                    p.unit_clauses();
                    if !(p.eat_word("IS") || p.eat_word("AS")) {
                        return Err(p.error("`IS` or `AS`"));
                    }
                    p.opaque_body();
                    Ok(())
                }
                UnitKind::ObjectType => p.object_type(),
                UnitKind::Procedure | UnitKind::Function => p.standalone_routine(unit),
            }
        })
        .map_err(|err| err.while_parsing(unit.as_str()))?;
        Ok(())
    }

    /// Clauses between a unit's name and its `IS|AS`.
    fn unit_clauses(&mut self) {
        loop {
            if self.at_word(0, "SHARING") {
                self.modifier(|p| {
                    p.bump();
                    p.eat_kind_op("=");
                    p.bump();
                });
            } else if self.at_word(0, "AUTHID") {
                self.modifier(|p| {
                    p.bump();
                    p.bump();
                });
            } else if self.at_word(0, "ACCESSIBLE") && self.at_word(1, "BY") {
                self.modifier(|p| {
                    p.bump();
                    p.bump();
                    p.skip_parens();
                });
            } else if self.at_word(0, "DEFAULT") && self.at_word(1, "COLLATION") {
                self.modifier(|p| {
                    p.bump();
                    p.bump();
                    p.bump();
                });
            } else if self.at_any_word(0, &["FORCE", "WRAPPED"]) {
                self.modifier(Self::bump);
            } else if self.at_word(0, "OID") {
                self.modifier(|p| {
                    p.bump();
                    p.bump();
                });
            } else {
                return;
            }
        }
    }

    /// `CREATE PACKAGE name ... IS declarations END [name];`
    fn package_spec(&mut self) -> Result<(), SyntaxError> {
        self.unit_clauses();
        if !(self.eat_word("IS") || self.eat_word("AS")) {
            return Err(self.error("`IS` or `AS`"));
        }
        self.declarations()?;
        self.end_clause()
    }

    /// `END [name] ;`
    pub(crate) fn end_clause(&mut self) -> Result<(), SyntaxError> {
        let id = self.start(NodeKind::Keyword);
        let result = self.expect_word("END");
        if result.is_ok() {
            if self.at_name(0) {
                if let Ok(name) = self.name() {
                    self.set_name(id, name);
                }
            }
            self.eat_kind(SqlKind::Semicolon);
        }
        self.finish();
        result
    }

    /// Everything after `IS|AS` of a body, kept as one node.
    fn opaque_body(&mut self) {
        if self.at_end() || self.at_terminator(0) {
            return;
        }
        self.start(NodeKind::Body);
        self.skip_to_terminator();
        self.finish();
    }

    /// `CREATE TYPE name ... {IS|AS} OBJECT (...) | UNDER super (...) |
    /// TABLE OF t | VARRAY(n) OF t` with trailing `[NOT] FINAL` etc.
    fn object_type(&mut self) -> Result<(), SyntaxError> {
        self.unit_clauses();

        // Forward declaration: `CREATE TYPE t;`
        if self.eat_kind(SqlKind::Semicolon) || self.at_end() || self.at_terminator(0) {
            return Ok(());
        }

        if self.at_word(0, "UNDER") {
            self.modifier(|p| {
                p.bump();
                // The member list follows directly, so no type arguments.
                let id = p.start(NodeKind::TypeExpr);
                if let Ok(name) = p.name() {
                    p.set_name(id, name);
                }
                p.finish();
            });
        } else if self.eat_word("IS") || self.eat_word("AS") {
            if self.at_word(0, "OBJECT") {
                self.leaf(NodeKind::Keyword);
            } else if self.at_any_word(0, &["TABLE", "VARRAY", "VARYING"]) {
                self.collection_type()?;
            } else {
                return Err(self.error("`OBJECT`, `TABLE` or `VARRAY`"));
            }
        } else {
            return Err(self.error("`IS`, `AS` or `UNDER`"));
        }

        if self.at_kind(0, SqlKind::LParen) {
            self.bump();
            self.object_members()?;
            self.expect_kind(SqlKind::RParen, "`)`")?;
        }

        // [NOT] FINAL, [NOT] INSTANTIABLE, [NOT] PERSISTABLE, ...
        while !self.at_end() && !self.at_terminator(0) && !self.at_kind(0, SqlKind::Semicolon) {
            if self.at_create(0) {
                return Ok(());
            }
            self.modifier(|p| {
                if p.at_word(0, "NOT") {
                    p.bump();
                }
                p.bump();
            });
        }
        self.eat_kind(SqlKind::Semicolon);
        Ok(())
    }

    /// `TABLE OF t [NOT NULL]`, `VARRAY(n) OF t`, `VARYING ARRAY(n) OF t`.
    pub(crate) fn collection_type(&mut self) -> Result<(), SyntaxError> {
        if self.eat_word("TABLE") {
            self.expect_word("OF")?;
        } else {
            if self.eat_word("VARYING") {
                self.expect_word("ARRAY")?;
            } else {
                self.expect_word("VARRAY")?;
            }
            if self.at_kind(0, SqlKind::LParen) {
                self.start(NodeKind::Literal);
                self.skip_parens();
                self.finish();
            }
            self.expect_word("OF")?;
        }
        self.type_expr()?;
        if self.at_word(0, "NOT") && self.at_word(1, "NULL") {
            self.modifier(|p| {
                p.bump();
                p.bump();
            });
        }
        Ok(())
    }

    /// `CREATE PROCEDURE|FUNCTION name [(params)] [RETURN t] ... IS|AS body`
    fn standalone_routine(&mut self, unit: UnitKind) -> Result<(), SyntaxError> {
        if self.at_kind(0, SqlKind::LParen) {
            self.parameter_list()?;
        }
        if unit == UnitKind::Function {
            self.return_clause()?;
        }
        self.routine_modifiers();
        if self.eat_word("IS") || self.eat_word("AS") {
            self.opaque_body();
        } else {
            self.eat_kind(SqlKind::Semicolon);
        }
        Ok(())
    }

    /// Wrap what `body` consumes in a `Modifier` node named after its
    /// first word, or its first two when the first is `NOT`.
    pub(crate) fn modifier(&mut self, body: impl FnOnce(&mut Self)) {
        let id = self.start(NodeKind::Modifier);
        if let Some(first) = self.key(0).map(|token| token.value.clone()) {
            let label = match self.key(1) {
                Some(second) if first == "NOT" => format!("NOT {}", second.value),
                _ => first,
            };
            self.set_name(id, pld_ir::Name::from_parts([label]));
        }
        body(self);
        self.finish();
    }

    fn eat_kind_op(&mut self, op: &str) -> bool {
        let found = self.at_op(0, op);
        if found {
            self.bump();
        }
        found
    }
}
