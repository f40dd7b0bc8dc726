//! Type expressions and default values.

use pld_ir::Name;
use pld_lexer::{LexError, SqlKind, SqlToken};

use crate::tree::{NodeId, NodeKind};
use crate::{Parser, SyntaxError};

impl<I> Parser<I>
where
    I: Iterator<Item = Result<SqlToken, LexError>>,
{
    /// A datatype:
    ///
    /// ```text
    /// [REF] name [(args)] [%TYPE | %ROWTYPE] [@dblink]
    /// LONG RAW | DOUBLE PRECISION | CHARACTER VARYING (n)
    /// TIMESTAMP [(n)] [WITH [LOCAL] TIME ZONE]
    /// INTERVAL DAY [(n)] TO SECOND [(n)] | INTERVAL YEAR [(n)] TO MONTH
    /// ```
    ///
    /// The node's name is the base type name (`NUMBER`, `EMP%ROWTYPE`).
    pub(crate) fn type_expr(&mut self) -> Result<NodeId, SyntaxError> {
        self.node(NodeKind::TypeExpr, |p, id| {
            if p.at_word(0, "REF") && !p.at_word(1, "CURSOR") {
                p.bump();
            }
            let mut name = p.name()?;

            let base = name.last().to_owned();
            match base.as_str() {
                "LONG" if p.at_word(0, "RAW") => {
                    p.bump();
                    name = Name::from_parts(["LONG RAW"]);
                }
                "DOUBLE" if p.at_word(0, "PRECISION") => {
                    p.bump();
                    name = Name::from_parts(["DOUBLE PRECISION"]);
                }
                "CHARACTER" | "CHAR" | "NATIONAL" => {
                    while p.at_any_word(0, &["CHARACTER", "CHAR", "VARYING"])
                        && !p.at_word(1, "SET")
                    {
                        p.bump();
                    }
                }
                "INTERVAL" => {
                    // DAY [(n)] TO SECOND [(n)] / YEAR [(n)] TO MONTH
                    p.bump();
                    p.skip_parens();
                    p.expect_word("TO")?;
                    p.bump();
                }
                _ => {}
            }

            p.skip_parens();

            if base == "TIMESTAMP" && p.at_word(0, "WITH") {
                p.bump();
                p.eat_word("LOCAL");
                p.expect_word("TIME")?;
                p.expect_word("ZONE")?;
            }

            if p.at_kind(0, SqlKind::Percent)
                && p.at_any_word(1, &["TYPE", "ROWTYPE"])
            {
                p.bump();
                if let Some(attribute) = p.key(0).map(|token| token.value.clone()) {
                    name = attr_name(&name, &attribute);
                }
                p.bump();
            }

            if p.at_kind(0, SqlKind::At) && p.at_name(1) {
                p.bump();
                p.name()?;
            }

            // CHARACTER SET ANY_CS, CHARACTER SET x%CHARSET
            if p.at_word(0, "CHARACTER") && p.at_word(1, "SET") {
                p.bump();
                p.bump();
                p.name()?;
                if p.at_kind(0, SqlKind::Percent) {
                    p.bump();
                    p.bump();
                }
            }

            p.set_name(id, name);
            Ok(())
        })
    }

    /// `[NOT NULL] [:= | DEFAULT expr]`. Nothing is consumed when neither
    /// is present.
    pub(crate) fn default_value(&mut self) -> Result<(), SyntaxError> {
        if self.at_word(0, "NOT") && self.at_word(1, "NULL") {
            self.modifier(|p| {
                p.bump();
                p.bump();
            });
        }
        if self.at_op(0, ":=") || self.at_word(0, "DEFAULT") {
            self.bump();
            self.expression()?;
        }
        Ok(())
    }

    /// An opaque expression: groups up to `,` `)` or `;` at depth zero.
    pub(crate) fn expression(&mut self) -> Result<NodeId, SyntaxError> {
        let stops_immediately = self.at_end()
            || matches!(
                self.kind_at(0),
                Some(SqlKind::Comma | SqlKind::RParen | SqlKind::Semicolon)
            );
        if stops_immediately {
            return Err(self.error("an expression"));
        }
        let id = self.start(NodeKind::Expression);
        self.skip_until(|token| {
            matches!(token.kind, SqlKind::Comma | SqlKind::Semicolon)
        });
        self.finish();
        Ok(id)
    }
}

/// `EMP` + `ROWTYPE` → `EMP%ROWTYPE` as the last part.
fn attr_name(name: &Name, attribute: &str) -> Name {
    let mut parts: Vec<String> = name.parts().to_vec();
    if let Some(last) = parts.last_mut() {
        last.push('%');
        last.push_str(attribute);
    }
    Name::from_parts(parts)
}
