//! Procedure and function headers.

use pld_lexer::{LexError, SqlKind, SqlToken};

use crate::tree::{MethodKind, NodeKind, ParamMode};
use crate::{Parser, SyntaxError};

impl<I> Parser<I>
where
    I: Iterator<Item = Result<SqlToken, LexError>>,
{
    /// `PROCEDURE name [(params)] [modifiers];` or
    /// `FUNCTION name [(params)] RETURN type [modifiers];`
    ///
    /// Inside object types the method ends at `,` or `)` instead of `;`.
    /// `modifiers` leading modifiers (`MEMBER`, `NOT OVERRIDING`, ...)
    /// precede the keyword, which sits at lookahead offset `keyword_at`.
    pub(crate) fn method(
        &mut self,
        modifiers: usize,
        keyword_at: usize,
        in_object: bool,
    ) -> Result<(), SyntaxError> {
        let kind = if self.at_word(keyword_at, "CONSTRUCTOR") {
            MethodKind::Constructor
        } else if self.at_word(keyword_at, "FUNCTION") {
            MethodKind::Function
        } else {
            MethodKind::Procedure
        };

        self.node(NodeKind::Method(kind), |p, id| {
            for _ in 0..modifiers {
                p.modifier(|p| {
                    if p.at_word(0, "NOT") {
                        p.bump();
                    }
                    p.bump();
                });
            }
            if kind == MethodKind::Constructor {
                p.expect_word("CONSTRUCTOR")?;
                p.expect_word("FUNCTION")?;
            } else if !(p.eat_word("PROCEDURE") || p.eat_word("FUNCTION")) {
                return Err(p.error("`PROCEDURE` or `FUNCTION`"));
            }

            let name = p.identifier()?;
            p.set_name(id, name);

            if p.at_kind(0, SqlKind::LParen) {
                p.parameter_list()?;
            }
            if matches!(kind, MethodKind::Function | MethodKind::Constructor) {
                p.return_clause()?;
            }
            p.routine_modifiers();
            if !in_object {
                p.expect_kind(SqlKind::Semicolon, "`;`")?;
            }
            Ok(())
        })
        .map_err(|err| err.while_parsing("a procedure or function declaration"))?;
        Ok(())
    }

    /// `CURSOR name [(params)] [RETURN rowtype] [IS select];`
    pub(crate) fn cursor(&mut self) -> Result<(), SyntaxError> {
        self.node(NodeKind::Method(MethodKind::Cursor), |p, id| {
            p.expect_word("CURSOR")?;
            let name = p.identifier()?;
            p.set_name(id, name);
            if p.at_kind(0, SqlKind::LParen) {
                p.parameter_list()?;
            }
            if p.at_word(0, "RETURN") {
                p.return_clause()?;
            }
            if p.eat_word("IS") {
                // The query may contain commas; it runs to `;`.
                p.start(NodeKind::Expression);
                p.skip_until(|token| token.kind == SqlKind::Semicolon);
                p.finish();
            }
            p.expect_kind(SqlKind::Semicolon, "`;`")
        })
        .map_err(|err| err.while_parsing("a cursor declaration"))?;
        Ok(())
    }

    /// `( param {, param} )`
    pub(crate) fn parameter_list(&mut self) -> Result<(), SyntaxError> {
        self.node(NodeKind::ParameterList, |p, _| {
            p.expect_kind(SqlKind::LParen, "`(`")?;
            loop {
                p.parameter()?;
                if !p.eat_kind(SqlKind::Comma) {
                    break;
                }
            }
            p.expect_kind(SqlKind::RParen, "`,` or `)`")
        })?;
        Ok(())
    }

    /// `name [IN] [OUT] [NOCOPY] type [DEFAULT | := expr]`
    fn parameter(&mut self) -> Result<(), SyntaxError> {
        self.node(NodeKind::Parameter(ParamMode::In), |p, id| {
            let name = p.identifier()?;
            p.set_name(id, name);

            let input = p.at_word(0, "IN");
            if input {
                p.leaf(NodeKind::Keyword);
            }
            let output = p.at_word(0, "OUT");
            if output {
                p.leaf(NodeKind::Keyword);
                let mode = if input {
                    ParamMode::InOut
                } else {
                    ParamMode::Out
                };
                p.set_kind(id, NodeKind::Parameter(mode));
            }
            if p.at_word(0, "NOCOPY") {
                p.modifier(Self::bump);
            }

            p.type_expr()?;
            p.default_value()?;
            Ok(())
        })?;
        Ok(())
    }

    /// `RETURN type` or `RETURN SELF AS RESULT`.
    pub(crate) fn return_clause(&mut self) -> Result<(), SyntaxError> {
        self.node(NodeKind::Return, |p, _| {
            p.expect_word("RETURN")?;
            if p.at_word(0, "SELF") && p.at_word(1, "AS") && p.at_word(2, "RESULT") {
                let id = p.start(NodeKind::TypeExpr);
                p.bump();
                p.bump();
                p.bump();
                p.set_name(id, pld_ir::Name::from_parts(["SELF AS RESULT"]));
                p.finish();
                Ok(())
            } else {
                p.type_expr().map(|_| ())
            }
        })?;
        Ok(())
    }

    /// `DETERMINISTIC`, `PIPELINED`, `PARALLEL_ENABLE (...)`,
    /// `RESULT_CACHE [RELIES_ON (...)]`, `ACCESSIBLE BY (...)`,
    /// `AUTHID ...`, `AGGREGATE USING t`: anything up to `IS`, `AS`, `;`,
    /// `,` or `)`.
    pub(crate) fn routine_modifiers(&mut self) {
        loop {
            if self.at_end()
                || self.at_terminator(0)
                || self.at_any_word(0, &["IS", "AS"])
                || matches!(
                    self.kind_at(0),
                    Some(SqlKind::Semicolon | SqlKind::Comma | SqlKind::RParen)
                )
            {
                return;
            }
            self.modifier(|p| {
                let extra = if p.at_any_word(0, &["ACCESSIBLE", "AUTHID"]) {
                    1
                } else if p.at_word(0, "AGGREGATE") {
                    2
                } else {
                    0
                };
                p.bump();
                for _ in 0..extra {
                    p.bump();
                }
                p.skip_parens();
            });
        }
    }
}
