//! SQL*Plus commands and statements outside the documented subset.

use pld_lexer::{LexError, SqlKind, SqlToken};

use crate::tree::NodeKind;
use crate::Parser;

/// Commands that run to the end of their line.
const COMMANDS: &[&str] = &[
    "SET", "PROMPT", "SHOW", "SPOOL", "EXEC", "EXECUTE", "DEFINE", "UNDEFINE", "WHENEVER",
    "CONNECT", "REM", "REMARK", "COLUMN", "START", "PAUSE", "ACCEPT", "VARIABLE", "CLEAR",
];

impl<I> Parser<I>
where
    I: Iterator<Item = Result<SqlToken, LexError>>,
{
    pub(crate) fn at_sqlplus_command(&mut self) -> bool {
        self.at_kind(0, SqlKind::At) || self.at_any_word(0, COMMANDS)
    }

    /// `SET ...`, `@script`, `@@script`: everything to the end of the line.
    pub(crate) fn sqlplus_command(&mut self) {
        let id = self.start(NodeKind::SqlPlus);
        if let Some(token) = self.key(0) {
            let command = pld_ir::Name::from_parts([token.value.clone()]);
            self.set_name(id, command);
        }
        self.skip_line();
        self.finish();
    }

    /// Anything else: up to the next `;` or `/`. Anonymous blocks and
    /// other bodies with inner `;` run to the `/` terminator.
    pub(crate) fn unhandled_statement(&mut self) {
        self.start(NodeKind::Unhandled);
        if self.at_any_word(0, &["DECLARE", "BEGIN"]) || self.at_create_with_body() {
            self.bump();
            self.skip_to_terminator();
        } else {
            // Always make progress, even on a lone `)`.
            self.bump();
            self.skip_statement();
        }
        self.finish();
    }

    /// `CREATE [OR REPLACE] TRIGGER|JAVA|LIBRARY ...`: PL/SQL bodies we do
    /// not document.
    fn at_create_with_body(&mut self) -> bool {
        let n = self.create_object_offset();
        self.at_word(0, "CREATE") && self.at_any_word(n, &["TRIGGER", "JAVA", "LIBRARY"])
    }
}
