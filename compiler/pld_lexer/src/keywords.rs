//! Keyword tables.
//!
//! Three word lists feed one reverse lookup table, built on first use:
//!
//! - **Reserved** words can never be identifiers.
//! - **Keywords** carry meaning in some positions but may still name
//!   things (`name`, `type`-less columns, `result`).
//! - **Pseudo-keywords** are ordinary identifiers the parser matches by
//!   value (`REPLACE`, `CURRENT_USER`, pragma names).
//!
//! Lookup is case-insensitive.

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

/// How a word is classified.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum WordClass {
    Reserved,
    Keyword,
    Pseudo,
}

const RESERVED: &[&str] = &[
    "ALL", "ALTER", "AND", "ANY", "AS", "ASC", "AT", "BEGIN", "BETWEEN", "BY", "CASE", "CHECK",
    "CLUSTER", "CLUSTERS", "COLAUTH", "COLUMNS", "COMPRESS", "CONNECT", "CRASH", "CREATE",
    "CURSOR", "DECLARE", "DEFAULT", "DESC", "DISTINCT", "DROP", "ELSE", "END", "EXCEPTION",
    "EXCLUSIVE", "FETCH", "FOR", "FROM", "FUNCTION", "GOTO", "GRANT", "GROUP", "HAVING",
    "IDENTIFIED", "IF", "IN", "INDEX", "INDEXES", "INSERT", "INTERSECT", "INTO", "IS", "LIKE",
    "LOCK", "MINUS", "MODE", "NOCOMPRESS", "NOT", "NOWAIT", "NULL", "OF", "ON", "OPTION", "OR",
    "ORDER", "OVERLAPS", "PROCEDURE", "PUBLIC", "RESOURCE", "REVOKE", "SELECT", "SHARE", "SIZE",
    "SQL", "START", "SUBTYPE", "TABAUTH", "TABLE", "THEN", "TO", "TYPE", "UNION", "UNIQUE",
    "UPDATE", "VALUES", "VIEW", "VIEWS", "WHEN", "WHERE", "WITH",
];

const KEYWORDS: &[&str] = &[
    "A", "ACCESSIBLE", "ADD", "AGENT", "AGGREGATE", "ARRAY", "ATTRIBUTE", "AUTHID", "AVG",
    "BFILE_BASE", "BINARY", "BLOB_BASE", "BLOCK", "BODY", "BOTH", "BOUND", "BULK", "BYTE", "C",
    "CALL", "CALLING", "CASCADE", "CHAR", "CHAR_BASE", "CHARACTER", "CHARSET", "CHARSETFORM",
    "CHARSETID", "CLOB_BASE", "CLOSE", "COLLECT", "COMMENT", "COMMIT", "COMMITTED", "COMPILED",
    "CONSTANT", "CONSTRUCTOR", "CONTEXT", "CONTINUE", "CONVERT", "COUNT", "CURRENT",
    "CUSTOMDATUM", "DANGLING", "DATA", "DATE", "DATE_BASE", "DAY", "DEFINE", "DELETE",
    "DETERMINISTIC", "DOUBLE", "DURATION", "EDITIONABLE", "EDITIONING", "ELEMENT", "ELSIF",
    "EMPTY", "ESCAPE", "EXCEPT", "EXCEPTIONS", "EXECUTE", "EXISTS", "EXIT", "EXTERNAL", "FINAL",
    "FIXED", "FLOAT", "FORALL", "FORCE", "GENERAL", "HASH", "HEAP", "HIDDEN", "HOUR",
    "IMMEDIATE", "INCLUDING", "INDICATOR", "INDICES", "INFINITE", "INSTANTIABLE", "INT",
    "INTERFACE", "INTERVAL", "INVALIDATE", "ISOLATION", "JAVA", "LANGUAGE", "LARGE", "LEADING",
    "LENGTH", "LEVEL", "LIBRARY", "LIKE2", "LIKE4", "LIKEC", "LIMIT", "LIMITED", "LOCAL", "LONG",
    "LOOP", "MAP", "MAX", "MAXLEN", "MEMBER", "MERGE", "MIN", "MINUTE", "MOD", "MODIFY", "MONTH",
    "MULTISET", "NAME", "NAN", "NATIONAL", "NATIVE", "NCHAR", "NEW", "NOCOPY", "NONEDITIONABLE",
    "NUMBER_BASE", "OBJECT", "OLD", "ONLY", "OPAQUE", "OPEN", "OPERATOR", "ORACLE", "ORADATA",
    "ORGANIZATION", "OTHERS", "OUT", "OVERRIDING", "PACKAGE", "PARALLEL_ENABLE", "PARAMETER",
    "PARAMETERS", "PARTITION", "PASCAL", "PERSISTABLE", "PIPE", "PIPELINED", "PRAGMA",
    "PRECISION", "PRIOR", "PRIVATE", "RAISE", "RANGE", "RAW", "READ", "RECORD", "REF",
    "REFERENCE", "RELIES_ON", "REM", "REMAINDER", "RENAME", "RESULT", "RESULT_CACHE", "RETURN",
    "RETURNING", "REVERSE", "ROLLBACK", "ROW", "SAMPLE", "SAVE", "SAVEPOINT", "SECOND",
    "SEGMENT", "SELF", "SEPARATE", "SEQUENCE", "SERIALIZABLE", "SET", "SHARING", "SHORT",
    "SIZE_T", "SOME", "SPARSE", "SQLCODE", "SQLDATA", "SQLNAME", "SQLSTATE", "STANDARD",
    "STATIC", "STDDEV", "STORED", "STRING", "STRUCT", "STYLE", "SUBMULTISET", "SUBPARTITION",
    "SUBSTITUTABLE", "SUM", "SYNONYM", "TDO", "THE", "TIME", "TIMESTAMP", "TIMEZONE_ABBR",
    "TIMEZONE_HOUR", "TIMEZONE_MINUTE", "TIMEZONE_REGION", "TRAILING", "TRANSACTION",
    "TRANSACTIONAL", "TRUSTED", "UNDER", "UNSIGNED", "UNTRUSTED", "USE", "USING", "VALIST",
    "VALUE", "VARIABLE", "VARIANCE", "VARRAY", "VARYING", "VOID", "WHILE", "WORK", "WRAPPED",
    "WRITE", "YEAR", "ZONE",
];

const PSEUDO: &[&str] = &[
    "AUTONOMOUS_TRANSACTION", "COVERAGE", "CURRENT_USER", "DEFINER", "DEPRECATE",
    "EXCEPTION_INIT", "FALSE", "INLINE", "METADATA", "NONE", "REPLACE", "RESTRICT_REFERENCES",
    "SERIALLY_REUSABLE", "SUPPRESSES_WARNING_6009", "TRUE", "UDF",
];

static TABLE: LazyLock<FxHashMap<&'static str, WordClass>> = LazyLock::new(|| {
    let mut table = FxHashMap::default();
    table.reserve(RESERVED.len() + KEYWORDS.len() + PSEUDO.len());
    for (list, class) in [
        (PSEUDO, WordClass::Pseudo),
        (KEYWORDS, WordClass::Keyword),
        (RESERVED, WordClass::Reserved),
    ] {
        for &word in list {
            table.insert(word, class);
        }
    }
    table
});

/// Classify a word, ignoring case. `None` for plain identifiers.
pub fn classify(word: &str) -> Option<WordClass> {
    if word.bytes().any(|b| b.is_ascii_lowercase()) {
        TABLE.get(word.to_ascii_uppercase().as_str()).copied()
    } else {
        TABLE.get(word).copied()
    }
}

/// True for reserved words.
pub fn is_reserved(word: &str) -> bool {
    classify(word) == Some(WordClass::Reserved)
}

#[cfg(test)]
mod tests;
