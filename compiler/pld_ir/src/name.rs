//! Normalized compound identifiers.
//!
//! PL/SQL identifiers are case-insensitive unless double-quoted. A [`Name`]
//! stores each dot-separated part already normalized: unquoted parts are
//! uppercased, quoted parts keep their exact spelling without the quotes.

use std::fmt;

use smallvec::SmallVec;

/// Normalize a single identifier part.
///
/// `"Mixed Case"` keeps its spelling (quotes removed, doubled quotes
/// collapsed); anything else is uppercased.
pub fn normalize_identifier(raw: &str) -> String {
    let raw = raw.trim();
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        raw[1..raw.len() - 1].replace("\"\"", "\"")
    } else {
        raw.to_uppercase()
    }
}

/// A dot-separated, normalized identifier such as `SCHEMA.PKG.PROC`.
#[derive(Clone, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Name {
    parts: SmallVec<[String; 2]>,
}

impl Name {
    /// Build from already-normalized parts.
    pub fn from_parts<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Name {
            parts: parts.into_iter().map(Into::into).collect(),
        }
    }

    /// Build from source text such as `pkg."Inner".proc`, normalizing each
    /// part. Dots inside quotes do not split.
    pub fn parse(text: &str) -> Self {
        let mut parts = SmallVec::new();
        let mut current = String::new();
        let mut quoted = false;
        for c in text.chars() {
            match c {
                '"' => {
                    quoted = !quoted;
                    current.push(c);
                }
                '.' if !quoted => {
                    parts.push(normalize_identifier(&current));
                    current.clear();
                }
                _ => current.push(c),
            }
        }
        if !current.trim().is_empty() || !parts.is_empty() {
            parts.push(normalize_identifier(&current));
        }
        Name { parts }
    }

    /// Normalized parts in order.
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// The last part, the unqualified name.
    pub fn last(&self) -> &str {
        self.parts.last().map_or("", String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Append a part.
    pub fn push(&mut self, part: impl Into<String>) {
        self.parts.push(part.into());
    }

    /// True if the unqualified name matches `other`'s unqualified name.
    pub fn same_base(&self, other: &Name) -> bool {
        self.last() == other.last()
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(part)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({self})")
    }
}

impl From<&str> for Name {
    fn from(text: &str) -> Self {
        Name::parse(text)
    }
}
