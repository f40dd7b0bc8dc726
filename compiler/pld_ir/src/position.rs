//! Source positions and half-open text spans.
//!
//! Lines and columns are 1-based. Columns count characters, not bytes, so
//! positions line up with what an editor shows. Two positions compare equal
//! when their line and column match; the filename rides along for reporting
//! only.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::Path;
use std::sync::Arc;

/// How a position is rendered in diagnostics.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PositionFormat {
    /// `file:line:col` with the filename as given.
    #[default]
    Full,
    /// `line:col`.
    LineColumn,
    /// `basename:line:col`.
    Name,
}

/// A line/column coordinate in a source file.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Position {
    pub line: u32,
    pub column: u32,
    pub filename: Option<Arc<str>>,
}

impl Position {
    /// Create a position without a filename.
    pub const fn new(line: u32, column: u32) -> Self {
        Position {
            line,
            column,
            filename: None,
        }
    }

    /// The first character of a file.
    pub const fn start() -> Self {
        Position::new(1, 1)
    }

    /// Attach a filename.
    #[must_use]
    pub fn with_filename(mut self, filename: Option<Arc<str>>) -> Self {
        self.filename = filename;
        self
    }

    /// The position just past `text` when `text` starts at `self`.
    ///
    /// `\n`, `\r\n` and a lone `\r` each count as one line break.
    #[must_use]
    pub fn advanced_by(&self, text: &str) -> Position {
        let mut line = self.line;
        let mut column = self.column;

        let bytes = text.as_bytes();
        let mut rest = 0;
        while let Some(offset) = memchr::memchr2(b'\n', b'\r', &bytes[rest..]) {
            let at = rest + offset;
            line += 1;
            column = 1;
            rest = if bytes[at] == b'\r' && bytes.get(at + 1) == Some(&b'\n') {
                at + 2
            } else {
                at + 1
            };
        }
        column += count_chars(&text[rest..]);

        Position {
            line,
            column,
            filename: self.filename.clone(),
        }
    }

    /// Render with the given format.
    pub fn display(&self, format: PositionFormat) -> PositionDisplay<'_> {
        PositionDisplay {
            position: self,
            format,
        }
    }
}

fn count_chars(text: &str) -> u32 {
    u32::try_from(text.chars().count()).unwrap_or(u32::MAX)
}

impl Default for Position {
    fn default() -> Self {
        Position::start()
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.line == other.line && self.column == other.column
    }
}

impl Eq for Position {}

impl Hash for Position {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.line.hash(state);
        self.column.hash(state);
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.line, self.column).cmp(&(other.line, other.column))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.display(PositionFormat::Full).fmt(f)
    }
}

/// Formatting adapter returned by [`Position::display`].
pub struct PositionDisplay<'a> {
    position: &'a Position,
    format: PositionFormat,
}

impl fmt::Display for PositionDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Position {
            line,
            column,
            filename,
        } = self.position;
        match (self.format, filename.as_deref()) {
            (PositionFormat::Full, Some(file)) => write!(f, "{file}:{line}:{column}"),
            (PositionFormat::Name, Some(file)) => {
                let base = Path::new(file)
                    .file_name()
                    .map_or(file.into(), |name| name.to_string_lossy());
                write!(f, "{base}:{line}:{column}")
            }
            _ => write!(f, "{line}:{column}"),
        }
    }
}

/// A half-open range of source text, `start..end`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TextSpan {
    pub start: Position,
    pub end: Position,
    pub filename: Option<Arc<str>>,
}

impl TextSpan {
    /// Create a span; the filename is inherited from `start`.
    pub fn new(start: Position, end: Position) -> Self {
        debug_assert!(start <= end, "span start {start} is after end {end}");
        let filename = start.filename.clone();
        TextSpan {
            start,
            end,
            filename,
        }
    }

    /// A zero-width span at `position`.
    pub fn point(position: Position) -> Self {
        TextSpan::new(position.clone(), position)
    }

    /// Override the filename.
    #[must_use]
    pub fn with_filename(mut self, filename: Option<Arc<str>>) -> Self {
        self.filename = filename;
        self
    }

    /// True if the span covers no text.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True if `position` falls inside the half-open range.
    pub fn contains(&self, position: &Position) -> bool {
        self.start <= *position && *position < self.end
    }

    /// The smallest span covering both `self` and `other`.
    #[must_use]
    pub fn merge(&self, other: &TextSpan) -> TextSpan {
        let start = if other.start < self.start {
            &other.start
        } else {
            &self.start
        };
        let end = if other.end > self.end {
            &other.end
        } else {
            &self.end
        };
        TextSpan {
            start: start.clone(),
            end: end.clone(),
            filename: self.filename.clone().or_else(|| other.filename.clone()),
        }
    }
}

impl fmt::Display for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}:{}",
            self.start,
            self.end.line,
            self.end.column
        )
    }
}
