//! Source positions as spelled inside the front-end's dump.
//!
//! The dump abbreviates positions aggressively: a node that starts on the
//! same file as the previous node drops the file name (`line:4:5`), and a
//! node on the same line also drops the line number (`col:24`). Parsing is
//! therefore stateful; a [`PositionContext`] carries the last file and line
//! seen so abbreviated spellings can be re-expanded.

use serde::Serialize;
use std::fmt;

/// A best-effort source position for one node.
///
/// Positions exist for diagnostics and for telling user declarations apart
/// from the declarations the front-end injects; they never affect the
/// translated output itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SourcePosition {
    /// The raw text between the angle brackets, preserved verbatim.
    pub raw: String,
    pub file: Option<String>,
    pub line: Option<u32>,
    pub column: Option<u32>,
}

impl SourcePosition {
    /// True when the position refers to no real file: `<invalid sloc>`,
    /// `<built-in>`, `<scratch space>` and friends.
    pub fn is_synthetic(&self) -> bool {
        self.file.is_none() && self.line.is_none() && self.column.is_none()
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (&self.file, self.line, self.column) {
            (Some(file), Some(line), Some(col)) => write!(f, "{}:{}:{}", file, line, col),
            (Some(file), Some(line), None) => write!(f, "{}:{}", file, line),
            _ => write!(f, "<{}>", self.raw),
        }
    }
}

/// Sticky file and line used to re-expand abbreviated position spellings.
#[derive(Debug, Clone, Default)]
pub struct PositionContext {
    file: Option<String>,
    line: Option<u32>,
}

impl PositionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the contents of one `<...>` range group. Only the start of the
    /// range is retained; the end location merely advances the sticky state.
    pub fn parse_range(&mut self, raw: &str) -> SourcePosition {
        let mut position = SourcePosition {
            raw: raw.to_string(),
            ..SourcePosition::default()
        };

        // A range is `start` or `start, end`. The comma cannot occur inside a
        // location token, so a plain split is enough.
        let mut parts = raw.splitn(2, ", ");
        let start = parts.next().unwrap_or("");
        let end = parts.next();

        if let Some((file, line, column)) = self.parse_location(start) {
            position.file = file;
            position.line = line;
            position.column = column;
        }

        if let Some(end) = end {
            // Parsed for its side effect on the sticky state only.
            let _ = self.parse_location(end);
        }

        position
    }

    /// Parses a bare location token that follows the range group, e.g. the
    /// `line:3:5` in `FunctionDecl ... <hello.c:3:1, line:6:1> line:3:5`.
    pub fn parse_location_token(&mut self, raw: &str) -> Option<SourcePosition> {
        let (file, line, column) = self.parse_location(raw)?;
        Some(SourcePosition {
            raw: raw.to_string(),
            file,
            line,
            column,
        })
    }

    #[allow(clippy::type_complexity)]
    fn parse_location(&mut self, token: &str) -> Option<(Option<String>, Option<u32>, Option<u32>)> {
        let token = token.trim();
        if token.is_empty()
            || token.contains("invalid sloc")
            || token.starts_with('<') && token.ends_with('>')
        {
            return None;
        }

        if let Some(rest) = token.strip_prefix("col:") {
            let column = rest.parse().ok()?;
            return Some((self.file.clone(), self.line, Some(column)));
        }

        if let Some(rest) = token.strip_prefix("line:") {
            let mut it = rest.splitn(2, ':');
            let line: u32 = it.next()?.parse().ok()?;
            let column: Option<u32> = it.next().and_then(|c| c.parse().ok());
            self.line = Some(line);
            return Some((self.file.clone(), Some(line), column));
        }

        // `file.c:3:5`: split from the right so path separators survive.
        let mut tail = token.rsplitn(3, ':');
        let column: Option<u32> = tail.next().and_then(|c| c.parse().ok());
        let line: u32 = tail.next()?.parse().ok()?;
        let file = tail.next()?.to_string();
        // `<built-in>:1:1` and `<scratch space>:2:1` are synthetic files.
        if file.is_empty() || file.starts_with('<') {
            return None;
        }
        self.file = Some(file.clone());
        self.line = Some(line);
        Some((Some(file), Some(line), column))
    }
}
