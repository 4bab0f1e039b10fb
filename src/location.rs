//! Source positions.
//!
//! A [`SourceLocation`] is one point in a document snapshot: the absolute
//! character index plus the 0-based line and column it falls on.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single point in a source document. All indices are 0-based and counted
/// in characters, not bytes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SourceLocation {
    pub absolute_index: usize,
    pub line_index: usize,
    pub character_index: usize,
}

impl SourceLocation {
    /// The start of every document.
    pub const ZERO: SourceLocation = SourceLocation::new(0, 0, 0);

    pub const fn new(absolute_index: usize, line_index: usize, character_index: usize) -> Self {
        Self {
            absolute_index,
            line_index,
            character_index,
        }
    }

    /// Returns the location just past `text`, starting from `self`.
    ///
    /// `\n` and a lone `\r` each begin a new line; `\r\n` counts once.
    ///
    /// ```rust
    /// use stencil::SourceLocation;
    /// let end = SourceLocation::ZERO.advance("ab\r\ncd");
    /// assert_eq!(end, SourceLocation::new(6, 1, 2));
    /// ```
    pub fn advance(self, text: &str) -> SourceLocation {
        let mut location = self;
        let mut chars = text.chars().peekable();

        while let Some(ch) = chars.next() {
            location.absolute_index += 1;
            let breaks_line = ch == '\n' || (ch == '\r' && chars.peek() != Some(&'\n'));
            if breaks_line {
                location.line_index += 1;
                location.character_index = 0;
            } else {
                location.character_index += 1;
            }
        }

        location
    }

    /// True when `self` sits strictly before `other` in the same document.
    pub fn is_before(&self, other: &SourceLocation) -> bool {
        self.absolute_index < other.absolute_index
    }
}

impl fmt::Display for SourceLocation {
    /// `(line,character)`; the alternate form also carries the absolute
    /// index as `(absolute:line,character)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            return write!(
                f,
                "({}:{},{})",
                self.absolute_index, self.line_index, self.character_index
            );
        }
        write!(f, "({},{})", self.line_index, self.character_index)
    }
}
