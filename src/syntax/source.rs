//! Maps byte offsets to source locations.
//!
//! pest reports byte positions; locations count characters. A line-start
//! table keeps each lookup to a binary search plus a scan of one line.

use crate::location::SourceLocation;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct LineStart {
    byte: usize,
    absolute: usize,
}

/// An immutable document snapshot with a line index.
#[derive(Debug, Clone)]
pub struct SourceText<'a> {
    text: &'a str,
    lines: Vec<LineStart>,
}

impl<'a> SourceText<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut lines = vec![LineStart {
            byte: 0,
            absolute: 0,
        }];
        let mut chars = text.char_indices().enumerate().peekable();

        while let Some((absolute, (byte, ch))) = chars.next() {
            let next_is_lf = matches!(chars.peek(), Some((_, (_, '\n'))));
            if ch == '\n' || (ch == '\r' && !next_is_lf) {
                lines.push(LineStart {
                    byte: byte + ch.len_utf8(),
                    absolute: absolute + 1,
                });
            }
        }

        Self { text, lines }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// The text of line `index`, without its line break.
    pub fn line(&self, index: usize) -> Option<&'a str> {
        let start = self.lines.get(index)?.byte;
        let end = self
            .lines
            .get(index + 1)
            .map_or(self.text.len(), |next| next.byte);
        Some(self.text[start..end].trim_end_matches(['\n', '\r']))
    }

    /// The location of the character starting at `byte`. Offsets past the
    /// end clamp to the end of the document.
    pub fn location_at(&self, byte: usize) -> SourceLocation {
        let byte = byte.min(self.text.len());
        let line_index = self.lines.partition_point(|line| line.byte <= byte) - 1;
        let line = self.lines[line_index];

        let character_index = self.text[line.byte..]
            .char_indices()
            .take_while(|(offset, _)| line.byte + offset < byte)
            .count();

        SourceLocation::new(line.absolute + character_index, line_index, character_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_line() {
        let source = SourceText::new("ab");
        assert_eq!(source.location_at(0), SourceLocation::new(0, 0, 0));
        assert_eq!(source.location_at(1), SourceLocation::new(1, 0, 1));
        assert_eq!(source.location_at(2), SourceLocation::new(2, 0, 2));
    }

    #[test]
    fn test_line_breaks_match_advance() {
        let text = "a\r\nbc\rd\néf";
        let source = SourceText::new(text);
        assert_eq!(source.line_count(), 4);
        for (byte, ch) in text.char_indices() {
            // A prefix ending mid-"\r\n" reads as a lone '\r'.
            if ch == '\n' && text[..byte].ends_with('\r') {
                continue;
            }
            let expected = SourceLocation::ZERO.advance(&text[..byte]);
            assert_eq!(source.location_at(byte), expected, "byte {byte}");
        }
    }

    #[test]
    fn test_line_text() {
        let source = SourceText::new("ab\r\ncd\ref\n");
        assert_eq!(source.line(0), Some("ab"));
        assert_eq!(source.line(1), Some("cd"));
        assert_eq!(source.line(2), Some("ef"));
        assert_eq!(source.line(3), Some(""));
        assert_eq!(source.line(4), None);
    }

    #[test]
    fn test_multibyte_characters() {
        let source = SourceText::new("é@x");
        assert_eq!(source.location_at(2), SourceLocation::new(1, 0, 1));
    }

    #[test]
    fn test_clamps_past_end() {
        let source = SourceText::new("ab\n");
        assert_eq!(source.location_at(99), SourceLocation::new(3, 1, 0));
    }
}
