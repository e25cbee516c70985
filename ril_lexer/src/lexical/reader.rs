//! Position-tracking character source
//!
//! Wraps the source text and yields one character per `read()` call.
//! `position()` reports the location of the character most recently
//! returned, which is exactly the position a recognizer stamps on a fresh
//! token. There is no pushback: all multi-character lookahead is done by
//! reading forward and reassigning the scanner's current-character slot.

use crate::utils::Position;

/// One-character-at-a-time reader over a fully resident source text.
#[derive(Debug)]
pub struct SourceReader {
    chars: Vec<char>,
    index: usize,
    /// Position of the character most recently returned
    current: Position,
    /// Position the next returned character will have
    next: Position,
}

impl SourceReader {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            index: 0,
            current: Position::start(),
            next: Position::start(),
        }
    }

    /// Read the next character, or `None` at end of input.
    ///
    /// At end of input the reported position stays pinned one past the
    /// last character, so repeated EOF tokens all carry the same position.
    pub fn read(&mut self) -> Option<char> {
        self.current = self.next;
        match self.chars.get(self.index).copied() {
            Some(c) => {
                self.index += 1;
                self.next = self.next.advance(c);
                Some(c)
            }
            None => None,
        }
    }

    /// Position of the character most recently returned by `read()`.
    pub fn position(&self) -> Position {
        self.current
    }

    /// Line of the character most recently returned by `read()`.
    pub fn line(&self) -> u32 {
        self.current.line
    }

    /// Column of the character most recently returned by `read()`.
    pub fn column(&self) -> u32 {
        self.current.column
    }

    /// Check whether the reader has consumed the whole input.
    pub fn at_end(&self) -> bool {
        self.index >= self.chars.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_one_character_at_a_time() {
        let mut reader = SourceReader::new("ab");
        assert_eq!(reader.read(), Some('a'));
        assert_eq!(reader.read(), Some('b'));
        assert_eq!(reader.read(), None);
        assert_eq!(reader.read(), None);
    }

    #[test]
    fn test_position_is_of_last_returned_char() {
        let mut reader = SourceReader::new("ab\ncd");

        reader.read(); // 'a'
        assert_eq!((reader.line(), reader.column()), (1, 1));

        reader.read(); // 'b'
        assert_eq!((reader.line(), reader.column()), (1, 2));

        reader.read(); // '\n'
        assert_eq!((reader.line(), reader.column()), (1, 3));

        reader.read(); // 'c'
        assert_eq!((reader.line(), reader.column()), (2, 1));

        reader.read(); // 'd'
        assert_eq!((reader.line(), reader.column()), (2, 2));
    }

    #[test]
    fn test_position_pinned_at_end_of_input() {
        let mut reader = SourceReader::new("x");
        reader.read();
        reader.read();
        let pinned = reader.position();

        reader.read();
        assert_eq!(reader.position(), pinned);
        assert_eq!(pinned.column, 2);
        assert!(reader.at_end());
    }

    #[test]
    fn test_empty_input() {
        let mut reader = SourceReader::new("");
        assert!(reader.at_end());
        assert_eq!(reader.read(), None);
        assert_eq!(reader.position(), Position::start());
    }

    #[test]
    fn test_offsets_advance_with_bytes() {
        let mut reader = SourceReader::new("xy");
        reader.read();
        assert_eq!(reader.position().offset, 0);
        reader.read();
        assert_eq!(reader.position().offset, 1);
    }
}
