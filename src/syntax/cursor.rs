//! Character-level matchers over an immutable source buffer.
//!
//! A [`Cursor`] is just a byte offset into borrowed text. Every primitive
//! either consumes what it matched and returns it, or returns `None` and
//! leaves the offset untouched.

use crate::ast::Span;

#[derive(Debug, Clone)]
pub struct Cursor<'src> {
    source: &'src str,
    offset: usize,
}

impl<'src> Cursor<'src> {
    pub fn new(source: &'src str) -> Self {
        Self::at(source, 0)
    }

    /// A cursor starting at `offset`, clamped to the source length. An offset
    /// inside a multibyte character moves back to the start of that character.
    pub fn at(source: &'src str, offset: usize) -> Self {
        let mut offset = offset.min(source.len());
        while !source.is_char_boundary(offset) {
            offset -= 1;
        }
        Self { source, offset }
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Moves back to a previously recorded offset.
    pub fn rewind(&mut self, offset: usize) {
        debug_assert!(self.source.is_char_boundary(offset));
        self.offset = offset;
    }

    pub fn rest(&self) -> &'src str {
        &self.source[self.offset..]
    }

    pub fn is_at_end(&self) -> bool {
        self.offset >= self.source.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Span from `start` up to the current offset.
    pub fn span_from(&self, start: usize) -> Span {
        Span::new(start, self.offset)
    }

    /// Span of the next character, or an empty span at end of input.
    pub fn next_char_span(&self) -> Span {
        let len = self.peek().map_or(0, char::len_utf8);
        Span::new(self.offset, self.offset + len)
    }

    fn advance(&mut self, bytes: usize) -> &'src str {
        let matched = &self.source[self.offset..self.offset + bytes];
        self.offset += bytes;
        matched
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> Option<&'src str> {
        let len = self
            .rest()
            .char_indices()
            .find(|&(_, c)| !pred(c))
            .map_or(self.rest().len(), |(i, _)| i);
        if len == 0 {
            None
        } else {
            Some(self.advance(len))
        }
    }

    // ------------------------------------------------------------------------
    // Primitives
    // ------------------------------------------------------------------------

    pub fn match_literal(&mut self, text: &str) -> Option<&'src str> {
        if text.is_empty() || !self.rest().starts_with(text) {
            return None;
        }
        Some(self.advance(text.len()))
    }

    /// One or more inline whitespace characters. Newlines are not whitespace
    /// here; they separate statements.
    pub fn whitespace(&mut self) -> Option<&'src str> {
        self.take_while(is_inline_whitespace)
    }

    /// Skips spaces, tabs and line breaks.
    pub fn skip_blank(&mut self) {
        self.take_while(char::is_whitespace);
    }

    pub fn identifier(&mut self) -> Option<&'src str> {
        match self.peek() {
            Some(c) if is_identifier_start(c) => self.take_while(is_identifier_char),
            _ => None,
        }
    }

    /// A maximal run of ASCII digits. Converting the digits to a number is
    /// left to the caller, which can report overflow with a proper span.
    pub fn integer_digits(&mut self) -> Option<&'src str> {
        self.take_while(|c| c.is_ascii_digit())
    }
}

pub fn is_inline_whitespace(c: char) -> bool {
    c == ' ' || c == '\t'
}

pub fn is_identifier_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

pub fn is_identifier_char(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_consumes_only_on_match() {
        let mut cursor = Cursor::new("<= b");
        assert_eq!(cursor.match_literal("<>"), None);
        assert_eq!(cursor.offset(), 0);
        assert_eq!(cursor.match_literal("<="), Some("<="));
        assert_eq!(cursor.rest(), " b");
    }

    #[test]
    fn whitespace_requires_at_least_one_char_and_stops_at_newline() {
        let mut cursor = Cursor::new("x");
        assert_eq!(cursor.whitespace(), None);

        let mut cursor = Cursor::new(" \t \nnext");
        assert_eq!(cursor.whitespace(), Some(" \t "));
        assert_eq!(cursor.peek(), Some('\n'));
    }

    #[test]
    fn offset_inside_a_character_moves_to_its_start() {
        let cursor = Cursor::at("é = 1", 1);
        assert_eq!(cursor.offset(), 0);
        assert_eq!(cursor.rest(), "é = 1");

        let cursor = Cursor::at("aé", 2);
        assert_eq!(cursor.offset(), 1);
        assert_eq!(Cursor::at("aé", 99).offset(), 3);
    }

    #[test]
    fn identifier_is_maximal_and_cannot_start_with_digit() {
        let mut cursor = Cursor::new("9lives");
        assert_eq!(cursor.identifier(), None);

        let mut cursor = Cursor::new("_knot_2(x)");
        assert_eq!(cursor.identifier(), Some("_knot_2"));
        assert_eq!(cursor.peek(), Some('('));

        let mut cursor = Cursor::new("café au lait");
        assert_eq!(cursor.identifier(), Some("café"));
    }

    #[test]
    fn integer_digits_stop_at_non_digit() {
        let mut cursor = Cursor::new("1234abc");
        assert_eq!(cursor.integer_digits(), Some("1234"));
        assert_eq!(cursor.rest(), "abc");

        let mut cursor = Cursor::new("-1");
        assert_eq!(cursor.integer_digits(), None);
    }

    #[test]
    fn spans_track_offsets() {
        let mut cursor = Cursor::at("ab  cd", 2);
        cursor.whitespace();
        assert_eq!(cursor.span_from(2), Span::new(2, 4));
        assert_eq!(cursor.next_char_span(), Span::new(4, 5));
        cursor.rewind(6);
        assert!(cursor.is_at_end());
        assert!(cursor.next_char_span().is_empty());
    }
}
