#![allow(clippy::module_inception)]

use crate::errors::errors::Error;

pub mod errors;
pub mod lexer;
pub mod macros;

/// Byte offset into a source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span {
            start: Position(start as u32),
            end: Position(end as u32),
        }
    }

    pub fn len(&self) -> usize {
        (self.end.0 - self.start.0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> std::ops::Range<usize> {
        self.start.0 as usize..self.end.0 as usize
    }
}

/// Finds the source line holding `position`.
///
/// Returns the 1-based line number, the line text without its terminating
/// newline, and the 1-based column of `position` within that line. A NUL byte
/// ends the line the same way the end of the buffer does.
pub fn get_line_at_position(source: &str, position: u32) -> (usize, &str, usize) {
    let bytes = source.as_bytes();
    let pos = (position as usize).min(source.len());

    let line_start = bytes[..pos]
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |i| i + 1);
    let line_end = bytes[pos..]
        .iter()
        .position(|&b| b == b'\n' || b == b'\0')
        .map_or(source.len(), |i| pos + i);

    let line_number = bytes[..line_start].iter().filter(|&&b| b == b'\n').count() + 1;
    let column = source[line_start..pos].chars().count() + 1;

    (line_number, &source[line_start..line_end], column)
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_get_line_at_position() {
        let source = "Hello, world!\nfoo\n\nTesting { }\n";

        let (line_number, line, column) = super::get_line_at_position(source, 10);
        assert_eq!(line_number, 1);
        assert_eq!(line, "Hello, world!");
        assert_eq!(column, 11);

        let (line_number, line, column) = super::get_line_at_position(source, 27);
        assert_eq!(line_number, 4);
        assert_eq!(line, "Testing { }");
        assert_eq!(column, 9);
    }

    #[test]
    fn test_get_line_at_position_end_of_buffer() {
        let (line_number, line, column) = super::get_line_at_position("ab\ncd", 5);
        assert_eq!(line_number, 2);
        assert_eq!(line, "cd");
        assert_eq!(column, 3);
    }

    #[test]
    fn test_get_line_at_position_stops_at_nul() {
        let (_, line, _) = super::get_line_at_position("ab\0cd", 1);
        assert_eq!(line, "ab");
    }
}

/// Writes the rendered diagnostic for `error` to standard error.
pub fn display_error(error: &Error, source: &str) {
    /*
        LexicalError: [line 2, column 9] Unknown symbol
            2 | let a = #;
              |         ^
    */

    eprint!("{}", error.render(source));
}
