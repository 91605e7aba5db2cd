use std::fmt::Display;

use thiserror::Error;

use crate::{get_line_at_position, Position};

/// Phase of the front-end that raised an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    LexicalError,
    SyntaxError,
    SemanticError,
}

impl Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorCategory::LexicalError => "LexicalError",
            ErrorCategory::SyntaxError => "SyntaxError",
            ErrorCategory::SemanticError => "SemanticError",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    category: ErrorCategory,
    internal_error: ErrorImpl,
    position: Position,
    line: u32,
    column: u32,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position, line: u32, column: u32) -> Self {
        Error {
            category: error_impl.category(),
            internal_error: error_impl,
            position,
            line,
            column,
        }
    }

    pub fn get_category(&self) -> ErrorCategory {
        self.category
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_line(&self) -> u32 {
        self.line
    }

    pub fn get_column(&self) -> u32 {
        self.column
    }

    pub fn get_message(&self) -> String {
        self.internal_error.to_string()
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::InvalidStringEscape { .. } => "InvalidStringEscape",
            ErrorImpl::UnterminatedChar => "UnterminatedChar",
            ErrorImpl::InvalidCharEscape { .. } => "InvalidCharEscape",
            ErrorImpl::EmptyChar => "EmptyChar",
            ErrorImpl::MultiCharLiteral => "MultiCharLiteral",
            ErrorImpl::UnknownSymbol { .. } => "UnknownSymbol",
        }
    }

    /// Renders the diagnostic against the source that produced it:
    ///
    /// ```text
    /// LexicalError: [line 1, column 9] Unknown symbol
    ///     1 | let a = #;
    ///       |         ^
    /// ```
    pub fn render(&self, source: &str) -> String {
        let (_, line_text, _) = get_line_at_position(source, self.position.0);
        let padding = " ".repeat(self.column.saturating_sub(1) as usize);

        format!(
            "{}: [line {}, column {}] {}\n    {} | {}\n      | {}^\n",
            self.category, self.line, self.column, self.internal_error, self.line, line_text, padding
        )
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: [line {}, column {}] {}",
            self.category, self.line, self.column, self.internal_error
        )
    }
}

impl std::error::Error for Error {}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorImpl {
    #[error("Unterminated string literal")]
    UnterminatedString,
    #[error("Invalid escape sequence in string")]
    InvalidStringEscape { escape: char },
    #[error("Unterminated char literal")]
    UnterminatedChar,
    #[error("Invalid escape sequence in char literal")]
    InvalidCharEscape { escape: char },
    #[error("Empty char literal")]
    EmptyChar,
    #[error("Char literal must contain exactly one character")]
    MultiCharLiteral,
    #[error("Unknown symbol")]
    UnknownSymbol { symbol: char },
}

impl ErrorImpl {
    pub fn category(&self) -> ErrorCategory {
        // Only the scanner reports errors today.
        ErrorCategory::LexicalError
    }
}
