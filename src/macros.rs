//! Utility macros for the lexer.
//!
//! - `MK_TOKEN!` - Creates a Token instance

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The lexeme, borrowed from the source
/// * `$span` - The source span
/// * `$line`, `$column` - Position of the first character
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::IntLiteral, "42", span, 1, 1);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr, $line:expr, $column:expr) => {
        Token {
            kind: $kind,
            value: $value,
            span: $span,
            line: $line,
            column: $column,
        }
    };
}
