//! Error types and error reporting for the compiler front-end.
//!
//! This module defines the error values produced while scanning source text.
//! It includes:
//!
//! - The error category taxonomy (lexical, syntax, semantic)
//! - Lexical error variants carrying the exact diagnostic message
//! - Rendering of line/column anchored diagnostics with a caret

pub mod errors;
