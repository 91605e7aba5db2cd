//! Lexical analysis for Thale source text.
//!
//! This module contains the scanner that converts source code into a stream
//! of tokens for parsing. It handles:
//!
//! - Identifiers and reserved keywords
//! - Integer, float, string and char literals
//! - Single and two-character operators and punctuation
//! - Whitespace and `--` line comments
//! - Line/column tracking for diagnostics

pub mod lexer;
pub mod tokens;
