use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("Char", TokenKind::Char);
        map.insert("False", TokenKind::False);
        map.insert("Float", TokenKind::Float);
        map.insert("Int", TokenKind::Int);
        map.insert("let", TokenKind::Let);
        map.insert("List", TokenKind::List);
        map.insert("match", TokenKind::Match);
        map.insert("True", TokenKind::True);
        map.insert("type", TokenKind::Type);
        map.insert("Unit", TokenKind::Unit);
        map.insert("with", TokenKind::With);
        map.insert("String", TokenKind::String);
        map.insert("effect", TokenKind::Effect);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,

    Dot,
    Colon,
    Semicolon,
    Comma,

    Percent,
    Caret,
    Plus,
    Minus,
    Star,
    Slash,

    NotEqual, // <>
    Assign,   // =
    Ampersand,
    LogicalAnd, // &&
    Pipe,
    LogicalOr, // ||
    Greater,
    Less,
    ConsOp, // ::
    Arrow,  // ->

    Identifier,
    IntLiteral,
    FloatLiteral,
    StringLiteral,
    CharLiteral,

    // Reserved
    Char,
    String,
    False,
    Float,
    Int,
    Let,
    List,
    Match,
    True,
    Type,
    Unit,
    With,
    Effect,

    Unknown,
    Eof,
}

impl TokenKind {
    /// Looks up an identifier-shaped lexeme in the keyword table.
    pub fn from_identifier(lexeme: &str) -> TokenKind {
        RESERVED_LOOKUP
            .get(lexeme)
            .copied()
            .unwrap_or(TokenKind::Identifier)
    }

    pub fn is_keyword(&self) -> bool {
        RESERVED_LOOKUP.values().any(|kind| kind == self)
    }

    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::IntLiteral
                | TokenKind::FloatLiteral
                | TokenKind::StringLiteral
                | TokenKind::CharLiteral
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A classified lexeme. `value` borrows straight from the source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub value: &'src str,
    pub span: Span,
    pub line: u32,
    pub column: u32,
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{} {}", self.line, self.column, self.kind)?;
        if !self.value.is_empty() {
            write!(f, " {}", self.value)?;
        }
        Ok(())
    }
}

impl Token<'_> {
    pub fn len(&self) -> usize {
        self.span.len()
    }

    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}
