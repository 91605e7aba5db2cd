use std::iter::FusedIterator;

use tracing::{debug, trace};

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_TOKEN,
};

use super::tokens::{Token, TokenKind};

/// Start of the lexeme currently being scanned.
#[derive(Debug, Clone, Copy)]
struct Mark {
    pos: usize,
    line: u32,
    column: u32,
}

/// Forward-only scanner over a fully loaded source buffer.
///
/// The end of the buffer and a NUL byte both count as end-of-input.
#[derive(Debug, Clone)]
pub struct Lexer<'src> {
    source: &'src str,
    pos: usize,
    line: u32,
    column: u32,
    token_start: Mark,
    finished: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Lexer<'src> {
        Lexer {
            source,
            pos: 0,
            line: 1,
            column: 1,
            token_start: Mark {
                pos: 0,
                line: 1,
                column: 1,
            },
            finished: false,
        }
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    pub fn position(&self) -> Position {
        Position(self.pos as u32)
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> u32 {
        self.column
    }

    pub fn at_eof(&self) -> bool {
        self.current() == b'\0'
    }

    /// Scans and returns the next token.
    ///
    /// Once end-of-input is reached every further call returns the same `Eof`
    /// token. On error the cursor has already moved past the malformed lexeme,
    /// so scanning may resume with the next call.
    pub fn next_token(&mut self) -> Result<Token<'src>, Error> {
        self.skip_whitespace();
        self.token_start = self.mark();

        if self.at_eof() {
            return Ok(self.make_token(TokenKind::Eof));
        }

        let c = self.current();
        self.bump();

        let token = match c {
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => Ok(self.lex_identifier()),
            b'0'..=b'9' => Ok(self.lex_number()),
            b'"' => self.lex_string(),
            b'\'' => self.lex_char(),
            _ => self.lex_symbol(c),
        };

        if let Ok(token) = &token {
            trace!(kind = %token.kind, line = token.line, column = token.column, "token");
        }
        token
    }

    fn mark(&self) -> Mark {
        Mark {
            pos: self.pos,
            line: self.line,
            column: self.column,
        }
    }

    fn current(&self) -> u8 {
        self.source.as_bytes().get(self.pos).copied().unwrap_or(b'\0')
    }

    fn current_char(&self) -> char {
        self.source[self.pos..].chars().next().unwrap_or('\0')
    }

    /// Consumes one character, keeping line and column in step.
    fn bump(&mut self) {
        match self.current() {
            b'\0' => {}
            b'\n' => {
                self.pos += 1;
                self.line += 1;
                self.column = 1;
            }
            b if b.is_ascii() => {
                self.pos += 1;
                self.column += 1;
            }
            _ => {
                self.pos += self.current_char().len_utf8();
                self.column += 1;
            }
        }
    }

    fn eat_while(&mut self, predicate: impl Fn(u8) -> bool) {
        while !self.at_eof() && predicate(self.current()) {
            self.bump();
        }
    }

    fn skip_whitespace(&mut self) {
        loop {
            self.eat_while(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\x0b' | b'\x0c' | b'\r'));

            if self.current() == b'-' && self.source.as_bytes().get(self.pos + 1) == Some(&b'-') {
                self.eat_while(|b| b != b'\n');
                continue;
            }

            break;
        }
    }

    fn make_token(&self, kind: TokenKind) -> Token<'src> {
        let start = self.token_start;
        MK_TOKEN!(
            kind,
            &self.source[start.pos..self.pos],
            Span::new(start.pos, self.pos),
            start.line,
            start.column
        )
    }

    fn error_at(&self, error_impl: ErrorImpl, at: Mark) -> Error {
        debug!(line = at.line, column = at.column, error = %error_impl, "lexical error");
        Error::new(error_impl, Position(at.pos as u32), at.line, at.column)
    }

    fn lex_identifier(&mut self) -> Token<'src> {
        self.eat_while(|b| b.is_ascii_alphanumeric() || b == b'_');
        let lexeme = &self.source[self.token_start.pos..self.pos];
        self.make_token(TokenKind::from_identifier(lexeme))
    }

    fn lex_number(&mut self) -> Token<'src> {
        self.eat_while(|b| b.is_ascii_digit());

        // `1.` is accepted as a float; no digit is required after the dot.
        if self.current() == b'.' {
            self.bump();
            self.eat_while(|b| b.is_ascii_digit());
            return self.make_token(TokenKind::FloatLiteral);
        }

        self.make_token(TokenKind::IntLiteral)
    }

    fn lex_string(&mut self) -> Result<Token<'src>, Error> {
        // First bad escape wins; the rest of the literal is still consumed.
        let mut invalid_escape = None;

        loop {
            match self.current() {
                b'"' => {
                    self.bump();
                    return match invalid_escape {
                        Some(error) => Err(error),
                        None => Ok(self.make_token(TokenKind::StringLiteral)),
                    };
                }
                b'\0' | b'\n' => {
                    return Err(invalid_escape.unwrap_or_else(|| {
                        self.error_at(ErrorImpl::UnterminatedString, self.token_start)
                    }));
                }
                b'\\' => {
                    let escape_at = self.mark();
                    self.bump();
                    match self.current() {
                        b'\0' => {}
                        b'n' | b't' | b'r' | b'\\' | b'"' => self.bump(),
                        escaped => {
                            if invalid_escape.is_none() {
                                let escape = self.current_char();
                                invalid_escape = Some(
                                    self.error_at(ErrorImpl::InvalidStringEscape { escape }, escape_at),
                                );
                            }
                            if escaped != b'\n' {
                                self.bump();
                            }
                        }
                    }
                }
                _ => self.bump(),
            }
        }
    }

    fn lex_char(&mut self) -> Result<Token<'src>, Error> {
        match self.current() {
            b'\0' | b'\n' => {
                return Err(self.error_at(ErrorImpl::UnterminatedChar, self.token_start));
            }
            b'\'' => {
                self.bump();
                return Err(self.error_at(ErrorImpl::EmptyChar, self.token_start));
            }
            b'\\' => {
                let escape_at = self.mark();
                self.bump();
                match self.current() {
                    b'n' | b't' | b'r' | b'\\' | b'\'' => self.bump(),
                    b'\0' => {
                        return Err(self.error_at(ErrorImpl::UnterminatedChar, self.token_start));
                    }
                    escaped => {
                        let escape = self.current_char();
                        let error = self.error_at(ErrorImpl::InvalidCharEscape { escape }, escape_at);
                        if escaped != b'\n' {
                            self.bump();
                            self.skip_past_quote_on_line();
                        }
                        return Err(error);
                    }
                }
            }
            _ => self.bump(),
        }

        if self.current() == b'\'' {
            self.bump();
            return Ok(self.make_token(TokenKind::CharLiteral));
        }

        if self.skip_past_quote_on_line() {
            Err(self.error_at(ErrorImpl::MultiCharLiteral, self.token_start))
        } else {
            Err(self.error_at(ErrorImpl::UnterminatedChar, self.token_start))
        }
    }

    /// Consumes through the next unescaped `'` on the current line.
    /// Leaves the cursor untouched and returns false when there is none.
    fn skip_past_quote_on_line(&mut self) -> bool {
        let rest = &self.source.as_bytes()[self.pos..];
        let mut i = 0;
        let close = loop {
            match rest.get(i) {
                None | Some(b'\0') | Some(b'\n') => break None,
                Some(b'\'') => break Some(i),
                Some(b'\\') => match rest.get(i + 1) {
                    Some(b'\'') | Some(b'\\') => i += 2,
                    _ => i += 1,
                },
                Some(_) => i += 1,
            }
        };

        let Some(close) = close else {
            return false;
        };

        let target = self.pos + close + 1;
        while self.pos < target {
            self.bump();
        }
        true
    }

    fn lex_symbol(&mut self, c: u8) -> Result<Token<'src>, Error> {
        let kind = match c {
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b'{' => TokenKind::LBrace,
            b'}' => TokenKind::RBrace,
            b'[' => TokenKind::LBracket,
            b']' => TokenKind::RBracket,
            b'.' => TokenKind::Dot,
            b';' => TokenKind::Semicolon,
            b',' => TokenKind::Comma,
            b'%' => TokenKind::Percent,
            b'^' => TokenKind::Caret,
            b'+' => TokenKind::Plus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'=' => TokenKind::Assign,
            b'>' => TokenKind::Greater,
            b'<' => self.pick(b'>', TokenKind::NotEqual, TokenKind::Less),
            b':' => self.pick(b':', TokenKind::ConsOp, TokenKind::Colon),
            b'-' => self.pick(b'>', TokenKind::Arrow, TokenKind::Minus),
            b'&' => self.pick(b'&', TokenKind::LogicalAnd, TokenKind::Ampersand),
            b'|' => self.pick(b'|', TokenKind::LogicalOr, TokenKind::Pipe),
            _ => {
                let symbol = self.source[self.token_start.pos..]
                    .chars()
                    .next()
                    .unwrap_or('\0');
                return Err(self.error_at(ErrorImpl::UnknownSymbol { symbol }, self.token_start));
            }
        };

        Ok(self.make_token(kind))
    }

    fn pick(&mut self, next: u8, double: TokenKind, single: TokenKind) -> TokenKind {
        if self.current() == next {
            self.bump();
            double
        } else {
            single
        }
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Result<Token<'src>, Error>;

    /// Yields tokens up to and including `Eof`, then `None`.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let result = self.next_token();
        if matches!(&result, Ok(token) if token.is_eof()) {
            self.finished = true;
        }
        Some(result)
    }
}

impl FusedIterator for Lexer<'_> {}

/// Scans the whole source, stopping at the first lexical error.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>, Error> {
    let mut lex = Lexer::new(source);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token()?;
        tokens.push(token);
        if token.is_eof() {
            break;
        }
    }

    debug!(count = tokens.len(), "tokenized");
    Ok(tokens)
}

/// Scans the whole source, collecting every lexical error.
///
/// Each malformed lexeme is represented in the token stream by an `Unknown`
/// token covering the characters that were consumed for it.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn tokenize_recovering(source: &str) -> (Vec<Token<'_>>, Vec<Error>) {
    let mut lex = Lexer::new(source);
    let mut tokens = vec![];
    let mut errors = vec![];

    loop {
        match lex.next_token() {
            Ok(token) => {
                tokens.push(token);
                if token.is_eof() {
                    break;
                }
            }
            Err(error) => {
                tokens.push(lex.make_token(TokenKind::Unknown));
                errors.push(error);
            }
        }
    }

    debug!(count = tokens.len(), errors = errors.len(), "tokenized with recovery");
    (tokens, errors)
}
