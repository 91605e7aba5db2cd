//! Integration tests for the `thale` binary and the public lexer API.
//!
//! These tests drive complete source files through the scanner, and run the
//! compiled binary to check token output, diagnostics and exit codes.

use std::{fs, path::PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use thale::lexer::{
    lexer::{tokenize, tokenize_recovering, Lexer},
    tokens::TokenKind,
};

fn thale_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_thale"))
}

fn write_source(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("Failed to write source file");
    path
}

const PROGRAM: &str = "\
-- list helpers
type Shape = Int

let head = match xs with
  | x :: rest -> x
  | [] -> 0

effect Log {
  log: String -> Unit;
}

let ok = a <> b && c || 'x' = '\\n';
let pi = 3.14 * (r ^ 2) % 1;
";

#[test]
fn test_tokenize_program() {
    let tokens = tokenize(PROGRAM).unwrap();

    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
    assert_eq!(tokens.iter().filter(|t| t.kind == TokenKind::Eof).count(), 1);
    assert!(tokens.iter().all(|t| t.kind != TokenKind::Unknown));

    let head = &tokens[..4];
    assert_eq!(
        head.iter().map(|t| t.kind).collect::<Vec<_>>(),
        vec![TokenKind::Type, TokenKind::Identifier, TokenKind::Assign, TokenKind::Int]
    );
    assert_eq!((head[0].line, head[0].column), (2, 1));

    let cons = tokens.iter().find(|t| t.kind == TokenKind::ConsOp).unwrap();
    assert_eq!((cons.line, cons.column), (5, 7));

    for token in &tokens {
        assert_eq!(&PROGRAM[token.span.range()], token.value);
    }
}

#[test]
fn test_lazy_and_eager_agree() {
    let eager = tokenize(PROGRAM).unwrap();
    let lazy: Vec<_> = Lexer::new(PROGRAM).map(|r| r.unwrap()).collect();
    assert_eq!(eager, lazy);

    let (recovered, errors) = tokenize_recovering(PROGRAM);
    assert!(errors.is_empty());
    assert_eq!(eager, recovered);
}

#[test]
fn test_cli_help() {
    Command::new(thale_bin())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_version() {
    Command::new(thale_bin())
        .arg("-v")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_no_arguments_prints_help() {
    Command::new(thale_bin())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_prints_tokens() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let input = write_source(&dir, "main.th", "let x = 42 + 3.14\n");

    Command::new(thale_bin())
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("1:1 Let let"))
        .stdout(predicate::str::contains("1:14 FloatLiteral 3.14"))
        .stdout(predicate::str::contains("2:1 Eof"));
}

#[test]
fn test_cli_reports_lexical_error() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let input = write_source(&dir, "bad.th", "let x = 1\nlet s = \"oops\n");

    Command::new(thale_bin())
        .arg(&input)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "LexicalError: [line 2, column 9] Unterminated string literal\n    2 | let s = \"oops\n      |         ^\n",
        ));
}

#[test]
fn test_cli_all_errors() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let input = write_source(&dir, "bad.th", "a # b\nc @ d\n");

    Command::new(thale_bin())
        .arg("--all-errors")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("[line 1, column 3] Unknown symbol"))
        .stderr(predicate::str::contains("[line 2, column 3] Unknown symbol"));
}

#[test]
fn test_cli_missing_file() {
    let dir = TempDir::new().expect("Failed to create temp directory");

    Command::new(thale_bin())
        .arg(dir.path().join("missing.th"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not read file"));
}
