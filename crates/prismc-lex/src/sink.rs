//! Token sink: serializes a token stream to the symbol-table file and
//! reads it back.
//!
//! Format: one token per line, three comma-separated fields — `kind`
//! (human-readable, from [`TokenKind::category_name`]), `lexeme` (raw,
//! may itself contain commas), `line` (decimal). The reader tolerates
//! commas inside the lexeme by splitting only on the first and last
//! comma in the record; anything between them is the lexeme verbatim.
//! The sink is append-only and the lexer must close the file before the
//! parser opens it — callers own that lifecycle via ordinary
//! `BufWriter`/`BufReader` drop semantics.

use std::io::{self, BufRead, Write};

use thiserror::Error;

use crate::token::{Token, TokenKind};

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O error writing symbol-table record: {0}")]
    Write(#[source] io::Error),

    #[error("I/O error reading symbol-table record: {0}")]
    Read(#[source] io::Error),

    #[error("malformed symbol-table record (expected at least 2 commas): {0:?}")]
    MalformedRecord(String),

    #[error("symbol-table record has a non-numeric line field: {0:?}")]
    InvalidLineNumber(String),
}

pub type SinkResult<T> = std::result::Result<T, SinkError>;

/// A single deserialized record: the token's category name (not the
/// closed `TokenKind` — the sink format is string-typed at the file
/// boundary), lexeme, and line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SinkRecord {
    pub category: String,
    pub lexeme: String,
    pub line: u32,
}

/// Appends one token's record to `writer`.
pub fn write_token<W: Write>(writer: &mut W, token: &Token) -> SinkResult<()> {
    writeln!(
        writer,
        "{},{},{}",
        token.kind.category_name(),
        token.lexeme,
        token.line
    )
    .map_err(SinkError::Write)
}

/// Appends every token in `tokens` to `writer`, in order.
pub fn write_all<W: Write>(writer: &mut W, tokens: &[Token]) -> SinkResult<()> {
    for token in tokens {
        write_token(writer, token)?;
    }
    Ok(())
}

/// Parses one symbol-table line into a [`SinkRecord`]. Splits on the
/// first comma (ending the `kind` field) and the last comma (starting
/// the `line` field); everything in between is the `lexeme`, commas and
/// all.
pub fn parse_record(line: &str) -> SinkResult<SinkRecord> {
    let first = line
        .find(',')
        .ok_or_else(|| SinkError::MalformedRecord(line.to_string()))?;
    let last = line
        .rfind(',')
        .ok_or_else(|| SinkError::MalformedRecord(line.to_string()))?;
    if last <= first {
        return Err(SinkError::MalformedRecord(line.to_string()));
    }

    let category = &line[..first];
    let lexeme = &line[first + 1..last];
    let line_field = &line[last + 1..];
    let line_no: u32 = line_field
        .trim()
        .parse()
        .map_err(|_| SinkError::InvalidLineNumber(line.to_string()))?;

    Ok(SinkRecord {
        category: category.to_string(),
        lexeme: lexeme.to_string(),
        line: line_no,
    })
}

/// Reads every record out of `reader`, in file order. Blank trailing
/// lines are skipped; anything else that fails to parse is reported.
pub fn read_all<R: BufRead>(reader: R) -> SinkResult<Vec<SinkRecord>> {
    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(SinkError::Read)?;
        if line.is_empty() {
            continue;
        }
        records.push(parse_record(&line)?);
    }
    Ok(records)
}

/// True if `category` names the lexical-error family (`"Lexical Error
/// (...)"`), used by callers deciding whether a record read back from the
/// symbol table represents an error token.
pub fn category_is_error(category: &str) -> bool {
    category.starts_with("Lexical Error")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{ArithmeticOp, Delimiter};

    #[test]
    fn round_trips_a_simple_token() {
        let mut buf = Vec::new();
        let token = Token::new(TokenKind::Identifier, "count", 3);
        write_token(&mut buf, &token).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "Identifier,count,3\n");

        let record = parse_record(text.trim_end()).unwrap();
        assert_eq!(record.category, "Identifier");
        assert_eq!(record.lexeme, "count");
        assert_eq!(record.line, 3);
    }

    #[test]
    fn lexeme_containing_commas_round_trips() {
        let token = Token::new(
            TokenKind::LexicalError(crate::token::LexErrorKind::InvalidIdentifier),
            "a,b,c",
            7,
        );
        let mut buf = Vec::new();
        write_token(&mut buf, &token).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let record = parse_record(text.trim_end()).unwrap();
        assert_eq!(record.lexeme, "a,b,c");
        assert_eq!(record.line, 7);
        assert!(category_is_error(&record.category));
    }

    #[test]
    fn write_all_then_read_all_preserves_order() {
        let tokens = vec![
            Token::new(TokenKind::Identifier, "x", 1),
            Token::new(TokenKind::Assignment(crate::token::AssignOp::Assign), "=", 1),
            Token::new(TokenKind::IntegerLiteral, "1", 1),
            Token::new(TokenKind::Delimiter(Delimiter::Semicolon), ";", 1),
            Token::new(TokenKind::Arithmetic(ArithmeticOp::Add), "+", 2),
        ];
        let mut buf = Vec::new();
        write_all(&mut buf, &tokens).unwrap();

        let records = read_all(io::Cursor::new(buf)).unwrap();
        assert_eq!(records.len(), tokens.len());
        assert_eq!(records[0].lexeme, "x");
        assert_eq!(records[4].line, 2);
    }

    #[test]
    fn malformed_record_without_enough_commas_is_rejected() {
        assert!(parse_record("justonefield").is_err());
        assert!(parse_record("Identifier,onlyonecomma").is_err());
    }

    #[test]
    fn non_numeric_line_field_is_rejected() {
        assert!(parse_record("Identifier,x,notaline").is_err());
    }
}
