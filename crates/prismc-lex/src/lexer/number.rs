//! Numeric literal scanning: the `INTEGER` and `FLOAT` states.
//!
//! `scan_number` is entered with `bytes[start]` known to be a digit. It
//! returns the resulting [`TokenKind`] and the number of bytes consumed
//! from `start`; the caller ([`super::core`]) slices the lexeme and builds
//! the [`crate::token::Token`].

use crate::classify::{is_digit, is_terminator};
use crate::token::{LexErrorKind, TokenKind};

pub fn scan_number(bytes: &[u8], start: usize) -> (TokenKind, usize) {
    let mut pos = start;
    while pos < bytes.len() && is_digit(bytes[pos]) {
        pos += 1;
    }

    let mut is_float = false;
    if bytes.get(pos) == Some(&b'.') && bytes.get(pos + 1).is_some_and(|b| is_digit(*b)) {
        is_float = true;
        pos += 1; // consume '.'
        while pos < bytes.len() && is_digit(bytes[pos]) {
            pos += 1;
        }
    }

    match bytes.get(pos) {
        None => finalize(is_float, pos - start),
        Some(&b) if is_terminator(b) => finalize(is_float, pos - start),
        Some(_) => {
            // Invalid continuation: consume the maximal run of offending
            // (non-terminator) characters and report it as part of the
            // error lexeme.
            while pos < bytes.len() && !is_terminator(bytes[pos]) {
                pos += 1;
            }
            let kind = if is_float {
                LexErrorKind::InvalidFloat
            } else {
                LexErrorKind::InvalidInteger
            };
            (TokenKind::LexicalError(kind), pos - start)
        }
    }
}

fn finalize(is_float: bool, len: usize) -> (TokenKind, usize) {
    if is_float {
        (TokenKind::FloatLiteral, len)
    } else {
        (TokenKind::IntegerLiteral, len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_integer_terminates_cleanly() {
        assert_eq!(scan_number(b"42;", 0), (TokenKind::IntegerLiteral, 2));
    }

    #[test]
    fn float_with_fractional_part() {
        assert_eq!(scan_number(b"3.14 ", 0), (TokenKind::FloatLiteral, 4));
    }

    #[test]
    fn dot_without_trailing_digit_stays_integer() {
        // "1." where '.' isn't followed by a digit: the integer ends at
        // '1' and '.' is lexed separately as a delimiter by the caller.
        assert_eq!(scan_number(b"1.;", 0), (TokenKind::IntegerLiteral, 1));
    }

    #[test]
    fn trailing_letters_are_invalid_integer() {
        assert_eq!(
            scan_number(b"1abc;", 0),
            (TokenKind::LexicalError(LexErrorKind::InvalidInteger), 4)
        );
    }

    #[test]
    fn trailing_letters_after_float_are_invalid_float() {
        assert_eq!(
            scan_number(b"1.5x;", 0),
            (TokenKind::LexicalError(LexErrorKind::InvalidFloat), 4)
        );
    }
}
