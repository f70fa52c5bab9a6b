//! Pure single-byte predicates. No allocation, no state; everything here
//! operates on ASCII bytes since source text is ASCII-only.

/// `a-zA-Z`
#[inline]
pub fn is_letter(b: u8) -> bool {
    b.is_ascii_alphabetic()
}

/// `0-9`
#[inline]
pub fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

/// A valid identifier continuation character.
#[inline]
pub fn is_alnum_or_underscore(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Horizontal whitespace. Newlines are not passed to the per-line scanner
/// (the lexer splits source into lines before dispatch), so this covers
/// only space/tab/carriage-return.
#[inline]
pub fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r')
}

/// One of the twelve delimiter characters (glossary).
#[inline]
pub fn is_delimiter(b: u8) -> bool {
    matches!(
        b,
        b',' | b'.' | b';' | b':' | b'(' | b')' | b'{' | b'}' | b'[' | b']' | b'"' | b'\''
    )
}

/// The union of first bytes of every recognized operator, including the
/// comment-marker prefixes `~` and `/`.
#[inline]
pub fn is_operator_start(b: u8) -> bool {
    matches!(
        b,
        b'=' | b'!' | b'<' | b'>' | b'+' | b'-' | b'*' | b'/' | b'%' | b'^' | b'~' | b'&' | b'|'
    )
}

/// A terminator: anything that ends an identifier/number/run — whitespace,
/// a delimiter, or the start of an operator.
#[inline]
pub fn is_terminator(b: u8) -> bool {
    is_space(b) || is_delimiter(b) || is_operator_start(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_and_digits_are_disjoint() {
        for b in 0u8..=127 {
            assert!(!(is_letter(b) && is_digit(b)));
        }
    }

    #[test]
    fn delimiter_set_matches_glossary() {
        for b in b",.;:(){}[]\"'" {
            assert!(is_delimiter(*b));
        }
        assert!(!is_delimiter(b'_'));
    }

    #[test]
    fn operator_start_covers_comment_prefixes() {
        assert!(is_operator_start(b'~'));
        assert!(is_operator_start(b'/'));
    }

    #[test]
    fn terminator_is_union_of_space_delimiter_operator() {
        assert!(is_terminator(b' '));
        assert!(is_terminator(b';'));
        assert!(is_terminator(b'+'));
        assert!(!is_terminator(b'x'));
    }
}
