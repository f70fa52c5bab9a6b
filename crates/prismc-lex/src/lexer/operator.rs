//! Maximal-munch operator recognizer.
//!
//! A single table-driven function, consulted from the one place in `core`
//! that dispatches on an operator-start byte, rather than duplicating the
//! same logic across a START-phase accumulator block and a separate
//! operator state; there is exactly one copy here.

use crate::token::{ArithmeticOp, AssignOp, LogicalOp, RelationalOp, StepOp, TokenKind};

// A lone `&` would otherwise be an unknown-operator error, but the grammar
// (input-list / primary) requires `&` as its own token ahead of a
// `SpecifierIdentifier`. We give lone `&` a dedicated `AddressOf` token;
// `|` has no such grammar use, so a lone `|` stays an unknown-operator error.

/// Picks the longest operator starting at `bytes[pos]`, preferring 3-char
/// over 2-char over 1-char matches. Returns the resulting token kind and
/// how many bytes it consumed, or `None` if the byte doesn't start any
/// recognized operator (an unknown-operator lexical error).
pub fn lex_operator(bytes: &[u8], pos: usize) -> Option<(TokenKind, usize)> {
    let b0 = *bytes.get(pos)?;
    let b1 = bytes.get(pos + 1).copied();
    let b2 = bytes.get(pos + 2).copied();

    macro_rules! three {
        ($want:expr, $kind:expr) => {
            if b1 == Some($want.as_bytes()[1]) && b2 == Some($want.as_bytes()[2]) {
                return Some(($kind, 3));
            }
        };
    }
    macro_rules! two {
        ($want:expr, $kind:expr) => {
            if b1 == Some($want) {
                return Some(($kind, 2));
            }
        };
    }

    match b0 {
        b'=' => {
            two!(b'=', TokenKind::Relational(RelationalOp::Eq));
            Some((TokenKind::Assignment(AssignOp::Assign), 1))
        }
        b'!' => {
            two!(b'=', TokenKind::Relational(RelationalOp::Ne));
            Some((TokenKind::Logical(LogicalOp::Not), 1))
        }
        b'<' => {
            two!(b'=', TokenKind::Relational(RelationalOp::Le));
            Some((TokenKind::Relational(RelationalOp::Lt), 1))
        }
        b'>' => {
            two!(b'=', TokenKind::Relational(RelationalOp::Ge));
            Some((TokenKind::Relational(RelationalOp::Gt), 1))
        }
        b'+' => {
            two!(b'+', TokenKind::Step(StepOp::Increment));
            two!(b'=', TokenKind::Assignment(AssignOp::AddAssign));
            Some((TokenKind::Arithmetic(ArithmeticOp::Add), 1))
        }
        b'-' => {
            two!(b'-', TokenKind::Step(StepOp::Decrement));
            two!(b'=', TokenKind::Assignment(AssignOp::SubAssign));
            Some((TokenKind::Arithmetic(ArithmeticOp::Sub), 1))
        }
        b'*' => {
            two!(b'=', TokenKind::Assignment(AssignOp::MulAssign));
            Some((TokenKind::Arithmetic(ArithmeticOp::Mul), 1))
        }
        b'/' => {
            three!("//=", TokenKind::Assignment(AssignOp::IntDivAssign));
            two!(b'/', TokenKind::Arithmetic(ArithmeticOp::IntDiv));
            two!(b'=', TokenKind::Assignment(AssignOp::DivAssign));
            Some((TokenKind::Arithmetic(ArithmeticOp::Div), 1))
        }
        b'%' => {
            two!(b'=', TokenKind::Assignment(AssignOp::ModAssign));
            Some((TokenKind::Arithmetic(ArithmeticOp::Mod), 1))
        }
        b'^' => Some((TokenKind::Arithmetic(ArithmeticOp::Pow), 1)),
        b'~' => {
            two!(b'=', TokenKind::Assignment(AssignOp::ConcatAssign));
            None // bare `~` starts neither a known operator nor a comment marker
        }
        b'&' => {
            two!(b'&', TokenKind::Logical(LogicalOp::And));
            Some((TokenKind::AddressOf, 1))
        }
        b'|' => {
            two!(b'|', TokenKind::Logical(LogicalOp::Or));
            None
        }
        _ => None,
    }
}
