//! Structured lexical error kinds.
//!
//! These are descriptive labels for the four error kinds `next_token()`
//! reports through the diagnostic sink — the lexer never returns a `Result`
//! (errors never abort scanning; see `spec.md` §7), so `LexError` exists for
//! tests and callers that want a typed reason rather than a rendered string.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unexpected character '{0}'")]
    UnknownInput(char),

    #[error("unescaped newline in string literal")]
    StringNewline,

    #[error("unterminated string literal")]
    StringEnd,

    #[error("unterminated block comment")]
    MultiLineCommentEnd,
}
