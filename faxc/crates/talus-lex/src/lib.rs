//! talus-lex - conditional (mode-switching) lexical analyzer.
//!
//! Transforms a UTF-8 source buffer into a flat stream of [`Token`]s. The
//! lexer tracks a persistent [`Condition`] alongside its byte cursor — most
//! of the condition machine (`STRING`, the two comment conditions) resolves
//! within a single [`Lexer::next_token`] call, but `USE_LIB` and `UNIT_PATH`
//! genuinely span several calls, interleaved with `WHITESPACE`/`NEWLINE`
//! tokens emitted along the way.
//!
//! ```
//! use talus_util::Handler;
//! use talus_lex::{Lexer, TokenKind};
//!
//! let handler = Handler::new();
//! let mut lexer = Lexer::new("x + 1", &handler);
//! assert_eq!(lexer.next_token().kind, TokenKind::Ident);
//! assert_eq!(lexer.next_token().kind, TokenKind::Whitespace);
//! assert_eq!(lexer.next_token().kind, TokenKind::Plus);
//! ```

pub mod cursor;
pub mod error;
pub mod lexer;
pub mod token;
pub mod unicode;

#[cfg(test)]
mod edge_cases;

pub use cursor::Cursor;
pub use error::LexError;
pub use lexer::{Condition, Lexer};
pub use token::{Token, TokenKind};
