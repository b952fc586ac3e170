//! talus-util - core utilities shared by the lexer and parser.
//!
//! This crate has no dependency on the rest of the workspace: string
//! interning ([`symbol`]), typed-index collections ([`index_vec`]), source
//! locations ([`span`]), diagnostic reporting ([`diagnostic`]), and internal
//! error types ([`error`]) all live here so `talus-lex` and `talus-par` can
//! share one vocabulary for "where in the source did this come from" and
//! "what do I call a problem when I hit one".

pub mod config;
pub mod diagnostic;
pub mod error;
pub mod index_vec;
pub mod span;
pub mod symbol;

pub use diagnostic::{Diagnostic, Handler, Level};
pub use error::{DiagnosticError, DiagnosticResult, IndexVecError, IndexVecResult, SymbolError, SymbolResult};
pub use index_vec::{Idx, IndexVec};
pub use span::{FileId, Span};
pub use symbol::Symbol;

pub use rustc_hash::{FxHashMap, FxHashSet};
