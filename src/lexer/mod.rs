//! Lexical analysis.
//!
//! Converts page source into tokens. Patterns are tried in order at the
//! current position and the first match wins, so longer operators are listed
//! before their prefixes. Keywords are identifiers found in
//! `RESERVED_LOOKUP`.

pub mod lexer;
pub mod tokens;
