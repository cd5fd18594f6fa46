//! Type checking module.
//!
//! This module holds the type vocabulary of the language and the semantic
//! cube that decides, for every operator and pair of operand types, the
//! resulting type or a type error. Every binary operation and every
//! assignment the compiler emits is checked against it.

pub mod semantic_cube;
pub mod types;
