//! Intermediate code generation.
//!
//! The [`compiler::Compiler`] context is driven by the parser one grammar
//! action at a time and emits quadruples as it goes:
//!
//! - Expression evaluation over the operand and operator stacks
//! - Conditionals and loops, backpatched through the jump stack
//! - Function calls and returns
//! - Array and matrix element addressing
//! - UI elements of the `render` block

pub mod array;
pub mod call;
pub mod compiler;
pub mod expr;
pub mod quadruple;
pub mod render;
pub mod stmt;
