//! Grammar driver.
//!
//! Recognises the Ez language by recursive descent over the token stream
//! and calls the [`Compiler`](crate::compiler::compiler::Compiler) hooks in
//! recognition order. No syntax tree is built:
//!
//! - page structure and declarations (`decl`)
//! - statements, dispatched by their first token (`stmt`, `lookups`)
//! - expressions, one function per precedence level (`expr`)
//! - UI elements inside `render` (`render`)

pub mod decl;
pub mod expr;
pub mod lookups;
pub mod parser;
pub mod render;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;
