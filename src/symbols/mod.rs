//! Symbol management.
//!
//! - `directory`: function table and per-function variable tables
//! - `literals`: the constant pool
//! - `memory`: virtual address allocation by segment

pub mod directory;
pub mod literals;
pub mod memory;
