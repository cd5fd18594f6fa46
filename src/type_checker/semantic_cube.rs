//! The semantic cube.
//!
//! A static `(operator, left, right) -> result` table covering every operator
//! (including assignment) against every pair of value types. A `None` cell is
//! a type error. Nothing is promoted implicitly beyond what a cell states, so
//! `combine` is the single authority on which operations are legal.
//!
//! Rows are the left operand, columns the right operand, both in
//! `int, float, string, bool` order. For assignment the left operand is the
//! destination.

use crate::errors::errors::{ErrorImpl, SemanticResult};

use super::types::{Operator, Type};

type Cell = Option<Type>;
type Grid = [[Cell; 4]; 4];

const I: Cell = Some(Type::Int);
const F: Cell = Some(Type::Float);
const S: Cell = Some(Type::String);
const B: Cell = Some(Type::Bool);
const X: Cell = None;

const ADDITION: Grid = [
    //  int float string bool
    [I, F, X, X], // int
    [F, F, X, X], // float
    [X, X, S, X], // string
    [X, X, X, X], // bool
];

const ARITHMETIC: Grid = [
    [I, F, X, X],
    [F, F, X, X],
    [X, X, X, X],
    [X, X, X, X],
];

const RELATIONAL: Grid = [
    [B, B, X, X],
    [B, B, X, X],
    [X, X, X, X],
    [X, X, X, X],
];

const EQUALITY: Grid = [
    [B, B, X, X],
    [B, B, X, X],
    [X, X, B, X],
    [X, X, X, B],
];

const LOGICAL: Grid = [
    [X, X, X, X],
    [X, X, X, X],
    [X, X, X, X],
    [X, X, X, B],
];

// int := float truncates, float := int widens.
const ASSIGNMENT: Grid = [
    [I, I, X, X],
    [F, F, X, X],
    [X, X, S, X],
    [X, X, X, B],
];

/// Indexed by `Operator::index`.
static SEMANTIC_CUBE: [Grid; 13] = [
    ADDITION,   // +
    ARITHMETIC, // -
    ARITHMETIC, // *
    ARITHMETIC, // /
    RELATIONAL, // <
    RELATIONAL, // >
    RELATIONAL, // <=
    RELATIONAL, // >=
    EQUALITY,   // ==
    EQUALITY,   // !=
    LOGICAL,    // &&
    LOGICAL,    // ||
    ASSIGNMENT, // =
];

/// Looks up the result type of `left <operator> right`.
pub fn lookup(operator: Operator, left: Type, right: Type) -> Option<Type> {
    SEMANTIC_CUBE[operator.index()][left.index()][right.index()]
}

/// Same as [`lookup`] but turns a type error into `TypeMismatch`.
pub fn combine(operator: Operator, left: Type, right: Type) -> SemanticResult<Type> {
    lookup(operator, left, right).ok_or(ErrorImpl::TypeMismatch {
        operator,
        left,
        right,
    })
}
