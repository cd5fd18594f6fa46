use std::fmt::Display;

use thiserror::Error;

use crate::{
    type_checker::types::{Operator, Type},
    Position,
};

pub type SemanticResult<T> = Result<T, ErrorImpl>;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_internal_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_class(&self) -> ErrorClass {
        self.internal_error.class()
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::DuplicateSymbol { .. } => "DuplicateSymbol",
            ErrorImpl::UnknownSymbol { .. } => "UnknownSymbol",
            ErrorImpl::TypeMismatch { .. } => "TypeMismatch",
            ErrorImpl::ExpectedType { .. } => "ExpectedType",
            ErrorImpl::ArityMismatch { .. } => "ArityMismatch",
            ErrorImpl::InvalidParamContext => "InvalidParamContext",
            ErrorImpl::DimensionMismatch { .. } => "DimensionMismatch",
            ErrorImpl::ElementCountMismatch { .. } => "ElementCountMismatch",
            ErrorImpl::InvalidStep => "InvalidStep",
            ErrorImpl::InvalidReturn { .. } => "InvalidReturn",
            ErrorImpl::VoidValue { .. } => "VoidValue",
            ErrorImpl::SegmentOverflow { .. } => "SegmentOverflow",
            ErrorImpl::StackUnderflow { .. } => "StackUnderflow",
            ErrorImpl::MalformedExpression { .. } => "MalformedExpression",
            ErrorImpl::UnresolvedJump { .. } => "UnresolvedJump",
            ErrorImpl::InvalidBackpatch { .. } => "InvalidBackpatch",
            ErrorImpl::UnbalancedStacks { .. } => "UnbalancedStacks",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::DuplicateSymbol { symbol } => {
                ErrorTip::Suggestion(format!("`{}` is already declared in this scope", symbol))
            }
            ErrorImpl::UnknownSymbol { symbol } => {
                ErrorTip::Suggestion(format!("`{}` is not declared", symbol))
            }
            ErrorImpl::TypeMismatch {
                operator,
                left,
                right,
            } => ErrorTip::Suggestion(format!(
                "Operator `{}` cannot combine `{}` with `{}`",
                operator, left, right
            )),
            ErrorImpl::ExpectedType { expected, received } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::ArityMismatch {
                function,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "`{}` expects {} arguments, received {}",
                function, expected, received
            )),
            ErrorImpl::InvalidParamContext => {
                ErrorTip::Suggestion(String::from("Parameters can only be declared by a function"))
            }
            ErrorImpl::DimensionMismatch {
                variable,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "`{}` has {} dimensions, but {} were used",
                variable, expected, received
            )),
            ErrorImpl::ElementCountMismatch {
                variable,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "`{}` holds {} elements, but {} were given",
                variable, expected, received
            )),
            ErrorImpl::InvalidStep => {
                ErrorTip::Suggestion(String::from("A for loop step cannot be zero"))
            }
            ErrorImpl::InvalidReturn { function } => ErrorTip::Suggestion(format!(
                "Return does not match the signature of `{}`",
                function
            )),
            ErrorImpl::VoidValue { function } => ErrorTip::Suggestion(format!(
                "`{}` returns void and cannot be used as a value",
                function
            )),
            ErrorImpl::SegmentOverflow { segment } => ErrorTip::Suggestion(format!(
                "Ran out of addresses in the {} segment",
                segment
            )),
            ErrorImpl::StackUnderflow { .. }
            | ErrorImpl::MalformedExpression { .. }
            | ErrorImpl::UnresolvedJump { .. }
            | ErrorImpl::InvalidBackpatch { .. }
            | ErrorImpl::UnbalancedStacks { .. } => ErrorTip::Suggestion(format!(
                "Internal compiler error: {}",
                self.internal_error
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.internal_error, self.position.0)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

/// Separates mistakes in the source from mistakes in the calling sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Syntax,
    Semantic,
    Internal,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message:?}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },

    #[error("symbol {symbol:?} already declared")]
    DuplicateSymbol { symbol: String },
    #[error("symbol {symbol:?} not declared")]
    UnknownSymbol { symbol: String },
    #[error("type mismatch: `{left} {operator} {right}`")]
    TypeMismatch {
        operator: Operator,
        left: Type,
        right: Type,
    },
    #[error("types do not match: expected {expected}, received {received}")]
    ExpectedType { expected: Type, received: Type },
    #[error("{function:?} expects {expected} arguments, received {received}")]
    ArityMismatch {
        function: String,
        expected: usize,
        received: usize,
    },
    #[error("parameters declared outside of a function")]
    InvalidParamContext,
    #[error("{variable:?} declared with {expected} dimensions, accessed with {received}")]
    DimensionMismatch {
        variable: String,
        expected: usize,
        received: usize,
    },
    #[error("{variable:?} holds {expected} elements, received {received}")]
    ElementCountMismatch {
        variable: String,
        expected: usize,
        received: usize,
    },
    #[error("for loop step cannot be zero")]
    InvalidStep,
    #[error("return does not match the signature of {function:?}")]
    InvalidReturn { function: String },
    #[error("{function:?} returns void and has no value")]
    VoidValue { function: String },
    #[error("{segment} segment exhausted")]
    SegmentOverflow { segment: String },

    #[error("tried to pop from an empty {stack} stack")]
    StackUnderflow { stack: String },
    #[error("malformed expression: expected {expected}, found {found}")]
    MalformedExpression { expected: String, found: String },
    #[error("{count} jumps left unresolved")]
    UnresolvedJump { count: usize },
    #[error("instruction {index} is not a pending jump")]
    InvalidBackpatch { index: usize },
    #[error("stacks not empty at statement boundary ({operands} operands, {operators} operators)")]
    UnbalancedStacks { operands: usize, operators: usize },
}

impl ErrorImpl {
    pub fn class(&self) -> ErrorClass {
        match self {
            ErrorImpl::UnrecognisedToken { .. }
            | ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::UnexpectedTokenDetailed { .. }
            | ErrorImpl::NumberParseError { .. } => ErrorClass::Syntax,
            ErrorImpl::StackUnderflow { .. }
            | ErrorImpl::MalformedExpression { .. }
            | ErrorImpl::UnresolvedJump { .. }
            | ErrorImpl::InvalidBackpatch { .. }
            | ErrorImpl::UnbalancedStacks { .. } => ErrorClass::Internal,
            _ => ErrorClass::Semantic,
        }
    }

    pub fn at(self, position: Position) -> Error {
        Error::new(self, position)
    }
}
