//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::errors::errors::{Error, ErrorClass, ErrorImpl, ErrorTip};
use crate::type_checker::types::{Operator, Type};
use crate::Position;
use std::rc::Rc;

fn at_origin(error: ErrorImpl) -> Error {
    Error::new(error, Position(0, Rc::new("test.ez".to_string())))
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        Position(10, Rc::new("test.ez".to_string())),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
}

#[test]
fn test_error_position() {
    let pos = Position(42, Rc::new("test.ez".to_string()));
    let error = ErrorImpl::UnexpectedToken {
        token: "identifier".to_string(),
    }
    .at(pos.clone());

    assert_eq!(error.get_position().0, 42);
}

#[test]
fn test_type_mismatch_error() {
    let error = at_origin(ErrorImpl::TypeMismatch {
        operator: Operator::Plus,
        left: Type::Bool,
        right: Type::Int,
    });

    assert_eq!(error.get_error_name(), "TypeMismatch");
    assert_eq!(
        error.get_tip().to_string(),
        "Operator `+` cannot combine `bool` with `int`"
    );
}

#[test]
fn test_duplicate_and_unknown_symbol_errors() {
    let duplicate = at_origin(ErrorImpl::DuplicateSymbol {
        symbol: "x".to_string(),
    });
    let unknown = at_origin(ErrorImpl::UnknownSymbol {
        symbol: "foo".to_string(),
    });

    assert_eq!(duplicate.get_error_name(), "DuplicateSymbol");
    assert_eq!(unknown.get_error_name(), "UnknownSymbol");
}

#[test]
fn test_arity_mismatch_tip() {
    let error = at_origin(ErrorImpl::ArityMismatch {
        function: "sum".to_string(),
        expected: 2,
        received: 1,
    });

    assert_eq!(
        error.get_tip().to_string(),
        "`sum` expects 2 arguments, received 1"
    );
}

#[test]
fn test_error_classes() {
    assert_eq!(
        at_origin(ErrorImpl::UnexpectedToken {
            token: "}".to_string()
        })
        .get_class(),
        ErrorClass::Syntax
    );
    assert_eq!(at_origin(ErrorImpl::InvalidStep).get_class(), ErrorClass::Semantic);
    assert_eq!(
        at_origin(ErrorImpl::StackUnderflow {
            stack: "operand".to_string()
        })
        .get_class(),
        ErrorClass::Internal
    );
    assert_eq!(
        at_origin(ErrorImpl::UnresolvedJump { count: 1 }).get_class(),
        ErrorClass::Internal
    );
}

#[test]
fn test_internal_errors_are_labelled() {
    let error = at_origin(ErrorImpl::InvalidBackpatch { index: 3 });

    assert!(error
        .get_tip()
        .to_string()
        .starts_with("Internal compiler error"));
}

#[test]
fn test_error_tip_none() {
    let error = at_origin(ErrorImpl::UnrecognisedToken {
        token: "@".to_string(),
    });

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}
