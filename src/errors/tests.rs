//! Unit tests for error handling.
//!
//! This module contains tests for front-end error types and error reporting.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::Position;
use std::rc::Rc;

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "#".to_string(),
        },
        Position(10, Rc::new("test.tpp".to_string())),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
}

#[test]
fn test_error_position() {
    let pos = Position(42, Rc::new("test.tpp".to_string()));
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "fim".to_string(),
        },
        pos.clone(),
    );

    assert_eq!(error.get_position().0, 42);
    assert!(error.has_source_position());
}

#[test]
fn test_unexpected_token_detailed_error() {
    let error = Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: ")".to_string(),
            message: "expected expression".to_string(),
        },
        Position(0, Rc::new("test.tpp".to_string())),
    );

    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
    assert_eq!(error.get_tip().to_string(), "Unexpected token: `)`, expected expression");
}

#[test]
fn test_precondition_error_names() {
    let missing = Error::new(ErrorImpl::MissingSourceArgument, Position::null());
    let not_tpp = Error::new(
        ErrorImpl::NotTppFile {
            path: "prog.c".to_string(),
        },
        Position::null(),
    );
    let not_found = Error::new(
        ErrorImpl::FileNotFound {
            path: "nada.tpp".to_string(),
        },
        Position::null(),
    );

    assert_eq!(missing.get_error_name(), "ERR-SEM-USE");
    assert_eq!(not_tpp.get_error_name(), "ERR-SEM-NOT-TPP");
    assert_eq!(not_found.get_error_name(), "ERR-SEM-FILE-NOT-EXISTS");
    assert!(!not_found.has_source_position());
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "#".to_string(),
        },
        Position(0, Rc::new("test.tpp".to_string())),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggestion() {
    let error = Error::new(
        ErrorImpl::NotTppFile {
            path: "prog.c".to_string(),
        },
        Position::null(),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(tip) => assert_eq!(tip, "`prog.c` is not a .tpp file"),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_error_display_uses_impl_message() {
    let error = Error::new(
        ErrorImpl::FileNotFound {
            path: "x.tpp".to_string(),
        },
        Position::null(),
    );

    assert_eq!(error.to_string(), "file not found: \"x.tpp\"");
}
