use std::fmt::Display;

use thiserror::Error;

use crate::Position;

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

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// Whether the error points into a source file, as opposed to a driver precondition.
    pub fn has_source_position(&self) -> bool {
        !matches!(
            self.internal_error,
            ErrorImpl::MissingSourceArgument
                | ErrorImpl::NotTppFile { .. }
                | ErrorImpl::FileNotFound { .. }
        )
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::MissingSourceArgument => "ERR-SEM-USE",
            ErrorImpl::NotTppFile { .. } => "ERR-SEM-NOT-TPP",
            ErrorImpl::FileNotFound { .. } => "ERR-SEM-FILE-NOT-EXISTS",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`", token))
            }
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::MissingSourceArgument => {
                ErrorTip::Suggestion(String::from("Usage: tpp-sema <file.tpp>"))
            }
            ErrorImpl::NotTppFile { path } => ErrorTip::Suggestion(format!(
                "`{}` is not a .tpp file",
                path
            )),
            ErrorImpl::FileNotFound { path } => {
                ErrorTip::Suggestion(format!("File `{}` does not exist", path))
            }
        }
    }
}

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

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.internal_error)
    }
}

impl std::error::Error for Error {}

#[derive(Error, Debug, Clone)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message:?}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("no source file given")]
    MissingSourceArgument,
    #[error("not a .tpp file: {path:?}")]
    NotTppFile { path: String },
    #[error("file not found: {path:?}")]
    FileNotFound { path: String },
}
