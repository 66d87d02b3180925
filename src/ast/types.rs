//! Type definitions for T++.
//!
//! T++ only knows three types: `inteiro`, `flutuante` and `vazio`. The last
//! one is never written in source; a function without an explicit return
//! type returns `vazio`.

use std::fmt::Display;

use crate::lexer::tokens::TokenKind;

/// Represents the value types of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Integer,
    Float,
    Void,
}

impl Type {
    /// Maps a type keyword (`inteiro`, `flutuante`) to its type.
    pub fn from_keyword(kind: TokenKind) -> Option<Type> {
        match kind {
            TokenKind::Inteiro => Some(Type::Integer),
            TokenKind::Flutuante => Some(Type::Float),
            _ => None,
        }
    }

    /// Types a numeric literal by its lexical form.
    ///
    /// Scientific notation is always a float, even when it denotes a whole number.
    pub fn of_number(kind: TokenKind) -> Option<Type> {
        match kind {
            TokenKind::NumInteiro => Some(Type::Integer),
            TokenKind::NumPontoFlutuante | TokenKind::NumNotacaoCientifica => Some(Type::Float),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Type::Integer => "inteiro",
            Type::Float => "flutuante",
            Type::Void => "vazio",
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
