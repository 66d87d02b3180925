//! Parser module for building the T++ parse tree.
//!
//! This module contains the parser that transforms a stream of tokens
//! into a grammar-shaped parse tree. Every grammar rule becomes a node of
//! the same name, and left-recursive rules keep their nested shape:
//!
//! - Declaration parsing (variables, initializations, functions, parameters)
//! - Statement parsing (bodies, conditionals, loops, read/write/return)
//! - Expression parsing, one node per precedence level
//!
//! Precedence levels are driven by the binding power lookup, statements by
//! the statement lookup keyed on their leading keyword.

pub mod decl;
pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;

#[cfg(test)]
mod tests;
