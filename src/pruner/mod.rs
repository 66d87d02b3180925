//! Pruning module turning the parse tree into a minimal AST.
//!
//! Runs after analysis, on the same tree, and rewrites it in place:
//!
//! - Left-recursive lists become flat, source-ordered sequences
//! - Wrapper nonterminals and punctuation are dropped
//! - Expression chains collapse down to operators and operands
//!
//! The pass is structural only and never looks at the symbol table.

pub mod decl;
pub mod expr;
pub mod pruner;
pub mod stmt;

pub use pruner::{prune, PruneError};

#[cfg(test)]
mod tests;
