//! Error types for the T++ front end and driver.
//!
//! This module defines the errors that stop the pipeline before semantic
//! analysis starts. It includes:
//!
//! - Error structures with source position information
//! - Lexer and parser error variants
//! - Driver precondition failures (missing argument, wrong extension, missing file)
//! - Helpful tips for error display
//!
//! Semantic problems are not errors in this sense; they are reported as
//! diagnostics by the `semantic` module and never abort analysis.

pub mod errors;

#[cfg(test)]
mod tests;
