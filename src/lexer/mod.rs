//! Lexical analysis module for the T++ front end.
//!
//! This module contains the lexer (tokenizer) that converts T++ source code
//! into a stream of tokens for parsing. It handles:
//!
//! - Tokenization of source code using anchored regex patterns
//! - Recognition of keywords (with or without accents), identifiers and numbers
//! - Integer, floating point and scientific notation literals
//! - Line tracking for every token, used by the parse tree and diagnostics
//! - `{ ... }` comments and whitespace

pub mod lexer;
pub mod tokens;
