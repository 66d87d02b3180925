use std::collections::HashMap;

use crate::{
    ast::{ast::NodeId, expressions::ExprTag},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{parser::Parser, stmt::*};

/// Precedence levels of the expression grammar, loosest first.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Logical,
    Relational,
    Additive,
    Multiplicative,
    Unary,
}

impl BindingPower {
    /// The nonterminal built at this level.
    pub fn level_tag(&self) -> ExprTag {
        match self {
            BindingPower::Default => ExprTag::Expression,
            BindingPower::Logical => ExprTag::Logical,
            BindingPower::Relational => ExprTag::Simple,
            BindingPower::Additive => ExprTag::Additive,
            BindingPower::Multiplicative => ExprTag::Multiplicative,
            BindingPower::Unary => ExprTag::Unary,
        }
    }

    /// The wrapper around an operator token of this level.
    pub fn operator_tag(&self) -> Option<ExprTag> {
        match self {
            BindingPower::Logical => Some(ExprTag::LogicalOp),
            BindingPower::Relational => Some(ExprTag::RelationalOp),
            BindingPower::Additive => Some(ExprTag::AdditiveOp),
            BindingPower::Multiplicative => Some(ExprTag::MultiplicativeOp),
            BindingPower::Unary => Some(ExprTag::NegationOp),
            BindingPower::Default => None,
        }
    }

    /// The next, tighter binding level.
    pub fn next(&self) -> BindingPower {
        match self {
            BindingPower::Default => BindingPower::Logical,
            BindingPower::Logical => BindingPower::Relational,
            BindingPower::Relational => BindingPower::Additive,
            BindingPower::Additive => BindingPower::Multiplicative,
            BindingPower::Multiplicative | BindingPower::Unary => BindingPower::Unary,
        }
    }
}

pub type StmtHandler = fn(&mut Parser) -> Result<NodeId, Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Logical
    parser.operator(TokenKind::And, BindingPower::Logical);
    parser.operator(TokenKind::Or, BindingPower::Logical);

    // Relational
    parser.operator(TokenKind::Less, BindingPower::Relational);
    parser.operator(TokenKind::LessEquals, BindingPower::Relational);
    parser.operator(TokenKind::Greater, BindingPower::Relational);
    parser.operator(TokenKind::GreaterEquals, BindingPower::Relational);
    parser.operator(TokenKind::Equals, BindingPower::Relational);
    parser.operator(TokenKind::NotEquals, BindingPower::Relational);

    // Additive and multiplicative
    parser.operator(TokenKind::Plus, BindingPower::Additive);
    parser.operator(TokenKind::Dash, BindingPower::Additive);
    parser.operator(TokenKind::Star, BindingPower::Multiplicative);
    parser.operator(TokenKind::Slash, BindingPower::Multiplicative);

    // Prefix only
    parser.operator(TokenKind::Not, BindingPower::Unary);

    // Statements
    parser.stmt(TokenKind::Se, parse_if_stmt);
    parser.stmt(TokenKind::Repita, parse_repeat_stmt);
    parser.stmt(TokenKind::Leia, parse_read_stmt);
    parser.stmt(TokenKind::Escreva, parse_write_stmt);
    parser.stmt(TokenKind::Retorna, parse_return_stmt);
}

// Lookup tables inside parser struct, so it's easier
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
