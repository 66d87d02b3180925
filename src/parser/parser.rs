//! Parser implementation for building the grammar-shaped parse tree.
//!
//! This module contains the main Parser struct and the `parse` entry point.
//! The parser is recursive descent. Left-recursive grammar lists are built
//! iteratively, each iteration wrapping the previous list node in a new one,
//! so the resulting tree has exactly the shape the grammar describes.
//!
//! It maintains lookup tables for:
//! - Statement handlers, keyed by the statement's leading keyword
//! - Binding powers, which tell which precedence level an operator belongs to

use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::ast::{ListTag, NodeId, Tag, Tree},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position, Span, MK_TOKEN,
};

use super::{
    decl::parse_declaration,
    lookups::{create_token_lookups, BPLookup, BindingPower, StmtHandler, StmtLookup},
};

/// The main parser structure that maintains parsing state.
///
/// Besides the token cursor it owns the tree under construction; every
/// handler allocates its nodes straight into it.
pub struct Parser {
    /// The list of tokens to parse, always terminated by EOF
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for operator binding powers (precedence)
    binding_power_lookup: BPLookup,
    tree: Tree,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>, file: Rc<String>) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let end = tokens
                .last()
                .map(|token| token.span.end.0)
                .unwrap_or_default();
            let line = tokens.last().map(|token| token.line).unwrap_or(1);
            let span = Span {
                start: Position(end, Rc::clone(&file)),
                end: Position(end, Rc::clone(&file)),
            };
            tokens.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), span, line));
        }

        Parser {
            tokens,
            pos: 0,
            stmt_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            tree: Tree::new(),
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        self.peek(0)
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Looks `offset` tokens ahead. Past the end it keeps answering EOF.
    pub fn peek(&self, offset: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + offset).min(last)]
    }

    pub fn peek_kind(&self, offset: usize) -> TokenKind {
        self.peek(offset).kind
    }

    /// Advances to the next token and returns the previous token.
    pub fn advance(&mut self) -> Token {
        let token = self.current_token().clone();
        if token.kind != TokenKind::EOF {
            self.pos += 1;
        }
        token
    }

    /// Consumes a token of the specified kind, or fails on the current one.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        if self.current_token_kind() == expected_kind {
            return Ok(self.advance());
        }

        Err(self.unexpected())
    }

    /// Error for the current token, explaining what was expected instead.
    pub fn unexpected_detailed(&self, message: &str) -> Error {
        let token = self.current_token();
        Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: token.value.clone(),
                message: String::from(message),
            },
            token.span.start.clone(),
        )
    }

    pub fn unexpected(&self) -> Error {
        let token = self.current_token();
        Error::new(
            ErrorImpl::UnexpectedToken {
                token: token.value.clone(),
            },
            token.span.start.clone(),
        )
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Precedence level of an operator token, if it is one.
    pub fn binding_power(&self, kind: TokenKind) -> Option<BindingPower> {
        self.binding_power_lookup.get(&kind).copied()
    }

    /// Registers a binary or prefix operator at the given precedence level.
    pub fn operator(&mut self, kind: TokenKind, binding_power: BindingPower) {
        self.binding_power_lookup.insert(kind, binding_power);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    pub fn current_line(&self) -> u32 {
        self.current_token().line
    }

    /// Allocates a nonterminal holding `children`, in order.
    pub fn node(&mut self, tag: Tag, line: u32, children: &[NodeId]) -> NodeId {
        let id = self.tree.add_node(tag, Some(line));
        for child in children {
            self.tree.push_child(id, *child);
        }
        id
    }

    /// Allocates a terminal for `token`.
    pub fn leaf(&mut self, token: &Token) -> NodeId {
        self.tree.add_token(token.kind, token.value.clone(), token.line)
    }

    /// Consumes a token of the given kind and turns it into a terminal.
    pub fn expect_leaf(&mut self, kind: TokenKind) -> Result<NodeId, Error> {
        let token = self.expect(kind)?;
        Ok(self.leaf(&token))
    }

    /// The explicit empty marker, on the current line.
    pub fn empty(&mut self) -> NodeId {
        let line = self.current_line();
        self.tree.add_node(Tag::Empty, Some(line))
    }
}

/// Builds a left-recursive list: `list : list SEPARATOR item | item`.
///
/// `item` is called once per element; `separator` names the glue token
/// between elements, if any. The outermost list node is returned.
pub fn parse_left_recursive(
    parser: &mut Parser,
    tag: ListTag,
    separator: Option<TokenKind>,
    item: fn(&mut Parser) -> Result<NodeId, Error>,
    more: fn(&Parser) -> bool,
) -> Result<NodeId, Error> {
    let line = parser.current_line();
    let first = item(parser)?;
    let mut list = parser.node(Tag::List(tag), line, &[first]);

    loop {
        let glue = match separator {
            Some(kind) if parser.current_token_kind() == kind => {
                Some(parser.expect_leaf(kind)?)
            }
            Some(_) => break,
            None if more(parser) => None,
            None => break,
        };

        let next = item(parser)?;
        let mut children = vec![list];
        children.extend(glue);
        children.push(next);
        list = parser.node(Tag::List(tag), line, &children);
    }

    Ok(list)
}

/// Parses a stream of tokens into a parse tree rooted at `programa`.
///
/// This is the main entry point for parsing. It creates a parser instance,
/// initializes the lookup tables, and parses declarations until EOF.
pub fn parse(tokens: Vec<Token>, file: Rc<String>) -> Result<Tree, Error> {
    let mut parser = Parser::new(tokens, file);
    create_token_lookups(&mut parser);

    if !parser.has_tokens() {
        return Err(parser.unexpected_detailed("expected at least one declaration"));
    }

    let declarations = parse_left_recursive(
        &mut parser,
        ListTag::Declarations,
        None,
        parse_declaration,
        Parser::has_tokens,
    )?;

    let root = parser.tree.root();
    parser.tree.push_child(root, declarations);

    Ok(parser.tree)
}
