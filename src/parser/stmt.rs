use crate::{
    ast::{
        ast::{ListTag, NodeId, Tag},
        statements::StmtTag,
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{
    decl::parse_var_decl,
    expr::{parse_expr, parse_var},
    parser::Parser,
};

/// Whether the current token can open an `acao`.
fn starts_action(parser: &Parser) -> bool {
    let kind = parser.current_token_kind();

    parser.get_stmt_lookup().contains_key(&kind)
        || kind.is_type()
        || kind.is_number()
        || matches!(
            kind,
            TokenKind::Id | TokenKind::OpenParen | TokenKind::Plus | TokenKind::Dash | TokenKind::Not
        )
}

/// `corpo : corpo acao | vazio`
///
/// The innermost body is always `corpo -> vazio`, so an empty body and the
/// start of a non-empty one look alike.
pub fn parse_body(parser: &mut Parser) -> Result<NodeId, Error> {
    let line = parser.current_line();
    let empty = parser.empty();
    let mut body = parser.node(Tag::List(ListTag::Body), line, &[empty]);

    while starts_action(parser) {
        let action = parse_action(parser)?;
        body = parser.node(Tag::List(ListTag::Body), line, &[body, action]);
    }

    Ok(body)
}

/// `acao : expressao | declaracao_variaveis | se | repita | leia | escreva | retorna`
pub fn parse_action(parser: &mut Parser) -> Result<NodeId, Error> {
    let line = parser.current_line();
    let kind = parser.current_token_kind();

    let inner = if let Some(handler) = parser.get_stmt_lookup().get(&kind).copied() {
        handler(parser)?
    } else if kind.is_type() {
        parse_var_decl(parser)?
    } else {
        parse_expr(parser)?
    };

    Ok(parser.node(Tag::Stmt(StmtTag::Action), line, &[inner]))
}

/// `se : SE expressao ENTAO corpo FIM | SE expressao ENTAO corpo SENAO corpo FIM`
pub fn parse_if_stmt(parser: &mut Parser) -> Result<NodeId, Error> {
    let line = parser.current_line();
    let keyword = parser.expect_leaf(TokenKind::Se)?;
    let condition = parse_expr(parser)?;
    let then = parser.expect_leaf(TokenKind::Entao)?;
    let body = parse_body(parser)?;

    let mut children = vec![keyword, condition, then, body];
    if parser.current_token_kind() == TokenKind::Senao {
        children.push(parser.expect_leaf(TokenKind::Senao)?);
        children.push(parse_body(parser)?);
    }
    children.push(parser.expect_leaf(TokenKind::Fim)?);

    Ok(parser.node(Tag::Stmt(StmtTag::If), line, &children))
}

/// `repita : REPITA corpo ATE expressao`
pub fn parse_repeat_stmt(parser: &mut Parser) -> Result<NodeId, Error> {
    let line = parser.current_line();
    let keyword = parser.expect_leaf(TokenKind::Repita)?;
    let body = parse_body(parser)?;
    let until = parser.expect_leaf(TokenKind::Ate)?;
    let condition = parse_expr(parser)?;

    Ok(parser.node(Tag::Stmt(StmtTag::Repeat), line, &[keyword, body, until, condition]))
}

/// `leia : LEIA ABRE_PARENTESE var FECHA_PARENTESE`
pub fn parse_read_stmt(parser: &mut Parser) -> Result<NodeId, Error> {
    let line = parser.current_line();
    let keyword = parser.expect_leaf(TokenKind::Leia)?;
    let open = parser.expect_leaf(TokenKind::OpenParen)?;
    let target = parse_var(parser)?;
    let close = parser.expect_leaf(TokenKind::CloseParen)?;

    Ok(parser.node(Tag::Stmt(StmtTag::Read), line, &[keyword, open, target, close]))
}

/// `escreva : ESCREVA ABRE_PARENTESE expressao FECHA_PARENTESE`
pub fn parse_write_stmt(parser: &mut Parser) -> Result<NodeId, Error> {
    parse_keyword_call(parser, TokenKind::Escreva, StmtTag::Write)
}

/// `retorna : RETORNA ABRE_PARENTESE expressao FECHA_PARENTESE`
pub fn parse_return_stmt(parser: &mut Parser) -> Result<NodeId, Error> {
    parse_keyword_call(parser, TokenKind::Retorna, StmtTag::Return)
}

fn parse_keyword_call(parser: &mut Parser, kind: TokenKind, tag: StmtTag) -> Result<NodeId, Error> {
    let line = parser.current_line();
    let keyword = parser.expect_leaf(kind)?;
    let open = parser.expect_leaf(TokenKind::OpenParen)?;
    let value = parse_expr(parser)?;
    let close = parser.expect_leaf(TokenKind::CloseParen)?;

    Ok(parser.node(Tag::Stmt(tag), line, &[keyword, open, value, close]))
}
