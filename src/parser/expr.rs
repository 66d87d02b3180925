use crate::{
    ast::{
        ast::{ListTag, NodeId, Tag},
        expressions::ExprTag,
        statements::StmtTag,
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{
    lookups::BindingPower,
    parser::{parse_left_recursive, Parser},
};

/// `expressao : expressao_logica | atribuicao`
pub fn parse_expr(parser: &mut Parser) -> Result<NodeId, Error> {
    let line = parser.current_line();

    let inner = if is_assignment_ahead(parser) {
        parse_assignment(parser)?
    } else {
        parse_binary_expr(parser, BindingPower::Logical)?
    };

    Ok(parser.node(Tag::Expr(ExprTag::Expression), line, &[inner]))
}

/// An assignment starts with `ID`, any number of balanced `[...]` groups and `:=`.
fn is_assignment_ahead(parser: &Parser) -> bool {
    if parser.current_token_kind() != TokenKind::Id {
        return false;
    }

    let mut offset = 1;
    let mut depth = 0usize;

    loop {
        match parser.peek_kind(offset) {
            TokenKind::OpenBracket => depth += 1,
            TokenKind::CloseBracket if depth > 0 => depth -= 1,
            TokenKind::Assignment if depth == 0 => return true,
            TokenKind::EOF => return false,
            _ if depth == 0 => return false,
            _ => {}
        }
        offset += 1;
    }
}

/// `atribuicao : var ATRIBUICAO expressao`
pub fn parse_assignment(parser: &mut Parser) -> Result<NodeId, Error> {
    let line = parser.current_line();
    let target = parse_var(parser)?;
    let operator = parser.expect_leaf(TokenKind::Assignment)?;
    let value = parse_expr(parser)?;

    Ok(parser.node(Tag::Stmt(StmtTag::Assignment), line, &[target, operator, value]))
}

/// One left-recursive precedence level, e.g.
/// `expressao_aditiva : expressao_multiplicativa | expressao_aditiva operador_soma expressao_multiplicativa`.
pub fn parse_binary_expr(parser: &mut Parser, bp: BindingPower) -> Result<NodeId, Error> {
    if bp == BindingPower::Unary {
        return parse_unary_expr(parser);
    }

    let line = parser.current_line();
    let level = Tag::Expr(bp.level_tag());
    let first = parse_binary_expr(parser, bp.next())?;
    let mut left = parser.node(level, line, &[first]);

    while parser.binding_power(parser.current_token_kind()) == Some(bp) {
        let operator = parse_operator(parser, bp)?;
        let right = parse_binary_expr(parser, bp.next())?;
        left = parser.node(level, line, &[left, operator, right]);
    }

    Ok(left)
}

fn parse_operator(parser: &mut Parser, bp: BindingPower) -> Result<NodeId, Error> {
    let token = parser.advance();
    let line = token.line;
    let leaf = parser.leaf(&token);

    match bp.operator_tag() {
        Some(tag) => Ok(parser.node(Tag::Expr(tag), line, &[leaf])),
        None => Err(parser.unexpected()),
    }
}

/// `expressao_unaria : fator | operador_soma fator | operador_negacao fator`
fn parse_unary_expr(parser: &mut Parser) -> Result<NodeId, Error> {
    let line = parser.current_line();

    let operator = match parser.current_token_kind() {
        TokenKind::Plus | TokenKind::Dash => Some(parse_operator(parser, BindingPower::Additive)?),
        TokenKind::Not => Some(parse_operator(parser, BindingPower::Unary)?),
        _ => None,
    };

    let factor = parse_factor(parser)?;
    let mut children: Vec<NodeId> = operator.into_iter().collect();
    children.push(factor);

    Ok(parser.node(Tag::Expr(ExprTag::Unary), line, &children))
}

/// `fator : ABRE_PARENTESE expressao FECHA_PARENTESE | var | chamada_funcao | numero`
fn parse_factor(parser: &mut Parser) -> Result<NodeId, Error> {
    let line = parser.current_line();

    let children = match (parser.current_token_kind(), parser.peek_kind(1)) {
        (TokenKind::OpenParen, _) => {
            let open = parser.expect_leaf(TokenKind::OpenParen)?;
            let inner = parse_expr(parser)?;
            let close = parser.expect_leaf(TokenKind::CloseParen)?;
            vec![open, inner, close]
        }
        (TokenKind::Id, TokenKind::OpenParen) => vec![parse_call(parser)?],
        (TokenKind::Id, _) => vec![parse_var(parser)?],
        (kind, _) if kind.is_number() => {
            let token = parser.advance();
            let literal = parser.leaf(&token);
            vec![parser.node(Tag::Expr(ExprTag::Number), line, &[literal])]
        }
        _ => return Err(parser.unexpected_detailed("expected an operand")),
    };

    Ok(parser.node(Tag::Expr(ExprTag::Factor), line, &children))
}

/// `var : ID | ID indice`
pub fn parse_var(parser: &mut Parser) -> Result<NodeId, Error> {
    let line = parser.current_line();
    let name = parser.expect_leaf(TokenKind::Id)?;

    if parser.current_token_kind() != TokenKind::OpenBracket {
        return Ok(parser.node(Tag::Expr(ExprTag::Var), line, &[name]));
    }

    let index = parse_index(parser)?;
    Ok(parser.node(Tag::Expr(ExprTag::Var), line, &[name, index]))
}

/// `indice : indice ABRE_COLCHETE expressao FECHA_COLCHETE | ABRE_COLCHETE expressao FECHA_COLCHETE`
fn parse_index(parser: &mut Parser) -> Result<NodeId, Error> {
    let line = parser.current_line();
    let mut index: Option<NodeId> = None;

    while parser.current_token_kind() == TokenKind::OpenBracket {
        let open = parser.expect_leaf(TokenKind::OpenBracket)?;
        let bound = parse_expr(parser)?;
        let close = parser.expect_leaf(TokenKind::CloseBracket)?;

        let mut children: Vec<NodeId> = index.into_iter().collect();
        children.extend([open, bound, close]);
        index = Some(parser.node(Tag::Expr(ExprTag::Index), line, &children));
    }

    index.ok_or_else(|| parser.unexpected())
}

/// `chamada_funcao : ID ABRE_PARENTESE lista_argumentos FECHA_PARENTESE`
fn parse_call(parser: &mut Parser) -> Result<NodeId, Error> {
    let line = parser.current_line();
    let name = parser.expect_leaf(TokenKind::Id)?;
    let open = parser.expect_leaf(TokenKind::OpenParen)?;

    let arguments = if parser.current_token_kind() == TokenKind::CloseParen {
        let empty = parser.empty();
        parser.node(Tag::List(ListTag::Arguments), line, &[empty])
    } else {
        parse_left_recursive(
            parser,
            ListTag::Arguments,
            Some(TokenKind::Comma),
            parse_expr,
            |_| false,
        )?
    };

    let close = parser.expect_leaf(TokenKind::CloseParen)?;
    Ok(parser.node(Tag::Expr(ExprTag::Call), line, &[name, open, arguments, close]))
}
