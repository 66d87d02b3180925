use crate::{
    ast::{
        ast::{ListTag, NodeId, Tag},
        declarations::DeclTag,
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{
    expr::{parse_assignment, parse_var},
    parser::{parse_left_recursive, Parser},
    stmt::parse_body,
};

/// `declaracao : declaracao_variaveis | inicializacao_variaveis | declaracao_funcao`
pub fn parse_declaration(parser: &mut Parser) -> Result<NodeId, Error> {
    let line = parser.current_line();

    let inner = match (parser.current_token_kind(), parser.peek_kind(1)) {
        (kind, TokenKind::Colon) if kind.is_type() => parse_var_decl(parser)?,
        (kind, TokenKind::Id) if kind.is_type() => parse_function_decl(parser)?,
        (TokenKind::Id, TokenKind::OpenParen) => parse_function_decl(parser)?,
        (TokenKind::Id, _) => parse_variable_init(parser)?,
        _ => {
            return Err(parser.unexpected_detailed(
                "expected a variable declaration, an initialization or a function",
            ))
        }
    };

    Ok(parser.node(Tag::Decl(DeclTag::Declaration), line, &[inner]))
}

/// `tipo : INTEIRO | FLUTUANTE`
pub fn parse_type(parser: &mut Parser) -> Result<NodeId, Error> {
    let token = parser.current_token().clone();
    if !token.kind.is_type() {
        return Err(parser.unexpected_detailed("expected `inteiro` or `flutuante`"));
    }

    parser.advance();
    let keyword = parser.leaf(&token);
    Ok(parser.node(Tag::Decl(DeclTag::Type), token.line, &[keyword]))
}

/// `declaracao_variaveis : tipo DOIS_PONTOS lista_variaveis`
pub fn parse_var_decl(parser: &mut Parser) -> Result<NodeId, Error> {
    let line = parser.current_line();
    let ty = parse_type(parser)?;
    let colon = parser.expect_leaf(TokenKind::Colon)?;
    let variables = parse_left_recursive(
        parser,
        ListTag::Variables,
        Some(TokenKind::Comma),
        parse_var,
        |_| false,
    )?;

    Ok(parser.node(Tag::Decl(DeclTag::VariableDecl), line, &[ty, colon, variables]))
}

/// `inicializacao_variaveis : atribuicao`
pub fn parse_variable_init(parser: &mut Parser) -> Result<NodeId, Error> {
    let line = parser.current_line();
    let assignment = parse_assignment(parser)?;
    Ok(parser.node(Tag::Decl(DeclTag::VariableInit), line, &[assignment]))
}

/// `declaracao_funcao : tipo cabecalho | cabecalho`
pub fn parse_function_decl(parser: &mut Parser) -> Result<NodeId, Error> {
    let line = parser.current_line();
    let mut children = vec![];

    if parser.current_token_kind().is_type() {
        children.push(parse_type(parser)?);
    }
    children.push(parse_header(parser)?);

    Ok(parser.node(Tag::Decl(DeclTag::FunctionDecl), line, &children))
}

/// `cabecalho : ID ABRE_PARENTESE lista_parametros FECHA_PARENTESE corpo FIM`
fn parse_header(parser: &mut Parser) -> Result<NodeId, Error> {
    let line = parser.current_line();
    let name = parser.expect_leaf(TokenKind::Id)?;
    let open = parser.expect_leaf(TokenKind::OpenParen)?;
    let parameters = parse_parameters(parser)?;
    let close = parser.expect_leaf(TokenKind::CloseParen)?;
    let body = parse_body(parser)?;
    let end = parser.expect_leaf(TokenKind::Fim)?;

    Ok(parser.node(
        Tag::Decl(DeclTag::Header),
        line,
        &[name, open, parameters, close, body, end],
    ))
}

/// `lista_parametros : lista_parametros VIRGULA parametro | parametro | vazio`
fn parse_parameters(parser: &mut Parser) -> Result<NodeId, Error> {
    if parser.current_token_kind() == TokenKind::CloseParen {
        let line = parser.current_line();
        let empty = parser.empty();
        return Ok(parser.node(Tag::List(ListTag::Parameters), line, &[empty]));
    }

    parse_left_recursive(
        parser,
        ListTag::Parameters,
        Some(TokenKind::Comma),
        parse_parameter,
        |_| false,
    )
}

/// `parametro : tipo DOIS_PONTOS ID | parametro ABRE_COLCHETE FECHA_COLCHETE`
fn parse_parameter(parser: &mut Parser) -> Result<NodeId, Error> {
    let line = parser.current_line();
    let ty = parse_type(parser)?;
    let colon = parser.expect_leaf(TokenKind::Colon)?;
    let name = parser.expect_leaf(TokenKind::Id)?;
    let mut parameter = parser.node(Tag::Decl(DeclTag::Parameter), line, &[ty, colon, name]);

    while parser.current_token_kind() == TokenKind::OpenBracket {
        let open = parser.expect_leaf(TokenKind::OpenBracket)?;
        let close = parser.expect_leaf(TokenKind::CloseBracket)?;
        parameter = parser.node(Tag::Decl(DeclTag::Parameter), line, &[parameter, open, close]);
    }

    Ok(parameter)
}
