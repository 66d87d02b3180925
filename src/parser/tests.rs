//! Unit tests for the parser module.
//!
//! This module checks the tree shape produced for the T++ grammar:
//! - Declarations and their left-recursive lists
//! - Function headers, parameters and bodies
//! - Statements
//! - Expression precedence levels
//! - Error reporting

use std::rc::Rc;

use super::parser::parse;
use crate::{
    ast::{
        ast::{NodeId, Tag, Tree},
        expressions::ExprTag,
        statements::StmtTag,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::{lexer::tokenize, tokens::TokenKind},
};

fn parse_str(source: &str) -> Result<Tree, Error> {
    let tokens = tokenize(source.to_string(), Some("test.tpp".to_string())).unwrap();
    parse(tokens, Rc::new("test.tpp".to_string()))
}

fn child_names(tree: &Tree, id: NodeId) -> Vec<&'static str> {
    tree.children(id).iter().map(|child| tree.tag(*child).name()).collect()
}

fn first(tree: &Tree, tag: Tag) -> NodeId {
    tree.find_all(tree.root(), tag)[0]
}

#[test]
fn test_parse_variable_declaration() {
    let tree = parse_str("inteiro: a, b[10]").unwrap();
    let root = tree.root();

    assert_eq!(child_names(&tree, root), vec!["lista_declaracoes"]);
    let list = tree.child(root, 0).unwrap();
    assert_eq!(child_names(&tree, list), vec!["declaracao"]);

    let decl = first(&tree, Tag::Decl(crate::ast::declarations::DeclTag::VariableDecl));
    assert_eq!(child_names(&tree, decl), vec!["tipo", "DOIS_PONTOS", "lista_variaveis"]);

    let variables = tree.child(decl, 2).unwrap();
    assert_eq!(child_names(&tree, variables), vec!["lista_variaveis", "VIRGULA", "var"]);

    let last = tree.child(variables, 2).unwrap();
    assert_eq!(child_names(&tree, last), vec!["ID", "indice"]);
    let index = tree.child(last, 1).unwrap();
    assert_eq!(
        child_names(&tree, index),
        vec!["ABRE_COLCHETE", "expressao", "FECHA_COLCHETE"]
    );
}

#[test]
fn test_parse_declaration_list_is_left_recursive() {
    let tree = parse_str("inteiro: a\nflutuante: b\ninteiro: c").unwrap();
    let list = tree.child(tree.root(), 0).unwrap();

    assert_eq!(child_names(&tree, list), vec!["lista_declaracoes", "declaracao"]);
    let inner = tree.child(list, 0).unwrap();
    assert_eq!(child_names(&tree, inner), vec!["lista_declaracoes", "declaracao"]);
    let innermost = tree.child(inner, 0).unwrap();
    assert_eq!(child_names(&tree, innermost), vec!["declaracao"]);
}

#[test]
fn test_parse_two_dimensional_index() {
    let tree = parse_str("flutuante: m[2][3]").unwrap();
    let index = first(&tree, Tag::Expr(ExprTag::Index));

    assert_eq!(
        child_names(&tree, index),
        vec!["indice", "ABRE_COLCHETE", "expressao", "FECHA_COLCHETE"]
    );
}

#[test]
fn test_parse_function_declaration() {
    let tree = parse_str("inteiro principal()\n  retorna(0)\nfim").unwrap();
    let function = first(&tree, Tag::Decl(crate::ast::declarations::DeclTag::FunctionDecl));
    assert_eq!(child_names(&tree, function), vec!["tipo", "cabecalho"]);

    let header = tree.child(function, 1).unwrap();
    assert_eq!(
        child_names(&tree, header),
        vec!["ID", "ABRE_PARENTESE", "lista_parametros", "FECHA_PARENTESE", "corpo", "FIM"]
    );

    let parameters = tree.child(header, 2).unwrap();
    assert_eq!(child_names(&tree, parameters), vec!["vazio"]);

    let body = tree.child(header, 4).unwrap();
    assert_eq!(child_names(&tree, body), vec!["corpo", "acao"]);
    let empty_body = tree.child(body, 0).unwrap();
    assert_eq!(child_names(&tree, empty_body), vec!["vazio"]);

    let action = tree.child(body, 1).unwrap();
    assert_eq!(child_names(&tree, action), vec!["retorna"]);
}

#[test]
fn test_parse_untyped_function_with_parameters() {
    let tree = parse_str("soma(inteiro: a, flutuante: b[])\nfim").unwrap();
    let function = first(&tree, Tag::Decl(crate::ast::declarations::DeclTag::FunctionDecl));
    assert_eq!(child_names(&tree, function), vec!["cabecalho"]);

    let header = tree.child(function, 0).unwrap();
    let parameters = tree.child(header, 2).unwrap();
    assert_eq!(
        child_names(&tree, parameters),
        vec!["lista_parametros", "VIRGULA", "parametro"]
    );

    let array_parameter = tree.child(parameters, 2).unwrap();
    assert_eq!(
        child_names(&tree, array_parameter),
        vec!["parametro", "ABRE_COLCHETE", "FECHA_COLCHETE"]
    );
    let inner = tree.child(array_parameter, 0).unwrap();
    assert_eq!(child_names(&tree, inner), vec!["tipo", "DOIS_PONTOS", "ID"]);
}

#[test]
fn test_parse_expression_levels() {
    let tree = parse_str("a := 1 + 2 * 3").unwrap();
    let assignment = first(&tree, Tag::Stmt(StmtTag::Assignment));
    assert_eq!(child_names(&tree, assignment), vec!["var", "ATRIBUICAO", "expressao"]);

    let additive = first(&tree, Tag::Expr(ExprTag::Additive));
    assert_eq!(
        child_names(&tree, additive),
        vec!["expressao_aditiva", "operador_soma", "expressao_multiplicativa"]
    );

    let right = tree.child(additive, 2).unwrap();
    assert_eq!(
        child_names(&tree, right),
        vec!["expressao_multiplicativa", "operador_multiplicacao", "expressao_unaria"]
    );

    let logical = first(&tree, Tag::Expr(ExprTag::Logical));
    assert_eq!(child_names(&tree, logical), vec!["expressao_simples"]);
}

#[test]
fn test_parse_relational_and_logical_operators() {
    let tree = parse_str("a := b >= 1 && c <> 2").unwrap();
    let logical = first(&tree, Tag::Expr(ExprTag::Logical));
    assert_eq!(
        child_names(&tree, logical),
        vec!["expressao_logica", "operador_logico", "expressao_simples"]
    );

    let relational = tree.find_all(tree.root(), Tag::Expr(ExprTag::RelationalOp));
    let operators: Vec<Option<&str>> = relational
        .iter()
        .map(|op| tree.value(tree.child(*op, 0).unwrap()))
        .collect();
    assert_eq!(operators, vec![Some(">="), Some("<>")]);
}

#[test]
fn test_parse_unary_and_parentheses() {
    let tree = parse_str("a := -(b + 1)\nc := !d").unwrap();
    let unary = tree.find_all(tree.root(), Tag::Expr(ExprTag::Unary));

    let negated = unary
        .iter()
        .copied()
        .find(|id| tree.children(*id).len() == 2)
        .unwrap();
    assert_eq!(child_names(&tree, negated), vec!["operador_soma", "fator"]);
    let factor = tree.child(negated, 1).unwrap();
    assert_eq!(
        child_names(&tree, factor),
        vec!["ABRE_PARENTESE", "expressao", "FECHA_PARENTESE"]
    );

    let negation = first(&tree, Tag::Expr(ExprTag::NegationOp));
    assert_eq!(child_names(&tree, negation), vec!["NEGACAO"]);
}

#[test]
fn test_parse_calls() {
    let tree = parse_str("a := f(1, x) + g()").unwrap();
    let calls = tree.find_all(tree.root(), Tag::Expr(ExprTag::Call));
    assert_eq!(calls.len(), 2);

    assert_eq!(
        child_names(&tree, calls[0]),
        vec!["ID", "ABRE_PARENTESE", "lista_argumentos", "FECHA_PARENTESE"]
    );
    let arguments = tree.child(calls[0], 2).unwrap();
    assert_eq!(
        child_names(&tree, arguments),
        vec!["lista_argumentos", "VIRGULA", "expressao"]
    );

    let empty = tree.child(calls[1], 2).unwrap();
    assert_eq!(child_names(&tree, empty), vec!["vazio"]);
}

#[test]
fn test_parse_if_else_statement() {
    let source = "principal()\n  se a > 1 então\n    a := 1\n  senão\n    a := 2\n  fim\nfim";
    let tree = parse_str(source).unwrap();
    let conditional = first(&tree, Tag::Stmt(StmtTag::If));

    assert_eq!(
        child_names(&tree, conditional),
        vec!["SE", "expressao", "ENTAO", "corpo", "SENAO", "corpo", "FIM"]
    );
    assert_eq!(tree.line(conditional), Some(2));
}

#[test]
fn test_parse_if_without_else() {
    let tree = parse_str("principal()\n  se a então\n    leia(a)\n  fim\nfim").unwrap();
    let conditional = first(&tree, Tag::Stmt(StmtTag::If));

    assert_eq!(
        child_names(&tree, conditional),
        vec!["SE", "expressao", "ENTAO", "corpo", "FIM"]
    );
}

#[test]
fn test_parse_repeat_read_write() {
    let source = "principal()\n  repita\n    leia(v[i])\n    escreva(v[i] * 2)\n  até i = 10\nfim";
    let tree = parse_str(source).unwrap();

    let repeat = first(&tree, Tag::Stmt(StmtTag::Repeat));
    assert_eq!(child_names(&tree, repeat), vec!["REPITA", "corpo", "ATE", "expressao"]);

    let read = first(&tree, Tag::Stmt(StmtTag::Read));
    assert_eq!(
        child_names(&tree, read),
        vec!["LEIA", "ABRE_PARENTESE", "var", "FECHA_PARENTESE"]
    );

    let write = first(&tree, Tag::Stmt(StmtTag::Write));
    assert_eq!(
        child_names(&tree, write),
        vec!["ESCREVA", "ABRE_PARENTESE", "expressao", "FECHA_PARENTESE"]
    );
}

#[test]
fn test_parse_local_declaration_in_body() {
    let tree = parse_str("principal()\n  flutuante: x\n  x := 1.5\nfim").unwrap();
    let actions = tree.find_all(tree.root(), Tag::Stmt(StmtTag::Action));

    assert_eq!(actions.len(), 2);
    assert_eq!(child_names(&tree, actions[0]), vec!["declaracao_variaveis"]);
    assert_eq!(child_names(&tree, actions[1]), vec!["expressao"]);
}

#[test]
fn test_parse_indexed_assignment_target() {
    let tree = parse_str("v[i + 1] := 2").unwrap();
    let assignment = first(&tree, Tag::Stmt(StmtTag::Assignment));
    let target = tree.child(assignment, 0).unwrap();

    assert_eq!(child_names(&tree, target), vec!["ID", "indice"]);
}

#[test]
fn test_parse_tracks_lines() {
    let tree = parse_str("inteiro: a\n\n{ comment }\nflutuante: b").unwrap();
    let ids = tree.find_all(tree.root(), Tag::Token(TokenKind::Id));

    assert_eq!(tree.value(ids[1]), Some("b"));
    assert_eq!(tree.line(ids[1]), Some(4));
}

#[test]
fn test_parse_missing_fim_fails() {
    let result = parse_str("principal()\n  a := 1\n");

    assert!(matches!(
        result.unwrap_err().get_impl(),
        ErrorImpl::UnexpectedToken { .. }
    ));
}

#[test]
fn test_parse_bad_declaration_fails() {
    let result = parse_str("inteiro a");

    assert!(result.is_err());
}

#[test]
fn test_parse_empty_program_fails() {
    let result = parse_str("{ nothing here }");

    assert!(matches!(
        result.unwrap_err().get_impl(),
        ErrorImpl::UnexpectedTokenDetailed { .. }
    ));
}
