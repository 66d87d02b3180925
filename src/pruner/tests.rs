//! Unit tests for the pruning module.

use crate::{
    ast::{
        ast::{ListTag, NodeId, Tag, Tree},
        declarations::DeclTag,
        expressions::ExprTag,
        statements::StmtTag,
    },
    lexer::tokens::TokenKind,
    parse_source,
};

use super::{prune, PruneError};

fn pruned(source: &str) -> Tree {
    let mut tree = parse_source(source, "test.tpp").unwrap();
    prune(&mut tree).unwrap();
    tree
}

fn child_names(tree: &Tree, id: NodeId) -> Vec<&'static str> {
    tree.children(id).iter().map(|child| tree.tag(*child).name()).collect()
}

fn declarations(tree: &Tree) -> Vec<NodeId> {
    let list = tree.child(tree.root(), 0).unwrap();
    tree.children(list).to_vec()
}

/// The statements of the body of the function declared at `index`.
fn body_of(tree: &Tree, index: usize) -> NodeId {
    let function = declarations(tree)[index];
    *tree.children(function).last().unwrap()
}

fn tokens(tree: &Tree) -> Vec<NodeId> {
    tree.preorder(tree.root())
        .into_iter()
        .filter(|id| tree.tag(*id).is_token())
        .collect()
}

const NESTED: &str = "inteiro principal()
  inteiro: i
  i := 0
  repita
    se i > 2 então
      i := i + 1
    senão
      leia(i)
    fim
    escreva(i)
  até i = 5
  retorna(0)
fim";

#[test]
fn test_prune_flattens_declarations() {
    let tree = pruned("inteiro: a, b\nflutuante: c[10]\ninteiro principal()\n  retorna(0)\nfim");
    let root = tree.root();

    assert_eq!(child_names(&tree, root), vec!["lista_declaracoes"]);
    let list = tree.child(root, 0).unwrap();
    assert_eq!(
        child_names(&tree, list),
        vec!["declaracao_variaveis", "declaracao_variaveis", "declaracao_funcao"]
    );

    let first = declarations(&tree)[0];
    assert_eq!(child_names(&tree, first), vec!["INTEIRO", "lista_variaveis"]);
    let variables = tree.child(first, 1).unwrap();
    assert_eq!(child_names(&tree, variables), vec!["var", "var"]);
    let names: Vec<_> = tree
        .children(variables)
        .iter()
        .map(|var| tree.value(tree.child(*var, 0).unwrap()).unwrap())
        .collect();
    assert_eq!(names, vec!["a", "b"]);

    let array = tree.child(tree.child(declarations(&tree)[1], 1).unwrap(), 0).unwrap();
    assert_eq!(child_names(&tree, array), vec!["ID", "indice"]);
    let index = tree.child(array, 1).unwrap();
    assert_eq!(child_names(&tree, index), vec!["NUM_INTEIRO"]);
    assert_eq!(tree.value(tree.child(index, 0).unwrap()), Some("10"));
}

#[test]
fn test_prune_function_declaration() {
    let tree = pruned("inteiro principal()\n  retorna(0)\nfim");
    let function = declarations(&tree)[0];

    assert_eq!(
        child_names(&tree, function),
        vec!["INTEIRO", "ID", "lista_parametros", "corpo"]
    );
    assert_eq!(child_names(&tree, tree.child(function, 2).unwrap()), vec!["vazio"]);

    let body = body_of(&tree, 0);
    assert_eq!(child_names(&tree, body), vec!["retorna"]);
    let ret = tree.child(body, 0).unwrap();
    assert_eq!(child_names(&tree, ret), vec!["RETORNA", "NUM_INTEIRO"]);
    assert_eq!(tree.line(ret), Some(2));
}

#[test]
fn test_prune_void_function_and_empty_body() {
    let tree = pruned("principal()\nfim");
    let function = declarations(&tree)[0];

    assert_eq!(child_names(&tree, function), vec!["ID", "lista_parametros", "corpo"]);
    assert_eq!(child_names(&tree, body_of(&tree, 0)), vec!["vazio"]);
}

#[test]
fn test_prune_parameters_keep_dimensions() {
    let tree = pruned(
        "flutuante media(inteiro: n, flutuante: v[][])\n  retorna(v[0][1])\nfim\nprincipal()\nfim",
    );
    let function = declarations(&tree)[0];
    let parameters = tree.child(function, 2).unwrap();

    assert_eq!(child_names(&tree, parameters), vec!["parametro", "parametro"]);
    let n = tree.child(parameters, 0).unwrap();
    assert_eq!(child_names(&tree, n), vec!["INTEIRO", "ID"]);
    let v = tree.child(parameters, 1).unwrap();
    assert_eq!(
        child_names(&tree, v),
        vec!["FLUTUANTE", "ID", "ABRE_COLCHETE", "FECHA_COLCHETE", "ABRE_COLCHETE", "FECHA_COLCHETE"]
    );
    assert_eq!(tree.value(tree.child(v, 1).unwrap()), Some("v"));

    let ret = tree.child(body_of(&tree, 0), 0).unwrap();
    let var = tree.child(ret, 1).unwrap();
    assert_eq!(child_names(&tree, var), vec!["ID", "indice"]);
    let index = tree.child(var, 1).unwrap();
    let bounds: Vec<_> = tree
        .children(index)
        .iter()
        .map(|bound| tree.value(*bound).unwrap())
        .collect();
    assert_eq!(bounds, vec!["0", "1"]);
}

#[test]
fn test_prune_expression_levels() {
    let tree = pruned("inteiro principal()\n  inteiro: x\n  x := 1 + 2 * 3\nfim");
    let body = body_of(&tree, 0);

    assert_eq!(child_names(&tree, body), vec!["declaracao_variaveis", "atribuicao"]);
    let assignment = tree.child(body, 1).unwrap();
    assert_eq!(
        child_names(&tree, assignment),
        vec!["var", "ATRIBUICAO", "expressao_aditiva"]
    );

    let sum = tree.child(assignment, 2).unwrap();
    assert_eq!(
        child_names(&tree, sum),
        vec!["NUM_INTEIRO", "MAIS", "expressao_multiplicativa"]
    );
    let product = tree.child(sum, 2).unwrap();
    assert_eq!(child_names(&tree, product), vec!["NUM_INTEIRO", "VEZES", "NUM_INTEIRO"]);
}

#[test]
fn test_prune_unary_and_parentheses() {
    let tree = pruned("inteiro principal()\n  inteiro: x, a\n  x := -(a + 1)\n  x := !a\nfim");
    let body = body_of(&tree, 0);

    let negated = tree.child(tree.child(body, 1).unwrap(), 2).unwrap();
    assert_eq!(tree.tag(negated), Tag::Expr(ExprTag::Unary));
    assert_eq!(child_names(&tree, negated), vec!["MENOS", "expressao_aditiva"]);
    let inner = tree.child(negated, 1).unwrap();
    assert_eq!(child_names(&tree, inner), vec!["var", "MAIS", "NUM_INTEIRO"]);

    let not = tree.child(tree.child(body, 2).unwrap(), 2).unwrap();
    assert_eq!(child_names(&tree, not), vec!["NEGACAO", "var"]);
}

#[test]
fn test_prune_calls() {
    let tree = pruned(
        "inteiro f(inteiro: a, inteiro: b)\n  retorna(a)\nfim\ninteiro g()\n  retorna(1)\nfim\nprincipal()\n  f(g(), 2)\nfim",
    );
    let body = body_of(&tree, 2);

    let call = tree.child(body, 0).unwrap();
    assert_eq!(tree.tag(call), Tag::Expr(ExprTag::Call));
    assert_eq!(child_names(&tree, call), vec!["ID", "lista_argumentos"]);
    let arguments = tree.child(call, 1).unwrap();
    assert_eq!(child_names(&tree, arguments), vec!["chamada_funcao", "NUM_INTEIRO"]);

    let inner = tree.child(arguments, 0).unwrap();
    let empty = tree.child(inner, 1).unwrap();
    assert_eq!(child_names(&tree, empty), vec!["vazio"]);
}

#[test]
fn test_prune_top_level_initialization() {
    let tree = pruned("inteiro: a\na := 1\nprincipal()\nfim");

    let init = declarations(&tree)[1];
    assert_eq!(tree.tag(init), Tag::Stmt(StmtTag::Assignment));
    assert_eq!(child_names(&tree, init), vec!["var", "ATRIBUICAO", "NUM_INTEIRO"]);
    assert_eq!(tree.line(init), Some(2));
}

#[test]
fn test_prune_nested_control_flow() {
    let tree = pruned(NESTED);
    let body = body_of(&tree, 0);

    assert_eq!(
        child_names(&tree, body),
        vec!["declaracao_variaveis", "atribuicao", "repita", "retorna"]
    );

    let repeat = tree.child(body, 2).unwrap();
    assert_eq!(tree.line(repeat), Some(4));
    assert_eq!(
        child_names(&tree, repeat),
        vec!["REPITA", "corpo", "ATE", "expressao_simples"]
    );
    assert_eq!(tree.line(tree.child(repeat, 2).unwrap()), Some(11));

    let loop_body = tree.child(repeat, 1).unwrap();
    assert_eq!(child_names(&tree, loop_body), vec!["se", "escreva"]);
    assert_eq!(tree.line(tree.child(loop_body, 1).unwrap()), Some(10));

    let branch = tree.child(loop_body, 0).unwrap();
    assert_eq!(
        child_names(&tree, branch),
        vec!["SE", "expressao_simples", "ENTAO", "corpo", "SENAO", "corpo", "FIM"]
    );

    let then = tree.child(branch, 3).unwrap();
    assert_eq!(child_names(&tree, then), vec!["atribuicao"]);
    assert_eq!(tree.line(tree.child(then, 0).unwrap()), Some(6));

    let otherwise = tree.child(branch, 5).unwrap();
    let read = tree.child(otherwise, 0).unwrap();
    assert_eq!(child_names(&tree, read), vec!["LEIA", "var"]);
    assert_eq!(tree.line(read), Some(8));
}

#[test]
fn test_prune_if_without_else() {
    let tree = pruned("principal()\n  inteiro: a\n  se a então\n    escreva(a)\n  fim\nfim");
    let branch = tree.child(body_of(&tree, 0), 1).unwrap();

    assert_eq!(child_names(&tree, branch), vec!["SE", "var", "ENTAO", "corpo", "FIM"]);
}

#[test]
fn test_prune_keeps_token_order_and_lines() {
    let mut tree = parse_source(NESTED, "test.tpp").unwrap();
    let before: Vec<_> = tokens(&tree)
        .into_iter()
        .map(|id| (id, tree.line(id)))
        .collect();

    prune(&mut tree).unwrap();
    let after = tokens(&tree);

    // surviving leaves are a subsequence of the original ones
    let mut remaining = before.iter();
    for id in after.iter() {
        assert!(remaining.any(|(original, _)| original == id));
    }
    for (id, line) in before.iter().filter(|(id, _)| after.contains(id)) {
        assert_eq!(tree.line(*id), *line);
    }
}

#[test]
fn test_prune_removes_glue() {
    let mut tree = parse_source(NESTED, "test.tpp").unwrap();
    let before = tree.reachable_count();
    prune(&mut tree).unwrap();

    assert!(tree.reachable_count() < before);

    let glue = [
        Tag::Decl(DeclTag::Declaration),
        Tag::Decl(DeclTag::Type),
        Tag::Decl(DeclTag::Header),
        Tag::Stmt(StmtTag::Action),
        Tag::Expr(ExprTag::Expression),
        Tag::Expr(ExprTag::Factor),
        Tag::Expr(ExprTag::Number),
        Tag::Expr(ExprTag::RelationalOp),
        Tag::Expr(ExprTag::AdditiveOp),
        Tag::Token(TokenKind::Comma),
        Tag::Token(TokenKind::Colon),
        Tag::Token(TokenKind::OpenParen),
        Tag::Token(TokenKind::CloseParen),
    ];
    for id in tree.preorder(tree.root()) {
        let tag = tree.tag(id);
        assert!(!glue.contains(&tag), "{} left in pruned tree", tag);

        if let Tag::List(_) | Tag::Expr(ExprTag::Index) = tag {
            for child in tree.children(id) {
                assert_ne!(tree.tag(*child), tag);
            }
        }
        if let Tag::Expr(level) = tag {
            if level.is_binary_level() {
                assert_eq!(tree.children(id).len(), 3);
            }
        }
    }
}

#[test]
fn test_prune_render() {
    let tree = pruned("inteiro: a\n");

    assert_eq!(
        tree.render(),
        "programa @1\n  lista_declaracoes @1\n    declaracao_variaveis @1\n      INTEIRO `inteiro` @1\n      lista_variaveis @1\n        var @1\n          ID `a` @1\n"
    );
}

#[test]
fn test_prune_twice_is_an_error() {
    let mut tree = parse_source("inteiro: a\nprincipal()\nfim", "test.tpp").unwrap();
    prune(&mut tree).unwrap();
    let count = tree.reachable_count();

    let result = prune(&mut tree);
    assert!(matches!(
        result,
        Err(PruneError::Unexpected {
            expected: "declaracao",
            found: "declaracao_variaveis",
            line: Some(1),
        })
    ));
    assert!(tree.reachable_count() <= count);
}

#[test]
fn test_prune_rejects_unexpected_root() {
    let mut tree = Tree::new();
    let body = tree.add_node(Tag::List(ListTag::Body), Some(1));
    let root = tree.root();
    tree.push_child(root, body);

    let result = prune(&mut tree);
    assert!(matches!(
        result,
        Err(PruneError::Unexpected { expected: "lista_declaracoes", found: "corpo", .. })
    ));
}

#[test]
fn test_prune_rejects_bare_root() {
    let mut tree = Tree::new();

    assert_eq!(
        prune(&mut tree),
        Err(PruneError::MissingChild {
            tag: "programa",
            index: 0
        })
    );
}
