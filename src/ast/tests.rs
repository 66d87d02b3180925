//! Unit tests for the tree arena.

use crate::lexer::tokens::TokenKind;

use super::{
    ast::{ListTag, Tag, Tree},
    declarations::DeclTag,
    expressions::ExprTag,
    types::Type,
};

fn sample_tree() -> Tree {
    // programa -> lista_declaracoes -> declaracao -> declaracao_variaveis -> [tipo -> INTEIRO, ID]
    let mut tree = Tree::new();
    let root = tree.root();
    let list = tree.add_node(Tag::List(ListTag::Declarations), Some(1));
    let decl = tree.add_node(Tag::Decl(DeclTag::Declaration), Some(1));
    let var_decl = tree.add_node(Tag::Decl(DeclTag::VariableDecl), Some(1));
    let ty = tree.add_node(Tag::Decl(DeclTag::Type), Some(1));
    let keyword = tree.add_token(TokenKind::Inteiro, "inteiro", 1);
    let id = tree.add_token(TokenKind::Id, "x", 1);

    tree.push_child(root, list);
    tree.push_child(list, decl);
    tree.push_child(decl, var_decl);
    tree.push_child(var_decl, ty);
    tree.push_child(ty, keyword);
    tree.push_child(var_decl, id);
    tree
}

#[test]
fn test_tag_names() {
    assert_eq!(Tag::Program.name(), "programa");
    assert_eq!(Tag::Decl(DeclTag::VariableDecl).name(), "declaracao_variaveis");
    assert_eq!(Tag::Expr(ExprTag::Call).name(), "chamada_funcao");
    assert_eq!(Tag::List(ListTag::Body).name(), "corpo");
    assert_eq!(Tag::Token(TokenKind::NumPontoFlutuante).name(), "NUM_PONTO_FLUTUANTE");
    assert_eq!(Tag::Empty.to_string(), "vazio");
}

#[test]
fn test_type_names() {
    assert_eq!(Type::Integer.to_string(), "inteiro");
    assert_eq!(Type::Float.to_string(), "flutuante");
    assert_eq!(Type::Void.to_string(), "vazio");
    assert_eq!(Type::of_number(TokenKind::NumNotacaoCientifica), Some(Type::Float));
    assert_eq!(Type::from_keyword(TokenKind::Inteiro), Some(Type::Integer));
    assert_eq!(Type::from_keyword(TokenKind::Id), None);
}

#[test]
fn test_parent_and_children_links() {
    let tree = sample_tree();
    let root = tree.root();
    let list = tree.child(root, 0).unwrap();

    assert_eq!(tree.parent(list), Some(root));
    assert_eq!(tree.parent(root), None);
    assert_eq!(tree.children(list).len(), 1);
}

#[test]
fn test_preorder_and_find_all() {
    let tree = sample_tree();
    let order: Vec<&str> = tree
        .preorder(tree.root())
        .into_iter()
        .map(|id| tree.tag(id).name())
        .collect();

    assert_eq!(
        order,
        vec!["programa", "lista_declaracoes", "declaracao", "declaracao_variaveis", "tipo", "INTEIRO", "ID"]
    );

    let ids = tree.find_all(tree.root(), Tag::Token(TokenKind::Id));
    assert_eq!(ids.len(), 1);
    assert_eq!(tree.value(ids[0]), Some("x"));
    assert_eq!(tree.line(ids[0]), Some(1));
}

#[test]
fn test_ancestors_nearest_first() {
    let tree = sample_tree();
    let id = tree.find_all(tree.root(), Tag::Token(TokenKind::Id))[0];
    let ancestors: Vec<Tag> = tree.ancestors(id).map(|a| tree.tag(a)).collect();

    assert_eq!(
        ancestors,
        vec![
            Tag::Decl(DeclTag::VariableDecl),
            Tag::Decl(DeclTag::Declaration),
            Tag::List(ListTag::Declarations),
            Tag::Program,
        ]
    );
}

#[test]
fn test_set_children_detaches_and_relinks() {
    let mut tree = sample_tree();
    let root = tree.root();
    let list = tree.child(root, 0).unwrap();
    let decl = tree.child(list, 0).unwrap();
    let var_decl = tree.child(decl, 0).unwrap();

    // Hoist the declaration over its wrapper.
    let previous = tree.set_children(list, vec![var_decl]);

    assert_eq!(previous, vec![decl]);
    assert_eq!(tree.parent(var_decl), Some(list));
    assert_eq!(tree.parent(decl), None);
    assert!(tree.children(decl).is_empty());
    assert_eq!(tree.reachable_count(), 6);
}

#[test]
fn test_list_items_unrolls_left_recursion() {
    // lista_variaveis -> [lista_variaveis -> [lista_variaveis -> [a], ',', b], ',', c]
    let mut tree = Tree::new();
    let mut list = None;

    for name in ["a", "b", "c"] {
        let item = tree.add_token(TokenKind::Id, name, 1);
        let node = tree.add_node(Tag::List(ListTag::Variables), Some(1));
        if let Some(previous) = list {
            let comma = tree.add_token(TokenKind::Comma, ",", 1);
            tree.push_child(node, previous);
            tree.push_child(node, comma);
        }
        tree.push_child(node, item);
        list = Some(node);
    }

    let items = tree.list_items(list.unwrap());
    let names: Vec<Option<&str>> = items.iter().map(|id| tree.value(*id)).collect();
    assert_eq!(names, vec![Some("a"), Some("b"), Some("c")]);
}

#[test]
fn test_list_items_skips_empty_marker() {
    let mut tree = Tree::new();
    let list = tree.add_node(Tag::List(ListTag::Arguments), Some(1));
    let empty = tree.add_node(Tag::Empty, Some(1));
    tree.push_child(list, empty);

    assert!(tree.list_items(list).is_empty());
}

#[test]
fn test_render() {
    let tree = sample_tree();
    let rendered = tree.render();

    assert!(rendered.starts_with("programa @1\n  lista_declaracoes @1\n"));
    assert!(rendered.contains("          INTEIRO `inteiro` @1\n"));
    assert!(rendered.ends_with("        ID `x` @1\n"));
}
