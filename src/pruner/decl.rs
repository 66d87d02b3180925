use crate::{
    ast::{
        ast::{ListTag, NodeId, Tag, Tree},
        declarations::DeclTag,
        statements::StmtTag,
    },
    lexer::tokens::TokenKind,
};

use super::{
    expr::{prune_assignment, prune_var},
    pruner::{child, expect_tag, unexpected, PruneError},
    stmt::{empty_marker, prune_body},
};

/// Prunes the payload of one `declaracao` wrapper.
pub fn prune_declaration(tree: &mut Tree, declaration: NodeId) -> Result<NodeId, PruneError> {
    match tree.tag(declaration) {
        Tag::Decl(DeclTag::VariableDecl) => prune_var_decl(tree, declaration),
        Tag::Decl(DeclTag::FunctionDecl) => prune_function_decl(tree, declaration),
        Tag::Decl(DeclTag::VariableInit) => {
            let assignment = child(tree, declaration, 0)?;
            expect_tag(tree, assignment, Tag::Stmt(StmtTag::Assignment))?;
            prune_assignment(tree, assignment)
        }
        _ => Err(unexpected(tree, declaration, "declaracao")),
    }
}

/// The keyword leaf under a `tipo`.
fn type_leaf(tree: &Tree, ty: NodeId) -> Result<NodeId, PruneError> {
    expect_tag(tree, ty, Tag::Decl(DeclTag::Type))?;
    child(tree, ty, 0)
}

/// `declaracao_variaveis` becomes {type, lista_variaveis[var...]}.
pub fn prune_var_decl(tree: &mut Tree, declaration: NodeId) -> Result<NodeId, PruneError> {
    let ty = type_leaf(tree, child(tree, declaration, 0)?)?;
    let list = child(tree, declaration, 2)?;
    expect_tag(tree, list, Tag::List(ListTag::Variables))?;

    let mut variables = vec![];
    for var in tree.list_items(list) {
        variables.push(prune_var(tree, var)?);
    }
    tree.set_children(list, variables);
    tree.set_children(declaration, vec![ty, list]);

    Ok(declaration)
}

/// `declaracao_funcao` becomes {type?, ID, lista_parametros, corpo}.
fn prune_function_decl(tree: &mut Tree, declaration: NodeId) -> Result<NodeId, PruneError> {
    let mut children = vec![];
    let mut header = child(tree, declaration, 0)?;

    if tree.tag(header) == Tag::Decl(DeclTag::Type) {
        children.push(type_leaf(tree, header)?);
        header = child(tree, declaration, 1)?;
    }
    expect_tag(tree, header, Tag::Decl(DeclTag::Header))?;

    let name = child(tree, header, 0)?;
    expect_tag(tree, name, Tag::Token(TokenKind::Id))?;
    let parameters = child(tree, header, 2)?;
    let body = child(tree, header, 4)?;

    children.push(name);
    children.push(prune_parameters(tree, parameters)?);
    children.push(prune_body(tree, body)?);
    tree.set_children(declaration, children);

    Ok(declaration)
}

fn prune_parameters(tree: &mut Tree, list: NodeId) -> Result<NodeId, PruneError> {
    expect_tag(tree, list, Tag::List(ListTag::Parameters))?;

    let mut parameters = vec![];
    for parameter in tree.list_items(list) {
        parameters.push(prune_parameter(tree, parameter)?);
    }
    if parameters.is_empty() {
        parameters.extend(empty_marker(tree, list));
    }
    tree.set_children(list, parameters);

    Ok(list)
}

/// Flattens the per-dimension nesting of a `parametro` into
/// {type, ID, `[`, `]`, ...} on the outermost node.
fn prune_parameter(tree: &mut Tree, parameter: NodeId) -> Result<NodeId, PruneError> {
    expect_tag(tree, parameter, Tag::Decl(DeclTag::Parameter))?;

    let mut brackets = vec![];
    let mut innermost = parameter;
    while tree.children(innermost).len() == 3 {
        let first = child(tree, innermost, 0)?;
        if tree.tag(first) != Tag::Decl(DeclTag::Parameter) {
            break;
        }
        brackets.push([child(tree, innermost, 1)?, child(tree, innermost, 2)?]);
        innermost = first;
    }

    let ty = type_leaf(tree, child(tree, innermost, 0)?)?;
    let name = child(tree, innermost, 2)?;
    expect_tag(tree, name, Tag::Token(TokenKind::Id))?;

    let mut children = vec![ty, name];
    children.extend(brackets.into_iter().rev().flatten());
    tree.set_children(parameter, children);

    Ok(parameter)
}
