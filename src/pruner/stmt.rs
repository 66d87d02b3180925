use crate::{
    ast::{
        ast::{ListTag, NodeId, Tag, Tree},
        declarations::DeclTag,
        expressions::ExprTag,
        statements::StmtTag,
    },
    lexer::tokens::TokenKind,
};

use super::{
    decl::prune_var_decl,
    expr::{prune_expr, prune_var},
    pruner::{child, expect_tag, unexpected, PruneError},
};

/// The `vazio` closing a left-recursive list, found by descending through
/// nested nodes of the same list tag.
pub fn empty_marker(tree: &Tree, list: NodeId) -> Option<NodeId> {
    let tag = tree.tag(list);
    let mut current = list;

    loop {
        let first = tree.child(current, 0)?;
        match tree.tag(first) {
            Tag::Empty => return Some(first),
            child_tag if child_tag == tag => current = first,
            _ => return None,
        }
    }
}

/// `corpo` becomes its statements in order, or `[vazio]` when it has none.
pub fn prune_body(tree: &mut Tree, body: NodeId) -> Result<NodeId, PruneError> {
    expect_tag(tree, body, Tag::List(ListTag::Body))?;

    let mut statements = vec![];
    for action in tree.list_items(body) {
        expect_tag(tree, action, Tag::Stmt(StmtTag::Action))?;
        let statement = child(tree, action, 0)?;
        statements.push(prune_statement(tree, statement)?);
    }

    if statements.is_empty() {
        statements.extend(empty_marker(tree, body));
    }
    tree.set_children(body, statements);

    Ok(body)
}

fn prune_statement(tree: &mut Tree, statement: NodeId) -> Result<NodeId, PruneError> {
    match tree.tag(statement) {
        Tag::Decl(DeclTag::VariableDecl) => prune_var_decl(tree, statement),
        Tag::Expr(ExprTag::Expression) => prune_expr(tree, statement),
        Tag::Stmt(StmtTag::If) => prune_if(tree, statement),
        Tag::Stmt(StmtTag::Repeat) => prune_repeat(tree, statement),
        Tag::Stmt(StmtTag::Read) => prune_read(tree, statement),
        Tag::Stmt(StmtTag::Write) | Tag::Stmt(StmtTag::Return) => prune_keyword_call(tree, statement),
        _ => Err(unexpected(tree, statement, "acao")),
    }
}

/// {SE, cond, ENTAO, corpo, (SENAO, corpo)?, FIM}, each part pruned in place.
fn prune_if(tree: &mut Tree, statement: NodeId) -> Result<NodeId, PruneError> {
    let parts = tree.children(statement).to_vec();
    if !matches!(parts.len(), 5 | 7) {
        return Err(unexpected(tree, statement, "se"));
    }

    let mut children = vec![];
    for part in parts {
        children.push(match tree.tag(part) {
            Tag::Token(_) => part,
            Tag::List(ListTag::Body) => prune_body(tree, part)?,
            _ => prune_expr(tree, part)?,
        });
    }
    tree.set_children(statement, children);

    Ok(statement)
}

/// {REPITA, corpo, ATE, cond}
fn prune_repeat(tree: &mut Tree, statement: NodeId) -> Result<NodeId, PruneError> {
    let keyword = child(tree, statement, 0)?;
    let body = child(tree, statement, 1)?;
    let until = child(tree, statement, 2)?;
    let condition = child(tree, statement, 3)?;
    expect_tag(tree, until, Tag::Token(TokenKind::Ate))?;

    let body = prune_body(tree, body)?;
    let condition = prune_expr(tree, condition)?;
    tree.set_children(statement, vec![keyword, body, until, condition]);

    Ok(statement)
}

/// {LEIA, var}
fn prune_read(tree: &mut Tree, statement: NodeId) -> Result<NodeId, PruneError> {
    let keyword = child(tree, statement, 0)?;
    let target = child(tree, statement, 2)?;
    expect_tag(tree, target, Tag::Expr(ExprTag::Var))?;

    let target = prune_var(tree, target)?;
    tree.set_children(statement, vec![keyword, target]);

    Ok(statement)
}

/// `escreva` and `retorna` become {keyword, expression}.
fn prune_keyword_call(tree: &mut Tree, statement: NodeId) -> Result<NodeId, PruneError> {
    let keyword = child(tree, statement, 0)?;
    let open = child(tree, statement, 1)?;
    expect_tag(tree, open, Tag::Token(TokenKind::OpenParen))?;

    let value = child(tree, statement, 2)?;
    let value = prune_expr(tree, value)?;
    tree.set_children(statement, vec![keyword, value]);

    Ok(statement)
}
