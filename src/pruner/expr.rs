use crate::{
    ast::{
        ast::{ListTag, NodeId, Tag, Tree},
        expressions::ExprTag,
        statements::StmtTag,
    },
    lexer::tokens::TokenKind,
};

use super::{
    pruner::{child, expect_tag, unexpected, PruneError},
    stmt::empty_marker,
};

/// Reduces an expression subtree and returns the node that replaces it.
///
/// Single-child wrappers collapse onto their child, so the returned node
/// may be a descendant of `node`.
pub fn prune_expr(tree: &mut Tree, node: NodeId) -> Result<NodeId, PruneError> {
    let arity = tree.children(node).len();

    match tree.tag(node) {
        Tag::Expr(ExprTag::Expression) if arity == 1 => {
            let inner = child(tree, node, 0)?;
            prune_expr(tree, inner)
        }
        Tag::Stmt(StmtTag::Assignment) => prune_assignment(tree, node),
        Tag::Expr(level) if level.is_binary_level() => match arity {
            1 => {
                let inner = child(tree, node, 0)?;
                prune_expr(tree, inner)
            }
            3 => {
                let (left, operator, right) =
                    (child(tree, node, 0)?, child(tree, node, 1)?, child(tree, node, 2)?);
                let operator = operator_leaf(tree, operator)?;
                let left = prune_expr(tree, left)?;
                let right = prune_expr(tree, right)?;
                tree.set_children(node, vec![left, operator, right]);
                Ok(node)
            }
            _ => Err(unexpected(tree, node, "binary expression")),
        },
        Tag::Expr(ExprTag::Unary) => match arity {
            1 => {
                let inner = child(tree, node, 0)?;
                prune_expr(tree, inner)
            }
            2 => {
                let operator = operator_leaf(tree, child(tree, node, 0)?)?;
                let operand = child(tree, node, 1)?;
                let operand = prune_expr(tree, operand)?;
                tree.set_children(node, vec![operator, operand]);
                Ok(node)
            }
            _ => Err(unexpected(tree, node, "expressao_unaria")),
        },
        Tag::Expr(ExprTag::Factor) => prune_factor(tree, node),
        Tag::Expr(ExprTag::Var) => prune_var(tree, node),
        Tag::Expr(ExprTag::Call) => prune_call(tree, node),
        _ => Err(unexpected(tree, node, "expressao")),
    }
}

fn operator_leaf(tree: &Tree, wrapper: NodeId) -> Result<NodeId, PruneError> {
    match tree.tag(wrapper) {
        Tag::Expr(tag) if tag.is_operator() => child(tree, wrapper, 0),
        _ => Err(unexpected(tree, wrapper, "operator")),
    }
}

fn prune_factor(tree: &mut Tree, factor: NodeId) -> Result<NodeId, PruneError> {
    let first = child(tree, factor, 0)?;

    match tree.tag(first) {
        Tag::Token(TokenKind::OpenParen) => {
            let inner = child(tree, factor, 1)?;
            prune_expr(tree, inner)
        }
        Tag::Expr(ExprTag::Var) => prune_var(tree, first),
        Tag::Expr(ExprTag::Call) => prune_call(tree, first),
        Tag::Expr(ExprTag::Number) => child(tree, first, 0),
        _ => Err(unexpected(tree, first, "fator")),
    }
}

/// {var, `:=`, expression}
pub fn prune_assignment(tree: &mut Tree, assignment: NodeId) -> Result<NodeId, PruneError> {
    let target = child(tree, assignment, 0)?;
    let operator = child(tree, assignment, 1)?;
    expect_tag(tree, operator, Tag::Token(TokenKind::Assignment))?;

    let value = child(tree, assignment, 2)?;
    let target = prune_var(tree, target)?;
    let value = prune_expr(tree, value)?;
    tree.set_children(assignment, vec![target, operator, value]);

    Ok(assignment)
}

/// {ID} or {ID, indice[bound...]}, the nested `indice` levels merged into
/// the outermost one.
pub fn prune_var(tree: &mut Tree, var: NodeId) -> Result<NodeId, PruneError> {
    expect_tag(tree, var, Tag::Expr(ExprTag::Var))?;
    let name = child(tree, var, 0)?;
    expect_tag(tree, name, Tag::Token(TokenKind::Id))?;

    let Some(index) = tree.child(var, 1) else {
        return Ok(var);
    };
    expect_tag(tree, index, Tag::Expr(ExprTag::Index))?;

    let mut bounds = vec![];
    let mut level = Some(index);
    while let Some(current) = level {
        level = None;
        for part in tree.children(current).iter().rev() {
            match tree.tag(*part) {
                Tag::Expr(ExprTag::Index) => level = Some(*part),
                Tag::Expr(ExprTag::Expression) => bounds.push(*part),
                Tag::Token(TokenKind::OpenBracket) | Tag::Token(TokenKind::CloseBracket) => {}
                _ => return Err(unexpected(tree, *part, "indice")),
            }
        }
    }
    bounds.reverse();

    let mut pruned = vec![];
    for bound in bounds {
        pruned.push(prune_expr(tree, bound)?);
    }
    tree.set_children(index, pruned);

    Ok(var)
}

/// {ID, lista_argumentos[expression...]}, or `[vazio]` arguments.
fn prune_call(tree: &mut Tree, call: NodeId) -> Result<NodeId, PruneError> {
    let name = child(tree, call, 0)?;
    let arguments = child(tree, call, 2)?;
    expect_tag(tree, arguments, Tag::List(ListTag::Arguments))?;

    let mut values = vec![];
    for argument in tree.list_items(arguments) {
        values.push(prune_expr(tree, argument)?);
    }
    if values.is_empty() {
        values.extend(empty_marker(tree, arguments));
    }
    tree.set_children(arguments, values);
    tree.set_children(call, vec![name, arguments]);

    Ok(call)
}
