//! Identifier usage checks over executable statements.
//!
//! Each identifier occurrence is either an initialization (the target of an
//! assignment or of `leia`) or a use (everything else). Callee names are
//! not variable occurrences: they only mark the called function as used.
//! An unresolved name is not reported when its statement contains a call.

use crate::ast::{
    ast::{ListTag, NodeId, Tag, Tree},
    declarations::DeclTag,
    expressions::ExprTag,
    statements::StmtTag,
};

use super::{
    analyzer::AnalysisContext,
    builder::{index_bounds, top_level_declarations},
    coercion::check_assignment,
    diagnostics::DiagnosticKind,
    symbol_table::Scope,
};

pub fn check_usage(tree: &Tree, ctx: &mut AnalysisContext) {
    for declaration in top_level_declarations(tree) {
        match tree.tag(declaration) {
            Tag::Decl(DeclTag::VariableDecl) => visit_bounds(tree, ctx, declaration, &Scope::Global),
            Tag::Decl(DeclTag::VariableInit) => {
                let calls = contains_call(tree, declaration);
                visit_uses(tree, ctx, declaration, &Scope::Global, calls)
            }
            Tag::Decl(DeclTag::FunctionDecl) => {
                let Some(header) = tree.child_with_tag(declaration, Tag::Decl(DeclTag::Header)) else {
                    continue;
                };
                let Some(name) = tree.child(header, 0).and_then(|id| tree.value(id)) else {
                    continue;
                };
                let scope = Scope::Function(String::from(name));

                if let Some(body) = tree.child_with_tag(header, Tag::List(ListTag::Body)) {
                    visit_body(tree, ctx, body, &scope);
                }
            }
            _ => {}
        }
    }
}

fn visit_body(tree: &Tree, ctx: &mut AnalysisContext, body: NodeId, scope: &Scope) {
    for action in tree.list_items(body) {
        let Some(statement) = tree.child(action, 0) else {
            continue;
        };

        let calls = contains_call(tree, statement);
        match tree.tag(statement) {
            Tag::Decl(DeclTag::VariableDecl) => visit_bounds(tree, ctx, statement, scope),
            Tag::Stmt(StmtTag::Read) => {
                if let Some(target) = tree.child_with_tag(statement, Tag::Expr(ExprTag::Var)) {
                    initialize(tree, ctx, target, None, scope, calls);
                }
            }
            _ => visit_uses(tree, ctx, statement, scope, calls),
        }
    }
}

fn contains_call(tree: &Tree, statement: NodeId) -> bool {
    !tree.find_all(statement, Tag::Expr(ExprTag::Call)).is_empty()
}

/// Identifiers in array bounds of a declaration are uses.
fn visit_bounds(tree: &Tree, ctx: &mut AnalysisContext, declaration: NodeId, scope: &Scope) {
    let calls = contains_call(tree, declaration);
    for index in tree.find_all(declaration, Tag::Expr(ExprTag::Index)) {
        if tree.parent(index).map(|parent| tree.tag(parent)) == Some(Tag::Expr(ExprTag::Var)) {
            for bound in index_bounds(tree, index) {
                visit_uses(tree, ctx, bound, scope, calls);
            }
        }
    }
}

/// Walks a subtree, treating every occurrence as a use except assignment targets.
/// `calls` is set when the enclosing statement contains a function call.
fn visit_uses(tree: &Tree, ctx: &mut AnalysisContext, node: NodeId, scope: &Scope, calls: bool) {
    match tree.tag(node) {
        Tag::List(ListTag::Body) => visit_body(tree, ctx, node, scope),
        Tag::Stmt(StmtTag::Assignment) => {
            let (Some(target), Some(value)) = (tree.child(node, 0), tree.child(node, 2)) else {
                return;
            };
            initialize(tree, ctx, target, Some(value), scope, calls);
            visit_uses(tree, ctx, value, scope, calls);
        }
        Tag::Expr(ExprTag::Call) => {
            if let Some(name) = tree.child(node, 0).and_then(|id| tree.value(id)) {
                if let Some(function) = ctx.table.function_mut(name) {
                    function.used = true;
                }
            }
            if let Some(arguments) = tree.child_with_tag(node, Tag::List(ListTag::Arguments)) {
                visit_uses(tree, ctx, arguments, scope, calls);
            }
        }
        Tag::Expr(ExprTag::Var) => {
            let Some(id) = tree.child(node, 0) else {
                return;
            };
            if let Some(name) = tree.value(id) {
                match ctx.table.resolve(name, scope) {
                    Some(symbol) => ctx.table.mark_used(symbol),
                    None if !calls => not_declared(ctx, name, scope, tree.line(id)),
                    None => {}
                }
            }
            if let Some(index) = tree.child_with_tag(node, Tag::Expr(ExprTag::Index)) {
                visit_uses(tree, ctx, index, scope, calls);
            }
        }
        _ => {
            for child in tree.children(node) {
                visit_uses(tree, ctx, *child, scope, calls);
            }
        }
    }
}

/// Handles an initializing occurrence of `target`, checking `value` for coercion.
fn initialize(
    tree: &Tree,
    ctx: &mut AnalysisContext,
    target: NodeId,
    value: Option<NodeId>,
    scope: &Scope,
    calls: bool,
) {
    let Some(id) = tree.child(target, 0) else {
        return;
    };
    let Some(name) = tree.value(id) else {
        return;
    };
    let line = tree.line(id);

    match ctx.table.resolve(name, scope) {
        Some(symbol) => {
            tracing::trace!(name, %scope, ?symbol, "initialized");
            if let Some(value) = value {
                let target_type = ctx.table.symbol_type(symbol);
                check_assignment(tree, ctx, name, target_type, value, scope, line);
            }
            ctx.table.mark_initialized(symbol);
        }
        None if !calls => not_declared(ctx, name, scope, line),
        None => {}
    }

    if let Some(index) = tree.child_with_tag(target, Tag::Expr(ExprTag::Index)) {
        visit_uses(tree, ctx, index, scope, calls);
    }
}

fn not_declared(ctx: &mut AnalysisContext, name: &str, scope: &Scope, line: Option<u32>) {
    if ctx.suppress(name, scope) {
        ctx.report(
            DiagnosticKind::VarNotDeclared {
                name: String::from(name),
            },
            line,
        );
    }
}
