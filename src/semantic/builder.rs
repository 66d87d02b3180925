//! Symbol table construction.
//!
//! Walks the top-level declarations in order. Functions register their own
//! entry first and then every variable declared anywhere in their body,
//! under the function's scope.

use crate::{
    ast::{
        ast::{ListTag, NodeId, Tag, Tree},
        declarations::DeclTag,
        expressions::ExprTag,
        types::Type,
    },
    lexer::tokens::TokenKind,
};

use super::{
    analyzer::AnalysisContext,
    diagnostics::DiagnosticKind,
    symbol_table::{Bound, Parameter, Scope, SymbolEntry},
};

/// Arrays have at most two dimensions.
const MAX_DIMENSION: u8 = 2;

pub fn build(tree: &Tree, ctx: &mut AnalysisContext) {
    for declaration in top_level_declarations(tree) {
        match tree.tag(declaration) {
            Tag::Decl(DeclTag::VariableDecl) => declare_variables(tree, ctx, declaration, &Scope::Global),
            Tag::Decl(DeclTag::FunctionDecl) => declare_function(tree, ctx, declaration),
            _ => {}
        }
    }
}

/// The payload of every top-level `declaracao`, in source order.
pub fn top_level_declarations(tree: &Tree) -> Vec<NodeId> {
    let Some(list) = tree.child_with_tag(tree.root(), Tag::List(ListTag::Declarations)) else {
        return vec![];
    };

    tree.list_items(list)
        .into_iter()
        .filter_map(|declaration| tree.child(declaration, 0))
        .collect()
}

/// Declared type of a `tipo` node.
pub fn type_of(tree: &Tree, tipo: NodeId) -> Option<Type> {
    match tree.child(tipo, 0).map(|keyword| tree.tag(keyword)) {
        Some(Tag::Token(kind)) => Type::from_keyword(kind),
        _ => None,
    }
}

/// Bound expressions of an `indice`, outermost dimension first.
pub fn index_bounds(tree: &Tree, index: NodeId) -> Vec<NodeId> {
    let mut bounds = vec![];
    let mut current = Some(index);

    while let Some(node) = current {
        current = None;
        for child in tree.children(node).iter().rev() {
            match tree.tag(*child) {
                Tag::Expr(ExprTag::Index) => current = Some(*child),
                Tag::Expr(ExprTag::Expression) => bounds.push(*child),
                _ => {}
            }
        }
    }

    bounds.reverse();
    bounds
}

/// Classifies a bound by following single-child wrappers down to its content.
fn bound_of(tree: &Tree, expression: NodeId) -> Bound {
    let mut node = expression;
    while let [only] = tree.children(node) {
        node = *only;
    }

    match (tree.tag(node), tree.value(node)) {
        (Tag::Token(TokenKind::Id), Some(name)) => Bound::Name(String::from(name)),
        (Tag::Token(kind), Some(text)) if kind.is_number() => Bound::Literal {
            text: String::from(text),
            ty: Type::of_number(kind).unwrap_or(Type::Integer),
        },
        _ => Bound::Expression,
    }
}

/// A bound is not an integer when its last token is a float literal.
fn ends_with_float(tree: &Tree, expression: NodeId) -> bool {
    let last = tree
        .preorder(expression)
        .into_iter()
        .filter_map(|node| match tree.tag(node) {
            Tag::Token(kind) => Some(kind),
            _ => None,
        })
        .last();

    last.and_then(Type::of_number) == Some(Type::Float)
}

pub fn declare_variables(tree: &Tree, ctx: &mut AnalysisContext, declaration: NodeId, scope: &Scope) {
    let ty = tree
        .child_with_tag(declaration, Tag::Decl(DeclTag::Type))
        .and_then(|tipo| type_of(tree, tipo));
    let variables = tree.child_with_tag(declaration, Tag::List(ListTag::Variables));
    let (Some(ty), Some(variables)) = (ty, variables) else {
        return;
    };

    for var in tree.list_items(variables) {
        let Some(id) = tree.child(var, 0) else {
            continue;
        };
        let Some(name) = tree.value(id) else {
            continue;
        };
        let line = tree.line(id).unwrap_or_default();

        let bound_nodes = tree
            .child_with_tag(var, Tag::Expr(ExprTag::Index))
            .map(|index| index_bounds(tree, index))
            .unwrap_or_default();

        let mut error_count = 0;
        if bound_nodes.iter().any(|bound| ends_with_float(tree, *bound)) {
            error_count += 1;
            if ctx.suppress(name, scope) {
                ctx.report(
                    DiagnosticKind::ArrayIndexNotInt {
                        name: String::from(name),
                    },
                    Some(line),
                );
            }
        }

        let dimension = match u8::try_from(bound_nodes.len()) {
            Ok(dimension) if dimension <= MAX_DIMENSION => dimension,
            _ => {
                error_count += 1;
                ctx.report(
                    DiagnosticKind::ArrayTooManyDimensions {
                        name: String::from(name),
                        dimension: bound_nodes.len(),
                    },
                    Some(line),
                );
                MAX_DIMENSION
            }
        };
        let bounds: Vec<Bound> = bound_nodes
            .into_iter()
            .take(usize::from(dimension))
            .map(|bound| bound_of(tree, bound))
            .collect();

        if let Some(existing) = ctx.table.resolve(name, scope) {
            let existing = ctx.table.symbol_type(existing);
            ctx.report(
                DiagnosticKind::VarDeclaredPreviously {
                    name: String::from(name),
                    ty: existing,
                },
                Some(line),
            );
            continue;
        }

        let mut entry = SymbolEntry::variable(name, ty, scope.clone(), line);
        entry.dimension = dimension;
        entry.error_count = error_count;
        let mut bounds = bounds.into_iter();
        entry.dim1_size = bounds.next();
        entry.dim2_size = bounds.next();

        tracing::trace!(name, %scope, %ty, dimension = entry.dimension, "declared variable");
        ctx.table.push(entry);
    }
}

fn declare_function(tree: &Tree, ctx: &mut AnalysisContext, declaration: NodeId) {
    let ty = tree
        .child_with_tag(declaration, Tag::Decl(DeclTag::Type))
        .and_then(|tipo| type_of(tree, tipo))
        .unwrap_or(Type::Void);
    let Some(header) = tree.child_with_tag(declaration, Tag::Decl(DeclTag::Header)) else {
        return;
    };
    let Some(id) = tree.child(header, 0) else {
        return;
    };
    let Some(name) = tree.value(id) else {
        return;
    };
    let line = tree.line(id).unwrap_or_default();

    if let Some(existing) = ctx.table.resolve(name, &Scope::Global) {
        let existing = ctx.table.symbol_type(existing);
        ctx.report(
            DiagnosticKind::FuncDeclaredPreviously {
                name: String::from(name),
                ty: existing,
            },
            Some(line),
        );
        return;
    }

    let parameters = tree
        .child_with_tag(header, Tag::List(ListTag::Parameters))
        .map(|list| tree.list_items(list))
        .unwrap_or_default()
        .into_iter()
        .filter_map(|parameter| parameter_of(tree, parameter))
        .collect();

    let mut entry = SymbolEntry::function(name, ty, line, parameters);
    entry.used = name == "principal";
    tracing::trace!(name, %ty, parameters = entry.parameters.len(), "declared function");
    ctx.table.push(entry);

    let scope = Scope::Function(String::from(name));
    if let Some(body) = tree.child_with_tag(header, Tag::List(ListTag::Body)) {
        for local in tree.find_all(body, Tag::Decl(DeclTag::VariableDecl)) {
            declare_variables(tree, ctx, local, &scope);
        }
    }
}

/// `parametro` nests once per `[]` pair; the innermost holds `tipo : ID`.
fn parameter_of(tree: &Tree, parameter: NodeId) -> Option<Parameter> {
    let mut node = parameter;
    let mut dimension = 0;

    while let Some(inner) = tree.child_with_tag(node, Tag::Decl(DeclTag::Parameter)) {
        node = inner;
        dimension += 1;
    }

    let ty = tree
        .child_with_tag(node, Tag::Decl(DeclTag::Type))
        .and_then(|tipo| type_of(tree, tipo))?;
    let name = tree
        .child_with_tag(node, Tag::Token(TokenKind::Id))
        .and_then(|id| tree.value(id))?;

    Some(Parameter {
        ty,
        name: String::from(name),
        dimension,
    })
}
