//! Implicit coercion detection.
//!
//! An expression is reduced to its leaf factors (variables, calls and
//! numeric literals), each typed on its own. Factors sitting inside an
//! array index or a call's argument list belong to that index or call and
//! are left out, as are the parentheses of a grouped factor.

use crate::ast::{
    ast::{ListTag, NodeId, Tag, Tree},
    expressions::ExprTag,
    types::Type,
};

use super::{
    analyzer::AnalysisContext,
    diagnostics::{CoercionOrigin, DiagnosticKind},
    symbol_table::{Scope, SymbolTable},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactorKind {
    Variable,
    Call,
    Number,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Factor {
    pub kind: FactorKind,
    pub ty: Type,
    /// Identifier or literal text
    pub value: String,
}

/// Typed leaf factors of `expression`, in source order. Unresolved ones are skipped.
pub fn factors(tree: &Tree, table: &SymbolTable, expression: NodeId, scope: &Scope) -> Vec<Factor> {
    tree.find_all(expression, Tag::Expr(ExprTag::Factor))
        .into_iter()
        .filter(|factor| !is_nested(tree, *factor, expression))
        .filter_map(|factor| factor_of(tree, table, factor, scope))
        .collect()
}

/// Whether `factor` sits in an index or argument list below `root`.
fn is_nested(tree: &Tree, factor: NodeId, root: NodeId) -> bool {
    tree.ancestors(factor)
        .take_while(|ancestor| *ancestor != root)
        .any(|ancestor| {
            matches!(
                tree.tag(ancestor),
                Tag::Expr(ExprTag::Index) | Tag::List(ListTag::Arguments)
            )
        })
}

fn factor_of(tree: &Tree, table: &SymbolTable, factor: NodeId, scope: &Scope) -> Option<Factor> {
    let content = tree.child(factor, 0)?;

    match tree.tag(content) {
        Tag::Expr(ExprTag::Var) => {
            let name = tree.child(content, 0).and_then(|id| tree.value(id))?;
            Some(Factor {
                kind: FactorKind::Variable,
                ty: table.resolve_type(name, scope)?,
                value: String::from(name),
            })
        }
        Tag::Expr(ExprTag::Call) => {
            let name = tree.child(content, 0).and_then(|id| tree.value(id))?;
            Some(Factor {
                kind: FactorKind::Call,
                ty: table.function(name)?.ty,
                value: String::from(name),
            })
        }
        Tag::Expr(ExprTag::Number) => {
            let literal = tree.child(content, 0)?;
            let Tag::Token(kind) = tree.tag(literal) else {
                return None;
            };
            Some(Factor {
                kind: FactorKind::Number,
                ty: Type::of_number(kind)?,
                value: String::from(tree.value(literal)?),
            })
        }
        // `( expressao )` contributes through its inner factors
        _ => None,
    }
}

/// The expected type, unless some factor disagrees; then the last one that does.
pub fn dominant_type(factors: &[Factor], expected: Type) -> Type {
    factors
        .iter()
        .rev()
        .find(|factor| factor.ty != expected)
        .map(|factor| factor.ty)
        .unwrap_or(expected)
}

/// Warns when the value assigned to `target` does not have its declared type.
pub fn check_assignment(
    tree: &Tree,
    ctx: &mut AnalysisContext,
    target: &str,
    target_type: Type,
    value: NodeId,
    scope: &Scope,
    line: Option<u32>,
) {
    let factors = factors(tree, &ctx.table, value, scope);

    let mismatch = match factors.as_slice() {
        [] => None,
        [single] if single.ty != target_type => {
            let origin = match single.kind {
                FactorKind::Variable => CoercionOrigin::Variable,
                FactorKind::Call => CoercionOrigin::ReturnValue,
                FactorKind::Number => CoercionOrigin::Number,
            };
            Some((origin, single.value.clone(), single.ty))
        }
        [_] => None,
        _ => {
            let dominant = dominant_type(&factors, target_type);
            (dominant != target_type)
                .then(|| (CoercionOrigin::Expression, String::from("expressao"), dominant))
        }
    };

    if let Some((origin, value, value_type)) = mismatch {
        ctx.report(
            DiagnosticKind::ImplicitCoercion {
                origin,
                value,
                value_type,
                target: String::from(target),
                target_type,
            },
            line,
        );
    }
}
