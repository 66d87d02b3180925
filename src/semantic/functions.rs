//! Program-level and function contract checks.

use crate::ast::{
    ast::{ListTag, Tag, Tree},
    declarations::DeclTag,
    expressions::ExprTag,
    statements::StmtTag,
    types::Type,
};

use super::{
    analyzer::{scope_of, AnalysisContext},
    builder::{top_level_declarations, type_of},
    coercion::{dominant_type, factors},
    diagnostics::DiagnosticKind,
    symbol_table::{DeclarationKind, Scope},
};

const MAIN: &str = "principal";

/// Reports a missing `principal`. Returns whether it exists.
pub fn check_main(ctx: &mut AnalysisContext) -> bool {
    if ctx.table.function(MAIN).is_some() {
        return true;
    }

    ctx.report(DiagnosticKind::MainNotDeclared, None);
    false
}

/// Unused and uninitialized variable warnings.
///
/// Variables that already carry an error, or whose name was reported in
/// their scope, are skipped.
pub fn check_variable_usage(ctx: &mut AnalysisContext) {
    let mut warnings = vec![];

    for entry in ctx.table.entries() {
        if entry.kind != DeclarationKind::Variable
            || entry.error_count > 0
            || ctx.is_suppressed(&entry.name, &entry.scope)
        {
            continue;
        }

        let name = entry.name.clone();
        let kind = match (entry.initialized, entry.used) {
            (false, false) => DiagnosticKind::VarDeclaredNotUsed { name },
            (true, false) => DiagnosticKind::VarInitNotUsed { name },
            (false, true) => DiagnosticKind::VarUsedNotInit { name },
            (true, true) => continue,
        };
        warnings.push((kind, entry.line));
    }

    for (kind, line) in warnings {
        ctx.report(kind, Some(line));
    }
}

/// Each function declaration against its own declared return type.
pub fn check_returns(tree: &Tree, ctx: &mut AnalysisContext) {
    for declaration in top_level_declarations(tree) {
        if tree.tag(declaration) != Tag::Decl(DeclTag::FunctionDecl) {
            continue;
        }

        let declared = tree
            .child_with_tag(declaration, Tag::Decl(DeclTag::Type))
            .and_then(|tipo| type_of(tree, tipo))
            .unwrap_or(Type::Void);
        let Some(header) = tree.child_with_tag(declaration, Tag::Decl(DeclTag::Header)) else {
            continue;
        };
        let Some(id) = tree.child(header, 0) else {
            continue;
        };
        let Some(name) = tree.value(id) else {
            continue;
        };
        let scope = Scope::Function(String::from(name));
        let returns = tree.find_all(header, Tag::Stmt(StmtTag::Return));

        if returns.is_empty() {
            if declared != Type::Void {
                ctx.report(
                    DiagnosticKind::FuncReturnType {
                        name: String::from(name),
                        expected: declared,
                        found: Type::Void,
                    },
                    tree.line(id),
                );
            }
            continue;
        }

        for statement in returns {
            let Some(expression) = tree.child_with_tag(statement, Tag::Expr(ExprTag::Expression)) else {
                continue;
            };
            let found = dominant_type(&factors(tree, &ctx.table, expression, &scope), declared);
            if found != declared {
                ctx.report(
                    DiagnosticKind::FuncReturnType {
                        name: String::from(name),
                        expected: declared,
                        found,
                    },
                    tree.line(statement),
                );
            }
        }
    }
}

/// Every call site: callee existence, calls to `principal`, and arity.
pub fn check_calls(tree: &Tree, ctx: &mut AnalysisContext) {
    for call in tree.find_all(tree.root(), Tag::Expr(ExprTag::Call)) {
        let Some(name) = tree.child(call, 0).and_then(|id| tree.value(id)) else {
            continue;
        };
        let line = tree.line(call);

        let Some(expected) = ctx.table.function(name).map(|function| function.parameters.len()) else {
            ctx.report(
                DiagnosticKind::FuncNotDeclared {
                    name: String::from(name),
                },
                line,
            );
            continue;
        };

        if name == MAIN {
            if scope_of(tree, call) == Scope::Function(String::from(MAIN)) {
                ctx.report(
                    DiagnosticKind::RecursiveMainCall {
                        name: String::from(name),
                    },
                    line,
                );
            }
            ctx.report(DiagnosticKind::MainCallNotAllowed, line);
            continue;
        }

        let supplied = tree
            .child_with_tag(call, Tag::List(ListTag::Arguments))
            .map(|arguments| tree.list_items(arguments).len())
            .unwrap_or_default();

        if supplied < expected {
            ctx.report(
                DiagnosticKind::FewArguments {
                    name: String::from(name),
                },
                line,
            );
        } else if supplied > expected {
            ctx.report(
                DiagnosticKind::ManyArguments {
                    name: String::from(name),
                },
                line,
            );
        }
    }
}

/// Functions other than `principal` that are never called.
pub fn check_function_usage(ctx: &mut AnalysisContext) {
    let unused: Vec<(String, u32)> = ctx
        .table
        .entries()
        .iter()
        .filter(|entry| entry.is_function() && !entry.used && entry.name != MAIN)
        .map(|entry| (entry.name.clone(), entry.line))
        .collect();

    for (name, line) in unused {
        ctx.report(DiagnosticKind::FuncNotUsed { name }, Some(line));
    }
}
