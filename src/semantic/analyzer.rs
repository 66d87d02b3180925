//! Analysis entry points and the state threaded through every phase.

use std::collections::HashSet;

use crate::ast::{
    ast::{NodeId, Tag, Tree},
    declarations::DeclTag,
};

use super::{
    builder::build,
    diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink, Severity},
    functions::{check_calls, check_function_usage, check_main, check_returns, check_variable_usage},
    symbol_table::{Scope, SymbolTable},
    usage::check_usage,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Stop right after reporting a missing `principal`.
    pub halt_on_missing_main: bool,
}

/// Mutable state shared by the phases of one analysis run.
pub struct AnalysisContext<'a> {
    pub table: SymbolTable,
    pub options: AnalysisOptions,
    /// (name, scope) pairs already reported
    reported: HashSet<(String, Scope)>,
    sink: &'a mut dyn DiagnosticSink,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(options: AnalysisOptions, sink: &'a mut dyn DiagnosticSink) -> Self {
        AnalysisContext {
            table: SymbolTable::new(),
            options,
            reported: HashSet::new(),
            sink,
        }
    }

    pub fn report(&mut self, kind: DiagnosticKind, line: Option<u32>) {
        tracing::debug!(code = kind.code(), ?line, "{}", kind);
        self.sink.report(Diagnostic::new(kind, line));
    }

    /// Records (name, scope) as reported. Returns `false` if it already was.
    pub fn suppress(&mut self, name: &str, scope: &Scope) -> bool {
        self.reported.insert((String::from(name), scope.clone()))
    }

    pub fn is_suppressed(&self, name: &str, scope: &Scope) -> bool {
        self.reported
            .contains(&(String::from(name), scope.clone()))
    }
}

/// The scope a node belongs to: the function whose header encloses it, or global.
pub fn scope_of(tree: &Tree, node: NodeId) -> Scope {
    tree.ancestors(node)
        .find(|ancestor| tree.tag(*ancestor) == Tag::Decl(DeclTag::Header))
        .and_then(|header| tree.child(header, 0))
        .and_then(|name| tree.value(name))
        .map(|name| Scope::Function(String::from(name)))
        .unwrap_or(Scope::Global)
}

/// Result of a full analysis run.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub table: SymbolTable,
    pub diagnostics: Vec<Diagnostic>,
}

impl Analysis {
    pub fn has_fatal(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diagnostic| diagnostic.severity() == Severity::Fatal)
    }

    /// Whether any fatal or error diagnostic was produced.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diagnostic| diagnostic.severity() != Severity::Warning)
    }

    pub fn count(&self, code: &str) -> usize {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.code() == code)
            .count()
    }
}

pub fn analyze(tree: &Tree) -> Analysis {
    analyze_with(tree, AnalysisOptions::default())
}

pub fn analyze_with(tree: &Tree, options: AnalysisOptions) -> Analysis {
    let mut diagnostics = vec![];
    let table = run(tree, options, &mut diagnostics);

    Analysis { table, diagnostics }
}

/// Runs every phase over `tree`, streaming diagnostics into `sink`.
///
/// The tree must be the unpruned parse tree.
pub fn run(tree: &Tree, options: AnalysisOptions, sink: &mut dyn DiagnosticSink) -> SymbolTable {
    let mut ctx = AnalysisContext::new(options, sink);

    {
        let _span = tracing::info_span!("build").entered();
        build(tree, &mut ctx);
        tracing::debug!(entries = ctx.table.len(), "symbol table built");
    }

    if !check_main(&mut ctx) && ctx.options.halt_on_missing_main {
        tracing::debug!("halting after missing principal");
        return ctx.table;
    }

    {
        let _span = tracing::info_span!("usage").entered();
        check_usage(tree, &mut ctx);
        check_variable_usage(&mut ctx);
    }

    {
        let _span = tracing::info_span!("functions").entered();
        check_returns(tree, &mut ctx);
        check_calls(tree, &mut ctx);
        check_function_usage(&mut ctx);
    }

    ctx.table
}
