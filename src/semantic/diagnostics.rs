//! Semantic diagnostics.
//!
//! Diagnostics are data, never control flow: every check pushes them into a
//! [`DiagnosticSink`] and carries on. Each one has a stable code, a severity
//! and named parameters for an external formatter; the `Display` impl is the
//! default English rendering.

use std::fmt::Display;

use thiserror::Error;

use crate::ast::types::Type;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Fatal,
    Error,
    Warning,
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Fatal => write!(f, "fatal"),
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// What kind of factor an implicitly coerced value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoercionOrigin {
    Variable,
    ReturnValue,
    Number,
    Expression,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    #[error("function `principal` is not declared")]
    MainNotDeclared,
    #[error("array `{name}` has a non-integer bound")]
    ArrayIndexNotInt { name: String },
    #[error("array `{name}` has {dimension} dimensions, at most two are allowed")]
    ArrayTooManyDimensions { name: String, dimension: usize },
    #[error("variable `{name}` is not declared")]
    VarNotDeclared { name: String },
    #[error("variable `{name}` is already declared with type `{ty}`")]
    VarDeclaredPreviously { name: String, ty: Type },
    #[error("function `{name}` is already declared with type `{ty}`")]
    FuncDeclaredPreviously { name: String, ty: Type },
    #[error("variable `{name}` is declared but never used")]
    VarDeclaredNotUsed { name: String },
    #[error("variable `{name}` is initialized but never used")]
    VarInitNotUsed { name: String },
    #[error("variable `{name}` is used but never initialized")]
    VarUsedNotInit { name: String },
    #[error("function `{name}` should return `{expected}` but returns `{found}`")]
    FuncReturnType {
        name: String,
        expected: Type,
        found: Type,
    },
    #[error("recursive call to `{name}`")]
    RecursiveMainCall { name: String },
    #[error("calling `principal` is not allowed")]
    MainCallNotAllowed,
    #[error("call to `{name}` has too few arguments")]
    FewArguments { name: String },
    #[error("call to `{name}` has too many arguments")]
    ManyArguments { name: String },
    #[error("function `{name}` is not declared")]
    FuncNotDeclared { name: String },
    #[error("function `{name}` is declared but never used")]
    FuncNotUsed { name: String },
    #[error("implicit coercion: `{value}` of type `{value_type}` assigned to `{target}` of type `{target_type}`")]
    ImplicitCoercion {
        origin: CoercionOrigin,
        value: String,
        value_type: Type,
        target: String,
        target_type: Type,
    },
}

impl DiagnosticKind {
    pub fn code(&self) -> &'static str {
        match self {
            DiagnosticKind::MainNotDeclared => "ERR-SEM-MAIN-NOT-DECL",
            DiagnosticKind::ArrayIndexNotInt { .. } => "ERR-SEM-ARRAY-INDEX-NOT-INT",
            DiagnosticKind::ArrayTooManyDimensions { .. } => "ERR-SEM-ARRAY-TOO-MANY-DIMS",
            DiagnosticKind::VarNotDeclared { .. } => "ERR-SEM-VAR-NOT-DECL",
            DiagnosticKind::VarDeclaredPreviously { .. } => "WAR-SEM-VAR-DECL-PREV",
            DiagnosticKind::FuncDeclaredPreviously { .. } => "WAR-SEM-FUNC-DECL-PREV",
            DiagnosticKind::VarDeclaredNotUsed { .. } => "WAR-SEM-VAR-DECL-NOT-USED",
            DiagnosticKind::VarInitNotUsed { .. } => "WAR-SEM-VAR-DECL-INIT-NOT-USED",
            DiagnosticKind::VarUsedNotInit { .. } => "WAR-SEM-VAR-DECL-NOT-INIT",
            DiagnosticKind::FuncReturnType { .. } => "ERR-SEM-FUNC-RET-TYPE-ERROR",
            DiagnosticKind::RecursiveMainCall { .. } => "WAR-SEM-CALL-REC-FUNC-MAIN",
            DiagnosticKind::MainCallNotAllowed => "ERR-SEM-CALL-FUNC-MAIN-NOT-ALLOWED",
            DiagnosticKind::FewArguments { .. } => "ERR-SEM-CALL-FUNC-WITH-FEW-ARGS",
            DiagnosticKind::ManyArguments { .. } => "ERR-SEM-CALL-FUNC-WITH-MANY-ARGS",
            DiagnosticKind::FuncNotDeclared { .. } => "ERR-SEM-CALL-FUNC-NOT-DECL",
            DiagnosticKind::FuncNotUsed { .. } => "WAR-SEM-FUNC-DECL-NOT-USED",
            DiagnosticKind::ImplicitCoercion { origin, .. } => match origin {
                CoercionOrigin::Variable => "WAR-SEM-ATR-DIFF-TYPES-IMP-COERC-OF-VAR",
                CoercionOrigin::ReturnValue => "WAR-SEM-ATR-DIFF-TYPES-IMP-COERC-OF-RET-VAL",
                CoercionOrigin::Number => "WAR-SEM-ATR-DIFF-TYPES-IMP-COERC-OF-NUM",
                CoercionOrigin::Expression => "WAR-SEM-ATR-DIFF-TYPES-IMP-COERC-OF-EXP",
            },
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            DiagnosticKind::MainNotDeclared => Severity::Fatal,
            DiagnosticKind::ArrayIndexNotInt { .. }
            | DiagnosticKind::ArrayTooManyDimensions { .. }
            | DiagnosticKind::VarNotDeclared { .. }
            | DiagnosticKind::FuncReturnType { .. }
            | DiagnosticKind::MainCallNotAllowed
            | DiagnosticKind::FewArguments { .. }
            | DiagnosticKind::ManyArguments { .. }
            | DiagnosticKind::FuncNotDeclared { .. } => Severity::Error,
            _ => Severity::Warning,
        }
    }

    /// Named parameters, in the order a message template interpolates them.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            DiagnosticKind::MainNotDeclared | DiagnosticKind::MainCallNotAllowed => vec![],
            DiagnosticKind::ArrayIndexNotInt { name }
            | DiagnosticKind::VarNotDeclared { name }
            | DiagnosticKind::VarDeclaredNotUsed { name }
            | DiagnosticKind::VarInitNotUsed { name }
            | DiagnosticKind::VarUsedNotInit { name }
            | DiagnosticKind::RecursiveMainCall { name }
            | DiagnosticKind::FewArguments { name }
            | DiagnosticKind::ManyArguments { name }
            | DiagnosticKind::FuncNotDeclared { name }
            | DiagnosticKind::FuncNotUsed { name } => vec![("name", name.clone())],
            DiagnosticKind::ArrayTooManyDimensions { name, dimension } => {
                vec![("name", name.clone()), ("dimension", dimension.to_string())]
            }
            DiagnosticKind::VarDeclaredPreviously { name, ty }
            | DiagnosticKind::FuncDeclaredPreviously { name, ty } => {
                vec![("name", name.clone()), ("type", ty.to_string())]
            }
            DiagnosticKind::FuncReturnType {
                name,
                expected,
                found,
            } => vec![
                ("name", name.clone()),
                ("expected", expected.to_string()),
                ("found", found.to_string()),
            ],
            DiagnosticKind::ImplicitCoercion {
                value,
                value_type,
                target,
                target_type,
                ..
            } => vec![
                ("value", value.clone()),
                ("value_type", value_type.to_string()),
                ("target", target.clone()),
                ("target_type", target_type.to_string()),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Source line of the offending construct, when there is one
    pub line: Option<u32>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, line: Option<u32>) -> Self {
        Diagnostic { kind, line }
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(
                f,
                "{} [{}] line {}: {}",
                self.severity(),
                self.code(),
                line,
                self.kind
            ),
            None => write!(f, "{} [{}]: {}", self.severity(), self.code(), self.kind),
        }
    }
}

/// Receives diagnostics as the checks produce them.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}
