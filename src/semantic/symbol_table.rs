use std::fmt::Display;

use crate::ast::types::Type;

/// Where a name was declared: the global scope or the body of a function.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    Global,
    Function(String),
}

impl Scope {
    pub fn name(&self) -> &str {
        match self {
            Scope::Global => "global",
            Scope::Function(name) => name,
        }
    }
}

impl Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Variable,
    Function,
}

impl Display for DeclarationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeclarationKind::Variable => write!(f, "var"),
            DeclarationKind::Function => write!(f, "func"),
        }
    }
}

/// A static array bound as written in the declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bound {
    /// A numeric literal and its lexical type
    Literal { text: String, ty: Type },
    /// A bare identifier
    Name(String),
    /// Anything more involved
    Expression,
}

impl Display for Bound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bound::Literal { text, .. } => write!(f, "{}", text),
            Bound::Name(name) => write!(f, "{}", name),
            Bound::Expression => write!(f, "expressao"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub ty: Type,
    pub name: String,
    /// Number of trailing `[]` pairs
    pub dimension: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolEntry {
    pub kind: DeclarationKind,
    pub ty: Type,
    pub scope: Scope,
    pub name: String,
    pub line: u32,
    pub initialized: bool,
    pub used: bool,
    pub dimension: u8,
    pub dim1_size: Option<Bound>,
    pub dim2_size: Option<Bound>,
    pub error_count: u32,
    pub parameters: Vec<Parameter>,
}

impl SymbolEntry {
    pub fn variable(name: &str, ty: Type, scope: Scope, line: u32) -> Self {
        SymbolEntry {
            kind: DeclarationKind::Variable,
            ty,
            scope,
            name: String::from(name),
            line,
            initialized: false,
            used: false,
            dimension: 0,
            dim1_size: None,
            dim2_size: None,
            error_count: 0,
            parameters: vec![],
        }
    }

    pub fn function(name: &str, ty: Type, line: u32, parameters: Vec<Parameter>) -> Self {
        SymbolEntry {
            kind: DeclarationKind::Function,
            ty,
            scope: Scope::Global,
            name: String::from(name),
            line,
            initialized: false,
            used: false,
            dimension: 0,
            dim1_size: None,
            dim2_size: None,
            error_count: 0,
            parameters,
        }
    }

    pub fn is_function(&self) -> bool {
        self.kind == DeclarationKind::Function
    }
}

/// What a name resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    /// Index of a table entry
    Entry(usize),
    /// A parameter of the function entry at `function`
    Parameter { function: usize, index: usize },
}

/// Symbol Table
///
/// Entries in first-seen order. Holds at most one entry per name and
/// effective scope; the builder rejects anything that would break that.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    entries: Vec<SymbolEntry>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable { entries: vec![] }
    }

    pub fn entries(&self) -> &[SymbolEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push(&mut self, entry: SymbolEntry) -> usize {
        self.entries.push(entry);
        self.entries.len() - 1
    }

    /// Entry declared with exactly this name and scope.
    pub fn find_in(&self, name: &str, scope: &Scope) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.name == name && entry.scope == *scope)
    }

    /// Global function entry with this name.
    pub fn function(&self, name: &str) -> Option<&SymbolEntry> {
        self.find_in(name, &Scope::Global)
            .map(|index| &self.entries[index])
            .filter(|entry| entry.is_function())
    }

    pub fn function_mut(&mut self, name: &str) -> Option<&mut SymbolEntry> {
        self.find_in(name, &Scope::Global)
            .map(|index| &mut self.entries[index])
            .filter(|entry| entry.is_function())
    }

    /// Resolves a name seen in `scope`.
    ///
    /// Inside a function, locals come first, then that function's own
    /// parameters, then globals.
    pub fn resolve(&self, name: &str, scope: &Scope) -> Option<Symbol> {
        if let Scope::Function(function) = scope {
            if let Some(index) = self.find_in(name, scope) {
                return Some(Symbol::Entry(index));
            }

            let owner = self
                .find_in(function, &Scope::Global)
                .filter(|index| self.entries[*index].is_function());
            if let Some(owner) = owner {
                let parameter = self.entries[owner]
                    .parameters
                    .iter()
                    .position(|parameter| parameter.name == name);
                if let Some(index) = parameter {
                    return Some(Symbol::Parameter {
                        function: owner,
                        index,
                    });
                }
            }
        }

        self.find_in(name, &Scope::Global).map(Symbol::Entry)
    }

    pub fn symbol_type(&self, symbol: Symbol) -> Type {
        match symbol {
            Symbol::Entry(index) => self.entries[index].ty,
            Symbol::Parameter { function, index } => self.entries[function].parameters[index].ty,
        }
    }

    pub fn resolve_type(&self, name: &str, scope: &Scope) -> Option<Type> {
        self.resolve(name, scope).map(|symbol| self.symbol_type(symbol))
    }

    /// Parameters carry no usage flags; only entries are marked.
    pub fn mark_used(&mut self, symbol: Symbol) {
        if let Symbol::Entry(index) = symbol {
            self.entries[index].used = true;
        }
    }

    pub fn mark_initialized(&mut self, symbol: Symbol) {
        if let Symbol::Entry(index) = symbol {
            self.entries[index].initialized = true;
        }
    }

    /// Fixed-width dump, one entry per line, for the driver.
    pub fn render(&self) -> String {
        let mut output = format!(
            "{:<5} {:<10} {:<12} {:<14} {:>5} {:<5} {:<5} {:>3} {:<8} {:<8} {:>3}  {}\n",
            "kind", "type", "scope", "name", "line", "init", "used", "dim", "dim1", "dim2", "err", "parameters"
        );

        for entry in self.entries.iter() {
            let parameters = entry
                .parameters
                .iter()
                .map(|parameter| {
                    format!(
                        "{}: {}{}",
                        parameter.ty,
                        parameter.name,
                        "[]".repeat(parameter.dimension as usize)
                    )
                })
                .collect::<Vec<_>>()
                .join(", ");
            let size = |bound: &Option<Bound>| {
                bound.as_ref().map(Bound::to_string).unwrap_or_else(|| String::from("-"))
            };

            output.push_str(&format!(
                "{:<5} {:<10} {:<12} {:<14} {:>5} {:<5} {:<5} {:>3} {:<8} {:<8} {:>3}  {}\n",
                entry.kind.to_string(),
                entry.ty.to_string(),
                entry.scope.name(),
                entry.name,
                entry.line,
                if entry.initialized { "S" } else { "N" },
                if entry.used { "S" } else { "N" },
                entry.dimension,
                size(&entry.dim1_size),
                size(&entry.dim2_size),
                entry.error_count,
                parameters
            ));
        }

        output
    }
}
