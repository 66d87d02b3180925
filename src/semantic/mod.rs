/// Semantic analysis module
/// Builds the scope-aware symbol table of a T++ parse tree and checks
/// declarations, identifier usage, implicit coercions and function contracts.
///
/// Phases run in a fixed order over the unpruned tree:
/// build table, check `principal`, usage and coercion, variable usage
/// warnings, return types, call sites, function usage warnings.
///
/// Submodules:
/// - analyzer: Entry points, options and the shared analysis context
/// - builder: Symbol table construction from declarations
/// - coercion: Factor extraction and implicit coercion warnings
/// - diagnostics: Diagnostic codes, severities and the sink trait
/// - functions: Program-level and function contract checks
/// - symbol_table: Entries, scopes and name resolution
/// - usage: Initialization and use of identifiers in statements
pub mod analyzer;
pub mod builder;
pub mod coercion;
pub mod diagnostics;
pub mod functions;
pub mod symbol_table;
pub mod usage;

pub use analyzer::{analyze, analyze_with, Analysis, AnalysisOptions};
