/// Tree module
/// Contains the index-addressed node arena shared by the parser, the
/// semantic checks and the pruner.
///
/// Submodules:
/// - ast: Tree arena, node ids, tags and traversal
/// - declarations: Tags for declaration constructs
/// - expressions: Tags for expression constructs
/// - statements: Tags for statement constructs
/// - types: The value types of the language
pub mod ast;
pub mod declarations;
pub mod expressions;
pub mod statements;
pub mod types;

#[cfg(test)]
mod tests;
