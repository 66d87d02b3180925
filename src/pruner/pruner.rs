//! Tree pruning entry point and shared helpers.
//!
//! Every construct is reduced on its own and handed back to its parent,
//! which splices the result into its child list. Nodes are only ever
//! dropped or reused, never allocated, so the reachable node count can
//! only shrink. A node the pass does not expect is a [`PruneError`].

use thiserror::Error;

use crate::ast::{
    ast::{ListTag, NodeId, Tag, Tree},
    declarations::DeclTag,
};

use super::{decl::prune_declaration, stmt::empty_marker};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PruneError {
    #[error("malformed tree: expected `{expected}`, found `{found}` (line {line:?})")]
    Unexpected {
        expected: &'static str,
        found: &'static str,
        line: Option<u32>,
    },
    #[error("malformed tree: `{tag}` has no child at position {index}")]
    MissingChild { tag: &'static str, index: usize },
}

/// The `index`-th child of `id`.
pub(super) fn child(tree: &Tree, id: NodeId, index: usize) -> Result<NodeId, PruneError> {
    tree.child(id, index).ok_or(PruneError::MissingChild {
        tag: tree.tag(id).name(),
        index,
    })
}

/// Fails unless `id` carries `tag`.
pub(super) fn expect_tag(tree: &Tree, id: NodeId, tag: Tag) -> Result<(), PruneError> {
    if tree.tag(id) == tag {
        Ok(())
    } else {
        Err(unexpected(tree, id, tag.name()))
    }
}

pub(super) fn unexpected(tree: &Tree, id: NodeId, expected: &'static str) -> PruneError {
    PruneError::Unexpected {
        expected,
        found: tree.tag(id).name(),
        line: tree.line(id),
    }
}

/// Rewrites `tree` into its minimal form, in place.
///
/// Only valid on a parse tree fresh from the parser; running it again on
/// its own output fails.
pub fn prune(tree: &mut Tree) -> Result<(), PruneError> {
    let _span = tracing::info_span!("prune").entered();
    let before = tree.reachable_count();

    let root = tree.root();
    let list = child(tree, root, 0)?;
    expect_tag(tree, list, Tag::List(ListTag::Declarations))?;

    let mut declarations = vec![];
    for wrapper in tree.list_items(list) {
        expect_tag(tree, wrapper, Tag::Decl(DeclTag::Declaration))?;
        let declaration = child(tree, wrapper, 0)?;
        declarations.push(prune_declaration(tree, declaration)?);
    }

    if declarations.is_empty() {
        if let Some(empty) = empty_marker(tree, list) {
            declarations.push(empty);
        }
    }
    tree.set_children(list, declarations);

    tracing::debug!(before, after = tree.reachable_count(), "tree pruned");
    Ok(())
}
