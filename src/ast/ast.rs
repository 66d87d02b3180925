use std::fmt::{Debug, Display};

use crate::lexer::tokens::TokenKind;

use super::{declarations::DeclTag, expressions::ExprTag, statements::StmtTag};

/// List Tags
///
/// Grammar constructs that encode a sequence through left recursion,
/// e.g. `lista_variaveis : lista_variaveis VIRGULA var | var`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListTag {
    Declarations,
    Variables,
    Parameters,
    Arguments,
    Body,
}

impl ListTag {
    pub fn name(&self) -> &'static str {
        match self {
            ListTag::Declarations => "lista_declaracoes",
            ListTag::Variables => "lista_variaveis",
            ListTag::Parameters => "lista_parametros",
            ListTag::Arguments => "lista_argumentos",
            ListTag::Body => "corpo",
        }
    }
}

/// Node Tags
///
/// The closed set of constructs a tree node can represent, grouped by family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// `programa`, the root
    Program,
    Decl(DeclTag),
    Stmt(StmtTag),
    Expr(ExprTag),
    List(ListTag),
    /// A terminal; its lexeme is stored as the node value
    Token(TokenKind),
    /// `vazio`, the explicit empty marker
    Empty,
}

impl Tag {
    pub fn name(&self) -> &'static str {
        match self {
            Tag::Program => "programa",
            Tag::Decl(tag) => tag.name(),
            Tag::Stmt(tag) => tag.name(),
            Tag::Expr(tag) => tag.name(),
            Tag::List(tag) => tag.name(),
            Tag::Token(kind) => kind.name(),
            Tag::Empty => "vazio",
        }
    }

    pub fn is_token(&self) -> bool {
        matches!(self, Tag::Token(_))
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Index of a node inside its [`Tree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
pub struct Node {
    pub tag: Tag,
    pub line: Option<u32>,
    /// Literal text, only set on terminals
    pub value: Option<String>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl Node {
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// Tree
///
/// An arena of nodes addressed by [`NodeId`]. Nodes are never freed: a node
/// dropped from the tree by a rewrite stays in the arena, detached, and is
/// simply no longer reachable from the root.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Tree {
    /// Creates a tree holding only a `programa` root.
    pub fn new() -> Self {
        let mut tree = Tree {
            nodes: vec![],
            root: NodeId(0),
        };
        tree.root = tree.add_node(Tag::Program, Some(1));
        tree
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Allocates a detached node.
    pub fn add_node(&mut self, tag: Tag, line: Option<u32>) -> NodeId {
        self.nodes.push(Node {
            tag,
            line,
            value: None,
            children: vec![],
            parent: None,
        });
        NodeId(self.nodes.len() - 1)
    }

    /// Allocates a detached terminal carrying its lexeme.
    pub fn add_token(&mut self, kind: TokenKind, value: impl Into<String>, line: u32) -> NodeId {
        let id = self.add_node(Tag::Token(kind), Some(line));
        self.nodes[id.0].value = Some(value.into());
        id
    }

    pub fn push_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Replaces the children of `id`, returning the previous ones.
    ///
    /// Previous children that are not part of the new list become detached.
    /// New children are unlinked from wherever they hung before, so the
    /// single-parent invariant holds after any rewrite.
    pub fn set_children(&mut self, id: NodeId, children: Vec<NodeId>) -> Vec<NodeId> {
        let previous = std::mem::take(&mut self.nodes[id.0].children);
        for child in previous.iter() {
            self.nodes[child.0].parent = None;
        }
        for child in children.iter() {
            self.detach(*child);
            self.nodes[child.0].parent = Some(id);
        }
        self.nodes[id.0].children = children;
        previous
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|child| *child != id);
        }
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn tag(&self, id: NodeId) -> Tag {
        self.nodes[id.0].tag
    }

    pub fn line(&self, id: NodeId) -> Option<u32> {
        self.nodes[id.0].line
    }

    pub fn value(&self, id: NodeId) -> Option<&str> {
        self.nodes[id.0].value.as_deref()
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn child(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.nodes[id.0].children.get(index).copied()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Iterates the strict ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Pre-order listing of the subtree rooted at `id`, `id` included.
    pub fn preorder(&self, id: NodeId) -> Vec<NodeId> {
        let mut order = vec![];
        let mut stack = vec![id];

        while let Some(current) = stack.pop() {
            order.push(current);
            for child in self.children(current).iter().rev() {
                stack.push(*child);
            }
        }

        order
    }

    /// Every node of the subtree rooted at `id` whose tag matches, in pre-order.
    pub fn find_all(&self, id: NodeId, tag: Tag) -> Vec<NodeId> {
        self.preorder(id)
            .into_iter()
            .filter(|node| self.tag(*node) == tag)
            .collect()
    }

    /// Unrolls a left-recursive list into its items, in source order.
    ///
    /// Nested list nodes of the same tag are descended into; separators and
    /// the `vazio` marker are skipped.
    pub fn list_items(&self, id: NodeId) -> Vec<NodeId> {
        let tag = self.tag(id);
        let mut items = vec![];
        let mut current = Some(id);

        while let Some(list) = current {
            current = None;
            for child in self.children(list).iter().rev() {
                match self.tag(*child) {
                    child_tag if child_tag == tag => current = Some(*child),
                    Tag::Token(TokenKind::Comma) | Tag::Empty => {}
                    _ => items.push(*child),
                }
            }
        }

        items.reverse();
        items
    }

    /// First child of `id` with the given tag.
    pub fn child_with_tag(&self, id: NodeId, tag: Tag) -> Option<NodeId> {
        self.children(id).iter().copied().find(|child| self.tag(*child) == tag)
    }

    /// Number of nodes reachable from the root.
    pub fn reachable_count(&self) -> usize {
        self.preorder(self.root).len()
    }

    /// Indented dump of the reachable tree, one node per line.
    pub fn render(&self) -> String {
        let mut output = String::new();
        self.render_node(self.root, 0, &mut output);
        output
    }

    fn render_node(&self, id: NodeId, depth: usize, output: &mut String) {
        let node = self.node(id);
        output.push_str(&"  ".repeat(depth));
        output.push_str(node.tag.name());
        if let Some(value) = &node.value {
            output.push_str(&format!(" `{}`", value));
        }
        if let Some(line) = node.line {
            output.push_str(&format!(" @{}", line));
        }
        output.push('\n');

        for child in node.children.iter() {
            self.render_node(*child, depth + 1, output);
        }
    }
}

impl Default for Tree {
    fn default() -> Self {
        Tree::new()
    }
}

pub struct Ancestors<'a> {
    tree: &'a Tree,
    current: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        self.current = self.tree.parent(current);
        Some(current)
    }
}
