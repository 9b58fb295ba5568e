//! Public navigation handles over parse-tree nodes.
//!
//! A [`NodeRef`] bundles a shared reference to a parse tree with the id of
//! one node in it. Handles are cheap to clone and keep the whole tree
//! (arena, token store, diagnostics) alive, which is exactly the
//! increment/decrement-reference surface a foreign-binding shim needs:
//! clone on the way out, drop on release, and nothing a live handle can
//! reach is ever freed under it.

use std::any::Any;
use std::fmt;
use std::fmt::Write as _;
use std::rc::Rc;

use arbor_core::{Sloc, SlocRange};

use crate::ext::ExtensionId;
use crate::tree::{NodeId, NodeKind, ParseTree, TokenSpan};

/// Shared handle to one node of a parse tree.
#[derive(Clone)]
pub struct NodeRef {
    pub(crate) tree: Rc<ParseTree>,
    pub(crate) id: NodeId,
}

impl NodeRef {
    pub(crate) fn new(tree: Rc<ParseTree>, id: NodeId) -> Self {
        Self { tree, id }
    }

    fn sibling(&self, id: NodeId) -> Self {
        Self {
            tree: Rc::clone(&self.tree),
            id,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.tree.arena.borrow().get(self.id).kind
    }

    /// Token offsets covered by this node, absent for synthesized nodes.
    pub fn token_span(&self) -> Option<TokenSpan> {
        self.tree.arena.borrow().get(self.id).span
    }

    /// `true` for nodes created outside grammar derivation (desugaring and
    /// the like), which have no source span of their own.
    pub fn is_synthetic(&self) -> bool {
        self.token_span().is_none()
    }

    /// Source range covered by this node's tokens.
    pub fn sloc_range(&self) -> Option<SlocRange> {
        let span = self.token_span()?;
        let start = self.tree.tokens.get(span.start)?.sloc_range.start;
        let end = self.tree.tokens.get(span.end)?.sloc_range.end;
        Some(SlocRange::new(start, end))
    }

    /// Upward-navigation edge; `None` at the root.
    pub fn parent(&self) -> Option<NodeRef> {
        let parent = self.tree.arena.borrow().get(self.id).parent?;
        Some(self.sibling(parent))
    }

    pub fn child_count(&self) -> usize {
        self.tree.arena.borrow().get(self.id).children.len()
    }

    /// The `index`th child slot. `None` both for an out-of-range index and
    /// for a null slot; check [`NodeRef::child_count`] to tell them apart.
    pub fn child(&self, index: usize) -> Option<NodeRef> {
        let child = *self
            .tree
            .arena
            .borrow()
            .get(self.id)
            .children
            .get(index)?;
        child.map(|id| self.sibling(id))
    }

    /// All non-null children, in order.
    pub fn children(&self) -> Vec<NodeRef> {
        let ids: Vec<NodeId> = self
            .tree
            .arena
            .borrow()
            .get(self.id)
            .children
            .iter()
            .copied()
            .flatten()
            .collect();
        ids.into_iter().map(|id| self.sibling(id)).collect()
    }

    /// The token texts of this node's span, joined with single spaces.
    ///
    /// Original whitespace is not reconstructed; this is a debugging aid,
    /// not a source renderer.
    pub fn text(&self) -> String {
        let Some(span) = self.token_span() else {
            return String::new();
        };
        let mut out = String::new();
        for offset in span.start..=span.end {
            if let Some(text) = self.tree.tokens.text(offset) {
                if !out.is_empty() {
                    out.push(' ');
                }
                out.push_str(&text);
            }
        }
        out
    }

    /// The innermost node at or below this one whose range contains `sloc`.
    pub fn lookup(&self, sloc: Sloc) -> Option<NodeRef> {
        if !self.sloc_range().is_some_and(|range| range.contains(sloc)) {
            return None;
        }
        for child in self.children() {
            if let Some(inner) = child.lookup(sloc) {
                return Some(inner);
            }
        }
        Some(self.clone())
    }

    /// Create a synthesized node in this node's tree, parented to this node.
    ///
    /// The new node has no token span; it lives in the same arena as
    /// ordinary nodes and is freed with the tree even if nothing else ever
    /// points at it.
    pub fn create_synthetic(&self, kind: NodeKind) -> NodeRef {
        let mut arena = self.tree.arena.borrow_mut();
        let id = arena.alloc(kind, None);
        arena.set_parent(id, self.id);
        drop(arena);
        self.sibling(id)
    }

    // ========================================================================
    // Extension slots
    // ========================================================================

    /// Attach externally-owned data under a registered extension id; at most
    /// one slot per id per node. Returns the displaced value, if any. The
    /// data's `Drop` runs when the slot is displaced or the tree dies.
    pub fn set_extension(&self, id: ExtensionId, data: Rc<dyn Any>) -> Option<Rc<dyn Any>> {
        self.tree
            .extensions
            .borrow_mut()
            .insert((self.id, id), data)
    }

    /// Retrieve the slot for `id`, downcast to `T`. `None` when the slot is
    /// empty or holds a different type.
    pub fn extension<T: Any>(&self, id: ExtensionId) -> Option<Rc<T>> {
        let data = self.tree.extensions.borrow().get(&(self.id, id)).cloned()?;
        data.downcast::<T>().ok()
    }

    // ========================================================================
    // Debugging
    // ========================================================================

    /// Indented kind/sloc rendering of the subtree, one node per line.
    /// Null child slots render as `<null>`.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_into(&mut out, 0);
        out
    }

    fn dump_into(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        let name = self.tree.grammar.kind_name(self.kind());
        match self.sloc_range() {
            Some(range) => {
                let _ = writeln!(out, "{indent}{name}[{range}]");
            }
            None => {
                let _ = writeln!(out, "{indent}{name}[synthetic]");
            }
        }
        for index in 0..self.child_count() {
            match self.child(index) {
                Some(child) => child.dump_into(out, depth + 1),
                None => {
                    let _ = writeln!(out, "{}<null>", "  ".repeat(depth + 1));
                }
            }
        }
    }
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.tree, &other.tree) && self.id == other.id
    }
}

impl Eq for NodeRef {}

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.tree.grammar.kind_name(self.kind());
        match self.sloc_range() {
            Some(range) => write!(f, "{name}[{range}]"),
            None => write!(f, "{name}[synthetic]"),
        }
    }
}
