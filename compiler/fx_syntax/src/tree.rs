//! The node arena.
//!
//! A [`SyntaxTree`] owns every node of one parse. Nodes are stored by
//! value in allocation order and refer to each other by [`NodeId`].
//!
//! # Identity
//!
//! The arena is the id counter: allocating a node assigns it the next
//! index. Constructors take the ids of already-built children, so a
//! parent is always allocated after everything below it. That gives three
//! invariants for free:
//!
//! - every descendant of `n` has an id in `n.min_child_id()..=n.id()`
//! - [`SyntaxTree::in_tree`] is two integer comparisons
//! - depth and minimum child id aggregate without a second pass
//!
//! # Mutation
//!
//! After construction the tree is read-only. The two parse-time hooks
//! (parent back-index, one source-list replacement) need `&mut self`, so
//! any shared borrow sees a frozen tree and may be read from many threads.
//!
//! # Module Structure
//!
//! - `build`: one constructor per node kind
//! - `spans`: per-kind text, complete and source-based spans
//! - `clone`: structural subtree copy with source-list remapping

mod build;
mod clone;
mod spans;

use fx_ir::{DName, DPath, VariadicOp};

use crate::node::{Node, NodeKind, NodeTag};
use crate::visitor::{self, Visitor};
use crate::{NodeId, SourceList, VariadicOpNode};

/// Arena of parse-tree nodes.
#[derive(Clone, Debug, Default)]
pub struct SyntaxTree {
    nodes: Vec<Node>,
}

impl SyntaxTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with estimated capacity based on formula length.
    /// Heuristic: ~1 node per 4 bytes of source.
    pub fn with_capacity(source_len: usize) -> Self {
        SyntaxTree {
            nodes: Vec::with_capacity(source_len / 4),
        }
    }

    /// Get a node by id.
    ///
    /// # Panics
    /// Panics if `id` was not allocated by this tree.
    #[inline]
    #[track_caller]
    pub fn node(&self, id: NodeId) -> &Node {
        match self.nodes.get(id.index()) {
            Some(node) => node,
            None => panic!("{id:?} is not a node of this tree ({} nodes)", self.nodes.len()),
        }
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Number of allocated nodes; also the id the next node will get.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in allocation (id) order.
    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Whether `node` is `root` or one of its descendants.
    pub fn in_tree(&self, node: NodeId, root: NodeId) -> bool {
        let root = self.node(root);
        root.min_child_id <= node && node <= root.id
    }

    /// Highest ancestor reachable through dotted-name parents, or `id`
    /// itself when its parent is not a dotted name.
    pub fn find_top_most_dotted_parent_or_self(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(parent) = self.node(current).parent {
            if self.node(parent).tag() != NodeTag::DottedName {
                break;
            }
            current = parent;
        }
        current
    }

    /// Read a qualifier chain (`A.B.C`, `Parent.X`) as a namespace path.
    ///
    /// The left spine is walked iteratively, so arbitrarily long chains
    /// are fine.
    ///
    /// # Panics
    /// Panics if `id` is not a dotted name whose left spine consists only
    /// of names (see
    /// [`DottedNameNode::has_possible_namespace_qualifier`](crate::DottedNameNode::has_possible_namespace_qualifier)).
    #[track_caller]
    pub fn to_dpath(&self, id: NodeId) -> DPath {
        let dotted = self.node(id).cast_dotted_name();
        assert!(
            dotted.has_possible_namespace_qualifier(),
            "{id:?} is a dotted name over an expression, not a namespace path"
        );

        let mut reversed: Vec<DName> = Vec::new();
        let mut current = id;
        loop {
            let node = self.node(current);
            match &node.kind {
                NodeKind::DottedName(dotted) => {
                    reversed.push(dotted.right.name.clone());
                    current = dotted.left;
                }
                NodeKind::FirstName(first) => {
                    reversed.push(first.ident.name.clone());
                    break;
                }
                NodeKind::Parent(_) => {
                    reversed.push(DName::parent_keyword());
                    break;
                }
                NodeKind::Self_(_) => {
                    reversed.push(DName::self_keyword());
                    break;
                }
                other => panic!(
                    "{current:?} ({}) cannot be part of a namespace path",
                    other.tag()
                ),
            }
        }

        reversed.into_iter().rev().collect()
    }

    /// Whether the subtree under `id` contains a `;` chain.
    ///
    /// Computed on first request and cached on the node.
    pub fn uses_chains(&self, id: NodeId) -> bool {
        *self.node(id).uses_chains.get_or_init(|| {
            let mut tracker = ChainTracker { found: false };
            visitor::accept(&mut tracker, self, id);
            tracker.found
        })
    }

    /// Replace the source list of `id` during parse-time stitching.
    ///
    /// # Panics
    /// Panics if the source list of `id` was already replaced once, or if
    /// the new list refers to a node that is not a child of `id`.
    #[track_caller]
    pub fn replace_source_list(&mut self, id: NodeId, source_list: SourceList) {
        let index = id.index();
        let Some(node) = self.nodes.get_mut(index) else {
            panic!("{id:?} is not a node of this tree");
        };
        assert!(
            !node.source_list_replaced,
            "source list of {id:?} was already replaced"
        );
        build::check_source_refs(id, &node.kind.children(), &source_list);
        tracing::trace!(?id, items = source_list.len(), "replacing source list");
        node.source_list = source_list;
        node.source_list_replaced = true;
    }
}

/// Looks for a chaining variadic operator, stopping at the first one.
struct ChainTracker {
    found: bool,
}

impl<'t> Visitor<'t> for ChainTracker {
    fn pre_visit_variadic_op(
        &mut self,
        _node: &'t Node,
        variadic: &'t VariadicOpNode,
        _tree: &'t SyntaxTree,
    ) -> bool {
        if variadic.op == VariadicOp::Chain {
            self.found = true;
        }
        !self.found
    }
}
