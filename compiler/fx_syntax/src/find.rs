//! Cursor lookup.

use crate::node::{
    AsNode, BinaryOpNode, BlankNode, BoolLitNode, CallNode, DecLitNode, DottedNameNode,
    ErrorNode, FirstNameNode, ListNode, Node, NumLitNode, ParentNode, RecordNode, RecordOfNode,
    ReplaceableNode, SelfNode, StrInterpNode, StrLitNode, TableNode, TypeLiteralNode,
    UnaryOpNode, UnitsLitNode, VariadicOpNode,
};
use crate::visitor::{self, Visitor};
use crate::{NodeId, SyntaxTree};

impl SyntaxTree {
    /// The deepest node under `root` whose complete span touches `position`.
    ///
    /// A cursor right after a node's last character still touches it.
    /// When siblings share a boundary the later one wins. Falls back to
    /// `root` when nothing matches.
    pub fn find_node(&self, root: NodeId, position: u32) -> NodeId {
        let mut finder = FindNode {
            position,
            found: None,
        };
        visitor::accept(&mut finder, self, root);
        finder.found.unwrap_or(root)
    }
}

struct FindNode {
    position: u32,
    found: Option<NodeId>,
}

impl FindNode {
    /// Record `node` if it touches the cursor.
    fn check(&mut self, node: &Node, tree: &SyntaxTree) -> bool {
        let hit = tree.complete_span(node.id()).contains_inclusive(self.position);
        if hit {
            self.found = Some(node.id());
        }
        hit
    }
}

/// Leaves record a hit; containers record a hit and descend only on a hit.
macro_rules! find_methods {
    ($lt:lifetime; leaves { $($leaf:ident: $leaf_ty:ty,)* } containers { $($pre:ident: $ty:ty,)* }) => {
        $(
            fn $leaf(&mut self, node: &$lt Node, _: &$lt $leaf_ty, tree: &$lt SyntaxTree) {
                self.check(node, tree);
            }
        )*
        $(
            fn $pre(&mut self, node: &$lt Node, _: &$lt $ty, tree: &$lt SyntaxTree) -> bool {
                self.check(node, tree)
            }
        )*
    };
}

impl<'t> Visitor<'t> for FindNode {
    find_methods! {
        't;
        leaves {
            visit_bool_lit: BoolLitNode,
            visit_num_lit: NumLitNode,
            visit_dec_lit: DecLitNode,
            visit_str_lit: StrLitNode,
            visit_blank: BlankNode,
            visit_error: ErrorNode,
            visit_replaceable: ReplaceableNode,
            visit_units_lit: UnitsLitNode,
            visit_first_name: FirstNameNode,
            visit_parent: ParentNode,
            visit_self: SelfNode,
            visit_type_literal: TypeLiteralNode,
        }
        containers {
            pre_visit_dotted_name: DottedNameNode,
            pre_visit_as: AsNode,
            pre_visit_unary_op: UnaryOpNode,
            pre_visit_binary_op: BinaryOpNode,
            pre_visit_variadic_op: VariadicOpNode,
            pre_visit_list: ListNode,
            pre_visit_table: TableNode,
            pre_visit_record: RecordNode,
            pre_visit_str_interp: StrInterpNode,
            pre_visit_call: CallNode,
            pre_visit_record_of: RecordOfNode,
        }
    }
}
