//! Pre/post traversal visitor.
//!
//! Leaf kinds get a single `visit_*` call. Container kinds get
//! `pre_visit_*`, which decides whether to descend, and `post_visit_*`,
//! which runs after the children only if the visitor descended.
//!
//! Children are visited in source order:
//!
//! | Kind | Children visited |
//! |---|---|
//! | `UnaryOp` | child |
//! | `BinaryOp` | left, right |
//! | `VariadicOp`, `List`, `Table`, `StrInterp` | every child |
//! | `Record` | source restriction, then field values |
//! | `As` | left |
//! | `DottedName` | left, then the right-hand node if any |
//! | `Call` | the argument list only |
//! | `RecordOf` | the table name |
//!
//! A call's head node is not visited. `TypeLiteral` is a leaf; its type
//! expression is checked separately and is not part of the value tree.
//!
//! Every method has a default (visit everything, do nothing), so a
//! visitor only overrides the kinds it cares about. The tree is never
//! mutated; visitors accumulate into their own state.
//!
//! # Example
//!
//! ```text
//! struct CountNames(usize);
//!
//! impl<'t> Visitor<'t> for CountNames {
//!     fn visit_first_name(&mut self, _: &'t Node, _: &'t FirstNameNode, _: &'t SyntaxTree) {
//!         self.0 += 1;
//!     }
//! }
//! ```

use crate::node::{
    AsNode, BinaryOpNode, BlankNode, BoolLitNode, CallNode, DecLitNode, DottedNameNode,
    ErrorNode, FirstNameNode, ListNode, Node, NodeKind, NumLitNode, ParentNode, RecordNode,
    RecordOfNode, ReplaceableNode, SelfNode, StrInterpNode, StrLitNode, TableNode,
    TypeLiteralNode, UnaryOpNode, UnitsLitNode, VariadicOpNode,
};
use crate::stack::ensure_sufficient_stack;
use crate::{NodeId, SyntaxTree};

/// Generates the default leaf `visit_*` methods and the default
/// `pre_visit_*`/`post_visit_*` pairs.
macro_rules! visitor_methods {
    (
        $lt:lifetime;
        leaves { $($leaf:ident => $leaf_ty:ty,)* }
        containers { $($pre:ident, $post:ident => $container_ty:ty,)* }
    ) => {
        $(
            fn $leaf(&mut self, _node: &$lt Node, _payload: &$lt $leaf_ty, _tree: &$lt SyntaxTree) {}
        )*
        $(
            /// Return `false` to skip the children and the matching post visit.
            fn $pre(
                &mut self,
                _node: &$lt Node,
                _payload: &$lt $container_ty,
                _tree: &$lt SyntaxTree,
            ) -> bool {
                true
            }

            fn $post(
                &mut self,
                _node: &$lt Node,
                _payload: &$lt $container_ty,
                _tree: &$lt SyntaxTree,
            ) {
            }
        )*
    };
}

/// Traversal visitor over a [`SyntaxTree`].
pub trait Visitor<'t> {
    visitor_methods! {
        't;
        leaves {
            visit_bool_lit => BoolLitNode,
            visit_num_lit => NumLitNode,
            visit_dec_lit => DecLitNode,
            visit_str_lit => StrLitNode,
            visit_blank => BlankNode,
            visit_error => ErrorNode,
            visit_replaceable => ReplaceableNode,
            visit_units_lit => UnitsLitNode,
            visit_first_name => FirstNameNode,
            visit_parent => ParentNode,
            visit_self => SelfNode,
            visit_type_literal => TypeLiteralNode,
        }
        containers {
            pre_visit_dotted_name, post_visit_dotted_name => DottedNameNode,
            pre_visit_as, post_visit_as => AsNode,
            pre_visit_unary_op, post_visit_unary_op => UnaryOpNode,
            pre_visit_binary_op, post_visit_binary_op => BinaryOpNode,
            pre_visit_variadic_op, post_visit_variadic_op => VariadicOpNode,
            pre_visit_list, post_visit_list => ListNode,
            pre_visit_table, post_visit_table => TableNode,
            pre_visit_record, post_visit_record => RecordNode,
            pre_visit_str_interp, post_visit_str_interp => StrInterpNode,
            pre_visit_call, post_visit_call => CallNode,
            pre_visit_record_of, post_visit_record_of => RecordOfNode,
        }
    }
}

/// Walk the subtree at `id` with `visitor`.
pub fn accept<'t, V: Visitor<'t> + ?Sized>(visitor: &mut V, tree: &'t SyntaxTree, id: NodeId) {
    ensure_sufficient_stack(|| accept_inner(visitor, tree, id));
}

fn accept_all<'t, V: Visitor<'t> + ?Sized>(visitor: &mut V, tree: &'t SyntaxTree, ids: &[NodeId]) {
    for &id in ids {
        accept(visitor, tree, id);
    }
}

fn accept_inner<'t, V: Visitor<'t> + ?Sized>(visitor: &mut V, tree: &'t SyntaxTree, id: NodeId) {
    let node = tree.node(id);
    match &node.kind {
        NodeKind::BoolLit(lit) => visitor.visit_bool_lit(node, lit, tree),
        NodeKind::NumLit(lit) => visitor.visit_num_lit(node, lit, tree),
        NodeKind::DecLit(lit) => visitor.visit_dec_lit(node, lit, tree),
        NodeKind::StrLit(lit) => visitor.visit_str_lit(node, lit, tree),
        NodeKind::Blank(blank) => visitor.visit_blank(node, blank, tree),
        NodeKind::Error(error) => visitor.visit_error(node, error, tree),
        NodeKind::Replaceable(replaceable) => visitor.visit_replaceable(node, replaceable, tree),
        NodeKind::UnitsLit(lit) => visitor.visit_units_lit(node, lit, tree),
        NodeKind::FirstName(name) => visitor.visit_first_name(node, name, tree),
        NodeKind::Parent(parent) => visitor.visit_parent(node, parent, tree),
        NodeKind::Self_(self_node) => visitor.visit_self(node, self_node, tree),
        NodeKind::TypeLiteral(lit) => visitor.visit_type_literal(node, lit, tree),

        NodeKind::DottedName(dotted) => {
            if visitor.pre_visit_dotted_name(node, dotted, tree) {
                accept(visitor, tree, dotted.left);
                if let Some(right) = dotted.right_node {
                    accept(visitor, tree, right);
                }
                visitor.post_visit_dotted_name(node, dotted, tree);
            }
        }
        NodeKind::As(as_node) => {
            if visitor.pre_visit_as(node, as_node, tree) {
                accept(visitor, tree, as_node.left);
                visitor.post_visit_as(node, as_node, tree);
            }
        }
        NodeKind::UnaryOp(unary) => {
            if visitor.pre_visit_unary_op(node, unary, tree) {
                accept(visitor, tree, unary.child);
                visitor.post_visit_unary_op(node, unary, tree);
            }
        }
        NodeKind::BinaryOp(binary) => {
            if visitor.pre_visit_binary_op(node, binary, tree) {
                accept(visitor, tree, binary.left);
                accept(visitor, tree, binary.right);
                visitor.post_visit_binary_op(node, binary, tree);
            }
        }
        NodeKind::VariadicOp(variadic) => {
            if visitor.pre_visit_variadic_op(node, variadic, tree) {
                accept_all(visitor, tree, &variadic.children);
                visitor.post_visit_variadic_op(node, variadic, tree);
            }
        }
        NodeKind::List(list) => {
            if visitor.pre_visit_list(node, list, tree) {
                accept_all(visitor, tree, &list.children);
                visitor.post_visit_list(node, list, tree);
            }
        }
        NodeKind::Table(table) => {
            if visitor.pre_visit_table(node, table, tree) {
                accept_all(visitor, tree, &table.children);
                visitor.post_visit_table(node, table, tree);
            }
        }
        NodeKind::Record(record) => {
            if visitor.pre_visit_record(node, record, tree) {
                if let Some(restriction) = record.source_restriction {
                    accept(visitor, tree, restriction);
                }
                accept_all(visitor, tree, &record.children);
                visitor.post_visit_record(node, record, tree);
            }
        }
        NodeKind::StrInterp(interp) => {
            if visitor.pre_visit_str_interp(node, interp, tree) {
                accept_all(visitor, tree, &interp.children);
                visitor.post_visit_str_interp(node, interp, tree);
            }
        }
        NodeKind::Call(call) => {
            if visitor.pre_visit_call(node, call, tree) {
                accept(visitor, tree, call.args);
                visitor.post_visit_call(node, call, tree);
            }
        }
        NodeKind::RecordOf(record_of) => {
            if visitor.pre_visit_record_of(node, record_of, tree) {
                accept(visitor, tree, record_of.table_name);
                visitor.post_visit_record_of(node, record_of, tree);
            }
        }
    }
}

impl SyntaxTree {
    /// Walk the subtree at `id` with `visitor`.
    pub fn accept<'t, V: Visitor<'t> + ?Sized>(&'t self, id: NodeId, visitor: &mut V) {
        accept(visitor, self, id);
    }
}
