//! Result-producing visitor.
//!
//! [`fold`] dispatches a node to exactly one `fold_*` method, passing a
//! context value down and returning the method's output. Nothing recurses
//! implicitly: an implementation calls [`fold`] on the children it wants,
//! with whatever context they need. Every method is required, so adding a
//! node kind breaks every fold until it handles the new kind.

use crate::node::{
    AsNode, BinaryOpNode, BlankNode, BoolLitNode, CallNode, DecLitNode, DottedNameNode,
    ErrorNode, FirstNameNode, ListNode, Node, NodeKind, NumLitNode, ParentNode, RecordNode,
    RecordOfNode, ReplaceableNode, SelfNode, StrInterpNode, StrLitNode, TableNode,
    TypeLiteralNode, UnaryOpNode, UnitsLitNode, VariadicOpNode,
};
use crate::stack::ensure_sufficient_stack;
use crate::{NodeId, SyntaxTree};

/// Generates one required `fold_*` method per node kind.
macro_rules! fold_methods {
    ($lt:lifetime; $($method:ident => $payload:ty,)*) => {
        $(
            fn $method(
                &mut self,
                node: &$lt Node,
                payload: &$lt $payload,
                tree: &$lt SyntaxTree,
                context: Self::Context,
            ) -> Self::Output;
        )*
    };
}

/// Functional visitor over a [`SyntaxTree`].
pub trait Fold<'t> {
    type Output;
    type Context;

    fold_methods! {
        't;
        fold_bool_lit => BoolLitNode,
        fold_num_lit => NumLitNode,
        fold_dec_lit => DecLitNode,
        fold_str_lit => StrLitNode,
        fold_blank => BlankNode,
        fold_error => ErrorNode,
        fold_replaceable => ReplaceableNode,
        fold_units_lit => UnitsLitNode,
        fold_first_name => FirstNameNode,
        fold_dotted_name => DottedNameNode,
        fold_parent => ParentNode,
        fold_self => SelfNode,
        fold_as => AsNode,
        fold_unary_op => UnaryOpNode,
        fold_binary_op => BinaryOpNode,
        fold_variadic_op => VariadicOpNode,
        fold_list => ListNode,
        fold_table => TableNode,
        fold_record => RecordNode,
        fold_str_interp => StrInterpNode,
        fold_call => CallNode,
        fold_type_literal => TypeLiteralNode,
        fold_record_of => RecordOfNode,
    }
}

/// Dispatch `id` to the matching method of `folder`.
pub fn fold<'t, F: Fold<'t> + ?Sized>(
    folder: &mut F,
    tree: &'t SyntaxTree,
    id: NodeId,
    context: F::Context,
) -> F::Output {
    ensure_sufficient_stack(|| {
        let node = tree.node(id);
        match &node.kind {
            NodeKind::BoolLit(p) => folder.fold_bool_lit(node, p, tree, context),
            NodeKind::NumLit(p) => folder.fold_num_lit(node, p, tree, context),
            NodeKind::DecLit(p) => folder.fold_dec_lit(node, p, tree, context),
            NodeKind::StrLit(p) => folder.fold_str_lit(node, p, tree, context),
            NodeKind::Blank(p) => folder.fold_blank(node, p, tree, context),
            NodeKind::Error(p) => folder.fold_error(node, p, tree, context),
            NodeKind::Replaceable(p) => folder.fold_replaceable(node, p, tree, context),
            NodeKind::UnitsLit(p) => folder.fold_units_lit(node, p, tree, context),
            NodeKind::FirstName(p) => folder.fold_first_name(node, p, tree, context),
            NodeKind::DottedName(p) => folder.fold_dotted_name(node, p, tree, context),
            NodeKind::Parent(p) => folder.fold_parent(node, p, tree, context),
            NodeKind::Self_(p) => folder.fold_self(node, p, tree, context),
            NodeKind::As(p) => folder.fold_as(node, p, tree, context),
            NodeKind::UnaryOp(p) => folder.fold_unary_op(node, p, tree, context),
            NodeKind::BinaryOp(p) => folder.fold_binary_op(node, p, tree, context),
            NodeKind::VariadicOp(p) => folder.fold_variadic_op(node, p, tree, context),
            NodeKind::List(p) => folder.fold_list(node, p, tree, context),
            NodeKind::Table(p) => folder.fold_table(node, p, tree, context),
            NodeKind::Record(p) => folder.fold_record(node, p, tree, context),
            NodeKind::StrInterp(p) => folder.fold_str_interp(node, p, tree, context),
            NodeKind::Call(p) => folder.fold_call(node, p, tree, context),
            NodeKind::TypeLiteral(p) => folder.fold_type_literal(node, p, tree, context),
            NodeKind::RecordOf(p) => folder.fold_record_of(node, p, tree, context),
        }
    })
}

impl SyntaxTree {
    /// Fold the node at `id` with `folder`.
    pub fn fold<'t, F: Fold<'t> + ?Sized>(
        &'t self,
        id: NodeId,
        folder: &mut F,
        context: F::Context,
    ) -> F::Output {
        fold(folder, self, id, context)
    }
}
