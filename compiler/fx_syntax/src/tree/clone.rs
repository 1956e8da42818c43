//! Structural subtree copy.
//!
//! A clone is built bottom-up like a parsed tree: each child is copied
//! first, the old-to-new child ids are collected in a [`NodeMap`], and the
//! node's source list is rebuilt through that map. Every token of the copy
//! is rebased onto the target span, so the copy shares no node and no token
//! with the original.

use std::sync::OnceLock;

use fx_ir::{Identifier, Span, Token};

use super::SyntaxTree;
use crate::invocation::next_invocation_id;
use crate::node::{
    AsNode, BinaryOpNode, CallNode, DottedNameNode, FirstNameNode, ListNode, NodeKind,
    RecordNode, RecordOfNode, StrInterpNode, TableNode, TypeLiteralNode, UnaryOpNode,
    VariadicOpNode,
};
use crate::source_list::NodeMap;
use crate::stack::ensure_sufficient_stack;
use crate::NodeId;

impl SyntaxTree {
    /// Deep-copy the subtree at `root` into this tree, rebased onto `target`.
    ///
    /// The copy gets fresh ids (all greater than any existing id), the same
    /// kinds, shape and literal payloads, and new invocation ids for calls.
    ///
    /// # Panics
    /// Panics if a source list references a node that is not one of its
    /// owner's children.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn clone_subtree(&mut self, root: NodeId, target: Span) -> NodeId {
        let first_new = self.len();
        let copy = self.clone_node(root, target);
        tracing::trace!(nodes = self.len() - first_new, ?copy, "cloned subtree");
        copy
    }

    fn clone_node(&mut self, id: NodeId, target: Span) -> NodeId {
        ensure_sufficient_stack(|| {
            let node = self.node(id);
            let token = node.token.rebase(target);
            let source_list = node.source_list.clone();
            let kind = node.kind.clone();

            let mut map = NodeMap::default();
            for child in kind.children() {
                let copy = self.clone_node(child, target);
                map.insert(child, copy);
            }

            let source_list = source_list.rebase(target, &map);
            let kind = remap_kind(&kind, target, &map);
            self.alloc(token, source_list, kind)
        })
    }
}

#[track_caller]
fn remap(map: &NodeMap, id: NodeId) -> NodeId {
    match map.get(&id) {
        Some(copy) => *copy,
        None => panic!("{id:?} was not cloned with its parent"),
    }
}

fn remap_all(map: &NodeMap, ids: &[NodeId]) -> Box<[NodeId]> {
    ids.iter().map(|&id| remap(map, id)).collect()
}

fn rebase_all(tokens: &[Token], target: Span) -> Box<[Token]> {
    tokens.iter().map(|token| token.rebase(target)).collect()
}

fn rebase_opt(token: Option<&Token>, target: Span) -> Option<Token> {
    token.map(|token| token.rebase(target))
}

/// Copy a payload onto `target`, pointing it at the copied children.
#[track_caller]
fn remap_kind(kind: &NodeKind, target: Span, map: &NodeMap) -> NodeKind {
    match kind {
        NodeKind::BoolLit(_)
        | NodeKind::NumLit(_)
        | NodeKind::DecLit(_)
        | NodeKind::StrLit(_)
        | NodeKind::Blank(_)
        | NodeKind::Error(_)
        | NodeKind::Replaceable(_)
        | NodeKind::UnitsLit(_)
        | NodeKind::Parent(_)
        | NodeKind::Self_(_) => kind.clone(),

        NodeKind::FirstName(first) => NodeKind::FirstName(FirstNameNode {
            ident: first.ident.rebase(target),
        }),
        NodeKind::DottedName(dotted) => NodeKind::DottedName(DottedNameNode {
            left: remap(map, dotted.left),
            right: dotted.right.rebase(target),
            right_node: dotted.right_node.map(|id| remap(map, id)),
            uses_bracket: dotted.uses_bracket,
            has_possible_namespace_qualifier: dotted.has_possible_namespace_qualifier,
        }),
        NodeKind::As(as_node) => NodeKind::As(AsNode {
            left: remap(map, as_node.left),
            right: as_node.right.rebase(target),
        }),

        NodeKind::UnaryOp(unary) => NodeKind::UnaryOp(UnaryOpNode {
            op: unary.op,
            child: remap(map, unary.child),
        }),
        NodeKind::BinaryOp(binary) => NodeKind::BinaryOp(BinaryOpNode {
            op: binary.op,
            left: remap(map, binary.left),
            right: remap(map, binary.right),
        }),
        NodeKind::VariadicOp(variadic) => NodeKind::VariadicOp(VariadicOpNode {
            op: variadic.op,
            children: remap_all(map, &variadic.children),
            op_tokens: rebase_all(&variadic.op_tokens, target),
        }),

        NodeKind::List(list) => NodeKind::List(ListNode {
            children: remap_all(map, &list.children),
            delimiters: rebase_all(&list.delimiters, target),
        }),
        NodeKind::Table(table) => NodeKind::Table(TableNode {
            children: remap_all(map, &table.children),
            commas: rebase_all(&table.commas, target),
            bracket_close: rebase_opt(table.bracket_close.as_ref(), target),
        }),
        NodeKind::Record(record) => NodeKind::Record(RecordNode {
            children: remap_all(map, &record.children),
            ids: record
                .ids
                .iter()
                .map(|ident: &Identifier| ident.rebase(target))
                .collect(),
            colons: rebase_all(&record.colons, target),
            commas: rebase_all(&record.commas, target),
            curly_close: rebase_opt(record.curly_close.as_ref(), target),
            source_restriction: record.source_restriction.map(|id| remap(map, id)),
        }),
        NodeKind::StrInterp(interp) => NodeKind::StrInterp(StrInterpNode {
            children: remap_all(map, &interp.children),
            str_interp_end: rebase_opt(interp.str_interp_end.as_ref(), target),
        }),

        NodeKind::Call(call) => NodeKind::Call(CallNode {
            head: call.head.rebase(target),
            head_node: call.head_node.map(|id| remap(map, id)),
            args: remap(map, call.args),
            paren_close: rebase_opt(call.paren_close.as_ref(), target),
            unique_invocation_id: next_invocation_id(),
        }),
        NodeKind::TypeLiteral(lit) => NodeKind::TypeLiteral(TypeLiteralNode {
            type_root: remap(map, lit.type_root),
            validation: OnceLock::new(),
        }),
        NodeKind::RecordOf(record_of) => NodeKind::RecordOf(RecordOfNode {
            table_name: remap(map, record_of.table_name),
        }),
    }
}
