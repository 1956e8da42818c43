//! Fx Syntax - the parse tree of the Fx formula language.
//!
//! The parser builds a [`SyntaxTree`] bottom-up, one constructor call per
//! node. Later phases (binding, type checking, lowering, printing) read the
//! tree through two visitor protocols and attach their own side tables keyed
//! by [`NodeId`]; nothing mutates the tree after parsing.
//!
//! - Identity: ids are allocation order, so [`SyntaxTree::in_tree`] is O(1)
//! - Spans: per-kind text, complete and source-based spans
//! - Cloning: [`SyntaxTree::clone_subtree`] copies a subtree onto a new span
//! - Visiting: [`Visitor`] (pre/post traversal) and [`Fold`] (result/context)
//! - Type literals: validation of the `Type(...)` sub-grammar

mod find;
mod fold;
mod invocation;
mod node;
mod node_id;
mod printer;
mod source_list;
mod stack;
mod tree;
mod type_literal;
mod visitor;

pub use fold::{fold, Fold};
pub use invocation::INVOCATION_ID_PREFIX;
pub use node::{
    AsNode, BinaryOpNode, BlankNode, BoolLitNode, CallNode, ChildIds, DecLitNode,
    DottedNameNode, ErrorNode, FirstNameNode, ListNode, Node, NodeKind, NodeTag, NumLitNode,
    ParentNode, RecordNode, RecordOfNode, RecordParts, ReplaceableNode, SelfNode,
    StrInterpNode, StrLitNode, TableNode, TypeLiteralNode, UnaryOpNode, UnitsLitNode,
    VariadicBase, VariadicOpNode,
};
pub use node_id::NodeId;
pub use printer::{print_node, NodeDisplay};
pub use source_list::{NodeMap, SourceItem, SourceList};
pub use stack::ensure_sufficient_stack;
pub use tree::SyntaxTree;
pub use type_literal::{validate_type_root, TypeLiteralError, TypeLiteralValidation};
pub use visitor::{accept, Visitor};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a stderr subscriber for tree diagnostics.
///
/// Does nothing unless `RUST_LOG` is set (`RUST_LOG=fx_syntax=trace`
/// shows clones and source-list stitching). Idempotent, and leaves an
/// already installed global subscriber in place.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var_os("RUST_LOG").is_none() {
            return;
        }
        let installed = tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .try_init();
        if installed.is_err() {
            tracing::debug!("global subscriber already set; keeping it");
        }
    });
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::NodeId;
    fx_ir::static_assert_size!(NodeId, 4);
    fx_ir::static_assert_size!(Option<NodeId>, 8);
}
