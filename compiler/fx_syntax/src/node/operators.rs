//! Operator payloads.

use fx_ir::{BinaryOp, Token, UnaryOp, VariadicOp};

use super::VariadicBase;
use crate::NodeId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnaryOpNode {
    pub op: UnaryOp,
    pub child: NodeId,
}

/// Infix operator.
///
/// The parser emits percent-sign nodes with `right` textually before
/// `left` for syntax coloring; span computation accounts for that order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryOpNode {
    pub op: BinaryOp,
    pub left: NodeId,
    pub right: NodeId,
}

/// Same-operator chain: `a; b; c`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariadicOpNode {
    pub op: VariadicOp,
    pub(crate) children: Box<[NodeId]>,
    /// One operator token between each pair of operands.
    pub op_tokens: Box<[Token]>,
}

impl VariadicBase for VariadicOpNode {
    fn children(&self) -> &[NodeId] {
        &self.children
    }
}
