//! Function invocation payload.

use fx_ir::{Identifier, Token};

use crate::NodeId;

/// `Head(args...)`, or `NS.Head(args...)` for a qualified call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallNode {
    pub head: Identifier,
    /// Expression form of a qualified head (a dotted name), if any.
    pub head_node: Option<NodeId>,
    /// Argument list node (a [`ListNode`](super::ListNode)).
    pub args: NodeId,
    /// `None` when the parser recovered from a missing `)`.
    pub paren_close: Option<Token>,
    pub(crate) unique_invocation_id: Box<str>,
}

impl CallNode {
    /// Process-wide unique label for this call site.
    #[inline]
    pub fn unique_invocation_id(&self) -> &str {
        &self.unique_invocation_id
    }
}
