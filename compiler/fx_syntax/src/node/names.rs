//! Name reference payloads.

use fx_ir::Identifier;

use crate::NodeId;

/// A simple name: `Accounts`, `@Col`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FirstNameNode {
    pub ident: Identifier,
}

/// The `Parent` keyword.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParentNode;

/// The `Self` keyword.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelfNode;

/// One link of a qualifier chain: `left.right` or `left[@right]`.
///
/// `A.B.C` is `Dotted(Dotted(A, B), C)`: the chain grows to the left.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DottedNameNode {
    pub left: NodeId,
    pub right: Identifier,
    /// Optional expression form of the right-hand member.
    pub right_node: Option<NodeId>,
    /// Written with bracket syntax (`left[@right]`).
    pub uses_bracket: bool,
    pub(crate) has_possible_namespace_qualifier: bool,
}

impl DottedNameNode {
    /// Whether the whole left spine is made of names (`FirstName`, `Parent`,
    /// `Self`, or dotted names that are themselves qualifiers), so the chain
    /// can be read as a namespace path.
    #[inline]
    pub fn has_possible_namespace_qualifier(&self) -> bool {
        self.has_possible_namespace_qualifier
    }
}

/// `left As right`: names the record scope of `left`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AsNode {
    pub left: NodeId,
    pub right: Identifier,
}
