//! Variadic aggregate payloads: lists, tables, records, interpolations.

use fx_ir::{Identifier, Token};

use crate::NodeId;

/// Shared view of every kind that owns an ordered run of children.
pub trait VariadicBase {
    /// Children in source order.
    fn children(&self) -> &[NodeId];

    #[inline]
    fn len(&self) -> usize {
        self.children().len()
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.children().is_empty()
    }
}

/// Comma-separated list; call arguments are a list whose primary token is
/// the opening parenthesis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListNode {
    pub(crate) children: Box<[NodeId]>,
    pub delimiters: Box<[Token]>,
}

impl VariadicBase for ListNode {
    fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Table literal: `[1, 2, 3]`. The primary token is `[`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableNode {
    pub(crate) children: Box<[NodeId]>,
    pub commas: Box<[Token]>,
    /// `None` when the parser recovered from a missing `]`.
    pub bracket_close: Option<Token>,
}

impl VariadicBase for TableNode {
    fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Record literal: `{a: 1, b: 2}`. The primary token is `{`.
///
/// `ids[i]` names the field whose value is `children[i]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordNode {
    pub(crate) children: Box<[NodeId]>,
    pub ids: Box<[Identifier]>,
    pub colons: Box<[Token]>,
    pub commas: Box<[Token]>,
    /// `None` when the parser recovered from a missing `}`.
    pub curly_close: Option<Token>,
    /// Data source the record is restricted to, written before the brace.
    pub source_restriction: Option<NodeId>,
}

impl RecordNode {
    /// Field names paired with their value nodes.
    pub fn fields(&self) -> impl Iterator<Item = (&Identifier, NodeId)> + '_ {
        self.ids.iter().zip(self.children.iter().copied())
    }
}

impl VariadicBase for RecordNode {
    fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Inputs for [`SyntaxTree::record`](crate::SyntaxTree::record).
#[derive(Clone, Debug, Default)]
pub struct RecordParts {
    pub fields: Vec<(Identifier, NodeId)>,
    pub colons: Vec<Token>,
    pub commas: Vec<Token>,
    pub curly_close: Option<Token>,
    pub source_restriction: Option<NodeId>,
}

/// Interpolated string: `$"Hello {name}!"`. The primary token is the
/// interpolation start; children alternate text and island expressions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StrInterpNode {
    pub(crate) children: Box<[NodeId]>,
    /// `None` when the parser recovered from a missing closing quote.
    pub str_interp_end: Option<Token>,
}

impl VariadicBase for StrInterpNode {
    fn children(&self) -> &[NodeId] {
        &self.children
    }
}
