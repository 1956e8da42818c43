//! Source provenance for nodes.
//!
//! A node's [`SourceList`] records, in source order, the material its text
//! was reconstructed from: its own tokens (punctuation, keywords, trivia)
//! interleaved with references to the child nodes that fill the gaps.
//! Flattening the list through the tree yields every token of the node's
//! literal text, in non-decreasing span order.

use fx_ir::{Identifier, Span, Token};
use rustc_hash::FxHashMap;

use crate::NodeId;

/// Old-to-new node substitution built while cloning a subtree.
pub type NodeMap = FxHashMap<NodeId, NodeId>;

/// One entry in a [`SourceList`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceItem {
    /// A token owned by this node.
    Token(Token),
    /// The full source of a child node.
    Node(NodeId),
    /// An identifier, contributing its `@` prefix (if any) and name token.
    Identifier(Identifier),
    /// A run of whitespace/comment tokens.
    Whitespace(Vec<Token>),
    /// A nested group of items, flattened in place.
    Spread(Vec<SourceItem>),
}

impl SourceItem {
    /// Copy this item onto `span`, redirecting node references through `map`.
    ///
    /// # Panics
    /// Panics if a referenced node is missing from `map`: the owning node's
    /// clone did not clone that child.
    #[track_caller]
    #[must_use]
    pub fn rebase(&self, span: Span, map: &NodeMap) -> SourceItem {
        match self {
            SourceItem::Token(token) => SourceItem::Token(token.rebase(span)),
            SourceItem::Node(id) => match map.get(id) {
                Some(new_id) => SourceItem::Node(*new_id),
                None => panic!("source list references {id:?}, which was not cloned with its parent"),
            },
            SourceItem::Identifier(ident) => SourceItem::Identifier(ident.rebase(span)),
            SourceItem::Whitespace(tokens) => {
                SourceItem::Whitespace(tokens.iter().map(|t| t.rebase(span)).collect())
            }
            SourceItem::Spread(items) => {
                SourceItem::Spread(items.iter().map(|item| item.rebase(span, map)).collect())
            }
        }
    }
}

/// Ordered source material of one node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceList {
    items: Vec<SourceItem>,
}

impl SourceList {
    #[inline]
    pub fn new(items: Vec<SourceItem>) -> Self {
        SourceList { items }
    }

    /// A list holding a single token.
    pub fn from_token(token: Token) -> Self {
        SourceList {
            items: vec![SourceItem::Token(token)],
        }
    }

    #[inline]
    pub fn empty() -> Self {
        SourceList::default()
    }

    #[inline]
    pub fn items(&self) -> &[SourceItem] {
        &self.items
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Ids of child nodes referenced directly by this list, in order.
    pub fn node_refs(&self) -> Vec<NodeId> {
        fn collect(items: &[SourceItem], out: &mut Vec<NodeId>) {
            for item in items {
                match item {
                    SourceItem::Node(id) => out.push(*id),
                    SourceItem::Spread(nested) => collect(nested, out),
                    SourceItem::Token(_)
                    | SourceItem::Identifier(_)
                    | SourceItem::Whitespace(_) => {}
                }
            }
        }
        let mut out = Vec::new();
        collect(&self.items, &mut out);
        out
    }

    /// Copy the list onto `span`, redirecting child references via `map`.
    #[track_caller]
    #[must_use]
    pub fn rebase(&self, span: Span, map: &NodeMap) -> SourceList {
        SourceList {
            items: self.items.iter().map(|item| item.rebase(span, map)).collect(),
        }
    }
}

impl From<Vec<SourceItem>> for SourceList {
    fn from(items: Vec<SourceItem>) -> Self {
        SourceList::new(items)
    }
}

impl FromIterator<SourceItem> for SourceList {
    fn from_iter<I: IntoIterator<Item = SourceItem>>(iter: I) -> Self {
        SourceList {
            items: iter.into_iter().collect(),
        }
    }
}
