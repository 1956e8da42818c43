//! Parse tree nodes.
//!
//! Every node shares the same header ([`Node`]): identity, the minimum id
//! in its subtree, depth, parent back-index, primary token and source list.
//! The kind-specific payload lives in [`NodeKind`]; [`NodeTag`] is its
//! fieldless discriminant.
//!
//! # Module Structure
//!
//! - `literals`: bool/number/decimal/string/blank/error/replaceable/units
//! - `names`: first names, dotted names, `Parent`, `Self`, `As`
//! - `operators`: unary, binary and variadic operators
//! - `aggregates`: lists, tables, records, string interpolation
//! - `call`: function invocation
//! - `types`: type literals and `RecordOf`

mod aggregates;
mod call;
mod literals;
mod names;
mod operators;
mod types;

use std::fmt;
use std::sync::OnceLock;

use fx_ir::Token;
use smallvec::SmallVec;

use crate::{NodeId, SourceList};

pub use aggregates::{ListNode, RecordNode, RecordParts, StrInterpNode, TableNode, VariadicBase};
pub use call::CallNode;
pub(crate) use literals::bool_value;
pub use literals::{
    BlankNode, BoolLitNode, DecLitNode, ErrorNode, NumLitNode, ReplaceableNode, StrLitNode,
    UnitsLitNode,
};
pub use names::{AsNode, DottedNameNode, FirstNameNode, ParentNode, SelfNode};
pub use operators::{BinaryOpNode, UnaryOpNode, VariadicOpNode};
pub use types::{RecordOfNode, TypeLiteralNode};

/// Children of one node in declared (source) order.
pub type ChildIds = SmallVec<[NodeId; 4]>;

/// Discriminant of a node kind.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum NodeTag {
    BoolLit,
    NumLit,
    DecLit,
    StrLit,
    Blank,
    Error,
    Replaceable,
    UnitsLit,
    FirstName,
    DottedName,
    Parent,
    Self_,
    As,
    UnaryOp,
    BinaryOp,
    VariadicOp,
    List,
    Table,
    Record,
    StrInterp,
    Call,
    TypeLiteral,
    RecordOf,
}

impl NodeTag {
    /// Every tag, in declaration order.
    pub const ALL: [NodeTag; 23] = [
        NodeTag::BoolLit,
        NodeTag::NumLit,
        NodeTag::DecLit,
        NodeTag::StrLit,
        NodeTag::Blank,
        NodeTag::Error,
        NodeTag::Replaceable,
        NodeTag::UnitsLit,
        NodeTag::FirstName,
        NodeTag::DottedName,
        NodeTag::Parent,
        NodeTag::Self_,
        NodeTag::As,
        NodeTag::UnaryOp,
        NodeTag::BinaryOp,
        NodeTag::VariadicOp,
        NodeTag::List,
        NodeTag::Table,
        NodeTag::Record,
        NodeTag::StrInterp,
        NodeTag::Call,
        NodeTag::TypeLiteral,
        NodeTag::RecordOf,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            NodeTag::BoolLit => "boolean literal",
            NodeTag::NumLit => "number literal",
            NodeTag::DecLit => "decimal literal",
            NodeTag::StrLit => "string literal",
            NodeTag::Blank => "blank",
            NodeTag::Error => "error",
            NodeTag::Replaceable => "replaceable",
            NodeTag::UnitsLit => "units literal",
            NodeTag::FirstName => "name",
            NodeTag::DottedName => "dotted name",
            NodeTag::Parent => "Parent",
            NodeTag::Self_ => "Self",
            NodeTag::As => "As",
            NodeTag::UnaryOp => "unary operator",
            NodeTag::BinaryOp => "binary operator",
            NodeTag::VariadicOp => "chained expression",
            NodeTag::List => "list",
            NodeTag::Table => "table",
            NodeTag::Record => "record",
            NodeTag::StrInterp => "string interpolation",
            NodeTag::Call => "function call",
            NodeTag::TypeLiteral => "type literal",
            NodeTag::RecordOf => "RecordOf",
        }
    }
}

impl fmt::Display for NodeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kind-specific payload of a node.
#[derive(Clone, Debug)]
pub enum NodeKind {
    BoolLit(BoolLitNode),
    NumLit(NumLitNode),
    DecLit(DecLitNode),
    StrLit(StrLitNode),
    Blank(BlankNode),
    Error(ErrorNode),
    Replaceable(ReplaceableNode),
    UnitsLit(UnitsLitNode),
    FirstName(FirstNameNode),
    DottedName(DottedNameNode),
    Parent(ParentNode),
    Self_(SelfNode),
    As(AsNode),
    UnaryOp(UnaryOpNode),
    BinaryOp(BinaryOpNode),
    VariadicOp(VariadicOpNode),
    List(ListNode),
    Table(TableNode),
    Record(RecordNode),
    StrInterp(StrInterpNode),
    Call(CallNode),
    TypeLiteral(TypeLiteralNode),
    RecordOf(RecordOfNode),
}

impl NodeKind {
    pub fn tag(&self) -> NodeTag {
        match self {
            NodeKind::BoolLit(_) => NodeTag::BoolLit,
            NodeKind::NumLit(_) => NodeTag::NumLit,
            NodeKind::DecLit(_) => NodeTag::DecLit,
            NodeKind::StrLit(_) => NodeTag::StrLit,
            NodeKind::Blank(_) => NodeTag::Blank,
            NodeKind::Error(_) => NodeTag::Error,
            NodeKind::Replaceable(_) => NodeTag::Replaceable,
            NodeKind::UnitsLit(_) => NodeTag::UnitsLit,
            NodeKind::FirstName(_) => NodeTag::FirstName,
            NodeKind::DottedName(_) => NodeTag::DottedName,
            NodeKind::Parent(_) => NodeTag::Parent,
            NodeKind::Self_(_) => NodeTag::Self_,
            NodeKind::As(_) => NodeTag::As,
            NodeKind::UnaryOp(_) => NodeTag::UnaryOp,
            NodeKind::BinaryOp(_) => NodeTag::BinaryOp,
            NodeKind::VariadicOp(_) => NodeTag::VariadicOp,
            NodeKind::List(_) => NodeTag::List,
            NodeKind::Table(_) => NodeTag::Table,
            NodeKind::Record(_) => NodeTag::Record,
            NodeKind::StrInterp(_) => NodeTag::StrInterp,
            NodeKind::Call(_) => NodeTag::Call,
            NodeKind::TypeLiteral(_) => NodeTag::TypeLiteral,
            NodeKind::RecordOf(_) => NodeTag::RecordOf,
        }
    }

    /// Every owned child, in source order.
    ///
    /// This is the structural child set used for identity bookkeeping. It
    /// includes children some traversals skip (a call's head node).
    pub fn children(&self) -> ChildIds {
        let mut out = ChildIds::new();
        match self {
            NodeKind::BoolLit(_)
            | NodeKind::NumLit(_)
            | NodeKind::DecLit(_)
            | NodeKind::StrLit(_)
            | NodeKind::Blank(_)
            | NodeKind::Error(_)
            | NodeKind::Replaceable(_)
            | NodeKind::UnitsLit(_)
            | NodeKind::FirstName(_)
            | NodeKind::Parent(_)
            | NodeKind::Self_(_) => {}
            NodeKind::DottedName(dotted) => {
                out.push(dotted.left);
                out.extend(dotted.right_node);
            }
            NodeKind::As(as_node) => out.push(as_node.left),
            NodeKind::UnaryOp(unary) => out.push(unary.child),
            NodeKind::BinaryOp(binary) => {
                out.push(binary.left);
                out.push(binary.right);
            }
            NodeKind::VariadicOp(variadic) => out.extend_from_slice(variadic.children()),
            NodeKind::List(list) => out.extend_from_slice(list.children()),
            NodeKind::Table(table) => out.extend_from_slice(table.children()),
            NodeKind::Record(record) => {
                out.extend(record.source_restriction);
                out.extend_from_slice(record.children());
            }
            NodeKind::StrInterp(interp) => out.extend_from_slice(interp.children()),
            NodeKind::Call(call) => {
                out.extend(call.head_node);
                out.push(call.args);
            }
            NodeKind::TypeLiteral(lit) => out.push(lit.type_root),
            NodeKind::RecordOf(record_of) => out.push(record_of.table_name),
        }
        out
    }

    /// Children of the variadic kinds (list, table, record, chain,
    /// interpolation); `None` for every other kind.
    pub fn variadic(&self) -> Option<&dyn VariadicBase> {
        match self {
            NodeKind::VariadicOp(n) => Some(n),
            NodeKind::List(n) => Some(n),
            NodeKind::Table(n) => Some(n),
            NodeKind::Record(n) => Some(n),
            NodeKind::StrInterp(n) => Some(n),
            _ => None,
        }
    }
}

/// A node in a [`SyntaxTree`](crate::SyntaxTree).
///
/// The header is fixed at construction. The only later writes happen while
/// the parser still holds the tree mutably: the parent back-index (once)
/// and the source list (at most one replacement).
#[derive(Clone, Debug)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) min_child_id: NodeId,
    pub(crate) depth: u32,
    pub(crate) parent: Option<NodeId>,
    pub(crate) token: Token,
    pub(crate) source_list: SourceList,
    pub(crate) source_list_replaced: bool,
    pub(crate) uses_chains: OnceLock<bool>,
    pub(crate) kind: NodeKind,
}

impl Node {
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Smallest id in this node's subtree (the node included).
    #[inline]
    pub fn min_child_id(&self) -> NodeId {
        self.min_child_id
    }

    /// 1 for leaves, one more than the deepest child otherwise.
    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// The node's primary token.
    #[inline]
    pub fn token(&self) -> &Token {
        &self.token
    }

    #[inline]
    pub fn source_list(&self) -> &SourceList {
        &self.source_list
    }

    #[inline]
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    #[inline]
    pub fn tag(&self) -> NodeTag {
        self.kind.tag()
    }

    #[inline]
    pub fn children(&self) -> ChildIds {
        self.kind.children()
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.depth == 1
    }
}

/// Generates `as_*` (returns `None` on mismatch) and `cast_*` (panics on
/// mismatch) accessors for each kind.
macro_rules! node_accessors {
    ($($variant:ident => $payload:ty, $as_fn:ident, $cast_fn:ident;)*) => {
        impl Node {
            $(
                #[inline]
                pub fn $as_fn(&self) -> Option<&$payload> {
                    match &self.kind {
                        NodeKind::$variant(payload) => Some(payload),
                        _ => None,
                    }
                }

                /// # Panics
                /// Panics if the node is of a different kind.
                #[inline]
                #[track_caller]
                pub fn $cast_fn(&self) -> &$payload {
                    match &self.kind {
                        NodeKind::$variant(payload) => payload,
                        other => panic!(
                            concat!("expected ", stringify!($variant), " node, found {} ({:?})"),
                            other.tag(),
                            self.id,
                        ),
                    }
                }
            )*
        }
    };
}

node_accessors! {
    BoolLit => BoolLitNode, as_bool_lit, cast_bool_lit;
    NumLit => NumLitNode, as_num_lit, cast_num_lit;
    DecLit => DecLitNode, as_dec_lit, cast_dec_lit;
    StrLit => StrLitNode, as_str_lit, cast_str_lit;
    Blank => BlankNode, as_blank, cast_blank;
    Error => ErrorNode, as_error, cast_error;
    Replaceable => ReplaceableNode, as_replaceable, cast_replaceable;
    UnitsLit => UnitsLitNode, as_units_lit, cast_units_lit;
    FirstName => FirstNameNode, as_first_name, cast_first_name;
    DottedName => DottedNameNode, as_dotted_name, cast_dotted_name;
    Parent => ParentNode, as_parent, cast_parent;
    Self_ => SelfNode, as_self, cast_self;
    As => AsNode, as_as_node, cast_as_node;
    UnaryOp => UnaryOpNode, as_unary_op, cast_unary_op;
    BinaryOp => BinaryOpNode, as_binary_op, cast_binary_op;
    VariadicOp => VariadicOpNode, as_variadic_op, cast_variadic_op;
    List => ListNode, as_list, cast_list;
    Table => TableNode, as_table, cast_table;
    Record => RecordNode, as_record, cast_record;
    StrInterp => StrInterpNode, as_str_interp, cast_str_interp;
    Call => CallNode, as_call, cast_call;
    TypeLiteral => TypeLiteralNode, as_type_literal, cast_type_literal;
    RecordOf => RecordOfNode, as_record_of, cast_record_of;
}
