//! Node constructors.
//!
//! Every constructor takes the ids of children that already exist in the
//! arena, the node's primary token and its source list, and returns the id
//! of the new node. Children are adopted on the spot: each gets its parent
//! back-index set to the new node exactly once.

use std::sync::OnceLock;

use fx_ir::{BinaryOp, DName, Decimal, Identifier, Token, TokenKind, UnaryOp, VariadicOp};

use super::SyntaxTree;
use crate::invocation::next_invocation_id;
use crate::node::{
    bool_value, AsNode, BinaryOpNode, BlankNode, BoolLitNode, CallNode, DecLitNode,
    DottedNameNode, ErrorNode, FirstNameNode, ListNode, Node, NodeKind, NodeTag, NumLitNode,
    ParentNode, RecordNode, RecordOfNode, RecordParts, ReplaceableNode, SelfNode, StrInterpNode,
    StrLitNode, TableNode, TypeLiteralNode, UnaryOpNode, UnitsLitNode, VariadicOpNode,
};
use crate::{NodeId, SourceList};

/// Source lists may only refer to the node's own children.
#[track_caller]
pub(super) fn check_source_refs(id: NodeId, children: &[NodeId], source_list: &SourceList) {
    for referenced in source_list.node_refs() {
        assert!(
            children.contains(&referenced),
            "source list of {id:?} refers to {referenced:?}, which is not one of its children"
        );
    }
}

impl SyntaxTree {
    /// Allocate a node and adopt its children.
    #[track_caller]
    pub(super) fn alloc(&mut self, token: Token, source_list: SourceList, kind: NodeKind) -> NodeId {
        let raw = match u32::try_from(self.nodes.len()) {
            Ok(raw) if raw != NodeId::INVALID.raw() => raw,
            _ => panic!("syntax tree exceeded {} nodes", NodeId::INVALID.raw()),
        };
        let id = NodeId::new(raw);

        let children = kind.children();
        let mut min_child_id = id;
        let mut max_child_depth = 0;
        for &child in &children {
            let child_node = self.node(child);
            min_child_id = min_child_id.min(child_node.min_child_id);
            max_child_depth = max_child_depth.max(child_node.depth);
        }
        check_source_refs(id, &children, &source_list);
        for &child in &children {
            self.adopt(child, id);
        }

        self.nodes.push(Node {
            id,
            min_child_id,
            depth: max_child_depth + 1,
            parent: None,
            token,
            source_list,
            source_list_replaced: false,
            uses_chains: OnceLock::new(),
            kind,
        });
        id
    }

    /// Set the parent back-index of `child`.
    ///
    /// The back-index is written once. A child listed twice by the same
    /// parent is rejected like one owned by another node.
    #[track_caller]
    fn adopt(&mut self, child: NodeId, parent: NodeId) {
        let slot = &mut self.nodes[child.index()].parent;
        if let Some(existing) = *slot {
            panic!("{child:?} already belongs to {existing:?} and cannot be adopted by {parent:?}");
        }
        *slot = Some(parent);
    }

    /// Expect `id` to be a node of kind `tag`.
    #[track_caller]
    fn expect_tag(&self, id: NodeId, tag: NodeTag, role: &str) {
        let found = self.node(id).tag();
        assert!(found == tag, "{role} must be a {tag} node, found {found} ({id:?})");
    }

    // Literals

    /// `true` / `false`, read from a `True` or `False` token.
    ///
    /// # Panics
    /// Panics if `token` is not a boolean keyword.
    #[track_caller]
    pub fn bool_lit(&mut self, token: Token, source_list: SourceList) -> NodeId {
        let Some(value) = bool_value(&token) else {
            panic!("boolean literal needs a True/False token, found {token:?}");
        };
        self.alloc(token, source_list, NodeKind::BoolLit(BoolLitNode { value }))
    }

    /// Number literal carried by a `NumLit` token.
    ///
    /// # Panics
    /// Panics if `token` is not a number literal token.
    #[track_caller]
    pub fn num_lit(&mut self, token: Token, source_list: SourceList) -> NodeId {
        let Some(value) = token.kind.num_value() else {
            panic!("number literal needs a NumLit token, found {token:?}");
        };
        let payload = NumLitNode {
            bits: value.to_bits(),
            inline: false,
        };
        self.alloc(token, source_list, NodeKind::NumLit(payload))
    }

    /// Number literal with an inline value, for nodes synthesized over a
    /// token that does not carry one.
    pub fn num_lit_value(&mut self, token: Token, value: f64, source_list: SourceList) -> NodeId {
        let payload = NumLitNode {
            bits: value.to_bits(),
            inline: true,
        };
        self.alloc(token, source_list, NodeKind::NumLit(payload))
    }

    /// Decimal literal carried by a `DecLit` token.
    ///
    /// # Panics
    /// Panics if `token` is not a decimal literal token.
    #[track_caller]
    pub fn dec_lit(&mut self, token: Token, source_list: SourceList) -> NodeId {
        let Some(value) = token.kind.dec_value() else {
            panic!("decimal literal needs a DecLit token, found {token:?}");
        };
        let payload = DecLitNode {
            value,
            inline: false,
        };
        self.alloc(token, source_list, NodeKind::DecLit(payload))
    }

    pub fn dec_lit_value(&mut self, token: Token, value: Decimal, source_list: SourceList) -> NodeId {
        let payload = DecLitNode {
            value,
            inline: true,
        };
        self.alloc(token, source_list, NodeKind::DecLit(payload))
    }

    /// String literal.
    ///
    /// # Panics
    /// Panics if `token` is not a string literal token.
    #[track_caller]
    pub fn str_lit(&mut self, token: Token, source_list: SourceList) -> NodeId {
        let value = match &token.kind {
            TokenKind::StrLit(value) => value.clone(),
            _ => panic!("string literal needs a StrLit token, found {token:?}"),
        };
        self.alloc(token, source_list, NodeKind::StrLit(StrLitNode { value }))
    }

    pub fn blank(&mut self, token: Token, source_list: SourceList) -> NodeId {
        self.alloc(token, source_list, NodeKind::Blank(BlankNode))
    }

    /// Recovery node standing in for input the parser could not make sense of.
    pub fn error(
        &mut self,
        token: Token,
        message: impl Into<Box<str>>,
        args: Vec<Box<str>>,
        source_list: SourceList,
    ) -> NodeId {
        let payload = ErrorNode {
            message: message.into(),
            args,
        };
        self.alloc(token, source_list, NodeKind::Error(payload))
    }

    /// # Panics
    /// Panics if `token` is not a replaceable token.
    #[track_caller]
    pub fn replaceable(&mut self, token: Token, source_list: SourceList) -> NodeId {
        let value = match &token.kind {
            TokenKind::Replaceable(value) => value.clone(),
            _ => panic!("replaceable node needs a Replaceable token, found {token:?}"),
        };
        self.alloc(token, source_list, NodeKind::Replaceable(ReplaceableNode { value }))
    }

    pub fn units_lit(
        &mut self,
        token: Token,
        value: f64,
        unit: DName,
        source_list: SourceList,
    ) -> NodeId {
        let payload = UnitsLitNode {
            bits: value.to_bits(),
            unit,
        };
        self.alloc(token, source_list, NodeKind::UnitsLit(payload))
    }

    // Names

    /// A simple name. The primary token is the identifier's own token.
    pub fn first_name(&mut self, ident: Identifier, source_list: SourceList) -> NodeId {
        let token = ident.token.clone();
        self.alloc(token, source_list, NodeKind::FirstName(FirstNameNode { ident }))
    }

    pub fn parent_ref(&mut self, token: Token, source_list: SourceList) -> NodeId {
        self.alloc(token, source_list, NodeKind::Parent(ParentNode))
    }

    pub fn self_ref(&mut self, token: Token, source_list: SourceList) -> NodeId {
        self.alloc(token, source_list, NodeKind::Self_(SelfNode))
    }

    /// `left.right`, or `left[@right]` when `token` is `[`.
    ///
    /// `token` is the separator (`.`, `!` or `[`).
    pub fn dotted_name(
        &mut self,
        left: NodeId,
        right: Identifier,
        right_node: Option<NodeId>,
        token: Token,
        source_list: SourceList,
    ) -> NodeId {
        let has_possible_namespace_qualifier = match &self.node(left).kind {
            NodeKind::FirstName(_) | NodeKind::Parent(_) | NodeKind::Self_(_) => true,
            NodeKind::DottedName(inner) => inner.has_possible_namespace_qualifier,
            _ => false,
        };
        let payload = DottedNameNode {
            left,
            right,
            right_node,
            uses_bracket: token.kind == TokenKind::BracketOpen,
            has_possible_namespace_qualifier,
        };
        self.alloc(token, source_list, NodeKind::DottedName(payload))
    }

    /// `left As right`. `token` is the `As` keyword.
    pub fn as_node(
        &mut self,
        left: NodeId,
        right: Identifier,
        token: Token,
        source_list: SourceList,
    ) -> NodeId {
        self.alloc(token, source_list, NodeKind::As(AsNode { left, right }))
    }

    // Operators

    pub fn unary_op(
        &mut self,
        op: UnaryOp,
        child: NodeId,
        token: Token,
        source_list: SourceList,
    ) -> NodeId {
        self.alloc(token, source_list, NodeKind::UnaryOp(UnaryOpNode { op, child }))
    }

    pub fn binary_op(
        &mut self,
        op: BinaryOp,
        left: NodeId,
        right: NodeId,
        token: Token,
        source_list: SourceList,
    ) -> NodeId {
        let payload = BinaryOpNode { op, left, right };
        self.alloc(token, source_list, NodeKind::BinaryOp(payload))
    }

    /// `a; b; c`. `token` is the first operator token.
    pub fn variadic_op(
        &mut self,
        op: VariadicOp,
        children: Vec<NodeId>,
        op_tokens: Vec<Token>,
        token: Token,
        source_list: SourceList,
    ) -> NodeId {
        let payload = VariadicOpNode {
            op,
            children: children.into_boxed_slice(),
            op_tokens: op_tokens.into_boxed_slice(),
        };
        self.alloc(token, source_list, NodeKind::VariadicOp(payload))
    }

    // Aggregates

    pub fn list(
        &mut self,
        token: Token,
        children: Vec<NodeId>,
        delimiters: Vec<Token>,
        source_list: SourceList,
    ) -> NodeId {
        let payload = ListNode {
            children: children.into_boxed_slice(),
            delimiters: delimiters.into_boxed_slice(),
        };
        self.alloc(token, source_list, NodeKind::List(payload))
    }

    pub fn table(
        &mut self,
        token: Token,
        children: Vec<NodeId>,
        commas: Vec<Token>,
        bracket_close: Option<Token>,
        source_list: SourceList,
    ) -> NodeId {
        let payload = TableNode {
            children: children.into_boxed_slice(),
            commas: commas.into_boxed_slice(),
            bracket_close,
        };
        self.alloc(token, source_list, NodeKind::Table(payload))
    }

    /// Record literal. The source restriction, if any, is adopted before
    /// the field values.
    pub fn record(&mut self, token: Token, parts: RecordParts, source_list: SourceList) -> NodeId {
        let RecordParts {
            fields,
            colons,
            commas,
            curly_close,
            source_restriction,
        } = parts;
        let (ids, children): (Vec<Identifier>, Vec<NodeId>) = fields.into_iter().unzip();
        let payload = RecordNode {
            children: children.into_boxed_slice(),
            ids: ids.into_boxed_slice(),
            colons: colons.into_boxed_slice(),
            commas: commas.into_boxed_slice(),
            curly_close,
            source_restriction,
        };
        self.alloc(token, source_list, NodeKind::Record(payload))
    }

    pub fn str_interp(
        &mut self,
        token: Token,
        children: Vec<NodeId>,
        str_interp_end: Option<Token>,
        source_list: SourceList,
    ) -> NodeId {
        let payload = StrInterpNode {
            children: children.into_boxed_slice(),
            str_interp_end,
        };
        self.alloc(token, source_list, NodeKind::StrInterp(payload))
    }

    // Calls and types

    /// Function call. Every call gets a fresh process-wide invocation id.
    ///
    /// # Panics
    /// Panics if `args` is not a list node.
    #[track_caller]
    pub fn call(
        &mut self,
        token: Token,
        head: Identifier,
        head_node: Option<NodeId>,
        args: NodeId,
        paren_close: Option<Token>,
        source_list: SourceList,
    ) -> NodeId {
        self.expect_tag(args, NodeTag::List, "call arguments");
        let payload = CallNode {
            head,
            head_node,
            args,
            paren_close,
            unique_invocation_id: next_invocation_id(),
        };
        self.alloc(token, source_list, NodeKind::Call(payload))
    }

    /// `Type(type_root)`.
    pub fn type_literal(&mut self, token: Token, type_root: NodeId, source_list: SourceList) -> NodeId {
        let payload = TypeLiteralNode {
            type_root,
            validation: OnceLock::new(),
        };
        self.alloc(token, source_list, NodeKind::TypeLiteral(payload))
    }

    /// `RecordOf(table_name)`.
    pub fn record_of(&mut self, token: Token, table_name: NodeId, source_list: SourceList) -> NodeId {
        self.alloc(token, source_list, NodeKind::RecordOf(RecordOfNode { table_name }))
    }
}
