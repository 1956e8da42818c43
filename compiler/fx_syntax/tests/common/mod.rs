//! Formula builder for integration tests.
//!
//! Stands in for the parser: each call appends text to the formula and
//! builds nodes in source order, so every token has the span it would have
//! after lexing and every node has a realistic source list.

#![allow(dead_code, reason = "each test binary uses a subset")]
#![allow(clippy::cast_possible_truncation, reason = "test formulas are short")]

use fx_ir::{BinaryOp, DName, Decimal, Identifier, Span, Token, TokenKind, UnaryOp, VariadicOp};
use fx_syntax::{NodeId, RecordParts, SourceItem, SourceList, SyntaxTree};

#[derive(Default)]
pub struct Formula {
    pub tree: SyntaxTree,
    pub text: String,
}

fn binary_token(op: BinaryOp) -> (TokenKind, &'static str) {
    match op {
        BinaryOp::Or => (TokenKind::Or, "Or"),
        BinaryOp::And => (TokenKind::And, "And"),
        BinaryOp::Concat => (TokenKind::Ampersand, "&"),
        BinaryOp::Add => (TokenKind::Add, "+"),
        BinaryOp::Mul => (TokenKind::Mul, "*"),
        BinaryOp::Div => (TokenKind::Div, "/"),
        BinaryOp::Power => (TokenKind::Caret, "^"),
        BinaryOp::Equal => (TokenKind::Equ, "="),
        BinaryOp::NotEqual => (TokenKind::LssGrt, "<>"),
        BinaryOp::Less => (TokenKind::Lss, "<"),
        BinaryOp::LessEqual => (TokenKind::LssEqu, "<="),
        BinaryOp::Greater => (TokenKind::Grt, ">"),
        BinaryOp::GreaterEqual => (TokenKind::GrtEqu, ">="),
        BinaryOp::In => (TokenKind::In, "in"),
        BinaryOp::ExactIn => (TokenKind::ExactIn, "exactin"),
        BinaryOp::Error => (TokenKind::Error, "?"),
    }
}

impl Formula {
    /// Start an empty formula. `RUST_LOG=fx_syntax=trace` logs tree events.
    pub fn new() -> Self {
        fx_syntax::init_tracing();
        Self::default()
    }

    fn pos(&self) -> u32 {
        self.text.len() as u32
    }

    /// Append `text` and return a token of `kind` covering it.
    pub fn token(&mut self, kind: TokenKind, text: &str) -> Token {
        let start = self.pos();
        self.text.push_str(text);
        Token::new(kind, Span::new(start, self.pos()))
    }

    pub fn space(&mut self) -> SourceItem {
        SourceItem::Whitespace(vec![self.token(TokenKind::Whitespace, " ")])
    }

    pub fn ident(&mut self, name: &str) -> Identifier {
        let token = self.token(TokenKind::Ident(DName::new(name)), name);
        Identifier::new(DName::new(name), token)
    }

    // Leaves

    pub fn num(&mut self, value: f64) -> NodeId {
        let token = self.token(TokenKind::num(value), &value.to_string());
        self.tree.num_lit(token.clone(), SourceList::from_token(token))
    }

    pub fn dec(&mut self, text: &str) -> NodeId {
        let value: Decimal = text.parse().unwrap_or_else(|e| panic!("bad decimal {text}: {e}"));
        let token = self.token(TokenKind::DecLit(value), text);
        self.tree.dec_lit(token.clone(), SourceList::from_token(token))
    }

    pub fn string(&mut self, value: &str) -> NodeId {
        let token = self.token(TokenKind::StrLit(value.into()), &format!("\"{value}\""));
        self.tree.str_lit(token.clone(), SourceList::from_token(token))
    }

    pub fn boolean(&mut self, value: bool) -> NodeId {
        let (kind, text) = if value { (TokenKind::True, "true") } else { (TokenKind::False, "false") };
        let token = self.token(kind, text);
        self.tree.bool_lit(token.clone(), SourceList::from_token(token))
    }

    pub fn blank(&mut self) -> NodeId {
        let token = self.token(TokenKind::Ident(DName::new("Blank")), "Blank()");
        self.tree.blank(token.clone(), SourceList::from_token(token))
    }

    pub fn error(&mut self, message: &str) -> NodeId {
        let token = self.token(TokenKind::Error, "?");
        self.tree.error(token.clone(), message, Vec::new(), SourceList::from_token(token))
    }

    pub fn replaceable(&mut self, name: &str) -> NodeId {
        let token = self.token(TokenKind::Replaceable(name.into()), &format!("%{name}%"));
        self.tree.replaceable(token.clone(), SourceList::from_token(token))
    }

    pub fn units(&mut self, value: f64, unit: &str) -> NodeId {
        let token = self.token(TokenKind::num(value), &format!("{value} {unit}"));
        self.tree.units_lit(token.clone(), value, DName::new(unit), SourceList::from_token(token))
    }

    pub fn name(&mut self, name: &str) -> NodeId {
        let ident = self.ident(name);
        let source = SourceList::new(vec![SourceItem::Identifier(ident.clone())]);
        self.tree.first_name(ident, source)
    }

    pub fn parent(&mut self) -> NodeId {
        let token = self.token(TokenKind::Parent, "Parent");
        self.tree.parent_ref(token.clone(), SourceList::from_token(token))
    }

    pub fn self_ref(&mut self) -> NodeId {
        let token = self.token(TokenKind::SelfKw, "Self");
        self.tree.self_ref(token.clone(), SourceList::from_token(token))
    }

    // Names

    /// `left.name`
    pub fn dotted(&mut self, left: NodeId, name: &str) -> NodeId {
        let dot = self.token(TokenKind::Dot, ".");
        let right = self.ident(name);
        let source = SourceList::new(vec![
            SourceItem::Node(left),
            SourceItem::Token(dot.clone()),
            SourceItem::Identifier(right.clone()),
        ]);
        self.tree.dotted_name(left, right, None, dot, source)
    }

    /// `A.B.C` built left to right.
    pub fn path(&mut self, segments: &[&str]) -> NodeId {
        let (first, rest) = segments.split_first().unwrap_or_else(|| panic!("empty path"));
        let mut node = self.name(first);
        for segment in rest {
            node = self.dotted(node, segment);
        }
        node
    }

    /// `left As name`
    pub fn as_(&mut self, left: NodeId, name: &str) -> NodeId {
        let before = self.space();
        let keyword = self.token(TokenKind::As, "As");
        let after = self.space();
        let right = self.ident(name);
        let source = SourceList::new(vec![
            SourceItem::Node(left),
            before,
            SourceItem::Token(keyword.clone()),
            after,
            SourceItem::Identifier(right.clone()),
        ]);
        self.tree.as_node(left, right, keyword, source)
    }

    // Operators

    /// `left op right`, with the right operand built after the operator.
    pub fn binary(
        &mut self,
        left: NodeId,
        op: BinaryOp,
        right: impl FnOnce(&mut Self) -> NodeId,
    ) -> NodeId {
        let (kind, text) = binary_token(op);
        let before = self.space();
        let token = self.token(kind, text);
        let after = self.space();
        let right = right(self);
        let source = SourceList::new(vec![
            SourceItem::Node(left),
            before,
            SourceItem::Token(token.clone()),
            after,
            SourceItem::Node(right),
        ]);
        self.tree.binary_op(op, left, right, token, source)
    }

    /// `-child` or `!child`.
    pub fn prefix(&mut self, op: UnaryOp, child: impl FnOnce(&mut Self) -> NodeId) -> NodeId {
        let token = match op {
            UnaryOp::Minus => self.token(TokenKind::Sub, "-"),
            UnaryOp::Not => self.token(TokenKind::Bang, "!"),
            UnaryOp::Percent => panic!("percent is postfix"),
        };
        let child = child(self);
        let source = SourceList::new(vec![SourceItem::Token(token.clone()), SourceItem::Node(child)]);
        self.tree.unary_op(op, child, token, source)
    }

    /// `child%`
    pub fn percent(&mut self, child: NodeId) -> NodeId {
        let token = self.token(TokenKind::PercentSign, "%");
        let source = SourceList::new(vec![SourceItem::Node(child), SourceItem::Token(token.clone())]);
        self.tree.unary_op(UnaryOp::Percent, child, token, source)
    }

    /// `a; b; c`
    pub fn chain(&mut self, count: usize, mut each: impl FnMut(&mut Self, usize) -> NodeId) -> NodeId {
        assert!(count >= 2, "a chain has at least two operands");
        let mut children = Vec::new();
        let mut op_tokens = Vec::new();
        let mut items = Vec::new();
        for i in 0..count {
            if i > 0 {
                let semi = self.token(TokenKind::Semicolon, ";");
                items.push(SourceItem::Token(semi.clone()));
                items.push(self.space());
                op_tokens.push(semi);
            }
            let child = each(self, i);
            items.push(SourceItem::Node(child));
            children.push(child);
        }
        let token = op_tokens[0].clone();
        self.tree
            .variadic_op(VariadicOp::Chain, children, op_tokens, token, SourceList::new(items))
    }

    // Aggregates

    /// Comma-separated items; returns children, commas and source items.
    fn items(
        &mut self,
        count: usize,
        mut each: impl FnMut(&mut Self, usize) -> NodeId,
    ) -> (Vec<NodeId>, Vec<Token>, Vec<SourceItem>) {
        let mut children = Vec::new();
        let mut commas = Vec::new();
        let mut items = Vec::new();
        for i in 0..count {
            if i > 0 {
                let comma = self.token(TokenKind::Comma, ",");
                items.push(SourceItem::Token(comma.clone()));
                items.push(self.space());
                commas.push(comma);
            }
            let child = each(self, i);
            items.push(SourceItem::Node(child));
            children.push(child);
        }
        (children, commas, items)
    }

    /// `[a, b, c]`
    pub fn table(&mut self, count: usize, each: impl FnMut(&mut Self, usize) -> NodeId) -> NodeId {
        let open = self.token(TokenKind::BracketOpen, "[");
        let (children, commas, mut items) = self.items(count, each);
        let close = self.token(TokenKind::BracketClose, "]");
        items.insert(0, SourceItem::Token(open.clone()));
        items.push(SourceItem::Token(close.clone()));
        self.tree.table(open, children, commas, Some(close), SourceList::new(items))
    }

    /// `[a, b` with the closing bracket missing.
    pub fn unclosed_table(&mut self, count: usize, each: impl FnMut(&mut Self, usize) -> NodeId) -> NodeId {
        let open = self.token(TokenKind::BracketOpen, "[");
        let (children, commas, mut items) = self.items(count, each);
        items.insert(0, SourceItem::Token(open.clone()));
        self.tree.table(open, children, commas, None, SourceList::new(items))
    }

    /// `{f0: v0, f1: v1}`
    pub fn record(
        &mut self,
        fields: &[&str],
        mut each: impl FnMut(&mut Self, usize) -> NodeId,
    ) -> NodeId {
        let open = self.token(TokenKind::CurlyOpen, "{");
        let mut parts = RecordParts::default();
        let mut items = vec![SourceItem::Token(open.clone())];
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                let comma = self.token(TokenKind::Comma, ",");
                items.push(SourceItem::Token(comma.clone()));
                items.push(self.space());
                parts.commas.push(comma);
            }
            let ident = self.ident(field);
            let colon = self.token(TokenKind::Colon, ":");
            let space = self.space();
            let value = each(self, i);
            items.push(SourceItem::Identifier(ident.clone()));
            items.push(SourceItem::Token(colon.clone()));
            items.push(space);
            items.push(SourceItem::Node(value));
            parts.fields.push((ident, value));
            parts.colons.push(colon);
        }
        let close = self.token(TokenKind::CurlyClose, "}");
        items.push(SourceItem::Token(close.clone()));
        parts.curly_close = Some(close);
        self.tree.record(open, parts, SourceList::new(items))
    }

    /// `name(a, b)`
    pub fn call(
        &mut self,
        name: &str,
        count: usize,
        each: impl FnMut(&mut Self, usize) -> NodeId,
    ) -> NodeId {
        let head = self.ident(name);
        self.finish_call(head, None, count, each, true)
    }

    /// `name(a, b` with the closing parenthesis missing.
    pub fn unclosed_call(
        &mut self,
        name: &str,
        count: usize,
        each: impl FnMut(&mut Self, usize) -> NodeId,
    ) -> NodeId {
        let head = self.ident(name);
        self.finish_call(head, None, count, each, false)
    }

    /// `NS.name(a)`: qualified call with a dotted head node.
    pub fn qualified_call(
        &mut self,
        namespace: &str,
        name: &str,
        count: usize,
        each: impl FnMut(&mut Self, usize) -> NodeId,
    ) -> NodeId {
        let ns = self.name(namespace);
        let head_node = self.dotted(ns, name);
        let right = self.tree.node(head_node).cast_dotted_name().right.clone();
        let head = right.with_namespace(std::iter::once(DName::new(namespace)).collect());
        self.finish_call(head, Some(head_node), count, each, true)
    }

    fn finish_call(
        &mut self,
        head: Identifier,
        head_node: Option<NodeId>,
        count: usize,
        each: impl FnMut(&mut Self, usize) -> NodeId,
        closed: bool,
    ) -> NodeId {
        let open = self.token(TokenKind::ParenOpen, "(");
        let (children, commas, items) = self.items(count, each);
        let args = self.tree.list(open.clone(), children, commas, SourceList::new(items));
        let close = closed.then(|| self.token(TokenKind::ParenClose, ")"));

        let mut items = match head_node {
            Some(node) => vec![SourceItem::Node(node)],
            None => vec![SourceItem::Identifier(head.clone())],
        };
        items.push(SourceItem::Token(open));
        items.push(SourceItem::Node(args));
        items.extend(close.clone().map(SourceItem::Token));
        let token = head.token.clone();
        self.tree.call(token, head, head_node, args, close, SourceList::new(items))
    }

    /// `$"before{island}after"`
    pub fn interp(
        &mut self,
        before: &str,
        island: impl FnOnce(&mut Self) -> NodeId,
        after: &str,
    ) -> NodeId {
        let start = self.token(TokenKind::StrInterpStart, "$\"");
        let first = self.interp_text(before);
        let island_open = self.token(TokenKind::IslandStart, "{");
        let island = island(self);
        let island_close = self.token(TokenKind::IslandEnd, "}");
        let last = self.interp_text(after);
        let end = self.token(TokenKind::StrInterpEnd, "\"");
        let source = SourceList::new(vec![
            SourceItem::Token(start.clone()),
            SourceItem::Node(first),
            SourceItem::Token(island_open),
            SourceItem::Node(island),
            SourceItem::Token(island_close),
            SourceItem::Node(last),
            SourceItem::Token(end.clone()),
        ]);
        self.tree.str_interp(start, vec![first, island, last], Some(end), source)
    }

    fn interp_text(&mut self, text: &str) -> NodeId {
        let token = self.token(TokenKind::StrLit(text.into()), text);
        self.tree.str_lit(token.clone(), SourceList::from_token(token))
    }

    /// `Type(root)`
    pub fn type_literal(&mut self, root: impl FnOnce(&mut Self) -> NodeId) -> NodeId {
        let keyword = self.token(TokenKind::Ident(DName::new("Type")), "Type");
        let open = self.token(TokenKind::ParenOpen, "(");
        let root = root(self);
        let close = self.token(TokenKind::ParenClose, ")");
        let source = SourceList::new(vec![
            SourceItem::Token(keyword.clone()),
            SourceItem::Token(open),
            SourceItem::Node(root),
            SourceItem::Token(close),
        ]);
        self.tree.type_literal(keyword, root, source)
    }

    /// `RecordOf(name)`
    pub fn record_of(&mut self, table_name: impl FnOnce(&mut Self) -> NodeId) -> NodeId {
        let keyword = self.token(TokenKind::Ident(DName::new("RecordOf")), "RecordOf");
        let open = self.token(TokenKind::ParenOpen, "(");
        let table_name = table_name(self);
        let close = self.token(TokenKind::ParenClose, ")");
        let source = SourceList::new(vec![
            SourceItem::Token(keyword.clone()),
            SourceItem::Token(open),
            SourceItem::Node(table_name),
            SourceItem::Token(close),
        ]);
        self.tree.record_of(keyword, table_name, source)
    }

    /// Text covered by `span`.
    pub fn slice(&self, span: Span) -> &str {
        span.text(&self.text).unwrap_or_else(|| panic!("{span:?} outside {:?}", self.text))
    }
}

/// Every node of the subtree at `root`, following structural children.
pub fn subtree(tree: &SyntaxTree, root: NodeId) -> Vec<NodeId> {
    let mut out = Vec::new();
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        out.push(id);
        stack.extend(tree.node(id).children());
    }
    out
}
