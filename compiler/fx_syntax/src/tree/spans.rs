//! Per-kind span computation.
//!
//! Three spans are available for every node:
//!
//! - the *text span*: the node's own text, usually its primary token
//! - the *complete span*: the text of the whole subtree
//! - the *source-based span*: first to last token of the source list,
//!   falling back to the complete span
//!
//! Recovery nodes with a missing closing token degrade to the last thing
//! that was parsed. No rule fails, and every span has `start <= end`.

use fx_ir::{Span, Token, TokenKind, UnaryOp};

use super::SyntaxTree;
use crate::node::{NodeKind, NodeTag, VariadicBase};
use crate::source_list::SourceItem;
use crate::stack::ensure_sufficient_stack;
use crate::NodeId;

/// Width of the `%` manufactured onto a postfix-percent operand.
const PERCENT_WIDTH: u32 = fx_ir::PUNCTUATOR_PERCENT.len() as u32;

/// `[start, end)`, clamped so that recovery shapes never invert.
#[inline]
fn covering(start: u32, end: u32) -> Span {
    Span::new(start, end.max(start))
}

impl SyntaxTree {
    /// Span of the node's own text.
    pub fn text_span(&self, id: NodeId) -> Span {
        let node = self.node(id);
        let token_span = node.token.span;
        match &node.kind {
            NodeKind::UnaryOp(unary) if unary.op == UnaryOp::Percent => self.percent_span(unary.child),
            NodeKind::FirstName(_)
            | NodeKind::Parent(_)
            | NodeKind::Self_(_)
            | NodeKind::DottedName(_) => self.source_span(id).unwrap_or(token_span),
            NodeKind::Call(call) => {
                let end = match &call.paren_close {
                    Some(close) => close.span.end,
                    None => self.complete_span(call.args).end,
                };
                covering(call.head.token.span.start, end)
            }
            NodeKind::Table(table) => closed_span(token_span, table.bracket_close.as_ref()),
            NodeKind::Record(record) => closed_span(token_span, record.curly_close.as_ref()),
            NodeKind::StrInterp(interp) => closed_span(token_span, interp.str_interp_end.as_ref()),
            _ => token_span,
        }
    }

    /// Span of the whole subtree rooted at `id`.
    ///
    /// Covers the spans of every child, with one exception inherited from
    /// the percent rule: a postfix `%` over a compound operand covers only
    /// the operand's primary token.
    pub fn complete_span(&self, id: NodeId) -> Span {
        ensure_sufficient_stack(|| self.complete_span_inner(id))
    }

    fn complete_span_inner(&self, id: NodeId) -> Span {
        let node = self.node(id);
        let token_span = node.token.span;
        match &node.kind {
            NodeKind::BoolLit(_)
            | NodeKind::NumLit(_)
            | NodeKind::DecLit(_)
            | NodeKind::StrLit(_)
            | NodeKind::Blank(_)
            | NodeKind::Error(_)
            | NodeKind::Replaceable(_)
            | NodeKind::UnitsLit(_) => token_span,

            NodeKind::FirstName(_) | NodeKind::Parent(_) | NodeKind::Self_(_) => {
                self.source_span(id).unwrap_or(token_span)
            }

            NodeKind::DottedName(dotted) => {
                let mut leftmost = dotted.left;
                while let NodeKind::DottedName(inner) = &self.node(leftmost).kind {
                    leftmost = inner.left;
                }
                covering(self.complete_span(leftmost).start, dotted.right.token.span.end)
            }

            NodeKind::As(as_node) => {
                covering(self.complete_span(as_node.left).start, as_node.right.token.span.end)
            }

            NodeKind::UnaryOp(unary) => match unary.op {
                UnaryOp::Percent => self.percent_span(unary.child),
                UnaryOp::Not | UnaryOp::Minus => {
                    covering(token_span.start, self.complete_span(unary.child).end)
                }
            },

            NodeKind::BinaryOp(binary) => {
                let left = self.complete_span(binary.left);
                let right = self.complete_span(binary.right);
                if node.token.kind == TokenKind::PercentSign && right.end <= left.start {
                    covering(right.start, left.end)
                } else {
                    covering(left.start, right.end)
                }
            }

            NodeKind::VariadicOp(variadic) => self.children_span(variadic, token_span),
            NodeKind::List(list) => self.children_span(list, token_span),

            NodeKind::Table(table) => {
                self.aggregate_span(table, token_span, table.bracket_close.as_ref())
            }
            NodeKind::Record(record) => {
                let span = self.aggregate_span(record, token_span, record.curly_close.as_ref());
                match record.source_restriction {
                    Some(restriction) => {
                        covering(self.complete_span(restriction).start.min(span.start), span.end)
                    }
                    None => span,
                }
            }
            NodeKind::StrInterp(interp) => {
                self.aggregate_span(interp, token_span, interp.str_interp_end.as_ref())
            }

            NodeKind::Call(call) => {
                let text = self.text_span(id);
                match call.head_node {
                    Some(head) if self.node(head).tag() == NodeTag::DottedName => {
                        covering(self.complete_span(head).start.min(text.start), text.end)
                    }
                    _ => text,
                }
            }

            NodeKind::TypeLiteral(lit) => self.wrapper_span(id, lit.type_root),
            NodeKind::RecordOf(record_of) => self.wrapper_span(id, record_of.table_name),
        }
    }

    /// First to last source-list token, or the complete span when the
    /// source list yields no tokens.
    pub fn source_based_span(&self, id: NodeId) -> Span {
        self.source_span(id).unwrap_or_else(|| self.complete_span(id))
    }

    /// Every token of the node's source list, child sources expanded in
    /// place, in source order.
    pub fn source_tokens(&self, id: NodeId) -> Vec<&Token> {
        let mut out = Vec::new();
        let mut stack = vec![self.node(id).source_list.items().iter()];
        while let Some(items) = stack.last_mut() {
            let Some(item) = items.next() else {
                stack.pop();
                continue;
            };
            match item {
                SourceItem::Token(token) => out.push(token),
                SourceItem::Node(child) => stack.push(self.node(*child).source_list.items().iter()),
                SourceItem::Identifier(ident) => {
                    out.extend(ident.at_token.as_ref());
                    out.push(&ident.token);
                }
                SourceItem::Whitespace(tokens) => out.extend(tokens),
                SourceItem::Spread(nested) => stack.push(nested.iter()),
            }
        }
        out
    }

    fn source_span(&self, id: NodeId) -> Option<Span> {
        let tokens = self.source_tokens(id);
        let first = tokens.first()?;
        let last = tokens.last()?;
        Some(covering(first.span.start, last.span.end))
    }

    /// `%` applied to `child`: the child's token plus one percent sign.
    fn percent_span(&self, child: NodeId) -> Span {
        let child_token = self.node(child).token.span;
        covering(child_token.start, child_token.end.saturating_add(PERCENT_WIDTH))
    }

    /// First child through last child, or `fallback` with no children.
    fn children_span(&self, variadic: &dyn VariadicBase, fallback: Span) -> Span {
        match (variadic.children().first(), variadic.children().last()) {
            (Some(&first), Some(&last)) => {
                covering(self.complete_span(first).start, self.complete_span(last).end)
            }
            _ => fallback,
        }
    }

    /// Opening token through the closing token. Without a closing token,
    /// through the last child; without children, the opening token.
    fn aggregate_span(&self, variadic: &dyn VariadicBase, open: Span, close: Option<&Token>) -> Span {
        if let Some(close) = close {
            return covering(open.start, close.span.end);
        }
        match variadic.children().last() {
            Some(&last) => covering(open.start, self.complete_span(last).end),
            None => open,
        }
    }

    /// Keyword token, wrapped child and closing source tokens together.
    fn wrapper_span(&self, id: NodeId, inner: NodeId) -> Span {
        let span = self.node(id).token.span.merge(self.complete_span(inner));
        match self.source_span(id) {
            Some(source) => span.merge(source),
            None => span,
        }
    }
}

/// Opening token through the closing token, or just the opening token.
fn closed_span(open: Span, close: Option<&Token>) -> Span {
    match close {
        Some(close) => covering(open.start, close.span.end),
        None => open,
    }
}
