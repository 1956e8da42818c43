//! Render a tree back to formula text.
//!
//! Output is canonical rather than faithful: whitespace and comments are
//! dropped, binary operators get single spaces, and parentheses appear
//! only where precedence requires them. Two trees with the same shape and
//! payloads print identically, which is what diagnostics and clone checks
//! rely on. This is not a serialization format.

use std::fmt;

use fx_ir::{BinaryOp, Identifier, TokenKind, UnaryOp, PUNCTUATOR_PERCENT};

use crate::fold::{self, Fold};
use crate::node::{
    AsNode, BinaryOpNode, BlankNode, BoolLitNode, CallNode, DecLitNode, DottedNameNode,
    ErrorNode, FirstNameNode, ListNode, Node, NodeKind, NumLitNode, ParentNode, RecordNode,
    RecordOfNode, ReplaceableNode, SelfNode, StrInterpNode, StrLitNode, TableNode,
    TypeLiteralNode, UnaryOpNode, UnitsLitNode, VariadicOpNode,
};
use crate::{NodeId, SyntaxTree};

/// Binding strength; higher binds tighter.
type Prec = u8;

const PREC_NONE: Prec = 0;
const PREC_CHAIN: Prec = 1;
/// Arguments and fields: a bare `;` chain there needs parentheses.
const PREC_ARG: Prec = 2;
const PREC_OR: Prec = 2;
const PREC_AND: Prec = 3;
const PREC_NOT: Prec = 4;
const PREC_COMPARE: Prec = 5;
const PREC_CONCAT: Prec = 6;
const PREC_ADD: Prec = 7;
const PREC_MUL: Prec = 8;
const PREC_POWER: Prec = 9;
const PREC_PREFIX: Prec = 10;
const PREC_POSTFIX: Prec = 11;
const PREC_AS: Prec = 12;
const PREC_PRIMARY: Prec = 13;

fn binary_prec(op: BinaryOp) -> Prec {
    match op {
        BinaryOp::Or => PREC_OR,
        BinaryOp::And => PREC_AND,
        BinaryOp::Equal
        | BinaryOp::NotEqual
        | BinaryOp::Less
        | BinaryOp::LessEqual
        | BinaryOp::Greater
        | BinaryOp::GreaterEqual
        | BinaryOp::In
        | BinaryOp::ExactIn => PREC_COMPARE,
        BinaryOp::Concat => PREC_CONCAT,
        BinaryOp::Add | BinaryOp::Error => PREC_ADD,
        BinaryOp::Mul | BinaryOp::Div => PREC_MUL,
        BinaryOp::Power => PREC_POWER,
    }
}

fn parenthesize(text: String, own: Prec, context: Prec) -> String {
    if own < context {
        format!("({text})")
    } else {
        text
    }
}

/// Whether `name` can be written without single quotes.
fn is_simple_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

fn write_name(out: &mut String, name: &str) {
    if is_simple_name(name) {
        out.push_str(name);
    } else {
        out.push('\'');
        out.push_str(&name.replace('\'', "''"));
        out.push('\'');
    }
}

fn identifier(ident: &Identifier) -> String {
    let mut out = String::new();
    if ident.at_token.is_some() {
        out.push('@');
    }
    for segment in ident.namespace.segments() {
        write_name(&mut out, segment.as_str());
        out.push('.');
    }
    write_name(&mut out, ident.name.as_str());
    out
}

fn number(value: f64) -> String {
    value.to_string()
}

/// The printing fold; context is the precedence of the enclosing operator.
struct Printer;

impl Printer {
    fn print(&mut self, tree: &SyntaxTree, id: NodeId, context: Prec) -> String {
        fold::fold(self, tree, id, context)
    }

    fn join(&mut self, tree: &SyntaxTree, ids: &[NodeId], separator: &str) -> String {
        let parts: Vec<String> = ids.iter().map(|&id| self.print(tree, id, PREC_ARG)).collect();
        parts.join(separator)
    }
}

impl<'t> Fold<'t> for Printer {
    type Output = String;
    type Context = Prec;

    fn fold_bool_lit(&mut self, _: &'t Node, lit: &'t BoolLitNode, _: &'t SyntaxTree, _: Prec) -> String {
        let text = if lit.value { "true" } else { "false" };
        text.to_owned()
    }

    fn fold_num_lit(&mut self, _: &'t Node, lit: &'t NumLitNode, _: &'t SyntaxTree, _: Prec) -> String {
        number(lit.value())
    }

    fn fold_dec_lit(&mut self, _: &'t Node, lit: &'t DecLitNode, _: &'t SyntaxTree, _: Prec) -> String {
        lit.value().to_string()
    }

    fn fold_str_lit(&mut self, _: &'t Node, lit: &'t StrLitNode, _: &'t SyntaxTree, _: Prec) -> String {
        format!("\"{}\"", lit.value.replace('"', "\"\""))
    }

    fn fold_blank(&mut self, _: &'t Node, _: &'t BlankNode, _: &'t SyntaxTree, _: Prec) -> String {
        "Blank()".to_owned()
    }

    fn fold_error(&mut self, _: &'t Node, _: &'t ErrorNode, _: &'t SyntaxTree, _: Prec) -> String {
        "<error>".to_owned()
    }

    fn fold_replaceable(
        &mut self,
        _: &'t Node,
        replaceable: &'t ReplaceableNode,
        _: &'t SyntaxTree,
        _: Prec,
    ) -> String {
        replaceable.value.to_string()
    }

    fn fold_units_lit(&mut self, _: &'t Node, lit: &'t UnitsLitNode, _: &'t SyntaxTree, _: Prec) -> String {
        format!("{} {}", number(lit.value()), lit.unit)
    }

    fn fold_first_name(
        &mut self,
        _: &'t Node,
        name: &'t FirstNameNode,
        _: &'t SyntaxTree,
        _: Prec,
    ) -> String {
        identifier(&name.ident)
    }

    fn fold_dotted_name(
        &mut self,
        node: &'t Node,
        dotted: &'t DottedNameNode,
        tree: &'t SyntaxTree,
        _: Prec,
    ) -> String {
        let left = self.print(tree, dotted.left, PREC_PRIMARY);
        let right = identifier(&dotted.right);
        if dotted.uses_bracket {
            format!("{left}[{right}]")
        } else if node.token().kind == TokenKind::Bang {
            format!("{left}!{right}")
        } else {
            format!("{left}.{right}")
        }
    }

    fn fold_parent(&mut self, _: &'t Node, _: &'t ParentNode, _: &'t SyntaxTree, _: Prec) -> String {
        fx_ir::DName::PARENT_KEYWORD.to_owned()
    }

    fn fold_self(&mut self, _: &'t Node, _: &'t SelfNode, _: &'t SyntaxTree, _: Prec) -> String {
        fx_ir::DName::SELF_KEYWORD.to_owned()
    }

    fn fold_as(&mut self, _: &'t Node, as_node: &'t AsNode, tree: &'t SyntaxTree, context: Prec) -> String {
        let left = self.print(tree, as_node.left, PREC_AS);
        let text = format!("{left} As {}", identifier(&as_node.right));
        parenthesize(text, PREC_AS, context)
    }

    fn fold_unary_op(
        &mut self,
        node: &'t Node,
        unary: &'t UnaryOpNode,
        tree: &'t SyntaxTree,
        context: Prec,
    ) -> String {
        match unary.op {
            UnaryOp::Percent => {
                let child = self.print(tree, unary.child, PREC_POSTFIX);
                parenthesize(format!("{child}{PUNCTUATOR_PERCENT}"), PREC_POSTFIX, context)
            }
            UnaryOp::Not if node.token().kind == TokenKind::Not => {
                let child = self.print(tree, unary.child, PREC_NOT);
                parenthesize(format!("Not {child}"), PREC_NOT, context)
            }
            UnaryOp::Not | UnaryOp::Minus => {
                let child = self.print(tree, unary.child, PREC_PREFIX);
                parenthesize(format!("{}{child}", unary.op.as_symbol()), PREC_PREFIX, context)
            }
        }
    }

    fn fold_binary_op(
        &mut self,
        node: &'t Node,
        binary: &'t BinaryOpNode,
        tree: &'t SyntaxTree,
        context: Prec,
    ) -> String {
        let prec = binary_prec(binary.op);
        let left = self.print(tree, binary.left, prec);

        // `a - b` is parsed as `a + (-b)` over a `-` token.
        if binary.op == BinaryOp::Add && node.token().kind == TokenKind::Sub {
            if let NodeKind::UnaryOp(negated) = tree.node(binary.right).kind() {
                if negated.op == UnaryOp::Minus {
                    let right = self.print(tree, negated.child, prec + 1);
                    return parenthesize(format!("{left} - {right}"), prec, context);
                }
            }
        }

        let right = self.print(tree, binary.right, prec + 1);
        let symbol = match node.token().kind.spelling() {
            Some(spelling) if node.token().kind != TokenKind::PercentSign => spelling,
            _ => binary.op.as_symbol(),
        };
        parenthesize(format!("{left} {symbol} {right}"), prec, context)
    }

    fn fold_variadic_op(
        &mut self,
        _: &'t Node,
        variadic: &'t VariadicOpNode,
        tree: &'t SyntaxTree,
        context: Prec,
    ) -> String {
        let parts: Vec<String> = variadic
            .children
            .iter()
            .map(|&child| self.print(tree, child, PREC_CHAIN + 1))
            .collect();
        let separator = format!("{} ", variadic.op.as_symbol());
        parenthesize(parts.join(&separator), PREC_CHAIN, context)
    }

    fn fold_list(&mut self, _: &'t Node, list: &'t ListNode, tree: &'t SyntaxTree, _: Prec) -> String {
        self.join(tree, &list.children, ", ")
    }

    fn fold_table(&mut self, _: &'t Node, table: &'t TableNode, tree: &'t SyntaxTree, _: Prec) -> String {
        format!("[{}]", self.join(tree, &table.children, ", "))
    }

    fn fold_record(&mut self, _: &'t Node, record: &'t RecordNode, tree: &'t SyntaxTree, _: Prec) -> String {
        let mut out = String::new();
        if let Some(restriction) = record.source_restriction {
            out.push_str(&self.print(tree, restriction, PREC_PRIMARY));
            out.push(' ');
        }
        out.push('{');
        for (i, (name, value)) in record.fields().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&identifier(name));
            out.push_str(": ");
            out.push_str(&self.print(tree, value, PREC_ARG));
        }
        out.push('}');
        out
    }

    fn fold_str_interp(
        &mut self,
        _: &'t Node,
        interp: &'t StrInterpNode,
        tree: &'t SyntaxTree,
        _: Prec,
    ) -> String {
        let mut out = String::from("$\"");
        for &child in interp.children.iter() {
            match tree.node(child).kind() {
                NodeKind::StrLit(text) => {
                    let escaped = text
                        .value
                        .replace('"', "\"\"")
                        .replace('{', "{{")
                        .replace('}', "}}");
                    out.push_str(&escaped);
                }
                _ => {
                    out.push('{');
                    out.push_str(&self.print(tree, child, PREC_NONE));
                    out.push('}');
                }
            }
        }
        out.push('"');
        out
    }

    fn fold_call(&mut self, _: &'t Node, call: &'t CallNode, tree: &'t SyntaxTree, _: Prec) -> String {
        let args = self.print(tree, call.args, PREC_NONE);
        format!("{}({args})", identifier(&call.head))
    }

    fn fold_type_literal(
        &mut self,
        _: &'t Node,
        lit: &'t TypeLiteralNode,
        tree: &'t SyntaxTree,
        _: Prec,
    ) -> String {
        format!("Type({})", self.print(tree, lit.type_root, PREC_NONE))
    }

    fn fold_record_of(
        &mut self,
        _: &'t Node,
        record_of: &'t RecordOfNode,
        tree: &'t SyntaxTree,
        _: Prec,
    ) -> String {
        format!("RecordOf({})", self.print(tree, record_of.table_name, PREC_NONE))
    }
}

/// Render the subtree at `id` as formula text.
pub fn print_node(tree: &SyntaxTree, id: NodeId) -> String {
    Printer.print(tree, id, PREC_NONE)
}

/// [`fmt::Display`] adapter returned by [`SyntaxTree::display`].
pub struct NodeDisplay<'t> {
    tree: &'t SyntaxTree,
    id: NodeId,
}

impl fmt::Display for NodeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&print_node(self.tree, self.id))
    }
}

impl SyntaxTree {
    /// Display the subtree at `id` as formula text.
    pub fn display(&self, id: NodeId) -> NodeDisplay<'_> {
        NodeDisplay { tree: self, id }
    }
}

#[cfg(test)]
mod tests;
