//! Type literal validation.
//!
//! The argument of `Type(...)` is parsed as an ordinary expression but
//! only a small sub-grammar is a type:
//!
//! - a type name (`Number`, `Text`, `Accounts`)
//! - a record of types (`{a: Number, b: {c: Text}}`)
//! - a table of at most one column type (`[Number]`, `[{a: Text}]`, `[]`)
//! - `RecordOf(TableName)`
//!
//! Everything else is reported once, at the outermost offending node, and
//! its subtree is not examined further.

use fx_ir::Span;

use crate::node::{
    AsNode, BinaryOpNode, BlankNode, BoolLitNode, CallNode, DecLitNode, DottedNameNode,
    ErrorNode, ListNode, Node, NodeTag, NumLitNode, ParentNode, RecordOfNode, ReplaceableNode,
    SelfNode, StrInterpNode, StrLitNode, TableNode, TypeLiteralNode, UnaryOpNode, UnitsLitNode,
    VariadicBase, VariadicOpNode,
};
use crate::visitor::{self, Visitor};
use crate::{NodeId, SyntaxTree};

/// A shape that is not allowed inside a type literal.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TypeLiteralError {
    #[error("{what} is not allowed in a type literal")]
    Disallowed { what: NodeTag, span: Span },
    #[error("table type must have at most one column type, found {count}")]
    TableArity { count: usize, span: Span },
    #[error("RecordOf expects the name of a table")]
    RecordOfArgument { span: Span },
}

impl TypeLiteralError {
    /// Where the offending node is.
    pub fn span(&self) -> Span {
        match self {
            TypeLiteralError::Disallowed { span, .. }
            | TypeLiteralError::TableArity { span, .. }
            | TypeLiteralError::RecordOfArgument { span } => *span,
        }
    }
}

/// Outcome of validating one type literal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeLiteralValidation {
    errors: Vec<TypeLiteralError>,
}

impl TypeLiteralValidation {
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// One entry per rejected shape, in source order.
    #[inline]
    pub fn errors(&self) -> &[TypeLiteralError] {
        &self.errors
    }
}

impl SyntaxTree {
    /// Validate the type literal at `id`.
    ///
    /// The result is computed once and cached on the node.
    ///
    /// # Panics
    /// Panics if `id` is not a type literal.
    #[track_caller]
    pub fn type_literal_validation(&self, id: NodeId) -> &TypeLiteralValidation {
        let literal = self.node(id).cast_type_literal();
        literal
            .validation
            .get_or_init(|| validate_type_root(self, literal.type_root))
    }

    /// Whether the type literal at `id` is a well-formed type.
    #[track_caller]
    pub fn is_valid_type_literal(&self, id: NodeId) -> bool {
        self.type_literal_validation(id).is_valid()
    }
}

/// Run the validator over a type expression.
pub fn validate_type_root(tree: &SyntaxTree, type_root: NodeId) -> TypeLiteralValidation {
    let mut validator = TypeValidator::default();
    visitor::accept(&mut validator, tree, type_root);
    if !validator.errors.is_empty() {
        tracing::debug!(
            ?type_root,
            errors = validator.errors.len(),
            "type literal rejected"
        );
    }
    TypeLiteralValidation {
        errors: validator.errors,
    }
}

#[derive(Default)]
struct TypeValidator {
    errors: Vec<TypeLiteralError>,
}

impl TypeValidator {
    fn disallow(&mut self, node: &Node, tree: &SyntaxTree) {
        let what = node.tag();
        let span = tree.complete_span(node.id());
        tracing::trace!(%what, ?span, "disallowed in type literal");
        self.errors.push(TypeLiteralError::Disallowed { what, span });
    }

    /// Reject a container kind and skip its subtree.
    fn reject(&mut self, node: &Node, tree: &SyntaxTree) -> bool {
        self.disallow(node, tree);
        false
    }
}

impl<'t> Visitor<'t> for TypeValidator {
    fn visit_bool_lit(&mut self, node: &'t Node, _: &'t BoolLitNode, tree: &'t SyntaxTree) {
        self.disallow(node, tree);
    }

    fn visit_num_lit(&mut self, node: &'t Node, _: &'t NumLitNode, tree: &'t SyntaxTree) {
        self.disallow(node, tree);
    }

    fn visit_dec_lit(&mut self, node: &'t Node, _: &'t DecLitNode, tree: &'t SyntaxTree) {
        self.disallow(node, tree);
    }

    fn visit_str_lit(&mut self, node: &'t Node, _: &'t StrLitNode, tree: &'t SyntaxTree) {
        self.disallow(node, tree);
    }

    fn visit_blank(&mut self, node: &'t Node, _: &'t BlankNode, tree: &'t SyntaxTree) {
        self.disallow(node, tree);
    }

    fn visit_error(&mut self, node: &'t Node, _: &'t ErrorNode, tree: &'t SyntaxTree) {
        self.disallow(node, tree);
    }

    fn visit_replaceable(&mut self, node: &'t Node, _: &'t ReplaceableNode, tree: &'t SyntaxTree) {
        self.disallow(node, tree);
    }

    fn visit_units_lit(&mut self, node: &'t Node, _: &'t UnitsLitNode, tree: &'t SyntaxTree) {
        self.disallow(node, tree);
    }

    fn visit_parent(&mut self, node: &'t Node, _: &'t ParentNode, tree: &'t SyntaxTree) {
        self.disallow(node, tree);
    }

    fn visit_self(&mut self, node: &'t Node, _: &'t SelfNode, tree: &'t SyntaxTree) {
        self.disallow(node, tree);
    }

    fn visit_type_literal(&mut self, node: &'t Node, _: &'t TypeLiteralNode, tree: &'t SyntaxTree) {
        self.disallow(node, tree);
    }

    fn pre_visit_table(&mut self, node: &'t Node, table: &'t TableNode, tree: &'t SyntaxTree) -> bool {
        if table.len() > 1 {
            let span = tree.complete_span(node.id());
            tracing::trace!(count = table.len(), ?span, "multi-column table type");
            self.errors.push(TypeLiteralError::TableArity {
                count: table.len(),
                span,
            });
            return false;
        }
        true
    }

    fn pre_visit_record_of(
        &mut self,
        node: &'t Node,
        record_of: &'t RecordOfNode,
        tree: &'t SyntaxTree,
    ) -> bool {
        if tree.node(record_of.table_name).tag() != NodeTag::FirstName {
            self.errors.push(TypeLiteralError::RecordOfArgument {
                span: tree.complete_span(node.id()),
            });
        }
        false
    }

    fn pre_visit_dotted_name(&mut self, node: &'t Node, _: &'t DottedNameNode, tree: &'t SyntaxTree) -> bool {
        self.reject(node, tree)
    }

    fn pre_visit_as(&mut self, node: &'t Node, _: &'t AsNode, tree: &'t SyntaxTree) -> bool {
        self.reject(node, tree)
    }

    fn pre_visit_unary_op(&mut self, node: &'t Node, _: &'t UnaryOpNode, tree: &'t SyntaxTree) -> bool {
        self.reject(node, tree)
    }

    fn pre_visit_binary_op(&mut self, node: &'t Node, _: &'t BinaryOpNode, tree: &'t SyntaxTree) -> bool {
        self.reject(node, tree)
    }

    fn pre_visit_variadic_op(
        &mut self,
        node: &'t Node,
        _: &'t VariadicOpNode,
        tree: &'t SyntaxTree,
    ) -> bool {
        self.reject(node, tree)
    }

    fn pre_visit_list(&mut self, node: &'t Node, _: &'t ListNode, tree: &'t SyntaxTree) -> bool {
        self.reject(node, tree)
    }

    fn pre_visit_str_interp(&mut self, node: &'t Node, _: &'t StrInterpNode, tree: &'t SyntaxTree) -> bool {
        self.reject(node, tree)
    }

    fn pre_visit_call(&mut self, node: &'t Node, _: &'t CallNode, tree: &'t SyntaxTree) -> bool {
        self.reject(node, tree)
    }
}
