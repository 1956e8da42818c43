//! Type literal payloads.

use std::sync::OnceLock;

use crate::type_literal::TypeLiteralValidation;
use crate::NodeId;

/// `Type(...)`: a type expression in the restricted type sub-grammar.
///
/// The validation result is computed on first request and cached; the
/// subtree under `type_root` never changes after construction.
#[derive(Clone, Debug)]
pub struct TypeLiteralNode {
    pub type_root: NodeId,
    pub(crate) validation: OnceLock<TypeLiteralValidation>,
}

/// `RecordOf(Table)`: the record type of a named table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordOfNode {
    pub table_name: NodeId,
}
