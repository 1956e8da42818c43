//! Name references as written in a formula.

use super::{DName, DPath, Span, Token};

/// A (possibly namespace-qualified) name reference.
///
/// `token` is the identifier token itself; `at_token` is the `@`
/// disambiguation prefix when one was written (`@Accounts`).
/// Equality is structural over every field.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Identifier {
    pub namespace: DPath,
    pub name: DName,
    pub token: Token,
    pub at_token: Option<Token>,
}

impl Identifier {
    /// A simple name in the root namespace.
    pub fn new(name: DName, token: Token) -> Self {
        Identifier {
            namespace: DPath::root(),
            name,
            token,
            at_token: None,
        }
    }

    /// A simple name read from an identifier token.
    ///
    /// Returns `None` if `token` is not an identifier token.
    pub fn from_token(token: Token) -> Option<Self> {
        let name = token.kind.ident_name()?.clone();
        Some(Identifier::new(name, token))
    }

    #[must_use]
    pub fn with_namespace(mut self, namespace: DPath) -> Self {
        self.namespace = namespace;
        self
    }

    #[must_use]
    pub fn with_at_token(mut self, at_token: Token) -> Self {
        self.at_token = Some(at_token);
        self
    }

    /// Whether this is a simple, non-qualified name.
    #[inline]
    pub fn is_root_namespace(&self) -> bool {
        self.namespace.is_root()
    }

    /// Copy this identifier with every token moved onto `span`.
    #[must_use]
    pub fn rebase(&self, span: Span) -> Identifier {
        Identifier {
            namespace: self.namespace.clone(),
            name: self.name.clone(),
            token: self.token.rebase(span),
            at_token: self.at_token.as_ref().map(|t| t.rebase(span)),
        }
    }

    /// Span from the `@` prefix (if any) through the name token.
    pub fn span(&self) -> Span {
        match &self.at_token {
            Some(at) => at.span.merge(self.token.span),
            None => self.token.span,
        }
    }
}
