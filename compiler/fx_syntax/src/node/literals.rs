//! Literal payloads.

use fx_ir::{DName, Decimal, Token};

/// `true` / `false`. The value is read from the token kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoolLitNode {
    pub value: bool,
}

/// Number literal.
///
/// The value is normally carried by the `NumLit` token. Nodes synthesized
/// by rewrites may carry it inline instead, over a token of any kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NumLitNode {
    pub(crate) bits: u64,
    pub(crate) inline: bool,
}

impl NumLitNode {
    #[inline]
    pub fn value(&self) -> f64 {
        f64::from_bits(self.bits)
    }

    /// Whether the value is carried inline rather than by the token.
    #[inline]
    pub fn is_inline(&self) -> bool {
        self.inline
    }
}

/// Decimal literal; token-carried or inline, like [`NumLitNode`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecLitNode {
    pub(crate) value: Decimal,
    pub(crate) inline: bool,
}

impl DecLitNode {
    #[inline]
    pub fn value(&self) -> Decimal {
        self.value
    }

    #[inline]
    pub fn is_inline(&self) -> bool {
        self.inline
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StrLitNode {
    pub value: Box<str>,
}

/// `Blank()` written as a literal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlankNode;

/// Parser recovery placeholder.
///
/// `message` is a template whose `{0}`, `{1}`... placeholders are filled
/// from `args` when rendered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorNode {
    pub message: Box<str>,
    pub args: Vec<Box<str>>,
}

impl ErrorNode {
    /// Render the message template with its arguments substituted.
    ///
    /// Placeholders are read from the template only; argument text is
    /// copied verbatim. A `{n}` with no matching argument is kept as is.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.message.len());
        let mut rest: &str = &self.message;
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let arg = after.find('}').and_then(|close| {
                let index: usize = after[..close].parse().ok()?;
                Some((self.args.get(index)?, close))
            });
            match arg {
                Some((arg, close)) => {
                    out.push_str(arg);
                    rest = &after[close + 1..];
                }
                None => {
                    out.push('{');
                    rest = after;
                }
            }
        }
        out.push_str(rest);
        out
    }
}

/// Template placeholder such as `%Value%`, kept verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplaceableNode {
    pub value: Box<str>,
}

/// Number with a unit suffix: `5 cm`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnitsLitNode {
    pub(crate) bits: u64,
    pub unit: DName,
}

impl UnitsLitNode {
    #[inline]
    pub fn value(&self) -> f64 {
        f64::from_bits(self.bits)
    }
}

/// Read the boolean value a `True`/`False` token denotes.
pub(crate) fn bool_value(token: &Token) -> Option<bool> {
    match token.kind {
        fx_ir::TokenKind::True => Some(true),
        fx_ir::TokenKind::False => Some(false),
        _ => None,
    }
}
