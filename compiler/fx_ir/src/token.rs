//! Tokens handed over by the lexer.
//!
//! The parse tree treats tokens as opaque anchors: a kind (with literal
//! payload where the kind carries one) and the span it was read from.

use std::fmt;

use super::{DName, Decimal, Span};

/// Spelling of the postfix percent punctuator.
pub const PUNCTUATOR_PERCENT: &str = "%";

/// Token kinds.
///
/// Float literals store bits as u64 for Eq/Hash.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    /// Number literal: `3.14` (stored as bits)
    NumLit(u64),
    /// Decimal literal
    DecLit(Decimal),
    /// String literal with escapes already resolved
    StrLit(Box<str>),
    /// Identifier, quotes already stripped: `Accounts`, `'Account Name'`
    Ident(DName),
    /// Placeholder in a formula template: `%Value%`
    Replaceable(Box<str>),

    // Keywords
    True,
    False,
    Parent,
    SelfKw,
    As,
    And,
    Or,
    Not,
    In,
    ExactIn,

    // Operators and punctuation
    Add,
    Sub,
    Mul,
    Div,
    Caret,
    Ampersand,
    PercentSign,
    Equ,
    LssGrt,
    Lss,
    LssEqu,
    Grt,
    GrtEqu,
    Bang,
    Dot,
    At,
    Colon,
    Comma,
    Semicolon,
    ParenOpen,
    ParenClose,
    BracketOpen,
    BracketClose,
    CurlyOpen,
    CurlyClose,

    // String interpolation: `$"a{x}b"`
    StrInterpStart,
    StrInterpEnd,
    IslandStart,
    IslandEnd,

    // Trivia
    Whitespace,
    Comment,

    /// Unlexable input, kept so recovery nodes have an anchor.
    Error,
    Eof,
}

impl TokenKind {
    /// Build a number-literal kind from its value.
    #[inline]
    pub fn num(value: f64) -> Self {
        TokenKind::NumLit(value.to_bits())
    }

    /// Literal numeric value for `NumLit`.
    pub fn num_value(&self) -> Option<f64> {
        match self {
            TokenKind::NumLit(bits) => Some(f64::from_bits(*bits)),
            _ => None,
        }
    }

    pub fn dec_value(&self) -> Option<Decimal> {
        match self {
            TokenKind::DecLit(value) => Some(*value),
            _ => None,
        }
    }

    pub fn str_value(&self) -> Option<&str> {
        match self {
            TokenKind::StrLit(value) | TokenKind::Replaceable(value) => Some(value),
            _ => None,
        }
    }

    pub fn ident_name(&self) -> Option<&DName> {
        match self {
            TokenKind::Ident(name) => Some(name),
            _ => None,
        }
    }

    /// Whitespace and comments.
    pub fn is_trivia(&self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Comment)
    }

    /// Fixed spelling of keyword and punctuation kinds.
    ///
    /// Returns `None` for kinds whose text depends on the source
    /// (literals, identifiers, trivia).
    pub fn spelling(&self) -> Option<&'static str> {
        let text = match self {
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Parent => DName::PARENT_KEYWORD,
            TokenKind::SelfKw => DName::SELF_KEYWORD,
            TokenKind::As => "As",
            TokenKind::And => "And",
            TokenKind::Or => "Or",
            TokenKind::Not => "Not",
            TokenKind::In => "in",
            TokenKind::ExactIn => "exactin",
            TokenKind::Add => "+",
            TokenKind::Sub => "-",
            TokenKind::Mul => "*",
            TokenKind::Div => "/",
            TokenKind::Caret => "^",
            TokenKind::Ampersand => "&",
            TokenKind::PercentSign => PUNCTUATOR_PERCENT,
            TokenKind::Equ => "=",
            TokenKind::LssGrt => "<>",
            TokenKind::Lss => "<",
            TokenKind::LssEqu => "<=",
            TokenKind::Grt => ">",
            TokenKind::GrtEqu => ">=",
            TokenKind::Bang => "!",
            TokenKind::Dot => ".",
            TokenKind::At => "@",
            TokenKind::Colon => ":",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::ParenOpen => "(",
            TokenKind::ParenClose => ")",
            TokenKind::BracketOpen => "[",
            TokenKind::BracketClose => "]",
            TokenKind::CurlyOpen => "{",
            TokenKind::CurlyClose => "}",
            TokenKind::StrInterpStart => "$\"",
            TokenKind::StrInterpEnd => "\"",
            TokenKind::IslandStart => "{",
            TokenKind::IslandEnd => "}",
            TokenKind::NumLit(_)
            | TokenKind::DecLit(_)
            | TokenKind::StrLit(_)
            | TokenKind::Ident(_)
            | TokenKind::Replaceable(_)
            | TokenKind::Whitespace
            | TokenKind::Comment
            | TokenKind::Error
            | TokenKind::Eof => return None,
        };
        Some(text)
    }
}

/// A token with its span in the source.
#[derive(Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }

    /// Create a token with an empty span, for synthesized nodes.
    pub fn dummy(kind: TokenKind) -> Self {
        Token {
            kind,
            span: Span::DUMMY,
        }
    }

    /// Copy this token into another coordinate space.
    ///
    /// The copy keeps the kind and payload and takes `span` as its location.
    /// Cloned subtrees are rebased this way so no token is shared between an
    /// original and its copy.
    #[inline]
    #[must_use]
    pub fn rebase(&self, span: Span) -> Token {
        Token {
            kind: self.kind.clone(),
            span,
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {}", self.kind, self.span)
    }
}
