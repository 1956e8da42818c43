//! Binary, unary and variadic operators.
//!
//! Operators are classified by the parser; the tree stores them alongside
//! the operator token so printers and diagnostics never re-derive them.

/// Binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum BinaryOp {
    // Logical
    Or,
    And,

    // Text
    Concat,

    // Arithmetic
    Add,
    Mul,
    Div,
    Power,

    // Comparison
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,

    // Membership
    In,
    ExactIn,

    /// Operator token could not be classified (parser recovery).
    Error,
}

impl BinaryOp {
    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Or => "||",
            Self::And => "&&",
            Self::Concat => "&",
            Self::Add => "+",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Power => "^",
            Self::Equal => "=",
            Self::NotEqual => "<>",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::In => "in",
            Self::ExactIn => "exactin",
            Self::Error => "<error>",
        }
    }

    /// Whether the operator is spelled as a keyword rather than punctuation.
    pub const fn is_keyword(self) -> bool {
        matches!(self, Self::In | Self::ExactIn)
    }
}

/// Unary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum UnaryOp {
    /// Logical not: `!x`, `Not x`
    Not,
    /// Negation: `-x`
    Minus,
    /// Postfix percent: `x%`
    Percent,
}

impl UnaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Not => "!",
            Self::Minus => "-",
            Self::Percent => "%",
        }
    }

    /// Postfix operators follow their operand in source text.
    pub const fn is_postfix(self) -> bool {
        matches!(self, Self::Percent)
    }
}

/// Operators that chain any number of same-precedence operands.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum VariadicOp {
    /// Expression chaining: `a; b; c`
    Chain,
}

impl VariadicOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Chain => ";",
        }
    }
}
