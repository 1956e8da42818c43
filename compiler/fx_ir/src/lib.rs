//! Fx IR - lexical boundary types for the Fx formula language.
//!
//! This crate holds the value types the parse tree consumes from the lexer:
//! - Spans for source locations
//! - Tokens (kind + span)
//! - Names (`DName`) and namespace paths (`DPath`)
//! - Identifiers (name references with their tokens)
//! - Literal value types and operators
//!
//! Everything here is a plain value: `Clone`, `Eq`, `Hash`, `Debug`.
//! Floats are stored as u64 bits so tokens stay hashable.

/// Compile-time assertion that a type has a specific size.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod decimal;
mod identifier;
mod name;
mod operators;
mod span;
mod token;

pub use decimal::{Decimal, DecimalError, MAX_DECIMAL_SCALE};
pub use identifier::Identifier;
pub use name::{DName, DPath};
pub use operators::{BinaryOp, UnaryOp, VariadicOp};
pub use span::{Span, SpanError};
pub use token::{Token, TokenKind, PUNCTUATOR_PERCENT};
