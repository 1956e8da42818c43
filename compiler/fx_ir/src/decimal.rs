//! Fixed-point decimal literal values.
//!
//! The lexer hands decimal literals over already parsed; this type only
//! carries the value through the tree with exact equality and hashing.

use std::fmt;
use std::str::FromStr;

/// Largest number of fractional digits a decimal literal may carry.
pub const MAX_DECIMAL_SCALE: u8 = 28;

/// Error produced when a decimal literal cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecimalError {
    #[error("decimal literal is empty")]
    Empty,
    #[error("invalid character {found:?} in decimal literal")]
    InvalidDigit { found: char },
    #[error("decimal literal has {scale} fractional digits, max is {max}", max = MAX_DECIMAL_SCALE)]
    ScaleTooLarge { scale: usize },
    #[error("decimal literal overflows 128-bit mantissa")]
    Overflow,
}

/// A decimal number stored as `mantissa * 10^-scale`.
///
/// `1.50` and `1.5` are distinct values (different scale), matching how the
/// literal was written.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Decimal {
    mantissa: i128,
    scale: u8,
}

impl Decimal {
    pub const ZERO: Decimal = Decimal {
        mantissa: 0,
        scale: 0,
    };

    /// Create from raw parts.
    ///
    /// # Panics
    /// Panics if `scale` exceeds [`MAX_DECIMAL_SCALE`].
    #[track_caller]
    pub const fn new(mantissa: i128, scale: u8) -> Self {
        assert!(scale <= MAX_DECIMAL_SCALE, "decimal scale out of range");
        Decimal { mantissa, scale }
    }

    #[inline]
    pub const fn mantissa(self) -> i128 {
        self.mantissa
    }

    #[inline]
    pub const fn scale(self) -> u8 {
        self.scale
    }

    #[inline]
    pub const fn is_negative(self) -> bool {
        self.mantissa < 0
    }
}

impl FromStr for Decimal {
    type Err = DecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        if digits.is_empty() {
            return Err(DecimalError::Empty);
        }

        let mut mantissa: i128 = 0;
        let mut scale: usize = 0;
        let mut seen_point = false;
        let mut seen_digit = false;
        for c in digits.chars() {
            if c == '.' && !seen_point {
                seen_point = true;
                continue;
            }
            let digit = c.to_digit(10).ok_or(DecimalError::InvalidDigit { found: c })?;
            mantissa = mantissa
                .checked_mul(10)
                .and_then(|m| m.checked_add(i128::from(digit)))
                .ok_or(DecimalError::Overflow)?;
            seen_digit = true;
            if seen_point {
                scale += 1;
            }
        }
        if !seen_digit {
            return Err(DecimalError::Empty);
        }

        let scale = u8::try_from(scale)
            .ok()
            .filter(|s| *s <= MAX_DECIMAL_SCALE)
            .ok_or(DecimalError::ScaleTooLarge { scale })?;
        Ok(Decimal {
            mantissa: if negative { -mantissa } else { mantissa },
            scale,
        })
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.mantissa.unsigned_abs().to_string();
        let scale = usize::from(self.scale);
        if self.mantissa < 0 {
            f.write_str("-")?;
        }
        if scale == 0 {
            return f.write_str(&digits);
        }
        if digits.len() <= scale {
            write!(f, "0.{}{}", "0".repeat(scale - digits.len()), digits)
        } else {
            let (int, frac) = digits.split_at(digits.len() - scale);
            write!(f, "{int}.{frac}")
        }
    }
}

impl fmt::Debug for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Decimal({self})")
    }
}
