//! Token amounts in natural and scaled form.
//!
//! Callers hand amounts to the client either as human-readable decimal
//! strings ("1.5") or as integers already scaled by the token's decimals.
//! The form is decided once, when the [`Amount`] is built, and every
//! on-chain call receives the scaled integer.

use std::fmt;
use std::str::FromStr;

use alloy_primitives::U256;

use crate::error::{ApiError, Result};

/// Input that requests repayment of the full outstanding borrow.
pub const REPAY_ALL_SENTINEL: &str = "-1";

/// A token amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Amount {
    /// Human-readable decimal string, e.g. `"1.5"`.
    Natural(String),
    /// Integer already scaled by the token's decimals.
    Scaled(U256),
    /// Everything that is owed. Only meaningful for repayments.
    Max,
}

impl Amount {
    /// A human-readable amount. Validated when scaled.
    pub fn natural(value: impl Into<String>) -> Self {
        Self::Natural(value.into())
    }

    /// An amount already in the token's smallest unit.
    pub fn scaled(value: impl Into<U256>) -> Self {
        Self::Scaled(value.into())
    }

    /// Parse caller input.
    ///
    /// `"-1"` selects [`Amount::Max`]. With `mantissa` set the input must be a
    /// non-negative integer in the token's smallest unit; otherwise it is a
    /// non-negative decimal number.
    pub fn parse(input: &str, mantissa: bool) -> Result<Self> {
        let input = input.trim();

        if input == REPAY_ALL_SENTINEL {
            return Ok(Self::Max);
        }
        if input.starts_with('-') {
            return Err(ApiError::InvalidAmount(format!(
                "negative amount: {}",
                input
            )));
        }

        if mantissa {
            return U256::from_str_radix(input, 10)
                .map(Self::Scaled)
                .map_err(|_| ApiError::InvalidAmount(format!("not an integer: {}", input)));
        }

        // Validate eagerly so bad input fails at the boundary.
        split_decimal(input)?;
        Ok(Self::Natural(input.to_string()))
    }

    /// Returns true for the full-repayment sentinel.
    pub fn is_max(&self) -> bool {
        matches!(self, Self::Max)
    }

    /// Convert to the on-chain integer for a token with `decimals` decimals.
    ///
    /// [`Amount::Max`] maps to `U256::MAX`.
    pub fn to_scaled(&self, decimals: u8) -> Result<U256> {
        match self {
            Self::Natural(value) => scale_natural(value, decimals),
            Self::Scaled(value) => Ok(*value),
            Self::Max => Ok(U256::MAX),
        }
    }
}

impl FromStr for Amount {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s, false)
    }
}

impl From<U256> for Amount {
    fn from(value: U256) -> Self {
        Self::Scaled(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Natural(value) => write!(f, "{}", value),
            Self::Scaled(value) => write!(f, "{} (scaled)", value),
            Self::Max => write!(f, "max"),
        }
    }
}

/// Split a decimal string into its integer and fractional digits.
fn split_decimal(value: &str) -> Result<(&str, &str)> {
    let invalid = || ApiError::InvalidAmount(format!("not a decimal number: {}", value));

    let (integer_part, fractional_part) = match value.split_once('.') {
        Some((integer, fraction)) => (integer, fraction),
        None => (value, ""),
    };

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if integer_part.is_empty() && fractional_part.is_empty() {
        return Err(invalid());
    }
    if !all_digits(integer_part) || !all_digits(fractional_part) {
        return Err(invalid());
    }

    Ok((integer_part, fractional_part))
}

/// Scale a decimal string by `10^decimals`, rounding half up past the last digit.
pub fn scale_natural(value: &str, decimals: u8) -> Result<U256> {
    let (integer_part, fractional_part) = split_decimal(value.trim())?;
    let decimals = usize::from(decimals);

    let (kept, dropped) = if fractional_part.len() > decimals {
        fractional_part.split_at(decimals)
    } else {
        (fractional_part, "")
    };

    let fractional_padded = format!("{:0<width$}", kept, width = decimals);
    let combined = format!("{}{}", integer_part, fractional_padded);
    let combined = combined.trim_start_matches('0');

    let overflow = || ApiError::InvalidAmount(format!("amount too large: {}", value));

    let scaled = if combined.is_empty() {
        U256::ZERO
    } else {
        U256::from_str_radix(combined, 10).map_err(|_| overflow())?
    };

    let round_up = dropped.bytes().next().is_some_and(|b| b >= b'5');
    if round_up {
        scaled.checked_add(U256::from(1)).ok_or_else(overflow)
    } else {
        Ok(scaled)
    }
}

/// Render a scaled integer as a decimal string with `decimals` decimals.
///
/// Trailing fractional zeros are removed.
pub fn to_natural(value: U256, decimals: u8) -> String {
    let digits = value.to_string();
    let decimals = usize::from(decimals);

    if decimals == 0 {
        return digits;
    }

    let padded = format!("{:0>width$}", digits, width = decimals + 1);
    let (integer_part, fractional_part) = padded.split_at(padded.len() - decimals);
    let fractional_part = fractional_part.trim_end_matches('0');

    if fractional_part.is_empty() {
        integer_part.to_string()
    } else {
        format!("{}.{}", integer_part, fractional_part)
    }
}
