//! Token quantities
//!
//! Balances are non-negative integers denominated in a token's smallest
//! indivisible unit. Human-readable decimal strings are converted with
//! integer arithmetic so no floating point ever touches a balance.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::TypeError;

/// Decimals used by ether-style tokens (1 token = 10^18 units).
pub const ETHER_DECIMALS: u32 = 18;

/// Quantity of a token in its smallest unit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(u128);

impl Amount {
    pub const ZERO: Amount = Amount(0);
    pub const MAX: Amount = Amount(u128::MAX);

    pub const fn new(units: u128) -> Self {
        Self(units)
    }

    pub const fn units(&self) -> u128 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_add(rhs.0).map(Amount)
    }

    pub fn checked_sub(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_sub(rhs.0).map(Amount)
    }

    pub fn saturating_add(self, rhs: Amount) -> Amount {
        Amount(self.0.saturating_add(rhs.0))
    }
}

impl From<u128> for Amount {
    fn from(units: u128) -> Self {
        Self(units)
    }
}

impl From<u64> for Amount {
    fn from(units: u64) -> Self {
        Self(units as u128)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Convert a decimal string into smallest units.
///
/// `parse_units("1.5", 18)` is `1_500_000_000_000_000_000`. The whole and
/// fractional digits are scaled separately in `u128`, so every value an
/// `Amount` can hold is accepted. Inputs with more significant fractional
/// digits than `decimals`, negative inputs and values above `Amount::MAX`
/// are rejected.
pub fn parse_units(input: &str, decimals: u32) -> Result<Amount, TypeError> {
    let scale = unit_scale(decimals)?;
    let invalid = || TypeError::InvalidAmount {
        input: input.to_string(),
    };
    let overflow = || TypeError::Overflow {
        input: input.to_string(),
    };

    let text = input.trim();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));
    let is_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !is_digits(whole) || !is_digits(fraction) {
        return Err(invalid());
    }

    let fraction = fraction.trim_end_matches('0');
    if whole.bytes().all(|b| b == b'0') && fraction.is_empty() {
        return Ok(Amount::ZERO);
    }
    if negative {
        return Err(TypeError::NegativeAmount {
            input: input.to_string(),
        });
    }
    if fraction.len() > decimals as usize {
        return Err(TypeError::TooPrecise {
            input: input.to_string(),
            decimals,
        });
    }

    let whole_units = if whole.is_empty() {
        0
    } else {
        whole.parse::<u128>().map_err(|_| overflow())?
    };
    let fraction_units = if fraction.is_empty() {
        0
    } else {
        // At most `decimals` digits, so below `scale` and within u128.
        let padding = 10u128.pow(decimals - fraction.len() as u32);
        fraction.parse::<u128>().map_err(|_| invalid())? * padding
    };

    whole_units
        .checked_mul(scale)
        .and_then(|units| units.checked_add(fraction_units))
        .map(Amount)
        .ok_or_else(overflow)
}

/// Shorthand for 18-decimal tokens.
pub fn parse_ether(input: &str) -> Result<Amount, TypeError> {
    parse_units(input, ETHER_DECIMALS)
}

/// Render smallest units as a decimal string without trailing zeros.
pub fn format_units(amount: Amount, decimals: u32) -> Result<String, TypeError> {
    let scale = unit_scale(decimals)?;
    let whole = amount.units() / scale;
    let fraction = amount.units() % scale;
    if fraction == 0 {
        return Ok(whole.to_string());
    }

    let digits = format!("{:0width$}", fraction, width = decimals as usize);
    Ok(format!("{}.{}", whole, digits.trim_end_matches('0')))
}

/// `10^decimals`, the number of units in one whole token.
fn unit_scale(decimals: u32) -> Result<u128, TypeError> {
    10u128
        .checked_pow(decimals)
        .ok_or(TypeError::UnsupportedDecimals { decimals })
}
