//! Token amounts and their decimal text form.
//!
//! Amounts are fixed-point integers in base units; a token with `d` decimals has `10^d`
//! base units per whole coin. Text conversion is exact: no floating point is involved.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::error::FormatError;

/// Decimals of both ZNN and QSR.
pub const COIN_DECIMALS: u8 = 8;

/// Base units in one whole ZNN.
pub const ONE_ZNN: u128 = 100_000_000;

/// Base units in one whole QSR.
pub const ONE_QSR: u128 = 100_000_000;

/// Render a signed base-unit amount as decimal text with exactly `decimals` fraction
/// digits.
///
/// An absent amount renders as zero. With zero decimals the result still ends in a
/// point (`"100."`).
pub fn format_amount(amount: Option<i128>, decimals: u8) -> String {
    let Some(amount) = amount else {
        return format!("0.{}", "0".repeat(decimals as usize));
    };
    place_point(amount.unsigned_abs().to_string(), amount < 0, decimals)
}

fn place_point(digits: String, negative: bool, decimals: u8) -> String {
    let decimals = decimals as usize;
    let digits = if digits.len() <= decimals {
        format!("{}{digits}", "0".repeat(decimals + 1 - digits.len()))
    } else {
        digits
    };
    let (integer, fraction) = digits.split_at(digits.len() - decimals);
    let sign = if negative { "-" } else { "" };
    format!("{sign}{integer}.{fraction}")
}

/// Parse decimal text into a signed base-unit amount.
///
/// Surrounding whitespace is ignored. An empty integer part counts as zero (`".5"`).
/// More fraction digits than `decimals` is an error, never silently truncated.
pub fn parse_amount(text: &str, decimals: u8) -> Result<i128, FormatError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(FormatError::InvalidAmount("amount cannot be empty".into()));
    }

    let mut parts = text.split('.');
    let integer = parts.next().unwrap_or_default();
    let fraction = parts.next().unwrap_or_default();
    if parts.next().is_some() {
        return Err(FormatError::InvalidAmount(format!(
            "invalid amount format: {text}"
        )));
    }
    if fraction.len() > decimals as usize {
        return Err(FormatError::InvalidAmount(format!(
            "too many decimal places: max {decimals}"
        )));
    }

    let integer = if integer.is_empty() { "0" } else { integer };
    let combined = format!("{integer}{fraction:0<width$}", width = decimals as usize);
    combined
        .parse::<i128>()
        .map_err(|_| FormatError::InvalidAmount(format!("invalid amount: {text}")))
}

/// A non-negative token amount in base units.
///
/// Serialized as a decimal string of base units, which is how the node exchanges
/// big-integer amounts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(u128);

impl Amount {
    pub const ZERO: Self = Self(0);

    pub const fn new(raw: u128) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Parse a user-entered token amount. Negative values are rejected.
    pub fn parse(text: &str, decimals: u8) -> Result<Self, FormatError> {
        let value = parse_amount(text, decimals)?;
        u128::try_from(value)
            .map(Self)
            .map_err(|_| FormatError::InvalidAmount(format!("amount cannot be negative: {}", text.trim())))
    }

    /// Decimal text with exactly `decimals` fraction digits.
    pub fn format(&self, decimals: u8) -> String {
        place_point(self.0.to_string(), false, decimals)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Number(u64),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Text(s) => s.trim().parse().map(Self).map_err(serde::de::Error::custom),
            Repr::Number(n) => Ok(Self(n as u128)),
        }
    }
}
