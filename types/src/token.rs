//! Token standards, bech32-encoded with the `zts` prefix.

use bech32::{Bech32, Hrp};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::encoding::decode_data_part;
use crate::error::FormatError;

/// Human-readable part of every token standard.
pub const TOKEN_STANDARD_HRP: Hrp = Hrp::parse_unchecked("zts");

pub const TOKEN_STANDARD_LEN: usize = 10;

/// A 10-byte token identifier.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TokenStandard([u8; TOKEN_STANDARD_LEN]);

impl TokenStandard {
    /// The network's primary coin.
    pub const ZNN: Self = Self(decode_data_part(b"znnxxxxxxxxxxxxx"));

    /// The network's secondary coin, used for plasma fusion and sentinels.
    pub const QSR: Self = Self(decode_data_part(b"qsrxxxxxxxxxxxxx"));

    /// Token standard carried by receive blocks and contract calls without value.
    pub const EMPTY: Self = Self([0u8; TOKEN_STANDARD_LEN]);

    pub const fn new(bytes: [u8; TOKEN_STANDARD_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; TOKEN_STANDARD_LEN] {
        &self.0
    }

    /// Short symbol for the built-in coins, `None` for anything else.
    pub fn symbol(&self) -> Option<&'static str> {
        if *self == Self::ZNN {
            Some("ZNN")
        } else if *self == Self::QSR {
            Some("QSR")
        } else {
            None
        }
    }

    /// Parse either a symbol of a built-in coin (`ZNN`, `QSR`, any case) or a full
    /// `zts1...` identifier.
    pub fn parse_identifier(text: &str) -> Result<Self, FormatError> {
        let text = text.trim();
        match text.to_ascii_uppercase().as_str() {
            "ZNN" => Ok(Self::ZNN),
            "QSR" => Ok(Self::QSR),
            _ => text.parse(),
        }
    }
}

impl fmt::Display for TokenStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded =
            bech32::encode::<Bech32>(TOKEN_STANDARD_HRP, &self.0).map_err(|_| fmt::Error)?;
        f.write_str(&encoded)
    }
}

impl fmt::Debug for TokenStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.symbol() {
            Some(symbol) => write!(f, "TokenStandard({symbol})"),
            None => write!(f, "TokenStandard({self})"),
        }
    }
}

impl FromStr for TokenStandard {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (hrp, data) = bech32::decode(s)
            .map_err(|e| FormatError::InvalidTokenStandard(format!("{s}: {e}")))?;
        if hrp != TOKEN_STANDARD_HRP {
            return Err(FormatError::InvalidTokenStandard(format!(
                "{s}: expected prefix \"zts\", got \"{hrp}\""
            )));
        }
        let bytes: [u8; TOKEN_STANDARD_LEN] = data.try_into().map_err(|v: Vec<u8>| {
            FormatError::InvalidTokenStandard(format!("{s}: expected 10 bytes, got {}", v.len()))
        })?;
        Ok(Self(bytes))
    }
}

impl Serialize for TokenStandard {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TokenStandard {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_coins_render() {
        let znn = TokenStandard::ZNN.to_string();
        let qsr = TokenStandard::QSR.to_string();
        assert!(znn.starts_with("zts1znnxxxxxxxxxxxxx"));
        assert!(qsr.starts_with("zts1qsrxxxxxxxxxxxxx"));
        assert_eq!(znn.len(), 26);
        assert_eq!(qsr.len(), 26);
    }

    #[test]
    fn parses_symbols_case_insensitively() {
        assert_eq!(TokenStandard::parse_identifier("znn").unwrap(), TokenStandard::ZNN);
        assert_eq!(TokenStandard::parse_identifier(" QSR ").unwrap(), TokenStandard::QSR);
        assert_eq!(TokenStandard::parse_identifier("Qsr").unwrap(), TokenStandard::QSR);
    }

    #[test]
    fn parses_full_identifier() {
        let text = TokenStandard::ZNN.to_string();
        assert_eq!(TokenStandard::parse_identifier(&text).unwrap(), TokenStandard::ZNN);
        assert_eq!(text.parse::<TokenStandard>().unwrap().symbol(), Some("ZNN"));
    }

    #[test]
    fn rejects_unknown_symbol() {
        assert!(matches!(
            TokenStandard::parse_identifier("BTC"),
            Err(FormatError::InvalidTokenStandard(_))
        ));
    }

    #[test]
    fn empty_has_no_symbol() {
        assert_eq!(TokenStandard::EMPTY.symbol(), None);
        assert!(TokenStandard::EMPTY.to_string().starts_with("zts1qqqqqqqqqqqqqqqq"));
    }
}
