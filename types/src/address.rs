//! Account addresses, bech32-encoded with the `z` prefix.

use bech32::{Bech32, Hrp};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::encoding::decode_data_part;
use crate::error::FormatError;

/// Human-readable part of every account address.
pub const ADDRESS_HRP: Hrp = Hrp::parse_unchecked("z");

/// Raw address length: one kind byte plus a 19-byte key digest.
pub const ADDRESS_LEN: usize = 20;

/// Kind byte for addresses derived from a user's public key.
pub const USER_ADDRESS_BYTE: u8 = 0;

/// Kind byte for embedded contract addresses.
pub const CONTRACT_ADDRESS_BYTE: u8 = 1;

/// A 20-byte account address.
///
/// The first byte distinguishes user accounts from embedded contracts. User addresses
/// are derived from an Ed25519 public key in `znn_crypto::derive_address`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// All-zero address, used as the recipient of receive blocks.
    pub const ZERO: Self = Self([0u8; ADDRESS_LEN]);

    pub const fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// Whether this is one of the protocol's built-in contract addresses.
    pub fn is_embedded(&self) -> bool {
        self.0[0] == CONTRACT_ADDRESS_BYTE
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; ADDRESS_LEN]
    }

    /// The address of an embedded contract.
    pub const fn embedded(contract: EmbeddedContract) -> Self {
        contract.address()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = bech32::encode::<Bech32>(ADDRESS_HRP, &self.0).map_err(|_| fmt::Error)?;
        f.write_str(&encoded)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl FromStr for Address {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (hrp, data) =
            bech32::decode(s).map_err(|e| FormatError::InvalidAddress(format!("{s}: {e}")))?;
        if hrp != ADDRESS_HRP {
            return Err(FormatError::InvalidAddress(format!(
                "{s}: expected prefix \"z\", got \"{hrp}\""
            )));
        }
        let bytes: [u8; ADDRESS_LEN] = data.try_into().map_err(|v: Vec<u8>| {
            FormatError::InvalidAddress(format!("{s}: expected 20 bytes, got {}", v.len()))
        })?;
        Ok(Self(bytes))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Protocol-level contracts that live at fixed addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EmbeddedContract {
    Plasma,
    Pillar,
    Token,
    Sentinel,
    Stake,
}

impl EmbeddedContract {
    pub const ALL: [EmbeddedContract; 5] = [
        EmbeddedContract::Plasma,
        EmbeddedContract::Pillar,
        EmbeddedContract::Token,
        EmbeddedContract::Sentinel,
        EmbeddedContract::Stake,
    ];

    pub const fn address(self) -> Address {
        let data: &[u8; 32] = match self {
            EmbeddedContract::Plasma => b"qxemdeddedxplasmaxxxxxxxxxxxxxxx",
            EmbeddedContract::Pillar => b"qxemdeddedxpyllarxxxxxxxxxxxxxxx",
            EmbeddedContract::Token => b"qxemdeddedxt0kenxxxxxxxxxxxxxxxx",
            EmbeddedContract::Sentinel => b"qxemdeddedxsentynelxxxxxxxxxxxxx",
            EmbeddedContract::Stake => b"qxemdeddedxstakexxxxxxxxxxxxxxxx",
        };
        Address(decode_data_part(data))
    }

    pub fn name(self) -> &'static str {
        match self {
            EmbeddedContract::Plasma => "plasma",
            EmbeddedContract::Pillar => "pillar",
            EmbeddedContract::Token => "token",
            EmbeddedContract::Sentinel => "sentinel",
            EmbeddedContract::Stake => "stake",
        }
    }
}
