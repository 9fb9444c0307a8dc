//! Account blocks in the form the node accepts for publication.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::address::Address;
use crate::amount::Amount;
use crate::encoding::base64_bytes;
use crate::hash::{Hash, HashHeight};
use crate::keys::{PublicKey, Signature};
use crate::token::TokenStandard;

/// Kind of user account block. Contract calls are sends carrying a data payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockType {
    UserSend,
    UserReceive,
}

impl BlockType {
    /// Numeric code used in hashing and on the wire.
    pub const fn code(self) -> u64 {
        match self {
            BlockType::UserSend => 2,
            BlockType::UserReceive => 3,
        }
    }

    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            2 => Some(BlockType::UserSend),
            3 => Some(BlockType::UserReceive),
            _ => None,
        }
    }
}

impl Serialize for BlockType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.code())
    }
}

impl<'de> Deserialize<'de> for BlockType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = u64::deserialize(deserializer)?;
        BlockType::from_code(code)
            .ok_or_else(|| serde::de::Error::custom(format!("unsupported block type {code}")))
    }
}

/// An 8-byte proof-of-work nonce. Hex on the wire.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Nonce(pub [u8; 8]);

impl Nonce {
    pub const ZERO: Self = Self([0u8; 8]);

    pub const fn from_u64(value: u64) -> Self {
        Self(value.to_le_bytes())
    }

    pub fn as_u64(&self) -> u64 {
        u64::from_le_bytes(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }
}

impl fmt::Display for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Nonce({self})")
    }
}

impl FromStr for Nonce {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 8];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl Serialize for Nonce {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Nonce {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(text) if !text.is_empty() => text.parse().map_err(serde::de::Error::custom),
            _ => Ok(Nonce::ZERO),
        }
    }
}

/// A complete account block as published through `ledger.publishRawTransaction`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBlock {
    pub version: u64,
    pub chain_identifier: u64,
    pub block_type: BlockType,
    pub hash: Hash,
    pub previous_hash: Hash,
    pub height: u64,
    pub momentum_acknowledged: HashHeight,
    pub address: Address,
    pub to_address: Address,
    pub amount: Amount,
    pub token_standard: TokenStandard,
    pub from_block_hash: Hash,
    #[serde(default)]
    pub descendant_blocks: Vec<AccountBlock>,
    #[serde(with = "base64_bytes", default)]
    pub data: Vec<u8>,
    pub fused_plasma: u64,
    pub difficulty: u64,
    pub nonce: Nonce,
    pub public_key: PublicKey,
    pub signature: Signature,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AccountBlock {
        AccountBlock {
            version: 1,
            chain_identifier: 1,
            block_type: BlockType::UserSend,
            hash: Hash::new([1; 32]),
            previous_hash: Hash::ZERO,
            height: 1,
            momentum_acknowledged: HashHeight::new(Hash::new([2; 32]), 100),
            address: Address::new([0; 20]),
            to_address: Address::new([0; 20]),
            amount: Amount::new(5),
            token_standard: TokenStandard::ZNN,
            from_block_hash: Hash::ZERO,
            descendant_blocks: Vec::new(),
            data: vec![1, 2, 3],
            fused_plasma: 21_000,
            difficulty: 0,
            nonce: Nonce::ZERO,
            public_key: PublicKey([3; 32]),
            signature: Signature([4; 64]),
        }
    }

    #[test]
    fn block_type_codes() {
        assert_eq!(BlockType::UserSend.code(), 2);
        assert_eq!(BlockType::UserReceive.code(), 3);
        assert_eq!(BlockType::from_code(3), Some(BlockType::UserReceive));
        assert_eq!(BlockType::from_code(1), None);
    }

    #[test]
    fn json_uses_camel_case_fields() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["blockType"], 2);
        assert_eq!(json["chainIdentifier"], 1);
        assert_eq!(json["fusedPlasma"], 21_000);
        assert_eq!(json["amount"], "5");
        assert_eq!(json["data"], "AQID");
        assert_eq!(json["nonce"], "0000000000000000");
        assert_eq!(json["momentumAcknowledged"]["height"], 100);
    }

    #[test]
    fn json_round_trips() {
        let block = sample();
        let text = serde_json::to_string(&block).unwrap();
        let back: AccountBlock = serde_json::from_str(&text).unwrap();
        assert_eq!(back, block);
    }

    #[test]
    fn nonce_hex_is_little_endian_u64() {
        let nonce = Nonce::from_u64(1);
        assert_eq!(nonce.to_string(), "0100000000000000");
        assert_eq!("0100000000000000".parse::<Nonce>().unwrap().as_u64(), 1);
    }
}
