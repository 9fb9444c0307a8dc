//! Plasma and proof-of-work snapshots reported by the node.

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::amount::Amount;
use crate::block::BlockType;
use crate::encoding::base64_bytes;

/// An account's plasma at query time. Plasma regenerates, so this is a point-in-time
/// snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlasmaInfo {
    pub current_plasma: u64,
    pub max_plasma: u64,
    #[serde(default)]
    pub qsr_amount: Amount,
}

/// Parameters for asking the node how much proof-of-work a block needs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredPowParams {
    pub address: Address,
    pub block_type: BlockType,
    pub to_address: Address,
    #[serde(with = "base64_bytes", default)]
    pub data: Vec<u8>,
}

/// The node's answer to a required proof-of-work query.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredPow {
    pub available_plasma: u64,
    pub base_plasma: u64,
    pub required_difficulty: u64,
}
