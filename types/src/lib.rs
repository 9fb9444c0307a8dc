//! Fundamental types for the znn wallet.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! hashes, addresses, token standards, amounts, keys, the account block wire form,
//! plasma snapshots and protocol constants.

pub mod address;
pub mod amount;
pub mod block;
pub mod encoding;
pub mod error;
pub mod hash;
pub mod keys;
pub mod params;
pub mod plasma;
pub mod token;

pub use address::{Address, EmbeddedContract};
pub use amount::{format_amount, parse_amount, Amount, COIN_DECIMALS, ONE_QSR, ONE_ZNN};
pub use block::{AccountBlock, BlockType, Nonce};
pub use error::FormatError;
pub use hash::{Hash, HashHeight};
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
pub use plasma::{PlasmaInfo, RequiredPow, RequiredPowParams};
pub use token::TokenStandard;
