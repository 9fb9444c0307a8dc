//! Proof-of-work for account blocks.
//!
//! An account without enough plasma pays for its block with work instead: a nonce
//! such that the first eight bytes of SHA3-256(digest || nonce), read little-endian,
//! reach the target derived from the requested difficulty. Expected effort grows
//! linearly with difficulty.

pub mod error;
pub mod generator;
pub mod target;
pub mod validator;

pub use error::WorkError;
pub use generator::WorkGenerator;
pub use target::{difficulty_to_target, work_value};
pub use validator::validate_work;
