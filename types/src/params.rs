//! Protocol constants for account block construction.

/// Account block format version.
pub const BLOCK_VERSION: u64 = 1;

/// Chain identifier of the Zenon mainnet.
pub const MAINNET_CHAIN_IDENTIFIER: u64 = 1;

/// Plasma charged for a plain transaction. Used when the caller states no requirement.
pub const MIN_PLASMA: u64 = 21_000;

/// Difficulty used when the node cannot tell us, and the floor for what it does tell us.
pub const DEFAULT_POW_DIFFICULTY: u64 = 80_000;

/// Smallest QSR fusion accepted by the plasma contract, in whole QSR.
pub const MIN_FUSION_QSR: u128 = 10;

/// Smallest ZNN stake accepted by the stake contract, in whole ZNN.
pub const MIN_STAKE_ZNN: u128 = 1;

/// Unit of stake duration, in seconds (30 days).
pub const STAKE_TIME_UNIT_SECS: i64 = 30 * 24 * 60 * 60;

/// Allowed stake duration range, in units of `STAKE_TIME_UNIT_SECS`.
pub const STAKE_MIN_MONTHS: i64 = 1;
pub const STAKE_MAX_MONTHS: i64 = 12;

/// ZNN burned to issue a token, in whole ZNN.
pub const TOKEN_ISSUE_FEE_ZNN: u128 = 1;

/// Collateral a pillar registration locks, in whole coins.
pub const PILLAR_REGISTER_ZNN: u128 = 15_000;
pub const PILLAR_REGISTER_QSR: u128 = 150_000;

/// Collateral a sentinel registration locks, in whole coins.
pub const SENTINEL_REGISTER_ZNN: u128 = 5_000;
pub const SENTINEL_REGISTER_QSR: u128 = 50_000;

/// Percentages a new pillar keeps of block rewards and passes on to delegators.
pub const PILLAR_BLOCK_REWARD_PERCENT: u8 = 0;
pub const PILLAR_DELEGATE_REWARD_PERCENT: u8 = 100;

/// Token metadata limits enforced by the token contract.
pub const TOKEN_NAME_MAX_LEN: usize = 40;
pub const TOKEN_SYMBOL_MAX_LEN: usize = 10;
pub const TOKEN_DOMAIN_MAX_LEN: usize = 128;
pub const TOKEN_MAX_DECIMALS: u8 = 18;

/// Pillar name length limits.
pub const PILLAR_NAME_MIN_LEN: usize = 3;
pub const PILLAR_NAME_MAX_LEN: usize = 40;
