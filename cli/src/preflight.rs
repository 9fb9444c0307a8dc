//! Checks run before a block enters the pipeline, so that obviously doomed
//! submissions never cost a proof-of-work.

use regex::Regex;
use thiserror::Error;
use znn_rpc::{AccountInfo, FusionEntry, PillarInfo, SentinelInfo, StakeEntry, TokenInfo};
use znn_transactions::embedded::token::NewToken;
use znn_types::params::{
    MIN_FUSION_QSR, MIN_STAKE_ZNN, PILLAR_NAME_MAX_LEN, PILLAR_NAME_MIN_LEN, STAKE_MAX_MONTHS,
    STAKE_MIN_MONTHS, TOKEN_DOMAIN_MAX_LEN, TOKEN_MAX_DECIMALS, TOKEN_NAME_MAX_LEN,
    TOKEN_SYMBOL_MAX_LEN,
};
use znn_types::{Address, Amount, PlasmaInfo, TokenStandard, COIN_DECIMALS, ONE_QSR, ONE_ZNN};
use znn_utils::format_duration;

use crate::output::token_amount;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PreflightError {
    #[error("you have no balance for token {0}")]
    NoBalance(TokenStandard),

    #[error("insufficient balance: you have {available} but need {required}")]
    InsufficientFunds { available: String, required: String },

    #[error(
        "insufficient plasma: {available} available, {required} required, and proof-of-work is disabled"
    )]
    InsufficientResource { available: u64, required: u64 },

    #[error("{0}")]
    InvalidArgument(String),

    #[error("token {0} does not exist")]
    UnknownToken(TokenStandard),

    #[error("only the owner of token {0} can do this")]
    NotTokenOwner(TokenStandard),

    #[error("token {0} is not mintable")]
    NotMintable(TokenStandard),

    #[error("token {0} is not burnable")]
    NotBurnable(TokenStandard),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    TooEarly(String),
}

/// Alphanumeric, with at most one `-._+` separator between alphanumeric runs.
const PILLAR_NAME_PATTERN: &str = r"^[a-zA-Z0-9]+[-._+]?[a-zA-Z0-9]+$";

/// Decimals of `token` as the node reports them for this account. An account that
/// never held a custom token has no record of it.
pub fn token_decimals(info: &AccountInfo, token: &TokenStandard) -> Result<u8, PreflightError> {
    match info.balance_info_map.get(token) {
        Some(balance) => Ok(balance
            .token_info
            .as_ref()
            .map(|t| t.decimals)
            .unwrap_or(COIN_DECIMALS)),
        None if token.symbol().is_some() => Ok(COIN_DECIMALS),
        None => Err(PreflightError::NoBalance(*token)),
    }
}

/// The account must hold at least `amount` of `token`.
pub fn check_funds(
    info: &AccountInfo,
    token: &TokenStandard,
    amount: Amount,
) -> Result<(), PreflightError> {
    let decimals = token_decimals(info, token)?;
    let available = info.balance_of(token);
    if available < amount {
        return Err(PreflightError::InsufficientFunds {
            available: token_amount(available, decimals, token),
            required: token_amount(amount, decimals, token),
        });
    }
    Ok(())
}

/// With proof-of-work disabled the account's plasma must cover the block.
pub fn check_plasma(plasma: &PlasmaInfo, required: u64) -> Result<(), PreflightError> {
    if plasma.current_plasma < required {
        return Err(PreflightError::InsufficientResource {
            available: plasma.current_plasma,
            required,
        });
    }
    Ok(())
}

/// Fusions are whole QSR, at least the protocol minimum.
pub fn check_fuse_amount(amount: Amount) -> Result<(), PreflightError> {
    let min = Amount::new(MIN_FUSION_QSR * ONE_QSR);
    if amount < min {
        return Err(PreflightError::InvalidArgument(format!(
            "minimum fusion is {}",
            token_amount(min, COIN_DECIMALS, &TokenStandard::QSR)
        )));
    }
    if amount.raw() % ONE_QSR != 0 {
        return Err(PreflightError::InvalidArgument(
            "fusion amount must be a whole number of QSR".into(),
        ));
    }
    Ok(())
}

pub fn check_stake(amount: Amount, months: i64) -> Result<(), PreflightError> {
    let min = Amount::new(MIN_STAKE_ZNN * ONE_ZNN);
    if amount < min {
        return Err(PreflightError::InvalidArgument(format!(
            "minimum stake is {}",
            token_amount(min, COIN_DECIMALS, &TokenStandard::ZNN)
        )));
    }
    if !(STAKE_MIN_MONTHS..=STAKE_MAX_MONTHS).contains(&months) {
        return Err(PreflightError::InvalidArgument(format!(
            "stake duration must be between {STAKE_MIN_MONTHS} and {STAKE_MAX_MONTHS} months"
        )));
    }
    Ok(())
}

/// Token metadata the token contract would refuse.
pub fn check_new_token(token: &NewToken) -> Result<(), PreflightError> {
    let invalid = |message: String| Err(PreflightError::InvalidArgument(message));
    let name_len = token.name.chars().count();
    if name_len == 0 || name_len > TOKEN_NAME_MAX_LEN {
        return invalid(format!("token name must be 1-{TOKEN_NAME_MAX_LEN} characters"));
    }
    let symbol_len = token.symbol.chars().count();
    if symbol_len == 0 || symbol_len > TOKEN_SYMBOL_MAX_LEN {
        return invalid(format!("token symbol must be 1-{TOKEN_SYMBOL_MAX_LEN} characters"));
    }
    if token.symbol != token.symbol.to_uppercase() {
        return invalid("token symbol must be uppercase".into());
    }
    if token.domain.chars().count() > TOKEN_DOMAIN_MAX_LEN {
        return invalid(format!("domain must be at most {TOKEN_DOMAIN_MAX_LEN} characters"));
    }
    if token.decimals > TOKEN_MAX_DECIMALS {
        return invalid(format!("decimals must be 0-{TOKEN_MAX_DECIMALS}"));
    }
    if token.max_supply < token.total_supply {
        return invalid("max supply must be at least the total supply".into());
    }
    Ok(())
}

/// The node's record of `token`; `None` means it was never issued.
pub fn existing_token(
    token: Option<TokenInfo>,
    standard: &TokenStandard,
) -> Result<TokenInfo, PreflightError> {
    token.ok_or(PreflightError::UnknownToken(*standard))
}

pub fn check_token_owner(token: &TokenInfo, address: &Address) -> Result<(), PreflightError> {
    if token.owner.as_ref() != Some(address) {
        return Err(PreflightError::NotTokenOwner(token.token_standard));
    }
    Ok(())
}

pub fn check_mintable(token: &TokenInfo) -> Result<(), PreflightError> {
    if !token.is_mintable {
        return Err(PreflightError::NotMintable(token.token_standard));
    }
    Ok(())
}

pub fn check_burnable(token: &TokenInfo) -> Result<(), PreflightError> {
    if !token.is_burnable {
        return Err(PreflightError::NotBurnable(token.token_standard));
    }
    Ok(())
}

pub fn check_pillar_name(name: &str) -> Result<(), PreflightError> {
    let len = name.chars().count();
    if !(PILLAR_NAME_MIN_LEN..=PILLAR_NAME_MAX_LEN).contains(&len) {
        return Err(PreflightError::InvalidArgument(format!(
            "pillar name must be between {PILLAR_NAME_MIN_LEN} and {PILLAR_NAME_MAX_LEN} characters"
        )));
    }
    let pattern = Regex::new(PILLAR_NAME_PATTERN)
        .map_err(|e| PreflightError::InvalidArgument(e.to_string()))?;
    if !pattern.is_match(name) {
        return Err(PreflightError::InvalidArgument(
            "invalid pillar name: must be alphanumeric with optional -._+ separators".into(),
        ));
    }
    Ok(())
}

/// A fusion can be cancelled once the frontier momentum reaches its expiration height.
pub fn check_fusion_cancellable(
    entry: &FusionEntry,
    momentum_height: u64,
) -> Result<(), PreflightError> {
    if entry.expiration_height > momentum_height {
        return Err(PreflightError::TooEarly(format!(
            "fusion entry {} can be cancelled in {} momentum(s)",
            entry.id,
            entry.expiration_height - momentum_height
        )));
    }
    Ok(())
}

/// A stake can be revoked once its expiration time has passed.
pub fn check_stake_revocable(entry: &StakeEntry, now: i64) -> Result<(), PreflightError> {
    if entry.expiration_timestamp > now {
        let remaining = u64::try_from(entry.expiration_timestamp - now).unwrap_or(u64::MAX);
        return Err(PreflightError::TooEarly(format!(
            "stake entry {} can be revoked in {}",
            entry.id,
            format_duration(remaining)
        )));
    }
    Ok(())
}

/// Only the owner can revoke a pillar, and only inside its revocation window.
pub fn check_pillar_revocable(pillar: &PillarInfo, address: &Address) -> Result<(), PreflightError> {
    if pillar.owner_address != *address {
        return Err(PreflightError::InvalidArgument(format!(
            "pillar {} is owned by {}",
            pillar.name, pillar.owner_address
        )));
    }
    if !pillar.is_revocable {
        return Err(PreflightError::TooEarly(format!(
            "pillar {} can be revoked in {}",
            pillar.name,
            format_duration(u64::try_from(pillar.revoke_cooldown).unwrap_or(0))
        )));
    }
    Ok(())
}

pub fn check_sentinel_revocable(sentinel: &SentinelInfo) -> Result<(), PreflightError> {
    if !sentinel.is_revocable {
        return Err(PreflightError::TooEarly(format!(
            "sentinel can be revoked in {}",
            format_duration(u64::try_from(sentinel.revoke_cooldown).unwrap_or(0))
        )));
    }
    Ok(())
}

/// QSR still to deposit before a registration, given what is already deposited.
pub fn qsr_shortfall(deposited: Amount, required: Amount) -> Amount {
    Amount::new(required.raw().saturating_sub(deposited.raw()))
}
