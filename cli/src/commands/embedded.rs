//! Commands that call the embedded contracts.

use anyhow::{bail, Result};
use znn_rpc::{FusionEntry, NodeClient, StakeEntry, TokenInfo};
use znn_transactions::embedded::token::NewToken;
use znn_transactions::{embedded, TransactionDraft};
use znn_types::params::{
    PILLAR_REGISTER_QSR, PILLAR_REGISTER_ZNN, SENTINEL_REGISTER_QSR, SENTINEL_REGISTER_ZNN,
    TOKEN_ISSUE_FEE_ZNN,
};
use znn_types::{Address, Amount, Hash, TokenStandard, COIN_DECIMALS, ONE_QSR, ONE_ZNN};
use znn_utils::unix_now;

use crate::args::{PillarCommand, PlasmaCommand, SentinelCommand, StakeCommand, TokenCommand};
use crate::context::{CommandContext, Session};
use crate::output;
use crate::preflight::{self, PreflightError};

/// Page size when searching fusion and stake entries.
const ENTRY_PAGE_SIZE: u32 = 25;

pub async fn plasma(ctx: &CommandContext, command: PlasmaCommand) -> Result<()> {
    match command {
        PlasmaCommand::Get { address: Some(address) } => {
            let address: Address = address.parse()?;
            show_plasma(&ctx.client()?, address).await
        }
        PlasmaCommand::Get { address: None } => {
            let session = ctx.session()?;
            show_plasma(session.client(), session.address).await
        }
        PlasmaCommand::Fuse {
            beneficiary,
            amount,
        } => {
            let beneficiary: Address = beneficiary.parse()?;
            let amount = Amount::parse(&amount, COIN_DECIMALS)?;
            preflight::check_fuse_amount(amount)?;
            let session = ctx.session()?;
            ensure_funds(&session, &TokenStandard::QSR, amount).await?;
            println!(
                "Fusing {} for {beneficiary}",
                output::token_amount(amount, COIN_DECIMALS, &TokenStandard::QSR)
            );
            finish(&session, embedded::plasma::fuse(beneficiary, amount)).await
        }
        PlasmaCommand::Cancel { id } => {
            let id: Hash = id.parse()?;
            let session = ctx.session()?;
            let entry = find_fusion(session.client(), &session.address, &id).await?;
            let momentum = session.client().momentum().await?;
            preflight::check_fusion_cancellable(&entry, momentum.height)?;
            println!(
                "Cancelling fusion {id} of {}",
                output::token_amount(entry.qsr_amount, COIN_DECIMALS, &TokenStandard::QSR)
            );
            finish(&session, embedded::plasma::cancel_fuse(id)).await
        }
    }
}

pub async fn stake(ctx: &CommandContext, command: StakeCommand) -> Result<()> {
    match command {
        StakeCommand::Register { amount, months } => {
            let amount = Amount::parse(&amount, COIN_DECIMALS)?;
            preflight::check_stake(amount, months)?;
            let session = ctx.session()?;
            ensure_funds(&session, &TokenStandard::ZNN, amount).await?;
            println!(
                "Staking {} for {months} month(s)",
                output::token_amount(amount, COIN_DECIMALS, &TokenStandard::ZNN)
            );
            finish(&session, embedded::stake::stake(months, amount)?).await
        }
        StakeCommand::Revoke { id } => {
            let id: Hash = id.parse()?;
            let session = ctx.session()?;
            let entry = find_stake(session.client(), &session.address, &id).await?;
            let now = i64::try_from(unix_now()).unwrap_or(i64::MAX);
            preflight::check_stake_revocable(&entry, now)?;
            println!(
                "Revoking stake {id} of {}",
                output::token_amount(entry.amount, COIN_DECIMALS, &TokenStandard::ZNN)
            );
            finish(&session, embedded::stake::cancel(id)).await
        }
        StakeCommand::Collect => {
            let session = ctx.session()?;
            let reward = session
                .client()
                .uncollected_stake_reward(&session.address)
                .await?;
            if reward.is_empty() {
                println!("Nothing to collect");
                return Ok(());
            }
            println!(
                "Collecting {} and {}",
                output::token_amount(reward.znn_amount, COIN_DECIMALS, &TokenStandard::ZNN),
                output::token_amount(reward.qsr_amount, COIN_DECIMALS, &TokenStandard::QSR)
            );
            finish(&session, embedded::stake::collect_reward()).await
        }
    }
}

pub async fn pillar(ctx: &CommandContext, command: PillarCommand) -> Result<()> {
    match command {
        PillarCommand::Register {
            name,
            producer_address,
            reward_address,
        } => {
            preflight::check_pillar_name(&name)?;
            let producer: Address = producer_address.parse()?;
            let reward: Address = reward_address.parse()?;
            let session = ctx.session()?;
            if session.client().pillar_by_name(&name).await?.is_some() {
                bail!("pillar name '{name}' is already registered");
            }
            let deposited = session
                .client()
                .pillar_deposited_qsr(&session.address)
                .await?;
            println!("Registering pillar {name}");
            register_with_collateral(
                &session,
                Amount::new(PILLAR_REGISTER_ZNN * ONE_ZNN),
                preflight::qsr_shortfall(deposited, Amount::new(PILLAR_REGISTER_QSR * ONE_QSR)),
                embedded::pillar::deposit_qsr,
                embedded::pillar::register(&name, producer, reward),
            )
            .await
        }
        PillarCommand::Revoke { name } => {
            let session = ctx.session()?;
            let Some(pillar) = session.client().pillar_by_name(&name).await? else {
                return Err(PreflightError::NotFound(format!("pillar {name} not found")).into());
            };
            preflight::check_pillar_revocable(&pillar, &session.address)?;
            println!("Revoking pillar {name}");
            finish(&session, embedded::pillar::revoke(&name)).await
        }
        PillarCommand::WithdrawQsr => {
            let session = ctx.session()?;
            let deposited = session
                .client()
                .pillar_deposited_qsr(&session.address)
                .await?;
            if deposited.is_zero() {
                println!("No QSR available for withdrawal");
                return Ok(());
            }
            println!(
                "Withdrawing {}",
                output::token_amount(deposited, COIN_DECIMALS, &TokenStandard::QSR)
            );
            finish(&session, embedded::pillar::withdraw_qsr()).await
        }
        PillarCommand::Delegate { name } => {
            let draft = embedded::pillar::delegate(&name)?;
            let session = ctx.session()?;
            finish(&session, draft).await
        }
        PillarCommand::Undelegate => {
            let session = ctx.session()?;
            finish(&session, embedded::pillar::undelegate()).await
        }
    }
}

pub async fn sentinel(ctx: &CommandContext, command: SentinelCommand) -> Result<()> {
    let session = ctx.session()?;
    let existing = session.client().sentinel_by_owner(&session.address).await?;
    match command {
        SentinelCommand::Register => {
            if existing.is_some() {
                bail!("a sentinel is already registered for {}", session.address);
            }
            let deposited = session
                .client()
                .sentinel_deposited_qsr(&session.address)
                .await?;
            println!("Registering sentinel");
            register_with_collateral(
                &session,
                Amount::new(SENTINEL_REGISTER_ZNN * ONE_ZNN),
                preflight::qsr_shortfall(deposited, Amount::new(SENTINEL_REGISTER_QSR * ONE_QSR)),
                embedded::sentinel::deposit_qsr,
                embedded::sentinel::register(),
            )
            .await
        }
        SentinelCommand::Revoke => {
            let Some(sentinel) = existing else {
                return Err(PreflightError::NotFound(format!(
                    "no sentinel found for {}",
                    session.address
                ))
                .into());
            };
            preflight::check_sentinel_revocable(&sentinel)?;
            println!("Revoking sentinel");
            finish(&session, embedded::sentinel::revoke()).await
        }
    }
}

pub async fn token(ctx: &CommandContext, command: TokenCommand) -> Result<()> {
    match command {
        TokenCommand::Issue {
            name,
            symbol,
            domain,
            total_supply,
            max_supply,
            decimals,
            mintable,
            burnable,
            utility,
        } => {
            let new_token = NewToken {
                name,
                symbol: symbol.to_uppercase(),
                domain,
                total_supply: Amount::parse(&total_supply, decimals)?,
                max_supply: Amount::parse(&max_supply, decimals)?,
                decimals,
                mintable,
                burnable,
                utility,
            };
            preflight::check_new_token(&new_token)?;
            let session = ctx.session()?;
            let fee = Amount::new(TOKEN_ISSUE_FEE_ZNN * ONE_ZNN);
            ensure_funds(&session, &TokenStandard::ZNN, fee).await?;
            println!(
                "Issuing token {} ({}) with {} of {} for {}",
                new_token.name,
                new_token.symbol,
                new_token.total_supply.format(decimals),
                new_token.max_supply.format(decimals),
                output::token_amount(fee, COIN_DECIMALS, &TokenStandard::ZNN)
            );
            finish(&session, embedded::token::issue(&new_token)).await
        }
        TokenCommand::Mint {
            token,
            amount,
            receive_address,
        } => {
            let standard = TokenStandard::parse_identifier(&token)?;
            let receiver: Address = receive_address.parse()?;
            let session = ctx.session()?;
            let info = owned_token(&session, &standard).await?;
            preflight::check_mintable(&info)?;
            let amount = Amount::parse(&amount, info.decimals)?;
            println!(
                "Minting {} to {receiver}",
                output::token_amount(amount, info.decimals, &standard)
            );
            finish(&session, embedded::token::mint(standard, amount, receiver)).await
        }
        TokenCommand::TransferOwnership { token, new_owner } => {
            let standard = TokenStandard::parse_identifier(&token)?;
            let new_owner: Address = new_owner.parse()?;
            let session = ctx.session()?;
            let info = owned_token(&session, &standard).await?;
            println!("Transferring ownership of {standard} to {new_owner}");
            let draft =
                embedded::token::update(standard, new_owner, info.is_mintable, info.is_burnable);
            finish(&session, draft).await
        }
        TokenCommand::DisableMint { token } => {
            let standard = TokenStandard::parse_identifier(&token)?;
            let session = ctx.session()?;
            let info = owned_token(&session, &standard).await?;
            preflight::check_mintable(&info)?;
            println!("Disabling minting of {standard}");
            let draft =
                embedded::token::update(standard, session.address, false, info.is_burnable);
            finish(&session, draft).await
        }
        TokenCommand::Burn { token, amount } => {
            let standard = TokenStandard::parse_identifier(&token)?;
            let session = ctx.session()?;
            let found = session.client().token_by_standard(&standard).await?;
            let info = preflight::existing_token(found, &standard)?;
            preflight::check_burnable(&info)?;
            let amount = Amount::parse(&amount, info.decimals)?;
            ensure_funds(&session, &standard, amount).await?;
            println!("Burning {}", output::token_amount(amount, info.decimals, &standard));
            finish(&session, embedded::token::burn(standard, amount)).await
        }
    }
}

async fn show_plasma(client: &NodeClient, address: Address) -> Result<()> {
    let info = client.plasma_info(&address).await?;
    println!(
        "{address} has {} / {} plasma with {} fused",
        info.current_plasma,
        info.max_plasma,
        output::token_amount(info.qsr_amount, COIN_DECIMALS, &TokenStandard::QSR)
    );
    Ok(())
}

/// The token as the node knows it, provided the session account owns it.
async fn owned_token(session: &Session, standard: &TokenStandard) -> Result<TokenInfo> {
    let found = session.client().token_by_standard(standard).await?;
    let info = preflight::existing_token(found, standard)?;
    preflight::check_token_owner(&info, &session.address)?;
    Ok(info)
}

async fn find_fusion(client: &NodeClient, address: &Address, id: &Hash) -> Result<FusionEntry> {
    let mut page_index = 0;
    loop {
        let page = client
            .fusion_entries(address, page_index, ENTRY_PAGE_SIZE)
            .await?;
        if let Some(entry) = page.list.iter().find(|entry| entry.id == *id) {
            return Ok(entry.clone());
        }
        if page.list.len() < ENTRY_PAGE_SIZE as usize {
            break;
        }
        page_index += 1;
    }
    Err(PreflightError::NotFound(format!("no fusion entry {id} found for {address}")).into())
}

async fn find_stake(client: &NodeClient, address: &Address, id: &Hash) -> Result<StakeEntry> {
    let mut page_index = 0;
    loop {
        let page = client
            .stake_entries(address, page_index, ENTRY_PAGE_SIZE)
            .await?;
        if let Some(entry) = page.list.iter().find(|entry| entry.id == *id) {
            return Ok(entry.clone());
        }
        if page.list.len() < ENTRY_PAGE_SIZE as usize {
            break;
        }
        page_index += 1;
    }
    Err(PreflightError::NotFound(format!("no stake entry {id} found for {address}")).into())
}

/// Deposit whatever QSR collateral is missing, then register. The account must hold
/// the ZNN collateral and the QSR still to deposit.
async fn register_with_collateral(
    session: &Session,
    znn: Amount,
    qsr_missing: Amount,
    deposit: fn(Amount) -> TransactionDraft,
    register: TransactionDraft,
) -> Result<()> {
    let info = session.client().account_info(&session.address).await?;
    preflight::check_funds(&info, &TokenStandard::ZNN, znn)?;
    preflight::check_funds(&info, &TokenStandard::QSR, qsr_missing)?;
    session.ensure_plasma().await?;

    let mut drafts = Vec::with_capacity(2);
    if !qsr_missing.is_zero() {
        println!(
            "Depositing {}",
            output::token_amount(qsr_missing, COIN_DECIMALS, &TokenStandard::QSR)
        );
        drafts.push(deposit(qsr_missing));
    }
    drafts.push(register);
    for published in session.submit_all(drafts).await? {
        println!("Done: {}", output::receipt(&published));
    }
    Ok(())
}

async fn ensure_funds(session: &Session, token: &TokenStandard, amount: Amount) -> Result<()> {
    let info = session.client().account_info(&session.address).await?;
    preflight::check_funds(&info, token, amount)?;
    Ok(())
}

async fn finish(session: &Session, draft: TransactionDraft) -> Result<()> {
    let published = session.submit(draft).await?;
    println!("Done: {}", output::receipt(&published));
    Ok(())
}
