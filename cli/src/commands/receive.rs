use std::collections::HashSet;

use anyhow::{bail, Result};
use znn_rpc::UnreceivedBlockList;
use znn_transactions::TransactionDraft;
use znn_types::Hash;

use crate::context::CommandContext;
use crate::output;

/// Blocks fetched, and received, per round of `receive-all`.
const RECEIVE_BATCH: u32 = 5;

pub async fn receive(ctx: &CommandContext, block_hash: &str) -> Result<()> {
    let hash: Hash = block_hash.parse()?;
    let session = ctx.session()?;
    let published = session.submit(TransactionDraft::receive(hash)).await?;
    println!("Received {hash}: {}", output::receipt(&published));
    Ok(())
}

/// What one round of `receive-all` should do with a page of unreceived blocks.
#[derive(Debug, PartialEq, Eq)]
enum Round {
    Receive(Vec<Hash>),
    Done,
    /// Every listed block was already received this run; the node still counts this
    /// many as pending.
    Stalled(u64),
}

fn plan_round(page: &UnreceivedBlockList, seen: &mut HashSet<Hash>) -> Round {
    let fresh: Vec<Hash> = page
        .list
        .iter()
        .map(|block| block.hash)
        .filter(|hash| seen.insert(*hash))
        .collect();
    if !fresh.is_empty() {
        return Round::Receive(fresh);
    }
    let pending = page.count.max(page.list.len() as u64);
    if pending == 0 && !page.more {
        Round::Done
    } else {
        Round::Stalled(pending)
    }
}

fn summary(received: usize, pending: u64) -> String {
    match (received, pending) {
        (0, 0) => "Nothing to receive".to_string(),
        (n, 0) => format!("Received {n} block(s)"),
        (n, p) => format!(
            "Received {n} block(s); {p} block(s) still listed as unreceived, run receive-all again once the node confirms them"
        ),
    }
}

pub async fn receive_all(ctx: &CommandContext) -> Result<()> {
    let session = ctx.session()?;
    session.ensure_plasma().await?;

    let mut seen = HashSet::new();
    let mut received = 0usize;
    let pending = loop {
        let page = session
            .client()
            .unreceived_blocks(&session.address, 0, RECEIVE_BATCH)
            .await?;
        let fresh = match plan_round(&page, &mut seen) {
            Round::Receive(fresh) => fresh,
            Round::Done => break 0,
            Round::Stalled(pending) => {
                tracing::warn!(pending, "node still lists received blocks as unreceived");
                break pending;
            }
        };
        tracing::debug!(count = fresh.len(), remaining = page.count, "receiving batch");

        let drafts = fresh.into_iter().map(TransactionDraft::receive).collect();
        match session.submit_all(drafts).await {
            Ok(published) => received += published.len(),
            Err(e) => {
                received += e.published.len();
                bail!("{} (received {received} block(s) in total)", e.error);
            }
        }
    };

    println!("{}", summary(received, pending));
    Ok(())
}

pub async fn unreceived(ctx: &CommandContext) -> Result<()> {
    let session = ctx.session()?;
    let page = session
        .client()
        .unreceived_blocks(&session.address, 0, RECEIVE_BATCH)
        .await?;
    if page.list.is_empty() {
        println!("Nothing to receive");
        return Ok(());
    }

    println!("You have {} unreceived block(s)", page.count);
    for block in &page.list {
        println!(
            "  {} from {}: {}",
            block.hash,
            block.address,
            output::described_amount(block.amount, block.token_info.as_ref(), &block.token_standard)
        );
    }
    if page.more {
        println!("  ... and more");
    }
    Ok(())
}
