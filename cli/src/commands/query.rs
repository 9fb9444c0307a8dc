use anyhow::Result;
use znn_utils::{format_duration, unix_now};

use crate::context::CommandContext;
use crate::output;

pub async fn balance(ctx: &CommandContext) -> Result<()> {
    let session = ctx.session()?;
    let info = session.client().account_info(&session.address).await?;

    println!(
        "Balance for account-chain {} having height {}",
        info.address, info.account_height
    );
    if info.balance_info_map.is_empty() {
        println!("  No coins or tokens were found");
        return Ok(());
    }
    for (token, entry) in &info.balance_info_map {
        let amount = output::described_amount(entry.balance, entry.token_info.as_ref(), token);
        if token.symbol().is_some() {
            println!("  {amount}");
        } else {
            println!("  {amount} ({token})");
        }
    }
    Ok(())
}

pub async fn frontier_momentum(ctx: &CommandContext) -> Result<()> {
    let momentum = ctx.client()?.momentum().await?;
    println!("Momentum height: {}", momentum.height);
    println!("Momentum hash: {}", momentum.hash);
    if let Some(producer) = momentum.producer {
        println!("Momentum producer: {producer}");
    }
    if momentum.timestamp > 0 {
        let age = unix_now().saturating_sub(momentum.timestamp);
        println!(
            "Momentum timestamp: {} ({} ago)",
            momentum.timestamp,
            format_duration(age)
        );
    }
    Ok(())
}
