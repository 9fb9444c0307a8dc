//! One module per command group. Each command prints its result on stdout; errors
//! bubble up to `main`.

mod embedded;
mod query;
mod receive;
mod send;
mod version;
mod wallet;

use anyhow::Result;

use crate::args::Command;
use crate::context::CommandContext;

pub async fn run(command: Command, ctx: &CommandContext) -> Result<()> {
    match command {
        Command::Send { to, amount, token } => send::run(ctx, &to, &amount, &token).await,
        Command::Receive { block_hash } => receive::receive(ctx, &block_hash).await,
        Command::ReceiveAll => receive::receive_all(ctx).await,
        Command::Unreceived => receive::unreceived(ctx).await,
        Command::Balance => query::balance(ctx).await,
        Command::FrontierMomentum => query::frontier_momentum(ctx).await,
        Command::Plasma(command) => embedded::plasma(ctx, command).await,
        Command::Stake(command) => embedded::stake(ctx, command).await,
        Command::Pillar(command) => embedded::pillar(ctx, command).await,
        Command::Sentinel(command) => embedded::sentinel(ctx, command).await,
        Command::Token(command) => embedded::token(ctx, command).await,
        Command::Wallet(command) => wallet::run(ctx, command),
        Command::Version => version::run(ctx).await,
    }
}
