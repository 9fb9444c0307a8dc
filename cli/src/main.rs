//! znn-cli: command-line wallet for the Zenon Network of Momentum.

mod args;
mod commands;
mod config;
mod context;
mod output;
mod preflight;
mod prompt;

use clap::Parser;

use crate::args::Cli;
use crate::config::CliConfig;
use crate::context::CommandContext;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load(cli.global.config.as_deref())?.with_overrides(&cli.global);
    znn_utils::init_tracing(config.log_level());
    tracing::debug!(url = %config.node.url, wallet_dir = %config.wallet.wallet_dir.display(), "configuration resolved");

    let ctx = CommandContext::new(config, cli.global.passphrase, cli.global.no_pow);
    commands::run(cli.command, &ctx).await
}
