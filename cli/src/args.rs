//! Command-line surface.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "znn-cli",
    version,
    about = "Command-line wallet for the Zenon Network of Momentum"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Flags accepted by every command. Each one overrides the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Path to a TOML configuration file (default: ~/.znn/cli-config.toml).
    #[arg(long, global = true, env = "ZNN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Node JSON-RPC endpoint.
    #[arg(short = 'u', long, global = true, env = "ZNN_URL")]
    pub url: Option<String>,

    /// Keystore to use; may be omitted when the wallet directory holds exactly one.
    #[arg(short = 'k', long, global = true, env = "ZNN_KEYSTORE")]
    pub keystore: Option<String>,

    /// Keystore passphrase; prompted for when omitted.
    #[arg(
        short = 'p',
        long,
        global = true,
        env = "ZNN_PASSPHRASE",
        hide_env_values = true
    )]
    pub passphrase: Option<String>,

    /// Account index within the keystore.
    #[arg(short = 'i', long, global = true, env = "ZNN_INDEX")]
    pub index: Option<u32>,

    /// Debug logging on stderr.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Refuse to compute proof-of-work; fail when the account lacks plasma.
    #[arg(long, global = true)]
    pub no_pow: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Send tokens to an address.
    Send {
        /// Destination address (z1...).
        to: String,
        /// Amount in whole units, e.g. 10.5.
        amount: String,
        /// ZNN, QSR or a zts1... token standard.
        token: String,
    },

    /// Receive one unreceived block by its hash.
    Receive { block_hash: String },

    /// Receive every unreceived block, in batches of five.
    ReceiveAll,

    /// List unreceived blocks.
    Unreceived,

    /// Show token balances.
    Balance,

    /// Show the latest momentum.
    FrontierMomentum,

    /// Plasma queries and fusions.
    #[command(subcommand)]
    Plasma(PlasmaCommand),

    /// ZNN staking.
    #[command(subcommand)]
    Stake(StakeCommand),

    /// Pillar registration and delegation.
    #[command(subcommand)]
    Pillar(PillarCommand),

    /// Sentinel registration.
    #[command(subcommand)]
    Sentinel(SentinelCommand),

    /// Token operations.
    #[command(subcommand)]
    Token(TokenCommand),

    /// Keystore management.
    #[command(subcommand)]
    Wallet(WalletCommand),

    /// Print version information.
    Version,
}

#[derive(Subcommand, Debug)]
pub enum PlasmaCommand {
    /// Show plasma for an address (default: the selected account).
    Get { address: Option<String> },
    /// Fuse QSR to generate plasma for a beneficiary.
    Fuse { beneficiary: String, amount: String },
    /// Cancel a fusion entry and return its QSR.
    Cancel { id: String },
}

#[derive(Subcommand, Debug)]
pub enum StakeCommand {
    /// Stake ZNN for 1 to 12 months.
    Register { amount: String, months: i64 },
    /// Revoke an expired stake entry.
    Revoke { id: String },
    /// Collect staking rewards.
    Collect,
}

#[derive(Subcommand, Debug)]
pub enum PillarCommand {
    /// Register a pillar; needs 15,000 ZNN and 150,000 QSR.
    Register {
        name: String,
        producer_address: String,
        reward_address: String,
    },
    /// Revoke a pillar you own.
    Revoke { name: String },
    /// Withdraw QSR deposited for a registration.
    WithdrawQsr,
    /// Delegate to a pillar by name.
    Delegate { name: String },
    /// Remove the current delegation.
    Undelegate,
}

#[derive(Subcommand, Debug)]
pub enum SentinelCommand {
    /// Register a sentinel; needs 5,000 ZNN and 50,000 QSR.
    Register,
    /// Revoke your sentinel.
    Revoke,
}

#[derive(Subcommand, Debug)]
pub enum TokenCommand {
    /// Issue a new token for a fee of 1 ZNN.
    Issue {
        /// 1-40 characters.
        name: String,
        /// 1-10 characters, uppercased.
        symbol: String,
        /// Website, at most 128 characters.
        domain: String,
        total_supply: String,
        max_supply: String,
        /// 0-18.
        decimals: u8,
        #[arg(action = ArgAction::Set)]
        mintable: bool,
        #[arg(action = ArgAction::Set)]
        burnable: bool,
        #[arg(action = ArgAction::Set)]
        utility: bool,
    },
    /// Mint more of a token you own.
    Mint {
        token: String,
        amount: String,
        receive_address: String,
    },
    /// Hand a token you own to a new owner.
    TransferOwnership { token: String, new_owner: String },
    /// Permanently disable minting of a token you own.
    DisableMint { token: String },
    /// Burn an amount of a token.
    Burn { token: String, amount: String },
}

#[derive(Subcommand, Debug)]
pub enum WalletCommand {
    /// List keystores in the wallet directory.
    List,
    /// Generate a new keystore.
    CreateNew {
        passphrase: String,
        name: Option<String>,
    },
    /// Import a keystore from a mnemonic.
    CreateFromMnemonic {
        mnemonic: String,
        passphrase: String,
        name: Option<String>,
    },
    /// Show addresses for account indices start..=end.
    DeriveAddresses { start: u32, end: u32 },
    /// Print the keystore's mnemonic.
    DumpMnemonic,
    /// Copy the keystore file somewhere else.
    Export { destination: PathBuf },
}
