use anyhow::Result;

use crate::args::WalletCommand;
use crate::context::CommandContext;

pub fn run(ctx: &CommandContext, command: WalletCommand) -> Result<()> {
    let manager = ctx.manager();
    match command {
        WalletCommand::List => {
            let names = manager.list()?;
            if names.is_empty() {
                println!("No keystores in {}", manager.wallet_dir().display());
            } else {
                println!("Available keystores:");
                for name in names {
                    println!("  {name}");
                }
            }
        }
        WalletCommand::CreateNew { passphrase, name } => {
            let (keystore, path) = manager.create_new(&passphrase, name.as_deref())?;
            println!("Keystore created: {}", path.display());
            println!("Base address: {}", keystore.base_address()?);
            println!("Back up the mnemonic with `wallet dump-mnemonic` before funding it");
        }
        WalletCommand::CreateFromMnemonic {
            mnemonic,
            passphrase,
            name,
        } => {
            let (keystore, path) =
                manager.create_from_mnemonic(&mnemonic, &passphrase, name.as_deref())?;
            println!("Keystore imported: {}", path.display());
            println!("Base address: {}", keystore.base_address()?);
        }
        WalletCommand::DeriveAddresses { start, end } => {
            let (_, keystore) = ctx.open_keystore()?;
            for (index, address) in (start..=end).zip(keystore.derive_addresses(start, end)?) {
                println!("  {index}\t{address}");
            }
        }
        WalletCommand::DumpMnemonic => {
            let (_, keystore) = ctx.open_keystore()?;
            println!("Mnemonic: {}", keystore.mnemonic());
        }
        WalletCommand::Export { destination } => {
            let name = manager.resolve_name(ctx.config.wallet.default_keystore.as_deref())?;
            let target = manager.export(&name, &destination)?;
            println!("Keystore {name} exported to {}", target.display());
        }
    }
    Ok(())
}
