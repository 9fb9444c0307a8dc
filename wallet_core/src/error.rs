use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("no keystores found in {0}")]
    NoKeyStores(PathBuf),

    #[error("multiple keystores found ({}), select one with --keystore", .0.join(", "))]
    MultipleKeyStores(Vec<String>),

    #[error("keystore not found: {0}")]
    NotFound(String),

    #[error("keystore already exists: {0}")]
    AlreadyExists(String),

    #[error("invalid keystore name: {0}")]
    InvalidName(String),

    #[error("wrong passphrase or corrupted keystore")]
    WrongPassphrase,

    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("key error: {0}")]
    Key(String),

    #[error("invalid keystore file: {0}")]
    Format(String),

    #[error("invalid index range {start}..={end}")]
    InvalidRange { start: u32, end: u32 },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<znn_crypto::MnemonicError> for WalletError {
    fn from(e: znn_crypto::MnemonicError) -> Self {
        match e {
            znn_crypto::MnemonicError::InvalidMnemonic(m) => WalletError::InvalidMnemonic(m),
            other => WalletError::Key(other.to_string()),
        }
    }
}
