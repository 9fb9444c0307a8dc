//! The wallet directory: one keystore file per wallet, named by base address unless
//! the user picks a name.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::WalletError;
use crate::keystore::{EncryptedKeyStore, KdfParams, KeyStore};

pub struct KeyStoreManager {
    wallet_dir: PathBuf,
    kdf: KdfParams,
}

impl KeyStoreManager {
    pub fn new(wallet_dir: impl Into<PathBuf>) -> Self {
        Self {
            wallet_dir: wallet_dir.into(),
            kdf: KdfParams::ZENON,
        }
    }

    /// Use non-standard Argon2 costs. Keystores written this way only open with the
    /// same parameters.
    pub fn with_kdf(mut self, kdf: KdfParams) -> Self {
        self.kdf = kdf;
        self
    }

    pub fn wallet_dir(&self) -> &Path {
        &self.wallet_dir
    }

    /// Keystore names in the wallet directory, sorted. A missing directory has none.
    pub fn list(&self) -> Result<Vec<String>, WalletError> {
        let entries = match fs::read_dir(&self.wallet_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if !name.starts_with('.') {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Generate a new wallet and store it under `name`, or its base address.
    pub fn create_new(
        &self,
        passphrase: &str,
        name: Option<&str>,
    ) -> Result<(KeyStore, PathBuf), WalletError> {
        let keystore = KeyStore::generate()?;
        let path = self.save(&keystore, passphrase, name)?;
        Ok((keystore, path))
    }

    /// Import a wallet from its mnemonic.
    pub fn create_from_mnemonic(
        &self,
        mnemonic: &str,
        passphrase: &str,
        name: Option<&str>,
    ) -> Result<(KeyStore, PathBuf), WalletError> {
        let keystore = KeyStore::from_mnemonic(mnemonic)?;
        let path = self.save(&keystore, passphrase, name)?;
        Ok((keystore, path))
    }

    /// Encrypt `keystore` into the wallet directory. Never overwrites.
    pub fn save(
        &self,
        keystore: &KeyStore,
        passphrase: &str,
        name: Option<&str>,
    ) -> Result<PathBuf, WalletError> {
        let file = keystore.encrypt(passphrase, &self.kdf)?;
        let name = match name {
            Some(name) => name.to_string(),
            None => file.base_address.to_string(),
        };
        let path = self.path_of(&name)?;
        if path.exists() {
            return Err(WalletError::AlreadyExists(name));
        }

        self.ensure_dir()?;
        let json = serde_json::to_string_pretty(&file)
            .map_err(|e| WalletError::Format(e.to_string()))?;
        fs::write(&path, json)?;
        tracing::info!(keystore = %name, address = %file.base_address, "keystore written");
        Ok(path)
    }

    /// The stored (still encrypted) keystore called `name`.
    pub fn load_file(&self, name: &str) -> Result<EncryptedKeyStore, WalletError> {
        let path = self.existing_path(name)?;
        let json = fs::read_to_string(&path)?;
        serde_json::from_str(&json).map_err(|e| WalletError::Format(format!("{name}: {e}")))
    }

    /// Unlock the keystore called `name`.
    pub fn read(&self, passphrase: &str, name: &str) -> Result<KeyStore, WalletError> {
        let file = self.load_file(name)?;
        KeyStore::decrypt(&file, passphrase, &self.kdf)
    }

    /// The keystore to use: `requested` if given, else the only one present.
    pub fn resolve_name(&self, requested: Option<&str>) -> Result<String, WalletError> {
        if let Some(name) = requested {
            self.existing_path(name)?;
            return Ok(name.to_string());
        }
        let mut names = self.list()?;
        match names.len() {
            0 => Err(WalletError::NoKeyStores(self.wallet_dir.clone())),
            1 => Ok(names.remove(0)),
            _ => Err(WalletError::MultipleKeyStores(names)),
        }
    }

    /// Copy keystore `name` to `destination`, refusing to overwrite.
    pub fn export(&self, name: &str, destination: &Path) -> Result<PathBuf, WalletError> {
        let source = self.existing_path(name)?;
        let target = if destination.is_dir() {
            destination.join(name)
        } else {
            destination.to_path_buf()
        };
        if target.exists() {
            return Err(WalletError::AlreadyExists(target.display().to_string()));
        }
        fs::copy(&source, &target)?;
        Ok(target)
    }

    fn path_of(&self, name: &str) -> Result<PathBuf, WalletError> {
        let valid = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\\'])
            && !name.starts_with('.');
        if !valid {
            return Err(WalletError::InvalidName(name.to_string()));
        }
        Ok(self.wallet_dir.join(name))
    }

    fn existing_path(&self, name: &str) -> Result<PathBuf, WalletError> {
        let path = self.path_of(name)?;
        if !path.is_file() {
            return Err(WalletError::NotFound(name.to_string()));
        }
        Ok(path)
    }

    fn ensure_dir(&self) -> Result<(), WalletError> {
        fs::create_dir_all(&self.wallet_dir)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.wallet_dir, fs::Permissions::from_mode(0o700))?;
        }
        Ok(())
    }
}
