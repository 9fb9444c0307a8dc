//! What a command needs to run: the merged configuration, and on demand an unlocked
//! account with a pipeline to submit through.

use std::time::Duration;

use anyhow::{Context, Result};
use znn_rpc::NodeClient;
use znn_transactions::{
    BatchError, BlockSigner, Pipeline, PipelineOptions, PublishedBlock, TransactionDraft,
};
use znn_types::params::MAINNET_CHAIN_IDENTIFIER;
use znn_types::{Address, KeyPair};
use znn_wallet_core::{KeyStore, KeyStoreManager};
use znn_work::WorkGenerator;

use crate::config::CliConfig;
use crate::preflight;
use crate::prompt;

pub struct CommandContext {
    pub config: CliConfig,
    passphrase: Option<String>,
    no_pow: bool,
}

impl CommandContext {
    pub fn new(config: CliConfig, passphrase: Option<String>, no_pow: bool) -> Self {
        Self {
            config,
            passphrase,
            no_pow,
        }
    }

    pub fn manager(&self) -> KeyStoreManager {
        KeyStoreManager::new(&self.config.wallet.wallet_dir)
    }

    pub fn client(&self) -> Result<NodeClient> {
        let timeout = Duration::from_secs(self.config.node.timeout_secs);
        NodeClient::with_timeout(&self.config.node.url, timeout)
            .with_context(|| format!("cannot use node url {}", self.config.node.url))
    }

    /// The passphrase from the command line, or from a prompt.
    pub fn passphrase(&self) -> Result<String> {
        match &self.passphrase {
            Some(passphrase) => Ok(passphrase.clone()),
            None => prompt::passphrase("Passphrase: "),
        }
    }

    /// Decrypt the selected keystore. Returns its name too.
    pub fn open_keystore(&self) -> Result<(String, KeyStore)> {
        let manager = self.manager();
        let name = manager.resolve_name(self.config.wallet.default_keystore.as_deref())?;
        let passphrase = self.passphrase()?;
        let keystore = manager
            .read(&passphrase, &name)
            .with_context(|| format!("cannot open keystore {name}"))?;
        Ok((name, keystore))
    }

    /// Unlock the selected account and connect a pipeline to the node.
    pub fn session(&self) -> Result<Session> {
        let (name, keystore) = self.open_keystore()?;
        let index = self.config.wallet.default_index;
        let keypair = keystore.keypair(index)?;
        let address = keypair.address();
        tracing::debug!(keystore = %name, index, %address, "account unlocked");

        let pipeline = Pipeline::new(self.client()?, WorkGenerator).with_options(PipelineOptions {
            required_plasma: self.config.pipeline.required_plasma,
            default_difficulty: self.config.pipeline.default_pow_difficulty,
            chain_identifier: MAINNET_CHAIN_IDENTIFIER,
        });

        Ok(Session {
            pipeline,
            keypair,
            address,
            no_pow: self.no_pow,
            timeout: self.config.pipeline.submit_timeout_secs.map(Duration::from_secs),
        })
    }
}

/// An unlocked account bound to a node.
pub struct Session {
    pipeline: Pipeline<NodeClient, WorkGenerator>,
    keypair: KeyPair,
    pub address: Address,
    no_pow: bool,
    timeout: Option<Duration>,
}

impl Session {
    pub fn client(&self) -> &NodeClient {
        self.pipeline.ledger()
    }

    /// With `--no-pow`, refuse to start unless plasma covers the block.
    pub async fn ensure_plasma(&self) -> Result<()> {
        if !self.no_pow {
            return Ok(());
        }
        let required = self.pipeline.options().plasma_requirement();
        let plasma = self.client().plasma_info(&self.address).await?;
        preflight::check_plasma(&plasma, required)?;
        Ok(())
    }

    pub async fn submit(&self, draft: TransactionDraft) -> Result<PublishedBlock> {
        self.ensure_plasma().await?;
        let published = match self.timeout {
            Some(timeout) => {
                self.pipeline
                    .submit_with_timeout(&self.keypair, draft, timeout)
                    .await?
            }
            None => self.pipeline.submit(&self.keypair, draft).await?,
        };
        Ok(published)
    }

    /// Submit in order, stopping at the first failure. The configured timeout
    /// bounds every block of the batch.
    pub async fn submit_all(
        &self,
        drafts: Vec<TransactionDraft>,
    ) -> Result<Vec<PublishedBlock>, BatchError> {
        match self.timeout {
            Some(timeout) => {
                self.pipeline
                    .submit_all_with_timeout(&self.keypair, drafts, timeout)
                    .await
            }
            None => self.pipeline.submit_all(&self.keypair, drafts).await,
        }
    }
}
