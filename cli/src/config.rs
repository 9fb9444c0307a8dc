//! CLI configuration with TOML file support.
//!
//! Values come from, lowest precedence first: built-in defaults, the config file,
//! then command-line flags and their `ZNN_*` environment variables.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use znn_rpc::NodeClient;
use znn_types::params::DEFAULT_POW_DIFFICULTY;

use crate::args::GlobalArgs;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config file {path}: {reason}")]
    Invalid { path: PathBuf, reason: String },
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub node: NodeSection,
    pub wallet: WalletSection,
    pub display: DisplaySection,
    pub pipeline: PipelineSection,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSection {
    #[serde(default = "default_url")]
    pub url: String,

    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletSection {
    #[serde(default)]
    pub default_keystore: Option<String>,

    #[serde(default)]
    pub default_index: u32,

    #[serde(default = "default_wallet_dir")]
    pub wallet_dir: PathBuf,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySection {
    #[serde(default)]
    pub verbose: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineSection {
    /// Plasma a block fuses; unset means the protocol minimum.
    #[serde(default)]
    pub required_plasma: Option<u64>,

    #[serde(default = "default_pow_difficulty")]
    pub default_pow_difficulty: u64,

    /// Give up on a submission after this long; unset waits as long as it takes.
    #[serde(default)]
    pub submit_timeout_secs: Option<u64>,
}

fn default_url() -> String {
    NodeClient::DEFAULT_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    NodeClient::DEFAULT_TIMEOUT.as_secs()
}

fn default_wallet_dir() -> PathBuf {
    znn_home().join("wallet")
}

fn default_pow_difficulty() -> u64 {
    DEFAULT_POW_DIFFICULTY
}

/// `~/.znn`, or `.znn` in the working directory when there is no home.
pub fn znn_home() -> PathBuf {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".znn"))
        .unwrap_or_else(|| PathBuf::from(".znn"))
}

pub fn default_config_path() -> PathBuf {
    znn_home().join("cli-config.toml")
}

impl Default for NodeSection {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for WalletSection {
    fn default() -> Self {
        Self {
            default_keystore: None,
            default_index: 0,
            wallet_dir: default_wallet_dir(),
        }
    }
}

impl Default for PipelineSection {
    fn default() -> Self {
        Self {
            required_plasma: None,
            default_pow_difficulty: default_pow_difficulty(),
            submit_timeout_secs: None,
        }
    }
}

impl CliConfig {
    /// Load from `explicit`, or from the default location. A missing default file
    /// means defaults; a missing explicit file is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_toml_file(path),
            None => {
                let path = default_config_path();
                if path.exists() {
                    Self::from_toml_file(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate().map_err(|reason| ConfigError::Invalid {
            path: path.to_path_buf(),
            reason,
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    fn validate(&self) -> Result<(), String> {
        if self.pipeline.required_plasma == Some(0) {
            return Err("pipeline.required_plasma must be greater than zero".into());
        }
        if self.pipeline.default_pow_difficulty == 0 {
            return Err("pipeline.default_pow_difficulty must be greater than zero".into());
        }
        if self.pipeline.submit_timeout_secs == Some(0) {
            return Err("pipeline.submit_timeout_secs must be greater than zero".into());
        }
        if self.node.timeout_secs == 0 {
            return Err("node.timeout_secs must be greater than zero".into());
        }
        Ok(())
    }

    /// Layer command-line flags over the file values.
    pub fn with_overrides(mut self, args: &GlobalArgs) -> Self {
        if let Some(url) = &args.url {
            self.node.url = url.clone();
        }
        if let Some(keystore) = &args.keystore {
            self.wallet.default_keystore = Some(keystore.clone());
        }
        if let Some(index) = args.index {
            self.wallet.default_index = index;
        }
        self.display.verbose |= args.verbose;
        self
    }

    pub fn log_level(&self) -> &'static str {
        if self.display.verbose {
            "debug"
        } else {
            "warn"
        }
    }
}
