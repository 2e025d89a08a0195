use std::{
    fmt::{self, Display},
    path::PathBuf,
    str::FromStr,
    time::Duration,
};

use anyhow::Result;
use serde::Deserialize;
use solana_sdk::{native_token::sol_to_lamports, pubkey::Pubkey, signature::Signature};
use thiserror::Error;

use crate::{
    constants::*,
    data::NftDescriptor,
    upload::{MemoryStorage, PinataStorage, Storage},
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unknown cluster \"{0}\", expected devnet, testnet, mainnet-beta or localnet")]
    UnknownNetwork(String),

    #[error("unknown storage \"{0}\", expected pinata or mock")]
    UnknownStorage(String),

    #[error("environment variable {0} must be set")]
    MissingVar(&'static str),

    #[error("environment variable {var} has an invalid value \"{value}\"")]
    InvalidValue { var: &'static str, value: String },

    #[error("failed to read NFT config {path}: {source}")]
    ReadNftConfig {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse NFT config {path}: {source}")]
    ParseNftConfig {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    Devnet,
    Testnet,
    MainnetBeta,
    Localnet,
}

impl FromStr for Network {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "devnet" => Ok(Network::Devnet),
            "testnet" => Ok(Network::Testnet),
            "mainnet-beta" | "mainnet" => Ok(Network::MainnetBeta),
            "localnet" | "localhost" => Ok(Network::Localnet),
            _ => Err(ConfigError::UnknownNetwork(s.to_string())),
        }
    }
}

impl Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Devnet => write!(f, "devnet"),
            Network::Testnet => write!(f, "testnet"),
            Network::MainnetBeta => write!(f, "mainnet-beta"),
            Network::Localnet => write!(f, "localnet"),
        }
    }
}

impl Network {
    pub fn rpc_url(&self) -> &'static str {
        match self {
            Network::Devnet => DEVNET_RPC_URL,
            Network::Testnet => TESTNET_RPC_URL,
            Network::MainnetBeta => MAINNET_RPC_URL,
            Network::Localnet => LOCALNET_RPC_URL,
        }
    }

    pub fn allows_airdrop(&self) -> bool {
        !matches!(self, Network::MainnetBeta)
    }

    fn explorer_query(&self) -> String {
        match self {
            Network::MainnetBeta => String::new(),
            Network::Localnet => format!("?cluster=custom&customUrl={}", LOCALNET_RPC_URL),
            network => format!("?cluster={}", network),
        }
    }

    pub fn address_url(&self, address: &Pubkey) -> String {
        format!("{}/address/{}{}", EXPLORER_URL, address, self.explorer_query())
    }

    pub fn tx_url(&self, signature: &Signature) -> String {
        format!("{}/tx/{}{}", EXPLORER_URL, signature, self.explorer_query())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    Pinata {
        jwt: String,
        gateway: String,
        timeout: Duration,
    },
    Mock,
}

impl StorageConfig {
    pub fn build(&self) -> Result<Box<dyn Storage>> {
        let storage: Box<dyn Storage> = match self {
            StorageConfig::Pinata {
                jwt,
                gateway,
                timeout,
            } => Box::new(PinataStorage::new(jwt.clone(), gateway.clone(), *timeout)?),
            StorageConfig::Mock => Box::<MemoryStorage>::default(),
        };
        Ok(storage)
    }
}

/// The two NFTs a run mints: the collection parent and one member.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NftConfig {
    pub collection: NftDescriptor,
    pub member: NftDescriptor,
}

impl Default for NftConfig {
    fn default() -> Self {
        Self {
            collection: NftDescriptor {
                name: "Web3 Pirates".to_string(),
                symbol: "W3P".to_string(),
                description: "Collection about the bravest and most daring pirate explorers of this new Ocean called Web3".to_string(),
                seller_fee_basis_points: 100,
                image_file: "web3_pirates.png".into(),
            },
            member: NftDescriptor {
                name: "THE WEB3 BLACK PEARL COIN".to_string(),
                symbol: "$BPC".to_string(),
                description: "The currency of the greatest Pirate in this new and little explored Ocean called Web3".to_string(),
                seller_fee_basis_points: 100,
                image_file: "pirate_coin.png".into(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub network: Network,
    pub rpc_url: String,
    pub keypair_path: PathBuf,
    pub image_dir: PathBuf,
    pub storage: StorageConfig,
    /// Balance the identity is topped up to on clusters with a faucet.
    pub min_balance_lamports: u64,
    pub nfts: NftConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let network: Network = var("CLUSTER")
            .map(|s| s.parse::<Network>())
            .transpose()?
            .unwrap_or(Network::Devnet);

        let rpc_url = var("RPC_URL").unwrap_or_else(|| network.rpc_url().to_string());
        let keypair_path = PathBuf::from(
            var("KEYPAIR_PATH").unwrap_or_else(|| DEFAULT_KEYPAIR_PATH.to_string()),
        );
        let image_dir =
            PathBuf::from(var("IMAGE_DIR").unwrap_or_else(|| DEFAULT_IMAGE_DIR.to_string()));

        let storage = match var("STORAGE").as_deref().unwrap_or("pinata") {
            "pinata" => {
                let jwt = var("PINATA_JWT").ok_or(ConfigError::MissingVar("PINATA_JWT"))?;
                let gateway =
                    var("PINATA_GATEWAY").unwrap_or_else(|| PINATA_GATEWAY_URL.to_string());
                let timeout_secs = match var("STORAGE_TIMEOUT_SECS") {
                    Some(value) => value
                        .parse::<u64>()
                        .map_err(|_| ConfigError::InvalidValue {
                            var: "STORAGE_TIMEOUT_SECS",
                            value,
                        })?,
                    None => DEFAULT_STORAGE_TIMEOUT_SECS,
                };
                StorageConfig::Pinata {
                    jwt,
                    gateway,
                    timeout: Duration::from_secs(timeout_secs),
                }
            }
            // Mock locators never resolve; only localnet may mint against them.
            "mock" if network == Network::Localnet => StorageConfig::Mock,
            "mock" => {
                return Err(ConfigError::InvalidValue {
                    var: "STORAGE",
                    value: format!("mock (only allowed on localnet, not {})", network),
                })
            }
            other => return Err(ConfigError::UnknownStorage(other.to_string())),
        };

        let min_balance_sol = match var("AIRDROP_SOL") {
            Some(value) => match value.parse::<f64>() {
                Ok(sol) if sol >= 0.0 => sol,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        var: "AIRDROP_SOL",
                        value,
                    })
                }
            },
            None => 1.0,
        };

        let nfts = match var("NFT_CONFIG") {
            Some(path) => load_nft_config(PathBuf::from(path))?,
            None => NftConfig::default(),
        };

        Ok(Self {
            network,
            rpc_url,
            keypair_path,
            image_dir,
            storage,
            min_balance_lamports: sol_to_lamports(min_balance_sol),
            nfts,
        })
    }
}

fn load_nft_config(path: PathBuf) -> Result<NftConfig, ConfigError> {
    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(source) => return Err(ConfigError::ReadNftConfig { path, source }),
    };

    serde_json::from_str(&contents).map_err(|source| ConfigError::ParseNftConfig { path, source })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use solana_sdk::native_token::LAMPORTS_PER_SOL;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_to_devnet_with_sample_nfts() {
        let config = config(&[("PINATA_JWT", "token")]).unwrap();

        assert_eq!(config.network, Network::Devnet);
        assert_eq!(config.rpc_url, DEVNET_RPC_URL);
        assert_eq!(config.keypair_path, PathBuf::from(DEFAULT_KEYPAIR_PATH));
        assert_eq!(config.image_dir, PathBuf::from(DEFAULT_IMAGE_DIR));
        assert!(matches!(config.storage, StorageConfig::Pinata { .. }));
        assert_eq!(config.min_balance_lamports, LAMPORTS_PER_SOL);
        assert_eq!(config.nfts, NftConfig::default());
    }

    #[test]
    fn pinata_requires_jwt() {
        let err = config(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("PINATA_JWT")));

        let config = config(&[("PINATA_JWT", "token"), ("STORAGE_TIMEOUT_SECS", "5")]).unwrap();
        assert_eq!(
            config.storage,
            StorageConfig::Pinata {
                jwt: "token".to_string(),
                gateway: PINATA_GATEWAY_URL.to_string(),
                timeout: Duration::from_secs(5),
            }
        );
    }

    #[test]
    fn rejects_unknown_values() {
        assert!(matches!(
            config(&[("CLUSTER", "moonnet")]),
            Err(ConfigError::UnknownNetwork(_))
        ));
        assert!(matches!(
            config(&[("STORAGE", "s3")]),
            Err(ConfigError::UnknownStorage(_))
        ));
        assert!(matches!(
            config(&[("PINATA_JWT", "token"), ("AIRDROP_SOL", "-1")]),
            Err(ConfigError::InvalidValue {
                var: "AIRDROP_SOL",
                ..
            })
        ));
    }

    #[test]
    fn mock_storage_only_on_localnet() {
        for cluster in ["mainnet-beta", "devnet", "testnet"] {
            assert!(matches!(
                config(&[("CLUSTER", cluster), ("STORAGE", "mock")]),
                Err(ConfigError::InvalidValue { var: "STORAGE", .. })
            ));
        }
        assert!(matches!(
            config(&[("STORAGE", "mock")]),
            Err(ConfigError::InvalidValue { var: "STORAGE", .. })
        ));

        let config = config(&[("CLUSTER", "localnet"), ("STORAGE", "mock")]).unwrap();
        assert_eq!(config.storage, StorageConfig::Mock);
    }

    #[test]
    fn rpc_url_overrides_cluster_default() {
        let config = config(&[
            ("STORAGE", "mock"),
            ("CLUSTER", "localnet"),
            ("RPC_URL", "http://127.0.0.1:9000"),
        ])
        .unwrap();
        assert_eq!(config.network, Network::Localnet);
        assert_eq!(config.rpc_url, "http://127.0.0.1:9000");
    }

    #[test]
    fn missing_nft_config_file_is_an_error() {
        let err =
            config(&[("PINATA_JWT", "token"), ("NFT_CONFIG", "no/such/file.json")]).unwrap_err();
        assert!(matches!(err, ConfigError::ReadNftConfig { .. }));
    }

    #[test]
    fn explorer_links_carry_cluster() {
        let address = Pubkey::new_unique();
        assert_eq!(
            Network::Devnet.address_url(&address),
            format!("{}/address/{}?cluster=devnet", EXPLORER_URL, address)
        );
        assert_eq!(
            Network::MainnetBeta.address_url(&address),
            format!("{}/address/{}", EXPLORER_URL, address)
        );
        assert!(Network::Localnet
            .tx_url(&Signature::default())
            .ends_with("?cluster=custom&customUrl=http://localhost:8899"));
    }
}
