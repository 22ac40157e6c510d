//! Sui network selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::digest::TransactionDigest;
use crate::error::TypesError;

/// Which Sui network the client talks to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
    Devnet,
    Localnet,
}

impl Network {
    /// Public fullnode JSON-RPC endpoint.
    pub fn default_rpc_url(&self) -> &'static str {
        match self {
            Self::Mainnet => "https://fullnode.mainnet.sui.io:443",
            Self::Testnet => "https://fullnode.testnet.sui.io:443",
            Self::Devnet => "https://fullnode.devnet.sui.io:443",
            Self::Localnet => "http://127.0.0.1:9000",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
            Self::Devnet => "devnet",
            Self::Localnet => "localnet",
        }
    }

    /// Explorer link for a transaction, if the network has a public explorer.
    pub fn explorer_tx_url(&self, digest: &TransactionDigest) -> Option<String> {
        match self {
            Self::Localnet => None,
            _ => Some(format!("https://suiscan.xyz/{}/tx/{digest}", self.as_str())),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mainnet" => Ok(Self::Mainnet),
            "testnet" => Ok(Self::Testnet),
            "devnet" => Ok(Self::Devnet),
            "localnet" | "local" => Ok(Self::Localnet),
            other => Err(TypesError::UnknownNetwork(other.to_string())),
        }
    }
}
