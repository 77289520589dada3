//! Environment identification for Starknet nodes.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseEnvironmentError;

/// The environment the client talks to.
///
/// Selects both the default endpoint and the kind of transport: `Mock`
/// answers from an in-process node, every other variant goes over HTTP.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Environment {
    /// Local starknet-devnet instance.
    Devnet,
    /// In-process mock node. Needs no network.
    #[default]
    Mock,
    /// Public testnet.
    Testnet,
    /// Starknet mainnet.
    Mainnet,
}

impl Environment {
    /// Returns true if this is the in-process mock.
    pub fn is_mock(&self) -> bool {
        matches!(self, Environment::Mock)
    }

    /// Returns the environment identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Devnet => "devnet",
            Environment::Mock => "mock",
            Environment::Testnet => "testnet",
            Environment::Mainnet => "mainnet",
        }
    }

    /// Default JSON-RPC endpoint, `None` for the mock.
    pub fn default_rpc_url(&self) -> Option<&'static str> {
        match self {
            Environment::Devnet => Some("http://localhost:5050/rpc"),
            Environment::Mock => None,
            Environment::Testnet => Some("https://starknet-sepolia.public.blastapi.io"),
            Environment::Mainnet => Some("https://starknet-mainnet.public.blastapi.io"),
        }
    }
}

impl FromStr for Environment {
    type Err = ParseEnvironmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "devnet" => Ok(Environment::Devnet),
            "mock" => Ok(Environment::Mock),
            "testnet" => Ok(Environment::Testnet),
            "mainnet" => Ok(Environment::Mainnet),
            _ => Err(ParseEnvironmentError(s.to_string())),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
