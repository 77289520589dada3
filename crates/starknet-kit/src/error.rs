//! Error types for starknet-kit.
//!
//! # Error Hierarchy
//!
//! - [`Error`](enum@Error) - Main error type, returned by the high-level client
//!   - [`RpcError`] - Transport, decode and node errors from a JSON-RPC call
//!   - [`ParseFeltError`] - Invalid field element string
//!   - [`ParseBlockTagError`] - Unknown block tag
//!   - [`ParseEnvironmentError`] - Unknown environment name
//!   - [`SpyError`] - Recording transport comparison failures
//!
//! # Pattern Matching on RPC Errors
//!
//! ```rust,no_run
//! use starknet_kit::*;
//!
//! # async fn example() -> Result<(), Error> {
//! let starknet = Starknet::testnet().build();
//! let call = FunctionCall::by_name("0xdeadbeef", "decimals")?;
//!
//! match starknet.call(&call, BlockId::latest()).await {
//!     Ok(result) => println!("decimals: {}", result[0]),
//!     Err(Error::Rpc(RpcError::ContractNotFound)) => println!("no such contract"),
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

/// Error parsing a field element.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseFeltError {
    #[error("Field element '{0}' must start with '0x'")]
    MissingPrefix(String),

    #[error("Field element has no digits")]
    Empty,

    #[error("Field element '{0}' is not valid hex")]
    InvalidHex(String),

    #[error("Field element '{0}' is longer than 64 hex digits")]
    TooLong(String),

    #[error("Field element '{0}' is not below the field prime")]
    OutOfRange(String),

    #[error("Entry point name '{0}' is not ASCII")]
    NonAsciiName(String),
}

/// Error parsing a block tag.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown block tag '{0}'. Expected 'latest' or 'pending'")]
pub struct ParseBlockTagError(pub String);

/// Error parsing an environment name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown environment '{0}'. Expected 'devnet', 'mock', 'testnet' or 'mainnet'")]
pub struct ParseEnvironmentError(pub String);

// ============================================================================
// RPC Errors
// ============================================================================

/// RPC-specific errors.
#[derive(Debug, Error)]
pub enum RpcError {
    // ─── Network/Transport ───
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Network error: {message}")]
    Network {
        message: String,
        status_code: Option<u16>,
    },

    #[error("Transport error: {0}")]
    Transport(String),

    // ─── Decoding ───
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    // ─── Node Errors ───
    #[error("Contract not found")]
    ContractNotFound,

    #[error("Invalid message selector")]
    InvalidMessageSelector,

    #[error("Invalid call data")]
    InvalidCallData,

    #[error("Block not found")]
    BlockNotFound,

    #[error("Contract error: {}", revert_error.as_deref().unwrap_or("no revert reason"))]
    ContractError { revert_error: Option<String> },

    // ─── Generic RPC Error ───
    #[error("RPC error: {message} (code: {code})")]
    Rpc {
        code: i64,
        message: String,
        data: Option<serde_json::Value>,
    },
}

impl RpcError {
    /// Create a network error.
    pub fn network(message: impl Into<String>, status_code: Option<u16>) -> Self {
        RpcError::Network {
            message: message.into(),
            status_code,
        }
    }

    /// Returns true if the request never produced a decodable response.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            RpcError::Http(_) | RpcError::Network { .. } | RpcError::Transport(_)
        )
    }

    /// Returns true if a response arrived but could not be decoded.
    pub fn is_decode(&self) -> bool {
        matches!(self, RpcError::Json(_) | RpcError::InvalidResponse(_))
    }
}

// ============================================================================
// Spy Errors
// ============================================================================

/// Errors raised by [`Spy::compare`](crate::Spy::compare).
#[derive(Debug, Error)]
pub enum SpyError {
    #[error("Nothing was recorded before comparing")]
    NothingRecorded,

    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Fixture IO error on {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid fixture file {path}: {message}")]
    Fixture {
        path: std::path::PathBuf,
        message: String,
    },
}

// ============================================================================
// Main Error Type
// ============================================================================

/// Main error type for starknet-kit operations.
#[derive(Debug, Error)]
pub enum Error {
    // ─── Configuration ───
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    ParseEnvironment(#[from] ParseEnvironmentError),

    // ─── Parsing ───
    #[error(transparent)]
    ParseFelt(#[from] ParseFeltError),

    #[error(transparent)]
    ParseBlockTag(#[from] ParseBlockTagError),

    // ─── RPC ───
    #[error(transparent)]
    Rpc(#[from] RpcError),

    // ─── Testing ───
    #[error(transparent)]
    Spy(#[from] SpyError),
}
