//! A small, typed Rust client for read-only Starknet contract calls.
//!
//! **starknet-kit** executes `starknet_call` against a node and decodes the
//! returned field elements. Nothing is signed and no state changes.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use starknet_kit::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), starknet_kit::Error> {
//!     // Configure once, from STARKNET_ENV / STARKNET_RPC_URL
//!     let starknet = Starknet::from_env()?;
//!
//!     let call = FunctionCall::by_name("0xdeadbeef", "decimals")?;
//!     let result = starknet.call(&call, BlockId::latest()).await?;
//!     println!("decimals: {}", result[0]);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Core Types
//!
//! - [`Felt`] - Stark field element from `starknet-types-core`, hex on the wire
//! - [`FunctionCall`] - Contract address, entry-point selector and calldata
//! - [`BlockId`] - Block to execute against: tag, hash or number
//! - [`Environment`] - Which node to talk to
//!
//! # Testing
//!
//! [`MockTransport`] answers common ERC-20 views offline. Wrap any transport
//! in a [`Spy`] to record traffic and diff it against fixture files.
//!
//! ```
//! use starknet_kit::{BlockId, parse_felt, selector_from_name};
//!
//! let selector = selector_from_name("decimals")?;
//! let address = parse_felt("0xdeadbeef")?;
//! assert_eq!(address.to_hex_string(), "0xdeadbeef");
//! assert_eq!(BlockId::default(), BlockId::latest());
//! # let _ = selector;
//! # Ok::<(), starknet_kit::ParseFeltError>(())
//! ```

pub mod client;
pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{
    Error, ParseBlockTagError, ParseEnvironmentError, ParseFeltError, RpcError, SpyError,
};
pub use types::*;

// Re-export client types
pub use client::{
    CompareMode, Diff, Exchange, HttpTransport, JsonRpcRequest, MockTransport, RpcClient, Spy,
    SpyState, Starknet, StarknetBuilder, Transport, TransportFuture,
};

/// Prelude module for convenient imports.
///
/// ```
/// use starknet_kit::prelude::*;
/// ```
pub mod prelude {
    pub use crate::Error;
    pub use crate::client::{Starknet, StarknetBuilder};
    pub use crate::types::{BlockId, BlockTag, Environment, Felt, FunctionCall};
}
