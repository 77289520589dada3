//! The main Starknet client.

use std::sync::Arc;

use crate::error::Error;
use crate::types::{BlockId, Environment, Felt, FunctionCall};

use super::mock::MockTransport;
use super::rpc::RpcClient;
use super::transport::{HttpTransport, Transport};

/// Variable selecting the [`Environment`] in [`Starknet::from_env`].
pub const ENV_VAR: &str = "STARKNET_ENV";

/// Variable overriding the RPC endpoint in [`Starknet::from_env`].
pub const RPC_URL_VAR: &str = "STARKNET_RPC_URL";

/// The main client for read-only Starknet calls.
///
/// # Example
///
/// ```rust,no_run
/// use starknet_kit::*;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Error> {
///     let starknet = Starknet::testnet().build();
///
///     let call = FunctionCall::by_name(
///         "0x049d36570d4e46f48e99674bd3fcc84644ddd6b96f7c741b1562b82f9e004dc7",
///         "decimals",
///     )?;
///     let decimals = starknet.call(&call, BlockId::latest()).await?;
///     println!("decimals: {}", decimals[0]);
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct Starknet {
    rpc: Arc<RpcClient>,
    environment: Environment,
    rpc_url: Option<String>,
}

impl Starknet {
    /// Create a builder for mainnet.
    pub fn mainnet() -> StarknetBuilder {
        StarknetBuilder::new(Environment::Mainnet)
    }

    /// Create a builder for the Sepolia testnet.
    pub fn testnet() -> StarknetBuilder {
        StarknetBuilder::new(Environment::Testnet)
    }

    /// Create a builder for a local devnet.
    pub fn devnet() -> StarknetBuilder {
        StarknetBuilder::new(Environment::Devnet)
    }

    /// Create a builder for the in-process mock node.
    pub fn mock() -> StarknetBuilder {
        StarknetBuilder::new(Environment::Mock)
    }

    /// Create a builder with a custom RPC URL.
    ///
    /// Custom endpoints are reported as [`Environment::Devnet`].
    pub fn custom(rpc_url: impl Into<String>) -> StarknetBuilder {
        StarknetBuilder::new(Environment::Devnet).rpc_url(rpc_url)
    }

    /// Create a client configured from environment variables.
    ///
    /// - `STARKNET_ENV` (optional): `devnet`, `mock`, `testnet` or `mainnet`.
    ///   Defaults to `mock`.
    /// - `STARKNET_RPC_URL` (optional): endpoint overriding the environment's
    ///   default.
    ///
    /// ```bash
    /// export STARKNET_ENV=testnet
    /// export STARKNET_RPC_URL=https://my-node.example.com/rpc
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `STARKNET_ENV` names an unknown environment
    /// - `STARKNET_RPC_URL` is set while the environment is `mock`
    pub fn from_env() -> Result<Starknet, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Starknet, Error> {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let environment = match non_empty(ENV_VAR) {
            Some(value) => value.parse::<Environment>()?,
            None => Environment::default(),
        };

        let mut builder = StarknetBuilder::new(environment);
        if let Some(url) = non_empty(RPC_URL_VAR) {
            if environment.is_mock() {
                return Err(Error::Config(format!(
                    "{} is set but {} is mock",
                    RPC_URL_VAR, ENV_VAR
                )));
            }
            builder = builder.rpc_url(url);
        }

        Ok(builder.build())
    }

    /// Get the underlying RPC client.
    pub fn rpc(&self) -> &RpcClient {
        &self.rpc
    }

    /// Get the environment this client was built for.
    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Get the RPC endpoint, or `None` when requests never leave the process.
    pub fn rpc_url(&self) -> Option<&str> {
        self.rpc_url.as_deref()
    }

    /// Execute a read-only contract function.
    ///
    /// Nothing is signed and no state changes. The result holds the values in
    /// the order the function returns them, and may be empty.
    pub async fn call(&self, call: &FunctionCall, block_id: BlockId) -> Result<Vec<Felt>, Error> {
        Ok(self.rpc.call(call, block_id).await?)
    }
}

impl std::fmt::Debug for Starknet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Starknet")
            .field("environment", &self.environment)
            .field("rpc_url", &self.rpc_url)
            .field("rpc", &self.rpc)
            .finish()
    }
}

/// Builder for creating a [`Starknet`] client.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use starknet_kit::*;
///
/// // Public endpoint
/// let starknet = Starknet::mainnet().build();
/// assert!(starknet.rpc_url().is_some());
///
/// // Own node
/// let starknet = Starknet::testnet()
///     .rpc_url("https://my-node.example.com/rpc")
///     .build();
///
/// // Any transport, e.g. a recording spy
/// let spy = Arc::new(Spy::new(MockTransport::new()));
/// let starknet = Starknet::mock().transport(spy).build();
/// ```
pub struct StarknetBuilder {
    environment: Environment,
    rpc_url: Option<String>,
    transport: Option<Arc<dyn Transport>>,
}

impl StarknetBuilder {
    /// Create a new builder for the given environment.
    pub fn new(environment: Environment) -> Self {
        Self {
            environment,
            rpc_url: None,
            transport: None,
        }
    }

    /// Override the environment's default RPC endpoint.
    ///
    /// Ignored when a transport is set with [`StarknetBuilder::transport`].
    pub fn rpc_url(mut self, rpc_url: impl Into<String>) -> Self {
        self.rpc_url = Some(rpc_url.into());
        self
    }

    /// Send requests through the given transport instead of the default one.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client.
    ///
    /// Without an explicit transport, `mock` answers in-process and every
    /// other environment posts to its endpoint over HTTP.
    pub fn build(self) -> Starknet {
        let rpc_url = self
            .rpc_url
            .or_else(|| self.environment.default_rpc_url().map(str::to_string));

        let (transport, rpc_url): (Arc<dyn Transport>, _) = match (self.transport, rpc_url) {
            (Some(transport), url) => (transport, url),
            (None, Some(url)) => (Arc::new(HttpTransport::new(url.clone())), Some(url)),
            (None, None) => (Arc::new(MockTransport::new()), None),
        };

        Starknet {
            rpc: Arc::new(RpcClient::with_transport(transport)),
            environment: self.environment,
            rpc_url,
        }
    }
}

impl From<StarknetBuilder> for Starknet {
    fn from(builder: StarknetBuilder) -> Self {
        builder.build()
    }
}
