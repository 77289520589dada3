//! Client module for Starknet.
//!
//! [`Starknet`] is the entry point. It sends requests through an
//! [`RpcClient`], which in turn talks to any [`Transport`]: HTTP for real
//! nodes, [`MockTransport`] for offline runs, and [`Spy`] to record traffic.

mod mock;
mod rpc;
mod spy;
mod starknet;
mod transport;

pub use mock::MockTransport;
pub use rpc::RpcClient;
pub use spy::{CompareMode, Diff, Exchange, Spy, SpyState};
pub use starknet::{ENV_VAR, RPC_URL_VAR, Starknet, StarknetBuilder};
pub use transport::{HttpTransport, JsonRpcRequest, Transport, TransportFuture};
