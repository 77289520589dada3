//! Transport seam between the RPC client and the node.
//!
//! A [`Transport`] sends one JSON-RPC request and hands back the raw response
//! envelope. [`HttpTransport`] does this over HTTP; the mock node and the
//! recording spy implement the same trait.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Serialize;
use tracing::trace;

use crate::error::RpcError;

/// Boxed future returned by [`Transport::send`].
pub type TransportFuture<'a> =
    Pin<Box<dyn Future<Output = Result<serde_json::Value, RpcError>> + Send + 'a>>;

/// JSON-RPC 2.0 request structure.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: String,
    pub params: serde_json::Value,
}

impl JsonRpcRequest {
    /// Create a JSON-RPC 2.0 request.
    pub fn new(id: u64, method: impl Into<String>, params: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method: method.into(),
            params,
        }
    }
}

/// Sends JSON-RPC requests to a node.
///
/// Implementations return the full response envelope
/// (`{"jsonrpc", "id", "result" | "error"}`) and leave its interpretation to
/// the caller. A transport never retries.
///
/// # Example Implementation
///
/// ```rust
/// use starknet_kit::{JsonRpcRequest, Transport, TransportFuture};
///
/// struct Fixed(serde_json::Value);
///
/// impl Transport for Fixed {
///     fn send<'a>(&'a self, request: &'a JsonRpcRequest) -> TransportFuture<'a> {
///         let envelope = serde_json::json!({
///             "jsonrpc": "2.0",
///             "id": request.id,
///             "result": self.0.clone(),
///         });
///         Box::pin(async move { Ok(envelope) })
///     }
/// }
/// ```
pub trait Transport: Send + Sync {
    /// Send one request and return the raw response envelope.
    fn send<'a>(&'a self, request: &'a JsonRpcRequest) -> TransportFuture<'a>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn send<'a>(&'a self, request: &'a JsonRpcRequest) -> TransportFuture<'a> {
        (**self).send(request)
    }
}

/// HTTP transport over reqwest.
#[derive(Clone)]
pub struct HttpTransport {
    url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport posting to the given URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(url, reqwest::Client::new())
    }

    /// Create a transport reusing an existing reqwest client.
    pub fn with_client(url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }

    /// Get the endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Transport for HttpTransport {
    fn send<'a>(&'a self, request: &'a JsonRpcRequest) -> TransportFuture<'a> {
        Box::pin(async move {
            trace!(url = %self.url, method = %request.method, id = request.id, "POST");

            let response = self
                .client
                .post(&self.url)
                .header("Content-Type", "application/json")
                .json(request)
                .send()
                .await?;

            let status = response.status();
            let body = response.text().await?;

            if !status.is_success() {
                return Err(RpcError::network(
                    format!("HTTP {}: {}", status, body),
                    Some(status.as_u16()),
                ));
            }

            trace!(status = status.as_u16(), bytes = body.len(), "response received");
            serde_json::from_str(&body).map_err(RpcError::Json)
        })
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("url", &self.url)
            .finish()
    }
}
