//! Low-level JSON-RPC client for Starknet.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::debug;

use super::transport::{HttpTransport, JsonRpcRequest, Transport};
use crate::error::RpcError;
use crate::types::{BlockId, Felt, FunctionCall};

/// JSON-RPC response structure.
#[derive(Deserialize)]
struct JsonRpcResponse<T> {
    id: Option<u64>,
    result: Option<T>,
    error: Option<JsonRpcError>,
}

/// JSON-RPC error structure.
#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
    #[serde(default)]
    data: Option<serde_json::Value>,
}

/// Params of `starknet_call`, borrowing the caller's request.
#[derive(Serialize)]
struct CallParamsRef<'a> {
    request: &'a FunctionCall,
    block_id: BlockId,
}

/// Low-level JSON-RPC client for Starknet.
///
/// Each method sends exactly one request through the configured
/// [`Transport`]; failures are returned as-is and never retried.
pub struct RpcClient {
    transport: Arc<dyn Transport>,
    request_id: AtomicU64,
}

impl RpcClient {
    /// Create a new RPC client posting to the given URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_transport(Arc::new(HttpTransport::new(url)))
    }

    /// Create a new RPC client over an arbitrary transport.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            request_id: AtomicU64::new(0),
        }
    }

    /// Get the transport requests are sent through.
    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Make a raw RPC call.
    pub async fn request<P: Serialize, R: DeserializeOwned>(
        &self,
        method: &str,
        params: P,
    ) -> Result<R, RpcError> {
        let id = self.request_id.fetch_add(1, Ordering::Relaxed);
        let request = JsonRpcRequest::new(id, method, serde_json::to_value(params)?);

        debug!(method, id, "sending request");
        let envelope = self.transport.send(&request).await?;

        let response: JsonRpcResponse<R> =
            serde_json::from_value(envelope).map_err(RpcError::Json)?;

        if let Some(response_id) = response.id {
            if response_id != id {
                return Err(RpcError::InvalidResponse(format!(
                    "Response id {} does not match request id {}",
                    response_id, id
                )));
            }
        }

        if let Some(error) = response.error {
            debug!(method, id, code = error.code, "node returned error");
            return Err(parse_rpc_error(error));
        }

        response
            .result
            .ok_or_else(|| RpcError::InvalidResponse("Missing result in response".to_string()))
    }

    /// Call a read-only contract function.
    ///
    /// Returns the values in the order the contract declares them. An empty
    /// vector is returned as-is when the function returns nothing.
    pub async fn call(
        &self,
        request: &FunctionCall,
        block_id: BlockId,
    ) -> Result<Vec<Felt>, RpcError> {
        let params = CallParamsRef { request, block_id };
        let result: Vec<Felt> = self.request("starknet_call", params).await?;

        debug!(
            contract = %request.contract_address.to_hex_string(),
            selector = %request.entry_point_selector.to_hex_string(),
            values = result.len(),
            "call returned"
        );
        Ok(result)
    }
}

impl Clone for RpcClient {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            request_id: AtomicU64::new(0),
        }
    }
}

impl std::fmt::Debug for RpcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcClient")
            .field("request_id", &self.request_id.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Map a node error to a specific error type.
fn parse_rpc_error(error: JsonRpcError) -> RpcError {
    match error.code {
        20 => RpcError::ContractNotFound,
        21 => RpcError::InvalidMessageSelector,
        22 => RpcError::InvalidCallData,
        24 => RpcError::BlockNotFound,
        40 => {
            let revert_error = error.data.as_ref().and_then(|data| {
                data.get("revert_error")
                    .and_then(|r| r.as_str())
                    .or_else(|| data.as_str())
                    .map(String::from)
            });
            RpcError::ContractError { revert_error }
        }
        code => RpcError::Rpc {
            code,
            message: error.message,
            data: error.data,
        },
    }
}
