//! In-process mock node.
//!
//! Answers `starknet_call` for the common ERC-20 views without touching the
//! network, so tests can run against the `mock` environment offline.

use std::collections::HashMap;

use starknet_core::utils::cairo_short_string_to_felt;
use tracing::debug;

use super::transport::{JsonRpcRequest, Transport, TransportFuture};
use crate::types::{CallParams, Felt, selector_from_name};

const METHOD_NOT_FOUND: i64 = -32601;
const INVALID_PARAMS: i64 = -32602;
const INTERNAL_ERROR: i64 = -32603;
const INVALID_MESSAGE_SELECTOR: i64 = 21;
const INVALID_CALL_DATA: i64 = 22;

/// Mock balance returned by `balanceOf`: 2 ETH as a (low, high) u256.
const MOCK_BALANCE_LOW: u64 = 2_000_000_000_000_000_000;

/// A transport that answers like a node holding one ERC-20 token everywhere.
///
/// Every contract address behaves the same unless a result is registered for
/// it with [`MockTransport::with_call_result`].
///
/// | Entry point | Calldata | Result |
/// |-------------|----------|--------|
/// | `decimals`  | none     | `[0x12]` |
/// | `name`      | none     | `["Ether"]` as a short string |
/// | `symbol`    | none     | `["ETH"]` as a short string |
/// | `balanceOf` | account  | `[low, high]` of 2 ETH |
/// | `get_nonce` | none     | `[0x0]` |
#[derive(Debug, Default, Clone)]
pub struct MockTransport {
    results: HashMap<(Felt, Felt), Vec<Felt>>,
}

impl MockTransport {
    /// Create a mock node with only the built-in entry points.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the result of one entry point on one contract.
    pub fn with_call_result(
        mut self,
        contract_address: Felt,
        entry_point_selector: Felt,
        result: Vec<Felt>,
    ) -> Self {
        self.results
            .insert((contract_address, entry_point_selector), result);
        self
    }

    fn handle(&self, request: &JsonRpcRequest) -> Result<serde_json::Value, (i64, String)> {
        if request.method != "starknet_call" {
            return Err((
                METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
            ));
        }

        let params: CallParams = serde_json::from_value(request.params.clone())
            .map_err(|e| (INVALID_PARAMS, format!("Invalid params: {}", e)))?;
        let call = params.request;

        if let Some(result) = self
            .results
            .get(&(call.contract_address, call.entry_point_selector))
        {
            return Ok(serde_json::json!(result));
        }

        let selector = call.entry_point_selector;
        let result = if is_entry_point(selector, "decimals") {
            vec![Felt::from(18u64)]
        } else if is_entry_point(selector, "name") {
            vec![short_string("Ether")?]
        } else if is_entry_point(selector, "symbol") {
            vec![short_string("ETH")?]
        } else if is_entry_point(selector, "balanceOf") {
            if call.calldata.len() != 1 {
                return Err((INVALID_CALL_DATA, "Invalid call data".to_string()));
            }
            vec![Felt::from(MOCK_BALANCE_LOW), Felt::ZERO]
        } else if is_entry_point(selector, "get_nonce") {
            vec![Felt::ZERO]
        } else {
            return Err((
                INVALID_MESSAGE_SELECTOR,
                "Invalid message selector".to_string(),
            ));
        };
        Ok(serde_json::json!(result))
    }
}

impl Transport for MockTransport {
    fn send<'a>(&'a self, request: &'a JsonRpcRequest) -> TransportFuture<'a> {
        let envelope = match self.handle(request) {
            Ok(result) => serde_json::json!({
                "jsonrpc": "2.0",
                "id": request.id,
                "result": result,
            }),
            Err((code, message)) => {
                debug!(method = %request.method, code, "mock node rejected request");
                serde_json::json!({
                    "jsonrpc": "2.0",
                    "id": request.id,
                    "error": { "code": code, "message": message },
                })
            }
        };
        Box::pin(async move { Ok(envelope) })
    }
}

fn is_entry_point(selector: Felt, name: &str) -> bool {
    selector_from_name(name).is_ok_and(|expected| expected == selector)
}

/// Encode a Cairo short string, reporting failures as an internal node error.
fn short_string(s: &str) -> Result<Felt, (i64, String)> {
    cairo_short_string_to_felt(s).map_err(|e| (INTERNAL_ERROR, e.to_string()))
}
