//! Function call request payload.

use serde::{Deserialize, Serialize};

use super::{BlockId, Felt, parse_felt, selector_from_name};
use crate::error::ParseFeltError;

/// A read-only invocation of a contract entry point.
///
/// Calldata is positional: its order is the order of the function's
/// arguments.
///
/// # Example
///
/// ```
/// use starknet_kit::{Felt, FunctionCall, parse_felt, selector_from_name};
///
/// let call = FunctionCall::by_name(
///     "0x049d36570d4e46f48e99674bd3fcc84644ddd6b96f7c741b1562b82f9e004dc7",
///     "balanceOf",
/// )?
/// .arg(parse_felt("0x1234")?);
///
/// assert_eq!(call.entry_point_selector, selector_from_name("balanceOf")?);
/// assert_eq!(call.calldata, vec![Felt::from(0x1234u64)]);
/// # Ok::<(), starknet_kit::ParseFeltError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Address of the contract to call.
    pub contract_address: Felt,
    /// Selector of the entry point.
    pub entry_point_selector: Felt,
    /// Positional arguments.
    pub calldata: Vec<Felt>,
}

impl FunctionCall {
    /// Create a call with empty calldata.
    pub fn new(contract_address: Felt, entry_point_selector: Felt) -> Self {
        Self {
            contract_address,
            entry_point_selector,
            calldata: Vec::new(),
        }
    }

    /// Create a call from hex strings.
    pub fn parse(
        contract_address: &str,
        entry_point_selector: &str,
        calldata: &[&str],
    ) -> Result<Self, ParseFeltError> {
        Ok(Self {
            contract_address: parse_felt(contract_address)?,
            entry_point_selector: parse_felt(entry_point_selector)?,
            calldata: calldata
                .iter()
                .map(|arg| parse_felt(arg))
                .collect::<Result<_, _>>()?,
        })
    }

    /// Create a call addressing the entry point by its function name.
    pub fn by_name(contract_address: &str, entry_point: &str) -> Result<Self, ParseFeltError> {
        Ok(Self::new(
            parse_felt(contract_address)?,
            selector_from_name(entry_point)?,
        ))
    }

    /// Append one argument.
    pub fn arg(mut self, value: Felt) -> Self {
        self.calldata.push(value);
        self
    }

    /// Replace the calldata.
    pub fn calldata(mut self, calldata: impl IntoIterator<Item = Felt>) -> Self {
        self.calldata = calldata.into_iter().collect();
        self
    }
}

/// Params of a `starknet_call` request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallParams {
    /// The call to execute.
    pub request: FunctionCall,
    /// The block to execute it against.
    pub block_id: BlockId,
}
