//! Core types for Starknet calls.

mod block_id;
mod call;
mod felt;
mod network;

pub use block_id::{BlockId, BlockTag};
pub use call::{CallParams, FunctionCall};
pub use felt::{Felt, parse_felt, selector_from_name};
pub use network::Environment;
