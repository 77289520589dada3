//! Integration tests for starknet-kit.
//!
//! The environment is taken from `STARKNET_ENV` and defaults to `mock`, which
//! runs offline. Set it to `devnet`, `testnet` or `mainnet` to run the same
//! tables against a live node.
//!
//! Run with: `cargo test --test integration`

mod call_integration;
mod spy_integration;

use std::path::PathBuf;
use std::sync::Once;

use starknet_kit::{Environment, Starknet};

/// Install a log subscriber once, honouring `RUST_LOG`.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// The client configured by `STARKNET_ENV` and `STARKNET_RPC_URL`.
pub fn configured() -> Starknet {
    Starknet::from_env().unwrap_or_else(|e| panic!("test configuration: {}", e))
}

/// Fixture file for one environment and test.
pub fn fixture_path(env: Environment, name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(env.as_str())
        .join(format!("{}.json", name))
}

/// Returns true if `value` is `0x` followed by lowercase hex digits only.
pub fn is_lower_hex(value: &str) -> bool {
    value.strip_prefix("0x").is_some_and(|digits| {
        !digits.is_empty()
            && digits
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
    })
}
