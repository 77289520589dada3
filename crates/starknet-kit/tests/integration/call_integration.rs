//! `starknet_call` against every environment.
//!
//! Each row is sent through a [`Spy`]. The decoded output must re-serialize
//! to exactly what the node returned. On the mock node every exchange must
//! also match `tests/fixtures/mock/call.json`; live nodes return moving
//! values and are only checked against their own responses.
//!
//! On a mismatch the spy is compared again with
//! [`CompareMode::WriteOnMismatch`] so the discrepancy can be inspected. Live
//! runs bind no fixture file, so they persist nothing.

use std::sync::Arc;

use starknet_kit::*;
use tokio_test::assert_ok;

use super::{configured, fixture_path, init_tracing, is_lower_hex};

const DEVNET_FEE_TOKEN: &str = "0x49d36570d4e46f48e99674bd3fcc84644ddd6b96f7c741b1562b82f9e004dc7";
const TESTNET_ETH: &str = "0x049d36570d4e46f48e99674bd3fcc84644ddd6b96f7c741b1562b82f9e004dc7";
const TESTNET_TOKEN: &str = "0x029260ce936efafa6d0042bc59757a653e3f992b97960c1c4f8ccd63b7a90136";
const TESTNET_ACCOUNT: &str = "0x0207aCC15dc241e7d167E67e30E769719A727d3E0fa47f9E187707289885Dfde";
const MAINNET_TOKEN: &str = "0x06a09ccb1caaecf3d9683efe335a667b2169a409d19c589ba1eb771cd210af75";

/// What the first returned value must look like.
#[derive(Clone, Copy, Debug)]
enum Expected {
    AnyHex,
    Exactly(&'static str),
}

impl Expected {
    fn matches(&self, value: &str) -> bool {
        match self {
            Expected::AnyHex => is_lower_hex(value),
            Expected::Exactly(expected) => value == *expected,
        }
    }
}

struct CallCase {
    call: FunctionCall,
    block_id: BlockId,
    expected: Expected,
}

fn case(call: FunctionCall, expected: Expected) -> CallCase {
    CallCase {
        call,
        block_id: BlockId::with_block_tag(BlockTag::Latest),
        expected,
    }
}

fn cases(env: Environment) -> Vec<CallCase> {
    match env {
        Environment::Devnet => vec![case(
            FunctionCall::by_name(DEVNET_FEE_TOKEN, "name").unwrap(),
            Expected::AnyHex,
        )],
        Environment::Mock => vec![
            case(
                FunctionCall::by_name("0xdeadbeef", "decimals").unwrap(),
                Expected::Exactly("0x12"),
            ),
            case(
                FunctionCall::by_name(TESTNET_TOKEN, "decimals").unwrap(),
                Expected::Exactly("0x12"),
            ),
            case(
                FunctionCall::by_name(MAINNET_TOKEN, "decimals").unwrap(),
                Expected::Exactly("0x12"),
            ),
        ],
        Environment::Testnet => vec![
            case(
                FunctionCall::parse(
                    TESTNET_TOKEN,
                    "0x004c4fb1ab068f6039d5780c68dd0fa2f8742cceb3426d19667778ca7f3518a9",
                    &[],
                )
                .unwrap(),
                Expected::Exactly("0x12"),
            ),
            case(
                FunctionCall::by_name(TESTNET_ETH, "balanceOf")
                    .unwrap()
                    .arg(parse_felt(TESTNET_ACCOUNT).unwrap()),
                Expected::AnyHex,
            ),
            case(
                FunctionCall::by_name(TESTNET_ACCOUNT, "get_nonce").unwrap(),
                Expected::AnyHex,
            ),
        ],
        Environment::Mainnet => vec![case(
            FunctionCall::by_name(MAINNET_TOKEN, "decimals").unwrap(),
            Expected::Exactly("0x12"),
        )],
    }
}

#[tokio::test]
async fn test_call() {
    init_tracing();
    let configured = configured();
    let env = configured.environment();

    for case in cases(env) {
        let mut spy = Spy::new(configured.rpc().transport().clone());
        if env.is_mock() {
            spy = spy.with_fixtures(fixture_path(env, "call"));
        }
        let spy = Arc::new(spy);
        let starknet = StarknetBuilder::new(env).transport(spy.clone()).build();

        let output = assert_ok!(starknet.call(&case.call, case.block_id).await);

        let diff = spy.compare(&output, CompareMode::Strict);
        if !matches!(diff, Ok(Diff::FullMatch)) {
            let written = spy.compare(&output, CompareMode::WriteOnMismatch);
            panic!(
                "expecting to match for {}: {:?} (fixture write: {:?})",
                case.call.contract_address.to_hex_string(),
                diff,
                written
            );
        }

        assert!(!output.is_empty(), "should return an output");
        let first = output[0].to_hex_string();
        assert!(
            case.expected.matches(&first),
            "checking output: expecting {:?}, got: {}",
            case.expected,
            first
        );
    }
}

#[tokio::test]
async fn test_call_with_every_block_id_shape() {
    init_tracing();

    let starknet = Starknet::mock().build();
    let call = FunctionCall::by_name("0xdeadbeef", "decimals").unwrap();

    for block_id in [
        BlockId::latest(),
        BlockId::pending(),
        BlockId::with_block_number(0),
        BlockId::with_block_hash(Felt::from(0x1234u64)),
    ] {
        let output = assert_ok!(starknet.call(&call, block_id).await);
        assert_eq!(output, vec![Felt::from(18u64)], "block_id {:?}", block_id);
    }
}

#[tokio::test]
async fn test_call_node_errors() {
    init_tracing();
    let starknet = Starknet::mock().build();

    let unknown = FunctionCall::by_name("0xdeadbeef", "transfer").unwrap();
    match starknet.call(&unknown, BlockId::latest()).await {
        Err(Error::Rpc(RpcError::InvalidMessageSelector)) => {}
        other => panic!("Expected InvalidMessageSelector, got: {:?}", other),
    }

    let missing_account = FunctionCall::by_name(TESTNET_ETH, "balanceOf").unwrap();
    match starknet.call(&missing_account, BlockId::latest()).await {
        Err(Error::Rpc(RpcError::InvalidCallData)) => {}
        other => panic!("Expected InvalidCallData, got: {:?}", other),
    }
}
