//! Spy behaviour through the full client stack.

use std::sync::Arc;

use starknet_kit::*;
use tokio_test::assert_ok;

use super::init_tracing;

async fn decimals_through(spy: &Arc<Spy<MockTransport>>) -> Vec<Felt> {
    let starknet = Starknet::mock().transport(spy.clone()).build();
    let call = FunctionCall::by_name("0xdeadbeef", "decimals").unwrap();
    assert_ok!(starknet.call(&call, BlockId::latest()).await)
}

#[tokio::test]
async fn test_shipped_fixture_full_match() {
    init_tracing();
    let path = super::fixture_path(Environment::Mock, "call");
    let spy = Arc::new(Spy::new(MockTransport::new()).with_fixtures(&path));

    let output = decimals_through(&spy).await;
    let diff = assert_ok!(spy.compare(&output, CompareMode::Strict));
    assert_eq!(diff, Diff::FullMatch);
    assert_eq!(spy.state(), SpyState::Compared);
}

#[tokio::test]
async fn test_record_then_replay_fixture() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("call.json");

    let spy = Arc::new(Spy::new(MockTransport::new()).with_fixtures(&path));
    let output = decimals_through(&spy).await;
    assert_eq!(
        assert_ok!(spy.compare(&output, CompareMode::Strict)),
        Diff::NoMatch
    );
    assert!(!path.exists(), "strict comparison must not write fixtures");

    assert_ok!(spy.compare(&output, CompareMode::WriteOnMismatch));
    assert!(path.exists());

    let spy = Arc::new(Spy::new(MockTransport::new()).with_fixtures(&path));
    let output = decimals_through(&spy).await;
    assert_eq!(
        assert_ok!(spy.compare(&output, CompareMode::Strict)),
        Diff::FullMatch
    );
}

#[tokio::test]
async fn test_spy_rejects_calls_after_compare() {
    init_tracing();
    let spy = Arc::new(Spy::new(MockTransport::new()));
    let output = decimals_through(&spy).await;
    assert_ok!(spy.compare(&output, CompareMode::Strict));

    let starknet = Starknet::mock().transport(spy.clone()).build();
    let call = FunctionCall::by_name("0xdeadbeef", "decimals").unwrap();
    let err = starknet.call(&call, BlockId::latest()).await.unwrap_err();
    assert!(
        matches!(err, Error::Rpc(RpcError::Transport(_))),
        "Expected transport error, got: {:?}",
        err
    );
}

#[tokio::test]
async fn test_spy_records_params_on_the_wire() {
    init_tracing();
    let spy = Arc::new(Spy::new(MockTransport::new()));
    decimals_through(&spy).await;

    let exchanges = spy.exchanges();
    assert_eq!(exchanges.len(), 1);
    assert_eq!(exchanges[0].method, "starknet_call");
    assert_eq!(exchanges[0].params["block_id"], "latest");
    assert_eq!(
        exchanges[0].params["request"]["entry_point_selector"],
        "0x4c4fb1ab068f6039d5780c68dd0fa2f8742cceb3426d19667778ca7f3518a9"
    );
    assert_eq!(exchanges[0].params["request"]["calldata"], serde_json::json!([]));
}
