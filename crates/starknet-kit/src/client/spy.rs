//! Recording transport for tests.
//!
//! A [`Spy`] wraps another transport, forwards every request, and keeps the
//! exchanged method, params and response. After the call under test,
//! [`Spy::compare`] checks that:
//!
//! 1. the decoded output re-serializes to what the node actually sent, and
//! 2. every recorded exchange matches the fixture file, if one is bound.
//!
//! Fixture files are only written when the caller asks for it with
//! [`CompareMode::WriteOnMismatch`].
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use starknet_kit::*;
//!
//! # async fn example() -> Result<(), Error> {
//! let spy = Spy::new(MockTransport::new()).with_fixtures("tests/fixtures/mock/call.json");
//! let spy = Arc::new(spy);
//! let starknet = Starknet::mock().transport(spy.clone()).build();
//!
//! let call = FunctionCall::by_name("0xdeadbeef", "decimals")?;
//! let output = starknet.call(&call, BlockId::latest()).await?;
//!
//! let diff = spy.compare(&output, CompareMode::Strict)?;
//! assert_eq!(diff.as_str(), "FullMatch");
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::transport::{JsonRpcRequest, Transport, TransportFuture};
use crate::error::{RpcError, SpyError};

/// One recorded request/response pair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Exchange {
    pub method: String,
    pub params: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<serde_json::Value>,
}

impl Exchange {
    fn from_envelope(request: &JsonRpcRequest, envelope: &serde_json::Value) -> Self {
        Self {
            method: request.method.clone(),
            params: request.params.clone(),
            result: envelope.get("result").cloned(),
            error: envelope.get("error").cloned(),
        }
    }

    fn same_request(&self, other: &Exchange) -> bool {
        self.method == other.method && self.params == other.params
    }
}

/// Outcome of a comparison, weakest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Diff {
    /// The values differ.
    NoMatch,
    /// The recorded value contains everything in the other, and more.
    SupersetMatch,
    /// The values are identical.
    FullMatch,
}

impl Diff {
    /// Get the string form of this outcome.
    pub fn as_str(&self) -> &'static str {
        match self {
            Diff::NoMatch => "NoMatch",
            Diff::SupersetMatch => "SupersetMatch",
            Diff::FullMatch => "FullMatch",
        }
    }

    /// Returns true for [`Diff::FullMatch`].
    pub fn is_full_match(&self) -> bool {
        matches!(self, Diff::FullMatch)
    }
}

impl fmt::Display for Diff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What [`Spy::compare`] may do on a mismatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompareMode {
    /// Report only. Never touches the fixture file.
    Strict,
    /// Persist the recorded exchanges into the fixture file on a mismatch.
    WriteOnMismatch,
}

/// Lifecycle of a spy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpyState {
    /// Nothing sent yet.
    Idle,
    /// At least one exchange recorded.
    Recording,
    /// [`Spy::compare`] has run; further requests are rejected.
    Compared,
}

#[derive(Debug)]
struct SpyLog {
    state: SpyState,
    exchanges: Vec<Exchange>,
}

/// Transport wrapper recording every exchange for later comparison.
///
/// A spy belongs to one test: create it, run the calls, compare, drop it.
#[derive(Debug)]
pub struct Spy<T> {
    inner: T,
    fixtures: Option<PathBuf>,
    log: Mutex<SpyLog>,
}

impl<T: Transport> Spy<T> {
    /// Wrap a transport.
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            fixtures: None,
            log: Mutex::new(SpyLog {
                state: SpyState::Idle,
                exchanges: Vec::new(),
            }),
        }
    }

    /// Compare recorded exchanges against this fixture file as well.
    ///
    /// A missing file counts as an empty fixture set.
    pub fn with_fixtures(mut self, path: impl Into<PathBuf>) -> Self {
        self.fixtures = Some(path.into());
        self
    }

    /// Get the wrapped transport.
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Get the current lifecycle state.
    pub fn state(&self) -> SpyState {
        self.lock().state
    }

    /// Get a copy of everything recorded so far.
    pub fn exchanges(&self) -> Vec<Exchange> {
        self.lock().exchanges.clone()
    }

    /// Compare `output` with the last recorded response, and every recorded
    /// exchange with the fixture file.
    ///
    /// Returns the weakest outcome of all comparisons. May be called more
    /// than once, e.g. first with [`CompareMode::Strict`] and then again with
    /// [`CompareMode::WriteOnMismatch`] to capture the new fixtures.
    pub fn compare<O: Serialize + ?Sized>(
        &self,
        output: &O,
        mode: CompareMode,
    ) -> Result<Diff, SpyError> {
        let decoded = serde_json::to_value(output)?;

        let mut log = self.lock();
        let last = log.exchanges.last().ok_or(SpyError::NothingRecorded)?;
        let recorded = last.result.clone().unwrap_or(serde_json::Value::Null);

        let mut diff = json_diff(&recorded, &decoded);
        if diff != Diff::FullMatch {
            warn!(
                diff = %diff,
                recorded = %recorded,
                decoded = %decoded,
                "decoded output differs from the recorded response"
            );
        }

        if let Some(path) = &self.fixtures {
            let fixtures = load_fixtures(path)?;
            let fixture_diff = diff_against_fixtures(&log.exchanges, &fixtures);
            if fixture_diff != Diff::FullMatch {
                warn!(
                    diff = %fixture_diff,
                    fixtures = %path.display(),
                    "recorded exchanges differ from fixtures"
                );
            }
            diff = diff.min(fixture_diff);

            if diff != Diff::FullMatch && mode == CompareMode::WriteOnMismatch {
                let merged = merge_fixtures(fixtures, &log.exchanges);
                write_fixtures(path, &merged)?;
                info!(
                    fixtures = %path.display(),
                    exchanges = log.exchanges.len(),
                    "wrote recorded exchanges to fixtures"
                );
            }
        }

        log.state = SpyState::Compared;
        Ok(diff)
    }

    fn lock(&self) -> MutexGuard<'_, SpyLog> {
        self.log.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn begin(&self) -> Result<(), RpcError> {
        let mut log = self.lock();
        if log.state == SpyState::Compared {
            return Err(RpcError::Transport(
                "spy has already been compared; use a new spy per test".to_string(),
            ));
        }
        log.state = SpyState::Recording;
        Ok(())
    }
}

impl<T: Transport> Transport for Spy<T> {
    fn send<'a>(&'a self, request: &'a JsonRpcRequest) -> TransportFuture<'a> {
        if let Err(e) = self.begin() {
            return Box::pin(async move { Err(e) });
        }
        Box::pin(async move {
            let envelope = self.inner.send(request).await?;
            self.lock()
                .exchanges
                .push(Exchange::from_envelope(request, &envelope));
            Ok(envelope)
        })
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Compare two JSON values, `first` being the reference.
fn json_diff(first: &serde_json::Value, second: &serde_json::Value) -> Diff {
    if first == second {
        Diff::FullMatch
    } else if is_superset(first, second) {
        Diff::SupersetMatch
    } else {
        Diff::NoMatch
    }
}

fn is_superset(first: &serde_json::Value, second: &serde_json::Value) -> bool {
    use serde_json::Value;

    match (first, second) {
        (Value::Object(a), Value::Object(b)) => b
            .iter()
            .all(|(key, value)| a.get(key).is_some_and(|av| is_superset(av, value))),
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| is_superset(x, y))
        }
        _ => first == second,
    }
}

fn diff_against_fixtures(recorded: &[Exchange], fixtures: &[Exchange]) -> Diff {
    recorded
        .iter()
        .map(|exchange| match fixtures.iter().find(|f| f.same_request(exchange)) {
            None => Diff::NoMatch,
            Some(fixture) if fixture.error != exchange.error => Diff::NoMatch,
            Some(fixture) => match (&exchange.result, &fixture.result) {
                (Some(actual), Some(expected)) => json_diff(actual, expected),
                (None, None) => Diff::FullMatch,
                _ => Diff::NoMatch,
            },
        })
        .min()
        .unwrap_or(Diff::FullMatch)
}

fn merge_fixtures(mut fixtures: Vec<Exchange>, recorded: &[Exchange]) -> Vec<Exchange> {
    for exchange in recorded {
        match fixtures.iter_mut().find(|f| f.same_request(exchange)) {
            Some(existing) => *existing = exchange.clone(),
            None => fixtures.push(exchange.clone()),
        }
    }
    fixtures
}

fn load_fixtures(path: &Path) -> Result<Vec<Exchange>, SpyError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = std::fs::read_to_string(path).map_err(|source| SpyError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|e| SpyError::Fixture {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn write_fixtures(path: &Path, fixtures: &[Exchange]) -> Result<(), SpyError> {
    let io_err = |source| SpyError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let mut content = serde_json::to_string_pretty(fixtures)?;
    content.push('\n');
    std::fs::write(path, content).map_err(io_err)
}
