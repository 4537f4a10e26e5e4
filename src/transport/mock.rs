//! # Mock Transport
//!
//! Utilities for testing clients and workflows without a network.
//!
//! Use [`MockTransport::new`] to get a transport, register responses with
//! [`MockTransport::expect`] (or the [`expect_get`](MockTransport::expect_get) /
//! [`expect_post`](MockTransport::expect_post) shorthands), run the code under test,
//! then inspect [`MockTransport::calls`] and finish with [`MockTransport::verify`].

use crate::transport::{ApiRequest, Transport, TransportError};
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

type Reply = Result<Value, TransportError>;

/// Responses registered for one `(method, path)` pair.
///
/// One-shot replies are consumed first, in registration order. Once they run
/// out, the persistent reply (if any) answers every further call.
#[derive(Default)]
struct Stub {
    once: VecDeque<Reply>,
    always: Option<Reply>,
}

/// A request as the mock saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: Method,
    pub address: String,
    pub path: String,
    pub body: Option<Value>,
    pub bearer: Option<String>,
}

#[derive(Default)]
struct MockState {
    stubs: HashMap<(Method, String), Stub>,
    journal: Vec<RecordedCall>,
}

/// A scripted transport with a call journal.
///
/// # Example
/// ```ignore
/// let mock = MockTransport::new();
/// mock.expect_post("/api/v1/users/login").return_ok(json!({"data": {"token": "t", "userId": "u"}}));
/// mock.expect_get("/api/v1/contactservice/contacts").always_ok(json!({"data": []}));
///
/// let transport: Arc<dyn Transport> = Arc::new(mock.clone());
/// // Use transport in tests...
/// mock.verify(); // Ensures all one-shot expectations were consumed
/// ```
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    /// Creates a mock with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a request with the given method and path.
    ///
    /// A path ending in `*` matches every path starting with what precedes it;
    /// an exact stub wins over a wildcard one.
    pub fn expect(&self, method: Method, path: impl Into<String>) -> StubBuilder {
        StubBuilder {
            key: (method, path.into()),
            state: self.state.clone(),
        }
    }

    /// Expects a `GET` on `path`.
    pub fn expect_get(&self, path: impl Into<String>) -> StubBuilder {
        self.expect(Method::GET, path)
    }

    /// Expects a `POST` on `path`.
    pub fn expect_post(&self, path: impl Into<String>) -> StubBuilder {
        self.expect(Method::POST, path)
    }

    /// Every request received so far, in arrival order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().journal.clone()
    }

    /// Requests received on `path`, in arrival order.
    pub fn calls_to(&self, path: &str) -> Vec<RecordedCall> {
        self.lock()
            .journal
            .iter()
            .filter(|call| call.path == path)
            .cloned()
            .collect()
    }

    /// Verifies that all one-shot expectations were consumed.
    pub fn verify(&self) {
        let state = self.lock();
        let remaining: usize = state.stubs.values().map(|stub| stub.once.len()).sum();
        if remaining > 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().expect("mock transport state poisoned")
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, TransportError> {
        let mut state = self.lock();
        state.journal.push(RecordedCall {
            method: request.method.clone(),
            address: request.address.clone(),
            path: request.path.clone(),
            body: request.body.clone(),
            bearer: request.bearer.clone(),
        });

        let key = (request.method.clone(), request.path.clone());
        let key = if state.stubs.contains_key(&key) {
            Some(key)
        } else {
            state
                .stubs
                .keys()
                .filter(|(method, pattern)| {
                    *method == request.method
                        && pattern
                            .strip_suffix('*')
                            .is_some_and(|prefix| request.path.starts_with(prefix))
                })
                .max_by_key(|(_, pattern)| pattern.len())
                .cloned()
        };
        let reply = key
            .and_then(|key| state.stubs.get_mut(&key))
            .and_then(|stub| stub.once.pop_front().or_else(|| stub.always.clone()));

        reply.unwrap_or_else(|| {
            Err(TransportError::Request {
                url: request.url(),
                message: format!("no stub for {} {}", request.method, request.path),
            })
        })
    }
}

/// Builder returned by [`MockTransport::expect`].
pub struct StubBuilder {
    key: (Method, String),
    state: Arc<Mutex<MockState>>,
}

impl StubBuilder {
    /// Answers the next matching call with `body`.
    pub fn return_ok(self, body: Value) {
        self.push_once(Ok(body));
    }

    /// Fails the next matching call with `error`.
    pub fn return_err(self, error: TransportError) {
        self.push_once(Err(error));
    }

    /// Answers every matching call (after any one-shots) with `body`.
    pub fn always_ok(self, body: Value) {
        let mut state = self.state.lock().expect("mock transport state poisoned");
        state.stubs.entry(self.key).or_default().always = Some(Ok(body));
    }

    fn push_once(self, reply: Reply) {
        let mut state = self.state.lock().expect("mock transport state poisoned");
        state.stubs.entry(self.key).or_default().once.push_back(reply);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_one_shot_then_persistent() {
        let mock = MockTransport::new();
        mock.expect_get("/x").return_ok(json!({"data": 1}));
        mock.expect_get("/x").always_ok(json!({"data": 2}));

        let first = mock.send(ApiRequest::new(Method::GET, "h:1", "/x")).await;
        let second = mock.send(ApiRequest::new(Method::GET, "h:1", "/x")).await;
        let third = mock.send(ApiRequest::new(Method::GET, "h:1", "/x")).await;

        assert_eq!(first, Ok(json!({"data": 1})));
        assert_eq!(second, Ok(json!({"data": 2})));
        assert_eq!(third, Ok(json!({"data": 2})));
        assert_eq!(mock.calls().len(), 3);
        mock.verify();
    }

    #[tokio::test]
    async fn test_unstubbed_request_fails_and_is_journaled() {
        let mock = MockTransport::new();
        let result = mock
            .send(ApiRequest::new(Method::POST, "h:1", "/nowhere").with_bearer("t"))
            .await;

        assert!(matches!(result, Err(TransportError::Request { .. })));
        let calls = mock.calls_to("/nowhere");
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].bearer.as_deref(), Some("t"));
    }

    #[test]
    #[should_panic(expected = "Not all expectations were met")]
    fn test_verify_panics_on_leftovers() {
        let mock = MockTransport::new();
        mock.expect_post("/y").return_ok(json!({}));
        mock.verify();
    }

    #[tokio::test]
    async fn test_wildcard_path_and_exact_precedence() {
        let mock = MockTransport::new();
        mock.expect_get("/foods/*").always_ok(json!({"data": "any"}));
        mock.expect_get("/foods/1/a").return_ok(json!({"data": "exact"}));

        let exact = mock.send(ApiRequest::new(Method::GET, "h:1", "/foods/1/a")).await;
        let wild = mock.send(ApiRequest::new(Method::GET, "h:1", "/foods/2/b")).await;
        let other = mock.send(ApiRequest::new(Method::POST, "h:1", "/foods/2/b")).await;

        assert_eq!(exact, Ok(json!({"data": "exact"})));
        assert_eq!(wild, Ok(json!({"data": "any"})));
        assert!(other.is_err());
        mock.verify();
    }
}
