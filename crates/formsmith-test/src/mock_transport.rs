//! A scripted submission transport.
//!
//! [`MockTransport`] records every posted record and answers from a script:
//! queued responses are used first, then the default response. A gated
//! transport holds each request until [`MockTransport::release`] is called,
//! which keeps a submission in flight for as long as a test needs.
//!
//! ## Example
//!
//! ```rust
//! use formsmith_test::mock_transport::{MockResponse, MockTransport};
//!
//! let transport = MockTransport::new().then_respond(MockResponse::fail("HTTP 500"));
//! assert_eq!(transport.post_count(), 0);
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::{Notify, Semaphore};

use formsmith_submit::{SubmissionRecord, SubmitTransport, TransportError};

/// How the mock answers one post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockResponse {
    /// The endpoint accepted the record.
    Accept,
    /// The post failed with the given reason.
    Fail(String),
}

impl MockResponse {
    pub fn fail(reason: impl Into<String>) -> Self {
        Self::Fail(reason.into())
    }
}

#[derive(Debug)]
struct Inner {
    posts: Mutex<Vec<SubmissionRecord>>,
    script: Mutex<VecDeque<MockResponse>>,
    default: MockResponse,
    gate: Option<Semaphore>,
    arrived: Notify,
}

/// A [`SubmitTransport`] that never touches the network.
///
/// Clones share recorded posts, the script, and the gate.
#[derive(Debug, Clone)]
pub struct MockTransport {
    inner: Arc<Inner>,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTransport {
    /// Creates a transport that accepts every post.
    pub fn new() -> Self {
        Self::build(MockResponse::Accept, false)
    }

    /// Creates a transport that fails every post with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self::build(MockResponse::fail(reason), false)
    }

    /// Creates an accepting transport whose posts wait for
    /// [`release`](Self::release).
    pub fn gated() -> Self {
        Self::build(MockResponse::Accept, true)
    }

    fn build(default: MockResponse, gated: bool) -> Self {
        Self {
            inner: Arc::new(Inner {
                posts: Mutex::new(Vec::new()),
                script: Mutex::new(VecDeque::new()),
                default,
                gate: gated.then(|| Semaphore::new(0)),
                arrived: Notify::new(),
            }),
        }
    }

    /// Queues a response for the next unanswered post.
    #[must_use]
    pub fn then_respond(self, response: MockResponse) -> Self {
        self.inner
            .script
            .lock()
            .expect("MockTransport lock poisoned")
            .push_back(response);
        self
    }

    /// Lets one held post complete. Has no effect on an ungated transport.
    pub fn release(&self) {
        if let Some(gate) = &self.inner.gate {
            gate.add_permits(1);
        }
    }

    /// Waits until a post has reached the transport.
    pub async fn wait_for_post(&self) {
        self.inner.arrived.notified().await;
    }

    /// Returns every record posted so far.
    pub fn posts(&self) -> Vec<SubmissionRecord> {
        self.inner
            .posts
            .lock()
            .expect("MockTransport lock poisoned")
            .clone()
    }

    /// Returns the number of posts made.
    pub fn post_count(&self) -> usize {
        self.inner
            .posts
            .lock()
            .expect("MockTransport lock poisoned")
            .len()
    }

    /// Returns the most recent posted record.
    pub fn last_post(&self) -> Option<SubmissionRecord> {
        self.posts().pop()
    }

    fn next_response(&self) -> MockResponse {
        self.inner
            .script
            .lock()
            .expect("MockTransport lock poisoned")
            .pop_front()
            .unwrap_or_else(|| self.inner.default.clone())
    }
}

#[async_trait]
impl SubmitTransport for MockTransport {
    async fn post(&self, record: &SubmissionRecord) -> Result<(), TransportError> {
        self.inner
            .posts
            .lock()
            .expect("MockTransport lock poisoned")
            .push(record.clone());
        self.inner.arrived.notify_one();

        if let Some(gate) = &self.inner.gate {
            gate.acquire()
                .await
                .expect("MockTransport gate closed")
                .forget();
        }

        match self.next_response() {
            MockResponse::Accept => Ok(()),
            MockResponse::Fail(reason) => Err(TransportError::new(reason)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formsmith_submit::SubmissionEntry;

    fn record(value: &str) -> SubmissionRecord {
        SubmissionRecord::new(vec![SubmissionEntry::new("Name", value)])
    }

    #[tokio::test]
    async fn test_accepts_and_records() {
        let transport = MockTransport::new();
        transport.post(&record("a")).await.unwrap();
        transport.post(&record("b")).await.unwrap();
        assert_eq!(transport.post_count(), 2);
        assert_eq!(transport.last_post().unwrap().value_of("Name"), Some("b"));
    }

    #[tokio::test]
    async fn test_failing_default() {
        let transport = MockTransport::failing("HTTP 502");
        let err = transport.post(&record("a")).await.unwrap_err();
        assert_eq!(err.reason(), "HTTP 502");
    }

    #[tokio::test]
    async fn test_script_then_default() {
        let transport = MockTransport::new()
            .then_respond(MockResponse::fail("timeout"))
            .then_respond(MockResponse::Accept);
        assert!(transport.post(&record("1")).await.is_err());
        assert!(transport.post(&record("2")).await.is_ok());
        assert!(transport.post(&record("3")).await.is_ok());
    }

    #[tokio::test]
    async fn test_gate_holds_until_released() {
        let transport = MockTransport::gated();
        let task = {
            let transport = transport.clone();
            tokio::spawn(async move { transport.post(&record("held")).await })
        };

        transport.wait_for_post().await;
        assert_eq!(transport.post_count(), 1);
        assert!(!task.is_finished());

        transport.release();
        task.await.unwrap().unwrap();
    }
}
