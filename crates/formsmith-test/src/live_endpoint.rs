//! A live HTTP endpoint for transport tests.
//!
//! [`LiveEndpoint`] binds a small Axum application to a random local port.
//! It accepts JSON posts on `/submit`, records each body, and answers with a
//! configurable status after an optional delay.
//!
//! ## Example
//!
//! ```rust,no_run
//! use axum::http::StatusCode;
//! use formsmith_test::live_endpoint::LiveEndpoint;
//!
//! async fn example() {
//!     let endpoint = LiveEndpoint::start(StatusCode::CREATED).await;
//!     println!("posting to {}", endpoint.submit_url());
//!     endpoint.stop().await;
//! }
//! ```

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

#[derive(Clone)]
struct EndpointState {
    status: StatusCode,
    delay: Option<Duration>,
    received: Arc<Mutex<Vec<serde_json::Value>>>,
}

async fn receive(
    State(state): State<EndpointState>,
    Json(body): Json<serde_json::Value>,
) -> (StatusCode, Json<serde_json::Value>) {
    state
        .received
        .lock()
        .expect("LiveEndpoint lock poisoned")
        .push(body);
    if let Some(delay) = state.delay {
        tokio::time::sleep(delay).await;
    }
    (state.status, Json(serde_json::json!({ "id": 101 })))
}

/// A running local endpoint. Stop it with [`stop`](Self::stop); dropping it
/// also signals shutdown.
pub struct LiveEndpoint {
    addr: SocketAddr,
    received: Arc<Mutex<Vec<serde_json::Value>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    server_handle: Option<JoinHandle<()>>,
}

impl LiveEndpoint {
    /// Starts an endpoint answering every post with `status`.
    ///
    /// # Panics
    ///
    /// Panics if the TCP listener cannot be bound.
    pub async fn start(status: StatusCode) -> Self {
        Self::start_with_delay(status, None).await
    }

    /// Starts an endpoint that waits `delay` before answering.
    ///
    /// # Panics
    ///
    /// Panics if the TCP listener cannot be bound.
    pub async fn start_with_delay(status: StatusCode, delay: Option<Duration>) -> Self {
        let received = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new()
            .route("/submit", post(receive))
            .with_state(EndpointState {
                status,
                delay,
                received: received.clone(),
            });

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().expect("Failed to get local address");
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let server_handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .ok();
        });

        Self {
            addr,
            received,
            shutdown_tx: Some(shutdown_tx),
            server_handle: Some(server_handle),
        }
    }

    /// Returns the full URL of the submit route.
    pub fn submit_url(&self) -> String {
        format!("http://{}/submit", self.addr)
    }

    /// Returns the bound address.
    pub const fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Returns every JSON body received, oldest first.
    pub fn received(&self) -> Vec<serde_json::Value> {
        self.received
            .lock()
            .expect("LiveEndpoint lock poisoned")
            .clone()
    }

    /// Shuts the server down and waits for it to exit.
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.server_handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for LiveEndpoint {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
