//! # formsmith-test
//!
//! Testing tools for formsmith. Provides a capturing notifier, a scripted
//! submission transport, a live HTTP endpoint for transport tests, and
//! fixtures for sessions and field collections.
//!
//! ## Modules
//!
//! - [`notification_outbox`] - [`NotificationOutbox`] captures notifications
//! - [`mock_transport`] - [`MockTransport`] records posts and answers from a script
//! - [`live_endpoint`] - [`LiveEndpoint`] serves a real `/submit` route on a random port
//! - [`fixtures`] - Sessions, collections, and pipelines ready for use

pub mod fixtures;
pub mod live_endpoint;
pub mod mock_transport;
pub mod notification_outbox;

pub use fixtures::{admin_session, collection_with, configure, mock_pipeline, user_session};
pub use live_endpoint::LiveEndpoint;
pub use mock_transport::{MockResponse, MockTransport};
pub use notification_outbox::NotificationOutbox;
