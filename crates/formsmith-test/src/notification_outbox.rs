//! Notification capture for tests.
//!
//! [`NotificationOutbox`] implements [`Notifier`] by storing every
//! notification in a shared list instead of showing it, so tests can assert
//! on exactly what the user would have seen.
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//! use formsmith_submit::{Notification, Notifier};
//! use formsmith_test::notification_outbox::NotificationOutbox;
//!
//! let outbox = NotificationOutbox::new();
//! outbox.notify(Notification::success("Saved", Duration::from_secs(3)));
//!
//! assert_eq!(outbox.len(), 1);
//! outbox.assert_last("Saved");
//! ```

use std::sync::{Arc, Mutex};

use formsmith_submit::{Notification, NotificationLevel, Notifier};

/// An in-memory notifier that captures notifications for test verification.
///
/// Clones share the same list, so one clone can be handed to the code under
/// test and another kept for assertions.
#[derive(Debug, Clone, Default)]
pub struct NotificationOutbox {
    store: Arc<Mutex<Vec<Notification>>>,
}

impl NotificationOutbox {
    /// Creates an empty outbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all captured notifications, oldest first.
    pub fn notifications(&self) -> Vec<Notification> {
        self.store
            .lock()
            .expect("NotificationOutbox lock poisoned")
            .clone()
    }

    /// Returns the captured messages, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.notifications().into_iter().map(|n| n.message).collect()
    }

    /// Returns the number of captured notifications.
    pub fn len(&self) -> usize {
        self.store
            .lock()
            .expect("NotificationOutbox lock poisoned")
            .len()
    }

    /// Returns `true` if nothing has been notified.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears the outbox.
    pub fn clear(&self) {
        self.store
            .lock()
            .expect("NotificationOutbox lock poisoned")
            .clear();
    }

    /// Returns the most recent notification, if any.
    pub fn last(&self) -> Option<Notification> {
        self.store
            .lock()
            .expect("NotificationOutbox lock poisoned")
            .last()
            .cloned()
    }

    /// Asserts that exactly `expected` notifications were shown.
    ///
    /// # Panics
    ///
    /// Panics if the count does not match.
    pub fn assert_count(&self, expected: usize) {
        let actual = self.len();
        assert_eq!(
            actual, expected,
            "Expected {expected} notification(s), but {actual} were shown: {:?}",
            self.messages()
        );
    }

    /// Asserts that the most recent notification has the given message.
    ///
    /// # Panics
    ///
    /// Panics if the outbox is empty or the message differs.
    pub fn assert_last(&self, message: &str) {
        let last = self.last();
        assert_eq!(
            last.as_ref().map(|n| n.message.as_str()),
            Some(message),
            "Last notification was {last:?}"
        );
    }

    /// Asserts that the most recent notification has the given level.
    ///
    /// # Panics
    ///
    /// Panics if the outbox is empty or the level differs.
    pub fn assert_last_level(&self, level: NotificationLevel) {
        let last = self.last();
        assert_eq!(
            last.as_ref().map(|n| n.level),
            Some(level),
            "Last notification was {last:?}"
        );
    }
}

impl Notifier for NotificationOutbox {
    fn notify(&self, notification: Notification) {
        self.store
            .lock()
            .expect("NotificationOutbox lock poisoned")
            .push(notification);
    }
}
