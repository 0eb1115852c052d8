//! src/eventbus/mod.rs
//!
//! In-process event bus for authentication state changes. Each subscriber
//! gets its own bounded MPSC queue and sees transitions in order. Publishing
//! never waits on a subscriber.

use std::sync::Arc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, watch, Mutex};
use tracing::warn;

/// Why the session went back to anonymous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutReason {
    /// The user asked to log out.
    UserRequested,
    /// The backend answered 401/403 to an authenticated call.
    AuthRejected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    /// A token was stored. Carries a log-safe fingerprint, never the token.
    LoggedIn { fingerprint: String },
    LoggedOut { reason: LogoutReason },
}

impl AuthEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            AuthEvent::LoggedIn { .. } => "auth.logged_in",
            AuthEvent::LoggedOut { .. } => "auth.logged_out",
        }
    }
}

/// Each subscriber gets its own `mpsc::Sender<AuthEvent>`.
///
/// - If a subscriber's buffer is full, that subscriber misses the event.
/// - Subscribers whose `Receiver` was dropped are pruned on the next publish.
#[derive(Clone)]
pub struct EventBus {
    subscribers: Arc<Mutex<Vec<mpsc::Sender<AuthEvent>>>>,
    shutdown_tx: watch::Sender<bool>,
    pub shutdown_rx: watch::Receiver<bool>,
}

const DEFAULT_BUFFER_SIZE: usize = 64;

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(false);
        Self {
            subscribers: Arc::new(Mutex::new(vec![])),
            shutdown_tx: tx,
            shutdown_rx: rx,
        }
    }

    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    pub fn is_shutdown(&self) -> bool {
        *self.shutdown_rx.borrow()
    }

    /// Returns a receiver on which events will be delivered.
    pub async fn subscribe(&self, buffer_size: Option<usize>) -> mpsc::Receiver<AuthEvent> {
        let size = buffer_size.unwrap_or(DEFAULT_BUFFER_SIZE);
        let (tx, rx) = mpsc::channel(size);
        let mut subs = self.subscribers.lock().await;
        subs.push(tx);
        rx
    }

    /// Publish an event to all live subscribers. No-op after shutdown.
    pub async fn publish(&self, event: AuthEvent) {
        if self.is_shutdown() {
            return;
        }
        let mut subs = self.subscribers.lock().await;
        subs.retain(|s| !s.is_closed());
        for s in subs.iter() {
            match s.try_send(event.clone()) {
                Ok(()) | Err(TrySendError::Closed(_)) => {}
                Err(TrySendError::Full(_)) => {
                    warn!("Auth event subscriber is not keeping up; dropped {}", event.event_type());
                }
            }
        }
    }

    pub async fn subscriber_count(&self) -> usize {
        let subs = self.subscribers.lock().await;
        subs.iter().filter(|s| !s.is_closed()).count()
    }
}
