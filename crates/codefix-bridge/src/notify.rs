//! Host-level user notifications.
//!
//! Apply success/failure, missing documents, and template errors are
//! reported to the user by the host, never echoed back into the panel
//! protocol. The terminal front end drains these into its status bar.

use tokio::sync::mpsc;
use tracing::{error, info};

/// Notification severity shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotifyLevel,
    pub message: String,
}

/// Sink for user-visible notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, level: NotifyLevel, message: &str);
}

/// Notifier that forwards into an unbounded channel. Sends after the
/// receiver is gone are dropped; the log line above still records them.
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, level: NotifyLevel, message: &str) {
        match level {
            NotifyLevel::Info => info!(target: "codefix::notify", "{message}"),
            NotifyLevel::Error => error!(target: "codefix::notify", "{message}"),
        }
        let _ = self.tx.send(Notification {
            level,
            message: message.to_string(),
        });
    }
}
