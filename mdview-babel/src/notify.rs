//! One-way notification channel from the host to the display process
//!
//! Messages are fire-and-forget: [`Notifier::push`] never blocks and never fails. When the
//! receiving side has gone away the message is dropped.
//!
//! On the wire every message is a JSON object with the channel name and its payload:
//!
//! ```text
//! {"channel":"file:open","payload":{"path":"/tmp/readme.md","content":"<div …>"}}
//! {"channel":"file:convert","payload":{"path":"/tmp/out.pdf"}}
//! ```

use serde::Serialize;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};

/// Messages pushed to the display process
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "channel", content = "payload")]
pub enum Notification {
    #[serde(rename = "file:open")]
    DocumentLoaded {
        path: PathBuf,
        #[serde(rename = "content")]
        html_content: String,
    },
    #[serde(rename = "file:convert")]
    ExportCompleted { path: PathBuf },
}

impl Notification {
    /// Wire name of the channel this message travels on
    pub fn channel(&self) -> &'static str {
        match self {
            Notification::DocumentLoaded { .. } => "file:open",
            Notification::ExportCompleted { .. } => "file:convert",
        }
    }
}

/// Sending half of the notification channel
#[derive(Debug, Clone)]
pub struct Notifier {
    sender: Sender<Notification>,
}

impl Notifier {
    pub fn new(sender: Sender<Notification>) -> Self {
        Self { sender }
    }

    pub fn push(&self, notification: Notification) {
        let channel = notification.channel();
        if self.sender.send(notification).is_err() {
            tracing::debug!(channel, "display disconnected, dropping notification");
        }
    }
}

/// Create a connected notifier and the receiver the display side drains.
pub fn channel() -> (Notifier, Receiver<Notification>) {
    let (sender, receiver) = mpsc::channel();
    (Notifier::new(sender), receiver)
}
