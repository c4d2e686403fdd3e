//! User-facing notices.
//!
//! Fire-and-forget: `notify` never blocks and never fails, and the dialog
//! state never depends on whether anyone is listening.

use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A toast: a title and an optional line of detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub detail: Option<String>,
}

impl Notice {
    pub fn success(title: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: title.into(),
            detail,
        }
    }

    pub fn error(title: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.into(),
            detail,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

pub trait FeedbackChannel: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Queue-backed channel. Notices arrive at the [`ToastReceiver`] in call
/// order and are also logged.
#[derive(Clone)]
pub struct ToastChannel {
    sender: mpsc::UnboundedSender<Notice>,
}

pub struct ToastReceiver {
    receiver: mpsc::UnboundedReceiver<Notice>,
}

impl ToastChannel {
    pub fn new() -> (Self, ToastReceiver) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, ToastReceiver { receiver })
    }
}

impl FeedbackChannel for ToastChannel {
    fn notify(&self, notice: Notice) {
        match notice.kind {
            NoticeKind::Success => {
                tracing::info!(title = %notice.title, detail = ?notice.detail, "notice")
            }
            NoticeKind::Error => {
                tracing::warn!(title = %notice.title, detail = ?notice.detail, "notice")
            }
        }
        if self.sender.send(notice).is_err() {
            tracing::trace!("notice dropped (receiver gone)");
        }
    }
}

impl ToastReceiver {
    /// Everything queued so far, oldest first.
    pub fn drain(&mut self) -> Vec<Notice> {
        let mut notices = Vec::new();
        while let Ok(notice) = self.receiver.try_recv() {
            notices.push(notice);
        }
        notices
    }

    /// Waits for the next notice; `None` once every channel is dropped.
    pub async fn recv(&mut self) -> Option<Notice> {
        self.receiver.recv().await
    }
}
