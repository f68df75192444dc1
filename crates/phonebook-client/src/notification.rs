// # Notifications
//
// At most one banner is visible. Every `show` issues a fresh token and
// aborts the clear timer of the banner it replaces; a clear request only
// takes effect when its token is still the current one.

use std::fmt;
use tokio::task::AbortHandle;

/// Banner styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationKind::Success => write!(f, "success"),
            NotificationKind::Error => write!(f, "error"),
        }
    }
}

/// A visible banner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub text: String,
    pub kind: NotificationKind,
    pub token: u64,
}

#[derive(Debug, Default)]
pub struct NotificationCenter {
    current: Option<Notification>,
    last_token: u64,
    clear_timer: Option<AbortHandle>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the visible banner and return its token
    pub fn show(&mut self, text: impl Into<String>, kind: NotificationKind) -> u64 {
        if let Some(timer) = self.clear_timer.take() {
            timer.abort();
        }

        self.last_token += 1;
        self.current = Some(Notification {
            text: text.into(),
            kind,
            token: self.last_token,
        });
        self.last_token
    }

    /// Attach the timer that will clear the current banner
    pub fn set_clear_timer(&mut self, timer: AbortHandle) {
        if let Some(previous) = self.clear_timer.replace(timer) {
            previous.abort();
        }
    }

    /// Clear the banner if `token` is still current
    ///
    /// Returns `true` when the banner was cleared.
    pub fn dismiss(&mut self, token: u64) -> bool {
        match &self.current {
            Some(notification) if notification.token == token => {
                self.current = None;
                self.clear_timer = None;
                true
            }
            _ => false,
        }
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }
}
