//! Transient toast notifications (fire-and-forget, deduplicated, auto-dismissed)

use std::time::{Duration, Instant};

pub const NO_RESULTS_MESSAGE: &str = "No movies found for your request.";
pub const REQUEST_FAILED_MESSAGE: &str = "There was an error, please try again...";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    NoResults,
    RequestFailed,
}

#[derive(Clone, Debug)]
pub struct Notification {
    pub key: String,
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: Instant,
}

#[derive(Clone, Debug)]
pub struct NotificationCenter {
    active: Vec<Notification>,
    ttl: Duration,
}

impl NotificationCenter {
    pub fn new(ttl: Duration) -> Self {
        Self {
            active: Vec::new(),
            ttl,
        }
    }

    /// Show a toast unless one with the same key is still visible.
    pub fn push(
        &mut self,
        kind: NotificationKind,
        key: impl Into<String>,
        message: impl Into<String>,
    ) -> bool {
        let key = key.into();
        if self.active.iter().any(|n| n.key == key) {
            tracing::trace!(key = %key, "Toast already visible");
            return false;
        }

        let message = message.into();
        tracing::debug!(key = %key, message = %message, "Showing toast");
        self.active.push(Notification {
            key,
            kind,
            message,
            created_at: Instant::now(),
        });
        true
    }

    pub fn prune(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.active
            .retain(|n| now.saturating_duration_since(n.created_at) < ttl);
    }

    pub fn active(&self) -> &[Notification] {
        &self.active
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(Duration::from_secs(4))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_key_is_not_shown_twice() {
        let mut center = NotificationCenter::default();
        let failed = NotificationKind::RequestFailed;
        assert!(center.push(failed, "request-failed", REQUEST_FAILED_MESSAGE));
        assert!(!center.push(failed, "request-failed", REQUEST_FAILED_MESSAGE));
        assert!(center.push(NotificationKind::NoResults, "no-results:zzz", NO_RESULTS_MESSAGE));
        assert_eq!(center.active().len(), 2);
    }

    #[test]
    fn toasts_expire_after_ttl() {
        let mut center = NotificationCenter::new(Duration::from_secs(4));
        center.push(NotificationKind::NoResults, "no-results:zzz", NO_RESULTS_MESSAGE);
        let shown_at = center.active()[0].created_at;

        center.prune(shown_at + Duration::from_secs(3));
        assert_eq!(center.active().len(), 1);

        center.prune(shown_at + Duration::from_secs(4));
        assert!(center.active().is_empty());

        // Key is free again once the toast is gone
        assert!(center.push(NotificationKind::NoResults, "no-results:zzz", NO_RESULTS_MESSAGE));
    }
}
