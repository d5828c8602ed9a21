use std::sync::{Arc, RwLock};

use tokio::sync::broadcast;
use tracing::debug;

use crate::{ShareLock, common::BroadcastQueue, notify::Notifier, utils};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ToastKind {
    Success,
    Error,
    #[default]
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: String,
    pub message: String,
    pub kind: ToastKind,
    /// Creation time in milliseconds.
    pub created_at: i64,
    /// Time in milliseconds after which the toast is gone.
    pub expires_at: i64,
}

impl Toast {
    pub fn is_expired(
        &self,
        now: i64,
    ) -> bool {
        now >= self.expires_at
    }
}

/// Process-wide toast queue with bounded message lifetime.
pub struct ToastCenter {
    toasts: ShareLock<Vec<Toast>>,
    queue: Arc<BroadcastQueue<Toast>>,
    // lifetime of a toast in milliseconds
    ttl: i64,
}

impl ToastCenter {
    pub fn new(
        ttl_ms: u64,
        queue_size: usize,
    ) -> Self {
        Self {
            toasts: Arc::new(RwLock::new(Vec::new())),
            queue: BroadcastQueue::new(queue_size),
            ttl: i64::try_from(ttl_ms).unwrap_or(i64::MAX),
        }
    }

    /// Receives every toast pushed after subscribing.
    pub fn subscribe(&self) -> broadcast::Receiver<Toast> {
        self.queue.subscribe()
    }

    /// Toasts still alive now, oldest first.
    pub fn active(&self) -> Vec<Toast> {
        self.active_at(utils::time::time_millis())
    }

    pub fn active_at(
        &self,
        now: i64,
    ) -> Vec<Toast> {
        let mut toasts = self.toasts.write().unwrap();
        toasts.retain(|t| !t.is_expired(now));
        toasts.clone()
    }

    pub fn dismiss(
        &self,
        id: &str,
    ) {
        self.toasts.write().unwrap().retain(|t| t.id != id);
    }

    fn push_at(
        &self,
        message: &str,
        kind: ToastKind,
        now: i64,
    ) -> Toast {
        let toast = Toast {
            id: utils::longid(),
            message: message.to_string(),
            kind,
            created_at: now,
            expires_at: now.saturating_add(self.ttl),
        };
        debug!("toast::{}({})", kind.as_ref(), message);

        let mut toasts = self.toasts.write().unwrap();
        toasts.retain(|t| !t.is_expired(now));
        toasts.push(toast.clone());
        drop(toasts);

        if let Err(err) = self.queue.send(toast.clone()) {
            debug!("toast::broadcast({}) failed: {}", toast.id, err);
        }
        toast
    }
}

impl Notifier for ToastCenter {
    fn push(
        &self,
        message: &str,
        kind: ToastKind,
    ) {
        self.push_at(message, kind, utils::time::time_millis());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toasts_expire_after_ttl() {
        let center = ToastCenter::new(3000, 8);
        center.push_at("Saved", ToastKind::Success, 1_000);
        center.push_at("Save failed", ToastKind::Error, 2_000);

        assert_eq!(center.active_at(3_999).len(), 2);

        let active = center.active_at(4_000);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].message, "Save failed");

        assert!(center.active_at(5_000).is_empty());
    }

    #[test]
    fn test_dismiss() {
        let center = ToastCenter::new(3000, 8);
        let toast = center.push_at("Signal created", ToastKind::Success, 0);
        center.push_at("Signal deleted", ToastKind::Success, 0);

        center.dismiss(&toast.id);
        let active = center.active_at(1);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].message, "Signal deleted");
    }

    #[tokio::test]
    async fn test_subscribers_receive_pushes() {
        let center = ToastCenter::new(3000, 8);
        let mut rx = center.subscribe();

        center.error("Delete failed");

        let toast = rx.recv().await.unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.message, "Delete failed");
        assert_eq!(center.active().len(), 1);
    }

    #[test]
    fn test_push_after_subscriber_dropped() {
        let center = ToastCenter::new(3000, 1);
        drop(center.subscribe());

        center.push_at("Saved", ToastKind::Success, 0);
        center.push_at("Mapping saved", ToastKind::Success, 1);
        assert_eq!(center.active_at(2).len(), 2);
    }
}
