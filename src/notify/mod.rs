//! Notification service.
//!
//! Views and the dispatcher receive a [`Notifier`] explicitly instead of
//! looking up an ambient context. [`ToastCenter`] keeps each message alive for
//! a fixed duration and broadcasts every push to subscribers.

mod toast;

pub use toast::{Toast, ToastCenter, ToastKind};

/// Publishes short user-facing messages.
pub trait Notifier: Send + Sync {
    fn push(
        &self,
        message: &str,
        kind: ToastKind,
    );

    fn success(
        &self,
        message: &str,
    ) {
        self.push(message, ToastKind::Success);
    }

    fn error(
        &self,
        message: &str,
    ) {
        self.push(message, ToastKind::Error);
    }

    fn info(
        &self,
        message: &str,
    ) {
        self.push(message, ToastKind::Info);
    }
}
