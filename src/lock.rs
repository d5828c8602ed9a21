//! Whether a signal's actions may still be edited.
//!
//! A signal is `Editable` until its actions are persisted once. The transition
//! to `Locked` is one-way; the remedy is to delete and recreate the signal.

use crate::model::Signal;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum LockState {
    #[default]
    Editable,
    Locked,
}

/// Why a signal is locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockReason {
    /// The server already reported a non-empty action list.
    Persisted,
    /// This session completed a successful save.
    Saved,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LockPolicy {
    reason: Option<LockReason>,
}

impl LockPolicy {
    pub fn editable() -> Self {
        Self::default()
    }

    /// Starts a session from the authoritative server state.
    pub fn from_server(signal: &Signal) -> Self {
        Self {
            reason: signal.has_actions().then_some(LockReason::Persisted),
        }
    }

    /// Records a successful save. Has no effect once locked.
    pub fn lock(&mut self) {
        if self.reason.is_none() {
            self.reason = Some(LockReason::Saved);
        }
    }

    pub fn state(&self) -> LockState {
        match self.reason {
            Some(_) => LockState::Locked,
            None => LockState::Editable,
        }
    }

    pub fn reason(&self) -> Option<LockReason> {
        self.reason
    }

    pub fn is_locked(&self) -> bool {
        self.reason.is_some()
    }
}
