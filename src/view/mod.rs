//! Editing views.
//!
//! Each view owns its draft and is driven by one task through `&mut self`.
//! Loading a view fetches through the shared cache; a failed load is a
//! page-level error and no view is built.

mod directory;
mod mapping;
mod signal;

pub use directory::SignalDirectory;
pub use mapping::{MappingEditor, MappingStatus};
pub use signal::SignalEditor;

/// Result of a draft edit that the lock policy may refuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit<T> {
    Applied(T),
    /// The signal is locked; nothing changed.
    Locked,
}

impl<T> Edit<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Edit::Applied(_))
    }

    pub fn applied(self) -> Option<T> {
        match self {
            Edit::Applied(v) => Some(v),
            Edit::Locked => None,
        }
    }
}
