//! Client-local working copies of editable collections.
//!
//! A draft is owned by exactly one view. It is replaced wholesale whenever the
//! authoritative value changes and is never merged into the response cache.

mod actions;
mod mapping;

pub use actions::{ActionDraft, ActionRow, Field, FieldUpdate};
pub use mapping::{MappingDraft, MappingRow};
