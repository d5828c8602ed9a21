//! Data model shared by the transport, drafts and views.

mod combo;
mod mapping;
mod signal;

pub use combo::{COMBO_KEY_PATTERN, ComboKey, Combination, combo_key, enumerate_combinations};
pub use mapping::{MappingDocument, MappingEntryRequest, parse_action_list, split_list};
pub use signal::{Action, CreateSignalRequest, PutActionsRequest, Signal, SignalList};
