//! # Sigmap
//!
//! Sigmap is the client core of an admin console for signals, their actions and
//! the mapping between combinations of signal states and actions.
//!
//! ## Core Features
//!
//! - **Schema-checked Reads**: every API response is validated before use
//! - **Local Drafts**: action lists and mapping inputs are edited locally and submitted whole
//! - **Lock Policy**: a signal's actions become read-only once persisted
//! - **Cache Reconciliation**: mutations invalidate exactly the cached responses they affect
//! - **Notifications**: outcomes are published as short-lived toasts
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sigmap::{ConsoleBuilder, draft::Field};
//!
//! let console = ConsoleBuilder::new().base_url("http://127.0.0.1:7001").build()?;
//!
//! let mut editor = console.open_signal("EEG").await?;
//! let row = editor.add_row().applied().unwrap();
//! editor.update_field(row, Field::Name, "blink")?;
//! editor.update_field(row, Field::Bit, "1")?;
//! editor.save().await?;
//! ```

pub mod api;
mod builder;
pub mod common;
pub mod config;
mod console;
pub mod dispatcher;
pub mod draft;
mod error;
pub mod lock;
pub mod model;
pub mod notify;
pub mod schema;
mod utils;
pub mod view;

use std::sync::{Arc, RwLock};

pub use builder::ConsoleBuilder;
pub use config::Config;
pub use console::Console;
pub use error::{ErrorScope, SigmapError, ValidationError};

/// Result type alias for sigmap operations.
pub type Result<T> = std::result::Result<T, SigmapError>;

/// Thread-safe shared lock wrapper using Arc<RwLock<T>>.
pub(crate) type ShareLock<T> = Arc<RwLock<T>>;
