//! Access to the admin API.
//!
//! - `Transport`: raw JSON request seam
//! - `HttpTransport`: reqwest-backed transport for a live server
//! - `MemTransport`: in-memory server stand-in for tests and demos
//! - `ApiClient`: typed, schema-checked, cached calls

mod client;
mod http;
mod mem;
mod transport;

pub use client::ApiClient;
pub use http::HttpTransport;
pub use mem::MemTransport;
pub use transport::{HttpMethod, Transport};
