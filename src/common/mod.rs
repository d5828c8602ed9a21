mod cache;
mod queue;

pub use cache::{CacheKey, MemCache, ResponseCache};
pub use queue::BroadcastQueue;
