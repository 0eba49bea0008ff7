//! # Foodie Cache
//!
//! Request-keyed server-state cache for the FoodieDelight client.
//!
//! Each server-owned collection gets one `CollectionCache`, injected
//! explicitly into whatever needs it. Reads share in-flight fetches,
//! mutations invalidate, and consumers observe entries through `watch`
//! receivers; the cache never calls into consumer logic.

pub mod collection;
pub mod entry;
pub mod key;

// Re-export commonly used items at crate root
pub use collection::CollectionCache;
pub use entry::{EntryState, FetchStatus};
pub use key::CacheKey;
