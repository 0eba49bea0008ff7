//! # Foodie API
//!
//! HTTP client adapter for the FoodieDelight REST API.
//!
//! One network round trip per operation, no retries, no local caching.
//! Success requires both a 2xx transport status and an embedded
//! `status == 200` inside the response body; the dual check mirrors the
//! deployed backend's contract.

pub mod client;
pub mod envelope;

// Re-export commonly used items at crate root
pub use client::{ApiClient, DEFAULT_BASE_URL};
pub use envelope::{ApiEnvelope, MenuListing, NO_DATA_MESSAGE};
