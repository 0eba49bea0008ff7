//! # Foodie Core
//!
//! Core types, traits, and error handling for the FoodieDelight client.
//!
//! This crate provides the foundational building blocks used throughout
//! the client workspace, including:
//!
//! - **Types**: entity identifiers and the cached `Collection` names
//! - **Traits**: the `Validatable` behavior entities and forms share
//! - **Errors**: unified error handling with `ClientError` and `ClientResult`
//!

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{ClientError, ClientResult};
pub use traits::Validatable;
pub use types::{Collection, EntityId};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
