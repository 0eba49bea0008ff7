//! Core types used throughout the FoodieDelight client
//!
//! Shared identifiers and the collection names server-state is keyed by.

use serde::{Deserialize, Serialize};

// ============================================================================
// Identifiers
// ============================================================================

/// Server-assigned entity identifier (`_id` in API responses)
pub type EntityId = String;

// ============================================================================
// Collections
// ============================================================================

/// The server-owned collections the client fetches and caches.
///
/// Cache keys and invalidation are expressed in terms of these names
/// rather than free-form strings, so a mutation can only ever invalidate
/// a collection that actually exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    /// The top-level restaurant listing
    Restaurants,
    /// Menu items, always scoped by a parent restaurant id
    Menus,
}

impl Collection {
    /// Get the canonical query-key name
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Restaurants => "restaurants",
            Collection::Menus => "menus",
        }
    }

    /// Whether entries of this collection carry a scoping parameter
    pub fn is_scoped(&self) -> bool {
        matches!(self, Collection::Menus)
    }

    /// Get all collections
    pub fn all() -> &'static [Collection] {
        &[Collection::Restaurants, Collection::Menus]
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Tests
// ============================================================================
