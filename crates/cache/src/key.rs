//! Cache keys
//!
//! A cached entry is identified by its collection name plus an optional
//! scoping parameter, e.g. `restaurants` or `menus:66b1c0ffee`.

use foodie_core::Collection;

// ============================================================================
// CacheKey
// ============================================================================

/// Identifier of one cached entry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// The collection the entry belongs to
    pub collection: Collection,

    /// Scoping parameter, e.g. the parent restaurant id for menus
    pub scope: Option<String>,
}

impl CacheKey {
    /// Key for an unscoped collection
    pub fn collection(collection: Collection) -> Self {
        Self {
            collection,
            scope: None,
        }
    }

    /// Key for a scoped entry
    pub fn scoped(collection: Collection, scope: impl Into<String>) -> Self {
        Self {
            collection,
            scope: Some(scope.into()),
        }
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.scope {
            Some(scope) => write!(f, "{}:{}", self.collection, scope),
            None => write!(f, "{}", self.collection),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
