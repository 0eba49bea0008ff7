//! Cancellation on view teardown
//!
//! A pending submission may outlive the view that started it. The view
//! hands the form a `CancelToken` and cancels it on teardown; the form
//! checks the token after the request settles and skips every view-bound
//! effect (reset, notifications) when it fired. Shared cache state is
//! still updated, since it outlives any single view.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

// ============================================================================
// CancelToken
// ============================================================================

/// Cheap, cloneable teardown flag
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a live token
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the owning view as torn down
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether the owning view has been torn down
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

// ============================================================================
// Tests
// ============================================================================
