//! Cache entry state
//!
//! Each cached collection entry tracks a fetch status, the last payload,
//! and the last error detail. Consumers observe entries through `watch`
//! receivers and must check the status flag before rendering the payload.

// ============================================================================
// FetchStatus
// ============================================================================

/// Lifecycle of a cached entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStatus {
    /// Never fetched
    #[default]
    Idle,
    /// A fetch is in flight; concurrent reads attach to it
    Loading,
    /// Last fetch succeeded and the payload is populated
    Success,
    /// Last fetch failed; the error detail is populated
    Error,
}

impl FetchStatus {
    /// Get the status name for logging
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchStatus::Idle => "idle",
            FetchStatus::Loading => "loading",
            FetchStatus::Success => "success",
            FetchStatus::Error => "error",
        }
    }
}

impl std::fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// EntryState
// ============================================================================

/// Observable state of one cached entry
#[derive(Debug, Clone, Default)]
pub struct EntryState<T> {
    /// Current fetch status
    pub status: FetchStatus,

    /// Payload of the last successful fetch. Kept through invalidation so
    /// views can keep rendering stale data while a refetch runs.
    pub payload: Option<T>,

    /// Detail of the last failed fetch
    pub error: Option<String>,

    /// Set by `invalidate`; a stale entry refetches on the next read
    pub stale: bool,
}

impl<T> EntryState<T> {
    /// Create a never-fetched entry
    pub fn idle() -> Self {
        Self {
            status: FetchStatus::Idle,
            payload: None,
            error: None,
            stale: false,
        }
    }

    /// Whether a read can be served from this entry without fetching
    pub fn is_fresh(&self) -> bool {
        self.status == FetchStatus::Success && !self.stale
    }

    /// Whether a fetch is currently in flight
    pub fn is_loading(&self) -> bool {
        self.status == FetchStatus::Loading
    }

    /// Record a successful fetch
    pub fn resolve(&mut self, payload: T) {
        self.status = FetchStatus::Success;
        self.payload = Some(payload);
        self.error = None;
        self.stale = false;
    }

    /// Record a failed fetch, keeping any previous payload
    pub fn reject(&mut self, detail: impl Into<String>) {
        self.status = FetchStatus::Error;
        self.error = Some(detail.into());
    }
}

// ============================================================================
// Tests
// ============================================================================
