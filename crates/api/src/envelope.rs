//! Response envelope types
//!
//! Every API endpoint wraps its payload in `{ status, data }`, with the
//! embedded `status` repeated independently of the HTTP status code. The
//! menu listing additionally answers `{ "message": "No data found" }` when
//! a restaurant simply has no menu yet, which is an empty state rather
//! than an error.

use foodie_core::{ClientError, ClientResult};
use foodie_model::MenuItem;
use serde::Deserialize;

/// Body the menu listing returns when a restaurant has no items
pub const NO_DATA_MESSAGE: &str = "No data found";

// ============================================================================
// ApiEnvelope
// ============================================================================

/// Raw response body shared by every endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    /// Application-level status embedded in the body, 200 on success
    #[serde(default)]
    pub status: Option<u16>,

    /// Payload, present on success responses that carry data
    #[serde(default)]
    pub data: Option<T>,

    /// Server-provided detail, present on failures and empty states
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Whether the body reports application-level success.
    ///
    /// The server repeats the HTTP status inside the body; callers check
    /// both. The duplication is preserved for compatibility with the
    /// deployed backend.
    pub fn is_success(&self) -> bool {
        self.status == Some(200)
    }

    /// Whether the body is the menu listing's non-error empty state
    pub fn is_no_data(&self) -> bool {
        self.message.as_deref() == Some(NO_DATA_MESSAGE)
    }

    /// Extract the payload, converting a non-success body into an error
    /// that carries the server's message when one was provided.
    pub fn into_data(self) -> ClientResult<T> {
        if !self.is_success() {
            return Err(ClientError::api(
                self.status,
                self.message
                    .unwrap_or_else(|| "Request was not successful".to_string()),
            ));
        }
        self.data
            .ok_or_else(|| ClientError::parse("Success response carried no data"))
    }
}

// ============================================================================
// MenuListing
// ============================================================================

/// Result of listing a restaurant's menu
#[derive(Debug, Clone, PartialEq)]
pub enum MenuListing {
    /// The restaurant's menu items
    Items(Vec<MenuItem>),
    /// The restaurant has no menu yet; rendered as "No menus available",
    /// never as an error
    Empty,
}

impl MenuListing {
    /// Get the items, treating the empty state as an empty slice
    pub fn items(&self) -> &[MenuItem] {
        match self {
            MenuListing::Items(items) => items,
            MenuListing::Empty => &[],
        }
    }

    /// Whether there is anything to render
    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
