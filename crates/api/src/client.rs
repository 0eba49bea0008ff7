//! HTTP client for the FoodieDelight REST API
//!
//! Thin adapter over `reqwest`: four operations per resource collection,
//! one network round trip per call, no retries, no caching. Caching and
//! invalidation live in `foodie_cache`; this layer only issues requests
//! and decodes envelopes.

use foodie_core::{ClientError, ClientResult};
use foodie_model::{MenuItem, Restaurant};
use reqwest::Response;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::envelope::{ApiEnvelope, MenuListing};

/// Production API base, version-prefixed. Fixed at construction.
pub const DEFAULT_BASE_URL: &str = "https://foodiedelight-backend.onrender.com/v1";

// ============================================================================
// ApiClient
// ============================================================================

/// Client for the restaurant and menu collections
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client against the production API
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client against a specific base URL (tests, staging)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Get the configured base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ========================================================================
    // Restaurants
    // ========================================================================

    /// List all restaurants
    pub async fn list_restaurants(&self) -> ClientResult<Vec<Restaurant>> {
        let response = self
            .http
            .get(self.url("/restaurants"))
            .send()
            .await
            .map_err(transport)?;
        decode::<Vec<Restaurant>>(response).await?.into_data()
    }

    /// Create a restaurant, returning the persisted record with its id
    pub async fn create_restaurant(&self, payload: &Restaurant) -> ClientResult<Restaurant> {
        self.post("/restaurant", payload).await
    }

    /// Replace a restaurant's mutable fields
    pub async fn update_restaurant(
        &self,
        id: &str,
        payload: &Restaurant,
    ) -> ClientResult<Restaurant> {
        self.put(&format!("/restaurant/{id}"), payload).await
    }

    /// Delete a restaurant by id
    pub async fn delete_restaurant(&self, id: &str) -> ClientResult<()> {
        self.delete(&format!("/restaurant/{id}")).await
    }

    // ========================================================================
    // Menu items
    // ========================================================================

    /// List the menu items of one restaurant.
    ///
    /// A restaurant without a menu answers `{ "message": "No data found" }`,
    /// which maps to `MenuListing::Empty` rather than an error.
    pub async fn list_menu(&self, restaurant_id: &str) -> ClientResult<MenuListing> {
        let response = self
            .http
            .get(self.url(&format!("/menu/{restaurant_id}")))
            .send()
            .await
            .map_err(transport)?;

        let envelope = decode::<Vec<MenuItem>>(response).await?;
        if envelope.is_no_data() {
            return Ok(MenuListing::Empty);
        }
        envelope.into_data().map(MenuListing::Items)
    }

    /// Create a menu item under its `restaurantId`
    pub async fn create_menu_item(&self, payload: &MenuItem) -> ClientResult<MenuItem> {
        self.post("/menu", payload).await
    }

    /// Replace a menu item's mutable fields
    pub async fn update_menu_item(&self, id: &str, payload: &MenuItem) -> ClientResult<MenuItem> {
        self.put(&format!("/menu/{id}"), payload).await
    }

    /// Delete a menu item by id
    pub async fn delete_menu_item(&self, id: &str) -> ClientResult<()> {
        self.delete(&format!("/menu/{id}")).await
    }

    // ========================================================================
    // Request helpers
    // ========================================================================

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        debug!(path, "POST");
        let response = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(transport)?;
        decode::<T>(response).await?.into_data()
    }

    async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        debug!(path, "PUT");
        let response = self
            .http
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(transport)?;
        decode::<T>(response).await?.into_data()
    }

    async fn delete(&self, path: &str) -> ClientResult<()> {
        debug!(path, "DELETE");
        let response = self
            .http
            .delete(self.url(path))
            .send()
            .await
            .map_err(transport)?;

        // Delete bodies carry only `{ status }`
        let envelope = decode::<Value>(response).await?;
        if envelope.is_success() {
            Ok(())
        } else {
            Err(ClientError::api(
                envelope.status,
                envelope
                    .message
                    .unwrap_or_else(|| "Delete was not successful".to_string()),
            ))
        }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Decoding
// ============================================================================

fn transport(err: reqwest::Error) -> ClientError {
    ClientError::transport(err.to_string())
}

/// Decode a response body into an envelope, folding non-2xx transport
/// statuses into an API error that keeps the server's message when the
/// body was parseable.
async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<ApiEnvelope<T>> {
    let http_status = response.status();
    let body = response.text().await.map_err(transport)?;

    let envelope: Option<ApiEnvelope<T>> = serde_json::from_str(&body).ok();

    if !http_status.is_success() {
        let message = envelope
            .and_then(|e| e.message)
            .unwrap_or_else(|| format!("Server answered {http_status}"));
        return Err(ClientError::api(Some(http_status.as_u16()), message));
    }

    envelope.ok_or_else(|| ClientError::parse(format!("Unexpected body: {body}")))
}

// ============================================================================
// Tests
// ============================================================================
