//! Mutation dispatch seams
//!
//! The form controllers dispatch create/update through these traits so
//! tests can substitute an in-memory implementation for the HTTP client.
//! `foodie_api::ApiClient` is the production implementation.

use std::future::Future;

use foodie_api::ApiClient;
use foodie_core::ClientResult;
use foodie_model::{MenuItem, Restaurant};

// ============================================================================
// RestaurantDispatch
// ============================================================================

/// Create/update operations of the restaurant collection
pub trait RestaurantDispatch {
    /// Create a restaurant, returning the persisted record
    fn create(
        &self,
        payload: &Restaurant,
    ) -> impl Future<Output = ClientResult<Restaurant>> + Send;

    /// Replace a restaurant's mutable fields
    fn update(
        &self,
        id: &str,
        payload: &Restaurant,
    ) -> impl Future<Output = ClientResult<Restaurant>> + Send;
}

impl RestaurantDispatch for ApiClient {
    async fn create(&self, payload: &Restaurant) -> ClientResult<Restaurant> {
        self.create_restaurant(payload).await
    }

    async fn update(&self, id: &str, payload: &Restaurant) -> ClientResult<Restaurant> {
        self.update_restaurant(id, payload).await
    }
}

// ============================================================================
// MenuDispatch
// ============================================================================

/// Create/update operations of the menu collection
pub trait MenuDispatch {
    /// Create a menu item under its parent restaurant
    fn create(&self, payload: &MenuItem) -> impl Future<Output = ClientResult<MenuItem>> + Send;

    /// Replace a menu item's mutable fields
    fn update(
        &self,
        id: &str,
        payload: &MenuItem,
    ) -> impl Future<Output = ClientResult<MenuItem>> + Send;
}

impl MenuDispatch for ApiClient {
    async fn create(&self, payload: &MenuItem) -> ClientResult<MenuItem> {
        self.create_menu_item(payload).await
    }

    async fn update(&self, id: &str, payload: &MenuItem) -> ClientResult<MenuItem> {
        self.update_menu_item(id, payload).await
    }
}
