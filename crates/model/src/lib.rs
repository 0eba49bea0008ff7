//! # Foodie Model
//!
//! Entity types for the FoodieDelight client.
//!
//! The structs in this crate are shaped exactly like the REST API's wire
//! format (camelCase members, nested sub-objects, Mongo-style `_id`), so
//! the same type serves as list payload, create request body, and update
//! request body.

pub mod menu_item;
pub mod restaurant;

// Re-export commonly used items at crate root
pub use menu_item::{MenuItem, NutritionalInfo};
pub use restaurant::{Contact, Location, OperatingHours, Restaurant, restaurant_by_id};
