//! Restaurant entity and its nested sub-objects
//!
//! This module contains the `Restaurant` struct exactly as it travels over
//! the wire: nested `location`, `contact`, and `operatingHours` objects,
//! camelCase member names, and a server-assigned `_id` that is only present
//! after creation.

use chrono::NaiveTime;
use foodie_core::{ClientError, ClientResult, EntityId, Validatable};
use serde::{Deserialize, Serialize};

/// Time labels are 12-hour form strings such as `"10:00 AM"`
const TIME_LABEL_FORMAT: &str = "%I:%M %p";

// ============================================================================
// Restaurant
// ============================================================================

/// A restaurant record as persisted server-side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    /// Server-assigned unique id, absent until the restaurant is created
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none", default)]
    pub id: Option<EntityId>,

    /// Restaurant name
    pub name: String,

    /// Free-text description
    pub description: String,

    /// Base64-encoded image or an image URL
    pub image: String,

    /// Category tags, at least one required
    pub categories: Vec<String>,

    /// Opening and closing time labels
    pub operating_hours: OperatingHours,

    /// Street address
    pub location: Location,

    /// Email and phone
    pub contact: Contact,
}

impl Restaurant {
    /// Whether this record has been persisted server-side
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

impl Validatable for Restaurant {
    fn validate(&self) -> ClientResult<()> {
        if self.name.trim().is_empty() {
            return Err(ClientError::validation("Restaurant name is required"));
        }
        if self.description.trim().is_empty() {
            return Err(ClientError::validation("Description is required"));
        }
        if self.image.is_empty() {
            return Err(ClientError::validation("Restaurant image is required"));
        }
        if self.categories.is_empty() {
            return Err(ClientError::validation("Select at least one category"));
        }
        self.location.validate()?;
        self.contact.validate()?;
        self.operating_hours.validate()?;
        Ok(())
    }
}

/// Look up a restaurant by id in a cached collection.
///
/// Absence is an expected state (stale link, deleted entity) and renders
/// as a not-found affordance, so this returns `None` rather than an error.
pub fn restaurant_by_id<'a>(restaurants: &'a [Restaurant], id: &str) -> Option<&'a Restaurant> {
    restaurants
        .iter()
        .find(|r| r.id.as_deref() == Some(id))
}

// ============================================================================
// OperatingHours
// ============================================================================

/// Opening hours, stored as the 12-hour labels the form selects from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OperatingHours {
    /// Opening time label, e.g. `"10:00 AM"`
    pub open_time: String,

    /// Closing time label, e.g. `"11:00 PM"`
    pub close_time: String,
}

impl OperatingHours {
    /// Create operating hours from two time labels
    pub fn new(open_time: impl Into<String>, close_time: impl Into<String>) -> Self {
        Self {
            open_time: open_time.into(),
            close_time: close_time.into(),
        }
    }

    /// Parse both labels and check that opening strictly precedes closing
    pub fn is_ordered(&self) -> ClientResult<bool> {
        let open = parse_time_label(&self.open_time)?;
        let close = parse_time_label(&self.close_time)?;
        Ok(open < close)
    }
}

impl Validatable for OperatingHours {
    fn validate(&self) -> ClientResult<()> {
        if self.open_time.is_empty() {
            return Err(ClientError::validation("Please select opening time"));
        }
        if self.close_time.is_empty() {
            return Err(ClientError::validation("Please select closing time"));
        }
        if !self.is_ordered()? {
            return Err(ClientError::validation(
                "Open To time should be greater than Open From time",
            ));
        }
        Ok(())
    }
}

fn parse_time_label(label: &str) -> ClientResult<NaiveTime> {
    NaiveTime::parse_from_str(label.trim(), TIME_LABEL_FORMAT)
        .map_err(|_| ClientError::InvalidTimeLabel(label.to_string()))
}

// ============================================================================
// Location
// ============================================================================

/// Postal address of a restaurant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

impl Location {
    /// Single-line rendering used by detail views
    pub fn display_line(&self) -> String {
        format!(
            "{} {}, {}, {}",
            self.address, self.city, self.state, self.zip_code
        )
    }
}

impl Validatable for Location {
    fn validate(&self) -> ClientResult<()> {
        if self.address.trim().is_empty() {
            return Err(ClientError::validation("Address is required"));
        }
        if self.city.trim().is_empty() {
            return Err(ClientError::validation("City is required"));
        }
        if self.state.trim().is_empty() {
            return Err(ClientError::validation("State is required"));
        }
        if self.zip_code.trim().is_empty() {
            return Err(ClientError::validation("Zip code is required"));
        }
        Ok(())
    }
}

// ============================================================================
// Contact
// ============================================================================

/// Contact details of a restaurant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Contact email address
    pub email: String,

    /// Phone number, digits only
    pub phone: String,
}

impl Validatable for Contact {
    fn validate(&self) -> ClientResult<()> {
        if self.email.is_empty() {
            return Err(ClientError::validation("Email is required"));
        }
        if !self.email.contains('@') {
            return Err(ClientError::validation("Invalid email"));
        }
        if self.phone.is_empty() {
            return Err(ClientError::validation("Contact is required"));
        }
        if !self.phone.chars().all(|c| c.is_ascii_digit()) {
            return Err(ClientError::validation("Contact must be a number"));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
