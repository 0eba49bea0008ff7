//! Menu item entity
//!
//! A menu item always belongs to a parent restaurant; listing, creation,
//! and edits are all scoped by `restaurantId`.

use foodie_core::{ClientError, ClientResult, EntityId, Validatable};
use serde::{Deserialize, Serialize};

// ============================================================================
// MenuItem
// ============================================================================

/// A dish on a restaurant's menu as persisted server-side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    /// Server-assigned unique id, absent until the item is created
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none", default)]
    pub id: Option<EntityId>,

    /// Parent restaurant id, required
    pub restaurant_id: EntityId,

    /// Dish name
    pub name: String,

    /// Free-text description
    pub description: String,

    /// Price in the menu currency
    pub price: f64,

    /// Menu category, e.g. "Starters"
    pub category: String,

    /// Base64-encoded image or an image URL
    pub image: String,

    /// Whether the dish is currently orderable
    pub availability: bool,

    /// Preparation time in minutes, kept as the string the form collected
    pub preparation_time: String,

    /// Calories and ingredient list
    pub nutritional_info: NutritionalInfo,
}

impl MenuItem {
    /// Whether this record has been persisted server-side
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

impl Validatable for MenuItem {
    fn validate(&self) -> ClientResult<()> {
        if self.restaurant_id.is_empty() {
            return Err(ClientError::validation("Please Select Restaurant"));
        }
        if self.name.trim().is_empty() {
            return Err(ClientError::validation("Dish Name is required"));
        }
        if self.description.trim().is_empty() {
            return Err(ClientError::validation("Description is required"));
        }
        if self.price < 0.0 || !self.price.is_finite() {
            return Err(ClientError::validation("price must be a number"));
        }
        if self.category.trim().is_empty() {
            return Err(ClientError::validation("category is required"));
        }
        if !self
            .preparation_time
            .chars()
            .all(|c| c.is_ascii_digit())
            || self.preparation_time.is_empty()
        {
            return Err(ClientError::validation("preparation time must be a number"));
        }
        self.nutritional_info.validate()?;
        Ok(())
    }
}

// ============================================================================
// NutritionalInfo
// ============================================================================

/// Nutrition block nested inside a menu item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NutritionalInfo {
    /// Calories, kept as the numeric string the form collected
    pub calories: String,

    /// Ordered ingredient list, entered as comma-separated text
    pub ingredients: Vec<String>,
}

impl NutritionalInfo {
    /// Split a comma-separated ingredients string into the ordered list.
    ///
    /// The split is verbatim, so `join(split(s))` round-trips any input
    /// whose individual ingredient names carry no embedded commas.
    pub fn parse_ingredients(text: &str) -> Vec<String> {
        text.split(',').map(str::to_string).collect()
    }

    /// Re-join the ingredient list for edit-mode display
    pub fn ingredients_label(&self) -> String {
        self.ingredients.join(",")
    }
}

impl Validatable for NutritionalInfo {
    fn validate(&self) -> ClientResult<()> {
        if !self.calories.chars().all(|c| c.is_ascii_digit()) || self.calories.is_empty() {
            return Err(ClientError::validation("calories must be a number"));
        }
        if self.ingredients.is_empty() {
            return Err(ClientError::validation("ingredients is required"));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_item() -> MenuItem {
        MenuItem {
            id: None,
            restaurant_id: "66b1c0ffee".to_string(),
            name: "Margherita".to_string(),
            description: "Tomato, mozzarella, basil".to_string(),
            price: 12.0,
            category: "Pizza".to_string(),
            image: "aGVsbG8=".to_string(),
            availability: true,
            preparation_time: "20".to_string(),
            nutritional_info: NutritionalInfo {
                calories: "850".to_string(),
                ingredients: NutritionalInfo::parse_ingredients("tomato,mozzarella,basil"),
            },
        }
    }

    #[test]
    fn test_valid_menu_item() {
        assert!(sample_item().is_valid());
    }

    #[test]
    fn test_create_payload_shape() {
        let json = serde_json::to_value(sample_item()).unwrap();

        assert!(json.get("_id").is_none());
        assert_eq!(json["restaurantId"], "66b1c0ffee");
        assert_eq!(json["price"], 12.0);
        assert_eq!(json["availability"], true);
        assert_eq!(json["preparationTime"], "20");
        assert_eq!(json["nutritionalInfo"]["calories"], "850");
        assert_eq!(json["nutritionalInfo"]["ingredients"][1], "mozzarella");
    }

    #[test]
    fn test_ingredients_round_trip() {
        let text = "tomato,mozzarella,basil";
        let info = NutritionalInfo {
            calories: "100".to_string(),
            ingredients: NutritionalInfo::parse_ingredients(text),
        };
        assert_eq!(info.ingredients_label(), text);
    }

    #[test]
    fn test_single_ingredient_round_trip() {
        let info = NutritionalInfo {
            calories: "100".to_string(),
            ingredients: NutritionalInfo::parse_ingredients("flour"),
        };
        assert_eq!(info.ingredients, vec!["flour"]);
        assert_eq!(info.ingredients_label(), "flour");
    }

    #[test]
    fn test_missing_restaurant_reference() {
        let mut item = sample_item();
        item.restaurant_id.clear();
        let errors = item.validation_errors();
        assert!(errors[0].contains("Select Restaurant"));
    }

    #[test]
    fn test_preparation_time_numeric_only() {
        let mut item = sample_item();
        item.preparation_time = "20 mins".to_string();
        assert!(!item.is_valid());
    }

    #[test]
    fn test_calories_numeric_only() {
        let mut item = sample_item();
        item.nutritional_info.calories = "many".to_string();
        assert!(!item.is_valid());
    }

    #[test]
    fn test_deserialize_server_response() {
        let body = r#"{
            "_id": "deadbeef01",
            "restaurantId": "66b1c0ffee",
            "name": "Margherita",
            "description": "Tomato, mozzarella, basil",
            "price": 12.5,
            "category": "Pizza",
            "image": "https://cdn.example.com/pizza.png",
            "availability": false,
            "preparationTime": "20",
            "nutritionalInfo": {"calories": "850", "ingredients": ["tomato", "basil"]}
        }"#;

        let item: MenuItem = serde_json::from_str(body).unwrap();
        assert!(item.is_persisted());
        assert!(!item.availability);
        assert_eq!(item.nutritional_info.ingredients_label(), "tomato,basil");
    }
}
