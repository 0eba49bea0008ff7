//! Menu item form controller
//!
//! Same shape as the restaurant controller: raw values, touched
//! tracking, schema validation and the create/update submission
//! protocol, scoped to one restaurant's menu.

use std::collections::BTreeSet;

use tracing::{info, warn};

use foodie_cache::CollectionCache;
use foodie_core::{ClientError, ClientResult, EntityId};
use foodie_model::{MenuItem, NutritionalInfo};

use crate::cancel::CancelToken;
use crate::dispatch::MenuDispatch;
use crate::notify::Notifier;
use crate::restaurant_form::SubmitOutcome;
use crate::rules::{FieldValue, FilePreview};
use crate::schema::{FieldSchema, FieldValues, FormSchema, ValidationOutcome};

// ============================================================================
// Availability
// ============================================================================

/// The yes/no radio choice, mapped to a boolean on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Availability {
    Yes,
    #[default]
    No,
}

impl Availability {
    /// The wire representation
    pub fn as_bool(self) -> bool {
        matches!(self, Availability::Yes)
    }

    /// Map a stored boolean back to the radio choice
    pub fn from_bool(available: bool) -> Self {
        if available {
            Availability::Yes
        } else {
            Availability::No
        }
    }

    /// The radio input's value, `"yes"` or `"no"`
    pub fn as_str(self) -> &'static str {
        match self {
            Availability::Yes => "yes",
            Availability::No => "no",
        }
    }

    /// Parse a radio input value; anything but `"yes"` means unavailable
    pub fn parse(value: &str) -> Self {
        if value == "yes" {
            Availability::Yes
        } else {
            Availability::No
        }
    }
}

// ============================================================================
// MenuFormValues
// ============================================================================

/// Raw values of the menu item form, as the user typed them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuFormValues {
    /// Id of the restaurant the dish belongs to
    pub restaurant_id: String,
    pub name: String,
    pub description: String,
    /// Price as typed; parsed to f64 at payload time
    pub price: String,
    /// Preparation time in minutes, digits only
    pub preparation_time: String,
    pub calories: String,
    /// Comma-separated ingredient list
    pub ingredients: String,
    pub category: String,
    pub availability: Availability,
    pub image: Option<FilePreview>,
    pub image_base64: String,
}

// ============================================================================
// MenuForm
// ============================================================================

/// Controller of the add/edit menu item form
#[derive(Debug)]
pub struct MenuForm {
    /// Current field values
    pub values: MenuFormValues,
    touched: BTreeSet<&'static str>,
    outcome: ValidationOutcome,
    edit_id: Option<EntityId>,
    schema: FormSchema,
}

impl MenuForm {
    /// Create a blank form in add mode
    pub fn new() -> Self {
        Self {
            values: MenuFormValues::default(),
            touched: BTreeSet::new(),
            outcome: ValidationOutcome::ok(),
            edit_id: None,
            schema: menu_schema(),
        }
    }

    /// Create a form in edit mode, pre-filled from an existing item.
    ///
    /// Ingredients are re-joined with commas and availability mapped back
    /// to the radio choice. The image must be picked again, as in the
    /// restaurant form.
    pub fn from_snapshot(item: &MenuItem) -> Self {
        let mut form = Self::new();
        form.edit_id = item.id.clone();
        form.values = MenuFormValues {
            restaurant_id: item.restaurant_id.clone(),
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price.to_string(),
            preparation_time: item.preparation_time.clone(),
            calories: item.nutritional_info.calories.clone(),
            ingredients: item.nutritional_info.ingredients_label(),
            category: item.category.clone(),
            availability: Availability::from_bool(item.availability),
            image: None,
            image_base64: item.image.clone(),
        };
        form
    }

    /// Whether the form edits an existing item
    pub fn is_edit(&self) -> bool {
        self.edit_id.is_some()
    }

    /// Mark a field as touched by the user
    pub fn touch(&mut self, field: &'static str) {
        self.touched.insert(field);
    }

    /// Mark every declared field as touched
    pub fn touch_all(&mut self) {
        let names: Vec<&'static str> = self.schema.field_names().collect();
        self.touched.extend(names);
    }

    /// Record a newly picked image file and its encoded contents
    pub fn set_image(&mut self, preview: FilePreview, base64: String) {
        self.values.image = Some(preview);
        self.values.image_base64 = base64;
        self.touch("menuImage");
    }

    /// Validate the whole form and remember the outcome
    pub fn validate(&mut self) -> &ValidationOutcome {
        self.outcome = self.schema.validate(&self.field_values());
        &self.outcome
    }

    /// A field's error, shown only once the field was touched
    pub fn visible_error(&self, field: &'static str) -> Option<&str> {
        if self.touched.contains(field) {
            self.outcome.error_for(field)
        } else {
            None
        }
    }

    /// Assemble the wire payload from the current values.
    ///
    /// Callers run `validate` first, so the price is digits by the time
    /// this parses it; a failure still surfaces as an error rather than a
    /// panic.
    pub fn payload(&self) -> ClientResult<MenuItem> {
        let v = &self.values;
        let price: f64 = v
            .price
            .trim()
            .parse()
            .map_err(|_| ClientError::parse(format!("price is not a number: '{}'", v.price)))?;
        Ok(MenuItem {
            id: None,
            restaurant_id: v.restaurant_id.clone(),
            name: v.name.clone(),
            description: v.description.clone(),
            price,
            category: v.category.clone(),
            image: v.image_base64.clone(),
            availability: v.availability.as_bool(),
            preparation_time: v.preparation_time.clone(),
            nutritional_info: NutritionalInfo {
                calories: v.calories.clone(),
                ingredients: NutritionalInfo::parse_ingredients(&v.ingredients),
            },
        })
    }

    /// Clear all values, touched marks and errors
    pub fn reset(&mut self) {
        self.values = MenuFormValues::default();
        self.touched.clear();
        self.outcome = ValidationOutcome::ok();
    }

    /// Run the submission protocol against the menu cache.
    ///
    /// Identical flow to the restaurant form: validate, dispatch by edit
    /// mode, invalidate on success, and skip notifications plus the
    /// post-create reset once `cancel` has fired.
    pub async fn submit<D, N>(
        &mut self,
        dispatch: &D,
        cache: &CollectionCache<Vec<MenuItem>>,
        notifier: &N,
        cancel: &CancelToken,
    ) -> SubmitOutcome<MenuItem>
    where
        D: MenuDispatch,
        N: Notifier,
    {
        self.touch_all();
        let outcome = self.validate().clone();
        if outcome.has_errors() {
            return SubmitOutcome::Invalid(outcome);
        }

        let payload = match self.payload() {
            Ok(payload) => payload,
            Err(err) => return SubmitOutcome::Failed(err),
        };

        match self.edit_id.clone() {
            Some(id) => {
                info!(dish = %payload.name, %id, "updating menu item");
                match dispatch.update(&id, &payload).await {
                    Ok(saved) => {
                        cache.invalidate();
                        if !cancel.is_cancelled() {
                            notifier.success("Successfully updated menu item!");
                        }
                        SubmitOutcome::Updated(saved)
                    }
                    Err(err) => {
                        warn!(error = %err, "menu item update failed");
                        if !cancel.is_cancelled() {
                            notifier.error(&err.user_message());
                        }
                        SubmitOutcome::Failed(err)
                    }
                }
            }
            None => {
                info!(dish = %payload.name, restaurant = %payload.restaurant_id, "creating menu item");
                match dispatch.create(&payload).await {
                    Ok(saved) => {
                        cache.invalidate();
                        if !cancel.is_cancelled() {
                            notifier.success("Successfully added new menu item!");
                            self.reset();
                        }
                        SubmitOutcome::Created(saved)
                    }
                    Err(err) => {
                        warn!(error = %err, "menu item create failed");
                        if !cancel.is_cancelled() {
                            notifier.error("Error while creating new menu item");
                        }
                        SubmitOutcome::Failed(err)
                    }
                }
            }
        }
    }

    fn field_values(&self) -> FieldValues {
        let v = &self.values;
        let mut map = FieldValues::new();
        map.insert("restaurantId", FieldValue::Text(v.restaurant_id.clone()));
        map.insert("name", FieldValue::Text(v.name.clone()));
        map.insert("description", FieldValue::Text(v.description.clone()));
        map.insert("price", FieldValue::Text(v.price.clone()));
        map.insert(
            "preparationTime",
            FieldValue::Text(v.preparation_time.clone()),
        );
        map.insert("calories", FieldValue::Text(v.calories.clone()));
        map.insert("ingredients", FieldValue::Text(v.ingredients.clone()));
        map.insert("category", FieldValue::Text(v.category.clone()));
        map.insert(
            "availability",
            FieldValue::Text(v.availability.as_str().to_string()),
        );
        map.insert("menuImage", FieldValue::File(v.image.clone()));
        map
    }
}

impl Default for MenuForm {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Schema
// ============================================================================

fn menu_schema() -> FormSchema {
    FormSchema::new()
        .field(FieldSchema::new("restaurantId").required("Please Select Restaurant"))
        .field(FieldSchema::new("name").required("Dish Name is required"))
        .field(FieldSchema::new("description").required("Description is required"))
        .field(
            FieldSchema::new("price")
                .required("price is required")
                .numeric("price must be a number"),
        )
        .field(
            FieldSchema::new("preparationTime")
                .required("preparation time is required")
                .numeric("preparation time must be a number"),
        )
        .field(
            FieldSchema::new("calories")
                .required("calories is required")
                .numeric("calories must be a number"),
        )
        .field(FieldSchema::new("ingredients").required("ingredients is required"))
        .field(FieldSchema::new("category").required("category is required"))
        .field(FieldSchema::new("availability").required("availability is required"))
        .field(FieldSchema::new("menuImage").file("Menu image is required"))
}

// ============================================================================
// Tests
// ============================================================================
