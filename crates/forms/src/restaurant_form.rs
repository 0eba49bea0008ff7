//! Restaurant form controller
//!
//! Holds the raw field values of the add/edit restaurant form, tracks
//! which fields the user touched, validates against the declarative
//! schema and drives the create/update submission protocol.

use std::collections::BTreeSet;

use tracing::{info, warn};

use foodie_cache::CollectionCache;
use foodie_core::{ClientError, EntityId};
use foodie_model::{Contact, Location, OperatingHours, Restaurant};

use crate::cancel::CancelToken;
use crate::dispatch::RestaurantDispatch;
use crate::notify::Notifier;
use crate::rules::{FieldValue, FilePreview};
use crate::schema::{FieldSchema, FieldValues, FormSchema, ValidationOutcome};
use crate::transforms::convert_to_24_hour;

/// The selectable restaurant categories
pub const CATEGORY_OPTIONS: &[&str] = &["Italian", "Pasta", "Vegetarian"];

// ============================================================================
// RestaurantFormValues
// ============================================================================

/// Raw values of the restaurant form, as the user typed them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestaurantFormValues {
    pub restaurant_name: String,
    pub description: String,
    pub email: String,
    pub contact: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub categories: Vec<String>,
    /// Opening time label, e.g. `"10:00 AM"`
    pub open_from: String,
    /// Closing time label, e.g. `"11:00 PM"`
    pub open_to: String,
    /// Metadata of the picked image file, `None` until one is picked
    pub image: Option<FilePreview>,
    /// Base64 contents of the picked image, sent as the `image` field
    pub image_base64: String,
}

// ============================================================================
// SubmitOutcome
// ============================================================================

/// What a submission attempt resulted in
#[derive(Debug)]
pub enum SubmitOutcome<T> {
    /// A new record was created
    Created(T),
    /// An existing record was updated
    Updated(T),
    /// Validation failed; nothing was dispatched
    Invalid(ValidationOutcome),
    /// The dispatch failed; field values are preserved
    Failed(ClientError),
}

impl<T> SubmitOutcome<T> {
    /// Whether the submission persisted anything
    pub fn is_persisted(&self) -> bool {
        matches!(self, SubmitOutcome::Created(_) | SubmitOutcome::Updated(_))
    }
}

// ============================================================================
// RestaurantForm
// ============================================================================

/// Controller of the add/edit restaurant form
#[derive(Debug)]
pub struct RestaurantForm {
    /// Current field values
    pub values: RestaurantFormValues,
    touched: BTreeSet<&'static str>,
    outcome: ValidationOutcome,
    edit_id: Option<EntityId>,
    schema: FormSchema,
}

impl RestaurantForm {
    /// Create a blank form in add mode
    pub fn new() -> Self {
        Self {
            values: RestaurantFormValues::default(),
            touched: BTreeSet::new(),
            outcome: ValidationOutcome::ok(),
            edit_id: None,
            schema: restaurant_schema(),
        }
    }

    /// Create a form in edit mode, pre-filled from an existing record.
    ///
    /// The stored base64 image is carried over for display, but the image
    /// field itself starts unpicked and must be selected again before the
    /// form validates.
    pub fn from_snapshot(restaurant: &Restaurant) -> Self {
        let mut form = Self::new();
        form.edit_id = restaurant.id.clone();
        form.values = RestaurantFormValues {
            restaurant_name: restaurant.name.clone(),
            description: restaurant.description.clone(),
            email: restaurant.contact.email.clone(),
            contact: restaurant.contact.phone.clone(),
            address: restaurant.location.address.clone(),
            city: restaurant.location.city.clone(),
            state: restaurant.location.state.clone(),
            zip: restaurant.location.zip_code.clone(),
            categories: restaurant.categories.clone(),
            open_from: restaurant.operating_hours.open_time.clone(),
            open_to: restaurant.operating_hours.close_time.clone(),
            image: None,
            image_base64: restaurant.image.clone(),
        };
        form
    }

    /// Whether the form edits an existing record
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

    /// Toggle a category checkbox
    pub fn toggle_category(&mut self, category: &str) {
        if let Some(pos) = self.values.categories.iter().position(|c| c == category) {
            self.values.categories.remove(pos);
        } else {
            self.values.categories.push(category.to_string());
        }
        self.touch("categories");
    }

    /// Record a newly picked image file and its encoded contents
    pub fn set_image(&mut self, preview: FilePreview, base64: String) {
        self.values.image = Some(preview);
        self.values.image_base64 = base64;
        self.touch("restroImage");
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

    /// Assemble the wire payload from the current values
    pub fn payload(&self) -> Restaurant {
        let v = &self.values;
        Restaurant {
            id: None,
            name: v.restaurant_name.clone(),
            description: v.description.clone(),
            image: v.image_base64.clone(),
            categories: v.categories.clone(),
            operating_hours: OperatingHours::new(v.open_from.clone(), v.open_to.clone()),
            location: Location {
                address: v.address.clone(),
                city: v.city.clone(),
                state: v.state.clone(),
                zip_code: v.zip.clone(),
            },
            contact: Contact {
                email: v.email.clone(),
                phone: v.contact.clone(),
            },
        }
    }

    /// Clear all values, touched marks and errors
    pub fn reset(&mut self) {
        self.values = RestaurantFormValues::default();
        self.touched.clear();
        self.outcome = ValidationOutcome::ok();
    }

    /// Run the submission protocol.
    ///
    /// Marks every field touched, validates, and only dispatches when the
    /// whole form passes. A successful save always invalidates the
    /// restaurant cache; notifications and the post-create reset are
    /// skipped once `cancel` has fired, since by then no surface is left
    /// to show them.
    pub async fn submit<D, N>(
        &mut self,
        dispatch: &D,
        cache: &CollectionCache<Vec<Restaurant>>,
        notifier: &N,
        cancel: &CancelToken,
    ) -> SubmitOutcome<Restaurant>
    where
        D: RestaurantDispatch,
        N: Notifier,
    {
        self.touch_all();
        let outcome = self.validate().clone();
        if outcome.has_errors() {
            return SubmitOutcome::Invalid(outcome);
        }

        let payload = self.payload();
        match self.edit_id.clone() {
            Some(id) => {
                info!(restaurant = %payload.name, %id, "updating restaurant");
                match dispatch.update(&id, &payload).await {
                    Ok(saved) => {
                        cache.invalidate();
                        if !cancel.is_cancelled() {
                            notifier.success("Successfully updated restaurant!");
                        }
                        SubmitOutcome::Updated(saved)
                    }
                    Err(err) => {
                        warn!(error = %err, "restaurant update failed");
                        if !cancel.is_cancelled() {
                            notifier.error(&err.user_message());
                        }
                        SubmitOutcome::Failed(err)
                    }
                }
            }
            None => {
                info!(restaurant = %payload.name, "creating restaurant");
                match dispatch.create(&payload).await {
                    Ok(saved) => {
                        cache.invalidate();
                        if !cancel.is_cancelled() {
                            notifier.success("Successfully added new restaurant!");
                            self.reset();
                        }
                        SubmitOutcome::Created(saved)
                    }
                    Err(err) => {
                        warn!(error = %err, "restaurant create failed");
                        if !cancel.is_cancelled() {
                            notifier.error("Error while creating new restaurant");
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
        map.insert("restaurantName", FieldValue::Text(v.restaurant_name.clone()));
        map.insert("description", FieldValue::Text(v.description.clone()));
        map.insert("email", FieldValue::Text(v.email.clone()));
        map.insert("contact", FieldValue::Text(v.contact.clone()));
        map.insert("address", FieldValue::Text(v.address.clone()));
        map.insert("city", FieldValue::Text(v.city.clone()));
        map.insert("state", FieldValue::Text(v.state.clone()));
        map.insert("zip", FieldValue::Text(v.zip.clone()));
        map.insert("categories", FieldValue::Selection(v.categories.clone()));
        map.insert("openFrom", FieldValue::Text(v.open_from.clone()));
        map.insert("openTo", FieldValue::Text(v.open_to.clone()));
        map.insert("restroImage", FieldValue::File(v.image.clone()));
        map
    }
}

impl Default for RestaurantForm {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Schema
// ============================================================================

fn restaurant_schema() -> FormSchema {
    FormSchema::new()
        .field(FieldSchema::new("restaurantName").required("Restaurant name is required"))
        .field(FieldSchema::new("description").required("Description is required"))
        .field(
            FieldSchema::new("email")
                .required("Email is required")
                .email("Invalid email"),
        )
        .field(
            FieldSchema::new("contact")
                .required("Contact is required")
                .numeric("Contact must be a number"),
        )
        .field(FieldSchema::new("address").required("Address is required"))
        .field(FieldSchema::new("city").required("City is required"))
        .field(FieldSchema::new("state").required("State is required"))
        .field(FieldSchema::new("zip").required("Zip code is required"))
        .field(FieldSchema::new("categories").min_selected(1, "Select at least one category"))
        .field(FieldSchema::new("openFrom").required("Open From time is required"))
        .field(FieldSchema::new("openTo").required("Open To time is required"))
        .field(FieldSchema::new("restroImage").file("Restaurant image is required"))
        .cross_field(check_operating_hours)
}

/// Normalize both time labels and require opening to strictly precede
/// closing. Emptiness is each field's `Required` rule's concern.
fn check_operating_hours(values: &FieldValues, outcome: &mut ValidationOutcome) {
    let from = values.get("openFrom").map(FieldValue::as_text).unwrap_or_default();
    let to = values.get("openTo").map(FieldValue::as_text).unwrap_or_default();
    if from.is_empty() || to.is_empty() {
        return;
    }
    let (Ok(from24), Ok(to24)) = (convert_to_24_hour(from), convert_to_24_hour(to)) else {
        // The selects only offer well-formed labels.
        return;
    };
    if from24 == to24 {
        outcome.add_error("openTo", "Open From and Open To time cannot be the same");
    } else if from24 > to24 {
        outcome.add_error("openTo", "Open To time should be greater than Open From time");
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use pretty_assertions::assert_eq;

    use foodie_core::{ClientResult, Collection};

    use crate::notify::{NotificationKind, RecordingNotifier};

    use super::*;

    struct StubDispatch {
        created: AtomicUsize,
        updated: AtomicUsize,
        fail_with: Option<ClientError>,
    }

    impl StubDispatch {
        fn ok() -> Self {
            Self {
                created: AtomicUsize::new(0),
                updated: AtomicUsize::new(0),
                fail_with: None,
            }
        }

        fn failing(err: ClientError) -> Self {
            Self {
                fail_with: Some(err),
                ..Self::ok()
            }
        }
    }

    impl RestaurantDispatch for StubDispatch {
        async fn create(&self, payload: &Restaurant) -> ClientResult<Restaurant> {
            self.created.fetch_add(1, Ordering::SeqCst);
            if let Some(err) = &self.fail_with {
                return Err(err.clone());
            }
            let mut saved = payload.clone();
            saved.id = Some("65f1c2".to_string());
            Ok(saved)
        }

        async fn update(&self, id: &str, payload: &Restaurant) -> ClientResult<Restaurant> {
            self.updated.fetch_add(1, Ordering::SeqCst);
            if let Some(err) = &self.fail_with {
                return Err(err.clone());
            }
            let mut saved = payload.clone();
            saved.id = Some(id.to_string());
            Ok(saved)
        }
    }

    fn filled_form() -> RestaurantForm {
        let mut form = RestaurantForm::new();
        form.values.restaurant_name = "Trattoria Roma".to_string();
        form.values.description = "Wood-fired pizza and fresh pasta".to_string();
        form.values.email = "roma@example.com".to_string();
        form.values.contact = "5551234567".to_string();
        form.values.address = "12 Via Appia".to_string();
        form.values.city = "Springfield".to_string();
        form.values.state = "IL".to_string();
        form.values.zip = "62701".to_string();
        form.values.categories = vec!["Italian".to_string()];
        form.values.open_from = "10:00 AM".to_string();
        form.values.open_to = "11:00 PM".to_string();
        form.set_image(
            FilePreview::new("front.png", 120_000, "image/png"),
            "aGVsbG8=".to_string(),
        );
        form
    }

    async fn populated_cache() -> CollectionCache<Vec<Restaurant>> {
        let cache = CollectionCache::new(Collection::Restaurants);
        cache
            .read(None, || async { Ok(Vec::new()) })
            .await
            .expect("seed fetch");
        cache
    }

    #[test]
    fn test_filled_form_is_valid() {
        let mut form = filled_form();
        assert!(form.validate().is_valid());
    }

    #[test]
    fn test_blank_form_fails_every_required_field() {
        let mut form = RestaurantForm::new();
        let outcome = form.validate().clone();
        assert_eq!(
            outcome.error_for("restaurantName"),
            Some("Restaurant name is required")
        );
        assert_eq!(
            outcome.error_for("categories"),
            Some("Select at least one category")
        );
        assert_eq!(
            outcome.error_for("restroImage"),
            Some("Restaurant image is required")
        );
    }

    #[test]
    fn test_errors_hidden_until_touched() {
        let mut form = RestaurantForm::new();
        form.validate();
        assert_eq!(form.visible_error("email"), None);

        form.touch("email");
        assert_eq!(form.visible_error("email"), Some("Email is required"));
    }

    #[test]
    fn test_inverted_hours_flagged_on_close_field() {
        let mut form = filled_form();
        form.values.open_from = "11:00 PM".to_string();
        form.values.open_to = "10:00 PM".to_string();
        let outcome = form.validate().clone();
        assert_eq!(
            outcome.error_for("openTo"),
            Some("Open To time should be greater than Open From time")
        );
        assert_eq!(outcome.error_for("openFrom"), None);
    }

    #[test]
    fn test_equal_hours_get_distinct_message() {
        let mut form = filled_form();
        form.values.open_from = "02:00 PM".to_string();
        form.values.open_to = "02:00 PM".to_string();
        let outcome = form.validate().clone();
        assert_eq!(
            outcome.error_for("openTo"),
            Some("Open From and Open To time cannot be the same")
        );
    }

    #[test]
    fn test_payload_nests_location_contact_and_hours() {
        let form = filled_form();
        let payload = form.payload();
        assert_eq!(payload.id, None);
        assert_eq!(payload.location.zip_code, "62701");
        assert_eq!(payload.contact.phone, "5551234567");
        assert_eq!(payload.operating_hours.open_time, "10:00 AM");
        assert_eq!(payload.image, "aGVsbG8=");
    }

    #[test]
    fn test_snapshot_prefills_values() {
        let saved = filled_form().payload();
        let mut snapshot = saved.clone();
        snapshot.id = Some("65f1c2".to_string());

        let form = RestaurantForm::from_snapshot(&snapshot);
        assert!(form.is_edit());
        assert_eq!(form.values.restaurant_name, "Trattoria Roma");
        assert_eq!(form.values.zip, "62701");
        assert_eq!(form.values.image_base64, "aGVsbG8=");
        assert_eq!(form.values.image, None);
    }

    #[tokio::test]
    async fn test_invalid_form_never_dispatches() {
        let mut form = RestaurantForm::new();
        let dispatch = StubDispatch::ok();
        let cache = populated_cache().await;
        let notifier = RecordingNotifier::new();

        let outcome = form
            .submit(&dispatch, &cache, &notifier, &CancelToken::new())
            .await;

        assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
        assert_eq!(dispatch.created.load(Ordering::SeqCst), 0);
        assert_eq!(dispatch.updated.load(Ordering::SeqCst), 0);
        assert!(notifier.recorded().is_empty());
        assert!(!cache.is_stale(None));
        // Submit surfaces every error even though nothing was touched before.
        assert_eq!(
            form.visible_error("restaurantName"),
            Some("Restaurant name is required")
        );
    }

    #[tokio::test]
    async fn test_inverted_hours_block_submission() {
        let mut form = filled_form();
        form.values.open_from = "11:00 PM".to_string();
        form.values.open_to = "10:00 PM".to_string();
        let dispatch = StubDispatch::ok();
        let cache = populated_cache().await;
        let notifier = RecordingNotifier::new();

        let outcome = form
            .submit(&dispatch, &cache, &notifier, &CancelToken::new())
            .await;

        match outcome {
            SubmitOutcome::Invalid(errors) => assert_eq!(
                errors.error_for("openTo"),
                Some("Open To time should be greater than Open From time")
            ),
            other => panic!("expected validation failure, got {other:?}"),
        }
        assert_eq!(dispatch.created.load(Ordering::SeqCst), 0);
        assert_eq!(dispatch.updated.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_create_success_notifies_invalidates_and_resets() {
        let mut form = filled_form();
        let dispatch = StubDispatch::ok();
        let cache = populated_cache().await;
        let notifier = RecordingNotifier::new();

        let outcome = form
            .submit(&dispatch, &cache, &notifier, &CancelToken::new())
            .await;

        assert!(matches!(outcome, SubmitOutcome::Created(_)));
        assert_eq!(dispatch.created.load(Ordering::SeqCst), 1);
        assert!(cache.is_stale(None));
        assert_eq!(
            notifier.successes(),
            vec!["Successfully added new restaurant!".to_string()]
        );
        assert_eq!(form.values, RestaurantFormValues::default());
    }

    #[tokio::test]
    async fn test_update_success_keeps_values_for_the_closing_surface() {
        let saved = filled_form().payload();
        let mut snapshot = saved;
        snapshot.id = Some("65f1c2".to_string());

        let mut form = RestaurantForm::from_snapshot(&snapshot);
        form.set_image(
            FilePreview::new("front.png", 120_000, "image/png"),
            "aGVsbG8=".to_string(),
        );
        let dispatch = StubDispatch::ok();
        let cache = populated_cache().await;
        let notifier = RecordingNotifier::new();

        let outcome = form
            .submit(&dispatch, &cache, &notifier, &CancelToken::new())
            .await;

        match outcome {
            SubmitOutcome::Updated(updated) => {
                assert_eq!(updated.id.as_deref(), Some("65f1c2"))
            }
            other => panic!("expected update, got {other:?}"),
        }
        assert_eq!(dispatch.updated.load(Ordering::SeqCst), 1);
        assert!(cache.is_stale(None));
        assert_eq!(
            notifier.successes(),
            vec!["Successfully updated restaurant!".to_string()]
        );
        assert_eq!(form.values.restaurant_name, "Trattoria Roma");
    }

    #[tokio::test]
    async fn test_create_failure_preserves_values() {
        let mut form = filled_form();
        let dispatch = StubDispatch::failing(ClientError::transport("connection refused"));
        let cache = populated_cache().await;
        let notifier = RecordingNotifier::new();

        let outcome = form
            .submit(&dispatch, &cache, &notifier, &CancelToken::new())
            .await;

        assert!(matches!(outcome, SubmitOutcome::Failed(_)));
        assert!(!cache.is_stale(None));
        assert_eq!(
            notifier.errors(),
            vec!["Error while creating new restaurant".to_string()]
        );
        assert_eq!(form.values.restaurant_name, "Trattoria Roma");
    }

    #[tokio::test]
    async fn test_update_failure_surfaces_server_detail() {
        let mut snapshot = filled_form().payload();
        snapshot.id = Some("65f1c2".to_string());

        let mut form = RestaurantForm::from_snapshot(&snapshot);
        form.set_image(
            FilePreview::new("front.png", 120_000, "image/png"),
            "aGVsbG8=".to_string(),
        );
        let dispatch =
            StubDispatch::failing(ClientError::api(Some(409), "Restaurant name already exists"));
        let cache = populated_cache().await;
        let notifier = RecordingNotifier::new();

        form.submit(&dispatch, &cache, &notifier, &CancelToken::new())
            .await;

        assert_eq!(
            notifier.errors(),
            vec!["Restaurant name already exists".to_string()]
        );
    }

    #[tokio::test]
    async fn test_cancelled_submission_still_invalidates_but_stays_quiet() {
        let mut form = filled_form();
        let dispatch = StubDispatch::ok();
        let cache = populated_cache().await;
        let notifier = RecordingNotifier::new();
        let cancel = CancelToken::new();
        cancel.cancel();

        let outcome = form.submit(&dispatch, &cache, &notifier, &cancel).await;

        assert!(outcome.is_persisted());
        assert!(cache.is_stale(None));
        assert!(notifier.recorded().is_empty());
        // No reset either: the surface that owned the form is gone.
        assert_eq!(form.values.restaurant_name, "Trattoria Roma");
    }

    #[test]
    fn test_toggle_category() {
        let mut form = RestaurantForm::new();
        form.toggle_category("Italian");
        form.toggle_category("Pasta");
        assert_eq!(form.values.categories, vec!["Italian", "Pasta"]);

        form.toggle_category("Italian");
        assert_eq!(form.values.categories, vec!["Pasta"]);
    }

    #[test]
    fn test_notification_kinds_recorded_in_order() {
        let notifier = RecordingNotifier::new();
        notifier.success("saved");
        notifier.error("lost");
        let recorded = notifier.recorded();
        assert_eq!(recorded[0].kind, NotificationKind::Success);
        assert_eq!(recorded[1].kind, NotificationKind::Error);
    }
}
