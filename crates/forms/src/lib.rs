//! Form validation and submission engine
//!
//! The declarative schema layer (`rules`, `schema`), the field
//! transforms (time normalization, image encoding), and the two form
//! controllers that drive create/update submissions through the API
//! client while keeping the server-state cache honest.

pub mod cancel;
pub mod dispatch;
pub mod menu_form;
pub mod notify;
pub mod restaurant_form;
pub mod rules;
pub mod schema;
pub mod transforms;

pub use cancel::CancelToken;
pub use dispatch::{MenuDispatch, RestaurantDispatch};
pub use menu_form::{Availability, MenuForm, MenuFormValues};
pub use notify::{Notification, NotificationKind, Notifier, RecordingNotifier, TracingNotifier};
pub use restaurant_form::{
    CATEGORY_OPTIONS, RestaurantForm, RestaurantFormValues, SubmitOutcome,
};
pub use rules::{FieldRule, FieldValue, FilePreview, IMAGE_MIME_TYPES, MAX_IMAGE_BYTES};
pub use schema::{FieldSchema, FieldValues, FormSchema, ValidationOutcome};
pub use transforms::{TIME_SLOTS, convert_to_24_hour, encode_image_file};
