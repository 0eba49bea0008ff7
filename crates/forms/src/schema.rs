//! Declarative form schemas
//!
//! A `FormSchema` is an ordered list of per-field rule sets plus an
//! optional cross-field check that runs after every per-field rule.
//! Validation always covers the whole form; whether an error is shown
//! next to a field is the form controller's touched-tracking concern.

use std::collections::BTreeMap;

use crate::rules::{FieldRule, FieldValue};

/// Current values of a form, keyed by field name
pub type FieldValues = BTreeMap<&'static str, FieldValue>;

/// A rule spanning more than one field, run after per-field rules
pub type CrossFieldCheck = fn(&FieldValues, &mut ValidationOutcome);

// ============================================================================
// FieldSchema
// ============================================================================

/// The ordered rules of one named field
#[derive(Debug, Clone)]
pub struct FieldSchema {
    /// Field name, matching the key in `FieldValues`
    pub name: &'static str,

    /// Rules checked in order; the first failure is the field's error
    pub rules: Vec<FieldRule>,
}

impl FieldSchema {
    /// Create a field schema with no rules
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            rules: Vec::new(),
        }
    }

    /// Require a non-empty value
    pub fn required(mut self, message: &'static str) -> Self {
        self.rules.push(FieldRule::Required { message });
        self
    }

    /// Require digits-only text
    pub fn numeric(mut self, message: &'static str) -> Self {
        self.rules.push(FieldRule::Numeric { message });
        self
    }

    /// Require an email-shaped value
    pub fn email(mut self, message: &'static str) -> Self {
        self.rules.push(FieldRule::Email { message });
        self
    }

    /// Require at least `min` selected options
    pub fn min_selected(mut self, min: usize, message: &'static str) -> Self {
        self.rules.push(FieldRule::MinSelected { min, message });
        self
    }

    /// Require an accepted image file
    pub fn file(mut self, required_message: &'static str) -> Self {
        self.rules.push(FieldRule::File { required_message });
        self
    }

    /// Check this field against a value, returning the first failure
    pub fn check(&self, value: &FieldValue) -> Result<(), String> {
        for rule in &self.rules {
            rule.check(value)?;
        }
        Ok(())
    }
}

// ============================================================================
// FormSchema
// ============================================================================

/// All fields of one form plus the optional cross-field check
#[derive(Debug, Clone, Default)]
pub struct FormSchema {
    fields: Vec<FieldSchema>,
    cross: Option<CrossFieldCheck>,
}

impl FormSchema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field
    pub fn field(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    /// Set the cross-field check
    pub fn cross_field(mut self, check: CrossFieldCheck) -> Self {
        self.cross = Some(check);
        self
    }

    /// Get the declared field names, in order
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }

    /// Validate the whole form.
    ///
    /// Fields missing from `values` are treated as empty text, so a field
    /// the view never rendered still fails its `Required` rule.
    pub fn validate(&self, values: &FieldValues) -> ValidationOutcome {
        let mut outcome = ValidationOutcome::ok();
        let empty = FieldValue::Text(String::new());

        for field in &self.fields {
            let value = values.get(field.name).unwrap_or(&empty);
            if let Err(message) = field.check(value) {
                outcome.add_error(field.name, message);
            }
        }

        if let Some(check) = self.cross {
            check(values, &mut outcome);
        }

        outcome
    }
}

// ============================================================================
// ValidationOutcome
// ============================================================================

/// Result of validating a form: at most one message per field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationOutcome {
    errors: BTreeMap<&'static str, String>,
}

impl ValidationOutcome {
    /// Create a passing outcome
    pub fn ok() -> Self {
        Self::default()
    }

    /// Record a field's error. The first recorded message per field wins,
    /// so a cross-field check never overwrites a per-field failure.
    pub fn add_error(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| message.into());
    }

    /// Whether any field failed
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Whether the whole form passed
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get a field's error message, if it failed
    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Iterate over `(field, message)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&&'static str, &String)> {
        self.errors.iter()
    }

    /// Number of failed fields
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether no field failed
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
