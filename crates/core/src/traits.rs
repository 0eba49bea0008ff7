//! Core traits for the FoodieDelight client
//!
//! This module defines the traits that entities and form state implement
//! to provide consistent validation behavior.

use crate::error::ClientResult;

// ============================================================================
// Validatable Trait
// ============================================================================

/// Trait for types that can be validated
///
/// Types implementing this trait can check their internal consistency
/// and return validation errors if the state is invalid.
///
/// # Example
///
/// ```rust,ignore
/// use foodie_core::{Validatable, ClientResult, ClientError};
///
/// struct Contact {
///     email: String,
///     phone: String,
/// }
///
/// impl Validatable for Contact {
///     fn validate(&self) -> ClientResult<()> {
///         if !self.email.contains('@') {
///             return Err(ClientError::validation("Invalid email"));
///         }
///         if !self.phone.chars().all(|c| c.is_ascii_digit()) {
///             return Err(ClientError::validation("Contact must be a number"));
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Validatable {
    /// Validate the current state of the object
    ///
    /// Returns `Ok(())` if valid, or a `ClientError` describing the problem.
    fn validate(&self) -> ClientResult<()>;

    /// Check if the object is valid without returning error details
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Get all validation errors (for types that can have multiple errors)
    fn validation_errors(&self) -> Vec<String> {
        match self.validate() {
            Ok(()) => vec![],
            Err(e) => vec![e.to_string()],
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
