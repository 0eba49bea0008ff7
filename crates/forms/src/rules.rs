//! Per-field validation rules
//!
//! A field is valid iff every declared rule passes. Rules are checked in
//! declaration order and the first failing rule's message is the one
//! surfaced next to the field.

use std::sync::LazyLock;

use regex::Regex;

/// Largest accepted image upload, in bytes
pub const MAX_IMAGE_BYTES: u64 = 5_000_000;

/// Accepted image MIME types
pub const IMAGE_MIME_TYPES: &[&str] = &["image/jpg", "image/jpeg", "image/png"];

static NUMERIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("numeric regex is valid"));

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid"));

// ============================================================================
// FilePreview
// ============================================================================

/// Metadata of a selected file, used by file constraints.
///
/// The actual bytes are encoded separately (see `transforms`); validation
/// only needs size and type.
#[derive(Debug, Clone, PartialEq)]
pub struct FilePreview {
    /// Original file name
    pub name: String,
    /// File size in bytes
    pub size: u64,
    /// MIME type as reported by the picker, e.g. `"image/png"`
    pub mime: String,
}

impl FilePreview {
    /// Create file metadata
    pub fn new(name: impl Into<String>, size: u64, mime: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            mime: mime.into(),
        }
    }
}

// ============================================================================
// FieldValue
// ============================================================================

/// The value a form field currently holds
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Text inputs and selects
    Text(String),
    /// Multi-select checkboxes
    Selection(Vec<String>),
    /// File pickers; `None` until the user picks a file
    File(Option<FilePreview>),
}

impl FieldValue {
    /// Whether the field holds no usable input
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Selection(items) => items.is_empty(),
            FieldValue::File(file) => file.is_none(),
        }
    }

    /// Get the text content, empty for non-text values
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            _ => "",
        }
    }
}

// ============================================================================
// FieldRule
// ============================================================================

/// A single declarative constraint on a field
#[derive(Debug, Clone)]
pub enum FieldRule {
    /// The field must hold a non-empty value
    Required { message: &'static str },

    /// The text must be digits only
    Numeric { message: &'static str },

    /// The text must look like an email address
    Email { message: &'static str },

    /// At least `min` options must be selected
    MinSelected { min: usize, message: &'static str },

    /// A file must be selected, at most `MAX_IMAGE_BYTES` large and of an
    /// accepted image type
    File { required_message: &'static str },
}

impl FieldRule {
    /// Check the rule against a value, returning the message on failure.
    ///
    /// `Numeric` and `Email` pass on empty input; emptiness is `Required`'s
    /// concern, so a field can be optional-but-well-formed.
    pub fn check(&self, value: &FieldValue) -> Result<(), String> {
        match self {
            FieldRule::Required { message } => {
                if value.is_empty() {
                    return Err((*message).to_string());
                }
            }
            FieldRule::Numeric { message } => {
                let text = value.as_text();
                if !text.is_empty() && !NUMERIC_RE.is_match(text) {
                    return Err((*message).to_string());
                }
            }
            FieldRule::Email { message } => {
                let text = value.as_text();
                if !text.is_empty() && !EMAIL_RE.is_match(text) {
                    return Err((*message).to_string());
                }
            }
            FieldRule::MinSelected { min, message } => {
                let selected = match value {
                    FieldValue::Selection(items) => items.len(),
                    _ => 0,
                };
                if selected < *min {
                    return Err((*message).to_string());
                }
            }
            FieldRule::File { required_message } => {
                let file = match value {
                    FieldValue::File(file) => file.as_ref(),
                    _ => None,
                };
                let Some(file) = file else {
                    return Err((*required_message).to_string());
                };
                if file.size > MAX_IMAGE_BYTES {
                    return Err("The file is too large".to_string());
                }
                if !IMAGE_MIME_TYPES.contains(&file.mime.as_str()) {
                    return Err("Unsupported format".to_string());
                }
            }
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

    fn text(s: &str) -> FieldValue {
        FieldValue::Text(s.to_string())
    }

    #[test]
    fn test_required_rule() {
        let rule = FieldRule::Required {
            message: "Description is required",
        };
        assert!(rule.check(&text("pasta")).is_ok());
        assert_eq!(
            rule.check(&text("   ")).unwrap_err(),
            "Description is required"
        );
        assert!(rule.check(&FieldValue::File(None)).is_err());
    }

    #[test]
    fn test_numeric_rule() {
        let rule = FieldRule::Numeric {
            message: "price must be a number",
        };
        assert!(rule.check(&text("1250")).is_ok());
        assert!(rule.check(&text("12.50")).is_err());
        assert!(rule.check(&text("12a")).is_err());
        // Emptiness is Required's concern
        assert!(rule.check(&text("")).is_ok());
    }

    #[test]
    fn test_email_rule() {
        let rule = FieldRule::Email {
            message: "Invalid email",
        };
        assert!(rule.check(&text("roma@example.com")).is_ok());
        assert_eq!(rule.check(&text("roma@example")).unwrap_err(), "Invalid email");
        assert!(rule.check(&text("not-an-email")).is_err());
    }

    #[test]
    fn test_min_selected_rule() {
        let rule = FieldRule::MinSelected {
            min: 1,
            message: "Select at least one category",
        };
        assert!(
            rule.check(&FieldValue::Selection(vec!["Italian".to_string()]))
                .is_ok()
        );
        assert!(rule.check(&FieldValue::Selection(vec![])).is_err());
    }

    #[test]
    fn test_file_rule_required() {
        let rule = FieldRule::File {
            required_message: "Restaurant image is required",
        };
        assert_eq!(
            rule.check(&FieldValue::File(None)).unwrap_err(),
            "Restaurant image is required"
        );
    }

    #[test]
    fn test_file_rule_size_boundary() {
        let rule = FieldRule::File {
            required_message: "Menu image is required",
        };

        let just_over = FilePreview::new("big.png", 5_000_001, "image/png");
        assert_eq!(
            rule.check(&FieldValue::File(Some(just_over))).unwrap_err(),
            "The file is too large"
        );

        let just_under = FilePreview::new("ok.png", 4_999_999, "image/png");
        assert!(rule.check(&FieldValue::File(Some(just_under))).is_ok());

        let exact = FilePreview::new("exact.png", 5_000_000, "image/png");
        assert!(rule.check(&FieldValue::File(Some(exact))).is_ok());
    }

    #[test]
    fn test_file_rule_mime_types() {
        let rule = FieldRule::File {
            required_message: "Menu image is required",
        };

        let gif = FilePreview::new("anim.gif", 1_000, "image/gif");
        assert_eq!(
            rule.check(&FieldValue::File(Some(gif))).unwrap_err(),
            "Unsupported format"
        );

        for mime in IMAGE_MIME_TYPES {
            let file = FilePreview::new("pic", 1_000, *mime);
            assert!(rule.check(&FieldValue::File(Some(file))).is_ok());
        }
    }
}
