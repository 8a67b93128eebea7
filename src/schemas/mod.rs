pub mod auth;
pub mod content;
pub mod quiz;

use validator::ValidationErrors;

/// Flatten validator output into the single-line message surfaced to callers.
pub(crate) fn describe_validation_errors(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            match &error.message {
                Some(message) => parts.push(format!("{field}: {message}")),
                None => parts.push(format!("{field}: invalid value")),
            }
        }
    }
    if parts.is_empty() {
        return "invalid payload".to_string();
    }
    parts.sort();
    parts.join("; ")
}
