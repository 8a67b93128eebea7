use std::env;

use super::types::{ConfigError, Environment};
use crate::storage::types::ClassLevel;

pub(super) fn env_optional(key: &str) -> Option<String> {
    env::var(key).ok().map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}

pub(super) fn env_or_default(key: &str, default: &str) -> String {
    env_optional(key).unwrap_or_else(|| default.to_string())
}

pub(super) fn parse_u64(field: &'static str, value: String) -> Result<u64, ConfigError> {
    value.parse::<u64>().map_err(|_| ConfigError::InvalidValue { field, value })
}

pub(super) fn parse_bool(value: &str) -> bool {
    matches!(value, "1" | "true" | "TRUE" | "yes" | "YES")
}

pub(super) fn parse_environment(value: Option<String>) -> Environment {
    match value.as_deref() {
        Some("production") => Environment::Production,
        Some("staging") => Environment::Staging,
        Some("test") => Environment::Test,
        _ => Environment::Development,
    }
}

pub(super) fn parse_string_list(value: Option<String>, default: &[&str]) -> Vec<String> {
    match value {
        Some(raw) => raw
            .split(',')
            .map(|item| item.trim().to_ascii_lowercase())
            .filter(|item| !item.is_empty())
            .collect(),
        None => default.iter().map(|item| item.to_string()).collect(),
    }
}

pub(super) fn parse_class_level(
    field: &'static str,
    value: String,
) -> Result<ClassLevel, ConfigError> {
    ClassLevel::parse(&value).ok_or(ConfigError::InvalidValue { field, value })
}

pub(super) fn is_supported_video_extension(extension: &str) -> bool {
    matches!(extension, "mp4" | "webm" | "mov" | "mkv" | "avi")
}

pub(super) fn is_supported_document_extension(extension: &str) -> bool {
    matches!(extension, "pdf")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_list_splits_trims_and_lowercases() {
        let parsed = parse_string_list(Some(" MP4, webm ,,mov".to_string()), &["pdf"]);
        assert_eq!(parsed, vec!["mp4", "webm", "mov"]);
    }

    #[test]
    fn string_list_falls_back_to_default() {
        let parsed = parse_string_list(None, &["pdf"]);
        assert_eq!(parsed, vec!["pdf"]);
    }

    #[test]
    fn class_level_parsing_rejects_unknown_grades() {
        let result = parse_class_level("DEFAULT_STUDENT_CLASS", "12th".to_string());
        assert!(
            matches!(result, Err(ConfigError::InvalidValue { field, .. }) if field == "DEFAULT_STUDENT_CLASS")
        );
    }

    #[test]
    fn environment_defaults_to_development() {
        assert_eq!(parse_environment(None), Environment::Development);
        assert_eq!(parse_environment(Some("production".to_string())), Environment::Production);
    }
}
