use super::ApiError;

/// A required id field: present and positive.
pub fn require_id(value: Option<i32>, field: &str) -> Result<i32, ApiError> {
    match value {
        Some(id) if id > 0 => Ok(id),
        Some(id) => Err(ApiError::validation(format!(
            "Invalid {field}: {id}. ID must be a positive integer"
        ))),
        None => Err(ApiError::validation(format!("{field} is required"))),
    }
}

/// An optional id field: if present it must be positive.
pub fn optional_id(value: Option<i32>, field: &str) -> Result<Option<i32>, ApiError> {
    value.map(|id| require_id(Some(id), field)).transpose()
}

/// A required text field that must contain something besides whitespace.
pub fn require_text<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, ApiError> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(ApiError::validation(format!("{field} is required"))),
    }
}

pub fn validate_path_id(id: i32, resource: &str) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid {resource} ID: {id}. ID must be a positive integer"
        )));
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_id() {
        assert_eq!(require_id(Some(3), "movieId").unwrap(), 3);
        assert!(require_id(Some(0), "movieId").is_err());
        assert!(require_id(None, "movieId").is_err());
    }

    #[test]
    fn test_optional_id() {
        assert_eq!(optional_id(None, "movieId").unwrap(), None);
        assert_eq!(optional_id(Some(2), "movieId").unwrap(), Some(2));
        assert!(optional_id(Some(-1), "movieId").is_err());
    }

    #[test]
    fn test_require_text() {
        assert_eq!(require_text(Some("  hi "), "content").unwrap(), "hi");
        assert!(require_text(Some("   "), "content").is_err());
        assert!(require_text(None, "content").is_err());
    }

    #[test]
    fn test_validate_path_id() {
        assert!(validate_path_id(1, "movie").is_ok());
        assert!(validate_path_id(0, "movie").is_err());
        assert!(validate_path_id(-5, "movie").is_err());
    }
}
