use validator::Validate;

use crate::error::ApiError;

/// Run derive-based validation on a request body.
pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), ApiError> {
    payload.validate().map_err(ApiError::from)
}

/// Usernames are 3..=30 characters of letters, digits, `_` or `-`.
pub fn validate_username(username: &str) -> Result<(), ApiError> {
    let length = username.chars().count();
    if length < 3 {
        return Err(ApiError::Validation(
            "username must be at least 3 characters long".to_string(),
        ));
    }
    if length > 30 {
        return Err(ApiError::Validation(
            "username must be at most 30 characters long".to_string(),
        ));
    }
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
    {
        return Err(ApiError::Validation(
            "username can only contain letters, numbers, underscores and hyphens".to_string(),
        ));
    }

    Ok(())
}
