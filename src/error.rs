// Boundary error shape for the credential service
// Every failure leaving the service is a StructuredFailure

use crate::auth::error::{AuthError, StoreError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

pub const DUPLICATE_ACCOUNT_MESSAGE: &str = "User already exists";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

/// `{ status, message }` reply sent to callers on any failure
///
/// Carries no internal detail beyond a plain message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredFailure {
    pub status: u16,
    pub message: String,
}

impl StructuredFailure {
    pub fn bad_request(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            return Self::unknown();
        }
        Self { status: 400, message }
    }

    pub fn unknown() -> Self {
        Self {
            status: 500,
            message: UNKNOWN_ERROR_MESSAGE.to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// Mapping from internal failure causes to the boundary shape
///
/// - duplicate account (pre-check or store constraint) -> 400 "User already exists"
/// - unknown email or wrong password -> 400 "Invalid credentials"
/// - any other failure with a message -> 400 with that message
/// - anything without a message -> 500 "Unknown error"
impl From<AuthError> for StructuredFailure {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::DuplicateAccount | AuthError::Store(StoreError::UniqueViolation) => {
                debug!("Duplicate account rejected");
                Self::bad_request(DUPLICATE_ACCOUNT_MESSAGE)
            }
            AuthError::InvalidCredentials => Self::bad_request(INVALID_CREDENTIALS_MESSAGE),
            AuthError::Validation(msg) => {
                debug!("Validation error: {}", msg);
                Self::bad_request(msg)
            }
            AuthError::Store(StoreError::Backend(msg)) => {
                warn!("User store failure: {}", msg);
                Self::bad_request(msg)
            }
            AuthError::PasswordHash(msg) => {
                error!("Password hashing error: {}", msg);
                Self::bad_request(msg)
            }
            AuthError::Token(msg) => {
                error!("Token generation error: {}", msg);
                Self::bad_request(msg)
            }
            AuthError::Unknown => {
                error!("Unknown error in credential service");
                Self::unknown()
            }
        }
    }
}

impl IntoResponse for StructuredFailure {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_account_mapping() {
        let failure = StructuredFailure::from(AuthError::DuplicateAccount);
        assert_eq!(failure.status, 400);
        assert_eq!(failure.message, "User already exists");
    }

    #[test]
    fn test_store_unique_violation_maps_like_duplicate() {
        let from_store = StructuredFailure::from(AuthError::Store(StoreError::UniqueViolation));
        let from_check = StructuredFailure::from(AuthError::DuplicateAccount);
        assert_eq!(from_store, from_check);
    }

    #[test]
    fn test_invalid_credentials_mapping() {
        let failure = StructuredFailure::from(AuthError::InvalidCredentials);
        assert_eq!(failure, StructuredFailure { status: 400, message: "Invalid credentials".to_string() });
    }

    #[test]
    fn test_message_bearing_failures_pass_through_at_400() {
        let cases = vec![
            AuthError::Validation("email must be a valid email address".to_string()),
            AuthError::Store(StoreError::Backend("User store unavailable".to_string())),
            AuthError::PasswordHash("Password hashing failed".to_string()),
            AuthError::Token("Token generation failed".to_string()),
        ];

        for err in cases {
            let expected = err.to_string();
            let failure = StructuredFailure::from(err);
            assert_eq!(failure.status, 400);
            assert_eq!(failure.message, expected);
        }
    }

    #[test]
    fn test_messageless_failures_are_unknown() {
        assert_eq!(StructuredFailure::from(AuthError::Unknown), StructuredFailure::unknown());
        assert_eq!(
            StructuredFailure::from(AuthError::Store(StoreError::Backend(String::new()))),
            StructuredFailure { status: 500, message: "Unknown error".to_string() }
        );
    }

    #[test]
    fn test_response_status_matches_failure() {
        let response = StructuredFailure::unknown().into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = StructuredFailure::bad_request("nope").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
