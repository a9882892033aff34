// User records and the request/reply shapes of the auth commands

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Stored user record
/// Owned by the user store; never serialized as a whole
#[derive(Debug, Clone, FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// User as returned to callers and embedded in token claims (no password_hash)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPublic {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<UserRecord> for UserPublic {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// Payload of `auth.register`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterUserRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, max = 128, message = "password must be between 8 and 128 characters"))]
    pub password: String,
}

/// Payload of `auth.login`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginUserRequest {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,
}

/// Successful register/login reply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResult {
    pub user: UserPublic,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_user_drops_password_hash() {
        let record = UserRecord {
            id: Uuid::new_v4(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "$argon2id$v=19$m=8,t=1,p=1$c2FsdHNhbHQ$aGFzaA".to_string(),
            created_at: Utc::now(),
        };

        let public = UserPublic::from(record.clone());
        let json = serde_json::to_value(&public).unwrap();

        assert_eq!(public.id, record.id);
        assert_eq!(json["email"], "ada@example.com");
        assert!(json.get("password_hash").is_none());
        assert!(!json.to_string().contains(&record.password_hash));
    }

    #[test]
    fn test_register_request_validation() {
        let valid = RegisterUserRequest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "correct horse".to_string(),
        };
        assert!(valid.validate().is_ok());

        let bad_email = RegisterUserRequest { email: "not-an-email".to_string(), ..valid.clone() };
        assert!(bad_email.validate().is_err());

        let short_password = RegisterUserRequest { password: "short".to_string(), ..valid.clone() };
        assert!(short_password.validate().is_err());

        let no_name = RegisterUserRequest { name: String::new(), ..valid };
        assert!(no_name.validate().is_err());
    }

    #[test]
    fn test_login_request_validation() {
        let valid = LoginUserRequest {
            email: "ada@example.com".to_string(),
            password: "x".to_string(),
        };
        assert!(valid.validate().is_ok());

        let empty_password = LoginUserRequest { password: String::new(), ..valid };
        assert!(empty_password.validate().is_err());
    }
}
