// JWT token issuance

use crate::auth::{error::AuthError, models::UserPublic};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Session tokens are valid for 24 hours
pub const TOKEN_TTL_SECONDS: i64 = 24 * 60 * 60;

/// JWT claims structure
///
/// The public user fields are flattened into the top level of the payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(flatten)]
    pub user: UserPublic,
    pub iat: i64,        // issued at timestamp
    pub exp: i64,        // expiration timestamp
    pub jti: Uuid,       // unique per token
}

/// Signs session tokens with the process-wide secret
#[derive(Clone)]
pub struct TokenIssuer {
    key: EncodingKey,
    ttl: Duration,
}

impl fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("key", &"<redacted>")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenIssuer {
    /// Create a TokenIssuer with a 24 hour expiry
    pub fn new(secret: &[u8]) -> Self {
        Self {
            key: EncodingKey::from_secret(secret),
            ttl: Duration::seconds(TOKEN_TTL_SECONDS),
        }
    }

    /// Sign a token carrying the user's public fields
    pub fn sign(&self, user: &UserPublic) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            user: user.clone(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
            jti: Uuid::new_v4(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.key)
            .map_err(|e| AuthError::Token(format!("Token generation failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, DecodingKey, Validation};
    use proptest::prelude::*;

    const SECRET: &[u8] = b"test_secret_key_for_testing_purposes";

    fn test_user(email: &str) -> UserPublic {
        UserPublic {
            id: Uuid::new_v4(),
            name: "Test User".to_string(),
            email: email.to_string(),
            created_at: Utc::now(),
        }
    }

    fn decode_claims(token: &str, secret: &[u8]) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret),
            &Validation::new(Algorithm::HS256),
        )
        .map(|data| data.claims)
    }

    #[test]
    fn test_token_expiration_is_24_hours() {
        let issuer = TokenIssuer::new(SECRET);
        let token = issuer.sign(&test_user("test@example.com")).unwrap();
        let claims = decode_claims(&token, SECRET).unwrap();

        assert_eq!(claims.exp - claims.iat, 86_400);
    }

    #[test]
    fn test_token_claims_contain_public_user() {
        let issuer = TokenIssuer::new(SECRET);
        let user = test_user("user@example.com");
        let token = issuer.sign(&user).unwrap();
        let claims = decode_claims(&token, SECRET).unwrap();

        assert_eq!(claims.user.id, user.id);
        assert_eq!(claims.user.email, user.email);
        assert_eq!(claims.user.name, user.name);
    }

    #[test]
    fn test_tokens_for_same_user_differ() {
        let issuer = TokenIssuer::new(SECRET);
        let user = test_user("user@example.com");

        let first = issuer.sign(&user).unwrap();
        let second = issuer.sign(&user).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_token_signature_depends_on_secret() {
        let issuer = TokenIssuer::new(b"secret1");
        let token = issuer.sign(&test_user("test@example.com")).unwrap();

        assert!(decode_claims(&token, b"secret1").is_ok());
        assert!(decode_claims(&token, b"secret2").is_err());
    }

    #[test]
    fn test_debug_redacts_key() {
        let issuer = TokenIssuer::new(SECRET);
        let debug = format!("{:?}", issuer);

        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("test_secret_key"));
    }

    proptest! {
        #[test]
        fn prop_payload_has_no_password_field(
            name in "[A-Za-z ]{1,20}",
            email in "[a-z]{3,10}@[a-z]{3,10}\\.(com|org|net)"
        ) {
            let issuer = TokenIssuer::new(SECRET);
            let mut user = test_user(&email);
            user.name = name;
            let token = issuer.sign(&user)?;

            let payload = decode::<serde_json::Value>(
                &token,
                &DecodingKey::from_secret(SECRET),
                &Validation::new(Algorithm::HS256),
            )
            .unwrap()
            .claims;
            let object = payload.as_object().unwrap();

            prop_assert!(!object.contains_key("password"));
            prop_assert!(!object.contains_key("password_hash"));
            prop_assert_eq!(object["email"].as_str(), Some(email.as_str()));
        }
    }
}
