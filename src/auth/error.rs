// Credential error types

use thiserror::Error;

/// Failures reported by a `UserStore` implementation
#[derive(Debug, Error)]
pub enum StoreError {
    /// A user with this email already exists
    /// Raised by the store's own uniqueness constraint, not by a pre-check
    #[error("User already exists")]
    UniqueViolation,

    /// The backing store failed
    /// The message is safe to hand to callers; raw driver errors are logged by the store
    #[error("{0}")]
    Backend(String),
}

/// Errors raised while registering or authenticating a user
///
/// Every variant is normalized into a `StructuredFailure` before it leaves the
/// service (see `crate::error`).
#[derive(Debug, Error)]
pub enum AuthError {
    /// Registration with an email that is already taken
    #[error("User already exists")]
    DuplicateAccount,

    /// Unknown email or wrong password
    /// Both cases share this variant so callers cannot tell them apart
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Request payload failed schema validation
    #[error("{0}")]
    Validation(String),

    /// User store failure
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Argon2 hashing or hash parsing failure
    #[error("{0}")]
    PasswordHash(String),

    /// Token signing failure
    #[error("{0}")]
    Token(String),

    /// Failure with no usable message (e.g. a panicked hashing task)
    #[error("Unknown error")]
    Unknown,
}

impl AuthError {
    /// True for failures that mean "this email is already registered",
    /// whether caught by the pre-check or by the store's constraint
    pub fn is_duplicate_account(&self) -> bool {
        matches!(
            self,
            AuthError::DuplicateAccount | AuthError::Store(StoreError::UniqueViolation)
        )
    }
}
