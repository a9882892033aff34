// Authentication module
// User registration and login with Argon2id password hashes and JWT session tokens

pub mod error;
pub mod handlers;
pub mod models;
pub mod password;
pub mod repository;
pub mod service;
pub mod token;

// Re-export commonly used types
pub use error::{AuthError, StoreError};
pub use handlers::{dispatch, health_handler, message_handler, AuthCommand, LOGIN_PATTERN, REGISTER_PATTERN};
pub use models::{AuthResult, LoginUserRequest, RegisterUserRequest, UserPublic, UserRecord};
pub use password::{HashCost, PasswordService};
pub use repository::{InMemoryUserStore, PgUserStore, UserStore};
pub use service::CredentialService;
pub use token::{Claims, TokenIssuer, TOKEN_TTL_SECONDS};
