// Credential service - registration and login

use crate::auth::{
    error::AuthError,
    models::{AuthResult, UserPublic, UserRecord},
    password::PasswordService,
    repository::UserStore,
    token::TokenIssuer,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Registers users, checks credentials and issues session tokens
#[derive(Clone)]
pub struct CredentialService {
    store: Arc<dyn UserStore>,
    passwords: PasswordService,
    tokens: TokenIssuer,
}

impl CredentialService {
    /// Create a new CredentialService
    pub fn new(store: Arc<dyn UserStore>, passwords: PasswordService, tokens: TokenIssuer) -> Self {
        Self {
            store,
            passwords,
            tokens,
        }
    }

    /// Register a new user
    ///
    /// 1. Rejects emails that are already registered
    /// 2. Hashes the password
    /// 3. Creates the user; a uniqueness violation from the store (two
    ///    registrations racing past step 1) is reported as `DuplicateAccount`
    /// 4. Signs a token over the public user fields
    pub async fn register_user(&self, name: &str, email: &str, password: &str) -> Result<AuthResult, AuthError> {
        if self.store.find_by_email(email).await?.is_some() {
            warn!("Registration attempt for existing email: {}", email);
            return Err(AuthError::DuplicateAccount);
        }

        let password_hash = self.passwords.hash(password).await?;

        let user = self
            .store
            .create(name, email, &password_hash)
            .await
            .map_err(|e| {
                let e = AuthError::from(e);
                if e.is_duplicate_account() {
                    warn!("Concurrent registration lost the race for email: {}", email);
                    AuthError::DuplicateAccount
                } else {
                    e
                }
            })?;

        info!("Registered user {}", user.id);
        self.issue(user)
    }

    /// Log a user in
    ///
    /// Unknown email and wrong password both fail with `InvalidCredentials`,
    /// and both run one password verification.
    pub async fn login_user(&self, email: &str, password: &str) -> Result<AuthResult, AuthError> {
        let user = self.store.find_by_email(email).await?;

        let stored_hash = user.as_ref().map(|u| u.password_hash.clone());
        let matches = self.passwords.verify(password, stored_hash).await?;

        let user = match (user, matches) {
            (Some(user), true) => user,
            _ => {
                warn!("Failed login attempt for email: {}", email);
                return Err(AuthError::InvalidCredentials);
            }
        };

        info!("User {} logged in", user.id);
        self.issue(user)
    }

    fn issue(&self, user: UserRecord) -> Result<AuthResult, AuthError> {
        let user = UserPublic::from(user);
        let token = self.tokens.sign(&user)?;
        Ok(AuthResult { user, token })
    }
}
