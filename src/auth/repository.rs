// User store: the persistence seam of the credential service

use crate::auth::{error::StoreError, models::UserRecord};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::error;
use uuid::Uuid;

/// Message returned to callers for any backend failure
const STORE_UNAVAILABLE: &str = "User store unavailable";

/// Persistence capability used by `CredentialService`
///
/// Implementations must enforce email uniqueness themselves: a `create` for an
/// email that already exists fails with `StoreError::UniqueViolation`.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find a user by exact (case-sensitive) email
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Insert a new user and return the stored record
    async fn create(&self, name: &str, email: &str, password_hash: &str) -> Result<UserRecord, StoreError>;
}

/// PostgreSQL-backed user store
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// Create a new PgUserStore
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn backend_error(e: sqlx::Error) -> StoreError {
    error!("Database error in user store: {}", e);
    StoreError::Backend(STORE_UNAVAILABLE.to_string())
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        sqlx::query_as::<_, UserRecord>(
            "SELECT id, name, email, password_hash, created_at FROM users WHERE email = $1"
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend_error)
    }

    async fn create(&self, name: &str, email: &str, password_hash: &str) -> Result<UserRecord, StoreError> {
        sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (id, name, email, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, password_hash, created_at
            "#
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // Check for unique constraint violation
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return StoreError::UniqueViolation;
                }
            }
            backend_error(e)
        })
    }
}

/// In-process user store keyed by email
///
/// Lookups and inserts take the same lock, so uniqueness holds under
/// concurrent registrations.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<HashMap<String, UserRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.lock().await.is_empty()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.users.lock().await.get(email).cloned())
    }

    async fn create(&self, name: &str, email: &str, password_hash: &str) -> Result<UserRecord, StoreError> {
        let mut users = self.users.lock().await;
        if users.contains_key(email) {
            return Err(StoreError::UniqueViolation);
        }

        let user = UserRecord {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        users.insert(email.to_string(), user.clone());
        Ok(user)
    }
}
