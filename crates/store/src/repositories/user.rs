//! User store.
//!
//! The single storage boundary for accounts: a [`UserStore`] trait with one
//! in-memory key-value implementation. Credentials are verified here so no
//! caller ever sees a password hash leave the store.

use std::collections::HashMap;
use std::sync::Arc;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use async_trait::async_trait;
use chrono::Utc;
use quaero_common::{AppError, AppResult, IdGenerator};
use tokio::sync::RwLock;

use crate::entities::user;

/// Input for creating a user account. The plaintext password is hashed inside
/// the store.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub is_moderator: bool,
}

/// Account storage boundary.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find a user by ID.
    async fn find_by_id(&self, id: &str) -> AppResult<Option<user::Model>>;

    /// Find a user by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<user::Model>>;

    /// Create a new account. Fails with `Conflict` if the email is taken.
    async fn create(&self, input: NewUser) -> AppResult<user::Model>;

    /// Verify an email/password pair, returning the user on success and
    /// `None` on either an unknown email or a wrong password.
    async fn verify_credentials(&self, email: &str, password: &str)
    -> AppResult<Option<user::Model>>;

    /// Replace a user record. The email index follows the update.
    async fn update(&self, model: user::Model) -> AppResult<user::Model>;

    /// Adjust a user's reputation by `delta`, returning the new score.
    async fn adjust_reputation(&self, id: &str, delta: i64) -> AppResult<i64>;

    /// Get a user by ID, failing with `UserNotFound`.
    async fn get_by_id(&self, id: &str) -> AppResult<user::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::UserNotFound(id.to_string()))
    }
}

/// Shared handle to the configured user store.
pub type DynUserStore = Arc<dyn UserStore>;

#[derive(Default)]
struct UserTable {
    rows: HashMap<String, user::Model>,
    /// Lowercased email → user id.
    by_email: HashMap<String, String>,
}

/// In-memory key-value [`UserStore`] implementation.
#[derive(Clone, Default)]
pub struct MemoryUserStore {
    table: Arc<RwLock<UserTable>>,
    id_gen: IdGenerator,
}

impl MemoryUserStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<user::Model>> {
        let table = self.table.read().await;
        Ok(table.rows.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<user::Model>> {
        let table = self.table.read().await;
        Ok(table
            .by_email
            .get(&email.to_lowercase())
            .and_then(|id| table.rows.get(id))
            .cloned())
    }

    async fn create(&self, input: NewUser) -> AppResult<user::Model> {
        let email_key = input.email.to_lowercase();
        let mut table = self.table.write().await;

        if table.by_email.contains_key(&email_key) {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let model = user::Model {
            id: self.id_gen.generate(),
            name: input.name,
            email: input.email,
            password_hash: hash_password(&input.password)?,
            avatar: input.avatar,
            bio: input.bio,
            reputation: 0,
            is_moderator: input.is_moderator,
            created_at: Utc::now(),
            updated_at: None,
        };

        table.by_email.insert(email_key, model.id.clone());
        table.rows.insert(model.id.clone(), model.clone());
        Ok(model)
    }

    async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> AppResult<Option<user::Model>> {
        let user = match self.find_by_email(email).await? {
            Some(user) => user,
            None => return Ok(None),
        };

        if verify_password(password, &user.password_hash)? {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }

    async fn update(&self, model: user::Model) -> AppResult<user::Model> {
        let mut table = self.table.write().await;

        let previous = table
            .rows
            .get(&model.id)
            .ok_or_else(|| AppError::UserNotFound(model.id.clone()))?;

        let old_key = previous.email.to_lowercase();
        let new_key = model.email.to_lowercase();
        if old_key != new_key {
            if table.by_email.contains_key(&new_key) {
                return Err(AppError::Conflict("Email already registered".to_string()));
            }
            table.by_email.remove(&old_key);
            table.by_email.insert(new_key, model.id.clone());
        }

        table.rows.insert(model.id.clone(), model.clone());
        Ok(model)
    }

    async fn adjust_reputation(&self, id: &str, delta: i64) -> AppResult<i64> {
        let mut table = self.table.write().await;
        let user = table
            .rows
            .get_mut(id)
            .ok_or_else(|| AppError::UserNotFound(id.to_string()))?;
        user.reputation += delta;
        Ok(user.reputation)
    }
}

/// Hash a password using Argon2.
fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AppError::Internal(format!("Invalid hash: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
