//! Account service: signup, login, session tokens, profile updates.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use quaero_common::{AppError, AppResult, Config, config::PasswordPolicy};
use quaero_store::entities::user;
use quaero_store::repositories::{DynUserStore, NewUser, UserStore};
use serde::{Deserialize, Serialize};

use crate::sanitize::sanitize_input;
use crate::validation::{validate_email, validate_name, validate_password};

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct SignupInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Input for updating a profile.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileInput {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
}

/// Session token claims.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Subject: the user id.
    sub: String,
    /// Expiry as a unix timestamp.
    exp: i64,
    /// Issued-at as a unix timestamp.
    iat: i64,
}

/// Account service for business logic.
#[derive(Clone)]
pub struct AccountService {
    users: DynUserStore,
    policy: PasswordPolicy,
    jwt_secret: String,
    token_expiry: Duration,
}

impl AccountService {
    /// Create a new account service.
    #[must_use]
    pub fn new(users: DynUserStore, config: &Config) -> Self {
        Self {
            users,
            policy: config.auth.password_policy.clone(),
            jwt_secret: config.auth.jwt_secret.clone(),
            token_expiry: Duration::hours(config.auth.token_expiry_hours),
        }
    }

    /// Create a new account and issue a session token.
    pub async fn signup(&self, input: SignupInput) -> AppResult<(user::Model, String)> {
        let name = sanitize_input(&input.name);

        validate_name(&name)
            .merge(validate_email(&input.email))
            .merge(validate_password(&input.password, &self.policy))
            .into_result()?;

        let user = self
            .users
            .create(NewUser {
                name,
                email: input.email.trim().to_string(),
                password: input.password,
                avatar: None,
                bio: None,
                is_moderator: false,
            })
            .await?;

        let token = self.issue_token(&user.id)?;
        tracing::info!(user_id = %user.id, "Account created");
        Ok((user, token))
    }

    /// Verify credentials and issue a session token.
    ///
    /// An unknown email and a wrong password both yield `Unauthorized`, so
    /// callers cannot probe which accounts exist.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<(user::Model, String)> {
        let user = self
            .users
            .verify_credentials(email.trim(), password)
            .await?
            .ok_or(AppError::Unauthorized)?;

        let token = self.issue_token(&user.id)?;
        Ok((user, token))
    }

    /// Resolve a session token to its user.
    pub async fn authenticate_by_token(&self, token: &str) -> AppResult<user::Model> {
        let user_id = self.verify_token(token)?;
        self.users
            .find_by_id(&user_id)
            .await?
            .ok_or(AppError::Unauthorized)
    }

    /// Get a user by ID.
    pub async fn get(&self, id: &str) -> AppResult<user::Model> {
        self.users.get_by_id(id).await
    }

    /// Update the authenticated user's profile.
    pub async fn update_profile(
        &self,
        user_id: &str,
        input: UpdateProfileInput,
    ) -> AppResult<user::Model> {
        let mut user = self.users.get_by_id(user_id).await?;

        if let Some(name) = input.name {
            let name = sanitize_input(&name);
            validate_name(&name).into_result()?;
            user.name = name;
        }
        if let Some(bio) = input.bio {
            user.bio = Some(sanitize_input(&bio));
        }
        if let Some(avatar) = input.avatar {
            user.avatar = Some(avatar);
        }
        user.updated_at = Some(Utc::now());

        self.users.update(user).await
    }

    /// Mint a signed session token for a user.
    pub fn issue_token(&self, user_id: &str) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            exp: (now + self.token_expiry).timestamp(),
            iat: now.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Failed to sign token: {e}")))
    }

    /// Verify a session token, returning the user id it was issued for.
    pub fn verify_token(&self, token: &str) -> AppResult<String> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims.sub)
        .map_err(|_| AppError::Unauthorized)
    }
}
