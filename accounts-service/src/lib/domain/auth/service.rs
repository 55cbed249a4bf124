use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::TokenCodec;
use chrono::Duration;
use uuid::Uuid;

use crate::domain::auth::models::AccessToken;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

/// Credential and token workflow.
///
/// Orchestrates registration, login, and token resolution over the user
/// store and the `auth` crate primitives. Holds no state of its own beyond
/// the injected collaborators.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: PasswordHasher,
    token_codec: Arc<TokenCodec>,
    token_ttl: Duration,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// Create the workflow with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `token_codec` - Token signer/verifier (process-wide secret)
    /// * `token_ttl` - Lifetime of issued tokens
    pub fn new(repository: Arc<UR>, token_codec: Arc<TokenCodec>, token_ttl: Duration) -> Self {
        Self {
            repository,
            password_hasher: PasswordHasher::new(),
            token_codec,
            token_ttl,
        }
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<User, UserError> {
        // Username before email: when both collide, the username error wins
        if self
            .repository
            .find_by_username(command.username.as_str())
            .await?
            .is_some()
        {
            return Err(UserError::UsernameAlreadyExists(
                command.username.to_string(),
            ));
        }

        if self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(UserError::EmailAlreadyExists(command.email.to_string()));
        }

        let password_hash = self.password_hasher.hash(&command.password)?;

        let created = self
            .repository
            .create(NewUser {
                uuid: Uuid::new_v4(),
                username: command.username,
                email: command.email,
                full_name: command.full_name,
                password_hash: Some(password_hash),
            })
            .await?;

        tracing::info!(user_id = %created.id, username = %created.username, "user registered");
        Ok(created)
    }

    async fn login(&self, username: &str, password: &str) -> Result<AccessToken, UserError> {
        let user = self
            .repository
            .find_by_username(username)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        // A user created administratively has no credential; to the caller
        // that is the same as a wrong password
        let Some(digest) = user.password_hash.as_deref() else {
            return Err(UserError::InvalidCredentials);
        };

        if !self.password_hasher.verify(password, digest) {
            tracing::warn!(username = %user.username, "login with invalid password");
            return Err(UserError::InvalidCredentials);
        }

        if !user.is_active {
            tracing::warn!(username = %user.username, "login on disabled account");
            return Err(UserError::AccountDisabled);
        }

        let token = self
            .token_codec
            .issue(user.username.as_str(), user.id.0, self.token_ttl)
            .map_err(|e| UserError::Unknown(format!("Token issuance failed: {}", e)))?;

        tracing::info!(user_id = %user.id, username = %user.username, "user logged in");
        Ok(AccessToken::new(token))
    }

    async fn resolve(&self, token: &str) -> Result<Option<User>, UserError> {
        let Some(token_data) = self.token_codec.verify(token) else {
            return Ok(None);
        };

        let user = self.repository.find_by_id(UserId(token_data.user_id)).await?;

        // A vanished or disabled user is indistinguishable from a bad token
        Ok(user.filter(|user| user.is_active))
    }
}
