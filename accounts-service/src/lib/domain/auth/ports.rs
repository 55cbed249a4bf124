use async_trait::async_trait;

use crate::domain::auth::models::AccessToken;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::User;

/// Port for the credential and token workflow.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user with credentials.
    ///
    /// The username collision is checked before the email one, so a request
    /// colliding on both reports the username.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Password` - Password hashing failed
    /// * `DatabaseError` - Storage operation failed
    async fn register(&self, command: RegisterCommand) -> Result<User, UserError>;

    /// Verify credentials and issue a bearer token.
    ///
    /// An unknown username and a wrong password are indistinguishable to the
    /// caller.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username, missing credential, or
    ///   wrong password
    /// * `AccountDisabled` - Credentials are correct but the account is
    ///   inactive
    /// * `DatabaseError` - Storage operation failed
    async fn login(&self, username: &str, password: &str) -> Result<AccessToken, UserError>;

    /// Resolve a bearer token to its user.
    ///
    /// `None` covers an invalid or expired token, a vanished user, and a
    /// disabled account alike; callers must not be able to distinguish them.
    ///
    /// # Errors
    /// * `DatabaseError` - Storage operation failed
    async fn resolve(&self, token: &str) -> Result<Option<User>, UserError>;
}
