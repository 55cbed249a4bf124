use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Port for user CRUD operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Create a new user through the administrative path.
    ///
    /// No credential is issued; the user cannot log in until one exists.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken (checked first)
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Storage operation failed
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError>;

    /// Retrieve user by numeric identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Storage operation failed
    async fn get_user(&self, id: UserId) -> Result<User, UserError>;

    /// Retrieve user by UUID.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Storage operation failed
    async fn get_user_by_uuid(&self, uuid: &Uuid) -> Result<User, UserError>;

    /// Retrieve user by unique username.
    ///
    /// # Errors
    /// * `NotFound` - No user with this username
    /// * `DatabaseError` - Storage operation failed
    async fn get_user_by_username(&self, username: &str) -> Result<User, UserError>;

    /// Retrieve a page of users in store iteration order.
    ///
    /// # Arguments
    /// * `skip` - Number of records to skip
    /// * `limit` - Maximum number of records to return
    ///
    /// # Errors
    /// * `DatabaseError` - Storage operation failed
    async fn list_users(&self, skip: i64, limit: i64) -> Result<Vec<User>, UserError>;

    /// Update existing user with optional fields.
    ///
    /// Uniqueness is re-checked for any supplied unique field, excluding the
    /// target record itself. An empty command returns the current record
    /// unchanged.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `UsernameAlreadyExists` - New username is taken by another user
    /// * `EmailAlreadyExists` - New email is registered to another user
    /// * `DatabaseError` - Storage operation failed
    async fn update_user(&self, id: UserId, command: UpdateUserCommand)
        -> Result<User, UserError>;

    /// Hard-delete a user.
    ///
    /// # Returns
    /// Whether a record existed and was removed; a missing id is `false`,
    /// not an error.
    ///
    /// # Errors
    /// * `DatabaseError` - Storage operation failed
    async fn delete_user(&self, id: UserId) -> Result<bool, UserError>;
}

/// Persistence operations for the user aggregate.
///
/// Owns no business logic. The unique constraints on username, email, and
/// uuid live at this layer and are the authoritative duplicate check; any
/// violation on write surfaces as the corresponding `*AlreadyExists` error.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user; the store assigns id and timestamps.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Storage operation failed
    async fn create(&self, new_user: NewUser) -> Result<User, UserError>;

    /// Retrieve user by numeric identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by UUID.
    async fn find_by_uuid(&self, uuid: &Uuid) -> Result<Option<User>, UserError>;

    /// Retrieve user by username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserError>;

    /// Retrieve user by email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Retrieve a page of users in insertion order.
    async fn list(&self, skip: i64, limit: i64) -> Result<Vec<User>, UserError>;

    /// Update an existing user in storage, refreshing `updated_at`.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `UsernameAlreadyExists` - New username is already taken
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `DatabaseError` - Storage operation failed
    async fn update(&self, user: &User) -> Result<User, UserError>;

    /// Remove a user from storage.
    ///
    /// # Returns
    /// Whether a record was deleted.
    async fn delete(&self, id: UserId) -> Result<bool, UserError>;
}
