use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::ports::UserServicePort;

/// Domain service for user CRUD.
///
/// The duplicate checks here are a best-effort early rejection with a
/// precise error; the repository's unique constraints remain the source of
/// truth under concurrent writes.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        // Username before email, so a record colliding on both reports the
        // username
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

        let created = self
            .repository
            .create(NewUser {
                uuid: Uuid::new_v4(),
                username: command.username,
                email: command.email,
                full_name: command.full_name,
                password_hash: None,
            })
            .await?;

        tracing::info!(user_id = %created.id, username = %created.username, "user created");
        Ok(created)
    }

    async fn get_user(&self, id: UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn get_user_by_uuid(&self, uuid: &Uuid) -> Result<User, UserError> {
        self.repository
            .find_by_uuid(uuid)
            .await?
            .ok_or(UserError::NotFound(uuid.to_string()))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<User, UserError> {
        self.repository
            .find_by_username(username)
            .await?
            .ok_or(UserError::NotFound(username.to_string()))
    }

    async fn list_users(&self, skip: i64, limit: i64) -> Result<Vec<User>, UserError> {
        self.repository.list(skip, limit).await
    }

    async fn update_user(
        &self,
        id: UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        // Re-check uniqueness for changed unique fields, excluding the
        // target record: updating a field to its current value is fine
        if let Some(new_username) = &command.username {
            if let Some(existing) = self
                .repository
                .find_by_username(new_username.as_str())
                .await?
            {
                if existing.id != id {
                    return Err(UserError::UsernameAlreadyExists(new_username.to_string()));
                }
            }
        }

        if let Some(new_email) = &command.email {
            if let Some(existing) = self.repository.find_by_email(new_email.as_str()).await? {
                if existing.id != id {
                    return Err(UserError::EmailAlreadyExists(new_email.to_string()));
                }
            }
        }

        // Empty update is a no-op, not an error
        if command.is_empty() {
            return Ok(user);
        }

        if let Some(new_username) = command.username {
            user.username = new_username;
        }
        if let Some(new_email) = command.email {
            user.email = new_email;
        }
        if let Some(new_full_name) = command.full_name {
            user.full_name = Some(new_full_name);
        }
        if let Some(is_active) = command.is_active {
            user.is_active = is_active;
        }

        let updated = self.repository.update(&user).await?;

        tracing::info!(user_id = %updated.id, "user updated");
        Ok(updated)
    }

    async fn delete_user(&self, id: UserId) -> Result<bool, UserError> {
        let deleted = self.repository.delete(id).await?;
        if deleted {
            tracing::info!(user_id = %id, "user deleted");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::FullName;
    use crate::domain::user::models::Username;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, new_user: NewUser) -> Result<User, UserError>;
            async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserError>;
            async fn find_by_uuid(&self, uuid: &Uuid) -> Result<Option<User>, UserError>;
            async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
            async fn list(&self, skip: i64, limit: i64) -> Result<Vec<User>, UserError>;
            async fn update(&self, user: &User) -> Result<User, UserError>;
            async fn delete(&self, id: UserId) -> Result<bool, UserError>;
        }
    }

    fn persisted(new_user: NewUser, id: i64) -> User {
        let now = Utc::now();
        User {
            id: UserId(id),
            uuid: new_user.uuid,
            username: new_user.username,
            email: new_user.email,
            full_name: new_user.full_name,
            password_hash: new_user.password_hash,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_user(id: i64, username: &str, email: &str) -> User {
        let now = Utc::now();
        User {
            id: UserId(id),
            uuid: Uuid::new_v4(),
            username: Username::new(username.to_string()).unwrap(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            full_name: None,
            password_hash: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn create_command(username: &str, email: &str) -> CreateUserCommand {
        CreateUserCommand {
            username: Username::new(username.to_string()).unwrap(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            full_name: None,
        }
    }

    #[tokio::test]
    async fn test_create_user_issues_no_credential() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_username()
            .with(eq("testuser"))
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_find_by_email()
            .with(eq("test@example.com"))
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .withf(|new_user| {
                new_user.username.as_str() == "testuser" && new_user.password_hash.is_none()
            })
            .times(1)
            .returning(|new_user| Ok(persisted(new_user, 1)));

        let service = UserService::new(Arc::new(repository));

        let user = service
            .create_user(create_command("testuser", "test@example.com"))
            .await
            .expect("create should succeed");

        assert_eq!(user.username.as_str(), "testuser");
        assert_eq!(user.email.as_str(), "test@example.com");
        assert!(user.password_hash.is_none());
        assert!(user.is_active);
    }

    #[tokio::test]
    async fn test_create_user_duplicate_username_checked_before_email() {
        let mut repository = MockTestUserRepository::new();

        // Both unique fields collide; the username error must win
        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(Some(sample_user(1, "testuser", "test@example.com"))));
        repository.expect_find_by_email().times(0);
        repository.expect_create().times(0);

        let service = UserService::new(Arc::new(repository));

        let result = service
            .create_user(create_command("testuser", "test@example.com"))
            .await;

        assert!(matches!(
            result.unwrap_err(),
            UserError::UsernameAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(sample_user(1, "other", "test@example.com"))));
        repository.expect_create().times(0);

        let service = UserService::new(Arc::new(repository));

        let result = service
            .create_user(create_command("testuser", "test@example.com"))
            .await;

        assert!(matches!(
            result.unwrap_err(),
            UserError::EmailAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository));

        let result = service.get_user(UserId(42)).await;
        assert!(matches!(result.unwrap_err(), UserError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_get_user_by_uuid() {
        let mut repository = MockTestUserRepository::new();

        let user = sample_user(1, "testuser", "test@example.com");
        let uuid = user.uuid;
        let returned = user.clone();
        repository
            .expect_find_by_uuid()
            .withf(move |u| *u == uuid)
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));

        let service = UserService::new(Arc::new(repository));

        let found = service.get_user_by_uuid(&uuid).await.expect("found");
        assert_eq!(found.id, user.id);
    }

    #[tokio::test]
    async fn test_list_users_passes_page_through() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_list()
            .with(eq(10), eq(25))
            .times(1)
            .returning(|_, _| {
                Ok(vec![
                    sample_user(11, "user11", "user11@example.com"),
                    sample_user(12, "user12", "user12@example.com"),
                ])
            });

        let service = UserService::new(Arc::new(repository));

        let users = service.list_users(10, 25).await.expect("list");
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].id, UserId(11));
    }

    #[tokio::test]
    async fn test_update_user_to_own_email_is_not_a_collision() {
        let mut repository = MockTestUserRepository::new();

        let user = sample_user(1, "testuser", "test@example.com");
        let for_find = user.clone();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(for_find.clone())));
        // The email lookup finds the target record itself; not a conflict
        let for_email = user.clone();
        repository
            .expect_find_by_email()
            .with(eq("test@example.com"))
            .times(1)
            .returning(move |_| Ok(Some(for_email.clone())));
        repository
            .expect_update()
            .times(1)
            .returning(|user| Ok(user.clone()));

        let service = UserService::new(Arc::new(repository));

        let command = UpdateUserCommand {
            email: Some(EmailAddress::new("test@example.com".to_string()).unwrap()),
            ..Default::default()
        };

        let updated = service.update_user(UserId(1), command).await.expect("ok");
        assert_eq!(updated.email.as_str(), "test@example.com");
    }

    #[tokio::test]
    async fn test_update_user_username_taken_by_other() {
        let mut repository = MockTestUserRepository::new();

        let target = sample_user(1, "testuser", "test@example.com");
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(target.clone())));
        repository
            .expect_find_by_username()
            .with(eq("taken"))
            .times(1)
            .returning(|_| Ok(Some(sample_user(2, "taken", "taken@example.com"))));
        repository.expect_update().times(0);

        let service = UserService::new(Arc::new(repository));

        let command = UpdateUserCommand {
            username: Some(Username::new("taken".to_string()).unwrap()),
            ..Default::default()
        };

        let result = service.update_user(UserId(1), command).await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::UsernameAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_update_user_empty_command_is_noop() {
        let mut repository = MockTestUserRepository::new();

        let user = sample_user(1, "testuser", "test@example.com");
        let returned = user.clone();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));
        repository.expect_update().times(0);

        let service = UserService::new(Arc::new(repository));

        let unchanged = service
            .update_user(UserId(1), UpdateUserCommand::default())
            .await
            .expect("noop update should succeed");
        assert_eq!(unchanged.username.as_str(), "testuser");
    }

    #[tokio::test]
    async fn test_update_user_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository));

        let command = UpdateUserCommand {
            full_name: Some(FullName::new("New Name".to_string()).unwrap()),
            ..Default::default()
        };

        let result = service.update_user(UserId(42), command).await;
        assert!(matches!(result.unwrap_err(), UserError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_user_applies_fields() {
        let mut repository = MockTestUserRepository::new();

        let user = sample_user(1, "olduser", "old@example.com");
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));
        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_update()
            .withf(|user| {
                user.username.as_str() == "newuser"
                    && user.full_name.as_ref().map(|n| n.as_str()) == Some("New Name")
                    && !user.is_active
            })
            .times(1)
            .returning(|user| Ok(user.clone()));

        let service = UserService::new(Arc::new(repository));

        let command = UpdateUserCommand {
            username: Some(Username::new("newuser".to_string()).unwrap()),
            full_name: Some(FullName::new("New Name".to_string()).unwrap()),
            is_active: Some(false),
            ..Default::default()
        };

        let updated = service.update_user(UserId(1), command).await.expect("ok");
        assert_eq!(updated.username.as_str(), "newuser");
        assert!(!updated.is_active);
    }

    #[tokio::test]
    async fn test_delete_user_reports_existence() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_delete()
            .with(eq(UserId(1)))
            .times(1)
            .returning(|_| Ok(true));
        repository
            .expect_delete()
            .with(eq(UserId(42)))
            .times(1)
            .returning(|_| Ok(false));

        let service = UserService::new(Arc::new(repository));

        assert!(service.delete_user(UserId(1)).await.expect("ok"));
        // Deleting a nonexistent id is false, never an error
        assert!(!service.delete_user(UserId(42)).await.expect("ok"));
    }
}
