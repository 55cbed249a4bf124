use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::user::errors::EmailError;
use crate::domain::user::errors::FullNameError;
use crate::domain::user::errors::UsernameError;

/// User aggregate entity.
///
/// The numeric id and the UUID are both immutable once assigned: the id is
/// the storage key, the UUID is the externally safe identity. The password
/// hash is optional because administratively created users carry no
/// credential, and it never appears in any response representation.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub uuid: Uuid,
    pub username: Username,
    pub email: EmailAddress,
    pub full_name: Option<FullName>,
    pub password_hash: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Numeric user identifier, assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Ensures username is 1-50 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    const MAX_LENGTH: usize = 50;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `Empty` - Username is empty
    /// * `TooLong` - Username longer than 50 characters
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let length = username.chars().count();
        if length == 0 {
            Err(UsernameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(username))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates format with an RFC 5322 compliant parser and caps length at
/// the column width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    const MAX_LENGTH: usize = 100;

    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    /// * `TooLong` - Email longer than 100 characters
    pub fn new(email: String) -> Result<Self, EmailError> {
        let length = email.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Optional display name, capped at the column width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullName(String);

impl FullName {
    const MAX_LENGTH: usize = 100;

    pub fn new(full_name: String) -> Result<Self, FullNameError> {
        let length = full_name.chars().count();
        if length > Self::MAX_LENGTH {
            Err(FullNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(full_name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Row the store persists for a new user; the store assigns id and
/// timestamps.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub uuid: Uuid,
    pub username: Username,
    pub email: EmailAddress,
    pub full_name: Option<FullName>,
    pub password_hash: Option<String>,
}

/// Command to register a user with credentials.
#[derive(Debug)]
pub struct RegisterCommand {
    pub username: Username,
    pub email: EmailAddress,
    pub password: String,
    pub full_name: Option<FullName>,
}

/// Command to create a user through the administrative path (no credential).
#[derive(Debug)]
pub struct CreateUserCommand {
    pub username: Username,
    pub email: EmailAddress,
    pub full_name: Option<FullName>,
}

/// Command to update an existing user with optional validated fields.
///
/// All fields are optional to support partial updates; only provided fields
/// change.
#[derive(Debug, Default)]
pub struct UpdateUserCommand {
    pub username: Option<Username>,
    pub email: Option<EmailAddress>,
    pub full_name: Option<FullName>,
    pub is_active: Option<bool>,
}

impl UpdateUserCommand {
    /// True when the command changes nothing.
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.full_name.is_none()
            && self.is_active.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_bounds() {
        assert!(Username::new("a".to_string()).is_ok());
        assert!(Username::new("a".repeat(50)).is_ok());
        assert_eq!(
            Username::new(String::new()).unwrap_err(),
            UsernameError::Empty
        );
        assert!(matches!(
            Username::new("a".repeat(51)).unwrap_err(),
            UsernameError::TooLong { max: 50, actual: 51 }
        ));
    }

    #[test]
    fn test_email_validation() {
        assert!(EmailAddress::new("alice@example.com".to_string()).is_ok());
        assert!(matches!(
            EmailAddress::new("not-an-email".to_string()).unwrap_err(),
            EmailError::InvalidFormat(_)
        ));

        let local = "a".repeat(90);
        assert!(matches!(
            EmailAddress::new(format!("{local}@example.com")).unwrap_err(),
            EmailError::TooLong { max: 100, .. }
        ));
    }

    #[test]
    fn test_full_name_bounds() {
        assert!(FullName::new("Alice Liddell".to_string()).is_ok());
        assert!(matches!(
            FullName::new("a".repeat(101)).unwrap_err(),
            FullNameError::TooLong { max: 100, actual: 101 }
        ));
    }

    #[test]
    fn test_update_command_is_empty() {
        assert!(UpdateUserCommand::default().is_empty());

        let command = UpdateUserCommand {
            is_active: Some(false),
            ..Default::default()
        };
        assert!(!command.is_empty());
    }
}
