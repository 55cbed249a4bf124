//! Authentication primitives library
//!
//! Provides the credential building blocks for the account service:
//! - Password hashing (Argon2id)
//! - Bearer token issuance and verification (JWT, HMAC family)
//!
//! The service defines its own workflows on top of these types; this crate
//! knows nothing about persistence or HTTP.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let digest = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &digest));
//! assert!(!hasher.verify("not_my_password", &digest));
//! ```
//!
//! ## Bearer Tokens
//! ```
//! use auth::TokenCodec;
//! use chrono::Duration;
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let token = codec.issue("alice", 42, Duration::minutes(30)).unwrap();
//! let data = codec.verify(&token).unwrap();
//! assert_eq!(data.username, "alice");
//! assert_eq!(data.user_id, 42);
//! ```

pub mod password;
pub mod token;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::AccessClaims;
pub use token::TokenCodec;
pub use token::TokenData;
pub use token::TokenError;
