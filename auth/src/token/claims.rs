use serde::Deserialize;
use serde::Serialize;

/// Claims carried by an access token.
///
/// `sub` and `user_id` are both required: a token missing either fails
/// verification outright.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessClaims {
    /// Subject (username)
    pub sub: String,

    /// Numeric user identifier
    pub user_id: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Identity extracted from a successfully verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenData {
    pub username: String,
    pub user_id: i64,
}

impl From<AccessClaims> for TokenData {
    fn from(claims: AccessClaims) -> Self {
        Self {
            username: claims.sub,
            user_id: claims.user_id,
        }
    }
}
