/// Bearer token issued by a successful login.
///
/// Ephemeral and stateless: nothing is persisted, the token itself carries
/// the subject identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub access_token: String,
}

impl AccessToken {
    /// Scheme under which the token is presented.
    pub const TOKEN_TYPE: &'static str = "bearer";

    pub fn new(access_token: String) -> Self {
        Self { access_token }
    }
}
