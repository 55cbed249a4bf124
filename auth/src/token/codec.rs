use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::AccessClaims;
use super::claims::TokenData;
use super::errors::TokenError;

/// Signs and verifies compact, expiring bearer tokens.
///
/// Tokens are JWTs signed with a process-wide symmetric secret. Rotating the
/// secret invalidates every outstanding token; there is no key versioning.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenCodec {
    /// Create a codec signing with HS256.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be at least 32 bytes)
    pub fn new(secret: &[u8]) -> Self {
        // HS256 is always in the HMAC family, so this cannot fail
        Self::with_algorithm(secret, Algorithm::HS256)
            .expect("HS256 is a supported algorithm")
    }

    /// Create a codec with an explicit HMAC algorithm.
    ///
    /// # Errors
    /// * `UnsupportedAlgorithm` - Algorithm is not HS256/HS384/HS512
    pub fn with_algorithm(secret: &[u8], algorithm: Algorithm) -> Result<Self, TokenError> {
        match algorithm {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(Self {
                encoding_key: EncodingKey::from_secret(secret),
                decoding_key: DecodingKey::from_secret(secret),
                algorithm,
            }),
            other => Err(TokenError::UnsupportedAlgorithm(other)),
        }
    }

    /// Issue a signed token bound to a subject identity.
    ///
    /// # Arguments
    /// * `username` - Subject username (`sub` claim)
    /// * `user_id` - Subject numeric id (`user_id` claim)
    /// * `ttl` - Lifetime; expiry is `now + ttl`
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(
        &self,
        username: &str,
        user_id: i64,
        ttl: Duration,
    ) -> Result<String, TokenError> {
        let claims = AccessClaims {
            sub: username.to_string(),
            user_id,
            exp: (Utc::now() + ttl).timestamp(),
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify a token and extract the identity it carries.
    ///
    /// Returns `Some` iff the signature is valid, the token has not expired,
    /// and both `sub` and `user_id` claims are present. Any other input,
    /// including arbitrary garbage, yields `None`. Tokens arrive from
    /// untrusted clients and verification must never panic or error.
    pub fn verify(&self, token: &str) -> Option<TokenData> {
        let mut validation = Validation::new(self.algorithm);
        // A token expired by even a second is rejected
        validation.leeway = 0;

        decode::<AccessClaims>(token, &self.decoding_key, &validation)
            .ok()
            .map(|data| data.claims.into())
    }
}
