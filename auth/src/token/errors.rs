use jsonwebtoken::Algorithm;
use thiserror::Error;

/// Error type for token issuance.
///
/// Verification deliberately has no error type: a token that fails to verify
/// for any reason is simply absent.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Unsupported signing algorithm {0:?}: only the HMAC family is supported")]
    UnsupportedAlgorithm(Algorithm),
}
