//! Opaque token embedded in an access credential.
//!
//! A token binds a visit request to the moment its credential was issued and
//! a random nonce. Tokens are authenticated: knowing a visit id, or a
//! neighbour's token, is not enough to forge a valid one.

use time::OffsetDateTime;

use crate::credential_codec::error::CodecError;
use crate::common_models::visit::VisitRequestId;

pub mod error;
pub mod imp;

pub const NONCE_LEN: usize = 16;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenClaims {
    pub visit_request_id: VisitRequestId,
    pub issued_at: OffsetDateTime,
    pub nonce: [u8; NONCE_LEN],
}

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait CredentialCodec: Send + Sync {
    /// Deterministic for identical claims.
    fn encode(&self, claims: &TokenClaims) -> Result<String, CodecError>;

    /// Fails with [`CodecError::Malformed`] on any token not produced by
    /// [`CredentialCodec::encode`] under the same key.
    fn decode(&self, token: &str) -> Result<TokenClaims, CodecError>;
}
