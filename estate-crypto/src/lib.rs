//! Keyed message authentication and randomness for gate credentials.
//!
//! This crate is kept apart from the providers so the primitives that guard
//! access credentials can be reviewed in isolation. Nothing here knows about
//! visits or tokens; it only authenticates bytes and produces entropy.

use thiserror::Error;

pub mod imp;

#[derive(Debug, PartialEq, Eq, Error)]
pub enum MacError {
    #[error("Invalid key length: `{0}`")]
    InvalidKeyLength(usize),
    #[error("Tag mismatch")]
    TagMismatch,
}

/// Computes and checks authentication tags over raw bytes.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait Mac: Send + Sync {
    /// Length in bytes of the tags produced by [`Mac::sign`].
    fn tag_len(&self) -> usize;

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, MacError>;

    /// Constant-time comparison of `tag` against the tag for `message`.
    fn verify(&self, message: &[u8], tag: &[u8]) -> Result<(), MacError>;
}
