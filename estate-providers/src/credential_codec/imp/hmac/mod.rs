//! Token layout, before URL-safe base64 without padding:
//!
//! ```text
//! version (1) | visit request id (16) | issued at, unix nanos BE (16) | nonce (16) | tag
//! ```
//!
//! The tag is a keyed MAC over everything before it.

use std::sync::Arc;

use ct_codecs::{Base64UrlSafeNoPadding, Decoder, Encoder};
use estate_crypto::Mac;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::credential_codec::{error::CodecError, CredentialCodec, TokenClaims, NONCE_LEN};

#[cfg(test)]
mod test;

const VERSION: u8 = 1;
const PAYLOAD_LEN: usize = 1 + 16 + 16 + NONCE_LEN;

pub struct HmacCredentialCodec {
    mac: Arc<dyn Mac>,
}

impl HmacCredentialCodec {
    pub fn new(mac: Arc<dyn Mac>) -> Self {
        Self { mac }
    }
}

impl CredentialCodec for HmacCredentialCodec {
    fn encode(&self, claims: &TokenClaims) -> Result<String, CodecError> {
        let mut bytes = Vec::with_capacity(PAYLOAD_LEN + self.mac.tag_len());
        bytes.push(VERSION);
        bytes.extend_from_slice(Uuid::from(claims.visit_request_id).as_bytes());
        bytes.extend_from_slice(&claims.issued_at.unix_timestamp_nanos().to_be_bytes());
        bytes.extend_from_slice(&claims.nonce);

        let tag = self.mac.sign(&bytes)?;
        bytes.extend_from_slice(&tag);

        Base64UrlSafeNoPadding::encode_to_string(bytes)
            .map_err(|error| CodecError::Encoding(error.to_string()))
    }

    fn decode(&self, token: &str) -> Result<TokenClaims, CodecError> {
        let bytes = Base64UrlSafeNoPadding::decode_to_vec(token, None)
            .map_err(|_| CodecError::Malformed)?;

        if bytes.len() != PAYLOAD_LEN + self.mac.tag_len() {
            return Err(CodecError::Malformed);
        }

        let (payload, tag) = bytes.split_at(PAYLOAD_LEN);
        self.mac
            .verify(payload, tag)
            .map_err(|_| CodecError::Malformed)?;

        if payload[0] != VERSION {
            return Err(CodecError::Malformed);
        }

        let visit_request_id = Uuid::from_slice(&payload[1..17]).map_err(|_| CodecError::Malformed)?;

        let issued_at_nanos = i128::from_be_bytes(
            payload[17..33]
                .try_into()
                .map_err(|_| CodecError::Malformed)?,
        );
        let issued_at = OffsetDateTime::from_unix_timestamp_nanos(issued_at_nanos)
            .map_err(|_| CodecError::Malformed)?;

        let nonce: [u8; NONCE_LEN] = payload[33..PAYLOAD_LEN]
            .try_into()
            .map_err(|_| CodecError::Malformed)?;

        Ok(TokenClaims {
            visit_request_id: visit_request_id.into(),
            issued_at,
            nonce,
        })
    }
}
