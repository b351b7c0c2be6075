use std::sync::Arc;

use estate_crypto::imp::mac::HmacSha256Mac;
use estate_crypto::{MacError, MockMac};
use time::macros::datetime;
use uuid::Uuid;
use zeroize::Zeroizing;

use super::HmacCredentialCodec;
use crate::common_models::visit::VisitRequestId;
use crate::credential_codec::{error::CodecError, CredentialCodec, TokenClaims};

fn codec_with_key(byte: u8) -> HmacCredentialCodec {
    let mac = HmacSha256Mac::new(Zeroizing::new(vec![byte; 32])).unwrap();
    HmacCredentialCodec::new(Arc::new(mac))
}

fn claims() -> TokenClaims {
    TokenClaims {
        visit_request_id: VisitRequestId::from(Uuid::from_u128(
            0x6c8d_5b4a_1f2e_4d3c_9b8a_7f6e_5d4c_3b2a,
        )),
        issued_at: datetime!(2026-05-14 08:30:15.123456789 UTC),
        nonce: [9; 16],
    }
}

#[test]
fn test_decode_returns_encoded_claims() {
    let codec = codec_with_key(1);

    let token = codec.encode(&claims()).unwrap();

    assert_eq!(codec.decode(&token).unwrap(), claims());
}

#[test]
fn test_encode_is_deterministic() {
    let codec = codec_with_key(1);

    assert_eq!(
        codec.encode(&claims()).unwrap(),
        codec.encode(&claims()).unwrap()
    );
}

#[test]
fn test_token_does_not_expose_plain_visit_id() {
    let codec = codec_with_key(1);

    let token = codec.encode(&claims()).unwrap();

    assert!(!token.contains(&claims().visit_request_id.to_string()));
    assert!(!token.contains("visit:"));
}

#[test]
fn test_every_single_character_mutation_is_rejected() {
    let codec = codec_with_key(1);
    let token = codec.encode(&claims()).unwrap();

    for position in 0..token.len() {
        let mut mutated = token.clone().into_bytes();
        mutated[position] = if mutated[position] == b'A' { b'B' } else { b'A' };
        let mutated = String::from_utf8(mutated).unwrap();

        assert_eq!(
            codec.decode(&mutated),
            Err(CodecError::Malformed),
            "mutation at {position} was accepted"
        );
    }
}

#[test]
fn test_token_from_other_key_is_rejected() {
    let token = codec_with_key(1).encode(&claims()).unwrap();

    assert_eq!(codec_with_key(2).decode(&token), Err(CodecError::Malformed));
}

#[test]
fn test_truncated_or_garbage_tokens_are_rejected() {
    let codec = codec_with_key(1);
    let token = codec.encode(&claims()).unwrap();

    assert_eq!(codec.decode(""), Err(CodecError::Malformed));
    assert_eq!(codec.decode("not a token"), Err(CodecError::Malformed));
    assert_eq!(
        codec.decode(&token[..token.len() - 4]),
        Err(CodecError::Malformed)
    );
    assert_eq!(
        codec.decode(&format!("{token}AAAA")),
        Err(CodecError::Malformed)
    );
    assert_eq!(
        codec.decode(&format!("visit:{}:1715675415123", claims().visit_request_id)),
        Err(CodecError::Malformed)
    );
}

#[test]
fn test_signing_failure_is_reported() {
    let mut mac = MockMac::new();
    mac.expect_tag_len().return_const(32usize);
    mac.expect_sign()
        .returning(|_| Err(MacError::InvalidKeyLength(0)));

    let codec = HmacCredentialCodec::new(Arc::new(mac));

    assert_eq!(
        codec.encode(&claims()),
        Err(CodecError::Mac(MacError::InvalidKeyLength(0)))
    );
}
