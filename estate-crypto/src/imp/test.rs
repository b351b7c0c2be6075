use zeroize::Zeroizing;

use super::mac::HmacSha256Mac;
use super::utilities::{generate_mac_key, generate_random_seed_16};
use crate::{Mac, MacError};

fn mac_with_key(byte: u8) -> HmacSha256Mac {
    HmacSha256Mac::new(Zeroizing::new(vec![byte; 32])).unwrap()
}

#[test]
fn test_sign_is_deterministic() {
    let mac = mac_with_key(7);

    let first = mac.sign(b"visit").unwrap();
    let second = mac.sign(b"visit").unwrap();

    assert_eq!(first, second);
    assert_eq!(first.len(), mac.tag_len());
}

#[test]
fn test_verify_accepts_own_tag() {
    let mac = mac_with_key(7);
    let tag = mac.sign(b"visit").unwrap();

    assert_eq!(Ok(()), mac.verify(b"visit", &tag));
}

#[test]
fn test_verify_rejects_other_message_or_key() {
    let mac = mac_with_key(7);
    let tag = mac.sign(b"visit").unwrap();

    assert_eq!(Err(MacError::TagMismatch), mac.verify(b"visiT", &tag));
    assert_eq!(
        Err(MacError::TagMismatch),
        mac_with_key(8).verify(b"visit", &tag)
    );
    assert_eq!(Err(MacError::TagMismatch), mac.verify(b"visit", &tag[..16]));
}

#[test]
fn test_short_key_is_refused() {
    let result = HmacSha256Mac::new(Zeroizing::new(vec![1u8; 31]));

    assert!(matches!(result, Err(MacError::InvalidKeyLength(31))));
}

#[test]
fn test_generated_key_is_usable() {
    let key = generate_mac_key();
    assert_eq!(key.len(), super::MIN_KEY_LEN);

    assert!(HmacSha256Mac::new(key).is_ok());
}

#[test]
fn test_random_seeds_differ() {
    assert_ne!(generate_random_seed_16(), generate_random_seed_16());
}
