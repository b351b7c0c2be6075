use hmac::Mac as _;
use zeroize::Zeroizing;

use super::{HmacSha256, MIN_KEY_LEN};
use crate::{Mac, MacError};

const TAG_LEN: usize = 32;

pub struct HmacSha256Mac {
    key: Zeroizing<Vec<u8>>,
}

impl HmacSha256Mac {
    pub fn new(key: Zeroizing<Vec<u8>>) -> Result<Self, MacError> {
        if key.len() < MIN_KEY_LEN {
            return Err(MacError::InvalidKeyLength(key.len()));
        }

        Ok(Self { key })
    }

    fn keyed(&self) -> Result<HmacSha256, MacError> {
        HmacSha256::new_from_slice(&self.key).map_err(|_| MacError::InvalidKeyLength(self.key.len()))
    }
}

impl Mac for HmacSha256Mac {
    fn tag_len(&self) -> usize {
        TAG_LEN
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, MacError> {
        let mut mac = self.keyed()?;
        mac.update(message);
        Ok(mac.finalize().into_bytes().to_vec())
    }

    fn verify(&self, message: &[u8], tag: &[u8]) -> Result<(), MacError> {
        let mut mac = self.keyed()?;
        mac.update(message);
        mac.verify_slice(tag).map_err(|_| MacError::TagMismatch)
    }
}
