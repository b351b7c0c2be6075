use hmac::Hmac;
use sha2::Sha256;

pub mod mac;
pub mod utilities;

type HmacSha256 = Hmac<Sha256>;

/// Shortest key accepted for credential signing.
pub const MIN_KEY_LEN: usize = 32;

#[cfg(test)]
mod test;
