use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use zeroize::Zeroizing;

pub fn generate_random_seed_16() -> [u8; 16] {
    let mut rng = ChaCha20Rng::from_entropy();
    let mut seed = [0u8; 16];
    rng.fill_bytes(&mut seed);
    seed
}

/// Fresh key material suitable for [`super::mac::HmacSha256Mac`].
pub fn generate_mac_key() -> Zeroizing<Vec<u8>> {
    let mut rng = ChaCha20Rng::from_entropy();
    let mut key = Zeroizing::new(vec![0u8; super::MIN_KEY_LEN]);
    rng.fill_bytes(key.as_mut_slice());
    key
}
