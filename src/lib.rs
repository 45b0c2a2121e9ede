//! X25519 key kit.
//!
//! Private key generation, public key derivation and shared secret
//! computation over curve25519, plus base64 and hex encodings for the
//! 32-byte keys they produce.
//!
//! ```
//! use x25519_keykit::PrivateScalar;
//!
//! let alice = PrivateScalar::random()?;
//! let bob = PrivateScalar::random()?;
//! let shared = alice.diffie_hellman(&bob.public_key());
//! assert_eq!(shared, bob.diffie_hellman(&alice.public_key()));
//! # Ok::<(), x25519_keykit::KeyError>(())
//! ```
pub mod codec;
pub mod common;
pub mod config;
pub mod pke;
pub mod rng;

pub use codec::{decode_base64, decode_hex, decode_key, encode_base64, encode_hex};
pub use common::{KeyError, RawKey, KEY_LEN, KEY_LEN_BASE64, KEY_LEN_HEX};
pub use config::{ConfigError, KeyConfig};
pub use pke::{
    clamp, compute_shared_secret, derive_public_key, generate_private_key, PreSharedKey,
    PrivateScalar, PublicKey, SharedSecret,
};
pub use rng::{OsRandom, RandomSource};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_peers_agree() {
        let mut rng = OsRandom;
        let a = generate_private_key(&mut rng).unwrap();
        let b = generate_private_key(&mut rng).unwrap();
        let a_pub = derive_public_key(&a);
        let b_pub = derive_public_key(&b);

        // Keys survive a trip through text, as they would between two hosts.
        let a_pub = PublicKey::from_base64(&a_pub.to_base64()).unwrap();
        let b_pub = PublicKey::from_hex(&b_pub.to_hex()).unwrap();

        let ab = compute_shared_secret(&a, &b_pub);
        let ba = compute_shared_secret(&b, &a_pub);
        assert_eq!(ab, ba);
        assert!(!ab.is_zero());
    }

    #[test]
    fn sample_key_through_every_layer() {
        let text = "ADdgjBTmzc7FCXBFxgD5Pz3UXal7TDqlE95IjJXs9kI=";
        let raw = decode_base64(text).unwrap();
        assert_eq!(encode_base64(&raw), text);
        assert_eq!(decode_hex(&encode_hex(&raw)).unwrap(), raw);

        let mut clamped = raw;
        clamp(&mut clamped);
        assert_eq!(clamped, raw);

        let private = PrivateScalar::from_bytes(raw);
        assert_eq!(private.public_key(), derive_public_key(&private));
    }
}
