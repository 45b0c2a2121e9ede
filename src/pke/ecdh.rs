use log::debug;
use zeroize::Zeroizing;

use crate::common::{KeyError, KEY_LEN};
use crate::rng::RandomSource;

use super::curve25519::{scalar_mul, BASE_POINT};
use super::key::{PrivateScalar, PublicKey, SharedSecret};

/// Draw 32 bytes from `rng` and clamp them into a private scalar.
///
/// Fails only when the source does. Low order results are not special-cased.
pub fn generate_private_key<R: RandomSource + ?Sized>(
    rng: &mut R,
) -> Result<PrivateScalar, KeyError> {
    let mut buf = Zeroizing::new([0u8; KEY_LEN]);
    rng.fill(&mut buf)?;
    debug!("generated x25519 private key");
    Ok(PrivateScalar::from_bytes(*buf))
}

/// `private * 9`.
pub fn derive_public_key(private: &PrivateScalar) -> PublicKey {
    PublicKey::from_bytes(scalar_mul(&BASE_POINT, private.as_bytes()))
}

/// `private * peer`. The peer key is used as given; an all-zero or low order
/// peer yields an all-zero secret rather than an error.
pub fn compute_shared_secret(private: &PrivateScalar, peer: &PublicKey) -> SharedSecret {
    SharedSecret::new(scalar_mul(peer.as_bytes(), private.as_bytes()))
}
