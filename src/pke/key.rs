// x25519 key material.
use crate::codec::{decode_base64, decode_hex, encode_base64, encode_hex};
use crate::common::{KeyError, RawKey, KEY_LEN};
use crate::pke::curve25519::clamp;
use crate::pke::ecdh::{compute_shared_secret, derive_public_key, generate_private_key};
use crate::rng::{OsRandom, RandomSource};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use subtle::{Choice, ConstantTimeEq};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// A clamped x25519 private scalar.
///
/// Every constructor clamps, so holding one means bit 255 is clear, bit 254
/// is set and the low three bits are clear. Not `Clone`: the bytes have a
/// single owner and are wiped when it drops. There is no public `Zeroize`,
/// so a live key can never lose its clamp bits.
pub struct PrivateScalar(RawKey);

impl Drop for PrivateScalar {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl ZeroizeOnDrop for PrivateScalar {}

impl PrivateScalar {
    /// Take raw bytes as a private key, clamping them.
    pub fn from_bytes(mut bytes: RawKey) -> Self {
        clamp(&mut bytes);
        let key = Self(bytes);
        bytes.zeroize();
        key
    }

    /// Generate a fresh key from the operating system's entropy.
    pub fn random() -> Result<Self, KeyError> {
        generate_private_key(&mut OsRandom)
    }

    pub fn generate<R: RandomSource + ?Sized>(rng: &mut R) -> Result<Self, KeyError> {
        generate_private_key(rng)
    }

    pub fn from_base64(text: &str) -> Result<Self, KeyError> {
        decode_base64(text).map(Self::from_bytes)
    }

    pub fn from_hex(text: &str) -> Result<Self, KeyError> {
        decode_hex(text).map(Self::from_bytes)
    }

    pub fn as_bytes(&self) -> &RawKey {
        &self.0
    }

    pub fn to_base64(&self) -> Zeroizing<String> {
        Zeroizing::new(encode_base64(&self.0))
    }

    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(encode_hex(&self.0))
    }

    pub fn public_key(&self) -> PublicKey {
        derive_public_key(self)
    }

    pub fn diffie_hellman(&self, peer: &PublicKey) -> SharedSecret {
        compute_shared_secret(self, peer)
    }
}

impl ConstantTimeEq for PrivateScalar {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0[..].ct_eq(&other.0[..])
    }
}

impl fmt::Debug for PrivateScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateScalar(..)")
    }
}

/// Public Key for curve25519.
///
/// Any 32-byte string is a valid public key, low order points included.
#[derive(Clone, Copy, Hash)]
pub struct PublicKey(RawKey);

impl PublicKey {
    pub fn from_bytes(bytes: RawKey) -> Self {
        Self(bytes)
    }

    pub fn from_base64(text: &str) -> Result<Self, KeyError> {
        decode_base64(text).map(Self)
    }

    pub fn from_hex(text: &str) -> Result<Self, KeyError> {
        decode_hex(text).map(Self)
    }

    pub fn as_bytes(&self) -> &RawKey {
        &self.0
    }

    pub fn to_bytes(self) -> RawKey {
        self.0
    }

    pub fn to_base64(&self) -> String {
        encode_base64(&self.0)
    }

    pub fn to_hex(&self) -> String {
        encode_hex(&self.0)
    }
}

impl From<RawKey> for PublicKey {
    fn from(bytes: RawKey) -> Self {
        Self(bytes)
    }
}

impl From<&PrivateScalar> for PublicKey {
    fn from(private: &PrivateScalar) -> Self {
        derive_public_key(private)
    }
}

impl ConstantTimeEq for PublicKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0[..].ct_eq(&other.0[..])
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for PublicKey {}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base64())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_base64())
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base64())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        PublicKey::from_base64(&text).map_err(de::Error::custom)
    }
}

/// Output of an x25519 agreement. Wiped on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret(RawKey);

impl SharedSecret {
    pub(crate) fn new(bytes: RawKey) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &RawKey {
        &self.0
    }

    /// True when the peer key was of low order and the agreement collapsed to zero.
    /// Nothing is rejected here; callers wanting contributory behaviour check this.
    pub fn is_zero(&self) -> bool {
        self.0[..].ct_eq(&[0u8; KEY_LEN][..]).into()
    }
}

impl ConstantTimeEq for SharedSecret {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0[..].ct_eq(&other.0[..])
    }
}

impl PartialEq for SharedSecret {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for SharedSecret {}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecret(..)")
    }
}

/// Optional symmetric key mixed into a tunnel alongside the x25519 pair.
/// Plain random bytes, never clamped.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct PreSharedKey(RawKey);

impl PreSharedKey {
    pub fn from_bytes(bytes: RawKey) -> Self {
        Self(bytes)
    }

    pub fn generate<R: RandomSource + ?Sized>(rng: &mut R) -> Result<Self, KeyError> {
        let mut buf = Zeroizing::new([0u8; KEY_LEN]);
        rng.fill(&mut buf)?;
        Ok(Self(*buf))
    }

    pub fn random() -> Result<Self, KeyError> {
        Self::generate(&mut OsRandom)
    }

    pub fn from_base64(text: &str) -> Result<Self, KeyError> {
        decode_base64(text).map(Self)
    }

    pub fn from_hex(text: &str) -> Result<Self, KeyError> {
        decode_hex(text).map(Self)
    }

    pub fn as_bytes(&self) -> &RawKey {
        &self.0
    }

    pub fn to_base64(&self) -> Zeroizing<String> {
        Zeroizing::new(encode_base64(&self.0))
    }

    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(encode_hex(&self.0))
    }
}

impl ConstantTimeEq for PreSharedKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0[..].ct_eq(&other.0[..])
    }
}

impl PartialEq for PreSharedKey {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for PreSharedKey {}

impl fmt::Debug for PreSharedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PreSharedKey(..)")
    }
}
