//! x25519 over curve25519 (RFC 7748).
//!
//! `arith` holds the field, `curve25519` the ladder and clamping, `ecdh` the
//! three key operations and `key` the typed wrappers around them.

pub mod arith;
pub mod curve25519;
pub mod ecdh;
pub mod key;

pub use curve25519::{clamp, scalar_mul, BASE_POINT};
pub use ecdh::{compute_shared_secret, derive_public_key, generate_private_key};
pub use key::{PreSharedKey, PrivateScalar, PublicKey, SharedSecret};
