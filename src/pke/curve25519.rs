// Operations over curve25519.
// parameters:
// y^2 = x^3 + 486662x^2 + x mod (2^255 - 19)
// p = 0x7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffed
// A = 0x0000000000000000000000000000000000000000000000000000000000076d06
// contains 8*q elements.
use crate::common::RawKey;
use crate::pke::arith::{FieldElement, A24, ONE, ZERO};
use zeroize::{Zeroize, Zeroizing};

/// u-coordinate of the base point, u = 9.
pub const BASE_POINT: RawKey = [
    9, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

/// Clamp a scalar into the form RFC 7748 requires: a multiple of the
/// cofactor 8, with bit 254 set and bit 255 clear. Clamping twice is a no-op.
pub fn clamp(scalar: &mut RawKey) {
    scalar[0] &= 0xf8;
    scalar[31] = (scalar[31] & 0x7f) | 0x40;
}

/// X25519(scalar, u): the u-coordinate of `scalar * point`.
///
/// Montgomery ladder over projective (x:z) pairs. Each step does a masked
/// swap on the current scalar bit, so neither control flow nor memory access
/// depends on the scalar. Any 32 bytes are accepted as `point`; low order
/// inputs give an all-zero result.
pub fn scalar_mul(point: &RawKey, scalar: &RawKey) -> RawKey {
    let mut clamped = Zeroizing::new(*scalar);
    clamp(&mut clamped);

    let x = FieldElement::from(point);
    // (a:c) tracks n*P, (b:d) tracks (n+1)*P.
    let mut a = ONE;
    let mut b = x;
    let mut c = ZERO;
    let mut d = ONE;

    for i in (0..255).rev() {
        let bit = ((clamped[i >> 3] >> (i & 7)) & 1) as i64;
        a.swap(&mut b, bit);
        c.swap(&mut d, bit);

        let mut e = a + c;
        a = a - c;
        c = b + d;
        b = b - d;
        d = e.square();
        let f = a.square();
        a = c * a;
        c = b * e;
        e = a + c;
        a = a - c;
        b = a.square();
        c = d - f;
        a = c * A24;
        a = a + d;
        c = c * a;
        a = d * f;
        d = b * x;
        b = e.square();

        a.swap(&mut b, bit);
        c.swap(&mut d, bit);
    }

    let mut z_inv = c.inverse();
    let out = (a * z_inv).pack();

    a.zeroize();
    b.zeroize();
    c.zeroize();
    d.zeroize();
    z_inv.zeroize();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn unhex(text: &str) -> RawKey {
        let mut out = [0u8; 32];
        hex::decode_to_slice(text, &mut out).unwrap();
        out
    }

    #[test]
    fn rfc7748_scalar_mul_vector() {
        let scalar = unhex("a546e36bf0527c9d3b16154b82465edd62144c0ac1fc5a18506a2244ba449ac4");
        let u = unhex("e6db6867583030db3594c1a424b15f7c726624ec26b3353b10a903a6d0ab1c4c");
        let expected = unhex("c3da55379de9c6908e94ea4df28d084f32eccf03491c71f754b4075577a28552");
        assert_eq!(scalar_mul(&u, &scalar), expected);
    }

    #[test]
    fn rfc7748_one_iteration() {
        let k = BASE_POINT;
        let expected = unhex("422c8e7a6227d7bca1350b3e2bb7279f7897b87bb6854b783c60e80311ae3079");
        assert_eq!(scalar_mul(&k, &k), expected);
    }

    #[test]
    fn base_point_multiples() {
        let alice = unhex("77076d0a7318a57d3c16c17251b26645df4c2f87ebc0992ab177fba51db92c2a");
        let expected = unhex("8520f0098930a754748b7ddcb43ef75a0dbf3a0d26381af4eba4a98eaa9b4e6a");
        assert_eq!(scalar_mul(&BASE_POINT, &alice), expected);
    }

    #[test]
    fn zero_point_gives_zero() {
        let scalar = unhex("77076d0a7318a57d3c16c17251b26645df4c2f87ebc0992ab177fba51db92c2a");
        assert_eq!(scalar_mul(&[0u8; 32], &scalar), [0u8; 32]);
    }

    #[test]
    fn clamp_bits() {
        let mut k = [0xffu8; 32];
        clamp(&mut k);
        assert_eq!(k[0], 0xf8);
        assert_eq!(k[31], 0x7f);

        let mut k = [0u8; 32];
        clamp(&mut k);
        assert_eq!(k[0], 0);
        assert_eq!(k[31], 0x40);
    }

    proptest! {
        #[test]
        fn clamp_is_idempotent(raw in any::<[u8; 32]>()) {
            let mut once = raw;
            clamp(&mut once);
            let mut twice = once;
            clamp(&mut twice);
            prop_assert_eq!(once, twice);
            prop_assert_eq!(once[0] & 0x07, 0);
            prop_assert_eq!(once[31] & 0xc0, 0x40);
            prop_assert_eq!(&once[1..31], &raw[1..31]);
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn unclamped_scalar_matches_clamped(raw in any::<[u8; 32]>(), point in any::<[u8; 32]>()) {
            let mut clamped = raw;
            clamp(&mut clamped);
            prop_assert_eq!(scalar_mul(&point, &raw), scalar_mul(&point, &clamped));
        }
    }
}
