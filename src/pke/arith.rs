use std::ops::{Add, Mul, Sub};
use zeroize::Zeroize;

pub const ZERO: FieldElement = FieldElement([0; 16]);
pub const ONE: FieldElement = FieldElement([1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
/// (A - 2) / 4 = 121665, the ladder constant for curve25519.
pub const A24: FieldElement =
    FieldElement([0xdb41, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);

/// This struct stores a number over Z_p, p = 2^255 - 19.
///
/// Sixteen limbs of 16 bits each, little endian. Limbs are `i64` so sums and
/// differences may run ahead of carry propagation; every product carries.
#[derive(Clone, Copy, Debug, Default, Zeroize)]
pub struct FieldElement(pub [i64; 16]);

impl FieldElement {
    /// Push each limb back into 16 bits. 2^256 = 38 mod p folds the top carry.
    pub fn carry(&mut self) {
        for i in 0..16 {
            let carry = self.0[i] >> 16;
            self.0[i] -= carry << 16;

            if i < 15 {
                self.0[i + 1] += carry;
            } else {
                self.0[0] += 38 * carry;
            }
        }
    }

    pub fn square(&self) -> Self {
        *self * *self
    }

    /// inverse: Get multiplicational reverse.
    /// since p is a prime, there is a^(p-1) = 1
    /// therefore, we have a*a^(p-2) = 1,
    /// so, a^(p-2) is inverse and we can compute it in constant time.
    /// The inverse of zero comes out as zero.
    pub fn inverse(&self) -> Self {
        let mut c = *self;

        // p - 2 = 2^255 - 21: every bit set except 2 and 4.
        for i in (0..254).rev() {
            c = c.square();
            if i != 2 && i != 4 {
                c = c * *self;
            }
        }
        c
    }

    /// Swap with `q` when `bit` is 1, leave both alone when it is 0.
    /// No branch depends on `bit`.
    pub fn swap(&mut self, q: &mut Self, bit: i64) {
        let mask = !(bit - 1);
        for i in 0..16 {
            let t = mask & (self.0[i] ^ q.0[i]);
            self.0[i] ^= t;
            q.0[i] ^= t;
        }
    }

    /// Reduce fully mod p and write out 32 little endian bytes.
    pub fn pack(&self) -> [u8; 32] {
        let mut m = ZERO;
        let mut t = *self;
        let mut ret = [0u8; 32];
        t.carry();
        t.carry();
        t.carry();

        // Subtract p twice, keeping the difference only when it did not borrow.
        for _ in 0..2 {
            m.0[0] = t.0[0] - 0xffed;
            for i in 1..15 {
                m.0[i] = t.0[i] - 0xffff - ((m.0[i - 1] >> 16) & 1);
                m.0[i - 1] &= 0xffff;
            }

            m.0[15] = t.0[15] - 0x7fff - ((m.0[14] >> 16) & 1);
            let borrow = (m.0[15] >> 16) & 1;
            m.0[14] &= 0xffff;
            t.swap(&mut m, 1 - borrow);
        }
        for i in 0..16 {
            ret[2 * i] = t.0[i] as u8;
            ret[2 * i + 1] = (t.0[i] >> 8) as u8;
        }
        m.zeroize();
        t.zeroize();
        ret
    }
}

/// Unpack a u-coordinate. Bit 255 is ignored, as X25519 requires.
impl From<&[u8; 32]> for FieldElement {
    fn from(input: &[u8; 32]) -> Self {
        let mut ret = ZERO;
        for i in 0..16 {
            ret.0[i] = input[2 * i] as i64 + ((input[2 * i + 1] as i64) << 8);
        }
        ret.0[15] &= 0x7fff;
        ret
    }
}

impl Add for FieldElement {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        let mut ret = [0; 16];
        for i in 0..16 {
            ret[i] = self.0[i] + rhs.0[i];
        }
        FieldElement(ret)
    }
}

impl Sub for FieldElement {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        let mut ret = [0; 16];
        for i in 0..16 {
            ret[i] = self.0[i] - rhs.0[i];
        }
        FieldElement(ret)
    }
}

impl Mul for FieldElement {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        let mut product = [0i64; 31];
        let mut ret = [0i64; 16];

        for i in 0..16 {
            for j in 0..16 {
                product[i + j] += self.0[i] * rhs.0[j];
            }
        }

        for i in 0..15 {
            product[i] += 38 * product[i + 16];
        }

        ret.copy_from_slice(&product[..16]);
        product.zeroize();

        let mut ret = Self(ret);
        ret.carry();
        ret.carry();
        ret
    }
}
