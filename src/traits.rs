use std::fmt;

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::field::biguint_to_limbs;
use crate::scalar::RevBitIterator;

/// The seam every tower level implements. Curve arithmetic, the Pippenger
/// loop and the windowed exponentiation base are generic over it.
///
/// Elements carry a reference to their field context, so identities are
/// spelled `zero_like`/`one_like`: the receiver only supplies the context.
/// Arithmetic is in-place; the hot pairing loops mutate one accumulator
/// across hundreds of iterations without reallocating.
pub trait FieldElement: Sized + Copy + Eq + fmt::Debug {
    /// The additive identity of the receiver's field.
    fn zero_like(&self) -> Self;

    /// The multiplicative identity of the receiver's field.
    fn one_like(&self) -> Self;

    fn is_zero(&self) -> bool;

    fn add_assign(&mut self, other: &Self);

    fn sub_assign(&mut self, other: &Self);

    fn mul_assign(&mut self, other: &Self);

    fn square(&mut self);

    /// Doubling (mul2 in additive notation).
    fn double(&mut self);

    fn negate(&mut self);

    /// Multiplicative inverse, `None` for zero or when the two-phase
    /// Montgomery inversion fails to terminate.
    fn inverse(&self) -> Option<Self>;

    /// Big-endian serialization, `mod_byte_len` bytes per base-field
    /// coordinate.
    fn serialize_into(&self, mod_byte_len: usize, output: &mut Vec<u8>);

    /// Square-and-multiply exponentiation over little-endian limbs.
    fn pow(&self, exp: &[u64]) -> Self {
        let mut res = self.one_like();
        let mut found_one = false;

        for bit in RevBitIterator::new(exp) {
            if found_one {
                res.square();
            } else {
                found_one = bit;
            }

            if bit {
                res.mul_assign(self);
            }
        }

        res
    }
}

/// Non-residue check used when a tower is built: `el` generates a degree-n
/// extension of a field of `order` elements iff it is non-zero, n divides
/// order - 1, and el^((order - 1) / n) != 1.
pub(crate) fn is_non_nth_root<F: FieldElement>(el: &F, order: &BigUint, n: u64) -> bool {
    if el.is_zero() {
        return false;
    }
    let power = order - BigUint::one();
    let (quotient, remainder) = power.div_rem(&BigUint::from(n));
    if !remainder.is_zero() {
        return false;
    }

    let l = el.pow(&biguint_to_limbs(&quotient));
    l != el.one_like()
}
