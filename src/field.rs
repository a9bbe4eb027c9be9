//! Runtime prime-field context: the modulus together with the precomputed
//! Montgomery constants every element operation reads.

use num_bigint::BigUint;
use num_traits::One;

use crate::repr::Repr;

/// Montgomery context for a prime field of N 64-bit limbs, built once per
/// ABI call.
///
/// Invariants established by the decoder: the modulus is odd, at least 3,
/// and occupies at most 64*N - 1 bits (the dispatcher adds a limb when the
/// top bit of the top byte is set), so reduced values can be added or
/// doubled without overflowing the backing array.
#[derive(Debug)]
pub struct PrimeField<const N: usize> {
    modulus: Repr<N>,
    mont_power: u64,
    mont_r: Repr<N>,
    mont_r2: Repr<N>,
    mont_inv: u64,
}

impl<const N: usize> PrimeField<N> {
    pub fn new(modulus: Repr<N>) -> Self {
        debug_assert!(modulus.is_odd());

        // -m^-1 mod 2^64 by exponentiating to totient(2^64) - 1
        let mut inv = 1u64;
        for _ in 0..63 {
            inv = inv.wrapping_mul(inv);
            inv = inv.wrapping_mul(modulus.0[0]);
        }
        inv = inv.wrapping_neg();

        let modulus_big = modulus.to_biguint();
        let r = (BigUint::one() << (64 * N)) % &modulus_big;
        let r2 = (&r * &r) % &modulus_big;

        Self {
            modulus,
            mont_power: 64 * N as u64,
            mont_r: Repr::from_biguint(&r),
            mont_r2: Repr::from_biguint(&r2),
            mont_inv: inv,
        }
    }

    #[inline(always)]
    pub fn modulus(&self) -> &Repr<N> {
        &self.modulus
    }

    #[inline(always)]
    pub fn mont_r(&self) -> &Repr<N> {
        &self.mont_r
    }

    #[inline(always)]
    pub fn mont_r2(&self) -> &Repr<N> {
        &self.mont_r2
    }

    #[inline(always)]
    pub fn mont_inv(&self) -> u64 {
        self.mont_inv
    }

    #[inline(always)]
    pub fn mont_power(&self) -> u64 {
        self.mont_power
    }

    #[inline(always)]
    pub fn is_valid_repr(&self, repr: &Repr<N>) -> bool {
        *repr < self.modulus
    }

    pub fn modulus_biguint(&self) -> BigUint {
        self.modulus.to_biguint()
    }
}

/// Little-endian limbs of a BigUint, trimmed to the minimal non-empty length.
pub(crate) fn biguint_to_limbs(value: &BigUint) -> Vec<u64> {
    let digits: Vec<u64> = value.iter_u64_digits().collect();
    if digits.is_empty() {
        vec![0]
    } else {
        digits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::Num;

    // BN254 base field
    const BN254_MODULUS: &str =
        "21888242871839275222246405745257275088696311157297823662689037894645226208583";

    fn bn254_modulus_repr() -> Repr<4> {
        let m = BigUint::from_str_radix(BN254_MODULUS, 10).unwrap();
        Repr::from_biguint(&m)
    }

    #[test]
    fn bn254_montgomery_constants() {
        let field = PrimeField::new(bn254_modulus_repr());
        // R * R^-1 == 1: converting R out of Montgomery form gives 1
        let one_from_r = field.mont_r().into_normal(field.modulus(), field.mont_inv());
        assert_eq!(one_from_r, Repr::one());
        assert_eq!(field.mont_power(), 256);
    }

    #[test]
    fn mont_inv_is_negated_inverse() {
        let field = PrimeField::new(bn254_modulus_repr());
        let product = field.modulus().0[0].wrapping_mul(field.mont_inv());
        assert_eq!(product, u64::MAX); // m * (-m^-1) == -1 mod 2^64
    }
}
