//! Frobenius-coefficient machinery: exponent derivation over the field
//! order, and a windowed exponentiation base reused across the coefficient
//! computations of one tower.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::errors::ApiError;
use crate::field::biguint_to_limbs;
use crate::scalar::LsbBitIterator;
use crate::traits::FieldElement;

/// Little-endian limbs of `(base_order - 1) / div`, failing when the
/// division is not exact. `base_order` is q^k for the relevant power k.
pub(crate) fn frobenius_exponent(
    base_order: &BigUint,
    div: u64,
    what: &str,
) -> Result<Vec<u64>, ApiError> {
    let power = base_order - BigUint::one();
    let (quotient, remainder) = power.div_rem(&BigUint::from(div));
    if !remainder.is_zero() {
        return Err(ApiError::UnknownParameter(format!(
            "failed to calculate Frobenius coeffs for {}",
            what
        )));
    }
    Ok(biguint_to_limbs(&quotient))
}

/// Table of odd powers `base^1, base^3, base^5, ...` for sliding-window
/// exponentiation. Built once per pairing call from the Fp6 non-residue and
/// consumed by every Fp2-valued Frobenius coefficient of the tower.
pub struct WindowExpBase<F: FieldElement> {
    window_size: u64,
    one: F,
    bases: Vec<F>,
}

impl<F: FieldElement> WindowExpBase<F> {
    pub fn new(base: &F, window: u64) -> Self {
        let mut bases = Vec::with_capacity(1 << (window - 1));

        let mut acc = *base;
        bases.push(acc);
        let mut square = acc;
        square.square();

        for _ in 1..(1u64 << (window - 1)) {
            acc.mul_assign(&square);
            bases.push(acc);
        }

        Self {
            window_size: window,
            one: base.one_like(),
            bases,
        }
    }

    pub fn exponentiate(&self, scalar: &[u64]) -> F {
        let wnaf = self.windows(scalar);

        let mut res = self.one;
        let mut found_nonzero = false;

        for w in wnaf.iter().rev() {
            if *w == 0 && found_nonzero {
                res.square();
            } else if *w != 0 {
                found_nonzero = true;
                for _ in 0..self.window_size {
                    res.square();
                }
                let idx = (*w >> 1) as usize;
                res.mul_assign(&self.bases[idx]);
            }
        }

        res
    }

    /// Splits the scalar into odd windows of at most `window_size` bits,
    /// least significant window first; a zero entry stands for one skipped
    /// (zero) bit.
    fn windows(&self, scalar: &[u64]) -> Vec<u64> {
        let mut result = vec![];
        let mut found_beginning = false;
        let mut w = 0u64;
        let mut bit_count = 0u64;
        for b in LsbBitIterator::new(scalar) {
            if b {
                found_beginning = true;
                w |= 1 << bit_count;
                bit_count += 1;
            } else if found_beginning {
                bit_count += 1;
            } else {
                result.push(0);
                continue;
            }
            if bit_count == self.window_size {
                result.push(w);
                w = 0;
                found_beginning = false;
                bit_count = 0;
            }
        }

        if w != 0 {
            // last chunk when the bit length is not divisible by the window
            result.push(w);
        }

        while let Some(last) = result.last() {
            if *last == 0 {
                result.pop();
            } else {
                break;
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::PrimeField;
    use crate::fp::Fp;
    use crate::repr::Repr;
    use num_traits::Num;

    #[test]
    fn windowed_exp_matches_naive_pow() {
        let m = BigUint::from_str_radix(
            "21888242871839275222246405745257275088696311157297823662689037894645226208583",
            10,
        )
        .unwrap();
        let field = PrimeField::new(Repr::<4>::from_biguint(&m));
        let base = Fp::from_repr(&field, Repr::from_u64(2)).unwrap();

        let scalar: Vec<u64> = vec![
            0x43e1f593f0000000,
            0x2833e84879b97091,
            0xb85045b68181585d,
            0x30644e72e131a029,
        ];

        let exp_base = WindowExpBase::new(&base, 8);
        assert_eq!(exp_base.exponentiate(&scalar), base.pow(&scalar));
        // small scalar with low hamming weight
        assert_eq!(exp_base.exponentiate(&[13]), base.pow(&[13]));
    }
}
