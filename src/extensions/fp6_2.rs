//! Sextic extension built 2-over-3: Fp6 = Fp3[w] / (w^2 - u). Target group
//! of the MNT6 pairing.

#![allow(non_camel_case_types)]

use crate::errors::ApiError;
use crate::extensions::fp3::{Extension3, Fp3};
use crate::extensions::frobenius::frobenius_exponent;
use crate::fp::Fp;
use crate::scalar::into_ternary_wnaf;
use crate::traits::FieldElement;

/// Frobenius coefficients are Fp-valued: xi^((q^k - 1) / 6) for k in
/// {0, 1, 3}; the other slots are unused and stay zero.
pub struct Extension2Over3<'a, const N: usize> {
    pub(crate) extension3: &'a Extension3<'a, N>,
    pub(crate) frobenius_coeffs_c1: [Fp<'a, N>; 6],
}

impl<'a, const N: usize> Extension2Over3<'a, N> {
    pub fn new(extension3: &'a Extension3<'a, N>) -> Result<Self, ApiError> {
        let field = extension3.field;
        let modulus = field.modulus_biguint();
        let non_residue = extension3.non_residue();

        let zero = Fp::zero(field);
        let f_0 = Fp::one(field);
        let f_1 = non_residue.pow(&frobenius_exponent(&modulus, 6, "Fp6_2")?);
        let q3 = &modulus * &modulus * &modulus;
        let f_3 = non_residue.pow(&frobenius_exponent(&q3, 6, "Fp6_2")?);

        Ok(Self {
            extension3,
            frobenius_coeffs_c1: [f_0, f_1, zero, f_3, zero, zero],
        })
    }

    /// Multiplication of an Fp3 element by w, using w^2 = u: coordinates
    /// rotate and the wrapped one picks up the ground non-residue.
    #[inline]
    pub fn mul_by_nonresidue(&self, el: &mut Fp3<'a, N>) {
        let mut c0 = el.c2;
        el.c2 = el.c1;
        el.c1 = el.c0;
        self.extension3.mul_by_nonresidue(&mut c0);
        el.c0 = c0;
    }
}

/// An element c0 + c1*w.
pub struct Fp6_2<'a, const N: usize> {
    pub c0: Fp3<'a, N>,
    pub c1: Fp3<'a, N>,
    pub(crate) extension: &'a Extension2Over3<'a, N>,
}

impl<'a, const N: usize> Clone for Fp6_2<'a, N> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, const N: usize> Copy for Fp6_2<'a, N> {}

impl<'a, const N: usize> PartialEq for Fp6_2<'a, N> {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.c0 == other.c0 && self.c1 == other.c1
    }
}

impl<'a, const N: usize> Eq for Fp6_2<'a, N> {}

impl<'a, const N: usize> std::fmt::Debug for Fp6_2<'a, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Fp6_2({:?}, {:?})", self.c0, self.c1)
    }
}

impl<'a, const N: usize> Fp6_2<'a, N> {
    #[inline]
    pub fn new(c0: Fp3<'a, N>, c1: Fp3<'a, N>, extension: &'a Extension2Over3<'a, N>) -> Self {
        Self { c0, c1, extension }
    }

    #[inline]
    pub fn zero(extension: &'a Extension2Over3<'a, N>) -> Self {
        Self {
            c0: Fp3::zero(extension.extension3),
            c1: Fp3::zero(extension.extension3),
            extension,
        }
    }

    #[inline]
    pub fn one(extension: &'a Extension2Over3<'a, N>) -> Self {
        Self {
            c0: Fp3::one(extension.extension3),
            c1: Fp3::zero(extension.extension3),
            extension,
        }
    }

    #[inline]
    pub fn conjugate(&mut self) {
        self.c1.negate();
    }

    pub fn frobenius_map(&mut self, power: usize) {
        debug_assert!(power == 1 || power == 3);
        self.c0.frobenius_map(power);
        self.c1.frobenius_map(power);
        self.c1
            .mul_by_fp(&self.extension.frobenius_coeffs_c1[power % 6]);
    }

    /// Exponentiation inside the cyclotomic subgroup, where conjugation is
    /// the inverse: signed ternary-WNAF square-and-multiply.
    pub fn cyclotomic_exp(&self, exp: &[u64]) -> Self {
        let mut res = self.one_like();
        let mut self_inverse = *self;
        self_inverse.conjugate();

        let mut found_nonzero = false;
        let naf = into_ternary_wnaf(exp);

        for value in naf.iter().rev() {
            if found_nonzero {
                res.square();
            }

            if *value != 0 {
                found_nonzero = true;
                if *value > 0 {
                    res.mul_assign(self);
                } else {
                    res.mul_assign(&self_inverse);
                }
            }
        }

        res
    }
}

impl<'a, const N: usize> FieldElement for Fp6_2<'a, N> {
    #[inline]
    fn zero_like(&self) -> Self {
        Self::zero(self.extension)
    }

    #[inline]
    fn one_like(&self) -> Self {
        Self::one(self.extension)
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.c0.is_zero() && self.c1.is_zero()
    }

    #[inline]
    fn add_assign(&mut self, other: &Self) {
        self.c0.add_assign(&other.c0);
        self.c1.add_assign(&other.c1);
    }

    #[inline]
    fn sub_assign(&mut self, other: &Self) {
        self.c0.sub_assign(&other.c0);
        self.c1.sub_assign(&other.c1);
    }

    fn mul_assign(&mut self, other: &Self) {
        let a0 = self.c0;
        let b0 = self.c1;
        let a1 = other.c0;
        let b1 = other.c1;

        let mut a0a1 = a0;
        a0a1.mul_assign(&a1);
        let mut b0b1 = b0;
        b0b1.mul_assign(&b1);
        let mut t0 = b0b1;
        self.extension.mul_by_nonresidue(&mut t0);

        let mut e0 = a0a1;
        e0.add_assign(&t0);
        let mut e1 = a0;
        e1.add_assign(&b0);

        let mut t1 = a1;
        t1.add_assign(&b1);

        e1.mul_assign(&t1);
        e1.sub_assign(&a0a1);
        e1.sub_assign(&b0b1);

        self.c0 = e0;
        self.c1 = e1;
    }

    fn square(&mut self) {
        let mut ab_add = self.c0;
        ab_add.add_assign(&self.c1);
        let mut ab_mul = self.c0;
        ab_mul.mul_assign(&self.c1);

        let mut t0 = self.c1;
        self.extension.mul_by_nonresidue(&mut t0);
        t0.add_assign(&self.c0);

        let mut t1 = ab_mul;
        self.extension.mul_by_nonresidue(&mut t1);

        let mut e0 = ab_add;
        e0.mul_assign(&t0);
        e0.sub_assign(&ab_mul);
        e0.sub_assign(&t1);

        let mut e1 = ab_mul;
        e1.double();

        self.c0 = e0;
        self.c1 = e1;
    }

    #[inline]
    fn double(&mut self) {
        self.c0.double();
        self.c1.double();
    }

    #[inline]
    fn negate(&mut self) {
        self.c0.negate();
        self.c1.negate();
    }

    fn inverse(&self) -> Option<Self> {
        if self.is_zero() {
            return None;
        }
        let mut v0 = self.c0;
        v0.square();
        let mut v1 = self.c1;
        v1.square();

        let mut v1_by_nonresidue = v1;
        self.extension.mul_by_nonresidue(&mut v1_by_nonresidue);
        v0.sub_assign(&v1_by_nonresidue);

        let t = v0.inverse()?;
        let mut e0 = self.c0;
        e0.mul_assign(&t);
        let mut e1 = self.c1;
        e1.mul_assign(&t);
        e1.negate();

        Some(Self::new(e0, e1, self.extension))
    }

    fn serialize_into(&self, mod_byte_len: usize, output: &mut Vec<u8>) {
        self.c0.serialize_into(mod_byte_len, output);
        self.c1.serialize_into(mod_byte_len, output);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::PrimeField;
    use crate::repr::Repr;
    use num_bigint::BigUint;
    use num_traits::Num;

    fn mnt6_field() -> PrimeField<5> {
        let m = BigUint::from_str_radix(
            "475922286169261325753349249653048451545124878552823515553267735739164647307408490559963137",
            10,
        )
        .unwrap();
        PrimeField::new(Repr::from_biguint(&m))
    }

    fn fp(field: &PrimeField<5>, v: u64) -> Fp<'_, 5> {
        Fp::from_repr(field, Repr::from_u64(v)).unwrap()
    }

    #[test]
    fn fp6_2_square_matches_mul() {
        let field = mnt6_field();
        let ext3 = Extension3::new(fp(&field, 5)).unwrap();
        let ext6 = Extension2Over3::new(&ext3).unwrap();
        let a = Fp6_2::new(
            Fp3::new(fp(&field, 3), fp(&field, 4), fp(&field, 5), &ext3),
            Fp3::new(fp(&field, 6), fp(&field, 7), fp(&field, 8), &ext3),
            &ext6,
        );
        let mut squared = a;
        squared.square();
        let mut product = a;
        product.mul_assign(&a);
        assert_eq!(squared, product);
    }

    #[test]
    fn fp6_2_inverse_roundtrip() {
        let field = mnt6_field();
        let ext3 = Extension3::new(fp(&field, 5)).unwrap();
        let ext6 = Extension2Over3::new(&ext3).unwrap();
        let a = Fp6_2::new(
            Fp3::new(fp(&field, 13), fp(&field, 1), fp(&field, 77), &ext3),
            Fp3::new(fp(&field, 2), fp(&field, 29), fp(&field, 3), &ext3),
            &ext6,
        );
        let mut product = a.inverse().unwrap();
        product.mul_assign(&a);
        assert_eq!(product, Fp6_2::one(&ext6));
    }
}
