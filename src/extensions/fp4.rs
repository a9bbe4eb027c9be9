//! Quartic extension built 2-over-2: Fp4 = Fp2[w] / (w^2 - u). Target group
//! of the MNT4 pairing.

use crate::errors::ApiError;
use crate::extensions::fp2::{Extension2, Fp2};
use crate::extensions::frobenius::frobenius_exponent;
use crate::fp::Fp;
use crate::scalar::into_ternary_wnaf;
use crate::traits::FieldElement;

/// Frobenius coefficients are Fp-valued: xi^((q^k - 1) / 4) for k in
/// {0, 1, 2}; the k = 3 slot is unused and stays zero.
pub struct Extension2Over2<'a, const N: usize> {
    pub(crate) extension2: &'a Extension2<'a, N>,
    pub(crate) frobenius_coeffs_c1: [Fp<'a, N>; 4],
}

impl<'a, const N: usize> Extension2Over2<'a, N> {
    pub fn new(extension2: &'a Extension2<'a, N>) -> Result<Self, ApiError> {
        let field = extension2.field;
        let modulus = field.modulus_biguint();
        let non_residue = extension2.non_residue();

        let f_0 = Fp::one(field);
        let f_1 = non_residue.pow(&frobenius_exponent(&modulus, 4, "Fp4")?);
        let q2 = &modulus * &modulus;
        let f_2 = non_residue.pow(&frobenius_exponent(&q2, 4, "Fp4")?);
        let f_3 = Fp::zero(field);

        Ok(Self {
            extension2,
            frobenius_coeffs_c1: [f_0, f_1, f_2, f_3],
        })
    }

    /// Multiplication of an Fp2 element by w, using w^2 = u: the
    /// coordinates swap and the wrapped one picks up the ground
    /// non-residue.
    #[inline]
    pub fn mul_by_nonresidue(&self, el: &mut Fp2<'a, N>) {
        let mut e0 = el.c1;
        el.c1 = el.c0;
        self.extension2.mul_by_nonresidue(&mut e0);
        el.c0 = e0;
    }
}

/// An element c0 + c1*w.
pub struct Fp4<'a, const N: usize> {
    pub c0: Fp2<'a, N>,
    pub c1: Fp2<'a, N>,
    pub(crate) extension: &'a Extension2Over2<'a, N>,
}

impl<'a, const N: usize> Clone for Fp4<'a, N> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, const N: usize> Copy for Fp4<'a, N> {}

impl<'a, const N: usize> PartialEq for Fp4<'a, N> {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.c0 == other.c0 && self.c1 == other.c1
    }
}

impl<'a, const N: usize> Eq for Fp4<'a, N> {}

impl<'a, const N: usize> std::fmt::Debug for Fp4<'a, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Fp4({:?}, {:?})", self.c0, self.c1)
    }
}

impl<'a, const N: usize> Fp4<'a, N> {
    #[inline]
    pub fn new(c0: Fp2<'a, N>, c1: Fp2<'a, N>, extension: &'a Extension2Over2<'a, N>) -> Self {
        Self { c0, c1, extension }
    }

    #[inline]
    pub fn zero(extension: &'a Extension2Over2<'a, N>) -> Self {
        Self {
            c0: Fp2::zero(extension.extension2),
            c1: Fp2::zero(extension.extension2),
            extension,
        }
    }

    #[inline]
    pub fn one(extension: &'a Extension2Over2<'a, N>) -> Self {
        Self {
            c0: Fp2::one(extension.extension2),
            c1: Fp2::zero(extension.extension2),
            extension,
        }
    }

    #[inline]
    pub fn conjugate(&mut self) {
        self.c1.negate();
    }

    pub fn frobenius_map(&mut self, power: usize) {
        debug_assert!(power == 1 || power == 2);
        self.c0.frobenius_map(power);
        self.c1.frobenius_map(power);
        self.c1
            .mul_by_fp(&self.extension.frobenius_coeffs_c1[power % 4]);
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

impl<'a, const N: usize> FieldElement for Fp4<'a, N> {
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
        // Guide to Pairing-based Cryptography, Algorithm 5.19
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
