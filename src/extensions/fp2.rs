//! Quadratic extension Fp2 = Fp[u] / (u^2 - xi) for a runtime non-residue xi.

use num_bigint::BigUint;

use crate::errors::ApiError;
use crate::extensions::frobenius::frobenius_exponent;
use crate::field::PrimeField;
use crate::fp::Fp;
use crate::traits::FieldElement;

/// Extension context: the non-residue and the Frobenius coefficients
/// `xi^((q^k - 1) / 2)` for k in {0, 1}.
pub struct Extension2<'a, const N: usize> {
    pub(crate) field: &'a PrimeField<N>,
    non_residue: Fp<'a, N>,
    pub(crate) frobenius_coeffs_c1: [Fp<'a, N>; 2],
}

impl<'a, const N: usize> Extension2<'a, N> {
    pub fn new(non_residue: Fp<'a, N>) -> Result<Self, ApiError> {
        let field = non_residue.field;
        let modulus = field.modulus_biguint();

        let f_0 = Fp::one(field);
        let f_1 = non_residue.pow(&frobenius_exponent(&modulus, 2, "Fp2")?);

        Ok(Self {
            field,
            non_residue,
            frobenius_coeffs_c1: [f_0, f_1],
        })
    }

    #[inline]
    pub fn mul_by_nonresidue(&self, el: &mut Fp<'a, N>) {
        el.mul_assign(&self.non_residue);
    }

    pub fn non_residue(&self) -> &Fp<'a, N> {
        &self.non_residue
    }

    /// Order of the extension field, q^2.
    pub fn field_order(&self) -> BigUint {
        let q = self.field.modulus_biguint();
        &q * &q
    }
}

/// An element c0 + c1*u.
pub struct Fp2<'a, const N: usize> {
    pub c0: Fp<'a, N>,
    pub c1: Fp<'a, N>,
    pub(crate) extension: &'a Extension2<'a, N>,
}

impl<'a, const N: usize> Clone for Fp2<'a, N> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, const N: usize> Copy for Fp2<'a, N> {}

impl<'a, const N: usize> PartialEq for Fp2<'a, N> {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.c0 == other.c0 && self.c1 == other.c1
    }
}

impl<'a, const N: usize> Eq for Fp2<'a, N> {}

impl<'a, const N: usize> std::fmt::Debug for Fp2<'a, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Fp2({:?}, {:?})", self.c0, self.c1)
    }
}

impl<'a, const N: usize> Fp2<'a, N> {
    #[inline]
    pub fn new(c0: Fp<'a, N>, c1: Fp<'a, N>, extension: &'a Extension2<'a, N>) -> Self {
        Self { c0, c1, extension }
    }

    #[inline]
    pub fn zero(extension: &'a Extension2<'a, N>) -> Self {
        Self {
            c0: Fp::zero(extension.field),
            c1: Fp::zero(extension.field),
            extension,
        }
    }

    #[inline]
    pub fn one(extension: &'a Extension2<'a, N>) -> Self {
        Self {
            c0: Fp::one(extension.field),
            c1: Fp::zero(extension.field),
            extension,
        }
    }

    /// Scale both coordinates by a base-field element.
    #[inline]
    pub fn mul_by_fp(&mut self, element: &Fp<'a, N>) {
        self.c0.mul_assign(element);
        self.c1.mul_assign(element);
    }

    pub fn frobenius_map(&mut self, power: usize) {
        self.c1
            .mul_assign(&self.extension.frobenius_coeffs_c1[power % 2]);
    }
}

impl<'a, const N: usize> FieldElement for Fp2<'a, N> {
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
        // Karatsuba: three base multiplications
        let mut v0 = self.c0;
        v0.mul_assign(&other.c0);
        let mut v1 = self.c1;
        v1.mul_assign(&other.c1);

        self.c1.add_assign(&self.c0);
        let mut t0 = other.c0;
        t0.add_assign(&other.c1);
        self.c1.mul_assign(&t0);
        self.c1.sub_assign(&v0);
        self.c1.sub_assign(&v1);
        self.c0 = v0;
        self.extension.mul_by_nonresidue(&mut v1);
        self.c0.add_assign(&v1);
    }

    fn square(&mut self) {
        // complex squaring: (c0 + c1)(c0 - xi*c1) + c0*c1*(xi - 1) rearranged
        let mut v0 = self.c0;
        v0.sub_assign(&self.c1);
        let mut v3 = self.c0;
        let mut t0 = self.c1;
        self.extension.mul_by_nonresidue(&mut t0);
        v3.sub_assign(&t0);
        let mut v2 = self.c0;
        v2.mul_assign(&self.c1);

        v0.mul_assign(&v3);
        v0.add_assign(&v2);

        self.c1 = v2;
        self.c1.double();
        self.c0 = v0;
        self.extension.mul_by_nonresidue(&mut v2);
        self.c0.add_assign(&v2);
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
