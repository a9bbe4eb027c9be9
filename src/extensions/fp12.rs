//! Dodecic extension built 2-over-3-over-2: Fp12 = Fp6[w] / (w^2 - v).
//! Target group of the BN and BLS12 pairings.

use crate::errors::ApiError;
use crate::extensions::fp2::Fp2;
use crate::extensions::fp6_3::{Extension3Over2, Fp6_3};
use crate::extensions::frobenius::{frobenius_exponent, WindowExpBase};
use crate::scalar::RevBitIterator;
use crate::traits::FieldElement;

/// Frobenius coefficients are Fp2-valued: xi^((q^k - 1) / 6) for k in
/// {0, 1, 2, 3, 6}; other slots are unused and stay zero.
pub struct Extension2Over3Over2<'a, const N: usize> {
    pub(crate) extension6: &'a Extension3Over2<'a, N>,
    pub(crate) frobenius_coeffs_c1: [Fp2<'a, N>; 12],
}

impl<'a, const N: usize> Extension2Over3Over2<'a, N> {
    pub fn new(
        extension6: &'a Extension3Over2<'a, N>,
        exp_base: &WindowExpBase<Fp2<'a, N>>,
    ) -> Result<Self, ApiError> {
        let extension2 = extension6.extension2;
        let q = extension2.field.modulus_biguint();

        let f_0 = Fp2::one(extension2);
        let q1 = q.clone();
        let f_1 = exp_base.exponentiate(&frobenius_exponent(&q1, 6, "Fp12")?);
        let q2 = &q1 * &q;
        let f_2 = exp_base.exponentiate(&frobenius_exponent(&q2, 6, "Fp12")?);
        let q3 = &q2 * &q;
        let f_3 = exp_base.exponentiate(&frobenius_exponent(&q3, 6, "Fp12")?);
        let q6 = &q3 * &q3;
        let f_6 = exp_base.exponentiate(&frobenius_exponent(&q6, 6, "Fp12")?);
        let zero = Fp2::zero(extension2);

        Ok(Self {
            extension6,
            frobenius_coeffs_c1: [
                f_0, f_1, f_2, f_3, zero, zero, f_6, zero, zero, zero, zero, zero,
            ],
        })
    }

    /// Multiplication of an Fp6 element by w, using w^2 = v: coordinates
    /// rotate and the wrapped one picks up the Fp6 non-residue.
    #[inline]
    pub fn mul_by_nonresidue(&self, el: &mut Fp6_3<'a, N>) {
        let mut new_c0 = el.c2;
        self.extension6.mul_by_nonresidue(&mut new_c0);
        el.c2 = el.c1;
        el.c1 = el.c0;
        el.c0 = new_c0;
    }
}

/// An element c0 + c1*w.
pub struct Fp12<'a, const N: usize> {
    pub c0: Fp6_3<'a, N>,
    pub c1: Fp6_3<'a, N>,
    pub(crate) extension: &'a Extension2Over3Over2<'a, N>,
}

impl<'a, const N: usize> Clone for Fp12<'a, N> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, const N: usize> Copy for Fp12<'a, N> {}

impl<'a, const N: usize> PartialEq for Fp12<'a, N> {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.c0 == other.c0 && self.c1 == other.c1
    }
}

impl<'a, const N: usize> Eq for Fp12<'a, N> {}

impl<'a, const N: usize> std::fmt::Debug for Fp12<'a, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Fp12({:?}, {:?})", self.c0, self.c1)
    }
}

impl<'a, const N: usize> Fp12<'a, N> {
    #[inline]
    pub fn new(
        c0: Fp6_3<'a, N>,
        c1: Fp6_3<'a, N>,
        extension: &'a Extension2Over3Over2<'a, N>,
    ) -> Self {
        Self { c0, c1, extension }
    }

    #[inline]
    pub fn zero(extension: &'a Extension2Over3Over2<'a, N>) -> Self {
        Self {
            c0: Fp6_3::zero(extension.extension6),
            c1: Fp6_3::zero(extension.extension6),
            extension,
        }
    }

    #[inline]
    pub fn one(extension: &'a Extension2Over3Over2<'a, N>) -> Self {
        Self {
            c0: Fp6_3::one(extension.extension6),
            c1: Fp6_3::zero(extension.extension6),
            extension,
        }
    }

    #[inline]
    pub fn conjugate(&mut self) {
        self.c1.negate();
    }

    pub fn frobenius_map(&mut self, power: usize) {
        debug_assert!(matches!(power, 1 | 2 | 3 | 6));
        self.c0.frobenius_map(power);
        self.c1.frobenius_map(power);

        let coeff = self.extension.frobenius_coeffs_c1[power % 12];
        self.c1.c0.mul_assign(&coeff);
        self.c1.c1.mul_assign(&coeff);
        self.c1.c2.mul_assign(&coeff);
    }

    /// Granger-Scott compressed squaring, valid in the cyclotomic subgroup.
    pub fn cyclotomic_square(&mut self) {
        let z0 = self.c0.c0;
        let z4 = self.c0.c1;
        let z3 = self.c0.c2;
        let z2 = self.c1.c0;
        let z1 = self.c1.c1;
        let z5 = self.c1.c2;

        let extension6 = self.extension.extension6;

        // t0 + t1*y = (z0 + z1*y)^2
        let mut tmp = z0;
        tmp.mul_assign(&z1);

        let mut a0 = z0;
        a0.add_assign(&z1);
        let mut a1 = z1;
        extension6.mul_by_nonresidue(&mut a1);
        a1.add_assign(&z0);

        let mut a2 = tmp;
        extension6.mul_by_nonresidue(&mut a2);

        let mut t0 = a0;
        t0.mul_assign(&a1);
        t0.sub_assign(&tmp);
        t0.sub_assign(&a2);
        let mut t1 = tmp;
        t1.double();

        // t2 + t3*y = (z2 + z3*y)^2
        let mut tmp = z2;
        tmp.mul_assign(&z3);

        let mut a0 = z2;
        a0.add_assign(&z3);
        let mut a1 = z3;
        extension6.mul_by_nonresidue(&mut a1);
        a1.add_assign(&z2);

        let mut a2 = tmp;
        extension6.mul_by_nonresidue(&mut a2);

        let mut t2 = a0;
        t2.mul_assign(&a1);
        t2.sub_assign(&tmp);
        t2.sub_assign(&a2);
        let mut t3 = tmp;
        t3.double();

        // t4 + t5*y = (z4 + z5*y)^2
        let mut tmp = z4;
        tmp.mul_assign(&z5);

        let mut a0 = z4;
        a0.add_assign(&z5);
        let mut a1 = z5;
        extension6.mul_by_nonresidue(&mut a1);
        a1.add_assign(&z4);

        let mut a2 = tmp;
        extension6.mul_by_nonresidue(&mut a2);

        let mut t4 = a0;
        t4.mul_assign(&a1);
        t4.sub_assign(&tmp);
        t4.sub_assign(&a2);
        let mut t5 = tmp;
        t5.double();

        // g0 = 3*t0 - 2*z0
        let mut g0 = t0;
        g0.sub_assign(&z0);
        g0.double();
        g0.add_assign(&t0);
        self.c0.c0 = g0;

        // g1 = 3*t1 + 2*z1
        let mut g1 = t1;
        g1.add_assign(&z1);
        g1.double();
        g1.add_assign(&t1);
        self.c1.c1 = g1;

        // g2 = 3*(xi*t5) + 2*z2
        let mut tmp = t5;
        extension6.mul_by_nonresidue(&mut tmp);
        let mut g2 = tmp;
        g2.add_assign(&z2);
        g2.double();
        g2.add_assign(&tmp);
        self.c1.c0 = g2;

        // g3 = 3*t4 - 2*z3
        let mut g3 = t4;
        g3.sub_assign(&z3);
        g3.double();
        g3.add_assign(&t4);
        self.c0.c2 = g3;

        // g4 = 3*t2 - 2*z4
        let mut g4 = t2;
        g4.sub_assign(&z4);
        g4.double();
        g4.add_assign(&t2);
        self.c0.c1 = g4;

        // g5 = 3*t3 + 2*z5
        let mut g5 = t3;
        g5.add_assign(&z5);
        g5.double();
        g5.add_assign(&t3);
        self.c1.c2 = g5;
    }

    /// Square-and-multiply over the exponent bits with cyclotomic squarings.
    pub fn cyclotomic_exp(&self, exp: &[u64]) -> Self {
        let mut res = self.one_like();
        let mut found_one = false;

        for bit in RevBitIterator::new(exp) {
            if found_one {
                res.cyclotomic_square();
            } else {
                found_one = bit;
            }

            if bit {
                res.mul_assign(self);
            }
        }

        res
    }

    /// Sparse multiplication by c0 + (c1 + c4*w)*... : the D-twist line shape
    /// with coordinates (0, 1, 4) set.
    pub fn mul_by_014(&mut self, c0: &Fp2<'a, N>, c1: &Fp2<'a, N>, c4: &Fp2<'a, N>) {
        let mut aa = self.c0;
        aa.mul_by_01(c0, c1);
        let mut bb = self.c1;
        bb.mul_by_1(c4);
        let mut o = *c1;
        o.add_assign(c4);
        self.c1.add_assign(&self.c0);
        self.c1.mul_by_01(c0, &o);
        self.c1.sub_assign(&aa);
        self.c1.sub_assign(&bb);
        self.c0 = bb;
        self.extension.mul_by_nonresidue(&mut self.c0);
        self.c0.add_assign(&aa);
    }

    /// Sparse multiplication with coordinates (0, 3, 4) set: the M-twist
    /// line shape.
    pub fn mul_by_034(&mut self, c0: &Fp2<'a, N>, c3: &Fp2<'a, N>, c4: &Fp2<'a, N>) {
        let mut a = self.c0;
        a.c0.mul_assign(c0);
        a.c1.mul_assign(c0);
        a.c2.mul_assign(c0);

        let mut b = self.c1;
        b.mul_by_01(c3, c4);

        let mut t0 = *c0;
        t0.add_assign(c3);

        let mut e = self.c0;
        e.add_assign(&self.c1);
        e.mul_by_01(&t0, c4);

        self.c1 = e;
        self.c1.sub_assign(&a);
        self.c1.sub_assign(&b);

        let mut t1 = b;
        self.extension.mul_by_nonresidue(&mut t1);
        self.c0 = a;
        self.c0.add_assign(&t1);
    }
}

impl<'a, const N: usize> FieldElement for Fp12<'a, N> {
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
