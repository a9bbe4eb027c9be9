//! Sextic extension built 3-over-2: Fp6 = Fp2[v] / (v^3 - xi) with xi in
//! Fp2. Middle layer of the BN/BLS12 tower; its sparse multiplication
//! helpers carry the Miller-loop line evaluations.

#![allow(non_camel_case_types)]

use crate::errors::ApiError;
use crate::extensions::fp2::{Extension2, Fp2};
use crate::extensions::frobenius::{frobenius_exponent, WindowExpBase};
use crate::traits::FieldElement;

/// Frobenius coefficients are Fp2-valued: xi^((q^k - 1) / 3) for k in
/// {0, 1, 2, 3} and their squares for the v^2 coordinate; slots 4 and 5 are
/// unused and stay zero. The exponentiations run through a shared windowed
/// base over xi.
pub struct Extension3Over2<'a, const N: usize> {
    pub(crate) extension2: &'a Extension2<'a, N>,
    non_residue: Fp2<'a, N>,
    pub(crate) frobenius_coeffs_c1: [Fp2<'a, N>; 6],
    pub(crate) frobenius_coeffs_c2: [Fp2<'a, N>; 6],
}

impl<'a, const N: usize> Extension3Over2<'a, N> {
    pub fn new(
        non_residue: Fp2<'a, N>,
        extension2: &'a Extension2<'a, N>,
        exp_base: &WindowExpBase<Fp2<'a, N>>,
    ) -> Result<Self, ApiError> {
        let q = extension2.field.modulus_biguint();

        let f_0 = Fp2::one(extension2);
        let q1 = q.clone();
        let f_1 = exp_base.exponentiate(&frobenius_exponent(&q1, 3, "Fp6")?);
        let q2 = &q1 * &q;
        let f_2 = exp_base.exponentiate(&frobenius_exponent(&q2, 3, "Fp6")?);
        let q3 = &q2 * &q;
        let f_3 = exp_base.exponentiate(&frobenius_exponent(&q3, 3, "Fp6")?);
        let zero = Fp2::zero(extension2);

        let mut f_1_c2 = f_1;
        f_1_c2.square();
        let mut f_2_c2 = f_2;
        f_2_c2.square();
        let mut f_3_c2 = f_3;
        f_3_c2.square();

        Ok(Self {
            extension2,
            non_residue,
            frobenius_coeffs_c1: [f_0, f_1, f_2, f_3, zero, zero],
            frobenius_coeffs_c2: [f_0, f_1_c2, f_2_c2, f_3_c2, zero, zero],
        })
    }

    #[inline]
    pub fn mul_by_nonresidue(&self, el: &mut Fp2<'a, N>) {
        el.mul_assign(&self.non_residue);
    }

    pub fn non_residue(&self) -> &Fp2<'a, N> {
        &self.non_residue
    }
}

/// An element c0 + c1*v + c2*v^2.
pub struct Fp6_3<'a, const N: usize> {
    pub c0: Fp2<'a, N>,
    pub c1: Fp2<'a, N>,
    pub c2: Fp2<'a, N>,
    pub(crate) extension: &'a Extension3Over2<'a, N>,
}

impl<'a, const N: usize> Clone for Fp6_3<'a, N> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, const N: usize> Copy for Fp6_3<'a, N> {}

impl<'a, const N: usize> PartialEq for Fp6_3<'a, N> {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.c0 == other.c0 && self.c1 == other.c1 && self.c2 == other.c2
    }
}

impl<'a, const N: usize> Eq for Fp6_3<'a, N> {}

impl<'a, const N: usize> std::fmt::Debug for Fp6_3<'a, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Fp6_3({:?}, {:?}, {:?})", self.c0, self.c1, self.c2)
    }
}

impl<'a, const N: usize> Fp6_3<'a, N> {
    #[inline]
    pub fn new(
        c0: Fp2<'a, N>,
        c1: Fp2<'a, N>,
        c2: Fp2<'a, N>,
        extension: &'a Extension3Over2<'a, N>,
    ) -> Self {
        Self { c0, c1, c2, extension }
    }

    #[inline]
    pub fn zero(extension: &'a Extension3Over2<'a, N>) -> Self {
        let zero = Fp2::zero(extension.extension2);
        Self {
            c0: zero,
            c1: zero,
            c2: zero,
            extension,
        }
    }

    #[inline]
    pub fn one(extension: &'a Extension3Over2<'a, N>) -> Self {
        let zero = Fp2::zero(extension.extension2);
        Self {
            c0: Fp2::one(extension.extension2),
            c1: zero,
            c2: zero,
            extension,
        }
    }

    pub fn frobenius_map(&mut self, power: usize) {
        debug_assert!(matches!(power, 0 | 1 | 2 | 3 | 6));
        self.c0.frobenius_map(power);
        self.c1.frobenius_map(power);
        self.c2.frobenius_map(power);

        self.c1
            .mul_assign(&self.extension.frobenius_coeffs_c1[power % 6]);
        self.c2
            .mul_assign(&self.extension.frobenius_coeffs_c2[power % 6]);
    }

    /// Sparse multiplication by an element with only the v coordinate set.
    pub fn mul_by_1(&mut self, c1: &Fp2<'a, N>) {
        let mut b_b = self.c1;
        b_b.mul_assign(c1);

        let mut t1 = *c1;
        {
            let mut tmp = self.c1;
            tmp.add_assign(&self.c2);

            t1.mul_assign(&tmp);
            t1.sub_assign(&b_b);
            self.extension.mul_by_nonresidue(&mut t1);
        }

        let mut t2 = *c1;
        {
            let mut tmp = self.c0;
            tmp.add_assign(&self.c1);

            t2.mul_assign(&tmp);
            t2.sub_assign(&b_b);
        }

        self.c0 = t1;
        self.c1 = t2;
        self.c2 = b_b;
    }

    /// Sparse multiplication by an element with the 1 and v coordinates set.
    pub fn mul_by_01(&mut self, c0: &Fp2<'a, N>, c1: &Fp2<'a, N>) {
        let mut a_a = self.c0;
        let mut b_b = self.c1;
        a_a.mul_assign(c0);
        b_b.mul_assign(c1);

        let mut t1 = *c1;
        {
            let mut tmp = self.c1;
            tmp.add_assign(&self.c2);

            t1.mul_assign(&tmp);
            t1.sub_assign(&b_b);
            self.extension.mul_by_nonresidue(&mut t1);
            t1.add_assign(&a_a);
        }

        let mut t3 = *c0;
        {
            let mut tmp = self.c0;
            tmp.add_assign(&self.c2);

            t3.mul_assign(&tmp);
            t3.sub_assign(&a_a);
            t3.add_assign(&b_b);
        }

        let mut t2 = *c0;
        t2.add_assign(c1);
        {
            let mut tmp = self.c0;
            tmp.add_assign(&self.c1);

            t2.mul_assign(&tmp);
            t2.sub_assign(&a_a);
            t2.sub_assign(&b_b);
        }

        self.c0 = t1;
        self.c1 = t2;
        self.c2 = t3;
    }
}

impl<'a, const N: usize> FieldElement for Fp6_3<'a, N> {
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
        self.c0.is_zero() && self.c1.is_zero() && self.c2.is_zero()
    }

    #[inline]
    fn add_assign(&mut self, other: &Self) {
        self.c0.add_assign(&other.c0);
        self.c1.add_assign(&other.c1);
        self.c2.add_assign(&other.c2);
    }

    #[inline]
    fn sub_assign(&mut self, other: &Self) {
        self.c0.sub_assign(&other.c0);
        self.c1.sub_assign(&other.c1);
        self.c2.sub_assign(&other.c2);
    }

    fn mul_assign(&mut self, other: &Self) {
        let mut a_a = self.c0;
        let mut b_b = self.c1;
        let mut c_c = self.c2;
        a_a.mul_assign(&other.c0);
        b_b.mul_assign(&other.c1);
        c_c.mul_assign(&other.c2);

        let mut t1 = other.c1;
        t1.add_assign(&other.c2);
        {
            let mut tmp = self.c1;
            tmp.add_assign(&self.c2);

            t1.mul_assign(&tmp);
            t1.sub_assign(&b_b);
            t1.sub_assign(&c_c);
            self.extension.mul_by_nonresidue(&mut t1);
            t1.add_assign(&a_a);
        }

        let mut t3 = other.c0;
        t3.add_assign(&other.c2);
        {
            let mut tmp = self.c0;
            tmp.add_assign(&self.c2);

            t3.mul_assign(&tmp);
            t3.sub_assign(&a_a);
            t3.add_assign(&b_b);
            t3.sub_assign(&c_c);
        }

        let mut t2 = other.c0;
        t2.add_assign(&other.c1);
        {
            let mut tmp = self.c0;
            tmp.add_assign(&self.c1);

            t2.mul_assign(&tmp);
            t2.sub_assign(&a_a);
            t2.sub_assign(&b_b);
            self.extension.mul_by_nonresidue(&mut c_c);
            t2.add_assign(&c_c);
        }

        self.c0 = t1;
        self.c1 = t2;
        self.c2 = t3;
    }

    fn square(&mut self) {
        // CH-SQR2
        let mut s0 = self.c0;
        s0.square();
        let mut ab = self.c0;
        ab.mul_assign(&self.c1);
        let mut s1 = ab;
        s1.double();
        let mut s2 = self.c0;
        s2.sub_assign(&self.c1);
        s2.add_assign(&self.c2);
        s2.square();
        let mut bc = self.c1;
        bc.mul_assign(&self.c2);
        let mut s3 = bc;
        s3.double();
        let mut s4 = self.c2;
        s4.square();

        self.c0 = s3;
        self.extension.mul_by_nonresidue(&mut self.c0);
        self.c0.add_assign(&s0);

        self.c1 = s4;
        self.extension.mul_by_nonresidue(&mut self.c1);
        self.c1.add_assign(&s1);

        self.c2 = s1;
        self.c2.add_assign(&s2);
        self.c2.add_assign(&s3);
        self.c2.sub_assign(&s0);
        self.c2.sub_assign(&s4);
    }

    #[inline]
    fn double(&mut self) {
        self.c0.double();
        self.c1.double();
        self.c2.double();
    }

    #[inline]
    fn negate(&mut self) {
        self.c0.negate();
        self.c1.negate();
        self.c2.negate();
    }

    fn inverse(&self) -> Option<Self> {
        let mut e0 = self.c2;
        self.extension.mul_by_nonresidue(&mut e0);
        e0.mul_assign(&self.c1);
        e0.negate();
        {
            let mut e0s = self.c0;
            e0s.square();
            e0.add_assign(&e0s);
        }
        let mut e1 = self.c2;
        e1.square();
        self.extension.mul_by_nonresidue(&mut e1);
        {
            let mut e01 = self.c0;
            e01.mul_assign(&self.c1);
            e1.sub_assign(&e01);
        }
        let mut e2 = self.c1;
        e2.square();
        {
            let mut e02 = self.c0;
            e02.mul_assign(&self.c2);
            e2.sub_assign(&e02);
        }

        let mut tmp1 = self.c2;
        tmp1.mul_assign(&e1);
        let mut tmp2 = self.c1;
        tmp2.mul_assign(&e2);
        tmp1.add_assign(&tmp2);
        self.extension.mul_by_nonresidue(&mut tmp1);
        tmp2 = self.c0;
        tmp2.mul_assign(&e0);
        tmp1.add_assign(&tmp2);

        let t = tmp1.inverse()?;
        let mut c0 = t;
        c0.mul_assign(&e0);
        let mut c1 = t;
        c1.mul_assign(&e1);
        let mut c2 = t;
        c2.mul_assign(&e2);

        Some(Self::new(c0, c1, c2, self.extension))
    }

    fn serialize_into(&self, mod_byte_len: usize, output: &mut Vec<u8>) {
        self.c0.serialize_into(mod_byte_len, output);
        self.c1.serialize_into(mod_byte_len, output);
        self.c2.serialize_into(mod_byte_len, output);
    }
}
