//! Cubic extension Fp3 = Fp[u] / (u^3 - xi) for a runtime non-residue xi.

use num_bigint::BigUint;

use crate::errors::ApiError;
use crate::extensions::frobenius::frobenius_exponent;
use crate::field::PrimeField;
use crate::fp::Fp;
use crate::traits::FieldElement;

/// Extension context with Frobenius coefficients for both the u and u^2
/// coordinates: c1[k] = xi^((q^k - 1) / 3), c2[k] = c1[k]^2, k in {0, 1, 2}.
pub struct Extension3<'a, const N: usize> {
    pub(crate) field: &'a PrimeField<N>,
    non_residue: Fp<'a, N>,
    pub(crate) frobenius_coeffs_c1: [Fp<'a, N>; 3],
    pub(crate) frobenius_coeffs_c2: [Fp<'a, N>; 3],
}

impl<'a, const N: usize> Extension3<'a, N> {
    pub fn new(non_residue: Fp<'a, N>) -> Result<Self, ApiError> {
        let field = non_residue.field;
        let modulus = field.modulus_biguint();

        let f_0 = Fp::one(field);
        let f_1 = non_residue.pow(&frobenius_exponent(&modulus, 3, "Fp3")?);
        let q2 = &modulus * &modulus;
        let f_2 = non_residue.pow(&frobenius_exponent(&q2, 3, "Fp3")?);

        let mut f_1_c2 = f_1;
        f_1_c2.square();
        let mut f_2_c2 = f_2;
        f_2_c2.square();

        Ok(Self {
            field,
            non_residue,
            frobenius_coeffs_c1: [f_0, f_1, f_2],
            frobenius_coeffs_c2: [f_0, f_1_c2, f_2_c2],
        })
    }

    #[inline]
    pub fn mul_by_nonresidue(&self, el: &mut Fp<'a, N>) {
        el.mul_assign(&self.non_residue);
    }

    pub fn non_residue(&self) -> &Fp<'a, N> {
        &self.non_residue
    }

    /// Order of the extension field, q^3.
    pub fn field_order(&self) -> BigUint {
        let q = self.field.modulus_biguint();
        &q * &q * &q
    }
}

/// An element c0 + c1*u + c2*u^2.
pub struct Fp3<'a, const N: usize> {
    pub c0: Fp<'a, N>,
    pub c1: Fp<'a, N>,
    pub c2: Fp<'a, N>,
    pub(crate) extension: &'a Extension3<'a, N>,
}

impl<'a, const N: usize> Clone for Fp3<'a, N> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, const N: usize> Copy for Fp3<'a, N> {}

impl<'a, const N: usize> PartialEq for Fp3<'a, N> {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.c0 == other.c0 && self.c1 == other.c1 && self.c2 == other.c2
    }
}

impl<'a, const N: usize> Eq for Fp3<'a, N> {}

impl<'a, const N: usize> std::fmt::Debug for Fp3<'a, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Fp3({:?}, {:?}, {:?})", self.c0, self.c1, self.c2)
    }
}

impl<'a, const N: usize> Fp3<'a, N> {
    #[inline]
    pub fn new(
        c0: Fp<'a, N>,
        c1: Fp<'a, N>,
        c2: Fp<'a, N>,
        extension: &'a Extension3<'a, N>,
    ) -> Self {
        Self { c0, c1, c2, extension }
    }

    #[inline]
    pub fn zero(extension: &'a Extension3<'a, N>) -> Self {
        let zero = Fp::zero(extension.field);
        Self {
            c0: zero,
            c1: zero,
            c2: zero,
            extension,
        }
    }

    #[inline]
    pub fn one(extension: &'a Extension3<'a, N>) -> Self {
        let zero = Fp::zero(extension.field);
        Self {
            c0: Fp::one(extension.field),
            c1: zero,
            c2: zero,
            extension,
        }
    }

    #[inline]
    pub fn mul_by_fp(&mut self, element: &Fp<'a, N>) {
        self.c0.mul_assign(element);
        self.c1.mul_assign(element);
        self.c2.mul_assign(element);
    }

    pub fn frobenius_map(&mut self, power: usize) {
        self.c1
            .mul_assign(&self.extension.frobenius_coeffs_c1[power % 3]);
        self.c2
            .mul_assign(&self.extension.frobenius_coeffs_c2[power % 3]);
    }
}

impl<'a, const N: usize> FieldElement for Fp3<'a, N> {
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
        // Toom-style interpolation with six base multiplications
        let a = other.c0;
        let b = other.c1;
        let c = other.c2;

        let d = self.c0;
        let e = self.c1;
        let f = self.c2;

        let mut ad = d;
        ad.mul_assign(&a);
        let mut be = e;
        be.mul_assign(&b);
        let mut cf = f;
        cf.mul_assign(&c);

        let mut t0 = b;
        t0.add_assign(&c);
        let mut x = e;
        x.add_assign(&f);
        x.mul_assign(&t0);
        x.sub_assign(&be);
        x.sub_assign(&cf);

        let mut t1 = a;
        t1.add_assign(&b);
        let mut y = d;
        y.add_assign(&e);
        y.mul_assign(&t1);
        y.sub_assign(&ad);
        y.sub_assign(&be);

        let mut t2 = a;
        t2.add_assign(&c);
        let mut z = d;
        z.add_assign(&f);
        z.mul_assign(&t2);
        z.sub_assign(&ad);
        z.add_assign(&be);
        z.sub_assign(&cf);

        let mut t3 = x;
        self.extension.mul_by_nonresidue(&mut t3);
        self.c0 = t3;
        self.c0.add_assign(&ad);

        let mut t4 = cf;
        self.extension.mul_by_nonresidue(&mut t4);
        self.c1 = t4;
        self.c1.add_assign(&y);

        self.c2 = z;
    }

    fn square(&mut self) {
        // CH-SQR2
        let a = self.c0;
        let b = self.c1;
        let c = self.c2;

        let mut s0 = a;
        s0.square();
        let mut ab = a;
        ab.mul_assign(&b);
        let mut s1 = ab;
        s1.double();
        let mut s2 = a;
        s2.sub_assign(&b);
        s2.add_assign(&c);
        s2.square();
        let mut bc = b;
        bc.mul_assign(&c);
        let mut s3 = bc;
        s3.double();
        let mut s4 = c;
        s4.square();

        self.c0 = s0;
        let mut t0 = s3;
        self.extension.mul_by_nonresidue(&mut t0);
        self.c0.add_assign(&t0);

        self.c1 = s1;
        let mut t1 = s4;
        self.extension.mul_by_nonresidue(&mut t1);
        self.c1.add_assign(&t1);

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
        if self.is_zero() {
            return None;
        }

        // cofactor expansion of the cubic norm
        let mut t0 = self.c0;
        t0.square();
        let mut t1 = self.c1;
        t1.square();
        let mut t2 = self.c2;
        t2.square();
        let mut t3 = self.c0;
        t3.mul_assign(&self.c1);
        let mut t4 = self.c0;
        t4.mul_assign(&self.c2);
        let mut t5 = self.c1;
        t5.mul_assign(&self.c2);

        let mut n5 = t5;
        self.extension.mul_by_nonresidue(&mut n5);

        let mut s0 = t0;
        s0.sub_assign(&n5);
        let mut s1 = t2;
        self.extension.mul_by_nonresidue(&mut s1);
        s1.sub_assign(&t3);
        let mut s2 = t1;
        s2.sub_assign(&t4);

        let mut a1 = self.c2;
        a1.mul_assign(&s1);
        let mut a2 = self.c1;
        a2.mul_assign(&s2);
        let mut a3 = a1;
        a3.add_assign(&a2);
        self.extension.mul_by_nonresidue(&mut a3);
        let mut t6 = self.c0;
        t6.mul_assign(&s0);
        t6.add_assign(&a3);

        let t6 = t6.inverse()?;

        let mut x0 = t6;
        x0.mul_assign(&s0);
        let mut x1 = t6;
        x1.mul_assign(&s1);
        let mut x2 = t6;
        x2.mul_assign(&s2);

        Some(Self::new(x0, x1, x2, self.extension))
    }

    fn serialize_into(&self, mod_byte_len: usize, output: &mut Vec<u8>) {
        self.c0.serialize_into(mod_byte_len, output);
        self.c1.serialize_into(mod_byte_len, output);
        self.c2.serialize_into(mod_byte_len, output);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::biguint_to_limbs;
    use crate::repr::Repr;
    use num_traits::Num;

    // MNT6-298 base field; 5 is a cubic non-residue there
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
    fn fp3_square_matches_mul() {
        let field = mnt6_field();
        let ext = Extension3::new(fp(&field, 5)).unwrap();
        let a = Fp3::new(fp(&field, 3), fp(&field, 17), fp(&field, 2901), &ext);
        let mut squared = a;
        squared.square();
        let mut product = a;
        product.mul_assign(&a);
        assert_eq!(squared, product);
    }

    #[test]
    fn fp3_inverse_roundtrip() {
        let field = mnt6_field();
        let ext = Extension3::new(fp(&field, 5)).unwrap();
        let a = Fp3::new(fp(&field, 1234), fp(&field, 5678), fp(&field, 9), &ext);
        let mut product = a.inverse().unwrap();
        product.mul_assign(&a);
        assert_eq!(product, Fp3::one(&ext));
        assert!(Fp3::zero(&ext).inverse().is_none());
    }

    #[test]
    fn fp3_frobenius_is_power_of_q() {
        let field = mnt6_field();
        let ext = Extension3::new(fp(&field, 5)).unwrap();
        let a = Fp3::new(fp(&field, 7), fp(&field, 11), fp(&field, 13), &ext);

        let q = field.modulus_biguint();
        let expected = a.pow(&biguint_to_limbs(&q));
        let mut frob = a;
        frob.frobenius_map(1);
        assert_eq!(frob, expected);
    }

    #[test]
    fn fp3_frobenius_cubed_is_identity() {
        let field = mnt6_field();
        let ext = Extension3::new(fp(&field, 5)).unwrap();
        let a = Fp3::new(fp(&field, 42), fp(&field, 43), fp(&field, 44), &ext);
        let mut frob = a;
        frob.frobenius_map(1);
        frob.frobenius_map(1);
        frob.frobenius_map(1);
        assert_eq!(frob, a);
    }

    #[test]
    fn fp3_distributivity() {
        let field = mnt6_field();
        let ext = Extension3::new(fp(&field, 5)).unwrap();
        let a = Fp3::new(fp(&field, 3), fp(&field, 4), fp(&field, 5), &ext);
        let b = Fp3::new(fp(&field, 6), fp(&field, 7), fp(&field, 8), &ext);
        let c = Fp3::new(fp(&field, 9), fp(&field, 10), fp(&field, 11), &ext);

        let mut lhs = a;
        lhs.add_assign(&b);
        lhs.mul_assign(&c);

        let mut ac = a;
        ac.mul_assign(&c);
        let mut bc = b;
        bc.mul_assign(&c);
        ac.add_assign(&bc);

        assert_eq!(lhs, ac);
    }
}
