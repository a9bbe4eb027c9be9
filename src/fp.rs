//! Prime-field elements in Montgomery form.

use crate::field::PrimeField;
use crate::repr::Repr;
use crate::traits::FieldElement;

/// An element of Fp tagged with a borrow of its field context. The stored
/// representation is `value * R mod m` and stays below the modulus.
pub struct Fp<'a, const N: usize> {
    pub(crate) field: &'a PrimeField<N>,
    pub(crate) repr: Repr<N>,
}

impl<'a, const N: usize> Clone for Fp<'a, N> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, const N: usize> Copy for Fp<'a, N> {}

impl<'a, const N: usize> PartialEq for Fp<'a, N> {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.repr == other.repr
    }
}

impl<'a, const N: usize> Eq for Fp<'a, N> {}

impl<'a, const N: usize> std::fmt::Debug for Fp<'a, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Fp({:?})", self.into_repr())
    }
}

impl<'a, const N: usize> Fp<'a, N> {
    #[inline]
    pub fn zero(field: &'a PrimeField<N>) -> Self {
        Self {
            field,
            repr: Repr::zero(),
        }
    }

    #[inline]
    pub fn one(field: &'a PrimeField<N>) -> Self {
        Self {
            field,
            repr: *field.mont_r(),
        }
    }

    /// Enter Montgomery form from an integer representation; `None` when the
    /// value is not below the modulus.
    pub fn from_repr(field: &'a PrimeField<N>, repr: Repr<N>) -> Option<Self> {
        if !field.is_valid_repr(&repr) {
            return None;
        }
        let mut element = Self { field, repr };
        let r2 = Self {
            field,
            repr: *field.mont_r2(),
        };
        element.mul_assign(&r2);
        Some(element)
    }

    /// Leave Montgomery form.
    pub fn into_repr(&self) -> Repr<N> {
        self.repr.into_normal(self.field.modulus(), self.field.mont_inv())
    }

    #[inline(always)]
    fn reduce(&mut self) {
        if !self.field.is_valid_repr(&self.repr) {
            self.repr.sub_noborrow(self.field.modulus());
        }
    }

    /// Two-phase Montgomery inversion ("The Montgomery Modular Inverse -
    /// Revisited"). Phase one runs the almost-inverse iteration, capped at
    /// 128*N steps; phase two divides out the excess power of two. The
    /// result re-enters Montgomery form through `from_repr`.
    fn mont_inverse(&self) -> Option<Self> {
        if self.is_zero() {
            return None;
        }

        // Phase 1
        let modulus = *self.field.modulus();
        let mut u = modulus;
        let mut v = self.repr;
        let mut r = Repr::<N>::zero();
        let mut s = Repr::<N>::one();
        let mut k = 0u64;

        let mut found = false;
        for _ in 0..(128 * N) {
            if v.is_zero() {
                found = true;
                break;
            }
            if u.is_even() {
                u.div2();
                s.mul2();
            } else if v.is_even() {
                v.div2();
                r.mul2();
            } else if u > v {
                u.sub_noborrow(&v);
                u.div2();
                r.add_nocarry(&s);
                s.mul2();
            } else {
                v.sub_noborrow(&u);
                v.div2();
                s.add_nocarry(&r);
                r.mul2();
            }

            k += 1;
        }

        if !found {
            return None;
        }

        if r >= modulus {
            r.sub_noborrow(&modulus);
        }

        let mut tmp = modulus;
        tmp.sub_noborrow(&r);
        r = tmp;

        // Phase 2
        let mont_power = self.field.mont_power();
        if k < mont_power {
            return None;
        }

        for _ in 0..(k - mont_power) {
            if r.is_even() {
                r.div2();
            } else {
                r.add_nocarry(&modulus);
                r.div2();
            }
        }

        Self::from_repr(self.field, r)
    }
}

impl<'a, const N: usize> FieldElement for Fp<'a, N> {
    #[inline]
    fn zero_like(&self) -> Self {
        Self::zero(self.field)
    }

    #[inline]
    fn one_like(&self) -> Self {
        Self::one(self.field)
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.repr.is_zero()
    }

    #[inline]
    fn add_assign(&mut self, other: &Self) {
        // Cannot overflow the backing array: both operands are reduced and
        // the modulus leaves a spare bit.
        self.repr.add_nocarry(&other.repr);
        self.reduce();
    }

    #[inline]
    fn sub_assign(&mut self, other: &Self) {
        if other.repr > self.repr {
            self.repr.add_nocarry(self.field.modulus());
        }
        self.repr.sub_noborrow(&other.repr);
    }

    #[inline]
    fn mul_assign(&mut self, other: &Self) {
        self.repr = self
            .repr
            .montgomery_mul(&other.repr, self.field.modulus(), self.field.mont_inv());
    }

    #[inline]
    fn square(&mut self) {
        self.repr = self
            .repr
            .montgomery_square(self.field.modulus(), self.field.mont_inv());
    }

    #[inline]
    fn double(&mut self) {
        self.repr.mul2();
        self.reduce();
    }

    #[inline]
    fn negate(&mut self) {
        if !self.is_zero() {
            let mut tmp = *self.field.modulus();
            tmp.sub_noborrow(&self.repr);
            self.repr = tmp;
        }
    }

    fn inverse(&self) -> Option<Self> {
        self.mont_inverse()
    }

    fn serialize_into(&self, mod_byte_len: usize, output: &mut Vec<u8>) {
        let normal = self.into_repr();
        for i in (0..mod_byte_len).rev() {
            let limb = i / 8;
            if limb < N {
                let off = (i - limb * 8) * 8;
                output.push((normal.0[limb] >> off) as u8);
            } else {
                output.push(0);
            }
        }
    }
}
