//! Shared ate-pairing engine for the MNT4 and MNT6 families. The Miller
//! loop runs over extended Jacobian coordinates (X, Y, Z, T = Z^2) on the
//! twist, collecting doubling and addition coefficients per G2 point; the
//! final exponentiation is split into a family-specific part one and a
//! shared part two driven by exp_w0/exp_w1.
//!
//! The two families differ only in the twist field (Fp2 vs Fp3), the target
//! field (Fp4 vs Fp6_2) and part one of the final exponentiation; both of
//! those live behind the `TargetField` seam.

use crate::extensions::fp2::Fp2;
use crate::extensions::fp3::Fp3;
use crate::extensions::fp4::Fp4;
use crate::extensions::fp6_2::Fp6_2;
use crate::fp::Fp;
use crate::scalar::RevBitIterator;
use crate::traits::FieldElement;
use crate::weierstrass::{CurvePoint, WeierstrassCurve};

/// The twist field of an MNT family: a tower level directly over Fp whose
/// first coordinate can hold an embedded base-field value.
pub trait TwistField<'a, const N: usize>: FieldElement {
    fn mul_by_fp(&mut self, fp: &Fp<'a, N>);
    fn set_c0(&mut self, fp: Fp<'a, N>);
}

impl<'a, const N: usize> TwistField<'a, N> for Fp2<'a, N> {
    #[inline]
    fn mul_by_fp(&mut self, fp: &Fp<'a, N>) {
        Fp2::mul_by_fp(self, fp);
    }

    #[inline]
    fn set_c0(&mut self, fp: Fp<'a, N>) {
        self.c0 = fp;
    }
}

impl<'a, const N: usize> TwistField<'a, N> for Fp3<'a, N> {
    #[inline]
    fn mul_by_fp(&mut self, fp: &Fp<'a, N>) {
        Fp3::mul_by_fp(self, fp);
    }

    #[inline]
    fn set_c0(&mut self, fp: Fp<'a, N>) {
        self.c0 = fp;
    }
}

/// The target field of an MNT family: quadratic over the twist field, with
/// the Frobenius, cyclotomic exponentiation and the family's part one of
/// the final exponentiation.
pub trait TargetField<'a, const N: usize>: FieldElement {
    type Twist: TwistField<'a, N>;

    /// Builds c0 + c1*w in the receiver's field.
    fn from_parts(&self, c0: Self::Twist, c1: Self::Twist) -> Self;

    fn frobenius_map(&mut self, power: usize);

    fn cyclotomic_exp(&self, exp: &[u64]) -> Self;

    fn final_exponentiation_part_one(elt: &Self, elt_inv: &Self) -> Self;
}

impl<'a, const N: usize> TargetField<'a, N> for Fp4<'a, N> {
    type Twist = Fp2<'a, N>;

    #[inline]
    fn from_parts(&self, c0: Fp2<'a, N>, c1: Fp2<'a, N>) -> Self {
        Fp4::new(c0, c1, self.extension)
    }

    #[inline]
    fn frobenius_map(&mut self, power: usize) {
        Fp4::frobenius_map(self, power);
    }

    #[inline]
    fn cyclotomic_exp(&self, exp: &[u64]) -> Self {
        Fp4::cyclotomic_exp(self, exp)
    }

    fn final_exponentiation_part_one(elt: &Self, elt_inv: &Self) -> Self {
        // elt^(q^2 - 1)
        let mut elt_q2_over_elt = *elt;
        elt_q2_over_elt.frobenius_map(2);
        elt_q2_over_elt.mul_assign(elt_inv);
        elt_q2_over_elt
    }
}

impl<'a, const N: usize> TargetField<'a, N> for Fp6_2<'a, N> {
    type Twist = Fp3<'a, N>;

    #[inline]
    fn from_parts(&self, c0: Fp3<'a, N>, c1: Fp3<'a, N>) -> Self {
        Fp6_2::new(c0, c1, self.extension)
    }

    #[inline]
    fn frobenius_map(&mut self, power: usize) {
        Fp6_2::frobenius_map(self, power);
    }

    #[inline]
    fn cyclotomic_exp(&self, exp: &[u64]) -> Self {
        Fp6_2::cyclotomic_exp(self, exp)
    }

    fn final_exponentiation_part_one(elt: &Self, elt_inv: &Self) -> Self {
        // elt^((q^3 - 1)(q + 1))
        let mut elt_q3_over_elt = *elt;
        elt_q3_over_elt.frobenius_map(3);
        elt_q3_over_elt.mul_assign(elt_inv);

        let mut alpha = elt_q3_over_elt;
        alpha.frobenius_map(1);
        alpha.mul_assign(&elt_q3_over_elt);
        alpha
    }
}

pub(crate) struct AteDoubleCoefficients<F> {
    pub c_h: F,
    pub c_4c: F,
    pub c_j: F,
    pub c_l: F,
}

pub(crate) struct AteAdditionCoefficients<F> {
    pub c_l1: F,
    pub c_rz: F,
}

struct ExtendedCoordinates<F> {
    x: F,
    y: F,
    z: F,
    t: F,
}

struct PrecomputedG1<'a, const N: usize, F> {
    x: Fp<'a, N>,
    y: Fp<'a, N>,
    x_by_twist: F,
    y_by_twist: F,
}

struct PrecomputedG2<F> {
    x_over_twist: F,
    y_over_twist: F,
    double_coefficients: Vec<AteDoubleCoefficients<F>>,
    addition_coefficients: Vec<AteAdditionCoefficients<F>>,
}

pub struct MntEngine<'a, const N: usize, F2: TargetField<'a, N>> {
    pub(crate) x: Vec<u64>,
    pub(crate) x_is_negative: bool,
    pub(crate) exp_w0: Vec<u64>,
    pub(crate) exp_w1: Vec<u64>,
    pub(crate) exp_w0_is_negative: bool,
    pub(crate) curve_twist: &'a WeierstrassCurve<F2::Twist>,
    pub(crate) twist: F2::Twist,
    pub(crate) target_one: F2,
}

impl<'a, const N: usize, F2: TargetField<'a, N>> MntEngine<'a, N, F2> {
    /// Product of pairings over all pairs. Pairs with a zero member
    /// contribute the identity. `None` when an intermediate value is not
    /// invertible.
    pub fn pair(
        &self,
        points: &[(CurvePoint<Fp<'a, N>>, CurvePoint<F2::Twist>)],
    ) -> Option<F2> {
        if points.is_empty() {
            return None;
        }
        let mut f = self.target_one;
        for (p, q) in points.iter() {
            if p.is_zero() || q.is_zero() {
                continue;
            }
            let contribution = self.ate_pairing_loop(p, q)?;
            f.mul_assign(&contribution);
        }
        self.final_exponentiation(&f)
    }

    fn precompute_g1(&self, g1_point: &CurvePoint<Fp<'a, N>>) -> PrecomputedG1<'a, N, F2::Twist> {
        let mut x_twist = self.twist;
        x_twist.mul_by_fp(&g1_point.x);

        let mut y_twist = self.twist;
        y_twist.mul_by_fp(&g1_point.y);

        PrecomputedG1 {
            x: g1_point.x,
            y: g1_point.y,
            x_by_twist: x_twist,
            y_by_twist: y_twist,
        }
    }

    fn precompute_g2(
        &self,
        g2_point: &CurvePoint<F2::Twist>,
        twist_inv: &F2::Twist,
    ) -> Option<PrecomputedG2<F2::Twist>> {
        let mut x_over_twist = g2_point.x;
        x_over_twist.mul_assign(twist_inv);

        let mut y_over_twist = g2_point.y;
        y_over_twist.mul_assign(twist_inv);

        let mut g2_p = PrecomputedG2 {
            x_over_twist,
            y_over_twist,
            double_coefficients: vec![],
            addition_coefficients: vec![],
        };

        let mut r = ExtendedCoordinates {
            x: g2_point.x,
            y: g2_point.y,
            z: g2_point.x.one_like(),
            t: g2_point.x.one_like(),
        };

        for bit in RevBitIterator::new(&self.x).skip_top_bit() {
            let coeff = self.doubling_step(&mut r);
            g2_p.double_coefficients.push(coeff);

            if bit {
                let coeff = self.addition_step(&g2_point.x, &g2_point.y, &mut r);
                g2_p.addition_coefficients.push(coeff);
            }
        }

        if self.x_is_negative {
            let rz_inv = r.z.inverse()?;
            let mut rz2_inv = rz_inv;
            rz2_inv.square();
            let mut rz3_inv = rz_inv;
            rz3_inv.mul_assign(&rz2_inv);

            let mut minus_r_affine_x = rz2_inv;
            minus_r_affine_x.mul_assign(&r.x);
            let mut minus_r_affine_y = rz3_inv;
            minus_r_affine_y.mul_assign(&r.y);
            minus_r_affine_y.negate();

            let coeff = self.addition_step(&minus_r_affine_x, &minus_r_affine_y, &mut r);
            g2_p.addition_coefficients.push(coeff);
        }

        Some(g2_p)
    }

    fn doubling_step(
        &self,
        r: &mut ExtendedCoordinates<F2::Twist>,
    ) -> AteDoubleCoefficients<F2::Twist> {
        let mut a = r.t;
        a.square();
        let mut b = r.x;
        b.square();
        let mut c = r.y;
        c.square();
        let mut d = c;
        d.square();

        let mut e = r.x;
        e.add_assign(&c);
        e.square();
        e.sub_assign(&b);
        e.sub_assign(&d);

        let mut f = *self.curve_twist.a();
        f.mul_assign(&a);
        f.add_assign(&b);
        f.add_assign(&b);
        f.add_assign(&b);

        let mut g = f;
        g.square();

        let mut d_eight = d;
        d_eight.double();
        d_eight.double();
        d_eight.double();

        let mut t0 = e;
        t0.double();
        t0.double();

        let mut x = g;
        x.sub_assign(&t0);

        let mut y = e;
        y.double();
        y.sub_assign(&x);
        y.mul_assign(&f);
        y.sub_assign(&d_eight);

        let mut h0 = r.z;
        h0.square();

        let mut z = r.y;
        z.add_assign(&r.z);
        z.square();
        z.sub_assign(&c);
        z.sub_assign(&h0);

        let mut t = z;
        t.square();

        let mut c_h = z;
        c_h.add_assign(&r.t);
        c_h.square();
        c_h.sub_assign(&t);
        c_h.sub_assign(&a);

        let mut c_4c = c;
        c_4c.double();
        c_4c.double();

        let mut c_j = f;
        c_j.add_assign(&r.t);
        c_j.square();
        c_j.sub_assign(&g);
        c_j.sub_assign(&a);

        let mut c_l = f;
        c_l.add_assign(&r.x);
        c_l.square();
        c_l.sub_assign(&g);
        c_l.sub_assign(&b);

        r.x = x;
        r.y = y;
        r.z = z;
        r.t = t;

        AteDoubleCoefficients { c_h, c_4c, c_j, c_l }
    }

    fn addition_step(
        &self,
        x: &F2::Twist,
        y: &F2::Twist,
        r: &mut ExtendedCoordinates<F2::Twist>,
    ) -> AteAdditionCoefficients<F2::Twist> {
        let mut a = *y;
        a.square();
        let mut b = r.t;
        b.mul_assign(x);

        let mut d = r.z;
        d.add_assign(y);
        d.square();
        d.sub_assign(&a);
        d.sub_assign(&r.t);
        d.mul_assign(&r.t);

        let mut h = b;
        h.sub_assign(&r.x);

        let mut i = h;
        i.square();

        let mut e = i;
        e.double();
        e.double();

        let mut j = h;
        j.mul_assign(&e);

        let mut v = r.x;
        v.mul_assign(&e);

        let mut l1 = d;
        l1.sub_assign(&r.y);
        l1.sub_assign(&r.y);

        let mut x0 = l1;
        x0.square();
        x0.sub_assign(&j);
        x0.sub_assign(&v);
        x0.sub_assign(&v);

        let mut t0 = r.y;
        t0.double();
        t0.mul_assign(&j);

        let mut y0 = v;
        y0.sub_assign(&x0);
        y0.mul_assign(&l1);
        y0.sub_assign(&t0);

        let mut z = r.z;
        z.add_assign(&h);
        z.square();
        z.sub_assign(&r.t);
        z.sub_assign(&i);

        let mut t = z;
        t.square();

        let coeff = AteAdditionCoefficients { c_l1: l1, c_rz: z };

        r.x = x0;
        r.y = y0;
        r.z = z;
        r.t = t;

        coeff
    }

    fn ate_pairing_loop(
        &self,
        point: &CurvePoint<Fp<'a, N>>,
        twist_point: &CurvePoint<F2::Twist>,
    ) -> Option<F2> {
        debug_assert!(point.is_normalized());
        debug_assert!(twist_point.is_normalized());

        let twist_inv = self.twist.inverse()?;

        let p = self.precompute_g1(point);
        let q = self.precompute_g2(twist_point, &twist_inv)?;
        let mut l1_coeff = self.twist.zero_like();
        l1_coeff.set_c0(p.x);
        l1_coeff.sub_assign(&q.x_over_twist);

        let mut f = self.target_one;

        let mut dbl_idx: usize = 0;
        let mut add_idx: usize = 0;

        for bit in RevBitIterator::new(&self.x).skip_top_bit() {
            let dc = &q.double_coefficients[dbl_idx];
            dbl_idx += 1;

            let mut t0 = dc.c_j;
            t0.mul_assign(&p.x_by_twist);
            t0.negate();
            t0.add_assign(&dc.c_l);
            t0.sub_assign(&dc.c_4c);

            let mut t1 = dc.c_h;
            t1.mul_assign(&p.y_by_twist);

            let g_rr_at_p = self.target_one.from_parts(t0, t1);

            f.square();
            f.mul_assign(&g_rr_at_p);

            if bit {
                let ac = &q.addition_coefficients[add_idx];
                add_idx += 1;

                let mut t0 = ac.c_rz;
                t0.mul_assign(&p.y_by_twist);

                let mut t = l1_coeff;
                t.mul_assign(&ac.c_l1);

                let mut t1 = q.y_over_twist;
                t1.mul_assign(&ac.c_rz);
                t1.add_assign(&t);
                t1.negate();

                let g_rq_at_p = self.target_one.from_parts(t0, t1);

                f.mul_assign(&g_rq_at_p);
            }
        }

        if self.x_is_negative {
            // one more addition against -R, then invert the loop output
            let ac = &q.addition_coefficients[add_idx];

            let mut t0 = ac.c_rz;
            t0.mul_assign(&p.y_by_twist);

            let mut t = l1_coeff;
            t.mul_assign(&ac.c_l1);

            let mut t1 = q.y_over_twist;
            t1.mul_assign(&ac.c_rz);
            t1.add_assign(&t);
            t1.negate();

            let g_rnegr_at_p = self.target_one.from_parts(t0, t1);

            f.mul_assign(&g_rnegr_at_p);
            f = f.inverse()?;
        }

        Some(f)
    }

    fn final_exponentiation(&self, f: &F2) -> Option<F2> {
        let value_inv = f.inverse()?;

        let value_to_first_chunk = F2::final_exponentiation_part_one(f, &value_inv);
        let value_inv_to_first_chunk = F2::final_exponentiation_part_one(&value_inv, f);

        Some(self.final_exponentiation_part_two(&value_to_first_chunk, &value_inv_to_first_chunk))
    }

    fn final_exponentiation_part_two(&self, elt: &F2, elt_inv: &F2) -> F2 {
        let mut elt_q = *elt;
        elt_q.frobenius_map(1);

        let mut w1_part = elt_q.cyclotomic_exp(&self.exp_w1);
        let w0_part = if self.exp_w0_is_negative {
            elt_inv.cyclotomic_exp(&self.exp_w0)
        } else {
            elt.cyclotomic_exp(&self.exp_w0)
        };
        w1_part.mul_assign(&w0_part);

        w1_part
    }
}
