//! Machinery shared by the BN and BLS12 engines: projective doubling and
//! addition steps in the ZEXE form (twist curves with a = 0), line
//! evaluation against G1 coordinates, and exponentiation by the loop
//! parameter.

use crate::extensions::fp2::Fp2;
use crate::extensions::fp12::Fp12;
use crate::fp::Fp;
use crate::traits::FieldElement;
use crate::weierstrass::{CurvePoint, WeierstrassCurve};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TwistType {
    D,
    M,
}

/// One line evaluation: three Fp2 coefficients whose meaning depends on the
/// twist type.
pub(crate) type ThreePoint<'a, const N: usize> = (Fp2<'a, N>, Fp2<'a, N>, Fp2<'a, N>);

pub(crate) struct BEngineParams<'a, const N: usize> {
    pub u: Vec<u64>,
    pub u_is_negative: bool,
    pub twist_type: TwistType,
    pub curve_twist: &'a WeierstrassCurve<Fp2<'a, N>>,
}

impl<'a, const N: usize> BEngineParams<'a, N> {
    /// Projective doubling of R, returning the line coefficients. The twist
    /// curve has a = 0, so the tangent line comes out of b alone.
    pub(crate) fn doubling_step(
        &self,
        r: &mut CurvePoint<Fp2<'a, N>>,
        two_inv: &Fp<'a, N>,
    ) -> ThreePoint<'a, N> {
        // X*Y/2
        let mut a = r.x;
        a.mul_assign(&r.y);
        a.mul_by_fp(two_inv);

        // Y^2
        let mut b = r.y;
        b.square();

        // Z^2
        let mut c = r.z;
        c.square();

        let mut e = *self.curve_twist.b();

        // 3*Z^2
        let mut t0 = c;
        t0.double();
        t0.add_assign(&c);

        // 3*b*Z^2
        e.mul_assign(&t0);

        // 9*b*Z^2
        let mut f = e;
        f.double();
        f.add_assign(&e);

        // (Y^2 + 9*b*Z^2)/2
        let mut g = b;
        g.add_assign(&f);
        g.mul_by_fp(two_inv);

        // 2*Y*Z = (Y + Z)^2 - (Y^2 + Z^2)
        let mut h = r.y;
        h.add_assign(&r.z);
        h.square();
        let mut t1 = b;
        t1.add_assign(&c);
        h.sub_assign(&t1);

        // 3*b*Z^2 - Y^2
        let mut i = e;
        i.sub_assign(&b);

        // X^2
        let mut j = r.x;
        j.square();

        // (3*b*Z^2)^2
        let mut e_square = e;
        e_square.square();

        // X = (Y^2 - 9*b*Z^2)*X*Y/2
        r.x = b;
        r.x.sub_assign(&f);
        r.x.mul_assign(&a);

        // 27*b^2*Z^4
        let mut e_square_by_3 = e_square;
        e_square_by_3.double();
        e_square_by_3.add_assign(&e_square);

        // Y = ((Y^2 + 9*b*Z^2)/2)^2 - 27*b^2*Z^4
        r.y = g;
        r.y.square();
        r.y.sub_assign(&e_square_by_3);

        // Z = 2*Y^3*Z
        r.z = b;
        r.z.mul_assign(&h);

        // 3*X^2
        let mut j_by_three = j;
        j_by_three.double();
        j_by_three.add_assign(&j);

        // -2*Y*Z
        h.negate();

        match self.twist_type {
            TwistType::M => (i, j_by_three, h),
            TwistType::D => (h, j_by_three, i),
        }
    }

    /// Mixed addition of an affine Q into projective R, returning the line
    /// coefficients.
    pub(crate) fn addition_step(
        &self,
        r: &mut CurvePoint<Fp2<'a, N>>,
        q: &CurvePoint<Fp2<'a, N>>,
    ) -> ThreePoint<'a, N> {
        debug_assert!(q.is_normalized());

        // theta = Y - y*Z
        let mut theta = q.y;
        theta.mul_assign(&r.z);
        theta.negate();
        theta.add_assign(&r.y);

        // lambda = X - x*Z
        let mut lambda = q.x;
        lambda.mul_assign(&r.z);
        lambda.negate();
        lambda.add_assign(&r.x);

        // theta^2
        let mut c = theta;
        c.square();

        // lambda^2
        let mut d = lambda;
        d.square();

        // lambda^3
        let mut e = lambda;
        e.mul_assign(&d);

        // theta^2 * Z
        let mut f = r.z;
        f.mul_assign(&c);

        // lambda^2 * X
        let mut g = r.x;
        g.mul_assign(&d);

        // lambda^3 + theta^2*Z - 2*lambda^2*X
        let mut h = g;
        h.double();
        h.negate();
        h.add_assign(&e);
        h.add_assign(&f);

        r.x = lambda;
        r.x.mul_assign(&h);

        // (lambda^2*X - H)*theta
        let mut t0 = g;
        t0.sub_assign(&h);
        t0.mul_assign(&theta);

        // Y = (lambda^2*X - H)*theta - lambda^3*Y
        r.y.mul_assign(&e);
        r.y.negate();
        r.y.add_assign(&t0);

        // Z = lambda^3 * Z
        r.z.mul_assign(&e);

        // theta*x - lambda*y
        let mut t1 = lambda;
        t1.mul_assign(&q.y);
        let mut j = theta;
        j.mul_assign(&q.x);
        j.sub_assign(&t1);

        theta.negate();

        match self.twist_type {
            TwistType::M => (j, theta, lambda),
            TwistType::D => (lambda, theta, j),
        }
    }

    /// Applies one prepared line to the accumulator, scaling the open
    /// coefficients by the G1 coordinates.
    pub(crate) fn ell(
        &self,
        f: &mut Fp12<'a, N>,
        coeffs: &ThreePoint<'a, N>,
        p: &CurvePoint<Fp<'a, N>>,
    ) {
        debug_assert!(p.is_normalized());
        let mut c0 = coeffs.0;
        let mut c1 = coeffs.1;
        let mut c2 = coeffs.2;

        match self.twist_type {
            TwistType::M => {
                c2.mul_by_fp(&p.y);
                c1.mul_by_fp(&p.x);
                f.mul_by_014(&c0, &c1, &c2);
            }
            TwistType::D => {
                c0.mul_by_fp(&p.y);
                c1.mul_by_fp(&p.x);
                f.mul_by_034(&c0, &c1, &c2);
            }
        }
    }

    /// Applies the next prepared line of every active pair.
    pub(crate) fn for_ell(
        &self,
        f: &mut Fp12<'a, N>,
        g1_references: &[CurvePoint<Fp<'a, N>>],
        prepared_coeffs: &[Vec<ThreePoint<'a, N>>],
        pc_indexes: &mut [usize],
    ) {
        for (j, p) in g1_references.iter().enumerate() {
            let coeffs = &prepared_coeffs[j][pc_indexes[j]];
            pc_indexes[j] += 1;
            self.ell(f, coeffs, p);
        }
    }

    /// f^u in the cyclotomic subgroup, conjugated when u is negative.
    pub(crate) fn exp_by_x(&self, f: &mut Fp12<'a, N>) {
        *f = f.cyclotomic_exp(&self.u);
        if self.u_is_negative {
            f.conjugate();
        }
    }
}
