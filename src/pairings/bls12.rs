//! BLS12 optimal ate pairing: Miller loop over the curve parameter u and
//! the final exponentiation of eprint 2016/130, Table 1.

use crate::constants::MAX_BLS12_X_HAMMING;
use crate::errors::ApiError;
use crate::extensions::fp2::Fp2;
use crate::extensions::fp12::{Extension2Over3Over2, Fp12};
use crate::fp::Fp;
use crate::pairings::b_engine::{BEngineParams, ThreePoint, TwistType};
use crate::scalar::{hamming_weight, RevBitIterator};
use crate::traits::FieldElement;
use crate::weierstrass::{CurvePoint, WeierstrassCurve};

pub struct Bls12Engine<'a, const N: usize> {
    params: BEngineParams<'a, N>,
}

impl<'a, const N: usize> Bls12Engine<'a, N> {
    pub fn new(
        u: Vec<u64>,
        u_is_negative: bool,
        twist_type: TwistType,
        curve_twist: &'a WeierstrassCurve<Fp2<'a, N>>,
    ) -> Result<Self, ApiError> {
        if hamming_weight(&u) > MAX_BLS12_X_HAMMING {
            return Err(ApiError::InvalidInput(
                "X has too large hamming weight".to_owned(),
            ));
        }
        Ok(Self {
            params: BEngineParams {
                u,
                u_is_negative,
                twist_type,
                curve_twist,
            },
        })
    }

    /// Product of pairings over all pairs; `None` for empty input or when
    /// the Miller output is not invertible.
    pub fn pair(
        &self,
        points: &[(CurvePoint<Fp<'a, N>>, CurvePoint<Fp2<'a, N>>)],
        context: &'a Extension2Over3Over2<'a, N>,
    ) -> Option<Fp12<'a, N>> {
        if points.is_empty() {
            return None;
        }
        let res = self.miller_loop(points, context);
        self.final_exponentiation(&res)
    }

    fn prepare(&self, twist_point: &CurvePoint<Fp2<'a, N>>, two_inv: &Fp<'a, N>) -> Vec<ThreePoint<'a, N>> {
        debug_assert!(twist_point.is_normalized());

        let mut ell_coeffs = vec![];

        if twist_point.is_zero() {
            return ell_coeffs;
        }

        let mut r = CurvePoint::from_xy(twist_point.x, twist_point.y);

        for bit in RevBitIterator::new(&self.params.u).skip_top_bit() {
            ell_coeffs.push(self.params.doubling_step(&mut r, two_inv));

            if bit {
                ell_coeffs.push(self.params.addition_step(&mut r, twist_point));
            }
        }

        ell_coeffs
    }

    fn miller_loop(
        &self,
        points: &[(CurvePoint<Fp<'a, N>>, CurvePoint<Fp2<'a, N>>)],
        context: &'a Extension2Over3Over2<'a, N>,
    ) -> Fp12<'a, N> {
        let mut two_inv = Fp::one(context.extension6.extension2.field);
        two_inv.double();
        // 2 is invertible: the modulus is odd and at least 3
        let two_inv = two_inv.inverse().expect("2 is non-zero in an odd field");

        let mut g1_references = vec![];
        let mut prepared_coeffs = vec![];

        for (p, q) in points.iter() {
            if !p.is_zero() && !q.is_zero() {
                let coeffs = self.prepare(q, &two_inv);
                prepared_coeffs.push(coeffs);
                g1_references.push(*p);
            }
        }

        let n = prepared_coeffs.len();
        let mut pc_indexes = vec![0usize; n];

        let mut f = Fp12::one(context);
        for bit in RevBitIterator::new(&self.params.u).skip_top_bit() {
            f.square();

            self.params
                .for_ell(&mut f, &g1_references, &prepared_coeffs, &mut pc_indexes);

            if bit {
                self.params
                    .for_ell(&mut f, &g1_references, &prepared_coeffs, &mut pc_indexes);
            }
        }

        if self.params.u_is_negative {
            f.conjugate();
        }

        f
    }

    fn final_exponentiation(&self, f: &Fp12<'a, N>) -> Option<Fp12<'a, N>> {
        // Easy part: f^((p^6 - 1)(p^2 + 1))
        let mut f1 = *f;
        f1.frobenius_map(6);

        let f2 = f.inverse()?;

        let mut r = f1;
        r.mul_assign(&f2);

        let f2 = r;
        r.frobenius_map(2);
        r.mul_assign(&f2);

        // Hard part, the addition chain of eprint 2016/130 Table 1. Works
        // for odd u where the "faster" variant does not.
        let mut y0 = r;
        y0.cyclotomic_square();
        y0.conjugate();

        let mut y5 = r;
        self.params.exp_by_x(&mut y5);

        let mut y1 = y5;
        y1.cyclotomic_square();

        let mut y3 = y0;
        y3.mul_assign(&y5);

        let mut e0 = y3;
        self.params.exp_by_x(&mut e0);

        let mut y2 = e0;
        self.params.exp_by_x(&mut y2);

        let mut y4 = y2;
        self.params.exp_by_x(&mut y4);
        y4.mul_assign(&y1);

        let mut e1 = y4;
        self.params.exp_by_x(&mut e1);

        y3.conjugate();
        e1.mul_assign(&y3);
        e1.mul_assign(&r);

        let mut e3 = r;
        e3.conjugate();
        e0.mul_assign(&r);
        e0.frobenius_map(3);

        y4.mul_assign(&e3);
        y4.frobenius_map(1);

        y5.mul_assign(&y2);
        y5.frobenius_map(2);

        y5.mul_assign(&e0);
        y5.mul_assign(&y4);
        y5.mul_assign(&e1);

        Some(y5)
    }
}
