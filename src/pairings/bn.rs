//! BN optimal ate pairing: Miller loop over |6u + 2| with the two
//! Frobenius-twisted correction steps, and the fused final exponentiation
//! of eprint 2012/232.

use num_bigint::BigUint;
use num_traits::One;

use crate::constants::MAX_BN_SIX_U_PLUS_TWO_HAMMING;
use crate::errors::ApiError;
use crate::extensions::fp2::Fp2;
use crate::extensions::fp12::{Extension2Over3Over2, Fp12};
use crate::field::biguint_to_limbs;
use crate::fp::Fp;
use crate::pairings::b_engine::{BEngineParams, ThreePoint, TwistType};
use crate::scalar::{add_scalar, hamming_weight, mul_scalar, RevBitIterator};
use crate::traits::FieldElement;
use crate::weierstrass::{CurvePoint, WeierstrassCurve};

pub struct BnEngine<'a, const N: usize> {
    params: BEngineParams<'a, N>,
    six_u_plus_2: Vec<u64>,
    non_residue_in_p_minus_one_over_2: Fp2<'a, N>,
}

impl<'a, const N: usize> BnEngine<'a, N> {
    pub fn new(
        u: Vec<u64>,
        u_is_negative: bool,
        twist_type: TwistType,
        curve_twist: &'a WeierstrassCurve<Fp2<'a, N>>,
        non_residue: &Fp2<'a, N>,
    ) -> Result<Self, ApiError> {
        let mut six_u_plus_2 = u.clone();
        mul_scalar(&mut six_u_plus_2, 6);
        add_scalar(&mut six_u_plus_2, 2);
        if hamming_weight(&six_u_plus_2) > MAX_BN_SIX_U_PLUS_TWO_HAMMING {
            return Err(ApiError::InvalidInput(
                "6*U + 2 has too large hamming weight".to_owned(),
            ));
        }

        let modulus = non_residue.extension.field.modulus_biguint();
        let p_minus_one_over_2 = (modulus - BigUint::one()) >> 1;
        let non_residue_in_p_minus_one_over_2 =
            non_residue.pow(&biguint_to_limbs(&p_minus_one_over_2));

        Ok(Self {
            params: BEngineParams {
                u,
                u_is_negative,
                twist_type,
                curve_twist,
            },
            six_u_plus_2,
            non_residue_in_p_minus_one_over_2,
        })
    }

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

    fn prepare(
        &self,
        twist_point: &CurvePoint<Fp2<'a, N>>,
        two_inv: &Fp<'a, N>,
        context: &'a Extension2Over3Over2<'a, N>,
    ) -> Vec<ThreePoint<'a, N>> {
        debug_assert!(twist_point.is_normalized());

        let mut ell_coeffs = vec![];

        if twist_point.is_zero() {
            return ell_coeffs;
        }

        let mut r = CurvePoint::from_xy(twist_point.x, twist_point.y);

        for bit in RevBitIterator::new(&self.six_u_plus_2).skip_top_bit() {
            ell_coeffs.push(self.params.doubling_step(&mut r, two_inv));

            if bit {
                ell_coeffs.push(self.params.addition_step(&mut r, twist_point));
            }
        }

        if self.params.u_is_negative {
            r.negate();
        }

        // Q1 = Frobenius(Q): conjugate each coordinate and scale by the
        // Frobenius coefficients of the 3-over-2 layer
        let fp6_coeffs = &context.extension6.frobenius_coeffs_c1;

        let mut q = *twist_point;
        q.x.c1.negate();
        q.x.mul_assign(&fp6_coeffs[1]);
        q.y.c1.negate();
        q.y.mul_assign(&self.non_residue_in_p_minus_one_over_2);

        ell_coeffs.push(self.params.addition_step(&mut r, &q));

        // -Q2 = -Frobenius^2(Q); the y coordinate stays
        let mut minusq2 = *twist_point;
        minusq2.x.mul_assign(&fp6_coeffs[2]);

        ell_coeffs.push(self.params.addition_step(&mut r, &minusq2));

        ell_coeffs
    }

    fn miller_loop(
        &self,
        points: &[(CurvePoint<Fp<'a, N>>, CurvePoint<Fp2<'a, N>>)],
        context: &'a Extension2Over3Over2<'a, N>,
    ) -> Fp12<'a, N> {
        let mut two_inv = Fp::one(context.extension6.extension2.field);
        two_inv.double();
        let two_inv = two_inv.inverse().expect("2 is non-zero in an odd field");

        let mut g1_references = vec![];
        let mut prepared_coeffs = vec![];

        for (p, q) in points.iter() {
            if !p.is_zero() && !q.is_zero() {
                let coeffs = self.prepare(q, &two_inv, context);
                prepared_coeffs.push(coeffs);
                g1_references.push(*p);
            }
        }

        let n = prepared_coeffs.len();
        let mut pc_indexes = vec![0usize; n];

        let mut f = Fp12::one(context);
        for bit in RevBitIterator::new(&self.six_u_plus_2).skip_top_bit() {
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

        // the two correction lines at Q1 and -Q2
        self.params
            .for_ell(&mut f, &g1_references, &prepared_coeffs, &mut pc_indexes);
        self.params
            .for_ell(&mut f, &g1_references, &prepared_coeffs, &mut pc_indexes);

        debug_assert!(pc_indexes
            .iter()
            .enumerate()
            .all(|(j, idx)| *idx == prepared_coeffs[j].len()));

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

        // Hard part, Zexe/pairing-crate fused chain (eprint 2012/232)
        let mut fp = r;
        fp.frobenius_map(1);

        let mut fp2 = r;
        fp2.frobenius_map(2);
        let mut fp3 = fp2;
        fp3.frobenius_map(1);

        let mut fu = r;
        self.params.exp_by_x(&mut fu);

        let mut fu2 = fu;
        self.params.exp_by_x(&mut fu2);

        let mut fu3 = fu2;
        self.params.exp_by_x(&mut fu3);

        let mut y3 = fu;
        y3.frobenius_map(1);

        let mut fu2p = fu2;
        fu2p.frobenius_map(1);

        let mut fu3p = fu3;
        fu3p.frobenius_map(1);

        let mut y2 = fu2;
        y2.frobenius_map(2);

        let mut y0 = fp;
        y0.mul_assign(&fp2);
        y0.mul_assign(&fp3);

        let mut y1 = r;
        y1.conjugate();

        let mut y5 = fu2;
        y5.conjugate();

        y3.conjugate();

        let mut y4 = fu;
        y4.mul_assign(&fu2p);
        y4.conjugate();

        let mut y6 = fu3;
        y6.mul_assign(&fu3p);
        y6.conjugate();

        y6.square();
        y6.mul_assign(&y4);
        y6.mul_assign(&y5);

        let mut t1 = y3;
        t1.mul_assign(&y5);
        t1.mul_assign(&y6);

        y6.mul_assign(&y2);

        t1.square();
        t1.mul_assign(&y6);
        t1.square();

        let mut t0 = t1;
        t0.mul_assign(&y1);

        t1.mul_assign(&y0);

        t0.square();
        t0.mul_assign(&t1);

        Some(t0)
    }
}
