//! Pippenger windowed-bucket multi-exponentiation.

use crate::scalar::{num_bits, right_shift};
use crate::traits::FieldElement;
use crate::weierstrass::{CurvePoint, WeierstrassCurve};

/// Computes the sum of s_i * P_i over all pairs. Scalars are consumed: the
/// outer loop shifts them in place window by window.
///
/// The window width is 3 below 32 pairs, otherwise the natural log of the
/// pair count rounded up; buckets cover one window of every scalar per
/// outer iteration and collapse through the reverse running-sum fold.
pub fn peepinger<E: FieldElement>(
    pairs: Vec<(CurvePoint<E>, Vec<u64>)>,
    curve: &WeierstrassCurve<E>,
) -> CurvePoint<E> {
    let c: u32 = if pairs.len() < 32 {
        3
    } else {
        (pairs.len() as f64).ln().ceil() as u32
    };

    let mut pairs = pairs;
    let zero_point = CurvePoint::zero(&curve.b().zero_like());

    let mask = (1u64 << c) - 1;
    let mut cur = 0u32;
    let n_bits = num_bits(curve.subgroup_order());

    let mut windows: Vec<CurvePoint<E>> = vec![];
    let mut buckets: Vec<CurvePoint<E>> = vec![];

    while cur <= n_bits {
        let mut acc = zero_point;

        buckets.clear();
        buckets.resize((1 << c) - 1, zero_point);

        for (g, s) in pairs.iter_mut() {
            let index = (s[0] & mask) as usize;
            if index != 0 {
                buckets[index - 1].add_assign_mixed(g, curve);
            }
            right_shift(s, c as u64);
        }

        let mut running_sum = zero_point;
        for bucket in buckets.iter().rev() {
            running_sum.add_assign(bucket, curve);
            acc.add_assign(&running_sum, curve);
        }

        windows.push(acc);

        cur += c;
    }

    let mut acc = zero_point;
    for window in windows.iter().rev() {
        for _ in 0..c {
            acc.mul2(curve);
        }
        acc.add_assign(window, curve);
    }

    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{biguint_to_limbs, PrimeField};
    use crate::fp::Fp;
    use crate::repr::Repr;
    use num_bigint::BigUint;
    use num_traits::Num;

    fn bn254_setup() -> PrimeField<4> {
        let m = BigUint::from_str_radix(
            "21888242871839275222246405745257275088696311157297823662689037894645226208583",
            10,
        )
        .unwrap();
        PrimeField::new(Repr::from_biguint(&m))
    }

    fn order_limbs() -> Vec<u64> {
        let r = BigUint::from_str_radix(
            "21888242871839275222246405745257275088548364400416034343698204186575808495617",
            10,
        )
        .unwrap();
        biguint_to_limbs(&r)
    }

    #[test]
    fn matches_naive_sum() {
        let field = bn254_setup();
        let a = Fp::zero(&field);
        let b = Fp::from_repr(&field, Repr::from_u64(3)).unwrap();
        let curve = WeierstrassCurve::new(a, b, order_limbs(), 32);

        let g = CurvePoint::from_xy(
            Fp::from_repr(&field, Repr::from_u64(1)).unwrap(),
            Fp::from_repr(&field, Repr::from_u64(2)).unwrap(),
        );

        let order_len = order_limbs().len();
        let scalars: Vec<u64> = vec![1, 2, 3, 1000, 98765, 4294967297];
        let mut pairs = vec![];
        let mut expected = CurvePoint::zero(&g.x);
        for s in scalars.iter() {
            let point = g.mul(&[*s % 7 + 1], &curve);
            let mut scalar = vec![0u64; order_len];
            scalar[0] = *s;
            expected.add_assign(&point.mul(&[*s], &curve), &curve);
            pairs.push((point, scalar));
        }

        let result = peepinger(pairs, &curve);
        assert_eq!(result, expected);
    }

    #[test]
    fn single_pair_equals_mul() {
        let field = bn254_setup();
        let a = Fp::zero(&field);
        let b = Fp::from_repr(&field, Repr::from_u64(3)).unwrap();
        let curve = WeierstrassCurve::new(a, b, order_limbs(), 32);

        let g = CurvePoint::from_xy(
            Fp::from_repr(&field, Repr::from_u64(1)).unwrap(),
            Fp::from_repr(&field, Repr::from_u64(2)).unwrap(),
        );

        let mut scalar = vec![0u64; order_limbs().len()];
        scalar[0] = 123456789;
        let result = peepinger(vec![(g, scalar)], &curve);
        assert_eq!(result, g.mul(&[123456789], &curve));
    }
}
