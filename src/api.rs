//! Public entry point: decodes the operation header, picks the monomorphic
//! limb width, and routes to the requested operation.
//!
//! Execution path goes run -> run_limbed -> run_operation and from there to
//! the group operation over the right extension or to one of the four
//! pairing engines. Errors from any depth surface as `ApiError`.

use log::debug;

use crate::constants::*;
use crate::decode::*;
use crate::errors::ApiError;
use crate::extensions::fp2::{Extension2, Fp2};
use crate::extensions::fp3::Extension3;
use crate::extensions::fp4::{Extension2Over2, Fp4};
use crate::extensions::fp6_2::{Extension2Over3, Fp6_2};
use crate::extensions::fp6_3::Extension3Over2;
use crate::extensions::fp12::{Extension2Over3Over2, Fp12};
use crate::extensions::frobenius::WindowExpBase;
use crate::field::PrimeField;
use crate::fp::Fp;
use crate::multiexp::peepinger;
use crate::pairings::{Bls12Engine, BnEngine, MntEngine, TwistType};
use crate::scalar::hamming_weight;
use crate::traits::FieldElement;
use crate::weierstrass::WeierstrassCurve;

/// Executes one ABI call. Pure function of the input bytes: returns the
/// serialized result or the error describing the failure. No partial
/// results are ever produced.
pub fn run(input: &[u8]) -> Result<Vec<u8>, ApiError> {
    let mut deserializer = Deserializer::new(input);
    let operation = deserializer.byte("Input should be longer than operation type encoding")?;

    let curve_type = match operation {
        OPERATION_PAIRING => Some(decode_pairing_curve_type(&mut deserializer)?),
        OPERATION_G1_ADD | OPERATION_G1_MUL | OPERATION_G1_MULTIEXP | OPERATION_G2_ADD
        | OPERATION_G2_MUL | OPERATION_G2_MULTIEXP => None,
        _ => return Err(ApiError::InvalidInput("Unknown operation type".to_owned())),
    };

    run_limbed(operation, curve_type, &mut deserializer)
}

/// Selects the limb count from the modulus length and the top-byte
/// overflow, then dispatches to the monomorphic implementation.
fn run_limbed(
    operation: u8,
    curve_type: Option<u8>,
    deserializer: &mut Deserializer,
) -> Result<Vec<u8>, ApiError> {
    let mod_byte_len =
        deserializer.byte("Input is not long enough to get modulus length")? as usize;
    let mod_top_byte = deserializer.peek_byte("Input is not long enough to get modulus")?;
    if mod_top_byte == 0 {
        return Err(ApiError::InvalidInput("Invalid modulus encoding".to_owned()));
    }
    let limb_count = (mod_byte_len + 7) / 8 + (mod_top_byte >> 7) as usize;

    debug!(
        "operation {} over {} modulus bytes, {} limbs",
        operation, mod_byte_len, limb_count
    );

    macro_rules! with_limbs {
        ($n:literal) => {
            run_operation::<$n>(operation, curve_type, mod_byte_len, deserializer)
        };
    }

    match limb_count {
        0 => Err(ApiError::UnexpectedZero("Modulus length is zero".to_owned())),
        1..=4 => with_limbs!(4),
        5 => with_limbs!(5),
        6 => with_limbs!(6),
        7 => with_limbs!(7),
        8 => with_limbs!(8),
        9 => with_limbs!(9),
        10 => with_limbs!(10),
        11 => with_limbs!(11),
        12 => with_limbs!(12),
        13 => with_limbs!(13),
        14 => with_limbs!(14),
        15 => with_limbs!(15),
        16 => with_limbs!(16),
        _ => Err(ApiError::Unimplemented(format!(
            "operations are not supported for {} modulus limbs",
            limb_count
        ))),
    }
}

fn run_operation<'i, const N: usize>(
    operation: u8,
    curve_type: Option<u8>,
    mod_byte_len: usize,
    deserializer: &mut Deserializer<'i>,
) -> Result<Vec<u8>, ApiError> {
    let modulus = decode_modulus::<N>(mod_byte_len, deserializer)?;
    let field = PrimeField::new(modulus);

    if let Some(curve_type) = curve_type {
        return match curve_type {
            CURVE_TYPE_BLS12 | CURVE_TYPE_BN => {
                run_pairing_b::<N>(curve_type, mod_byte_len, &field, deserializer)
            }
            CURVE_TYPE_MNT4 => run_pairing_mnt4::<N>(mod_byte_len, &field, deserializer),
            CURVE_TYPE_MNT6 => run_pairing_mnt6::<N>(mod_byte_len, &field, deserializer),
            _ => Err(ApiError::InvalidInput("Unknown curve type".to_owned())),
        };
    }

    // non-pairing operations carry an extension degree byte for G2
    let mut extension_degree = 1usize;
    if matches!(
        operation,
        OPERATION_G2_ADD | OPERATION_G2_MUL | OPERATION_G2_MULTIEXP
    ) {
        let decoded = deserializer.byte("Input is not long enough to get extension degree")?;
        if decoded != EXTENSION_DEGREE_2 && decoded != EXTENSION_DEGREE_3 {
            return Err(ApiError::InvalidInput("Invalid extension degree".to_owned()));
        }
        extension_degree = decoded as usize;
    }

    match extension_degree {
        1 => {
            let decode_element =
                |deserializer: &mut Deserializer<'i>| decode_fp(deserializer, mod_byte_len, &field);
            run_operation_extension(operation, mod_byte_len, 1, &decode_element, deserializer)
        }
        2 => {
            let non_residue = decode_fp(deserializer, mod_byte_len, &field)?;
            validate_non_residue(&non_residue, 2, &field.modulus_biguint(), "Fp2")?;
            let extension = Extension2::new(non_residue)?;

            let decode_element = |deserializer: &mut Deserializer<'i>| {
                decode_fp2(deserializer, mod_byte_len, &extension)
            };
            run_operation_extension(operation, mod_byte_len, 2, &decode_element, deserializer)
        }
        3 => {
            let non_residue = decode_fp(deserializer, mod_byte_len, &field)?;
            validate_non_residue(&non_residue, 3, &field.modulus_biguint(), "Fp3")?;
            let extension = Extension3::new(non_residue)?;

            let decode_element = |deserializer: &mut Deserializer<'i>| {
                decode_fp3(deserializer, mod_byte_len, &extension)
            };
            run_operation_extension(operation, mod_byte_len, 3, &decode_element, deserializer)
        }
        _ => unreachable!("extension degree is validated above"),
    }
}

/// Group operations (add, mul, multiexp) over any of the three supported
/// base structures.
fn run_operation_extension<'i, F, D>(
    operation: u8,
    mod_byte_len: usize,
    extension_degree: usize,
    decode_element: &D,
    deserializer: &mut Deserializer<'i>,
) -> Result<Vec<u8>, ApiError>
where
    F: FieldElement,
    D: Fn(&mut Deserializer<'i>) -> Result<F, ApiError>,
{
    let a = decode_element(deserializer)?;
    let b = decode_element(deserializer)?;
    if b.is_zero() {
        return Err(ApiError::ShapeUnsupported(
            "B parameter can not be zero".to_owned(),
        ));
    }
    let (order, order_len) = decode_group_order(deserializer)?;
    let curve = WeierstrassCurve::new(a, b, order, order_len);

    let mut result = vec![];
    match operation {
        OPERATION_G1_ADD | OPERATION_G2_ADD => {
            let mut p_0 = decode_point(deserializer, decode_element, &curve)?;
            let p_1 = decode_point(deserializer, decode_element, &curve)?;
            expect_consumed(deserializer)?;

            p_0.add_assign(&p_1, &curve);
            p_0.serialize_into(mod_byte_len, &mut result);
        }
        OPERATION_G1_MUL | OPERATION_G2_MUL => {
            let p_0 = decode_point(deserializer, decode_element, &curve)?;
            let scalar = decode_scalar(deserializer, &curve)?;
            expect_consumed(deserializer)?;

            let r = p_0.mul(&scalar, &curve);
            r.serialize_into(mod_byte_len, &mut result);
        }
        OPERATION_G1_MULTIEXP | OPERATION_G2_MULTIEXP => {
            let num_pairs =
                deserializer.byte("Input is not long enough to get number of pairs")?;
            if num_pairs == 0 {
                return Err(ApiError::InvalidInput("Invalid number of pairs".to_owned()));
            }

            let expected_pair_len = 2 * extension_degree * mod_byte_len + order_len;
            if deserializer.remaining() != num_pairs as usize * expected_pair_len {
                return Err(ApiError::InvalidInput(
                    "Input length is invalid for number of pairs".to_owned(),
                ));
            }

            let mut pairs = Vec::with_capacity(num_pairs as usize);
            for _ in 0..num_pairs {
                let p = decode_point(deserializer, decode_element, &curve)?;
                let scalar = decode_scalar(deserializer, &curve)?;
                pairs.push((p, scalar));
            }

            let r = peepinger(pairs, &curve);
            r.serialize_into(mod_byte_len, &mut result);
        }
        _ => {
            return Err(ApiError::Unimplemented(format!(
                "operation {} is not implemented",
                operation
            )))
        }
    }

    Ok(result)
}

/// BLS12 and BN pairings share everything up to engine construction.
fn run_pairing_b<'i, const N: usize>(
    curve_type: u8,
    mod_byte_len: usize,
    field: &PrimeField<N>,
    deserializer: &mut Deserializer<'i>,
) -> Result<Vec<u8>, ApiError> {
    // G1 curve; these families require a = 0
    let a = decode_fp(deserializer, mod_byte_len, field)?;
    let b = decode_fp(deserializer, mod_byte_len, field)?;
    if !a.is_zero() {
        return Err(ApiError::UnknownParameter("A parameter must be zero".to_owned()));
    }
    let (order, order_len) = decode_group_order(deserializer)?;
    let g1_curve = WeierstrassCurve::new(a, b, order.clone(), order_len);

    // quadratic extension
    let fp2_non_residue = decode_fp(deserializer, mod_byte_len, field)?;
    validate_non_residue(&fp2_non_residue, 2, &field.modulus_biguint(), "Fp2")?;
    let extension2 = Extension2::new(fp2_non_residue)?;

    // sextic twist non-residue lives in Fp2
    let e6_non_residue = decode_fp2(deserializer, mod_byte_len, &extension2)?;
    validate_non_residue(&e6_non_residue, 6, &extension2.field_order(), "Fp6")?;

    let twist_type = decode_twist_type(deserializer)?;

    // window base over the non-residue feeds every Frobenius table above
    let exp_base = WindowExpBase::new(&e6_non_residue, 8);
    let extension6 = Extension3Over2::new(e6_non_residue, &extension2, &exp_base)?;
    let extension12 = Extension2Over3Over2::new(&extension6, &exp_base)?;

    // twist curve: b' = b*xi (M) or b/xi (D), a' = 0
    let e6_non_residue_inv = e6_non_residue.inverse().ok_or_else(|| {
        ApiError::UnexpectedZero("Fp2 non-residue must be invertible".to_owned())
    })?;
    let mut b_fp2 = match twist_type {
        TwistType::D => e6_non_residue_inv,
        TwistType::M => e6_non_residue,
    };
    b_fp2.mul_by_fp(g1_curve.b());
    let a_fp2 = Fp2::zero(&extension2);
    let g2_curve = WeierstrassCurve::new(a_fp2, b_fp2, order, order_len);

    let max_u_bit_length = if curve_type == CURVE_TYPE_BLS12 {
        MAX_BLS12_X_BIT_LENGTH
    } else {
        MAX_BN_U_BIT_LENGTH
    };
    let u = decode_scalar_with_bit_limit(max_u_bit_length, deserializer)?;
    let u_is_negative = decode_sign(deserializer)?;

    let decode_twist_element = |deserializer: &mut Deserializer<'i>| {
        decode_fp2(deserializer, mod_byte_len, &extension2)
    };
    let points = decode_pairs(
        deserializer,
        mod_byte_len,
        field,
        &decode_twist_element,
        &g1_curve,
        &g2_curve,
    )?;
    expect_consumed(deserializer)?;

    let pairing_result = match curve_type {
        CURVE_TYPE_BLS12 => {
            let engine = Bls12Engine::new(u, u_is_negative, twist_type, &g2_curve)?;
            engine.pair(&points, &extension12)
        }
        _ => {
            let engine = BnEngine::new(u, u_is_negative, twist_type, &g2_curve, &e6_non_residue)?;
            engine.pair(&points, &extension12)
        }
    };

    let pairing_result = pairing_result.ok_or_else(|| {
        ApiError::UnknownParameter("Pairing engine returned no value".to_owned())
    })?;

    let one_fp12 = Fp12::one(&extension12);
    Ok(vec![u8::from(pairing_result == one_fp12)])
}

fn run_pairing_mnt4<'i, const N: usize>(
    mod_byte_len: usize,
    field: &PrimeField<N>,
    deserializer: &mut Deserializer<'i>,
) -> Result<Vec<u8>, ApiError> {
    let a = decode_fp(deserializer, mod_byte_len, field)?;
    let b = decode_fp(deserializer, mod_byte_len, field)?;
    let (order, order_len) = decode_group_order(deserializer)?;
    let g1_curve = WeierstrassCurve::new(a, b, order.clone(), order_len);

    let non_residue = decode_fp(deserializer, mod_byte_len, field)?;
    validate_non_residue(&non_residue, 4, &field.modulus_biguint(), "Fp4")?;
    let extension2 = Extension2::new(non_residue)?;
    let extension4 = Extension2Over2::new(&extension2)?;

    // twist gamma = u; a' = a*gamma^2, b' = b*gamma^3
    let mut twist = Fp2::zero(&extension2);
    twist.c1 = Fp::one(field);

    let mut twist_squared = twist;
    twist_squared.square();
    let mut twist_cubed = twist_squared;
    twist_cubed.mul_assign(&twist);

    let mut a_fp2 = twist_squared;
    a_fp2.mul_by_fp(g1_curve.a());
    let mut b_fp2 = twist_cubed;
    b_fp2.mul_by_fp(g1_curve.b());
    let g2_curve = WeierstrassCurve::new(a_fp2, b_fp2, order, order_len);

    let (x, x_is_negative, exp_w0, exp_w1, exp_w0_is_negative) =
        decode_mnt_loop_parameters(deserializer)?;

    let decode_twist_element = |deserializer: &mut Deserializer<'i>| {
        decode_fp2(deserializer, mod_byte_len, &extension2)
    };
    let points = decode_pairs(
        deserializer,
        mod_byte_len,
        field,
        &decode_twist_element,
        &g1_curve,
        &g2_curve,
    )?;
    expect_consumed(deserializer)?;

    let engine = MntEngine {
        x,
        x_is_negative,
        exp_w0,
        exp_w1,
        exp_w0_is_negative,
        curve_twist: &g2_curve,
        twist,
        target_one: Fp4::one(&extension4),
    };

    let pairing_result = engine.pair(&points).ok_or_else(|| {
        ApiError::UnknownParameter("Pairing engine returned no value".to_owned())
    })?;

    let one_fp4 = Fp4::one(&extension4);
    Ok(vec![u8::from(pairing_result == one_fp4)])
}

fn run_pairing_mnt6<'i, const N: usize>(
    mod_byte_len: usize,
    field: &PrimeField<N>,
    deserializer: &mut Deserializer<'i>,
) -> Result<Vec<u8>, ApiError> {
    let a = decode_fp(deserializer, mod_byte_len, field)?;
    let b = decode_fp(deserializer, mod_byte_len, field)?;
    let (order, order_len) = decode_group_order(deserializer)?;
    let g1_curve = WeierstrassCurve::new(a, b, order.clone(), order_len);

    let non_residue = decode_fp(deserializer, mod_byte_len, field)?;
    validate_non_residue(&non_residue, 6, &field.modulus_biguint(), "Fp6")?;
    let extension3 = Extension3::new(non_residue)?;
    let extension6 = Extension2Over3::new(&extension3)?;

    // twist gamma = u; a' = a*gamma^2, b' = b*gamma^3
    let mut twist = crate::extensions::fp3::Fp3::zero(&extension3);
    twist.c1 = Fp::one(field);

    let mut twist_squared = twist;
    twist_squared.square();
    let mut twist_cubed = twist_squared;
    twist_cubed.mul_assign(&twist);

    let mut a_fp3 = twist_squared;
    a_fp3.mul_by_fp(g1_curve.a());
    let mut b_fp3 = twist_cubed;
    b_fp3.mul_by_fp(g1_curve.b());
    let g2_curve = WeierstrassCurve::new(a_fp3, b_fp3, order, order_len);

    let (x, x_is_negative, exp_w0, exp_w1, exp_w0_is_negative) =
        decode_mnt_loop_parameters(deserializer)?;

    let decode_twist_element = |deserializer: &mut Deserializer<'i>| {
        decode_fp3(deserializer, mod_byte_len, &extension3)
    };
    let points = decode_pairs(
        deserializer,
        mod_byte_len,
        field,
        &decode_twist_element,
        &g1_curve,
        &g2_curve,
    )?;
    expect_consumed(deserializer)?;

    let engine = MntEngine {
        x,
        x_is_negative,
        exp_w0,
        exp_w1,
        exp_w0_is_negative,
        curve_twist: &g2_curve,
        twist,
        target_one: Fp6_2::one(&extension6),
    };

    let pairing_result = engine.pair(&points).ok_or_else(|| {
        ApiError::UnknownParameter("Pairing engine returned no value".to_owned())
    })?;

    let one_fp6 = Fp6_2::one(&extension6);
    Ok(vec![u8::from(pairing_result == one_fp6)])
}

/// x, its sign, and the two final-exponentiation chunks with their caps.
fn decode_mnt_loop_parameters(
    deserializer: &mut Deserializer,
) -> Result<(Vec<u64>, bool, Vec<u64>, Vec<u64>, bool), ApiError> {
    let x = decode_scalar_with_bit_limit(MAX_ATE_PAIRING_ATE_LOOP_COUNT, deserializer)?;
    if hamming_weight(&x) > MAX_ATE_PAIRING_ATE_LOOP_COUNT_HAMMING {
        return Err(ApiError::InvalidInput(
            "X has too large hamming weight".to_owned(),
        ));
    }
    let x_is_negative = decode_sign(deserializer)?;

    let exp_w0 =
        decode_scalar_with_bit_limit(MAX_ATE_PAIRING_FINAL_EXP_W0_BIT_LENGTH, deserializer)?;
    let exp_w1 =
        decode_scalar_with_bit_limit(MAX_ATE_PAIRING_FINAL_EXP_W1_BIT_LENGTH, deserializer)?;
    let exp_w0_is_negative = decode_sign(deserializer)?;

    Ok((x, x_is_negative, exp_w0, exp_w1, exp_w0_is_negative))
}

fn expect_consumed(deserializer: &Deserializer) -> Result<(), ApiError> {
    if !deserializer.ended() {
        return Err(ApiError::InvalidInput(
            "Input has garbage at the end".to_owned(),
        ));
    }
    Ok(())
}
