//! Byte-level decoding of the ABI wire format, with the validation rules
//! the arithmetic core relies on.

use num_bigint::BigUint;

use crate::constants::*;
use crate::errors::ApiError;
use crate::extensions::fp2::{Extension2, Fp2};
use crate::extensions::fp3::{Extension3, Fp3};
use crate::field::PrimeField;
use crate::fp::Fp;
use crate::pairings::b_engine::TwistType;
use crate::repr::Repr;
use crate::scalar::{greater_or_equal, num_bits};
use crate::traits::{is_non_nth_root, FieldElement};
use crate::weierstrass::{CurvePoint, WeierstrassCurve};

/// Cursor over the input bytes. Every read names what it was trying to get
/// so truncation errors point at the missing field.
pub(crate) struct Deserializer<'i> {
    input: &'i [u8],
    position: usize,
}

impl<'i> Deserializer<'i> {
    pub fn new(input: &'i [u8]) -> Self {
        Self { input, position: 0 }
    }

    pub fn byte(&mut self, err: &str) -> Result<u8, ApiError> {
        if self.position < self.input.len() {
            let value = self.input[self.position];
            self.position += 1;
            Ok(value)
        } else {
            Err(ApiError::InvalidInput(err.to_owned()))
        }
    }

    pub fn peek_byte(&self, err: &str) -> Result<u8, ApiError> {
        if self.position < self.input.len() {
            Ok(self.input[self.position])
        } else {
            Err(ApiError::InvalidInput(err.to_owned()))
        }
    }

    /// Big-endian number of the given byte width into a fixed-width repr.
    pub fn number<const N: usize>(&mut self, bytes: usize, err: &str) -> Result<Repr<N>, ApiError> {
        let mut num = Repr::<N>::zero();
        for i in 0..bytes {
            let b = self.byte(err)?;
            let j = bytes - 1 - i;
            let at = j / 8;
            if at >= N {
                return Err(ApiError::InvalidInput(err.to_owned()));
            }
            let off = (j - at * 8) * 8;
            num.0[at] |= (b as u64) << off;
        }
        Ok(num)
    }

    /// Big-endian number of the given byte width into dynamic limbs.
    pub fn dyn_number(&mut self, bytes: usize, err: &str) -> Result<Vec<u64>, ApiError> {
        let mut num = vec![0u64; (bytes + 7) / 8];
        for i in 0..bytes {
            let b = self.byte(err)?;
            let j = bytes - 1 - i;
            let at = j / 8;
            let off = (j - at * 8) * 8;
            num[at] |= (b as u64) << off;
        }
        Ok(num)
    }

    pub fn ended(&self) -> bool {
        self.position == self.input.len()
    }

    pub fn remaining(&self) -> usize {
        self.input.len() - self.position
    }
}

/// True means minus.
pub(crate) fn decode_sign(deserializer: &mut Deserializer) -> Result<bool, ApiError> {
    let sign = deserializer.byte("Input is not long enough to get sign encoding")?;
    match sign {
        SIGN_PLUS => Ok(false),
        SIGN_MINUS => Ok(true),
        _ => Err(ApiError::InvalidInput(
            "sign is not encoded properly".to_owned(),
        )),
    }
}

pub(crate) fn decode_pairing_curve_type(deserializer: &mut Deserializer) -> Result<u8, ApiError> {
    let curve_byte = deserializer.byte("Input should be longer than curve type encoding")?;
    match curve_byte {
        CURVE_TYPE_BLS12 | CURVE_TYPE_BN | CURVE_TYPE_MNT4 | CURVE_TYPE_MNT6 => Ok(curve_byte),
        _ => Err(ApiError::InvalidInput("Unknown curve type".to_owned())),
    }
}

pub(crate) fn decode_twist_type(deserializer: &mut Deserializer) -> Result<TwistType, ApiError> {
    let twist_byte = deserializer.byte("Input is not long enough to get twist type")?;
    match twist_byte {
        TWIST_TYPE_D => Ok(TwistType::D),
        TWIST_TYPE_M => Ok(TwistType::M),
        _ => Err(ApiError::InvalidInput(
            "Unknown twist type supplied".to_owned(),
        )),
    }
}

pub(crate) fn decode_modulus<const N: usize>(
    mod_byte_len: usize,
    deserializer: &mut Deserializer,
) -> Result<Repr<N>, ApiError> {
    if deserializer.peek_byte("Input is not long enough to get modulus")? == 0 {
        return Err(ApiError::InvalidInput(
            "In modulus encoding highest byte is zero".to_owned(),
        ));
    }
    let modulus =
        deserializer.number::<N>(mod_byte_len, "Input is not long enough to get modulus")?;
    if modulus.is_zero() {
        return Err(ApiError::UnexpectedZero("Modulus can not be zero".to_owned()));
    }
    if modulus.is_even() {
        return Err(ApiError::InvalidInput("Modulus is even".to_owned()));
    }
    if modulus < Repr::from_u64(3) {
        return Err(ApiError::InvalidInput("Modulus is less than 3".to_owned()));
    }
    Ok(modulus)
}

pub(crate) fn decode_fp<'a, const N: usize>(
    deserializer: &mut Deserializer,
    mod_byte_len: usize,
    field: &'a PrimeField<N>,
) -> Result<Fp<'a, N>, ApiError> {
    let repr =
        deserializer.number::<N>(mod_byte_len, "Input is not long enough to get Fp element")?;
    Fp::from_repr(field, repr)
        .ok_or_else(|| ApiError::InvalidInput("Fp element is not an element of the field".to_owned()))
}

pub(crate) fn decode_fp2<'a, const N: usize>(
    deserializer: &mut Deserializer,
    mod_byte_len: usize,
    extension: &'a Extension2<'a, N>,
) -> Result<Fp2<'a, N>, ApiError> {
    let c0 = decode_fp(deserializer, mod_byte_len, extension.field)?;
    let c1 = decode_fp(deserializer, mod_byte_len, extension.field)?;
    Ok(Fp2::new(c0, c1, extension))
}

pub(crate) fn decode_fp3<'a, const N: usize>(
    deserializer: &mut Deserializer,
    mod_byte_len: usize,
    extension: &'a Extension3<'a, N>,
) -> Result<Fp3<'a, N>, ApiError> {
    let c0 = decode_fp(deserializer, mod_byte_len, extension.field)?;
    let c1 = decode_fp(deserializer, mod_byte_len, extension.field)?;
    let c2 = decode_fp(deserializer, mod_byte_len, extension.field)?;
    Ok(Fp3::new(c0, c1, c2, extension))
}

/// Rejects a claimed non-residue that is zero or actually a d-th residue of
/// its field (whose order is passed in).
pub(crate) fn validate_non_residue<F: FieldElement>(
    non_residue: &F,
    extension_degree: u64,
    field_order: &BigUint,
    what: &str,
) -> Result<(), ApiError> {
    if non_residue.is_zero() {
        return Err(ApiError::UnexpectedZero(format!(
            "{} non-residue can not be zero",
            what
        )));
    }
    if !is_non_nth_root(non_residue, field_order, extension_degree) {
        return Err(ApiError::InvalidInput(format!(
            "Non-residue for {} is actually a residue",
            what
        )));
    }
    Ok(())
}

/// Order length byte followed by the order itself; zero orders are invalid.
pub(crate) fn decode_group_order(
    deserializer: &mut Deserializer,
) -> Result<(Vec<u64>, usize), ApiError> {
    let order_len =
        deserializer.byte("Input is not long enough to get group size length")? as usize;
    let order = deserializer.dyn_number(
        order_len,
        "Input is not long enough to get main group order size",
    )?;

    if order.iter().all(|limb| *limb == 0) {
        return Err(ApiError::InvalidInput("Group order is zero".to_owned()));
    }

    Ok((order, order_len))
}

/// Affine point decode with the on-curve check; (0, 0) decodes to infinity.
pub(crate) fn decode_point<'i, F, D>(
    deserializer: &mut Deserializer<'i>,
    decode_element: &D,
    curve: &WeierstrassCurve<F>,
) -> Result<CurvePoint<F>, ApiError>
where
    F: FieldElement,
    D: Fn(&mut Deserializer<'i>) -> Result<F, ApiError>,
{
    let x = decode_element(deserializer)?;
    let y = decode_element(deserializer)?;
    let point = CurvePoint::from_xy(x, y);

    if !point.check_on_curve(curve) {
        return Err(ApiError::InvalidInput("Point is not on curve".to_owned()));
    }

    Ok(point)
}

/// Scalar of exactly `order_len` bytes, strictly below the group order.
pub(crate) fn decode_scalar<F: FieldElement>(
    deserializer: &mut Deserializer,
    curve: &WeierstrassCurve<F>,
) -> Result<Vec<u64>, ApiError> {
    let scalar = deserializer.dyn_number(
        curve.order_len(),
        "Input is not long enough to get scalar",
    )?;
    if greater_or_equal(&scalar, curve.subgroup_order()) {
        return Err(ApiError::InvalidInput(
            "Group order is less or equal scalar".to_owned(),
        ));
    }
    Ok(scalar)
}

/// Length-prefixed scalar capped both by encoded byte count and by exact
/// bit length.
pub(crate) fn decode_scalar_with_bit_limit(
    bit_limit: usize,
    deserializer: &mut Deserializer,
) -> Result<Vec<u64>, ApiError> {
    let length = deserializer.byte("Input is not long enough to get scalar length")? as usize;
    let max_length_for_bits = (bit_limit + 7) / 8;
    if length > max_length_for_bits {
        return Err(ApiError::InvalidInput(
            "Scalar is too large for bit length".to_owned(),
        ));
    }
    let num = deserializer.dyn_number(length, "Input is not long enough to get scalar")?;
    if num_bits(&num) as usize > bit_limit {
        return Err(ApiError::InvalidInput(
            "Number of bits for scalar is too large".to_owned(),
        ));
    }
    Ok(num)
}

/// num_pairs byte followed by that many (G1, G2) points, each checked to be
/// on its curve and in the right subgroup.
pub(crate) fn decode_pairs<'a, 'i, const N: usize, F, D>(
    deserializer: &mut Deserializer<'i>,
    mod_byte_len: usize,
    g1_field: &'a PrimeField<N>,
    decode_twist_element: &D,
    g1_curve: &WeierstrassCurve<Fp<'a, N>>,
    g2_curve: &WeierstrassCurve<F>,
) -> Result<Vec<(CurvePoint<Fp<'a, N>>, CurvePoint<F>)>, ApiError>
where
    F: FieldElement,
    D: Fn(&mut Deserializer<'i>) -> Result<F, ApiError>,
{
    let num_pairs = deserializer.byte("Input is not long enough to get number of pairs")?;
    if num_pairs == 0 {
        return Err(ApiError::InvalidInput("Zero pairs encoded".to_owned()));
    }

    let decode_g1_element =
        |deserializer: &mut Deserializer<'i>| decode_fp(deserializer, mod_byte_len, g1_field);

    let mut points = Vec::with_capacity(num_pairs as usize);
    for _ in 0..num_pairs {
        let g1 = decode_point(deserializer, &decode_g1_element, g1_curve)?;
        let g2 = decode_point(deserializer, decode_twist_element, g2_curve)?;

        if !g1.check_correct_subgroup(g1_curve) || !g2.check_correct_subgroup(g2_curve) {
            return Err(ApiError::InvalidInput(
                "G1 or G2 point is not in the expected subgroup".to_owned(),
            ));
        }

        points.push((g1, g2));
    }

    Ok(points)
}
