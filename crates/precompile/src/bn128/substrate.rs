//! Point codec and group operations on top of the `substrate-bn` crate.
//!
//! Decoding validates in two stages. The coordinates are reduced modulo the
//! field prime and the point is checked against the curve first
//! ([`PrecompileError::Bn128NotOnCurve`]). Only a point that passes is then
//! rejected for any coordinate that was not below the prime
//! ([`PrecompileError::Bn128InvalidPoint`]).
use super::{FQ2_LEN, FQ_LEN, FQ_MODULUS, G1_LEN, SCALAR_LEN};
use crate::PrecompileError;
use bn::{AffineG1, AffineG2, Fq, Fq2, Group, Gt, G1, G2};
use primitives::U256;

/// A coordinate reduced into the field, and whether its encoding was already canonical.
struct Coordinate {
    value: Fq,
    canonical: bool,
}

/// Reads a single `Fq` field element from the input slice.
///
/// # Panics
///
/// Panics if the input is not at least 32 bytes long.
#[inline]
fn read_fq(input: &[u8]) -> Result<Coordinate, PrecompileError> {
    let raw = U256::from_be_slice(&input[..FQ_LEN]);
    let reduced = raw.reduce_mod(FQ_MODULUS);
    let value = Fq::from_slice(&reduced.to_be_bytes::<FQ_LEN>())
        .map_err(|_| PrecompileError::Bn128InvalidPoint)?;
    Ok(Coordinate {
        value,
        canonical: raw < FQ_MODULUS,
    })
}

/// Reads a Fq2 (quadratic extension field element) from the input slice.
///
/// The imaginary part is encoded before the real part.
///
/// # Panics
///
/// Panics if the input is not at least 64 bytes long.
#[inline]
fn read_fq2(input: &[u8]) -> Result<(Fq2, bool), PrecompileError> {
    let imaginary = read_fq(&input[..FQ_LEN])?;
    let real = read_fq(&input[FQ_LEN..FQ2_LEN])?;
    Ok((
        Fq2::new(real.value, imaginary.value),
        real.canonical && imaginary.canonical,
    ))
}

/// Reads a G1 point from the input slice.
///
/// The all-zero encoding is the point at infinity, which `AffineG1` can not represent.
///
/// # Panics
///
/// Panics if the input is not at least 64 bytes long.
#[inline]
pub(super) fn read_g1_point(input: &[u8]) -> Result<G1, PrecompileError> {
    let input = &input[..G1_LEN];
    let x = read_fq(&input[..FQ_LEN])?;
    let y = read_fq(&input[FQ_LEN..])?;

    let point = if input.iter().all(|&b| b == 0) {
        G1::zero()
    } else {
        AffineG1::new(x.value, y.value)
            .map_err(|_| PrecompileError::Bn128NotOnCurve)?
            .into()
    };

    if !(x.canonical && y.canonical) {
        return Err(PrecompileError::Bn128InvalidPoint);
    }
    Ok(point)
}

/// Reads a G2 point from the input slice.
///
/// Points outside the prime order subgroup are reported as not on the curve.
///
/// # Panics
///
/// Panics if the input is not at least 128 bytes long.
#[inline]
pub(super) fn read_g2_point(input: &[u8]) -> Result<G2, PrecompileError> {
    let input = &input[..2 * FQ2_LEN];
    let (x, x_canonical) = read_fq2(&input[..FQ2_LEN])?;
    let (y, y_canonical) = read_fq2(&input[FQ2_LEN..])?;

    let point = if input.iter().all(|&b| b == 0) {
        G2::zero()
    } else {
        AffineG2::new(x, y)
            .map_err(|_| PrecompileError::Bn128NotOnCurve)?
            .into()
    };

    if !(x_canonical && y_canonical) {
        return Err(PrecompileError::Bn128InvalidPoint);
    }
    Ok(point)
}

/// Encodes a G1 point into a byte array.
///
/// The point at infinity encodes as all zeroes.
#[inline]
pub(super) fn encode_g1_point(point: G1) -> Result<[u8; G1_LEN], PrecompileError> {
    let mut output = [0u8; G1_LEN];

    if let Some(point_affine) = AffineG1::from_jacobian(point) {
        let (x, y) = output.split_at_mut(FQ_LEN);
        point_affine
            .x()
            .to_big_endian(x)
            .and_then(|()| point_affine.y().to_big_endian(y))
            .map_err(|_| PrecompileError::other("bn128 point encoding failed"))?;
    }

    Ok(output)
}

/// Reads a scalar from the input slice.
///
/// The scalar does not need to be canonical, it is reduced modulo the group order.
///
/// # Panics
///
/// Panics if the input is not at least 32 bytes long.
#[inline]
pub(super) fn read_scalar(input: &[u8]) -> Result<bn::Fr, PrecompileError> {
    bn::Fr::from_slice(&input[..SCALAR_LEN])
        .map_err(|_| PrecompileError::other("bn128 scalar length"))
}

/// Performs point addition on two G1 points.
#[inline]
pub(super) fn g1_point_add(p1: G1, p2: G1) -> G1 {
    p1 + p2
}

/// Performs a G1 scalar multiplication.
#[inline]
pub(super) fn g1_point_mul(p: G1, fr: bn::Fr) -> G1 {
    p * fr
}

/// Returns true if the product of the pairings of all pairs is the identity.
///
/// An empty list is the empty product and passes.
#[inline]
pub(super) fn pairing_check(pairs: &[(G1, G2)]) -> bool {
    if pairs.is_empty() {
        return true;
    }
    bn::pairing_batch(pairs) == Gt::one()
}
