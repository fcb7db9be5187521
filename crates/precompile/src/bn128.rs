//! BN128 precompiles added in [`EIP-196`](https://eips.ethereum.org/EIPS/eip-196)
//! and [`EIP-197`](https://eips.ethereum.org/EIPS/eip-197).
use crate::{
    utilities::{bool_to_bytes32, right_pad},
    PrecompileError, PrecompileOutput, PrecompileResult, PrecompiledContract,
};
use primitives::{uint, Bytes, U256};
use std::vec::Vec;

pub mod substrate;

use substrate::{
    encode_g1_point, g1_point_add, g1_point_mul, pairing_check, read_g1_point, read_g2_point,
    read_scalar,
};

/// Bn128 add precompile
pub mod add {
    use primitives::Address;

    /// Bn128 add precompile address
    pub const ADDRESS: Address = crate::u64_to_address(6);
}

/// Bn128 mul precompile
pub mod mul {
    use primitives::Address;

    /// Bn128 mul precompile address
    pub const ADDRESS: Address = crate::u64_to_address(7);
}

/// Bn128 pair precompile
pub mod pair {
    use primitives::Address;

    /// Bn128 pair precompile address
    pub const ADDRESS: Address = crate::u64_to_address(8);
}

/// Prime modulus of the base field.
pub const FQ_MODULUS: U256 =
    uint!(0x30644e72e131a029b85045b68181585d97816a916871ca8d3c208c16d87cfd47_U256);

/// FQ_LEN specifies the number of bytes needed to represent an
/// Fq element. This is an element in the base field of BN254.
///
/// Note: The base field is used to define G1 and G2 elements.
pub const FQ_LEN: usize = 32;

/// SCALAR_LEN specifies the number of bytes needed to represent an Fr element.
/// This is an element in the scalar field of BN254.
pub const SCALAR_LEN: usize = 32;

/// FQ2_LEN specifies the number of bytes needed to represent an
/// Fq^2 element.
///
/// Note: This is the quadratic extension of Fq, and by definition
/// means we need 2 Fq elements.
pub const FQ2_LEN: usize = 2 * FQ_LEN;

/// G1_LEN specifies the number of bytes needed to represent a G1 element.
///
/// Note: A G1 element contains 2 Fq elements.
pub const G1_LEN: usize = 2 * FQ_LEN;

/// G2_LEN specifies the number of bytes needed to represent a G2 element.
///
/// Note: A G2 element contains 2 Fq^2 elements.
pub const G2_LEN: usize = 2 * FQ2_LEN;

/// Input length for the add operation.
/// `ADD` takes two uncompressed G1 points (64 bytes each).
pub const ADD_INPUT_LEN: usize = 2 * G1_LEN;

/// Input length for the multiplication operation.
/// `MUL` takes an uncompressed G1 point (64 bytes) and scalar (32 bytes).
pub const MUL_INPUT_LEN: usize = G1_LEN + SCALAR_LEN;

/// Pair element length.
/// `PAIR` elements are composed of an uncompressed G1 point (64 bytes) and an uncompressed G2 point
/// (128 bytes).
pub const PAIR_ELEMENT_LEN: usize = G1_LEN + G2_LEN;

/// Adds two G1 points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Bn128Add {
    gas: u64,
}

impl Bn128Add {
    /// Point addition priced at a fixed `gas`.
    pub const fn new(gas: u64) -> Self {
        Self { gas }
    }
}

impl PrecompiledContract for Bn128Add {
    fn required_gas(&self, _input: &[u8]) -> u64 {
        self.gas
    }

    fn run(&self, input: &[u8]) -> PrecompileResult {
        let input = right_pad::<ADD_INPUT_LEN>(input);

        let p1 = read_g1_point(&input[..G1_LEN])?;
        let p2 = read_g1_point(&input[G1_LEN..])?;
        let output = encode_g1_point(g1_point_add(p1, p2))?;

        Ok(PrecompileOutput::Returned(Bytes::copy_from_slice(&output)))
    }
}

/// Multiplies a G1 point by a scalar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Bn128Mul {
    gas: u64,
}

impl Bn128Mul {
    /// Scalar multiplication priced at a fixed `gas`.
    pub const fn new(gas: u64) -> Self {
        Self { gas }
    }
}

impl PrecompiledContract for Bn128Mul {
    fn required_gas(&self, _input: &[u8]) -> u64 {
        self.gas
    }

    fn run(&self, input: &[u8]) -> PrecompileResult {
        let input = right_pad::<MUL_INPUT_LEN>(input);

        let p = read_g1_point(&input[..G1_LEN])?;
        let scalar = read_scalar(&input[G1_LEN..])?;
        let output = encode_g1_point(g1_point_mul(p, scalar))?;

        Ok(PrecompileOutput::Returned(Bytes::copy_from_slice(&output)))
    }
}

/// Checks that the product of the pairings of all (G1, G2) pairs is one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Bn128Pair {
    base: u64,
    per_point: u64,
}

impl Bn128Pair {
    /// Pairing check priced at `base` plus `per_point` for every pair.
    pub const fn new(base: u64, per_point: u64) -> Self {
        Self { base, per_point }
    }
}

impl PrecompiledContract for Bn128Pair {
    fn required_gas(&self, input: &[u8]) -> u64 {
        ((input.len() / PAIR_ELEMENT_LEN) as u64)
            .saturating_mul(self.per_point)
            .saturating_add(self.base)
    }

    fn run(&self, input: &[u8]) -> PrecompileResult {
        if input.len() % PAIR_ELEMENT_LEN != 0 {
            return Err(PrecompileError::Bn128PairLength);
        }

        let pairs = input
            .chunks_exact(PAIR_ELEMENT_LEN)
            .map(|pair| -> Result<_, PrecompileError> {
                let g1 = read_g1_point(&pair[..G1_LEN])?;
                let g2 = read_g2_point(&pair[G1_LEN..])?;
                Ok((g1, g2))
            })
            .collect::<Result<Vec<_>, PrecompileError>>()?;

        Ok(PrecompileOutput::Returned(bool_to_bytes32(pairing_check(
            &pairs,
        ))))
    }
}
