//! Hash precompiles, it contains SHA-256 and RIPEMD-160 hash precompiles
use crate::{
    calc_linear_cost_u32, u64_to_address, PrecompileOutput, PrecompileResult, PrecompiledContract,
};
use primitives::{Address, Bytes};
use sha2::Digest;

/// Address of the SHA-256 precompile.
pub const SHA256_ADDRESS: Address = u64_to_address(2);

/// Address of the RIPEMD-160 precompile.
pub const RIPEMD160_ADDRESS: Address = u64_to_address(3);

/// Computes the SHA-256 hash of the input data
///
/// See: <https://ethereum.github.io/yellowpaper/paper.pdf>
/// See: <https://docs.soliditylang.org/en/develop/units-and-global-variables.html#mathematical-and-cryptographic-functions>
/// See: <https://etherscan.io/address/0000000000000000000000000000000000000002>
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Sha256 {
    base: u64,
    word: u64,
}

impl Sha256 {
    /// SHA-256 priced at `base` plus `word` per 32 bytes of input.
    pub const fn new(base: u64, word: u64) -> Self {
        Self { base, word }
    }
}

impl PrecompiledContract for Sha256 {
    fn required_gas(&self, input: &[u8]) -> u64 {
        calc_linear_cost_u32(input.len(), self.base, self.word)
    }

    fn run(&self, input: &[u8]) -> PrecompileResult {
        let output = sha2::Sha256::digest(input);
        Ok(PrecompileOutput::Returned(Bytes::copy_from_slice(&output)))
    }
}

/// Computes the RIPEMD-160 hash of the input data, left-padded to 32 bytes
///
/// See: <https://ethereum.github.io/yellowpaper/paper.pdf>
/// See: <https://docs.soliditylang.org/en/develop/units-and-global-variables.html#mathematical-and-cryptographic-functions>
/// See: <https://etherscan.io/address/0000000000000000000000000000000000000003>
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Ripemd160 {
    base: u64,
    word: u64,
}

impl Ripemd160 {
    /// RIPEMD-160 priced at `base` plus `word` per 32 bytes of input.
    pub const fn new(base: u64, word: u64) -> Self {
        Self { base, word }
    }
}

impl PrecompiledContract for Ripemd160 {
    fn required_gas(&self, input: &[u8]) -> u64 {
        calc_linear_cost_u32(input.len(), self.base, self.word)
    }

    fn run(&self, input: &[u8]) -> PrecompileResult {
        let mut hasher = ripemd::Ripemd160::new();
        hasher.update(input);

        let mut output = [0u8; 32];
        hasher.finalize_into((&mut output[12..]).into());
        Ok(PrecompileOutput::Returned(Bytes::copy_from_slice(&output)))
    }
}
