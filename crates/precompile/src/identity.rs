//! Identity precompile returns
use crate::{
    calc_linear_cost_u32, u64_to_address, PrecompileOutput, PrecompileResult, PrecompiledContract,
};
use primitives::{Address, Bytes};

/// Address of the identity precompile.
pub const ADDRESS: Address = u64_to_address(4);

/// Takes the input bytes, copies them, and returns it as the output.
///
/// See: <https://ethereum.github.io/yellowpaper/paper.pdf>
/// See: <https://etherscan.io/address/0000000000000000000000000000000000000004>
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Identity {
    base: u64,
    word: u64,
}

impl Identity {
    /// Identity priced at `base` plus `word` per 32 bytes of input.
    pub const fn new(base: u64, word: u64) -> Self {
        Self { base, word }
    }
}

impl PrecompiledContract for Identity {
    fn required_gas(&self, input: &[u8]) -> u64 {
        calc_linear_cost_u32(input.len(), self.base, self.word)
    }

    fn run(&self, input: &[u8]) -> PrecompileResult {
        Ok(PrecompileOutput::Returned(Bytes::copy_from_slice(input)))
    }
}
