//! Calls into the native contracts by address.
use crate::{Gas, InstructionResult};
use precompile::{run_precompile, PrecompileError, Precompiles};
use primitives::{Address, Bytes};

/// Outcome of calling a native contract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrecompileCall {
    /// How the call ended.
    pub result: InstructionResult,
    /// Returned bytes, empty unless the call succeeded with output.
    pub output: Bytes,
    /// Why the contract failed, `None` on success.
    pub error: Option<PrecompileError>,
    /// Gas account of the call after it ran.
    pub gas: Gas,
}

/// Calls the native contract at `address` with `gas_limit` gas.
///
/// Returns `None` if no contract lives at `address` in `precompiles`.
///
/// Running out of gas spends the whole limit. A contract that rejects its
/// input keeps the gas it was charged.
pub fn call_precompile(
    precompiles: &Precompiles,
    address: &Address,
    input: &[u8],
    gas_limit: u64,
) -> Option<PrecompileCall> {
    let precompile = precompiles.get(address)?;
    log::trace!(target: "precompile", "calling {} at {address}", precompile.name());

    let mut gas = Gas::new(gas_limit);
    let (result, output, error) = match run_precompile(precompile, input, &mut gas) {
        Ok(output) => (InstructionResult::Return, output.into_bytes(), None),
        Err(PrecompileError::OutOfGas) => {
            gas.spend_all();
            (
                InstructionResult::PrecompileOOG,
                Bytes::new(),
                Some(PrecompileError::OutOfGas),
            )
        }
        Err(err) => {
            log::debug!(target: "precompile", "{} at {address} failed: {err}", precompile.name());
            (InstructionResult::PrecompileError, Bytes::new(), Some(err))
        }
    };

    Some(PrecompileCall {
        result,
        output,
        error,
        gas,
    })
}
