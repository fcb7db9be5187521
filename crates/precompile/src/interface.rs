//! Interface for the precompiles. It contains the contract capability, the
//! output and error types and the gas charging protocol shared by every
//! contract.
use core::fmt;
use primitives::Bytes;
use std::string::String;

/// A precompile operation result type
///
/// Returns either `Ok(output)` or `Err(error)`.
pub type PrecompileResult = Result<PrecompileOutput, PrecompileError>;

/// Successful precompile execution output.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PrecompileOutput {
    /// The contract produced the given bytes.
    Returned(Bytes),
    /// The contract ran but had nothing to return.
    ///
    /// Signature recovery uses this for malformed or unrecoverable signatures.
    NoOutput,
}

impl PrecompileOutput {
    /// Returns the output bytes, empty for [`PrecompileOutput::NoOutput`].
    #[inline]
    pub fn bytes(&self) -> Bytes {
        match self {
            Self::Returned(bytes) => bytes.clone(),
            Self::NoOutput => Bytes::new(),
        }
    }

    /// Consumes the output and returns its bytes.
    #[inline]
    pub fn into_bytes(self) -> Bytes {
        match self {
            Self::Returned(bytes) => bytes,
            Self::NoOutput => Bytes::new(),
        }
    }

    /// Returns `true` if the contract had nothing to return.
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::NoOutput)
    }
}

impl From<Bytes> for PrecompileOutput {
    #[inline]
    fn from(bytes: Bytes) -> Self {
        Self::Returned(bytes)
    }
}

/// Precompile error type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PrecompileError {
    /// The caller could not pay for the required gas.
    OutOfGas,
    /// Modexp length header does not fit the address space
    ModexpLengthOverflow,
    /// Bn128 point does not satisfy the curve equation
    Bn128NotOnCurve,
    /// Bn128 coordinate is not a canonical field element
    Bn128InvalidPoint,
    /// Bn128 pair length
    Bn128PairLength,
    /// Catch-all variant for other errors
    Other(String),
}

impl PrecompileError {
    /// Returns another error with the given message.
    pub fn other(err: impl Into<String>) -> Self {
        Self::Other(err.into())
    }

    /// Returns `true` if the error is out of gas.
    pub fn is_oog(&self) -> bool {
        matches!(self, Self::OutOfGas)
    }
}

impl core::error::Error for PrecompileError {}

impl fmt::Display for PrecompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::OutOfGas => "out of gas",
            Self::ModexpLengthOverflow => "modexp length overflow",
            Self::Bn128NotOnCurve => "bn128 point not on curve",
            Self::Bn128InvalidPoint => "bn128 point coordinate not a field element",
            Self::Bn128PairLength => "bn128 invalid pair length",
            Self::Other(s) => s,
        };
        f.write_str(s)
    }
}

/// A native contract: a gas price for an input and a pure transform of it.
pub trait PrecompiledContract {
    /// Returns the gas needed to run the contract on `input`.
    ///
    /// Never fails. Prices that do not fit in 64 bits saturate at [`u64::MAX`].
    fn required_gas(&self, input: &[u8]) -> u64;

    /// Runs the contract. Gas has already been paid when this is called.
    fn run(&self, input: &[u8]) -> PrecompileResult;
}

/// Something gas can be taken from.
#[auto_impl::auto_impl(&mut, Box)]
pub trait GasCharger {
    /// Takes `amount` gas. Returns `false` and takes nothing if there is not enough left.
    fn try_charge(&mut self, amount: u64) -> bool;
}

/// Charges the gas `contract` requires for `input`, then runs it.
///
/// The contract body never runs when the charge fails, and gas taken is kept
/// even if the contract returns an error.
pub fn run_precompile<P, G>(contract: &P, input: &[u8], mut charger: G) -> PrecompileResult
where
    P: PrecompiledContract + ?Sized,
    G: GasCharger,
{
    let required = contract.required_gas(input);
    log::trace!(target: "precompile", "required gas {required}, input length {}", input.len());
    if !charger.try_charge(required) {
        log::debug!(target: "precompile", "out of gas, required {required}");
        return Err(PrecompileError::OutOfGas);
    }
    contract.run(input).inspect_err(|err| {
        log::debug!(target: "precompile", "contract failed: {err}");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    struct Counting<'a> {
        gas: u64,
        runs: &'a Cell<usize>,
    }

    impl PrecompiledContract for Counting<'_> {
        fn required_gas(&self, _input: &[u8]) -> u64 {
            self.gas
        }

        fn run(&self, input: &[u8]) -> PrecompileResult {
            self.runs.set(self.runs.get() + 1);
            Ok(PrecompileOutput::Returned(Bytes::copy_from_slice(input)))
        }
    }

    struct Budget(u64);

    impl GasCharger for Budget {
        fn try_charge(&mut self, amount: u64) -> bool {
            match self.0.checked_sub(amount) {
                Some(left) => {
                    self.0 = left;
                    true
                }
                None => false,
            }
        }
    }

    #[test]
    fn run_is_skipped_without_gas() {
        let runs = Cell::new(0);
        let contract = Counting { gas: 10, runs: &runs };
        let mut budget = Budget(9);
        let res = run_precompile(&contract, b"abc", &mut budget);
        assert_eq!(res, Err(PrecompileError::OutOfGas));
        assert!(res.unwrap_err().is_oog());
        assert_eq!(runs.get(), 0);
        assert_eq!(budget.0, 9);
    }

    #[test]
    fn charges_before_running() {
        let runs = Cell::new(0);
        let contract = Counting { gas: 10, runs: &runs };
        let mut budget = Budget(10);
        let res = run_precompile(&contract, b"abc", &mut budget).unwrap();
        assert_eq!(res.into_bytes(), Bytes::from_static(b"abc"));
        assert_eq!(runs.get(), 1);
        assert_eq!(budget.0, 0);
    }

    #[test]
    fn boxed_charger() {
        let runs = Cell::new(0);
        let contract = Counting { gas: 1, runs: &runs };
        let charger: Box<Budget> = Box::new(Budget(1));
        assert!(run_precompile(&contract, &[], charger).is_ok());
    }

    #[test]
    fn no_output_is_empty() {
        assert!(PrecompileOutput::NoOutput.bytes().is_empty());
        assert!(PrecompileOutput::NoOutput.is_empty());
        assert!(!PrecompileOutput::from(Bytes::new()).is_empty());
    }

    #[test]
    fn error_display() {
        assert_eq!(PrecompileError::OutOfGas.to_string(), "out of gas");
        assert_eq!(PrecompileError::other("boom").to_string(), "boom");
    }
}
