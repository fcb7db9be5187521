//! `ecrecover` precompile.
//!
//! Depending on enabled features, it will use different implementations of `ecrecover`.
//! * [`k256`](https://crates.io/crates/k256) - uses maintained pure rust lib `k256`, it is perfect use for no_std environments.
//! * [`secp256k1`](https://crates.io/crates/secp256k1) - uses `bitcoin_secp256k1` lib, it is a C implementation of secp256k1 used in bitcoin core.
//!   Enabled by the `secp256k1` feature.
//!
//! Input format:
//! [32 bytes for message][31 zero bytes][1 byte for v][32 bytes for r][32 bytes for s]
//!
//! Output format:
//! [32 bytes for recovered address] or nothing if the signature is not recoverable.
use crate::{
    u64_to_address, utilities::right_pad, PrecompileOutput, PrecompileResult, PrecompiledContract,
};
use primitives::{uint, Address, Bytes, B256, B512, U256};

cfg_if::cfg_if! {
    if #[cfg(feature = "secp256k1")] {
        pub mod bitcoin_secp256k1;
        pub use bitcoin_secp256k1::ecrecover;
    } else {
        pub mod k256;
        pub use self::k256::ecrecover;
    }
}

/// Address of the `ecrecover` precompile.
pub const ADDRESS: Address = u64_to_address(1);

/// Order of the secp256k1 group.
pub const SECP256K1N: U256 =
    uint!(0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141_U256);

/// Half the secp256k1 group order, the largest canonical `s`.
pub const SECP256K1N_HALF: U256 =
    uint!(0x7FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF5D576E7357A4501DDFE92F46681B20A0_U256);

/// Checks that `v`, `r` and `s` form a canonical signature.
///
/// `v` is the recovery id (0 or 1), `r` must lie in `[1, n)` and `s` in `[1, n/2]`.
pub fn validate_signature_values(v: u8, r: &U256, s: &U256) -> bool {
    if v > 1 {
        return false;
    }
    !r.is_zero() && !s.is_zero() && *r < SECP256K1N && *s <= SECP256K1N_HALF
}

/// Recovers the signer address of a message hash.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EcRecover {
    gas: u64,
}

impl EcRecover {
    /// `ecrecover` priced at a fixed `gas`.
    pub const fn new(gas: u64) -> Self {
        Self { gas }
    }
}

impl PrecompiledContract for EcRecover {
    fn required_gas(&self, _input: &[u8]) -> u64 {
        self.gas
    }

    fn run(&self, input: &[u8]) -> PrecompileResult {
        let input = right_pad::<128>(input);

        // `v` is a 32-byte big-endian integer, only its last byte may be set.
        if input[32..63].iter().any(|&b| b != 0) {
            return Ok(PrecompileOutput::NoOutput);
        }
        let v = input[63].wrapping_sub(27);
        let r = U256::from_be_slice(&input[64..96]);
        let s = U256::from_be_slice(&input[96..128]);
        if !validate_signature_values(v, &r, &s) {
            return Ok(PrecompileOutput::NoOutput);
        }

        let msg = B256::from_slice(&input[0..32]);
        let sig = B512::from_slice(&input[64..128]);
        match ecrecover(&sig, v, &msg) {
            Ok(address) => Ok(PrecompileOutput::Returned(Bytes::copy_from_slice(
                address.as_slice(),
            ))),
            Err(err) => {
                log::trace!(target: "precompile", "ecrecover failed: {err}");
                Ok(PrecompileOutput::NoOutput)
            }
        }
    }
}
