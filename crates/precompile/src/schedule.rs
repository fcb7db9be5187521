//! Gas constants of the native contracts.

/// Every gas constant the native contracts are priced with.
///
/// [`GasSchedule::DEFAULT`] holds the mainnet values. Chains with a different
/// pricing build their registry with [`crate::Precompiles::with_schedule`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GasSchedule {
    /// Fixed cost of `ecrecover`.
    pub ecrecover: u64,
    /// Base cost of SHA-256.
    pub sha256_base: u64,
    /// SHA-256 cost per 32-byte word of input.
    pub sha256_per_word: u64,
    /// Base cost of RIPEMD-160.
    pub ripemd160_base: u64,
    /// RIPEMD-160 cost per 32-byte word of input.
    pub ripemd160_per_word: u64,
    /// Base cost of identity.
    pub identity_base: u64,
    /// Identity cost per 32-byte word of input.
    pub identity_per_word: u64,
    /// Divisor of the modexp complexity.
    pub modexp_quad_coeff_div: u64,
    /// Fixed cost of bn128 addition.
    pub bn128_add: u64,
    /// Fixed cost of bn128 scalar multiplication.
    pub bn128_mul: u64,
    /// Base cost of the bn128 pairing check.
    pub bn128_pair_base: u64,
    /// Bn128 pairing check cost per pair.
    pub bn128_pair_per_point: u64,
}

impl GasSchedule {
    /// Mainnet pricing, EIP-198 and EIP-196/197 as introduced in Byzantium.
    pub const DEFAULT: Self = Self {
        ecrecover: 3_000,
        sha256_base: 60,
        sha256_per_word: 12,
        ripemd160_base: 600,
        ripemd160_per_word: 120,
        identity_base: 15,
        identity_per_word: 3,
        modexp_quad_coeff_div: 20,
        bn128_add: 500,
        bn128_mul: 40_000,
        bn128_pair_base: 100_000,
        bn128_pair_per_point: 80_000,
    };
}

impl Default for GasSchedule {
    fn default() -> Self {
        Self::DEFAULT
    }
}
