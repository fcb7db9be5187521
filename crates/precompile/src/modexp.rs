//! Modular exponentiation precompile, [EIP-198](https://eips.ethereum.org/EIPS/eip-198).
//!
//! Input format:
//! [32 bytes base length][32 bytes exponent length][32 bytes modulus length][base][exponent][modulus]
//!
//! All numbers are big-endian and missing trailing bytes read as zero.
use crate::{
    u64_to_address,
    utilities::{left_pad_vec, read_u256, right_pad_with_offset_vec},
    PrecompileError, PrecompileOutput, PrecompileResult, PrecompiledContract,
};
use core::cmp::{max, min};
use primitives::{Address, Bytes, U256};

/// Address of the modexp precompile.
pub const ADDRESS: Address = u64_to_address(5);

/// Length of the three length words at the start of the input.
const HEADER_LENGTH: usize = 96;

/// Computes `base^exponent % modulus` on arbitrary length integers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ModExp {
    quad_coeff_div: u64,
}

impl ModExp {
    /// Modexp with the complexity divided by `quad_coeff_div`.
    pub const fn new(quad_coeff_div: u64) -> Self {
        Self { quad_coeff_div }
    }
}

/// Three length words of the input.
fn read_lengths(input: &[u8]) -> (U256, U256, U256) {
    (
        read_u256(input, 0),
        read_u256(input, 32),
        read_u256(input, 64),
    )
}

/// Returns the exponent bytes that price the call: at most its first 32.
///
/// The head is zero unless the input holds more than `base_len` bytes past the header.
fn exp_head(data: &[u8], base_len: U256, exp_len: U256) -> U256 {
    if U256::from(data.len()) <= base_len {
        return U256::ZERO;
    }
    // `base_len` is below `data.len()` here.
    let offset = base_len.saturating_to::<usize>();
    let len = min(exp_len, U256::from(32)).saturating_to::<usize>();
    U256::from_be_slice(&right_pad_with_offset_vec(data, offset, len))
}

/// Multiplication complexity of EIP-198, `None` if it does not fit in 256 bits.
fn mult_complexity(x: U256) -> Option<U256> {
    let x_sq = x.checked_mul(x)?;
    if x <= U256::from(64) {
        Some(x_sq)
    } else if x <= U256::from(1_024) {
        (x_sq / U256::from(4))
            .checked_add(U256::from(96).checked_mul(x)?)?
            .checked_sub(U256::from(3_072))
    } else {
        (x_sq / U256::from(16))
            .checked_add(U256::from(480).checked_mul(x)?)?
            .checked_sub(U256::from(199_680))
    }
}

/// Calculates the gas cost with Byzantium rules.
///
/// Saturates at [`u64::MAX`] whenever the exact cost does not fit in 64 bits.
pub fn byzantium_gas_calc(
    base_len: U256,
    exp_len: U256,
    mod_len: U256,
    exp_head: U256,
    quad_coeff_div: u64,
) -> u64 {
    let Some(complexity) = mult_complexity(max(base_len, mod_len)) else {
        return u64::MAX;
    };
    if complexity.is_zero() {
        return 0;
    }
    if quad_coeff_div == 0 {
        return u64::MAX;
    }

    let msb = exp_head.bit_len().saturating_sub(1);
    let adj_exp_len = exp_len
        .saturating_sub(U256::from(32))
        .checked_mul(U256::from(8))
        .and_then(|len| len.checked_add(U256::from(msb)));
    let Some(adj_exp_len) = adj_exp_len else {
        return u64::MAX;
    };

    match complexity.checked_mul(max(adj_exp_len, U256::from(1))) {
        Some(gas) => (gas / U256::from(quad_coeff_div)).saturating_to(),
        None => u64::MAX,
    }
}

impl PrecompiledContract for ModExp {
    fn required_gas(&self, input: &[u8]) -> u64 {
        let (base_len, exp_len, mod_len) = read_lengths(input);
        let data = input.get(HEADER_LENGTH..).unwrap_or_default();
        let exp_head = exp_head(data, base_len, exp_len);
        byzantium_gas_calc(base_len, exp_len, mod_len, exp_head, self.quad_coeff_div)
    }

    fn run(&self, input: &[u8]) -> PrecompileResult {
        let (base_len, exp_len, mod_len) = read_lengths(input);
        if base_len.is_zero() && mod_len.is_zero() {
            return Ok(PrecompileOutput::Returned(Bytes::new()));
        }

        // Only the modulus is ever allocated before it is known to be non-zero.
        let Ok(mod_len) = usize::try_from(mod_len) else {
            return Err(PrecompileError::ModexpLengthOverflow);
        };
        let zero_output = || Ok(PrecompileOutput::Returned(vec![0; mod_len].into()));

        // A modulus starting past any addressable input reads as zero.
        let (Ok(base_len), Ok(exp_len)) = (usize::try_from(base_len), usize::try_from(exp_len))
        else {
            return zero_output();
        };
        let Some(mod_offset) = base_len.checked_add(exp_len) else {
            return zero_output();
        };
        log::trace!(target: "precompile", "modexp lengths {base_len}/{exp_len}/{mod_len}");

        let data = input.get(HEADER_LENGTH..).unwrap_or_default();
        let modulus = right_pad_with_offset_vec(data, mod_offset, mod_len);
        if modulus.iter().all(|&b| b == 0) {
            return zero_output();
        }
        let base = right_pad_with_offset_vec(data, 0, base_len);
        let exponent = right_pad_with_offset_vec(data, base_len, exp_len);

        let output = aurora_engine_modexp::modexp(&base, &exponent, &modulus);
        Ok(PrecompileOutput::Returned(
            left_pad_vec(&output, mod_len).into_owned().into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use primitives::hex;
    use rstest::rstest;

    const SECP_P: &str = "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f";
    const SECP_P_MINUS_ONE: &str =
        "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2e";

    fn input(base_len: U256, exp_len: U256, mod_len: U256, body: &str) -> Vec<u8> {
        let mut input = Vec::new();
        input.extend(base_len.to_be_bytes::<32>());
        input.extend(exp_len.to_be_bytes::<32>());
        input.extend(mod_len.to_be_bytes::<32>());
        input.extend(hex::decode(body).unwrap());
        input
    }

    fn lens(base_len: u64, exp_len: u64, mod_len: u64, body: &str) -> Vec<u8> {
        input(
            U256::from(base_len),
            U256::from(exp_len),
            U256::from(mod_len),
            body,
        )
    }

    #[rstest]
    #[case::eip198_fermat(lens(1, 32, 32, &format!("03{SECP_P_MINUS_ONE}{SECP_P}")), 13_056, &format!("{}01", "00".repeat(31)))]
    #[case::zero_base(lens(0, 32, 32, &format!("{SECP_P_MINUS_ONE}{SECP_P}")), 13_056, &"00".repeat(32))]
    #[case::small(lens(1, 1, 1, "020205"), 0, "04")]
    #[case::short_modulus(lens(1, 1, 2, "020205"), 0, "0004")]
    #[case::all_lengths_zero(lens(0, 0, 0, ""), 0, "")]
    #[case::exponent_without_base_or_modulus(lens(0, 4, 0, "ffffffff"), 0, "")]
    #[case::zero_modulus(lens(1, 1, 4, "0703"), 0, "00000000")]
    #[case::long_exponent(lens(1, 64, 1, &format!("03{}01{}09", "00".repeat(31), "ff".repeat(32))), 12, "00")]
    #[case::data_len_equals_base_len(lens(2, 2, 2, "ffff"), 0, "0000")]
    #[case::data_len_above_base_len(lens(2, 2, 2, "ffff80"), 3, "0000")]
    fn modexp(#[case] input: Vec<u8>, #[case] gas: u64, #[case] expected: &str) {
        let modexp = ModExp::new(20);
        assert_eq!(modexp.required_gas(&input), gas);
        let output = modexp.run(&input).unwrap().into_bytes();
        assert_eq!(output[..], hex::decode(expected).unwrap()[..]);
    }

    #[rstest]
    #[case::huge_base_len(input(U256::from(1) << 64, U256::from(1), U256::from(1), ""), u64::MAX)]
    #[case::max_lengths(input(U256::MAX, U256::MAX, U256::MAX, ""), u64::MAX)]
    #[case::huge_exp_len(input(U256::ZERO, U256::from(1) << 64, U256::from(1), ""), 7_378_697_629_483_820_633)]
    #[case::huge_exp_len_with_base(input(U256::from(1), U256::from(1) << 64, U256::from(1), ""), 7_378_697_629_483_820_633)]
    #[case::huge_exp_len_without_modulus(input(U256::ZERO, U256::MAX, U256::ZERO, ""), 0)]
    #[case::mid_len(lens(300, 33, 300, ""), 19_291)]
    fn gas_only(#[case] input: Vec<u8>, #[case] gas: u64) {
        assert_eq!(ModExp::new(20).required_gas(&input), gas);
    }

    #[test]
    fn empty_input() {
        let modexp = ModExp::new(20);
        assert_eq!(modexp.required_gas(&[]), 0);
        assert_eq!(modexp.run(&[]).unwrap().into_bytes(), Bytes::new());
    }

    #[test]
    fn unaddressable_modulus_length_fails() {
        let input = input(U256::ZERO, U256::ZERO, U256::MAX, "");
        assert_eq!(
            ModExp::new(20).run(&input),
            Err(PrecompileError::ModexpLengthOverflow)
        );
    }

    #[rstest]
    #[case::huge_base_len(input(U256::MAX, U256::ZERO, U256::from(1), "02"))]
    #[case::huge_exp_len(input(U256::ZERO, U256::from(1) << 64, U256::from(1), "05"))]
    #[case::offset_overflow(input(U256::from(usize::MAX), U256::from(1), U256::from(2), "0205"))]
    fn modulus_past_input_reads_as_zero(#[case] input: Vec<u8>) {
        let modexp = ModExp::new(20);
        assert!(modexp.required_gas(&input) > 0);
        let output = modexp.run(&input).unwrap().into_bytes();
        assert_eq!(output[..], vec![0; input[95] as usize][..]);
    }

    #[test]
    fn zero_divisor_saturates() {
        let input = lens(1, 1, 1, "020205");
        assert_eq!(ModExp::new(0).required_gas(&input), u64::MAX);
        assert_eq!(ModExp::new(0).required_gas(&lens(0, 1, 0, "")), 0);
    }
}
