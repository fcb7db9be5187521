//! # kestrel-precompile
//!
//! Native contracts living at fixed addresses: signature recovery, SHA-256,
//! RIPEMD-160, identity, modular exponentiation and the bn128 curve
//! operations (addition, scalar multiplication and pairing check).
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(not(feature = "std"), no_std)]

#[macro_use]
#[cfg(not(feature = "std"))]
extern crate alloc as std;

pub mod bn128;
pub mod hash;
pub mod identity;
pub mod interface;
pub mod modexp;
pub mod schedule;
pub mod secp256k1;
pub mod utilities;

pub use interface::*;
pub use primitives;
pub use primitives::Bytes;
pub use schedule::GasSchedule;

use crate::{
    bn128::{Bn128Add, Bn128Mul, Bn128Pair},
    hash::{Ripemd160, Sha256},
    identity::Identity,
    modexp::ModExp,
    secp256k1::EcRecover,
};
use once_cell::race::OnceBox;
use primitives::{hardfork::SpecId, Address, HashMap, HashSet};
use std::{boxed::Box, vec::Vec};

/// Calculates the linear cost `ceil(len / 32) * word + base` of a precompile.
///
/// Saturates at [`u64::MAX`] instead of wrapping.
#[inline]
pub fn calc_linear_cost_u32(len: usize, base: u64, word: u64) -> u64 {
    (len as u64)
        .div_ceil(32)
        .saturating_mul(word)
        .saturating_add(base)
}

/// The closed set of native contracts.
///
/// Every variant carries the gas constants of the era it was built for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Precompile {
    /// `ecrecover` at address `0x01`.
    EcRecover(EcRecover),
    /// SHA-256 at address `0x02`.
    Sha256(Sha256),
    /// RIPEMD-160 at address `0x03`.
    Ripemd160(Ripemd160),
    /// Identity at address `0x04`.
    Identity(Identity),
    /// Modular exponentiation at address `0x05`.
    ModExp(ModExp),
    /// bn128 point addition at address `0x06`.
    Bn128Add(Bn128Add),
    /// bn128 scalar multiplication at address `0x07`.
    Bn128Mul(Bn128Mul),
    /// bn128 pairing check at address `0x08`.
    Bn128Pair(Bn128Pair),
}

impl Precompile {
    /// Returns a short human readable name of the contract.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::EcRecover(_) => "ecrecover",
            Self::Sha256(_) => "sha256",
            Self::Ripemd160(_) => "ripemd160",
            Self::Identity(_) => "identity",
            Self::ModExp(_) => "modexp",
            Self::Bn128Add(_) => "bn128_add",
            Self::Bn128Mul(_) => "bn128_mul",
            Self::Bn128Pair(_) => "bn128_pair",
        }
    }
}

impl PrecompiledContract for Precompile {
    fn required_gas(&self, input: &[u8]) -> u64 {
        match self {
            Self::EcRecover(p) => p.required_gas(input),
            Self::Sha256(p) => p.required_gas(input),
            Self::Ripemd160(p) => p.required_gas(input),
            Self::Identity(p) => p.required_gas(input),
            Self::ModExp(p) => p.required_gas(input),
            Self::Bn128Add(p) => p.required_gas(input),
            Self::Bn128Mul(p) => p.required_gas(input),
            Self::Bn128Pair(p) => p.required_gas(input),
        }
    }

    fn run(&self, input: &[u8]) -> PrecompileResult {
        match self {
            Self::EcRecover(p) => p.run(input),
            Self::Sha256(p) => p.run(input),
            Self::Ripemd160(p) => p.run(input),
            Self::Identity(p) => p.run(input),
            Self::ModExp(p) => p.run(input),
            Self::Bn128Add(p) => p.run(input),
            Self::Bn128Mul(p) => p.run(input),
            Self::Bn128Pair(p) => p.run(input),
        }
    }
}

macro_rules! impl_from_contract {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Precompile {
                #[inline]
                fn from(contract: $variant) -> Self {
                    Self::$variant(contract)
                }
            }
        )*
    };
}

impl_from_contract!(EcRecover, Sha256, Ripemd160, Identity, ModExp, Bn128Add, Bn128Mul, Bn128Pair);

/// Address indexed set of native contracts for one protocol era.
#[derive(Clone, Default, Debug)]
pub struct Precompiles {
    /// Precompiles
    inner: HashMap<Address, Precompile>,
    /// Addresses of precompile
    addresses: HashSet<Address>,
}

impl Precompiles {
    /// Returns the precompiles for the given spec.
    pub fn new(spec: PrecompileSpecId) -> &'static Self {
        match spec {
            PrecompileSpecId::HOMESTEAD => Self::homestead(),
            PrecompileSpecId::BYZANTIUM => Self::byzantium(),
            PrecompileSpecId::LATEST => Self::latest(),
        }
    }

    /// Builds an owned set of precompiles for the given spec, priced with `schedule`.
    pub fn with_schedule(spec: PrecompileSpecId, schedule: &GasSchedule) -> Self {
        let mut precompiles = Self::default();
        precompiles.extend([
            PrecompileWithAddress::new(crate::secp256k1::ADDRESS, EcRecover::new(schedule.ecrecover)),
            PrecompileWithAddress::new(
                hash::SHA256_ADDRESS,
                Sha256::new(schedule.sha256_base, schedule.sha256_per_word),
            ),
            PrecompileWithAddress::new(
                hash::RIPEMD160_ADDRESS,
                Ripemd160::new(schedule.ripemd160_base, schedule.ripemd160_per_word),
            ),
            PrecompileWithAddress::new(
                identity::ADDRESS,
                Identity::new(schedule.identity_base, schedule.identity_per_word),
            ),
        ]);

        if spec >= PrecompileSpecId::BYZANTIUM {
            precompiles.extend([
                // EIP-198: Big integer modular exponentiation.
                PrecompileWithAddress::new(
                    modexp::ADDRESS,
                    ModExp::new(schedule.modexp_quad_coeff_div),
                ),
                // EIP-196: Precompiled contracts for addition and scalar multiplication on the elliptic curve alt_bn128.
                PrecompileWithAddress::new(bn128::add::ADDRESS, Bn128Add::new(schedule.bn128_add)),
                PrecompileWithAddress::new(bn128::mul::ADDRESS, Bn128Mul::new(schedule.bn128_mul)),
                // EIP-197: Precompiled contracts for optimal ate pairing check on the elliptic curve alt_bn128.
                PrecompileWithAddress::new(
                    bn128::pair::ADDRESS,
                    Bn128Pair::new(schedule.bn128_pair_base, schedule.bn128_pair_per_point),
                ),
            ]);
        }

        precompiles
    }

    /// Returns precompiles for Homestead spec.
    pub fn homestead() -> &'static Self {
        static INSTANCE: OnceBox<Precompiles> = OnceBox::new();
        INSTANCE.get_or_init(|| {
            Box::new(Self::with_schedule(
                PrecompileSpecId::HOMESTEAD,
                &GasSchedule::DEFAULT,
            ))
        })
    }

    /// Returns precompiles for Byzantium spec.
    pub fn byzantium() -> &'static Self {
        static INSTANCE: OnceBox<Precompiles> = OnceBox::new();
        INSTANCE.get_or_init(|| {
            Box::new(Self::with_schedule(
                PrecompileSpecId::BYZANTIUM,
                &GasSchedule::DEFAULT,
            ))
        })
    }

    /// Returns the precompiles for the latest spec.
    pub fn latest() -> &'static Self {
        Self::byzantium()
    }

    /// Returns inner HashMap of precompiles.
    #[inline]
    pub fn inner(&self) -> &HashMap<Address, Precompile> {
        &self.inner
    }

    /// Returns an iterator over the precompiles addresses.
    #[inline]
    pub fn addresses(&self) -> impl ExactSizeIterator<Item = &Address> {
        self.inner.keys()
    }

    /// Consumes the type and returns all precompile addresses.
    #[inline]
    pub fn into_addresses(self) -> impl ExactSizeIterator<Item = Address> {
        self.inner.into_keys()
    }

    /// Is the given address a precompile.
    #[inline]
    pub fn contains(&self, address: &Address) -> bool {
        self.inner.contains_key(address)
    }

    /// Returns the precompile for the given address.
    #[inline]
    pub fn get(&self, address: &Address) -> Option<&Precompile> {
        self.inner.get(address)
    }

    /// Is the precompiles list empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the number of precompiles.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns the precompiles addresses as a set.
    pub fn addresses_set(&self) -> &HashSet<Address> {
        &self.addresses
    }

    /// Extends the precompiles with the given precompiles.
    ///
    /// Other precompiles with overwrite existing precompiles.
    #[inline]
    pub fn extend(&mut self, other: impl IntoIterator<Item = PrecompileWithAddress>) {
        let items: Vec<PrecompileWithAddress> = other.into_iter().collect();
        self.addresses.extend(items.iter().map(|p| *p.address()));
        self.inner.extend(items.into_iter().map(|p| (p.0, p.1)));
    }

    /// Returns complement of `other` in `self`.
    ///
    /// Two entries are considered equal if the precompile addresses are equal.
    pub fn difference(&self, other: &Self) -> Self {
        self.filtered(|address| !other.contains(address))
    }

    /// Returns intersection of `self` and `other`.
    ///
    /// Two entries are considered equal if the precompile addresses are equal.
    pub fn intersection(&self, other: &Self) -> Self {
        self.filtered(|address| other.contains(address))
    }

    fn filtered(&self, keep: impl Fn(&Address) -> bool) -> Self {
        let inner = self
            .inner
            .iter()
            .filter(|(address, _)| keep(address))
            .map(|(address, precompile)| (*address, *precompile))
            .collect::<HashMap<_, _>>();
        let addresses = inner.keys().copied().collect::<HashSet<_>>();
        Self { inner, addresses }
    }
}

/// A native contract paired with the address it is reachable at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PrecompileWithAddress(pub Address, pub Precompile);

impl PrecompileWithAddress {
    /// Pairs `contract` with `address`.
    #[inline]
    pub fn new(address: Address, contract: impl Into<Precompile>) -> Self {
        Self(address, contract.into())
    }

    /// Returns reference of address.
    #[inline]
    pub fn address(&self) -> &Address {
        &self.0
    }

    /// Returns reference of precompile.
    #[inline]
    pub fn precompile(&self) -> &Precompile {
        &self.1
    }
}

impl From<(Address, Precompile)> for PrecompileWithAddress {
    fn from(value: (Address, Precompile)) -> Self {
        Self(value.0, value.1)
    }
}

impl From<PrecompileWithAddress> for (Address, Precompile) {
    fn from(value: PrecompileWithAddress) -> Self {
        (value.0, value.1)
    }
}

/// Protocol eras that differ in their set of native contracts.
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PrecompileSpecId {
    /// Addresses `0x01..=0x04`.
    HOMESTEAD,
    /// Adds modexp and the bn128 contracts at `0x05..=0x08`.
    BYZANTIUM,
    /// The latest known era.
    LATEST,
}

impl From<SpecId> for PrecompileSpecId {
    fn from(spec_id: SpecId) -> Self {
        Self::from_spec_id(spec_id)
    }
}

impl PrecompileSpecId {
    /// Returns the appropriate precompile Spec for the primitive [SpecId].
    pub const fn from_spec_id(spec_id: SpecId) -> Self {
        use primitives::hardfork::SpecId::*;
        match spec_id {
            FRONTIER | FRONTIER_THAWING | HOMESTEAD | DAO_FORK | TANGERINE | SPURIOUS_DRAGON => {
                Self::HOMESTEAD
            }
            BYZANTIUM | CONSTANTINOPLE | PETERSBURG => Self::BYZANTIUM,
            LATEST => Self::LATEST,
        }
    }
}

/// Const function for making an address by concatenating the bytes from two given numbers.
///
/// Note that 32 + 128 = 160 = 20 bytes (the length of an address).
///
/// This function is used as a convenience for specifying the addresses of the various precompiles.
#[inline]
pub const fn u64_to_address(x: u64) -> Address {
    let x = x.to_be_bytes();
    Address::new([
        0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, x[0], x[1], x[2], x[3], x[4], x[5], x[6], x[7],
    ])
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn homestead_has_four_contracts() {
        let homestead = Precompiles::homestead();
        assert_eq!(homestead.len(), 4);
        for n in 1..=4 {
            assert!(homestead.contains(&u64_to_address(n)));
        }
        assert!(!homestead.contains(&u64_to_address(5)));
    }

    #[test]
    fn byzantium_adds_modexp_and_bn128() {
        let difference = Precompiles::byzantium().difference(Precompiles::homestead());
        assert_eq!(difference.len(), 4);
        for n in 5..=8 {
            assert!(difference.contains(&u64_to_address(n)));
        }
        assert!(Precompiles::homestead()
            .difference(Precompiles::byzantium())
            .is_empty());
    }

    #[test]
    fn test_intersection_precompile_sets() {
        let intersection = Precompiles::homestead().intersection(Precompiles::byzantium());
        assert_eq!(intersection.len(), 4);
        assert_eq!(intersection.addresses_set().len(), 4);
    }

    #[test]
    fn contracts_sit_at_their_addresses() {
        let precompiles = Precompiles::byzantium();
        let names = [
            "ecrecover",
            "sha256",
            "ripemd160",
            "identity",
            "modexp",
            "bn128_add",
            "bn128_mul",
            "bn128_pair",
        ];
        for (n, name) in (1..=8).zip(names) {
            assert_eq!(precompiles.get(&u64_to_address(n)).unwrap().name(), name);
        }
        assert!(precompiles.get(&u64_to_address(9)).is_none());
    }

    #[test]
    fn spec_id_mapping() {
        assert_eq!(
            PrecompileSpecId::from(SpecId::SPURIOUS_DRAGON),
            PrecompileSpecId::HOMESTEAD
        );
        assert_eq!(
            PrecompileSpecId::from(SpecId::PETERSBURG),
            PrecompileSpecId::BYZANTIUM
        );
        assert_eq!(Precompiles::new(PrecompileSpecId::LATEST).len(), 8);
    }

    #[test]
    fn custom_schedule_prices_contracts() {
        let schedule = GasSchedule {
            ecrecover: 1,
            ..GasSchedule::DEFAULT
        };
        let precompiles = Precompiles::with_schedule(PrecompileSpecId::HOMESTEAD, &schedule);
        let ecrecover = precompiles.get(&u64_to_address(1)).unwrap();
        assert_eq!(ecrecover.required_gas(&[]), 1);
    }

    #[test]
    fn extend_overwrites() {
        let mut precompiles = Precompiles::homestead().clone();
        precompiles.extend([PrecompileWithAddress::new(
            u64_to_address(4),
            Identity::new(0, 0),
        )]);
        assert_eq!(precompiles.len(), 4);
        let identity = precompiles.get(&u64_to_address(4)).unwrap();
        assert_eq!(identity.required_gas(&[0; 64]), 0);
    }

    #[test]
    fn linear_cost_saturates() {
        assert_eq!(calc_linear_cost_u32(0, 15, 3), 15);
        assert_eq!(calc_linear_cost_u32(33, 15, 3), 21);
        assert_eq!(calc_linear_cost_u32(usize::MAX, 1, u64::MAX), u64::MAX);
    }
}
