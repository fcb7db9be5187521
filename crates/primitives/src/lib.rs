//! # kestrel-primitives
//!
//! Value types shared by the kestrel crates: addresses, byte buffers, 256-bit
//! words and the protocol hardfork identifiers.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(not(feature = "std"), no_std)]

pub mod hardfork;

pub use alloy_primitives::{
    self, address, b256, bytes, hex, keccak256,
    map::{HashMap, HashSet},
    ruint, uint, Address, Bytes, B256, B512, U256,
};
