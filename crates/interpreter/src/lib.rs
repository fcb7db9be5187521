//! # kestrel-interpreter
//!
//! The parts of the interpreter the native contracts are called from: the gas
//! account of a call frame, the operand stack and the address level
//! precompile call.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc as std;

pub mod gas;
mod instruction_result;
mod precompile_call;
pub mod stack;

// Reexport primary types.
pub use gas::Gas;
pub use instruction_result::InstructionResult;
pub use precompile_call::{call_precompile, PrecompileCall};
pub use stack::{Stack, STACK_LIMIT};

#[doc(hidden)]
pub use precompile;
#[doc(hidden)]
pub use primitives;
