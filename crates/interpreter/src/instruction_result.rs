/// Outcome code of an instruction or call.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InstructionResult {
    // success codes
    /// Execution continues.
    #[default]
    Continue = 0x00,
    /// Execution stopped without output.
    Stop,
    /// Execution returned output.
    Return,

    // error codes
    /// A native contract could not be paid for.
    PrecompileOOG = 0x50,
    /// A native contract rejected its input.
    PrecompileError,
    /// Not enough items on the stack.
    StackUnderflow,
    /// The stack would grow past [`crate::STACK_LIMIT`].
    StackOverflow,
}

impl InstructionResult {
    /// Returns whether the result is a success.
    #[inline]
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Continue | Self::Stop | Self::Return)
    }

    /// Returns whether the result is an error.
    #[inline]
    pub const fn is_error(self) -> bool {
        matches!(
            self,
            Self::PrecompileOOG | Self::PrecompileError | Self::StackUnderflow | Self::StackOverflow
        )
    }
}
