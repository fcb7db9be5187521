//! Operand stack.
use crate::InstructionResult;
use core::fmt;
use primitives::U256;
use std::vec::Vec;

/// Interpreter stack limit.
pub const STACK_LIMIT: usize = 1024;

/// Interpreter stack.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stack {
    data: Vec<U256>,
}

impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, x) in self.data.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{x}")?;
        }
        f.write_str("]")
    }
}

impl Default for Stack {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Stack {
    /// Instantiate a new stack with the [default stack limit][STACK_LIMIT].
    #[inline]
    pub fn new() -> Self {
        Self {
            data: Vec::with_capacity(STACK_LIMIT),
        }
    }

    /// Returns the length of the stack in words.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns whether the stack is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the underlying data of the stack, bottom first.
    #[inline]
    pub fn data(&self) -> &[U256] {
        &self.data
    }

    /// Returns `StackUnderflow` unless the stack holds at least `n` items.
    #[inline]
    pub fn require(&self, n: usize) -> Result<(), InstructionResult> {
        if self.data.len() < n {
            log::trace!(target: "stack", "stack underflow ({} < {n})", self.data.len());
            return Err(InstructionResult::StackUnderflow);
        }
        Ok(())
    }

    /// Push a new value onto the stack.
    ///
    /// If it will exceed the stack limit, returns `StackOverflow` error and leaves the stack
    /// unchanged.
    #[inline]
    pub fn push(&mut self, value: U256) -> Result<(), InstructionResult> {
        if self.data.len() == STACK_LIMIT {
            return Err(InstructionResult::StackOverflow);
        }
        self.data.push(value);
        Ok(())
    }

    /// Pushes all `values`, the last one ends up on top.
    ///
    /// Either all values are pushed or, on `StackOverflow`, none.
    #[inline]
    pub fn push_n(&mut self, values: &[U256]) -> Result<(), InstructionResult> {
        if self.data.len() + values.len() > STACK_LIMIT {
            return Err(InstructionResult::StackOverflow);
        }
        self.data.extend_from_slice(values);
        Ok(())
    }

    /// Removes the topmost element from the stack and returns it, or `StackUnderflow` if it is
    /// empty.
    #[inline]
    pub fn pop(&mut self) -> Result<U256, InstructionResult> {
        self.data.pop().ok_or(InstructionResult::StackUnderflow)
    }

    /// Peek a value at given index for the stack, where the top of
    /// the stack is at index `0`. If the index is too large,
    /// `StackUnderflow` is returned.
    #[inline]
    pub fn peek(&self, no_from_top: usize) -> Result<U256, InstructionResult> {
        self.back(no_from_top).copied()
    }

    /// Returns a reference to the item `no_from_top` positions below the top.
    #[inline]
    pub fn back(&self, no_from_top: usize) -> Result<&U256, InstructionResult> {
        self.data
            .len()
            .checked_sub(1)
            .and_then(|top| top.checked_sub(no_from_top))
            .map(|index| &self.data[index])
            .ok_or(InstructionResult::StackUnderflow)
    }

    /// Duplicates the `n`th value from the top of the stack, `1` being the top.
    #[inline]
    pub fn dup(&mut self, n: usize) -> Result<(), InstructionResult> {
        let len = self.data.len();
        if n == 0 || len < n {
            Err(InstructionResult::StackUnderflow)
        } else if len + 1 > STACK_LIMIT {
            Err(InstructionResult::StackOverflow)
        } else {
            self.data.push(self.data[len - n]);
            Ok(())
        }
    }

    /// Swaps the topmost value with the `n`th value below it.
    #[inline]
    pub fn swap(&mut self, n: usize) -> Result<(), InstructionResult> {
        let len = self.data.len();
        if len <= n {
            return Err(InstructionResult::StackUnderflow);
        }
        let last = len - 1;
        self.data.swap(last, last - n);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn stack(values: &[u64]) -> Stack {
        let mut stack = Stack::new();
        for value in values {
            stack.push(U256::from(*value)).unwrap();
        }
        stack
    }

    #[test]
    fn push_pop() {
        let mut stack = stack(&[1, 2]);
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.pop(), Ok(U256::from(2)));
        assert_eq!(stack.pop(), Ok(U256::from(1)));
        assert_eq!(stack.pop(), Err(InstructionResult::StackUnderflow));
        assert!(stack.is_empty());
    }

    #[test]
    fn overflow_leaves_stack_unchanged() {
        let mut stack = Stack::new();
        stack.push_n(&[U256::ZERO; STACK_LIMIT]).unwrap();
        assert_eq!(stack.push(U256::from(1)), Err(InstructionResult::StackOverflow));
        assert_eq!(stack.dup(1), Err(InstructionResult::StackOverflow));
        assert_eq!(stack.len(), STACK_LIMIT);

        stack.pop().unwrap();
        assert_eq!(
            stack.push_n(&[U256::from(1), U256::from(2)]),
            Err(InstructionResult::StackOverflow)
        );
        assert_eq!(stack.len(), STACK_LIMIT - 1);
    }

    #[rstest]
    #[case::top(0, Ok(U256::from(3)))]
    #[case::bottom(2, Ok(U256::from(1)))]
    #[case::past_bottom(3, Err(InstructionResult::StackUnderflow))]
    #[case::max_index(usize::MAX, Err(InstructionResult::StackUnderflow))]
    fn peek(#[case] n: usize, #[case] expected: Result<U256, InstructionResult>) {
        let stack = stack(&[1, 2, 3]);
        assert_eq!(stack.peek(n), expected);
        assert_eq!(stack.back(n).copied(), expected);
    }

    #[rstest]
    #[case::dup1(1, &[1, 2, 3, 3])]
    #[case::dup3(3, &[1, 2, 3, 1])]
    fn dup(#[case] n: usize, #[case] expected: &[u64]) {
        let mut stack = stack(&[1, 2, 3]);
        stack.dup(n).unwrap();
        assert_eq!(stack, self::stack(expected));
    }

    #[rstest]
    #[case::swap1(1, &[1, 3, 2])]
    #[case::swap2(2, &[3, 2, 1])]
    fn swap(#[case] n: usize, #[case] expected: &[u64]) {
        let mut stack = stack(&[1, 2, 3]);
        stack.swap(n).unwrap();
        assert_eq!(stack, self::stack(expected));
    }

    #[test]
    fn underflows() {
        let mut stack = stack(&[1, 2]);
        assert_eq!(stack.dup(0), Err(InstructionResult::StackUnderflow));
        assert_eq!(stack.dup(3), Err(InstructionResult::StackUnderflow));
        assert_eq!(stack.swap(2), Err(InstructionResult::StackUnderflow));
        assert_eq!(stack.require(2), Ok(()));
        assert_eq!(stack.require(3), Err(InstructionResult::StackUnderflow));
        assert_eq!(stack.data(), &[U256::from(1), U256::from(2)]);
    }

    #[test]
    fn display() {
        assert_eq!(Stack::new().to_string(), "[]");
        assert_eq!(stack(&[1, 20]).to_string(), "[1, 20]");
    }
}
