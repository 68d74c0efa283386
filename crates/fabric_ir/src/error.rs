//! Error types for malformed IR and evaluation failures.

/// Errors raised when constructing IR nodes with an invalid shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IrError {
    /// A pattern contains a character other than `0`, `1` or `-`.
    #[error("invalid character {ch:?} in pattern `{pattern}`; expected `0`, `1` or `-`")]
    InvalidPattern {
        /// The rejected pattern text.
        pattern: String,
        /// The first offending character.
        ch: char,
    },

    /// A switch case pattern does not have the width of the switch test.
    #[error("pattern `{pattern}` has width {actual}, but the switch test is {expected} bits wide")]
    PatternWidth {
        /// The offending pattern.
        pattern: String,
        /// Width of the pattern.
        actual: u32,
        /// Width of the test value.
        expected: u32,
    },

    /// An integer does not fit in the requested number of bits.
    #[error("value {value} does not fit in {width} bits")]
    ValueOverflow {
        /// The integer value.
        value: u64,
        /// The available width.
        width: u32,
    },

    /// A slice range that is reversed or reaches past the sliced value.
    #[error("slice {start}..{end} out of bounds for width {width}")]
    SliceOutOfBounds {
        /// First bit (inclusive).
        start: u32,
        /// Last bit (exclusive).
        end: u32,
        /// Width of the sliced value.
        width: u32,
    },

    /// The left-hand side of an assignment is not a signal, slice or concatenation of those.
    #[error("left-hand side of assignment is not assignable: {0}")]
    NotAssignable(String),
}

/// Errors raised while evaluating values or executing statements.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    /// The evaluator works on values of at most 64 bits.
    #[error("value of width {width} exceeds the 64-bit evaluation limit")]
    TooWide {
        /// Width of the rejected value.
        width: u32,
    },

    /// A write targeted something that cannot hold state.
    #[error("cannot write to a non-assignable value")]
    NotAssignable,
}
