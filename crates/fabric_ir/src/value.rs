//! The value algebra: constants, signals, slices, concatenations and operators.

use crate::signal::Signal;
use crate::stmt::Assign;
use crate::IrError;
use serde::{Deserialize, Serialize};
use std::ops::{Add, BitAnd, BitOr, BitXor, Not, Sub};

/// A unary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    /// Bitwise NOT.
    Not,
    /// Two's complement negation.
    Neg,
    /// OR-reduction: 1 if any bit is set.
    Bool,
    /// AND-reduction: 1 if every bit is set.
    All,
    /// XOR-reduction (parity).
    Xor,
}

/// A binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    /// Addition, one bit wider than the wider operand.
    Add,
    /// Subtraction, one bit wider than the wider operand.
    Sub,
    /// Bitwise AND.
    And,
    /// Bitwise OR.
    Or,
    /// Bitwise XOR.
    Xor,
    /// Equality.
    Eq,
    /// Inequality.
    Ne,
    /// Unsigned less than.
    Lt,
    /// Unsigned less than or equal.
    Le,
    /// Unsigned greater than.
    Gt,
    /// Unsigned greater than or equal.
    Ge,
}

impl BinaryOp {
    /// Returns `true` for operators producing a single comparison bit.
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Eq | BinaryOp::Ne | BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge
        )
    }
}

/// An expression over signals.
///
/// Values are plain trees compared structurally; see [`ValueKey`](crate::ValueKey).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    /// A constant. `value` never has bits set at or above `width`.
    Const {
        /// The constant bits.
        value: u64,
        /// The bit width.
        width: u32,
    },
    /// A whole signal.
    Signal(Signal),
    /// Bits `start..end` of `value`.
    Slice {
        /// The sliced value.
        value: Box<Value>,
        /// First bit (inclusive).
        start: u32,
        /// Last bit (exclusive).
        end: u32,
    },
    /// Concatenation; the first part occupies the least significant bits.
    Cat(Vec<Value>),
    /// A unary operation.
    Unary {
        /// The operator.
        op: UnaryOp,
        /// The operand.
        operand: Box<Value>,
    },
    /// A binary operation.
    Binary {
        /// The operator.
        op: BinaryOp,
        /// Left operand.
        lhs: Box<Value>,
        /// Right operand.
        rhs: Box<Value>,
    },
}

impl Value {
    /// Creates a constant of the given width, truncating `value` to fit.
    pub fn constant(value: u64, width: u32) -> Self {
        Value::Const {
            value: value & width_mask(width),
            width,
        }
    }

    /// Concatenates `parts`, the first one ending up in the least significant bits.
    pub fn cat(parts: impl IntoIterator<Item = Value>) -> Self {
        Value::Cat(parts.into_iter().collect())
    }

    /// The bit width of this value.
    pub fn width(&self) -> u32 {
        match self {
            Value::Const { width, .. } => *width,
            Value::Signal(signal) => signal.width(),
            Value::Slice { start, end, .. } => end.saturating_sub(*start),
            Value::Cat(parts) => parts.iter().map(Value::width).sum(),
            Value::Unary { op, operand } => match op {
                UnaryOp::Not | UnaryOp::Neg => operand.width(),
                UnaryOp::Bool | UnaryOp::All | UnaryOp::Xor => 1,
            },
            Value::Binary { op, lhs, rhs } => {
                let widest = lhs.width().max(rhs.width());
                match op {
                    BinaryOp::Add | BinaryOp::Sub => widest + 1,
                    BinaryOp::And | BinaryOp::Or | BinaryOp::Xor => widest,
                    _ => 1,
                }
            }
        }
    }

    /// Bits `start..end` of this value.
    ///
    /// Fails if `start > end` or `end` exceeds the width of the value.
    pub fn slice(self, start: u32, end: u32) -> Result<Self, IrError> {
        let width = self.width();
        if start > end || end > width {
            return Err(IrError::SliceOutOfBounds { start, end, width });
        }
        Ok(Value::Slice {
            value: Box::new(self),
            start,
            end,
        })
    }

    /// Single bit `index` of this value.
    pub fn bit(self, index: u32) -> Result<Self, IrError> {
        self.slice(index, index.saturating_add(1))
    }

    fn unary(self, op: UnaryOp) -> Self {
        Value::Unary {
            op,
            operand: Box::new(self),
        }
    }

    /// Builds a binary operation.
    pub fn binary(op: BinaryOp, lhs: impl Into<Value>, rhs: impl Into<Value>) -> Self {
        Value::Binary {
            op,
            lhs: Box::new(lhs.into()),
            rhs: Box::new(rhs.into()),
        }
    }

    /// OR-reduction: a single bit that is 1 when any bit of `self` is set.
    pub fn bool(self) -> Self {
        self.unary(UnaryOp::Bool)
    }

    /// AND-reduction.
    pub fn all(self) -> Self {
        self.unary(UnaryOp::All)
    }

    /// XOR-reduction.
    pub fn parity(self) -> Self {
        self.unary(UnaryOp::Xor)
    }

    /// Two's complement negation.
    pub fn neg(self) -> Self {
        self.unary(UnaryOp::Neg)
    }

    /// Equality comparison, one bit wide.
    pub fn equals(self, rhs: impl Into<Value>) -> Self {
        Value::binary(BinaryOp::Eq, self, rhs)
    }

    /// Inequality comparison, one bit wide.
    pub fn not_equals(self, rhs: impl Into<Value>) -> Self {
        Value::binary(BinaryOp::Ne, self, rhs)
    }

    /// Builds the assignment `self = rhs`, provided `self` is assignable.
    pub fn assign(self, rhs: impl Into<Value>) -> Result<Assign, IrError> {
        Assign::new(self, rhs.into())
    }

    /// Returns `true` if a statement may write to this value.
    pub fn is_assignable(&self) -> bool {
        match self {
            Value::Signal(_) => true,
            Value::Slice { value, .. } => value.is_assignable(),
            Value::Cat(parts) => parts.iter().all(Value::is_assignable),
            _ => false,
        }
    }

    /// Every signal referenced by this value, in order of first appearance.
    pub fn signals(&self) -> Vec<Signal> {
        let mut out = Vec::new();
        self.collect_signals(&mut out);
        out
    }

    fn collect_signals(&self, out: &mut Vec<Signal>) {
        match self {
            Value::Const { .. } => {}
            Value::Signal(signal) => {
                if !out.contains(signal) {
                    out.push(*signal);
                }
            }
            Value::Slice { value, .. } => value.collect_signals(out),
            Value::Cat(parts) => parts.iter().for_each(|p| p.collect_signals(out)),
            Value::Unary { operand, .. } => operand.collect_signals(out),
            Value::Binary { lhs, rhs, .. } => {
                lhs.collect_signals(out);
                rhs.collect_signals(out);
            }
        }
    }
}

/// Mask with the low `width` bits set.
pub(crate) fn width_mask(width: u32) -> u64 {
    if width >= 64 {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

impl From<Signal> for Value {
    fn from(signal: Signal) -> Self {
        Value::Signal(signal)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Const {
            value: value as u64,
            width: 1,
        }
    }
}

/// An integer becomes a constant just wide enough to hold it (at least one bit).
impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::Const {
            value,
            width: (64 - value.leading_zeros()).max(1),
        }
    }
}

impl Not for Value {
    type Output = Value;

    fn not(self) -> Value {
        self.unary(UnaryOp::Not)
    }
}

macro_rules! impl_binary_operator {
    ($trait:ident, $method:ident, $op:expr) => {
        impl<R: Into<Value>> $trait<R> for Value {
            type Output = Value;

            fn $method(self, rhs: R) -> Value {
                Value::binary($op, self, rhs)
            }
        }
    };
}

impl_binary_operator!(Add, add, BinaryOp::Add);
impl_binary_operator!(Sub, sub, BinaryOp::Sub);
impl_binary_operator!(BitAnd, bitand, BinaryOp::And);
impl_binary_operator!(BitOr, bitor, BinaryOp::Or);
impl_binary_operator!(BitXor, bitxor, BinaryOp::Xor);
