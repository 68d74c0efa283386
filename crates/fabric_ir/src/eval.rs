//! Reference semantics for values and statements.
//!
//! The evaluator is a direct interpreter: assignments take effect
//! immediately and in statement order, and a switch runs only the body of
//! its first matching case. It supports values up to 64 bits wide.

use crate::error::EvalError;
use crate::ids::SignalId;
use crate::signal::Signal;
use crate::stmt::Statement;
use crate::value::{width_mask, BinaryOp, UnaryOp, Value};
use std::collections::HashMap;

/// Signal state plus an interpreter over it. Unset signals read as zero.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    state: HashMap<SignalId, u64>,
}

impl Evaluator {
    /// Creates an evaluator with every signal at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `signal` to `value`, truncated to the signal's width.
    pub fn set(&mut self, signal: Signal, value: u64) {
        self.state
            .insert(signal.id(), value & width_mask(signal.width()));
    }

    /// The current value of `signal`.
    pub fn get(&self, signal: Signal) -> u64 {
        self.state.get(&signal.id()).copied().unwrap_or(0)
    }

    /// Evaluates `value` against the current state.
    pub fn eval(&self, value: &Value) -> Result<u64, EvalError> {
        let width = value.width();
        if width > 64 {
            return Err(EvalError::TooWide { width });
        }
        let mask = width_mask(width);
        let result = match value {
            Value::Const { value, .. } => *value,
            Value::Signal(signal) => self.get(*signal),
            Value::Slice { value, start, .. } => shr(self.eval(value)?, *start),
            Value::Cat(parts) => {
                let mut acc = 0u64;
                let mut offset = 0u32;
                for part in parts {
                    acc |= shl(self.eval(part)?, offset);
                    offset += part.width();
                }
                acc
            }
            Value::Unary { op, operand } => {
                let v = self.eval(operand)?;
                match op {
                    UnaryOp::Not => !v,
                    UnaryOp::Neg => v.wrapping_neg(),
                    UnaryOp::Bool => (v != 0) as u64,
                    UnaryOp::All => (v == width_mask(operand.width())) as u64,
                    UnaryOp::Xor => (v.count_ones() % 2) as u64,
                }
            }
            Value::Binary { op, lhs, rhs } => {
                let (l, r) = (self.eval(lhs)?, self.eval(rhs)?);
                match op {
                    BinaryOp::Add => l.wrapping_add(r),
                    BinaryOp::Sub => l.wrapping_sub(r),
                    BinaryOp::And => l & r,
                    BinaryOp::Or => l | r,
                    BinaryOp::Xor => l ^ r,
                    BinaryOp::Eq => (l == r) as u64,
                    BinaryOp::Ne => (l != r) as u64,
                    BinaryOp::Lt => (l < r) as u64,
                    BinaryOp::Le => (l <= r) as u64,
                    BinaryOp::Gt => (l > r) as u64,
                    BinaryOp::Ge => (l >= r) as u64,
                }
            }
        };
        Ok(result & mask)
    }

    /// Executes `statements` in order.
    pub fn execute(&mut self, statements: &[Statement]) -> Result<(), EvalError> {
        for stmt in statements {
            match stmt {
                Statement::Assign(assign) => {
                    let value = self.eval(assign.rhs())?;
                    self.write(assign.lhs(), value)?;
                }
                Statement::Switch(switch) => {
                    let test = self.eval(switch.test())?;
                    if let Some(body) = switch.select(test) {
                        self.execute(body)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn write(&mut self, target: &Value, value: u64) -> Result<(), EvalError> {
        let width = target.width();
        if width > 64 {
            return Err(EvalError::TooWide { width });
        }
        match target {
            Value::Signal(signal) => {
                self.set(*signal, value);
                Ok(())
            }
            Value::Slice { value: inner, start, end } => {
                let current = self.eval(inner)?;
                let field = shl(width_mask(end.saturating_sub(*start)), *start);
                let merged = (current & !field) | (shl(value, *start) & field);
                self.write(inner, merged)
            }
            Value::Cat(parts) => {
                let mut offset = 0u32;
                for part in parts {
                    let part_width = part.width();
                    self.write(part, shr(value, offset) & width_mask(part_width))?;
                    offset += part_width;
                }
                Ok(())
            }
            _ => Err(EvalError::NotAssignable),
        }
    }
}

fn shl(value: u64, amount: u32) -> u64 {
    value.checked_shl(amount).unwrap_or(0)
}

fn shr(value: u64, amount: u32) -> u64 {
    value.checked_shr(amount).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IrContext;

    #[test]
    fn arithmetic_wraps_to_width() {
        let ctx = IrContext::new();
        let a = ctx.signal("a", 4);
        let mut ev = Evaluator::new();
        ev.set(a, 0xf);
        assert_eq!(ev.eval(&(a.value() + 1u64)).unwrap(), 0x10);
        assert_eq!(ev.eval(&(!a.value())).unwrap(), 0);
        assert_eq!(ev.eval(&a.value().all()).unwrap(), 1);
        assert_eq!(ev.eval(&a.value().parity()).unwrap(), 0);
    }

    #[test]
    fn cat_and_slice() {
        let ctx = IrContext::new();
        let lo = ctx.signal("lo", 2);
        let hi = ctx.signal("hi", 2);
        let mut ev = Evaluator::new();
        ev.set(lo, 0b01);
        ev.set(hi, 0b10);
        let cat = Value::cat([lo.value(), hi.value()]);
        assert_eq!(ev.eval(&cat).unwrap(), 0b1001);
        assert_eq!(ev.eval(&cat.slice(1, 3).unwrap()).unwrap(), 0b00);
    }

    #[test]
    fn write_through_slice_and_cat() {
        let ctx = IrContext::new();
        let a = ctx.signal("a", 4);
        let b = ctx.signal("b", 2);
        let mut ev = Evaluator::new();
        ev.set(a, 0b1111);
        let lhs = Value::cat([a.value().slice(1, 3).unwrap(), b.value()]);
        ev.execute(&[lhs.assign(Value::constant(0b1000, 4)).unwrap().into()])
            .unwrap();
        assert_eq!(ev.get(a), 0b1001);
        assert_eq!(ev.get(b), 0b10);
    }

    #[test]
    fn too_wide_rejected() {
        let ctx = IrContext::new();
        let wide = ctx.signal("wide", 65);
        assert_eq!(
            Evaluator::new().eval(&wide.value()),
            Err(EvalError::TooWide { width: 65 })
        );
    }
}
