//! The If/Elif/Else accumulator and its lowering into a single switch.
//!
//! A chain with conditions `c1..ck` becomes one switch over `Cat(c1..ck)`,
//! `c1` in bit 0. Branch `i` gets a pattern that fixes only bit `i - 1` to
//! `1`; a trailing Else gets the all-don't-care pattern. Priority between
//! branches is carried purely by case order, so the emitted switch is only
//! correct under first-match-wins evaluation.
//! [`PriorityEncoding::Exclusive`] additionally pins every earlier bit to
//! `0` for evaluators that match cases independently.

use crate::errors::DslError;
use fabric_config::PriorityEncoding;
use fabric_ir::{Pattern, PatternBit, Statement, Switch, SwitchCases, Value};

/// Reduces a condition to a single bit: wide values become "is nonzero",
/// single-bit values are returned unchanged.
pub fn reduce_condition(cond: Value) -> Value {
    if cond.width() == 1 {
        cond
    } else {
        cond.bool()
    }
}

/// A pending If/Elif/Else chain.
#[derive(Debug, Default)]
pub(crate) struct IfChain {
    conditions: Vec<Value>,
    bodies: Vec<Vec<Statement>>,
}

impl IfChain {
    /// Returns `true` if no If has been closed since the last flush.
    pub(crate) fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Records a closed If or Elif branch.
    pub(crate) fn push_branch(&mut self, cond: Value, body: Vec<Statement>) {
        self.conditions.push(cond);
        self.bodies.push(body);
    }

    /// Records the closed Else branch. The chain must be flushed right after.
    pub(crate) fn push_else(&mut self, body: Vec<Statement>) {
        self.bodies.push(body);
    }

    /// Lowers the chain into one switch statement.
    pub(crate) fn lower(self, encoding: PriorityEncoding) -> Result<Switch, DslError> {
        let width = self.conditions.len();
        let has_else = self.bodies.len() > width;
        let tests: Vec<Value> = self.conditions.into_iter().map(reduce_condition).collect();

        let mut cases = SwitchCases::new();
        for (index, body) in self.bodies.into_iter().enumerate() {
            let bits: Vec<PatternBit> = (0..width)
                .map(|bit| branch_bit(bit, index, width, encoding))
                .collect();
            cases.insert(Pattern::from_lsb_bits(&bits), body);
        }

        log::debug!(
            "lowered if chain: {width} condition(s), else: {has_else}, encoding: {encoding:?}"
        );
        Switch::new(Value::cat(tests), cases)
            .map_err(|e| DslError::internal(format!("lowered if chain is malformed: {e}")))
    }
}

/// The pattern bit at position `bit` for branch `branch`. Branch `width` is the Else.
fn branch_bit(bit: usize, branch: usize, width: usize, encoding: PriorityEncoding) -> PatternBit {
    let is_else = branch == width;
    match encoding {
        PriorityEncoding::FirstMatch if is_else => PatternBit::DontCare,
        PriorityEncoding::Exclusive if is_else => PatternBit::Zero,
        _ if bit == branch => PatternBit::One,
        PriorityEncoding::Exclusive if bit < branch => PatternBit::Zero,
        _ => PatternBit::DontCare,
    }
}
