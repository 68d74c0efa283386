//! The Case accumulator: one test expression, an ordered map of patterns to bodies.

use crate::errors::DslError;
use fabric_ir::{IrError, Pattern, Statement, Switch, SwitchCases, Value, ValueKey};

/// The value of a Case scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseValue<'a> {
    /// A pattern over `0`, `1` and `-`, most significant bit first.
    Bits(&'a str),
    /// An exact integer value.
    Int(u64),
}

impl<'a> From<&'a str> for CaseValue<'a> {
    fn from(bits: &'a str) -> Self {
        CaseValue::Bits(bits)
    }
}

impl From<u64> for CaseValue<'_> {
    fn from(value: u64) -> Self {
        CaseValue::Int(value)
    }
}

/// Turns an optional case value into a pattern of exactly `width` bits.
///
/// An absent value matches anything.
pub(crate) fn case_pattern(value: Option<CaseValue<'_>>, width: u32) -> Result<Pattern, DslError> {
    match value {
        None => Ok(Pattern::wildcard(width)),
        Some(CaseValue::Bits(bits)) => {
            let pattern = Pattern::parse(bits).map_err(DslError::InvalidPattern)?;
            if pattern.width() != width {
                return Err(DslError::CaseWidthMismatch {
                    pattern: bits.to_string(),
                    width,
                });
            }
            Ok(pattern)
        }
        Some(CaseValue::Int(value)) => Pattern::from_int(value, width).map_err(|e| match e {
            IrError::ValueOverflow { value, width } => DslError::CaseValueOverflow { value, width },
            other => DslError::InvalidPattern(other),
        }),
    }
}

/// A pending switch over one test expression.
#[derive(Debug)]
pub(crate) struct CaseChain {
    test: ValueKey,
    cases: SwitchCases,
}

impl CaseChain {
    pub(crate) fn new(test: ValueKey) -> Self {
        Self {
            test,
            cases: SwitchCases::new(),
        }
    }

    /// Returns `true` if `test` is structurally the expression this chain switches on.
    pub(crate) fn is_same_test(&self, test: &ValueKey) -> bool {
        &self.test == test
    }

    /// Records a closed case body. A pattern seen before keeps its original
    /// position and takes the new body.
    pub(crate) fn insert(&mut self, pattern: Pattern, body: Vec<Statement>) {
        self.cases.insert(pattern, body);
    }

    pub(crate) fn lower(self) -> Result<Switch, DslError> {
        log::debug!("lowered case chain: {} case(s)", self.cases.len());
        let test: Value = self.test.into_value();
        Switch::new(test, self.cases)
            .map_err(|e| DslError::internal(format!("lowered case chain is malformed: {e}")))
    }
}
