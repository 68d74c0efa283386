//! Assignment and switch statements.

use crate::error::IrError;
use crate::pattern::Pattern;
use crate::signal::Signal;
use crate::value::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The cases of a switch, in the order they are tried.
pub type SwitchCases = IndexMap<Pattern, Vec<Statement>>;

/// An assignment of `rhs` to an assignable `lhs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAssign")]
pub struct Assign {
    lhs: Value,
    rhs: Value,
}

impl Assign {
    /// Creates an assignment, checking that `lhs` can be written.
    pub fn new(lhs: Value, rhs: Value) -> Result<Self, IrError> {
        if !lhs.is_assignable() {
            return Err(IrError::NotAssignable(format!("{lhs:?}")));
        }
        Ok(Self { lhs, rhs })
    }

    pub(crate) fn to_signal(signal: Signal, rhs: Value) -> Self {
        Self {
            lhs: Value::Signal(signal),
            rhs,
        }
    }

    /// The written value.
    pub fn lhs(&self) -> &Value {
        &self.lhs
    }

    /// The assigned value.
    pub fn rhs(&self) -> &Value {
        &self.rhs
    }

    /// The signals written by this assignment.
    pub fn lhs_signals(&self) -> Vec<Signal> {
        self.lhs.signals()
    }
}

#[derive(Deserialize)]
struct RawAssign {
    lhs: Value,
    rhs: Value,
}

impl TryFrom<RawAssign> for Assign {
    type Error = IrError;

    fn try_from(raw: RawAssign) -> Result<Self, IrError> {
        Assign::new(raw.lhs, raw.rhs)
    }
}

/// A multi-way selection over `test`.
///
/// Cases are tried in insertion order and only the first matching one runs.
/// Patterns are not required to be disjoint; an earlier case shadows later
/// ones wherever they overlap. Every pattern is as wide as the test, also
/// for deserialized switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSwitch")]
pub struct Switch {
    test: Value,
    cases: SwitchCases,
}

impl Switch {
    /// Creates a switch, checking that every pattern is as wide as `test`.
    pub fn new(test: Value, cases: SwitchCases) -> Result<Self, IrError> {
        let expected = test.width();
        if let Some(pattern) = cases.keys().find(|p| p.width() != expected) {
            return Err(IrError::PatternWidth {
                pattern: pattern.to_string(),
                actual: pattern.width(),
                expected,
            });
        }
        Ok(Self { test, cases })
    }

    /// The value being matched.
    pub fn test(&self) -> &Value {
        &self.test
    }

    /// The cases in evaluation order.
    pub fn cases(&self) -> &SwitchCases {
        &self.cases
    }

    /// The body of the first case whose pattern matches `test_value`.
    pub fn select(&self, test_value: u64) -> Option<&[Statement]> {
        self.cases
            .iter()
            .find(|(pattern, _)| pattern.matches(test_value))
            .map(|(_, body)| body.as_slice())
    }
}

#[derive(Deserialize)]
struct RawSwitch {
    test: Value,
    cases: SwitchCases,
}

impl TryFrom<RawSwitch> for Switch {
    type Error = IrError;

    fn try_from(raw: RawSwitch) -> Result<Self, IrError> {
        Switch::new(raw.test, raw.cases)
    }
}

/// A statement of the IR.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Statement {
    /// An assignment.
    Assign(Assign),
    /// A switch.
    Switch(Switch),
}

impl Statement {
    /// Returns the assignment if this statement is one.
    pub fn as_assign(&self) -> Option<&Assign> {
        match self {
            Statement::Assign(assign) => Some(assign),
            Statement::Switch(_) => None,
        }
    }

    /// Returns the switch if this statement is one.
    pub fn as_switch(&self) -> Option<&Switch> {
        match self {
            Statement::Switch(switch) => Some(switch),
            Statement::Assign(_) => None,
        }
    }

    /// Every assignment in this statement, including those nested inside switch bodies.
    pub fn assigns(&self) -> Vec<&Assign> {
        let mut out = Vec::new();
        self.collect_assigns(&mut out);
        out
    }

    fn collect_assigns<'s>(&'s self, out: &mut Vec<&'s Assign>) {
        match self {
            Statement::Assign(assign) => out.push(assign),
            Statement::Switch(switch) => {
                for stmt in switch.cases.values().flatten() {
                    stmt.collect_assigns(out);
                }
            }
        }
    }
}

impl From<Assign> for Statement {
    fn from(assign: Assign) -> Self {
        Statement::Assign(assign)
    }
}

impl From<Switch> for Statement {
    fn from(switch: Switch) -> Self {
        Statement::Switch(switch)
    }
}

/// Flattens one statement or a batch of statements into a statement list.
pub trait IntoStatements {
    /// Converts `self` into a flat list.
    fn into_statements(self) -> Vec<Statement>;
}

impl IntoStatements for Statement {
    fn into_statements(self) -> Vec<Statement> {
        vec![self]
    }
}

impl IntoStatements for Assign {
    fn into_statements(self) -> Vec<Statement> {
        vec![Statement::Assign(self)]
    }
}

impl IntoStatements for Switch {
    fn into_statements(self) -> Vec<Statement> {
        vec![Statement::Switch(self)]
    }
}

impl<T: IntoStatements> IntoStatements for Vec<T> {
    fn into_statements(self) -> Vec<Statement> {
        self.into_iter().flat_map(IntoStatements::into_statements).collect()
    }
}

impl<T: IntoStatements, const N: usize> IntoStatements for [T; N] {
    fn into_statements(self) -> Vec<Statement> {
        self.into_iter().flat_map(IntoStatements::into_statements).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IrContext;

    fn cases(entries: &[(&str, Vec<Statement>)]) -> SwitchCases {
        entries
            .iter()
            .map(|(p, body)| (Pattern::parse(p).unwrap(), body.clone()))
            .collect()
    }

    #[test]
    fn switch_rejects_mismatched_pattern() {
        let ctx = IrContext::new();
        let test = ctx.signal("t", 2).value();
        let err = Switch::new(test, cases(&[("101", vec![])])).unwrap_err();
        assert_eq!(
            err,
            IrError::PatternWidth {
                pattern: "101".to_string(),
                actual: 3,
                expected: 2
            }
        );
    }

    #[test]
    fn select_is_first_match() {
        let ctx = IrContext::new();
        let o = ctx.signal("o", 2);
        let test = ctx.signal("t", 2).value();
        let switch = Switch::new(
            test,
            cases(&[
                ("-1", vec![o.assign(1u64).into()]),
                ("1-", vec![o.assign(2u64).into()]),
                ("--", vec![o.assign(3u64).into()]),
            ]),
        )
        .unwrap();
        assert_eq!(switch.select(0b11), Some(&[Statement::from(o.assign(1u64))][..]));
        assert_eq!(switch.select(0b10), Some(&[Statement::from(o.assign(2u64))][..]));
        assert_eq!(switch.select(0b00), Some(&[Statement::from(o.assign(3u64))][..]));
    }

    #[test]
    fn select_without_match() {
        let ctx = IrContext::new();
        let switch = Switch::new(ctx.signal("t", 1).value(), cases(&[("1", vec![])])).unwrap();
        assert!(switch.select(0).is_none());
    }

    #[test]
    fn into_statements_flattens() {
        let ctx = IrContext::new();
        let a = ctx.signal("a", 1);
        let b = ctx.signal("b", 1);
        assert_eq!(a.assign(true).into_statements().len(), 1);
        assert_eq!([a.assign(true), b.assign(false)].into_statements().len(), 2);
        assert_eq!(
            vec![vec![a.assign(true)], vec![b.assign(true), a.assign(false)]]
                .into_statements()
                .len(),
            3
        );
    }

    #[test]
    fn assigns_reach_into_switch_bodies() {
        let ctx = IrContext::new();
        let a = ctx.signal("a", 1);
        let b = ctx.signal("b", 1);
        let inner = Switch::new(
            ctx.signal("t", 1).value(),
            cases(&[("1", vec![a.assign(true).into()]), ("-", vec![b.assign(true).into()])]),
        )
        .unwrap();
        let stmt = Statement::from(inner);
        let written: Vec<_> = stmt.assigns().iter().flat_map(|a| a.lhs_signals()).collect();
        assert_eq!(written, vec![a, b]);
    }

    #[test]
    fn switch_serde_preserves_case_order() {
        let ctx = IrContext::new();
        let switch = Switch::new(
            ctx.signal("t", 2).value(),
            cases(&[("1-", vec![]), ("-1", vec![]), ("--", vec![])]),
        )
        .unwrap();
        let json = serde_json::to_string(&switch).unwrap();
        let back: Switch = serde_json::from_str(&json).unwrap();
        let order: Vec<_> = back.cases().keys().map(Pattern::as_str).collect();
        assert_eq!(order, vec!["1-", "-1", "--"]);
    }

    #[test]
    fn switch_deserialization_checks_pattern_width() {
        let ctx = IrContext::new();
        let switch = Switch::new(ctx.signal("t", 2).value(), cases(&[("1-", vec![])])).unwrap();
        let mut json: serde_json::Value = serde_json::to_value(&switch).unwrap();
        json["cases"] = serde_json::json!({ "10101": [] });

        let err = serde_json::from_value::<Switch>(json).unwrap_err();
        assert!(err.to_string().contains("has width 5"), "{err}");
    }

    #[test]
    fn assign_deserialization_checks_target() {
        let ctx = IrContext::new();
        let a = ctx.signal("a", 1);
        let mut json: serde_json::Value = serde_json::to_value(a.assign(true)).unwrap();
        json["lhs"] = serde_json::to_value(Value::from(true)).unwrap();

        let err = serde_json::from_value::<Assign>(json).unwrap_err();
        assert!(err.to_string().contains("not assignable"), "{err}");
    }
}
