//! Structural-equality keys over values.

use crate::value::Value;

/// A key that identifies a value by its structure rather than by where it was built.
///
/// Two separately constructed values that spell the same expression produce
/// equal keys, which lets the case accumulator recognise a repeated
/// `open_case(test, ..)` as the same ongoing switch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValueKey(Value);

impl ValueKey {
    /// Computes the key of `value`.
    pub fn new(value: &Value) -> Self {
        ValueKey(value.clone())
    }

    /// The value this key was computed from.
    pub fn value(&self) -> &Value {
        &self.0
    }

    /// Consumes the key, returning the value.
    pub fn into_value(self) -> Value {
        self.0
    }
}
