//! Signals: named, fixed-width storage or wire locations.

use crate::ids::SignalId;
use crate::stmt::Assign;
use crate::value::Value;
use fabric_common::Ident;
use serde::{Deserialize, Serialize};

/// A signal handle.
///
/// Signals are created by [`IrContext::signal`](crate::IrContext::signal) and
/// are cheap to copy. Two handles are the same signal exactly when they carry
/// the same [`SignalId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signal {
    id: SignalId,
    name: Ident,
    width: u32,
}

impl Signal {
    pub(crate) fn new(id: SignalId, name: Ident, width: u32) -> Self {
        Self { id, name, width }
    }

    /// The identity of this signal.
    pub fn id(&self) -> SignalId {
        self.id
    }

    /// The interned name of this signal.
    pub fn name(&self) -> Ident {
        self.name
    }

    /// The bit width of this signal.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Builds the assignment `self = rhs`.
    pub fn assign(self, rhs: impl Into<Value>) -> Assign {
        Assign::to_signal(self, rhs.into())
    }

    /// Wraps this signal as a value.
    pub fn value(self) -> Value {
        Value::Signal(self)
    }
}
