//! Shared naming and identity state for one design.

use crate::ids::SignalId;
use crate::signal::Signal;
use fabric_common::{Ident, Interner};
use std::sync::atomic::{AtomicU32, Ordering};

/// Hands out signals and resolves their names.
///
/// Every method takes `&self`, so module builders can hold a shared reference
/// to the context while the describing code keeps creating signals.
pub struct IrContext {
    interner: Interner,
    next_signal: AtomicU32,
}

impl IrContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self {
            interner: Interner::new(),
            next_signal: AtomicU32::new(0),
        }
    }

    /// Creates a new signal with a fresh identity.
    ///
    /// Names need not be unique; two signals with the same name are still
    /// distinct drivers.
    pub fn signal(&self, name: &str, width: u32) -> Signal {
        let id = SignalId::from_raw(self.next_signal.fetch_add(1, Ordering::Relaxed));
        Signal::new(id, self.interner.get_or_intern(name), width)
    }

    /// Returns the interner backing signal names.
    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    /// Resolves an interned name.
    pub fn resolve(&self, ident: Ident) -> &str {
        self.interner.resolve(ident)
    }

    /// Returns the name `signal` was created with.
    pub fn signal_name(&self, signal: &Signal) -> &str {
        self.resolve(signal.name())
    }
}

impl Default for IrContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signals_get_distinct_ids() {
        let ctx = IrContext::new();
        let a = ctx.signal("a", 1);
        let b = ctx.signal("a", 1);
        assert_ne!(a, b);
        assert_eq!(a.name(), b.name());
    }

    #[test]
    fn signal_name_resolves() {
        let ctx = IrContext::new();
        let s = ctx.signal("counter", 8);
        assert_eq!(ctx.signal_name(&s), "counter");
        assert_eq!(s.width(), 8);
    }
}
