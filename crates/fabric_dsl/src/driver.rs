//! Per-signal record of the one domain allowed to drive it.

use crate::errors::DslError;
use fabric_ir::{Domain, IrContext, Signal};
use indexmap::IndexMap;

/// Maps each driven signal to its owning domain, in first-driven order.
#[derive(Debug, Default)]
pub struct DriverMap {
    drivers: IndexMap<Signal, Domain>,
}

impl DriverMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `domain` drives `signal`.
    ///
    /// The first claim fixes the domain; later claims from the same domain
    /// succeed and claims from any other domain are a driver conflict.
    pub fn claim(
        &mut self,
        ctx: &IrContext,
        signal: Signal,
        domain: &Domain,
    ) -> Result<(), DslError> {
        match self.drivers.get(&signal) {
            None => {
                self.drivers.insert(signal, domain.clone());
                Ok(())
            }
            Some(existing) if existing == domain => Ok(()),
            Some(existing) => Err(DslError::DriverConflict {
                signal: ctx.signal_name(&signal).to_string(),
                current: domain.clone(),
                existing: existing.clone(),
            }),
        }
    }

    /// The domain driving `signal`, if any.
    pub fn get(&self, signal: Signal) -> Option<&Domain> {
        self.drivers.get(&signal)
    }

    /// Number of driven signals.
    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    /// Returns `true` if no signal is driven yet.
    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }

    /// Iterates over `(signal, domain)` pairs in first-driven order.
    pub fn iter(&self) -> impl Iterator<Item = (&Signal, &Domain)> {
        self.drivers.iter()
    }
}

impl IntoIterator for DriverMap {
    type Item = (Signal, Domain);
    type IntoIter = indexmap::map::IntoIter<Signal, Domain>;

    fn into_iter(self) -> Self::IntoIter {
        self.drivers.into_iter()
    }
}
