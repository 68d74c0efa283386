//! Fragments: the finalized, elaboration-ready form of a module.

use crate::domain::Domain;
use crate::signal::Signal;
use crate::stmt::{IntoStatements, Statement};
use serde::{Deserialize, Serialize};

/// Opaque context forwarded to every submodule while a design is finalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    /// The name of the target the design is being elaborated for.
    pub name: String,
}

impl Platform {
    /// Creates a platform with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::new("generic")
    }
}

/// The statements of one module, the domains driving its signals, and the
/// fragments of its submodules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    /// Child fragments in registration order, with their optional names.
    pub subfragments: Vec<(Fragment, Option<String>)>,
    /// Top-level statements.
    pub statements: Vec<Statement>,
    /// Which domain drives each signal, in the order signals were first driven.
    pub drivers: Vec<(Signal, Domain)>,
}

impl Fragment {
    /// Creates an empty fragment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a child fragment.
    pub fn add_subfragment(&mut self, fragment: Fragment, name: Option<String>) {
        self.subfragments.push((fragment, name));
    }

    /// Appends statements to the top level.
    pub fn add_statements(&mut self, statements: impl IntoStatements) {
        self.statements.extend(statements.into_statements());
    }

    /// Records that `signal` is driven from `domain`.
    pub fn drive(&mut self, signal: Signal, domain: Domain) {
        self.drivers.push((signal, domain));
    }

    /// The domain driving `signal`, if this fragment drives it.
    pub fn driver_of(&self, signal: Signal) -> Option<&Domain> {
        self.drivers
            .iter()
            .find(|(driven, _)| *driven == signal)
            .map(|(_, domain)| domain)
    }

    /// The signals driven from `domain`.
    pub fn signals_in(&self, domain: &Domain) -> Vec<Signal> {
        self.drivers
            .iter()
            .filter(|(_, d)| d == domain)
            .map(|(signal, _)| *signal)
            .collect()
    }

    /// The distinct domains of this fragment, in first-driven order.
    pub fn domains(&self) -> Vec<&Domain> {
        let mut out: Vec<&Domain> = Vec::new();
        for (_, domain) in &self.drivers {
            if !out.contains(&domain) {
                out.push(domain);
            }
        }
        out
    }

    /// Finds a direct child fragment by name.
    pub fn find_subfragment(&self, name: &str) -> Option<&Fragment> {
        self.subfragments
            .iter()
            .find(|(_, n)| n.as_deref() == Some(name))
            .map(|(fragment, _)| fragment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IrContext;

    #[test]
    fn drivers_and_domains() {
        let ctx = IrContext::new();
        let a = ctx.signal("a", 1);
        let b = ctx.signal("b", 1);
        let c = ctx.signal("c", 1);
        let mut frag = Fragment::new();
        frag.drive(a, Domain::Comb);
        frag.drive(b, Domain::clocked("sync"));
        frag.drive(c, Domain::Comb);
        assert_eq!(frag.driver_of(b), Some(&Domain::clocked("sync")));
        assert_eq!(frag.signals_in(&Domain::Comb), vec![a, c]);
        assert_eq!(frag.domains(), vec![&Domain::Comb, &Domain::clocked("sync")]);
    }

    #[test]
    fn subfragments_by_name() {
        let mut frag = Fragment::new();
        frag.add_subfragment(Fragment::new(), Some("uart".to_string()));
        frag.add_subfragment(Fragment::new(), None);
        assert!(frag.find_subfragment("uart").is_some());
        assert!(frag.find_subfragment("spi").is_none());
        assert_eq!(frag.subfragments.len(), 2);
    }

    #[test]
    fn serde_roundtrip() {
        let ctx = IrContext::new();
        let a = ctx.signal("a", 2);
        let mut frag = Fragment::new();
        frag.add_statements(a.assign(2u64));
        frag.drive(a, Domain::clocked("sync"));
        let json = serde_json::to_string(&frag).unwrap();
        let back: Fragment = serde_json::from_str(&json).unwrap();
        assert_eq!(back, frag);
    }
}
