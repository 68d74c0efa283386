//! Submodule registration.

use crate::errors::DslError;
use fabric_ir::{Fragment, Platform};

/// Anything that can be turned into a fragment for a given platform.
///
/// Only elaboratable values can be registered as submodules, so a module
/// cannot be handed something it has no way to finalize.
pub trait Elaboratable {
    /// Produces the fragment for `platform`, consuming the description.
    fn elaborate(self: Box<Self>, platform: &Platform) -> Result<Fragment, DslError>;
}

impl Elaboratable for Fragment {
    fn elaborate(self: Box<Self>, _platform: &Platform) -> Result<Fragment, DslError> {
        Ok(*self)
    }
}

/// Registered submodules with their optional names, in registration order.
pub(crate) struct SubmoduleRegistry<'a> {
    entries: Vec<(Box<dyn Elaboratable + 'a>, Option<String>)>,
}

impl Default for SubmoduleRegistry<'_> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<'a> SubmoduleRegistry<'a> {
    pub(crate) fn add(&mut self, submodule: Box<dyn Elaboratable + 'a>, name: Option<String>) {
        self.entries.push((submodule, name));
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<'a> IntoIterator for SubmoduleRegistry<'a> {
    type Item = (Box<dyn Elaboratable + 'a>, Option<String>);
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
