//! Domain routing: turning domain names into handles that accept statements.

use crate::errors::DslError;
use crate::module::Module;
use fabric_config::DomainConfig;
use fabric_ir::{Domain, IntoStatements};

/// Resolves domain names according to the builder configuration.
///
/// Domains are never registered up front; any name other than the configured
/// unclocked name denotes a clock domain of that name.
#[derive(Debug, Clone)]
pub(crate) struct DomainRouter {
    comb_name: String,
    default_name: String,
}

impl DomainRouter {
    pub(crate) fn new(config: &DomainConfig) -> Self {
        Self {
            comb_name: config.comb.clone(),
            default_name: config.default.clone(),
        }
    }

    pub(crate) fn resolve(&self, name: &str) -> Domain {
        if name == self.comb_name {
            Domain::Comb
        } else {
            Domain::clocked(name)
        }
    }

    pub(crate) fn default_clocked(&self) -> Domain {
        Domain::clocked(self.default_name.as_str())
    }
}

/// A handle through which assignments are appended to one domain.
///
/// The handle remembers the nesting depth it was obtained at; statements
/// appended through it land in the innermost open scope.
pub struct DomainHandle<'m, 'ctx> {
    module: &'m mut Module<'ctx>,
    domain: Domain,
    depth: usize,
}

impl<'m, 'ctx> DomainHandle<'m, 'ctx> {
    pub(crate) fn new(module: &'m mut Module<'ctx>, domain: Domain) -> Self {
        let depth = module.depth();
        Self {
            module,
            domain,
            depth,
        }
    }

    /// The domain this handle appends to.
    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Appends assignments to the domain.
    ///
    /// Fails if any statement is not an assignment, or if an assigned signal
    /// is already driven from a different domain.
    pub fn append(&mut self, statements: impl IntoStatements) -> Result<(), DslError> {
        self.module
            .append(statements.into_statements(), &self.domain, self.depth)
    }
}
