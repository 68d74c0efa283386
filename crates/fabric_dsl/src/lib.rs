//! The Fabric module builder.
//!
//! A [`Module`] accumulates assignments per clock domain, tracks which domain
//! drives every signal, and turns nested If/Elif/Else and Case blocks into
//! [`Switch`](fabric_ir::Switch) statements. [`Module::finalize`] produces a
//! [`Fragment`] together with the fragments of all registered submodules.
//!
//! # Usage
//!
//! ```ignore
//! let ctx = IrContext::new();
//! let (sel, o) = (ctx.signal("sel", 1), ctx.signal("o", 8));
//! let mut m = Module::new(&ctx);
//! m.if_(sel, |m| m.comb().append(o.assign(1u64)))?;
//! m.else_(|m| m.comb().append(o.assign(0u64)))?;
//! let fragment = elaborate(m, &Platform::default(), &sink);
//! ```

#![warn(missing_docs)]

pub mod case;
pub mod cond;
pub mod domain;
pub mod driver;
pub mod errors;
pub mod module;
pub mod scope;
pub mod submodule;

pub use case::CaseValue;
pub use cond::reduce_condition;
pub use domain::DomainHandle;
pub use driver::DriverMap;
pub use errors::DslError;
pub use module::Module;
pub use scope::ScopeToken;
pub use submodule::Elaboratable;

use fabric_diagnostics::DiagnosticSink;
use fabric_ir::{Fragment, Platform};

/// Elaborates a top-level design for `platform`.
///
/// A failure anywhere in the hierarchy is emitted to `sink` as a diagnostic
/// and yields `None`.
pub fn elaborate(
    top: impl Elaboratable,
    platform: &Platform,
    sink: &DiagnosticSink,
) -> Option<Fragment> {
    match Box::new(top).elaborate(platform) {
        Ok(fragment) => Some(fragment),
        Err(err) => {
            log::debug!("elaboration failed: {err}");
            sink.emit(err.to_diagnostic());
            None
        }
    }
}
