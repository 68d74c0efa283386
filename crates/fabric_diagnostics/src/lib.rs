//! Structured diagnostics for the Fabric front end.
//!
//! Builder failures are reported as [`Diagnostic`]s carrying a severity, a
//! stable [`DiagnosticCode`], and optional notes and help lines. A
//! [`DiagnosticSink`] collects them and [`TerminalRenderer`] formats them
//! for humans.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
