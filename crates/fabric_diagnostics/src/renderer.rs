//! Human-readable diagnostic rendering.

use crate::diagnostic::Diagnostic;

/// Formats a diagnostic into a string.
pub trait DiagnosticRenderer {
    /// Renders a single diagnostic.
    fn render(&self, diag: &Diagnostic) -> String;
}

/// Renders diagnostics in a rustc-like layout:
///
/// ```text
/// error[E300]: driver-driver conflict: ...
///    = note: ...
///    = help: ...
/// ```
#[derive(Debug, Default)]
pub struct TerminalRenderer;

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic) -> String {
        let mut out = format!("{}[{}]: {}\n", diag.severity, diag.code, diag.message);
        for note in &diag.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }
        for help in &diag.help {
            out.push_str(&format!("   = help: {help}\n"));
        }
        out
    }
}
