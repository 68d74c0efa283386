//! Builder errors and their diagnostic codes.
//!
//! Codes `E300`--`E309` cover every way a module description can be
//! rejected. All of them abandon the description; none is recoverable.

use fabric_common::InternalError;
use fabric_diagnostics::{Category, Diagnostic, DiagnosticCode};
use fabric_ir::{Domain, IrError};

/// Signal driven from two different domains.
pub const E300: DiagnosticCode = DiagnosticCode::new(Category::Error, 300);
/// `Elif` opened with no pending `If` chain.
pub const E301: DiagnosticCode = DiagnosticCode::new(Category::Error, 301);
/// `Else` opened with no pending `If` chain.
pub const E302: DiagnosticCode = DiagnosticCode::new(Category::Error, 302);
/// Case pattern width differs from the test width.
pub const E303: DiagnosticCode = DiagnosticCode::new(Category::Error, 303);
/// Integer case value does not fit in the test width.
pub const E304: DiagnosticCode = DiagnosticCode::new(Category::Error, 304);
/// Case pattern contains characters other than `0`, `1` and `-`.
pub const E305: DiagnosticCode = DiagnosticCode::new(Category::Error, 305);
/// Non-assignment statement appended through a domain.
pub const E306: DiagnosticCode = DiagnosticCode::new(Category::Error, 306);
/// Scope closed while a nested scope is still open.
pub const E307: DiagnosticCode = DiagnosticCode::new(Category::Error, 307);
/// Module finalized with scopes still open.
pub const E308: DiagnosticCode = DiagnosticCode::new(Category::Error, 308);
/// Internal builder error.
pub const E309: DiagnosticCode = DiagnosticCode::new(Category::Error, 309);

/// Errors raised while describing or finalizing a module.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DslError {
    /// A signal already owned by one domain was assigned from another.
    #[error(
        "driver-driver conflict: trying to drive `{signal}` from d.{current}, \
         but it is already driven from d.{existing}"
    )]
    DriverConflict {
        /// Name of the signal.
        signal: String,
        /// The domain of the rejected assignment.
        current: Domain,
        /// The domain that drove the signal first.
        existing: Domain,
    },

    /// `Elif` without a pending `If` at the same scope level.
    #[error("Elif without preceding If")]
    ElifWithoutIf,

    /// `Else` without a pending `If` at the same scope level.
    #[error("Else without preceding If/Elif")]
    ElseWithoutIf,

    /// An explicit case pattern whose width differs from the test.
    #[error("case value `{pattern}` must have the same width as the test ({width} bits)")]
    CaseWidthMismatch {
        /// The rejected pattern.
        pattern: String,
        /// Width of the test expression.
        width: u32,
    },

    /// An integer case value too large for the test.
    #[error("case value {value} does not fit in the {width}-bit test")]
    CaseValueOverflow {
        /// The rejected value.
        value: u64,
        /// Width of the test expression.
        width: u32,
    },

    /// A case pattern with invalid characters.
    #[error("invalid case value: {0}")]
    InvalidPattern(IrError),

    /// Something other than an assignment was appended through a domain.
    #[error("only assignments may be appended to d.{domain}")]
    NonAssignment {
        /// The domain the statement was appended to.
        domain: Domain,
    },

    /// A scope token was closed while it was not the innermost open scope.
    #[error("scope closed out of order; the innermost open scope is {innermost}")]
    ScopeOrder {
        /// Description of the innermost open scope, or `none`.
        innermost: String,
    },

    /// Scopes were left open when the module was finalized.
    #[error("{count} scope(s) still open when finalizing the module")]
    UnclosedScope {
        /// How many scopes were still open.
        count: usize,
    },

    /// A builder invariant was broken.
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl DslError {
    /// The diagnostic code of this error.
    pub fn code(&self) -> DiagnosticCode {
        match self {
            DslError::DriverConflict { .. } => E300,
            DslError::ElifWithoutIf => E301,
            DslError::ElseWithoutIf => E302,
            DslError::CaseWidthMismatch { .. } => E303,
            DslError::CaseValueOverflow { .. } => E304,
            DslError::InvalidPattern(_) => E305,
            DslError::NonAssignment { .. } => E306,
            DslError::ScopeOrder { .. } => E307,
            DslError::UnclosedScope { .. } => E308,
            DslError::Internal(_) => E309,
        }
    }

    /// Converts this error into a diagnostic, with a hint where there is one to give.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code(), self.to_string());
        match self {
            DslError::DriverConflict { .. } => diag
                .with_note("the first assignment to a signal fixes the domain that drives it"),
            DslError::ElifWithoutIf | DslError::ElseWithoutIf => {
                diag.with_help("open an If at the same nesting level first")
            }
            DslError::CaseWidthMismatch { .. } => {
                diag.with_help("omit the value to match any value of the test")
            }
            DslError::NonAssignment { .. } => {
                diag.with_help("use If/Case scopes instead of appending switches directly")
            }
            DslError::ScopeOrder { .. } | DslError::UnclosedScope { .. } => {
                diag.with_note("scopes must be closed innermost first")
            }
            DslError::Internal(_) => diag.with_note("this is a bug in Fabric"),
            DslError::CaseValueOverflow { .. } | DslError::InvalidPattern(_) => diag,
        }
    }

    pub(crate) fn internal(message: impl Into<String>) -> Self {
        DslError::Internal(InternalError::new(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_formats() {
        assert_eq!(E300.to_string(), "E300");
        assert_eq!(E309.to_string(), "E309");
    }

    #[test]
    fn driver_conflict_names_both_domains() {
        let err = DslError::DriverConflict {
            signal: "o".to_string(),
            current: Domain::clocked("sync"),
            existing: Domain::Comb,
        };
        assert_eq!(
            err.to_string(),
            "driver-driver conflict: trying to drive `o` from d.sync, but it is already driven from d.comb"
        );
        assert_eq!(err.code(), E300);
    }

    #[test]
    fn diagnostic_carries_code_and_hint() {
        let diag = DslError::ElifWithoutIf.to_diagnostic();
        assert_eq!(diag.code, E301);
        assert_eq!(diag.message, "Elif without preceding If");
        assert_eq!(diag.help.len(), 1);
    }

    #[test]
    fn internal_error_passthrough() {
        let err = DslError::internal("frame stack empty");
        assert_eq!(err.to_string(), "internal error: frame stack empty");
        assert_eq!(err.to_diagnostic().code, E309);
    }
}
