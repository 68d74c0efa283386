//! Scope tokens and the per-scope accumulation state.

use crate::case::CaseChain;
use crate::cond::IfChain;
use fabric_ir::{Pattern, Statement, Value};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SCOPE_ID: AtomicU64 = AtomicU64::new(0);

/// Proof that a scope is open. Hand it back to
/// [`Module::close`](crate::Module::close) to end the scope.
///
/// Tokens are neither `Clone` nor `Copy`, so a scope cannot be closed twice.
#[must_use = "an open scope must be closed with `Module::close`"]
#[derive(Debug, PartialEq, Eq)]
pub struct ScopeToken {
    id: u64,
}

impl ScopeToken {
    fn fresh() -> Self {
        Self {
            id: NEXT_SCOPE_ID.fetch_add(1, Ordering::Relaxed),
        }
    }
}

/// What kind of block a scope is the body of.
#[derive(Debug)]
pub(crate) enum ScopeKind {
    If(Value),
    Elif(Value),
    Else,
    Case(Pattern),
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeKind::If(_) => write!(f, "an If body"),
            ScopeKind::Elif(_) => write!(f, "an Elif body"),
            ScopeKind::Else => write!(f, "an Else body"),
            ScopeKind::Case(pattern) => write!(f, "a Case `{pattern}` body"),
        }
    }
}

/// An open scope on the module's scope stack.
#[derive(Debug)]
pub(crate) struct OpenScope {
    pub(crate) id: u64,
    pub(crate) kind: ScopeKind,
}

impl OpenScope {
    pub(crate) fn new(kind: ScopeKind) -> (Self, ScopeToken) {
        let token = ScopeToken::fresh();
        (Self { id: token.id, kind }, token)
    }

    pub(crate) fn is_closed_by(&self, token: &ScopeToken) -> bool {
        self.id == token.id
    }
}

/// The statements collected at one nesting level, plus the chains pending there.
#[derive(Debug, Default)]
pub(crate) struct Frame {
    pub(crate) statements: Vec<Statement>,
    pub(crate) if_chain: IfChain,
    pub(crate) case_chain: Option<CaseChain>,
}

impl Frame {
    /// Returns `true` if a chain at this level still waits to be lowered.
    pub(crate) fn has_pending(&self) -> bool {
        !self.if_chain.is_empty() || self.case_chain.is_some()
    }
}
