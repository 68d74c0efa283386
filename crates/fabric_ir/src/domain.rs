//! Clock domains that statements are assigned to.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The domain a statement (and the signals it drives) belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Domain {
    /// The unclocked, combinational domain.
    Comb,
    /// A named clock domain. Its existence is checked during elaboration,
    /// not when statements are added.
    Clocked(String),
}

impl Domain {
    /// Creates a handle for the named clock domain.
    pub fn clocked(name: impl Into<String>) -> Self {
        Domain::Clocked(name.into())
    }

    /// Returns `true` for the unclocked domain.
    pub fn is_comb(&self) -> bool {
        matches!(self, Domain::Comb)
    }

    /// The clock domain name, or `None` for the unclocked domain.
    pub fn name(&self) -> Option<&str> {
        match self {
            Domain::Comb => None,
            Domain::Clocked(name) => Some(name),
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Domain::Comb => write!(f, "comb"),
            Domain::Clocked(name) => write!(f, "{name}"),
        }
    }
}
