//! Interned identifiers for signal names.

use lasso::ThreadedRodeo;
use serde::{Deserialize, Serialize};

/// An interned name.
///
/// Names are stored once in an [`Interner`] and referred to by a `u32` key, so
/// signals stay `Copy` and compare in O(1) regardless of how long their names are.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Ident(u32);

impl Ident {
    /// Creates an `Ident` from a raw `u32` index.
    ///
    /// Only meaningful for an index previously handed out by an [`Interner`].
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw `u32` index of this identifier.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}

// SAFETY: `Ident` wraps a `u32`, which always fits in `usize` on supported
// platforms; `try_from_usize` rejects values that don't fit in `u32`.
unsafe impl lasso::Key for Ident {
    fn into_usize(self) -> usize {
        self.0 as usize
    }

    fn try_from_usize(int: usize) -> Option<Self> {
        u32::try_from(int).ok().map(Ident)
    }
}

/// String interner backed by [`lasso::ThreadedRodeo`].
///
/// Interning takes `&self`, so one interner can be shared by every module
/// builder of a design without threading `&mut` through the description code.
pub struct Interner {
    rodeo: ThreadedRodeo<Ident>,
}

impl Interner {
    /// Creates a new empty interner.
    pub fn new() -> Self {
        Self {
            rodeo: ThreadedRodeo::new(),
        }
    }

    /// Interns a string, returning the existing [`Ident`] if it was seen before.
    pub fn get_or_intern(&self, s: &str) -> Ident {
        self.rodeo.get_or_intern(s)
    }

    /// Resolves an [`Ident`] back to its string value.
    ///
    /// # Panics
    ///
    /// Panics if the `Ident` was not created by this interner.
    pub fn resolve(&self, ident: Ident) -> &str {
        self.rodeo.resolve(&ident)
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}
