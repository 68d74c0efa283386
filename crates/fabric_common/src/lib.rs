//! Shared foundational types used across the Fabric hardware-description front end.
//!
//! This crate provides interned identifiers for signal and module names, and the
//! internal error type used when a builder invariant is broken.

#![warn(missing_docs)]

pub mod ident;
pub mod result;

pub use ident::{Ident, Interner};
pub use result::InternalError;
