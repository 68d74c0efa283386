//! The value and statement layer consumed by the Fabric module builder.
//!
//! This crate defines [`Signal`]s and the [`Value`] expression algebra over
//! them, structural [`ValueKey`]s, wildcard [`Pattern`]s, the two statement
//! forms ([`Assign`] and [`Switch`]), and the [`Fragment`] produced when a
//! module is finalized. [`Evaluator`] gives statements their reference
//! semantics, including first-match-wins switch selection.

#![warn(missing_docs)]

pub mod context;
pub mod domain;
pub mod error;
pub mod eval;
pub mod fragment;
pub mod ids;
pub mod key;
pub mod pattern;
pub mod signal;
pub mod stmt;
pub mod value;

pub use context::IrContext;
pub use domain::Domain;
pub use error::{EvalError, IrError};
pub use eval::Evaluator;
pub use fragment::{Fragment, Platform};
pub use ids::SignalId;
pub use key::ValueKey;
pub use pattern::{Pattern, PatternBit};
pub use signal::Signal;
pub use stmt::{Assign, IntoStatements, Statement, Switch, SwitchCases};
pub use value::{BinaryOp, UnaryOp, Value};
