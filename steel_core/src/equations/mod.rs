//! # Equations and Derivation Traces
//!
//! Every formula used by the capacity evaluators lives in one registry so
//! that each arithmetic step can be cited, substituted and re-checked.
//!
//! ## Modules
//!
//! - [`registry`] - Equation metadata, clause references and native evaluation
//! - [`formula`] - Substitution into and evaluation of plain-text formulas
//! - [`trace`] - Ordered derivation steps recorded during an evaluation
//!
//! ## Units
//!
//! Formulas are written for mm, mm², mm³, mm⁴, MPa, kN and kN·m. Where a
//! result changes unit the conversion is part of the formula text
//! (e.g. `F_cr * A_g / 1000` for kN).

pub mod formula;
pub mod registry;
pub mod trace;

pub use registry::{CodeReference, Equation, EquationCategory, EquationMetadata, Variable, ALL_EQUATIONS};
pub use trace::{DerivationStep, DerivationTrace, TraceInput};
