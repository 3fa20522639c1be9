//! # steel_core - Structural Steel Capacity Engine
//!
//! `steel_core` checks trial steel members and connections against
//! limit-states design rules (AISC 360-16 / CSA S16-19). Every evaluator
//! returns a capacity verdict together with an ordered derivation trace in
//! which each step names its formula, its substituted inputs and its result,
//! so a reviewer can reproduce the whole calculation.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Evaluators are pure functions over immutable records
//! - **Explicit code**: The design code and its resistance factors are always passed in
//! - **JSON-First**: Inputs, results, traces and errors implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, never clamped or silently fixed inputs
//!
//! ## Quick Start
//!
//! ```rust
//! use steel_core::calculations::column::{self, ColumnInput, EndConditions};
//! use steel_core::calculations::CapacityCheck;
//! use steel_core::materials::{builtin_materials, builtin_sections};
//! use steel_core::{DesignCode, DesignSettings};
//!
//! let section = builtin_sections().get("W6X8.5").unwrap();
//! let steel = builtin_materials().steel("350W").unwrap();
//! let settings = DesignSettings::new(DesignCode::Aisc360_16);
//!
//! let input = ColumnInput::new("C-1", 3000.0, EndConditions::pinned());
//! let result = column::calculate(&input, section, steel, &settings).unwrap();
//!
//! for step in result.trace() {
//!     println!("{}: {} = {:.3} {}", step.label, step.substituted, step.result, step.unit);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Column, beam, connection and base plate evaluators, section selection
//! - [`equations`] - Equation registry and derivation traces
//! - [`materials`] - Section catalog, steel/concrete grades, fasteners, plate stock
//! - [`loads`] - Member demand forces from hand calculation or external analysis
//! - [`settings`] - Design code and resistance factors
//! - [`units`] - Dimension-checked quantities for external demands
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod loads;
pub mod materials;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{CalculationItem, CalculationResult, CapacityCheck, CheckStatus, EvaluationContext, FailureMode};
pub use equations::{DerivationStep, DerivationTrace, Equation};
pub use errors::{CalcError, CalcResult};
pub use materials::{MaterialCatalog, SectionCatalog, SectionRecord, SteelMaterial, StockThicknessProvider};
pub use settings::{DesignCode, DesignSettings, ResistanceFactors};
pub use units::{Quantity, Unit, UnitSystem};
