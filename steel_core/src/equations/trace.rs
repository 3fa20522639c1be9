//! # Derivation Traces
//!
//! An ordered, append-only record of every equation an evaluator applied,
//! with the values substituted into it. Traces are structured data; turning
//! them into Markdown or LaTeX is left to the reporting consumer.
//!
//! ## Example
//!
//! ```rust
//! use steel_core::equations::{DerivationTrace, Equation};
//! use steel_core::settings::DesignCode;
//!
//! let mut trace = DerivationTrace::new(DesignCode::Aisc360_16);
//! let lambda = trace
//!     .record(
//!         Equation::Slenderness,
//!         "Slenderness (Y-Y)",
//!         &[("K", 1.0), ("L", 3000.0), ("r", 22.6)],
//!         "Effective length over weak-axis radius of gyration",
//!     )
//!     .unwrap();
//!
//! let step = &trace.steps()[0];
//! assert_eq!(step.substituted, "1 * 3000 / 22.6");
//! assert!((step.verify().unwrap() - lambda).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use super::formula;
use super::registry::Equation;
use crate::errors::{CalcError, CalcResult};
use crate::settings::DesignCode;

/// One substituted input of a derivation step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceInput {
    pub symbol: String,
    pub value: f64,
    pub unit: String,
}

/// A single recorded computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivationStep {
    /// Short label (e.g. "Slenderness (Y-Y)")
    pub label: String,
    pub equation: Equation,
    /// Symbolic formula, `result = expression`
    pub formula: String,
    /// Right-hand side with values substituted
    pub substituted: String,
    pub inputs: Vec<TraceInput>,
    /// Result symbol (e.g. "F_cr")
    pub symbol: String,
    pub result: f64,
    pub unit: String,
    /// One-line reason for applying this equation
    pub rationale: String,
    /// Clause citation under the active design code
    pub reference: String,
}

impl DerivationStep {
    /// Bare expression (right-hand side of `formula`)
    pub fn expression(&self) -> &str {
        self.formula
            .split_once(" = ")
            .map(|(_, rhs)| rhs)
            .unwrap_or(&self.formula)
    }

    /// Recorded value of an input symbol
    pub fn input(&self, symbol: &str) -> Option<f64> {
        self.inputs.iter().find(|i| i.symbol == symbol).map(|i| i.value)
    }

    /// Re-evaluate the recorded formula text from the recorded inputs.
    pub fn verify(&self) -> CalcResult<f64> {
        let bindings: Vec<(&str, f64)> = self.inputs.iter().map(|i| (i.symbol.as_str(), i.value)).collect();
        formula::evaluate(self.expression(), &bindings)
    }

    /// True when re-evaluation reproduces `result` within a relative tolerance.
    pub fn reproduces(&self, rel_tol: f64) -> bool {
        match self.verify() {
            Ok(value) => (value - self.result).abs() <= rel_tol * self.result.abs().max(1.0),
            Err(_) => false,
        }
    }
}

/// Ordered sequence of derivation steps for one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivationTrace {
    pub code: DesignCode,
    steps: Vec<DerivationStep>,
}

impl DerivationTrace {
    pub fn new(code: DesignCode) -> Self {
        Self { code, steps: Vec::new() }
    }

    /// Evaluate `equation` from `inputs`, append the step and return the value.
    ///
    /// Inputs are recorded in the order given, each tagged with the unit its
    /// symbol carries in the registry.
    pub fn record(
        &mut self,
        equation: Equation,
        label: impl Into<String>,
        inputs: &[(&str, f64)],
        rationale: impl Into<String>,
    ) -> CalcResult<f64> {
        let label = label.into();
        let meta = equation.metadata();

        let mut recorded = Vec::with_capacity(inputs.len());
        for (symbol, value) in inputs {
            let var = meta.variable(symbol).ok_or_else(|| {
                CalcError::computation(&label, format!("'{}' is not a variable of {}", symbol, meta.name))
            })?;
            if !value.is_finite() {
                return Err(CalcError::computation(&label, format!("input {} is not finite ({})", symbol, value)));
            }
            recorded.push(TraceInput {
                symbol: var.symbol.to_string(),
                value: *value,
                unit: var.units.to_string(),
            });
        }

        let result = equation
            .evaluate(inputs)
            .map_err(|e| match e {
                CalcError::CapacityComputationError { reason, .. } => CalcError::computation(&label, reason),
                other => other,
            })?;

        tracing::trace!(step = %label, symbol = meta.result.symbol, result, "derivation step");

        self.steps.push(DerivationStep {
            formula: format!("{} = {}", meta.result.symbol, meta.formula_plain),
            substituted: formula::substitute(meta.formula_plain, inputs),
            inputs: recorded,
            symbol: meta.result.symbol.to_string(),
            result,
            unit: meta.result.units.to_string(),
            rationale: rationale.into(),
            reference: equation.reference(self.code).citation(),
            equation,
            label,
        });
        Ok(result)
    }

    pub fn steps(&self) -> &[DerivationStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DerivationStep> {
        self.steps.iter()
    }

    /// First step with the given label
    pub fn find(&self, label: &str) -> Option<&DerivationStep> {
        self.steps.iter().find(|s| s.label == label)
    }

    /// Append another trace's steps after this one's
    pub fn merge(&mut self, other: DerivationTrace) {
        self.steps.extend(other.steps);
    }

    /// Unique equations used, in first-use order
    pub fn equations_used(&self) -> Vec<Equation> {
        let mut seen = std::collections::HashSet::new();
        self.steps
            .iter()
            .filter(|s| seen.insert(s.equation))
            .map(|s| s.equation)
            .collect()
    }

    /// Steps whose formula does not reproduce the recorded result
    pub fn unreproducible(&self, rel_tol: f64) -> Vec<&DerivationStep> {
        self.steps.iter().filter(|s| !s.reproduces(rel_tol)).collect()
    }
}

impl<'a> IntoIterator for &'a DerivationTrace {
    type Item = &'a DerivationStep;
    type IntoIter = std::slice::Iter<'a, DerivationStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DerivationTrace {
        let mut trace = DerivationTrace::new(DesignCode::CsaS16_19);
        let ab = trace
            .record(Equation::BoltShankArea, "Bolt area", &[("d", 20.0)], "Gross shank area")
            .unwrap();
        trace
            .record(
                Equation::BoltShearResistance,
                "Bolt shear per bolt",
                &[("phi_b", 0.8), ("A_b", ab), ("F_ub", 800.0), ("m", 1.0)],
                "Single shear plane",
            )
            .unwrap();
        trace
    }

    #[test]
    fn test_record_and_order() {
        let trace = sample();
        assert_eq!(trace.len(), 2);
        assert_eq!(trace.steps()[0].label, "Bolt area");
        assert_eq!(trace.steps()[1].label, "Bolt shear per bolt");
        assert!((trace.steps()[1].result - 120.637).abs() < 1e-3);
        assert_eq!(trace.steps()[1].unit, "kN");
        assert_eq!(trace.steps()[1].reference, "CSA S16-19 Clause 13.12.1.2(c)");
    }

    #[test]
    fn test_formula_and_inputs() {
        let trace = sample();
        let step = &trace.steps()[0];
        assert_eq!(step.formula, "A_b = pi * d^2 / 4");
        assert_eq!(step.expression(), "pi * d^2 / 4");
        assert_eq!(step.substituted, "pi * 20^2 / 4");
        assert_eq!(step.input("d"), Some(20.0));
        assert_eq!(step.inputs[0].unit, "mm");
    }

    #[test]
    fn test_round_trip() {
        let trace = sample();
        for step in &trace {
            assert!(step.reproduces(1e-9), "{} did not reproduce", step.label);
        }
        assert!(trace.unreproducible(1e-9).is_empty());
    }

    #[test]
    fn test_tampered_step_fails_verification() {
        let mut trace = sample();
        trace.steps[0].result *= 1.01;
        assert_eq!(trace.unreproducible(1e-9).len(), 1);
    }

    #[test]
    fn test_unknown_symbol_rejected() {
        let mut trace = DerivationTrace::new(DesignCode::Aisc360_16);
        let err = trace
            .record(Equation::BoltShankArea, "Bolt area", &[("diameter", 20.0)], "")
            .unwrap_err();
        assert_eq!(err.error_code(), "CAPACITY_COMPUTATION_ERROR");
        assert!(trace.is_empty());
    }

    #[test]
    fn test_degenerate_arithmetic_names_step() {
        let mut trace = DerivationTrace::new(DesignCode::Aisc360_16);
        let err = trace
            .record(Equation::LimitingLengthPlastic, "L_p", &[("r_y", 20.0), ("E", 200_000.0), ("F_y", -1.0)], "")
            .unwrap_err();
        match err {
            CalcError::CapacityComputationError { step, .. } => assert_eq!(step, "L_p"),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_merge_and_equations_used() {
        let mut a = sample();
        let b = sample();
        a.merge(b);
        assert_eq!(a.len(), 4);
        assert_eq!(a.equations_used(), vec![Equation::BoltShankArea, Equation::BoltShearResistance]);
    }

    #[test]
    fn test_serialization() {
        let trace = sample();
        let json = serde_json::to_string(&trace).unwrap();
        let back: DerivationTrace = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), trace.len());
        assert_eq!(back.code, DesignCode::CsaS16_19);
        assert_eq!(back.steps()[1].equation, Equation::BoltShearResistance);
        assert!(back.steps()[1].reproduces(1e-9));
    }
}
