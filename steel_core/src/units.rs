//! # Unit Types
//!
//! Dimension-checked physical quantities for demands supplied from outside
//! the evaluators (hand calculations, external frame solvers).
//!
//! ## Design Philosophy
//!
//! Evaluators work in one consistent SI convention and take plain `f64`
//! fields whose names carry the unit (`length_mm`, `axial_demand_kn`).
//! Anything arriving in another unit goes through [`Quantity`] first, which
//! refuses to convert between dimensions:
//!
//! - Length: millimetres (mm)
//! - Force: kilonewtons (kN)
//! - Moment: kilonewton-metres (kN·m)
//! - Stress: megapascals (MPa)
//! - Area: square millimetres (mm²)
//!
//! ## Example
//!
//! ```rust
//! use steel_core::units::{Quantity, Unit};
//!
//! let shear = Quantity::new(6.615, Unit::Kip);
//! let kn = shear.to(Unit::KiloNewton).unwrap();
//! assert!((kn - 29.43).abs() < 0.01);
//!
//! // Dimension mismatch is an error, never a silent reinterpretation
//! assert!(shear.to(Unit::Millimeter).is_err());
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Div, Mul, Neg};

use crate::errors::{CalcError, CalcResult};

/// Measurement system used to pick stock lists and display conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

/// Physical dimension of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    Length,
    Area,
    Force,
    Moment,
    Stress,
}

impl Dimension {
    pub fn name(&self) -> &'static str {
        match self {
            Dimension::Length => "length",
            Dimension::Area => "area",
            Dimension::Force => "force",
            Dimension::Moment => "moment",
            Dimension::Stress => "stress",
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Supported units. Base units are mm, mm², N, N·mm and MPa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    // Length
    #[serde(rename = "mm")]
    Millimeter,
    #[serde(rename = "m")]
    Meter,
    #[serde(rename = "in")]
    Inch,
    #[serde(rename = "ft")]
    Foot,
    // Area
    #[serde(rename = "mm2")]
    SquareMillimeter,
    #[serde(rename = "in2")]
    SquareInch,
    // Force
    #[serde(rename = "N")]
    Newton,
    #[serde(rename = "kN")]
    KiloNewton,
    #[serde(rename = "lbf")]
    PoundForce,
    #[serde(rename = "kip")]
    Kip,
    // Moment
    #[serde(rename = "N*mm")]
    NewtonMillimeter,
    #[serde(rename = "kN*m")]
    KiloNewtonMeter,
    #[serde(rename = "kip*in")]
    KipInch,
    #[serde(rename = "kip*ft")]
    KipFoot,
    // Stress
    #[serde(rename = "MPa")]
    MegaPascal,
    #[serde(rename = "psi")]
    Psi,
    #[serde(rename = "ksi")]
    Ksi,
}

const LBF_IN_N: f64 = 4.448_221_615_260_5;

impl Unit {
    pub fn dimension(&self) -> Dimension {
        match self {
            Unit::Millimeter | Unit::Meter | Unit::Inch | Unit::Foot => Dimension::Length,
            Unit::SquareMillimeter | Unit::SquareInch => Dimension::Area,
            Unit::Newton | Unit::KiloNewton | Unit::PoundForce | Unit::Kip => Dimension::Force,
            Unit::NewtonMillimeter | Unit::KiloNewtonMeter | Unit::KipInch | Unit::KipFoot => Dimension::Moment,
            Unit::MegaPascal | Unit::Psi | Unit::Ksi => Dimension::Stress,
        }
    }

    /// Multiplier taking a value in this unit to the base unit of its dimension.
    pub fn to_base(&self) -> f64 {
        match self {
            Unit::Millimeter => 1.0,
            Unit::Meter => 1000.0,
            Unit::Inch => 25.4,
            Unit::Foot => 304.8,
            Unit::SquareMillimeter => 1.0,
            Unit::SquareInch => 645.16,
            Unit::Newton => 1.0,
            Unit::KiloNewton => 1000.0,
            Unit::PoundForce => LBF_IN_N,
            Unit::Kip => LBF_IN_N * 1000.0,
            Unit::NewtonMillimeter => 1.0,
            Unit::KiloNewtonMeter => 1.0e6,
            Unit::KipInch => LBF_IN_N * 1000.0 * 25.4,
            Unit::KipFoot => LBF_IN_N * 1000.0 * 304.8,
            Unit::MegaPascal => 1.0,
            Unit::Psi => LBF_IN_N / 645.16,
            Unit::Ksi => LBF_IN_N * 1000.0 / 645.16,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Millimeter => "mm",
            Unit::Meter => "m",
            Unit::Inch => "in",
            Unit::Foot => "ft",
            Unit::SquareMillimeter => "mm²",
            Unit::SquareInch => "in²",
            Unit::Newton => "N",
            Unit::KiloNewton => "kN",
            Unit::PoundForce => "lbf",
            Unit::Kip => "kip",
            Unit::NewtonMillimeter => "N·mm",
            Unit::KiloNewtonMeter => "kN·m",
            Unit::KipInch => "kip·in",
            Unit::KipFoot => "kip·ft",
            Unit::MegaPascal => "MPa",
            Unit::Psi => "psi",
            Unit::Ksi => "ksi",
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A value tagged with its unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub value: f64,
    pub unit: Unit,
}

impl Quantity {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    pub fn kn(value: f64) -> Self {
        Self::new(value, Unit::KiloNewton)
    }

    pub fn knm(value: f64) -> Self {
        Self::new(value, Unit::KiloNewtonMeter)
    }

    pub fn mm(value: f64) -> Self {
        Self::new(value, Unit::Millimeter)
    }

    pub fn dimension(&self) -> Dimension {
        self.unit.dimension()
    }

    /// Convert to `target`, failing with `UnitMismatch` across dimensions.
    pub fn to(&self, target: Unit) -> CalcResult<f64> {
        if self.unit.dimension() != target.dimension() {
            return Err(CalcError::unit_mismatch(
                format!("{} ({})", target.dimension(), target),
                format!("{} ({})", self.unit.dimension(), self.unit),
            ));
        }
        Ok(self.value * self.unit.to_base() / target.to_base())
    }

    /// Convert and re-tag, keeping the quantity form.
    pub fn convert(&self, target: Unit) -> CalcResult<Quantity> {
        Ok(Quantity::new(self.to(target)?, target))
    }

    pub fn abs(self) -> Self {
        Self::new(self.value.abs(), self.unit)
    }
}

impl Mul<f64> for Quantity {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        Self::new(self.value * rhs, self.unit)
    }
}

impl Div<f64> for Quantity {
    type Output = Self;
    fn div(self, rhs: f64) -> Self::Output {
        Self::new(self.value / rhs, self.unit)
    }
}

impl Neg for Quantity {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self::new(-self.value, self.unit)
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}
