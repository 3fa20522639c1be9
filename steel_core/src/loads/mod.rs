//! Member demand forces
//!
//! Evaluators take demands as plain kN / kN·m values. Forces produced by an
//! external frame analysis arrive as unit-tagged [`Quantity`] values; this
//! module checks their dimensions and converts them, so analysis output and
//! hand-computed demands reach the evaluators the same way.
//!
//! # Overview
//!
//! - [`MemberForces`] - Axial, shear and moment at a design section
//! - [`envelope`] - Per-component absolute maximum over several force sets
//!
//! Forces are expected already factored; combining load cases belongs to
//! the analysis that produced them.
//!
//! # Example
//!
//! ```
//! use steel_core::loads::{envelope, MemberForces};
//! use steel_core::units::{Quantity, Unit};
//!
//! let from_analysis = MemberForces::new(
//!     Quantity::new(-45.0, Unit::Kip),
//!     Quantity::new(12_000.0, Unit::Newton),
//!     Quantity::new(20.0, Unit::KipFoot),
//! )
//! .unwrap();
//! let by_hand = MemberForces::from_kn(150.0, 5.0, 10.0);
//!
//! let demand = envelope(&[from_analysis, by_hand]).unwrap();
//! assert!((demand.axial_kn().unwrap() - 200.17).abs() < 0.01);
//! assert!((demand.shear_kn().unwrap() - 12.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{Dimension, Quantity, Unit};

/// Internal forces at a design section.
///
/// Axial force is positive in compression.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MemberForces {
    pub axial: Quantity,
    pub shear: Quantity,
    pub moment: Quantity,
}

impl MemberForces {
    /// Forces with dimension checks: force, force, moment.
    pub fn new(axial: Quantity, shear: Quantity, moment: Quantity) -> CalcResult<Self> {
        check_dimension("axial", &axial, Dimension::Force)?;
        check_dimension("shear", &shear, Dimension::Force)?;
        check_dimension("moment", &moment, Dimension::Moment)?;
        Ok(Self { axial, shear, moment })
    }

    /// Hand-computed demands in kN and kN·m
    pub fn from_kn(axial_kn: f64, shear_kn: f64, moment_knm: f64) -> Self {
        Self {
            axial: Quantity::kn(axial_kn),
            shear: Quantity::kn(shear_kn),
            moment: Quantity::knm(moment_knm),
        }
    }

    pub fn zero() -> Self {
        Self::from_kn(0.0, 0.0, 0.0)
    }

    pub fn axial_kn(&self) -> CalcResult<f64> {
        self.axial.to(Unit::KiloNewton)
    }

    pub fn shear_kn(&self) -> CalcResult<f64> {
        self.shear.to(Unit::KiloNewton)
    }

    pub fn moment_knm(&self) -> CalcResult<f64> {
        self.moment.to(Unit::KiloNewtonMeter)
    }
}

fn check_dimension(field: &str, q: &Quantity, expected: Dimension) -> CalcResult<()> {
    if q.dimension() == expected {
        Ok(())
    } else {
        Err(CalcError::unit_mismatch(
            format!("{} for {}", expected, field),
            format!("{} ({})", q.dimension(), q.unit),
        ))
    }
}

/// Per-component absolute maximum, in kN and kN·m.
pub fn envelope(forces: &[MemberForces]) -> CalcResult<MemberForces> {
    if forces.is_empty() {
        return Err(CalcError::invalid_input("forces", "[]", "Envelope of an empty force set"));
    }
    let mut out = MemberForces::zero();
    for f in forces {
        out.axial.value = out.axial.value.max(f.axial_kn()?.abs());
        out.shear.value = out.shear.value.max(f.shear_kn()?.abs());
        out.moment.value = out.moment.value.max(f.moment_knm()?.abs());
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_conversion() {
        let f = MemberForces::new(
            Quantity::new(100.0, Unit::Kip),
            Quantity::new(1000.0, Unit::Newton),
            Quantity::new(1.0e6, Unit::NewtonMillimeter),
        )
        .unwrap();
        assert!((f.axial_kn().unwrap() - 444.822).abs() < 1e-3);
        assert!((f.shear_kn().unwrap() - 1.0).abs() < 1e-12);
        assert!((f.moment_knm().unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = MemberForces::new(Quantity::knm(5.0), Quantity::kn(1.0), Quantity::knm(1.0)).unwrap_err();
        assert_eq!(err.error_code(), "UNIT_MISMATCH");

        let err = MemberForces::new(Quantity::kn(5.0), Quantity::kn(1.0), Quantity::mm(1.0)).unwrap_err();
        assert_eq!(err.error_code(), "UNIT_MISMATCH");
    }

    #[test]
    fn test_envelope_takes_absolute_maxima() {
        let a = MemberForces::from_kn(-300.0, 10.0, 5.0);
        let b = MemberForces::from_kn(200.0, -25.0, 2.0);
        let e = envelope(&[a, b]).unwrap();
        assert_eq!(e.axial_kn().unwrap(), 300.0);
        assert_eq!(e.shear_kn().unwrap(), 25.0);
        assert_eq!(e.moment_knm().unwrap(), 5.0);

        assert!(envelope(&[]).is_err());
    }
}
