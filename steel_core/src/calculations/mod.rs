//! # Capacity Checks
//!
//! Each evaluator follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Capacities, classification and the derivation trace
//! - `calculate(...) -> CalcResult<*Result>` - Pure evaluation function
//!
//! Evaluators never touch global state. Section and material records are
//! resolved by the caller and passed in, together with the
//! [`DesignSettings`] that fix the design code and resistance factors.
//!
//! ## Available Checks
//!
//! - [`column`] - Axial compression (flexural buckling)
//! - [`beam`] - Flexure with lateral-torsional buckling
//! - [`connection`] - Bolted shear connection (bolt shear, bearing, block shear)
//! - [`base_plate`] - Concentrically loaded column base plate
//! - [`selection`] - Lightest adequate section over a catalog family

pub mod base_plate;
pub mod beam;
pub mod column;
pub mod connection;
pub mod selection;

use serde::{Deserialize, Serialize};

pub use base_plate::{BasePlateInput, BasePlateResult, PlateFootprint};
pub use beam::{BeamInput, BeamResult, BendingAxis, LtbZone};
pub use column::{Axis, BoundaryCondition, BucklingRegime, ColumnInput, ColumnResult, EffectiveLength, EndConditions};
pub use connection::{BearingPly, ConnectionInput, ConnectionResult, GoverningPly, ModeCheck};

use crate::equations::DerivationTrace;
use crate::errors::CalcResult;
use crate::materials::{MaterialCatalog, SectionCatalog, StockThicknessProvider};
use crate::settings::DesignSettings;

/// Limit state that governs a capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureMode {
    /// Column flexural buckling, KL/r within the inelastic limit
    InelasticBuckling,
    /// Column flexural buckling beyond the inelastic limit
    ElasticBuckling,
    /// Beam reaches the plastic moment (LTB zone 1, or weak-axis bending)
    Yielding,
    /// Beam LTB zone 2
    InelasticLtb,
    /// Beam LTB zone 3
    ElasticLtb,
    BoltShear,
    BoltBearing,
    BlockShear,
    /// Concrete crushing under a base plate
    ConcreteBearing,
}

impl FailureMode {
    pub fn display_name(&self) -> &'static str {
        match self {
            FailureMode::InelasticBuckling => "Inelastic flexural buckling",
            FailureMode::ElasticBuckling => "Elastic flexural buckling",
            FailureMode::Yielding => "Yielding (plastic moment)",
            FailureMode::InelasticLtb => "Inelastic lateral-torsional buckling",
            FailureMode::ElasticLtb => "Elastic lateral-torsional buckling",
            FailureMode::BoltShear => "Bolt shear",
            FailureMode::BoltBearing => "Bolt bearing",
            FailureMode::BlockShear => "Block shear",
            FailureMode::ConcreteBearing => "Concrete bearing",
        }
    }
}

impl std::fmt::Display for FailureMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Verdict of a demand-to-capacity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckStatus {
    Pass,
    Fail,
}

impl CheckStatus {
    /// Utilization of exactly 1.0 passes
    pub fn from_utilization(utilization: f64) -> Self {
        if utilization <= 1.0 {
            CheckStatus::Pass
        } else {
            CheckStatus::Fail
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, CheckStatus::Pass)
    }
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckStatus::Pass => write!(f, "PASS"),
            CheckStatus::Fail => write!(f, "FAIL"),
        }
    }
}

/// Common view over every evaluator result.
pub trait CapacityCheck {
    /// Unfactored capacity
    fn nominal_capacity(&self) -> f64;

    /// Factored capacity
    fn design_capacity(&self) -> f64;

    /// Unit of both capacities ("kN", "kN·m", "MPa")
    fn capacity_unit(&self) -> &'static str;

    fn governing_mode(&self) -> FailureMode;

    fn trace(&self) -> &DerivationTrace;

    /// Demand over design capacity, when a demand was given
    fn utilization(&self) -> Option<f64>;

    fn status(&self) -> Option<CheckStatus> {
        self.utilization().map(CheckStatus::from_utilization)
    }
}

/// Warn when a demand exceeds its design capacity.
pub(crate) fn warn_if_overstressed(label: &str, check: &str, utilization: f64) {
    if utilization > 1.0 {
        tracing::warn!(label, check, utilization, "demand exceeds design capacity");
    }
}

// ============================================================================
// Heterogeneous Checks
// ============================================================================

/// A check that names its section and materials instead of holding records.
///
/// This allows storing heterogeneous checks in a single collection (or JSON
/// document) and evaluating them against whatever catalogs are loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    Column {
        section: String,
        steel: String,
        input: ColumnInput,
    },
    Beam {
        section: String,
        steel: String,
        input: BeamInput,
    },
    Connection {
        /// Connected plate grade
        steel: String,
        input: ConnectionInput,
    },
    BasePlate {
        section: String,
        /// Plate grade
        steel: String,
        concrete: String,
        input: BasePlateInput,
    },
}

/// Everything a [`CalculationItem`] resolves against.
pub struct EvaluationContext<'a> {
    pub sections: &'a SectionCatalog,
    pub materials: &'a MaterialCatalog,
    pub stock: &'a dyn StockThicknessProvider,
    pub settings: &'a DesignSettings,
}

/// Result of evaluating a [`CalculationItem`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationResult {
    Column(ColumnResult),
    Beam(BeamResult),
    Connection(ConnectionResult),
    BasePlate(BasePlateResult),
}

impl CalculationResult {
    pub fn as_check(&self) -> &dyn CapacityCheck {
        match self {
            CalculationResult::Column(r) => r,
            CalculationResult::Beam(r) => r,
            CalculationResult::Connection(r) => r,
            CalculationResult::BasePlate(r) => r,
        }
    }
}

impl CalculationItem {
    /// User-provided label of the wrapped input
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::Column { input, .. } => &input.label,
            CalculationItem::Beam { input, .. } => &input.label,
            CalculationItem::Connection { input, .. } => &input.label,
            CalculationItem::BasePlate { input, .. } => &input.label,
        }
    }

    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::Column { .. } => "Column",
            CalculationItem::Beam { .. } => "Beam",
            CalculationItem::Connection { .. } => "Connection",
            CalculationItem::BasePlate { .. } => "BasePlate",
        }
    }

    /// Resolve the named records and run the matching evaluator.
    pub fn evaluate(&self, ctx: &EvaluationContext<'_>) -> CalcResult<CalculationResult> {
        match self {
            CalculationItem::Column { section, steel, input } => {
                let section = ctx.sections.get(section)?;
                let steel = ctx.materials.steel(steel)?;
                column::calculate(input, section, steel, ctx.settings).map(CalculationResult::Column)
            }
            CalculationItem::Beam { section, steel, input } => {
                let section = ctx.sections.get(section)?;
                let steel = ctx.materials.steel(steel)?;
                beam::calculate(input, section, steel, ctx.settings).map(CalculationResult::Beam)
            }
            CalculationItem::Connection { steel, input } => {
                let steel = ctx.materials.steel(steel)?;
                connection::calculate(input, steel, ctx.settings).map(CalculationResult::Connection)
            }
            CalculationItem::BasePlate {
                section,
                steel,
                concrete,
                input,
            } => {
                let section = ctx.sections.get(section)?;
                let steel = ctx.materials.steel(steel)?;
                let concrete = ctx.materials.concrete(concrete)?;
                base_plate::design(input, section, steel, concrete, ctx.stock, ctx.settings)
                    .map(CalculationResult::BasePlate)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::{builtin_materials, builtin_sections, StandardPlateStock};
    use crate::settings::DesignCode;

    #[test]
    fn test_status_boundary() {
        assert_eq!(CheckStatus::from_utilization(1.0), CheckStatus::Pass);
        assert_eq!(CheckStatus::from_utilization(1.0 + 1e-12), CheckStatus::Fail);
        assert_eq!(serde_json::to_string(&CheckStatus::Pass).unwrap(), "\"PASS\"");
    }

    #[test]
    fn test_calculation_item_from_json() {
        let json = r#"[
            {"type": "Column", "section": "W6X8.5", "steel": "350W",
             "input": {"label": "C-1", "length_mm": 3000.0,
                       "x_axis": {"ends": {"top": "Pinned", "bottom": "Pinned"}},
                       "y_axis": {"ends": {"top": "Pinned", "bottom": "Pinned"}}}},
            {"type": "Beam", "section": "C8X18.75", "steel": "A36",
             "input": {"label": "B-1", "unbraced_length_mm": 4000.0}}
        ]"#;
        let items: Vec<CalculationItem> = serde_json::from_str(json).unwrap();
        assert_eq!(items[0].calc_type(), "Column");
        assert_eq!(items[1].label(), "B-1");

        let settings = DesignSettings::new(DesignCode::Aisc360_16);
        let ctx = EvaluationContext {
            sections: builtin_sections(),
            materials: builtin_materials(),
            stock: &StandardPlateStock,
            settings: &settings,
        };
        let column = items[0].evaluate(&ctx).unwrap();
        assert!((column.as_check().design_capacity() - 144.12).abs() < 0.01);
        assert_eq!(column.as_check().governing_mode(), FailureMode::ElasticBuckling);

        let beam = items[1].evaluate(&ctx).unwrap();
        assert_eq!(beam.as_check().governing_mode(), FailureMode::InelasticLtb);
        assert!(beam.as_check().status().is_none());
    }

    #[test]
    fn test_calculation_item_unknown_section() {
        let settings = DesignSettings::new(DesignCode::CsaS16_19);
        let ctx = EvaluationContext {
            sections: builtin_sections(),
            materials: builtin_materials(),
            stock: &StandardPlateStock,
            settings: &settings,
        };
        let item = CalculationItem::Column {
            section: "W99X1".to_string(),
            steel: "350W".to_string(),
            input: ColumnInput::new("C-9", 3000.0, EndConditions::pinned()),
        };
        assert_eq!(item.evaluate(&ctx).unwrap_err().error_code(), "NOT_FOUND");
    }
}
