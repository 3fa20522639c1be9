//! # Column Base Plate
//!
//! Concentrically loaded base plate on concrete (AISC Design Guide 1 method).
//!
//! ## Method
//!
//! 1. B = bf + 2e, N = d + 2e (or B and N given directly)
//! 2. q = Pu / (B·N), checked against fp = 0.85·φc·f'c
//! 3. m = (N − 0.95d)/2, n = (B − 0.8bf)/2, l = max(m, n)
//! 4. t_req = l·√(4q / (φb·Fy))
//! 5. Smallest stock plate ≥ t_req
//!
//! ## Example
//!
//! ```rust
//! use steel_core::calculations::base_plate::{design, BasePlateInput};
//! use steel_core::materials::{builtin_materials, builtin_sections, StandardPlateStock, SteelMaterial};
//! use steel_core::settings::{DesignCode, DesignSettings};
//!
//! let column = builtin_sections().get("W8X31").unwrap();
//! let concrete = builtin_materials().concrete("C25").unwrap();
//! let settings = DesignSettings::new(DesignCode::Aisc360_16);
//!
//! let input = BasePlateInput::new("BP-1", 500.0);
//! let plate = design(&input, column, &SteelMaterial::a36(), concrete, &StandardPlateStock, &settings).unwrap();
//! assert_eq!(plate.selected_thickness_mm, 25.0);
//! assert!(plate.passes());
//! ```

use serde::{Deserialize, Serialize};

use super::{warn_if_overstressed, CapacityCheck, CheckStatus, FailureMode};
use crate::equations::{DerivationTrace, Equation};
use crate::errors::{require_positive, CalcError, CalcResult};
use crate::materials::{ConcreteMaterial, SectionRecord, SteelMaterial, StockThicknessProvider};
use crate::settings::{DesignCode, DesignSettings};
use crate::units::UnitSystem;

/// Edge offset from the column footprint to the plate edge
pub const DEFAULT_EDGE_OFFSET_MM: f64 = 50.0;

/// How the plate plan dimensions are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlateFootprint {
    /// Column footprint plus an offset on every side
    EdgeOffset { offset_mm: f64 },
    /// Width B (along the flanges) and length N (along the depth)
    Dimensions { width_mm: f64, length_mm: f64 },
}

impl Default for PlateFootprint {
    fn default() -> Self {
        PlateFootprint::EdgeOffset {
            offset_mm: DEFAULT_EDGE_OFFSET_MM,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasePlateInput {
    pub label: String,
    /// Factored axial compression Pu (kN)
    pub axial_demand_kn: f64,
    #[serde(default)]
    pub footprint: PlateFootprint,
    /// Which stock list to pick the thickness from
    #[serde(default)]
    pub unit_system: UnitSystem,
}

impl BasePlateInput {
    pub fn new(label: impl Into<String>, axial_demand_kn: f64) -> Self {
        Self {
            label: label.into(),
            axial_demand_kn,
            footprint: PlateFootprint::default(),
            unit_system: UnitSystem::Metric,
        }
    }

    pub fn with_footprint(mut self, footprint: PlateFootprint) -> Self {
        self.footprint = footprint;
        self
    }

    pub fn with_unit_system(mut self, unit_system: UnitSystem) -> Self {
        self.unit_system = unit_system;
        self
    }

    pub fn validate(&self) -> CalcResult<()> {
        if !self.axial_demand_kn.is_finite() || self.axial_demand_kn < 0.0 {
            return Err(CalcError::invalid_input(
                "axial_demand_kn",
                self.axial_demand_kn.to_string(),
                "Axial demand cannot be negative",
            ));
        }
        match self.footprint {
            PlateFootprint::EdgeOffset { offset_mm } => {
                if !offset_mm.is_finite() || offset_mm < 0.0 {
                    return Err(CalcError::invalid_geometry(
                        "offset_mm",
                        offset_mm.to_string(),
                        "Edge offset cannot be negative",
                    ));
                }
            }
            PlateFootprint::Dimensions { width_mm, length_mm } => {
                require_positive("width_mm", width_mm, "Plate width must be positive")?;
                require_positive("length_mm", length_mm, "Plate length must be positive")?;
            }
        }
        Ok(())
    }
}

/// Base plate design result.
///
/// Capacities are bearing stresses (MPa): the design capacity is fp and the
/// utilization is q/fp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasePlateResult {
    pub label: String,
    pub section: String,
    pub code: DesignCode,
    /// B (mm)
    pub width_mm: f64,
    /// N (mm)
    pub length_mm: f64,
    /// A1 (mm²)
    pub area_mm2: f64,
    /// q (MPa)
    pub bearing_pressure_mpa: f64,
    /// φc on concrete bearing
    pub phi: f64,
    /// fp (MPa)
    pub bearing_strength_mpa: f64,
    pub bearing_utilization: f64,
    pub m_mm: f64,
    pub n_mm: f64,
    /// l = max(m, n)
    pub critical_cantilever_mm: f64,
    pub required_thickness_mm: f64,
    /// Smallest stock thickness ≥ required, in mm
    pub selected_thickness_mm: f64,
    pub unit_system: UnitSystem,
    pub status: CheckStatus,
    pub trace: DerivationTrace,
}

impl BasePlateResult {
    pub fn passes(&self) -> bool {
        self.status.is_pass()
    }
}

impl CapacityCheck for BasePlateResult {
    fn nominal_capacity(&self) -> f64 {
        self.bearing_strength_mpa / self.phi
    }

    fn design_capacity(&self) -> f64 {
        self.bearing_strength_mpa
    }

    fn capacity_unit(&self) -> &'static str {
        "MPa"
    }

    fn governing_mode(&self) -> FailureMode {
        FailureMode::ConcreteBearing
    }

    fn trace(&self) -> &DerivationTrace {
        &self.trace
    }

    fn utilization(&self) -> Option<f64> {
        Some(self.bearing_utilization)
    }

    fn status(&self) -> Option<CheckStatus> {
        Some(self.status)
    }
}

/// Size a base plate for `column` and pick its thickness from `stock`.
///
/// # Errors
///
/// * `InvalidInput` - Negative Pu
/// * `InvalidGeometry` - Non-positive plate dimensions, or a plate that does
///   not project past the column (l ≤ 0)
/// * `NotFound` - No stock thickness is thick enough
pub fn design(
    input: &BasePlateInput,
    column: &SectionRecord,
    steel: &SteelMaterial,
    concrete: &ConcreteMaterial,
    stock: &dyn StockThicknessProvider,
    settings: &DesignSettings,
) -> CalcResult<BasePlateResult> {
    input.validate()?;
    steel.validate()?;
    concrete.validate()?;
    settings.validate()?;
    require_positive("depth_mm", column.depth_mm, "Column depth must be positive")?;
    require_positive("flange_width_mm", column.flange_width_mm, "Flange width must be positive")?;

    let (d, bf) = (column.depth_mm, column.flange_width_mm);
    let f = settings.factors;
    let mut trace = DerivationTrace::new(settings.code);

    let (b, n_len) = match input.footprint {
        PlateFootprint::EdgeOffset { offset_mm } => (
            trace.record(
                Equation::PlateWidth,
                "Plate width B",
                &[("b_f", bf), ("e", offset_mm)],
                "Flange width plus the edge offset each side",
            )?,
            trace.record(
                Equation::PlateLength,
                "Plate length N",
                &[("d", d), ("e", offset_mm)],
                "Column depth plus the edge offset each side",
            )?,
        ),
        PlateFootprint::Dimensions { width_mm, length_mm } => (width_mm, length_mm),
    };

    let a1 = trace.record(
        Equation::PlateBearingArea,
        "Bearing area",
        &[("B", b), ("N", n_len)],
        "Full plate area bears on the concrete",
    )?;
    let q = trace.record(
        Equation::BearingPressure,
        "Bearing pressure",
        &[("P_u", input.axial_demand_kn), ("A_1", a1)],
        "Uniform pressure under a concentric load",
    )?;
    let fp = trace.record(
        Equation::ConcreteBearingStrength,
        "Concrete bearing strength",
        &[("phi_c", f.concrete_bearing), ("f_c", concrete.fc_prime_mpa)],
        format!("{} with A2 = A1", concrete.designation),
    )?;
    let utilization = trace.record(
        Equation::BearingUtilization,
        "Bearing utilization",
        &[("q", q), ("f_p", fp)],
        "Bearing pressure over bearing strength",
    )?;

    let m = trace.record(
        Equation::CantileverM,
        "Cantilever m",
        &[("N", n_len), ("d", d)],
        "Projection beyond 0.95d",
    )?;
    let n = trace.record(
        Equation::CantileverN,
        "Cantilever n",
        &[("B", b), ("b_f", bf)],
        "Projection beyond 0.8bf",
    )?;
    let l = trace.record(
        Equation::CriticalCantilever,
        "Critical cantilever",
        &[("m", m), ("n", n)],
        "Longer projection governs plate bending",
    )?;
    if l <= 0.0 {
        return Err(CalcError::invalid_geometry(
            "critical_cantilever_mm",
            format!("{:.2}", l),
            "Plate does not project beyond the column footprint",
        ));
    }

    let t_req = trace.record(
        Equation::RequiredPlateThickness,
        "Required thickness",
        &[("l", l), ("q", q), ("phi_b", f.plate_bending), ("F_y", steel.fy_mpa)],
        format!("Cantilever yield line in {} plate", steel.designation),
    )?;
    let t_sel = stock.select_thickness_mm(t_req, input.unit_system)?;

    let status = CheckStatus::from_utilization(utilization);
    warn_if_overstressed(&input.label, "concrete bearing", utilization);

    tracing::debug!(
        label = %input.label,
        section = %column.name,
        width_mm = b,
        length_mm = n_len,
        required_thickness_mm = t_req,
        selected_thickness_mm = t_sel,
        status = %status,
        "base plate design complete"
    );

    Ok(BasePlateResult {
        label: input.label.clone(),
        section: column.name.clone(),
        code: settings.code,
        width_mm: b,
        length_mm: n_len,
        area_mm2: a1,
        bearing_pressure_mpa: q,
        phi: f.concrete_bearing,
        bearing_strength_mpa: fp,
        bearing_utilization: utilization,
        m_mm: m,
        n_mm: n,
        critical_cantilever_mm: l,
        required_thickness_mm: t_req,
        selected_thickness_mm: t_sel,
        unit_system: input.unit_system,
        status,
        trace,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::{builtin_sections, PlateStock, StandardPlateStock};

    fn w8x31() -> &'static SectionRecord {
        builtin_sections().get("W8X31").unwrap()
    }

    fn c25() -> ConcreteMaterial {
        ConcreteMaterial::with_strength(25.0).unwrap()
    }

    fn aisc() -> DesignSettings {
        DesignSettings::new(DesignCode::Aisc360_16)
    }

    fn run(input: &BasePlateInput) -> CalcResult<BasePlateResult> {
        design(input, w8x31(), &SteelMaterial::a36(), &c25(), &StandardPlateStock, &aisc())
    }

    #[test]
    fn test_default_offset() {
        let r = run(&BasePlateInput::new("BP-1", 500.0)).unwrap();
        assert_eq!(r.width_mm, 303.0);
        assert_eq!(r.length_mm, 303.0);
        assert_eq!(r.area_mm2, 91809.0);
        assert!((r.bearing_pressure_mpa - 5.44609).abs() < 1e-5);
        assert!((r.bearing_strength_mpa - 13.8125).abs() < 1e-9);
        assert!((r.bearing_utilization - 0.394287).abs() < 1e-6);
        assert!((r.m_mm - 55.075).abs() < 1e-9);
        assert!((r.n_mm - 70.3).abs() < 1e-9);
        assert_eq!(r.critical_cantilever_mm, r.n_mm);
        assert!((r.required_thickness_mm - 21.8744).abs() < 1e-4);
        assert_eq!(r.selected_thickness_mm, 25.0);
        assert!(r.passes());
        assert_eq!(r.governing_mode(), FailureMode::ConcreteBearing);
        assert!((r.nominal_capacity() - 0.85 * 25.0).abs() < 1e-9);
        assert_eq!(r.capacity_unit(), "MPa");
    }

    #[test]
    fn test_imperial_stock() {
        let input = BasePlateInput::new("BP-2", 500.0).with_unit_system(UnitSystem::Imperial);
        let r = run(&input).unwrap();
        // 0.861 in -> 7/8 in
        assert!((r.selected_thickness_mm - 0.875 * 25.4).abs() < 1e-9);
    }

    #[test]
    fn test_given_dimensions() {
        let input = BasePlateInput::new("BP-3", 500.0).with_footprint(PlateFootprint::Dimensions {
            width_mm: 350.0,
            length_mm: 400.0,
        });
        let r = run(&input).unwrap();
        assert_eq!(r.area_mm2, 140_000.0);
        assert!(r.trace.find("Plate width B").is_none());
        assert_eq!(r.trace.steps()[0].label, "Bearing area");
    }

    #[test]
    fn test_bearing_failure_still_sized() {
        let r = run(&BasePlateInput::new("BP-4", 1500.0)).unwrap();
        assert!(r.bearing_utilization > 1.0);
        assert_eq!(r.status, CheckStatus::Fail);
        assert!(r.selected_thickness_mm >= r.required_thickness_mm);
    }

    #[test]
    fn test_no_stock_is_not_found() {
        let thin = PlateStock::new(vec![6.0, 10.0, 12.0], vec![0.25, 0.5]).unwrap();
        let err = design(
            &BasePlateInput::new("BP-5", 500.0),
            w8x31(),
            &SteelMaterial::a36(),
            &c25(),
            &thin,
            &aisc(),
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "NOT_FOUND");
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            run(&BasePlateInput::new("BP", -1.0)).unwrap_err().error_code(),
            "INVALID_INPUT"
        );

        let inside = BasePlateInput::new("BP", 100.0).with_footprint(PlateFootprint::Dimensions {
            width_mm: 150.0,
            length_mm: 180.0,
        });
        assert_eq!(run(&inside).unwrap_err().error_code(), "INVALID_GEOMETRY");
    }

    #[test]
    fn test_trace_reproduces() {
        let r = run(&BasePlateInput::new("BP-1", 500.0)).unwrap();
        assert_eq!(r.trace.len(), 10);
        assert!(r.trace.unreproducible(1e-9).is_empty());
    }

    #[test]
    fn test_input_json_defaults() {
        let input: BasePlateInput = serde_json::from_str(r#"{"label": "BP", "axial_demand_kn": 200}"#).unwrap();
        assert_eq!(input.footprint, PlateFootprint::default());
        assert_eq!(input.unit_system, UnitSystem::Metric);

        let input: BasePlateInput = serde_json::from_str(
            r#"{"label": "BP", "axial_demand_kn": 200, "footprint": {"edge_offset": {"offset_mm": 75}}}"#,
        )
        .unwrap();
        assert_eq!(input.footprint, PlateFootprint::EdgeOffset { offset_mm: 75.0 });
    }
}
