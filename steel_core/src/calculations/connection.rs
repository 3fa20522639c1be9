//! # Bolted Shear Connection
//!
//! Independent checks on a bolt group loaded in shear (CSA S16-19 Clause 13.12
//! and 13.11, AISC 360-16 Section J3 and J4.3):
//!
//! - Bolt shear: Vr = 0.6·φb·Ab·Fub·m per bolt, n·Vr for the group
//! - Bearing: Br = 3·φbr·t·d·Fu per bolt (optionally capped), n·Br for the group.
//!   When the bolts also press a second ply (a beam web behind a fin plate),
//!   Br is taken on both plies and the smaller one governs.
//! - Block shear: Tr = φu·[min(0.6·Fu·Anv, 0.6·Fy·Agv) + Ubs·Fu·Ant]
//!
//! The governing mode has the smallest capacity. Ties resolve in the order
//! shear, bearing, block shear. The connection passes when every
//! utilization is at most 1.0.
//!
//! ## Example
//!
//! ```rust
//! use steel_core::calculations::connection::{calculate, ConnectionInput};
//! use steel_core::calculations::{CheckStatus, FailureMode};
//! use steel_core::materials::{bolt_diameter, BlockShearAreas, BoltGrade, SteelMaterial};
//! use steel_core::settings::{DesignCode, DesignSettings};
//!
//! let d = bolt_diameter("M20").unwrap();
//! let block = BlockShearAreas::from_bolt_line(d, 2, 70.0, 35.0, 40.0, 10.0, 1.0).unwrap();
//! let input = ConnectionInput::new("J-1", d, BoltGrade::Grade8_8, 2, 10.0, 29.43, block);
//! let settings = DesignSettings::new(DesignCode::CsaS16_19);
//!
//! let result = calculate(&input, &SteelMaterial::a36(), &settings).unwrap();
//! assert!((result.shear.capacity_kn - 241.27).abs() < 0.01);
//! assert_eq!(result.governing, FailureMode::BlockShear);
//! assert_eq!(result.status, CheckStatus::Pass);
//! ```

use serde::{Deserialize, Serialize};

use super::{warn_if_overstressed, CapacityCheck, CheckStatus, FailureMode};
use crate::equations::{DerivationTrace, Equation};
use crate::errors::{require_positive, CalcError, CalcResult};
use crate::materials::{BlockShearAreas, BoltGrade, SteelMaterial};
use crate::settings::{DesignCode, DesignSettings};

fn default_shear_planes() -> u32 {
    1
}

/// Second ply in bearing, e.g. the beam web behind a fin plate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BearingPly {
    pub thickness_mm: f64,
    /// Ultimate strength Fu of the ply (MPa)
    pub fu_mpa: f64,
}

/// Ply whose bearing resistance governs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GoverningPly {
    #[default]
    Plate,
    SecondPly,
}

/// Geometry and demand of a bolted shear connection.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "J-1",
///   "bolt_diameter_mm": 20.0,
///   "bolt_grade": "8.8",
///   "shear_planes": 1,
///   "n_bolts": 2,
///   "shear_demand_kn": 29.43,
///   "plate_thickness_mm": 10.0,
///   "block_shear": { "agv_mm2": 1050.0, "anv_mm2": 720.0, "ant_mm2": 290.0, "ubs": 1.0 }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionInput {
    pub label: String,
    pub bolt_diameter_mm: f64,
    pub bolt_grade: BoltGrade,
    /// Shear planes per bolt (m)
    #[serde(default = "default_shear_planes")]
    pub shear_planes: u32,
    pub n_bolts: u32,
    /// Factored shear Vf (kN)
    pub shear_demand_kn: f64,
    pub plate_thickness_mm: f64,
    /// Per-bolt bearing limit from edge distance (kN)
    #[serde(default)]
    pub bearing_cap_kn: Option<f64>,
    /// Second ply in bearing, checked alongside the plate
    #[serde(default)]
    pub second_ply: Option<BearingPly>,
    pub block_shear: BlockShearAreas,
}

impl ConnectionInput {
    /// Single shear plane, no bearing cap
    pub fn new(
        label: impl Into<String>,
        bolt_diameter_mm: f64,
        bolt_grade: BoltGrade,
        n_bolts: u32,
        plate_thickness_mm: f64,
        shear_demand_kn: f64,
        block_shear: BlockShearAreas,
    ) -> Self {
        Self {
            label: label.into(),
            bolt_diameter_mm,
            bolt_grade,
            shear_planes: 1,
            n_bolts,
            shear_demand_kn,
            plate_thickness_mm,
            bearing_cap_kn: None,
            second_ply: None,
            block_shear,
        }
    }

    pub fn with_shear_planes(mut self, shear_planes: u32) -> Self {
        self.shear_planes = shear_planes;
        self
    }

    pub fn with_bearing_cap(mut self, cap_kn: f64) -> Self {
        self.bearing_cap_kn = Some(cap_kn);
        self
    }

    pub fn with_second_ply(mut self, thickness_mm: f64, fu_mpa: f64) -> Self {
        self.second_ply = Some(BearingPly { thickness_mm, fu_mpa });
        self
    }

    pub fn validate(&self) -> CalcResult<()> {
        require_positive("bolt_diameter_mm", self.bolt_diameter_mm, "Bolt diameter must be positive")?;
        require_positive("plate_thickness_mm", self.plate_thickness_mm, "Plate thickness must be positive")?;
        require_positive("n_bolts", self.n_bolts as f64, "Bolt count must be positive")?;
        require_positive("shear_planes", self.shear_planes as f64, "Shear plane count must be positive")?;
        if !self.shear_demand_kn.is_finite() || self.shear_demand_kn < 0.0 {
            return Err(CalcError::invalid_input(
                "shear_demand_kn",
                self.shear_demand_kn.to_string(),
                "Shear demand cannot be negative",
            ));
        }
        if let Some(cap) = self.bearing_cap_kn {
            if !cap.is_finite() || cap <= 0.0 {
                return Err(CalcError::invalid_input(
                    "bearing_cap_kn",
                    cap.to_string(),
                    "Bearing cap must be positive",
                ));
            }
        }
        if let Some(ply) = &self.second_ply {
            require_positive("second_ply.thickness_mm", ply.thickness_mm, "Ply thickness must be positive")?;
            if !ply.fu_mpa.is_finite() || ply.fu_mpa <= 0.0 {
                return Err(CalcError::invalid_input(
                    "second_ply.fu_mpa",
                    ply.fu_mpa.to_string(),
                    "Ply ultimate strength must be positive",
                ));
            }
        }
        self.block_shear.validate()
    }
}

/// One limit state of the connection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModeCheck {
    pub mode: FailureMode,
    pub phi: f64,
    /// Capacity before φ (kN)
    pub nominal_kn: f64,
    /// Factored capacity (kN)
    pub capacity_kn: f64,
    pub utilization: f64,
    pub status: CheckStatus,
}

impl ModeCheck {
    fn new(mode: FailureMode, phi: f64, capacity_kn: f64, utilization: f64) -> Self {
        Self {
            mode,
            phi,
            nominal_kn: capacity_kn / phi,
            capacity_kn,
            utilization,
            status: CheckStatus::from_utilization(utilization),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionResult {
    pub label: String,
    pub code: DesignCode,
    /// Shank area Ab (mm²)
    pub bolt_area_mm2: f64,
    /// Bolt ultimate strength Fub (MPa)
    pub bolt_fu_mpa: f64,
    pub shear_demand_kn: f64,
    pub shear: ModeCheck,
    pub bearing: ModeCheck,
    /// Ply that sets the bearing capacity
    pub bearing_ply: GoverningPly,
    pub block_shear: ModeCheck,
    pub governing: FailureMode,
    /// PASS only if every mode passes
    pub status: CheckStatus,
    pub trace: DerivationTrace,
}

impl ConnectionResult {
    /// Checks in tie-break order
    pub fn modes(&self) -> [&ModeCheck; 3] {
        [&self.shear, &self.bearing, &self.block_shear]
    }

    pub fn governing_check(&self) -> &ModeCheck {
        self.modes()
            .into_iter()
            .find(|m| m.mode == self.governing)
            .unwrap_or(&self.shear)
    }
}

impl CapacityCheck for ConnectionResult {
    fn nominal_capacity(&self) -> f64 {
        self.governing_check().nominal_kn
    }

    fn design_capacity(&self) -> f64 {
        self.governing_check().capacity_kn
    }

    fn capacity_unit(&self) -> &'static str {
        "kN"
    }

    fn governing_mode(&self) -> FailureMode {
        self.governing
    }

    fn trace(&self) -> &DerivationTrace {
        &self.trace
    }

    fn utilization(&self) -> Option<f64> {
        Some(self.governing_check().utilization)
    }

    fn status(&self) -> Option<CheckStatus> {
        Some(self.status)
    }
}

/// Check a bolted shear connection against the connected plate `plate`.
///
/// # Errors
///
/// * `InvalidGeometry` - Non-positive diameter, thickness, bolt or plane count, or block-shear area
/// * `InvalidInput` - Negative demand, Ubs outside (0, 1], a non-positive bearing cap,
///   or a non-positive second-ply Fu
pub fn calculate(input: &ConnectionInput, plate: &SteelMaterial, settings: &DesignSettings) -> CalcResult<ConnectionResult> {
    input.validate()?;
    plate.validate()?;
    settings.validate()?;

    let f = settings.factors;
    let d = input.bolt_diameter_mm;
    let n = input.n_bolts as f64;
    let vf = input.shear_demand_kn;
    let fub = input.bolt_grade.ultimate_strength_mpa();
    let areas = &input.block_shear;

    let mut trace = DerivationTrace::new(settings.code);

    // Bolt shear
    let ab = trace.record(
        Equation::BoltShankArea,
        "Bolt area",
        &[("d", d)],
        "Nominal shank area, threads excluded",
    )?;
    let vr = trace.record(
        Equation::BoltShearResistance,
        "Bolt shear per bolt",
        &[("phi_b", f.bolt_shear), ("A_b", ab), ("F_ub", fub), ("m", input.shear_planes as f64)],
        format!("{} bolts in {} shear plane(s)", input.bolt_grade, input.shear_planes),
    )?;
    let shear_capacity = trace.record(
        Equation::BoltGroupResistance,
        "Bolt shear capacity",
        &[("n", n), ("R_1", vr)],
        "Sum over the bolt group",
    )?;
    let shear_u = trace.record(
        Equation::ConnectionUtilization,
        "Bolt shear utilization",
        &[("V_f", vf), ("R_r", shear_capacity)],
        "Demand over bolt shear capacity",
    )?;

    // Bearing
    let mut bearing_ply = GoverningPly::Plate;
    let mut br = trace.record(
        Equation::BearingResistance,
        "Bearing per bolt",
        &[("phi_br", f.bolt_bearing), ("t", input.plate_thickness_mm), ("d", d), ("F_u", plate.fu_mpa)],
        format!("Bearing on {} plate", plate.designation),
    )?;
    if let Some(ply) = &input.second_ply {
        let br_ply = trace.record(
            Equation::BearingResistance,
            "Bearing per bolt (second ply)",
            &[("phi_br", f.bolt_bearing), ("t", ply.thickness_mm), ("d", d), ("F_u", ply.fu_mpa)],
            "Bearing on the second ply",
        )?;
        // Ties stay on the plate
        if br_ply < br {
            bearing_ply = GoverningPly::SecondPly;
        }
        br = trace.record(
            Equation::GoverningBearingResistance,
            "Governing bearing per bolt",
            &[("B_r1", br), ("B_r2", br_ply)],
            "Smaller of the two plies",
        )?;
    }
    if let Some(cap) = input.bearing_cap_kn {
        br = trace.record(
            Equation::CappedBearingResistance,
            "Bearing per bolt (capped)",
            &[("B_r", br), ("B_cap", cap)],
            "Limited by the edge-distance cap",
        )?;
    }
    let bearing_capacity = trace.record(
        Equation::BoltGroupResistance,
        "Bearing capacity",
        &[("n", n), ("R_1", br)],
        "Sum over the bolt group",
    )?;
    let bearing_u = trace.record(
        Equation::ConnectionUtilization,
        "Bearing utilization",
        &[("V_f", vf), ("R_r", bearing_capacity)],
        "Demand over bearing capacity",
    )?;

    // Block shear
    let block_capacity = trace.record(
        Equation::BlockShearResistance,
        "Block shear capacity",
        &[
            ("phi_u", f.block_shear),
            ("F_u", plate.fu_mpa),
            ("A_nv", areas.anv_mm2),
            ("F_y", plate.fy_mpa),
            ("A_gv", areas.agv_mm2),
            ("U_bs", areas.ubs),
            ("A_nt", areas.ant_mm2),
        ],
        "Shear rupture or yield on the shear planes plus tension rupture",
    )?;
    let block_u = trace.record(
        Equation::ConnectionUtilization,
        "Block shear utilization",
        &[("V_f", vf), ("R_r", block_capacity)],
        "Demand over block shear capacity",
    )?;

    let shear = ModeCheck::new(FailureMode::BoltShear, f.bolt_shear, shear_capacity, shear_u);
    let bearing = ModeCheck::new(FailureMode::BoltBearing, f.bolt_bearing, bearing_capacity, bearing_u);
    let block_shear = ModeCheck::new(FailureMode::BlockShear, f.block_shear, block_capacity, block_u);

    // Strict comparison keeps the earlier mode on ties
    let mut governing = &shear;
    for check in [&bearing, &block_shear] {
        if check.capacity_kn < governing.capacity_kn {
            governing = check;
        }
    }
    let governing = governing.mode;

    let status = if [&shear, &bearing, &block_shear].iter().all(|m| m.status.is_pass()) {
        CheckStatus::Pass
    } else {
        CheckStatus::Fail
    };
    for m in [&shear, &bearing, &block_shear] {
        warn_if_overstressed(&input.label, m.mode.display_name(), m.utilization);
    }

    tracing::debug!(
        label = %input.label,
        governing = %governing,
        status = %status,
        "connection check complete"
    );

    Ok(ConnectionResult {
        label: input.label.clone(),
        code: settings.code,
        bolt_area_mm2: ab,
        bolt_fu_mpa: fub,
        shear_demand_kn: vf,
        shear,
        bearing,
        bearing_ply,
        block_shear,
        governing,
        status,
        trace,
    })
}
