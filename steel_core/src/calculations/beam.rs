//! # Beam Calculation
//!
//! Flexural capacity of a flanged steel section, including lateral-torsional
//! buckling (AISC 360-16 Chapter F).
//!
//! ## Strong Axis
//!
//! | Zone | Range | Mn |
//! |------|-------|----|
//! | 1 | Lb ≤ Lp | Mp |
//! | 2 | Lp < Lb ≤ Lr | Cb·[Mp − (Mp − 0.7FySx)(Lb − Lp)/(Lr − Lp)] ≤ Mp |
//! | 3 | Lb > Lr | Fcr·Sx ≤ Mp |
//!
//! c = 1 is used in Lr and Fcr for every flanged family.
//!
//! ## Weak Axis
//!
//! Mn = min(Fy·Zy, 1.6·Fy·Sy), no LTB reduction.
//!
//! ## Example
//!
//! ```rust
//! use steel_core::calculations::beam::{calculate, BeamInput, LtbZone};
//! use steel_core::materials::{builtin_sections, SteelMaterial};
//! use steel_core::settings::{DesignCode, DesignSettings};
//!
//! let section = builtin_sections().get("C8X18.75").unwrap();
//! let input = BeamInput::new("B-1", 4000.0);
//! let settings = DesignSettings::new(DesignCode::Aisc360_16);
//!
//! let result = calculate(&input, section, &SteelMaterial::a36(), &settings).unwrap();
//! assert_eq!(result.zone, Some(LtbZone::Inelastic));
//! assert!((result.nominal_moment_knm - 36.14).abs() < 0.01);
//! ```

use serde::{Deserialize, Serialize};

use super::{warn_if_overstressed, CapacityCheck, FailureMode};
use crate::equations::{DerivationTrace, Equation};
use crate::errors::{CalcError, CalcResult};
use crate::materials::{SectionRecord, SteelMaterial};
use crate::settings::{DesignCode, DesignSettings};

/// Torsional coefficient c in Lr and Fcr
const TORSION_C: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BendingAxis {
    #[default]
    Strong,
    Weak,
}

/// Lateral-torsional buckling zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LtbZone {
    /// Zone 1: full plastic moment
    Yielding,
    /// Zone 2: linear interpolation between Mp and 0.7FySx
    Inelastic,
    /// Zone 3: elastic LTB
    Elastic,
}

impl LtbZone {
    pub fn number(&self) -> u8 {
        match self {
            LtbZone::Yielding => 1,
            LtbZone::Inelastic => 2,
            LtbZone::Elastic => 3,
        }
    }
}

fn default_cb() -> f64 {
    1.0
}

/// Input parameters for a steel beam.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "B-1",
///   "unbraced_length_mm": 4000.0,
///   "cb": 1.14,
///   "axis": "Strong",
///   "moment_demand_knm": 25.0
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeamInput {
    pub label: String,
    /// Unbraced length of the compression flange Lb (mm)
    pub unbraced_length_mm: f64,
    /// Moment gradient modifier
    #[serde(default = "default_cb")]
    pub cb: f64,
    #[serde(default)]
    pub axis: BendingAxis,
    /// Factored moment Mu (kN·m)
    #[serde(default)]
    pub moment_demand_knm: Option<f64>,
}

impl BeamInput {
    pub fn new(label: impl Into<String>, unbraced_length_mm: f64) -> Self {
        Self {
            label: label.into(),
            unbraced_length_mm,
            cb: 1.0,
            axis: BendingAxis::Strong,
            moment_demand_knm: None,
        }
    }

    pub fn with_cb(mut self, cb: f64) -> Self {
        self.cb = cb;
        self
    }

    pub fn with_axis(mut self, axis: BendingAxis) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_demand(mut self, moment_demand_knm: f64) -> Self {
        self.moment_demand_knm = Some(moment_demand_knm);
        self
    }

    pub fn validate(&self) -> CalcResult<()> {
        let lb = self.unbraced_length_mm;
        if !lb.is_finite() || lb < 0.0 {
            return Err(CalcError::invalid_geometry(
                "unbraced_length_mm",
                lb.to_string(),
                "Unbraced length cannot be negative",
            ));
        }
        if !self.cb.is_finite() || self.cb <= 0.0 {
            return Err(CalcError::invalid_input("cb", self.cb.to_string(), "Cb must be positive"));
        }
        if let Some(mu) = self.moment_demand_knm {
            if !mu.is_finite() || mu < 0.0 {
                return Err(CalcError::invalid_input(
                    "moment_demand_knm",
                    mu.to_string(),
                    "Moment demand cannot be negative",
                ));
            }
        }
        Ok(())
    }
}

/// Results from a beam check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeamResult {
    pub label: String,
    pub section: String,
    pub code: DesignCode,
    pub axis: BendingAxis,
    /// None for weak-axis bending
    pub zone: Option<LtbZone>,
    /// Mp (kN·m)
    pub plastic_moment_knm: f64,
    /// Lp (mm), strong axis only
    pub lp_mm: Option<f64>,
    /// Lr (mm), strong axis only
    pub lr_mm: Option<f64>,
    /// Mn (kN·m)
    pub nominal_moment_knm: f64,
    pub phi: f64,
    /// φb·Mn (kN·m)
    pub design_moment_knm: f64,
    pub moment_demand_knm: Option<f64>,
    pub utilization: Option<f64>,
    pub trace: DerivationTrace,
}

impl CapacityCheck for BeamResult {
    fn nominal_capacity(&self) -> f64 {
        self.nominal_moment_knm
    }

    fn design_capacity(&self) -> f64 {
        self.design_moment_knm
    }

    fn capacity_unit(&self) -> &'static str {
        "kN·m"
    }

    fn governing_mode(&self) -> FailureMode {
        match self.zone {
            None | Some(LtbZone::Yielding) => FailureMode::Yielding,
            Some(LtbZone::Inelastic) => FailureMode::InelasticLtb,
            Some(LtbZone::Elastic) => FailureMode::ElasticLtb,
        }
    }

    fn trace(&self) -> &DerivationTrace {
        &self.trace
    }

    fn utilization(&self) -> Option<f64> {
        self.utilization
    }
}

/// Calculate flexural capacity.
///
/// # Errors
///
/// * `InvalidGeometry` - Lb < 0 or a non-positive section property
/// * `InvalidInput` - Cb ≤ 0 or a negative demand
/// * `UnsupportedShape` - Section family without flanges
/// * `CapacityComputationError` - Lr not greater than Lp (malformed section data)
pub fn calculate(
    input: &BeamInput,
    section: &SectionRecord,
    material: &SteelMaterial,
    settings: &DesignSettings,
) -> CalcResult<BeamResult> {
    input.validate()?;
    material.validate()?;
    settings.validate()?;
    if !section.family.has_flanges() {
        return Err(CalcError::unsupported_shape(
            format!("{} ({})", section.name, section.family),
            "lateral-torsional buckling",
        ));
    }
    section.validate()?;

    let mut trace = DerivationTrace::new(settings.code);
    let flexure = match input.axis {
        BendingAxis::Strong => strong_axis(input, section, material, &mut trace)?,
        BendingAxis::Weak => weak_axis(section, material, &mut trace)?,
    };
    let Flexure { mp, mn, zone, lp, lr } = flexure;

    let phi = settings.factors.flexure;
    let phi_mn = trace.record(
        Equation::DesignFlexuralStrength,
        "Design flexural strength",
        &[("phi_b", phi), ("M_n", mn)],
        format!("Resistance factor for flexure per {}", settings.code),
    )?;

    let utilization = match input.moment_demand_knm {
        Some(mu) => Some(trace.record(
            Equation::FlexuralUtilization,
            "Flexural utilization",
            &[("M_u", mu), ("phi_M_n", phi_mn)],
            "Factored moment over design strength",
        )?),
        None => None,
    };
    if let Some(u) = utilization {
        warn_if_overstressed(&input.label, "flexure", u);
    }

    tracing::debug!(
        label = %input.label,
        section = %section.name,
        axis = ?input.axis,
        zone = ?zone.map(|z| z.number()),
        design_moment_knm = phi_mn,
        "beam check complete"
    );

    Ok(BeamResult {
        label: input.label.clone(),
        section: section.name.clone(),
        code: settings.code,
        axis: input.axis,
        zone,
        plastic_moment_knm: mp,
        lp_mm: lp,
        lr_mm: lr,
        nominal_moment_knm: mn,
        phi,
        design_moment_knm: phi_mn,
        moment_demand_knm: input.moment_demand_knm,
        utilization,
        trace,
    })
}

/// Nominal strength before φb.
struct Flexure {
    mp: f64,
    mn: f64,
    zone: Option<LtbZone>,
    lp: Option<f64>,
    lr: Option<f64>,
}

fn strong_axis(
    input: &BeamInput,
    s: &SectionRecord,
    material: &SteelMaterial,
    trace: &mut DerivationTrace,
) -> CalcResult<Flexure> {
    let (e, fy, lb, cb) = (material.e_mpa, material.fy_mpa, input.unbraced_length_mm, input.cb);

    let mp = trace.record(
        Equation::PlasticMoment,
        "Plastic moment",
        &[("F_y", fy), ("Z", s.zx_mm3)],
        "Yield stress over the strong-axis plastic modulus",
    )?;
    let lp = trace.record(
        Equation::LimitingLengthPlastic,
        "Limiting length Lp",
        &[("r_y", s.ry_mm), ("E", e), ("F_y", fy)],
        "Longest unbraced length that still reaches Mp",
    )?;
    let lr = trace.record(
        Equation::LimitingLengthInelastic,
        "Limiting length Lr",
        &[
            ("r_ts", s.rts_mm),
            ("E", e),
            ("F_y", fy),
            ("J", s.j_mm4),
            ("c", TORSION_C),
            ("S_x", s.sx_mm3),
            ("h_o", s.ho_mm),
        ],
        "Unbraced length where inelastic LTB ends",
    )?;

    let zoned = |mn, zone| Flexure {
        mp,
        mn,
        zone: Some(zone),
        lp: Some(lp),
        lr: Some(lr),
    };

    if lb <= lp {
        let mn = trace.record(
            Equation::CompactMoment,
            "Nominal moment",
            &[("M_p", mp)],
            format!("Lb = {:.0} mm <= Lp = {:.0} mm: zone 1, yielding", lb, lp),
        )?;
        return Ok(zoned(mn, LtbZone::Yielding));
    }

    if lr <= lp {
        return Err(CalcError::computation(
            "Limiting length Lr",
            format!("Lr ({:.1} mm) does not exceed Lp ({:.1} mm) for {}", lr, lp, s.name),
        ));
    }

    if lb <= lr {
        let mn = trace.record(
            Equation::InelasticLtbMoment,
            "Nominal moment",
            &[
                ("C_b", cb),
                ("M_p", mp),
                ("F_y", fy),
                ("S_x", s.sx_mm3),
                ("L_b", lb),
                ("L_p", lp),
                ("L_r", lr),
            ],
            format!("Lp < Lb = {:.0} mm <= Lr = {:.0} mm: zone 2, inelastic LTB", lb, lr),
        )?;
        return Ok(zoned(mn, LtbZone::Inelastic));
    }

    let lambda = trace.record(
        Equation::LtbSlenderness,
        "LTB slenderness",
        &[("L_b", lb), ("r_ts", s.rts_mm)],
        "Unbraced length over effective radius of gyration",
    )?;
    let fcr = trace.record(
        Equation::ElasticLtbStress,
        "Elastic LTB stress",
        &[
            ("C_b", cb),
            ("E", e),
            ("lambda", lambda),
            ("J", s.j_mm4),
            ("c", TORSION_C),
            ("S_x", s.sx_mm3),
            ("h_o", s.ho_mm),
        ],
        format!("Lb = {:.0} mm > Lr = {:.0} mm: zone 3, elastic LTB", lb, lr),
    )?;
    let mn = trace.record(
        Equation::ElasticLtbMoment,
        "Nominal moment",
        &[("F_cr", fcr), ("S_x", s.sx_mm3), ("M_p", mp)],
        "Critical stress over Sx, capped at Mp",
    )?;
    Ok(zoned(mn, LtbZone::Elastic))
}

fn weak_axis(s: &SectionRecord, material: &SteelMaterial, trace: &mut DerivationTrace) -> CalcResult<Flexure> {
    let fy = material.fy_mpa;
    let mp = trace.record(
        Equation::PlasticMoment,
        "Plastic moment",
        &[("F_y", fy), ("Z", s.zy_mm3)],
        "Yield stress over the weak-axis plastic modulus",
    )?;
    let mn = trace.record(
        Equation::WeakAxisNominalMoment,
        "Nominal moment",
        &[("M_p", mp), ("F_y", fy), ("S_y", s.sy_mm3)],
        "Weak-axis bending has no LTB; Mp capped at 1.6FySy",
    )?;
    Ok(Flexure {
        mp,
        mn,
        zone: None,
        lp: None,
        lr: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::CheckStatus;
    use crate::materials::{builtin_sections, SectionFamily};

    fn c8() -> &'static SectionRecord {
        builtin_sections().get("C8X18.75").unwrap()
    }

    fn aisc() -> DesignSettings {
        DesignSettings::new(DesignCode::Aisc360_16)
    }

    fn run(lb: f64) -> BeamResult {
        calculate(&BeamInput::new("B", lb), c8(), &SteelMaterial::a36(), &aisc()).unwrap()
    }

    #[test]
    fn test_c8_zone_2() {
        let r = run(4000.0);
        assert!((r.lp_mm.unwrap() - 756.66).abs() < 0.01);
        assert!((r.lr_mm.unwrap() - 4721.36).abs() < 0.01);
        assert_eq!(r.zone, Some(LtbZone::Inelastic));
        assert_eq!(r.zone.unwrap().number(), 2);
        assert!((r.nominal_moment_knm - 36.1396).abs() < 1e-3);
        assert!((r.design_moment_knm - 32.5257).abs() < 1e-3);
        assert_eq!(r.governing_mode(), FailureMode::InelasticLtb);
    }

    #[test]
    fn test_zone_1_at_zero_and_lp() {
        let r = run(0.0);
        assert_eq!(r.zone, Some(LtbZone::Yielding));
        assert!((r.nominal_moment_knm - 57.0).abs() < 1e-9);

        let lp = r.lp_mm.unwrap();
        let r = run(lp);
        assert_eq!(r.zone, Some(LtbZone::Yielding));
        assert_eq!(r.nominal_moment_knm, r.plastic_moment_knm);
    }

    #[test]
    fn test_lr_boundary_is_zone_2() {
        let lr = run(4000.0).lr_mm.unwrap();
        let r = run(lr);
        assert_eq!(r.zone, Some(LtbZone::Inelastic));
        // 0.7 * 250 * 1.8e5
        assert!((r.nominal_moment_knm - 31.5).abs() < 1e-6);

        let r = run(lr + 1.0);
        assert_eq!(r.zone, Some(LtbZone::Elastic));
        assert!((r.nominal_moment_knm - 31.5).abs() < 0.05);
        assert_eq!(r.governing_mode(), FailureMode::ElasticLtb);
    }

    #[test]
    fn test_zone_3_decays() {
        let near = run(6000.0).nominal_moment_knm;
        let far = run(200_000.0).nominal_moment_knm;
        assert!(far < near);
        assert!(far < 1.0);
        let r = run(6000.0);
        assert!(r.trace.find("LTB slenderness").is_some());
    }

    #[test]
    fn test_cb_capped_at_mp() {
        let input = BeamInput::new("B", 1000.0).with_cb(2.3);
        let r = calculate(&input, c8(), &SteelMaterial::a36(), &aisc()).unwrap();
        assert_eq!(r.zone, Some(LtbZone::Inelastic));
        assert_eq!(r.nominal_moment_knm, r.plastic_moment_knm);
    }

    #[test]
    fn test_weak_axis() {
        let input = BeamInput::new("B", 4000.0).with_axis(BendingAxis::Weak);
        let r = calculate(&input, c8(), &SteelMaterial::a36(), &aisc()).unwrap();
        assert!(r.zone.is_none());
        assert!(r.lp_mm.is_none());
        // Fy*Zy = 8.9 ; 1.6*Fy*Sy = 6.64
        assert!((r.plastic_moment_knm - 8.9).abs() < 1e-9);
        assert!((r.nominal_moment_knm - 6.64).abs() < 1e-9);
        assert_eq!(r.governing_mode(), FailureMode::Yielding);
    }

    #[test]
    fn test_demand() {
        let input = BeamInput::new("B", 4000.0).with_demand(30.0);
        let r = calculate(&input, c8(), &SteelMaterial::a36(), &aisc()).unwrap();
        assert!((r.utilization.unwrap() - 30.0 / 32.5257).abs() < 1e-4);
        assert_eq!(r.status(), Some(CheckStatus::Pass));
    }

    #[test]
    fn test_errors() {
        let m = SteelMaterial::a36();
        let err = calculate(&BeamInput::new("B", -1.0), c8(), &m, &aisc()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_GEOMETRY");

        let err = calculate(&BeamInput::new("B", 100.0).with_cb(0.0), c8(), &m, &aisc()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let mut angle = c8().clone();
        angle.family = SectionFamily::L;
        let err = calculate(&BeamInput::new("B", 100.0), &angle, &m, &aisc()).unwrap_err();
        assert_eq!(err.error_code(), "UNSUPPORTED_SHAPE");
    }

    #[test]
    fn test_trace_reproduces() {
        for lb in [0.0, 4000.0, 8000.0] {
            let r = run(lb);
            assert!(r.trace.unreproducible(1e-9).is_empty());
            assert_eq!(r.trace.steps().last().unwrap().label, "Design flexural strength");
        }
    }

    #[test]
    fn test_input_defaults_from_json() {
        let input: BeamInput = serde_json::from_str(r#"{"label": "B-2", "unbraced_length_mm": 1500}"#).unwrap();
        assert_eq!(input.cb, 1.0);
        assert_eq!(input.axis, BendingAxis::Strong);
        assert!(input.moment_demand_knm.is_none());
    }
}
