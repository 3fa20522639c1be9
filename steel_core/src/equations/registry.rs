//! # Equation Registry
//!
//! Central registry of every equation the evaluators apply. Each equation
//! carries its metadata (plain-text formula, variables with units, clause
//! references) and a native implementation in [`Equation::evaluate`].
//!
//! ## Architecture
//!
//! - Type-safe equation identification via the `Equation` enum
//! - Clause references resolved per [`DesignCode`]
//! - The plain-text formula is executable: [`super::formula`] evaluates it,
//!   so recorded trace steps can be re-derived from text alone
//!
//! ## Usage
//!
//! ```rust
//! use steel_core::equations::registry::Equation;
//!
//! let meta = Equation::EulerStress.metadata();
//! assert_eq!(meta.formula_plain, "pi^2 * E / lambda^2");
//!
//! let fe = Equation::EulerStress
//!     .evaluate(&[("E", 200_000.0), ("lambda", 100.0)])
//!     .unwrap();
//! assert!((fe - 197.39).abs() < 0.01);
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::settings::DesignCode;

// ============================================================================
// Code References
// ============================================================================

/// Reference to a design standard clause.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum CodeReference {
    /// AISC 360 - Specification for Structural Steel Buildings
    AISC360 { year: u16, section: &'static str },
    /// CSA S16 - Design of Steel Structures
    CsaS16 { year: u16, clause: &'static str },
    /// Fundamental mechanics or geometry (no code clause)
    Mechanics,
}

impl CodeReference {
    /// Format the reference for reports
    pub fn citation(&self) -> String {
        match self {
            CodeReference::AISC360 { year, section } => {
                format!("AISC 360-{} Section {}", year % 100, section)
            }
            CodeReference::CsaS16 { year, clause } => {
                format!("CSA S16-{} Clause {}", year % 100, clause)
            }
            CodeReference::Mechanics => "Fundamental Mechanics".to_string(),
        }
    }

    /// Short form for inline references
    pub fn short_form(&self) -> &'static str {
        match self {
            CodeReference::AISC360 { .. } => "AISC 360",
            CodeReference::CsaS16 { .. } => "CSA S16",
            CodeReference::Mechanics => "Mechanics",
        }
    }
}

// ============================================================================
// Equation Categories
// ============================================================================

/// Categories for grouping equations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    /// Areas and plate dimensions
    Geometry,
    /// Slenderness ratios and limiting lengths
    Slenderness,
    /// Critical and elastic buckling stresses
    CriticalStress,
    /// Nominal resistances
    NominalStrength,
    /// Factored resistances
    DesignStrength,
    /// Demand-to-capacity ratios
    DesignChecks,
}

impl EquationCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            EquationCategory::Geometry => "Geometry",
            EquationCategory::Slenderness => "Slenderness",
            EquationCategory::CriticalStress => "Critical Stress",
            EquationCategory::NominalStrength => "Nominal Strength",
            EquationCategory::DesignStrength => "Design Strength",
            EquationCategory::DesignChecks => "Design Checks",
        }
    }

    pub fn sort_order(&self) -> u8 {
        match self {
            EquationCategory::Geometry => 1,
            EquationCategory::Slenderness => 2,
            EquationCategory::CriticalStress => 3,
            EquationCategory::NominalStrength => 4,
            EquationCategory::DesignStrength => 5,
            EquationCategory::DesignChecks => 6,
        }
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// Definition of a variable used in an equation.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    /// Symbol as it appears in `formula_plain` (e.g. "F_y")
    pub symbol: &'static str,
    pub description: &'static str,
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

// ============================================================================
// Equation Metadata
// ============================================================================

/// Complete metadata for an equation.
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    pub name: &'static str,
    pub description: &'static str,
    /// Executable plain-text formula for the result
    pub formula_plain: &'static str,
    /// The quantity the formula produces
    pub result: Variable,
    /// Inputs, in the order they are recorded
    pub variables: Vec<Variable>,
    pub category: EquationCategory,
    /// AISC 360-16 section, when the equation is a provision of it
    pub aisc: Option<&'static str>,
    /// CSA S16-19 clause, when the equation is a provision of it
    pub csa: Option<&'static str>,
}

impl EquationMetadata {
    /// Find a variable definition by symbol
    pub fn variable(&self, symbol: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.symbol == symbol)
    }
}

// ============================================================================
// Equation Enum
// ============================================================================

/// All equations used by the capacity evaluators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Equation {
    // -------------------------------------------------------------------------
    // Compression members
    // -------------------------------------------------------------------------
    /// KL/r
    Slenderness,
    /// Fe = π²E/(KL/r)²
    EulerStress,
    /// 4.71·√(E/Fy)
    SlendernessLimit,
    /// Fcr = 0.658^(Fy/Fe)·Fy
    InelasticBucklingStress,
    /// Fcr = 0.877·Fe
    ElasticBucklingStress,
    /// Pn = Fcr·Ag
    NominalCompressiveStrength,
    /// φc·Pn
    DesignAxialStrength,
    /// Pu/φPn
    AxialUtilization,

    // -------------------------------------------------------------------------
    // Flexural members
    // -------------------------------------------------------------------------
    /// Mp = Fy·Z
    PlasticMoment,
    /// Mn = min(Mp, 1.6·Fy·Sy)
    WeakAxisNominalMoment,
    /// Lp = 1.76·ry·√(E/Fy)
    LimitingLengthPlastic,
    /// Lr closed form
    LimitingLengthInelastic,
    /// Mn = Mp for Lb ≤ Lp
    CompactMoment,
    /// Linear interpolation between Mp and 0.7·Fy·Sx
    InelasticLtbMoment,
    /// Lb/rts
    LtbSlenderness,
    /// Elastic LTB critical stress
    ElasticLtbStress,
    /// Mn = min(Fcr·Sx, Mp)
    ElasticLtbMoment,
    /// φb·Mn
    DesignFlexuralStrength,
    /// Mu/φMn
    FlexuralUtilization,

    // -------------------------------------------------------------------------
    // Bolted connections
    // -------------------------------------------------------------------------
    /// Ab = πd²/4
    BoltShankArea,
    /// Vr = 0.6·φb·Ab·Fub·m
    BoltShearResistance,
    /// n·R per bolt
    BoltGroupResistance,
    /// Br = 3·φbr·t·d·Fu
    BearingResistance,
    /// min(Br, edge-distance cap)
    CappedBearingResistance,
    /// min(Br plate, Br second ply)
    GoverningBearingResistance,
    /// Tr = φu·[min(0.6·Fu·Anv, 0.6·Fy·Agv) + Ubs·Fu·Ant]
    BlockShearResistance,
    /// Vf/Rr
    ConnectionUtilization,

    // -------------------------------------------------------------------------
    // Base plates
    // -------------------------------------------------------------------------
    /// B = bf + 2e
    PlateWidth,
    /// N = d + 2e
    PlateLength,
    /// A1 = B·N
    PlateBearingArea,
    /// q = Pu/A1
    BearingPressure,
    /// 0.85·φc·fc'
    ConcreteBearingStrength,
    /// q/fp
    BearingUtilization,
    /// m = (N − 0.95d)/2
    CantileverM,
    /// n = (B − 0.8bf)/2
    CantileverN,
    /// l = max(m, n)
    CriticalCantilever,
    /// t_req = l·√(4q/(φb·Fy))
    RequiredPlateThickness,
}

const STRESS: &str = "MPa";
const LENGTH: &str = "mm";
const FORCE: &str = "kN";
const MOMENT: &str = "kN·m";
const RATIO: &str = "-";

impl Equation {
    /// Get the full metadata for this equation
    pub fn metadata(&self) -> EquationMetadata {
        use EquationCategory::*;
        match self {
            // Compression
            Equation::Slenderness => EquationMetadata {
                name: "Slenderness Ratio",
                description: "Effective length divided by radius of gyration",
                formula_plain: "K * L / r",
                result: Variable::new("lambda", "Slenderness ratio KL/r", RATIO),
                variables: vec![
                    Variable::new("K", "Effective length factor", RATIO),
                    Variable::new("L", "Unbraced length", LENGTH),
                    Variable::new("r", "Radius of gyration about the axis", LENGTH),
                ],
                category: Slenderness,
                aisc: Some("E2"),
                csa: Some("10.4.2.1"),
            },
            Equation::EulerStress => EquationMetadata {
                name: "Elastic Buckling Stress",
                description: "Euler critical stress of an ideal pin-ended column",
                formula_plain: "pi^2 * E / lambda^2",
                result: Variable::new("F_e", "Elastic buckling stress", STRESS),
                variables: vec![
                    Variable::new("E", "Modulus of elasticity", STRESS),
                    Variable::new("lambda", "Slenderness ratio KL/r", RATIO),
                ],
                category: CriticalStress,
                aisc: Some("E3 (Eq. E3-4)"),
                csa: Some("13.3.1"),
            },
            Equation::SlendernessLimit => EquationMetadata {
                name: "Inelastic Buckling Limit",
                description: "Slenderness separating inelastic from elastic flexural buckling",
                formula_plain: "4.71 * sqrt(E / F_y)",
                result: Variable::new("lambda_lim", "Limiting slenderness", RATIO),
                variables: vec![
                    Variable::new("E", "Modulus of elasticity", STRESS),
                    Variable::new("F_y", "Yield strength", STRESS),
                ],
                category: Slenderness,
                aisc: Some("E3"),
                csa: None,
            },
            Equation::InelasticBucklingStress => EquationMetadata {
                name: "Critical Stress (Inelastic)",
                description: "Flexural buckling stress for KL/r within the inelastic limit",
                formula_plain: "0.658^(F_y / F_e) * F_y",
                result: Variable::new("F_cr", "Critical stress", STRESS),
                variables: vec![
                    Variable::new("F_y", "Yield strength", STRESS),
                    Variable::new("F_e", "Elastic buckling stress", STRESS),
                ],
                category: CriticalStress,
                aisc: Some("E3 (Eq. E3-2)"),
                csa: None,
            },
            Equation::ElasticBucklingStress => EquationMetadata {
                name: "Critical Stress (Elastic)",
                description: "Flexural buckling stress beyond the inelastic limit",
                formula_plain: "0.877 * F_e",
                result: Variable::new("F_cr", "Critical stress", STRESS),
                variables: vec![Variable::new("F_e", "Elastic buckling stress", STRESS)],
                category: CriticalStress,
                aisc: Some("E3 (Eq. E3-3)"),
                csa: None,
            },
            Equation::NominalCompressiveStrength => EquationMetadata {
                name: "Nominal Compressive Strength",
                description: "Critical stress times gross area",
                formula_plain: "F_cr * A_g / 1000",
                result: Variable::new("P_n", "Nominal compressive strength", FORCE),
                variables: vec![
                    Variable::new("F_cr", "Critical stress", STRESS),
                    Variable::new("A_g", "Gross area", "mm²"),
                ],
                category: NominalStrength,
                aisc: Some("E3 (Eq. E3-1)"),
                csa: Some("13.3.1"),
            },
            Equation::DesignAxialStrength => EquationMetadata {
                name: "Design Compressive Strength",
                description: "Factored axial resistance",
                formula_plain: "phi_c * P_n",
                result: Variable::new("phi_P_n", "Design compressive strength", FORCE),
                variables: vec![
                    Variable::new("phi_c", "Resistance factor for compression", RATIO),
                    Variable::new("P_n", "Nominal compressive strength", FORCE),
                ],
                category: DesignStrength,
                aisc: Some("E1"),
                csa: Some("13.3.1"),
            },
            Equation::AxialUtilization => EquationMetadata {
                name: "Axial Utilization",
                description: "Factored axial demand over design strength",
                formula_plain: "P_u / phi_P_n",
                result: Variable::new("U", "Utilization ratio", RATIO),
                variables: vec![
                    Variable::new("P_u", "Factored axial demand", FORCE),
                    Variable::new("phi_P_n", "Design compressive strength", FORCE),
                ],
                category: DesignChecks,
                aisc: Some("B3.1"),
                csa: Some("13.1"),
            },

            // Flexure
            Equation::PlasticMoment => EquationMetadata {
                name: "Plastic Moment",
                description: "Full plastification moment about the bending axis",
                formula_plain: "F_y * Z / 10^6",
                result: Variable::new("M_p", "Plastic moment", MOMENT),
                variables: vec![
                    Variable::new("F_y", "Yield strength", STRESS),
                    Variable::new("Z", "Plastic section modulus", "mm³"),
                ],
                category: NominalStrength,
                aisc: Some("F2.1 (Eq. F2-1)"),
                csa: Some("13.5"),
            },
            Equation::WeakAxisNominalMoment => EquationMetadata {
                name: "Weak-Axis Nominal Moment",
                description: "Plastic moment limited to 1.6 times the yield moment",
                formula_plain: "min(M_p, 1.6 * F_y * S_y / 10^6)",
                result: Variable::new("M_n", "Nominal flexural strength", MOMENT),
                variables: vec![
                    Variable::new("M_p", "Plastic moment", MOMENT),
                    Variable::new("F_y", "Yield strength", STRESS),
                    Variable::new("S_y", "Elastic section modulus about y", "mm³"),
                ],
                category: NominalStrength,
                aisc: Some("F6.1 (Eq. F6-1)"),
                csa: None,
            },
            Equation::LimitingLengthPlastic => EquationMetadata {
                name: "Limiting Length for Yielding",
                description: "Largest unbraced length reaching the plastic moment",
                formula_plain: "1.76 * r_y * sqrt(E / F_y)",
                result: Variable::new("L_p", "Limiting length for yielding", LENGTH),
                variables: vec![
                    Variable::new("r_y", "Radius of gyration about y", LENGTH),
                    Variable::new("E", "Modulus of elasticity", STRESS),
                    Variable::new("F_y", "Yield strength", STRESS),
                ],
                category: Slenderness,
                aisc: Some("F2.2 (Eq. F2-5)"),
                csa: None,
            },
            Equation::LimitingLengthInelastic => EquationMetadata {
                name: "Limiting Length for Inelastic LTB",
                description: "Unbraced length where elastic lateral-torsional buckling begins",
                formula_plain: "1.95 * r_ts * E / (0.7 * F_y) * sqrt(J * c / (S_x * h_o) + sqrt((J * c / (S_x * h_o))^2 + 6.76 * (0.7 * F_y / E)^2))",
                result: Variable::new("L_r", "Limiting length for inelastic LTB", LENGTH),
                variables: vec![
                    Variable::new("r_ts", "Effective radius of gyration", LENGTH),
                    Variable::new("E", "Modulus of elasticity", STRESS),
                    Variable::new("F_y", "Yield strength", STRESS),
                    Variable::new("J", "Torsional constant", "mm⁴"),
                    Variable::new("c", "Section coefficient", RATIO),
                    Variable::new("S_x", "Elastic section modulus about x", "mm³"),
                    Variable::new("h_o", "Distance between flange centroids", LENGTH),
                ],
                category: Slenderness,
                aisc: Some("F2.2 (Eq. F2-6)"),
                csa: None,
            },
            Equation::CompactMoment => EquationMetadata {
                name: "Nominal Moment (Yielding)",
                description: "Lb ≤ Lp: the full plastic moment is available",
                formula_plain: "M_p",
                result: Variable::new("M_n", "Nominal flexural strength", MOMENT),
                variables: vec![Variable::new("M_p", "Plastic moment", MOMENT)],
                category: NominalStrength,
                aisc: Some("F2.1"),
                csa: None,
            },
            Equation::InelasticLtbMoment => EquationMetadata {
                name: "Nominal Moment (Inelastic LTB)",
                description: "Lp < Lb ≤ Lr: linear transition from Mp to 0.7·Fy·Sx, capped at Mp",
                formula_plain: "min(C_b * (M_p - (M_p - 0.7 * F_y * S_x / 10^6) * (L_b - L_p) / (L_r - L_p)), M_p)",
                result: Variable::new("M_n", "Nominal flexural strength", MOMENT),
                variables: vec![
                    Variable::new("C_b", "Moment gradient modifier", RATIO),
                    Variable::new("M_p", "Plastic moment", MOMENT),
                    Variable::new("F_y", "Yield strength", STRESS),
                    Variable::new("S_x", "Elastic section modulus about x", "mm³"),
                    Variable::new("L_b", "Unbraced length", LENGTH),
                    Variable::new("L_p", "Limiting length for yielding", LENGTH),
                    Variable::new("L_r", "Limiting length for inelastic LTB", LENGTH),
                ],
                category: NominalStrength,
                aisc: Some("F2.2 (Eq. F2-2)"),
                csa: None,
            },
            Equation::LtbSlenderness => EquationMetadata {
                name: "LTB Slenderness",
                description: "Unbraced length over effective radius of gyration",
                formula_plain: "L_b / r_ts",
                result: Variable::new("lambda", "LTB slenderness", RATIO),
                variables: vec![
                    Variable::new("L_b", "Unbraced length", LENGTH),
                    Variable::new("r_ts", "Effective radius of gyration", LENGTH),
                ],
                category: Slenderness,
                aisc: Some("F2.2"),
                csa: None,
            },
            Equation::ElasticLtbStress => EquationMetadata {
                name: "Critical Stress (Elastic LTB)",
                description: "Lateral-torsional buckling stress for Lb > Lr",
                formula_plain: "C_b * pi^2 * E / lambda^2 * sqrt(1 + 0.078 * J * c / (S_x * h_o) * lambda^2)",
                result: Variable::new("F_cr", "Critical stress", STRESS),
                variables: vec![
                    Variable::new("C_b", "Moment gradient modifier", RATIO),
                    Variable::new("E", "Modulus of elasticity", STRESS),
                    Variable::new("lambda", "LTB slenderness", RATIO),
                    Variable::new("J", "Torsional constant", "mm⁴"),
                    Variable::new("c", "Section coefficient", RATIO),
                    Variable::new("S_x", "Elastic section modulus about x", "mm³"),
                    Variable::new("h_o", "Distance between flange centroids", LENGTH),
                ],
                category: CriticalStress,
                aisc: Some("F2.2 (Eq. F2-4)"),
                csa: None,
            },
            Equation::ElasticLtbMoment => EquationMetadata {
                name: "Nominal Moment (Elastic LTB)",
                description: "Critical stress times Sx, capped at Mp",
                formula_plain: "min(F_cr * S_x / 10^6, M_p)",
                result: Variable::new("M_n", "Nominal flexural strength", MOMENT),
                variables: vec![
                    Variable::new("F_cr", "Critical stress", STRESS),
                    Variable::new("S_x", "Elastic section modulus about x", "mm³"),
                    Variable::new("M_p", "Plastic moment", MOMENT),
                ],
                category: NominalStrength,
                aisc: Some("F2.2 (Eq. F2-3)"),
                csa: None,
            },
            Equation::DesignFlexuralStrength => EquationMetadata {
                name: "Design Flexural Strength",
                description: "Factored flexural resistance",
                formula_plain: "phi_b * M_n",
                result: Variable::new("phi_M_n", "Design flexural strength", MOMENT),
                variables: vec![
                    Variable::new("phi_b", "Resistance factor for flexure", RATIO),
                    Variable::new("M_n", "Nominal flexural strength", MOMENT),
                ],
                category: DesignStrength,
                aisc: Some("F1"),
                csa: Some("13.5"),
            },
            Equation::FlexuralUtilization => EquationMetadata {
                name: "Flexural Utilization",
                description: "Factored moment demand over design strength",
                formula_plain: "M_u / phi_M_n",
                result: Variable::new("U", "Utilization ratio", RATIO),
                variables: vec![
                    Variable::new("M_u", "Factored moment demand", MOMENT),
                    Variable::new("phi_M_n", "Design flexural strength", MOMENT),
                ],
                category: DesignChecks,
                aisc: Some("B3.1"),
                csa: Some("13.1"),
            },

            // Connections
            Equation::BoltShankArea => EquationMetadata {
                name: "Bolt Shank Area",
                description: "Gross cross-sectional area of the bolt shank",
                formula_plain: "pi * d^2 / 4",
                result: Variable::new("A_b", "Bolt area", "mm²"),
                variables: vec![Variable::new("d", "Nominal bolt diameter", LENGTH)],
                category: Geometry,
                aisc: None,
                csa: None,
            },
            Equation::BoltShearResistance => EquationMetadata {
                name: "Bolt Shear Resistance",
                description: "Factored shear resistance of one bolt over m shear planes",
                formula_plain: "0.6 * phi_b * A_b * F_ub * m / 1000",
                result: Variable::new("V_r", "Shear resistance per bolt", FORCE),
                variables: vec![
                    Variable::new("phi_b", "Resistance factor for bolts", RATIO),
                    Variable::new("A_b", "Bolt area", "mm²"),
                    Variable::new("F_ub", "Bolt ultimate strength", STRESS),
                    Variable::new("m", "Number of shear planes", RATIO),
                ],
                category: DesignStrength,
                aisc: Some("J3.6"),
                csa: Some("13.12.1.2(c)"),
            },
            Equation::BoltGroupResistance => EquationMetadata {
                name: "Bolt Group Resistance",
                description: "Per-bolt resistance summed over the bolt group",
                formula_plain: "n * R_1",
                result: Variable::new("R_r", "Group resistance", FORCE),
                variables: vec![
                    Variable::new("n", "Number of bolts", RATIO),
                    Variable::new("R_1", "Resistance per bolt", FORCE),
                ],
                category: DesignStrength,
                aisc: Some("J3.6"),
                csa: Some("13.12.1.2"),
            },
            Equation::BearingResistance => EquationMetadata {
                name: "Bolt Bearing Resistance",
                description: "Factored bearing resistance of the connected plate at one bolt",
                formula_plain: "3 * phi_br * t * d * F_u / 1000",
                result: Variable::new("B_r", "Bearing resistance per bolt", FORCE),
                variables: vec![
                    Variable::new("phi_br", "Resistance factor for bearing", RATIO),
                    Variable::new("t", "Plate thickness", LENGTH),
                    Variable::new("d", "Nominal bolt diameter", LENGTH),
                    Variable::new("F_u", "Plate ultimate strength", STRESS),
                ],
                category: DesignStrength,
                aisc: Some("J3.10"),
                csa: Some("13.12.1.2(a)"),
            },
            Equation::CappedBearingResistance => EquationMetadata {
                name: "Bearing Resistance (Edge Distance)",
                description: "Bearing resistance limited by the edge-distance cap",
                formula_plain: "min(B_r, B_cap)",
                result: Variable::new("B_r", "Bearing resistance per bolt", FORCE),
                variables: vec![
                    Variable::new("B_r", "Bearing resistance per bolt", FORCE),
                    Variable::new("B_cap", "Edge-distance limit per bolt", FORCE),
                ],
                category: DesignStrength,
                aisc: Some("J3.10"),
                csa: Some("13.12.1.2(a)"),
            },
            Equation::GoverningBearingResistance => EquationMetadata {
                name: "Governing Ply Bearing",
                description: "Smaller bearing resistance of the two plies pressed by each bolt",
                formula_plain: "min(B_r1, B_r2)",
                result: Variable::new("B_r", "Bearing resistance per bolt", FORCE),
                variables: vec![
                    Variable::new("B_r1", "Bearing resistance of the connected plate", FORCE),
                    Variable::new("B_r2", "Bearing resistance of the second ply", FORCE),
                ],
                category: DesignStrength,
                aisc: Some("J3.10"),
                csa: Some("13.12.1.2(a)"),
            },
            Equation::BlockShearResistance => EquationMetadata {
                name: "Block Shear Resistance",
                description: "Shear yield or rupture along the gross/net shear plane plus tension rupture",
                formula_plain: "phi_u * (min(0.6 * F_u * A_nv, 0.6 * F_y * A_gv) + U_bs * F_u * A_nt) / 1000",
                result: Variable::new("T_r", "Block shear resistance", FORCE),
                variables: vec![
                    Variable::new("phi_u", "Resistance factor for rupture", RATIO),
                    Variable::new("F_u", "Plate ultimate strength", STRESS),
                    Variable::new("A_nv", "Net shear area", "mm²"),
                    Variable::new("F_y", "Plate yield strength", STRESS),
                    Variable::new("A_gv", "Gross shear area", "mm²"),
                    Variable::new("U_bs", "Block shear efficiency factor", RATIO),
                    Variable::new("A_nt", "Net tension area", "mm²"),
                ],
                category: DesignStrength,
                aisc: Some("J4.3"),
                csa: Some("13.11"),
            },
            Equation::ConnectionUtilization => EquationMetadata {
                name: "Connection Utilization",
                description: "Factored shear demand over a limit-state resistance",
                formula_plain: "V_f / R_r",
                result: Variable::new("U", "Utilization ratio", RATIO),
                variables: vec![
                    Variable::new("V_f", "Factored shear demand", FORCE),
                    Variable::new("R_r", "Factored resistance", FORCE),
                ],
                category: DesignChecks,
                aisc: Some("J3"),
                csa: Some("13.12"),
            },

            // Base plates
            Equation::PlateWidth => EquationMetadata {
                name: "Base Plate Width",
                description: "Column flange width plus an edge offset on each side",
                formula_plain: "b_f + 2 * e",
                result: Variable::new("B", "Plate width", LENGTH),
                variables: vec![
                    Variable::new("b_f", "Column flange width", LENGTH),
                    Variable::new("e", "Edge offset", LENGTH),
                ],
                category: Geometry,
                aisc: None,
                csa: None,
            },
            Equation::PlateLength => EquationMetadata {
                name: "Base Plate Length",
                description: "Column depth plus an edge offset on each side",
                formula_plain: "d + 2 * e",
                result: Variable::new("N", "Plate length", LENGTH),
                variables: vec![
                    Variable::new("d", "Column depth", LENGTH),
                    Variable::new("e", "Edge offset", LENGTH),
                ],
                category: Geometry,
                aisc: None,
                csa: None,
            },
            Equation::PlateBearingArea => EquationMetadata {
                name: "Base Plate Bearing Area",
                description: "Plate footprint in contact with the concrete",
                formula_plain: "B * N",
                result: Variable::new("A_1", "Bearing area", "mm²"),
                variables: vec![
                    Variable::new("B", "Plate width", LENGTH),
                    Variable::new("N", "Plate length", LENGTH),
                ],
                category: Geometry,
                aisc: None,
                csa: None,
            },
            Equation::BearingPressure => EquationMetadata {
                name: "Bearing Pressure",
                description: "Uniform concrete pressure under the plate",
                formula_plain: "1000 * P_u / A_1",
                result: Variable::new("q", "Bearing pressure", STRESS),
                variables: vec![
                    Variable::new("P_u", "Factored axial demand", FORCE),
                    Variable::new("A_1", "Bearing area", "mm²"),
                ],
                category: NominalStrength,
                aisc: None,
                csa: None,
            },
            Equation::ConcreteBearingStrength => EquationMetadata {
                name: "Concrete Bearing Strength",
                description: "Factored bearing stress on the full concrete area",
                formula_plain: "0.85 * phi_c * f_c",
                result: Variable::new("f_p", "Allowable bearing stress", STRESS),
                variables: vec![
                    Variable::new("phi_c", "Resistance factor for concrete bearing", RATIO),
                    Variable::new("f_c", "Concrete compressive strength", STRESS),
                ],
                category: DesignStrength,
                aisc: Some("J8 (Eq. J8-1)"),
                csa: None,
            },
            Equation::BearingUtilization => EquationMetadata {
                name: "Bearing Utilization",
                description: "Bearing pressure over allowable bearing stress",
                formula_plain: "q / f_p",
                result: Variable::new("U", "Utilization ratio", RATIO),
                variables: vec![
                    Variable::new("q", "Bearing pressure", STRESS),
                    Variable::new("f_p", "Allowable bearing stress", STRESS),
                ],
                category: DesignChecks,
                aisc: Some("J8"),
                csa: None,
            },
            Equation::CantileverM => EquationMetadata {
                name: "Cantilever Length m",
                description: "Plate projection beyond 0.95d along the column depth",
                formula_plain: "(N - 0.95 * d) / 2",
                result: Variable::new("m", "Cantilever along depth", LENGTH),
                variables: vec![
                    Variable::new("N", "Plate length", LENGTH),
                    Variable::new("d", "Column depth", LENGTH),
                ],
                category: Geometry,
                aisc: Some("J8"),
                csa: None,
            },
            Equation::CantileverN => EquationMetadata {
                name: "Cantilever Length n",
                description: "Plate projection beyond 0.8bf across the flange",
                formula_plain: "(B - 0.8 * b_f) / 2",
                result: Variable::new("n", "Cantilever across flange", LENGTH),
                variables: vec![
                    Variable::new("B", "Plate width", LENGTH),
                    Variable::new("b_f", "Column flange width", LENGTH),
                ],
                category: Geometry,
                aisc: Some("J8"),
                csa: None,
            },
            Equation::CriticalCantilever => EquationMetadata {
                name: "Critical Cantilever Length",
                description: "Larger of the two cantilever projections",
                formula_plain: "max(m, n)",
                result: Variable::new("l", "Critical cantilever", LENGTH),
                variables: vec![
                    Variable::new("m", "Cantilever along depth", LENGTH),
                    Variable::new("n", "Cantilever across flange", LENGTH),
                ],
                category: Geometry,
                aisc: Some("J8"),
                csa: None,
            },
            Equation::RequiredPlateThickness => EquationMetadata {
                name: "Required Plate Thickness",
                description: "Yield-line cantilever thickness under uniform bearing",
                formula_plain: "l * sqrt(4 * q / (phi_b * F_y))",
                result: Variable::new("t_req", "Required plate thickness", LENGTH),
                variables: vec![
                    Variable::new("l", "Critical cantilever", LENGTH),
                    Variable::new("q", "Bearing pressure", STRESS),
                    Variable::new("phi_b", "Resistance factor for plate bending", RATIO),
                    Variable::new("F_y", "Plate yield strength", STRESS),
                ],
                category: NominalStrength,
                aisc: Some("J8"),
                csa: None,
            },
        }
    }

    /// Clause reference under the given design code.
    ///
    /// When the code has no clause of its own for the equation, the other
    /// code's clause is cited.
    pub fn reference(&self, code: DesignCode) -> CodeReference {
        let meta = self.metadata();
        let aisc = meta.aisc.map(|s| DesignCode::Aisc360_16.clause(s));
        let csa = meta.csa.map(|c| DesignCode::CsaS16_19.clause(c));
        let picked = match code {
            DesignCode::Aisc360_16 => aisc.or(csa),
            DesignCode::CsaS16_19 => csa.or(aisc),
        };
        picked.unwrap_or(CodeReference::Mechanics)
    }

    /// Evaluate the equation from `(symbol, value)` bindings.
    ///
    /// Fails with `CapacityComputationError` on a missing binding, a negative
    /// square-root argument or a non-finite result.
    pub fn evaluate(&self, inputs: &[(&str, f64)]) -> CalcResult<f64> {
        let v = Bindings { equation: *self, inputs };
        let value = match self {
            Equation::Slenderness => v.get("K")? * v.get("L")? / v.get("r")?,
            Equation::EulerStress => PI.powi(2) * v.get("E")? / v.get("lambda")?.powi(2),
            Equation::SlendernessLimit => 4.71 * v.sqrt(v.get("E")? / v.get("F_y")?)?,
            Equation::InelasticBucklingStress => {
                let fy = v.get("F_y")?;
                0.658_f64.powf(fy / v.get("F_e")?) * fy
            }
            Equation::ElasticBucklingStress => 0.877 * v.get("F_e")?,
            Equation::NominalCompressiveStrength => v.get("F_cr")? * v.get("A_g")? / 1000.0,
            Equation::DesignAxialStrength => v.get("phi_c")? * v.get("P_n")?,
            Equation::AxialUtilization => v.get("P_u")? / v.get("phi_P_n")?,

            Equation::PlasticMoment => v.get("F_y")? * v.get("Z")? / 1.0e6,
            Equation::WeakAxisNominalMoment => {
                v.get("M_p")?.min(1.6 * v.get("F_y")? * v.get("S_y")? / 1.0e6)
            }
            Equation::LimitingLengthPlastic => 1.76 * v.get("r_y")? * v.sqrt(v.get("E")? / v.get("F_y")?)?,
            Equation::LimitingLengthInelastic => {
                let (e, fy) = (v.get("E")?, v.get("F_y")?);
                let torsion = v.get("J")? * v.get("c")? / (v.get("S_x")? * v.get("h_o")?);
                let inner = v.sqrt(torsion.powi(2) + 6.76 * (0.7 * fy / e).powi(2))?;
                1.95 * v.get("r_ts")? * e / (0.7 * fy) * v.sqrt(torsion + inner)?
            }
            Equation::CompactMoment => v.get("M_p")?,
            Equation::InelasticLtbMoment => {
                let mp = v.get("M_p")?;
                let mr = 0.7 * v.get("F_y")? * v.get("S_x")? / 1.0e6;
                let (lb, lp, lr) = (v.get("L_b")?, v.get("L_p")?, v.get("L_r")?);
                (v.get("C_b")? * (mp - (mp - mr) * (lb - lp) / (lr - lp))).min(mp)
            }
            Equation::LtbSlenderness => v.get("L_b")? / v.get("r_ts")?,
            Equation::ElasticLtbStress => {
                let lambda = v.get("lambda")?;
                let torsion = v.get("J")? * v.get("c")? / (v.get("S_x")? * v.get("h_o")?);
                v.get("C_b")? * PI.powi(2) * v.get("E")? / lambda.powi(2)
                    * v.sqrt(1.0 + 0.078 * torsion * lambda.powi(2))?
            }
            Equation::ElasticLtbMoment => (v.get("F_cr")? * v.get("S_x")? / 1.0e6).min(v.get("M_p")?),
            Equation::DesignFlexuralStrength => v.get("phi_b")? * v.get("M_n")?,
            Equation::FlexuralUtilization => v.get("M_u")? / v.get("phi_M_n")?,

            Equation::BoltShankArea => PI * v.get("d")?.powi(2) / 4.0,
            Equation::BoltShearResistance => {
                0.6 * v.get("phi_b")? * v.get("A_b")? * v.get("F_ub")? * v.get("m")? / 1000.0
            }
            Equation::BoltGroupResistance => v.get("n")? * v.get("R_1")?,
            Equation::BearingResistance => {
                3.0 * v.get("phi_br")? * v.get("t")? * v.get("d")? * v.get("F_u")? / 1000.0
            }
            Equation::CappedBearingResistance => v.get("B_r")?.min(v.get("B_cap")?),
            Equation::GoverningBearingResistance => v.get("B_r1")?.min(v.get("B_r2")?),
            Equation::BlockShearResistance => {
                let fu = v.get("F_u")?;
                let shear = (0.6 * fu * v.get("A_nv")?).min(0.6 * v.get("F_y")? * v.get("A_gv")?);
                v.get("phi_u")? * (shear + v.get("U_bs")? * fu * v.get("A_nt")?) / 1000.0
            }
            Equation::ConnectionUtilization => v.get("V_f")? / v.get("R_r")?,

            Equation::PlateWidth => v.get("b_f")? + 2.0 * v.get("e")?,
            Equation::PlateLength => v.get("d")? + 2.0 * v.get("e")?,
            Equation::PlateBearingArea => v.get("B")? * v.get("N")?,
            Equation::BearingPressure => 1000.0 * v.get("P_u")? / v.get("A_1")?,
            Equation::ConcreteBearingStrength => 0.85 * v.get("phi_c")? * v.get("f_c")?,
            Equation::BearingUtilization => v.get("q")? / v.get("f_p")?,
            Equation::CantileverM => (v.get("N")? - 0.95 * v.get("d")?) / 2.0,
            Equation::CantileverN => (v.get("B")? - 0.8 * v.get("b_f")?) / 2.0,
            Equation::CriticalCantilever => v.get("m")?.max(v.get("n")?),
            Equation::RequiredPlateThickness => {
                let ratio = 4.0 * v.get("q")? / (v.get("phi_b")? * v.get("F_y")?);
                v.get("l")? * v.sqrt(ratio)?
            }
        };

        if !value.is_finite() {
            return Err(CalcError::computation(
                self.metadata().name,
                format!("result is not finite ({})", value),
            ));
        }
        Ok(value)
    }

    /// Get all equations in a given category
    pub fn in_category(category: EquationCategory) -> Vec<Equation> {
        ALL_EQUATIONS
            .iter()
            .filter(|eq| eq.metadata().category == category)
            .copied()
            .collect()
    }
}

/// Symbol lookup over recorded inputs
struct Bindings<'a> {
    equation: Equation,
    inputs: &'a [(&'a str, f64)],
}

impl Bindings<'_> {
    fn get(&self, symbol: &str) -> CalcResult<f64> {
        self.inputs
            .iter()
            .find(|(s, _)| *s == symbol)
            .map(|(_, value)| *value)
            .ok_or_else(|| {
                CalcError::computation(self.equation.metadata().name, format!("missing input '{}'", symbol))
            })
    }

    fn sqrt(&self, x: f64) -> CalcResult<f64> {
        if x.is_nan() || x < 0.0 {
            return Err(CalcError::computation(
                self.equation.metadata().name,
                format!("square root of negative value {}", x),
            ));
        }
        Ok(x.sqrt())
    }
}

/// All equations in the registry (for iteration)
pub static ALL_EQUATIONS: &[Equation] = &[
    // Compression
    Equation::Slenderness,
    Equation::EulerStress,
    Equation::SlendernessLimit,
    Equation::InelasticBucklingStress,
    Equation::ElasticBucklingStress,
    Equation::NominalCompressiveStrength,
    Equation::DesignAxialStrength,
    Equation::AxialUtilization,
    // Flexure
    Equation::PlasticMoment,
    Equation::WeakAxisNominalMoment,
    Equation::LimitingLengthPlastic,
    Equation::LimitingLengthInelastic,
    Equation::CompactMoment,
    Equation::InelasticLtbMoment,
    Equation::LtbSlenderness,
    Equation::ElasticLtbStress,
    Equation::ElasticLtbMoment,
    Equation::DesignFlexuralStrength,
    Equation::FlexuralUtilization,
    // Connections
    Equation::BoltShankArea,
    Equation::BoltShearResistance,
    Equation::BoltGroupResistance,
    Equation::BearingResistance,
    Equation::CappedBearingResistance,
    Equation::GoverningBearingResistance,
    Equation::BlockShearResistance,
    Equation::ConnectionUtilization,
    // Base plates
    Equation::PlateWidth,
    Equation::PlateLength,
    Equation::PlateBearingArea,
    Equation::BearingPressure,
    Equation::ConcreteBearingStrength,
    Equation::BearingUtilization,
    Equation::CantileverM,
    Equation::CantileverN,
    Equation::CriticalCantilever,
    Equation::RequiredPlateThickness,
];

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equations::formula;

    /// Plausible positive inputs for every variable of an equation
    fn sample_inputs(eq: Equation) -> Vec<(&'static str, f64)> {
        eq.metadata()
            .variables
            .iter()
            .enumerate()
            .map(|(i, var)| {
                let value = match var.symbol {
                    "E" => 200_000.0,
                    "F_y" => 350.0,
                    "F_u" | "F_ub" => 450.0,
                    s if s.starts_with("phi") => 0.9,
                    "c" | "C_b" => 1.0,
                    "L_p" => 800.0,
                    "L_r" => 4000.0,
                    "L_b" => 2500.0,
                    _ => 10.0 + 7.0 * i as f64,
                };
                (var.symbol, value)
            })
            .collect()
    }

    #[test]
    fn test_all_equations_have_metadata() {
        assert_eq!(ALL_EQUATIONS.len(), 37);

        for eq in ALL_EQUATIONS {
            let meta = eq.metadata();
            assert!(!meta.name.is_empty(), "Equation {:?} has no name", eq);
            assert!(!meta.formula_plain.is_empty(), "Equation {:?} has no formula", eq);
            assert!(!meta.variables.is_empty(), "Equation {:?} has no variables", eq);
        }
    }

    #[test]
    fn test_formula_text_matches_native_evaluation() {
        for eq in ALL_EQUATIONS {
            let inputs = sample_inputs(*eq);
            let native = eq.evaluate(&inputs).unwrap();
            let text = formula::evaluate(eq.metadata().formula_plain, &inputs).unwrap();
            let tol = 1e-9 * native.abs().max(1.0);
            assert!(
                (native - text).abs() < tol,
                "{:?}: native {} vs formula {}",
                eq,
                native,
                text
            );
        }
    }

    #[test]
    fn test_formula_symbols_are_declared() {
        for eq in ALL_EQUATIONS {
            let meta = eq.metadata();
            for symbol in formula::identifiers(meta.formula_plain) {
                assert!(
                    meta.variable(&symbol).is_some(),
                    "{:?} uses undeclared symbol {}",
                    eq,
                    symbol
                );
            }
        }
    }

    #[test]
    fn test_missing_input() {
        let err = Equation::Slenderness.evaluate(&[("K", 1.0), ("L", 3000.0)]).unwrap_err();
        assert_eq!(err.error_code(), "CAPACITY_COMPUTATION_ERROR");
    }

    #[test]
    fn test_negative_root() {
        let err = Equation::SlendernessLimit
            .evaluate(&[("E", 200_000.0), ("F_y", -350.0)])
            .unwrap_err();
        assert_eq!(err.error_code(), "CAPACITY_COMPUTATION_ERROR");
    }

    #[test]
    fn test_non_finite_result() {
        let err = Equation::Slenderness
            .evaluate(&[("K", 1.0), ("L", 3000.0), ("r", 0.0)])
            .unwrap_err();
        assert_eq!(err.error_code(), "CAPACITY_COMPUTATION_ERROR");
    }

    #[test]
    fn test_code_reference_citation() {
        let r = Equation::BlockShearResistance.reference(DesignCode::CsaS16_19);
        assert_eq!(r.citation(), "CSA S16-19 Clause 13.11");

        let r = Equation::BlockShearResistance.reference(DesignCode::Aisc360_16);
        assert_eq!(r.citation(), "AISC 360-16 Section J4.3");

        // No CSA clause of its own: cites AISC
        let r = Equation::SlendernessLimit.reference(DesignCode::CsaS16_19);
        assert_eq!(r.short_form(), "AISC 360");

        assert_eq!(Equation::BoltShankArea.reference(DesignCode::CsaS16_19), CodeReference::Mechanics);
    }

    #[test]
    fn test_in_category() {
        let checks = Equation::in_category(EquationCategory::DesignChecks);
        assert_eq!(checks.len(), 4);
        assert!(checks.contains(&Equation::ConnectionUtilization));
    }
}
