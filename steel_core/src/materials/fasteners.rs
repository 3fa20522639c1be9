//! Bolts and Block-Shear Geometry
//!
//! High-strength bolt grades, metric bolt designations and the shear/tension
//! areas of a block-shear failure path.
//!
//! ## Example
//!
//! ```rust
//! use steel_core::materials::fasteners::{bolt_diameter, BoltGrade};
//!
//! let grade: BoltGrade = "8.8".parse().unwrap();
//! assert_eq!(grade.ultimate_strength_mpa(), 800.0);
//! assert_eq!(bolt_diameter("M20").unwrap(), 20.0);
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{require_positive, CalcError, CalcResult};

/// Clearance added to the bolt diameter for a standard hole (mm)
pub const HOLE_CLEARANCE_MM: f64 = 2.0;

/// Metric bolt sizes and nominal diameters (mm)
const METRIC_BOLTS: [(&str, f64); 8] = [
    ("M12", 12.0),
    ("M16", 16.0),
    ("M20", 20.0),
    ("M22", 22.0),
    ("M24", 24.0),
    ("M27", 27.0),
    ("M30", 30.0),
    ("M36", 36.0),
];

/// Nominal diameter of a metric bolt designation (case-insensitive).
pub fn bolt_diameter(designation: &str) -> CalcResult<f64> {
    let key = designation.trim();
    METRIC_BOLTS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(key))
        .map(|(_, d)| *d)
        .ok_or_else(|| CalcError::not_found("Bolt size", designation))
}

/// High-strength bolt grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoltGrade {
    /// ASTM A325
    A325,
    /// ASTM A490
    A490,
    /// ASTM F3125 Grade A325
    F3125,
    /// ISO 898-1 property class 8.8
    #[serde(rename = "8.8")]
    Grade8_8,
    /// ISO 898-1 property class 10.9
    #[serde(rename = "10.9")]
    Grade10_9,
}

impl BoltGrade {
    pub const ALL: [BoltGrade; 5] = [
        BoltGrade::A325,
        BoltGrade::A490,
        BoltGrade::F3125,
        BoltGrade::Grade8_8,
        BoltGrade::Grade10_9,
    ];

    /// Bolt ultimate tensile strength Fub (MPa)
    pub fn ultimate_strength_mpa(&self) -> f64 {
        match self {
            BoltGrade::A325 => 825.0,
            BoltGrade::A490 => 1035.0,
            BoltGrade::F3125 => 825.0,
            BoltGrade::Grade8_8 => 800.0,
            BoltGrade::Grade10_9 => 1000.0,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BoltGrade::A325 => "A325",
            BoltGrade::A490 => "A490",
            BoltGrade::F3125 => "F3125",
            BoltGrade::Grade8_8 => "8.8",
            BoltGrade::Grade10_9 => "10.9",
        }
    }
}

impl FromStr for BoltGrade {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace("GRADE", "").replace(' ', "");
        match normalized.as_str() {
            "A325" | "ASTMA325" => Ok(BoltGrade::A325),
            "A490" | "ASTMA490" => Ok(BoltGrade::A490),
            "F3125" | "ASTMF3125" => Ok(BoltGrade::F3125),
            "8.8" | "8_8" => Ok(BoltGrade::Grade8_8),
            "10.9" | "10_9" => Ok(BoltGrade::Grade10_9),
            _ => Err(CalcError::not_found("Bolt grade", s)),
        }
    }
}

impl std::fmt::Display for BoltGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Areas of the block-shear failure path (mm²).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockShearAreas {
    /// Gross area in shear Agv
    pub agv_mm2: f64,
    /// Net area in shear Anv
    pub anv_mm2: f64,
    /// Net area in tension Ant
    pub ant_mm2: f64,
    /// Tension-stress efficiency factor Ubs
    pub ubs: f64,
}

impl BlockShearAreas {
    /// Areas for a single line of `n_bolts` parallel to the load.
    ///
    /// `end_distance` runs along the load to the loaded end, `edge_distance`
    /// from the bolt line to the plate side. Holes are d + 2 mm.
    pub fn from_bolt_line(
        bolt_diameter_mm: f64,
        n_bolts: u32,
        pitch_mm: f64,
        end_distance_mm: f64,
        edge_distance_mm: f64,
        thickness_mm: f64,
        ubs: f64,
    ) -> CalcResult<Self> {
        require_positive("bolt_diameter_mm", bolt_diameter_mm, "Bolt diameter must be positive")?;
        require_positive("n_bolts", n_bolts as f64, "Bolt count must be positive")?;
        require_positive("end_distance_mm", end_distance_mm, "End distance must be positive")?;
        require_positive("edge_distance_mm", edge_distance_mm, "Edge distance must be positive")?;
        require_positive("thickness_mm", thickness_mm, "Plate thickness must be positive")?;
        if n_bolts > 1 {
            require_positive("pitch_mm", pitch_mm, "Bolt pitch must be positive")?;
        }

        let n = n_bolts as f64;
        let hole = bolt_diameter_mm + HOLE_CLEARANCE_MM;
        let agv = (end_distance_mm + (n - 1.0) * pitch_mm) * thickness_mm;
        let anv = agv - (n - 0.5) * hole * thickness_mm;
        let ant = (edge_distance_mm - 0.5 * hole) * thickness_mm;

        let areas = Self {
            agv_mm2: agv,
            anv_mm2: anv,
            ant_mm2: ant,
            ubs,
        };
        areas.validate()?;
        Ok(areas)
    }

    pub fn validate(&self) -> CalcResult<()> {
        require_positive("block_shear.agv_mm2", self.agv_mm2, "Gross shear area must be positive")?;
        require_positive("block_shear.anv_mm2", self.anv_mm2, "Net shear area must be positive")?;
        require_positive("block_shear.ant_mm2", self.ant_mm2, "Net tension area must be positive")?;
        if !(self.ubs > 0.0 && self.ubs <= 1.0) {
            return Err(CalcError::invalid_input(
                "block_shear.ubs",
                self.ubs.to_string(),
                "Ubs must lie in (0, 1]",
            ));
        }
        if self.anv_mm2 > self.agv_mm2 {
            return Err(CalcError::invalid_geometry(
                "block_shear.anv_mm2",
                self.anv_mm2.to_string(),
                "Net shear area exceeds gross shear area",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bolt_diameter() {
        assert_eq!(bolt_diameter("M12").unwrap(), 12.0);
        assert_eq!(bolt_diameter("m24").unwrap(), 24.0);
        assert_eq!(bolt_diameter(" M36 ").unwrap(), 36.0);
        assert_eq!(bolt_diameter("M18").unwrap_err().error_code(), "NOT_FOUND");
    }

    #[test]
    fn test_grade_parsing() {
        assert_eq!("a325".parse::<BoltGrade>().unwrap(), BoltGrade::A325);
        assert_eq!("Grade 8.8".parse::<BoltGrade>().unwrap(), BoltGrade::Grade8_8);
        assert_eq!("10.9".parse::<BoltGrade>().unwrap(), BoltGrade::Grade10_9);
        assert_eq!("ASTM A490".parse::<BoltGrade>().unwrap(), BoltGrade::A490);
        assert!("12.9".parse::<BoltGrade>().is_err());
    }

    #[test]
    fn test_ultimate_strengths() {
        assert_eq!(BoltGrade::A325.ultimate_strength_mpa(), 825.0);
        assert_eq!(BoltGrade::A490.ultimate_strength_mpa(), 1035.0);
        assert_eq!(BoltGrade::Grade10_9.ultimate_strength_mpa(), 1000.0);
        for grade in BoltGrade::ALL {
            assert_eq!(grade.display_name().parse::<BoltGrade>().unwrap(), grade);
        }
    }

    #[test]
    fn test_grade_serialization() {
        assert_eq!(serde_json::to_string(&BoltGrade::Grade8_8).unwrap(), "\"8.8\"");
        let g: BoltGrade = serde_json::from_str("\"A325\"").unwrap();
        assert_eq!(g, BoltGrade::A325);
    }

    #[test]
    fn test_block_shear_from_bolt_line() {
        // Two M20 bolts at 70 mm pitch, 35 mm end, 40 mm edge, 10 mm plate
        let areas = BlockShearAreas::from_bolt_line(20.0, 2, 70.0, 35.0, 40.0, 10.0, 1.0).unwrap();
        assert!((areas.agv_mm2 - 1050.0).abs() < 1e-9);
        assert!((areas.anv_mm2 - 720.0).abs() < 1e-9);
        assert!((areas.ant_mm2 - 290.0).abs() < 1e-9);
    }

    #[test]
    fn test_block_shear_rejects_bad_geometry() {
        // Edge distance smaller than half a hole leaves no tension area
        let err = BlockShearAreas::from_bolt_line(20.0, 2, 70.0, 35.0, 10.0, 10.0, 1.0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_GEOMETRY");

        let err = BlockShearAreas::from_bolt_line(20.0, 0, 70.0, 35.0, 40.0, 10.0, 1.0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_GEOMETRY");

        let err = BlockShearAreas::from_bolt_line(20.0, 2, 70.0, 35.0, 40.0, 10.0, 1.5).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }
}
