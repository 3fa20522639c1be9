//! Structural Steel Grades
//!
//! Yield/ultimate strengths for the plate and shape grades used in North
//! American practice. Stresses in MPa, density in kg/m³.
//!
//! ## Example
//!
//! ```rust
//! use steel_core::materials::steel::SteelMaterial;
//!
//! let a992 = SteelMaterial::a992();
//! assert_eq!(a992.fy_mpa, 345.0);
//! assert_eq!(a992.e_mpa, 200_000.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{require_positive, CalcError, CalcResult};

/// Modulus of elasticity of structural steel (MPa)
pub const STEEL_E_MPA: f64 = 200_000.0;

/// Density of structural steel (kg/m³)
pub const STEEL_DENSITY: f64 = 7850.0;

/// Steel grade properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SteelMaterial {
    /// Short grade name (e.g. "A992", "350W")
    pub designation: String,
    /// Governing standard (e.g. "ASTM A992", "CSA G40.21")
    #[serde(default)]
    pub standard: String,
    /// Yield strength Fy (MPa)
    pub fy_mpa: f64,
    /// Ultimate strength Fu (MPa)
    pub fu_mpa: f64,
    /// Modulus of elasticity E (MPa)
    #[serde(default = "default_e")]
    pub e_mpa: f64,
    /// Density (kg/m³)
    #[serde(default = "default_density")]
    pub density_kg_m3: f64,
}

fn default_e() -> f64 {
    STEEL_E_MPA
}

fn default_density() -> f64 {
    STEEL_DENSITY
}

impl SteelMaterial {
    /// Custom grade with the standard E and density
    pub fn new(designation: impl Into<String>, fy_mpa: f64, fu_mpa: f64) -> Self {
        Self {
            designation: designation.into(),
            standard: String::new(),
            fy_mpa,
            fu_mpa,
            e_mpa: STEEL_E_MPA,
            density_kg_m3: STEEL_DENSITY,
        }
    }

    fn graded(designation: &str, standard: &str, fy_mpa: f64, fu_mpa: f64) -> Self {
        Self {
            standard: standard.to_string(),
            ..Self::new(designation, fy_mpa, fu_mpa)
        }
    }

    /// ASTM A36 plate and bar
    pub fn a36() -> Self {
        Self::graded("A36", "ASTM A36", 250.0, 400.0)
    }

    /// ASTM A992 wide-flange shapes
    pub fn a992() -> Self {
        Self::graded("A992", "ASTM A992", 345.0, 450.0)
    }

    /// CSA G40.21 350W
    pub fn g40_350w() -> Self {
        Self::graded("350W", "CSA G40.21", 350.0, 450.0)
    }

    /// CSA G40.21 300W
    pub fn g40_300w() -> Self {
        Self::graded("300W", "CSA G40.21", 300.0, 450.0)
    }

    /// Same grade with a different modulus
    pub fn with_modulus(mut self, e_mpa: f64) -> Self {
        self.e_mpa = e_mpa;
        self
    }

    pub fn validate(&self) -> CalcResult<()> {
        require_positive("fy_mpa", self.fy_mpa, "Yield strength must be positive")?;
        require_positive("fu_mpa", self.fu_mpa, "Ultimate strength must be positive")?;
        require_positive("e_mpa", self.e_mpa, "Elastic modulus must be positive")?;
        require_positive("density_kg_m3", self.density_kg_m3, "Density must be positive")?;
        if self.fu_mpa < self.fy_mpa {
            return Err(CalcError::invalid_input(
                "fu_mpa",
                self.fu_mpa.to_string(),
                format!("Ultimate strength below yield strength ({} MPa)", self.fy_mpa),
            ));
        }
        Ok(())
    }

    /// Full name for reports (e.g. "ASTM A992")
    pub fn display_name(&self) -> String {
        if self.standard.is_empty() {
            self.designation.clone()
        } else if self.standard.ends_with(&self.designation) {
            self.standard.clone()
        } else {
            format!("{} {}", self.standard, self.designation)
        }
    }

    /// Whether `name` refers to this grade (short or full name, any case)
    pub fn matches(&self, name: &str) -> bool {
        let name = name.trim();
        name.eq_ignore_ascii_case(&self.designation) || name.eq_ignore_ascii_case(&self.display_name())
    }
}

impl std::fmt::Display for SteelMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (Fy={} MPa, Fu={} MPa)", self.display_name(), self.fy_mpa, self.fu_mpa)
    }
}

/// Built-in steel grades
pub fn standard_grades() -> Vec<SteelMaterial> {
    vec![
        SteelMaterial::a36(),
        SteelMaterial::a992(),
        SteelMaterial::g40_350w(),
        SteelMaterial::g40_300w(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_grades() {
        let a36 = SteelMaterial::a36();
        assert_eq!(a36.fy_mpa, 250.0);
        assert_eq!(a36.fu_mpa, 400.0);
        assert_eq!(a36.density_kg_m3, 7850.0);

        let w350 = SteelMaterial::g40_350w();
        assert_eq!(w350.fy_mpa, 350.0);
        assert_eq!(w350.fu_mpa, 450.0);

        for grade in standard_grades() {
            grade.validate().unwrap();
        }
    }

    #[test]
    fn test_display_names() {
        assert_eq!(SteelMaterial::a992().display_name(), "ASTM A992");
        assert_eq!(SteelMaterial::g40_350w().display_name(), "CSA G40.21 350W");
        assert_eq!(SteelMaterial::new("Custom", 300.0, 400.0).display_name(), "Custom");
    }

    #[test]
    fn test_matches() {
        let m = SteelMaterial::g40_350w();
        assert!(m.matches("350w"));
        assert!(m.matches("csa g40.21 350W"));
        assert!(!m.matches("300W"));
    }

    #[test]
    fn test_validation() {
        let err = SteelMaterial::new("Bad", 0.0, 400.0).validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_GEOMETRY");

        let err = SteelMaterial::new("Bad", 450.0, 400.0).validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_deserialize_defaults() {
        let m: SteelMaterial = serde_json::from_str(r#"{"designation":"S355","fy_mpa":355,"fu_mpa":470}"#).unwrap();
        assert_eq!(m.e_mpa, STEEL_E_MPA);
        assert_eq!(m.density_kg_m3, STEEL_DENSITY);
    }
}
