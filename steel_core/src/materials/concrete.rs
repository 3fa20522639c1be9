//! Concrete Grades
//!
//! Specified compressive strength fc' for base-plate bearing checks.

use serde::{Deserialize, Serialize};

use crate::errors::{require_positive, CalcResult};

/// Normal-weight reinforced concrete density (kg/m³)
pub const CONCRETE_DENSITY: f64 = 2400.0;

/// Named grade strengths (MPa)
const GRADES_MPA: [f64; 5] = [20.0, 25.0, 30.0, 35.0, 40.0];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcreteMaterial {
    /// Grade name (e.g. "C25")
    pub designation: String,
    /// Specified compressive strength fc' (MPa)
    pub fc_prime_mpa: f64,
    /// Density (kg/m³)
    #[serde(default = "default_density")]
    pub density_kg_m3: f64,
}

fn default_density() -> f64 {
    CONCRETE_DENSITY
}

impl ConcreteMaterial {
    /// Arbitrary strength, named "C{fc}"
    pub fn with_strength(fc_prime_mpa: f64) -> CalcResult<Self> {
        require_positive("fc_prime_mpa", fc_prime_mpa, "Concrete strength must be positive")?;
        Ok(Self {
            designation: format!("C{}", fc_prime_mpa),
            fc_prime_mpa,
            density_kg_m3: CONCRETE_DENSITY,
        })
    }

    pub fn validate(&self) -> CalcResult<()> {
        require_positive("fc_prime_mpa", self.fc_prime_mpa, "Concrete strength must be positive")?;
        require_positive("density_kg_m3", self.density_kg_m3, "Density must be positive")
    }

    pub fn matches(&self, name: &str) -> bool {
        self.designation.eq_ignore_ascii_case(name.trim())
    }
}

impl std::fmt::Display for ConcreteMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (f'c={} MPa)", self.designation, self.fc_prime_mpa)
    }
}

/// Built-in grades C20 through C40
pub fn standard_grades() -> Vec<ConcreteMaterial> {
    GRADES_MPA
        .iter()
        .map(|&fc| ConcreteMaterial {
            designation: format!("C{}", fc),
            fc_prime_mpa: fc,
            density_kg_m3: CONCRETE_DENSITY,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_grades() {
        let grades = standard_grades();
        assert_eq!(grades.len(), 5);
        assert_eq!(grades[0].designation, "C20");
        assert_eq!(grades[4].fc_prime_mpa, 40.0);
    }

    #[test]
    fn test_with_strength() {
        let c = ConcreteMaterial::with_strength(27.5).unwrap();
        assert_eq!(c.designation, "C27.5");
        assert!(c.matches("c27.5"));

        let err = ConcreteMaterial::with_strength(0.0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_GEOMETRY");
    }
}
