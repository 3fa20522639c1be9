//! # Materials and Sections
//!
//! Read-only reference data consumed by the evaluators.
//!
//! ## Modules
//!
//! - [`sections`] - AISC shape catalog (metric properties) with lookup and selection queries
//! - [`steel`] - Structural steel grades (Fy, Fu, E, density)
//! - [`concrete`] - Concrete grades for bearing checks
//! - [`fasteners`] - Bolt grades, metric bolt sizes and block-shear areas
//! - [`stock`] - Plate stock thickness providers
//!
//! ## Example
//!
//! ```rust
//! use steel_core::materials::builtin_materials;
//!
//! let materials = builtin_materials();
//! let steel = materials.steel("a992").unwrap();
//! let concrete = materials.concrete("C25").unwrap();
//! assert_eq!(steel.fy_mpa, 345.0);
//! assert_eq!(concrete.fc_prime_mpa, 25.0);
//! ```

pub mod concrete;
pub mod fasteners;
pub mod sections;
pub mod steel;
pub mod stock;

pub use concrete::ConcreteMaterial;
pub use fasteners::{bolt_diameter, BlockShearAreas, BoltGrade};
pub use sections::{builtin_sections, SectionCatalog, SectionFamily, SectionProperty, SectionRecord};
pub use steel::SteelMaterial;
pub use stock::{PlateStock, StandardPlateStock, StockThicknessProvider};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Steel and concrete grade table.
///
/// Lookups are case-insensitive on the short designation or the full name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaterialCatalog {
    #[serde(default)]
    steels: Vec<SteelMaterial>,
    #[serde(default)]
    concretes: Vec<ConcreteMaterial>,
}

impl MaterialCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog from a JSON object `{"steels": [...], "concretes": [...]}`
    pub fn from_json(json: &str) -> CalcResult<Self> {
        let raw: MaterialCatalog = serde_json::from_str(json)?;
        let mut catalog = Self::new();
        for steel in raw.steels {
            catalog.add_steel(steel)?;
        }
        for concrete in raw.concretes {
            catalog.add_concrete(concrete)?;
        }
        Ok(catalog)
    }

    pub fn add_steel(&mut self, material: SteelMaterial) -> CalcResult<()> {
        material.validate()?;
        if self.steels.iter().any(|m| m.matches(&material.designation)) {
            return Err(CalcError::invalid_input(
                "designation",
                material.designation,
                "Duplicate steel grade",
            ));
        }
        self.steels.push(material);
        Ok(())
    }

    pub fn add_concrete(&mut self, material: ConcreteMaterial) -> CalcResult<()> {
        material.validate()?;
        if self.concretes.iter().any(|m| m.matches(&material.designation)) {
            return Err(CalcError::invalid_input(
                "designation",
                material.designation,
                "Duplicate concrete grade",
            ));
        }
        self.concretes.push(material);
        Ok(())
    }

    pub fn steel(&self, name: &str) -> CalcResult<&SteelMaterial> {
        tracing::trace!(name, "steel grade lookup");
        self.steels
            .iter()
            .find(|m| m.matches(name))
            .ok_or_else(|| CalcError::not_found("Steel grade", name))
    }

    pub fn concrete(&self, name: &str) -> CalcResult<&ConcreteMaterial> {
        tracing::trace!(name, "concrete grade lookup");
        self.concretes
            .iter()
            .find(|m| m.matches(name))
            .ok_or_else(|| CalcError::not_found("Concrete grade", name))
    }

    pub fn steels(&self) -> &[SteelMaterial] {
        &self.steels
    }

    pub fn concretes(&self) -> &[ConcreteMaterial] {
        &self.concretes
    }
}

static BUILTIN_MATERIALS: Lazy<MaterialCatalog> = Lazy::new(|| MaterialCatalog {
    steels: steel::standard_grades(),
    concretes: concrete::standard_grades(),
});

/// Built-in steel and concrete grades
pub fn builtin_materials() -> &'static MaterialCatalog {
    &BUILTIN_MATERIALS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookups() {
        let m = builtin_materials();
        assert_eq!(m.steel("A36").unwrap().fu_mpa, 400.0);
        assert_eq!(m.steel("astm a36").unwrap().fy_mpa, 250.0);
        assert_eq!(m.steel("300w").unwrap().fy_mpa, 300.0);
        assert_eq!(m.concrete("c40").unwrap().fc_prime_mpa, 40.0);
        assert_eq!(m.steels().len(), 4);
        assert_eq!(m.concretes().len(), 5);
    }

    #[test]
    fn test_lookup_misses() {
        let m = builtin_materials();
        assert_eq!(m.steel("A572").unwrap_err().error_code(), "NOT_FOUND");
        assert_eq!(m.concrete("C50").unwrap_err().error_code(), "NOT_FOUND");
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "steels": [{"designation": "S355", "standard": "EN 10025", "fy_mpa": 355, "fu_mpa": 470}],
            "concretes": [{"designation": "C32", "fc_prime_mpa": 32}]
        }"#;
        let m = MaterialCatalog::from_json(json).unwrap();
        assert_eq!(m.steel("en 10025 s355").unwrap().fy_mpa, 355.0);
        assert_eq!(m.concrete("C32").unwrap().density_kg_m3, concrete::CONCRETE_DENSITY);
    }

    #[test]
    fn test_duplicates_rejected() {
        let mut m = MaterialCatalog::new();
        m.add_steel(SteelMaterial::a36()).unwrap();
        let err = m.add_steel(SteelMaterial::a36()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }
}
