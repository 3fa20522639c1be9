//! # Design Settings
//!
//! The design code and its resistance factors. Every evaluator takes a
//! [`DesignSettings`] explicitly; nothing infers the code from naming, so
//! AISC and CSA provisions are never blended inside one check.
//!
//! ## Example
//!
//! ```rust
//! use steel_core::settings::{DesignCode, DesignSettings};
//!
//! let csa = DesignSettings::new(DesignCode::CsaS16_19);
//! assert_eq!(csa.factors.bolt_shear, 0.80);
//!
//! // Override a single factor
//! let mut custom = DesignSettings::new(DesignCode::Aisc360_16);
//! custom.factors.compression = 0.85;
//! assert!(custom.validate().is_ok());
//! ```
//!
//! ## JSON
//!
//! ```json
//! { "code": "CsaS16_19", "factors": { "compression": 0.85 } }
//! ```
//!
//! Omitted factors fall back to the defaults of the named code.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::equations::registry::CodeReference;
use crate::errors::{CalcError, CalcResult};

/// Design standard whose resistance-factor convention applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DesignCode {
    /// AISC 360-16 (LRFD)
    Aisc360_16,
    /// CSA S16-19 (Limit States Design)
    CsaS16_19,
}

impl DesignCode {
    pub fn display_name(&self) -> &'static str {
        match self {
            DesignCode::Aisc360_16 => "AISC 360-16",
            DesignCode::CsaS16_19 => "CSA S16-19",
        }
    }

    /// Default resistance factors for this code
    pub fn resistance_factors(&self) -> ResistanceFactors {
        match self {
            DesignCode::Aisc360_16 => ResistanceFactors {
                compression: 0.90,
                flexure: 0.90,
                bolt_shear: 0.75,
                bolt_bearing: 0.75,
                block_shear: 0.75,
                concrete_bearing: 0.65,
                plate_bending: 0.90,
            },
            DesignCode::CsaS16_19 => ResistanceFactors {
                compression: 0.90,
                flexure: 0.90,
                bolt_shear: 0.80,
                bolt_bearing: 0.80,
                block_shear: 0.75,
                concrete_bearing: 0.65,
                plate_bending: 0.90,
            },
        }
    }

    /// Code reference for a clause of this standard
    pub fn clause(&self, clause: &'static str) -> CodeReference {
        match self {
            DesignCode::Aisc360_16 => CodeReference::AISC360 { year: 2016, section: clause },
            DesignCode::CsaS16_19 => CodeReference::CsaS16 { year: 2019, clause },
        }
    }
}

impl std::fmt::Display for DesignCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Resistance (φ) factors applied to nominal strengths.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResistanceFactors {
    /// Axial compression (φc)
    pub compression: f64,
    /// Flexure (φb)
    pub flexure: f64,
    /// Bolt shear
    pub bolt_shear: f64,
    /// Bolt bearing on connected plate (φbr)
    pub bolt_bearing: f64,
    /// Block shear rupture (φu)
    pub block_shear: f64,
    /// Concrete bearing under base plates
    pub concrete_bearing: f64,
    /// Base plate bending
    pub plate_bending: f64,
}

impl ResistanceFactors {
    fn entries(&self) -> [(&'static str, f64); 7] {
        [
            ("compression", self.compression),
            ("flexure", self.flexure),
            ("bolt_shear", self.bolt_shear),
            ("bolt_bearing", self.bolt_bearing),
            ("block_shear", self.block_shear),
            ("concrete_bearing", self.concrete_bearing),
            ("plate_bending", self.plate_bending),
        ]
    }
}

/// Partial factor set used when deserializing overrides.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
struct FactorOverrides {
    compression: Option<f64>,
    flexure: Option<f64>,
    bolt_shear: Option<f64>,
    bolt_bearing: Option<f64>,
    block_shear: Option<f64>,
    concrete_bearing: Option<f64>,
    plate_bending: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawSettings {
    code: DesignCode,
    #[serde(default)]
    factors: FactorOverrides,
}

/// Design code plus the resistance factors in force.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSettings")]
pub struct DesignSettings {
    pub code: DesignCode,
    pub factors: ResistanceFactors,
}

impl TryFrom<RawSettings> for DesignSettings {
    type Error = CalcError;

    fn try_from(raw: RawSettings) -> CalcResult<Self> {
        let d = raw.code.resistance_factors();
        let o = raw.factors;
        let settings = DesignSettings {
            code: raw.code,
            factors: ResistanceFactors {
                compression: o.compression.unwrap_or(d.compression),
                flexure: o.flexure.unwrap_or(d.flexure),
                bolt_shear: o.bolt_shear.unwrap_or(d.bolt_shear),
                bolt_bearing: o.bolt_bearing.unwrap_or(d.bolt_bearing),
                block_shear: o.block_shear.unwrap_or(d.block_shear),
                concrete_bearing: o.concrete_bearing.unwrap_or(d.concrete_bearing),
                plate_bending: o.plate_bending.unwrap_or(d.plate_bending),
            },
        };
        settings.validate()?;
        Ok(settings)
    }
}

impl DesignSettings {
    /// Settings with the code's default factors
    pub fn new(code: DesignCode) -> Self {
        Self {
            code,
            factors: code.resistance_factors(),
        }
    }

    /// Replace the whole factor set
    pub fn with_factors(code: DesignCode, factors: ResistanceFactors) -> CalcResult<Self> {
        let settings = Self { code, factors };
        settings.validate()?;
        Ok(settings)
    }

    /// Every factor must lie in (0, 1].
    pub fn validate(&self) -> CalcResult<()> {
        for (name, phi) in self.factors.entries() {
            if !(phi > 0.0 && phi <= 1.0) {
                return Err(CalcError::invalid_input(
                    format!("factors.{}", name),
                    phi.to_string(),
                    "Resistance factor must be in (0, 1]",
                ));
            }
        }
        Ok(())
    }

    /// Parse settings from JSON text
    pub fn from_json(json: &str) -> CalcResult<Self> {
        serde_json::from_str(json).map_err(|e| CalcError::SerializationError {
            reason: format!("Invalid design settings: {}", e),
        })
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> CalcResult<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
        let settings = Self::from_json(&contents)?;
        tracing::debug!(path = %path.display(), code = %settings.code, "loaded design settings");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_defaults() {
        let aisc = DesignSettings::new(DesignCode::Aisc360_16);
        assert_eq!(aisc.factors.compression, 0.90);
        assert_eq!(aisc.factors.bolt_shear, 0.75);

        let csa = DesignSettings::new(DesignCode::CsaS16_19);
        assert_eq!(csa.factors.bolt_shear, 0.80);
        assert_eq!(csa.factors.bolt_bearing, 0.80);
        assert_eq!(csa.factors.concrete_bearing, 0.65);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let mut s = DesignSettings::new(DesignCode::CsaS16_19);
        s.factors.flexure = 1.2;
        let err = s.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        s.factors.flexure = 0.0;
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_from_json_partial_overrides() {
        let s = DesignSettings::from_json(r#"{"code":"CsaS16_19","factors":{"compression":0.85}}"#).unwrap();
        assert_eq!(s.code, DesignCode::CsaS16_19);
        assert_eq!(s.factors.compression, 0.85);
        assert_eq!(s.factors.bolt_shear, 0.80);
    }

    #[test]
    fn test_from_json_without_factors() {
        let s = DesignSettings::from_json(r#"{"code":"Aisc360_16"}"#).unwrap();
        assert_eq!(s, DesignSettings::new(DesignCode::Aisc360_16));
    }

    #[test]
    fn test_from_json_invalid() {
        let err = DesignSettings::from_json(r#"{"code":"Eurocode3"}"#).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");

        let err = DesignSettings::from_json(r#"{"code":"Aisc360_16","factors":{"flexure":2.0}}"#).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_serialize_roundtrip() {
        let s = DesignSettings::new(DesignCode::Aisc360_16);
        let json = serde_json::to_string(&s).unwrap();
        let back = DesignSettings::from_json(&json).unwrap();
        assert_eq!(s, back);
    }

    #[test]
    fn test_load_missing_file() {
        let err = DesignSettings::load(Path::new("/nonexistent/settings.json")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_clause_reference() {
        let r = DesignCode::CsaS16_19.clause("13.3.1");
        assert_eq!(r.citation(), "CSA S16-19 Clause 13.3.1");
        let r = DesignCode::Aisc360_16.clause("E3");
        assert_eq!(r.citation(), "AISC 360-16 Section E3");
    }
}
