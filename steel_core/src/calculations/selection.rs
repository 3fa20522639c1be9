//! # Lightest Adequate Section
//!
//! Evaluates every section of a family in parallel and keeps the lightest
//! one that passes. Candidates are independent, so the scan is a `rayon`
//! parallel map; results are collected in catalog order and reduced
//! deterministically (minimum weight, ties to the earlier catalog entry).
//!
//! ## Example
//!
//! ```rust
//! use steel_core::calculations::column::{ColumnInput, EndConditions};
//! use steel_core::calculations::selection::lightest_column;
//! use steel_core::materials::{builtin_sections, SectionFamily, SteelMaterial};
//! use steel_core::settings::{DesignCode, DesignSettings};
//!
//! let input = ColumnInput::new("C-1", 3000.0, EndConditions::pinned()).with_demand(400.0);
//! let settings = DesignSettings::new(DesignCode::CsaS16_19);
//! let pick = lightest_column(builtin_sections(), SectionFamily::W, &input, &SteelMaterial::g40_350w(), &settings)
//!     .unwrap();
//! assert!(pick.result.utilization.unwrap() <= 1.0);
//! ```

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::beam::{self, BeamInput, BeamResult};
use super::column::{self, ColumnInput, ColumnResult};
use super::CapacityCheck;
use crate::errors::{CalcError, CalcResult};
use crate::materials::{SectionCatalog, SectionFamily, SectionRecord, SteelMaterial};
use crate::settings::DesignSettings;

/// The lightest passing section and its evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Selection<R> {
    pub section: String,
    /// Position in the catalog
    pub catalog_index: usize,
    pub weight_kg_m: f64,
    pub result: R,
    pub candidates_checked: usize,
    pub candidates_passing: usize,
}

/// Lightest record of `family` for which `evaluate` returns `Some`.
///
/// `evaluate` returns `Ok(None)` for a candidate that computes but is not
/// adequate. The first error in catalog order aborts the scan.
///
/// # Errors
///
/// * `NotFound` - The family has no records, or none is adequate
/// * Any error returned by `evaluate`
pub fn lightest_adequate<R, F>(catalog: &SectionCatalog, family: SectionFamily, evaluate: F) -> CalcResult<Selection<R>>
where
    R: Send,
    F: Fn(&SectionRecord) -> CalcResult<Option<R>> + Sync,
{
    let candidates: Vec<(usize, &SectionRecord)> =
        catalog.iter().enumerate().filter(|(_, r)| r.family == family).collect();
    if candidates.is_empty() {
        return Err(CalcError::not_found("Section family", family.code()));
    }

    let outcomes: Vec<CalcResult<Option<R>>> = candidates.par_iter().map(|(_, record)| evaluate(record)).collect();

    let checked = candidates.len();
    let mut passing = 0;
    let mut best: Option<(usize, &SectionRecord, R)> = None;
    for ((index, record), outcome) in candidates.into_iter().zip(outcomes) {
        let Some(result) = outcome? else {
            continue;
        };
        passing += 1;
        let lighter = match &best {
            None => true,
            Some((_, current, _)) => record.weight_kg_m < current.weight_kg_m,
        };
        if lighter {
            best = Some((index, record, result));
        }
    }

    let (catalog_index, record, result) =
        best.ok_or_else(|| CalcError::not_found(format!("Adequate {} section", family.code()), "no candidate passes"))?;

    tracing::debug!(
        family = %family,
        section = %record.name,
        checked,
        passing,
        "lightest adequate section"
    );

    Ok(Selection {
        section: record.name.clone(),
        catalog_index,
        weight_kg_m: record.weight_kg_m,
        result,
        candidates_checked: checked,
        candidates_passing: passing,
    })
}

/// Lightest section carrying the column's axial demand.
///
/// # Errors
///
/// * `InvalidInput` - `input` has no axial demand
/// * `NotFound` - No section in `family` is adequate
pub fn lightest_column(
    catalog: &SectionCatalog,
    family: SectionFamily,
    input: &ColumnInput,
    steel: &SteelMaterial,
    settings: &DesignSettings,
) -> CalcResult<Selection<ColumnResult>> {
    if input.axial_demand_kn.is_none() {
        return Err(CalcError::invalid_input(
            "axial_demand_kn",
            "none",
            "Selection needs an axial demand",
        ));
    }
    lightest_adequate(catalog, family, |section| {
        let result = column::calculate(input, section, steel, settings)?;
        Ok(adequate(&result).then_some(result))
    })
}

/// Lightest section carrying the beam's moment demand.
///
/// # Errors
///
/// * `InvalidInput` - `input` has no moment demand
/// * `UnsupportedShape` - `family` has no flanges
/// * `NotFound` - No section in `family` is adequate
pub fn lightest_beam(
    catalog: &SectionCatalog,
    family: SectionFamily,
    input: &BeamInput,
    steel: &SteelMaterial,
    settings: &DesignSettings,
) -> CalcResult<Selection<BeamResult>> {
    if input.moment_demand_knm.is_none() {
        return Err(CalcError::invalid_input(
            "moment_demand_knm",
            "none",
            "Selection needs a moment demand",
        ));
    }
    lightest_adequate(catalog, family, |section| {
        let result = beam::calculate(input, section, steel, settings)?;
        Ok(adequate(&result).then_some(result))
    })
}

fn adequate(check: &dyn CapacityCheck) -> bool {
    check.status().is_some_and(|s| s.is_pass())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::column::EndConditions;
    use crate::materials::builtin_sections;
    use crate::settings::DesignCode;

    fn aisc() -> DesignSettings {
        DesignSettings::new(DesignCode::Aisc360_16)
    }

    #[test]
    fn test_lightest_column_matches_brute_force() {
        let input = ColumnInput::new("C-1", 3000.0, EndConditions::pinned()).with_demand(300.0);
        let steel = SteelMaterial::a992();
        let pick = lightest_column(builtin_sections(), SectionFamily::W, &input, &steel, &aisc()).unwrap();

        let brute = builtin_sections()
            .records_of(SectionFamily::W)
            .filter(|r| {
                let r = column::calculate(&input, r, &steel, &aisc()).unwrap();
                r.utilization.unwrap() <= 1.0
            })
            .min_by(|a, b| a.weight_kg_m.total_cmp(&b.weight_kg_m))
            .unwrap();
        assert_eq!(pick.section, brute.name);
        assert!(pick.result.passes());
        assert!(pick.candidates_passing <= pick.candidates_checked);
        assert_eq!(pick.candidates_checked, builtin_sections().records_of(SectionFamily::W).count());
    }

    #[test]
    fn test_lightest_beam() {
        let input = BeamInput::new("B-1", 2000.0).with_demand(20.0);
        let pick = lightest_beam(builtin_sections(), SectionFamily::C, &input, &SteelMaterial::a36(), &aisc()).unwrap();
        assert_eq!(pick.result.section, pick.section);
        assert!(pick.result.utilization.unwrap() <= 1.0);
        for r in builtin_sections().records_of(SectionFamily::C) {
            if r.weight_kg_m < pick.weight_kg_m {
                let check = beam::calculate(&input, r, &SteelMaterial::a36(), &aisc()).unwrap();
                assert!(check.utilization.unwrap() > 1.0, "{} is lighter and passes", r.name);
            }
        }
    }

    #[test]
    fn test_demand_required() {
        let input = ColumnInput::new("C-1", 3000.0, EndConditions::pinned());
        let err = lightest_column(builtin_sections(), SectionFamily::W, &input, &SteelMaterial::a992(), &aisc())
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_nothing_adequate() {
        let input = ColumnInput::new("C-1", 3000.0, EndConditions::pinned()).with_demand(1.0e6);
        let err = lightest_column(builtin_sections(), SectionFamily::W, &input, &SteelMaterial::a992(), &aisc())
            .unwrap_err();
        assert_eq!(err.error_code(), "NOT_FOUND");

        let err = lightest_adequate(builtin_sections(), SectionFamily::HSS, |_| Ok(Some(()))).unwrap_err();
        assert_eq!(err.error_code(), "NOT_FOUND");
    }

    #[test]
    fn test_weight_tie_keeps_catalog_order() {
        // W14X22 and W10X22 share 32.7 kg/m; W10X22 comes first
        let pick = lightest_adequate(builtin_sections(), SectionFamily::W, |r| {
            Ok((r.weight_kg_m >= 32.7).then_some(()))
        })
        .unwrap();
        assert_eq!(pick.section, "W10X22");
    }

    #[test]
    fn test_first_error_in_catalog_order() {
        let err = lightest_adequate::<(), _>(builtin_sections(), SectionFamily::W, |r| match r.name.as_str() {
            "W6X12" => Err(CalcError::computation("scan", "first")),
            "W18X50" => Err(CalcError::computation("scan", "last")),
            _ => Ok(None),
        })
        .unwrap_err();
        assert_eq!(err, CalcError::computation("scan", "first"));
    }
}
